//! Worker Logging Demo
//!
//! The contextual trail on its own: worker prefixes, level filtering,
//! the mask token, and JSON-line rendering for file sinks.
//!
//! Run with: cargo run --example worker_logging -p navegar

use navegar::prelude::*;
use std::sync::Arc;

fn main() {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║              Navegar Demo: Worker Logging                    ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    // =========================================================================
    // 1. Execution contexts and their prefixes
    // =========================================================================
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  1. Execution contexts and their prefixes");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    let contexts = [
        ExecutionContext::empty(),
        ExecutionContext::with_index(3),
        ExecutionContext::with_id("shard-b"),
        ExecutionContext {
            id: Some("shard-b".to_string()),
            index: Some(3),
        },
    ];
    for context in &contexts {
        println!("    {:<40} → {:?}", format!("{context:?}"), context.prefix());
    }
    println!();
    println!("  An explicit id always beats the index.");
    println!();

    // =========================================================================
    // 2. Level filtering at the installed minimum
    // =========================================================================
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  2. Level filtering at the installed minimum");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    let config = LoggerConfig::default()
        .with_console(false)
        .with_min_level(LogLevel::Method);
    let installed = install(&config);
    println!("  install(min = method, console = off): {installed}");

    let capture = CaptureSink::new();
    global().add_sink(Arc::new(capture.clone()));

    log(LogLevel::Element, "below the minimum, never recorded");
    log(LogLevel::Method, "at the minimum, recorded");
    log(LogLevel::Error, "above the minimum, recorded");

    println!("  Records kept: {}", capture.records().len());
    for record in capture.records() {
        println!("    {} {}", record.level, record.message);
    }
    println!();

    // =========================================================================
    // 3. One process, many workers
    // =========================================================================
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  3. One process, many workers");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    capture.clear();
    for index in 0..3 {
        set_execution_context(ExecutionContext::with_index(index));
        log_page_action("login", "navigate", Some("https://app.example.test/login"));
    }
    for record in capture.records() {
        println!("    {record}");
    }
    println!();
    println!("  The prefix is captured at emission time, not at sink time.");
    println!();

    // =========================================================================
    // 4. Sensitive values stay out of the trail
    // =========================================================================
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  4. Sensitive values stay out of the trail");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    capture.clear();
    set_execution_context(ExecutionContext::with_index(0));
    log_element_action("login", "fill", "email", Some("john@example.com"));
    log_element_action("login", "fill", "password", Some(MASK_TOKEN));
    log_assertion("greeting shows the account name", Some("John"));
    for record in capture.records() {
        println!("    {record}");
    }
    println!();

    // =========================================================================
    // 5. JSON lines, as a file sink writes them
    // =========================================================================
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  5. JSON lines, as a file sink writes them");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    for record in capture.records() {
        match serde_json::to_string(&record) {
            Ok(line) => println!("    {line}"),
            Err(error) => println!("    <unserializable: {error}>"),
        }
    }
    println!();
    println!("  `detail` is omitted entirely when absent.");
    println!();

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                       Demo Complete                          ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
}
