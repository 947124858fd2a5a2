//! Registration Flow Demo
//!
//! Drives the stock page set against the mock driver: provision a
//! fixture as worker 0, register an account, sign in, confirm arrival.
//! The contextual trail and the driver call history are printed side
//! by side, including the password mask.
//!
//! Run with: cargo run --example registration_flow -p navegar

use navegar::prelude::*;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> NavegarResult<()> {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║             Navegar Demo: Registration Flow                  ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    // Capture the trail instead of bridging it to the console.
    let capture = CaptureSink::new();
    install(&LoggerConfig::default().with_console(false));
    global().add_sink(Arc::new(capture.clone()));

    // =========================================================================
    // 1. Provision the page set as worker 0
    // =========================================================================
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  1. Provision the page set as worker 0");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    let mock = Arc::new(MockDriver::new());
    let driver: Arc<dyn Driver> = mock.clone();
    let fixture = PageFixture::provision(
        driver,
        ExecutionContext::with_index(0),
        &PageUrls::default(),
    )
    .await?;

    println!("  Pages attached: {:?}", Pages::NAMES);
    println!("  Worker prefix:  {}", fixture.context().prefix());
    println!();

    // =========================================================================
    // 2. Register an account
    // =========================================================================
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  2. Register an account (composite flow)");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    let form = RegistrationForm::new("John", "Doe", "john@example.com", "Secret123!");
    println!("  Form (note the masked Debug): {form:?}");
    fixture.pages().registration.register(&form).await?;
    println!("  ✓ navigate → 4 fills → submit");
    println!();

    // =========================================================================
    // 3. Sign in and confirm arrival
    // =========================================================================
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  3. Sign in and confirm arrival");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    fixture.pages().login.login(&form.credentials()).await?;
    mock.force_url("https://app.example.test/welcome?session=42");
    fixture
        .pages()
        .landing
        .await_arrival(Some(Duration::from_millis(250)))
        .await?;
    fixture.pages().landing.sign_out().await?;
    println!("  ✓ login → await /welcome → sign out");
    println!();

    // =========================================================================
    // 4. The contextual trail
    // =========================================================================
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  4. The contextual trail");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    for record in capture.records() {
        println!("    {record}");
    }
    println!();
    println!("  Every record carries [worker-0]; the password shows as {MASK_TOKEN}.");
    println!();

    // =========================================================================
    // 5. What the driver actually received
    // =========================================================================
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  5. What the driver actually received");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    for call in mock.calls() {
        println!("    • {} {call:?}", call.method());
    }
    println!();
    println!("  The raw password reaches the driver; only the trail is masked.");
    println!();

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                       Demo Complete                          ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    Ok(())
}
