//! Worker-Scoped Contextual Logging
//!
//! Structured, leveled log records stamped with the owning worker's
//! execution context. Emission is fire-and-forget: a log call never
//! panics and never returns an error, and sink failures are swallowed
//! and counted instead of reaching the caller.
//!
//! The context is a single process-wide cell. Under a
//! process-per-parallel-slot runner every record is attributed exactly;
//! under thread-parallel runners attribution is best-effort, which the
//! logging contract accepts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};

use crate::result::NavegarError;

/// Fixed token callers substitute for secret values in element logs
///
/// The logger itself redacts nothing; masking is the caller's decision.
pub const MASK_TOKEN: &str = "***";

/// Identity of the parallel worker that owns this process
///
/// Either field may be absent. `id` wins over `index` when deriving the
/// log prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionContext {
    /// Explicit worker id
    pub id: Option<String>,
    /// Zero-based parallel slot index
    pub index: Option<u32>,
}

impl ExecutionContext {
    /// Context with neither id nor index (empty prefix)
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            id: None,
            index: None,
        }
    }

    /// Context identified by an explicit id
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            index: None,
        }
    }

    /// Context identified by a worker slot index
    #[must_use]
    pub const fn with_index(index: u32) -> Self {
        Self {
            id: None,
            index: Some(index),
        }
    }

    /// Log prefix for this context
    ///
    /// `id` wins when both fields are set; an index alone renders
    /// `worker-{index}`; an empty context renders an empty prefix.
    ///
    /// ```rust
    /// use navegar::ExecutionContext;
    ///
    /// assert_eq!(ExecutionContext::with_index(0).prefix(), "worker-0");
    /// assert_eq!(ExecutionContext::with_id("ci-3").prefix(), "ci-3");
    /// assert_eq!(ExecutionContext::empty().prefix(), "");
    /// ```
    #[must_use]
    pub fn prefix(&self) -> String {
        match (&self.id, self.index) {
            (Some(id), _) => id.clone(),
            (None, Some(index)) => format!("worker-{index}"),
            (None, None) => String::new(),
        }
    }
}

/// Record severity, ordered from chattiest to most severe
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Single element interactions (fill, click, locate)
    Element,
    /// Page-level actions (navigation, composite steps)
    Method,
    /// Assertion outcomes
    Assert,
    /// Test lifecycle events
    Test,
    /// Failures
    Error,
}

impl LogLevel {
    /// Lowercase name, stable across `Display`, serde and `FromStr`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Element => "element",
            Self::Method => "method",
            Self::Assert => "assert",
            Self::Test => "test",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = NavegarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "element" => Ok(Self::Element),
            "method" => Ok(Self::Method),
            "assert" => Ok(Self::Assert),
            "test" => Ok(Self::Test),
            "error" => Ok(Self::Error),
            other => Err(NavegarError::Config {
                message: format!("unknown log level: {other}"),
            }),
        }
    }
}

/// One emitted log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Emission time (UTC)
    pub timestamp: DateTime<Utc>,
    /// Severity
    pub level: LogLevel,
    /// Worker prefix captured at emission time; may be empty
    pub context: String,
    /// Human-readable message
    pub message: String,
    /// Optional supplement: error chains, element values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl LogRecord {
    /// Record stamped now with the given context prefix
    #[must_use]
    pub fn new(
        level: LogLevel,
        context: impl Into<String>,
        message: impl Into<String>,
        detail: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            context: context.into(),
            message: message.into(),
            detail,
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.timestamp.to_rfc3339())?;
        if !self.context.is_empty() {
            write!(f, " [{}]", self.context)?;
        }
        write!(f, " {} {}", self.level, self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

/// Destination for emitted records
///
/// Sinks may fail; the logger swallows failures and counts them instead
/// of surfacing them to the logging caller.
pub trait LogSink: Send + Sync {
    /// Write one record
    ///
    /// # Errors
    /// Returns an error when the destination rejected the record.
    fn write(&self, record: &LogRecord) -> io::Result<()>;
}

/// Sink forwarding records to the `tracing` ecosystem
///
/// Levels map error→ERROR, test/assert→INFO, method→DEBUG,
/// element→TRACE, so the usual subscriber filters apply. Cannot fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, record: &LogRecord) -> io::Result<()> {
        let context = record.context.as_str();
        let detail = record.detail.as_deref().unwrap_or_default();
        match record.level {
            LogLevel::Error => tracing::error!(context, detail, "{}", record.message),
            LogLevel::Test | LogLevel::Assert => {
                tracing::info!(context, level = %record.level, detail, "{}", record.message);
            }
            LogLevel::Method => tracing::debug!(context, detail, "{}", record.message),
            LogLevel::Element => tracing::trace!(context, detail, "{}", record.message),
        }
        Ok(())
    }
}

/// Durable sink appending one JSON object per line
#[derive(Debug)]
pub struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    /// Open (create or append to) the log file at `path`
    ///
    /// # Errors
    /// Returns an error when the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl LogSink for FileSink {
    fn write(&self, record: &LogRecord) -> io::Result<()> {
        let json = serde_json::to_string(record).map_err(io::Error::other)?;
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(file, "{json}")
    }
}

/// In-memory sink for test assertions
///
/// Cloning shares the underlying buffer, so a test can keep one handle
/// while the logger owns another.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl CaptureSink {
    /// Empty capture buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything captured so far
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Discard everything captured so far
    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LogSink for CaptureSink {
    fn write(&self, record: &LogRecord) -> io::Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }
}

/// Startup surface of the contextual logger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Minimum level a record needs to reach any sink
    pub min_level: LogLevel,
    /// Forward records to the `tracing` console bridge
    pub console: bool,
    /// Append records as JSON lines to this file
    pub file: Option<PathBuf>,
}

impl LoggerConfig {
    /// Set the minimum level
    #[must_use]
    pub const fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Toggle the console bridge
    #[must_use]
    pub const fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// Append records to the file at `path`
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Element,
            console: true,
            file: None,
        }
    }
}

/// Leveled, contextual logger with swallowed sink failures
///
/// The minimum level is fixed at construction; sinks can be attached
/// later (test captures, extra destinations). Every emission stamps the
/// record with the current process-wide context prefix.
pub struct TestLogger {
    min_level: LogLevel,
    sinks: RwLock<Vec<Arc<dyn LogSink>>>,
    dropped: AtomicU64,
}

impl fmt::Debug for TestLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sinks = self.sinks.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("TestLogger")
            .field("min_level", &self.min_level)
            .field("sinks", &sinks.len())
            .field("dropped", &self.dropped.load(Ordering::Relaxed))
            .finish()
    }
}

impl TestLogger {
    /// Logger built from a startup config
    ///
    /// A file sink that cannot be opened is skipped with a `tracing`
    /// warning; the logger keeps working with whatever sinks remain.
    #[must_use]
    pub fn new(config: &LoggerConfig) -> Self {
        let mut sinks: Vec<Arc<dyn LogSink>> = Vec::new();
        if config.console {
            sinks.push(Arc::new(ConsoleSink));
        }
        if let Some(path) = &config.file {
            match FileSink::open(path) {
                Ok(sink) => sinks.push(Arc::new(sink)),
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "log file unavailable, continuing without it");
                }
            }
        }
        Self {
            min_level: config.min_level,
            sinks: RwLock::new(sinks),
            dropped: AtomicU64::new(0),
        }
    }

    /// Attach another sink
    pub fn add_sink(&self, sink: Arc<dyn LogSink>) {
        self.sinks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sink);
    }

    /// Minimum level fixed at construction
    #[must_use]
    pub const fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Records rejected by sinks since construction
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Emit at `level` with the current worker prefix
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.log_with(level, message, None);
    }

    /// Emit with an optional detail payload
    pub fn log_with(&self, level: LogLevel, message: impl Into<String>, detail: Option<String>) {
        if level < self.min_level {
            return;
        }
        let record = LogRecord::new(
            level,
            current_execution_context().prefix(),
            message,
            detail,
        );
        self.dispatch(&record);
    }

    /// Assertion outcome at `assert` level
    pub fn log_assertion(&self, description: &str, detail: Option<&str>) {
        self.log_with(LogLevel::Assert, description, detail.map(str::to_owned));
    }

    /// Page-level action at `method` level
    pub fn log_page_action(&self, page: &str, action: &str, detail: Option<&str>) {
        self.log_with(
            LogLevel::Method,
            format!("{page}: {action}"),
            detail.map(str::to_owned),
        );
    }

    /// Element interaction at `element` level
    ///
    /// `value` is recorded verbatim; callers mask secrets with
    /// [`MASK_TOKEN`] before logging.
    pub fn log_element_action(&self, page: &str, action: &str, element: &str, value: Option<&str>) {
        self.log_with(
            LogLevel::Element,
            format!("{page}: {action} {element}"),
            value.map(str::to_owned),
        );
    }

    /// Failure at `error` level, with the source chain as detail
    pub fn log_error(&self, error: &dyn std::error::Error, context: Option<&str>) {
        let message = match context {
            Some(context) => format!("{context}: {error}"),
            None => error.to_string(),
        };
        let mut chain = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        let detail = if chain.is_empty() {
            None
        } else {
            Some(chain.join(" <- "))
        };
        self.log_with(LogLevel::Error, message, detail);
    }

    fn dispatch(&self, record: &LogRecord) {
        let sinks = self.sinks.read().unwrap_or_else(PoisonError::into_inner);
        for sink in &*sinks {
            if sink.write(record).is_err() {
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

static CONTEXT: RwLock<ExecutionContext> = RwLock::new(ExecutionContext::empty());
static LOGGER: OnceLock<TestLogger> = OnceLock::new();

/// Replace the process-wide execution context
///
/// Overwrite semantics: the previous context is discarded wholesale, so
/// repeated calls with the same value are idempotent and prefixes never
/// accumulate.
pub fn set_execution_context(context: ExecutionContext) {
    *CONTEXT.write().unwrap_or_else(PoisonError::into_inner) = context;
}

/// Snapshot of the process-wide execution context
#[must_use]
pub fn current_execution_context() -> ExecutionContext {
    CONTEXT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Install the process-wide logger
///
/// The first call wins and returns `true`; later calls are ignored.
/// Code that never installs one gets a lazy default (console bridge,
/// most verbose level) on first use.
pub fn install(config: &LoggerConfig) -> bool {
    LOGGER.set(TestLogger::new(config)).is_ok()
}

/// The process-wide logger, installing the default on first use
pub fn global() -> &'static TestLogger {
    LOGGER.get_or_init(|| TestLogger::new(&LoggerConfig::default()))
}

/// Emit at `level` through the process-wide logger
pub fn log(level: LogLevel, message: impl Into<String>) {
    global().log(level, message);
}

/// Assertion outcome through the process-wide logger
pub fn log_assertion(description: &str, detail: Option<&str>) {
    global().log_assertion(description, detail);
}

/// Page-level action through the process-wide logger
pub fn log_page_action(page: &str, action: &str, detail: Option<&str>) {
    global().log_page_action(page, action, detail);
}

/// Element interaction through the process-wide logger
pub fn log_element_action(page: &str, action: &str, element: &str, value: Option<&str>) {
    global().log_element_action(page, action, element, value);
}

/// Failure through the process-wide logger
pub fn log_error(error: &dyn std::error::Error, context: Option<&str>) {
    global().log_error(error, context);
}

/// Install a fmt `tracing` subscriber honoring `RUST_LOG`
///
/// Falls back to `default_filter` when `RUST_LOG` is unset or invalid.
/// Safe to call more than once; only the first installation takes
/// effect.
pub fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn capturing_logger(min_level: LogLevel) -> (TestLogger, CaptureSink) {
        let config = LoggerConfig::default()
            .with_console(false)
            .with_min_level(min_level);
        let logger = TestLogger::new(&config);
        let capture = CaptureSink::new();
        logger.add_sink(Arc::new(capture.clone()));
        (logger, capture)
    }

    mod context_tests {
        use super::*;

        #[test]
        fn test_prefix_id_wins_over_index() {
            let context = ExecutionContext {
                id: Some("ci-3".to_string()),
                index: Some(7),
            };
            assert_eq!(context.prefix(), "ci-3");
        }

        #[test]
        fn test_prefix_from_index() {
            assert_eq!(ExecutionContext::with_index(0).prefix(), "worker-0");
            assert_eq!(ExecutionContext::with_index(12).prefix(), "worker-12");
        }

        #[test]
        fn test_prefix_empty_context() {
            assert_eq!(ExecutionContext::empty().prefix(), "");
            assert_eq!(ExecutionContext::default().prefix(), "");
        }

        #[test]
        fn test_with_id_constructor() {
            let context = ExecutionContext::with_id("w1");
            assert_eq!(context.id.as_deref(), Some("w1"));
            assert!(context.index.is_none());
        }
    }

    mod level_tests {
        use super::*;

        #[test]
        fn test_ordering_chattiest_to_most_severe() {
            assert!(LogLevel::Element < LogLevel::Method);
            assert!(LogLevel::Method < LogLevel::Assert);
            assert!(LogLevel::Assert < LogLevel::Test);
            assert!(LogLevel::Test < LogLevel::Error);
        }

        #[test]
        fn test_as_str_round_trips_from_str() {
            for level in [
                LogLevel::Element,
                LogLevel::Method,
                LogLevel::Assert,
                LogLevel::Test,
                LogLevel::Error,
            ] {
                assert_eq!(level.as_str().parse::<LogLevel>().unwrap(), level);
            }
        }

        #[test]
        fn test_from_str_is_case_insensitive() {
            assert_eq!(" Error ".parse::<LogLevel>().unwrap(), LogLevel::Error);
            assert_eq!("METHOD".parse::<LogLevel>().unwrap(), LogLevel::Method);
        }

        #[test]
        fn test_from_str_rejects_unknown_names() {
            let error = "loud".parse::<LogLevel>().unwrap_err();
            assert_eq!(
                error,
                NavegarError::Config {
                    message: "unknown log level: loud".to_string()
                }
            );
        }

        #[test]
        fn test_serde_uses_lowercase_names() {
            let json = serde_json::to_string(&LogLevel::Assert).unwrap();
            assert_eq!(json, "\"assert\"");
            let level: LogLevel = serde_json::from_str("\"element\"").unwrap();
            assert_eq!(level, LogLevel::Element);
        }
    }

    mod record_tests {
        use super::*;

        #[test]
        fn test_display_includes_context_brackets() {
            let record = LogRecord::new(
                LogLevel::Method,
                "worker-0",
                "registration: navigate",
                None,
            );
            let line = record.to_string();
            assert!(line.contains("[worker-0]"));
            assert!(line.contains("method registration: navigate"));
        }

        #[test]
        fn test_display_omits_empty_context() {
            let record = LogRecord::new(LogLevel::Test, "", "suite started", None);
            assert!(!record.to_string().contains('['));
        }

        #[test]
        fn test_display_appends_detail() {
            let record = LogRecord::new(
                LogLevel::Element,
                "worker-0",
                "login: fill email",
                Some("john@example.com".to_string()),
            );
            assert!(record.to_string().ends_with("(john@example.com)"));
        }

        #[test]
        fn test_json_skips_absent_detail() {
            let record = LogRecord::new(LogLevel::Test, "worker-0", "starting", None);
            let json = serde_json::to_string(&record).unwrap();
            assert!(!json.contains("detail"));
        }

        #[test]
        fn test_json_round_trip() {
            let record = LogRecord::new(
                LogLevel::Error,
                "ci-1",
                "navigation failed",
                Some("connection refused".to_string()),
            );
            let json = serde_json::to_string(&record).unwrap();
            let back: LogRecord = serde_json::from_str(&json).unwrap();
            assert_eq!(back, record);
        }
    }

    mod logger_tests {
        use super::*;

        struct FailingSink;

        impl LogSink for FailingSink {
            fn write(&self, _record: &LogRecord) -> io::Result<()> {
                Err(io::Error::other("sink rejected record"))
            }
        }

        #[test]
        fn test_min_level_drops_chattier_records() {
            let (logger, capture) = capturing_logger(LogLevel::Assert);
            logger.log(LogLevel::Element, "dropped");
            logger.log(LogLevel::Method, "dropped");
            logger.log(LogLevel::Assert, "kept");
            logger.log(LogLevel::Error, "kept");
            let levels: Vec<LogLevel> = capture.records().iter().map(|r| r.level).collect();
            assert_eq!(levels, vec![LogLevel::Assert, LogLevel::Error]);
        }

        #[test]
        fn test_every_sink_sees_each_record() {
            let (logger, first) = capturing_logger(LogLevel::Element);
            let second = CaptureSink::new();
            logger.add_sink(Arc::new(second.clone()));
            logger.log(LogLevel::Test, "shared");
            assert_eq!(first.records().len(), 1);
            assert_eq!(second.records().len(), 1);
        }

        #[test]
        fn test_sink_failures_are_swallowed_and_counted() {
            let (logger, capture) = capturing_logger(LogLevel::Element);
            logger.add_sink(Arc::new(FailingSink));
            logger.log(LogLevel::Test, "first");
            logger.log(LogLevel::Test, "second");
            assert_eq!(logger.dropped(), 2);
            assert_eq!(capture.records().len(), 2);
        }

        #[test]
        fn test_element_action_message_shape() {
            let (logger, capture) = capturing_logger(LogLevel::Element);
            logger.log_element_action("registration", "fill", "email", Some("john@example.com"));
            let records = capture.records();
            assert_eq!(records[0].level, LogLevel::Element);
            assert_eq!(records[0].message, "registration: fill email");
            assert_eq!(records[0].detail.as_deref(), Some("john@example.com"));
        }

        #[test]
        fn test_logger_records_values_verbatim() {
            // Redaction is the caller's job; the logger must not alter values.
            let (logger, capture) = capturing_logger(LogLevel::Element);
            logger.log_element_action("registration", "fill", "password", Some("Secret123!"));
            assert_eq!(capture.records()[0].detail.as_deref(), Some("Secret123!"));
        }

        #[test]
        fn test_page_action_message_shape() {
            let (logger, capture) = capturing_logger(LogLevel::Element);
            logger.log_page_action("login", "navigate", Some("https://x.test/login"));
            let records = capture.records();
            assert_eq!(records[0].level, LogLevel::Method);
            assert_eq!(records[0].message, "login: navigate");
            assert_eq!(records[0].detail.as_deref(), Some("https://x.test/login"));
        }

        #[test]
        fn test_assertion_level() {
            let (logger, capture) = capturing_logger(LogLevel::Element);
            logger.log_assertion("welcome banner visible", None);
            assert_eq!(capture.records()[0].level, LogLevel::Assert);
            assert_eq!(capture.records()[0].message, "welcome banner visible");
        }

        #[test]
        fn test_error_detail_carries_source_chain() {
            #[derive(Debug, thiserror::Error)]
            #[error("inner cause")]
            struct Inner;

            #[derive(Debug, thiserror::Error)]
            #[error("outer failed")]
            struct Outer {
                #[source]
                inner: Inner,
            }

            let (logger, capture) = capturing_logger(LogLevel::Element);
            let error = Outer { inner: Inner };
            logger.log_error(&error, Some("during login"));
            let records = capture.records();
            assert_eq!(records[0].level, LogLevel::Error);
            assert_eq!(records[0].message, "during login: outer failed");
            assert_eq!(records[0].detail.as_deref(), Some("inner cause"));
        }

        #[test]
        fn test_error_without_context_or_source() {
            let (logger, capture) = capturing_logger(LogLevel::Element);
            let error = NavegarError::DriverUnavailable {
                message: "gone".to_string(),
            };
            logger.log_error(&error, None);
            let records = capture.records();
            assert_eq!(records[0].message, "Driver unavailable: gone");
            assert!(records[0].detail.is_none());
        }

        #[test]
        fn test_mask_token_is_stable() {
            assert_eq!(MASK_TOKEN, "***");
        }
    }

    mod file_sink_tests {
        use super::*;

        #[test]
        fn test_appends_json_lines() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("run.log");
            let sink = FileSink::open(&path).unwrap();
            sink.write(&LogRecord::new(LogLevel::Test, "worker-0", "one", None))
                .unwrap();
            sink.write(&LogRecord::new(
                LogLevel::Error,
                "worker-0",
                "two",
                Some("boom".to_string()),
            ))
            .unwrap();

            let contents = std::fs::read_to_string(&path).unwrap();
            let lines: Vec<&str> = contents.lines().collect();
            assert_eq!(lines.len(), 2);
            let first: LogRecord = serde_json::from_str(lines[0]).unwrap();
            assert_eq!(first.message, "one");
            let second: LogRecord = serde_json::from_str(lines[1]).unwrap();
            assert_eq!(second.detail.as_deref(), Some("boom"));
        }

        #[test]
        fn test_logger_config_wires_file_sink() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("wired.log");
            let config = LoggerConfig::default()
                .with_console(false)
                .with_file(&path);
            let logger = TestLogger::new(&config);
            logger.log(LogLevel::Test, "persisted");
            let contents = std::fs::read_to_string(&path).unwrap();
            assert!(contents.contains("persisted"));
        }

        #[test]
        fn test_unopenable_file_is_skipped_not_fatal() {
            let config = LoggerConfig::default()
                .with_console(false)
                .with_file("/nonexistent-dir/run.log");
            let logger = TestLogger::new(&config);
            // No sink, but logging still must not fail.
            logger.log(LogLevel::Error, "nowhere to go");
            assert_eq!(logger.dropped(), 0);
        }
    }

    mod global_tests {
        use super::*;
        use crate::test_support::global_guard;

        #[tokio::test]
        async fn test_set_context_overwrites_wholesale() {
            let _guard = global_guard().await;
            set_execution_context(ExecutionContext::with_id("first"));
            set_execution_context(ExecutionContext::with_index(4));
            let current = current_execution_context();
            assert!(current.id.is_none());
            assert_eq!(current.index, Some(4));
            set_execution_context(ExecutionContext::empty());
        }

        #[tokio::test]
        async fn test_repeated_set_never_accumulates_prefix() {
            let _guard = global_guard().await;
            let (logger, capture) = capturing_logger(LogLevel::Element);
            set_execution_context(ExecutionContext::with_index(0));
            set_execution_context(ExecutionContext::with_index(0));
            logger.log(LogLevel::Test, "attributed");
            assert_eq!(capture.records()[0].context, "worker-0");
            set_execution_context(ExecutionContext::empty());
        }

        #[tokio::test]
        async fn test_prefix_is_captured_at_emission_time() {
            let _guard = global_guard().await;
            let (logger, capture) = capturing_logger(LogLevel::Element);
            set_execution_context(ExecutionContext::with_id("a"));
            logger.log(LogLevel::Test, "first");
            set_execution_context(ExecutionContext::with_id("b"));
            logger.log(LogLevel::Test, "second");
            let contexts: Vec<String> =
                capture.records().iter().map(|r| r.context.clone()).collect();
            assert_eq!(contexts, vec!["a".to_string(), "b".to_string()]);
            set_execution_context(ExecutionContext::empty());
        }

        #[tokio::test]
        async fn test_second_install_is_ignored() {
            let _guard = global_guard().await;
            let config = LoggerConfig::default();
            let _ = install(&config);
            assert!(!install(&config));
        }

        #[tokio::test]
        async fn test_free_functions_reach_attached_sinks() {
            let _guard = global_guard().await;
            let capture = CaptureSink::new();
            global().add_sink(Arc::new(capture.clone()));
            set_execution_context(ExecutionContext::with_id("free"));
            log_element_action("login", "fill", "email", Some("a@b.test"));
            log_page_action("login", "navigate", None);
            log_assertion("logged in", None);
            log(LogLevel::Test, "done");
            let records = capture.records();
            assert_eq!(records.len(), 4);
            assert!(records.iter().all(|r| r.context == "free"));
            set_execution_context(ExecutionContext::empty());
        }
    }
}
