//! Navegar: Page-Object Browser Testing with Worker-Scoped Trails
//!
//! Navegar (Spanish: "to navigate") is the page-object core of a browser
//! test harness: typed pages over a pluggable driver session, with every
//! interaction logged under the worker that performed it. Parallel
//! suites get attributable trails; secrets get masked before they reach
//! any sink.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐    ┌────────────┐    ┌────────────┐
//! │ Test body  │───►│ Page set   │───►│ Driver     │
//! │ (worker N) │    │ (fixture)  │    │ session    │
//! └────────────┘    └─────┬──────┘    └────────────┘
//!                         │
//!                   ┌─────▼──────┐
//!                   │ Trail      │
//!                   │ [worker-N] │
//!                   └────────────┘
//! ```
//!
//! # Worker context
//!
//! ```rust
//! use navegar::{ExecutionContext, LogLevel, LoggerConfig};
//!
//! let context = ExecutionContext::with_index(2);
//! assert_eq!(context.prefix(), "worker-2");
//!
//! let config = LoggerConfig::default().with_min_level(LogLevel::Method);
//! assert_eq!(config.min_level, LogLevel::Method);
//! ```
//!
//! # Driving a page set
//!
//! ```rust,no_run
//! use navegar::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> NavegarResult<()> {
//!     let driver: Arc<dyn Driver> = Arc::new(MockDriver::new());
//!     let fixture = PageFixture::provision(
//!         driver,
//!         ExecutionContext::with_index(0),
//!         &PageUrls::default(),
//!     )
//!     .await?;
//!
//!     let form = RegistrationForm::new("John", "Doe", "john@example.com", "Secret123!");
//!     fixture.pages().registration.register(&form).await?;
//!     fixture.pages().landing.await_arrival(None).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod config;
pub mod driver;
pub mod fixture;
pub mod forms;
pub mod location;
pub mod logging;
pub mod page;
pub mod pages;
mod result;

pub use config::{HarnessConfig, PageUrls, DEFAULT_BASE_URL};
pub use driver::{
    Driver, DriverCall, ElementHandle, MockDriver, DEFAULT_NAVIGATION_TIMEOUT_MS,
    DEFAULT_POLL_INTERVAL_MS,
};
pub use fixture::{PageFixture, Pages};
pub use forms::{Credentials, RegistrationForm};
pub use location::{path_of, UrlPattern};
pub use logging::{
    current_execution_context, global, init_tracing, install, log, log_assertion,
    log_element_action, log_error, log_page_action, set_execution_context, CaptureSink,
    ConsoleSink, ExecutionContext, FileSink, LogLevel, LogRecord, LogSink, LoggerConfig,
    TestLogger, MASK_TOKEN,
};
pub use page::{Page, ALERT_REGION_SELECTOR};
pub use pages::{LandingPage, LoginPage, RegistrationPage};
pub use result::{NavegarError, NavegarResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::config::*;
    pub use super::driver::*;
    pub use super::fixture::*;
    pub use super::forms::*;
    pub use super::location::*;
    pub use super::logging::*;
    pub use super::page::*;
    pub use super::pages::*;
    pub use super::result::*;
}
