//! Page Capability
//!
//! The behavior shared by every page variant, expressed as a trait with
//! provided methods rather than a base class. Concrete variants keep
//! their element handles and composite flows; everything
//! driver-and-logging shaped lives here.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::driver::{Driver, ElementHandle, DEFAULT_NAVIGATION_TIMEOUT_MS};
use crate::location::UrlPattern;
use crate::logging;
use crate::result::NavegarResult;

/// Selector of the alert region shared by the stock pages
pub const ALERT_REGION_SELECTOR: &str = "[role='alert']";

/// Capability set shared by all page variants
///
/// `name` and `url` are fixed at construction; every provided method
/// goes through the shared driver session. Nothing here retries: driver
/// failures propagate to the caller exactly as raised.
///
/// ```rust,no_run
/// use navegar::prelude::*;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> NavegarResult<()> {
///     let driver: Arc<dyn Driver> = Arc::new(MockDriver::new());
///     let pages = Pages::attach(&driver, &PageUrls::default()).await?;
///     pages.registration.open().await?;
///     pages.landing.await_arrival(None).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait Page: Send + Sync {
    /// Logical page name used in log pre-filling and fixture lookup
    fn name(&self) -> &str;

    /// The page's fixed URL
    fn url(&self) -> &str;

    /// Shared driver session
    fn driver(&self) -> &Arc<dyn Driver>;

    /// Selector of this page's alert region
    fn alert_selector(&self) -> &str {
        ALERT_REGION_SELECTOR
    }

    /// The browser's current location
    ///
    /// # Errors
    /// [`crate::NavegarError::DriverUnavailable`] when the session
    /// cannot be queried.
    async fn current_location(&self) -> NavegarResult<String> {
        self.driver().current_url().await
    }

    /// Navigate to `target`, logging the page action before driving
    ///
    /// The log record is emitted first so the trail shows the attempt
    /// even when the driver refuses it.
    ///
    /// # Errors
    /// [`crate::NavegarError::Navigation`] exactly as the driver raised
    /// it.
    async fn navigate_to(&self, target: &str) -> NavegarResult<()> {
        logging::log_page_action(self.name(), "navigate", Some(target));
        self.driver().navigate(target).await
    }

    /// Navigate to this page's own URL
    ///
    /// # Errors
    /// Same as [`Page::navigate_to`].
    async fn open(&self) -> NavegarResult<()> {
        self.navigate_to(self.url()).await
    }

    /// Suspend until the browser location matches `target`
    ///
    /// Absolute targets must match the full URL; anything else matches
    /// the path component. `timeout` defaults to
    /// [`DEFAULT_NAVIGATION_TIMEOUT_MS`]. The wait suspends the task
    /// instead of blocking a thread, and dropping the future cancels
    /// it.
    ///
    /// # Errors
    /// [`crate::NavegarError::NavigationTimeout`] when `target` was not
    /// reached in time; any other driver error as soon as it occurs.
    async fn await_location(&self, target: &str, timeout: Option<Duration>) -> NavegarResult<()> {
        let pattern = UrlPattern::for_target(target);
        let timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_NAVIGATION_TIMEOUT_MS));
        self.driver().wait_for_url(&pattern, timeout).await
    }

    /// Locate this page's alert region
    ///
    /// # Errors
    /// [`crate::NavegarError::ElementInteraction`] when the region
    /// cannot be resolved.
    async fn alert_region(&self) -> NavegarResult<ElementHandle> {
        self.log_element_action("locate", "alert region", None);
        self.driver().locate(self.alert_selector()).await
    }

    /// Element-level logging with this page's name pre-filled
    fn log_element_action(&self, action: &str, element: &str, value: Option<&str>) {
        logging::log_element_action(self.name(), action, element, value);
    }
}
