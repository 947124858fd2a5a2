//! Landing Page
//!
//! The post-authentication destination. No composite form flow here;
//! the page's job is confirming arrival and offering sign-out.

use std::sync::Arc;
use std::time::Duration;

use crate::driver::{Driver, ElementHandle};
use crate::location::path_of;
use crate::page::Page;
use crate::result::NavegarResult;

/// Landing page bound to a driver session
pub struct LandingPage {
    driver: Arc<dyn Driver>,
    url: String,
    greeting: ElementHandle,
    sign_out: ElementHandle,
}

impl LandingPage {
    /// Logical name on the trail and in fixture lookup
    pub const NAME: &'static str = "landing";

    /// Greeting banner selector
    pub const SELECTOR_GREETING: &'static str = "[data-testid='greeting']";
    /// Sign-out control selector
    pub const SELECTOR_SIGN_OUT: &'static str = "button[data-testid='sign-out']";

    /// Resolve the page's element handles against `driver`
    ///
    /// # Errors
    /// [`crate::NavegarError::ElementInteraction`] when any selector
    /// fails to resolve.
    pub async fn attach(driver: Arc<dyn Driver>, url: impl Into<String>) -> NavegarResult<Self> {
        let greeting = driver.locate(Self::SELECTOR_GREETING).await?;
        let sign_out = driver.locate(Self::SELECTOR_SIGN_OUT).await?;
        Ok(Self {
            driver,
            url: url.into(),
            greeting,
            sign_out,
        })
    }

    /// Handle of the greeting banner
    #[must_use]
    pub const fn greeting(&self) -> &ElementHandle {
        &self.greeting
    }

    /// Handle of the sign-out control
    #[must_use]
    pub const fn sign_out_button(&self) -> &ElementHandle {
        &self.sign_out
    }

    /// Suspend until the browser reaches this page
    ///
    /// Matches on the path component of the page's own URL, so query
    /// strings appended by the application do not stall the wait.
    /// `timeout` defaults to the shared navigation timeout.
    ///
    /// # Errors
    /// [`crate::NavegarError::NavigationTimeout`] when the page was not
    /// reached in time.
    pub async fn await_arrival(&self, timeout: Option<Duration>) -> NavegarResult<()> {
        let path = path_of(self.url()).to_string();
        self.await_location(&path, timeout).await
    }

    /// Click the sign-out control
    ///
    /// # Errors
    /// [`crate::NavegarError::ElementInteraction`] when the click
    /// fails.
    pub async fn sign_out(&self) -> NavegarResult<()> {
        self.log_element_action("click", "sign out", None);
        self.driver.click(&self.sign_out).await
    }
}

impl Page for LandingPage {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }
}

impl std::fmt::Debug for LandingPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LandingPage")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::{DriverCall, MockDriver};
    use crate::logging::{self, CaptureSink, LogLevel};
    use crate::result::NavegarError;
    use crate::test_support::global_guard;

    const URL: &str = "https://x.test/welcome";

    async fn attached(mock: &Arc<MockDriver>) -> LandingPage {
        let driver: Arc<dyn Driver> = mock.clone();
        LandingPage::attach(driver, URL).await.unwrap()
    }

    mod arrival_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_await_arrival_matches_path_despite_query() {
            let mock = Arc::new(MockDriver::with_url("https://x.test/register"));
            let page = attached(&mock).await;
            let mover = Arc::clone(&mock);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                mover.force_url("https://x.test/welcome?user=john");
            });

            page.await_arrival(Some(Duration::from_millis(500)))
                .await
                .unwrap();
        }

        #[tokio::test(start_paused = true)]
        async fn test_await_arrival_times_out_elsewhere() {
            let mock = Arc::new(MockDriver::with_url("https://x.test/register"));
            let page = attached(&mock).await;
            let error = page
                .await_arrival(Some(Duration::from_millis(100)))
                .await
                .unwrap_err();
            assert_eq!(
                error,
                NavegarError::NavigationTimeout {
                    target: "/welcome".to_string(),
                    ms: 100,
                }
            );
        }
    }

    mod sign_out_tests {
        use super::*;

        #[tokio::test]
        async fn test_sign_out_clicks_and_logs() {
            let _guard = global_guard().await;
            let capture = CaptureSink::new();
            logging::global().add_sink(Arc::new(capture.clone()));

            let mock = Arc::new(MockDriver::new());
            let page = attached(&mock).await;
            mock.clear_calls();
            capture.clear();

            page.sign_out().await.unwrap();

            assert_eq!(
                mock.calls(),
                vec![DriverCall::Click {
                    selector: LandingPage::SELECTOR_SIGN_OUT.to_string(),
                }]
            );
            let records = capture.records();
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].level, LogLevel::Element);
            assert_eq!(records[0].message, "landing: click sign out");
            assert_eq!(records[0].detail, None);
        }
    }

    mod handle_tests {
        use super::*;

        #[tokio::test]
        async fn test_attach_resolves_greeting_and_sign_out() {
            let mock = Arc::new(MockDriver::new());
            let page = attached(&mock).await;
            assert_eq!(page.greeting().selector, LandingPage::SELECTOR_GREETING);
            assert_eq!(
                page.sign_out_button().selector,
                LandingPage::SELECTOR_SIGN_OUT
            );
        }
    }
}
