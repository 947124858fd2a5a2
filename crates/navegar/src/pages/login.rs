//! Login Page
//!
//! Email, password and submit, plus the composite `login` flow. Masking
//! follows the registration page: the trail sees
//! [`crate::MASK_TOKEN`], the driver the raw password.

use std::sync::Arc;

use crate::driver::{Driver, ElementHandle};
use crate::forms::Credentials;
use crate::logging::MASK_TOKEN;
use crate::page::Page;
use crate::result::NavegarResult;

/// Login page bound to a driver session
pub struct LoginPage {
    driver: Arc<dyn Driver>,
    url: String,
    email: ElementHandle,
    password: ElementHandle,
    submit: ElementHandle,
}

impl LoginPage {
    /// Logical name on the trail and in fixture lookup
    pub const NAME: &'static str = "login";

    /// Email input selector
    pub const SELECTOR_EMAIL: &'static str = "input[name='email']";
    /// Password input selector
    pub const SELECTOR_PASSWORD: &'static str = "input[name='password']";
    /// Submit button selector
    pub const SELECTOR_SUBMIT: &'static str = "button[type='submit']";

    /// Resolve the page's element handles against `driver`
    ///
    /// # Errors
    /// [`crate::NavegarError::ElementInteraction`] when any selector
    /// fails to resolve.
    pub async fn attach(driver: Arc<dyn Driver>, url: impl Into<String>) -> NavegarResult<Self> {
        let email = driver.locate(Self::SELECTOR_EMAIL).await?;
        let password = driver.locate(Self::SELECTOR_PASSWORD).await?;
        let submit = driver.locate(Self::SELECTOR_SUBMIT).await?;
        Ok(Self {
            driver,
            url: url.into(),
            email,
            password,
            submit,
        })
    }

    /// Handle of the email input
    #[must_use]
    pub const fn email_field(&self) -> &ElementHandle {
        &self.email
    }

    /// Handle of the password input
    #[must_use]
    pub const fn password_field(&self) -> &ElementHandle {
        &self.password
    }

    /// Handle of the submit button
    #[must_use]
    pub const fn submit_button(&self) -> &ElementHandle {
        &self.submit
    }

    /// Fill the email input
    ///
    /// # Errors
    /// [`crate::NavegarError::ElementInteraction`] when the driver
    /// rejects the fill.
    pub async fn fill_email(&self, value: &str) -> NavegarResult<()> {
        self.log_element_action("fill", "email", Some(value));
        self.driver.fill(&self.email, value).await
    }

    /// Fill the password input, logging the mask token
    ///
    /// # Errors
    /// Same as [`LoginPage::fill_email`].
    pub async fn fill_password(&self, value: &str) -> NavegarResult<()> {
        self.log_element_action("fill", "password", Some(MASK_TOKEN));
        self.driver.fill(&self.password, value).await
    }

    /// Click the submit button
    ///
    /// # Errors
    /// [`crate::NavegarError::ElementInteraction`] when the click
    /// fails.
    pub async fn submit(&self) -> NavegarResult<()> {
        self.log_element_action("click", "submit", None);
        self.driver.click(&self.submit).await
    }

    /// Open the page and sign in with `credentials`
    ///
    /// Steps run in order: navigate, email, password, submit. The first
    /// failure stops the flow.
    ///
    /// # Errors
    /// The error of whichever step failed, unchanged.
    pub async fn login(&self, credentials: &Credentials) -> NavegarResult<()> {
        self.open().await?;
        self.fill_email(&credentials.email).await?;
        self.fill_password(&credentials.password).await?;
        self.submit().await
    }
}

impl Page for LoginPage {
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

impl std::fmt::Debug for LoginPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginPage")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::{DriverCall, MockDriver};
    use crate::logging::{self, CaptureSink};
    use crate::result::NavegarError;
    use crate::test_support::global_guard;

    const URL: &str = "https://x.test/login";

    async fn attached(mock: &Arc<MockDriver>) -> LoginPage {
        let driver: Arc<dyn Driver> = mock.clone();
        LoginPage::attach(driver, URL).await.unwrap()
    }

    mod login_tests {
        use super::*;

        #[tokio::test]
        async fn test_login_drives_every_step_in_order() {
            let _guard = global_guard().await;
            let mock = Arc::new(MockDriver::new());
            let page = attached(&mock).await;
            mock.clear_calls();

            let credentials = Credentials::new("john@example.com", "Secret123!");
            page.login(&credentials).await.unwrap();

            assert_eq!(
                mock.calls(),
                vec![
                    DriverCall::Navigate(URL.to_string()),
                    DriverCall::Fill {
                        selector: LoginPage::SELECTOR_EMAIL.to_string(),
                        value: "john@example.com".to_string(),
                    },
                    DriverCall::Fill {
                        selector: LoginPage::SELECTOR_PASSWORD.to_string(),
                        value: "Secret123!".to_string(),
                    },
                    DriverCall::Click {
                        selector: LoginPage::SELECTOR_SUBMIT.to_string(),
                    },
                ]
            );
        }

        #[tokio::test]
        async fn test_login_halts_on_failing_password_fill() {
            let _guard = global_guard().await;
            let mock = Arc::new(MockDriver::new());
            let page = attached(&mock).await;
            mock.fail_fill(LoginPage::SELECTOR_PASSWORD);
            mock.clear_calls();

            let credentials = Credentials::new("john@example.com", "Secret123!");
            let error = page.login(&credentials).await.unwrap_err();

            assert!(matches!(error, NavegarError::ElementInteraction { .. }));
            assert!(!mock.was_called("click"));
        }

        #[tokio::test]
        async fn test_password_trail_is_masked() {
            let _guard = global_guard().await;
            let capture = CaptureSink::new();
            logging::global().add_sink(Arc::new(capture.clone()));

            let mock = Arc::new(MockDriver::new());
            let page = attached(&mock).await;
            capture.clear();

            page.fill_password("Secret123!").await.unwrap();

            let records = capture.records();
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].message, "login: fill password");
            assert_eq!(records[0].detail.as_deref(), Some(MASK_TOKEN));
        }
    }

    mod attach_tests {
        use super::*;

        #[tokio::test]
        async fn test_attach_resolves_three_handles() {
            let mock = Arc::new(MockDriver::new());
            let page = attached(&mock).await;
            assert_eq!(mock.call_count("locate"), 3);
            assert_eq!(page.email_field().selector, LoginPage::SELECTOR_EMAIL);
            assert_eq!(page.password_field().selector, LoginPage::SELECTOR_PASSWORD);
            assert_eq!(page.submit_button().selector, LoginPage::SELECTOR_SUBMIT);
        }
    }
}
