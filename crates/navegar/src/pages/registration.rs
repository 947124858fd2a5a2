//! Registration Page
//!
//! Five element handles and the composite `register` flow. Every fill
//! goes on the trail at element level; the password fill logs
//! [`crate::MASK_TOKEN`] while the driver receives the raw value.

use std::sync::Arc;

use crate::driver::{Driver, ElementHandle};
use crate::forms::RegistrationForm;
use crate::logging::MASK_TOKEN;
use crate::page::Page;
use crate::result::NavegarResult;

/// Registration page bound to a driver session
pub struct RegistrationPage {
    driver: Arc<dyn Driver>,
    url: String,
    first_name: ElementHandle,
    last_name: ElementHandle,
    email: ElementHandle,
    password: ElementHandle,
    submit: ElementHandle,
}

impl RegistrationPage {
    /// Logical name on the trail and in fixture lookup
    pub const NAME: &'static str = "registration";

    /// Given-name input selector
    pub const SELECTOR_FIRST_NAME: &'static str = "input[name='firstName']";
    /// Family-name input selector
    pub const SELECTOR_LAST_NAME: &'static str = "input[name='lastName']";
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
    /// fails to resolve; the page is not constructed partially.
    pub async fn attach(driver: Arc<dyn Driver>, url: impl Into<String>) -> NavegarResult<Self> {
        let first_name = driver.locate(Self::SELECTOR_FIRST_NAME).await?;
        let last_name = driver.locate(Self::SELECTOR_LAST_NAME).await?;
        let email = driver.locate(Self::SELECTOR_EMAIL).await?;
        let password = driver.locate(Self::SELECTOR_PASSWORD).await?;
        let submit = driver.locate(Self::SELECTOR_SUBMIT).await?;
        Ok(Self {
            driver,
            url: url.into(),
            first_name,
            last_name,
            email,
            password,
            submit,
        })
    }

    /// Handle of the given-name input
    #[must_use]
    pub const fn first_name_field(&self) -> &ElementHandle {
        &self.first_name
    }

    /// Handle of the family-name input
    #[must_use]
    pub const fn last_name_field(&self) -> &ElementHandle {
        &self.last_name
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

    /// Fill the given-name input
    ///
    /// # Errors
    /// [`crate::NavegarError::ElementInteraction`] when the driver
    /// rejects the fill.
    pub async fn fill_first_name(&self, value: &str) -> NavegarResult<()> {
        self.log_element_action("fill", "first name", Some(value));
        self.driver.fill(&self.first_name, value).await
    }

    /// Fill the family-name input
    ///
    /// # Errors
    /// Same as [`RegistrationPage::fill_first_name`].
    pub async fn fill_last_name(&self, value: &str) -> NavegarResult<()> {
        self.log_element_action("fill", "last name", Some(value));
        self.driver.fill(&self.last_name, value).await
    }

    /// Fill the email input
    ///
    /// # Errors
    /// Same as [`RegistrationPage::fill_first_name`].
    pub async fn fill_email(&self, value: &str) -> NavegarResult<()> {
        self.log_element_action("fill", "email", Some(value));
        self.driver.fill(&self.email, value).await
    }

    /// Fill the password input, logging the mask token
    ///
    /// The driver receives `value` verbatim; the trail never does.
    ///
    /// # Errors
    /// Same as [`RegistrationPage::fill_first_name`].
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

    /// Open the page and submit `form` field by field
    ///
    /// Steps run in order: navigate, given name, family name, email,
    /// password, submit. The first failure stops the flow; later steps
    /// never touch the driver.
    ///
    /// # Errors
    /// The error of whichever step failed, unchanged.
    pub async fn register(&self, form: &RegistrationForm) -> NavegarResult<()> {
        self.open().await?;
        self.fill_first_name(&form.first_name).await?;
        self.fill_last_name(&form.last_name).await?;
        self.fill_email(&form.email).await?;
        self.fill_password(&form.password).await?;
        self.submit().await
    }
}

impl Page for RegistrationPage {
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

impl std::fmt::Debug for RegistrationPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationPage")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}
