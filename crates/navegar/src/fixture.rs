//! Fixture Provisioning
//!
//! Per-test construction of the full page set. The execution context
//! is installed before any page exists, so every record a page emits
//! already carries the worker prefix.

use std::sync::Arc;

use crate::config::PageUrls;
use crate::driver::Driver;
use crate::logging::{self, ExecutionContext, LogLevel};
use crate::page::Page;
use crate::pages::{LandingPage, LoginPage, RegistrationPage};
use crate::result::NavegarResult;

/// The full page set attached to one driver session
#[derive(Debug)]
pub struct Pages {
    /// Registration page
    pub registration: RegistrationPage,
    /// Login page
    pub login: LoginPage,
    /// Landing page
    pub landing: LandingPage,
}

impl Pages {
    /// Names of the stock pages, in attach order
    pub const NAMES: [&'static str; 3] = [
        RegistrationPage::NAME,
        LoginPage::NAME,
        LandingPage::NAME,
    ];

    /// Attach every stock page to `driver`
    ///
    /// Pages attach in [`Pages::NAMES`] order. The first attach failure
    /// aborts the whole set; there are no partially attached sets.
    ///
    /// # Errors
    /// [`crate::NavegarError::ElementInteraction`] from the first
    /// selector that fails to resolve.
    pub async fn attach(driver: &Arc<dyn Driver>, urls: &PageUrls) -> NavegarResult<Self> {
        let registration =
            RegistrationPage::attach(Arc::clone(driver), urls.registration.clone()).await?;
        let login = LoginPage::attach(Arc::clone(driver), urls.login.clone()).await?;
        let landing = LandingPage::attach(Arc::clone(driver), urls.landing.clone()).await?;
        Ok(Self {
            registration,
            login,
            landing,
        })
    }

    /// Look a page up by its logical name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Page> {
        match name {
            RegistrationPage::NAME => Some(&self.registration),
            LoginPage::NAME => Some(&self.login),
            LandingPage::NAME => Some(&self.landing),
            _ => None,
        }
    }
}

/// One test invocation's worth of pages, context and driver
///
/// Strictly per-invocation: two provisions never share element handles,
/// even against the same driver session.
pub struct PageFixture {
    driver: Arc<dyn Driver>,
    context: ExecutionContext,
    pages: Pages,
}

impl PageFixture {
    /// Provision the page set for one test invocation
    ///
    /// Installs `context` first, records the provisioning at test
    /// level, then attaches the pages. Ordering matters: any record
    /// emitted while attaching already carries the worker prefix.
    ///
    /// # Errors
    /// [`crate::NavegarError::ElementInteraction`] when a page fails to
    /// attach. The context stays installed even then, so the failure
    /// itself is attributable.
    pub async fn provision(
        driver: Arc<dyn Driver>,
        context: ExecutionContext,
        urls: &PageUrls,
    ) -> NavegarResult<Self> {
        logging::set_execution_context(context.clone());
        logging::log(LogLevel::Test, "fixture: provisioning page set");
        let pages = Pages::attach(&driver, urls).await?;
        Ok(Self {
            driver,
            context,
            pages,
        })
    }

    /// The attached page set
    #[must_use]
    pub const fn pages(&self) -> &Pages {
        &self.pages
    }

    /// The shared driver session
    #[must_use]
    pub const fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    /// The context this fixture was provisioned under
    #[must_use]
    pub const fn context(&self) -> &ExecutionContext {
        &self.context
    }
}

impl std::fmt::Debug for PageFixture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFixture")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
