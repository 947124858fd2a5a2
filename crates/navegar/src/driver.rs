//! Driver Facade
//!
//! The narrow browser surface page objects drive, plus the in-crate mock
//! used throughout the test suite. Real drivers (CDP, WebDriver) live
//! outside this crate and implement [`Driver`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use uuid::Uuid;

use crate::location::UrlPattern;
use crate::result::{NavegarError, NavegarResult};

/// Default await-navigation timeout
pub const DEFAULT_NAVIGATION_TIMEOUT_MS: u64 = 30_000;

/// Interval between location polls while awaiting navigation
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Handle to an element resolved from a selector
///
/// The id is unique per resolution; the selector records what the handle
/// was minted from. Handles are stable selector bindings — liveness
/// across navigations is the driver's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Driver-assigned unique id
    pub id: String,
    /// Selector the handle was resolved from
    pub selector: String,
}

impl ElementHandle {
    /// Handle with a fresh unique id
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            selector: selector.into(),
        }
    }
}

/// Browser surface page objects drive
///
/// All methods take `&self` so one session can be shared across page
/// objects behind an `Arc`. Implementations are externally supplied;
/// [`MockDriver`] covers tests.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Drive the browser to `url`
    ///
    /// # Errors
    /// [`NavegarError::Navigation`] when the browser refused or failed
    /// the navigation, [`NavegarError::DriverUnavailable`] when the
    /// session is gone.
    async fn navigate(&self, url: &str) -> NavegarResult<()>;

    /// Resolve `selector` to an element handle
    ///
    /// # Errors
    /// [`NavegarError::ElementInteraction`] when nothing matched.
    async fn locate(&self, selector: &str) -> NavegarResult<ElementHandle>;

    /// Type `value` into the element behind `handle`
    ///
    /// # Errors
    /// [`NavegarError::ElementInteraction`] when the element rejected
    /// the input.
    async fn fill(&self, handle: &ElementHandle, value: &str) -> NavegarResult<()>;

    /// Click the element behind `handle`
    ///
    /// # Errors
    /// [`NavegarError::ElementInteraction`] when the click failed.
    async fn click(&self, handle: &ElementHandle) -> NavegarResult<()>;

    /// The browser's current location
    ///
    /// # Errors
    /// [`NavegarError::DriverUnavailable`] when the session cannot be
    /// queried.
    async fn current_url(&self) -> NavegarResult<String>;

    /// Suspend until the location matches `pattern` or `timeout` elapses
    ///
    /// The default implementation polls [`Driver::current_url`] every
    /// [`DEFAULT_POLL_INTERVAL_MS`] milliseconds. It suspends between
    /// polls instead of blocking a thread, so dropping the future
    /// cancels the wait. Drivers with navigation events may override it.
    ///
    /// # Errors
    /// [`NavegarError::NavigationTimeout`] when the pattern never
    /// matched in time; any other driver error as soon as polling hits
    /// it.
    async fn wait_for_url(&self, pattern: &UrlPattern, timeout: Duration) -> NavegarResult<()> {
        let poll = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);
        let started = tokio::time::Instant::now();
        loop {
            if pattern.matches(&self.current_url().await?) {
                return Ok(());
            }
            if started.elapsed() >= timeout {
                return Err(NavegarError::NavigationTimeout {
                    target: pattern.to_string(),
                    ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                });
            }
            tokio::time::sleep(poll).await;
        }
    }
}

/// One recorded [`MockDriver`] invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    /// `navigate` with its target URL
    Navigate(String),
    /// `locate` with its selector
    Locate(String),
    /// `fill` with the handle's selector and the typed value
    Fill {
        /// Selector behind the filled handle
        selector: String,
        /// Raw value handed to the driver
        value: String,
    },
    /// `click` with the handle's selector
    Click {
        /// Selector behind the clicked handle
        selector: String,
    },
    /// `current_url`
    CurrentUrl,
}

impl DriverCall {
    /// Method name for coarse history checks
    #[must_use]
    pub const fn method(&self) -> &'static str {
        match self {
            Self::Navigate(_) => "navigate",
            Self::Locate(_) => "locate",
            Self::Fill { .. } => "fill",
            Self::Click { .. } => "click",
            Self::CurrentUrl => "current_url",
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    url: String,
    closed: bool,
    calls: Vec<DriverCall>,
    refused_urls: HashSet<String>,
    missing_selectors: HashSet<String>,
    failing_fills: HashSet<String>,
}

/// Scriptable in-memory driver for tests
///
/// Records every call in a typed history and supports failure
/// injection: refused navigation targets, unresolvable selectors,
/// failing fills, and a close switch after which every operation
/// reports [`NavegarError::DriverUnavailable`].
#[derive(Debug)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDriver {
    /// Mock parked on `about:blank`
    #[must_use]
    pub fn new() -> Self {
        Self::with_url("about:blank")
    }

    /// Mock parked on `url`
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        let state = MockState {
            url: url.into(),
            ..MockState::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Everything the driver was asked to do, in order
    #[must_use]
    pub fn calls(&self) -> Vec<DriverCall> {
        self.state().calls.clone()
    }

    /// Whether `method` appears anywhere in the history
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.state().calls.iter().any(|call| call.method() == method)
    }

    /// How many times `method` was invoked
    #[must_use]
    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|call| call.method() == method)
            .count()
    }

    /// Forget the history so far
    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// Make `navigate` to `url` fail with a navigation error
    pub fn refuse_navigation(&self, url: impl Into<String>) {
        self.state().refused_urls.insert(url.into());
    }

    /// Make `locate` fail for `selector`
    pub fn remove_selector(&self, selector: impl Into<String>) {
        self.state().missing_selectors.insert(selector.into());
    }

    /// Make `fill` fail for handles resolved from `selector`
    pub fn fail_fill(&self, selector: impl Into<String>) {
        self.state().failing_fills.insert(selector.into());
    }

    /// Move the browser location without a navigate call, as a redirect
    /// or push-state would
    pub fn force_url(&self, url: impl Into<String>) {
        self.state().url = url.into();
    }

    /// Close the session; every later operation reports
    /// [`NavegarError::DriverUnavailable`]
    pub fn close(&self) {
        self.state().closed = true;
    }

    fn ensure_open(state: &MockState) -> NavegarResult<()> {
        if state.closed {
            return Err(NavegarError::DriverUnavailable {
                message: "session closed".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn navigate(&self, url: &str) -> NavegarResult<()> {
        let mut state = self.state();
        Self::ensure_open(&state)?;
        state.calls.push(DriverCall::Navigate(url.to_string()));
        if state.refused_urls.contains(url) {
            return Err(NavegarError::Navigation {
                url: url.to_string(),
                message: "refused by mock".to_string(),
            });
        }
        state.url = url.to_string();
        Ok(())
    }

    async fn locate(&self, selector: &str) -> NavegarResult<ElementHandle> {
        let mut state = self.state();
        Self::ensure_open(&state)?;
        state.calls.push(DriverCall::Locate(selector.to_string()));
        if state.missing_selectors.contains(selector) {
            return Err(NavegarError::ElementInteraction {
                action: "locate".to_string(),
                selector: selector.to_string(),
                message: "no matching element".to_string(),
            });
        }
        Ok(ElementHandle::new(selector))
    }

    async fn fill(&self, handle: &ElementHandle, value: &str) -> NavegarResult<()> {
        let mut state = self.state();
        Self::ensure_open(&state)?;
        state.calls.push(DriverCall::Fill {
            selector: handle.selector.clone(),
            value: value.to_string(),
        });
        if state.failing_fills.contains(&handle.selector) {
            return Err(NavegarError::ElementInteraction {
                action: "fill".to_string(),
                selector: handle.selector.clone(),
                message: "element rejected input".to_string(),
            });
        }
        Ok(())
    }

    async fn click(&self, handle: &ElementHandle) -> NavegarResult<()> {
        let mut state = self.state();
        Self::ensure_open(&state)?;
        state.calls.push(DriverCall::Click {
            selector: handle.selector.clone(),
        });
        Ok(())
    }

    async fn current_url(&self) -> NavegarResult<String> {
        let mut state = self.state();
        Self::ensure_open(&state)?;
        state.calls.push(DriverCall::CurrentUrl);
        Ok(state.url.clone())
    }
}
