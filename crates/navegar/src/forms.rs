//! Form Payloads
//!
//! Owned input for the composite page flows. `Debug` never shows the
//! password; log trails get [`crate::MASK_TOKEN`] while the driver
//! receives the raw value.

use serde::{Deserialize, Serialize};

use crate::logging::MASK_TOKEN;

/// Input for the registration flow
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Account email, also the sign-in identity
    pub email: String,
    /// Account password
    pub password: String,
}

impl RegistrationForm {
    /// Build a registration payload
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// The sign-in pair for the account this form creates
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }
}

impl std::fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &MASK_TOKEN)
            .finish()
    }
}

/// Input for the login flow
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Sign-in identity
    pub email: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Build a sign-in pair
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &MASK_TOKEN)
            .finish()
    }
}
