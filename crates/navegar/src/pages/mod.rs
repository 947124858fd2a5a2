//! Stock Pages
//!
//! The three concrete page variants. Each owns its element handles,
//! resolved once at attach time, and a composite flow that drives the
//! page end to end with the shared logging trail.

pub mod landing;
pub mod login;
pub mod registration;

pub use landing::LandingPage;
pub use login::LoginPage;
pub use registration::RegistrationPage;
