//! External identity providers.

mod google;

pub use google::{GoogleOAuthClient, GoogleOAuthConfig};
