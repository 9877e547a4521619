//! Credential value types shared by the OAuth1 signer and the OAuth2 flow.

pub mod credentials;
pub mod id;
pub mod secret;

pub use credentials::*;
pub use id::*;
pub use secret::*;
