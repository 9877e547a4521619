//! Request decoration seams shared by the OAuth 1.0a signer and the OAuth 2.0 flow.
//!
//! A [`RequestSigner`] turns an outbound [`HttpRequest`] into an authorized one, and
//! [`SignedHttpClient`] pairs a signer with any [`TokenHttpClient`](crate::http::TokenHttpClient)
//! so every request it executes is decorated first.

pub mod request_signer;
pub mod signed_client;

pub use request_signer::*;
pub use signed_client::*;
