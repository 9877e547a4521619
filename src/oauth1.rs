//! OAuth 1.0a request signing (RFC 5849).
//!
//! [`OAuth1Signer`] holds client-wide [`OAuth1Parameters`] and [`OAuth1Secrets`]. Each
//! outgoing [`HttpRequest`](crate::_prelude::HttpRequest) may carry one-shot overrides in its
//! extensions ([`ConsumerCredentials`](crate::auth::ConsumerCredentials),
//! [`AccessToken`](crate::auth::AccessToken), [`OAuth1Parameters`], [`OAuth1Secrets`]); the
//! signer consumes them, resolves an [`EffectiveConfig`], and attaches an `Authorization: OAuth`
//! header. Requests that already carry an `Authorization` header pass through untouched.

pub mod parameters;
pub mod signature;
pub mod signer;

pub use parameters::*;
pub use signature::*;
pub use signer::*;

/// `realm` header attribute.
pub const REALM: &str = "realm";
/// `oauth_consumer_key` parameter.
pub const CONSUMER_KEY: &str = "oauth_consumer_key";
/// `oauth_token` parameter.
pub const TOKEN: &str = "oauth_token";
/// `oauth_signature_method` parameter.
pub const SIGNATURE_METHOD: &str = "oauth_signature_method";
/// `oauth_signature` parameter.
pub const SIGNATURE: &str = "oauth_signature";
/// `oauth_timestamp` parameter.
pub const TIMESTAMP: &str = "oauth_timestamp";
/// `oauth_nonce` parameter.
pub const NONCE: &str = "oauth_nonce";
/// `oauth_version` parameter.
pub const VERSION: &str = "oauth_version";
/// `oauth_callback` parameter.
pub const CALLBACK: &str = "oauth_callback";
/// `oauth_verifier` parameter.
pub const VERIFIER: &str = "oauth_verifier";

/// Protocol version applied when none is configured.
pub const DEFAULT_VERSION: &str = "1.0";
