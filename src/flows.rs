//! OAuth 2.0 authorization-code grant with refresh support.
//!
//! [`AuthCodeGrantFlow`] drives one authorization attempt: [`start`](AuthCodeGrantFlow::start)
//! renders the authorization URL, [`finish`](AuthCodeGrantFlow::finish) validates the returned
//! `state` and exchanges the code, and
//! [`refresh_access_token`](AuthCodeGrantFlow::refresh_access_token) rotates the cached token.
//! Each phase sends its own [`PhaseProperties`], seeded with protocol defaults that never
//! clobber caller-supplied values.

pub mod auth_code;
pub mod common;
pub mod grant;
pub mod properties;
pub mod token;

pub use auth_code::*;
pub use common::*;
pub use grant::*;
pub use properties::*;
pub use token::*;

/// `response_type` parameter.
pub const RESPONSE_TYPE: &str = "response_type";
/// `client_id` parameter.
pub const CLIENT_ID: &str = "client_id";
/// `client_secret` parameter.
pub const CLIENT_SECRET: &str = "client_secret";
/// `redirect_uri` parameter.
pub const REDIRECT_URI: &str = "redirect_uri";
/// `state` parameter.
pub const STATE: &str = "state";
/// `scope` parameter.
pub const SCOPE: &str = "scope";
/// `grant_type` parameter.
pub const GRANT_TYPE: &str = "grant_type";
/// `code` parameter.
pub const CODE: &str = "code";
/// `refresh_token` parameter.
pub const REFRESH_TOKEN: &str = "refresh_token";

/// Redirect URI sent when the flow is built without one (out-of-band).
pub const REDIRECT_URI_UNDEFINED: &str = "urn:ietf:wg:oauth:2.0:oob";
