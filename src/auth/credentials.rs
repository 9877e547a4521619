//! Credential pairs handed out by OAuth 1.0a service providers and OAuth 2.0 authorization
//! servers.

// self
use crate::{
	_prelude::*,
	auth::{ClientId, ConsumerKey, TokenSecret},
};

/// OAuth 2.0 client registration (identifier + secret).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientIdentifier {
	/// Client identifier sent as `client_id`.
	pub id: ClientId,
	/// Client secret sent as `client_secret`.
	pub secret: TokenSecret,
}
impl ClientIdentifier {
	/// Pairs a client identifier with its secret.
	pub fn new(id: ClientId, secret: impl Into<TokenSecret>) -> Self {
		Self { id, secret: secret.into() }
	}
}

/// OAuth 1.0a consumer credentials.
///
/// Stored in a request's extensions, the value overrides the signer's configured consumer for
/// that single request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsumerCredentials {
	/// Consumer key sent as `oauth_consumer_key`.
	pub key: ConsumerKey,
	/// Consumer secret used in the signing key.
	pub secret: TokenSecret,
}
impl ConsumerCredentials {
	/// Pairs a consumer key with its secret.
	pub fn new(key: ConsumerKey, secret: impl Into<TokenSecret>) -> Self {
		Self { key, secret: secret.into() }
	}
}

/// OAuth 1.0a access token and its token secret.
///
/// Stored in a request's extensions, the value overrides the signer's configured token for that
/// single request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken {
	/// Token sent as `oauth_token`.
	pub token: String,
	/// Token secret used in the signing key.
	pub secret: TokenSecret,
}
impl AccessToken {
	/// Pairs a token with its secret.
	pub fn new(token: impl Into<String>, secret: impl Into<TokenSecret>) -> Self {
		Self { token: token.into(), secret: secret.into() }
	}
}
