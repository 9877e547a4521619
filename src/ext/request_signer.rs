//! Request signing contracts that attach OAuth credentials to outbound requests without
//! constraining the HTTP client type.

// crates.io
use oauth2::http::{HeaderValue, header::AUTHORIZATION};
// self
use crate::{_prelude::*, auth::TokenSecret, error::SignatureError, oauth1::OAuth1Signer};

/// Decorates an outbound request with authorization state.
///
/// Implementations must leave requests that already carry an `Authorization` header untouched
/// and must never hand back an unsigned request on error.
pub trait RequestSigner
where
	Self: Send + Sync,
{
	/// Consumes `request` and returns the decorated request.
	fn sign(&self, request: HttpRequest) -> Result<HttpRequest>;
}
impl RequestSigner for OAuth1Signer {
	fn sign(&self, request: HttpRequest) -> Result<HttpRequest> {
		self.sign_request(request)
	}
}
impl<S> RequestSigner for Arc<S>
where
	S: ?Sized + RequestSigner,
{
	fn sign(&self, request: HttpRequest) -> Result<HttpRequest> {
		self.as_ref().sign(request)
	}
}

/// One-shot bearer token stored in a request's extensions.
///
/// [`BearerSigner`] consumes it and uses it instead of its configured token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BearerToken(pub TokenSecret);

/// Attaches `Authorization: Bearer <access_token>` (RFC 6750 §2.1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BearerSigner {
	access_token: TokenSecret,
}
impl BearerSigner {
	/// Creates a signer for `access_token`.
	pub fn new(access_token: impl Into<TokenSecret>) -> Self {
		Self { access_token: access_token.into() }
	}

	/// Token attached when the request carries no [`BearerToken`] override.
	pub fn access_token(&self) -> &TokenSecret {
		&self.access_token
	}
}
impl RequestSigner for BearerSigner {
	fn sign(&self, mut request: HttpRequest) -> Result<HttpRequest> {
		if request.headers().contains_key(AUTHORIZATION) {
			return Ok(request);
		}

		let token = request
			.extensions_mut()
			.remove::<BearerToken>()
			.map(|BearerToken(token)| token)
			.unwrap_or_else(|| self.access_token.clone());
		let value = HeaderValue::from_str(&format!("Bearer {}", token.expose()))
			.map_err(SignatureError::from)?;

		request.headers_mut().insert(AUTHORIZATION, value);

		Ok(request)
	}
}
