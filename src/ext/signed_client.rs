//! HTTP client wrapper that signs every request before handing it to the transport.

// self
use crate::{
	_prelude::*,
	ext::{BearerSigner, RequestSigner},
	http::{self, TokenHttpClient},
	oauth1::OAuth1Signer,
};

/// Client that signs requests with an OAuth 2.0 bearer token.
pub type AuthorizedClient<C> = SignedHttpClient<C, BearerSigner>;
/// Client that signs requests with OAuth 1.0a.
pub type OAuth1Client<C> = SignedHttpClient<C, OAuth1Signer>;

/// Pairs a transport with a [`RequestSigner`].
///
/// Cloning is cheap: the transport is shared and the signer is cloned.
pub struct SignedHttpClient<C, S>
where
	C: TokenHttpClient,
	S: RequestSigner,
{
	http_client: Arc<C>,
	signer: S,
}
impl<C, S> SignedHttpClient<C, S>
where
	C: TokenHttpClient,
	S: RequestSigner,
{
	/// Wraps `http_client` so every request is decorated by `signer`.
	pub fn new(http_client: Arc<C>, signer: S) -> Self {
		Self { http_client, signer }
	}

	/// Signer applied to every request.
	pub fn signer(&self) -> &S {
		&self.signer
	}

	/// Underlying transport.
	pub fn http_client(&self) -> &Arc<C> {
		&self.http_client
	}

	/// Signs and sends `request`.
	///
	/// Signing failures are returned without touching the network.
	pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
		let request = self.signer.sign(request)?;

		http::execute(self.http_client.as_ref(), request).await
	}
}
impl<C, S> Clone for SignedHttpClient<C, S>
where
	C: TokenHttpClient,
	S: Clone + RequestSigner,
{
	fn clone(&self) -> Self {
		Self { http_client: self.http_client.clone(), signer: self.signer.clone() }
	}
}
impl<C, S> Debug for SignedHttpClient<C, S>
where
	C: TokenHttpClient,
	S: Debug + RequestSigner,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SignedHttpClient").field("signer", &self.signer).finish_non_exhaustive()
	}
}
