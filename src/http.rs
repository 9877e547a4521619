//! Transport primitives for token exchanges and signed requests.
//!
//! The module exposes [`TokenHttpClient`] so downstream crates can plug any HTTP stack into the
//! OAuth2 flow and the request-signing decorators. Requests and responses travel as
//! [`HttpRequest`]/[`HttpResponse`] (`http` crate types with `Vec<u8>` bodies), which keeps the
//! protocol logic independent of the transport.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use oauth2::{
	AsyncHttpClient, HttpClientError,
	http::{HeaderValue, Method, header},
};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// Media type used for token and refresh requests.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
/// Media type requested from token endpoints.
pub const APPLICATION_JSON: &str = "application/json";

/// Abstraction over HTTP transports capable of executing token exchanges and signed requests.
///
/// The trait is the crate's only dependency on an HTTP stack. Callers provide an
/// implementation (typically behind `Arc<T>` where `T: TokenHttpClient`) and the flow requests
/// short-lived [`AsyncHttpClient`] handles for each call. Implementations must be
/// `Send + Sync + 'static`, and the handles they return must own whatever state is required so
/// their request futures remain `Send` for the lifetime of the in-flight operation.
///
/// No timeout or cancellation is applied by this crate; configure them on the transport.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle used for a single call.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds an [`AsyncHttpClient`] handle for the next request.
	fn handle(&self) -> Self::Handle;
}

/// Sends `request` through `client`, mapping transport failures into crate errors.
pub async fn execute<C>(client: &C, request: HttpRequest) -> Result<HttpResponse>
where
	C: ?Sized + TokenHttpClient,
{
	let handle = client.handle();

	handle.call(request).await.map_err(map_http_client_error)
}

/// Builds a form-encoded POST carrying `pairs` in order.
pub fn form_post<'a, I>(target: &Url, pairs: I) -> Result<HttpRequest>
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	let body = url::form_urlencoded::Serializer::new(String::new()).extend_pairs(pairs).finish();
	let request = oauth2::http::Request::builder()
		.method(Method::POST)
		.uri(target.as_str())
		.header(header::CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED))
		.header(header::ACCEPT, HeaderValue::from_static(APPLICATION_JSON))
		.body(body.into_bytes())
		.map_err(ConfigError::from)?;

	Ok(request)
}

/// Returns true when the request body is declared as `application/x-www-form-urlencoded`.
pub fn is_form_urlencoded(request: &HttpRequest) -> bool {
	request
		.headers()
		.get(header::CONTENT_TYPE)
		.and_then(|value| value.to_str().ok())
		.and_then(|value| value.split(';').next())
		.is_some_and(|media| media.trim().eq_ignore_ascii_case(FORM_URLENCODED))
}

/// Converts a transport failure into a crate [`Error`] without classifying or retrying it.
pub fn map_http_client_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::Network { source: inner }.into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { message }.into(),
		#[allow(unreachable_patterns)]
		_ => TransportError::Other { message: "unknown failure".into() }.into(),
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Token requests should not follow redirects, matching OAuth 2.0 guidance that token
/// endpoints return results directly instead of delegating to another URI. Configure any
/// custom [`ReqwestClient`] accordingly.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	type Handle = ReqwestHandle;
	type TransportError = ReqwestError;

	fn handle(&self) -> Self::Handle {
		ReqwestHandle(self.0.clone())
	}
}

#[cfg(feature = "reqwest")]
/// Per-call handle returned by [`ReqwestHttpClient`] that satisfies [`TokenHttpClient`].
#[derive(Clone)]
pub struct ReqwestHandle(ReqwestClient);
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
