//! Shared fixtures for integration tests.

#![allow(dead_code)]

// std
use std::{future::Future, pin::Pin, sync::Arc};
// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse, http::StatusCode};
use parking_lot::Mutex;
// self
use oauth_client_kit::{
	auth::{ClientId, ClientIdentifier},
	flows::AuthCodeGrantFlowBuilder,
	http::TokenHttpClient,
	url::Url,
};

pub const CLIENT_ID: &str = "client-it";
pub const CLIENT_SECRET: &str = "secret-it";
pub const REDIRECT_URI: &str = "https://app.example.com/callback";

pub fn url(value: &str) -> Url {
	Url::parse(value).expect("Test URL should parse.")
}

pub fn client_identifier() -> ClientIdentifier {
	ClientIdentifier::new(
		ClientId::new(CLIENT_ID).expect("Client identifier fixture should be valid."),
		CLIENT_SECRET,
	)
}

/// Builder pointed at `base`'s `/authorize` and `/token` endpoints.
pub fn flow_builder(base: &str) -> AuthCodeGrantFlowBuilder {
	AuthCodeGrantFlowBuilder::new()
		.authorization_uri(url(&format!("{base}/authorize")))
		.access_token_uri(url(&format!("{base}/token")))
		.redirect_uri(REDIRECT_URI)
		.client_identifier(client_identifier())
}

/// Reqwest client that accepts the self-signed certificates produced by `httpmock`.
#[cfg(feature = "reqwest")]
pub fn test_reqwest_http_client() -> oauth_client_kit::http::ReqwestHttpClient {
	let client = oauth_client_kit::reqwest::Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	oauth_client_kit::http::ReqwestHttpClient::with_client(client)
}

/// In-memory transport that records every request and answers with a canned response.
#[derive(Clone)]
pub struct RecordingHttpClient {
	requests: Arc<Mutex<Vec<HttpRequest>>>,
	status: StatusCode,
	body: &'static str,
}
impl RecordingHttpClient {
	pub fn new(status: StatusCode, body: &'static str) -> Self {
		Self { requests: Default::default(), status, body }
	}

	pub fn ok() -> Self {
		Self::new(StatusCode::OK, "{}")
	}

	pub fn calls(&self) -> usize {
		self.requests.lock().len()
	}

	/// Runs `f` against the recorded requests.
	pub fn with_requests<T>(&self, f: impl FnOnce(&[HttpRequest]) -> T) -> T {
		f(&self.requests.lock())
	}
}
impl TokenHttpClient for RecordingHttpClient {
	type Handle = RecordingHandle;
	type TransportError = std::io::Error;

	fn handle(&self) -> Self::Handle {
		RecordingHandle { client: self.clone() }
	}
}

pub struct RecordingHandle {
	client: RecordingHttpClient,
}
impl<'c> AsyncHttpClient<'c> for RecordingHandle {
	type Error = HttpClientError<std::io::Error>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.client.clone();

		Box::pin(async move {
			client.requests.lock().push(request);

			let mut response = HttpResponse::new(client.body.as_bytes().to_vec());

			*response.status_mut() = client.status;

			Ok(response)
		})
	}
}
