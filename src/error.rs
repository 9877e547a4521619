//! Crate-level error types shared by the OAuth1 signer, the OAuth2 flow, and transports.

// self
use crate::{_prelude::*, flows::GrantType};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem detected before any network call.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The OAuth1 signature could not be computed; the request was not signed.
	#[error("Failed to sign the outbound request.")]
	Signature(
		#[from]
		#[source]
		SignatureError,
	),
	/// Token or refresh endpoint rejected or garbled the exchange.
	#[error(transparent)]
	Flow(#[from] FlowError),
	/// Transport failure (DNS, TCP, TLS, IO).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The `state` returned by the authorization server does not match the flow's state.
	#[error("Authorization state mismatch; the callback may be forged.")]
	StateMismatch,
	/// A bearer decorator was requested before the flow obtained a token.
	#[error("The authorization flow has not finished; no access token is available.")]
	FlowNotFinished,
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// OAuth1 consumer key or consumer secret is missing.
	#[error("OAuth1 consumer key and consumer secret must both be configured.")]
	MissingConsumer,
	/// OAuth1 token is configured without its token secret.
	#[error("OAuth1 token is configured without a token secret.")]
	MissingTokenSecret,
	/// A required flow builder setting was never supplied.
	#[error("Authorization flow setting `{setting}` is required.")]
	MissingFlowSetting {
		/// Builder setting name.
		setting: &'static str,
	},
	/// Identifier failed validation.
	#[error("Identifier is invalid.")]
	InvalidIdentifier(#[from] crate::auth::IdentifierError),
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
impl From<crate::auth::IdentifierError> for Error {
	fn from(e: crate::auth::IdentifierError) -> Self {
		ConfigError::from(e).into()
	}
}

/// Failures raised while computing an OAuth1 signature.
#[derive(Debug, ThisError)]
pub enum SignatureError {
	/// The configured signature method is not implemented.
	#[error("Signature method `{method}` is not supported.")]
	UnsupportedMethod {
		/// Method string found in the parameters.
		method: String,
	},
	/// The request URI lacks a scheme or host and cannot be normalized.
	#[error("Request URI `{uri}` cannot be normalized for signing.")]
	InvalidUri {
		/// Offending URI.
		uri: String,
	},
	/// The MAC rejected the signing key.
	#[error("Signing key is invalid.")]
	InvalidKey(#[from] hmac::digest::InvalidLength),
	/// The computed `Authorization` header is not a valid header value.
	#[error("Computed Authorization header is not a valid header value.")]
	InvalidHeader(#[from] oauth2::http::header::InvalidHeaderValue),
}

/// Failures reported by the token or refresh endpoint.
#[derive(Debug, ThisError)]
pub enum FlowError {
	/// Endpoint answered with a non-200 status.
	#[error("Token endpoint answered the {grant} request with HTTP status {status}.")]
	TokenEndpoint {
		/// Grant that was being exchanged.
		grant: GrantType,
		/// HTTP status code returned by the endpoint.
		status: u16,
	},
	/// Endpoint answered 200 but the body is not a token response.
	#[error("Token endpoint returned an unreadable {grant} response.")]
	TokenResponse {
		/// Grant that was being exchanged.
		grant: GrantType,
		/// Parsing failure.
		#[source]
		source: TokenParseError,
	},
}
impl FlowError {
	/// Returns the HTTP status carried by the error, when the endpoint rejected the request.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::TokenEndpoint { status, .. } => Some(*status),
			Self::TokenResponse { .. } => None,
		}
	}
}

/// Failures raised while turning a token endpoint body into a token result.
#[derive(Debug, ThisError)]
pub enum TokenParseError {
	/// Body is not the expected JSON object.
	#[error("Token response is not valid JSON.")]
	Json(#[from] serde_path_to_error::Error<serde_json::Error>),
	/// Body parsed but carries no access token.
	#[error("Token response is missing access_token.")]
	MissingAccessToken,
	/// Custom parser failure.
	#[error("Token response could not be parsed.")]
	Custom {
		/// Parser-specific failure.
		#[source]
		source: BoxError,
	},
}
impl TokenParseError {
	/// Wraps a custom parser's failure.
	pub fn custom(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Custom { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the remote endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the remote endpoint.")]
	Io(#[from] std::io::Error),
	/// HTTP client failed without a structured error.
	#[error("HTTP client error occurred while calling the remote endpoint: {message}.")]
	Other {
		/// Client-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
