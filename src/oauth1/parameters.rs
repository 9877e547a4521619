//! OAuth1 protocol parameters and the secrets that key their signature.

// self
use crate::{
	_prelude::*,
	auth::{TokenSecret, secret},
	oauth1::{
		CALLBACK, CONSUMER_KEY, DEFAULT_VERSION, NONCE, SIGNATURE_METHOD, SignatureMethod,
		TIMESTAMP, TOKEN, VERIFIER, VERSION,
	},
};

const NONCE_LEN: usize = 32;

/// OAuth1 protocol parameters.
///
/// Values are plain records: every `with_*` setter consumes the record and returns an updated
/// copy, so a configured instance can be shared across concurrent requests without aliasing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OAuth1Parameters {
	/// Optional `realm` attribute of the `Authorization` header (not signed).
	pub realm: Option<String>,
	/// `oauth_consumer_key`.
	pub consumer_key: Option<String>,
	/// `oauth_token`.
	pub token: Option<String>,
	/// `oauth_signature_method`; resolved to `HMAC-SHA1` when unset.
	pub signature_method: Option<String>,
	/// `oauth_version`; resolved to `1.0` when unset.
	pub version: Option<String>,
	/// `oauth_timestamp` in seconds since the Unix epoch; generated per request when unset.
	pub timestamp: Option<String>,
	/// `oauth_nonce`; generated per request when unset.
	pub nonce: Option<String>,
	/// `oauth_callback`.
	pub callback: Option<String>,
	/// `oauth_verifier`.
	pub verifier: Option<String>,
}
impl OAuth1Parameters {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the `realm` header attribute.
	pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
		self.realm = Some(realm.into());

		self
	}

	/// Sets `oauth_consumer_key`.
	pub fn with_consumer_key(mut self, key: impl Into<String>) -> Self {
		self.consumer_key = Some(key.into());

		self
	}

	/// Sets `oauth_token`.
	pub fn with_token(mut self, token: impl Into<String>) -> Self {
		self.token = Some(token.into());

		self
	}

	/// Sets `oauth_signature_method` from a raw string.
	pub fn with_signature_method(mut self, method: impl Into<String>) -> Self {
		self.signature_method = Some(method.into());

		self
	}

	/// Sets `oauth_signature_method` from a known [`SignatureMethod`].
	pub fn with_method(self, method: SignatureMethod) -> Self {
		self.with_signature_method(method.as_str())
	}

	/// Sets `oauth_version`.
	pub fn with_version(mut self, version: impl Into<String>) -> Self {
		self.version = Some(version.into());

		self
	}

	/// Sets `oauth_timestamp`.
	pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
		self.timestamp = Some(timestamp.into());

		self
	}

	/// Sets `oauth_timestamp` to the current time.
	pub fn with_current_timestamp(self) -> Self {
		self.with_timestamp(OffsetDateTime::now_utc().unix_timestamp().to_string())
	}

	/// Sets `oauth_nonce`.
	pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
		self.nonce = Some(nonce.into());

		self
	}

	/// Sets `oauth_nonce` to a fresh random value.
	pub fn with_random_nonce(self) -> Self {
		self.with_nonce(secret::random_alphanumeric(NONCE_LEN))
	}

	/// Sets `oauth_callback`.
	pub fn with_callback(mut self, callback: impl Into<String>) -> Self {
		self.callback = Some(callback.into());

		self
	}

	/// Sets `oauth_verifier`.
	pub fn with_verifier(mut self, verifier: impl Into<String>) -> Self {
		self.verifier = Some(verifier.into());

		self
	}

	/// Fills the signature method and version with their protocol defaults when unset.
	pub fn with_protocol_defaults(mut self) -> Self {
		if self.signature_method.is_none() {
			self.signature_method = Some(SignatureMethod::default().as_str().into());
		}
		if self.version.is_none() {
			self.version = Some(DEFAULT_VERSION.into());
		}

		self
	}

	/// Returns the `oauth_*` protocol parameters that are set, excluding `realm` and
	/// `oauth_signature`.
	pub fn protocol_pairs(&self) -> Vec<(&'static str, &str)> {
		[
			(CONSUMER_KEY, &self.consumer_key),
			(TOKEN, &self.token),
			(SIGNATURE_METHOD, &self.signature_method),
			(TIMESTAMP, &self.timestamp),
			(NONCE, &self.nonce),
			(VERSION, &self.version),
			(CALLBACK, &self.callback),
			(VERIFIER, &self.verifier),
		]
		.into_iter()
		.filter_map(|(name, value)| value.as_deref().map(|value| (name, value)))
		.collect()
	}
}

/// Secrets that key an OAuth1 signature.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OAuth1Secrets {
	/// Consumer secret (required for signing).
	pub consumer_secret: Option<TokenSecret>,
	/// Token secret (required whenever a token is present).
	pub token_secret: Option<TokenSecret>,
}
impl OAuth1Secrets {
	/// Creates an empty secret set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the consumer secret.
	pub fn with_consumer_secret(mut self, secret: impl Into<TokenSecret>) -> Self {
		self.consumer_secret = Some(secret.into());

		self
	}

	/// Sets the token secret.
	pub fn with_token_secret(mut self, secret: impl Into<TokenSecret>) -> Self {
		self.token_secret = Some(secret.into());

		self
	}
}
