//! Client-wide signer plus the per-request override resolution it performs.

// crates.io
use oauth2::http::{Extensions, HeaderValue, header::AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ConsumerCredentials},
	error::{ConfigError, SignatureError},
	oauth1::{OAuth1Parameters, OAuth1Secrets, SignatureMethod, signature},
	obs::{self, FlowKind},
};

/// Signs outgoing requests with OAuth 1.0a.
///
/// The signer only holds client-wide defaults and never mutates them, so a single instance can
/// sign any number of concurrent requests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OAuth1Signer {
	/// Client-wide protocol parameters.
	pub parameters: OAuth1Parameters,
	/// Client-wide secrets.
	pub secrets: OAuth1Secrets,
}
impl OAuth1Signer {
	/// Creates a signer for the provided consumer.
	pub fn new(consumer: ConsumerCredentials) -> Self {
		Self {
			parameters: OAuth1Parameters::new().with_consumer_key(consumer.key.to_string()),
			secrets: OAuth1Secrets::new().with_consumer_secret(consumer.secret),
		}
	}

	/// Signs every request with the provided access token by default.
	pub fn with_access_token(mut self, token: AccessToken) -> Self {
		self.parameters = self.parameters.with_token(token.token);
		self.secrets = self.secrets.with_token_secret(token.secret);

		self
	}

	/// Replaces the client-wide parameters.
	pub fn with_parameters(mut self, parameters: OAuth1Parameters) -> Self {
		self.parameters = parameters;

		self
	}

	/// Replaces the client-wide secrets.
	pub fn with_secrets(mut self, secrets: OAuth1Secrets) -> Self {
		self.secrets = secrets;

		self
	}

	/// Signs `request`, attaching an `Authorization: OAuth ...` header.
	///
	/// Requests that already carry an `Authorization` header are returned untouched, including
	/// their override extensions. Otherwise the overrides are consumed, the effective
	/// configuration is resolved and validated, and the signature is computed. On error the
	/// request is dropped; it is never handed back unsigned.
	pub fn sign_request(&self, mut request: HttpRequest) -> Result<HttpRequest> {
		if request.headers().contains_key(AUTHORIZATION) {
			return Ok(request);
		}

		obs::observe_sync(FlowKind::OAuth1Signature, "sign_request", || {
			let overrides = SigningOverrides::take_from(request.extensions_mut());
			let value = EffectiveConfig::resolve(overrides, self)?.authorization_header(&request)?;

			request.headers_mut().insert(AUTHORIZATION, value);

			Ok(request)
		})
	}
}

/// One-shot signing overrides carried in a request's extensions.
///
/// Every value is optional; absent values fall back to the [`OAuth1Signer`] defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SigningOverrides {
	/// Consumer that replaces the configured consumer key and secret.
	pub consumer: Option<ConsumerCredentials>,
	/// Token that replaces the configured token and token secret.
	pub access_token: Option<AccessToken>,
	/// Parameters that replace the configured parameters wholesale.
	pub parameters: Option<OAuth1Parameters>,
	/// Secrets that replace the configured secrets wholesale.
	pub secrets: Option<OAuth1Secrets>,
}
impl SigningOverrides {
	/// Removes every recognized override from `extensions`.
	pub fn take_from(extensions: &mut Extensions) -> Self {
		Self {
			consumer: extensions.remove::<ConsumerCredentials>(),
			access_token: extensions.remove::<AccessToken>(),
			parameters: extensions.remove::<OAuth1Parameters>(),
			secrets: extensions.remove::<OAuth1Secrets>(),
		}
	}

	/// Stores the overrides in `extensions` so the next signing pass consumes them.
	pub fn insert_into(self, extensions: &mut Extensions) {
		if let Some(consumer) = self.consumer {
			extensions.insert(consumer);
		}
		if let Some(token) = self.access_token {
			extensions.insert(token);
		}
		if let Some(parameters) = self.parameters {
			extensions.insert(parameters);
		}
		if let Some(secrets) = self.secrets {
			extensions.insert(secrets);
		}
	}
}

/// Fully resolved parameters and secrets for a single signing operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
	/// Resolved parameters (defaults, timestamp, and nonce filled in).
	pub parameters: OAuth1Parameters,
	/// Resolved secrets.
	pub secrets: OAuth1Secrets,
}
impl EffectiveConfig {
	/// Resolves per-request overrides against the signer's defaults.
	///
	/// Overriding parameters or secrets replace the defaults wholesale; consumer and token
	/// overrides are then applied on top. Fails with [`ConfigError::MissingConsumer`] when the
	/// consumer key or secret is absent and with [`ConfigError::MissingTokenSecret`] when a token
	/// has no secret.
	pub fn resolve(overrides: SigningOverrides, defaults: &OAuth1Signer) -> Result<Self> {
		let SigningOverrides { consumer, access_token, parameters, secrets } = overrides;
		let mut parameters = parameters.unwrap_or_else(|| defaults.parameters.clone());
		let mut secrets = secrets.unwrap_or_else(|| defaults.secrets.clone());

		if let Some(consumer) = consumer {
			parameters = parameters.with_consumer_key(consumer.key.to_string());
			secrets = secrets.with_consumer_secret(consumer.secret);
		}
		if let Some(token) = access_token {
			parameters = parameters.with_token(token.token);
			secrets = secrets.with_token_secret(token.secret);
		}

		parameters = parameters.with_protocol_defaults();

		if parameters.consumer_key.is_none() || secrets.consumer_secret.is_none() {
			return Err(ConfigError::MissingConsumer.into());
		}
		if parameters.token.is_some() && secrets.token_secret.is_none() {
			return Err(ConfigError::MissingTokenSecret.into());
		}
		if parameters.timestamp.is_none() {
			parameters = parameters.with_current_timestamp();
		}
		if parameters.nonce.is_none() {
			parameters = parameters.with_random_nonce();
		}

		Ok(Self { parameters, secrets })
	}

	/// Resolved signature method.
	pub fn signature_method(&self) -> Result<SignatureMethod, SignatureError> {
		self.parameters.signature_method.as_deref().unwrap_or_default().parse()
	}

	/// Computes the `Authorization` header value for `request`.
	pub fn authorization_header(&self, request: &HttpRequest) -> Result<HeaderValue> {
		let method = self.signature_method()?;
		let base = signature::base_string(request, &self.parameters)?;
		let signed = method.sign(&base, &self.secrets)?;
		let rendered = signature::authorization_header(&self.parameters, &signed);
		let value = HeaderValue::from_str(&rendered).map_err(SignatureError::from)?;

		Ok(value)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::Request;
	// self
	use super::*;
	use crate::auth::ConsumerKey;

	fn consumer(key: &str, secret: &str) -> ConsumerCredentials {
		ConsumerCredentials::new(
			ConsumerKey::new(key).expect("Consumer key fixture should be valid."),
			secret,
		)
	}

	#[test]
	fn consumer_override_replaces_defaults() {
		let signer = OAuth1Signer::new(consumer("default-key", "default-secret"));
		let overrides = SigningOverrides {
			consumer: Some(consumer("request-key", "request-secret")),
			..Default::default()
		};
		let config =
			EffectiveConfig::resolve(overrides, &signer).expect("Resolution should succeed.");

		assert_eq!(config.parameters.consumer_key.as_deref(), Some("request-key"));
		assert_eq!(
			config.secrets.consumer_secret.as_ref().map(|secret| secret.expose()),
			Some("request-secret")
		);
		assert_eq!(signer.parameters.consumer_key.as_deref(), Some("default-key"));
		assert!(signer.parameters.timestamp.is_none());
		assert!(signer.parameters.nonce.is_none());
	}

	#[test]
	fn parameter_override_replaces_defaults_wholesale() {
		let signer = OAuth1Signer::new(consumer("default-key", "default-secret"))
			.with_access_token(AccessToken::new("default-token", "default-token-secret"));
		let overrides = SigningOverrides {
			parameters: Some(OAuth1Parameters::new().with_consumer_key("other-key")),
			..Default::default()
		};
		let config =
			EffectiveConfig::resolve(overrides, &signer).expect("Resolution should succeed.");

		assert_eq!(config.parameters.consumer_key.as_deref(), Some("other-key"));
		assert!(config.parameters.token.is_none());
		assert_eq!(config.parameters.signature_method.as_deref(), Some("HMAC-SHA1"));
		assert_eq!(config.parameters.version.as_deref(), Some("1.0"));
	}

	#[test]
	fn missing_consumer_parts_fail() {
		let no_secret = OAuth1Signer::default()
			.with_parameters(OAuth1Parameters::new().with_consumer_key("key"));
		let err = EffectiveConfig::resolve(SigningOverrides::default(), &no_secret)
			.expect_err("Missing consumer secret should fail.");

		assert!(matches!(err, Error::Config(ConfigError::MissingConsumer)));

		let no_key =
			OAuth1Signer::default().with_secrets(OAuth1Secrets::new().with_consumer_secret("s"));
		let err = EffectiveConfig::resolve(SigningOverrides::default(), &no_key)
			.expect_err("Missing consumer key should fail.");

		assert!(matches!(err, Error::Config(ConfigError::MissingConsumer)));
	}

	#[test]
	fn token_without_secret_fails() {
		let signer = OAuth1Signer::new(consumer("key", "secret"))
			.with_parameters(OAuth1Parameters::new().with_consumer_key("key").with_token("t"));
		let err = EffectiveConfig::resolve(SigningOverrides::default(), &signer)
			.expect_err("Token without secret should fail.");

		assert!(matches!(err, Error::Config(ConfigError::MissingTokenSecret)));
	}

	#[test]
	fn overrides_round_trip_through_extensions() {
		let mut request =
			Request::builder().body(Vec::<u8>::new()).expect("Request fixture should build.");
		let overrides = SigningOverrides {
			access_token: Some(AccessToken::new("t", "ts")),
			secrets: Some(OAuth1Secrets::new().with_consumer_secret("cs")),
			..Default::default()
		};

		overrides.clone().insert_into(request.extensions_mut());

		assert_eq!(SigningOverrides::take_from(request.extensions_mut()), overrides);
		assert_eq!(SigningOverrides::take_from(request.extensions_mut()), Default::default());
	}

	#[test]
	fn unknown_signature_method_surfaces_signature_error() {
		let signer = OAuth1Signer::new(consumer("key", "secret"))
			.with_parameters(OAuth1Parameters::new().with_signature_method("RSA-SHA1"));
		let request = Request::builder()
			.uri("https://example.com/resource")
			.body(Vec::new())
			.expect("Request fixture should build.");
		let overrides =
			SigningOverrides { consumer: Some(consumer("key", "secret")), ..Default::default() };
		let config =
			EffectiveConfig::resolve(overrides, &signer).expect("Resolution should succeed.");
		let err = config
			.authorization_header(&request)
			.expect_err("Unsupported methods should fail to sign.");

		assert!(matches!(err, Error::Signature(SignatureError::UnsupportedMethod { .. })));
	}
}
