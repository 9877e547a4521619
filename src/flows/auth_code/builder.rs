// self
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;
use crate::{
	_prelude::*,
	auth::{ClientIdentifier, secret},
	error::ConfigError,
	flows::{
		AuthCodeGrantFlow, FlowProperties, Phase, REDIRECT_URI_UNDEFINED, TokenResult,
		TokenResultParser, common,
	},
	http::TokenHttpClient,
};

/// Length of the generated anti-forgery `state` value.
pub const STATE_LEN: usize = 32;

/// Builder for [`AuthCodeGrantFlow`] values.
#[derive(Debug, Default)]
pub struct AuthCodeGrantFlowBuilder {
	/// Endpoint the resource owner is redirected to.
	pub authorization_uri: Option<Url>,
	/// Endpoint that exchanges the authorization code.
	pub access_token_uri: Option<Url>,
	/// Endpoint that exchanges refresh tokens; falls back to `access_token_uri`.
	pub refresh_token_uri: Option<Url>,
	/// Redirect URI registered with the provider, sent verbatim; falls back to the out-of-band
	/// URN.
	pub redirect_uri: Option<String>,
	/// Client registration.
	pub client_identifier: Option<ClientIdentifier>,
	/// Space-delimited scope requested during authorization.
	pub scope: Option<String>,
	/// Caller-supplied properties, applied before protocol defaults.
	pub properties: FlowProperties,
	/// Custom token response decoder; JSON when unset.
	pub token_parser: Option<TokenResultParser>,
}
impl AuthCodeGrantFlowBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the authorization endpoint.
	pub fn authorization_uri(mut self, url: Url) -> Self {
		self.authorization_uri = Some(url);

		self
	}

	/// Sets the token endpoint used for the code exchange.
	pub fn access_token_uri(mut self, url: Url) -> Self {
		self.access_token_uri = Some(url);

		self
	}

	/// Sets a dedicated refresh endpoint.
	pub fn refresh_token_uri(mut self, url: Url) -> Self {
		self.refresh_token_uri = Some(url);

		self
	}

	/// Sets the redirect URI.
	///
	/// The value is not normalized: providers compare it with the registered URI character for
	/// character.
	pub fn redirect_uri(mut self, uri: impl Into<String>) -> Self {
		self.redirect_uri = Some(uri.into());

		self
	}

	/// Sets the client registration.
	pub fn client_identifier(mut self, client: ClientIdentifier) -> Self {
		self.client_identifier = Some(client);

		self
	}

	/// Sets a pre-formatted scope string.
	pub fn scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());

		self
	}

	/// Joins `scopes` with spaces; an empty list clears the scope.
	pub fn scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.scope = common::format_scope(scopes);

		self
	}

	/// Sets a property for `phase`. Caller values always win over protocol defaults.
	pub fn property(
		mut self,
		phase: Phase,
		key: impl Into<String>,
		value: impl Into<String>,
	) -> Self {
		self.properties.phase_mut(phase).set(key, value);

		self
	}

	/// Replaces the token response decoder.
	pub fn token_parser(mut self, parser: TokenResultParser) -> Self {
		self.token_parser = Some(parser);

		self
	}

	/// Builds the flow using the default reqwest transport.
	#[cfg(feature = "reqwest")]
	pub fn build(self) -> Result<AuthCodeGrantFlow<ReqwestHttpClient>> {
		self.build_with_http_client(ReqwestHttpClient::default())
	}

	/// Builds the flow with a caller-provided transport.
	pub fn build_with_http_client<C>(self, http_client: C) -> Result<AuthCodeGrantFlow<C>>
	where
		C: TokenHttpClient,
	{
		self.build_with_shared_http_client(Arc::new(http_client))
	}

	/// Builds the flow with a transport shared with other components.
	pub fn build_with_shared_http_client<C>(
		self,
		http_client: Arc<C>,
	) -> Result<AuthCodeGrantFlow<C>>
	where
		C: TokenHttpClient,
	{
		let authorization_uri = self
			.authorization_uri
			.ok_or(ConfigError::MissingFlowSetting { setting: "authorization_uri" })?;
		let access_token_uri = self
			.access_token_uri
			.ok_or(ConfigError::MissingFlowSetting { setting: "access_token_uri" })?;
		let client_identifier = self
			.client_identifier
			.ok_or(ConfigError::MissingFlowSetting { setting: "client_identifier" })?;
		let refresh_token_uri = self.refresh_token_uri.unwrap_or_else(|| access_token_uri.clone());
		let redirect_uri =
			self.redirect_uri.unwrap_or_else(|| REDIRECT_URI_UNDEFINED.to_owned());
		let state = secret::random_alphanumeric(STATE_LEN);
		let mut properties = self.properties;

		properties.apply_defaults(&client_identifier, &redirect_uri, self.scope.as_deref(), &state);

		Ok(AuthCodeGrantFlow {
			http_client,
			authorization_uri,
			access_token_uri,
			refresh_token_uri,
			client_identifier,
			properties,
			parser: self.token_parser.unwrap_or(TokenResult::from_json_slice),
			token_result: None,
		})
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;
	use crate::{
		auth::ClientId,
		flows::{CLIENT_ID, REDIRECT_URI, SCOPE, STATE},
		http::ReqwestHttpClient,
	};

	fn client() -> ClientIdentifier {
		ClientIdentifier::new(ClientId::new("client").expect("Client fixture should be valid."), "s")
	}

	fn url(value: &str) -> Url {
		Url::parse(value).expect("URL fixture should parse.")
	}

	#[test]
	fn missing_settings_are_reported_by_name() {
		let err = AuthCodeGrantFlowBuilder::new()
			.access_token_uri(url("https://example.com/token"))
			.client_identifier(client())
			.build_with_http_client(ReqwestHttpClient::default())
			.expect_err("Missing authorization URI should fail.");

		assert!(matches!(
			err,
			Error::Config(ConfigError::MissingFlowSetting { setting: "authorization_uri" })
		));
	}

	#[test]
	fn defaults_fill_refresh_uri_redirect_and_state() {
		let flow = AuthCodeGrantFlowBuilder::new()
			.authorization_uri(url("https://example.com/authorize"))
			.access_token_uri(url("https://example.com/token"))
			.client_identifier(client())
			.scopes(["email", " ", "profile"])
			.build_with_http_client(ReqwestHttpClient::default())
			.expect("Flow should build.");
		let authorization = flow.properties(Phase::Authorization);

		assert_eq!(flow.refresh_token_uri().as_str(), "https://example.com/token");
		assert_eq!(authorization.get(REDIRECT_URI), Some(REDIRECT_URI_UNDEFINED));
		assert_eq!(authorization.get(CLIENT_ID), Some("client"));
		assert_eq!(authorization.get(SCOPE), Some("email profile"));
		assert_eq!(flow.state().len(), STATE_LEN);
		assert_eq!(authorization.get(STATE), Some(flow.state()));
		assert!(flow.token_result().is_none());
	}

	#[test]
	fn redirect_uri_is_sent_verbatim() {
		let flow = AuthCodeGrantFlowBuilder::new()
			.authorization_uri(url("https://example.com/authorize"))
			.access_token_uri(url("https://example.com/token"))
			.client_identifier(client())
			.redirect_uri("https://app.example.com")
			.build_with_http_client(ReqwestHttpClient::default())
			.expect("Flow should build.");

		assert_eq!(
			flow.properties(Phase::Authorization).get(REDIRECT_URI),
			Some("https://app.example.com")
		);
		assert_eq!(
			flow.properties(Phase::AccessToken).get(REDIRECT_URI),
			Some("https://app.example.com")
		);
	}

	#[test]
	fn caller_properties_survive_defaults() {
		let flow = AuthCodeGrantFlowBuilder::new()
			.authorization_uri(url("https://example.com/authorize"))
			.access_token_uri(url("https://example.com/token"))
			.client_identifier(client())
			.property(Phase::Authorization, STATE, "fixed-state")
			.property(Phase::Authorization, "access_type", "offline")
			.build_with_http_client(ReqwestHttpClient::default())
			.expect("Flow should build.");

		assert_eq!(flow.state(), "fixed-state");
		assert_eq!(flow.properties(Phase::Authorization).get("access_type"), Some("offline"));
	}
}
