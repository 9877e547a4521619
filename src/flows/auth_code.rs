//! Authorization Code grant state machine.
//!
//! A flow is built once per authorization attempt and is not meant to be shared between tasks:
//! [`finish`](AuthCodeGrantFlow::finish) and
//! [`refresh_access_token`](AuthCodeGrantFlow::refresh_access_token) take `&mut self` and replace
//! the cached [`TokenResult`]. Run one flow instance per logical authorization.

mod builder;

pub use builder::*;

// self
use crate::{
	_prelude::*,
	auth::ClientIdentifier,
	ext::{AuthorizedClient, BearerSigner, SignedHttpClient},
	flows::{
		CODE, FlowProperties, GrantType, Phase, PhaseProperties, REFRESH_TOKEN, STATE,
		TokenResult, TokenResultParser, common,
	},
	http::TokenHttpClient,
	obs::{self, FlowKind},
};

/// OAuth 2.0 authorization-code flow bound to a single authorization attempt.
///
/// Construct instances through [`AuthCodeGrantFlowBuilder`].
pub struct AuthCodeGrantFlow<C>
where
	C: TokenHttpClient,
{
	http_client: Arc<C>,
	authorization_uri: Url,
	access_token_uri: Url,
	refresh_token_uri: Url,
	client_identifier: ClientIdentifier,
	properties: FlowProperties,
	parser: TokenResultParser,
	token_result: Option<TokenResult>,
}
impl<C> AuthCodeGrantFlow<C>
where
	C: TokenHttpClient,
{
	/// Returns the fully-formed authorization URL the resource owner should visit.
	///
	/// Every authorization-phase property is appended as a query parameter. The result only
	/// depends on the flow's configuration, so repeated calls return the same URL.
	pub fn start(&self) -> Url {
		obs::FlowSpan::new(FlowKind::AuthorizationCode, "start").in_scope(|| {
			let mut url = self.authorization_uri.clone();

			if !self.properties.authorization.is_empty() {
				url.query_pairs_mut().extend_pairs(self.properties.authorization.iter());
			}

			url
		})
	}

	/// Opaque anti-forgery value the authorization server must echo back.
	pub fn state(&self) -> &str {
		self.properties.authorization.get(STATE).unwrap_or_default()
	}

	/// Exchanges the authorization `code` for a token after validating `state`.
	///
	/// A `state` that differs from [`state`](Self::state) fails with [`Error::StateMismatch`]
	/// before any network call. Non-200 responses fail with
	/// [`FlowError::TokenEndpoint`](crate::error::FlowError::TokenEndpoint) and leave any
	/// previously cached token untouched.
	pub async fn finish(&mut self, code: &str, state: &str) -> Result<TokenResult> {
		obs::observe(FlowKind::AuthorizationCode, "finish", async move {
			if self.state() != state {
				return Err(Error::StateMismatch);
			}

			self.properties.access_token.set(CODE, code);

			let result = common::request_token(
				self.http_client.as_ref(),
				GrantType::AuthorizationCode,
				&self.access_token_uri,
				&self.properties.access_token,
				self.parser,
			)
			.await?;

			self.token_result = Some(result.clone());

			Ok(result)
		})
		.await
	}

	/// Exchanges `refresh_token` for a new token and replaces the cached result.
	///
	/// The request goes to the refresh URI, which defaults to the access-token URI. May be called
	/// any number of times.
	pub async fn refresh_access_token(&mut self, refresh_token: &str) -> Result<TokenResult> {
		obs::observe(FlowKind::Refresh, "refresh_access_token", async move {
			self.properties.refresh.set(REFRESH_TOKEN, refresh_token);

			let result = common::request_token(
				self.http_client.as_ref(),
				GrantType::RefreshToken,
				&self.refresh_token_uri,
				&self.properties.refresh,
				self.parser,
			)
			.await?;

			self.token_result = Some(result.clone());

			Ok(result)
		})
		.await
	}

	/// Most recent token obtained by [`finish`](Self::finish) or
	/// [`refresh_access_token`](Self::refresh_access_token).
	pub fn token_result(&self) -> Option<&TokenResult> {
		self.token_result.as_ref()
	}

	/// Properties sent with `phase`.
	pub fn properties(&self, phase: Phase) -> &PhaseProperties {
		self.properties.phase(phase)
	}

	/// Client registration used by the flow.
	pub fn client_identifier(&self) -> &ClientIdentifier {
		&self.client_identifier
	}

	/// Endpoint that receives refresh requests.
	pub fn refresh_token_uri(&self) -> &Url {
		&self.refresh_token_uri
	}

	/// Request decorator that attaches `Authorization: Bearer <access_token>`.
	///
	/// Fails with [`Error::FlowNotFinished`] until a token has been obtained.
	pub fn oauth2_feature(&self) -> Result<BearerSigner> {
		self.token_result
			.as_ref()
			.map(|token| BearerSigner::new(token.access_token.clone()))
			.ok_or(Error::FlowNotFinished)
	}

	/// Client sharing the flow's transport that signs every request with the cached token.
	///
	/// Fails with [`Error::FlowNotFinished`] until a token has been obtained.
	pub fn authorized_client(&self) -> Result<AuthorizedClient<C>> {
		Ok(SignedHttpClient::new(self.http_client.clone(), self.oauth2_feature()?))
	}
}
impl<C> Debug for AuthCodeGrantFlow<C>
where
	C: TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthCodeGrantFlow")
			.field("authorization_uri", &self.authorization_uri)
			.field("access_token_uri", &self.access_token_uri)
			.field("refresh_token_uri", &self.refresh_token_uri)
			.field("client_id", &self.client_identifier.id)
			.field("finished", &self.token_result.is_some())
			.finish()
	}
}
