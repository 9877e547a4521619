//! Token endpoint results and the pluggable parser that produces them.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, auth::TokenSecret, error::TokenParseError};

/// Turns a 200 token endpoint body into a [`TokenResult`].
///
/// The flow only depends on this signature, so providers with non-JSON responses can supply
/// their own decoder via
/// [`AuthCodeGrantFlowBuilder::token_parser`](crate::flows::AuthCodeGrantFlowBuilder::token_parser).
pub type TokenResultParser = fn(&[u8]) -> Result<TokenResult, TokenParseError>;

/// Token issued by a token or refresh endpoint.
#[derive(Clone, Debug)]
pub struct TokenResult {
	/// Access token.
	pub access_token: TokenSecret,
	/// Token type (usually `bearer`).
	pub token_type: Option<String>,
	/// Refresh token, when issued.
	pub refresh_token: Option<TokenSecret>,
	/// Lifetime reported by the endpoint.
	pub expires_in: Option<Duration>,
	/// Granted scope, when reported.
	pub scope: Option<String>,
	/// Instant the result was parsed.
	pub received_at: OffsetDateTime,
	/// Provider-specific fields not modeled above.
	pub extra: Map<String, Value>,
}
impl TokenResult {
	/// Parses an RFC 6749 §5.1 JSON token response.
	///
	/// `expires_in` is accepted as a number or a numeric string.
	pub fn from_json_slice(body: &[u8]) -> Result<Self, TokenParseError> {
		let de = &mut serde_json::Deserializer::from_slice(body);
		let raw: RawTokenResponse = serde_path_to_error::deserialize(de)?;
		let access_token = raw.access_token.ok_or(TokenParseError::MissingAccessToken)?;

		Ok(Self {
			access_token: TokenSecret::new(access_token),
			token_type: raw.token_type,
			refresh_token: raw.refresh_token.map(TokenSecret::new),
			expires_in: raw.expires_in.as_ref().and_then(parse_expires_in),
			scope: raw.scope,
			received_at: OffsetDateTime::now_utc(),
			extra: raw.extra,
		})
	}

	/// Instant the access token expires, when the endpoint reported a representable lifetime.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.expires_in.and_then(|lifetime| self.received_at.checked_add(lifetime))
	}

	/// Returns true when the token is known to be expired at `now`.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		self.expires_at().is_some_and(|expires_at| expires_at <= now)
	}

	/// Returns a provider-specific field.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.extra.get(key)
	}
}

#[derive(Deserialize)]
struct RawTokenResponse {
	access_token: Option<String>,
	token_type: Option<String>,
	refresh_token: Option<String>,
	expires_in: Option<Value>,
	scope: Option<String>,
	#[serde(flatten)]
	extra: Map<String, Value>,
}

fn parse_expires_in(value: &Value) -> Option<Duration> {
	let secs = match value {
		Value::Number(number) => number.as_i64()?,
		Value::String(text) => text.trim().parse().ok()?,
		_ => return None,
	};

	(secs >= 0).then_some(Duration::seconds(secs))
}
