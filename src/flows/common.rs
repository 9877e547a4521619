//! Shared helpers for the authorization-code flow (scope formatting, token requests).

// crates.io
use oauth2::http::StatusCode;
// self
use crate::{
	_prelude::*,
	error::FlowError,
	flows::{GrantType, PhaseProperties, TokenResult, TokenResultParser},
	http::{self, TokenHttpClient},
};

/// Joins scope values with the RFC 6749 space delimiter, skipping empty entries.
pub fn format_scope<I, S>(scopes: I) -> Option<String>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut buf = String::new();

	for scope in scopes {
		let value = scope.as_ref().trim();

		if value.is_empty() {
			continue;
		}
		if !buf.is_empty() {
			buf.push(' ');
		}

		buf.push_str(value);
	}

	if buf.is_empty() { None } else { Some(buf) }
}

/// POSTs `properties` as a form to `target` and parses a 200 response into a [`TokenResult`].
pub(crate) async fn request_token<C>(
	http_client: &C,
	grant: GrantType,
	target: &Url,
	properties: &PhaseProperties,
	parser: TokenResultParser,
) -> Result<TokenResult>
where
	C: ?Sized + TokenHttpClient,
{
	let request = http::form_post(target, properties.iter())?;
	let response = http::execute(http_client, request).await?;
	let status = response.status();

	if status != StatusCode::OK {
		return Err(FlowError::TokenEndpoint { grant, status: status.as_u16() }.into());
	}

	parser(response.body()).map_err(|source| FlowError::TokenResponse { grant, source }.into())
}
