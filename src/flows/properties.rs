//! Per-phase request properties for the authorization-code flow.

// self
use crate::{
	_prelude::*,
	auth::ClientIdentifier,
	flows::{
		CLIENT_ID, CLIENT_SECRET, GRANT_TYPE, GrantType, REDIRECT_URI, RESPONSE_TYPE, SCOPE, STATE,
	},
};

/// Flow phase a property is sent with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
	/// Query parameters of the authorization URL.
	Authorization,
	/// Form fields of the code-for-token exchange.
	AccessToken,
	/// Form fields of the refresh-token exchange.
	Refresh,
}
impl Phase {
	/// Returns a stable label for the phase.
	pub const fn as_str(self) -> &'static str {
		match self {
			Phase::Authorization => "authorization",
			Phase::AccessToken => "access_token",
			Phase::Refresh => "refresh",
		}
	}
}
impl Display for Phase {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Ordered key/value list where every key appears at most once.
///
/// [`set`](Self::set) is last-write-wins and keeps the key's original position;
/// [`set_default`](Self::set_default) only fills absent keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhaseProperties(Vec<(String, String)>);
impl PhaseProperties {
	/// Returns the value stored for `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
	}

	/// Stores `value` under `key`, replacing any previous value.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		let value = value.into();

		match self.0.iter_mut().find(|(k, _)| *k == key) {
			Some((_, slot)) => *slot = value,
			None => self.0.push((key, value)),
		}
	}

	/// Stores `value` under `key` only when the key is absent.
	pub fn set_default(&mut self, key: &str, value: &str) {
		if self.get(key).is_none() {
			self.0.push((key.to_owned(), value.to_owned()));
		}
	}

	/// Iterates over the entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when no entry is stored.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Property lists for every [`Phase`] of one flow.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlowProperties {
	/// Authorization URL query parameters.
	pub authorization: PhaseProperties,
	/// Code exchange form fields.
	pub access_token: PhaseProperties,
	/// Refresh exchange form fields.
	pub refresh: PhaseProperties,
}
impl FlowProperties {
	/// Returns the list for `phase`.
	pub fn phase(&self, phase: Phase) -> &PhaseProperties {
		match phase {
			Phase::Authorization => &self.authorization,
			Phase::AccessToken => &self.access_token,
			Phase::Refresh => &self.refresh,
		}
	}

	/// Returns the mutable list for `phase`.
	pub fn phase_mut(&mut self, phase: Phase) -> &mut PhaseProperties {
		match phase {
			Phase::Authorization => &mut self.authorization,
			Phase::AccessToken => &mut self.access_token,
			Phase::Refresh => &mut self.refresh,
		}
	}

	/// Seeds protocol defaults without overwriting caller-supplied values.
	pub(crate) fn apply_defaults(
		&mut self,
		client: &ClientIdentifier,
		redirect_uri: &str,
		scope: Option<&str>,
		state: &str,
	) {
		let client_id: &str = &client.id;
		let client_secret = client.secret.expose();

		self.authorization.set_default(RESPONSE_TYPE, "code");
		self.authorization.set_default(CLIENT_ID, client_id);
		self.authorization.set_default(REDIRECT_URI, redirect_uri);
		self.authorization.set_default(STATE, state);

		if let Some(scope) = scope {
			self.authorization.set_default(SCOPE, scope);
		}

		self.access_token.set_default(CLIENT_ID, client_id);
		self.access_token.set_default(REDIRECT_URI, redirect_uri);
		self.access_token.set_default(CLIENT_SECRET, client_secret);
		self.access_token.set_default(GRANT_TYPE, GrantType::AuthorizationCode.as_str());

		self.refresh.set_default(CLIENT_ID, client_id);
		self.refresh.set_default(CLIENT_SECRET, client_secret);
		self.refresh.set_default(GRANT_TYPE, GrantType::RefreshToken.as_str());
	}
}
