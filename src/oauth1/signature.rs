//! Signature base strings, signing methods, and `Authorization` header rendering.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha1::Sha1;
use sha2::Sha256;
// self
use crate::{
	_prelude::*,
	error::SignatureError,
	http,
	oauth1::{OAuth1Parameters, OAuth1Secrets, REALM, SIGNATURE},
};

/// RFC 3986 unreserved characters stay literal; everything else is percent-encoded.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Signature methods implemented by the signer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SignatureMethod {
	/// `HMAC-SHA1` (RFC 5849 §3.4.2).
	#[default]
	HmacSha1,
	/// `HMAC-SHA256`, a common provider extension.
	HmacSha256,
	/// `PLAINTEXT` (RFC 5849 §3.4.4); only safe over TLS.
	Plaintext,
}
impl SignatureMethod {
	/// Returns the wire identifier.
	pub const fn as_str(self) -> &'static str {
		match self {
			SignatureMethod::HmacSha1 => "HMAC-SHA1",
			SignatureMethod::HmacSha256 => "HMAC-SHA256",
			SignatureMethod::Plaintext => "PLAINTEXT",
		}
	}

	/// Signs `base` with the key derived from `secrets`.
	pub fn sign(self, base: &str, secrets: &OAuth1Secrets) -> Result<String, SignatureError> {
		let key = signing_key(secrets);

		match self {
			SignatureMethod::HmacSha1 => {
				let mut mac = <Hmac<Sha1>>::new_from_slice(key.as_bytes())?;

				mac.update(base.as_bytes());

				Ok(STANDARD.encode(mac.finalize().into_bytes()))
			},
			SignatureMethod::HmacSha256 => {
				let mut mac = <Hmac<Sha256>>::new_from_slice(key.as_bytes())?;

				mac.update(base.as_bytes());

				Ok(STANDARD.encode(mac.finalize().into_bytes()))
			},
			SignatureMethod::Plaintext => Ok(key),
		}
	}
}
impl Display for SignatureMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for SignatureMethod {
	type Err = SignatureError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		[Self::HmacSha1, Self::HmacSha256, Self::Plaintext]
			.into_iter()
			.find(|method| method.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| SignatureError::UnsupportedMethod { method: s.to_owned() })
	}
}

/// Percent-encodes `value` per RFC 5849 §3.6.
pub fn encode(value: &str) -> String {
	utf8_percent_encode(value, UNRESERVED).to_string()
}

/// Builds the signature base string for `request` and the resolved protocol parameters.
///
/// The parameter set is the request URI's query pairs, every `oauth_*` protocol parameter, and,
/// for `application/x-www-form-urlencoded` requests, the body pairs.
pub fn base_string(
	request: &HttpRequest,
	params: &OAuth1Parameters,
) -> Result<String, SignatureError> {
	let raw_uri = request.uri().to_string();
	let uri =
		Url::parse(&raw_uri).map_err(|_| SignatureError::InvalidUri { uri: raw_uri.clone() })?;
	let mut pairs = uri.query_pairs().into_owned().collect::<Vec<_>>();

	pairs.extend(params.protocol_pairs().into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())));

	if http::is_form_urlencoded(request) {
		pairs.extend(url::form_urlencoded::parse(request.body()).into_owned());
	}

	Ok(format!(
		"{}&{}&{}",
		encode(&request.method().as_str().to_ascii_uppercase()),
		encode(&normalize_uri(&uri)?),
		encode(&normalize_parameters(pairs)),
	))
}

/// Normalizes a request URI into `scheme://host[:port]/path` (RFC 5849 §3.4.1.2).
pub fn normalize_uri(uri: &Url) -> Result<String, SignatureError> {
	let host =
		uri.host_str().ok_or_else(|| SignatureError::InvalidUri { uri: uri.to_string() })?;
	let host = host.to_ascii_lowercase();
	let port = uri.port().map(|port| format!(":{port}")).unwrap_or_default();

	Ok(format!("{}://{host}{port}{}", uri.scheme(), uri.path()))
}

/// Encodes, sorts, and joins parameter pairs (RFC 5849 §3.4.1.3.2).
pub fn normalize_parameters<I>(pairs: I) -> String
where
	I: IntoIterator<Item = (String, String)>,
{
	let mut encoded =
		pairs.into_iter().map(|(name, value)| (encode(&name), encode(&value))).collect::<Vec<_>>();

	encoded.sort();
	encoded.into_iter().map(|(name, value)| format!("{name}={value}")).collect::<Vec<_>>().join("&")
}

/// Renders the `Authorization` header value carrying `signature`.
pub fn authorization_header(params: &OAuth1Parameters, signature: &str) -> String {
	let mut attributes = params.protocol_pairs();

	attributes.push((SIGNATURE, signature));
	attributes.sort();

	let realm = params.realm.as_deref().map(|realm| (REALM, realm));
	let rendered = realm
		.into_iter()
		.chain(attributes)
		.map(|(name, value)| format!("{name}=\"{}\"", encode(value)))
		.collect::<Vec<_>>()
		.join(", ");

	format!("OAuth {rendered}")
}

fn signing_key(secrets: &OAuth1Secrets) -> String {
	let consumer = secrets.consumer_secret.as_ref().map(|secret| secret.expose()).unwrap_or("");
	let token = secrets.token_secret.as_ref().map(|secret| secret.expose()).unwrap_or("");

	format!("{}&{}", encode(consumer), encode(token))
}
