//! OpenID Connect discovery document model and response interpretation.

// crates.io
use oauth2::http::StatusCode;
// self
use crate::{_prelude::*, error::DiscoveryError, http};

/// Path appended to an issuer to reach its discovery document.
pub const WELL_KNOWN_PATH: &str = "/.well-known/openid-configuration";

/// Provider metadata published at the well-known location.
///
/// Only the two endpoints the client consumes are typed; every other member is carried through
/// unexamined in [`DiscoveryDocument::metadata`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryDocument {
	/// Endpoint end-users are redirected to for authorization.
	pub authorization_endpoint: Url,
	/// Endpoint that issues access tokens.
	pub token_endpoint: Url,
	/// Remaining provider metadata (issuer, jwks_uri, supported values, ...).
	#[serde(flatten)]
	pub metadata: BTreeMap<String, Value>,
}
impl DiscoveryDocument {
	/// Returns the `issuer` member when present as a string.
	pub fn issuer(&self) -> Option<&str> {
		self.metadata.get("issuer").and_then(Value::as_str)
	}

	/// Looks up an untyped metadata member.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.metadata.get(name)
	}
}

/// Maps a discovery response into a [`DiscoveryDocument`].
///
/// The status is checked first: any status other than `200` fails with
/// [`DiscoveryError::Status`] regardless of the body. A `200` body that is not JSON, or that lacks
/// either endpoint, fails with [`DiscoveryError::Parse`] carrying the raw body.
pub fn interpret_discovery(
	status: StatusCode,
	body: &[u8],
) -> Result<DiscoveryDocument, DiscoveryError> {
	if status != StatusCode::OK {
		return Err(DiscoveryError::Status {
			status: status.as_u16(),
			message: http::status_message(status),
		});
	}

	let de = &mut serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(de).map_err(|source| DiscoveryError::Parse {
		source,
		raw_body: String::from_utf8_lossy(body).into_owned(),
	})
}

/// Derives `<issuer>/.well-known/openid-configuration`, tolerating a trailing slash.
pub fn well_known_url(issuer: &Url) -> Result<Url, url::ParseError> {
	let mut base = issuer.clone();

	base.set_query(None);
	base.set_fragment(None);

	Url::parse(&format!("{}{WELL_KNOWN_PATH}", base.as_str().trim_end_matches('/')))
}
