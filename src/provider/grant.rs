//! Grant types, their required arguments, and the validator applied before any network access.

// self
use crate::{_prelude::*, auth::ParameterMap};

/// `client_id` parameter name.
pub const CLIENT_ID: &str = "client_id";
/// `client_secret` parameter name.
pub const CLIENT_SECRET: &str = "client_secret";
/// Authorization `code` parameter name.
pub const CODE: &str = "code";
/// `redirect_uri` parameter name.
pub const REDIRECT_URI: &str = "redirect_uri";
/// `refresh_token` parameter name.
pub const REFRESH_TOKEN: &str = "refresh_token";
/// Resource owner `username` parameter name.
pub const USERNAME: &str = "username";
/// Resource owner `password` parameter name.
pub const PASSWORD: &str = "password";
/// `grant_type` parameter name.
pub const GRANT_TYPE: &str = "grant_type";

const AUTHORIZATION_CODE_ARGS: &[&str] = &[CLIENT_ID, CLIENT_SECRET, CODE, REDIRECT_URI];
const CLIENT_CREDENTIALS_ARGS: &[&str] = &[CLIENT_ID, CLIENT_SECRET];
const REFRESH_TOKEN_ARGS: &[&str] = &[CLIENT_ID, CLIENT_SECRET, REFRESH_TOKEN];
const PASSWORD_ARGS: &[&str] = &[CLIENT_ID, CLIENT_SECRET, USERNAME, PASSWORD];

/// OAuth 2.0 grant types understood by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Authorization Code grant.
	AuthorizationCode,
	/// Client Credentials grant for app-only tokens.
	ClientCredentials,
	/// Implicit grant; only meaningful for authorization URLs.
	Implicit,
	/// Refresh Token grant.
	RefreshToken,
	/// Resource Owner Password Credentials grant.
	Password,
}
impl GrantType {
	/// Every grant type, in declaration order.
	pub const ALL: [GrantType; 5] = [
		GrantType::AuthorizationCode,
		GrantType::ClientCredentials,
		GrantType::Implicit,
		GrantType::RefreshToken,
		GrantType::Password,
	];

	/// Returns the RFC 6749 identifier for the grant type.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::ClientCredentials => "client_credentials",
			GrantType::Implicit => "implicit",
			GrantType::RefreshToken => "refresh_token",
			GrantType::Password => "password",
		}
	}

	/// Parses an RFC 6749 identifier.
	pub fn from_wire(value: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|grant| grant.as_str() == value)
	}

	/// Parses a constant-style alias (`AUTHORIZATION_CODE`, `RESOURCE_OWNER`, ...) or an RFC
	/// 6749 identifier.
	pub fn from_alias(value: &str) -> Option<Self> {
		match value {
			"AUTHORIZATION_CODE" => Some(GrantType::AuthorizationCode),
			"CLIENT_CREDENTIALS" => Some(GrantType::ClientCredentials),
			"IMPLICIT" => Some(GrantType::Implicit),
			"REFRESH_TOKEN" => Some(GrantType::RefreshToken),
			"RESOURCE_OWNER" => Some(GrantType::Password),
			other => Self::from_wire(other),
		}
	}

	/// Parameters a token request for this grant must carry, in reporting order.
	///
	/// Returns `None` for grants without a token-request form.
	pub const fn required_args(self) -> Option<&'static [&'static str]> {
		match self {
			GrantType::AuthorizationCode => Some(AUTHORIZATION_CODE_ARGS),
			GrantType::ClientCredentials => Some(CLIENT_CREDENTIALS_ARGS),
			GrantType::RefreshToken => Some(REFRESH_TOKEN_ARGS),
			GrantType::Password => Some(PASSWORD_ARGS),
			GrantType::Implicit => None,
		}
	}

	/// `response_type` used by authorization URLs; `None` for grants without a redirect step.
	pub const fn response_type(self) -> Option<&'static str> {
		match self {
			GrantType::AuthorizationCode => Some("code"),
			GrantType::Implicit => Some("token"),
			_ => None,
		}
	}
}
impl AsRef<str> for GrantType {
	fn as_ref(&self) -> &str {
		self.as_str()
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Confirms `grant` has a token-request form and every required parameter is present.
///
/// Values are not inspected; an empty string counts as present. All required names are checked
/// before reporting, so [`Error::MissingArgs`] lists every absent name in declared order.
pub fn validate_grant(grant: &str, params: &ParameterMap) -> Result<GrantType> {
	let (grant_type, required) = GrantType::from_wire(grant)
		.and_then(|grant_type| grant_type.required_args().map(|args| (grant_type, args)))
		.ok_or_else(|| Error::UnknownGrant { grant: grant.to_owned() })?;
	let missing = required
		.iter()
		.copied()
		.filter(|name| !params.contains_key(*name))
		.collect::<Vec<_>>();

	if missing.is_empty() { Ok(grant_type) } else { Err(Error::MissingArgs { missing }) }
}
