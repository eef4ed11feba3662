//! Token endpoint payloads passed through to callers.

// self
use crate::_prelude::*;

/// JSON payload returned by the token endpoint, kept exactly as received.
///
/// Accessors read the common RFC 6749 fields without reshaping the document; use
/// [`TokenResponse::as_value`] or [`TokenResponse::into_value`] for provider-specific members.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenResponse(Value);
impl TokenResponse {
	/// Wraps a parsed payload.
	pub fn new(value: Value) -> Self {
		Self(value)
	}

	/// Borrows the payload.
	pub fn as_value(&self) -> &Value {
		&self.0
	}

	/// Returns the payload.
	pub fn into_value(self) -> Value {
		self.0
	}

	/// Returns `access_token` when present as a string.
	pub fn access_token(&self) -> Option<&str> {
		self.str_field("access_token")
	}

	/// Returns `token_type` when present as a string.
	pub fn token_type(&self) -> Option<&str> {
		self.str_field("token_type")
	}

	/// Returns `refresh_token` when present as a string.
	pub fn refresh_token(&self) -> Option<&str> {
		self.str_field("refresh_token")
	}

	/// Returns `scope` when present as a string.
	pub fn scope(&self) -> Option<&str> {
		self.str_field("scope")
	}

	/// Returns `expires_in` as a duration.
	///
	/// Accepts a non-negative integer or an integer string, since some providers quote it.
	pub fn expires_in(&self) -> Option<Duration> {
		let secs = match self.0.get("expires_in")? {
			Value::Number(number) => number.as_i64()?,
			Value::String(raw) => raw.trim().parse().ok()?,
			_ => return None,
		};

		(secs >= 0).then(|| Duration::seconds(secs))
	}

	fn str_field(&self, name: &str) -> Option<&str> {
		self.0.get(name).and_then(Value::as_str)
	}
}
impl From<TokenResponse> for Value {
	fn from(response: TokenResponse) -> Self {
		response.0
	}
}
impl Debug for TokenResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let mut s = f.debug_struct("TokenResponse");

		match self.0.as_object() {
			Some(fields) =>
				for (name, value) in fields {
					if matches!(name.as_str(), "token_type" | "expires_in" | "scope") {
						s.field(name, value);
					} else {
						s.field(name, &"<redacted>");
					}
				},
			None => {
				s.field("value", &"<redacted>");
			},
		}

		s.finish()
	}
}
