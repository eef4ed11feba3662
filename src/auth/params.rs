//! Caller-supplied grant parameters and the client credentials extracted from them.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::{
	_prelude::*,
	auth::Secret,
	provider::{CLIENT_ID, CLIENT_SECRET},
};

/// Parameter name to value map supplied by the caller.
///
/// Keys beyond a grant's required set are forwarded verbatim into the token request body, in
/// key order.
pub type ParameterMap = BTreeMap<String, String>;

/// Client identifier and secret sent through HTTP Basic authentication.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientCredentials {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Client secret; never rendered by `Debug`.
	pub client_secret: Secret,
}
impl ClientCredentials {
	/// Creates credentials from an identifier and secret.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), client_secret: Secret::new(client_secret) }
	}

	/// Reads `client_id` and `client_secret` from `params` without modifying it.
	pub fn from_params(params: &ParameterMap) -> Result<Self> {
		match (params.get(CLIENT_ID), params.get(CLIENT_SECRET)) {
			(Some(id), Some(secret)) => Ok(Self::new(id.as_str(), secret.as_str())),
			(id, secret) => {
				let missing = [(CLIENT_ID, id.is_none()), (CLIENT_SECRET, secret.is_none())]
					.into_iter()
					.filter_map(|(name, absent)| absent.then_some(name))
					.collect();

				Err(Error::MissingArgs { missing })
			},
		}
	}

	/// Returns the `Authorization` header value, `Basic base64(client_id:client_secret)`.
	pub fn basic_authorization(&self) -> Secret {
		let raw = format!("{}:{}", self.client_id, self.client_secret.expose());

		Secret::new(format!("Basic {}", STANDARD.encode(raw)))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn basic_authorization_encodes_id_and_secret() {
		let credentials = ClientCredentials::new("cid", "secret");

		assert_eq!(credentials.basic_authorization().expose(), "Basic Y2lkOnNlY3JldA==");
		assert!(!format!("{credentials:?}").contains("\"secret\""));
	}

	#[test]
	fn from_params_reports_absent_credentials() {
		let mut params = ParameterMap::new();

		params.insert("client_id".into(), "cid".into());

		let err = ClientCredentials::from_params(&params)
			.expect_err("Missing client_secret should be reported.");

		assert!(matches!(err, Error::MissingArgs { ref missing } if missing == &["client_secret"]));

		let err = ClientCredentials::from_params(&ParameterMap::new())
			.expect_err("Empty parameters should be reported.");

		assert!(
			matches!(err, Error::MissingArgs { ref missing } if missing == &["client_id", "client_secret"])
		);
	}

	#[test]
	fn from_params_leaves_map_untouched() {
		let mut params = ParameterMap::new();

		params.insert("client_id".into(), "cid".into());
		params.insert("client_secret".into(), "".into());

		let snapshot = params.clone();
		let credentials =
			ClientCredentials::from_params(&params).expect("Empty secrets are still present.");

		assert_eq!(credentials.client_id, "cid");
		assert_eq!(credentials.client_secret.expose(), "");
		assert_eq!(params, snapshot);
	}
}
