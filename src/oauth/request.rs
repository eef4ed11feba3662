//! Token request construction.

// crates.io
use oauth2::{
	HttpRequest,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
use url::{Position, form_urlencoded::Serializer};
// self
use crate::{
	_prelude::*,
	auth::{ClientCredentials, ParameterMap, Secret},
	error::ConfigError,
	provider::{CLIENT_ID, CLIENT_SECRET, DiscoveryDocument, GRANT_TYPE, GrantType},
};

/// `Content-Type` of every token request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
/// `Accept` value sent to the provider.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Fully formed token endpoint request.
///
/// Client credentials live only in [`TokenRequest::authorization`]; the form body never carries
/// `client_id` or `client_secret`.
#[derive(Clone)]
pub struct TokenRequest {
	/// Token endpoint taken from discovery.
	pub endpoint: Url,
	/// Authority (`host[:port]`) of the token endpoint.
	pub host: String,
	/// Path plus query of the token endpoint.
	pub path: String,
	/// `Authorization: Basic ...` header value.
	pub authorization: Secret,
	/// `application/x-www-form-urlencoded` body starting with `grant_type`.
	pub body: Secret,
}
impl TokenRequest {
	/// Builds the request for `grant` from the caller's parameters and the discovered token
	/// endpoint.
	///
	/// The parameter map is only read. Every key other than `client_id`, `client_secret`, and
	/// `grant_type` is form-encoded into the body in key order after `grant_type=<grant>`.
	pub fn build(
		grant: GrantType,
		params: &ParameterMap,
		document: &DiscoveryDocument,
	) -> Result<Self> {
		if grant.required_args().is_none() {
			return Err(Error::UnknownGrant { grant: grant.as_str().to_owned() });
		}

		let credentials = ClientCredentials::from_params(params)?;
		let endpoint = document.token_endpoint.clone();

		if endpoint.scheme() != "https" {
			return Err(
				ConfigError::InsecureEndpoint { endpoint: "token", url: endpoint.to_string() }
					.into(),
			);
		}
		if endpoint.host_str().is_none_or(str::is_empty) {
			return Err(
				ConfigError::EndpointWithoutHost { endpoint: "token", url: endpoint.to_string() }
					.into(),
			);
		}

		let host = endpoint[Position::BeforeHost..Position::AfterPort].to_owned();
		let path = endpoint[Position::BeforePath..Position::AfterQuery].to_owned();

		Ok(Self {
			endpoint,
			host,
			path,
			authorization: credentials.basic_authorization(),
			body: Secret::new(encode_body(grant, params)),
		})
	}

	/// HTTP method of every token request.
	pub fn method(&self) -> Method {
		Method::POST
	}

	/// Converts the request into the transport's [`HttpRequest`].
	pub fn into_http_request(self) -> Result<HttpRequest> {
		Request::builder()
			.method(Method::POST)
			.uri(self.endpoint.as_str())
			.header(AUTHORIZATION, self.authorization.expose())
			.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
			.header(ACCEPT, JSON_CONTENT_TYPE)
			.body(self.body.expose().as_bytes().to_vec())
			.map_err(|e| ConfigError::from(e).into())
	}
}
impl Debug for TokenRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenRequest")
			.field("endpoint", &self.endpoint.as_str())
			.field("host", &self.host)
			.field("path", &self.path)
			.field("authorization", &self.authorization)
			.field("body", &self.body)
			.finish()
	}
}

fn encode_body(grant: GrantType, params: &ParameterMap) -> String {
	let mut form = Serializer::new(String::new());

	form.append_pair(GRANT_TYPE, grant.as_str());

	for (key, value) in params {
		if !matches!(key.as_str(), CLIENT_ID | CLIENT_SECRET | GRANT_TYPE) {
			form.append_pair(key, value);
		}
	}

	form.finish()
}
