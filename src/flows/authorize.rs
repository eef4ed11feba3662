//! Authorization redirect URL construction.

// crates.io
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
// self
use crate::{
	_prelude::*,
	error::UrlBuildError,
	flows::OidcClient,
	http::OidcHttpClient,
	oauth::TransportErrorMapper,
	obs::{self, FlowKind},
	provider::{CLIENT_ID, DEFAULT_SCOPE, DiscoveryDocument, GRANT_TYPE, GrantType, REDIRECT_URI},
};

// Query-component set: reserved delimiters are escaped, `:` `/` `?` `@` stay readable.
const QUERY_VALUE: &AsciiSet = &CONTROLS
	.add(b' ')
	.add(b'"')
	.add(b'#')
	.add(b'%')
	.add(b'&')
	.add(b'+')
	.add(b'<')
	.add(b'=')
	.add(b'>')
	.add(b'`')
	.add(b'{')
	.add(b'}')
	.add(b'|')
	.add(b'\\')
	.add(b'^')
	.add(b'[')
	.add(b']');

/// Validated inputs of an authorization redirect.
///
/// Only [`AuthorizationUrlRequest::new`] produces values, so every request carries a grant with a
/// `response_type`:
///
/// ```compile_fail
/// use oauth2_wellknown::{flows::AuthorizationUrlRequest, provider::GrantType};
///
/// let request = AuthorizationUrlRequest {
/// 	grant: GrantType::ClientCredentials,
/// 	response_type: "",
/// 	client_id: "cid",
/// 	redirect_uri: "https://cb",
/// };
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthorizationUrlRequest<'a> {
	grant: GrantType,
	response_type: &'static str,
	client_id: &'a str,
	redirect_uri: &'a str,
}
impl<'a> AuthorizationUrlRequest<'a> {
	/// Checks every input before any network access.
	///
	/// Absent inputs are collected into [`UrlBuildError::missing`]; values are not inspected, so
	/// an empty string counts as present. A grant other than `authorization_code`/`implicit` is
	/// recorded in [`UrlBuildError::unknown_grant`]. Both conditions are reported together when
	/// both hold.
	pub fn new(
		grant: Option<&'a str>,
		client_id: Option<&'a str>,
		redirect_uri: Option<&'a str>,
	) -> Result<Self, UrlBuildError> {
		let mut error = UrlBuildError::default();

		for (name, value) in [(GRANT_TYPE, grant), (CLIENT_ID, client_id), (REDIRECT_URI, redirect_uri)]
		{
			if value.is_none() {
				error.missing.push(name);
			}
		}

		let resolved = grant.and_then(|raw| {
			let resolved = GrantType::from_wire(raw)
				.and_then(|grant| grant.response_type().map(|response_type| (grant, response_type)));

			if resolved.is_none() {
				error.unknown_grant = Some(raw.to_owned());
			}

			resolved
		});

		match (resolved, client_id, redirect_uri) {
			(Some((grant, response_type)), Some(client_id), Some(redirect_uri))
				if error.is_empty() =>
				Ok(Self { grant, response_type, client_id, redirect_uri }),
			_ => Err(error),
		}
	}

	/// Grant selecting the `response_type`.
	pub fn grant(&self) -> GrantType {
		self.grant
	}

	/// `code` or `token`.
	pub fn response_type(&self) -> &'static str {
		self.response_type
	}

	/// Client identifier registered with the provider.
	pub fn client_id(&self) -> &'a str {
		self.client_id
	}

	/// Redirect target registered with the provider.
	pub fn redirect_uri(&self) -> &'a str {
		self.redirect_uri
	}

	/// Renders the redirect URL against the discovered authorization endpoint.
	///
	/// Parameters follow in fixed order: `response_type`, `client_id`, `redirect_uri`, `scope`.
	/// A query already present on the endpoint is kept; any fragment is dropped. The endpoint is
	/// rendered in its parsed form, so host case, default ports, and an empty path are normalized
	/// (`https://IDP.example.com:443` becomes `https://idp.example.com/`).
	pub fn build(&self, document: &DiscoveryDocument, scope: &str) -> String {
		let mut endpoint = document.authorization_endpoint.clone();

		endpoint.set_fragment(None);

		if endpoint.query().is_some_and(str::is_empty) {
			endpoint.set_query(None);
		}

		let mut url = String::from(endpoint.as_str());

		url.push(if endpoint.query().is_some() { '&' } else { '?' });

		let pairs = [
			("response_type", self.response_type),
			(CLIENT_ID, self.client_id),
			(REDIRECT_URI, self.redirect_uri),
			("scope", scope),
		];

		for (i, (key, value)) in pairs.into_iter().enumerate() {
			if i > 0 {
				url.push('&');
			}

			url.push_str(key);
			url.push('=');
			url.extend(utf8_percent_encode(value, QUERY_VALUE));
		}

		url
	}
}

/// Builds an authorization URL with the default `openid` scope.
pub fn build_authorization_url(
	grant: Option<&str>,
	client_id: Option<&str>,
	redirect_uri: Option<&str>,
	document: &DiscoveryDocument,
) -> Result<String, UrlBuildError> {
	AuthorizationUrlRequest::new(grant, client_id, redirect_uri)
		.map(|request| request.build(document, DEFAULT_SCOPE))
}

impl<C, M> OidcClient<C, M>
where
	C: ?Sized + OidcHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Generates the redirect URL a user agent visits to authorize this client.
	///
	/// Inputs are validated before discovery runs, so invalid input never touches the network.
	/// The authorization endpoint itself is never called.
	pub async fn generate_authorization_url(
		&self,
		grant: Option<&str>,
		client_id: Option<&str>,
		redirect_uri: Option<&str>,
	) -> Result<String> {
		obs::observe(FlowKind::AuthorizationUrl, "generate_authorization_url", async move {
			let request = AuthorizationUrlRequest::new(grant, client_id, redirect_uri)?;
			let document = self.fetch_discovery().await?;

			Ok(request.build(&document, &self.descriptor.scope))
		})
		.await
	}
}
