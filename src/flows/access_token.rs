//! Access token acquisition for every grant with a token-request form.
//!
//! [`OidcClient::get_access_token`] validates the grant and its arguments first, so an unknown
//! grant or a missing parameter fails without any network access. Only then is the discovery
//! document fetched, the token request built from it, and the single token round trip made.

// self
use crate::{
	_prelude::*,
	auth::{ParameterMap, TokenResponse},
	flows::OidcClient,
	http::{Endpoint, OidcHttpClient},
	oauth::{self, ACCESS_TOKEN_CONTEXT, TokenRequest, TransportErrorMapper},
	obs::{self, FlowKind},
	provider,
};

impl<C, M> OidcClient<C, M>
where
	C: ?Sized + OidcHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Acquires an access token for `grant` using the caller's parameters.
	///
	/// `params` is only read: `client_id`/`client_secret` travel in the Basic header and every
	/// other key is forwarded in the form body. The token endpoint's JSON payload is returned
	/// unmodified.
	pub async fn get_access_token(
		&self,
		grant: impl AsRef<str>,
		params: &ParameterMap,
	) -> Result<TokenResponse> {
		let grant = grant.as_ref();

		obs::observe(FlowKind::AccessToken, "get_access_token", async move {
			let grant = provider::validate_grant(grant, params)?;
			let document = self.fetch_discovery().await?;
			let request = TokenRequest::build(grant, params, &document)?;
			let response = self.send(Endpoint::Token, request.into_http_request()?).await?;

			Ok(oauth::interpret_response(&response, ACCESS_TOKEN_CONTEXT)?)
		})
		.await
	}
}
