//! Discovery document retrieval.
//!
//! No caching: each call issues one `GET` to the configured well-known URL, so endpoint changes
//! at the provider are picked up on the next operation.

// crates.io
use oauth2::http::{Method, Request, header::ACCEPT};
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	flows::OidcClient,
	http::{Endpoint, OidcHttpClient},
	oauth::{JSON_CONTENT_TYPE, TransportErrorMapper},
	obs::{self, FlowKind},
	provider::{self, DiscoveryDocument},
};

impl<C, M> OidcClient<C, M>
where
	C: ?Sized + OidcHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches and parses the provider's discovery document.
	pub async fn discover(&self) -> Result<DiscoveryDocument> {
		obs::observe(FlowKind::Discovery, "discover", self.fetch_discovery()).await
	}

	pub(crate) async fn fetch_discovery(&self) -> Result<DiscoveryDocument> {
		let request = Request::builder()
			.method(Method::GET)
			.uri(self.descriptor.well_known.as_str())
			.header(ACCEPT, JSON_CONTENT_TYPE)
			.body(Vec::new())
			.map_err(ConfigError::from)?;
		let response = self.send(Endpoint::Discovery, request).await?;

		Ok(provider::interpret_discovery(response.status(), response.body())?)
	}
}
