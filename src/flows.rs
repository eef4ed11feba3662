//! High-level operations composed from validation, discovery, request building, and
//! response interpretation.

pub mod authorize;

mod access_token;
mod discovery;

pub use authorize::*;

// crates.io
use oauth2::{AsyncHttpClient, HttpRequest, HttpResponse};
// self
use crate::{
	_prelude::*,
	http::{Endpoint, OidcHttpClient},
	oauth::TransportErrorMapper,
	provider::ProviderDescriptor,
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestOidcClient = OidcClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Acquires tokens and builds authorization URLs against a single discovery document.
///
/// The client holds no per-call state: every operation fetches the discovery document afresh,
/// owns its request and response, and resolves exactly once. Concurrent calls are independent
/// and each performs its own discovery round trip.
#[derive(Clone)]
pub struct OidcClient<C, M>
where
	C: ?Sized + OidcHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Descriptor naming the discovery document and authorization scope.
	pub descriptor: ProviderDescriptor,
}
impl<C, M> OidcClient<C, M>
where
	C: ?Sized + OidcHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		descriptor: ProviderDescriptor,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self { http_client: http_client.into(), transport_mapper: mapper.into(), descriptor }
	}

	/// Sends one request through the transport, mapping transport failures for `endpoint`.
	pub(crate) async fn send(&self, endpoint: Endpoint, request: HttpRequest) -> Result<HttpResponse> {
		let handle = self.http_client.handle();

		handle
			.call(request)
			.await
			.map_err(|err| self.transport_mapper.map_transport_error(endpoint, err))
	}
}
#[cfg(feature = "reqwest")]
impl OidcClient<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a new client for the provided descriptor.
	///
	/// The client provisions its own reqwest-backed transport so callers do not need to pass
	/// HTTP handles explicitly.
	pub fn new(descriptor: ProviderDescriptor) -> Self {
		Self::with_http_client(
			descriptor,
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}
impl<C, M> Debug for OidcClient<C, M>
where
	C: ?Sized + OidcHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OidcClient").field("descriptor", &self.descriptor).finish()
	}
}
