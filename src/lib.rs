//! Discovery-driven OAuth 2.0/OpenID Connect client: validate grant arguments, acquire access
//! tokens, and build authorization redirects straight from a provider's well-known document.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod provider;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::ParameterMap,
		flows::OidcClient,
		http::ReqwestHttpClient,
		oauth::ReqwestTransportErrorMapper,
		provider::{DEFAULT_SCOPE, ProviderDescriptor},
	};

	/// Client type alias used by reqwest-backed tests.
	pub type ReqwestTestClient = OidcClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs an [`OidcClient`] that fetches its discovery document from `well_known`.
	pub fn build_reqwest_test_client(well_known: &str) -> ReqwestTestClient {
		build_reqwest_test_client_with_scope(well_known, DEFAULT_SCOPE)
	}

	/// Same as [`build_reqwest_test_client`] with a custom authorization URL scope.
	pub fn build_reqwest_test_client_with_scope(well_known: &str, scope: &str) -> ReqwestTestClient {
		let descriptor = ProviderDescriptor::builder()
			.well_known(Url::parse(well_known).expect("Failed to parse test well-known URL."))
			.scope(scope)
			.build()
			.expect("Failed to build test provider descriptor.");

		OidcClient::with_http_client(
			descriptor,
			test_reqwest_http_client(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}

	/// Collects string pairs into a [`ParameterMap`].
	pub fn params<const N: usize>(pairs: [(&str, &str); N]) -> ParameterMap {
		pairs.into_iter().map(|(key, value)| (key.to_owned(), value.to_owned())).collect()
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::Duration;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(feature = "cli")] use {clap as _, color_eyre as _, tokio as _, tracing_subscriber as _};
#[cfg(test)] use {color_eyre as _, httpmock as _, parking_lot as _, tokio as _};
