#![allow(dead_code)]

// crates.io
use httpmock::{Mock, prelude::*};
use serde_json::{Value, json};
// self
use oauth2_wellknown::provider::WELL_KNOWN_PATH;

/// Discovery document location on the mock server.
pub fn well_known(server: &MockServer) -> String {
	server.url(WELL_KNOWN_PATH)
}

/// Discovery document pointing at the mock server's `/authorize` and `/token`.
pub fn discovery_json(server: &MockServer) -> Value {
	json!({
		"issuer": server.base_url(),
		"authorization_endpoint": server.url("/authorize"),
		"token_endpoint": server.url("/token"),
		"jwks_uri": server.url("/jwks"),
		"grant_types_supported": ["authorization_code", "client_credentials", "refresh_token", "password"]
	})
}

/// Serves `document` at the well-known path.
pub async fn mock_discovery<'a>(server: &'a MockServer, document: Value) -> Mock<'a> {
	server
		.mock_async(|when, then| {
			when.method(GET).path(WELL_KNOWN_PATH);
			then.status(200).header("content-type", "application/json").json_body(document);
		})
		.await
}
