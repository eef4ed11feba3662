#![cfg(all(feature = "test", feature = "reqwest"))]

mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use common::*;
use oauth2_wellknown::{
	_preludet::*,
	error::{ConfigError, DiscoveryError, Error, TokenError},
};

const TOKEN_BODY: &str =
	"{\"access_token\":\"at-123\",\"token_type\":\"bearer\",\"expires_in\":3600,\"scope\":\"read\"}";

#[tokio::test]
async fn client_credentials_posts_basic_auth_and_form_body() {
	let server = MockServer::start_async().await;
	let discovery = mock_discovery(&server, discovery_json(&server)).await;
	let token = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/token")
				.header("authorization", "Basic Y2lkOnNoaA==")
				.header("content-type", "application/x-www-form-urlencoded")
				.body("grant_type=client_credentials&scope=read");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await;
	let client = build_reqwest_test_client(&well_known(&server));
	let params = params([("client_id", "cid"), ("client_secret", "shh"), ("scope", "read")]);
	let response = client
		.get_access_token("client_credentials", &params)
		.await
		.expect("Client credentials grant should succeed.");

	assert_eq!(
		response.as_value(),
		&json!({ "access_token": "at-123", "token_type": "bearer", "expires_in": 3600, "scope": "read" })
	);
	assert_eq!(response.expires_in(), Some(time::Duration::seconds(3600)));
	assert_eq!(params.len(), 3);

	discovery.assert_calls_async(1).await;
	token.assert_calls_async(1).await;
}

#[tokio::test]
async fn every_token_grant_forwards_its_parameters() {
	let cases = [
		(
			"authorization_code",
			params([
				("client_id", "cid"),
				("client_secret", "shh"),
				("code", "abc"),
				("redirect_uri", "https://app.example.com/cb"),
			]),
			"grant_type=authorization_code&code=abc&redirect_uri=https%3A%2F%2Fapp.example.com%2Fcb",
		),
		(
			"refresh_token",
			params([("client_id", "cid"), ("client_secret", "shh"), ("refresh_token", "rt-1")]),
			"grant_type=refresh_token&refresh_token=rt-1",
		),
		(
			"password",
			params([
				("client_id", "cid"),
				("client_secret", "shh"),
				("username", "alice"),
				("password", "pw"),
			]),
			"grant_type=password&password=pw&username=alice",
		),
	];

	for (grant, params, body) in cases {
		let server = MockServer::start_async().await;
		let _discovery = mock_discovery(&server, discovery_json(&server)).await;
		let token = server
			.mock_async(|when, then| {
				when.method(POST).path("/token").body(body);
				then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
			})
			.await;
		let response = build_reqwest_test_client(&well_known(&server))
			.get_access_token(grant, &params)
			.await
			.unwrap_or_else(|err| panic!("Grant `{grant}` should succeed: {err}."));

		assert_eq!(response.access_token(), Some("at-123"));

		token.assert_calls_async(1).await;
	}
}

#[tokio::test]
async fn non_ok_json_reports_status_and_payload() {
	let server = MockServer::start_async().await;
	let _discovery = mock_discovery(&server, discovery_json(&server)).await;
	let _token = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(403)
				.header("content-type", "application/json")
				.body("{\"error\":\"unauthorized_client\"}");
		})
		.await;
	let err = build_reqwest_test_client(&well_known(&server))
		.get_access_token("client_credentials", &params([("client_id", "cid"), ("client_secret", "shh")]))
		.await
		.expect_err("403 should fail the call.");

	assert_eq!(
		err.to_string(),
		"Could not acquire access token. Returned code: 403: Forbidden."
	);
	assert!(matches!(
		err,
		Error::Token(TokenError::HttpStatus { status: 403, ref body, .. })
			if body["error"] == "unauthorized_client"
	));
}

#[tokio::test]
async fn non_json_body_is_a_parse_failure() {
	let server = MockServer::start_async().await;
	let _discovery = mock_discovery(&server, discovery_json(&server)).await;
	let _token = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).header("content-type", "text/html").body("<html>oops</html>");
		})
		.await;
	let err = build_reqwest_test_client(&well_known(&server))
		.get_access_token("client_credentials", &params([("client_id", "cid"), ("client_secret", "shh")]))
		.await
		.expect_err("HTML bodies should fail.");

	assert!(matches!(
		err,
		Error::Token(TokenError::ParseFailure { context: "getting access token", ref raw_body, .. })
			if raw_body == "<html>oops</html>"
	));
}

#[tokio::test]
async fn validation_failures_skip_the_network() {
	let server = MockServer::start_async().await;
	let discovery = mock_discovery(&server, discovery_json(&server)).await;
	let client = build_reqwest_test_client(&well_known(&server));
	let err = client
		.get_access_token("device_code", &params([("client_id", "cid"), ("client_secret", "shh")]))
		.await
		.expect_err("Unknown grants should fail.");

	assert!(matches!(err, Error::UnknownGrant { .. }));

	let err = client
		.get_access_token("authorization_code", &params([("client_id", "cid")]))
		.await
		.expect_err("Missing arguments should fail.");

	assert_eq!(err.to_string(), "Missing arguments: client_secret, code, redirect_uri.");

	discovery.assert_calls_async(0).await;
}

#[tokio::test]
async fn discovery_failure_prevents_token_request() {
	let server = MockServer::start_async().await;
	let discovery = server
		.mock_async(|when, then| {
			when.method(GET).path("/.well-known/openid-configuration");
			then.status(503).body("maintenance");
		})
		.await;
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).body(TOKEN_BODY);
		})
		.await;
	let err = build_reqwest_test_client(&well_known(&server))
		.get_access_token("client_credentials", &params([("client_id", "cid"), ("client_secret", "shh")]))
		.await
		.expect_err("Discovery outage should fail the call.");

	assert!(matches!(err, Error::Discovery(DiscoveryError::Status { status: 503, .. })));

	discovery.assert_calls_async(1).await;
	token.assert_calls_async(0).await;
}

#[tokio::test]
async fn plain_http_token_endpoint_is_refused() {
	let server = MockServer::start_async().await;
	let _discovery = mock_discovery(
		&server,
		json!({
			"authorization_endpoint": server.url("/authorize"),
			"token_endpoint": "http://idp.example.com/token"
		}),
	)
	.await;
	let err = build_reqwest_test_client(&well_known(&server))
		.get_access_token("client_credentials", &params([("client_id", "cid"), ("client_secret", "shh")]))
		.await
		.expect_err("Plain HTTP token endpoints should be refused.");

	assert!(matches!(err, Error::Config(ConfigError::InsecureEndpoint { endpoint: "token", .. })));
}
