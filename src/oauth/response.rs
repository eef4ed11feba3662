//! Token endpoint response interpretation.

// crates.io
use oauth2::{HttpResponse, http::StatusCode};
// self
use crate::{_prelude::*, auth::TokenResponse, error::TokenError, http};

/// Context label for access token round trips.
pub const ACCESS_TOKEN_CONTEXT: &str = "getting access token";

/// Maps a buffered response into a token payload or a [`TokenError`].
///
/// The body is parsed first: a body that is not JSON fails with [`TokenError::ParseFailure`]
/// whatever the status. A JSON body with a status other than `200` fails with
/// [`TokenError::HttpStatus`]. Only `200` plus JSON resolves, with the payload unmodified.
pub fn interpret(
	status: u16,
	status_message: &str,
	body: &[u8],
	context: &'static str,
) -> Result<TokenResponse, TokenError> {
	let value = serde_json::from_slice::<Value>(body).map_err(|source| TokenError::ParseFailure {
		context,
		raw_body: String::from_utf8_lossy(body).into_owned(),
		source,
	})?;

	if status != StatusCode::OK.as_u16() {
		return Err(TokenError::HttpStatus {
			status,
			message: status_message.to_owned(),
			body: value,
		});
	}

	Ok(TokenResponse::new(value))
}

/// Interprets an [`HttpResponse`] returned by the transport.
pub fn interpret_response(
	response: &HttpResponse,
	context: &'static str,
) -> Result<TokenResponse, TokenError> {
	let status = response.status();

	interpret(status.as_u16(), &http::status_message(status), response.body(), context)
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn ok_json_resolves_unmodified() {
		let body = br#"{"access_token":"at","token_type":"bearer","expires_in":3600,"extra":[1]}"#;
		let response =
			interpret(200, "OK", body, ACCESS_TOKEN_CONTEXT).expect("200 + JSON should resolve.");

		assert_eq!(
			response.into_value(),
			json!({ "access_token": "at", "token_type": "bearer", "expires_in": 3600, "extra": [1] })
		);
	}

	#[test]
	fn parse_failure_wins_over_status() {
		for status in [200, 403, 500] {
			let err = interpret(status, "Whatever", b"<html>nope</html>", ACCESS_TOKEN_CONTEXT)
				.expect_err("Non-JSON bodies should fail.");

			assert!(matches!(
				err,
				TokenError::ParseFailure { context: ACCESS_TOKEN_CONTEXT, ref raw_body, .. }
					if raw_body == "<html>nope</html>"
			));
		}
	}

	#[test]
	fn non_ok_json_reports_status() {
		let err = interpret(403, "Forbidden", br#"{"error":"access_denied"}"#, ACCESS_TOKEN_CONTEXT)
			.expect_err("403 should fail.");

		assert_eq!(err.status(), Some(403));
		assert!(matches!(
			err,
			TokenError::HttpStatus { ref message, ref body, .. }
				if message == "Forbidden" && body["error"] == "access_denied"
		));
	}

	#[test]
	fn response_helper_uses_canonical_reason() {
		let mut response = HttpResponse::new(b"{}".to_vec());

		*response.status_mut() = StatusCode::UNAUTHORIZED;

		let err = interpret_response(&response, ACCESS_TOKEN_CONTEXT)
			.expect_err("401 should fail.");

		assert_eq!(err.to_string(), "Could not acquire access token. Returned code: 401: Unauthorized.");
	}
}
