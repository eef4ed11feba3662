//! Client-level error types shared across discovery, token acquisition, and authorization URLs.

// self
use crate::{_prelude::*, http::Endpoint};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Discovery document could not be fetched or parsed.
	#[error(transparent)]
	Discovery(#[from] DiscoveryError),
	/// Token endpoint answered with an error status or an unparsable body.
	#[error(transparent)]
	Token(#[from] TokenError),
	/// Authorization URL inputs were incomplete or named an unsupported grant.
	#[error(transparent)]
	UrlBuild(#[from] UrlBuildError),
	/// Transport failure (DNS, TCP, TLS) before any response was received.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Grant type has no token-request form.
	#[error(
		"Invalid grant type `{grant}` to get access token. Valid types are authorization_code, client_credentials, password (resource owner), and refresh_token."
	)]
	UnknownGrant {
		/// Grant label supplied by the caller.
		grant: String,
	},
	/// Required grant parameters are absent.
	#[error("Missing arguments: {}.", .missing.join(", "))]
	MissingArgs {
		/// Every missing parameter, in the grant's declared order.
		missing: Vec<&'static str>,
	},
}

/// Configuration and request-construction failures raised locally.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Discovered endpoint does not use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Discovered endpoint has no authority component.
	#[error("The {endpoint} endpoint has no host: {url}.")]
	EndpointWithoutHost {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures while resolving the provider's discovery document.
#[derive(Debug, ThisError)]
pub enum DiscoveryError {
	/// Discovery endpoint answered with a status other than `200`.
	#[error("Discovery endpoint returned {status}: {message}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Canonical reason phrase for the status.
		message: String,
	},
	/// Discovery body is not JSON or lacks a required endpoint.
	#[error("Discovery document could not be parsed at `{}`.", .source.path())]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// Body exactly as received.
		raw_body: String,
	},
}

/// Failures reported by the token endpoint.
#[derive(Debug, ThisError)]
pub enum TokenError {
	/// Response body is not valid JSON, whatever the status.
	#[error("Token endpoint returned a body that is not valid JSON while {context}.")]
	ParseFailure {
		/// Operation that was in progress.
		context: &'static str,
		/// Body exactly as received.
		raw_body: String,
		/// JSON parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// Response body parsed but the status is not `200`.
	#[error("Could not acquire access token. Returned code: {status}: {message}.")]
	HttpStatus {
		/// HTTP status code.
		status: u16,
		/// Canonical reason phrase for the status.
		message: String,
		/// Parsed error payload (usually an OAuth `error` object).
		body: Value,
	},
}
impl TokenError {
	/// Returns the HTTP status for [`TokenError::HttpStatus`].
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::HttpStatus { status, .. } => Some(*status),
			Self::ParseFailure { .. } => None,
		}
	}
}

/// Authorization URL inputs that failed validation.
///
/// Both conditions are collected before reporting, so a single value can name the missing inputs
/// and the unsupported grant at once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UrlBuildError {
	/// Absent inputs among `grant_type`, `client_id`, and `redirect_uri`.
	pub missing: Vec<&'static str>,
	/// Grant label that maps to no `response_type`.
	pub unknown_grant: Option<String>,
}
impl UrlBuildError {
	/// Returns true when the grant maps to no `response_type`.
	pub fn is_unknown_grant(&self) -> bool {
		self.unknown_grant.is_some()
	}

	/// Returns true when no condition was recorded.
	pub fn is_empty(&self) -> bool {
		self.missing.is_empty() && self.unknown_grant.is_none()
	}
}
impl Display for UrlBuildError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		if !self.missing.is_empty() {
			write!(f, "Missing arguments: {}.", self.missing.join(", "))?;
		}
		if let Some(grant) = &self.unknown_grant {
			if !self.missing.is_empty() {
				f.write_str(" ")?;
			}

			write!(
				f,
				"Invalid grant type `{grant}` to get redirect URL. Valid types are authorization_code and implicit."
			)?;
		}

		Ok(())
	}
}
impl StdError for UrlBuildError {}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the {endpoint} endpoint.")]
	Network {
		/// Endpoint being called.
		endpoint: Endpoint,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the {endpoint} endpoint.")]
	Io {
		/// Endpoint being called.
		endpoint: Endpoint,
		/// IO failure.
		#[source]
		source: std::io::Error,
	},
	/// HTTP client reported a failure it could not classify.
	#[error("HTTP client error occurred while calling the {endpoint} endpoint: {message}.")]
	Other {
		/// Endpoint being called.
		endpoint: Endpoint,
		/// Client-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(endpoint: Endpoint, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { endpoint, source: Box::new(src) }
	}

	/// Returns the endpoint that was being called.
	pub fn endpoint(&self) -> Endpoint {
		match self {
			Self::Network { endpoint, .. }
			| Self::Io { endpoint, .. }
			| Self::Other { endpoint, .. } => *endpoint,
		}
	}
}
