//! Local provider configuration: where discovery lives and what authorization URLs request.

// self
use crate::{_prelude::*, provider::discovery};

/// Discovery document location used when none is configured.
pub const DEFAULT_WELL_KNOWN: &str = "https://api.byu.edu/.well-known/openid-configuration";
/// Scope appended to authorization URLs when none is configured.
pub const DEFAULT_SCOPE: &str = "openid";

/// Errors raised while constructing or validating descriptors.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ProviderDescriptorError {
	/// Well-known or issuer URL could not be parsed.
	#[error("The well-known URL is invalid.")]
	InvalidWellKnown {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Discovery must be fetched over HTTPS.
	#[error("The well-known endpoint must use HTTPS: {url}.")]
	InsecureWellKnown {
		/// URL that failed validation.
		url: String,
	},
	/// Authorization URLs need a non-blank scope.
	#[error("Authorization scope cannot be empty.")]
	EmptyScope,
}

/// Immutable provider descriptor consumed by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Absolute URL of the provider's discovery document.
	pub well_known: Url,
	/// Scope placed on generated authorization URLs.
	pub scope: String,
}
impl ProviderDescriptor {
	/// Creates a new builder seeded with defaults.
	pub fn builder() -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::default()
	}

	fn validate(&self) -> Result<(), ProviderDescriptorError> {
		if self.well_known.scheme() != "https" {
			return Err(ProviderDescriptorError::InsecureWellKnown {
				url: self.well_known.to_string(),
			});
		}
		if self.scope.trim().is_empty() {
			return Err(ProviderDescriptorError::EmptyScope);
		}

		Ok(())
	}
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug, Default)]
pub struct ProviderDescriptorBuilder {
	/// Explicit discovery document location.
	pub well_known: Option<Url>,
	/// Issuer used to derive the discovery location when `well_known` is unset.
	pub issuer: Option<Url>,
	/// Scope override.
	pub scope: Option<String>,
}
impl ProviderDescriptorBuilder {
	/// Sets the discovery document location.
	pub fn well_known(mut self, url: Url) -> Self {
		self.well_known = Some(url);

		self
	}

	/// Sets the issuer; the discovery location becomes `<issuer>/.well-known/openid-configuration`.
	pub fn issuer(mut self, url: Url) -> Self {
		self.issuer = Some(url);

		self
	}

	/// Overrides the authorization URL scope.
	pub fn scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let well_known = match (self.well_known, self.issuer) {
			(Some(url), _) => url,
			(None, Some(issuer)) => discovery::well_known_url(&issuer)
				.map_err(|source| ProviderDescriptorError::InvalidWellKnown { source })?,
			(None, None) => Url::parse(DEFAULT_WELL_KNOWN)
				.map_err(|source| ProviderDescriptorError::InvalidWellKnown { source })?,
		};
		let descriptor = ProviderDescriptor {
			well_known,
			scope: self.scope.unwrap_or_else(|| DEFAULT_SCOPE.to_owned()),
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("URL fixture should parse.")
	}

	#[test]
	fn defaults_use_the_builtin_provider() {
		let descriptor = ProviderDescriptor::builder().build().expect("Defaults should be valid.");

		assert_eq!(descriptor.well_known.as_str(), DEFAULT_WELL_KNOWN);
		assert_eq!(descriptor.scope, "openid");
	}

	#[test]
	fn issuer_derives_well_known_and_explicit_url_wins() {
		let derived = ProviderDescriptor::builder()
			.issuer(url("https://idp.example.com"))
			.build()
			.expect("Issuer-derived descriptor should build.");

		assert_eq!(
			derived.well_known.as_str(),
			"https://idp.example.com/.well-known/openid-configuration"
		);

		let explicit = ProviderDescriptor::builder()
			.issuer(url("https://idp.example.com"))
			.well_known(url("https://other.example.com/discovery.json"))
			.build()
			.expect("Explicit descriptor should build.");

		assert_eq!(explicit.well_known.as_str(), "https://other.example.com/discovery.json");
	}

	#[test]
	fn rejects_insecure_well_known_and_blank_scope() {
		let err = ProviderDescriptor::builder()
			.well_known(url("http://idp.example.com/.well-known/openid-configuration"))
			.build()
			.expect_err("Plain HTTP discovery should be rejected.");

		assert!(matches!(err, ProviderDescriptorError::InsecureWellKnown { .. }));

		let err = ProviderDescriptor::builder()
			.scope("  ")
			.build()
			.expect_err("Blank scopes should be rejected.");

		assert_eq!(err, ProviderDescriptorError::EmptyScope);
	}
}
