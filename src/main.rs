//! Command-line entry point: `oauth2-wellknown <function> [grant] [--key value ...]`.

// std
use std::io;
// crates.io
use clap::{Parser, ValueEnum};
use color_eyre::{Result, eyre::WrapErr};
use tracing_subscriber::EnvFilter;
// self
use oauth2_wellknown::{
	auth::ParameterMap,
	flows::ReqwestOidcClient,
	provider::{DEFAULT_SCOPE, DEFAULT_WELL_KNOWN, GrantType, ProviderDescriptor},
	url::Url,
};

#[derive(Debug, Parser)]
#[command(
	name = "oauth2-wellknown",
	version,
	about = "Acquire OAuth 2.0 access tokens and authorization URLs from a provider's discovery document."
)]
struct Cli {
	/// Discovery document location.
	#[arg(long, env = "OAUTH2_WELL_KNOWN", default_value = DEFAULT_WELL_KNOWN)]
	well_known: Url,
	/// Scope placed on generated authorization URLs.
	#[arg(long, env = "OAUTH2_SCOPE", default_value = DEFAULT_SCOPE)]
	scope: String,
	/// Operation to run.
	#[arg(value_enum)]
	function: Function,
	/// Grant type (an RFC 6749 name or a constant alias such as `CLIENT_CREDENTIALS`) followed by
	/// `--key value` pairs for getAccessToken, or `<client_id> <redirect_uri>` for
	/// generateAuthorizationURL.
	///
	/// Everything after the grant is taken verbatim, so `--scope` there is a token parameter.
	#[arg(trailing_var_arg = true, allow_hyphen_values = true)]
	operands: Vec<String>,
}
impl Cli {
	/// Splits the operands into the grant and its arguments.
	fn grant_and_args(&self) -> (Option<&str>, &[String]) {
		match self.operands.split_first() {
			Some((grant, args)) if !grant.starts_with("--") => (Some(grant.as_str()), args),
			_ => (None, &self.operands),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Function {
	#[value(name = "getAccessToken", alias = "get-access-token")]
	GetAccessToken,
	#[value(name = "generateAuthorizationURL", alias = "generate-authorization-url")]
	GenerateAuthorizationUrl,
	#[value(name = "getWellKnown", alias = "get-well-known")]
	GetWellKnown,
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(io::stderr)
		.init();

	let cli = Cli::parse();
	let descriptor = ProviderDescriptor::builder()
		.well_known(cli.well_known.clone())
		.scope(cli.scope.as_str())
		.build()
		.wrap_err("Invalid provider configuration.")?;
	let client = ReqwestOidcClient::new(descriptor);
	let (grant, args) = cli.grant_and_args();
	let grant = grant.map(resolve_grant);

	match cli.function {
		Function::GetAccessToken => {
			let params = parse_params(args);
			let token = client.get_access_token(grant.unwrap_or_default(), &params).await?;

			println!("{}", serde_json::to_string_pretty(&token)?);
		},
		Function::GenerateAuthorizationUrl => {
			let url = client
				.generate_authorization_url(
					grant,
					args.first().map(String::as_str),
					args.get(1).map(String::as_str),
				)
				.await?;

			println!("{url}");
		},
		Function::GetWellKnown => {
			let document = client.discover().await?;

			println!("{}", serde_json::to_string_pretty(&document)?);
		},
	}

	Ok(())
}

/// Maps constant-style aliases onto wire names; anything else passes through untouched.
fn resolve_grant(raw: &str) -> &str {
	GrantType::from_alias(raw).map_or(raw, |grant| grant.as_str())
}

/// Collects `--key value` pairs; a flag followed by another flag (or nothing) is `"true"`.
fn parse_params(args: &[String]) -> ParameterMap {
	let mut params = ParameterMap::new();

	for (i, arg) in args.iter().enumerate() {
		let Some(key) = arg.strip_prefix("--") else { continue };
		let value = args
			.get(i + 1)
			.filter(|next| !next.starts_with("--"))
			.map_or("true", String::as_str);

		params.insert(key.to_owned(), value.to_owned());
	}

	params
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn strings(values: &[&str]) -> Vec<String> {
		values.iter().map(|value| (*value).to_owned()).collect()
	}

	#[test]
	fn params_pair_flags_with_values() {
		let params = parse_params(&strings(&[
			"--client_id",
			"cid",
			"stray",
			"--verbose",
			"--client_secret",
			"shh",
			"--last",
		]));

		assert_eq!(params.get("client_id").map(String::as_str), Some("cid"));
		assert_eq!(params.get("client_secret").map(String::as_str), Some("shh"));
		assert_eq!(params.get("verbose").map(String::as_str), Some("true"));
		assert_eq!(params.get("last").map(String::as_str), Some("true"));
		assert_eq!(params.len(), 4);
	}

	#[test]
	fn grant_aliases_resolve_to_wire_names() {
		assert_eq!(resolve_grant("RESOURCE_OWNER"), "password");
		assert_eq!(resolve_grant("CLIENT_CREDENTIALS"), "client_credentials");
		assert_eq!(resolve_grant("implicit"), "implicit");
		assert_eq!(resolve_grant("device_code"), "device_code");
	}

	#[test]
	fn cli_accepts_flag_style_arguments() {
		let cli = Cli::try_parse_from([
			"oauth2-wellknown",
			"--well-known",
			"https://idp.example.com/.well-known/openid-configuration",
			"getAccessToken",
			"CLIENT_CREDENTIALS",
			"--client_id",
			"cid",
			"--client_secret",
			"shh",
		])
		.expect("Flag-style arguments should parse.");

		let (grant, args) = cli.grant_and_args();

		assert_eq!(cli.function, Function::GetAccessToken);
		assert_eq!(grant, Some("CLIENT_CREDENTIALS"));
		assert_eq!(cli.well_known.host_str(), Some("idp.example.com"));
		assert_eq!(parse_params(args).len(), 2);
	}

	#[test]
	fn scope_after_the_grant_is_a_token_parameter() {
		let cli = Cli::try_parse_from([
			"oauth2-wellknown",
			"--scope",
			"openid email",
			"getAccessToken",
			"client_credentials",
			"--scope",
			"read",
			"--client_id",
			"a",
			"--client_secret",
			"b",
		])
		.expect("Token parameters named like CLI options should parse.");
		let (grant, args) = cli.grant_and_args();
		let params = parse_params(args);

		assert_eq!(cli.scope, "openid email");
		assert_eq!(grant, Some("client_credentials"));
		assert_eq!(params.get("scope").map(String::as_str), Some("read"));
		assert_eq!(params.get("client_id").map(String::as_str), Some("a"));
		assert_eq!(params.get("client_secret").map(String::as_str), Some("b"));
	}

	#[test]
	fn missing_grant_leaves_every_operand_as_an_argument() {
		let cli = Cli::try_parse_from(["oauth2-wellknown", "getAccessToken", "--client_id", "a"])
			.expect("Arguments without a grant should parse.");
		let (grant, args) = cli.grant_and_args();

		assert_eq!(grant, None);
		assert_eq!(args, strings(&["--client_id", "a"]).as_slice());
	}

	#[test]
	fn cli_accepts_positional_url_inputs() {
		let cli = Cli::try_parse_from([
			"oauth2-wellknown",
			"generate-authorization-url",
			"AUTHORIZATION_CODE",
			"cid",
			"https://cb",
		])
		.expect("Positional arguments should parse.");

		let (grant, args) = cli.grant_and_args();

		assert_eq!(cli.function, Function::GenerateAuthorizationUrl);
		assert_eq!(grant.map(resolve_grant), Some("authorization_code"));
		assert_eq!(args, strings(&["cid", "https://cb"]).as_slice());
		assert_eq!(cli.scope, DEFAULT_SCOPE);
	}
}
