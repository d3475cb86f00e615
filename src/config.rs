//! Client options, VGS environments, and vault/payment host resolution.

// self
use crate::{_prelude::*, error::ConfigError};

/// VGS deployment environment embedded in vault and payment hostnames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Environment {
	/// Sandbox environment (the default).
	#[default]
	#[serde(rename = "sandbox")]
	Sandbox,
	/// Live environment.
	#[serde(rename = "live")]
	Live,
	/// Live environment hosted in the EU-1 region.
	#[serde(rename = "live-eu-1")]
	LiveEu1,
}
impl Environment {
	/// Returns the hostname label used by VGS for this environment.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Sandbox => "sandbox",
			Self::Live => "live",
			Self::LiveEu1 => "live-eu-1",
		}
	}
}
impl Display for Environment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Environment {
	type Err = UnknownEnvironment;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"sandbox" => Ok(Self::Sandbox),
			"live" => Ok(Self::Live),
			"live-eu-1" => Ok(Self::LiveEu1),
			_ => Err(UnknownEnvironment(s.to_owned())),
		}
	}
}

/// Error returned when an environment label is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown VGS environment `{0}`.")]
pub struct UnknownEnvironment(pub String);

/// Connection options consumed by [`Client`](crate::client::Client).
///
/// The HTTP transport and the authenticator are injected through the client constructors rather
/// than stored here, so the options stay plain data.
#[derive(Clone, Default)]
pub struct Options {
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret; never logged.
	pub client_secret: String,
	/// Vault identifier.
	pub vault_id: String,
	/// Route identifier combined with the vault id to form the payment host.
	pub route_id: String,
	/// Target environment.
	pub environment: Environment,
	/// Explicit vault host, overriding the derived one.
	pub vault_url: Option<Url>,
	/// Explicit payment host, overriding the derived one.
	pub payment_url: Option<Url>,
	/// Explicit token endpoint, overriding [`AUTH_ENDPOINT`](crate::auth::AUTH_ENDPOINT).
	pub auth_endpoint: Option<Url>,
}
impl Options {
	/// Creates options for the sandbox environment.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		vault_id: impl Into<String>,
		route_id: impl Into<String>,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			vault_id: vault_id.into(),
			route_id: route_id.into(),
			..Default::default()
		}
	}

	/// Overrides the target environment.
	pub fn with_environment(mut self, environment: Environment) -> Self {
		self.environment = environment;

		self
	}

	/// Pins the vault host instead of deriving it from the vault id.
	pub fn with_vault_url(mut self, url: Url) -> Self {
		self.vault_url = Some(url);

		self
	}

	/// Pins the payment host instead of deriving it from the vault and route ids.
	pub fn with_payment_url(mut self, url: Url) -> Self {
		self.payment_url = Some(url);

		self
	}

	/// Points the default authenticator at a different token endpoint.
	pub fn with_auth_endpoint(mut self, url: Url) -> Self {
		self.auth_endpoint = Some(url);

		self
	}

	/// Checks that every mandatory credential and identifier is present.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.client_id.is_empty() {
			return Err(ConfigError::MissingClientId);
		}
		if self.client_secret.is_empty() {
			return Err(ConfigError::MissingClientSecret);
		}
		if self.vault_id.is_empty() {
			return Err(ConfigError::MissingVaultId);
		}
		if self.route_id.is_empty() {
			return Err(ConfigError::MissingRouteId);
		}

		Ok(())
	}

	/// Resolves `https://{vault_id}.{environment}.verygoodproxy.com`.
	pub fn vault_url(&self) -> Result<Url, ConfigError> {
		if let Some(url) = &self.vault_url {
			return Ok(url.clone());
		}
		if self.vault_id.is_empty() {
			return Err(ConfigError::MissingVaultId);
		}

		parse_host(format!("https://{}.{}.verygoodproxy.com", self.vault_id, self.environment))
	}

	/// Resolves `https://{vault_id}-{route_id}.{environment}.verygoodproxy.com`.
	pub fn payment_url(&self) -> Result<Url, ConfigError> {
		if let Some(url) = &self.payment_url {
			return Ok(url.clone());
		}
		if self.vault_id.is_empty() {
			return Err(ConfigError::MissingVaultId);
		}
		if self.route_id.is_empty() {
			return Err(ConfigError::MissingRouteId);
		}

		parse_host(format!(
			"https://{}-{}.{}.verygoodproxy.com",
			self.vault_id, self.route_id, self.environment
		))
	}
}
impl Debug for Options {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Options")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &!self.client_secret.is_empty())
			.field("vault_id", &self.vault_id)
			.field("route_id", &self.route_id)
			.field("environment", &self.environment)
			.field("vault_url", &self.vault_url)
			.field("payment_url", &self.payment_url)
			.field("auth_endpoint", &self.auth_endpoint)
			.finish()
	}
}

fn parse_host(raw: String) -> Result<Url, ConfigError> {
	Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { url: raw, source })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn options() -> Options {
		Options::new("id", "secret", "tnt123", "route-1")
	}

	#[test]
	fn environment_parses_case_insensitively() {
		assert_eq!("LIVE-EU-1".parse::<Environment>(), Ok(Environment::LiveEu1));
		assert_eq!(" Sandbox ".parse::<Environment>(), Ok(Environment::Sandbox));
		assert!("staging".parse::<Environment>().is_err());
		assert_eq!(Environment::default(), Environment::Sandbox);
	}

	#[test]
	fn hosts_are_derived_from_ids_and_environment() {
		let options = options().with_environment(Environment::LiveEu1);

		assert_eq!(
			options.vault_url().expect("Vault URL should resolve.").as_str(),
			"https://tnt123.live-eu-1.verygoodproxy.com/"
		);
		assert_eq!(
			options.payment_url().expect("Payment URL should resolve.").as_str(),
			"https://tnt123-route-1.live-eu-1.verygoodproxy.com/"
		);
	}

	#[test]
	fn explicit_hosts_win() {
		let pinned = Url::parse("http://127.0.0.1:8080/").expect("Pinned URL should parse.");
		let options = Options { vault_id: String::new(), ..options() }.with_payment_url(pinned.clone());

		assert_eq!(options.payment_url().expect("Pinned URL should be returned."), pinned);
		assert!(matches!(options.vault_url(), Err(ConfigError::MissingVaultId)));
	}

	#[test]
	fn validation_names_each_missing_field() {
		assert!(options().validate().is_ok());
		assert!(matches!(
			Options { client_id: String::new(), ..options() }.validate(),
			Err(ConfigError::MissingClientId)
		));
		assert!(matches!(
			Options { client_secret: String::new(), ..options() }.validate(),
			Err(ConfigError::MissingClientSecret)
		));
		assert!(matches!(
			Options { vault_id: String::new(), ..options() }.validate(),
			Err(ConfigError::MissingVaultId)
		));
		assert!(matches!(
			Options { route_id: String::new(), ..options() }.validate(),
			Err(ConfigError::MissingRouteId)
		));
	}

	#[test]
	fn debug_redacts_secret() {
		let rendered = format!("{:?}", options());

		assert!(rendered.contains("client_secret_set: true"));
		assert!(!rendered.contains("\"secret\""));
	}
}
