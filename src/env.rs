//! Provider environments and the base URLs they resolve to.

// self
use crate::{_prelude::*, error::ConfigError};

const SANDBOX_BASE_URL: &str = "https://sandbox.safaricom.co.ke";
const PRODUCTION_BASE_URL: &str = "https://api.safaricom.co.ke";

/// Deployment environment selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
	#[default]
	/// Test environment with simulated subscribers.
	Sandbox,
	/// Live environment moving real funds.
	Production,
}
impl Environment {
	/// Returns the lowercase selector label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Sandbox => "sandbox",
			Self::Production => "production",
		}
	}

	/// Resolves the selector to the provider's base URL.
	pub fn base_url(self) -> Result<Url, ConfigError> {
		let raw = match self {
			Self::Sandbox => SANDBOX_BASE_URL,
			Self::Production => PRODUCTION_BASE_URL,
		};

		Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl { url: raw.into(), source })
	}

	/// Parses an optional selector, defaulting to [`Environment::Sandbox`] when absent.
	pub fn resolve(value: Option<&str>) -> Result<Self, ConfigError> {
		value.map_or(Ok(Self::default()), str::parse)
	}
}
impl Display for Environment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Environment {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"sandbox" => Ok(Self::Sandbox),
			"production" => Ok(Self::Production),
			other => Err(ConfigError::UnknownEnvironment { value: other.to_owned() }),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn omitted_selector_defaults_to_sandbox() {
		let env = Environment::resolve(None).expect("Missing selector should resolve.");

		assert_eq!(env, Environment::Sandbox);
		assert_eq!(
			env.base_url().expect("Sandbox URL should parse.").as_str(),
			"https://sandbox.safaricom.co.ke/"
		);
	}

	#[test]
	fn production_resolves_to_live_host() {
		let env = Environment::resolve(Some("production")).expect("Production should resolve.");

		let base_url = env.base_url().expect("Production URL should parse.");

		assert_eq!(base_url.host_str(), Some("api.safaricom.co.ke"));
	}

	#[test]
	fn unknown_selector_is_rejected() {
		let err = Environment::resolve(Some("staging")).expect_err("Staging is not supported.");

		assert!(matches!(err, ConfigError::UnknownEnvironment { ref value } if value == "staging"));

		assert!("Sandbox".parse::<Environment>().is_err());
	}
}
