//! Construction-time configuration and the validated credential set built from it.
//!
//! [`ClientConfig`] is the raw, deserializable input. [`Credentials`] is what the client keeps:
//! the consumer key/secret and shortcode are guaranteed present, while the passkey and
//! initiator pair stay optional until an operation asks for them through
//! [`Credentials::require_passkey`] or [`Credentials::require_initiator`].

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::{
	_prelude::*,
	auth::{Secret, ShortCode},
	env::Environment,
	error::ConfigError,
};

/// Programmatic client configuration.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
	/// API consumer key.
	pub consumer_key: String,
	/// API consumer secret.
	pub consumer_secret: String,
	/// Business shortcode used as the default party identifier.
	pub short_code: String,
	/// Passkey for prompt-pay (STK push) operations.
	#[serde(default)]
	pub passkey: Option<String>,
	/// Initiator username for operations that move funds out of the account.
	#[serde(default)]
	pub initiator_name: Option<String>,
	/// Encrypted initiator password paired with `initiator_name`.
	#[serde(default)]
	pub security_credential: Option<String>,
	/// `sandbox` (default) or `production`.
	#[serde(default)]
	pub environment: Option<String>,
}
impl ClientConfig {
	/// Creates a configuration holding only the required fields.
	pub fn new(
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<String>,
		short_code: impl Into<String>,
	) -> Self {
		Self {
			consumer_key: consumer_key.into(),
			consumer_secret: consumer_secret.into(),
			short_code: short_code.into(),
			..Default::default()
		}
	}

	/// Sets the passkey used by prompt-pay operations.
	pub fn with_passkey(mut self, passkey: impl Into<String>) -> Self {
		self.passkey = Some(passkey.into());

		self
	}

	/// Sets the initiator name and its security credential.
	pub fn with_initiator(
		mut self,
		name: impl Into<String>,
		security_credential: impl Into<String>,
	) -> Self {
		self.initiator_name = Some(name.into());
		self.security_credential = Some(security_credential.into());

		self
	}

	/// Sets the environment selector.
	pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
		self.environment = Some(environment.into());

		self
	}
}
impl Debug for ClientConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfig")
			.field("consumer_key", &self.consumer_key)
			.field("consumer_secret", &"<redacted>")
			.field("short_code", &self.short_code)
			.field("passkey_set", &self.passkey.is_some())
			.field("initiator_name", &self.initiator_name)
			.field("security_credential_set", &self.security_credential.is_some())
			.field("environment", &self.environment)
			.finish()
	}
}

/// Borrowed initiator identity for operations that require one.
#[derive(Clone, Copy, Debug)]
pub struct Initiator<'a> {
	/// Initiator username.
	pub name: &'a str,
	/// Encrypted initiator password.
	pub security_credential: &'a Secret,
}

/// Validated, immutable credential set.
#[derive(Clone)]
pub struct Credentials {
	consumer_key: String,
	consumer_secret: Secret,
	short_code: ShortCode,
	passkey: Option<Secret>,
	initiator_name: Option<String>,
	security_credential: Option<Secret>,
	environment: Environment,
}
impl Credentials {
	/// Returns the consumer key.
	pub fn consumer_key(&self) -> &str {
		&self.consumer_key
	}

	/// Returns the business shortcode.
	pub fn short_code(&self) -> &ShortCode {
		&self.short_code
	}

	/// Returns the resolved environment.
	pub fn environment(&self) -> Environment {
		self.environment
	}

	/// Returns `true` when a passkey is configured.
	pub fn has_passkey(&self) -> bool {
		self.passkey.is_some()
	}

	/// Returns `true` when both halves of the initiator identity are configured.
	pub fn has_initiator(&self) -> bool {
		self.initiator_name.is_some() && self.security_credential.is_some()
	}

	/// Builds the `Authorization` header value for the token endpoint.
	pub fn basic_authorization(&self) -> Secret {
		let raw = format!("{}:{}", self.consumer_key, self.consumer_secret.expose());

		Secret::new(format!("Basic {}", STANDARD.encode(raw)))
	}

	/// Returns the passkey or fails with [`ConfigError::MissingCredential`].
	pub fn require_passkey(&self, operation: &'static str) -> Result<&Secret, ConfigError> {
		self.passkey.as_ref().ok_or(ConfigError::MissingCredential { operation, field: "passkey" })
	}

	/// Returns the initiator identity or fails with [`ConfigError::MissingCredential`].
	pub fn require_initiator(&self, operation: &'static str) -> Result<Initiator<'_>, ConfigError> {
		let name = self
			.initiator_name
			.as_deref()
			.ok_or(ConfigError::MissingCredential { operation, field: "initiator_name" })?;
		let security_credential = self
			.security_credential
			.as_ref()
			.ok_or(ConfigError::MissingCredential { operation, field: "security_credential" })?;

		Ok(Initiator { name, security_credential })
	}
}
impl TryFrom<ClientConfig> for Credentials {
	type Error = ConfigError;

	fn try_from(config: ClientConfig) -> Result<Self, Self::Error> {
		let consumer_key = required("consumer_key", config.consumer_key)?;
		let consumer_secret = required("consumer_secret", config.consumer_secret)?;
		let short_code = ShortCode::new(&config.short_code)?;
		let environment = Environment::resolve(config.environment.as_deref())?;

		Ok(Self {
			consumer_key,
			consumer_secret: Secret::new(consumer_secret),
			short_code,
			passkey: optional(config.passkey).map(Secret::new),
			initiator_name: optional(config.initiator_name),
			security_credential: optional(config.security_credential).map(Secret::new),
			environment,
		})
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("consumer_key", &self.consumer_key)
			.field("short_code", &self.short_code)
			.field("passkey_set", &self.passkey.is_some())
			.field("initiator_name", &self.initiator_name)
			.field("environment", &self.environment)
			.finish()
	}
}

fn required(field: &'static str, value: String) -> Result<String, ConfigError> {
	if value.trim().is_empty() { Err(ConfigError::MissingField { field }) } else { Ok(value) }
}

fn optional(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn base() -> ClientConfig {
		ClientConfig::new("key", "secret", "600988")
	}

	#[test]
	fn defaults_to_sandbox_and_keeps_optionals_lazy() {
		let credentials = Credentials::try_from(base()).expect("Minimal config should validate.");

		assert_eq!(credentials.environment(), Environment::Sandbox);
		assert!(!credentials.has_passkey());
		assert!(!credentials.has_initiator());
		assert!(matches!(
			credentials.require_passkey("stk_push"),
			Err(ConfigError::MissingCredential { operation: "stk_push", field: "passkey" })
		));
	}

	#[test]
	fn required_fields_must_be_present() {
		let err = Credentials::try_from(ClientConfig { consumer_key: " ".into(), ..base() })
			.expect_err("Blank consumer key should be rejected.");

		assert!(matches!(err, ConfigError::MissingField { field: "consumer_key" }));

		let err = Credentials::try_from(ClientConfig { consumer_secret: String::new(), ..base() })
			.expect_err("Empty consumer secret should be rejected.");

		assert!(matches!(err, ConfigError::MissingField { field: "consumer_secret" }));

		let err = Credentials::try_from(ClientConfig { short_code: String::new(), ..base() })
			.expect_err("Empty shortcode should be rejected.");

		assert!(matches!(err, ConfigError::MissingField { field: "short_code" }));
	}

	#[test]
	fn unknown_environment_fails_construction() {
		let err = Credentials::try_from(base().with_environment("qa"))
			.expect_err("Unknown environments should be rejected.");

		assert!(matches!(err, ConfigError::UnknownEnvironment { .. }));
	}

	#[test]
	fn initiator_requires_both_halves() {
		let half = ClientConfig { initiator_name: Some("apiop".into()), ..base() };
		let credentials = Credentials::try_from(half).expect("Half initiator should validate.");

		assert!(matches!(
			credentials.require_initiator("b2c_payment"),
			Err(ConfigError::MissingCredential { field: "security_credential", .. })
		));

		let full = Credentials::try_from(base().with_initiator("apiop", "encrypted"))
			.expect("Full initiator should validate.");
		let initiator = full.require_initiator("b2c_payment").expect("Initiator should resolve.");

		assert_eq!(initiator.name, "apiop");
		assert_eq!(initiator.security_credential.expose(), "encrypted");
	}

	#[test]
	fn basic_authorization_encodes_key_and_secret() {
		let credentials = Credentials::try_from(base()).expect("Minimal config should validate.");

		assert_eq!(credentials.basic_authorization().expose(), "Basic a2V5OnNlY3JldA==");
	}

	#[test]
	fn config_deserializes_with_optional_fields_omitted() {
		let config: ClientConfig = serde_json::from_str(
			r#"{"consumer_key":"k","consumer_secret":"s","short_code":"174379"}"#,
		)
		.expect("Config JSON should deserialize.");

		assert!(config.passkey.is_none());
		assert!(config.environment.is_none());
		assert!(!format!("{config:?}").contains("\"s\""));
	}
}
