//! Credential material that never prints itself.

// self
use crate::_prelude::*;

/// Consumer secret, passkey, security credential, or bearer token.
///
/// Formatting prints `<redacted>`; serde sees the raw string so the value can travel in request
/// bodies and config files.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret(String);
impl Secret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for Secret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Secret").field(&"<redacted>").finish()
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn formatting_hides_the_value() {
		let passkey = Secret::new("bfb279f9aa9bdbcf158e97dd71a467cd");

		assert_eq!(format!("{passkey:?}"), "Secret(\"<redacted>\")");
		assert_eq!(passkey.to_string(), "<redacted>");
		assert!(!format!("{passkey:?}{passkey}").contains("bfb279"));
		assert_eq!(passkey.expose(), "bfb279f9aa9bdbcf158e97dd71a467cd");
	}

	#[test]
	fn serde_carries_the_raw_value() {
		let credential = Secret::new("Safaricom999!*!");

		assert_eq!(
			serde_json::to_value(&credential).expect("Secret should serialize."),
			json!("Safaricom999!*!"),
		);

		let parsed = serde_json::from_str::<Secret>("\"Safaricom999!*!\"")
			.expect("Secret should deserialize from a plain string.");

		assert_eq!(parsed, credential);
	}
}
