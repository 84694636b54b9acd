//! Request timestamps and the passkey-derived password sent with prompt-pay operations.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, auth::Secret};

/// `YYYYMMDDHHMMSS` timestamp rendered in the offset of the instant it was built from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Timestamp(String);
impl Timestamp {
	/// Renders `instant` without converting its offset.
	pub fn from_instant(instant: OffsetDateTime) -> Self {
		Self(format!(
			"{:04}{:02}{:02}{:02}{:02}{:02}",
			instant.year(),
			u8::from(instant.month()),
			instant.day(),
			instant.hour(),
			instant.minute(),
			instant.second(),
		))
	}

	/// Returns the rendered timestamp.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Display for Timestamp {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Password + timestamp pair for passkey-authenticated operations.
#[derive(Clone, Debug)]
pub struct PasskeyAuth {
	/// `base64(short_code + passkey + timestamp)`.
	pub password: Secret,
	/// Timestamp mixed into the password; must be sent alongside it.
	pub timestamp: Timestamp,
}
impl PasskeyAuth {
	/// Derives the password for `short_code` and `passkey` at `instant`.
	pub fn derive(short_code: &str, passkey: &Secret, instant: OffsetDateTime) -> Self {
		let timestamp = Timestamp::from_instant(instant);
		let password = derive_password(short_code, passkey.expose(), &timestamp);

		Self { password, timestamp }
	}
}

/// Computes `base64(short_code + passkey + timestamp)`.
pub fn derive_password(short_code: &str, passkey: &str, timestamp: &Timestamp) -> Secret {
	Secret::new(STANDARD.encode(format!("{short_code}{passkey}{}", timestamp.as_str())))
}
