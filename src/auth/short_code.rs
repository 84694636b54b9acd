//! Validated business shortcode (Paybill or Till number).

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, error::ConfigError};

/// Merchant-identifying numeric account code.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortCode(String);
impl ShortCode {
	/// Creates a shortcode after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, ConfigError> {
		let view = value.as_ref().trim();

		validate(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Deref for ShortCode {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for ShortCode {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<ShortCode> for String {
	fn from(value: ShortCode) -> Self {
		value.0
	}
}
impl TryFrom<String> for ShortCode {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl Debug for ShortCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "ShortCode({})", self.0)
	}
}
impl Display for ShortCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for ShortCode {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

fn validate(view: &str) -> Result<(), ConfigError> {
	if view.is_empty() {
		return Err(ConfigError::MissingField { field: "short_code" });
	}
	if !view.bytes().all(|b| b.is_ascii_digit()) {
		return Err(ConfigError::InvalidShortCode { value: view.to_owned() });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn accepts_numeric_codes() {
		let code = ShortCode::new(" 600988 ").expect("Numeric shortcode should be valid.");

		assert_eq!(&*code, "600988");
		assert_eq!(format!("{code:?}"), "ShortCode(600988)");
	}

	#[test]
	fn rejects_empty_and_non_numeric_codes() {
		assert!(matches!(ShortCode::new("   "), Err(ConfigError::MissingField { .. })));
		assert!(matches!(ShortCode::new("60a988"), Err(ConfigError::InvalidShortCode { .. })));
	}
}
