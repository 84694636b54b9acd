//! Typed endpoint operations layered on [`Client::send`](crate::Client::send).
//!
//! Each family lives in its own module and adds an `impl Client` block. Operations fill the
//! provider's boilerplate from the client's credentials (shortcode, password and timestamp,
//! initiator identity, identifier types, command IDs), check that the optional credential they
//! need is configured before any network activity, and return the provider's JSON verbatim.

pub mod account;
pub mod b2b;
pub mod b2c;
pub mod bill_manager;
pub mod c2b;
pub mod express;
pub mod qr;
pub mod stk;

pub use account::*;
pub use b2b::*;
pub use b2c::*;
pub use bill_manager::*;
pub use c2b::*;
pub use express::*;
pub use qr::*;
pub use stk::*;

// crates.io
use rand::Rng;

/// `IdentifierType` value for organisation shortcodes.
pub const SHORT_CODE_IDENTIFIER: &str = "4";
/// `RecieverIdentifierType` value used by reversals.
pub const REVERSAL_RECEIVER_IDENTIFIER: &str = "11";

/// Generates a 32-character hex reference for requests the provider wants uniquely tagged.
pub fn generate_reference() -> String {
	format!("{:032x}", rand::rng().random::<u128>())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn generated_references_are_unique_hex() {
		let a = generate_reference();
		let b = generate_reference();

		assert_eq!(a.len(), 32);
		assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
		assert_ne!(a, b);
	}
}
