//! Credential models, secret wrappers, and passkey password derivation.

pub mod credentials;
pub mod password;
pub mod secret;
pub mod short_code;

pub use credentials::*;
pub use password::*;
pub use secret::*;
pub use short_code::*;
