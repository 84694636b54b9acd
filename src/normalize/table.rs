// self
use crate::normalize::ErrorCategory;

/// How a provider code resolves to a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeRule {
	/// The code always means the same thing.
	Fixed(ErrorCategory),
	/// The code is shared by several failures; the message decides.
	///
	/// Phrases are matched case-insensitively in order and the first hit wins.
	Phrases {
		/// Ordered `(phrase, category)` pairs.
		phrases: &'static [(&'static str, ErrorCategory)],
		/// Category used when no phrase matches.
		otherwise: ErrorCategory,
	},
}
impl CodeRule {
	/// Resolves the rule against the extracted provider message.
	pub fn resolve(&self, message: &str) -> ErrorCategory {
		match *self {
			Self::Fixed(category) => category,
			Self::Phrases { phrases, otherwise } => {
				let lowered = message.to_ascii_lowercase();

				phrases
					.iter()
					.find(|(phrase, _)| lowered.contains(phrase))
					.map_or(otherwise, |(_, category)| *category)
			},
		}
	}
}

/// Fixed provider code table.
pub const CODE_TABLE: &[(&str, CodeRule)] = &[
	("400.008.01", CodeRule::Fixed(ErrorCategory::AuthenticationFailed)),
	("400.008.02", CodeRule::Fixed(ErrorCategory::InvalidGrantType)),
	("404.001.04", CodeRule::Fixed(ErrorCategory::InvalidAuthHeader)),
	("400.002.05", CodeRule::Fixed(ErrorCategory::InvalidPayload)),
	("400.003.01", CodeRule::Fixed(ErrorCategory::ExpiredToken)),
	("1", CodeRule::Fixed(ErrorCategory::InsufficientFunds)),
	("1001", CodeRule::Fixed(ErrorCategory::TransactionInProgress)),
	("1019", CodeRule::Fixed(ErrorCategory::RequestExpired)),
	("1025", CodeRule::Fixed(ErrorCategory::PushFailed)),
	("1032", CodeRule::Fixed(ErrorCategory::CancelledByUser)),
	("1037", CodeRule::Fixed(ErrorCategory::PushTimeout)),
	("2001", CodeRule::Fixed(ErrorCategory::InvalidInitiator)),
	("15", CodeRule::Fixed(ErrorCategory::DuplicateRequest)),
	("17", CodeRule::Fixed(ErrorCategory::InternalFailure)),
	("18", CodeRule::Fixed(ErrorCategory::InvalidSecurityCredential)),
	("20", CodeRule::Fixed(ErrorCategory::UnresolvedInitiator)),
	("21", CodeRule::Fixed(ErrorCategory::PermissionDenied)),
	("26", CodeRule::Fixed(ErrorCategory::SystemBusy)),
	("4102", CodeRule::Fixed(ErrorCategory::MerchantKycFailed)),
	("4104", CodeRule::Fixed(ErrorCategory::MissingNominatedNumber)),
	("4201", CodeRule::Fixed(ErrorCategory::UssdNetworkError)),
	("4203", CodeRule::Fixed(ErrorCategory::UssdException)),
	(
		"500.003.1001",
		CodeRule::Phrases {
			phrases: &[
				("already registered", ErrorCategory::UrlsAlreadyRegistered),
				("duplicate notification", ErrorCategory::DuplicateNotification),
			],
			otherwise: ErrorCategory::ServerFault,
		},
	),
	(
		"409",
		CodeRule::Phrases {
			phrases: &[
				("already", ErrorCategory::ResourceExists),
				("duplicate", ErrorCategory::DuplicateRequest),
			],
			otherwise: ErrorCategory::Conflict,
		},
	),
];

/// Looks up the rule for a provider code.
pub fn lookup_code(code: &str) -> Option<&'static CodeRule> {
	CODE_TABLE.iter().find(|(known, _)| *known == code).map(|(_, rule)| rule)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn codes_are_unique() {
		for (idx, (code, _)) in CODE_TABLE.iter().enumerate() {
			assert!(
				CODE_TABLE[idx + 1..].iter().all(|(other, _)| other != code),
				"Code {code} is listed more than once."
			);
		}
	}

	#[test]
	fn first_matching_phrase_wins() {
		let rule = lookup_code("409").expect("409 should be mapped.");

		assert_eq!(
			rule.resolve("Duplicate: merchant ALREADY opted in"),
			ErrorCategory::ResourceExists
		);
		assert_eq!(rule.resolve("duplicate invoice number"), ErrorCategory::DuplicateRequest);
		assert_eq!(rule.resolve("state mismatch"), ErrorCategory::Conflict);
	}

	#[test]
	fn initiator_code_has_a_single_meaning() {
		assert_eq!(
			lookup_code("2001").map(|rule| rule.resolve("The initiator information is invalid.")),
			Some(ErrorCategory::InvalidInitiator)
		);
		assert_eq!(lookup_code("999"), None);
	}
}
