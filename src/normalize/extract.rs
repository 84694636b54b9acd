// self
use crate::_prelude::*;

/// JSON object keys walked from the root to a leaf field.
pub type FieldPath = &'static [&'static str];

/// Where provider error codes live, in probe order.
pub const CODE_PATHS: &[FieldPath] = &[
	&["errorCode"],
	&["fault", "detail", "errorcode"],
	&["ResultCode"],
	&["resultCode"],
	&["ResponseCode"],
];

/// Where provider error messages live, in probe order.
pub const MESSAGE_PATHS: &[FieldPath] = &[
	&["errorMessage"],
	&["fault", "faultstring"],
	&["ResultDesc"],
	&["resultDesc"],
	&["ResponseDescription"],
];

/// Returns the first non-empty string or number found along `paths`.
pub fn probe(value: &Value, paths: &[FieldPath]) -> Option<String> {
	paths.iter().find_map(|path| lookup(value, path))
}

fn lookup(value: &Value, path: &[&str]) -> Option<String> {
	let leaf = path.iter().try_fold(value, |node, key| node.get(key))?;

	match leaf {
		Value::String(text) => {
			let text = text.trim();

			(!text.is_empty()).then(|| text.to_owned())
		},
		Value::Number(number) => Some(number.to_string()),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn earlier_paths_win() {
		let body = json!({
			"errorCode": "400.002.05",
			"ResultCode": "1032",
			"fault": { "detail": { "errorcode": "400.008.01" } },
		});

		assert_eq!(probe(&body, CODE_PATHS).as_deref(), Some("400.002.05"));
	}

	#[test]
	fn falls_through_to_nested_and_result_fields() {
		let nested = json!({ "fault": { "detail": { "errorcode": "400.008.01" } } });
		let result = json!({ "ResultCode": 1037, "ResultDesc": "DS timeout" });

		assert_eq!(probe(&nested, CODE_PATHS).as_deref(), Some("400.008.01"));
		assert_eq!(probe(&result, CODE_PATHS).as_deref(), Some("1037"));
		assert_eq!(probe(&result, MESSAGE_PATHS).as_deref(), Some("DS timeout"));
	}

	#[test]
	fn blank_and_non_scalar_fields_are_skipped() {
		let body = json!({ "errorCode": "  ", "ResultCode": { "nested": true }, "resultCode": "26" });

		assert_eq!(probe(&body, CODE_PATHS).as_deref(), Some("26"));
		assert_eq!(probe(&json!([1, 2]), CODE_PATHS), None);
	}
}
