// self
use crate::obs::{Operation, Outcome, TokenEvent};

/// Records an operation outcome via the global metrics recorder (when enabled).
pub fn record_request_outcome(operation: Operation, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"mpesa_client_request_total",
			"operation" => operation.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome);
	}
}

/// Records a token cache event via the global metrics recorder (when enabled).
pub fn record_token_event(event: TokenEvent) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("mpesa_client_token_total", "event" => event.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = event;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_noop_without_metrics() {
		record_request_outcome(Operation::StkPush, Outcome::Failure);
		record_token_event(TokenEvent::Reused);
	}
}
