//! Time sources used for token expiry checks and request timestamps.

// self
use crate::_prelude::*;

/// Source of the current instant.
///
/// The offset of the returned value matters: request timestamps are rendered in that offset, so
/// [`SystemClock`] reports local time.
pub trait Clock: Send + Sync {
	/// Returns the current instant.
	fn now(&self) -> OffsetDateTime;
}

/// Wall clock in the local offset, falling back to UTC when the offset cannot be determined.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
	fn now(&self) -> OffsetDateTime {
		OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
	}
}

/// Manually driven clock for deterministic tests and replays.
#[derive(Clone, Debug)]
pub struct ManualClock(Arc<Mutex<OffsetDateTime>>);
impl ManualClock {
	/// Creates a clock frozen at `instant`.
	pub fn new(instant: OffsetDateTime) -> Self {
		Self(Arc::new(Mutex::new(instant)))
	}

	/// Moves the clock to `instant`.
	pub fn set(&self, instant: OffsetDateTime) {
		*self.0.lock() = instant;
	}

	/// Moves the clock forward by `delta`.
	pub fn advance(&self, delta: Duration) {
		let mut guard = self.0.lock();

		*guard += delta;
	}
}
impl Clock for ManualClock {
	fn now(&self) -> OffsetDateTime {
		*self.0.lock()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn manual_clock_moves_only_when_told() {
		let clock = ManualClock::new(macros::datetime!(2023-01-01 00:00 UTC));
		let shared = clock.clone();

		assert_eq!(clock.now(), macros::datetime!(2023-01-01 00:00 UTC));

		shared.advance(Duration::minutes(90));

		assert_eq!(clock.now(), macros::datetime!(2023-01-01 01:30 UTC));

		clock.set(macros::datetime!(2024-06-30 12:00 +03:00));

		assert_eq!(shared.now().offset(), macros::offset!(+03:00));
	}
}
