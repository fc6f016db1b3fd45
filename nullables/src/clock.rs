//! Nullable clock: deterministic time for testing.

use parking_lot::Mutex;
use std::time::Duration;
use umbra_types::{Clock, Timestamp};

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to.
pub struct NullClock {
    current: Mutex<Timestamp>,
}

impl NullClock {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            current: Mutex::new(initial),
        }
    }

    /// Start at the given Unix epoch milliseconds (clamped to the epoch if out of range).
    pub fn at_millis(millis: i64) -> Self {
        let initial = Timestamp::from_millis(millis)
            .or_else(|| Timestamp::from_millis(0))
            .unwrap_or_else(Timestamp::now);
        Self::new(initial)
    }

    /// Advance time.
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock();
        *current = current.after(by);
    }

    /// Set the time to a specific value.
    pub fn set(&self, to: Timestamp) {
        *self.current.lock() = to;
    }
}

impl Clock for NullClock {
    fn now(&self) -> Timestamp {
        *self.current.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_moves_only_when_told() {
        let clock = NullClock::at_millis(10);
        assert_eq!(clock.now().as_millis(), 10);
        assert_eq!(clock.now().as_millis(), 10);
        clock.advance(Duration::from_millis(5));
        assert_eq!(clock.now().as_millis(), 15);
        clock.set(Timestamp::from_millis(1).unwrap());
        assert_eq!(clock.now().as_millis(), 1);
    }
}
