//! The seam where homomorphic encryption would plug in.

use umbra_types::{Sealed, Timestamp};

/// Operations the tally needs from an encryption backend.
pub trait TallyCipher: Send + Sync {
    /// Seal a voter's raw choice into an opaque token.
    fn seal_choice(&self, raw_choice: &str, at: Timestamp) -> Sealed;

    /// Add one to a sealed counter without revealing it.
    fn increment(&self, counter: &Sealed) -> Sealed;

    /// The sealed count of zero. Every counter starts here, and it is the
    /// only value a caller may seed a counter with.
    fn zero(&self) -> Sealed;

    fn name(&self) -> &str;
}

/// Stand-in backend: counters are decimal strings and nothing is encrypted.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockCipher;

impl TallyCipher for MockCipher {
    fn seal_choice(&self, raw_choice: &str, at: Timestamp) -> Sealed {
        Sealed::new(format!("encrypted_{}_{}", raw_choice, at.as_millis()))
    }

    fn increment(&self, counter: &Sealed) -> Sealed {
        // Unreadable counters restart from zero.
        let current = counter.as_str().trim().parse::<u64>().unwrap_or(0);
        Sealed::new(current.saturating_add(1).to_string())
    }

    fn zero(&self) -> Sealed {
        Sealed::zero()
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_counts_up_from_decimal() {
        let c = MockCipher;
        assert_eq!(c.increment(&Sealed::zero()).as_str(), "1");
        assert_eq!(c.increment(&Sealed::new("41")).as_str(), "42");
    }

    #[test]
    fn unreadable_counter_restarts_at_one() {
        let c = MockCipher;
        assert_eq!(c.increment(&Sealed::new("garbage")).as_str(), "1");
        assert_eq!(c.increment(&Sealed::new("")).as_str(), "1");
    }

    #[test]
    fn sealed_choice_embeds_choice_and_millis() {
        let at = Timestamp::from_millis(1_700_000_000_123).unwrap();
        let token = MockCipher.seal_choice("for", at);
        assert_eq!(token.as_str(), "encrypted_for_1700000000123");
    }

    #[test]
    fn zero_increments_to_one() {
        let c = MockCipher;
        assert_eq!(c.zero().as_str(), "0");
        assert_eq!(c.increment(&c.zero()).as_str(), "1");
    }
}
