//! Opaque sealed tokens.
//!
//! A [`Sealed`] value stands in for a homomorphic-encryption ciphertext.
//! Nothing outside the cipher backend may assume anything about its
//! contents; today's mock backend happens to store decimal strings.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sealed(String);

impl Sealed {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token a fresh counter or an unfunded wallet starts with.
    pub fn zero() -> Self {
        Self("0".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Sealed {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Sealed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
