//! Typed identifier newtypes backed by store-assigned integers.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::Serialize;

/// Unique identifier for a [`Customer`](crate::customer::Customer).
///
/// Surrogate key assigned by the store on first save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CustomerId(i64);

impl CustomerId {
    /// Wrap a raw store key.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Access the inner key.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CustomerId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = CustomerId::new(42);
        let parsed: CustomerId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_serialize_as_plain_number() {
        let json = serde_json::to_string(&CustomerId::new(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn should_return_error_when_parsing_non_numeric_id() {
        let result = CustomerId::from_str("abc");
        assert!(result.is_err());
    }

    #[test]
    fn should_expose_inner_value() {
        assert_eq!(CustomerId::new(5).as_i64(), 5);
    }
}
