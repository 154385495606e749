//! Domain-specific identifier types.

use serde::Serialize;
use std::fmt;

/// User identifier.
///
/// Assigned sequentially from zero. Before it appears in a request path it is
/// mapped through [`ShardSpec::to_shard`](crate::ShardSpec::to_shard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl UserId {
    /// Get the raw value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User({})", self.0)
    }
}

/// Product identifier.
///
/// Also the rank used for popularity sampling: lower ids are drawn more often.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl ProductId {
    /// Get the raw value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Product({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_display() {
        assert_eq!(UserId(7).to_string(), "User(7)");
        assert_eq!(ProductId(0).to_string(), "Product(0)");
    }

    #[test]
    fn test_identifiers_order_by_value() {
        let mut ids = vec![ProductId(3), ProductId(0), ProductId(2)];
        ids.sort();
        assert_eq!(ids, vec![ProductId(0), ProductId(2), ProductId(3)]);
        assert_eq!(UserId(5).get(), 5);
    }
}
