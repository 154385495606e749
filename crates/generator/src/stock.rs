//! Simulated inventory.
//!
//! The ledger only decides when a restock request must be injected into the
//! log; it is not an inventory system.

use shoptrace_types::ProductId;
use std::collections::BTreeMap;

/// Lowest stock level a product may be left at after a refill scan.
pub const MIN_STOCK: i64 = 1;

/// Signed stock level per product.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StockLedger {
    levels: BTreeMap<ProductId, i64>,
}

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a product at `level`.
    pub fn seed(&mut self, product: ProductId, level: i64) {
        self.levels.insert(product, level);
    }

    /// Move a product's level by `delta`.
    pub fn apply(&mut self, product: ProductId, delta: i64) {
        *self.levels.entry(product).or_insert(0) += delta;
    }

    pub fn level(&self, product: ProductId) -> Option<i64> {
        self.levels.get(&product).copied()
    }

    /// Products currently below [`MIN_STOCK`], in id order.
    pub fn depleted(&self) -> Vec<ProductId> {
        self.levels
            .iter()
            .filter(|(_, &level)| level < MIN_STOCK)
            .map(|(&product, _)| product)
            .collect()
    }

    /// Lowest level across all tracked products.
    pub fn min_level(&self) -> Option<i64> {
        self.levels.values().copied().min()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProductId, i64)> + '_ {
        self.levels.iter().map(|(&product, &level)| (product, level))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_and_depleted() {
        let mut ledger = StockLedger::new();
        ledger.seed(ProductId(0), 1);
        ledger.seed(ProductId(1), 5);
        ledger.seed(ProductId(2), 1);

        ledger.apply(ProductId(0), -1);
        ledger.apply(ProductId(2), -1);
        ledger.apply(ProductId(2), 3);
        ledger.apply(ProductId(1), -2);

        assert_eq!(ledger.level(ProductId(0)), Some(0));
        assert_eq!(ledger.level(ProductId(1)), Some(3));
        assert_eq!(ledger.level(ProductId(2)), Some(3));
        assert_eq!(ledger.depleted(), vec![ProductId(0)]);
        assert_eq!(ledger.min_level(), Some(0));
    }

    #[test]
    fn test_untracked_product_starts_at_zero() {
        let mut ledger = StockLedger::new();
        assert!(ledger.is_empty());
        ledger.apply(ProductId(4), -1);
        assert_eq!(ledger.level(ProductId(4)), Some(-1));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.iter().collect::<Vec<_>>(), vec![(ProductId(4), -1)]);
    }
}
