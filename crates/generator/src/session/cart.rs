//! Session-local view of a user's cart.

use rand::Rng;
use shoptrace_types::ProductId;
use std::collections::BTreeMap;

/// Quantities per product currently in the cart. Lines that reach zero are
/// dropped, so every tracked quantity is positive.
#[derive(Debug, Default)]
pub(super) struct CartTracker {
    lines: BTreeMap<ProductId, i64>,
}

impl CartTracker {
    pub fn contains(&self, product: ProductId) -> bool {
        self.lines.contains_key(&product)
    }

    pub fn quantity(&self, product: ProductId) -> i64 {
        self.lines.get(&product).copied().unwrap_or(0)
    }

    pub fn add(&mut self, product: ProductId, delta: i64) {
        let quantity = self.lines.entry(product).or_insert(0);
        *quantity += delta;
        if *quantity <= 0 {
            self.lines.remove(&product);
        }
    }

    /// Uniformly pick a product already in the cart.
    pub fn pick(&self, rng: &mut impl Rng) -> Option<ProductId> {
        if self.lines.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.lines.len());
        self.lines.keys().nth(idx).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Empty the cart, yielding lines in product id order.
    pub fn drain(&mut self) -> impl Iterator<Item = (ProductId, i64)> {
        std::mem::take(&mut self.lines).into_iter()
    }
}
