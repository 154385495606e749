//! Catalog entities referenced by actions.

use crate::{ProductId, UserId};
use serde::Serialize;

/// A shopper. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    /// Logical (unsharded) id.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Contact e-mail.
    pub email: String,
}

/// A catalog product. Immutable once created; only the simulated stock
/// level changes, and that lives in the stock ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    /// Logical (unsharded) id.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit price, never negative.
    pub price: f64,
}
