//! Core types for shoptrace workloads.
//!
//! Identifiers, shard addressing, catalog entities and the request actions
//! that make up a generated request log.

mod action;
mod entity;
mod identifiers;
mod shard;

pub use action::{Action, ActionKind, HttpMethod, RwClass};
pub use entity::{Product, User};
pub use identifiers::{ProductId, UserId};
pub use shard::{ShardError, ShardSpec};
