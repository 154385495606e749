//! Entity management for workloads.
//!
//! Provides an `EntityIndex` holding every user and product of a run, keyed
//! by logical id. Records are created from sequential ids and the run's RNG,
//! so the same seed always yields the same names, e-mails and prices.

use fake::faker::company::en::{BsNoun, Buzzword};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use rand::Rng;
use shoptrace_types::{Product, ProductId, User, UserId};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Cheapest and most expensive list price, in cents.
const PRICE_RANGE_CENTS: std::ops::Range<u64> = 100..100_000;

/// Index of all users and products created for a run.
#[derive(Clone, Debug, Default)]
pub struct EntityIndex {
    users: BTreeMap<UserId, Arc<User>>,
    products: BTreeMap<ProductId, Arc<Product>>,
}

impl EntityIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `user_count` users followed by `product_count` products.
    pub fn generate(user_count: u64, product_count: u64, rng: &mut impl Rng) -> Self {
        info!(user_count, product_count, "Generating entities");

        let mut index = Self::new();
        for id in 0..user_count {
            index.create_user(UserId(id), rng);
        }
        for id in 0..product_count {
            index.create_product(ProductId(id), rng);
        }
        index
    }

    /// Create a user with a random name and e-mail and register it.
    pub fn create_user(&mut self, id: UserId, rng: &mut impl Rng) -> Arc<User> {
        let name: String = Name().fake_with_rng(rng);
        let email: String = SafeEmail().fake_with_rng(rng);

        let user = Arc::new(User { id, name, email });
        self.users.insert(id, Arc::clone(&user));
        user
    }

    /// Create a product with a random name and price and register it.
    pub fn create_product(&mut self, id: ProductId, rng: &mut impl Rng) -> Arc<Product> {
        let buzzword: String = Buzzword().fake_with_rng(rng);
        let noun: String = BsNoun().fake_with_rng(rng);
        let cents = rng.gen_range(PRICE_RANGE_CENTS);

        let product = Arc::new(Product {
            id,
            name: product_name(&buzzword, &noun),
            price: cents as f64 / 100.0,
        });
        self.products.insert(id, Arc::clone(&product));
        product
    }

    /// Look up a user by id.
    pub fn user(&self, id: UserId) -> Option<&Arc<User>> {
        self.users.get(&id)
    }

    /// Look up a product by id.
    pub fn product(&self, id: ProductId) -> Option<&Arc<Product>> {
        self.products.get(&id)
    }

    /// All users in id order.
    pub fn users(&self) -> impl Iterator<Item = &Arc<User>> + '_ {
        self.users.values()
    }

    /// All products in id order.
    pub fn products(&self) -> impl Iterator<Item = &Arc<Product>> + '_ {
        self.products.values()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }
}

/// "intuitive" + "synergies" -> "Intuitive Synergies"
fn product_name(adjective: &str, noun: &str) -> String {
    format!("{} {}", capitalize(adjective), capitalize(noun))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
