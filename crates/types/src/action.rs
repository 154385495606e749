//! Request actions.
//!
//! An [`Action`] is one entry of the request log: what kind of request it is,
//! which records it touches, and how it is addressed on the wire. Paths are
//! relative; the emitter prepends the API base path.

use crate::{Product, ProductId, ShardSpec, User, UserId};
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

/// Kind of request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
    CreateUser,
    ShowCart,
    CheckoutCart,
    ShowProduct,
    RefillProduct,
    CreateProduct,
    GetProductInCart,
    AddProductToCart,
    ChangeProductInCart,
    RemoveProductFromCart,
}

impl ActionKind {
    /// Every kind, in catalog order (the order used by reports).
    pub const ALL: [ActionKind; 10] = [
        ActionKind::CreateUser,
        ActionKind::ShowCart,
        ActionKind::CheckoutCart,
        ActionKind::ShowProduct,
        ActionKind::RefillProduct,
        ActionKind::CreateProduct,
        ActionKind::GetProductInCart,
        ActionKind::AddProductToCart,
        ActionKind::ChangeProductInCart,
        ActionKind::RemoveProductFromCart,
    ];

    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::CreateUser => "CREATE_USER",
            ActionKind::ShowCart => "SHOW_CART",
            ActionKind::CheckoutCart => "CHECKOUT_CART",
            ActionKind::ShowProduct => "SHOW_PRODUCT",
            ActionKind::RefillProduct => "REFILL_PRODUCT",
            ActionKind::CreateProduct => "CREATE_PRODUCT",
            ActionKind::GetProductInCart => "GET_PRODUCT_IN_CART",
            ActionKind::AddProductToCart => "ADD_PRODUCT_TO_CART",
            ActionKind::ChangeProductInCart => "CHANGE_PRODUCT_IN_CART",
            ActionKind::RemoveProductFromCart => "REMOVE_PRODUCT_FROM_CART",
        }
    }

    /// Position of the kind in [`ActionKind::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// HTTP method used for this kind.
    pub fn method(&self) -> HttpMethod {
        match self {
            ActionKind::ShowCart | ActionKind::ShowProduct | ActionKind::GetProductInCart => {
                HttpMethod::Get
            }
            ActionKind::CreateUser | ActionKind::CreateProduct | ActionKind::AddProductToCart => {
                HttpMethod::Put
            }
            ActionKind::CheckoutCart
            | ActionKind::RefillProduct
            | ActionKind::ChangeProductInCart => HttpMethod::Post,
            ActionKind::RemoveProductFromCart => HttpMethod::Delete,
        }
    }

    /// Whether the request reads or writes server state.
    pub fn rw_class(&self) -> RwClass {
        match self.method() {
            HttpMethod::Get => RwClass::Read,
            _ => RwClass::Write,
        }
    }

    /// Stock change caused by a cart mutation of this kind.
    ///
    /// Adding to a cart takes one unit off the shelf; changes and removals
    /// carry a signed cart delta, and the shelf moves the opposite way.
    /// Every other kind leaves stock alone.
    pub fn stock_delta(&self, amount: Option<i64>) -> Option<i64> {
        match self {
            ActionKind::AddProductToCart => Some(-1),
            ActionKind::ChangeProductInCart | ActionKind::RemoveProductFromCart => {
                amount.map(|a| -a)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read/write classification used for workload mix statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RwClass {
    Read,
    Write,
}

/// Records referenced by an action.
///
/// Kept alongside the path so stock bookkeeping never has to parse URLs.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ActionParams {
    pub user: Option<Arc<User>>,
    pub product: Option<Arc<Product>>,
    pub amount: Option<i64>,
}

/// One request of the log.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    kind: ActionKind,
    params: ActionParams,
    path: String,
    body: Option<Value>,
}

impl Action {
    /// `PUT user/{u}` creating the account.
    pub fn create_user(shard: ShardSpec, user: Arc<User>) -> Self {
        let path = user_path(shard, user.id);
        let body = json!({ "name": user.name, "email": user.email });
        Self::new(
            ActionKind::CreateUser,
            ActionParams {
                user: Some(user),
                ..Default::default()
            },
            path,
            Some(body),
        )
    }

    /// `GET user/{u}/cart`.
    pub fn show_cart(shard: ShardSpec, user: Arc<User>) -> Self {
        let path = format!("{}/cart", user_path(shard, user.id));
        Self::new(
            ActionKind::ShowCart,
            ActionParams {
                user: Some(user),
                ..Default::default()
            },
            path,
            None,
        )
    }

    /// `POST user/{u}/cart/checkout`.
    pub fn checkout_cart(shard: ShardSpec, user: Arc<User>) -> Self {
        let path = format!("{}/cart/checkout", user_path(shard, user.id));
        Self::new(
            ActionKind::CheckoutCart,
            ActionParams {
                user: Some(user),
                ..Default::default()
            },
            path,
            None,
        )
    }

    /// `GET product/{p}`.
    pub fn show_product(shard: ShardSpec, product: Arc<Product>) -> Self {
        let path = product_path(shard, product.id);
        Self::new(
            ActionKind::ShowProduct,
            ActionParams {
                product: Some(product),
                ..Default::default()
            },
            path,
            None,
        )
    }

    /// `POST product/{p}` restocking `amount` units.
    pub fn refill_product(shard: ShardSpec, product: Arc<Product>, amount: i64) -> Self {
        let path = product_path(shard, product.id);
        Self::new(
            ActionKind::RefillProduct,
            ActionParams {
                product: Some(product),
                amount: Some(amount),
                ..Default::default()
            },
            path,
            Some(json!({ "amount": amount })),
        )
    }

    /// `PUT product/{p}` listing the product with `amount` units in stock.
    pub fn create_product(shard: ShardSpec, product: Arc<Product>, amount: i64) -> Self {
        let path = product_path(shard, product.id);
        let body = json!({
            "name": product.name,
            "amount": amount,
            "price": product.price,
        });
        Self::new(
            ActionKind::CreateProduct,
            ActionParams {
                product: Some(product),
                amount: Some(amount),
                ..Default::default()
            },
            path,
            Some(body),
        )
    }

    /// `GET user/{u}/cart/product/{p}`.
    pub fn get_product_in_cart(shard: ShardSpec, user: Arc<User>, product: Arc<Product>) -> Self {
        let path = cart_item_path(shard, user.id, product.id);
        Self::new(
            ActionKind::GetProductInCart,
            ActionParams {
                user: Some(user),
                product: Some(product),
                amount: None,
            },
            path,
            None,
        )
    }

    /// `PUT user/{u}/cart/product/{p}` putting one unit in the cart.
    pub fn add_product_to_cart(shard: ShardSpec, user: Arc<User>, product: Arc<Product>) -> Self {
        let path = cart_item_path(shard, user.id, product.id);
        Self::new(
            ActionKind::AddProductToCart,
            ActionParams {
                user: Some(user),
                product: Some(product),
                amount: None,
            },
            path,
            Some(json!({ "amount": 1 })),
        )
    }

    /// `POST user/{u}/cart/product/{p}` changing the cart quantity by `amount`.
    pub fn change_product_in_cart(
        shard: ShardSpec,
        user: Arc<User>,
        product: Arc<Product>,
        amount: i64,
    ) -> Self {
        let path = cart_item_path(shard, user.id, product.id);
        Self::new(
            ActionKind::ChangeProductInCart,
            ActionParams {
                user: Some(user),
                product: Some(product),
                amount: Some(amount),
            },
            path,
            Some(json!({ "amount": amount })),
        )
    }

    /// `DELETE user/{u}/cart/product/{p}`.
    ///
    /// `amount` is the (negative) cart delta of dropping the line.
    pub fn remove_product_from_cart(
        shard: ShardSpec,
        user: Arc<User>,
        product: Arc<Product>,
        amount: i64,
    ) -> Self {
        let path = cart_item_path(shard, user.id, product.id);
        Self::new(
            ActionKind::RemoveProductFromCart,
            ActionParams {
                user: Some(user),
                product: Some(product),
                amount: Some(amount),
            },
            path,
            None,
        )
    }

    fn new(kind: ActionKind, params: ActionParams, path: String, body: Option<Value>) -> Self {
        Self {
            kind,
            params,
            path,
            body,
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn method(&self) -> HttpMethod {
        self.kind.method()
    }

    pub fn rw_class(&self) -> RwClass {
        self.kind.rw_class()
    }

    /// Sharded path relative to the API base.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// JSON body, absent for reads and deletes.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Owning user, if the action is user-scoped.
    pub fn user_id(&self) -> Option<UserId> {
        self.params.user.as_ref().map(|u| u.id)
    }

    pub fn product_id(&self) -> Option<ProductId> {
        self.params.product.as_ref().map(|p| p.id)
    }

    pub fn amount(&self) -> Option<i64> {
        self.params.amount
    }

    /// The product whose stock this action moves, and by how much.
    pub fn stock_delta(&self) -> Option<(ProductId, i64)> {
        let delta = self.kind.stock_delta(self.params.amount)?;
        Some((self.product_id()?, delta))
    }
}

fn user_path(shard: ShardSpec, user: UserId) -> String {
    format!("user/{}", shard.to_shard(user.0))
}

fn product_path(shard: ShardSpec, product: ProductId) -> String {
    format!("product/{}", shard.to_shard(product.0))
}

fn cart_item_path(shard: ShardSpec, user: UserId, product: ProductId) -> String {
    format!(
        "{}/cart/product/{}",
        user_path(shard, user),
        shard.to_shard(product.0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64) -> Arc<User> {
        Arc::new(User {
            id: UserId(id),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        })
    }

    fn product(id: u64) -> Arc<Product> {
        Arc::new(Product {
            id: ProductId(id),
            name: "Widget".to_string(),
            price: 12.5,
        })
    }

    #[test]
    fn test_paths_use_sharded_ids() {
        let shard = ShardSpec::new(4, 1).unwrap();

        let action = Action::get_product_in_cart(shard, user(2), product(3));
        assert_eq!(action.path(), "user/9/cart/product/13");

        assert_eq!(Action::show_cart(shard, user(0)).path(), "user/1/cart");
        assert_eq!(
            Action::checkout_cart(shard, user(0)).path(),
            "user/1/cart/checkout"
        );
        assert_eq!(Action::show_product(shard, product(5)).path(), "product/21");
    }

    #[test]
    fn test_bodies_match_request_kind() {
        let shard = ShardSpec::SINGLE;

        let create = Action::create_user(shard, user(0));
        assert_eq!(
            create.body().unwrap().to_string(),
            r#"{"name":"Ada Lovelace","email":"ada@example.com"}"#
        );

        let listing = Action::create_product(shard, product(0), 100);
        assert_eq!(
            listing.body().unwrap().to_string(),
            r#"{"name":"Widget","amount":100,"price":12.5}"#
        );

        let add = Action::add_product_to_cart(shard, user(0), product(0));
        assert_eq!(add.body().unwrap().to_string(), r#"{"amount":1}"#);

        let remove = Action::remove_product_from_cart(shard, user(0), product(0), -2);
        assert!(remove.body().is_none());
        assert_eq!(remove.amount(), Some(-2));
    }

    #[test]
    fn test_methods_and_rw_classes() {
        let expected = [
            (ActionKind::CreateUser, HttpMethod::Put, RwClass::Write),
            (ActionKind::ShowCart, HttpMethod::Get, RwClass::Read),
            (ActionKind::CheckoutCart, HttpMethod::Post, RwClass::Write),
            (ActionKind::ShowProduct, HttpMethod::Get, RwClass::Read),
            (ActionKind::RefillProduct, HttpMethod::Post, RwClass::Write),
            (ActionKind::CreateProduct, HttpMethod::Put, RwClass::Write),
            (ActionKind::GetProductInCart, HttpMethod::Get, RwClass::Read),
            (ActionKind::AddProductToCart, HttpMethod::Put, RwClass::Write),
            (ActionKind::ChangeProductInCart, HttpMethod::Post, RwClass::Write),
            (ActionKind::RemoveProductFromCart, HttpMethod::Delete, RwClass::Write),
        ];
        for (kind, method, rw) in expected {
            assert_eq!(kind.method(), method, "{}", kind);
            assert_eq!(kind.rw_class(), rw, "{}", kind);
        }
    }

    #[test]
    fn test_stock_delta_table() {
        let shard = ShardSpec::SINGLE;

        let add = Action::add_product_to_cart(shard, user(0), product(4));
        assert_eq!(add.stock_delta(), Some((ProductId(4), -1)));

        let more = Action::change_product_in_cart(shard, user(0), product(4), 1);
        assert_eq!(more.stock_delta(), Some((ProductId(4), -1)));

        let less = Action::change_product_in_cart(shard, user(0), product(4), -1);
        assert_eq!(less.stock_delta(), Some((ProductId(4), 1)));

        let drop = Action::remove_product_from_cart(shard, user(0), product(4), -3);
        assert_eq!(drop.stock_delta(), Some((ProductId(4), 3)));

        let refill = Action::refill_product(shard, product(4), 2000);
        assert_eq!(refill.stock_delta(), None);
        assert_eq!(Action::show_product(shard, product(4)).stock_delta(), None);
    }

    #[test]
    fn test_kind_index_matches_catalog_order() {
        for (i, kind) in ActionKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert_eq!(
            ActionKind::RemoveProductFromCart.to_string(),
            "REMOVE_PRODUCT_FROM_CART"
        );
    }
}
