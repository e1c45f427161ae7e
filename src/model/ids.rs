//! Type-safe identifiers.
//!
//! Each store hands out ids from its own `u32` counter; the newtypes keep a
//! `CategoryId` from being passed where a `RestaurantId` is expected. They
//! serialize as bare numbers and display with a type prefix for logs.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a registered user. Issued by the identity provider, not by this crate.
    UserId,
    "user"
);
entity_id!(RestaurantId, "restaurant");
entity_id!(CategoryId, "category");
entity_id!(MenuItemId, "menu_item");
entity_id!(OrderId, "order");

/// Identifier of one line inside an order: the parent order plus a 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderItemId {
    pub order_id: OrderId,
    pub line: u32,
}

impl Display for OrderItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/line_{}", self.order_id, self.line)
    }
}
