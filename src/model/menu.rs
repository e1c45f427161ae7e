//! Menu categories and the items inside them.
//!
//! Ownership is never stored on these records. A category points at its
//! restaurant and an item at its category; the owner is found by walking
//! that chain (see [`authz`](crate::authz)).

use super::{CategoryId, MenuItemId, RestaurantId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuCategory {
    pub id: CategoryId,
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub restaurant_id: RestaurantId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone)]
pub enum CategoryFilter {
    ByRestaurant(RestaurantId),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    /// Current list price. Orders copy it at placement time.
    pub price: Decimal,
    pub image_url: String,
    pub is_available: bool,
    pub is_veg: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMenuItemRequest {
    pub category_id: CategoryId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub is_veg: bool,
}

/// Replaces every editable field of a menu item.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMenuItemRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub is_veg: bool,
}

#[derive(Debug, Clone)]
pub enum MenuItemFilter {
    ByCategory(CategoryId),
}
