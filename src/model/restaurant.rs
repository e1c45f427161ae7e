//! A restaurant listed on the marketplace.
//!
//! # Actor Framework
//! Managed by a [`ResourceActor`](crate::framework::ResourceActor); see
//! [`restaurant_actor`](crate::restaurant_actor) for the entity hooks.

use super::{RestaurantId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub image_url: String,
    /// Inactive restaurants are hidden from public listings and refuse orders.
    pub is_active: bool,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of a create-restaurant request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub image_url: String,
}

/// Payload for the restaurant store: the request plus its verified owner.
#[derive(Debug, Clone)]
pub struct RestaurantCreate {
    pub owner_id: UserId,
    pub request: CreateRestaurantRequest,
}

/// Body of an update-restaurant request. Replaces every editable field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateRestaurantRequest {
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub image_url: String,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub enum RestaurantFilter {
    /// Public listing: active restaurants, optionally in one city (case-insensitive).
    Active { city: Option<String> },
    ByOwner(UserId),
}
