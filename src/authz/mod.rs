//! # Ownership Resolution
//!
//! Every mutation of the catalog, and every owner-side order operation, is
//! gated on one question: which user owns the restaurant at the top of this
//! resource's chain? [`OwnershipResolver`] answers it by walking
//! item → category → restaurant, reporting which link broke if the walk
//! fails.

pub mod error;

pub use error::*;

use crate::clients::{CategoryClient, MenuItemClient, RestaurantClient};
use crate::framework::ActorClient;
use crate::model::{
    CategoryId, Identity, MenuItemId, Order, Restaurant, RestaurantId, Role, UserId,
};
use tracing::{debug, instrument, warn};

/// A resource whose ownership is decided by its restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceRef {
    Restaurant(RestaurantId),
    Category(CategoryId),
    MenuItem(MenuItemId),
}

/// The restaurant at the top of a resolved chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Ownership {
    pub owner: UserId,
    pub restaurant: Restaurant,
}

#[derive(Clone)]
pub struct OwnershipResolver {
    restaurants: RestaurantClient,
    categories: CategoryClient,
    items: MenuItemClient,
}

fn lookup_failed(e: impl std::fmt::Display) -> AuthzError {
    AuthzError::Unavailable(e.to_string())
}

impl OwnershipResolver {
    pub fn new(
        restaurants: RestaurantClient,
        categories: CategoryClient,
        items: MenuItemClient,
    ) -> Self {
        Self {
            restaurants,
            categories,
            items,
        }
    }

    /// Walks the chain above `resource` up to its restaurant.
    #[instrument(skip(self))]
    pub async fn resolve_owner(&self, resource: ResourceRef) -> Result<Ownership, AuthzError> {
        let restaurant_id = match resource {
            ResourceRef::Restaurant(id) => id,
            ResourceRef::Category(id) => self.category_parent(id).await?,
            ResourceRef::MenuItem(id) => {
                let category = self.item_parent(id).await?;
                self.category_parent(category).await?
            }
        };

        let restaurant = self
            .restaurants
            .get(restaurant_id)
            .await
            .map_err(lookup_failed)?
            .ok_or_else(|| AuthzError::ParentNotFound {
                level: ChainLevel::Restaurant,
                id: restaurant_id.to_string(),
            })?;
        debug!(owner = %restaurant.owner_id, restaurant = %restaurant.id, "Resolved owner");

        Ok(Ownership {
            owner: restaurant.owner_id,
            restaurant,
        })
    }

    /// Resolves the owner and requires it to be `who`, acting as a restaurant owner.
    #[instrument(skip(self), fields(user = %who.user_id))]
    pub async fn authorize(
        &self,
        who: &Identity,
        resource: ResourceRef,
    ) -> Result<Ownership, AuthzError> {
        Self::require_owner_role(who)?;

        let ownership = self.resolve_owner(resource).await.inspect_err(|e| {
            warn!(error = %e, "Rejected: ownership chain did not resolve");
        })?;

        if ownership.owner != who.user_id {
            let err = AuthzError::NotOwner {
                user: who.user_id,
                restaurant: ownership.restaurant.id,
            };
            warn!(error = %err, "Rejected");
            return Err(err);
        }
        Ok(ownership)
    }

    pub fn require_owner_role(who: &Identity) -> Result<(), AuthzError> {
        if who.role != Role::RestaurantOwner {
            warn!(user = %who.user_id, role = %who.role, "Rejected: role may not manage restaurants");
            return Err(AuthzError::RoleNotPermitted { role: who.role });
        }
        Ok(())
    }

    /// Requires `who` to be the customer who placed `order`.
    pub fn ensure_customer(who: &Identity, order: &Order) -> Result<(), AuthzError> {
        if order.customer_id != who.user_id {
            let err = AuthzError::NotCustomer {
                user: who.user_id,
                order: order.id,
            };
            warn!(error = %err, "Rejected");
            return Err(err);
        }
        Ok(())
    }

    async fn item_parent(&self, id: MenuItemId) -> Result<CategoryId, AuthzError> {
        let item = self
            .items
            .get(id)
            .await
            .map_err(lookup_failed)?
            .ok_or_else(|| AuthzError::ParentNotFound {
                level: ChainLevel::MenuItem,
                id: id.to_string(),
            })?;
        Ok(item.category_id)
    }

    async fn category_parent(&self, id: CategoryId) -> Result<RestaurantId, AuthzError> {
        let category = self
            .categories
            .get(id)
            .await
            .map_err(lookup_failed)?
            .ok_or_else(|| AuthzError::ParentNotFound {
                level: ChainLevel::Category,
                id: id.to_string(),
            })?;
        Ok(category.restaurant_id)
    }
}
