//! [`ActorEntity`] implementation for [`Restaurant`].

use super::error::RestaurantError;
use crate::clients::{CategoryClient, OrderClient};
use crate::framework::{ActorClient, ActorEntity};
use crate::model::{
    CategoryFilter, OrderFilter, Restaurant, RestaurantCreate, RestaurantFilter, RestaurantId,
    UpdateRestaurantRequest,
};
use async_trait::async_trait;
use chrono::Utc;
use std::convert::Infallible;

/// Stores consulted before a restaurant may be deleted.
#[derive(Clone)]
pub struct RestaurantContext {
    pub categories: CategoryClient,
    pub orders: OrderClient,
}

fn require_listing_fields(name: &str, address: &str, city: &str) -> Result<(), RestaurantError> {
    if [name, address, city].iter().any(|field| field.trim().is_empty()) {
        return Err(RestaurantError::Validation(
            "name, address and city are required".into(),
        ));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Restaurant {
    type Id = RestaurantId;
    type Create = RestaurantCreate;
    type Update = UpdateRestaurantRequest;
    type Action = Infallible;
    type ActionResult = ();
    type Filter = RestaurantFilter;
    type Context = RestaurantContext;
    type Error = RestaurantError;

    /// New restaurants open immediately with no rating.
    fn from_create_params(id: RestaurantId, params: RestaurantCreate) -> Result<Self, RestaurantError> {
        let request = params.request;
        require_listing_fields(&request.name, &request.address, &request.city)?;
        let now = Utc::now();
        Ok(Self {
            id,
            owner_id: params.owner_id,
            name: request.name,
            description: request.description,
            address: request.address,
            city: request.city,
            image_url: request.image_url,
            is_active: true,
            rating: 0.0,
            created_at: now,
            updated_at: now,
        })
    }

    fn matches(&self, filter: &RestaurantFilter) -> bool {
        match filter {
            RestaurantFilter::Active { city } => {
                self.is_active
                    && city
                        .as_deref()
                        .map_or(true, |city| self.city.to_lowercase() == city.to_lowercase())
            }
            RestaurantFilter::ByOwner(owner) => self.owner_id == *owner,
        }
    }

    async fn on_update(
        &mut self,
        update: UpdateRestaurantRequest,
        _ctx: &RestaurantContext,
    ) -> Result<(), RestaurantError> {
        require_listing_fields(&update.name, &update.address, &update.city)?;
        self.name = update.name;
        self.description = update.description;
        self.address = update.address;
        self.city = update.city;
        self.image_url = update.image_url;
        self.is_active = update.is_active;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Refuses while categories or orders still point at this restaurant.
    async fn on_delete(&self, ctx: &RestaurantContext) -> Result<(), RestaurantError> {
        let categories = ctx
            .categories
            .list(CategoryFilter::ByRestaurant(self.id))
            .await
            .map_err(|e| RestaurantError::Unavailable(e.to_string()))?;
        if !categories.is_empty() {
            return Err(RestaurantError::HasCategories {
                restaurant: self.id,
                count: categories.len(),
            });
        }

        let orders = ctx
            .orders
            .list(OrderFilter::ByRestaurant(self.id))
            .await
            .map_err(|e| RestaurantError::Unavailable(e.to_string()))?;
        if !orders.is_empty() {
            return Err(RestaurantError::HasOrders {
                restaurant: self.id,
                count: orders.len(),
            });
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: Infallible,
        _ctx: &RestaurantContext,
    ) -> Result<(), RestaurantError> {
        match action {}
    }
}
