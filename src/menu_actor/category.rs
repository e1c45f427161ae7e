//! [`ActorEntity`] implementation for [`MenuCategory`].

use super::error::MenuError;
use crate::clients::MenuItemClient;
use crate::framework::{ActorClient, ActorEntity};
use crate::model::{CategoryFilter, CategoryId, CreateCategoryRequest, MenuCategory, MenuItemFilter};
use async_trait::async_trait;
use chrono::Utc;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for MenuCategory {
    type Id = CategoryId;
    type Create = CreateCategoryRequest;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Filter = CategoryFilter;
    /// Item store, consulted before a category is deleted.
    type Context = MenuItemClient;
    type Error = MenuError;

    fn from_create_params(id: CategoryId, params: CreateCategoryRequest) -> Result<Self, MenuError> {
        if params.name.trim().is_empty() {
            return Err(MenuError::Validation("category name is required".into()));
        }
        Ok(Self {
            id,
            restaurant_id: params.restaurant_id,
            name: params.name,
            display_order: params.display_order,
            created_at: Utc::now(),
        })
    }

    fn matches(&self, filter: &CategoryFilter) -> bool {
        match filter {
            CategoryFilter::ByRestaurant(restaurant) => self.restaurant_id == *restaurant,
        }
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &MenuItemClient) -> Result<(), MenuError> {
        match update {}
    }

    async fn on_delete(&self, items: &MenuItemClient) -> Result<(), MenuError> {
        let remaining = items
            .list(MenuItemFilter::ByCategory(self.id))
            .await
            .map_err(|e| MenuError::Unavailable(e.to_string()))?;
        if !remaining.is_empty() {
            return Err(MenuError::HasItems {
                category: self.id,
                count: remaining.len(),
            });
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &MenuItemClient) -> Result<(), MenuError> {
        match action {}
    }
}
