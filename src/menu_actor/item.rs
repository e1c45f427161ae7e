//! [`ActorEntity`] implementation for [`MenuItem`].

use super::error::MenuError;
use crate::framework::ActorEntity;
use crate::model::{CreateMenuItemRequest, MenuItem, MenuItemFilter, MenuItemId, UpdateMenuItemRequest};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::convert::Infallible;

fn require_name_and_price(name: &str, price: Decimal) -> Result<(), MenuError> {
    if name.trim().is_empty() || price <= Decimal::ZERO {
        return Err(MenuError::Validation(
            "name and valid price are required".into(),
        ));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for MenuItem {
    type Id = MenuItemId;
    type Create = CreateMenuItemRequest;
    type Update = UpdateMenuItemRequest;
    type Action = Infallible;
    type ActionResult = ();
    type Filter = MenuItemFilter;
    type Context = ();
    type Error = MenuError;

    /// New items start out available.
    fn from_create_params(id: MenuItemId, params: CreateMenuItemRequest) -> Result<Self, MenuError> {
        require_name_and_price(&params.name, params.price)?;
        let now = Utc::now();
        Ok(Self {
            id,
            category_id: params.category_id,
            name: params.name,
            description: params.description,
            price: params.price,
            image_url: params.image_url,
            is_available: true,
            is_veg: params.is_veg,
            created_at: now,
            updated_at: now,
        })
    }

    fn matches(&self, filter: &MenuItemFilter) -> bool {
        match filter {
            MenuItemFilter::ByCategory(category) => self.category_id == *category,
        }
    }

    /// Replaces the editable fields. Orders already placed keep the price
    /// they captured, so a price change here never reaches them.
    async fn on_update(&mut self, update: UpdateMenuItemRequest, _ctx: &()) -> Result<(), MenuError> {
        require_name_and_price(&update.name, update.price)?;
        self.name = update.name;
        self.description = update.description;
        self.price = update.price;
        self.image_url = update.image_url;
        self.is_available = update.is_available;
        self.is_veg = update.is_veg;
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), MenuError> {
        match action {}
    }
}
