//! # Catalog Service
//!
//! Restaurants, menu categories and menu items. Reads are public; every
//! write requires the `restaurant_owner` role and ownership of the
//! restaurant the target belongs to.
//!
//! Deletes are refused while children still reference the target: a
//! restaurant with categories or orders, a category with items. The check
//! runs inside the owning store's delete hook.

use super::deadline::{within, DeadlineExceeded};
use crate::authz::{AuthzError, OwnershipResolver, ResourceRef};
use crate::clients::{CategoryClient, MenuItemClient, RestaurantClient};
use crate::error::ErrorKind;
use crate::framework::ActorClient;
use crate::menu_actor::MenuError;
use crate::model::{
    CategoryFilter, CategoryId, CreateCategoryRequest, CreateMenuItemRequest,
    CreateRestaurantRequest, Identity, MenuCategory, MenuItem, MenuItemFilter, MenuItemId,
    Restaurant, RestaurantCreate, RestaurantFilter, RestaurantId, UpdateMenuItemRequest,
    UpdateRestaurantRequest,
};
use crate::restaurant_actor::RestaurantError;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error(transparent)]
    Restaurant(#[from] RestaurantError),

    #[error(transparent)]
    Menu(#[from] MenuError),

    #[error("{}", .0.public_message())]
    Access(#[from] AuthzError),

    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Restaurant(inner) => inner.kind(),
            CatalogError::Menu(inner) => inner.kind(),
            CatalogError::Access(inner) => inner.kind(),
            CatalogError::Unavailable(_) => ErrorKind::Unavailable,
        }
    }
}

impl From<DeadlineExceeded> for CatalogError {
    fn from(e: DeadlineExceeded) -> Self {
        CatalogError::Unavailable(e.to_string())
    }
}

#[derive(Clone)]
pub struct CatalogService {
    restaurants: RestaurantClient,
    categories: CategoryClient,
    items: MenuItemClient,
    resolver: OwnershipResolver,
    deadline: Duration,
}

impl CatalogService {
    pub fn new(
        restaurants: RestaurantClient,
        categories: CategoryClient,
        items: MenuItemClient,
        resolver: OwnershipResolver,
        deadline: Duration,
    ) -> Self {
        Self {
            restaurants,
            categories,
            items,
            resolver,
            deadline,
        }
    }

    // --- Restaurants ---

    /// Opens a restaurant owned by `who`. New restaurants accept orders
    /// immediately.
    #[instrument(skip(self, request), fields(user = %who.user_id))]
    pub async fn create_restaurant(
        &self,
        who: &Identity,
        request: CreateRestaurantRequest,
    ) -> Result<Restaurant, CatalogError> {
        within(self.deadline, "create_restaurant", async {
            OwnershipResolver::require_owner_role(who)?;
            let id = self
                .restaurants
                .create_restaurant(RestaurantCreate {
                    owner_id: who.user_id,
                    request,
                })
                .await?;
            info!(restaurant = %id, "Restaurant created");
            Ok(self.restaurant(id).await?)
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_restaurant(&self, id: RestaurantId) -> Result<Restaurant, CatalogError> {
        within(self.deadline, "get_restaurant", async {
            Ok(self.restaurant(id).await?)
        })
        .await
    }

    /// Active restaurants, best rated first. `city` matches case-insensitively;
    /// a blank city means every city.
    #[instrument(skip(self))]
    pub async fn list_restaurants(
        &self,
        city: Option<&str>,
    ) -> Result<Vec<Restaurant>, CatalogError> {
        let city = city
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        within(self.deadline, "list_restaurants", async {
            let mut found = self
                .restaurants
                .list(RestaurantFilter::Active { city })
                .await?;
            found.sort_by(|a, b| {
                b.rating
                    .total_cmp(&a.rating)
                    .then_with(|| b.created_at.cmp(&a.created_at))
                    .then_with(|| a.id.cmp(&b.id))
            });
            Ok(found)
        })
        .await
    }

    /// Every restaurant `who` owns, including inactive ones, newest first.
    #[instrument(skip(self), fields(user = %who.user_id))]
    pub async fn list_my_restaurants(
        &self,
        who: &Identity,
    ) -> Result<Vec<Restaurant>, CatalogError> {
        within(self.deadline, "list_my_restaurants", async {
            OwnershipResolver::require_owner_role(who)?;
            let mut found = self
                .restaurants
                .list(RestaurantFilter::ByOwner(who.user_id))
                .await?;
            found.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then_with(|| b.id.cmp(&a.id))
            });
            Ok(found)
        })
        .await
    }

    #[instrument(skip(self, update), fields(user = %who.user_id))]
    pub async fn update_restaurant(
        &self,
        who: &Identity,
        id: RestaurantId,
        update: UpdateRestaurantRequest,
    ) -> Result<Restaurant, CatalogError> {
        within(self.deadline, "update_restaurant", async {
            self.resolver
                .authorize(who, ResourceRef::Restaurant(id))
                .await?;
            let updated = self.restaurants.update_restaurant(id, update).await?;
            info!(restaurant = %id, active = updated.is_active, "Restaurant updated");
            Ok(updated)
        })
        .await
    }

    #[instrument(skip(self), fields(user = %who.user_id))]
    pub async fn delete_restaurant(
        &self,
        who: &Identity,
        id: RestaurantId,
    ) -> Result<(), CatalogError> {
        within(self.deadline, "delete_restaurant", async {
            self.resolver
                .authorize(who, ResourceRef::Restaurant(id))
                .await?;
            self.restaurants.delete(id).await?;
            info!(restaurant = %id, "Restaurant deleted");
            Ok(())
        })
        .await
    }

    // --- Categories ---

    #[instrument(skip(self, request), fields(user = %who.user_id))]
    pub async fn create_category(
        &self,
        who: &Identity,
        request: CreateCategoryRequest,
    ) -> Result<MenuCategory, CatalogError> {
        within(self.deadline, "create_category", async {
            self.resolver
                .authorize(who, ResourceRef::Restaurant(request.restaurant_id))
                .await?;
            let id = self.categories.create_category(request).await?;
            info!(category = %id, "Category created");
            Ok(self.category(id).await?)
        })
        .await
    }

    /// A restaurant's categories by display order, then name.
    #[instrument(skip(self))]
    pub async fn list_categories(
        &self,
        restaurant: RestaurantId,
    ) -> Result<Vec<MenuCategory>, CatalogError> {
        within(self.deadline, "list_categories", async {
            let mut found = self
                .categories
                .list(CategoryFilter::ByRestaurant(restaurant))
                .await?;
            found.sort_by(|a, b| {
                a.display_order
                    .cmp(&b.display_order)
                    .then_with(|| a.name.cmp(&b.name))
                    .then_with(|| a.id.cmp(&b.id))
            });
            Ok(found)
        })
        .await
    }

    #[instrument(skip(self), fields(user = %who.user_id))]
    pub async fn delete_category(&self, who: &Identity, id: CategoryId) -> Result<(), CatalogError> {
        within(self.deadline, "delete_category", async {
            self.resolver.authorize(who, ResourceRef::Category(id)).await?;
            self.categories.delete(id).await?;
            info!(category = %id, "Category deleted");
            Ok(())
        })
        .await
    }

    // --- Menu items ---

    #[instrument(skip(self, request), fields(user = %who.user_id))]
    pub async fn create_menu_item(
        &self,
        who: &Identity,
        request: CreateMenuItemRequest,
    ) -> Result<MenuItem, CatalogError> {
        within(self.deadline, "create_menu_item", async {
            self.resolver
                .authorize(who, ResourceRef::Category(request.category_id))
                .await?;
            let id = self.items.create_item(request).await?;
            info!(menu_item = %id, "Menu item created");
            Ok(self.item(id).await?)
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_menu_item(&self, id: MenuItemId) -> Result<MenuItem, CatalogError> {
        within(self.deadline, "get_menu_item", async { Ok(self.item(id).await?) }).await
    }

    /// A category's items, oldest first.
    #[instrument(skip(self))]
    pub async fn list_menu_items(
        &self,
        category: CategoryId,
    ) -> Result<Vec<MenuItem>, CatalogError> {
        within(self.deadline, "list_menu_items", async {
            let mut found = self.items.list(MenuItemFilter::ByCategory(category)).await?;
            found.sort_by(|a, b| {
                a.created_at
                    .cmp(&b.created_at)
                    .then_with(|| a.id.cmp(&b.id))
            });
            Ok(found)
        })
        .await
    }

    /// Replaces an item's editable fields. Orders already placed keep the
    /// price they were placed at.
    #[instrument(skip(self, update), fields(user = %who.user_id))]
    pub async fn update_menu_item(
        &self,
        who: &Identity,
        id: MenuItemId,
        update: UpdateMenuItemRequest,
    ) -> Result<MenuItem, CatalogError> {
        within(self.deadline, "update_menu_item", async {
            self.resolver.authorize(who, ResourceRef::MenuItem(id)).await?;
            let updated = self.items.update_item(id, update).await?;
            info!(menu_item = %id, price = %updated.price, "Menu item updated");
            Ok(updated)
        })
        .await
    }

    #[instrument(skip(self), fields(user = %who.user_id))]
    pub async fn delete_menu_item(&self, who: &Identity, id: MenuItemId) -> Result<(), CatalogError> {
        within(self.deadline, "delete_menu_item", async {
            self.resolver.authorize(who, ResourceRef::MenuItem(id)).await?;
            self.items.delete(id).await?;
            info!(menu_item = %id, "Menu item deleted");
            Ok(())
        })
        .await
    }

    async fn restaurant(&self, id: RestaurantId) -> Result<Restaurant, RestaurantError> {
        self.restaurants
            .get(id)
            .await?
            .ok_or_else(|| RestaurantError::NotFound(id.to_string()))
    }

    async fn category(&self, id: CategoryId) -> Result<MenuCategory, MenuError> {
        self.categories
            .get(id)
            .await?
            .ok_or_else(|| MenuError::CategoryNotFound(id.to_string()))
    }

    async fn item(&self, id: MenuItemId) -> Result<MenuItem, MenuError> {
        self.items
            .get(id)
            .await?
            .ok_or_else(|| MenuError::ItemNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;
    use crate::framework::FrameworkError;
    use crate::model::UserId;
    use chrono::{Duration as Age, Utc};

    struct Stores {
        restaurants: MockClient<Restaurant>,
        categories: MockClient<MenuCategory>,
        items: MockClient<MenuItem>,
    }

    impl Stores {
        fn new() -> Self {
            Self {
                restaurants: MockClient::new(),
                categories: MockClient::new(),
                items: MockClient::new(),
            }
        }

        fn catalog(&self) -> CatalogService {
            let restaurants = RestaurantClient::new(self.restaurants.client());
            let categories = CategoryClient::new(self.categories.client());
            let items = MenuItemClient::new(self.items.client());
            let resolver =
                OwnershipResolver::new(restaurants.clone(), categories.clone(), items.clone());
            CatalogService::new(
                restaurants,
                categories,
                items,
                resolver,
                Duration::from_secs(5),
            )
        }

        fn verify(&self) {
            self.restaurants.verify();
            self.categories.verify();
            self.items.verify();
        }
    }

    fn restaurant(id: u32, rating: f64, minutes_ago: i64) -> Restaurant {
        let created = Utc::now() - Age::minutes(minutes_ago);
        Restaurant {
            id: RestaurantId(id),
            owner_id: UserId(50),
            name: format!("Restaurant {id}"),
            description: String::new(),
            address: "1 High St".into(),
            city: "Pune".into(),
            image_url: String::new(),
            is_active: true,
            rating,
            created_at: created,
            updated_at: created,
        }
    }

    fn category(id: u32, order: i32, name: &str) -> MenuCategory {
        MenuCategory {
            id: CategoryId(id),
            restaurant_id: RestaurantId(1),
            name: name.into(),
            display_order: order,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_public_listing_puts_best_rated_first() {
        let mut stores = Stores::new();
        stores.restaurants.expect_list().return_ok(vec![
            restaurant(1, 3.5, 10),
            restaurant(2, 4.8, 20),
            restaurant(3, 4.8, 5),
        ]);

        let found = stores.catalog().list_restaurants(Some("  ")).await.unwrap();
        let ids: Vec<RestaurantId> = found.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![RestaurantId(3), RestaurantId(2), RestaurantId(1)]);
        stores.verify();
    }

    #[tokio::test]
    async fn test_categories_follow_display_order() {
        let mut stores = Stores::new();
        stores.categories.expect_list().return_ok(vec![
            category(1, 2, "Mains"),
            category(2, 1, "Starters"),
            category(3, 1, "Soups"),
        ]);

        let found = stores.catalog().list_categories(RestaurantId(1)).await.unwrap();
        let names: Vec<&str> = found.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Soups", "Starters", "Mains"]);
        stores.verify();
    }

    #[tokio::test]
    async fn test_customers_cannot_open_restaurants() {
        let stores = Stores::new();
        let err = stores
            .catalog()
            .create_restaurant(
                &Identity::customer(UserId(7)),
                CreateRestaurantRequest::default(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        stores.verify();
    }

    #[tokio::test]
    async fn test_item_under_foreign_restaurant_cannot_be_edited() {
        let now = Utc::now();
        let mut stores = Stores::new();
        stores.items.expect_get(MenuItemId(9)).return_ok(Some(MenuItem {
            id: MenuItemId(9),
            category_id: CategoryId(1),
            name: "Samosa".into(),
            description: String::new(),
            price: rust_decimal::Decimal::new(4000, 2),
            image_url: String::new(),
            is_available: true,
            is_veg: true,
            created_at: now,
            updated_at: now,
        }));
        stores
            .categories
            .expect_get(CategoryId(1))
            .return_ok(Some(category(1, 1, "Starters")));
        stores
            .restaurants
            .expect_get(RestaurantId(1))
            .return_ok(Some(restaurant(1, 4.0, 0)));

        let err = stores
            .catalog()
            .delete_menu_item(&Identity::owner(UserId(51)), MenuItemId(9))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "unauthorized: you don't own this restaurant");
        stores.verify();
    }

    #[tokio::test]
    async fn test_delete_refusal_is_a_conflict() {
        let mut stores = Stores::new();
        stores
            .restaurants
            .expect_get(RestaurantId(1))
            .return_ok(Some(restaurant(1, 4.0, 0)));
        stores
            .restaurants
            .expect_delete(RestaurantId(1))
            .return_err(FrameworkError::EntityError(Box::new(
                RestaurantError::HasCategories {
                    restaurant: RestaurantId(1),
                    count: 2,
                },
            )));

        let err = stores
            .catalog()
            .delete_restaurant(&Identity::owner(UserId(50)), RestaurantId(1))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        stores.verify();
    }

    #[tokio::test]
    async fn test_missing_restaurant_is_not_found() {
        let mut stores = Stores::new();
        stores.restaurants.expect_get(RestaurantId(4)).return_ok(None);

        let err = stores.catalog().get_restaurant(RestaurantId(4)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        stores.verify();
    }
}
