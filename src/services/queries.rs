//! # Order Queries
//!
//! Read-only views over stored orders. Every view joins the order with its
//! restaurant's name and with the *current* display metadata of each menu
//! item. Prices come from the order lines, never from the menu.

use super::deadline::within;
use crate::authz::{OwnershipResolver, ResourceRef};
use crate::clients::{MenuItemClient, OrderClient, RestaurantClient};
use crate::framework::ActorClient;
use crate::model::{
    Identity, MenuItem, MenuItemId, Order, OrderDetails, OrderFilter, OrderId, OrderItemDetails,
    RestaurantId, UserId,
};
use crate::order_actor::OrderError;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct OrderQueries {
    orders: OrderClient,
    restaurants: RestaurantClient,
    items: MenuItemClient,
    resolver: OwnershipResolver,
    deadline: Duration,
}

fn store_failed(e: impl std::fmt::Display) -> OrderError {
    OrderError::Unavailable(e.to_string())
}

/// Newest first; ids break ties between orders created in the same instant.
fn newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

impl OrderQueries {
    pub fn new(
        orders: OrderClient,
        restaurants: RestaurantClient,
        items: MenuItemClient,
        resolver: OwnershipResolver,
        deadline: Duration,
    ) -> Self {
        Self {
            orders,
            restaurants,
            items,
            resolver,
            deadline,
        }
    }

    /// A single order, visible only to the customer who placed it.
    #[instrument(skip(self), fields(user = %who.user_id))]
    pub async fn get_by_id(&self, who: &Identity, id: OrderId) -> Result<OrderDetails, OrderError> {
        within(self.deadline, "get_order", async {
            let order = self.load(id).await?;
            OwnershipResolver::ensure_customer(who, &order)?;
            self.single(order).await
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn list_by_customer(&self, customer: UserId) -> Result<Vec<OrderDetails>, OrderError> {
        within(self.deadline, "list_customer_orders", async {
            let orders = self
                .orders
                .list(OrderFilter::ByCustomer(customer))
                .await?;
            self.assemble(orders).await
        })
        .await
    }

    /// Orders received by a restaurant, for its owner.
    #[instrument(skip(self), fields(user = %who.user_id))]
    pub async fn list_by_restaurant(
        &self,
        who: &Identity,
        restaurant: RestaurantId,
    ) -> Result<Vec<OrderDetails>, OrderError> {
        within(self.deadline, "list_restaurant_orders", async {
            self.resolver
                .authorize(who, ResourceRef::Restaurant(restaurant))
                .await?;
            let orders = self
                .orders
                .list(OrderFilter::ByRestaurant(restaurant))
                .await?;
            self.assemble(orders).await
        })
        .await
    }

    /// Builds the view of an order without an identity check. Used right
    /// after placement, when the caller is known to be the customer.
    pub(crate) async fn details_of(&self, id: OrderId) -> Result<OrderDetails, OrderError> {
        let order = self.load(id).await?;
        self.single(order).await
    }

    async fn load(&self, id: OrderId) -> Result<Order, OrderError> {
        self.orders
            .get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    async fn single(&self, order: Order) -> Result<OrderDetails, OrderError> {
        let mut views = self.assemble(vec![order]).await?;
        views.pop().ok_or_else(|| store_failed("order view was not assembled"))
    }

    async fn assemble(&self, mut orders: Vec<Order>) -> Result<Vec<OrderDetails>, OrderError> {
        newest_first(&mut orders);

        let mut names: HashMap<RestaurantId, String> = HashMap::new();
        let mut menu: HashMap<MenuItemId, Option<MenuItem>> = HashMap::new();
        let mut views = Vec::with_capacity(orders.len());

        for order in orders {
            let restaurant_name = match names.get(&order.restaurant_id) {
                Some(name) => name.clone(),
                None => {
                    let restaurant = self
                        .restaurants
                        .get(order.restaurant_id)
                        .await
                        .map_err(store_failed)?
                        .ok_or(OrderError::RestaurantNotFound(order.restaurant_id))?;
                    names.insert(restaurant.id, restaurant.name.clone());
                    restaurant.name
                }
            };

            let mut items = Vec::with_capacity(order.items.len());
            for line in &order.items {
                if !menu.contains_key(&line.menu_item_id) {
                    let current = self
                        .items
                        .get(line.menu_item_id)
                        .await
                        .map_err(store_failed)?;
                    if current.is_none() {
                        debug!(menu_item = %line.menu_item_id, "Menu item no longer exists");
                    }
                    menu.insert(line.menu_item_id, current);
                }
                let current = menu.get(&line.menu_item_id).and_then(Option::as_ref);
                items.push(OrderItemDetails {
                    item: line.clone(),
                    item_name: current.map(|m| m.name.clone()),
                    item_image: current.map(|m| m.image_url.clone()),
                    is_veg: current.map(|m| m.is_veg),
                });
            }

            views.push(OrderDetails {
                order,
                restaurant_name,
                items,
            });
        }
        Ok(views)
    }
}
