//! # Order Builder
//!
//! Turns a customer's request into a stored order. Every check runs before
//! the first write, and the write itself is a single message carrying the
//! header and all of its lines, so a rejected request leaves nothing behind.
//!
//! Checks run in this order and stop at the first failure:
//!
//! 1. the request names a restaurant, has lines, an address and a payment method
//! 2. the restaurant exists and is accepting orders
//! 3. each line has a positive quantity
//! 4. each line's menu item exists
//! 5. each line's menu item is available
//!
//! Prices are copied from the menu at this point and never looked up again.
//!
//! Only validation and the write run under the call's deadline. Once the
//! store has accepted the order the call succeeds: if re-reading the stored
//! order stalls, the view is built from the draft instead. The one window
//! left is a store reply that arrives after the deadline, where the order is
//! kept but the caller sees `Unavailable`.

use super::deadline::within;
use super::queries::OrderQueries;
use crate::clients::{MenuItemClient, OrderClient, RestaurantClient};
use crate::framework::{ActorClient, ActorEntity};
use crate::model::{
    lines_subtotal, CreateOrderRequest, Identity, MenuItem, Order, OrderDetails, OrderDraft,
    OrderId, OrderItemDetails, PricedLine, UserId,
};
use crate::order_actor::OrderError;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct OrderBuilder {
    restaurants: RestaurantClient,
    items: MenuItemClient,
    orders: OrderClient,
    queries: OrderQueries,
    delivery_fee: Decimal,
    deadline: Duration,
}

/// A priced draft together with the catalog records it was priced from.
struct Quote {
    draft: OrderDraft,
    restaurant_name: String,
    menu: Vec<MenuItem>,
}

impl Quote {
    /// The order as the store materialized it from this draft. Timestamps
    /// come from the local clock.
    fn into_view(self, id: OrderId) -> Result<OrderDetails, OrderError> {
        let order = Order::from_create_params(id, self.draft)?;
        let items = order
            .items
            .iter()
            .zip(&self.menu)
            .map(|(line, item)| OrderItemDetails {
                item: line.clone(),
                item_name: Some(item.name.clone()),
                item_image: Some(item.image_url.clone()),
                is_veg: Some(item.is_veg),
            })
            .collect();
        Ok(OrderDetails {
            order,
            restaurant_name: self.restaurant_name,
            items,
        })
    }
}

fn store_failed(e: impl std::fmt::Display) -> OrderError {
    OrderError::Unavailable(e.to_string())
}

fn required(value: &str, message: &str) -> Result<(), OrderError> {
    if value.trim().is_empty() {
        return Err(OrderError::Validation(message.to_string()));
    }
    Ok(())
}

impl OrderBuilder {
    pub fn new(
        restaurants: RestaurantClient,
        items: MenuItemClient,
        orders: OrderClient,
        queries: OrderQueries,
        delivery_fee: Decimal,
        deadline: Duration,
    ) -> Self {
        Self {
            restaurants,
            items,
            orders,
            queries,
            delivery_fee,
            deadline,
        }
    }

    /// Validates, prices and stores the order, then returns it as the
    /// customer will see it.
    #[instrument(skip(self, request), fields(user = %who.user_id))]
    pub async fn place_order(
        &self,
        who: &Identity,
        request: CreateOrderRequest,
    ) -> Result<OrderDetails, OrderError> {
        let (id, quote) = within(self.deadline, "place_order", async {
            let quote = self.quote(who.user_id, request).await?;
            let id = self.orders.place(quote.draft.clone()).await?;
            Ok::<_, OrderError>((id, quote))
        })
        .await?;
        info!(order = %id, total = %quote.draft.total_amount, "Order placed");

        match within(self.deadline, "read_placed_order", self.queries.details_of(id)).await {
            Ok(view) => Ok(view),
            Err(e) => {
                warn!(order = %id, error = %e, "Re-read failed, answering from the draft");
                quote.into_view(id)
            }
        }
    }

    /// Runs every check and prices the lines without writing anything.
    pub async fn draft(
        &self,
        customer: UserId,
        request: CreateOrderRequest,
    ) -> Result<OrderDraft, OrderError> {
        self.quote(customer, request).await.map(|quote| quote.draft)
    }

    async fn quote(
        &self,
        customer: UserId,
        request: CreateOrderRequest,
    ) -> Result<Quote, OrderError> {
        let restaurant_id = request
            .restaurant_id
            .ok_or_else(|| OrderError::Validation("restaurant_id is required".into()))?;
        if request.items.is_empty() {
            return Err(OrderError::Validation(
                "order must contain at least one item".into(),
            ));
        }
        required(&request.delivery_address, "delivery_address is required")?;
        required(&request.payment_method, "payment_method is required")?;

        let restaurant = self
            .restaurants
            .get(restaurant_id)
            .await
            .map_err(store_failed)?
            .ok_or(OrderError::RestaurantNotFound(restaurant_id))?;
        if !restaurant.is_active {
            return Err(OrderError::RestaurantUnavailable(restaurant_id));
        }

        let mut lines = Vec::with_capacity(request.items.len());
        let mut menu = Vec::with_capacity(request.items.len());
        for line in &request.items {
            let quantity = u32::try_from(line.quantity)
                .ok()
                .filter(|q| *q > 0)
                .ok_or(OrderError::InvalidQuantity {
                    menu_item_id: line.menu_item_id,
                    quantity: line.quantity,
                })?;

            let item = self
                .items
                .get(line.menu_item_id)
                .await
                .map_err(store_failed)?
                .ok_or(OrderError::ItemNotFound(line.menu_item_id))?;
            if !item.is_available {
                return Err(OrderError::ItemUnavailable {
                    menu_item_id: item.id,
                    name: item.name,
                });
            }

            lines.push(PricedLine {
                menu_item_id: item.id,
                quantity,
                price: item.price,
            });
            menu.push(item);
        }

        let subtotal = lines_subtotal(&lines).ok_or_else(OrderError::total_out_of_range)?;
        let total_amount = subtotal
            .checked_add(self.delivery_fee)
            .ok_or_else(OrderError::total_out_of_range)?;
        debug!(lines = lines.len(), %subtotal, "Order priced");

        Ok(Quote {
            draft: OrderDraft {
                customer_id: customer,
                restaurant_id,
                lines,
                subtotal,
                delivery_fee: self.delivery_fee,
                total_amount,
                delivery_address: request.delivery_address,
                payment_method: request.payment_method,
            },
            restaurant_name: restaurant.name,
            menu,
        })
    }
}
