//! [`ActorEntity`] implementation for [`Order`].

use super::actions::OrderAction;
use super::error::OrderError;
use crate::framework::ActorEntity;
use crate::model::{
    lines_subtotal, Order, OrderDraft, OrderFilter, OrderId, OrderItem, OrderItemId, OrderStatus,
    PaymentStatus,
};
use async_trait::async_trait;
use chrono::Utc;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderDraft;
    type Update = Infallible;
    type Action = OrderAction;
    type ActionResult = Order;
    type Filter = OrderFilter;
    type Context = ();
    type Error = OrderError;

    /// Materializes the header and every line in one step.
    ///
    /// The draft's money fields must agree with its lines; the store refuses
    /// to persist an order whose totals it cannot reproduce.
    fn from_create_params(id: OrderId, draft: OrderDraft) -> Result<Self, OrderError> {
        if draft.lines.is_empty() {
            return Err(OrderError::Validation(
                "order must contain at least one item".into(),
            ));
        }
        let subtotal = lines_subtotal(&draft.lines).ok_or_else(OrderError::total_out_of_range)?;
        let total = subtotal
            .checked_add(draft.delivery_fee)
            .ok_or_else(OrderError::total_out_of_range)?;
        if subtotal != draft.subtotal || total != draft.total_amount {
            return Err(OrderError::Validation(format!(
                "order totals do not add up: lines {subtotal}, subtotal {}, fee {}, total {}",
                draft.subtotal, draft.delivery_fee, draft.total_amount
            )));
        }

        let now = Utc::now();
        let items = draft
            .lines
            .into_iter()
            .zip(1..)
            .map(|(line, number)| OrderItem {
                id: OrderItemId {
                    order_id: id,
                    line: number,
                },
                order_id: id,
                menu_item_id: line.menu_item_id,
                quantity: line.quantity,
                price: line.price,
                created_at: now,
            })
            .collect();

        Ok(Self {
            id,
            customer_id: draft.customer_id,
            restaurant_id: draft.restaurant_id,
            status: OrderStatus::Pending,
            subtotal: draft.subtotal,
            delivery_fee: draft.delivery_fee,
            total_amount: draft.total_amount,
            delivery_address: draft.delivery_address,
            payment_method: draft.payment_method,
            payment_status: PaymentStatus::Pending,
            items,
            created_at: now,
            updated_at: now,
        })
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        match filter {
            OrderFilter::ByCustomer(customer) => self.customer_id == *customer,
            OrderFilter::ByRestaurant(restaurant) => self.restaurant_id == *restaurant,
        }
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), OrderError> {
        match update {}
    }

    async fn handle_action(&mut self, action: OrderAction, _ctx: &()) -> Result<Order, OrderError> {
        match action {
            OrderAction::SetStatus { expected, next } => {
                if self.status != expected {
                    return Err(OrderError::StaleStatus {
                        expected,
                        actual: self.status,
                    });
                }
                if self.status.is_terminal() {
                    return Err(OrderError::AlreadyFinal(self.status));
                }
                self.status = next;
                self.updated_at = Utc::now();
                Ok(self.clone())
            }
        }
    }
}
