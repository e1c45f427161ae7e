//! Orders, their line items and the read-side views built from them.

use super::{MenuItemId, OrderId, OrderItemId, RestaurantId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Position of an order in the delivery lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    OutForDelivery,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid order status: {0:?}")]
pub struct ParseStatusError(pub String);

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// No transition leaves a terminal status.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Customers may only cancel before the kitchen starts.
    pub fn is_cancellable(self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }

    /// Forward position on the delivery path. `Cancelled` sits off the path.
    fn step(self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::Confirmed => Some(1),
            OrderStatus::Preparing => Some(2),
            OrderStatus::Ready => Some(3),
            OrderStatus::OutForDelivery => Some(4),
            OrderStatus::Delivered => Some(5),
            OrderStatus::Cancelled => None,
        }
    }

    /// Whether the policy allows moving from `self` to `next`.
    ///
    /// Terminal sources are always refused. Lenient mode accepts any target;
    /// strict mode accepts the next step on the delivery path or `Cancelled`.
    pub fn permits(self, next: OrderStatus, strict: bool) -> bool {
        if self.is_terminal() {
            return false;
        }
        if !strict || next == OrderStatus::Cancelled {
            return true;
        }
        match (self.step(), next.step()) {
            (Some(from), Some(to)) => to == from + 1,
            _ => false,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

/// One requested line of a new order.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineRequest {
    pub menu_item_id: MenuItemId,
    pub quantity: i32,
}

/// Body of a place-order request, before any validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateOrderRequest {
    pub restaurant_id: Option<RestaurantId>,
    pub items: Vec<OrderLineRequest>,
    pub delivery_address: String,
    pub payment_method: String,
}

/// A validated line with its price captured from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
    pub price: Decimal,
}

impl PricedLine {
    /// `None` when the product does not fit in a `Decimal`.
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Sums the line totals, or `None` if any step overflows.
pub fn lines_subtotal(lines: &[PricedLine]) -> Option<Decimal> {
    lines
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.line_total()?))
}

/// A fully priced order ready to be stored. Header and lines travel in one
/// message, so the store inserts them together or not at all.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub customer_id: UserId,
    pub restaurant_id: RestaurantId,
    pub lines: Vec<PricedLine>,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub total_amount: Decimal,
    pub delivery_address: String,
    pub payment_method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: UserId,
    pub restaurant_id: RestaurantId,
    pub status: OrderStatus,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub total_amount: Decimal,
    pub delivery_address: String,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    /// Rendered through [`OrderDetails`] with live menu metadata attached.
    #[serde(skip)]
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
    /// Unit price at the moment the order was placed.
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum OrderFilter {
    ByCustomer(UserId),
    ByRestaurant(RestaurantId),
}

/// An order with its restaurant name and per-line menu metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: Order,
    pub restaurant_name: String,
    pub items: Vec<OrderItemDetails>,
}

/// A line item joined with the menu item as it is now. The metadata is
/// `None` when the menu item has since been deleted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItemDetails {
    #[serde(flatten)]
    pub item: OrderItem,
    pub item_name: Option<String>,
    pub item_image: Option<String>,
    pub is_veg: Option<bool>,
}
