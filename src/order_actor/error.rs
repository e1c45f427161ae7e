//! Error types for the Order actor and the services built on it.

use crate::authz::AuthzError;
use crate::error::ErrorKind;
use crate::model::{MenuItemId, OrderStatus, ParseStatusError, RestaurantId};
use crate::services::DeadlineExceeded;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The order data provided is invalid.
    #[error("{0}")]
    Validation(String),

    #[error("restaurant not found: {0}")]
    RestaurantNotFound(RestaurantId),

    #[error("restaurant is currently closed")]
    RestaurantUnavailable(RestaurantId),

    #[error("item quantity must be greater than 0")]
    InvalidQuantity { menu_item_id: MenuItemId, quantity: i32 },

    #[error("menu item not found: {0}")]
    ItemNotFound(MenuItemId),

    #[error("item is not available: {name}")]
    ItemUnavailable { menu_item_id: MenuItemId, name: String },

    #[error(transparent)]
    InvalidStatus(#[from] ParseStatusError),

    /// The requested order was not found.
    #[error("order not found: {0}")]
    NotFound(String),

    #[error("cannot update status of completed order ({0})")]
    AlreadyFinal(OrderStatus),

    #[error("cannot cancel order in current status ({0})")]
    NotCancellable(OrderStatus),

    /// Rejected by the strict transition policy.
    #[error("cannot move order from {from} to {to}")]
    TransitionNotAllowed { from: OrderStatus, to: OrderStatus },

    /// The status changed between the caller's read and its write.
    #[error("order status changed concurrently: expected {expected}, found {actual}")]
    StaleStatus {
        expected: OrderStatus,
        actual: OrderStatus,
    },

    #[error("{}", .0.public_message())]
    Access(#[from] AuthzError),

    /// An error occurred while communicating with the store.
    #[error("order store unavailable: {0}")]
    Unavailable(String),
}

impl OrderError {
    /// Line totals or the order total do not fit in a `Decimal`.
    pub fn total_out_of_range() -> Self {
        OrderError::Validation("order total is out of range".into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::Validation(_)
            | OrderError::InvalidQuantity { .. }
            | OrderError::InvalidStatus(_) => ErrorKind::ValidationFailed,
            OrderError::RestaurantNotFound(_)
            | OrderError::ItemNotFound(_)
            | OrderError::NotFound(_) => ErrorKind::NotFound,
            OrderError::RestaurantUnavailable(_)
            | OrderError::ItemUnavailable { .. }
            | OrderError::AlreadyFinal(_)
            | OrderError::NotCancellable(_)
            | OrderError::TransitionNotAllowed { .. }
            | OrderError::StaleStatus { .. } => ErrorKind::Conflict,
            OrderError::Access(inner) => inner.kind(),
            OrderError::Unavailable(_) => ErrorKind::Unavailable,
        }
    }
}

impl From<DeadlineExceeded> for OrderError {
    fn from(e: DeadlineExceeded) -> Self {
        OrderError::Unavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::ChainLevel;
    use crate::model::{OrderId, UserId};

    #[test]
    fn test_access_errors_hide_internal_detail() {
        let err = OrderError::from(AuthzError::NotCustomer {
            user: UserId(2),
            order: OrderId(9),
        });
        assert_eq!(err.to_string(), "unauthorized: you don't own this order");
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        let missing = OrderError::from(AuthzError::ParentNotFound {
            level: ChainLevel::Restaurant,
            id: "restaurant_4".into(),
        });
        assert_eq!(missing.to_string(), "restaurant not found");
        assert_eq!(missing.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_terminal_and_stale_writes_are_conflicts() {
        assert_eq!(
            OrderError::AlreadyFinal(OrderStatus::Delivered).kind(),
            ErrorKind::Conflict
        );
        let stale = OrderError::StaleStatus {
            expected: OrderStatus::Pending,
            actual: OrderStatus::Confirmed,
        };
        assert_eq!(stale.kind(), ErrorKind::Conflict);
        assert!(!stale.kind().is_retryable());
    }

    #[test]
    fn test_invalid_status_message() {
        let err: OrderError = "shipped".parse::<OrderStatus>().unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(err.to_string(), "invalid order status: \"shipped\"");
    }
}
