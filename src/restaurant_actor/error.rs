//! Error types for the Restaurant actor.

use crate::error::ErrorKind;
use crate::model::RestaurantId;
use thiserror::Error;

/// Errors that can occur during restaurant operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RestaurantError {
    /// The restaurant data provided is invalid.
    #[error("{0}")]
    Validation(String),

    /// The requested restaurant was not found.
    #[error("restaurant not found: {0}")]
    NotFound(String),

    /// Categories still reference the restaurant.
    #[error("restaurant {restaurant} still has {count} menu categories")]
    HasCategories { restaurant: RestaurantId, count: usize },

    /// Orders still reference the restaurant.
    #[error("restaurant {restaurant} still has {count} orders")]
    HasOrders { restaurant: RestaurantId, count: usize },

    /// The store could not be reached or did not answer in time.
    #[error("restaurant store unavailable: {0}")]
    Unavailable(String),
}

impl RestaurantError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RestaurantError::Validation(_) => ErrorKind::ValidationFailed,
            RestaurantError::NotFound(_) => ErrorKind::NotFound,
            RestaurantError::HasCategories { .. } | RestaurantError::HasOrders { .. } => {
                ErrorKind::Conflict
            }
            RestaurantError::Unavailable(_) => ErrorKind::Unavailable,
        }
    }
}
