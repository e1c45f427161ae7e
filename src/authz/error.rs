//! Authorization failures.
//!
//! The variants keep the precise reason for logs and tests. What a caller is
//! shown comes from [`AuthzError::public_message`], which names only the
//! resource type and never the ids or owner involved.

use crate::error::ErrorKind;
use crate::model::{OrderId, RestaurantId, Role, UserId};
use std::fmt::Display;
use thiserror::Error;

/// A link in an ownership chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainLevel {
    MenuItem,
    Category,
    Restaurant,
}

impl Display for ChainLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChainLevel::MenuItem => "menu item",
            ChainLevel::Category => "category",
            ChainLevel::Restaurant => "restaurant",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthzError {
    /// A link of the chain does not resolve.
    #[error("{level} {id} not found while resolving ownership")]
    ParentNotFound { level: ChainLevel, id: String },

    #[error("user {user} does not own restaurant {restaurant}")]
    NotOwner { user: UserId, restaurant: RestaurantId },

    #[error("user {user} did not place order {order}")]
    NotCustomer { user: UserId, order: OrderId },

    #[error("role {role} may not manage restaurants")]
    RoleNotPermitted { role: Role },

    #[error("ownership lookup failed: {0}")]
    Unavailable(String),
}

impl AuthzError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthzError::ParentNotFound { .. } => ErrorKind::NotFound,
            AuthzError::NotOwner { .. }
            | AuthzError::NotCustomer { .. }
            | AuthzError::RoleNotPermitted { .. } => ErrorKind::Unauthorized,
            AuthzError::Unavailable(_) => ErrorKind::Unavailable,
        }
    }

    /// Message safe to return to the caller.
    pub fn public_message(&self) -> String {
        match self {
            AuthzError::ParentNotFound { level, .. } => format!("{level} not found"),
            AuthzError::NotOwner { .. } => "unauthorized: you don't own this restaurant".into(),
            AuthzError::NotCustomer { .. } => "unauthorized: you don't own this order".into(),
            AuthzError::RoleNotPermitted { .. } => {
                "unauthorized: restaurant_owner role required".into()
            }
            AuthzError::Unavailable(_) => "service temporarily unavailable".into(),
        }
    }
}
