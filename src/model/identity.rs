//! The authenticated caller, as handed over by the transport layer.

use super::UserId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Account role, fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    RestaurantOwner,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::RestaurantOwner => write!(f, "restaurant_owner"),
        }
    }
}

/// Who is making a request. Credentials have already been checked upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

impl Identity {
    pub fn customer(user_id: UserId) -> Self {
        Self {
            user_id,
            role: Role::Customer,
        }
    }

    pub fn owner(user_id: UserId) -> Self {
        Self {
            user_id,
            role: Role::RestaurantOwner,
        }
    }
}
