//! Custom actions for the Order actor.
//!
//! Status is the only mutable part of a stored order, and this is the only
//! way to change it.

use crate::model::OrderStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Compare-and-swap status write: applies `next` only if the stored
    /// status still equals `expected`.
    SetStatus {
        expected: OrderStatus,
        next: OrderStatus,
    },
}
