//! # Restaurant Actor
//!
//! Owns restaurant records.
//!
//! - [`entity`]: [`ActorEntity`](crate::framework::ActorEntity) impl and [`RestaurantContext`]
//! - [`error`]: [`RestaurantError`]
//! - [`new()`]: factory returning the actor and its client
//!
//! The actor is started with a [`RestaurantContext`] so its delete hook can
//! check for dependent categories and orders.

pub mod entity;
pub mod error;

pub use entity::RestaurantContext;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Restaurant;

/// Creates a new Restaurant actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Restaurant>, ResourceClient<Restaurant>) {
    ResourceActor::new(buffer_size)
}
