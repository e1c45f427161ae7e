//! # Order Actor
//!
//! Owns every order together with its line items.
//!
//! - [`entity`]: [`ActorEntity`](crate::framework::ActorEntity) impl for [`Order`]
//! - [`error`]: [`OrderError`]
//! - [`actions`]: [`OrderAction::SetStatus`], the compare-and-swap status write
//! - [`new()`]: factory returning the actor and its client
//!
//! An order enters the store as one [`OrderDraft`](crate::model::OrderDraft)
//! message and leaves it never. Because the actor handles one message at a
//! time, the header and all lines appear together, and two status writes on
//! the same order are totally ordered.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Order;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
