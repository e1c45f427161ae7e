//! # Menu Actors
//!
//! Two stores share this module: one for [`MenuCategory`] and one for
//! [`MenuItem`]. They share [`MenuError`] because every menu operation can
//! fail at either level of the chain.
//!
//! The category actor runs with a [`MenuItemClient`](crate::clients::MenuItemClient)
//! as context so that deleting a category that still has items is refused.

pub mod category;
pub mod error;
pub mod item;

pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::{MenuCategory, MenuItem};

/// Creates a new category actor and its client.
pub fn new_categories(
    buffer_size: usize,
) -> (ResourceActor<MenuCategory>, ResourceClient<MenuCategory>) {
    ResourceActor::new(buffer_size)
}

/// Creates a new menu item actor and its client.
pub fn new_items(buffer_size: usize) -> (ResourceActor<MenuItem>, ResourceClient<MenuItem>) {
    ResourceActor::new(buffer_size)
}
