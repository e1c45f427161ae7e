//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).
//!
//! Each wrapper maps store failures back onto its domain error: errors raised
//! by entity hooks are unboxed to their original variant, missing ids become
//! the domain's not-found variant, and channel failures become `Unavailable`.

pub mod category_client;
pub mod menu_item_client;
pub mod order_client;
pub mod restaurant_client;

pub use category_client::*;
pub use menu_item_client::*;
pub use order_client::*;
pub use restaurant_client::*;
