//! Pure data structures. The [`ActorEntity`](crate::framework::ActorEntity)
//! impls that let the stores manage them live in the `*_actor` modules.

pub mod identity;
pub mod ids;
pub mod menu;
pub mod order;
pub mod restaurant;

pub use identity::*;
pub use ids::*;
pub use menu::*;
pub use order::*;
pub use restaurant::*;
