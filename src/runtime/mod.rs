//! Starting, wiring and stopping the stores.
//!
//! - [`Marketplace`]: spawns every store actor and builds the services on top
//! - [`setup_tracing`]: installs the log subscriber

pub mod marketplace;
pub mod tracing;

pub use self::marketplace::*;
pub use self::tracing::*;
