//! # Services
//!
//! The operations callers invoke. Each service holds typed clients to the
//! stores it needs, checks identity and ownership, and bounds every call by
//! the configured request timeout.
//!
//! - [`CatalogService`]: restaurants, categories and menu items
//! - [`OrderBuilder`]: validates, prices and places orders
//! - [`OrderLifecycle`]: owner status updates and customer cancellation
//! - [`OrderQueries`]: read-only order views

pub mod builder;
pub mod catalog;
pub mod deadline;
pub mod lifecycle;
pub mod queries;

pub use builder::OrderBuilder;
pub use catalog::{CatalogError, CatalogService};
pub use deadline::DeadlineExceeded;
pub use lifecycle::OrderLifecycle;
pub use queries::OrderQueries;
