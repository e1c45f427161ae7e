//! # QuickBite
//!
//! > **Order engine for a food-delivery marketplace.**
//!
//! Restaurant owners publish menus, customers place orders, and owners move
//! those orders through the delivery lifecycle. Every piece of state lives
//! in a store actor; callers only ever talk to typed clients and the
//! services built on them.
//!
//! ## 🏗️ Design
//!
//! ### One actor per store
//! Restaurants, menu categories, menu items and orders each live in a
//! [`ResourceActor`](framework::ResourceActor). An actor handles one message
//! at a time, so a read-check-write inside a single message is atomic. Two
//! guarantees rest on this:
//! - an order's header and lines are stored by one message, so they appear
//!   together or not at all
//! - a status change carries the status it expects to replace, and is
//!   refused if another writer changed it first
//!
//! ### Ownership checks
//! Every catalog write and every owner-side order operation resolves the
//! chain item → category → restaurant and compares the restaurant's owner
//! with the caller. See [`authz`].
//!
//! ### Errors
//! Each component has its own `thiserror` enum. All of them map onto a
//! shared [`ErrorKind`](error::ErrorKind) that a transport layer turns into
//! a status code.
//!
//! ### Observability
//! `tracing` throughout. Store actors tag every line with `entity_type`;
//! services open a span per call carrying the acting user.
//!
//! ## 🗺️ Module Tour
//!
//! - [`framework`]: the generic actor, its client, and the mock client for tests
//! - [`model`]: identifiers, identities and the stored records
//! - [`restaurant_actor`], [`menu_actor`], [`order_actor`]: store behaviour per record type
//! - [`clients`]: typed wrappers over the generic client
//! - [`authz`]: ownership resolution
//! - [`services`]: the operations callers invoke
//! - [`config`]: `QUICKBITE_*` environment settings
//! - [`runtime`]: starting, wiring and stopping the stores
//!
//! ## 🚀 Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod authz;
pub mod clients;
pub mod config;
pub mod error;
pub mod framework;
pub mod menu_actor;
pub mod model;
pub mod order_actor;
pub mod restaurant_actor;
pub mod runtime;
pub mod services;
