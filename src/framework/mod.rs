//! Generic in-memory store built from actors.
//!
//! Every stored resource type gets one [`ResourceActor`] that owns its
//! records and serializes access to them, and any number of cheap
//! [`ResourceClient`] handles that talk to it over a channel.
//!
//! - [`ActorEntity`]: what a resource type implements to be stored
//! - [`ResourceActor`]: the server loop and the `HashMap` it owns
//! - [`ResourceClient`]: typed create/get/list/update/delete/action calls
//! - [`ActorClient`]: the trait typed domain clients implement on top
//! - [`FrameworkError`]: plumbing failures, plus boxed entity errors
//!
//! # Testing
//!
//! See [`mock`] for scripted clients that stand in for a live actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
