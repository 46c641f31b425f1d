//! Blueprint-driven test data generation.
//!
//! fabrique builds fixture entities from declarative blueprints and hands them
//! to a pluggable persistence adapter:
//!
//! - **Blueprints**: a base factory method, named states and lifecycle
//!   callbacks per entity type
//! - **Adapters**: turn attribute records into entities and persist them
//! - **Entity factory**: resolves blueprints, merges states and overrides,
//!   resolves deferred attributes and runs the callbacks
//!
//! # Quick Start
//!
//! ```ignore
//! use fabrique_core::prelude::*;
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct User {
//!     id: Option<u64>,
//!     name: String,
//! }
//!
//! let factory = EntityFactory::builder()
//!     .profile(|blueprint: &mut Blueprint| {
//!         blueprint
//!             .set_model::<User>()
//!             .define(|faker: SharedFaker| async move {
//!                 Attributes::new().set("name", faker.name())
//!             });
//!     })
//!     .build()?;
//!
//! let users: Vec<User> = factory.for_type::<User>().count(3).create_as().await?;
//! assert_eq!(users[2].id, Some(3));
//! ```
//!
//! # Architecture
//!
//! - [`Blueprint`](blueprint::Blueprint) - Per-type producers, states and callbacks
//! - [`Adapter`](adapter::Adapter) - Make/create contract for persistence
//! - [`ObjectAdapter`](adapter::ObjectAdapter) - In-memory adapter with id generation
//! - [`EntityFactory`](factory::EntityFactory) - Orchestrates a make/create request
//! - [`RandomDataProvider`](faker::RandomDataProvider) - Fake data for producers

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod adapter;
pub mod attributes;
pub mod blueprint;
pub mod entity;
pub mod error;
pub mod factory;
pub mod faker;
pub mod prelude;
pub mod profile;
pub mod settings;

// Re-export commonly used types at crate root
pub use adapter::{Adapter, AdapterContext, ObjectAdapter, ObjectAdapterOptions};
pub use attributes::{AttributeValue, Attributes};
pub use blueprint::{Blueprint, BlueprintOptions};
pub use entity::{Entity, EntityRef, Fields, FixtureModel};
pub use error::{FixtureError, FixtureResult};
pub use factory::{EntityBuilder, EntityFactory};
pub use faker::{FakeDataProvider, RandomDataProvider, SharedFaker};
pub use profile::Profile;
pub use settings::FactorySettings;
