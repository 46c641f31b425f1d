//! # fabrique
//!
//! Blueprint-driven test fixtures for Rust.
//!
//! Declare how an entity is built once, in a [`Profile`](prelude::Profile),
//! then ask the [`EntityFactory`](prelude::EntityFactory) for as many as a
//! test needs, with named states, overrides and related entities created on
//! demand. Persistence is delegated to an [`Adapter`](prelude::Adapter); the
//! bundled [`ObjectAdapter`](prelude::ObjectAdapter) keeps everything in
//! memory and assigns sequential or UUID ids.
//!
//! ## Quick Start
//!
//! ```ignore
//! use fabrique::prelude::*;
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Post {
//!     id: Option<u64>,
//!     title: String,
//!     published: bool,
//! }
//!
//! struct PostProfile;
//!
//! impl Profile for PostProfile {
//!     fn register(&self, blueprint: &mut Blueprint) {
//!         blueprint
//!             .set_model::<Post>()
//!             .define(|faker: SharedFaker| async move {
//!                 Attributes::new().set("title", faker.catch_phrase())
//!             })
//!             .state("published", serde_json::json!({"published": true}));
//!     }
//! }
//!
//! let factory = EntityFactory::builder().profile(PostProfile).build()?;
//! let posts: Vec<Post> = factory
//!     .for_type::<Post>()
//!     .state("published")
//!     .count(2)
//!     .create_as()
//!     .await?;
//! ```
//!
//! ## Crates
//!
//! - [`fabrique_core`] - Blueprints, adapters, the entity factory and settings

#![warn(missing_docs)]

// Re-export the core crate, including its `prelude`
pub use fabrique_core::*;
