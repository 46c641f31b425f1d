//! Adapter contract between the factory and a persistence technology.
//!
//! An [`Adapter`] turns resolved attribute records into entities (`make`) and
//! persists them (`create`). [`ObjectAdapter`] is the in-memory reference
//! implementation.

mod object;

pub use object::{ObjectAdapter, ObjectAdapterOptions};

use async_trait::async_trait;

use crate::blueprint::BlueprintOptions;
use crate::entity::{Entity, EntityRef, Fields};
use crate::error::FixtureResult;

/// Context shared by every item of an adapter call.
///
/// Carries the blueprint's entity type and its options merged with any
/// per-call overrides.
#[derive(Debug, Clone)]
pub struct AdapterContext {
	entity_type: EntityRef,
	options: BlueprintOptions,
}

impl AdapterContext {
	/// Creates a context.
	pub fn new(entity_type: impl Into<EntityRef>, options: BlueprintOptions) -> Self {
		Self {
			entity_type: entity_type.into(),
			options,
		}
	}

	/// Returns the target entity type.
	pub fn entity_type(&self) -> &EntityRef {
		&self.entity_type
	}

	/// Returns the effective blueprint options.
	pub fn options(&self) -> &BlueprintOptions {
		&self.options
	}
}

/// Capability surface the factory calls into.
///
/// Both operations receive a batch and must return one entity per input, in
/// input order.
#[async_trait]
pub trait Adapter: Send + Sync {
	/// Instantiates entities in memory.
	async fn make(&self, objects: Vec<Fields>, context: &AdapterContext) -> FixtureResult<Vec<Entity>>;

	/// Persists entities, assigning ids where the adapter's policy says so.
	async fn create(&self, entities: Vec<Entity>, context: &AdapterContext) -> FixtureResult<Vec<Entity>>;
}
