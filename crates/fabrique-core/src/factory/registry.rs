//! Blueprint registry for entity type lookup.
//!
//! Each [`EntityFactory`](super::EntityFactory) owns one registry; blueprints
//! are keyed by their [`EntityRef`].

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::blueprint::Blueprint;
use crate::entity::EntityRef;
use crate::error::{FixtureError, FixtureResult};

/// Thread-safe map from entity type to its blueprint.
#[derive(Debug, Default)]
pub struct BlueprintRegistry {
	blueprints: RwLock<HashMap<EntityRef, Arc<Blueprint>>>,
}

impl BlueprintRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a blueprint under its entity type.
	///
	/// A blueprint already registered for the same type is replaced.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::Configuration`] if the blueprint has no type.
	pub fn register(&self, blueprint: Blueprint) -> FixtureResult<EntityRef> {
		let entity_type = blueprint.entity_type().cloned().ok_or_else(|| {
			FixtureError::Configuration(
				"blueprint must set an entity type before it is registered".to_string(),
			)
		})?;

		let replaced = self
			.blueprints
			.write()
			.insert(entity_type.clone(), Arc::new(blueprint))
			.is_some();
		tracing::debug!(entity = %entity_type, replaced, "registered blueprint");

		Ok(entity_type)
	}

	/// Gets the blueprint for an entity type.
	pub fn get(&self, entity_type: &EntityRef) -> Option<Arc<Blueprint>> {
		self.blueprints.read().get(entity_type).cloned()
	}

	/// Gets the blueprint for an entity type or fails with
	/// [`FixtureError::BlueprintNotFound`].
	pub fn require(&self, entity_type: &EntityRef) -> FixtureResult<Arc<Blueprint>> {
		self.get(entity_type)
			.ok_or_else(|| FixtureError::BlueprintNotFound(entity_type.to_string()))
	}

	/// Checks if a blueprint is registered for the entity type.
	pub fn has(&self, entity_type: &EntityRef) -> bool {
		self.blueprints.read().contains_key(entity_type)
	}

	/// Returns all registered entity types.
	pub fn entity_types(&self) -> Vec<EntityRef> {
		self.blueprints.read().keys().cloned().collect()
	}

	/// Returns the number of registered blueprints.
	pub fn len(&self) -> usize {
		self.blueprints.read().len()
	}

	/// Returns true if no blueprints are registered.
	pub fn is_empty(&self) -> bool {
		self.blueprints.read().is_empty()
	}

	/// Removes all blueprints.
	pub fn clear(&self) {
		self.blueprints.write().clear();
	}
}
