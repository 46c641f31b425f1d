//! In-memory object adapter.
//!
//! Typed entities are default-constructed and then receive every attribute;
//! string-keyed entities become plain records. `create` assigns ids from a
//! per-entity-type counter or as random UUIDs.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{Adapter, AdapterContext};
use crate::entity::{Entity, EntityRef, Fields};
use crate::error::FixtureResult;

/// Adapter-wide defaults, overridable per call through
/// [`BlueprintOptions`](crate::blueprint::BlueprintOptions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectAdapterOptions {
	/// Assign ids on create. Defaults to `true`.
	pub generate_id: bool,
	/// Id attribute used when the call does not name one. Defaults to `"id"`.
	pub default_id_attribute: String,
	/// Generate UUIDs instead of sequential integers. Defaults to `false`.
	pub uuid_primary: bool,
}

impl Default for ObjectAdapterOptions {
	fn default() -> Self {
		Self {
			generate_id: true,
			default_id_attribute: "id".to_string(),
			uuid_primary: false,
		}
	}
}

impl ObjectAdapterOptions {
	/// Creates the default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets `generate_id`.
	pub fn with_generate_id(mut self, generate_id: bool) -> Self {
		self.generate_id = generate_id;
		self
	}

	/// Sets `default_id_attribute`.
	pub fn with_default_id_attribute(mut self, attribute: impl Into<String>) -> Self {
		self.default_id_attribute = attribute.into();
		self
	}

	/// Sets `uuid_primary`.
	pub fn with_uuid_primary(mut self, uuid_primary: bool) -> Self {
		self.uuid_primary = uuid_primary;
		self
	}
}

/// In-memory [`Adapter`].
///
/// The id counter lives as long as the adapter and is partitioned by entity
/// type.
#[derive(Debug, Default)]
pub struct ObjectAdapter {
	options: ObjectAdapterOptions,
	id_counter: Mutex<HashMap<EntityRef, u64>>,
}

impl ObjectAdapter {
	/// Creates an adapter with the given defaults.
	pub fn new(options: ObjectAdapterOptions) -> Self {
		Self {
			options,
			id_counter: Mutex::new(HashMap::new()),
		}
	}

	/// Returns the adapter defaults.
	pub fn options(&self) -> &ObjectAdapterOptions {
		&self.options
	}

	/// Returns the last sequential id issued for `entity_type`.
	pub fn last_id(&self, entity_type: &EntityRef) -> Option<u64> {
		self.id_counter.lock().get(entity_type).copied()
	}

	fn next_id(&self, entity_type: &EntityRef) -> u64 {
		let mut counter = self.id_counter.lock();
		let current = counter.entry(entity_type.clone()).or_insert(0);
		*current += 1;
		*current
	}

	fn instantiate(object: Fields, context: &AdapterContext) -> FixtureResult<Entity> {
		match context.entity_type() {
			EntityRef::Typed(descriptor) => {
				let mut fields = descriptor.instantiate()?;
				for (key, value) in object {
					fields.insert(key, value);
				}
				Ok(Entity::Instance {
					entity_type: *descriptor,
					fields,
				})
			}
			EntityRef::Named(_) => Ok(Entity::Record { fields: object }),
		}
	}
}

#[async_trait]
impl Adapter for ObjectAdapter {
	async fn make(&self, objects: Vec<Fields>, context: &AdapterContext) -> FixtureResult<Vec<Entity>> {
		objects
			.into_iter()
			.map(|object| Self::instantiate(object, context))
			.collect()
	}

	async fn create(&self, entities: Vec<Entity>, context: &AdapterContext) -> FixtureResult<Vec<Entity>> {
		let options = context.options();
		let generate_id = options.generate_id.unwrap_or(self.options.generate_id);
		if !generate_id {
			return Ok(entities);
		}

		let use_uuid = options.uuid_primary.unwrap_or(self.options.uuid_primary);
		let id_key = options
			.id_attribute
			.as_deref()
			.filter(|attribute| !attribute.is_empty())
			.unwrap_or(self.options.default_id_attribute.as_str())
			.to_string();

		let entities = entities
			.into_iter()
			.map(|mut entity| {
				let id = if use_uuid {
					Value::String(Uuid::new_v4().to_string())
				} else {
					Value::from(self.next_id(context.entity_type()))
				};
				tracing::trace!(entity = %context.entity_type(), key = %id_key, id = %id, "generated id");

				// Generated id first, existing fields second: an explicit id wins.
				// A null id (an unset `Option` on a default instance) does not.
				let existing = std::mem::take(entity.fields_mut());
				let mut fields = Fields::new();
				fields.insert(id_key.clone(), id);
				for (key, value) in existing {
					if key == id_key && value.is_null() {
						continue;
					}
					fields.insert(key, value);
				}
				entity.with_fields(fields)
			})
			.collect();

		Ok(entities)
	}
}
