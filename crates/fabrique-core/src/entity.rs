//! Entity type references and materialized entities.
//!
//! A blueprint targets either a nominal Rust type ([`TypeDescriptor`]) or an
//! opaque string key for untyped definitions. Adapters branch on the
//! [`EntityRef`] tag to decide what kind of [`Entity`] to produce.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{FixtureError, FixtureResult};

/// Ordered field record backing every entity.
pub type Fields = Map<String, Value>;

/// Types that can be produced by a typed blueprint.
///
/// Implemented automatically for every `Default + Serialize + DeserializeOwned`
/// type.
pub trait FixtureModel: Default + Serialize + DeserializeOwned + Send + Sync + 'static {}

impl<T> FixtureModel for T where T: Default + Serialize + DeserializeOwned + Send + Sync + 'static {}

/// Describes a nominal entity type.
///
/// Holds the type's identity and a constructor for its default-constructed
/// field record.
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
	name: &'static str,
	type_id: TypeId,
	construct: fn() -> FixtureResult<Fields>,
}

impl TypeDescriptor {
	/// Creates a descriptor for `T`.
	pub fn of<T: Default + Serialize + 'static>() -> Self {
		Self {
			name: short_type_name(std::any::type_name::<T>()),
			type_id: TypeId::of::<T>(),
			construct: construct_default::<T>,
		}
	}

	/// Returns the unqualified type name.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Returns the Rust type id.
	pub fn type_id(&self) -> TypeId {
		self.type_id
	}

	/// Returns the field record of a default-constructed instance.
	pub fn instantiate(&self) -> FixtureResult<Fields> {
		(self.construct)()
	}
}

impl PartialEq for TypeDescriptor {
	fn eq(&self, other: &Self) -> bool {
		self.type_id == other.type_id
	}
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.type_id.hash(state);
	}
}

impl fmt::Debug for TypeDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeDescriptor")
			.field("name", &self.name)
			.finish()
	}
}

fn construct_default<T: Default + Serialize>() -> FixtureResult<Fields> {
	match serde_json::to_value(T::default())? {
		Value::Object(fields) => Ok(fields),
		other => Err(FixtureError::Instantiation {
			entity: short_type_name(std::any::type_name::<T>()).to_string(),
			message: format!("default value must serialize to an object, got {}", other),
		}),
	}
}

// `alloc::vec::Vec<app::Post>` -> `Vec<app::Post>`, `app::models::Post` -> `Post`
fn short_type_name(full: &'static str) -> &'static str {
	let head = full.split('<').next().unwrap_or(full);
	match head.rfind("::") {
		Some(idx) => &full[idx + 2..],
		None => full,
	}
}

/// Identifies the target of a blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityRef {
	/// Untyped entity addressed by a string key; produces plain records.
	Named(String),
	/// Nominal Rust type; produces default-constructed instances.
	Typed(TypeDescriptor),
}

impl EntityRef {
	/// Reference to the nominal type `T`.
	pub fn of<T: Default + Serialize + 'static>() -> Self {
		Self::Typed(TypeDescriptor::of::<T>())
	}

	/// Reference to an untyped entity key.
	pub fn named(key: impl Into<String>) -> Self {
		Self::Named(key.into())
	}

	/// Returns the identifying name used in messages.
	pub fn name(&self) -> &str {
		match self {
			Self::Named(key) => key,
			Self::Typed(descriptor) => descriptor.name(),
		}
	}

	/// Returns true for nominal type references.
	pub fn is_typed(&self) -> bool {
		matches!(self, Self::Typed(_))
	}
}

impl fmt::Display for EntityRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl From<&str> for EntityRef {
	fn from(key: &str) -> Self {
		Self::named(key)
	}
}

impl From<String> for EntityRef {
	fn from(key: String) -> Self {
		Self::Named(key)
	}
}

impl From<TypeDescriptor> for EntityRef {
	fn from(descriptor: TypeDescriptor) -> Self {
		Self::Typed(descriptor)
	}
}

/// A materialized entity returned by an adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
	/// Instance of a nominal type.
	Instance {
		/// The instantiated type.
		entity_type: TypeDescriptor,
		/// Instance fields.
		fields: Fields,
	},
	/// Plain structured record for a string-keyed entity.
	Record {
		/// Record fields.
		fields: Fields,
	},
}

impl Entity {
	/// Returns the entity's fields.
	pub fn fields(&self) -> &Fields {
		match self {
			Self::Instance { fields, .. } | Self::Record { fields } => fields,
		}
	}

	/// Returns the entity's fields mutably.
	pub fn fields_mut(&mut self) -> &mut Fields {
		match self {
			Self::Instance { fields, .. } | Self::Record { fields } => fields,
		}
	}

	/// Replaces the entity's fields, keeping its kind.
	pub fn with_fields(self, fields: Fields) -> Self {
		match self {
			Self::Instance { entity_type, .. } => Self::Instance {
				entity_type,
				fields,
			},
			Self::Record { .. } => Self::Record { fields },
		}
	}

	/// Returns a field value.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.fields().get(key)
	}

	/// Sets a field value, returning the previous one.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.fields_mut().insert(key.into(), value.into())
	}

	/// Returns true if this entity is an instance of a nominal type.
	pub fn is_instance(&self) -> bool {
		matches!(self, Self::Instance { .. })
	}

	/// Returns the entity as a JSON object.
	pub fn into_value(self) -> Value {
		match self {
			Self::Instance { fields, .. } | Self::Record { fields } => Value::Object(fields),
		}
	}

	/// Converts the entity into its model type.
	pub fn into_model<T: DeserializeOwned>(self) -> FixtureResult<T> {
		let entity = match &self {
			Self::Instance { entity_type, .. } => entity_type.name().to_string(),
			Self::Record { .. } => short_type_name(std::any::type_name::<T>()).to_string(),
		};
		serde_json::from_value(self.into_value()).map_err(|e| FixtureError::Instantiation {
			entity,
			message: e.to_string(),
		})
	}
}
