//! Attribute mappings produced by blueprints.
//!
//! Producers return [`Attributes`]: an ordered mapping whose values are either
//! literal JSON values or deferred computations (usually "create a related
//! entity") that the [`EntityFactory`] resolves before handing the mapping to
//! an adapter.

use std::fmt;
use std::future::Future;

use futures::FutureExt;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use serde_json::Value;

use crate::entity::Fields;
use crate::error::{FixtureError, FixtureResult};
use crate::factory::EntityFactory;

type DeferredFn = Box<dyn FnOnce(EntityFactory) -> BoxFuture<'static, FixtureResult<Value>> + Send>;

/// A single attribute value.
pub enum AttributeValue {
	/// A value known at production time.
	Literal(Value),
	/// A value computed later with access to the factory.
	Deferred(DeferredFn),
}

impl AttributeValue {
	/// Wraps an async closure as a deferred value.
	pub fn deferred<F, Fut>(resolve: F) -> Self
	where
		F: FnOnce(EntityFactory) -> Fut + Send + 'static,
		Fut: Future<Output = FixtureResult<Value>> + Send + 'static,
	{
		Self::Deferred(Box::new(move |factory| resolve(factory).boxed()))
	}

	/// Returns true if the value still needs resolving.
	pub fn is_deferred(&self) -> bool {
		matches!(self, Self::Deferred(_))
	}

	/// Resolves the value, awaiting it when deferred.
	pub async fn resolve(self, factory: &EntityFactory) -> FixtureResult<Value> {
		match self {
			Self::Literal(value) => Ok(value),
			Self::Deferred(resolve) => resolve(factory.clone()).await,
		}
	}
}

impl fmt::Debug for AttributeValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
			Self::Deferred(_) => f.write_str("Deferred(..)"),
		}
	}
}

impl From<Value> for AttributeValue {
	fn from(value: Value) -> Self {
		Self::Literal(value)
	}
}

/// Ordered attribute mapping.
#[derive(Debug, Default)]
pub struct Attributes {
	values: IndexMap<String, AttributeValue>,
}

impl Attributes {
	/// Creates an empty mapping.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a literal value.
	pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.insert(key, AttributeValue::Literal(value.into()));
		self
	}

	/// Adds a deferred value.
	///
	/// # Example
	///
	/// ```ignore
	/// Attributes::new().deferred("author", |factory| async move {
	///     factory.for_type::<User>().create_one().await.map(Entity::into_value)
	/// })
	/// ```
	pub fn deferred<F, Fut>(mut self, key: impl Into<String>, resolve: F) -> Self
	where
		F: FnOnce(EntityFactory) -> Fut + Send + 'static,
		Fut: Future<Output = FixtureResult<Value>> + Send + 'static,
	{
		self.insert(key, AttributeValue::deferred(resolve));
		self
	}

	/// Inserts a value, returning the one it replaced.
	///
	/// A replaced key keeps its original position.
	pub fn insert(
		&mut self,
		key: impl Into<String>,
		value: impl Into<AttributeValue>,
	) -> Option<AttributeValue> {
		self.values.insert(key.into(), value.into())
	}

	/// Shallow-merges `other` into `self`; keys from `other` win.
	pub fn merge(&mut self, other: Attributes) {
		for (key, value) in other.values {
			self.values.insert(key, value);
		}
	}

	/// Returns a value by key.
	pub fn get(&self, key: &str) -> Option<&AttributeValue> {
		self.values.get(key)
	}

	/// Returns true if the key is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.values.contains_key(key)
	}

	/// Iterates over keys in insertion order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.values.keys().map(String::as_str)
	}

	/// Number of attributes.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Returns true if there are no attributes.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Returns true if no value is deferred.
	pub fn is_resolved(&self) -> bool {
		!self.values.values().any(AttributeValue::is_deferred)
	}

	/// Awaits every deferred value in order and returns the plain record.
	pub async fn resolve(self, factory: &EntityFactory) -> FixtureResult<Fields> {
		let mut fields = Fields::new();
		for (key, value) in self.values {
			let value = value.resolve(factory).await?;
			fields.insert(key, value);
		}
		Ok(fields)
	}

	/// Converts a fully literal mapping into a plain record.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::InvalidAttributes`] if any value is deferred.
	pub fn into_fields(self) -> FixtureResult<Fields> {
		let mut fields = Fields::new();
		for (key, value) in self.values {
			match value {
				AttributeValue::Literal(value) => {
					fields.insert(key, value);
				}
				AttributeValue::Deferred(_) => {
					return Err(FixtureError::InvalidAttributes(format!(
						"attribute '{}' is deferred and must be resolved by a factory",
						key
					)));
				}
			}
		}
		Ok(fields)
	}
}

impl From<Fields> for Attributes {
	fn from(fields: Fields) -> Self {
		Self {
			values: fields
				.into_iter()
				.map(|(key, value)| (key, AttributeValue::Literal(value)))
				.collect(),
		}
	}
}

impl TryFrom<Value> for Attributes {
	type Error = FixtureError;

	fn try_from(value: Value) -> FixtureResult<Self> {
		match value {
			Value::Object(fields) => Ok(fields.into()),
			other => Err(FixtureError::InvalidAttributes(format!(
				"expected a JSON object, got {}",
				other
			))),
		}
	}
}

impl<K: Into<String>, V: Into<AttributeValue>> FromIterator<(K, V)> for Attributes {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			values: iter
				.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		}
	}
}
