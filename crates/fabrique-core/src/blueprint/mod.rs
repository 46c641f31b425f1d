//! Blueprints: per-entity registration of producers, states and hooks.
//!
//! A [`Blueprint`] records, for one entity type:
//!
//! - a base factory method and any number of named states,
//! - optional after-making / after-creating callbacks (base or per state),
//! - an open [`BlueprintOptions`] bag passed through to the adapter.
//!
//! Blueprints are pure bookkeeping. Producers may be async, but invoking them
//! is the [`EntityFactory`](crate::factory::EntityFactory)'s job.
//!
//! # Example
//!
//! ```ignore
//! let mut blueprint = Blueprint::new();
//! blueprint
//!     .set_type("widget")
//!     .define(|faker: SharedFaker| async move {
//!         Attributes::new().set("name", faker.company_name())
//!     })
//!     .state("active", json!({"active": true}));
//!
//! assert!(blueprint.has_factory_method(Some("active")));
//! ```

mod callback;
mod options;
mod producer;

use std::collections::HashMap;
use std::future::Future;

pub use callback::Callback;
pub use options::BlueprintOptions;
pub use producer::{FnProducer, IntoProducer, PartialProducer, Producer};

use crate::entity::{Entity, EntityRef};
use crate::error::{FixtureError, FixtureResult};
use crate::factory::EntityFactory;

/// Label used for the base state in error messages.
pub const DEFAULT_STATE_LABEL: &str = "default";

// The empty name is reserved for the base definition.
const BASE_STATE: &str = "";

fn state_key(name: Option<&str>) -> &str {
	name.unwrap_or(BASE_STATE)
}

/// Declarative registration unit for one entity type.
#[derive(Debug, Clone, Default)]
pub struct Blueprint {
	entity_type: Option<EntityRef>,
	factory_methods: HashMap<String, Producer>,
	making_callbacks: HashMap<String, Callback>,
	creating_callbacks: HashMap<String, Callback>,
	options: BlueprintOptions,
}

impl Blueprint {
	/// Creates an empty blueprint with no entity type.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the entity type. Calling it again replaces the previous type.
	pub fn set_type(&mut self, entity_type: impl Into<EntityRef>) -> &mut Self {
		let entity_type = entity_type.into();
		if let Some(previous) = self.entity_type.as_ref().filter(|p| **p != entity_type) {
			tracing::debug!(
				previous = %previous,
				entity = %entity_type,
				"blueprint entity type replaced"
			);
		}
		self.entity_type = Some(entity_type);
		self
	}

	/// Sets the entity type to the nominal type `T`.
	pub fn set_model<T: Default + serde::Serialize + 'static>(&mut self) -> &mut Self {
		self.set_type(EntityRef::of::<T>())
	}

	/// Returns the entity type, if set.
	pub fn entity_type(&self) -> Option<&EntityRef> {
		self.entity_type.as_ref()
	}

	/// Registers the base factory method.
	///
	/// Accepts an async closure taking a [`SharedFaker`](crate::faker::SharedFaker),
	/// a static partial (`serde_json::Value` object or field map), or a
	/// [`Producer`].
	pub fn define<M>(&mut self, producer: impl IntoProducer<M>) -> &mut Self {
		self.factory_methods
			.insert(BASE_STATE.to_string(), producer.into_producer());
		self
	}

	/// Registers a named state.
	pub fn state<M>(&mut self, name: impl Into<String>, producer: impl IntoProducer<M>) -> &mut Self {
		self.factory_methods
			.insert(name.into(), producer.into_producer());
		self
	}

	/// Returns true if a factory method is registered for `name`
	/// (`None` for the base definition).
	pub fn has_factory_method(&self, name: Option<&str>) -> bool {
		self.factory_methods.contains_key(state_key(name))
	}

	/// Returns the factory method for `name` (`None` for the base definition).
	///
	/// # Errors
	///
	/// - [`FixtureError::Configuration`] if no entity type has been set.
	/// - [`FixtureError::UnknownState`] if nothing is registered under `name`.
	pub fn get_factory_method(&self, name: Option<&str>) -> FixtureResult<Producer> {
		let entity_type = self.entity_type.as_ref().ok_or_else(|| {
			FixtureError::Configuration(format!(
				"entity type must be set before looking up factory method '{}'",
				name.unwrap_or(DEFAULT_STATE_LABEL)
			))
		})?;

		self.factory_methods
			.get(state_key(name))
			.cloned()
			.ok_or_else(|| FixtureError::unknown_state(entity_type, name))
	}

	/// Returns the registered state names, excluding the base definition.
	pub fn state_names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self
			.factory_methods
			.keys()
			.map(String::as_str)
			.filter(|name| !name.is_empty())
			.collect();
		names.sort_unstable();
		names
	}

	/// Registers the base after-making callback.
	pub fn after_making<F, Fut>(&mut self, callback: F) -> &mut Self
	where
		F: Fn(Entity, EntityFactory) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = FixtureResult<Entity>> + Send + 'static,
	{
		self.making_callbacks
			.insert(BASE_STATE.to_string(), Callback::new(callback));
		self
	}

	/// Registers an after-making callback for a state.
	pub fn after_making_state<F, Fut>(&mut self, name: impl Into<String>, callback: F) -> &mut Self
	where
		F: Fn(Entity, EntityFactory) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = FixtureResult<Entity>> + Send + 'static,
	{
		self.making_callbacks
			.insert(name.into(), Callback::new(callback));
		self
	}

	/// Registers the base after-creating callback.
	pub fn after_creating<F, Fut>(&mut self, callback: F) -> &mut Self
	where
		F: Fn(Entity, EntityFactory) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = FixtureResult<Entity>> + Send + 'static,
	{
		self.creating_callbacks
			.insert(BASE_STATE.to_string(), Callback::new(callback));
		self
	}

	/// Registers an after-creating callback for a state.
	pub fn after_creating_state<F, Fut>(&mut self, name: impl Into<String>, callback: F) -> &mut Self
	where
		F: Fn(Entity, EntityFactory) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = FixtureResult<Entity>> + Send + 'static,
	{
		self.creating_callbacks
			.insert(name.into(), Callback::new(callback));
		self
	}

	/// Returns true if an after-making callback is registered for `name`.
	pub fn has_making_callback_method(&self, name: Option<&str>) -> bool {
		self.making_callbacks.contains_key(state_key(name))
	}

	/// Returns the after-making callback for `name`, if any.
	pub fn get_making_callback_method(&self, name: Option<&str>) -> Option<Callback> {
		self.making_callbacks.get(state_key(name)).cloned()
	}

	/// Returns true if an after-creating callback is registered for `name`.
	pub fn has_creating_callback_method(&self, name: Option<&str>) -> bool {
		self.creating_callbacks.contains_key(state_key(name))
	}

	/// Returns the after-creating callback for `name`, if any.
	pub fn get_creating_callback_method(&self, name: Option<&str>) -> Option<Callback> {
		self.creating_callbacks.get(state_key(name)).cloned()
	}

	/// Merges `options` into the blueprint's option bag.
	pub fn context(&mut self, options: BlueprintOptions) -> &mut Self {
		self.options.merge(options);
		self
	}

	/// Returns the blueprint's option bag.
	pub fn get_context(&self) -> &BlueprintOptions {
		&self.options
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::attributes::Attributes;
	use crate::faker::{FakeDataProvider, SharedFaker};
	use rstest::{fixture, rstest};
	use serde::{Deserialize, Serialize};
	use serde_json::{Value, json};

	#[derive(Debug, Default, Serialize, Deserialize)]
	struct Widget {
		name: String,
	}

	#[fixture]
	fn faker() -> SharedFaker {
		FakeDataProvider::seeded(3).shared()
	}

	async fn produce(producer: &Producer, faker: &SharedFaker) -> Value {
		let fields = producer
			.produce(faker.clone())
			.await
			.unwrap()
			.into_fields()
			.unwrap();
		Value::Object(fields)
	}

	fn widgetizer(_faker: SharedFaker) -> impl Future<Output = Attributes> + Send {
		async { Attributes::new().set("name", "widgetizer") }
	}

	#[rstest]
	#[case::string_key(EntityRef::named("widget"))]
	#[case::type_key(EntityRef::of::<Widget>())]
	#[tokio::test]
	async fn test_define_base_factory_method(#[case] entity_type: EntityRef, faker: SharedFaker) {
		let mut blueprint = Blueprint::new();
		blueprint.set_type(entity_type).define(widgetizer);

		assert!(blueprint.has_factory_method(None));

		let expected = Value::Object(widgetizer(faker.clone()).await.into_fields().unwrap());
		let producer = blueprint.get_factory_method(None).unwrap();
		assert_eq!(produce(&producer, &faker).await, expected);
	}

	#[rstest]
	#[case::string_key(EntityRef::named("widget"))]
	#[case::type_key(EntityRef::of::<Widget>())]
	#[tokio::test]
	async fn test_define_state_factory_method(#[case] entity_type: EntityRef, faker: SharedFaker) {
		let mut blueprint = Blueprint::new();
		blueprint
			.set_type(entity_type)
			.state("active", |_faker: SharedFaker| async {
				Attributes::new().set("active", true)
			});

		assert!(blueprint.has_factory_method(Some("active")));
		assert!(!blueprint.has_factory_method(None));

		let producer = blueprint.get_factory_method(Some("active")).unwrap();
		assert_eq!(produce(&producer, &faker).await, json!({"active": true}));
	}

	#[rstest]
	#[tokio::test]
	async fn test_state_as_static_partial(faker: SharedFaker) {
		let partial = json!({"active": true});
		let mut blueprint = Blueprint::new();
		blueprint.set_type("widget").state("active", partial.clone());

		assert!(blueprint.has_factory_method(Some("active")));
		let producer = blueprint.get_factory_method(Some("active")).unwrap();
		assert_eq!(produce(&producer, &faker).await, partial);
	}

	#[rstest]
	#[case(None)]
	#[case(Some("widget"))]
	fn test_lookup_before_type_is_configuration_error(#[case] name: Option<&str>) {
		let mut blueprint = Blueprint::new();
		blueprint.define(json!({"name": "widgetizer"}));

		let result = blueprint.get_factory_method(name);
		assert!(matches!(result, Err(FixtureError::Configuration(_))));
	}

	#[rstest]
	fn test_lookup_of_unknown_state_names_entity_and_state() {
		let mut blueprint = Blueprint::new();
		blueprint.set_type("widget");

		let error = blueprint.get_factory_method(Some("widget")).unwrap_err();
		assert!(matches!(error, FixtureError::UnknownState { .. }));
		assert_eq!(
			error.to_string(),
			"Factory method not defined for entity widget, state: widget"
		);
	}

	#[rstest]
	fn test_unknown_state_on_typed_blueprint() {
		let mut blueprint = Blueprint::new();
		blueprint.set_model::<Widget>();

		let message = blueprint
			.get_factory_method(Some("inactive"))
			.unwrap_err()
			.to_string();
		assert!(message.contains("Widget"));
		assert!(message.contains("inactive"));
	}

	#[rstest]
	fn test_set_type_last_write_wins() {
		let mut blueprint = Blueprint::new();
		blueprint.set_type("widget").set_model::<Widget>();
		assert_eq!(blueprint.entity_type(), Some(&EntityRef::of::<Widget>()));
	}

	#[rstest]
	fn test_making_callbacks() {
		let mut blueprint = Blueprint::new();
		blueprint
			.after_making(|entity, _factory| async move { Ok::<_, FixtureError>(entity) })
			.after_making_state("inactive", |entity, _factory| async move { Ok::<_, FixtureError>(entity) });

		assert!(blueprint.has_making_callback_method(None));
		assert!(blueprint.get_making_callback_method(None).is_some());
		assert!(blueprint.has_making_callback_method(Some("inactive")));
		assert!(blueprint.get_making_callback_method(Some("inactive")).is_some());

		assert!(!blueprint.has_making_callback_method(Some("active")));
		assert!(blueprint.get_making_callback_method(Some("active")).is_none());
		assert!(!blueprint.has_creating_callback_method(None));
	}

	#[rstest]
	fn test_creating_callbacks() {
		let mut blueprint = Blueprint::new();
		blueprint
			.after_creating(|entity, _factory| async move { Ok::<_, FixtureError>(entity) })
			.after_creating_state("inactive", |entity, _factory| async move { Ok::<_, FixtureError>(entity) });

		assert!(blueprint.has_creating_callback_method(None));
		assert!(blueprint.get_creating_callback_method(None).is_some());
		assert!(blueprint.has_creating_callback_method(Some("inactive")));
		assert!(blueprint.get_creating_callback_method(Some("inactive")).is_some());

		assert!(blueprint.get_creating_callback_method(Some("active")).is_none());
		assert!(!blueprint.has_making_callback_method(Some("inactive")));
	}

	#[rstest]
	fn test_context_merges() {
		let mut blueprint = Blueprint::new();
		blueprint
			.context(BlueprintOptions::new().with_extension("a", 1))
			.context(BlueprintOptions::new().with_extension("b", 2));

		let context = blueprint.get_context();
		assert_eq!(context.extension("a"), Some(&json!(1)));
		assert_eq!(context.extension("b"), Some(&json!(2)));
	}

	#[rstest]
	fn test_queries_are_idempotent() {
		let mut blueprint = Blueprint::new();
		blueprint
			.set_type("widget")
			.define(json!({}))
			.context(BlueprintOptions::new().with_generate_id(false));

		for _ in 0..3 {
			assert!(blueprint.has_factory_method(None));
			assert_eq!(blueprint.get_context().generate_id, Some(false));
		}
	}

	#[rstest]
	fn test_state_names() {
		let mut blueprint = Blueprint::new();
		blueprint
			.set_type("widget")
			.define(json!({}))
			.state("b", json!({}))
			.state("a", json!({}));
		assert_eq!(blueprint.state_names(), vec!["a", "b"]);
	}
}
