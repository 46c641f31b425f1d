//! The entity factory: composes blueprints, adapters and the faker.
//!
//! [`EntityFactory`] owns the adapter, the random data provider and a
//! [`BlueprintRegistry`]. Requests go through an [`EntityBuilder`]:
//!
//! ```ignore
//! let factory = EntityFactory::builder()
//!     .adapter(ObjectAdapter::default())
//!     .profile(PostProfile)
//!     .build()?;
//!
//! let posts = factory
//!     .for_type::<Post>()
//!     .state("with-author")
//!     .count(3)
//!     .create()
//!     .await?;
//! ```

mod builder;
mod registry;

use std::fmt;
use std::sync::Arc;

pub use builder::EntityBuilder;
pub use registry::BlueprintRegistry;

use crate::adapter::{Adapter, ObjectAdapter};
use crate::blueprint::Blueprint;
use crate::entity::{EntityRef, FixtureModel};
use crate::error::FixtureResult;
use crate::faker::{FakeDataProvider, SharedFaker};
use crate::profile::Profile;
use crate::settings::FactorySettings;

struct FactoryInner {
	adapter: Arc<dyn Adapter>,
	faker: SharedFaker,
	registry: BlueprintRegistry,
}

/// Cheaply cloneable handle to a factory.
#[derive(Clone)]
pub struct EntityFactory {
	inner: Arc<FactoryInner>,
}

impl EntityFactory {
	/// Creates a factory over `adapter` with an entropy-seeded faker.
	pub fn new(adapter: impl Adapter + 'static) -> Self {
		Self::from_parts(Arc::new(adapter), FakeDataProvider::new().shared())
	}

	/// Creates a factory from an adapter and faker.
	pub fn from_parts(adapter: Arc<dyn Adapter>, faker: SharedFaker) -> Self {
		Self {
			inner: Arc::new(FactoryInner {
				adapter,
				faker,
				registry: BlueprintRegistry::new(),
			}),
		}
	}

	/// Creates a factory with an [`ObjectAdapter`] configured from settings.
	pub fn from_settings(settings: &FactorySettings) -> Self {
		Self::from_parts(
			Arc::new(ObjectAdapter::new(settings.adapter.clone())),
			settings.faker.provider(),
		)
	}

	/// Starts building a factory.
	pub fn builder() -> EntityFactoryBuilder {
		EntityFactoryBuilder::default()
	}

	/// Returns the adapter.
	pub fn adapter(&self) -> &Arc<dyn Adapter> {
		&self.inner.adapter
	}

	/// Returns the random data provider.
	pub fn faker(&self) -> SharedFaker {
		Arc::clone(&self.inner.faker)
	}

	/// Returns the blueprint registry.
	pub fn registry(&self) -> &BlueprintRegistry {
		&self.inner.registry
	}

	/// Runs `profile` on a fresh blueprint and registers the result.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::Configuration`](crate::FixtureError::Configuration)
	/// if the profile never sets an entity type.
	pub fn register_profile(&self, profile: &dyn Profile) -> FixtureResult<EntityRef> {
		let mut blueprint = Blueprint::new();
		profile.register(&mut blueprint);
		self.register_blueprint(blueprint)
	}

	/// Registers a hand-built blueprint.
	pub fn register_blueprint(&self, blueprint: Blueprint) -> FixtureResult<EntityRef> {
		self.inner.registry.register(blueprint)
	}

	/// Returns true if a blueprint is registered for the entity type.
	pub fn has_blueprint(&self, entity_type: &EntityRef) -> bool {
		self.inner.registry.has(entity_type)
	}

	/// Returns the blueprint for the entity type.
	pub fn blueprint(&self, entity_type: &EntityRef) -> FixtureResult<Arc<Blueprint>> {
		self.inner.registry.require(entity_type)
	}

	/// Starts a request for the nominal type `T`.
	pub fn for_type<T: FixtureModel>(&self) -> EntityBuilder {
		self.for_entity(EntityRef::of::<T>())
	}

	/// Starts a request for a string-keyed entity.
	pub fn for_key(&self, key: impl Into<String>) -> EntityBuilder {
		self.for_entity(EntityRef::Named(key.into()))
	}

	/// Starts a request for any entity reference.
	pub fn for_entity(&self, entity_type: impl Into<EntityRef>) -> EntityBuilder {
		EntityBuilder::new(self.clone(), entity_type.into())
	}
}

impl fmt::Debug for EntityFactory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EntityFactory")
			.field("blueprints", &self.inner.registry.len())
			.finish_non_exhaustive()
	}
}

/// Builder for [`EntityFactory`].
#[derive(Default)]
pub struct EntityFactoryBuilder {
	adapter: Option<Arc<dyn Adapter>>,
	faker: Option<SharedFaker>,
	profiles: Vec<Box<dyn Profile>>,
	blueprints: Vec<Blueprint>,
}

impl EntityFactoryBuilder {
	/// Sets the adapter. Defaults to [`ObjectAdapter::default`].
	pub fn adapter(mut self, adapter: impl Adapter + 'static) -> Self {
		self.adapter = Some(Arc::new(adapter));
		self
	}

	/// Sets a shared adapter.
	pub fn shared_adapter(mut self, adapter: Arc<dyn Adapter>) -> Self {
		self.adapter = Some(adapter);
		self
	}

	/// Sets the random data provider. Defaults to an entropy-seeded
	/// [`FakeDataProvider`].
	pub fn faker(mut self, faker: SharedFaker) -> Self {
		self.faker = Some(faker);
		self
	}

	/// Adds a profile to register on build.
	pub fn profile(mut self, profile: impl Profile + 'static) -> Self {
		self.profiles.push(Box::new(profile));
		self
	}

	/// Adds a blueprint to register on build.
	pub fn blueprint(mut self, blueprint: Blueprint) -> Self {
		self.blueprints.push(blueprint);
		self
	}

	/// Builds the factory and registers every profile and blueprint.
	///
	/// # Errors
	///
	/// Fails if a profile or blueprint has no entity type.
	pub fn build(self) -> FixtureResult<EntityFactory> {
		let adapter = self
			.adapter
			.unwrap_or_else(|| Arc::new(ObjectAdapter::default()));
		let faker = self
			.faker
			.unwrap_or_else(|| FakeDataProvider::new().shared());

		let factory = EntityFactory::from_parts(adapter, faker);
		for profile in &self.profiles {
			factory.register_profile(profile.as_ref())?;
		}
		for blueprint in self.blueprints {
			factory.register_blueprint(blueprint)?;
		}
		Ok(factory)
	}
}

impl fmt::Debug for EntityFactoryBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EntityFactoryBuilder")
			.field("profiles", &self.profiles.len())
			.field("blueprints", &self.blueprints.len())
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::FixtureError;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_builder_registers_profiles_and_blueprints() {
		let mut gadget = Blueprint::new();
		gadget.set_type("gadget").define(json!({}));

		let factory = EntityFactory::builder()
			.profile(|blueprint: &mut Blueprint| {
				blueprint.set_type("widget").define(json!({"name": "widgetizer"}));
			})
			.blueprint(gadget)
			.build()
			.unwrap();

		assert!(factory.has_blueprint(&EntityRef::named("widget")));
		assert!(factory.has_blueprint(&EntityRef::named("gadget")));
		assert_eq!(factory.registry().len(), 2);
	}

	#[rstest]
	fn test_profile_without_type_fails() {
		let result = EntityFactory::builder()
			.profile(|blueprint: &mut Blueprint| {
				blueprint.define(json!({}));
			})
			.build();
		assert!(matches!(result, Err(FixtureError::Configuration(_))));
	}

	#[rstest]
	fn test_missing_blueprint() {
		let factory = EntityFactory::new(ObjectAdapter::default());
		let result = factory.blueprint(&EntityRef::named("widget"));
		assert!(matches!(result, Err(FixtureError::BlueprintNotFound(_))));
	}

	#[rstest]
	fn test_clones_share_registry() {
		let factory = EntityFactory::new(ObjectAdapter::default());
		let clone = factory.clone();
		factory
			.register_profile(&|blueprint: &mut Blueprint| {
				blueprint.set_type("widget").define(json!({}));
			})
			.unwrap();
		assert!(clone.has_blueprint(&EntityRef::named("widget")));
	}
}
