//! Per-request entity builder.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::EntityFactory;
use crate::adapter::AdapterContext;
use crate::attributes::Attributes;
use crate::blueprint::{Blueprint, BlueprintOptions, Callback, IntoProducer, Producer};
use crate::entity::{Entity, EntityRef, Fields};
use crate::error::{FixtureError, FixtureResult};

/// Everything a request needs, resolved up front so lookup failures surface
/// before any await.
struct BuildPlan {
	blueprint: Arc<Blueprint>,
	producers: Vec<Producer>,
	context: AdapterContext,
}

/// Describes one make/create request: entity type, states, count, overrides
/// and per-call options.
#[must_use = "builders do nothing until `make` or `create` is awaited"]
pub struct EntityBuilder {
	factory: EntityFactory,
	entity_type: EntityRef,
	states: Vec<String>,
	count: usize,
	overrides: Option<Producer>,
	options: BlueprintOptions,
}

impl EntityBuilder {
	pub(super) fn new(factory: EntityFactory, entity_type: EntityRef) -> Self {
		Self {
			factory,
			entity_type,
			states: Vec::new(),
			count: 1,
			overrides: None,
			options: BlueprintOptions::default(),
		}
	}

	/// Applies a named state. States merge in the order requested.
	pub fn state(mut self, name: impl Into<String>) -> Self {
		self.states.push(name.into());
		self
	}

	/// Applies several named states.
	pub fn states<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.states.extend(names.into_iter().map(Into::into));
		self
	}

	/// Sets how many entities to build. Defaults to 1.
	pub fn count(mut self, count: usize) -> Self {
		self.count = count;
		self
	}

	/// Merges attributes over the blueprint output for every entity.
	///
	/// Accepts the same forms as [`Blueprint::define`].
	pub fn with<M>(mut self, overrides: impl IntoProducer<M>) -> Self {
		self.overrides = Some(overrides.into_producer());
		self
	}

	/// Per-call options merged over the blueprint's options.
	pub fn context(mut self, options: BlueprintOptions) -> Self {
		self.options.merge(options);
		self
	}

	/// Returns the requested states.
	pub fn requested_states(&self) -> &[String] {
		&self.states
	}

	fn plan(&self) -> FixtureResult<BuildPlan> {
		let blueprint = self.factory.blueprint(&self.entity_type)?;

		let mut producers = Vec::with_capacity(self.states.len() + 1);
		producers.push(blueprint.get_factory_method(None)?);
		for state in &self.states {
			producers.push(blueprint.get_factory_method(Some(state))?);
		}

		let options = blueprint.get_context().clone().merged(self.options.clone());
		let context = AdapterContext::new(self.entity_type.clone(), options);

		Ok(BuildPlan {
			blueprint,
			producers,
			context,
		})
	}

	fn callbacks(
		&self,
		blueprint: &Blueprint,
		lookup: fn(&Blueprint, Option<&str>) -> Option<Callback>,
	) -> Vec<Callback> {
		std::iter::once(None)
			.chain(self.states.iter().map(|state| Some(state.as_str())))
			.filter_map(|name| lookup(blueprint, name))
			.collect()
	}

	async fn produce(&self, plan: &BuildPlan) -> FixtureResult<Vec<Fields>> {
		let faker = self.factory.faker();
		let mut records = Vec::with_capacity(self.count);

		for _ in 0..self.count {
			let mut attributes = Attributes::new();
			for producer in &plan.producers {
				attributes.merge(producer.produce(Arc::clone(&faker)).await?);
			}
			if let Some(overrides) = &self.overrides {
				attributes.merge(overrides.produce(Arc::clone(&faker)).await?);
			}
			records.push(attributes.resolve(&self.factory).await?);
		}

		Ok(records)
	}

	async fn run_callbacks(
		&self,
		entities: Vec<Entity>,
		callbacks: &[Callback],
	) -> FixtureResult<Vec<Entity>> {
		if callbacks.is_empty() {
			return Ok(entities);
		}

		let mut processed = Vec::with_capacity(entities.len());
		for mut entity in entities {
			for callback in callbacks {
				entity = callback.call(entity, self.factory.clone()).await?;
			}
			processed.push(entity);
		}
		Ok(processed)
	}

	async fn make_planned(&self, plan: &BuildPlan) -> FixtureResult<Vec<Entity>> {
		let records = self.produce(plan).await?;
		tracing::debug!(
			entity = %self.entity_type,
			count = records.len(),
			states = ?self.states,
			"making entities"
		);

		let entities = self
			.factory
			.adapter()
			.make(records, &plan.context)
			.await?;
		let callbacks = self.callbacks(&plan.blueprint, Blueprint::get_making_callback_method);
		self.run_callbacks(entities, &callbacks).await
	}

	/// Produces, resolves and merges the attribute records without handing
	/// them to the adapter.
	///
	/// # Errors
	///
	/// Fails before producing anything if the blueprint, its base definition
	/// or any requested state is missing.
	pub async fn attributes(self) -> FixtureResult<Vec<Fields>> {
		let plan = self.plan()?;
		self.produce(&plan).await
	}

	/// Builds entities in memory and runs the after-making callbacks.
	pub async fn make(self) -> FixtureResult<Vec<Entity>> {
		let plan = self.plan()?;
		self.make_planned(&plan).await
	}

	/// Builds and persists entities, running after-making then
	/// after-creating callbacks.
	pub async fn create(self) -> FixtureResult<Vec<Entity>> {
		let plan = self.plan()?;
		let entities = self.make_planned(&plan).await?;

		tracing::debug!(
			entity = %self.entity_type,
			count = entities.len(),
			"creating entities"
		);
		let entities = self
			.factory
			.adapter()
			.create(entities, &plan.context)
			.await?;
		let callbacks = self.callbacks(&plan.blueprint, Blueprint::get_creating_callback_method);
		self.run_callbacks(entities, &callbacks).await
	}

	/// Makes a single entity.
	pub async fn make_one(self) -> FixtureResult<Entity> {
		let entity_type = self.entity_type.clone();
		first(self.count(1).make().await?, &entity_type)
	}

	/// Creates a single entity.
	pub async fn create_one(self) -> FixtureResult<Entity> {
		let entity_type = self.entity_type.clone();
		first(self.count(1).create().await?, &entity_type)
	}

	/// Makes entities and converts them into `T`.
	pub async fn make_as<T: DeserializeOwned>(self) -> FixtureResult<Vec<T>> {
		self.make().await?.into_iter().map(Entity::into_model).collect()
	}

	/// Creates entities and converts them into `T`.
	pub async fn create_as<T: DeserializeOwned>(self) -> FixtureResult<Vec<T>> {
		self.create().await?.into_iter().map(Entity::into_model).collect()
	}

	/// Makes a single entity converted into `T`.
	pub async fn make_one_as<T: DeserializeOwned>(self) -> FixtureResult<T> {
		self.make_one().await?.into_model()
	}

	/// Creates a single entity converted into `T`.
	pub async fn create_one_as<T: DeserializeOwned>(self) -> FixtureResult<T> {
		self.create_one().await?.into_model()
	}
}

fn first(entities: Vec<Entity>, entity_type: &EntityRef) -> FixtureResult<Entity> {
	entities.into_iter().next().ok_or_else(|| {
		FixtureError::Adapter(format!("adapter returned no entity for {}", entity_type))
	})
}

impl std::fmt::Debug for EntityBuilder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EntityBuilder")
			.field("entity_type", &self.entity_type)
			.field("states", &self.states)
			.field("count", &self.count)
			.field("options", &self.options)
			.finish_non_exhaustive()
	}
}
