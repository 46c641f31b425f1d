//! Lifecycle callbacks run after making or creating entities.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::entity::Entity;
use crate::error::FixtureResult;
use crate::factory::EntityFactory;

type CallbackFn =
	dyn Fn(Entity, EntityFactory) -> BoxFuture<'static, FixtureResult<Entity>> + Send + Sync;

/// Async hook receiving an entity and returning it, possibly modified.
#[derive(Clone)]
pub struct Callback {
	callback: Arc<CallbackFn>,
}

impl Callback {
	/// Wraps an async closure.
	pub fn new<F, Fut>(callback: F) -> Self
	where
		F: Fn(Entity, EntityFactory) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = FixtureResult<Entity>> + Send + 'static,
	{
		Self {
			callback: Arc::new(move |entity, factory| callback(entity, factory).boxed()),
		}
	}

	/// Invokes the callback.
	pub fn call(&self, entity: Entity, factory: EntityFactory) -> BoxFuture<'static, FixtureResult<Entity>> {
		(self.callback)(entity, factory)
	}
}

impl fmt::Debug for Callback {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Callback(..)")
	}
}
