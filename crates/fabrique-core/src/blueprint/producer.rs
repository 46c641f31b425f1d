//! Attribute producers.
//!
//! Blueprints accept either async closures over the random data provider or
//! static partial records. Both are normalized into a [`Producer`].

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::attributes::Attributes;
use crate::entity::Fields;
use crate::error::{FixtureError, FixtureResult};
use crate::faker::SharedFaker;

type ProduceFn = dyn Fn(SharedFaker) -> BoxFuture<'static, FixtureResult<Attributes>> + Send + Sync;

/// Normalized attribute-producing function.
#[derive(Clone)]
pub struct Producer {
	produce: Arc<ProduceFn>,
}

impl Producer {
	/// Producer from an async closure.
	pub fn from_fn<F, Fut>(produce: F) -> Self
	where
		F: Fn(SharedFaker) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Attributes> + Send + 'static,
	{
		Self {
			produce: Arc::new(move |faker| {
				let fut = produce(faker);
				async move { Ok::<_, FixtureError>(fut.await) }.boxed()
			}),
		}
	}

	/// Producer from a fallible async closure.
	pub fn try_from_fn<F, Fut>(produce: F) -> Self
	where
		F: Fn(SharedFaker) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = FixtureResult<Attributes>> + Send + 'static,
	{
		Self {
			produce: Arc::new(move |faker| produce(faker).boxed()),
		}
	}

	/// Producer returning a copy of a static partial record.
	pub fn from_partial(fields: Fields) -> Self {
		Self {
			produce: Arc::new(move |_: SharedFaker| {
				let attributes = Attributes::from(fields.clone());
				async move { Ok::<_, FixtureError>(attributes) }.boxed()
			}),
		}
	}

	/// Producer from a JSON value, which must be an object.
	pub fn from_value(value: Value) -> Self {
		match value {
			Value::Object(fields) => Self::from_partial(fields),
			other => {
				let message = format!("static partial must be a JSON object, got {}", other);
				Self {
					produce: Arc::new(move |_: SharedFaker| {
						let error = FixtureError::InvalidAttributes(message.clone());
						async move { Err::<Attributes, _>(error) }.boxed()
					}),
				}
			}
		}
	}

	/// Invokes the producer.
	pub fn produce(&self, faker: SharedFaker) -> BoxFuture<'static, FixtureResult<Attributes>> {
		(self.produce)(faker)
	}
}

impl fmt::Debug for Producer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Producer(..)")
	}
}

/// Marker for async closure producers.
pub struct FnProducer;

/// Marker for static partial producers.
pub struct PartialProducer;

/// Conversion into a [`Producer`].
///
/// The marker parameter keeps the closure and partial implementations apart.
pub trait IntoProducer<M> {
	/// Performs the conversion.
	fn into_producer(self) -> Producer;
}

impl IntoProducer<()> for Producer {
	fn into_producer(self) -> Producer {
		self
	}
}

impl<F, Fut> IntoProducer<FnProducer> for F
where
	F: Fn(SharedFaker) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Attributes> + Send + 'static,
{
	fn into_producer(self) -> Producer {
		Producer::from_fn(self)
	}
}

impl IntoProducer<PartialProducer> for Fields {
	fn into_producer(self) -> Producer {
		Producer::from_partial(self)
	}
}

impl IntoProducer<PartialProducer> for Value {
	fn into_producer(self) -> Producer {
		Producer::from_value(self)
	}
}
