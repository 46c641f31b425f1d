//! Convenience re-exports for common usage.
//!
//! ```ignore
//! use fabrique_core::prelude::*;
//! ```

// Error types
pub use crate::error::{FixtureError, FixtureResult};

// Entities and attributes
pub use crate::attributes::{AttributeValue, Attributes};
pub use crate::entity::{Entity, EntityRef, Fields, FixtureModel, TypeDescriptor};

// Blueprints
pub use crate::blueprint::{Blueprint, BlueprintOptions, Callback, IntoProducer, Producer};
pub use crate::profile::Profile;

// Adapters
pub use crate::adapter::{Adapter, AdapterContext, ObjectAdapter, ObjectAdapterOptions};

// Factory
pub use crate::factory::{BlueprintRegistry, EntityBuilder, EntityFactory, EntityFactoryBuilder};
pub use crate::faker::{FakeDataProvider, RandomDataProvider, SharedFaker};
pub use crate::settings::{FactorySettings, FakerSettings};

// Serde derives for model types
pub use serde::{Deserialize, Serialize};
