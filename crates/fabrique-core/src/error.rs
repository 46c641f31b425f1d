//! Error types for fixture generation.
//!
//! This module defines the error types used throughout the fabrique-core crate.

use thiserror::Error;

/// Errors that can occur while building or persisting fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
	/// The blueprint (or profile) is missing required configuration,
	/// most commonly its entity type.
	#[error("Configuration error: {0}")]
	Configuration(String),

	/// No factory method is registered under the requested state.
	#[error("Factory method not defined for entity {entity}, state: {state}")]
	UnknownState {
		/// Entity type the lookup was made for.
		entity: String,
		/// State name that has no factory method.
		state: String,
	},

	/// No blueprint is registered for the entity type.
	#[error("Blueprint not found: {0}")]
	BlueprintNotFound(String),

	/// An entity instance could not be constructed or converted.
	#[error("Instantiation error: {entity}: {message}")]
	Instantiation {
		/// Entity type being instantiated.
		entity: String,
		/// Failure detail.
		message: String,
	},

	/// Attribute data had an unexpected shape.
	#[error("Invalid attributes: {0}")]
	InvalidAttributes(String),

	/// A lifecycle callback failed.
	#[error("Callback error: {entity}: {message}")]
	Callback {
		/// Entity type the callback was registered for.
		entity: String,
		/// Failure detail.
		message: String,
	},

	/// An adapter failed to make or persist entities.
	#[error("Adapter error: {0}")]
	Adapter(String),

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	JsonError(#[from] serde_json::Error),

	/// Settings could not be parsed.
	#[error("TOML error: {0}")]
	TomlError(#[from] toml::de::Error),

	/// I/O operation failed.
	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

impl FixtureError {
	/// Builds an [`FixtureError::UnknownState`] for the given entity and state.
	///
	/// The base (unnamed) state is reported as `default`.
	pub fn unknown_state(entity: impl ToString, state: Option<&str>) -> Self {
		Self::UnknownState {
			entity: entity.to_string(),
			state: state.unwrap_or(crate::blueprint::DEFAULT_STATE_LABEL).to_string(),
		}
	}

	/// Builds a [`FixtureError::Callback`] from any displayable failure.
	pub fn callback(entity: impl ToString, message: impl ToString) -> Self {
		Self::Callback {
			entity: entity.to_string(),
			message: message.to_string(),
		}
	}

	/// Returns true for the two lookup failures raised by a blueprint.
	pub fn is_lookup_error(&self) -> bool {
		matches!(self, Self::Configuration(_) | Self::UnknownState { .. })
	}
}

/// Result type alias for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;
