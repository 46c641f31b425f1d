//! Factory settings loaded from TOML.
//!
//! ```toml
//! [adapter]
//! generate_id = true
//! default_id_attribute = "id"
//! uuid_primary = false
//!
//! [faker]
//! seed = 42
//! ```
//!
//! Every key is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::adapter::ObjectAdapterOptions;
use crate::error::FixtureResult;
use crate::faker::{FakeDataProvider, SharedFaker};

/// Random data settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FakerSettings {
	/// Seed for reproducible data. Entropy-seeded when unset.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub seed: Option<u64>,
}

impl FakerSettings {
	/// Sets the seed.
	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	/// Builds the configured provider.
	pub fn provider(&self) -> SharedFaker {
		match self.seed {
			Some(seed) => FakeDataProvider::seeded(seed).shared(),
			None => FakeDataProvider::new().shared(),
		}
	}
}

/// Settings for [`EntityFactory::from_settings`](crate::factory::EntityFactory::from_settings).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorySettings {
	/// Object adapter defaults.
	pub adapter: ObjectAdapterOptions,
	/// Random data settings.
	pub faker: FakerSettings,
}

impl FactorySettings {
	/// Creates default settings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the adapter options.
	pub fn with_adapter(mut self, adapter: ObjectAdapterOptions) -> Self {
		self.adapter = adapter;
		self
	}

	/// Sets the faker settings.
	pub fn with_faker(mut self, faker: FakerSettings) -> Self {
		self.faker = faker;
		self
	}

	/// Load settings from a TOML file.
	///
	/// # Errors
	///
	/// Returns error if file cannot be read or parsed.
	pub fn from_file(path: impl AsRef<Path>) -> FixtureResult<Self> {
		let content = std::fs::read_to_string(path.as_ref())?;
		Self::from_toml_str(&content)
	}

	/// Parse settings from a TOML string.
	pub fn from_toml_str(content: &str) -> FixtureResult<Self> {
		Ok(toml::from_str(content)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::FixtureError;
	use rstest::rstest;
	use std::io::Write;

	#[rstest]
	fn test_empty_document_gives_defaults() {
		let settings = FactorySettings::from_toml_str("").unwrap();
		assert_eq!(settings, FactorySettings::default());
		assert!(settings.adapter.generate_id);
		assert_eq!(settings.adapter.default_id_attribute, "id");
		assert_eq!(settings.faker.seed, None);
	}

	#[rstest]
	fn test_partial_document() {
		let settings = FactorySettings::from_toml_str(
			r#"
			[adapter]
			uuid_primary = true

			[faker]
			seed = 42
			"#,
		)
		.unwrap();

		assert!(settings.adapter.uuid_primary);
		assert!(settings.adapter.generate_id);
		assert_eq!(settings.faker.seed, Some(42));
	}

	#[rstest]
	fn test_invalid_document() {
		let result = FactorySettings::from_toml_str("[adapter]\ngenerate_id = \"yes\"");
		assert!(matches!(result, Err(FixtureError::TomlError(_))));
	}

	#[rstest]
	fn test_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[adapter]\ndefault_id_attribute = \"pk\"").unwrap();

		let settings = FactorySettings::from_file(file.path()).unwrap();
		assert_eq!(settings.adapter.default_id_attribute, "pk");
	}

	#[rstest]
	fn test_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let result = FactorySettings::from_file(dir.path().join("fabrique.toml"));
		assert!(matches!(result, Err(FixtureError::IoError(_))));
	}

	#[rstest]
	fn test_seeded_providers_agree() {
		let settings = FakerSettings::default().with_seed(7);
		let first = settings.provider();
		let second = settings.provider();
		assert_eq!(first.words(4), second.words(4));
	}
}
