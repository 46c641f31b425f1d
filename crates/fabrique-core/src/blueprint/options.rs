//! Blueprint options threaded through to adapter calls.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open configuration bag carried by a blueprint.
///
/// The id-related options are typed; anything adapter-specific lives in
/// `extensions`. Unset options defer to the adapter's own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlueprintOptions {
	/// Whether the adapter should assign ids on create.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub generate_id: Option<bool>,

	/// Name of the id attribute.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id_attribute: Option<String>,

	/// Whether generated ids are UUIDs rather than sequential integers.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub uuid_primary: Option<bool>,

	/// Adapter-specific keys.
	#[serde(flatten)]
	pub extensions: Map<String, Value>,
}

impl BlueprintOptions {
	/// Creates an empty option set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets `generate_id`.
	pub fn with_generate_id(mut self, generate_id: bool) -> Self {
		self.generate_id = Some(generate_id);
		self
	}

	/// Sets `id_attribute`.
	pub fn with_id_attribute(mut self, id_attribute: impl Into<String>) -> Self {
		self.id_attribute = Some(id_attribute.into());
		self
	}

	/// Sets `uuid_primary`.
	pub fn with_uuid_primary(mut self, uuid_primary: bool) -> Self {
		self.uuid_primary = Some(uuid_primary);
		self
	}

	/// Adds an adapter-specific key.
	pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.extensions.insert(key.into(), value.into());
		self
	}

	/// Returns an adapter-specific key.
	pub fn extension(&self, key: &str) -> Option<&Value> {
		self.extensions.get(key)
	}

	/// Merges `other` into `self`. Options set in `other` win; unset ones
	/// leave the current value alone.
	pub fn merge(&mut self, other: BlueprintOptions) {
		if other.generate_id.is_some() {
			self.generate_id = other.generate_id;
		}
		if other.id_attribute.is_some() {
			self.id_attribute = other.id_attribute;
		}
		if other.uuid_primary.is_some() {
			self.uuid_primary = other.uuid_primary;
		}
		self.extensions.extend(other.extensions);
	}

	/// Owned variant of [`merge`](Self::merge).
	pub fn merged(mut self, other: BlueprintOptions) -> Self {
		self.merge(other);
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_merge_keeps_unset_options() {
		let base = BlueprintOptions::new()
			.with_generate_id(false)
			.with_id_attribute("uuid");
		let merged = base.merged(BlueprintOptions::new().with_uuid_primary(true));

		assert_eq!(merged.generate_id, Some(false));
		assert_eq!(merged.id_attribute.as_deref(), Some("uuid"));
		assert_eq!(merged.uuid_primary, Some(true));
	}

	#[rstest]
	fn test_merge_overrides_set_options() {
		let merged = BlueprintOptions::new()
			.with_id_attribute("id")
			.merged(BlueprintOptions::new().with_id_attribute("pk"));
		assert_eq!(merged.id_attribute.as_deref(), Some("pk"));
	}

	#[rstest]
	fn test_extensions_merge() {
		let merged = BlueprintOptions::new()
			.with_extension("a", 1)
			.merged(BlueprintOptions::new().with_extension("b", 2));
		assert_eq!(merged.extension("a"), Some(&json!(1)));
		assert_eq!(merged.extension("b"), Some(&json!(2)));
	}

	#[rstest]
	fn test_deserialize_with_extensions() {
		let options: BlueprintOptions =
			serde_json::from_value(json!({"id_attribute": "pk", "table": "posts"})).unwrap();
		assert_eq!(options.id_attribute.as_deref(), Some("pk"));
		assert_eq!(options.extension("table"), Some(&json!("posts")));
		assert_eq!(options.generate_id, None);
	}
}
