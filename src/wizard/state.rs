//! FormState - the single aggregate record behind a wizard run
//!
//! Every wizard owns exactly one FormState for its lifetime. Fields are
//! addressed by dot-separated paths ("network.total_devices") and start
//! from the typed record's defaults, so the state is always renderable.
//! No validation happens at write time; that is the validator's job.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Aggregate form state addressed by dot-separated paths
#[derive(Debug, Clone)]
pub struct FormState {
    root: Value,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }
}

impl FormState {
    /// Create an empty form state
    pub fn new() -> Self {
        Self::default()
    }

    /// Build form state from a typed record (its serialization is the default shape)
    pub fn from_typed<T: Serialize>(record: &T) -> Result<Self> {
        let root = serde_json::to_value(record).context("Failed to serialize form defaults")?;
        match root {
            Value::Object(_) => Ok(Self { root }),
            other => anyhow::bail!("form defaults must serialize to an object, got {}", other),
        }
    }

    /// Deserialize the aggregate into the typed submission payload
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.root.clone()).context("Form state does not match the record shape")
    }

    /// Raw aggregate value
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Read the value at a dot-separated path
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// String at path, if present
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Unsigned number at path, if present
    pub fn get_u64(&self, path: &str) -> Option<u64> {
        self.get(path).and_then(Value::as_u64)
    }

    /// Bool at path, if present
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    /// Array at path, if present
    pub fn get_array(&self, path: &str) -> Option<&Vec<Value>> {
        self.get(path).and_then(Value::as_array)
    }

    /// Replace the value at a dot-separated path, creating intermediate
    /// objects as needed. A non-object intermediate is replaced by an object.
    pub fn set(&mut self, path: &str, value: Value) {
        let segments: Vec<&str> = path.split('.').collect();
        let mut current = &mut self.root;

        for segment in &segments[..segments.len() - 1] {
            if !current.is_object() {
                *current = Value::Object(Map::new());
            }
            let map = current
                .as_object_mut()
                .expect("object ensured above");
            current = map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        if let Some(map) = current.as_object_mut() {
            map.insert(segments[segments.len() - 1].to_string(), value);
        }
    }

    /// Shallow-merge an object into the value at path. Non-object patches
    /// fall back to a plain replace.
    pub fn merge(&mut self, path: &str, patch: Value) {
        let Value::Object(patch_map) = patch else {
            self.set(path, patch);
            return;
        };

        match self.get(path) {
            Some(Value::Object(existing)) => {
                let mut merged = existing.clone();
                for (key, value) in patch_map {
                    merged.insert(key, value);
                }
                self.set(path, Value::Object(merged));
            }
            _ => self.set(path, Value::Object(patch_map)),
        }
    }

    /// Whether a required field counts as filled in: present, non-null,
    /// non-blank string, non-zero number, non-empty array.
    pub fn is_populated(&self, path: &str) -> bool {
        match self.get(path) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(true),
            Some(Value::Bool(_)) | Some(Value::Object(_)) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_and_get_nested_path() {
        let mut state = FormState::new();
        state.set("network.total_devices", json!(1200));

        assert_eq!(state.get_u64("network.total_devices"), Some(1200));
        assert!(state.get("network").unwrap().is_object());
    }

    #[test]
    fn test_set_replaces_scalar_intermediate() {
        let mut state = FormState::new();
        state.set("network", json!("oops"));
        state.set("network.total_devices", json!(5));

        assert_eq!(state.get_u64("network.total_devices"), Some(5));
    }

    #[test]
    fn test_merge_is_shallow() {
        let mut state = FormState::new();
        state.set("organization", json!({"size": "medium", "region": "emea"}));
        state.merge("organization", json!({"region": "amer"}));

        assert_eq!(state.get_str("organization.size"), Some("medium"));
        assert_eq!(state.get_str("organization.region"), Some("amer"));
    }

    #[test]
    fn test_is_populated() {
        let mut state = FormState::new();
        state.set("name", json!("Acme NAC"));
        state.set("blank", json!("   "));
        state.set("count", json!(0));
        state.set("flag", json!(false));
        state.set("items", json!([]));

        assert!(state.is_populated("name"));
        assert!(!state.is_populated("blank"));
        assert!(!state.is_populated("count"));
        assert!(state.is_populated("flag"));
        assert!(!state.is_populated("items"));
        assert!(!state.is_populated("missing"));
    }

    #[test]
    fn test_typed_round_trip_preserves_scalars() {
        #[derive(serde::Serialize, serde::Deserialize, Default, PartialEq, Debug)]
        struct Sample {
            name: String,
            devices: u64,
        }

        let mut state = FormState::from_typed(&Sample::default()).unwrap();
        state.set("name", json!("Acme NAC"));
        state.set("devices", json!(420));

        let typed: Sample = state.to_typed().unwrap();
        assert_eq!(typed.name, "Acme NAC");
        assert_eq!(typed.devices, 420);

        let back = FormState::from_typed(&typed).unwrap();
        assert_eq!(back.get_str("name"), Some("Acme NAC"));
        assert_eq!(back.get_u64("devices"), Some(420));
    }
}
