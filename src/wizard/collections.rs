//! Derived collections - list-valued form fields with natural-key dedup
//!
//! Stakeholders, sites, pain points and requirements all live inside the
//! form aggregate as arrays of objects. Uniqueness is enforced by a natural
//! key (email, name, title) at insertion time; order is insertion order.

use crate::wizard::state::FormState;
use serde_json::Value;
use uuid::Uuid;

/// Descriptor for one list-valued field inside the form aggregate
#[derive(Debug, Clone, Copy)]
pub struct CollectionSpec {
    /// Dot path of the array within the form state
    pub path: &'static str,
    /// Field whose value makes an item unique
    pub natural_key: &'static str,
}

impl CollectionSpec {
    pub const fn new(path: &'static str, natural_key: &'static str) -> Self {
        Self { path, natural_key }
    }

    /// Current items (empty when the path is absent or not an array)
    pub fn items<'a>(&self, state: &'a FormState) -> &'a [Value] {
        state
            .get_array(self.path)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self, state: &FormState) -> usize {
        self.items(state).len()
    }

    pub fn is_empty(&self, state: &FormState) -> bool {
        self.items(state).is_empty()
    }

    /// Append an item. No-op returning false when an item with the same
    /// natural key (case-insensitive) already exists or the item is not an
    /// object. Items without an id are assigned one.
    pub fn add(&self, state: &mut FormState, item: Value) -> bool {
        let Value::Object(mut fields) = item else {
            return false;
        };

        let key = fields
            .get(self.natural_key)
            .and_then(Value::as_str)
            .map(normalize_key)
            .unwrap_or_default();

        let duplicate = self.items(state).iter().any(|existing| {
            existing
                .get(self.natural_key)
                .and_then(Value::as_str)
                .map(normalize_key)
                .map(|existing_key| existing_key == key)
                .unwrap_or(false)
        });
        if duplicate {
            return false;
        }

        let has_id = fields
            .get("id")
            .and_then(Value::as_str)
            .map(|id| !id.is_empty())
            .unwrap_or(false);
        if !has_id {
            fields.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        }

        let mut items = self.items(state).to_vec();
        items.push(Value::Object(fields));
        state.set(self.path, Value::Array(items));
        true
    }

    /// Remove the item at an index; false when out of range
    pub fn remove_at(&self, state: &mut FormState, index: usize) -> bool {
        let mut items = self.items(state).to_vec();
        if index >= items.len() {
            return false;
        }
        items.remove(index);
        state.set(self.path, Value::Array(items));
        true
    }

    /// Remove exactly the item with the given id; false when absent
    pub fn remove_by_id(&self, state: &mut FormState, id: &str) -> bool {
        let mut items = self.items(state).to_vec();
        let Some(position) = items
            .iter()
            .position(|item| item.get("id").and_then(Value::as_str) == Some(id))
        else {
            return false;
        };
        items.remove(position);
        state.set(self.path, Value::Array(items));
        true
    }

    /// Full replace of the item at an index, keeping its id when the
    /// replacement carries none; false when out of range
    pub fn update_at(&self, state: &mut FormState, index: usize, item: Value) -> bool {
        let Value::Object(mut fields) = item else {
            return false;
        };

        let mut items = self.items(state).to_vec();
        let Some(slot) = items.get_mut(index) else {
            return false;
        };

        if !fields.contains_key("id") {
            if let Some(existing_id) = slot.get("id").cloned() {
                fields.insert("id".to_string(), existing_id);
            }
        }
        *slot = Value::Object(fields);
        state.set(self.path, Value::Array(items));
        true
    }
}

fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const STAKEHOLDERS: CollectionSpec = CollectionSpec::new("stakeholders", "email");

    #[test]
    fn test_duplicate_natural_key_is_a_noop() {
        let mut state = FormState::new();

        assert!(STAKEHOLDERS.add(&mut state, json!({"email": "a@x.com", "name": "Ana"})));
        assert!(!STAKEHOLDERS.add(&mut state, json!({"email": "a@x.com", "name": "Copy"})));
        // Keys are compared case-insensitively
        assert!(!STAKEHOLDERS.add(&mut state, json!({"email": "A@X.COM", "name": "Shout"})));

        assert_eq!(STAKEHOLDERS.len(&state), 1);
        assert_eq!(
            STAKEHOLDERS.items(&state)[0].get("name").and_then(|v| v.as_str()),
            Some("Ana")
        );
    }

    #[test]
    fn test_add_assigns_id() {
        let mut state = FormState::new();
        STAKEHOLDERS.add(&mut state, json!({"email": "a@x.com"}));

        let id = STAKEHOLDERS.items(&state)[0]
            .get("id")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap();
        assert!(!id.is_empty());
    }

    #[test]
    fn test_remove_by_id_removes_exactly_one() {
        let mut state = FormState::new();
        STAKEHOLDERS.add(&mut state, json!({"email": "a@x.com"}));
        STAKEHOLDERS.add(&mut state, json!({"email": "b@x.com"}));

        let id = STAKEHOLDERS.items(&state)[0]
            .get("id")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap();

        assert!(STAKEHOLDERS.remove_by_id(&mut state, &id));
        assert_eq!(STAKEHOLDERS.len(&state), 1);
        assert!(!STAKEHOLDERS
            .items(&state)
            .iter()
            .any(|item| item.get("id").and_then(|v| v.as_str()) == Some(id.as_str())));

        assert!(!STAKEHOLDERS.remove_by_id(&mut state, &id));
    }

    #[test]
    fn test_remove_at_bounds() {
        let mut state = FormState::new();
        STAKEHOLDERS.add(&mut state, json!({"email": "a@x.com"}));

        assert!(!STAKEHOLDERS.remove_at(&mut state, 5));
        assert!(STAKEHOLDERS.remove_at(&mut state, 0));
        assert!(STAKEHOLDERS.is_empty(&state));
    }

    #[test]
    fn test_update_at_replaces_and_keeps_id() {
        let mut state = FormState::new();
        STAKEHOLDERS.add(&mut state, json!({"email": "a@x.com", "name": "Ana", "role": "sponsor"}));
        let id = STAKEHOLDERS.items(&state)[0]
            .get("id")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap();

        assert!(STAKEHOLDERS.update_at(
            &mut state,
            0,
            json!({"email": "a@x.com", "name": "Ana Maria"}),
        ));

        let item = &STAKEHOLDERS.items(&state)[0];
        assert_eq!(item.get("name").and_then(|v| v.as_str()), Some("Ana Maria"));
        assert_eq!(item.get("id").and_then(|v| v.as_str()), Some(id.as_str()));
        // Full replace: the old role field is gone
        assert!(item.get("role").is_none());
    }
}
