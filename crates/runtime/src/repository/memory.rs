//! In-memory JSON document store.

use serde_json::{Map, Value};

use super::error::{RepositoryError, Result};
use super::save::SaveData;
use super::traits::DataStore;

/// `DataStore` holding the whole document in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonStore {
    root: Value,
}

impl JsonStore {
    /// Empty document.
    pub fn new() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    /// Document seeded with the default save layout.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::from_value(SaveData::default().to_value()?))
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn value(&self) -> &Value {
        &self.root
    }

    /// Adds every top-level section of `defaults` missing from the document.
    pub fn fill_missing(&mut self, defaults: Value) {
        let (Value::Object(root), Value::Object(defaults)) = (&mut self.root, defaults) else {
            return;
        };
        for (section, value) in defaults {
            root.entry(section).or_insert(value);
        }
    }
}

impl Default for JsonStore {
    fn default() -> Self {
        Self::new()
    }
}

fn segments(key: &str) -> Result<Vec<&str>> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|part| part.is_empty()) {
        return Err(RepositoryError::InvalidKey {
            key: key.to_string(),
            reason: "empty path segment",
        });
    }
    Ok(parts)
}

fn child<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

impl DataStore for JsonStore {
    fn get(&self, key: &str) -> Option<&Value> {
        let parts = segments(key).ok()?;
        parts
            .into_iter()
            .try_fold(&self.root, |value, segment| child(value, segment))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let parts = segments(key)?;
        let Some((last, parents)) = parts.split_last() else {
            return Err(RepositoryError::InvalidKey {
                key: key.to_string(),
                reason: "empty key",
            });
        };

        let mut cursor = &mut self.root;
        for segment in parents {
            if cursor.is_null() {
                *cursor = Value::Object(Map::new());
            }
            cursor = match cursor {
                Value::Object(map) => map
                    .entry(segment.to_string())
                    .or_insert_with(|| Value::Object(Map::new())),
                Value::Array(items) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get_mut(index))
                    .ok_or_else(|| RepositoryError::InvalidKey {
                        key: key.to_string(),
                        reason: "array index out of range",
                    })?,
                _ => {
                    return Err(RepositoryError::InvalidKey {
                        key: key.to_string(),
                        reason: "path crosses a non-object value",
                    });
                }
            };
        }

        if cursor.is_null() {
            *cursor = Value::Object(Map::new());
        }
        match cursor {
            Value::Object(map) => {
                map.insert(last.to_string(), value);
                Ok(())
            }
            Value::Array(items) => {
                let slot = last
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get_mut(index))
                    .ok_or_else(|| RepositoryError::InvalidKey {
                        key: key.to_string(),
                        reason: "array index out of range",
                    })?;
                *slot = value;
                Ok(())
            }
            _ => Err(RepositoryError::InvalidKey {
                key: key.to_string(),
                reason: "path crosses a non-object value",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn dotted_keys_create_nested_objects() {
        let mut store = JsonStore::new();
        store.set("player.position.x", json!(128)).unwrap();
        store.set("player.position.y", json!(64)).unwrap();

        assert_eq!(store.get("player.position"), Some(&json!({"x": 128, "y": 64})));
        assert_eq!(store.get("player.position.x"), Some(&json!(128)));
        assert_eq!(store.get("player.missing"), None);
    }

    #[test]
    fn array_segments_index_existing_items() {
        let mut store = JsonStore::from_value(json!({"monsters": [{"name": "a"}, {"name": "b"}]}));

        store.set("monsters.1.name", json!("c")).unwrap();

        assert_eq!(store.get("monsters.1.name"), Some(&json!("c")));
        assert!(store.set("monsters.5.name", json!("x")).is_err());
    }

    #[test]
    fn rejects_bad_keys() {
        let mut store = JsonStore::from_value(json!({"volume": 4}));

        assert!(matches!(
            store.set("volume.level", json!(1)),
            Err(RepositoryError::InvalidKey { .. })
        ));
        assert!(store.set("a..b", json!(1)).is_err());
        assert_eq!(store.get(""), None);
    }

    #[test]
    fn fill_missing_keeps_existing_sections() {
        let mut store = JsonStore::from_value(json!({"options": {"sound": "OFF"}}));
        store.fill_missing(json!({"options": {"sound": "ON"}, "inventory": []}));

        assert_eq!(store.get("options.sound"), Some(&json!("OFF")));
        assert_eq!(store.get("inventory"), Some(&json!([])));
    }
}
