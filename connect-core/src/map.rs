//! Unique-key insertion for map fields

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::ModelError;

/// Inserts `key -> value` only if `key` is absent.
///
/// On a duplicate the map is left exactly as it was.
pub fn insert_unique<V>(
    map: &mut BTreeMap<String, V>,
    field: &'static str,
    key: String,
    value: V,
) -> Result<(), ModelError> {
    match map.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
        Entry::Occupied(slot) => {
            tracing::debug!(field, key = %slot.key(), "rejected duplicate map key");
            Err(ModelError::DuplicateMapKey {
                field,
                key: slot.key().clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_into_empty_map() {
        let mut map = BTreeMap::new();
        insert_unique(&mut map, "Tags", "team".to_string(), 1).unwrap();
        assert_eq!(map.get("team"), Some(&1));
    }

    #[test]
    fn test_duplicate_leaves_original_value() {
        let mut map = BTreeMap::new();
        insert_unique(&mut map, "Tags", "team".to_string(), 1).unwrap();
        let err = insert_unique(&mut map, "Tags", "team".to_string(), 2).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateMapKey { field: "Tags", .. }));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("team"), Some(&1));
    }
}
