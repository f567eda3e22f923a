//! Layer merging
//!
//! Tables merge key by key, so a repo file can add one repository's rules
//! without restating the built-in ones. Arrays and scalars are replaced
//! wholesale: a repository's `rules` list from a later layer is the whole
//! list.

use serde_json::Value;

/// Merge `overlay` into `base` in place.
pub fn merge_into(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_into(existing, overlay_value),
                    None => {
                        base_map.insert(key, overlay_value);
                    }
                }
            }
        }
        (slot, overlay) => *slot = overlay,
    }
}

/// Fold layers lowest precedence first.
pub fn merge_layers(layers: Vec<Value>) -> Value {
    let mut merged = Value::Object(serde_json::Map::new());
    for layer in layers {
        merge_into(&mut merged, layer);
    }
    merged
}
