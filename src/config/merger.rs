//! Deep merge algorithm for YAML configuration values.
//!
//! `.eca/config.local.yml` is layered over `.eca/config.yml` with these
//! semantics.
//!
//! # Merge Rules
//!
//! - Objects are merged recursively
//! - Arrays are replaced entirely (not merged)
//! - Null values in overlay delete the corresponding key from base
//! - Scalars in overlay replace scalars in base

use serde_yaml::{Mapping, Value};

/// Layer `overlay` over `base`, returning the combined value.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            Value::Mapping(merge_mappings(base_map, overlay_map))
        }
        (_, overlay) => overlay.clone(),
    }
}

fn merge_mappings(base: &Mapping, overlay: &Mapping) -> Mapping {
    let mut merged = base.clone();
    for (key, value) in overlay {
        if value.is_null() {
            merged.remove(key);
            continue;
        }
        let combined = match merged.get(key) {
            Some(existing) => deep_merge(existing, value),
            None => value.clone(),
        };
        merged.insert(key.clone(), combined);
    }
    merged
}

/// Fold config layers in order; the last layer has the highest priority.
pub fn merge_configs(configs: &[Value]) -> Value {
    configs
        .iter()
        .fold(Value::Mapping(Mapping::new()), |acc, layer| {
            deep_merge(&acc, layer)
        })
}
