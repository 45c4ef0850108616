//! Deep merge algorithm for YAML configuration values.
//!
//! relint layers a local overlay on top of the project configuration. This
//! module implements the merge semantics.
//!
//! # Merge Rules
//!
//! - Objects are merged recursively
//! - The top-level `rules` list is appended to, so an overlay adds rules
//! - Other arrays are replaced entirely (not merged)
//! - Null values in overlay delete the corresponding key from base
//! - Scalars in overlay replace scalars in base

use serde_yaml::Value;

/// Top-level keys whose sequences are concatenated instead of replaced.
const APPEND_KEYS: &[&str] = &["rules"];

/// Deep merge two YAML values.
///
/// Later values override earlier values at the point of conflict.
/// Objects are merged recursively. Arrays are replaced entirely.
/// Null values in overlay delete the corresponding key from base.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), deep_merge(base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Mapping(result)
        }

        (_, overlay) => overlay.clone(),
    }
}

/// Merge a configuration layer onto `base`, appending rule lists.
pub fn merge_layer(base: &Value, overlay: &Value) -> Value {
    let mut merged = deep_merge(base, overlay);

    if let (Value::Mapping(base_map), Value::Mapping(overlay_map), Value::Mapping(merged_map)) =
        (base, overlay, &mut merged)
    {
        for key in APPEND_KEYS {
            let key = Value::from(*key);
            if let (Some(Value::Sequence(first)), Some(Value::Sequence(second))) =
                (base_map.get(&key), overlay_map.get(&key))
            {
                let combined = first.iter().chain(second).cloned().collect();
                merged_map.insert(key, Value::Sequence(combined));
            }
        }
    }

    merged
}

/// Merge multiple configs in order (later overrides earlier).
pub fn merge_configs(configs: &[Value]) -> Value {
    configs
        .iter()
        .fold(Value::Mapping(Default::default()), |acc, config| {
            merge_layer(&acc, config)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn scalars_are_replaced() {
        let result = deep_merge(&yaml("language: markdown"), &yaml("language: python"));
        assert_eq!(result["language"], "python");
    }

    #[test]
    fn keys_only_in_base_are_kept() {
        let result = deep_merge(&yaml("language: markdown\nflags: gi"), &yaml("flags: g"));

        assert_eq!(result["language"], "markdown");
        assert_eq!(result["flags"], "g");
    }

    #[test]
    fn null_deletes_key() {
        let result = deep_merge(&yaml("language: markdown\nflags: gi"), &yaml("flags: ~"));
        assert!(result.get("flags").is_none());
    }

    #[test]
    fn nested_arrays_are_replaced() {
        let base = yaml("extra:\n  languages: [a, b]");
        let overlay = yaml("extra:\n  languages: [c]");

        let result = merge_layer(&base, &overlay);
        assert_eq!(result["extra"]["languages"], yaml("[c]"));
    }

    #[test]
    fn rules_are_appended() {
        let base = yaml(
            r#"
rules:
  - name: todo
    pattern: TODO
    message: resolve
"#,
        );
        let overlay = yaml(
            r#"
rules:
  - name: fixme
    pattern: FIXME
    message: resolve
"#,
        );

        let result = merge_layer(&base, &overlay);
        let rules = result["rules"].as_sequence().unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0]["name"], "todo");
        assert_eq!(rules[1]["name"], "fixme");
    }

    #[test]
    fn merge_configs_folds_in_order() {
        let configs = vec![
            yaml("language: a\nrules: [1]"),
            yaml("language: b\nrules: [2]"),
            yaml("rules: [3]"),
        ];

        let result = merge_configs(&configs);
        assert_eq!(result["language"], "b");
        assert_eq!(result["rules"], yaml("[1, 2, 3]"));
    }

    #[test]
    fn merge_configs_empty() {
        assert_eq!(merge_configs(&[]), Value::Mapping(Default::default()));
    }
}
