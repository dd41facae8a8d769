//! Value-level merge
//!
//! Merges plain `serde_yaml::Value` trees, e.g. layered value files that feed
//! a template. There is no formatting metadata to preserve here, so the rules
//! are simpler than the document merge:
//!
//! - a non-collection source replaces the target
//! - mappings are merged by key, recursively; new keys are added
//! - a null target takes the source as is
//! - sequences are appended
//! - any other pairing is an error

use serde_yaml::Value as YamlValue;

use crate::error::{Error, Result};

/// Recursively merge `source` into `target`.
pub fn merge_values(target: &mut YamlValue, source: &YamlValue) -> Result<()> {
    if !is_collection(source) {
        *target = source.clone();
        return Ok(());
    }

    match target {
        YamlValue::Mapping(target_map) => {
            let YamlValue::Mapping(source_map) = source else {
                return Err(type_error("Mapping", source));
            };
            for (key, value) in source_map {
                match target_map.get_mut(key) {
                    Some(existing) => merge_values(existing, value)?,
                    None => {
                        target_map.insert(key.clone(), value.clone());
                    }
                }
            }
            Ok(())
        }
        YamlValue::Null => {
            *target = source.clone();
            Ok(())
        }
        YamlValue::Sequence(target_seq) => {
            let YamlValue::Sequence(source_seq) = source else {
                return Err(type_error("Sequence", source));
            };
            target_seq.extend(source_seq.iter().cloned());
            Ok(())
        }
        other => Err(Error::Merge {
            operation: "value merge".to_string(),
            message: format!(
                "type {} not implemented for merging",
                get_yaml_type_name(other)
            ),
        }),
    }
}

/// Get a human-readable type name for a YAML value
///
/// Used for error messages to describe the type of a value.
pub fn get_yaml_type_name(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "Null",
        YamlValue::Bool(_) => "Bool",
        YamlValue::Number(_) => "Number",
        YamlValue::String(_) => "String",
        YamlValue::Sequence(_) => "Sequence",
        YamlValue::Mapping(_) => "Mapping",
        YamlValue::Tagged(_) => "Tagged",
    }
}

fn is_collection(value: &YamlValue) -> bool {
    matches!(value, YamlValue::Mapping(_) | YamlValue::Sequence(_))
}

fn type_error(target: &str, source: &YamlValue) -> Error {
    Error::Merge {
        operation: "value merge".to_string(),
        message: format!(
            "cannot merge types {} and {}",
            target,
            get_yaml_type_name(source)
        ),
    }
}
