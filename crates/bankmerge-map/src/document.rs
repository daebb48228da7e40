//! Schema-map document parsing and serialization.
//!
//! Document shape:
//!
//! ```json
//! {
//!   "bankA": { "rename": { "amt": "amount" }, "keep": ["date", "amount"] },
//!   "default": { "rename": { "Date": "date", "Amount": "amount" } }
//! }
//! ```
//!
//! The `default` entry is mandatory and validated at load time. Document
//! order is significant: the first-seen order of canonical names across all
//! entries defines the unified output column order, which is why `serde_json`
//! runs with `preserve_order` here.

use std::path::Path;

use bankmerge_model::{ColumnRule, ModelError, SchemaMap};
use serde_json::{Map, Value};

use crate::error::{MapError, Result};

/// Parses a schema-map document from JSON text. Validation is eager: the
/// `default` entry is checked here, not at first use.
pub fn parse_schema_map(contents: &str) -> Result<SchemaMap> {
    let doc: Map<String, Value> =
        serde_json::from_str(contents).map_err(|e| MapError::Parse {
            message: e.to_string(),
        })?;

    let mut entries = Vec::with_capacity(doc.len());
    for (key, value) in doc {
        let rule = parse_rule(&key, &value)?;
        entries.push((key, rule));
    }

    SchemaMap::from_entries(entries).map_err(|e| match e {
        ModelError::MissingDefaultRule(_) => MapError::MissingDefault,
        other => MapError::Parse {
            message: other.to_string(),
        },
    })
}

/// Loads a schema map from a file path.
pub fn load_schema_map(path: &Path) -> Result<SchemaMap> {
    let contents = std::fs::read_to_string(path).map_err(|e| MapError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_schema_map(&contents)
}

/// Serializes the effective schema map back to a JSON document, so the rules
/// in force for a run can be audited.
pub fn write_schema_map(path: &Path, schema: &SchemaMap) -> Result<()> {
    let json = schema_map_to_json(schema);
    let pretty = serde_json::to_string_pretty(&json).map_err(|e| MapError::Parse {
        message: e.to_string(),
    })?;
    std::fs::write(path, pretty).map_err(|e| MapError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Renders a schema map as the document [`parse_schema_map`] accepts.
///
/// Entries are written in original document order, so reloading the result
/// reproduces the map, canonical column order included.
pub fn schema_map_to_json(schema: &SchemaMap) -> Value {
    let mut doc = Map::new();
    for (key, rule) in schema.entries() {
        doc.insert(key.to_string(), rule_to_json(rule));
    }
    Value::Object(doc)
}

fn rule_to_json(rule: &ColumnRule) -> Value {
    let mut obj = Map::new();
    let mut rename = Map::new();
    for (original, canonical) in &rule.rename {
        rename.insert(original.clone(), Value::String(canonical.clone()));
    }
    obj.insert("rename".to_string(), Value::Object(rename));
    if let Some(keep) = &rule.keep {
        obj.insert(
            "keep".to_string(),
            Value::Array(keep.iter().map(|k| Value::String(k.clone())).collect()),
        );
    }
    Value::Object(obj)
}

fn parse_rule(entry: &str, value: &Value) -> Result<ColumnRule> {
    let Value::Object(obj) = value else {
        return Err(MapError::InvalidRule {
            entry: entry.to_string(),
            reason: "rule must be a JSON object".to_string(),
        });
    };

    let mut rename = Vec::new();
    if let Some(rename_value) = obj.get("rename") {
        let Value::Object(pairs) = rename_value else {
            return Err(MapError::InvalidRule {
                entry: entry.to_string(),
                reason: "\"rename\" must be an object of original: canonical".to_string(),
            });
        };
        for (original, canonical) in pairs {
            let Value::String(canonical) = canonical else {
                return Err(MapError::InvalidRule {
                    entry: entry.to_string(),
                    reason: format!("rename target for \"{original}\" must be a string"),
                });
            };
            rename.push((original.clone(), canonical.clone()));
        }
    }

    let keep = match obj.get("keep") {
        None => None,
        Some(Value::Array(items)) => {
            let mut keep = Vec::with_capacity(items.len());
            for item in items {
                let Value::String(name) = item else {
                    return Err(MapError::InvalidRule {
                        entry: entry.to_string(),
                        reason: "\"keep\" entries must be strings".to_string(),
                    });
                };
                keep.push(name.clone());
            }
            Some(keep)
        }
        Some(_) => {
            return Err(MapError::InvalidRule {
                entry: entry.to_string(),
                reason: "\"keep\" must be an array of canonical names".to_string(),
            });
        }
    };

    Ok(ColumnRule { rename, keep })
}
