//! Schema-map configuration for bank transaction merging.
//!
//! Loads the JSON document mapping source identifiers to column rules,
//! validates the mandatory `default` entry eagerly, and can serialize the
//! effective map back out for auditing. Onboarding a new institution is a
//! document edit, never a code change; institutions matching no entry merge
//! via the default rule.

mod builtin;
mod document;
mod error;

pub use builtin::builtin_schema_map;
pub use document::{load_schema_map, parse_schema_map, schema_map_to_json, write_schema_map};
pub use error::{MapError, Result};
