#![deny(unsafe_code)]

use std::collections::BTreeMap;

use crate::table::SOURCE_COLUMN;
use crate::{ModelError, SourceId};

/// Key naming the mandatory fallback rule in a schema-map document.
pub const DEFAULT_RULE_KEY: &str = "default";

/// Rename + optional projection rule for one source's columns.
///
/// `rename` pairs are ordered original → canonical, in document order. When
/// `keep` is present the output is projected to exactly that canonical set;
/// when absent, every renamed column is retained. Original columns not
/// mentioned in `rename` are dropped, so raw institution column names never
/// leak into the unified schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColumnRule {
    pub rename: Vec<(String, String)>,
    pub keep: Option<Vec<String>>,
}

impl ColumnRule {
    /// Canonical columns this rule produces, in rule order, deduplicated.
    pub fn canonical_columns(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        match &self.keep {
            Some(keep) => {
                for name in keep {
                    if !seen.contains(&name.as_str()) {
                        seen.push(name.as_str());
                    }
                }
            }
            None => {
                for (_, canonical) in &self.rename {
                    if !seen.contains(&canonical.as_str()) {
                        seen.push(canonical.as_str());
                    }
                }
            }
        }
        seen
    }
}

/// The full set of column rules plus the mandatory default.
///
/// Canonical column order is tracked explicitly (first-seen across rules in
/// document order) so output column order stays deterministic across runs.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SchemaMap {
    rules: BTreeMap<SourceId, ColumnRule>,
    default_rule: ColumnRule,
    canonical_order: Vec<String>,
    entry_order: Vec<String>,
}

impl SchemaMap {
    /// Build a schema map from entries in document order.
    ///
    /// The entry keyed [`DEFAULT_RULE_KEY`] becomes the fallback rule; its
    /// absence is an error, checked here rather than at first use. Rules may
    /// not produce the reserved `source` column, which is appended by the
    /// merge itself. Entry order is retained so a serialized map reloads
    /// with the same canonical column order.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, ColumnRule)>,
    ) -> Result<Self, ModelError> {
        let mut rules = BTreeMap::new();
        let mut default_rule = None;
        let mut canonical_order: Vec<String> = Vec::new();
        let mut entry_order: Vec<String> = Vec::new();

        for (key, rule) in entries {
            for canonical in rule.canonical_columns() {
                if canonical == SOURCE_COLUMN {
                    return Err(ModelError::ReservedColumn(SOURCE_COLUMN));
                }
                if !canonical_order.iter().any(|c| c.as_str() == canonical) {
                    canonical_order.push(canonical.to_string());
                }
            }
            if !entry_order.contains(&key) {
                entry_order.push(key.clone());
            }
            if key == DEFAULT_RULE_KEY {
                default_rule = Some(rule);
            } else {
                rules.insert(SourceId::new(key)?, rule);
            }
        }

        let default_rule =
            default_rule.ok_or(ModelError::MissingDefaultRule(DEFAULT_RULE_KEY))?;
        Ok(Self {
            rules,
            default_rule,
            canonical_order,
            entry_order,
        })
    }

    /// Entries in original document order, the default rule included under
    /// its own key. Serializing these in order and reloading reproduces the
    /// map, canonical column order included.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ColumnRule)> {
        self.entry_order.iter().map(|key| {
            let rule = self
                .rules
                .iter()
                .find(|(id, _)| id.as_str() == key)
                .map(|(_, rule)| rule)
                .unwrap_or(&self.default_rule);
            (key.as_str(), rule)
        })
    }

    /// Rule for `id`, falling back to the default. Absence is expected, not
    /// exceptional.
    pub fn resolve(&self, id: &SourceId) -> &ColumnRule {
        self.rules.get(id).unwrap_or(&self.default_rule)
    }

    pub fn default_rule(&self) -> &ColumnRule {
        &self.default_rule
    }

    pub fn rules(&self) -> &BTreeMap<SourceId, ColumnRule> {
        &self.rules
    }

    pub fn canonical_order(&self) -> &[String] {
        &self.canonical_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pairs: &[(&str, &str)]) -> ColumnRule {
        ColumnRule {
            rename: pairs
                .iter()
                .map(|(o, c)| (o.to_string(), c.to_string()))
                .collect(),
            keep: None,
        }
    }

    #[test]
    fn missing_default_is_rejected() {
        let result = SchemaMap::from_entries(vec![(
            "bankA".to_string(),
            rule(&[("date", "date")]),
        )]);
        assert!(matches!(result, Err(ModelError::MissingDefaultRule(_))));
    }

    #[test]
    fn resolve_falls_back_to_default() {
        let map = SchemaMap::from_entries(vec![
            ("bankA".to_string(), rule(&[("amt", "amount")])),
            ("default".to_string(), rule(&[("Amount", "amount")])),
        ])
        .unwrap();

        let known = SourceId::new("bankA").unwrap();
        let unknown = SourceId::new("bankZ").unwrap();
        assert_eq!(map.resolve(&known).rename[0].0, "amt");
        assert_eq!(map.resolve(&unknown).rename[0].0, "Amount");
    }

    #[test]
    fn canonical_order_is_first_seen_across_rules() {
        let map = SchemaMap::from_entries(vec![
            ("bankA".to_string(), rule(&[("date", "date"), ("amt", "amount")])),
            ("bankB".to_string(), rule(&[("Memo", "memo"), ("Date", "date")])),
            ("default".to_string(), rule(&[("Amount", "amount")])),
        ])
        .unwrap();
        assert_eq!(map.canonical_order(), &["date", "amount", "memo"]);
    }

    #[test]
    fn entries_preserve_document_order() {
        let map = SchemaMap::from_entries(vec![
            ("default".to_string(), rule(&[("Amount", "amount")])),
            ("bankA".to_string(), rule(&[("date", "date")])),
        ])
        .unwrap();

        let keys: Vec<&str> = map.entries().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["default", "bankA"]);
        assert_eq!(map.canonical_order(), &["amount", "date"]);
    }

    #[test]
    fn reserved_source_column_is_rejected() {
        let as_rename = SchemaMap::from_entries(vec![(
            "default".to_string(),
            rule(&[("origin", "source")]),
        )]);
        assert!(matches!(as_rename, Err(ModelError::ReservedColumn(_))));

        let as_keep = SchemaMap::from_entries(vec![(
            "default".to_string(),
            ColumnRule {
                rename: vec![("date".to_string(), "date".to_string())],
                keep: Some(vec!["source".to_string()]),
            },
        )]);
        assert!(matches!(as_keep, Err(ModelError::ReservedColumn(_))));
    }

    #[test]
    fn keep_overrides_rename_targets() {
        let rule = ColumnRule {
            rename: vec![
                ("date".to_string(), "date".to_string()),
                ("amt".to_string(), "amount".to_string()),
            ],
            keep: Some(vec!["amount".to_string()]),
        };
        assert_eq!(rule.canonical_columns(), vec!["amount"]);
    }
}
