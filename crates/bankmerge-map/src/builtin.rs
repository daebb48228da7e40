//! Built-in fallback rules used when no schema-map document is supplied.

use bankmerge_model::{ColumnRule, DEFAULT_RULE_KEY, SchemaMap};

/// Schema map with a single default rule covering the common transaction
/// columns and their frequent source spellings.
pub fn builtin_schema_map() -> SchemaMap {
    let pairs = [
        ("date", "date"),
        ("dates", "date"),
        ("datetime", "date"),
        ("type", "type"),
        ("transaction", "type"),
        ("amount", "amount"),
        ("amounts", "amount"),
        ("to", "to"),
        ("from", "from"),
    ];
    let rule = ColumnRule {
        rename: pairs
            .iter()
            .map(|(o, c)| (o.to_string(), c.to_string()))
            .collect(),
        keep: None,
    };

    // The default entry is the only one, so from_entries cannot fail.
    SchemaMap::from_entries(vec![(DEFAULT_RULE_KEY.to_string(), rule)])
        .unwrap_or_else(|_| unreachable!("builtin schema map always has a default entry"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_common_columns() {
        let schema = builtin_schema_map();
        assert_eq!(
            schema.canonical_order(),
            &["date", "type", "amount", "to", "from"]
        );
        assert!(schema.rules().is_empty());
    }
}
