//! The core reconciliation algorithm.
//!
//! Applies a [`SchemaMap`] across a set of [`SourceTable`]s, producing one
//! [`UnifiedTable`] with a common column schema and a trailing `source`
//! column. Per source: rename columns mentioned in the rule, drop the rest,
//! optionally project to the rule's `keep` set, tag every row with the
//! source identifier.
//!
//! The unified column set is the union of the canonical sets of the rules
//! actually resolved for the loaded tables. It is computed from the rules,
//! not from observed data, so a zero-row source still shapes the schema.
//! Order follows the schema map's canonical ordering, keeping output
//! deterministic across runs. A row lacking a value for a column in the
//! union gets an explicit [`CellValue::Missing`]; columns are never silently
//! dropped per row. Values carry through as loaded; type coercion is a
//! loader concern.

use std::collections::{BTreeMap, BTreeSet};

use bankmerge_model::{CellValue, SOURCE_COLUMN, SchemaMap, SourceTable, UnifiedTable};
use tracing::{debug, info};

use crate::error::{Result, TransformError};

/// Merges source tables into one unified table, in the given load order.
pub fn reconcile(tables: &[SourceTable], schema: &SchemaMap) -> Result<UnifiedTable> {
    let mut union: BTreeSet<&str> = BTreeSet::new();
    for table in tables {
        let rule = schema.resolve(&table.id);
        let canonical = rule.canonical_columns();
        if canonical.is_empty() && !table.is_empty() {
            return Err(TransformError::EmptySchema {
                source_id: table.id.clone(),
            });
        }
        union.extend(canonical);
    }

    let mut columns: Vec<String> = schema
        .canonical_order()
        .iter()
        .filter(|c| union.contains(c.as_str()))
        .cloned()
        .collect();
    columns.push(SOURCE_COLUMN.to_string());

    let mut unified = UnifiedTable::new(columns);
    for table in tables {
        if !schema.rules().contains_key(&table.id) {
            debug!(source = %table.id, "no specific rule; merging via default");
        }
        append_reconciled(&mut unified, table, schema);
    }

    info!(
        sources = tables.len(),
        rows = unified.rows.len(),
        columns = unified.columns.len(),
        "reconciled source tables"
    );
    Ok(unified)
}

fn append_reconciled(unified: &mut UnifiedTable, table: &SourceTable, schema: &SchemaMap) {
    let rule = schema.resolve(&table.id);
    let canonical_set = rule.canonical_columns();

    // Canonical name -> source column index. First rename pair wins when two
    // originals map to the same canonical name.
    let mut indices: BTreeMap<&str, usize> = BTreeMap::new();
    for (original, canonical) in &rule.rename {
        if canonical_set.contains(&canonical.as_str())
            && !indices.contains_key(canonical.as_str())
            && let Some(idx) = table.column_index(original)
        {
            indices.insert(canonical.as_str(), idx);
        }
    }

    let value_columns = unified.columns.len() - 1;
    for row in &table.rows {
        let mut cells = Vec::with_capacity(unified.columns.len());
        for column in &unified.columns[..value_columns] {
            // Empty fields are carried as missing, matching export behavior.
            let cell = indices
                .get(column.as_str())
                .and_then(|&idx| row.get(idx))
                .filter(|value| !value.is_empty())
                .map(|value| CellValue::text(value.clone()))
                .unwrap_or(CellValue::Missing);
            cells.push(cell);
        }
        cells.push(CellValue::text(table.id.as_str()));
        unified.push_row(cells);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankmerge_model::{ColumnRule, SourceId};

    fn rule(pairs: &[(&str, &str)]) -> ColumnRule {
        ColumnRule {
            rename: pairs
                .iter()
                .map(|(o, c)| (o.to_string(), c.to_string()))
                .collect(),
            keep: None,
        }
    }

    fn table(id: &str, columns: &[&str], rows: &[&[&str]]) -> SourceTable {
        let mut table = SourceTable::new(
            SourceId::new(id).unwrap(),
            columns.iter().map(|c| c.to_string()).collect(),
        );
        for row in rows {
            table.push_row(row.iter().map(|v| v.to_string()).collect());
        }
        table
    }

    fn text(value: &str) -> CellValue {
        CellValue::text(value)
    }

    #[test]
    fn merges_two_banks_with_default_fallback() {
        // bankA has a specific rule; bankB merges via default, and its Memo
        // column is dropped since default's rename does not mention it.
        let schema = SchemaMap::from_entries(vec![
            (
                "bankA".to_string(),
                rule(&[("date", "date"), ("amt", "amount")]),
            ),
            (
                "default".to_string(),
                rule(&[("Date", "date"), ("Amount", "amount")]),
            ),
        ])
        .unwrap();

        let tables = vec![
            table("bankA", &["date", "amt"], &[&["2024-01-02", "12.50"]]),
            table(
                "bankB",
                &["Date", "Amount", "Memo"],
                &[&["2024-01-03", "7.00", "coffee"]],
            ),
        ];

        let unified = reconcile(&tables, &schema).unwrap();
        assert_eq!(unified.columns, vec!["date", "amount", "source"]);
        assert_eq!(
            unified.rows,
            vec![
                vec![text("2024-01-02"), text("12.50"), text("bankA")],
                vec![text("2024-01-03"), text("7.00"), text("bankB")],
            ]
        );
    }

    #[test]
    fn fallback_output_matches_default_canonical_set() {
        let schema = SchemaMap::from_entries(vec![(
            "default".to_string(),
            rule(&[("Date", "date"), ("Amount", "amount")]),
        )])
        .unwrap();

        let tables = vec![table("unknown", &["Date", "Amount"], &[&["x", "y"]])];
        let unified = reconcile(&tables, &schema).unwrap();
        assert_eq!(unified.columns, vec!["date", "amount", "source"]);
    }

    #[test]
    fn missing_canonical_values_get_explicit_marker() {
        let schema = SchemaMap::from_entries(vec![
            ("bankA".to_string(), rule(&[("date", "date")])),
            (
                "default".to_string(),
                rule(&[("Date", "date"), ("Amount", "amount")]),
            ),
        ])
        .unwrap();

        // bankA's rule never produces "amount", so its rows carry Missing
        // there while bankB fills it.
        let tables = vec![
            table("bankA", &["date"], &[&["2024-01-02"]]),
            table("bankB", &["Date", "Amount"], &[&["2024-01-03", "7.00"]]),
        ];

        let unified = reconcile(&tables, &schema).unwrap();
        assert_eq!(unified.columns, vec!["date", "amount", "source"]);
        assert_eq!(unified.rows[0][1], CellValue::Missing);
        assert_eq!(unified.rows[1][1], text("7.00"));
    }

    #[test]
    fn empty_source_still_shapes_the_schema() {
        let schema = SchemaMap::from_entries(vec![
            ("bankA".to_string(), rule(&[("date", "date")])),
            ("bankB".to_string(), rule(&[("Betrag", "amount")])),
            ("default".to_string(), rule(&[("Date", "date")])),
        ])
        .unwrap();

        let tables = vec![
            table("bankA", &["date"], &[&["2024-01-02"]]),
            // Zero rows, but its rule still contributes "amount" to the union
            table("bankB", &["Betrag"], &[]),
        ];

        let unified = reconcile(&tables, &schema).unwrap();
        assert_eq!(unified.columns, vec!["date", "amount", "source"]);
        assert_eq!(unified.rows.len(), 1);
    }

    #[test]
    fn keep_projects_to_exact_canonical_set() {
        let schema = SchemaMap::from_entries(vec![(
            "default".to_string(),
            ColumnRule {
                rename: vec![
                    ("date".to_string(), "date".to_string()),
                    ("amt".to_string(), "amount".to_string()),
                ],
                keep: Some(vec!["amount".to_string()]),
            },
        )])
        .unwrap();

        let tables = vec![table("bankA", &["date", "amt"], &[&["2024-01-02", "3.50"]])];
        let unified = reconcile(&tables, &schema).unwrap();
        assert_eq!(unified.columns, vec!["amount", "source"]);
        assert_eq!(unified.rows[0], vec![text("3.50"), text("bankA")]);
    }

    #[test]
    fn empty_rule_for_non_empty_source_fails() {
        let schema = SchemaMap::from_entries(vec![
            ("default".to_string(), rule(&[])),
        ])
        .unwrap();

        let tables = vec![table("bankA", &["date"], &[&["2024-01-02"]])];
        let result = reconcile(&tables, &schema);
        assert!(matches!(
            result,
            Err(TransformError::EmptySchema { .. })
        ));
    }

    #[test]
    fn empty_rule_for_empty_source_is_fine() {
        let schema = SchemaMap::from_entries(vec![
            ("default".to_string(), rule(&[])),
        ])
        .unwrap();

        let tables = vec![table("bankA", &["date"], &[])];
        let unified = reconcile(&tables, &schema).unwrap();
        assert_eq!(unified.columns, vec!["source"]);
        assert!(unified.rows.is_empty());
    }

    #[test]
    fn reconcile_is_idempotent() {
        let schema = SchemaMap::from_entries(vec![
            (
                "bankA".to_string(),
                rule(&[("date", "date"), ("amt", "amount")]),
            ),
            (
                "default".to_string(),
                rule(&[("Date", "date"), ("Amount", "amount")]),
            ),
        ])
        .unwrap();

        let tables = vec![
            table("bankA", &["date", "amt"], &[&["2024-01-02", "12.50"]]),
            table("bankB", &["Date", "Amount"], &[&["2024-01-03", "7.00"]]),
        ];

        let first = reconcile(&tables, &schema).unwrap();
        let second = reconcile(&tables, &schema).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_csv_field_becomes_missing() {
        let schema = SchemaMap::from_entries(vec![(
            "default".to_string(),
            rule(&[("date", "date"), ("amt", "amount")]),
        )])
        .unwrap();

        let tables = vec![table("bankA", &["date", "amt"], &[&["2024-01-02", ""]])];
        let unified = reconcile(&tables, &schema).unwrap();
        assert_eq!(unified.rows[0][1], CellValue::Missing);
    }
}
