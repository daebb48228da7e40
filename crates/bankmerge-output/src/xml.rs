//! Markup-text (XML) output.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use bankmerge_model::{CellValue, UnifiedTable};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// Writes the unified table as nested XML: one `<item>` per row, one
/// `<field name="...">` per cell. Missing cells become self-closed fields.
pub fn write_xml(path: &Path, table: &UnifiedTable) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let writer = BufWriter::new(file);
    let mut xml = Writer::new_with_indent(writer, b' ', 2);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    xml.write_event(Event::Start(BytesStart::new("items")))?;

    for row in &table.rows {
        xml.write_event(Event::Start(BytesStart::new("item")))?;
        for (column, cell) in table.columns.iter().zip(row) {
            let mut field = BytesStart::new("field");
            field.push_attribute(("name", column.as_str()));
            match cell {
                CellValue::Text(text) => {
                    xml.write_event(Event::Start(field))?;
                    xml.write_event(Event::Text(BytesText::new(text)))?;
                    xml.write_event(Event::End(BytesEnd::new("field")))?;
                }
                CellValue::Missing => {
                    xml.write_event(Event::Empty(field))?;
                }
            }
        }
        xml.write_event(Event::End(BytesEnd::new("item")))?;
    }

    xml.write_event(Event::End(BytesEnd::new("items")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_item_per_row_and_field_per_cell() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("merged.xml");

        let mut table =
            UnifiedTable::new(vec!["date".into(), "amount".into(), "source".into()]);
        table.push_row(vec![
            CellValue::text("2024-01-02"),
            CellValue::Missing,
            CellValue::text("bankA"),
        ]);
        write_xml(&path, &table).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<item>"));
        assert!(written.contains(r#"<field name="date">2024-01-02</field>"#));
        assert!(written.contains(r#"<field name="amount"/>"#));
        assert!(written.contains(r#"<field name="source">bankA</field>"#));
    }

    #[test]
    fn escapes_markup_in_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("merged.xml");

        let mut table = UnifiedTable::new(vec!["memo".into(), "source".into()]);
        table.push_row(vec![
            CellValue::text("a < b & c"),
            CellValue::text("bankA"),
        ]);
        write_xml(&path, &table).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("a &lt; b &amp; c"));
    }
}
