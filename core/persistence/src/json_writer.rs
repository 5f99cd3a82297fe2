//! FILENAME: core/persistence/src/json_writer.rs
//! PURPOSE: Records-oriented JSON encoding of a `Table`.
//! CONTEXT: Each row becomes an object keyed by column name, written in
//! column order. Empty cells are `null`, integral numbers are written as
//! integers so group ids and years do not come out as `2021.0`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use engine::{CellValue, Table};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::PersistenceError;

/// Serialises a table as an array of row objects.
pub struct JsonRecords<'a>(pub &'a Table);

struct JsonRow<'a> {
    columns: &'a [String],
    cells: &'a [CellValue],
}

struct JsonCell<'a>(&'a CellValue);

impl Serialize for JsonRecords<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for row in &self.0.rows {
            seq.serialize_element(&JsonRow {
                columns: &self.0.columns,
                cells: row,
            })?;
        }
        seq.end()
    }
}

impl Serialize for JsonRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(self.cells) {
            map.serialize_entry(column, &JsonCell(cell))?;
        }
        map.end()
    }
}

impl Serialize for JsonCell<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            CellValue::Empty => serializer.serialize_none(),
            CellValue::Number(n) if !n.is_finite() => serializer.serialize_none(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
                serializer.serialize_i64(*n as i64)
            }
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Boolean(b) => serializer.serialize_bool(*b),
            CellValue::Error(e) => serializer.serialize_str(e.as_str()),
        }
    }
}

/// The table as a `serde_json::Value`.
pub fn table_to_json(table: &Table) -> Result<serde_json::Value, PersistenceError> {
    Ok(serde_json::to_value(JsonRecords(table))?)
}

/// Writes the table to `path` as pretty-printed JSON.
pub fn save_json(table: &Table, path: &Path) -> Result<(), PersistenceError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &JsonRecords(table))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::CellError;
    use serde_json::json;

    #[test]
    fn test_cells_map_to_json_types() {
        let mut table = Table::new(["GroupID", "title", "budget", "flag", "broken", "missing"]);
        table.push_row(vec![
            CellValue::Number(3.0),
            "alpha".into(),
            CellValue::Number(12.5),
            CellValue::Boolean(true),
            CellValue::Error(CellError::Ref),
            CellValue::Empty,
        ]);

        let value = table_to_json(&table).unwrap();

        assert_eq!(
            value,
            json!([{
                "GroupID": 3,
                "title": "alpha",
                "budget": 12.5,
                "flag": true,
                "broken": "#REF!",
                "missing": null
            }])
        );
    }

    #[test]
    fn test_rows_keep_column_order_in_output() {
        let mut table = Table::new(["z", "a"]);
        table.push_row(vec![1i64.into(), 2i64.into()]);

        let text = serde_json::to_string(&JsonRecords(&table)).unwrap();
        assert_eq!(text, r#"[{"z":1,"a":2}]"#);
    }
}
