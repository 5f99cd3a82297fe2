//! FILENAME: core/persistence/src/xlsx_reader.rs
//! PURPOSE: Decodes one worksheet of an export into a `Table`.
//! CONTEXT: The first row of the used range is the header. Headers are made
//! unique the way spreadsheet tools do it (`name`, `name.1`, `name.2`) and
//! blank headers become `Unnamed: <n>`. Files are opened by extension, so
//! legacy `.xls` exports load the same way as `.xlsx`.

use std::collections::HashSet;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, CellErrorType, Data, Reader, Xlsx};
use engine::{CellError, CellValue, Table};
use log::debug;

use crate::PersistenceError;

/// Loads a worksheet from an `.xlsx`, `.xlsm`, `.xls` or `.ods` file.
/// `sheet` defaults to the first sheet.
pub fn load_table(path: &Path, sheet: Option<&str>) -> Result<Table, PersistenceError> {
    let mut workbook = open_workbook_auto(path)?;
    read_table(&mut workbook, sheet)
}

/// Loads a worksheet from an in-memory `.xlsx` file, e.g. an uploaded body.
pub fn load_table_from_bytes(bytes: &[u8], sheet: Option<&str>) -> Result<Table, PersistenceError> {
    let mut workbook: Xlsx<Cursor<&[u8]>> = Xlsx::new(Cursor::new(bytes))?;
    read_table(&mut workbook, sheet)
}

fn read_table<RS, R>(workbook: &mut R, sheet: Option<&str>) -> Result<Table, PersistenceError>
where
    RS: Read + Seek,
    R: Reader<RS>,
    PersistenceError: From<R::Error>,
{
    let sheet_names = workbook.sheet_names().to_vec();

    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|s| s.as_str() == name)
            .cloned()
            .ok_or_else(|| PersistenceError::SheetNotFound(name.to_string()))?,
        None => sheet_names.first().cloned().ok_or_else(|| {
            PersistenceError::InvalidFormat("Workbook contains no sheets".to_string())
        })?,
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();

    let Some(header) = rows.next() else {
        debug!("sheet '{}' is empty", sheet_name);
        return Ok(Table::default());
    };

    let mut table = Table::new(unique_headers(header));
    for row in rows {
        let cells: Vec<CellValue> = row.iter().map(convert_cell).collect();
        if cells.iter().all(CellValue::is_empty) {
            continue;
        }
        table.push_row(cells);
    }

    debug!(
        "sheet '{}': {} columns, {} rows",
        sheet_name,
        table.columns.len(),
        table.len()
    );
    Ok(table)
}

fn unique_headers(header: &[Data]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    header
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let value = convert_cell(cell);
            let base = if value.is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                value.display_value().trim().to_string()
            };

            let mut name = base.clone();
            let mut suffix = 1;
            while !seen.insert(name.clone()) {
                name = format!("{}.{}", base, suffix);
                suffix += 1;
            }
            name
        })
        .collect()
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(convert_error(e)),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

fn convert_error(error: &CellErrorType) -> CellError {
    match error {
        CellErrorType::Div0 => CellError::Div0,
        CellErrorType::NA => CellError::NA,
        CellErrorType::Name => CellError::Name,
        CellErrorType::Null => CellError::Null,
        CellErrorType::Num => CellError::Num,
        CellErrorType::Ref => CellError::Ref,
        CellErrorType::Value | CellErrorType::GettingData => CellError::Value,
    }
}
