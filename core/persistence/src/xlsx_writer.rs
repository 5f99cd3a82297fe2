//! FILENAME: core/persistence/src/xlsx_writer.rs

use crate::PersistenceError;
use engine::{CellValue, Table};
use log::debug;
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};
use std::path::Path;

/// Excel's last column index (XFD).
const MAX_COLUMNS: usize = 16_384;

/// Writes a single table to `path` as one worksheet.
pub fn save_table(table: &Table, path: &Path, sheet_name: &str) -> Result<(), PersistenceError> {
    save_tables(&[(sheet_name, table)], path)
}

/// Writes several tables to `path`, one worksheet each, in the given order.
pub fn save_tables(sheets: &[(&str, &Table)], path: &Path) -> Result<(), PersistenceError> {
    let mut xlsx = build_workbook(sheets)?;
    xlsx.save(path)?;
    debug!("wrote {} sheet(s) to {:?}", sheets.len(), path);
    Ok(())
}

/// Encodes tables into an in-memory `.xlsx` file.
pub fn tables_to_xlsx_bytes(sheets: &[(&str, &Table)]) -> Result<Vec<u8>, PersistenceError> {
    let mut xlsx = build_workbook(sheets)?;
    Ok(xlsx.save_to_buffer()?)
}

fn build_workbook(sheets: &[(&str, &Table)]) -> Result<XlsxWorkbook, PersistenceError> {
    let mut xlsx = XlsxWorkbook::new();
    let header_format = Format::new().set_bold();

    for (name, table) in sheets {
        if table.columns.len() > MAX_COLUMNS {
            return Err(PersistenceError::InvalidFormat(format!(
                "Sheet '{}' has {} columns, more than an Excel sheet can hold",
                name,
                table.columns.len()
            )));
        }

        let worksheet = xlsx.add_worksheet();
        worksheet.set_name(*name)?;

        for (col, header) in table.columns.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
        }
        if !table.columns.is_empty() {
            worksheet.set_freeze_panes(1, 0)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            let row_num = (row_idx + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                write_cell(worksheet, row_num, col as u16, cell)?;
            }
        }
    }

    Ok(xlsx)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
) -> Result<(), PersistenceError> {
    match cell {
        CellValue::Empty => {}
        CellValue::Number(n) if n.is_finite() => {
            worksheet.write_number(row, col, *n)?;
        }
        CellValue::Number(_) => {}
        CellValue::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
        CellValue::Boolean(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        CellValue::Error(e) => {
            worksheet.write_string(row, col, e.as_str())?;
        }
    }
    Ok(())
}
