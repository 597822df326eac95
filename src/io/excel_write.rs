use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::error::Result;
use crate::model::{CellValue, Table};

/// Writes the provided table to a single worksheet at the given path.
pub fn write_table(path: &Path, sheet_name: &str, table: &Table) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col_idx, header) in table.columns.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, header)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let row_idx = (row_idx + 1) as u32;
            let col_idx = col_idx as u16;
            match cell {
                CellValue::Text(value) => {
                    worksheet.write_string(row_idx, col_idx, value)?;
                }
                CellValue::Number(value) => {
                    worksheet.write_number(row_idx, col_idx, *value)?;
                }
                CellValue::Integer(value) => {
                    worksheet.write_number(row_idx, col_idx, *value as f64)?;
                }
                CellValue::Empty => {}
            }
        }
    }

    let mut excel_table = rust_xlsxwriter::Table::new();
    excel_table.set_autofilter(true);

    let col_end = (table.columns.len() as u16).saturating_sub(1);
    let row_end = if table.rows.is_empty() {
        0
    } else {
        table.rows.len() as u32
    };
    worksheet.add_table(0, 0, row_end, col_end, &excel_table)?;

    workbook.save(path)?;
    Ok(())
}
