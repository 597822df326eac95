use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::error::{MatchError, Result};
use crate::model::{CellValue, Table};

/// Reads one worksheet into an in-memory [`Table`].
///
/// The first row supplies the column names; every data row is padded or
/// truncated to the header width so cell indices always line up with the
/// headers. When `sheet` is `None` the first worksheet in the workbook is
/// used.
pub fn read_table(path: &Path, sheet: Option<&str>) -> Result<Table> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| MatchError::InvalidWorkbook("workbook has no sheets".to_string()))?,
    };

    let range = read_required_sheet(&mut workbook, &sheet_name)?;
    let mut row_iter = range.rows();

    let columns: Vec<String> = row_iter
        .next()
        .ok_or_else(|| {
            MatchError::InvalidWorkbook(format!("sheet '{sheet_name}' has no header row"))
        })?
        .iter()
        .map(|cell| cell_to_string(cell).trim().to_string())
        .collect();

    let width = columns.len();
    let mut rows = Vec::new();
    for row in row_iter {
        let mut cells: Vec<CellValue> = row.iter().map(cell_to_value).collect();
        cells.resize(width, CellValue::Empty);
        cells.truncate(width);
        rows.push(cells);
    }

    Ok(Table { columns, rows })
}

/// Reads only the header row of a worksheet, for the column-proposal step of
/// the configure-columns workflow.
pub fn read_headers(path: &Path, sheet: Option<&str>) -> Result<Vec<String>> {
    let table = read_table(path, sheet)?;
    Ok(table.columns)
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<calamine::Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| MatchError::InvalidWorkbook(format!("missing sheet '{name}'")))?;
    let range = range_result.map_err(MatchError::from)?;
    Ok(range)
}

fn cell_to_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::String(value) => CellValue::Text(value.clone()),
        DataType::Float(value) => CellValue::Number(*value),
        DataType::Int(value) => CellValue::Integer(*value),
        DataType::Bool(value) => CellValue::Text(value.to_string()),
        DataType::Empty => CellValue::Empty,
        other => CellValue::Text(other.to_string()),
    }
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}
