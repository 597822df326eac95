use tracing::debug;

use crate::error::{MatchError, Result};
use crate::model::{CellValue, Table};
use crate::normalize::normalize;

/// Filters a raw SAP table down to the rows that can participate in a merge.
///
/// Two passes, in order:
/// 1. The strict trailing run of fully blank rows is removed. Clipboard
///    pastes routinely carry such a suffix; blank rows *between* content
///    rows are left for the second pass.
/// 2. Any row whose article-code cell is blank, unparseable, or normalizes
///    to `"0"` is dropped. SAP exports use zero as a placeholder code.
///
/// The relative order of all surviving rows is preserved.
pub fn sanitize_sap_rows(table: &Table, article_column: &str) -> Result<Table> {
    let code_index = table
        .column_index(article_column)
        .ok_or_else(|| MatchError::MissingColumn {
            table: "SAP".to_string(),
            column: article_column.to_string(),
        })?;

    let trailing_start = table
        .rows
        .iter()
        .rposition(|row| !Table::row_is_blank(row))
        .map_or(0, |index| index + 1);
    let trimmed = &table.rows[..trailing_start];

    let mut rows = Vec::with_capacity(trimmed.len());
    let mut dropped = 0usize;
    for row in trimmed {
        let cell = row.get(code_index).unwrap_or(&CellValue::Empty);
        match normalize(cell) {
            Ok(code) if code != "0" => rows.push(row.clone()),
            Ok(_) | Err(_) => dropped += 1,
        }
    }

    debug!(
        kept = rows.len(),
        dropped,
        trailing = table.rows.len() - trailing_start,
        "sanitized SAP rows"
    );

    Ok(Table {
        columns: table.columns.clone(),
        rows,
    })
}
