use crate::error::{MatchError, Result};
use crate::model::{CellValue, Table};

/// Parses clipboard-style tab-separated text into a [`Table`].
///
/// The first line supplies the column names (trimmed); subsequent lines are
/// data rows, padded with blanks or truncated to the header width when a row
/// is ragged. Cell text is *not* trimmed here: normalization decides later
/// what whitespace means. Blank lines become fully blank rows so the row
/// sanitizer can apply its trailing-suffix rule to paste artifacts.
pub fn parse_paste(text: &str) -> Result<Table> {
    if text.trim().is_empty() {
        return Err(MatchError::EmptyPaste);
    }

    let mut lines = text.lines();
    let header_line = lines.next().ok_or(MatchError::EmptyPaste)?;
    let columns: Vec<String> = header_line
        .split('\t')
        .map(|header| header.trim().to_string())
        .collect();
    let width = columns.len();

    let mut rows = Vec::new();
    for line in lines {
        let mut cells: Vec<CellValue> = line
            .split('\t')
            .map(|cell| CellValue::Text(cell.to_string()))
            .collect();
        cells.resize(width, CellValue::Empty);
        cells.truncate(width);
        rows.push(cells);
    }

    if rows.is_empty() {
        return Err(MatchError::InvalidPaste(
            "expected a header line and at least one data line".to_string(),
        ));
    }

    Ok(Table { columns, rows })
}

/// Renders a table as tab-separated text with a header line, the inverse of
/// [`parse_paste`].
pub fn render_table(table: &Table) -> String {
    let mut lines = Vec::with_capacity(table.rows.len() + 1);
    lines.push(table.columns.join("\t"));
    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(CellValue::to_display_string).collect();
        lines.push(cells.join("\t"));
    }
    lines.join("\n")
}

/// Renders one column as newline-joined values, ready to paste back into the
/// spreadsheet column the values came from.
pub fn render_column(table: &Table, column: &str) -> Result<String> {
    let index = table
        .column_index(column)
        .ok_or_else(|| MatchError::MissingColumn {
            table: "result".to_string(),
            column: column.to_string(),
        })?;

    let values: Vec<String> = table
        .rows
        .iter()
        .map(|row| {
            row.get(index)
                .map(CellValue::to_display_string)
                .unwrap_or_default()
        })
        .collect();
    Ok(values.join("\n"))
}
