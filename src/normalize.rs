use crate::error::{MatchError, Result};
use crate::model::{ArticleCode, CellValue, Table};

/// Tolerance under which a float is treated as an exact integer code.
/// Spreadsheets round-trip integer article numbers through `f64`, so values
/// like `105.00000000001` still mean `105`.
const INTEGER_TOLERANCE: f64 = 1e-9;

/// Normalizes one cell into its canonical article code.
///
/// The same business identifier can arrive as `105`, `105.0`, `"105"`,
/// `"  105.00 "`, or `"1.05E+02"`; all of them produce the string `"105"`.
/// Non-numeric text is trimmed and kept verbatim. Blank cells and the
/// literal missing-value markers some exports emit (`nan`, `none`, `null`)
/// are rejected as [`MatchError::InvalidCode`].
///
/// Zero normalizes to `"0"` like any other number; deciding what zero means
/// is the row sanitizer's job, not this function's.
pub fn normalize(cell: &CellValue) -> Result<ArticleCode> {
    let code = match cell {
        CellValue::Empty => None,
        CellValue::Integer(value) => Some(value.to_string()),
        CellValue::Number(value) => normalize_float(*value),
        CellValue::Text(value) => normalize_text(value),
    };
    code.ok_or_else(|| MatchError::InvalidCode {
        value: cell.to_display_string(),
    })
}

/// Applies [`normalize`] to every cell of the given column, producing a new
/// table whose key column holds canonical text. Cells that cannot be
/// normalized become empty so the sanitizer can filter them.
pub fn normalize_key_column(table: &Table, column: &str) -> Result<Table> {
    let index = table
        .column_index(column)
        .ok_or_else(|| MatchError::MissingColumn {
            table: "input".to_string(),
            column: column.to_string(),
        })?;

    let mut normalized = table.clone();
    for row in &mut normalized.rows {
        if let Some(cell) = row.get_mut(index) {
            *cell = match normalize(cell) {
                Ok(code) => CellValue::Text(code),
                Err(_) => CellValue::Empty,
            };
        }
    }
    Ok(normalized)
}

fn normalize_float(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let rounded = value.round();
    if (value - rounded).abs() <= INTEGER_TOLERANCE
        && rounded >= i64::MIN as f64
        && rounded <= i64::MAX as f64
    {
        return Some((rounded as i64).to_string());
    }
    // Rust's f64 Display is the shortest decimal form that round-trips and
    // never uses an exponent, which is exactly the representation we want
    // for codes with a meaningful fractional part.
    Some(value.to_string())
}

fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lowered = trimmed.to_ascii_lowercase();
    if lowered == "nan" || lowered == "none" || lowered == "null" {
        return None;
    }
    // Integer parse first: preserves long codes beyond f64 precision and
    // strips semantically meaningless leading zeros ("00123" -> "123").
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value.to_string());
    }
    // Covers "123.0", "456.00", and scientific notation like "1.23E+05".
    if let Ok(value) = trimmed.parse::<f64>() {
        return normalize_float(value);
    }
    Some(trimmed.to_string())
}
