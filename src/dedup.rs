use std::collections::HashSet;

use tracing::debug;

use crate::error::{MatchError, Result};
use crate::model::{ArticleCode, CellValue, Table};
use crate::normalize::normalize;

/// Collapses the cost table to one row per normalized article code.
///
/// The first occurrence in original row order wins; later duplicates are
/// discarded silently. Reference data is assumed authoritative in its first
/// listing, and making the tie-break explicit keeps it testable. Rows whose
/// code cannot be normalized are skipped outright since no sanitized SAP row
/// could ever match them.
pub fn deduplicate_cost(table: &Table, article_column: &str) -> Result<Table> {
    let code_index = table
        .column_index(article_column)
        .ok_or_else(|| MatchError::MissingColumn {
            table: "cost".to_string(),
            column: article_column.to_string(),
        })?;

    let mut seen: HashSet<ArticleCode> = HashSet::new();
    let mut rows = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let cell = row.get(code_index).unwrap_or(&CellValue::Empty);
        let Ok(code) = normalize(cell) else {
            continue;
        };
        if seen.insert(code) {
            rows.push(row.clone());
        }
    }

    debug!(
        distinct = rows.len(),
        discarded = table.rows.len() - rows.len(),
        "deduplicated cost table"
    );

    Ok(Table {
        columns: table.columns.clone(),
        rows,
    })
}
