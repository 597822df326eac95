use std::collections::HashMap;

use tracing::debug;

use crate::error::{MatchError, Result};
use crate::model::{ArticleCode, CellValue, CostMapping, KeyMapping, Table};
use crate::normalize::normalize;

/// Left join of the sanitized SAP table against the cost table, keyed on the
/// canonical article code.
///
/// Every SAP row appears exactly once in the output, in its original order,
/// with the matched cost appended as a final column named after the cost
/// value column (counter-suffixed when the SAP table already uses that
/// name). Unmatched rows receive `default_value`, as do matches whose
/// cost cell is not numeric. Mapped columns are validated before any row
/// work so a misconfigured mapping can never silently join on the wrong
/// column.
pub fn merge(
    sap: &Table,
    cost: &Table,
    sap_mapping: &KeyMapping,
    cost_mapping: &CostMapping,
    default_value: f64,
) -> Result<Table> {
    let sap_index = require_column(sap, &sap_mapping.article, "SAP")?;
    let cost_code_index = require_column(cost, &cost_mapping.article, "cost")?;
    let cost_value_index = require_column(cost, &cost_mapping.value, "cost")?;

    // First occurrence wins, so merging an un-deduplicated cost table still
    // agrees with what deduplicate_cost would have produced.
    let mut lookup: HashMap<ArticleCode, f64> = HashMap::with_capacity(cost.rows.len());
    for row in &cost.rows {
        let cell = row.get(cost_code_index).unwrap_or(&CellValue::Empty);
        let Ok(code) = normalize(cell) else {
            continue;
        };
        let value = row
            .get(cost_value_index)
            .and_then(CellValue::as_number)
            .unwrap_or(default_value);
        lookup.entry(code).or_insert(value);
    }

    let mut columns = sap.columns.clone();
    columns.push(value_column_name(&sap.columns, &cost_mapping.value));

    let mut matched = 0usize;
    let mut rows = Vec::with_capacity(sap.rows.len());
    for row in &sap.rows {
        let cell = row.get(sap_index).unwrap_or(&CellValue::Empty);
        let value = match normalize(cell) {
            Ok(code) => match lookup.get(&code) {
                Some(value) => {
                    matched += 1;
                    *value
                }
                None => default_value,
            },
            Err(_) => default_value,
        };
        let mut result_row = row.clone();
        result_row.push(CellValue::Number(value));
        rows.push(result_row);
    }

    debug!(
        rows = rows.len(),
        matched,
        unmatched = rows.len() - matched,
        "merged SAP rows against cost table"
    );

    Ok(Table { columns, rows })
}

// Re-running the tool on its own output would otherwise produce two columns
// with the cost value name; a counter suffix keeps lookups by name unambiguous.
fn value_column_name(sap_columns: &[String], value_column: &str) -> String {
    if !sap_columns.iter().any(|column| column == value_column) {
        return value_column.to_string();
    }
    let mut counter = 2;
    loop {
        let candidate = format!("{value_column}_{counter}");
        if !sap_columns.iter().any(|column| column == &candidate) {
            return candidate;
        }
        counter += 1;
    }
}

fn require_column(table: &Table, column: &str, table_name: &str) -> Result<usize> {
    table
        .column_index(column)
        .ok_or_else(|| MatchError::MissingColumn {
            table: table_name.to_string(),
            column: column.to_string(),
        })
}
