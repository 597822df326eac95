use std::path::Path;

use tracing::{debug, info, instrument};

use crate::columns::{RoleMatch, SynonymCatalog, propose_article_column, resolve_columns};
use crate::dedup::deduplicate_cost;
use crate::error::{MatchError, Result};
use crate::io::{excel_read, paste};
use crate::merge::merge;
use crate::model::{CostMapping, KeyMapping, Table};
use crate::normalize::normalize_key_column;
use crate::sanitize::sanitize_sap_rows;

/// Caller-supplied configuration for one matching run. Explicit column
/// choices always win over the resolver's proposals; unset fields fall back
/// to proposal, and a failed proposal is a configuration error rather than a
/// silent guess.
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Worksheet to read from the cost workbook; first sheet when unset.
    pub cost_sheet: Option<String>,
    /// Explicit cost-table column mapping.
    pub cost_mapping: Option<CostMapping>,
    /// Explicit SAP article-code column.
    pub sap_article_column: Option<String>,
    /// Value attached to SAP rows without a cost match.
    pub default_value: f64,
    /// Synonyms the resolver matches headers against.
    pub catalog: SynonymCatalog,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            cost_sheet: None,
            cost_mapping: None,
            sap_article_column: None,
            default_value: 0.0,
            catalog: SynonymCatalog::default(),
        }
    }
}

/// Matches a SAP export workbook against a cost workbook.
#[instrument(
    level = "info",
    skip_all,
    fields(cost = %cost_path.display(), sap = %sap_path.display())
)]
pub fn match_files(cost_path: &Path, sap_path: &Path, options: &MatchOptions) -> Result<Table> {
    let cost = excel_read::read_table(cost_path, options.cost_sheet.as_deref())?;
    let sap = excel_read::read_table(sap_path, None)?;
    info!(
        cost_rows = cost.rows.len(),
        sap_rows = sap.rows.len(),
        "loaded input workbooks"
    );
    match_tables(&sap, &cost, options)
}

/// Matches pasted clipboard text (the SAP side) against a cost workbook.
#[instrument(level = "info", skip_all, fields(cost = %cost_path.display()))]
pub fn match_with_paste(cost_path: &Path, paste_text: &str, options: &MatchOptions) -> Result<Table> {
    let cost = excel_read::read_table(cost_path, options.cost_sheet.as_deref())?;
    let sap = paste::parse_paste(paste_text)?;
    info!(
        cost_rows = cost.rows.len(),
        sap_rows = sap.rows.len(),
        "loaded cost workbook and pasted SAP data"
    );
    match_tables(&sap, &cost, options)
}

/// Runs the full in-memory pipeline: resolve columns, sanitize the SAP side,
/// normalize the key column on both sides, deduplicate the cost side, then
/// left-join. Result rows carry the canonical code text, not the raw cell.
pub fn match_tables(sap: &Table, cost: &Table, options: &MatchOptions) -> Result<Table> {
    let cost_mapping = resolve_cost_mapping(cost, options)?;
    let sap_mapping = resolve_sap_mapping(sap, options)?;
    debug!(
        cost_article = %cost_mapping.article,
        cost_value = %cost_mapping.value,
        sap_article = %sap_mapping.article,
        "column mappings resolved"
    );

    let sanitized = sanitize_sap_rows(sap, &sap_mapping.article)?;
    let normalized_sap = normalize_key_column(&sanitized, &sap_mapping.article)?;
    let normalized_cost = normalize_key_column(cost, &cost_mapping.article)?;
    let deduplicated = deduplicate_cost(&normalized_cost, &cost_mapping.article)?;
    let result = merge(
        &normalized_sap,
        &deduplicated,
        &sap_mapping,
        &cost_mapping,
        options.default_value,
    )?;
    info!(result_rows = result.rows.len(), "match complete");
    Ok(result)
}

fn resolve_cost_mapping(cost: &Table, options: &MatchOptions) -> Result<CostMapping> {
    if let Some(mapping) = &options.cost_mapping {
        return Ok(mapping.clone());
    }
    resolve_columns(&cost.columns, &options.catalog).ok_or_else(|| MatchError::AmbiguousColumns {
        table: "cost".to_string(),
        reason: "no unique article and value columns recognised; \
                 supply the column names explicitly"
            .to_string(),
    })
}

fn resolve_sap_mapping(sap: &Table, options: &MatchOptions) -> Result<KeyMapping> {
    if let Some(column) = &options.sap_article_column {
        return Ok(KeyMapping::new(column.clone()));
    }
    match propose_article_column(&sap.columns, &options.catalog) {
        RoleMatch::Resolved(column) => Ok(KeyMapping::new(column)),
        RoleMatch::Ambiguous(candidates) => Err(MatchError::AmbiguousColumns {
            table: "SAP".to_string(),
            reason: format!(
                "several headers look like an article column: {}",
                candidates.join(", ")
            ),
        }),
        RoleMatch::NoMatch => Err(MatchError::AmbiguousColumns {
            table: "SAP".to_string(),
            reason: "no header looks like an article column; \
                     supply the column name explicitly"
                .to_string(),
        }),
    }
}
