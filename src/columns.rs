use serde::{Deserialize, Serialize};

use crate::model::CostMapping;

/// Keyword lists used to recognise the article-code and cost-value columns
/// in a table's headers. The defaults carry the Spanish and English synonyms
/// seen in real cost sheets and SAP exports; callers with unusual headers can
/// supply their own catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynonymCatalog {
    pub article: Vec<String>,
    pub value: Vec<String>,
}

impl Default for SynonymCatalog {
    fn default() -> Self {
        Self {
            article: keywords(&[
                "artículo", "articulo", "article", "material", "código", "codigo", "code",
                "número", "numero", "sku",
            ]),
            value: keywords(&[
                "manufactura", "costo", "cost", "precio", "price", "value", "importe", "fc",
            ]),
        }
    }
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| word.to_string()).collect()
}

/// Outcome of resolving one column role against a header list. Ambiguity is
/// surfaced rather than resolved arbitrarily; the caller decides whether to
/// ask the user or fail.
#[derive(Debug, Clone, PartialEq)]
pub enum RoleMatch {
    /// Exactly one header matched the catalog.
    Resolved(String),
    /// Several headers matched; candidates in table order.
    Ambiguous(Vec<String>),
    /// No header contains a recognisable synonym.
    NoMatch,
}

impl RoleMatch {
    pub fn resolved(&self) -> Option<&str> {
        match self {
            RoleMatch::Resolved(name) => Some(name),
            _ => None,
        }
    }
}

/// Proposes the article-code column for the given headers.
pub fn propose_article_column(headers: &[String], catalog: &SynonymCatalog) -> RoleMatch {
    resolve_role(headers, &catalog.article)
}

/// Proposes the cost-value column for the given headers.
pub fn propose_value_column(headers: &[String], catalog: &SynonymCatalog) -> RoleMatch {
    resolve_role(headers, &catalog.value)
}

/// Proposes a full cost-table mapping. Returns `None` unless both roles
/// resolve to exactly one column each; a half-confident proposal is worse
/// than none.
pub fn resolve_columns(headers: &[String], catalog: &SynonymCatalog) -> Option<CostMapping> {
    let article = propose_article_column(headers, catalog);
    let value = propose_value_column(headers, catalog);
    match (article, value) {
        (RoleMatch::Resolved(article), RoleMatch::Resolved(value)) => {
            Some(CostMapping { article, value })
        }
        _ => None,
    }
}

fn resolve_role(headers: &[String], synonyms: &[String]) -> RoleMatch {
    let mut candidates: Vec<String> = Vec::new();
    for header in headers {
        let lowered = header.to_lowercase();
        if synonyms
            .iter()
            .any(|synonym| lowered.contains(&synonym.to_lowercase()))
        {
            candidates.push(header.clone());
        }
    }
    match candidates.len() {
        0 => RoleMatch::NoMatch,
        1 => RoleMatch::Resolved(candidates.remove(0)),
        _ => RoleMatch::Ambiguous(candidates),
    }
}
