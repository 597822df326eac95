use costmatch::MatchError;
use costmatch::columns::{RoleMatch, SynonymCatalog, propose_article_column, resolve_columns};
use costmatch::dedup::deduplicate_cost;
use costmatch::merge::merge;
use costmatch::model::{CellValue, CostMapping, KeyMapping, Table};
use costmatch::normalize::{normalize, normalize_key_column};
use costmatch::sanitize::sanitize_sap_rows;

fn table(columns: &[&str], rows: Vec<Vec<CellValue>>) -> Table {
    Table {
        columns: columns.iter().map(|name| name.to_string()).collect(),
        rows,
    }
}

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

#[test]
fn equal_identifiers_normalize_to_the_same_code() {
    let representations = [
        CellValue::Integer(105),
        CellValue::Number(105.0),
        text("105"),
        text("105.0"),
        text("  105.00  "),
        text("1.05E+02"),
        text("00105"),
    ];
    for cell in &representations {
        assert_eq!(
            normalize(cell).expect("valid code"),
            "105",
            "representation {cell:?} should normalize to 105"
        );
    }
}

#[test]
fn scientific_notation_resolves_to_plain_digits() {
    assert_eq!(normalize(&text("1.23E+05")).expect("valid"), "123000");
    assert_eq!(normalize(&text("1.23e+05")).expect("valid"), "123000");
    assert_eq!(normalize(&text("5E+02")).expect("valid"), "500");
    assert_eq!(normalize(&text("1E+06")).expect("valid"), "1000000");
    assert_eq!(normalize(&CellValue::Number(1.23e5)).expect("valid"), "123000");
}

#[test]
fn zero_normalizes_but_is_not_rejected_here() {
    assert_eq!(normalize(&CellValue::Integer(0)).expect("valid"), "0");
    assert_eq!(normalize(&CellValue::Number(0.0)).expect("valid"), "0");
    assert_eq!(normalize(&text("0")).expect("valid"), "0");
    assert_eq!(normalize(&text("0.0")).expect("valid"), "0");
}

#[test]
fn fractional_codes_keep_their_decimals() {
    assert_eq!(normalize(&CellValue::Number(123.5)).expect("valid"), "123.5");
    assert_eq!(normalize(&text("0.123")).expect("valid"), "0.123");
}

#[test]
fn non_numeric_text_is_trimmed_and_kept_verbatim() {
    assert_eq!(normalize(&text("ABC123")).expect("valid"), "ABC123");
    assert_eq!(normalize(&text("  ABC123  ")).expect("valid"), "ABC123");
    assert_eq!(normalize(&text("A-B-C")).expect("valid"), "A-B-C");
    // Leading zeros only survive inside non-numeric codes.
    assert_eq!(normalize(&text("ABC00123")).expect("valid"), "ABC00123");
}

#[test]
fn large_and_negative_codes_round_trip() {
    assert_eq!(
        normalize(&text("1234567890123456")).expect("valid"),
        "1234567890123456"
    );
    assert_eq!(normalize(&CellValue::Integer(-123)).expect("valid"), "-123");
    assert_eq!(normalize(&CellValue::Number(-123.0)).expect("valid"), "-123");
}

#[test]
fn blank_and_marker_cells_are_invalid() {
    let invalid = [
        CellValue::Empty,
        text(""),
        text("   "),
        text("nan"),
        text("NaN"),
        text("None"),
        text("null"),
    ];
    for cell in &invalid {
        let error = normalize(cell).expect_err("invalid code");
        assert!(
            matches!(error, MatchError::InvalidCode { .. }),
            "cell {cell:?} should be InvalidCode, got {error:?}"
        );
    }
}

#[test]
fn normalize_is_idempotent_on_canonical_strings() {
    for canonical in ["105", "123.5", "ABC123", "0"] {
        let once = normalize(&text(canonical)).expect("valid");
        let twice = normalize(&CellValue::Text(once.clone())).expect("valid");
        assert_eq!(once, twice);
        assert_eq!(once, canonical);
    }
}

#[test]
fn normalize_key_column_rewrites_mixed_cells() {
    let input = table(
        &["Número de artículo", "Descripción"],
        vec![
            vec![CellValue::Integer(123), text("A")],
            vec![CellValue::Number(456.0), text("B")],
            vec![text("789"), text("C")],
            vec![text("ABC"), text("D")],
            vec![CellValue::Empty, text("E")],
            vec![CellValue::Number(1.23e5), text("F")],
        ],
    );
    let normalized =
        normalize_key_column(&input, "Número de artículo").expect("column normalized");
    let codes: Vec<&CellValue> = normalized.rows.iter().map(|row| &row[0]).collect();
    assert_eq!(
        codes,
        vec![
            &text("123"),
            &text("456"),
            &text("789"),
            &text("ABC"),
            &CellValue::Empty,
            &text("123000"),
        ]
    );
}

#[test]
fn sanitize_drops_trailing_blanks_and_zero_codes_in_order() {
    let input = table(
        &["Número de artículo"],
        vec![
            vec![text("101")],
            vec![text("0")],
            vec![text("102")],
            vec![CellValue::Empty],
            vec![text("103")],
            vec![CellValue::Empty],
            vec![text("   ")],
        ],
    );
    let sanitized = sanitize_sap_rows(&input, "Número de artículo").expect("sanitized");
    let codes: Vec<&CellValue> = sanitized.rows.iter().map(|row| &row[0]).collect();
    assert_eq!(codes, vec![&text("101"), &text("102"), &text("103")]);
}

#[test]
fn sanitize_keeps_rows_after_interior_blanks() {
    // A blank row between content rows is not part of the trailing suffix;
    // it is removed for its empty code, not as a paste artifact, and the
    // rows after it survive.
    let input = table(
        &["Código", "Descripción"],
        vec![
            vec![text("1"), text("first")],
            vec![CellValue::Empty, CellValue::Empty],
            vec![text("2"), text("last")],
        ],
    );
    let sanitized = sanitize_sap_rows(&input, "Código").expect("sanitized");
    let codes: Vec<&CellValue> = sanitized.rows.iter().map(|row| &row[0]).collect();
    assert_eq!(codes, vec![&text("1"), &text("2")]);
}

#[test]
fn sanitize_rejects_a_missing_column() {
    let input = table(&["Other"], vec![vec![text("1")]]);
    let error = sanitize_sap_rows(&input, "Código").expect_err("missing column");
    assert!(matches!(error, MatchError::MissingColumn { .. }));
}

#[test]
fn deduplicate_keeps_the_first_occurrence() {
    let input = table(
        &["Artículo", "Manufactura FC"],
        vec![
            vec![CellValue::Integer(100), CellValue::Number(5.0)],
            vec![CellValue::Integer(100), CellValue::Number(9.0)],
            vec![CellValue::Integer(200), CellValue::Number(3.0)],
        ],
    );
    let deduplicated = deduplicate_cost(&input, "Artículo").expect("deduplicated");
    assert_eq!(deduplicated.rows.len(), 2);
    assert_eq!(deduplicated.rows[0][1], CellValue::Number(5.0));
    assert_eq!(deduplicated.rows[1][0], CellValue::Integer(200));
}

#[test]
fn deduplicate_collapses_equivalent_representations() {
    let input = table(
        &["Artículo", "Manufactura FC"],
        vec![
            vec![CellValue::Integer(100), CellValue::Number(5.0)],
            vec![text("100.0"), CellValue::Number(9.0)],
        ],
    );
    let deduplicated = deduplicate_cost(&input, "Artículo").expect("deduplicated");
    assert_eq!(deduplicated.rows.len(), 1);
    assert_eq!(deduplicated.rows[0][1], CellValue::Number(5.0));
}

#[test]
fn merge_preserves_order_and_cardinality_with_defaults() {
    let sap = table(
        &["Número de artículo"],
        vec![
            vec![CellValue::Integer(105)],
            vec![CellValue::Integer(200)],
            vec![CellValue::Integer(999)],
        ],
    );
    let cost = table(
        &["Artículo", "Manufactura FC"],
        vec![
            vec![text("105"), CellValue::Number(12.5)],
            vec![text("200"), CellValue::Number(7.0)],
        ],
    );
    let result = merge(
        &sap,
        &cost,
        &KeyMapping::new("Número de artículo"),
        &CostMapping::new("Artículo", "Manufactura FC"),
        0.0,
    )
    .expect("merged");

    assert_eq!(result.rows.len(), sap.rows.len());
    assert_eq!(
        result.columns,
        vec!["Número de artículo".to_string(), "Manufactura FC".to_string()]
    );
    let values: Vec<&CellValue> = result.rows.iter().map(|row| &row[1]).collect();
    assert_eq!(
        values,
        vec![
            &CellValue::Number(12.5),
            &CellValue::Number(7.0),
            &CellValue::Number(0.0),
        ]
    );
}

#[test]
fn merge_uses_the_caller_supplied_default() {
    let sap = table(&["Code"], vec![vec![text("999")]]);
    let cost = table(
        &["Code", "Price"],
        vec![vec![text("1"), CellValue::Number(2.0)]],
    );
    let result = merge(
        &sap,
        &cost,
        &KeyMapping::new("Code"),
        &CostMapping::new("Code", "Price"),
        -1.0,
    )
    .expect("merged");
    assert_eq!(result.rows[0][1], CellValue::Number(-1.0));
}

#[test]
fn merge_coerces_non_numeric_cost_cells_to_the_default() {
    let sap = table(&["Code"], vec![vec![text("1")]]);
    let cost = table(
        &["Code", "Price"],
        vec![vec![text("1"), text("not a number")]],
    );
    let result = merge(
        &sap,
        &cost,
        &KeyMapping::new("Code"),
        &CostMapping::new("Code", "Price"),
        0.0,
    )
    .expect("merged");
    assert_eq!(result.rows[0][1], CellValue::Number(0.0));
}

#[test]
fn merge_fails_fast_on_a_misconfigured_mapping() {
    let sap = table(&["Code"], vec![vec![text("1")]]);
    let cost = table(
        &["Code", "Price"],
        vec![vec![text("1"), CellValue::Number(2.0)]],
    );
    let error = merge(
        &sap,
        &cost,
        &KeyMapping::new("Nonexistent"),
        &CostMapping::new("Code", "Price"),
        0.0,
    )
    .expect_err("missing column");
    assert!(matches!(
        error,
        MatchError::MissingColumn { ref column, .. } if column == "Nonexistent"
    ));
}

#[test]
fn merge_tolerates_duplicate_cost_rows() {
    // First occurrence wins even when the cost side skipped deduplication.
    let sap = table(&["Code"], vec![vec![text("100")]]);
    let cost = table(
        &["Code", "Price"],
        vec![
            vec![text("100"), CellValue::Number(5.0)],
            vec![text("100"), CellValue::Number(9.0)],
        ],
    );
    let result = merge(
        &sap,
        &cost,
        &KeyMapping::new("Code"),
        &CostMapping::new("Code", "Price"),
        0.0,
    )
    .expect("merged");
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0][1], CellValue::Number(5.0));
}

#[test]
fn merge_suffixes_a_colliding_value_column_name() {
    // Re-running the tool on its own output: the SAP side already carries a
    // "Manufactura FC" column, so the appended one gets a counter suffix
    // and lookups by name stay unambiguous.
    let sap = table(
        &["Código", "Manufactura FC"],
        vec![vec![text("105"), CellValue::Number(1.0)]],
    );
    let cost = table(
        &["Artículo", "Manufactura FC"],
        vec![vec![text("105"), CellValue::Number(12.5)]],
    );
    let result = merge(
        &sap,
        &cost,
        &KeyMapping::new("Código"),
        &CostMapping::new("Artículo", "Manufactura FC"),
        0.0,
    )
    .expect("merged");

    assert_eq!(
        result.columns,
        vec![
            "Código".to_string(),
            "Manufactura FC".to_string(),
            "Manufactura FC_2".to_string(),
        ]
    );
    assert_eq!(result.rows[0][1], CellValue::Number(1.0));
    assert_eq!(result.rows[0][2], CellValue::Number(12.5));
}

#[test]
fn resolver_proposes_the_original_column_names() {
    let headers = vec!["Artículo".to_string(), "Manufactura FC".to_string()];
    let mapping =
        resolve_columns(&headers, &SynonymCatalog::default()).expect("confident proposal");
    assert_eq!(mapping.article, "Artículo");
    assert_eq!(mapping.value, "Manufactura FC");
}

#[test]
fn resolver_returns_no_proposal_for_unknown_headers() {
    let headers = vec!["Alpha".to_string(), "Beta".to_string()];
    assert_eq!(resolve_columns(&headers, &SynonymCatalog::default()), None);
    assert_eq!(
        propose_article_column(&headers, &SynonymCatalog::default()),
        RoleMatch::NoMatch
    );
}

#[test]
fn resolver_surfaces_ambiguity_instead_of_guessing() {
    let headers = vec![
        "Código de material".to_string(),
        "Número de artículo".to_string(),
        "Costo".to_string(),
    ];
    match propose_article_column(&headers, &SynonymCatalog::default()) {
        RoleMatch::Ambiguous(candidates) => assert_eq!(candidates.len(), 2),
        other => panic!("expected ambiguity, got {other:?}"),
    }
    assert_eq!(resolve_columns(&headers, &SynonymCatalog::default()), None);
}
