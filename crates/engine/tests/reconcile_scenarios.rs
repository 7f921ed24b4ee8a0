//! End-to-end reconciliation runs over small in-memory catalogs.

use pricesync_core::config::MatchingConfig;
use pricesync_core::{ConfidenceLevel, ExistingProduct, MatchType, ParsedProduct, ProductAction};
use pricesync_engine::reconcile;
use pretty_assertions::assert_eq;

fn parsed(name: &str, model: Option<&str>, price: f64) -> ParsedProduct {
    ParsedProduct {
        name: name.to_string(),
        model: model.map(str::to_string),
        sku: None,
        price,
        description: None,
        category: None,
        manufacturer: None,
    }
}

fn existing(id: &str, name: &str, sku: Option<&str>, price: f64) -> ExistingProduct {
    ExistingProduct {
        id: id.to_string(),
        name: name.to_string(),
        model: None,
        sku: sku.map(str::to_string),
        price,
        description: None,
        status: Some(1),
        quantity: Some(0),
    }
}

fn denon_catalog() -> Vec<ExistingProduct> {
    vec![existing(
        "42",
        "Denon AVR-X1800H AV Receiver",
        Some("AVR-X1800H"),
        17999.0,
    )]
}

#[test]
fn known_receiver_updates_with_price_delta() {
    let batch = vec![parsed(
        "Denon AVR-X1800H Receiver",
        Some("AVR-X1800H"),
        18999.0,
    )];

    let outcome = reconcile(batch, denon_catalog(), &MatchingConfig::default());

    assert_eq!(outcome.results.len(), 1);
    let result = &outcome.results[0];
    assert_eq!(result.match_type, MatchType::ExactSku);
    assert_eq!(result.similarity, 100);
    assert_eq!(result.action, ProductAction::Update);
    assert_eq!(result.price_change, Some(1000.0));
    assert_eq!(result.existing_product.as_ref().map(|p| p.id.as_str()), Some("42"));
}

#[test]
fn invalid_record_is_skipped_with_issues() {
    let batch = vec![parsed("Unknown Gadget", Some(""), 0.0)];

    let outcome = reconcile(batch, denon_catalog(), &MatchingConfig::default());

    let result = &outcome.results[0];
    assert_eq!(result.action, ProductAction::Skip);
    assert!(result.issues.iter().any(|i| i.contains("price")));
}

#[test]
fn unmatched_product_is_created() {
    let batch = vec![parsed("Totally New Product", Some("XYZ-999"), 50.0)];

    let outcome = reconcile(batch, denon_catalog(), &MatchingConfig::default());

    let result = &outcome.results[0];
    assert_eq!(result.match_type, MatchType::NoMatch);
    assert_eq!(result.action, ProductAction::Create);
    assert!(result.existing_product.is_none());
}

#[test]
fn empty_catalog_creates_everything_valid() {
    let batch = vec![parsed("Denon AVR-X1800H Receiver", Some("AVR-X1800H"), 18999.0)];

    let outcome = reconcile(batch, vec![], &MatchingConfig::default());

    assert_eq!(outcome.results.len(), 1);
    let result = &outcome.results[0];
    assert_eq!(result.action, ProductAction::Create);
    assert_eq!(result.confidence_level, ConfidenceLevel::None);
}

#[test]
fn empty_batch_yields_empty_results_and_zero_summary() {
    let outcome = reconcile(vec![], denon_catalog(), &MatchingConfig::default());
    assert!(outcome.results.is_empty());
    assert_eq!(outcome.summary.total_products, 0);
    assert_eq!(outcome.summary.average_similarity, 0.0);
}

#[test]
fn output_order_mirrors_input_order() {
    let batch: Vec<ParsedProduct> = (0..64)
        .map(|i| parsed(&format!("Product Number {i}"), Some(&format!("PN-{i:03}X")), 10.0 + i as f64))
        .collect();

    let outcome = reconcile(batch.clone(), denon_catalog(), &MatchingConfig::default());

    assert_eq!(outcome.results.len(), batch.len());
    for (result, input) in outcome.results.iter().zip(&batch) {
        assert_eq!(&result.parsed_product, input);
    }
}

#[test]
fn identical_inputs_produce_identical_outputs() {
    let batch = vec![
        parsed("Denon AVR-X1800H Receiver", Some("AVR-X1800H"), 18999.0),
        parsed("Totally New Product", Some("XYZ-999"), 50.0),
        parsed("Denon AVR X1800 Receiver", None, 17000.0),
    ];
    let catalog = denon_catalog();

    let first = reconcile(batch.clone(), catalog.clone(), &MatchingConfig::default());
    let second = reconcile(batch, catalog, &MatchingConfig::default());

    assert_eq!(first.results, second.results);
    assert_eq!(first.summary, second.summary);
}

#[test]
fn exact_sku_outranks_any_fuzzy_candidate() {
    // The fuzzy-best candidate by name is id 1, but id 2 owns the SKU
    let catalog = vec![
        existing("1", "Denon AVR-X1800H Receiver", None, 100.0),
        existing("2", "Something Else Entirely", Some("AVR-X1800H"), 100.0),
    ];
    let batch = vec![parsed("Denon AVR-X1800H Receiver", Some("AVR-X1800H"), 100.0)];

    let outcome = reconcile(batch, catalog, &MatchingConfig::default());

    let result = &outcome.results[0];
    assert_eq!(result.match_type, MatchType::ExactSku);
    assert_eq!(result.similarity, 100);
    assert_eq!(result.existing_product.as_ref().map(|p| p.id.as_str()), Some("2"));
}

#[test]
fn equal_price_produces_no_change_issue() {
    let batch = vec![parsed("Denon AVR-X1800H Receiver", Some("AVR-X1800H"), 17999.0)];

    let outcome = reconcile(batch, denon_catalog(), &MatchingConfig::default());

    let result = &outcome.results[0];
    assert_eq!(result.price_change, Some(0.0));
    assert!(result.issues.is_empty());
    assert_eq!(result.action, ProductAction::Update);
}

#[test]
fn summary_counters_total_to_result_count() {
    let batch = vec![
        parsed("Denon AVR-X1800H Receiver", Some("AVR-X1800H"), 18999.0),
        parsed("Totally New Product", Some("XYZ-999"), 50.0),
        parsed("Unknown Gadget", None, 0.0),
    ];

    let outcome = reconcile(batch, denon_catalog(), &MatchingConfig::default());

    let summary = &outcome.summary;
    assert_eq!(summary.total_products, 3);
    assert_eq!(
        summary.actions.create + summary.actions.update + summary.actions.skip,
        3
    );
    let match_total = summary.match_types.exact_sku
        + summary.match_types.exact_model
        + summary.match_types.model_extracted
        + summary.match_types.fuzzy_name
        + summary.match_types.partial_match
        + summary.match_types.no_match;
    assert_eq!(match_total, 3);
    let confidence_total = summary.confidence_levels.high
        + summary.confidence_levels.medium
        + summary.confidence_levels.low
        + summary.confidence_levels.none;
    assert_eq!(confidence_total, 3);
}
