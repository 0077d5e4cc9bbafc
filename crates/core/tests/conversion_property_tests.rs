//! Property-based integration tests for in-page conversion.
//!
//! These tests drive the public API with random amounts, layouts and content
//! trees, using the `proptest` crate for random test case generation.

use chrono::NaiveDate;
use pagefx_core::content::walk_text_nodes;
use pagefx_core::fx::{find_currency_occurrences, format_money, parse_amount, CurrencyPattern};
use pagefx_core::{ContentNode, FxError, RateSnapshot};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

// =============================================================================
// Generators
// =============================================================================

/// Generates a whole amount rendered with thousands separators, e.g. "8,000".
fn arb_grouped_amount() -> impl Strategy<Value = (u64, String)> {
    (0u64..1_000_000_000).prop_map(|value| {
        let grouped = format_money(Decimal::from(value), "", 0);
        (value, grouped.trim_start().to_string())
    })
}

/// Generates filler text that never contains the "R" symbol.
fn arb_filler() -> impl Strategy<Value = String> {
    "[a-zA-QS-Z ,.]{0,24}"
}

/// Generates a small content tree of nested elements and text leaves.
fn arb_tree() -> impl Strategy<Value = ContentNode> {
    let leaf = prop_oneof![
        arb_filler().prop_map(ContentNode::text),
        (0u64..100_000).prop_map(|v| ContentNode::text(format!("From R {} per night", v))),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        (
            prop_oneof![Just("div"), Just("span"), Just("script")],
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(kind, children)| ContentNode::element(kind, children))
    })
}

fn snapshot() -> RateSnapshot {
    RateSnapshot {
        base: "ZAR".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        rates: HashMap::from([
            ("ZAR".to_string(), dec!(1)),
            ("USD".to_string(), dec!(0.054)),
        ]),
        fetched_at_ms: 0,
    }
}

fn leaves(node: &ContentNode, out: &mut Vec<String>) {
    match node {
        ContentNode::Text(text) => out.push(text.data.clone()),
        ContentNode::Element(element) => {
            for child in &element.children {
                leaves(child, out);
            }
        }
        ContentNode::Other(_) => {}
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Any grouped amount after the symbol is found and parsed back exactly.
    #[test]
    fn prop_grouped_amount_is_found_and_parsed(
        (value, grouped) in arb_grouped_amount(),
        before in arb_filler(),
    ) {
        let text = format!("{} R {} a night", before, grouped);
        let occurrences = find_currency_occurrences(&text, "R").unwrap();

        prop_assert_eq!(occurrences.len(), 1);
        prop_assert_eq!(occurrences[0].amount, grouped.as_str());
        prop_assert_eq!(parse_amount(occurrences[0].amount).unwrap(), Decimal::from(value));
    }

    /// Replacement never touches text outside the matched spans.
    #[test]
    fn prop_identity_replacement_preserves_text(
        parts in prop::collection::vec((arb_filler(), 0u64..100_000), 0..5),
    ) {
        let text: String = parts
            .iter()
            .map(|(filler, amount)| format!("{} R {}", filler, amount))
            .collect();
        let pattern = CurrencyPattern::for_symbol("R").unwrap();
        let out = pattern
            .replace_all(&text, |m| Ok::<_, FxError>(format!("{}R {}", m.prefix, m.amount)))
            .unwrap();
        prop_assert_eq!(out, text);
    }

    /// Converting a tree never changes its shape, and script leaves keep their text.
    #[test]
    fn prop_tree_walk_preserves_shape(tree in arb_tree()) {
        let mut converted = tree.clone();
        let snap = snapshot();
        let pattern = CurrencyPattern::for_symbol("R").unwrap();
        let converter = pagefx_core::fx::AmountConverter::new(&snap, "ZAR", "USD", 0).unwrap();

        walk_text_nodes(
            &mut converted,
            &|kind: &str| kind.eq_ignore_ascii_case("script"),
            &mut |text: &str| pattern.replace_all(text, |m| converter.convert_match(m)),
        )
        .unwrap();

        let mut before = Vec::new();
        let mut after = Vec::new();
        leaves(&tree, &mut before);
        leaves(&converted, &mut after);
        prop_assert_eq!(before.len(), after.len());

        let mut script_before = String::new();
        let mut script_after = String::new();
        collect_scripts(&tree, &mut script_before);
        collect_scripts(&converted, &mut script_after);
        prop_assert_eq!(script_before, script_after);
    }
}

fn collect_scripts(node: &ContentNode, out: &mut String) {
    if let ContentNode::Element(element) = node {
        if element.kind == "script" {
            out.push_str(&node.text_content());
            out.push('\u{0}');
            return;
        }
        for child in &element.children {
            collect_scripts(child, out);
        }
    }
}
