//! Property-based tests with proptest.
//!
//! Random expressions and variable maps check the algebraic
//! properties of evaluation: literal passthrough, direct substitution,
//! the `Skip` round-trip, idempotence, and total parsing.

mod common;

use common::POLICIES;
use proptest::prelude::*;
use shellvars_rs::{Absent, Variables, ast, evaluate, parse};

// -- Leaf strategies --

fn name() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,8}".prop_map(|s| s)
}

/// Text with no `$` at all.
fn plain_text() -> impl Strategy<Value = String> {
    "[^$]{0,40}".prop_map(|s| s)
}

/// Literal chunk safe to place before a reference: does not end in an
/// identifier character, so `$NAME` cannot swallow it.
fn separator() -> impl Strategy<Value = String> {
    "[ ./:,}{-]{0,4}".prop_map(|s| s)
}

/// Expression made only of literals and simple references.
fn simple_expression() -> impl Strategy<Value = String> {
    prop::collection::vec((separator(), name(), any::<bool>()), 0..=5).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(sep, name, braced)| {
                if braced {
                    format!("{sep}${{{name}}}")
                } else {
                    format!("{sep}${name}")
                }
            })
            .collect()
    })
}

fn absent() -> impl Strategy<Value = Absent> {
    prop_oneof![Just(Absent::Empty), Just(Absent::Skip)]
}

proptest! {
    #[test]
    fn literal_text_passes_through(text in plain_text(), absent in absent()) {
        let out = evaluate(&text, &Variables::new(), absent).expect("evaluate");
        prop_assert_eq!(out.value, text);
        prop_assert!(out.assignments.is_empty());
    }

    #[test]
    fn simple_reference_substitutes(name in name(), value in ".{0,20}") {
        let vars: Variables = [(name.clone(), value.clone())].into_iter().collect();
        for absent in POLICIES {
            for expr in [format!("${name}"), format!("${{{name}}}")] {
                let out = evaluate(&expr, &vars, absent).expect("evaluate");
                prop_assert_eq!(&out.value, &value);
                prop_assert!(out.assignments.is_empty());
            }
        }
    }

    #[test]
    fn skip_round_trips_simple_expressions(expr in simple_expression()) {
        let out = evaluate(&expr, &Variables::new(), Absent::Skip).expect("evaluate");
        prop_assert_eq!(out.value, expr);
        prop_assert!(out.assignments.is_empty());
    }

    #[test]
    fn resolved_output_is_idempotent(expr in simple_expression(), value in "[a-z ]{0,10}") {
        let names: Vec<String> = parse(&expr)
            .expect("parse")
            .iter()
            .filter_map(|node| match node {
                shellvars_rs::Node::Simple(s) => Some(s.name.clone()),
                _ => None,
            })
            .collect();
        let vars: Variables = names.into_iter().map(|n| (n, value.clone())).collect();
        let first = evaluate(&expr, &vars, Absent::Empty).expect("evaluate");
        prop_assume!(!first.value.contains('$'));
        let second = evaluate(&first.value, &vars, Absent::Skip).expect("evaluate");
        prop_assert_eq!(second.value, first.value);
    }

    #[test]
    fn lenient_parse_is_total_and_lossless(text in "[a-c${}:=?+ -]{0,30}") {
        let nodes = parse(&text).expect("lenient parse never fails");
        prop_assert_eq!(ast::source_text(&nodes), text.clone());
        for absent in POLICIES {
            // Only `?` may fail, and only with an evaluation error.
            if let Err(e) = evaluate(&text, &Variables::new(), absent) {
                prop_assert!(matches!(e, shellvars_rs::Error::Evaluation(_)));
            }
        }
    }

    #[test]
    fn caller_variables_are_never_modified(value in "[a-z]{0,5}") {
        let vars: Variables = [("a".to_string(), value.clone())].into_iter().collect();
        let before = vars.clone();
        let _ = evaluate("${a:=x}${b=y}${c:?z}", &vars, Absent::Empty);
        prop_assert_eq!(vars, before);
    }
}
