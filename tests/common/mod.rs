#![allow(dead_code)]

use shellvars_rs::{Absent, Assignments, Evaluation, Variables, evaluate};

pub const POLICIES: [Absent; 2] = [Absent::Empty, Absent::Skip];

/// Build a variable map from name/value pairs.
pub fn vars(pairs: &[(&str, &str)]) -> Variables {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Build an expected assignment map.
pub fn assigned(pairs: &[(&str, &str)]) -> Assignments {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Evaluate and panic with context on failure.
pub fn eval_ok(expr: &str, pairs: &[(&str, &str)], absent: Absent) -> Evaluation {
    evaluate(expr, &vars(pairs), absent)
        .unwrap_or_else(|e| panic!("evaluating {expr:?} ({absent}) failed: {e}"))
}

/// Assert the value and assignments of an evaluation.
pub fn assert_eval(
    expr: &str,
    pairs: &[(&str, &str)],
    absent: Absent,
    value: &str,
    assignments: &[(&str, &str)],
) {
    let out = eval_ok(expr, pairs, absent);
    assert_eq!(out.value, value, "value of {expr:?} under {absent}");
    assert_eq!(
        out.assignments,
        assigned(assignments),
        "assignments of {expr:?} under {absent}"
    );
}

/// Build `${param<colon><op><word>}`.
pub fn cons(param: &str, colon: bool, op: char, word: &str) -> String {
    let colon = if colon { ":" } else { "" };
    format!("${{{param}{colon}{op}{word}}}")
}
