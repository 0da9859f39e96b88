//! Shell-style parameter expansion.
//!
//! Parses strings containing `$NAME`, `${NAME}` and
//! `${NAME<op>word}` references (`op` one of `-`, `=`, `?`, `+`,
//! optionally preceded by `:`) and evaluates them against a variable
//! map, reporting any assignments made by `=` expansions.
//!
//! # Quick start
//!
//! ## Expand with defaults
//!
//! ```
//! use shellvars_rs::{Absent, Variables, evaluate};
//!
//! let mut vars = Variables::new();
//! vars.insert("HOST".to_string(), "db.internal".to_string());
//!
//! let out = evaluate("${HOST}:${PORT:-5432}", &vars, Absent::Empty).unwrap();
//! assert_eq!(out.value, "db.internal:5432");
//! assert!(out.assignments.is_empty());
//! ```
//!
//! ## Assign and report
//!
//! ```
//! use shellvars_rs::{Absent, Variables, evaluate};
//!
//! let out = evaluate("${N=D}x${N}", &Variables::new(), Absent::Empty).unwrap();
//! assert_eq!(out.value, "DxD");
//! assert_eq!(out.assignments["N"], "D");
//! ```
//!
//! ## Leave unknown variables alone
//!
//! ```
//! use shellvars_rs::{Absent, Variables, evaluate};
//!
//! let out = evaluate("cp $SRC ${DEST:-/tmp}", &Variables::new(), Absent::Skip).unwrap();
//! assert_eq!(out.value, "cp $SRC ${DEST:-/tmp}");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod env_file;
pub mod eval;
pub mod parser;
pub mod span;
pub mod substitute;

pub use ast::{Expansion, Literal, Node, Operator, SimpleExpansion};
pub use env_file::{EnvFileError, EnvFileErrorKind, parse_env_file};
pub use eval::{
    Absent, Assignments, ConfigError, Evaluation, EvaluationError, Variables, evaluate_nodes,
};
pub use parser::{MAX_NESTING, ParseError, ParseErrorKind, Syntax, is_name, parse, parse_with};
pub use span::Span;
pub use substitute::substitute;

/// Unified error type covering configuration, parsing and evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An invalid option value.
    #[error("{0}")]
    Config(#[from] ConfigError),
    /// A malformed expression (strict syntax only).
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// A `${NAME?word}` expansion fired.
    #[error("{0}")]
    Evaluation(#[from] EvaluationError),
}

/// Evaluation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub absent: Absent,
    pub syntax: Syntax,
}

/// Parse and evaluate `expression` in one step.
///
/// `variables` is never modified; assignments are reported in the
/// returned [`Evaluation`].
pub fn evaluate(
    expression: &str,
    variables: &Variables,
    absent: Absent,
) -> Result<Evaluation, Error> {
    evaluate_with(
        expression,
        variables,
        Options {
            absent,
            ..Options::default()
        },
    )
}

/// Parse and evaluate `expression` with explicit options.
pub fn evaluate_with(
    expression: &str,
    variables: &Variables,
    options: Options,
) -> Result<Evaluation, Error> {
    let nodes = parse_with(expression, options.syntax)?;
    Ok(evaluate_nodes(&nodes, variables, options.absent)?)
}
