//! Evaluation of parsed expressions against a variable map.
//!
//! The evaluator works on a private copy of the caller's variables so
//! that `${NAME=word}` assignments are visible to later references in
//! the same call, while the caller's map stays untouched.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::ast::{Expansion, Node, Operator};

/// Variables available to an expression.
pub type Variables = HashMap<String, String>;

/// Assignments performed by an expression, ordered by name.
pub type Assignments = BTreeMap<String, String>;

/// Policy for variables that are not present in the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Absent {
    /// Treat the variable as unset, expanding to `""` (or the word).
    #[default]
    Empty,
    /// Leave the reference in the output exactly as written.
    Skip,
}

impl fmt::Display for Absent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for absent '{value}'")]
    InvalidAbsent { value: String },
}

impl FromStr for Absent {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("empty") {
            Ok(Self::Empty)
        } else if s.eq_ignore_ascii_case("skip") {
            Ok(Self::Skip)
        } else {
            Err(ConfigError::InvalidAbsent {
                value: s.to_string(),
            })
        }
    }
}

/// Raised by `${NAME?word}` when `NAME` is unset (or null with `:`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct EvaluationError {
    pub message: String,
}

/// Result of a successful evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    /// The expanded text.
    pub value: String,
    /// Variables assigned by `=` expansions, last write wins.
    pub assignments: Assignments,
}

/// Evaluate parsed nodes against `variables`.
///
/// # Errors
///
/// Returns `EvaluationError` when a `?` expansion triggers. No partial
/// output or assignments are returned in that case.
pub fn evaluate_nodes(
    nodes: &[Node],
    variables: &Variables,
    absent: Absent,
) -> Result<Evaluation, EvaluationError> {
    let mut evaluator = Evaluator {
        env: variables.clone(),
        absent,
    };
    evaluator.sequence(nodes)
}

/// What a variable lookup found.
enum Lookup {
    Unset,
    Skip,
    Set(String),
}

struct Evaluator {
    env: Variables,
    absent: Absent,
}

impl Evaluator {
    fn lookup(&self, name: &str) -> Lookup {
        match self.env.get(name) {
            Some(value) => Lookup::Set(value.clone()),
            None => match self.absent {
                Absent::Empty => Lookup::Unset,
                Absent::Skip => Lookup::Skip,
            },
        }
    }

    fn sequence(&mut self, nodes: &[Node]) -> Result<Evaluation, EvaluationError> {
        let mut out = Evaluation::default();

        for node in nodes {
            match node {
                Node::Literal(lit) => out.value.push_str(&lit.value),
                Node::Simple(simple) => match self.lookup(&simple.name) {
                    Lookup::Set(value) => out.value.push_str(&value),
                    Lookup::Skip => out.value.push_str(&simple.text),
                    Lookup::Unset => {}
                },
                Node::Expansion(exp) => {
                    let value = self.expansion(exp, &mut out.assignments)?;
                    out.value.push_str(&value);
                }
            }
        }

        Ok(out)
    }

    /// Evaluate a word, merging its assignments into `assignments`.
    fn word(
        &mut self,
        word: &[Node],
        assignments: &mut Assignments,
    ) -> Result<String, EvaluationError> {
        let inner = self.sequence(word)?;
        assignments.extend(inner.assignments);
        Ok(inner.value)
    }

    fn expansion(
        &mut self,
        exp: &Expansion,
        assignments: &mut Assignments,
    ) -> Result<String, EvaluationError> {
        let current = match self.lookup(&exp.name) {
            Lookup::Skip => return Ok(exp.text.clone()),
            Lookup::Unset => None,
            Lookup::Set(value) => Some(value),
        };

        // Default, Assign and Error fire on unset, or on empty with `:`.
        let missing = current
            .as_deref()
            .is_none_or(|value| value.is_empty() && exp.colon);

        match exp.operator {
            Operator::Default => match current {
                Some(value) if !missing => Ok(value),
                _ => self.word(&exp.word, assignments),
            },
            Operator::Assign => {
                let value = match current {
                    Some(value) if !missing => value,
                    _ => self.word(&exp.word, assignments)?,
                };
                self.env.insert(exp.name.clone(), value.clone());
                assignments.insert(exp.name.clone(), value.clone());
                Ok(value)
            }
            Operator::Error => match current {
                Some(value) if !missing => Ok(value),
                _ => {
                    let message = self.sequence(&exp.word)?.value;
                    if message.is_empty() {
                        Err(EvaluationError {
                            message: format!("Variable '{}' null or unset.", exp.name),
                        })
                    } else {
                        Err(EvaluationError { message })
                    }
                }
            },
            Operator::Alternate => match current {
                Some(value) if !value.is_empty() || !exp.colon => {
                    self.word(&exp.word, assignments)
                }
                _ => Ok(String::new()),
            },
        }
    }
}
