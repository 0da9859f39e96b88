//! Loader for `NAME=VALUE` environment files.

use std::fmt;

use crate::eval::Variables;
use crate::parser::is_name;

/// Classifies an environment-file error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFileErrorKind {
    /// Non-blank, non-comment line without `=`.
    MissingEquals,
    /// Text before `=` is not a variable name.
    InvalidName { name: String },
}

impl fmt::Display for EnvFileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEquals => write!(f, "expected NAME=VALUE"),
            Self::InvalidName { name } => write!(f, "invalid variable name '{name}'"),
        }
    }
}

/// Error produced while reading an environment file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {line}")]
pub struct EnvFileError {
    pub kind: EnvFileErrorKind,
    pub line: usize,
}

/// Parse environment-file content into variables.
///
/// Blank lines and `#` comments are skipped, a leading `export ` is
/// ignored, and one level of matching quotes around the value is
/// removed. Values are not expanded.
pub fn parse_env_file(content: &str) -> Result<Variables, EnvFileError> {
    let mut variables = Variables::new();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").map_or(line, str::trim_start);

        let Some((name, value)) = line.split_once('=') else {
            return Err(EnvFileError {
                kind: EnvFileErrorKind::MissingEquals,
                line: index + 1,
            });
        };
        let name = name.trim_end();
        if !is_name(name) {
            return Err(EnvFileError {
                kind: EnvFileErrorKind::InvalidName {
                    name: name.to_string(),
                },
                line: index + 1,
            });
        }

        variables.insert(name.to_string(), unquote(value.trim()).to_string());
    }

    Ok(variables)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unquote_forms() {
        assert_eq!(unquote("\"a b\""), "a b");
        assert_eq!(unquote("'x'"), "x");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("'mixed\""), "'mixed\"");
    }
}
