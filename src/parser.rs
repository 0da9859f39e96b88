use std::collections::HashSet;
use std::fmt;

use crate::ast::{Expansion, Node, Operator};
use crate::span::Span;

/// How the parser treats a `${` that does not form an expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Syntax {
    /// Keep the text literally, as a shell would.
    #[default]
    Lenient,
    /// Report a `ParseError`.
    Strict,
}

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// `${` not followed by a valid variable name.
    InvalidName,
    /// Name followed by something other than `}`, `:` or an operator.
    ExpectedOperator { found: Option<char> },
    /// Missing `}` after an operator word.
    UnterminatedExpansion { name: String },
    /// Words nested more than [`MAX_NESTING`] levels deep.
    NestingTooDeep,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName => write!(f, "invalid variable name after '${{'"),
            Self::ExpectedOperator { found: None } => {
                write!(f, "expected '}}' or operator, got end of input")
            }
            Self::ExpectedOperator { found: Some(ch) } => {
                write!(f, "expected '}}' or operator, got '{ch}'")
            }
            Self::UnterminatedExpansion { name } => {
                write!(f, "unterminated expansion of '{name}'")
            }
            Self::NestingTooDeep => {
                write!(f, "expansions nested more than {MAX_NESTING} levels deep")
            }
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

/// Deepest allowed nesting of `${NAME<op>word}` inside words.
pub const MAX_NESTING: usize = 256;

/// Parse an expression into nodes, keeping malformed `${` as text.
///
/// # Errors
///
/// Fails only with [`ParseErrorKind::NestingTooDeep`].
pub fn parse(input: &str) -> Result<Vec<Node>, ParseError> {
    parse_with(input, Syntax::Lenient)
}

/// Parse an expression into nodes using the given syntax mode.
///
/// # Errors
///
/// With [`Syntax::Strict`], returns `ParseError` for a `${` that
/// cannot be completed: bad name, bad operator, or missing `}`.
/// In either mode, nesting past [`MAX_NESTING`] is an error.
pub fn parse_with(input: &str, syntax: Syntax) -> Result<Vec<Node>, ParseError> {
    let mut parser = Parser::new(input, syntax);
    let nodes = parser.sequence(false)?;
    debug_assert_eq!(parser.pos, input.len());
    Ok(nodes)
}

const fn is_name_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

const fn is_name_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Whether `name` is a valid variable identifier.
#[must_use]
pub fn is_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.first().copied().is_some_and(is_name_start) && bytes.iter().copied().all(is_name_char)
}

struct Parser<'a> {
    text: &'a str,
    input: &'a [u8],
    pos: usize,
    syntax: Syntax,
    depth: usize,
    // Start offsets where an expansion was already tried and failed.
    failed: HashSet<usize>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, syntax: Syntax) -> Self {
        Self {
            text,
            input: text.as_bytes(),
            pos: 0,
            syntax,
            depth: 0,
            failed: HashSet::new(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    /// Parse nodes until end of input, or (inside a word) until an
    /// unconsumed `}`.
    fn sequence(&mut self, nested: bool) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        let mut literal_start = self.pos;

        while let Some(ch) = self.peek() {
            if nested && ch == b'}' {
                break;
            }
            if ch == b'$' {
                let start = self.pos;
                if let Some(node) = self.expansion()? {
                    if literal_start < start {
                        nodes.push(Node::literal(&self.text[literal_start..start]));
                    }
                    nodes.push(node);
                    literal_start = self.pos;
                    continue;
                }
            }
            self.pos += 1;
        }

        if literal_start < self.pos {
            nodes.push(Node::literal(&self.text[literal_start..self.pos]));
        }
        Ok(nodes)
    }

    /// Try to read an expansion at the current `$`. On failure the
    /// position is left unchanged and `None` is returned.
    fn expansion(&mut self) -> Result<Option<Node>, ParseError> {
        let start = self.pos;
        if self.failed.contains(&start) {
            return Ok(None);
        }

        match self.peek_at(1) {
            Some(b) if is_name_start(b) => {
                self.pos += 1;
                let name = self.name();
                return Ok(Some(Node::simple(name, &self.text[start..self.pos])));
            }
            Some(b'{') => {}
            _ => return Ok(None),
        }

        match self.braced(start) {
            Ok(node) => Ok(Some(node)),
            Err(err) => {
                if self.syntax == Syntax::Strict || err.kind == ParseErrorKind::NestingTooDeep {
                    return Err(err);
                }
                self.pos = start;
                self.failed.insert(start);
                Ok(None)
            }
        }
    }

    /// Read the remainder of `${...}` starting at `start`.
    fn braced(&mut self, start: usize) -> Result<Node, ParseError> {
        let text = self.text;
        let fail = |kind| ParseError {
            kind,
            span: Span::locate(text, start),
        };
        self.pos = start + 2;

        if !self.peek().is_some_and(is_name_start) {
            return Err(fail(ParseErrorKind::InvalidName));
        }
        let name = self.name();

        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(Node::simple(name, &self.text[start..self.pos]));
        }

        let colon = self.peek() == Some(b':');
        if colon {
            self.pos += 1;
        }

        let Some(operator) = self.peek().and_then(Operator::from_byte) else {
            return Err(fail(ParseErrorKind::ExpectedOperator {
                found: self.text[self.pos..].chars().next(),
            }));
        };
        self.pos += 1;

        if self.depth == MAX_NESTING {
            return Err(fail(ParseErrorKind::NestingTooDeep));
        }
        self.depth += 1;
        let word = self.sequence(true);
        self.depth -= 1;
        let word = word?;

        if self.peek() != Some(b'}') {
            return Err(fail(ParseErrorKind::UnterminatedExpansion { name }));
        }
        self.pos += 1;

        Ok(Node::Expansion(Expansion {
            name,
            colon,
            operator,
            word,
            text: self.text[start..self.pos].to_string(),
        }))
    }

    fn name(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(is_name_char) {
            self.pos += 1;
        }
        self.text[start..self.pos].to_string()
    }
}
