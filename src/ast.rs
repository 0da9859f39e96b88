use std::fmt;

/// One element of a parsed expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Verbatim text.
    Literal(Literal),
    /// `$NAME` or `${NAME}`.
    Simple(SimpleExpansion),
    /// `${NAME<op>word}` or `${NAME:<op>word}`.
    Expansion(Expansion),
}

/// A run of text copied to the output unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub value: String,
}

/// Unqualified variable reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleExpansion {
    pub name: String,
    /// Original source text, emitted as-is when the variable is
    /// skipped.
    pub text: String,
}

/// Operator-bearing variable reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub name: String,
    /// `:` present: an empty value counts as unset.
    pub colon: bool,
    pub operator: Operator,
    /// Nested nodes, evaluated only when the operator needs them.
    pub word: Vec<Node>,
    pub text: String,
}

/// Parameter expansion operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `-`: use the word as a default value.
    Default,
    /// `=`: use the word as a default and assign it.
    Assign,
    /// `?`: fail with the word as the message.
    Error,
    /// `+`: use the word when the variable is set.
    Alternate,
}

impl Operator {
    /// Map an operator character to its variant.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'-' => Some(Self::Default),
            b'=' => Some(Self::Assign),
            b'?' => Some(Self::Error),
            b'+' => Some(Self::Alternate),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Default => '-',
            Self::Assign => '=',
            Self::Error => '?',
            Self::Alternate => '+',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl Node {
    /// Build a literal node.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(Literal {
            value: value.into(),
        })
    }

    /// Build a simple expansion node from its name and source text.
    #[must_use]
    pub fn simple(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Simple(SimpleExpansion {
            name: name.into(),
            text: text.into(),
        })
    }

    /// The source text this node was parsed from.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Literal(lit) => &lit.value,
            Self::Simple(simple) => &simple.text,
            Self::Expansion(exp) => &exp.text,
        }
    }
}

/// Count the variable references in `nodes`, including those nested
/// inside words.
#[must_use]
pub fn count_expansions(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            Node::Literal(_) => 0,
            Node::Simple(_) => 1,
            Node::Expansion(exp) => 1 + count_expansions(&exp.word),
        })
        .sum()
}

/// Reassemble the source text of a node sequence.
#[must_use]
pub fn source_text(nodes: &[Node]) -> String {
    nodes.iter().map(Node::text).collect()
}
