//! Expression errors. Positions are byte offsets into the source string.

use std::error::Error;
use std::fmt;

/// Failure to tokenize, parse, or bind an expression.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprError {
    /// A character that starts no token.
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// Byte offset.
        pos: usize,
    },
    /// A token that cannot appear here.
    UnexpectedToken {
        /// Source text of the token.
        found: String,
        /// What the parser was looking for.
        expected: &'static str,
        /// Byte offset.
        pos: usize,
    },
    /// Input ended early.
    UnexpectedEnd {
        /// What the parser was looking for.
        expected: &'static str,
    },
    /// A name that is neither a variable nor a constant.
    UnknownVariable {
        /// The name as written.
        name: String,
        /// Byte offset, or `None` when detected while binding values.
        pos: Option<usize>,
    },
    /// A call to a function outside the whitelist.
    UnknownFunction {
        /// The name as written.
        name: String,
        /// Byte offset.
        pos: usize,
    },
    /// Wrong number of call arguments.
    Arity {
        /// Function name.
        name: &'static str,
        /// Required argument count.
        expected: usize,
        /// Supplied argument count.
        got: usize,
        /// Byte offset of the call.
        pos: usize,
    },
    /// Nesting exceeds the depth limit.
    TooDeep {
        /// The limit that was exceeded.
        limit: usize,
        /// Byte offset where it was exceeded.
        pos: usize,
    },
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedChar { ch, pos } => {
                write!(f, "unexpected character {ch:?} at {pos}")
            }
            Self::UnexpectedToken {
                found,
                expected,
                pos,
            } => write!(f, "expected {expected} at {pos}, found {found:?}"),
            Self::UnexpectedEnd { expected } => {
                write!(f, "unexpected end of input, expected {expected}")
            }
            Self::UnknownVariable { name, pos } => match pos {
                Some(p) => write!(f, "unknown variable {name:?} at {p}"),
                None => write!(f, "no value bound for variable {name:?}"),
            },
            Self::UnknownFunction { name, pos } => {
                write!(f, "unknown function {name:?} at {pos}")
            }
            Self::Arity {
                name,
                expected,
                got,
                pos,
            } => write!(
                f,
                "{name} at {pos} takes {expected} argument(s), got {got}"
            ),
            Self::TooDeep { limit, pos } => {
                write!(f, "expression nested deeper than {limit} at {pos}")
            }
        }
    }
}

impl Error for ExprError {}
