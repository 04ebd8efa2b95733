use super::lexer::TokenKind;
use crate::common::ParseDiceError;
use std::fmt;
use std::num::ParseIntError;
use std::ops::Range;

/// The lexer met input that starts no token.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
#[error("unrecognized input at position {position}: {found:?}")]
pub struct SyntaxError {
    pub position: usize,
    pub found: String,
}

impl SyntaxError {
    pub fn new(position: usize, found: impl ToString) -> Self {
        Self {
            position,
            found: found.to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("error at position {} ({slice:?}): {kind}", .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Range<usize>,
    pub slice: String,
}

impl ParseError {
    pub fn position(&self) -> usize {
        self.span.start
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    UnexpectedToken {
        found: TokenKind,
        expected: Vec<TokenKind>,
    },
    UnexpectedEnd {
        expected: Vec<TokenKind>,
    },
    UnclosedParen {
        open: usize,
    },
    UnmatchedParen,
    InvalidNumber(ParseIntError),
    InvalidDice(ParseDiceError),
    TooDeep {
        limit: usize,
    },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { found, expected } => {
                write!(f, "unexpected token: found {}, expected ", found)?;
                fmt_expected(expected, f)
            }
            Self::UnexpectedEnd { expected } => {
                write!(f, "unexpected end of input, expected ")?;
                fmt_expected(expected, f)
            }
            Self::UnclosedParen { open } => {
                write!(f, "parenthesis opened at position {} was not closed", open)
            }
            Self::UnmatchedParen => f.write_str("closing parenthesis has no matching '('"),
            Self::InvalidNumber(e) => write!(f, "invalid number: {}", e),
            Self::InvalidDice(e) => write!(f, "invalid dice literal: {}", e),
            Self::TooDeep { limit } => {
                write!(f, "parentheses nested more than {} levels deep", limit)
            }
        }
    }
}

fn fmt_expected(expected: &[TokenKind], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let len = expected.len();

    if expected.is_empty() {
        Ok(())
    } else if len == 1 {
        f.write_str(expected[0].to_str())
    } else if len == 2 {
        write!(f, "{} or {}", expected[0].to_str(), expected[1].to_str())
    } else {
        for exp in &expected[..len - 1] {
            write!(f, "{}, ", exp.to_str())?;
        }
        write!(f, "or {}", expected[len - 1].to_str())
    }
}
