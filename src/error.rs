use crate::parse::{ParseError, SyntaxError};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Syntax(#[from] SyntaxError),
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Eval(#[from] EvalError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Faults raised while rolling or computing the distribution of an accepted expression.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum EvalError {
    #[error("cannot divide by zero")]
    DivisionByZero,
    #[error("arithmetic overflow")]
    Overflow,
    #[error("invalid dice {dice:?}: {reason}")]
    InvalidDice { dice: String, reason: &'static str },
    #[error("too many dice rolled")]
    TooManyRolls,
    #[error("too many combinations to enumerate (limit is {limit})")]
    TooManyCombinations { limit: usize },
    #[error("expression is nested {depth} levels deep (limit is {limit})")]
    TooDeep { depth: usize, limit: usize },
    #[error("internal invariant violated: {0}")]
    Invariant(&'static str),
}
