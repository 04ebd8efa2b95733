//! Parsing, rolling and exact probability distributions for dice expressions
//! such as `3d6+2`, `mid20` or `(4dF+1)*2`.

pub mod calc;
pub mod common;
pub mod dist;
mod error;
pub mod limits;
pub mod parse;
mod prob;
pub mod roll;
pub mod stringify;

pub use calc::Calculation;
pub use common::{Count, DiceRollSpec, Faces, Int, Operator};
pub use dist::{Distribution, Frequency};
pub use error::{Error, EvalError, Result};
pub use limits::Limits;
pub use parse::ast::{Atom, Expression, Term};
pub use parse::parse;
pub use prob::DiceProb;
pub use roll::{RollContext, Roller};
pub use stringify::{stringify, Stringifier};

/// Parses `s` and rolls it once with a freshly seeded generator.
pub fn roll(s: &str) -> Result<Int> {
    Ok(DiceProb::new(s)?.roll()?)
}

/// Parses `s` and computes its exact distribution under the default [`Limits`].
pub fn distribution(s: &str) -> Result<Distribution> {
    let expr = parse(s)?;
    Ok(dist::distribution(&expr, &Limits::default())?)
}
