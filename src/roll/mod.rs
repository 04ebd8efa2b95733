mod ctx;
mod roller;

pub use ctx::RollContext;
pub use roller::Roller;

#[cfg(test)]
pub(crate) use roller::StepRoller;

use crate::common::Int;
use crate::error::EvalError;
use crate::parse::{ast, visit::Fold};

pub type DefaultRoller = rand_chacha::ChaCha20Rng;

/// Rolls `expr` once, drawing at most `max_rolls` dice.
pub fn roll<R: Roller + ?Sized>(
    expr: &ast::Expression,
    roller: &mut R,
    max_rolls: Option<usize>,
) -> Result<Int, EvalError> {
    RollContext::new(max_rolls, roller).visit(expr)
}
