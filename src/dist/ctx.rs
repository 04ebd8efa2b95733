use super::{convolve::convolve, dice, singleton, Distribution};
use crate::common::*;
use crate::error::EvalError;
use crate::parse::ast;
use crate::parse::visit::Fold;

type DResult = Result<Distribution, EvalError>;

/// Computes the exact outcome distribution of an expression.
#[derive(Debug, Copy, Clone, Default)]
pub struct DistContext {
    max_combinations: Option<usize>,
}

impl DistContext {
    pub fn new(max_combinations: Option<usize>) -> Self {
        Self { max_combinations }
    }

    pub fn new_unbounded() -> Self {
        Self::default()
    }
}

impl Fold for DistContext {
    type Output = Distribution;
    type Error = EvalError;

    fn fold_constant(&mut self, x: Int) -> DResult {
        Ok(singleton(x))
    }

    fn fold_dice(&mut self, dice: &ast::DiceRoll) -> DResult {
        dice::primitive(&dice.spec, self.max_combinations)
    }

    fn combine(&mut self, lhs: Distribution, op: Operator, rhs: Distribution) -> DResult {
        convolve(&lhs, op, &rhs, self.max_combinations)
    }
}
