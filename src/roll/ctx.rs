use super::roller::Roller;
use crate::common::*;
use crate::error::EvalError;
use crate::parse::ast;
use crate::parse::visit::Fold;
use log::trace;
use std::num::NonZeroU64;

type RResult<T> = Result<T, EvalError>;

/// Samples one outcome of an expression.
pub struct RollContext<'r, R: Roller + ?Sized> {
    max_rolls: Option<usize>,
    rolls: usize,
    roller: &'r mut R,
}

impl<'r, R: Roller + ?Sized> RollContext<'r, R> {
    pub fn new(max_rolls: Option<usize>, roller: &'r mut R) -> Self {
        Self {
            max_rolls,
            rolls: 0,
            roller,
        }
    }

    pub fn new_bounded(max_rolls: usize, roller: &'r mut R) -> Self {
        Self::new(Some(max_rolls), roller)
    }

    pub fn new_unbounded(roller: &'r mut R) -> Self {
        Self::new(None, roller)
    }

    /// Dice drawn so far by this context.
    pub fn rolls(&self) -> usize {
        self.rolls
    }

    fn count_rolls(&mut self, n: Count) -> RResult<()> {
        let n = usize::try_from(n).map_err(|_| EvalError::TooManyRolls)?;
        self.rolls = self.rolls.checked_add(n).ok_or(EvalError::TooManyRolls)?;
        if self.max_rolls.map_or(false, |max| self.rolls > max) {
            Err(EvalError::TooManyRolls)
        } else {
            Ok(())
        }
    }

    fn roll_die(&mut self, faces: Faces) -> RResult<Int> {
        let value = match faces {
            Faces::Poly(n) => {
                let sides = NonZeroU64::new(n).ok_or(EvalError::Invariant("die without faces"))?;
                Int::try_from(self.roller.roll(sides)).map_err(|_| EvalError::Overflow)?
            }
            // uniform over -1, 0, +1
            Faces::Fudge => self.roller.roll(THREE) as Int - 2,
        };
        trace!("rolled {} on a d{}", value, faces);
        Ok(value)
    }

    pub fn roll_dice(&mut self, spec: &DiceRollSpec) -> RResult<Int> {
        spec.validate()?;
        self.count_rolls(spec.dice_thrown())?;

        match *spec {
            DiceRollSpec::Standard { count, faces } => (0..count).try_fold(0, |total: Int, _| {
                let die = self.roll_die(faces)?;
                total.checked_add(die).ok_or(EvalError::Overflow)
            }),
            DiceRollSpec::Middle { faces } => {
                let mut draws = [
                    self.roll_die(faces)?,
                    self.roll_die(faces)?,
                    self.roll_die(faces)?,
                ];
                draws.sort_unstable();
                Ok(draws[1])
            }
        }
    }
}

const THREE: NonZeroU64 = match NonZeroU64::new(3) {
    Some(n) => n,
    None => unreachable!(),
};

impl<R: Roller + ?Sized> Fold for RollContext<'_, R> {
    type Output = Int;
    type Error = EvalError;

    fn fold_constant(&mut self, x: Int) -> RResult<Int> {
        Ok(x)
    }

    fn fold_dice(&mut self, dice: &ast::DiceRoll) -> RResult<Int> {
        self.roll_dice(&dice.spec)
    }

    fn combine(&mut self, lhs: Int, op: Operator, rhs: Int) -> RResult<Int> {
        op.apply(lhs, rhs)
    }
}
