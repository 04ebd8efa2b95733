use crate::common::{Int, Operator};
use crate::parse::ast::{Atom, DiceRoll, Expression, Term};
use crate::parse::visit::{Accept, Fold};
use std::convert::Infallible;
use std::fmt;

/// Renders a parse tree canonically: dice as written, operators surrounded by
/// single spaces, groups in parentheses.
#[derive(Default, Debug, Copy, Clone)]
pub struct Stringifier;

impl Stringifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stringify<A: Accept + ?Sized>(&mut self, node: &A) -> String {
        match self.visit(node) {
            Ok(s) => s,
            Err(never) => match never {},
        }
    }
}

impl Fold for Stringifier {
    type Output = String;
    type Error = Infallible;

    fn fold_constant(&mut self, x: Int) -> Result<String, Infallible> {
        Ok(x.to_string())
    }

    fn fold_dice(&mut self, dice: &DiceRoll) -> Result<String, Infallible> {
        Ok(dice.lexeme.clone())
    }

    fn fold_group(&mut self, inner: String) -> Result<String, Infallible> {
        Ok(format!("({})", inner))
    }

    fn combine(&mut self, lhs: String, op: Operator, rhs: String) -> Result<String, Infallible> {
        Ok(format!("{} {} {}", lhs, op, rhs))
    }
}

pub fn stringify<A: Accept + ?Sized>(node: &A) -> String {
    Stringifier.stringify(node)
}

macro_rules! display_via_stringifier {
    ($($ty:ty),+) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&stringify(self))
            }
        })+
    };
}

display_via_stringifier!(Expression, Term, Atom, DiceRoll);
