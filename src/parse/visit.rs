use crate::common::*;
use crate::parse::ast::{self, Atom, Constant, DiceRoll, Group};

/// A left-to-right fold over the parse tree.
///
/// Every evaluator (rendering, rolling, exact distribution) is one of these;
/// they differ only in what a leaf turns into and how two adjacent operands
/// combine. The walk itself lives in the [`Accept`] impls, so the order of
/// combination is always the source order and never re-associated.
pub trait Fold {
    type Output;
    type Error;

    fn visit<T: ?Sized>(&mut self, node: &T) -> Result<Self::Output, Self::Error>
    where
        T: Accept,
    {
        node.accept(self)
    }

    fn fold_constant(&mut self, x: Int) -> Result<Self::Output, Self::Error>;

    fn fold_dice(&mut self, dice: &ast::DiceRoll) -> Result<Self::Output, Self::Error>;

    fn fold_group(&mut self, inner: Self::Output) -> Result<Self::Output, Self::Error> {
        Ok(inner)
    }

    fn combine(
        &mut self,
        lhs: Self::Output,
        op: Operator,
        rhs: Self::Output,
    ) -> Result<Self::Output, Self::Error>;
}

#[enum_dispatch::enum_dispatch]
pub trait Accept {
    fn accept<F: Fold + ?Sized>(&self, f: &mut F) -> Result<F::Output, F::Error>;
}

fn fold_chain<F, T>(f: &mut F, first: &T, rest: &[(Operator, T)]) -> Result<F::Output, F::Error>
where
    F: Fold + ?Sized,
    T: Accept,
{
    rest.iter().try_fold(first.accept(f)?, |lhs, (op, node)| {
        let rhs = node.accept(f)?;
        f.combine(lhs, *op, rhs)
    })
}

impl Accept for ast::Expression {
    fn accept<F: Fold + ?Sized>(&self, f: &mut F) -> Result<F::Output, F::Error> {
        fold_chain(f, &self.first, &self.rest)
    }
}

impl Accept for ast::Term {
    fn accept<F: Fold + ?Sized>(&self, f: &mut F) -> Result<F::Output, F::Error> {
        fold_chain(f, &self.first, &self.rest)
    }
}

impl Accept for ast::Constant {
    fn accept<F: Fold + ?Sized>(&self, f: &mut F) -> Result<F::Output, F::Error> {
        f.fold_constant(self.0)
    }
}

impl Accept for ast::DiceRoll {
    fn accept<F: Fold + ?Sized>(&self, f: &mut F) -> Result<F::Output, F::Error> {
        f.fold_dice(self)
    }
}

impl Accept for ast::Group {
    fn accept<F: Fold + ?Sized>(&self, f: &mut F) -> Result<F::Output, F::Error> {
        let inner = self.0.accept(f)?;
        f.fold_group(inner)
    }
}
