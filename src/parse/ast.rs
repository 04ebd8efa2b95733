use crate::common::*;

/// `Term (('+' | '-') Term)*`
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub(crate) first: Term,
    pub(crate) rest: Vec<(Operator, Term)>,
}

impl Expression {
    pub fn new(first: Term, rest: Vec<(Operator, Term)>) -> Self {
        Self { first, rest }
    }

    pub fn first(&self) -> &Term {
        &self.first
    }

    pub fn rest(&self) -> &[(Operator, Term)] {
        &self.rest
    }

    /// Parenthesis nesting depth; `0` for an expression without groups.
    pub fn depth(&self) -> usize {
        std::iter::once(&self.first)
            .chain(self.rest.iter().map(|(_, term)| term))
            .map(Term::depth)
            .max()
            .unwrap_or(0)
    }
}

impl From<Term> for Expression {
    fn from(term: Term) -> Self {
        Self::new(term, Vec::new())
    }
}

impl From<Atom> for Expression {
    fn from(atom: Atom) -> Self {
        Term::from(atom).into()
    }
}

/// `Atom (('*' | '/') Atom)*`
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub(crate) first: Atom,
    pub(crate) rest: Vec<(Operator, Atom)>,
}

impl Term {
    pub fn new(first: Atom, rest: Vec<(Operator, Atom)>) -> Self {
        Self { first, rest }
    }

    pub fn first(&self) -> &Atom {
        &self.first
    }

    pub fn rest(&self) -> &[(Operator, Atom)] {
        &self.rest
    }

    fn depth(&self) -> usize {
        std::iter::once(&self.first)
            .chain(self.rest.iter().map(|(_, atom)| atom))
            .map(Atom::depth)
            .max()
            .unwrap_or(0)
    }
}

impl From<Atom> for Term {
    fn from(atom: Atom) -> Self {
        Self::new(atom, Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch::enum_dispatch(Accept)]
pub enum Atom {
    Constant(Constant),
    Dice(DiceRoll),
    Group(Group),
}

impl Atom {
    pub fn constant(x: Int) -> Self {
        Self::Constant(Constant(x))
    }

    pub fn dice(spec: DiceRollSpec, lexeme: impl Into<String>) -> Self {
        Self::Dice(DiceRoll::new(spec, lexeme))
    }

    pub fn group(inner: Expression) -> Self {
        Self::Group(Group(Box::new(inner)))
    }

    fn depth(&self) -> usize {
        match self {
            Self::Constant(_) | Self::Dice(_) => 0,
            Self::Group(Group(inner)) => inner.depth() + 1,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Constant(pub Int);

/// A dice primitive together with the text it was written as.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct DiceRoll {
    pub spec: DiceRollSpec,
    pub lexeme: String,
}

impl DiceRoll {
    pub fn new(spec: DiceRollSpec, lexeme: impl Into<String>) -> Self {
        Self {
            spec,
            lexeme: lexeme.into(),
        }
    }
}

impl From<DiceRollSpec> for DiceRoll {
    fn from(spec: DiceRollSpec) -> Self {
        let lexeme = spec.to_string();
        Self { spec, lexeme }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group(pub Box<Expression>);
