use crate::error::EvalError;
use std::fmt::{self, Write};
use std::num::ParseIntError;
use std::str::FromStr;

pub type Int = i64;
pub type Count = u64;

pub type NonEmpty<T> = vec1::Vec1<T>;

/// Face specification of a die: a plain `1..=n` die or a Fudge/FATE die.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Faces {
    Poly(Count),
    Fudge,
}

impl Faces {
    /// Number of distinct outcomes one die can show.
    pub const fn outcomes(&self) -> Count {
        match self {
            Self::Poly(n) => *n,
            Self::Fudge => 3,
        }
    }
}

impl fmt::Display for Faces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poly(x) => fmt::Display::fmt(x, f),
            Self::Fudge => f.write_char('F'),
        }
    }
}

impl FromStr for Faces {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("f") {
            Ok(Self::Fudge)
        } else {
            s.parse().map(Self::Poly)
        }
    }
}

/// Decoded form of a dice token such as `3d6`, `mid20` or `4dF`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DiceRollSpec {
    Standard { count: Count, faces: Faces },
    Middle { faces: Faces },
}

impl DiceRollSpec {
    pub const fn standard(count: Count, faces: Faces) -> Self {
        Self::Standard { count, faces }
    }

    pub const fn middle(faces: Faces) -> Self {
        Self::Middle { faces }
    }

    pub const fn faces(&self) -> Faces {
        match self {
            Self::Standard { faces, .. } | Self::Middle { faces } => *faces,
        }
    }

    /// Dice physically thrown for one sample.
    pub const fn dice_thrown(&self) -> Count {
        match self {
            Self::Standard { count, .. } => *count,
            Self::Middle { .. } => 3,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), EvalError> {
        let reason = match self {
            Self::Standard { count: 0, .. } => "at least one die must be rolled",
            Self::Standard {
                faces: Faces::Poly(0),
                ..
            }
            | Self::Middle {
                faces: Faces::Poly(0),
            } => "dice need at least one face",
            _ => return Ok(()),
        };
        Err(EvalError::InvalidDice {
            dice: self.to_string(),
            reason,
        })
    }
}

impl fmt::Display for DiceRollSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard { count, faces } => write!(f, "{}d{}", count, faces),
            Self::Middle { faces } => write!(f, "mid{}", faces),
        }
    }
}

impl FromStr for DiceRollSpec {
    type Err = ParseDiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (count, faces) = s
            .split_once(|c| c == 'd' || c == 'D')
            .ok_or(ParseDiceError::NoDelimiter)?;
        let faces = faces.parse().map_err(ParseDiceError::InvalidFaces)?;
        if count.eq_ignore_ascii_case("mi") {
            Ok(Self::middle(faces))
        } else {
            let count = count.parse().map_err(ParseDiceError::InvalidCount)?;
            Ok(Self::standard(count, faces))
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseDiceError {
    #[error("cannot parse string as dice without 'd' delimiter")]
    NoDelimiter,
    #[error("invalid dice count: {0}")]
    InvalidCount(ParseIntError),
    #[error("invalid dice faces: {0}")]
    InvalidFaces(ParseIntError),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Applies the operator on plain integers. Division truncates toward zero.
    pub fn apply(self, lhs: Int, rhs: Int) -> Result<Int, EvalError> {
        let value = match self {
            Self::Add => lhs.checked_add(rhs),
            Self::Sub => lhs.checked_sub(rhs),
            Self::Mul => lhs.checked_mul(rhs),
            Self::Div => {
                if rhs == 0 {
                    return Err(EvalError::DivisionByZero);
                }
                lhs.checked_div(rhs)
            }
        };
        value.ok_or(EvalError::Overflow)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        };
        f.write_char(c)
    }
}
