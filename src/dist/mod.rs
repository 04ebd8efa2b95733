//! Exact probability distributions.
//!
//! A [`Distribution`] maps every reachable outcome to the number of equally
//! likely dice configurations that produce it. Frequencies are arbitrary
//! precision, so totals such as `6^40` are exact.

mod convolve;
mod ctx;
pub mod dice;

pub use convolve::convolve;
pub use ctx::DistContext;

use crate::common::Int;
use crate::error::EvalError;
use crate::limits::Limits;
use crate::parse::ast::Expression;
use crate::parse::visit::Fold;
use log::debug;
use num::{BigUint, One};
use std::collections::BTreeMap;

pub type Frequency = BigUint;

/// Outcome to frequency, ordered by outcome.
pub type Distribution = BTreeMap<Int, Frequency>;

/// Distribution of a constant.
pub fn singleton(x: Int) -> Distribution {
    let mut dist = Distribution::new();
    dist.insert(x, Frequency::one());
    dist
}

/// Sum of all frequencies.
pub fn total(dist: &Distribution) -> Frequency {
    dist.values().sum()
}

pub fn distribution(expr: &Expression, limits: &Limits) -> Result<Distribution, EvalError> {
    if let Some(limit) = limits.max_depth {
        let depth = expr.depth();
        if depth > limit {
            return Err(EvalError::TooDeep { depth, limit });
        }
    }

    let dist = DistContext::new(limits.max_combinations).visit(expr)?;
    debug!("{} has {} distinct outcomes", expr, dist.len());
    Ok(dist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[test]
    fn test_singleton() {
        let dist = singleton(-4);
        assert_eq!(dist.len(), 1);
        assert_eq!(total(&dist), Frequency::one());
    }

    #[test]
    fn test_depth_limit() {
        let expr = parse("((((1d6))))").unwrap();
        let limits = Limits::default().with_max_depth(Some(3));
        assert!(matches!(
            distribution(&expr, &limits),
            Err(EvalError::TooDeep { limit: 3, .. })
        ));
        assert!(distribution(&expr, &Limits::default()).is_ok());
    }

    #[test]
    fn test_unbounded() {
        let expr = parse("1d1001 * 1d1000").unwrap();
        assert!(distribution(&expr, &Limits::default()).is_err());
        assert_eq!(
            total(&distribution(&expr, &Limits::unbounded()).unwrap()),
            Frequency::from(1_001_000u32)
        );
    }
}
