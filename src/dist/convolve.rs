use super::{Distribution, Frequency};
use crate::common::*;
use crate::error::EvalError;
use log::trace;

/// Combines two independent distributions under `op`.
///
/// Every pair of outcomes is visited: the result key is `op.apply(l, r)` and the
/// pair contributes `freq(l) * freq(r)` to it. The number of pairs is refused up
/// front when it exceeds `max_combinations`.
pub fn convolve(
    lhs: &Distribution,
    op: Operator,
    rhs: &Distribution,
    max_combinations: Option<usize>,
) -> Result<Distribution, EvalError> {
    if let Some(limit) = max_combinations {
        let pairs = lhs.len().checked_mul(rhs.len());
        if pairs.map_or(true, |pairs| pairs > limit) {
            return Err(EvalError::TooManyCombinations { limit });
        }
    }

    let mut result = Distribution::new();
    for (&l, lf) in lhs {
        for (&r, rf) in rhs {
            let outcome = op.apply(l, r)?;
            let ways: Frequency = lf * rf;
            *result.entry(outcome).or_default() += ways;
        }
    }

    trace!(
        "{} outcomes {} {} outcomes -> {} outcomes",
        lhs.len(),
        op,
        rhs.len(),
        result.len()
    );
    Ok(result)
}
