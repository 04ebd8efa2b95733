//! Exact outcome frequencies of single dice primitives.
//!
//! `NdS` uses the closed form
//! `f(k) = Σ_{i=0}^{⌊(k−N)/S⌋} (−1)^i · C(N, i) · C(k − S·i − 1, N − 1)`
//! evaluated on the lower half of `[N, N·S]` and mirrored onto the upper half.
//! Both binomials are carried from one outcome to the next instead of being
//! recomputed, so a primitive costs about `N × outcomes` small-factor updates.
//! `midS` (median of three draws) uses `g(v) = 1 + 3(S − 1) + 6(v − 1)(S − v)`.
//! Fudge dice are computed on a three-sided proxy, recentred on zero and
//! weighted for the physical six-sided Fudge die, which carries each symbol twice.

use super::{Distribution, Frequency};
use crate::common::*;
use crate::error::EvalError;
use log::debug;
use num::{One, Zero};

type DResult = Result<Distribution, EvalError>;

/// Faces of a physical Fudge die that show each of `-`, blank and `+`.
const FUDGE_FACES_PER_SYMBOL: u32 = 2;

/// Exact distribution of one dice token, refused when [`work`] exceeds `max_work`.
pub fn primitive(spec: &DiceRollSpec, max_work: Option<usize>) -> DResult {
    spec.validate()?;

    if let Some(limit) = max_work {
        if work(spec) > limit as u128 {
            return Err(EvalError::TooManyCombinations { limit });
        }
    }

    let dist = match *spec {
        DiceRollSpec::Standard {
            count,
            faces: Faces::Poly(sides),
        } => standard(count, sides)?,
        DiceRollSpec::Standard {
            count,
            faces: Faces::Fudge,
        } => fudge(count)?,
        DiceRollSpec::Middle {
            faces: Faces::Poly(sides),
        } => middle(sides)?,
        DiceRollSpec::Middle {
            faces: Faces::Fudge,
        } => middle_fudge()?,
    };

    debug!("{} has {} distinct outcomes", spec, dist.len());
    Ok(dist)
}

/// Dice times distinct outcomes: the number of big-integer updates needed.
pub fn work(spec: &DiceRollSpec) -> u128 {
    match *spec {
        DiceRollSpec::Standard { count, faces } => {
            let outcomes = count as u128 * (faces.outcomes() as u128).saturating_sub(1) + 1;
            count as u128 * outcomes
        }
        DiceRollSpec::Middle { faces } => faces.outcomes() as u128,
    }
}

fn to_int(x: Count) -> Result<Int, EvalError> {
    Int::try_from(x).map_err(|_| EvalError::Overflow)
}

/// Sum of `count` dice with faces `1..=sides`. Both must be positive.
pub fn standard(count: Count, sides: Count) -> DResult {
    if count == 1 {
        return (1..=sides)
            .map(|face| Ok((to_int(face)?, Frequency::one())))
            .collect();
    }

    let min = to_int(count)?;
    let max = to_int(count.checked_mul(sides).ok_or(EvalError::Overflow)?)?;
    let s = to_int(sides)?;
    let peak = min + (max - min) / 2;

    let lower = count - 1;
    // (C(N, i), C(k − S·i − 1, N − 1)) for every i whose term is live at outcome k
    let mut terms: Vec<(Frequency, Frequency)> = Vec::new();
    let mut choose = Frequency::one();
    let mut dist = Distribution::new();

    for outcome in min..=peak {
        for (i, (_, tail)) in terms.iter_mut().enumerate() {
            let m = (outcome - s * i as Int - 1) as u64;
            *tail = std::mem::take(tail) * m / (m - lower);
        }

        if (outcome - min) % s == 0 {
            let i = terms.len() as u64;
            if i > 0 {
                choose = choose * (count - i + 1) / i;
            }
            terms.push((choose.clone(), Frequency::one()));
        }

        let mut plus = Frequency::zero();
        let mut minus = Frequency::zero();
        for (i, (ways, tail)) in terms.iter().enumerate() {
            if i % 2 == 0 {
                plus += ways * tail;
            } else {
                minus += ways * tail;
            }
        }
        if plus < minus {
            return Err(EvalError::Invariant("dice frequency came out negative"));
        }

        let frequency = plus - minus;
        dist.insert(max - (outcome - min), frequency.clone());
        dist.insert(outcome, frequency);
    }

    Ok(dist)
}

/// Median of three dice with faces `1..=sides`. `sides` must be positive.
pub fn middle(sides: Count) -> DResult {
    let mut dist = Distribution::new();
    let mut total = Frequency::zero();

    for v in 1..=sides {
        // all three equal, exactly two equal, all distinct in any of 3! orders
        let frequency = Frequency::from(sides - 1) * 3u32
            + 1u32
            + Frequency::from(v - 1) * Frequency::from(sides - v) * 6u32;
        total += &frequency;
        dist.insert(to_int(v)?, frequency);
    }

    if total != Frequency::from(sides).pow(3) {
        return Err(EvalError::Invariant(
            "middle-of-three frequencies must sum to the cube of the faces",
        ));
    }
    Ok(dist)
}

pub fn fudge(count: Count) -> DResult {
    let reach = to_int(count)?;
    let offset = reach.checked_mul(2).ok_or(EvalError::Overflow)?;
    let exponent = u32::try_from(count).map_err(|_| EvalError::Overflow)?;
    let weight = Frequency::from(FUDGE_FACES_PER_SYMBOL).pow(exponent);
    Ok(recentre(standard(count, 3)?, offset, reach, &weight))
}

pub fn middle_fudge() -> DResult {
    let weight = Frequency::from(FUDGE_FACES_PER_SYMBOL).pow(3);
    Ok(recentre(middle(3)?, 2, 1, &weight))
}

/// Shifts every outcome down by `offset`, scales its frequency by `weight` and
/// drops anything outside `-reach..=reach`.
fn recentre(dist: Distribution, offset: Int, reach: Int, weight: &Frequency) -> Distribution {
    dist.into_iter()
        .map(|(outcome, frequency)| (outcome - offset, frequency * weight))
        .filter(|(outcome, _)| (-reach..=reach).contains(outcome))
        .collect()
}
