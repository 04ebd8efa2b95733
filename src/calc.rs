use crate::common::*;
use crate::dist::{total, Distribution, Frequency};
use crate::error::EvalError;
use log::debug;
use num::{BigInt, BigRational, ToPrimitive, Zero};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Everything derived from the exact distribution of an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    distribution: Distribution,
    probabilities: BTreeMap<Int, f64>,
    outcomes: NonEmpty<Int>,
    permutations: Frequency,
}

impl Calculation {
    pub fn new(distribution: Distribution) -> Result<Self, EvalError> {
        let outcomes = NonEmpty::try_from_vec(distribution.keys().copied().collect())
            .map_err(|_| EvalError::Invariant("distribution has no outcomes"))?;

        let permutations = total(&distribution);
        if permutations.is_zero() {
            return Err(EvalError::Invariant("distribution has no permutations"));
        }

        let denominator = BigInt::from(permutations.clone());
        let probabilities = distribution
            .iter()
            .map(|(&outcome, frequency)| {
                BigRational::new(BigInt::from(frequency.clone()), denominator.clone())
                    .to_f64()
                    .map(|p| (outcome, p))
                    .ok_or(EvalError::Invariant("probability not representable"))
            })
            .collect::<Result<_, _>>()?;

        debug!(
            "calculated {} outcomes over {} permutations",
            outcomes.len(),
            permutations
        );

        Ok(Self {
            distribution,
            probabilities,
            outcomes,
            permutations,
        })
    }

    pub fn min(&self) -> Int {
        *self.outcomes.first()
    }

    pub fn max(&self) -> Int {
        *self.outcomes.last()
    }

    pub fn bounds(&self) -> RangeInclusive<Int> {
        self.min()..=self.max()
    }

    /// Attainable outcomes in ascending order.
    pub fn outcomes(&self) -> &[Int] {
        self.outcomes.as_slice()
    }

    pub fn outcome_strings(&self) -> Vec<String> {
        self.outcomes.iter().map(Int::to_string).collect()
    }

    /// Number of equally likely dice configurations.
    pub fn permutations(&self) -> &Frequency {
        &self.permutations
    }

    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    pub fn probabilities(&self) -> &BTreeMap<Int, f64> {
        &self.probabilities
    }

    pub fn frequency(&self, outcome: Int) -> Frequency {
        self.distribution
            .get(&outcome)
            .cloned()
            .unwrap_or_else(Frequency::zero)
    }

    /// Probability of rolling exactly `outcome`; zero when it is unattainable.
    pub fn probability(&self, outcome: Int) -> f64 {
        self.probabilities.get(&outcome).copied().unwrap_or(0.0)
    }
}

impl TryFrom<Distribution> for Calculation {
    type Error = EvalError;

    fn try_from(distribution: Distribution) -> Result<Self, Self::Error> {
        Self::new(distribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dist::{dice, singleton};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_3d6() {
        let calc = Calculation::new(dice::standard(3, 6).unwrap()).unwrap();
        assert_eq!(calc.min(), 3);
        assert_eq!(calc.max(), 18);
        assert_eq!(calc.bounds(), 3..=18);
        assert_eq!(calc.outcomes(), (3..=18).collect::<Vec<_>>().as_slice());
        assert_eq!(calc.permutations(), &Frequency::from(216u32));
        assert_eq!(calc.frequency(10), Frequency::from(27u32));
        assert_eq!(calc.frequency(2), Frequency::zero());
        assert!(approx_eq(calc.probability(3), 1.0 / 216.0));
        assert!(approx_eq(calc.probability(10), 27.0 / 216.0));
        assert_eq!(calc.probability(19), 0.0);
        assert!(approx_eq(calc.probabilities().values().sum(), 1.0));
    }

    #[test]
    fn test_outcome_strings() {
        let calc = Calculation::new(dice::fudge(2).unwrap()).unwrap();
        assert_eq!(calc.outcome_strings(), vec!["-2", "-1", "0", "1", "2"]);
    }

    #[test]
    fn test_constant() {
        let calc = Calculation::try_from(singleton(5)).unwrap();
        assert_eq!(calc.bounds(), 5..=5);
        assert_eq!(calc.probability(5), 1.0);
    }

    #[test]
    fn test_huge_totals() {
        // 10^400 does not fit in an f64, the ratios still do
        let big = Frequency::from(10u32).pow(400);
        let mut dist = Distribution::new();
        dist.insert(0, big.clone());
        dist.insert(1, big * 3u32);
        let calc = Calculation::new(dist).unwrap();
        assert!(approx_eq(calc.probability(0), 0.25));
        assert!(approx_eq(calc.probability(1), 0.75));
    }

    #[test]
    fn test_empty() {
        assert!(matches!(
            Calculation::new(Distribution::new()),
            Err(EvalError::Invariant(_))
        ));
    }
}
