use crate::calc::Calculation;
use crate::common::Int;
use crate::dist::{self, Distribution, Frequency};
use crate::error::{EvalError, Result};
use crate::limits::Limits;
use crate::parse::{self, ast::Expression};
use crate::roll::{self, DefaultRoller, Roller};
use crate::stringify::stringify;
use log::debug;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// A parsed dice expression together with its random source and, once
/// [`calculate`](Self::calculate) has run, its exact distribution.
///
/// ```
/// # use dice_prob::DiceProb;
/// let mut prob = DiceProb::new("3d6+2").unwrap();
/// assert_eq!(prob.min(), None);
///
/// prob.calculate().unwrap();
/// assert_eq!(prob.bounds(), Some(5..=20));
///
/// let rolled = prob.roll().unwrap();
/// assert!((5..=20).contains(&rolled));
/// ```
#[derive(Debug, Clone)]
pub struct DiceProb<R = DefaultRoller> {
    expression: String,
    parsed: Expression,
    limits: Limits,
    rng: R,
    calculation: Option<Calculation>,
}

impl DiceProb {
    /// Parses `expression` and seeds a fresh generator from system entropy.
    pub fn new(expression: &str) -> Result<Self> {
        Self::with_rng(expression, DefaultRoller::from_entropy())
    }
}

impl<R: Roller> DiceProb<R> {
    pub fn with_rng(expression: &str, rng: R) -> Result<Self> {
        let parsed = parse::parse(expression)?;
        debug!("parsed {:?} as {}", expression, parsed);
        Ok(Self {
            expression: expression.to_string(),
            parsed,
            limits: Limits::default(),
            rng,
            calculation: None,
        })
    }

    /// Replaces the resource ceilings. Any previous calculation is discarded.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self.calculation = None;
        self
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// The text this handle was built from, unchanged.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn parsed_expression(&self) -> &Expression {
        &self.parsed
    }

    /// Canonical rendering of the expression.
    pub fn normalized(&self) -> String {
        stringify(&self.parsed)
    }

    pub fn roll(&mut self) -> std::result::Result<Int, EvalError> {
        roll::roll(&self.parsed, &mut self.rng, self.limits.max_rolls)
    }

    pub fn roll_n(&mut self, n: usize) -> std::result::Result<Vec<Int>, EvalError> {
        (0..n).map(|_| self.roll()).collect()
    }

    /// Computes the exact distribution and replaces the stored snapshot with it.
    pub fn calculate(&mut self) -> Result<&Calculation> {
        let distribution = dist::distribution(&self.parsed, &self.limits)?;
        let calculation = Calculation::new(distribution)?;
        Ok(self.calculation.insert(calculation))
    }

    /// The latest snapshot, if [`calculate`](Self::calculate) has succeeded.
    pub fn calculation(&self) -> Option<&Calculation> {
        self.calculation.as_ref()
    }

    pub fn min(&self) -> Option<Int> {
        self.calculation().map(Calculation::min)
    }

    pub fn max(&self) -> Option<Int> {
        self.calculation().map(Calculation::max)
    }

    pub fn bounds(&self) -> Option<RangeInclusive<Int>> {
        self.calculation().map(Calculation::bounds)
    }

    pub fn outcomes(&self) -> Option<&[Int]> {
        self.calculation().map(Calculation::outcomes)
    }

    pub fn outcome_strings(&self) -> Option<Vec<String>> {
        self.calculation().map(Calculation::outcome_strings)
    }

    pub fn permutations(&self) -> Option<&Frequency> {
        self.calculation().map(Calculation::permutations)
    }

    pub fn distribution(&self) -> Option<&Distribution> {
        self.calculation().map(Calculation::distribution)
    }

    pub fn probabilities(&self) -> Option<&BTreeMap<Int, f64>> {
        self.calculation().map(Calculation::probabilities)
    }

    pub fn probability(&self, outcome: Int) -> Option<f64> {
        self.calculation().map(|calc| calc.probability(outcome))
    }
}

impl FromStr for DiceProb {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl<R> fmt::Display for DiceProb<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.parsed, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::StepRoller;
    use crate::Error;
    use proptest::prelude::*;
    use rand_chacha::ChaCha20Rng;

    fn seeded(s: &str, seed: u64) -> DiceProb<ChaCha20Rng> {
        DiceProb::with_rng(s, ChaCha20Rng::seed_from_u64(seed)).unwrap()
    }

    fn sorted_frequencies(prob: &DiceProb<ChaCha20Rng>) -> Vec<Frequency> {
        let mut values: Vec<_> = prob.distribution().unwrap().values().cloned().collect();
        values.sort();
        values
    }

    #[test]
    fn test_accessors_before_calculate() {
        let prob = seeded("3d6", 0);
        assert_eq!(prob.expression(), "3d6");
        assert!(prob.calculation().is_none());
        assert_eq!(prob.min(), None);
        assert_eq!(prob.max(), None);
        assert_eq!(prob.bounds(), None);
        assert_eq!(prob.outcomes(), None);
        assert_eq!(prob.permutations(), None);
        assert_eq!(prob.probability(10), None);
    }

    #[test]
    fn test_calculate_3d6() {
        let mut prob = seeded("3d6", 0);
        prob.calculate().unwrap();
        assert_eq!(prob.bounds(), Some(3..=18));
        assert_eq!(prob.permutations(), Some(&Frequency::from(216u32)));
        assert_eq!(prob.outcomes().map(<[Int]>::len), Some(16));
        let sum: f64 = prob.probabilities().unwrap().values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_is_idempotent() {
        let mut prob = seeded("2d8 * 2 - mid6", 0);
        let first = prob.calculate().unwrap().clone();
        let second = prob.calculate().unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_normalized() {
        let prob = seeded("  (3d6+2)*MID20 ", 0);
        assert_eq!(prob.expression(), "  (3d6+2)*MID20 ");
        assert_eq!(prob.normalized(), "(3d6 + 2) * MID20");
        assert_eq!(prob.to_string(), "(3d6 + 2) * MID20");
    }

    #[test]
    fn test_sum_and_difference() {
        let mut sum = seeded("2d6+2d6", 0);
        let mut four = seeded("4d6", 0);
        let mut diff = seeded("2d6-2d6", 0);
        sum.calculate().unwrap();
        four.calculate().unwrap();
        diff.calculate().unwrap();

        assert_eq!(sum.distribution(), four.distribution());
        assert_ne!(diff.distribution(), four.distribution());
        assert_eq!(sorted_frequencies(&diff), sorted_frequencies(&four));
    }

    #[test]
    fn test_fudge() {
        let mut prob = seeded("3dF", 0);
        prob.calculate().unwrap();
        assert_eq!(prob.bounds(), Some(-3..=3));
        assert_eq!(prob.outcomes().map(<[Int]>::len), Some(7));
        assert_eq!(prob.permutations(), Some(&Frequency::from(216u32)));
    }

    #[test]
    fn test_roll_with_step_roller() {
        let mut prob = DiceProb::with_rng("3d6 + 1", StepRoller::new(1, 1)).unwrap();
        assert_eq!(prob.roll(), Ok(1 + 2 + 3 + 1));
        assert_eq!(prob.roll(), Ok(4 + 5 + 6 + 1));
        assert_eq!(prob.roll_n(2), Ok(vec![1 + 2 + 3 + 1, 4 + 5 + 6 + 1]));
    }

    #[test]
    fn test_seeded_rolls_repeat() {
        let mut a = seeded("10d20 - mid6", 99);
        let mut b = seeded("10d20 - mid6", 99);
        assert_eq!(a.roll_n(50), b.roll_n(50));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(DiceProb::new("3d6 +"), Err(Error::Parse(_))));
        assert!(matches!(DiceProb::new("3d6 & 2"), Err(Error::Syntax(_))));
        assert!("(1d6".parse::<DiceProb>().is_err());

        let mut prob = seeded("1d6 / (1d2 - 1)", 0);
        assert_eq!(
            prob.calculate().unwrap_err(),
            Error::Eval(EvalError::DivisionByZero)
        );
        assert!(prob.calculation().is_none());

        let mut prob = seeded("2000d6", 0);
        assert_eq!(prob.roll(), Err(EvalError::TooManyRolls));
        let mut prob = prob.with_limits(Limits::unbounded());
        assert!(prob.roll().is_ok());
    }

    #[test]
    fn test_with_limits_discards_calculation() {
        let mut prob = seeded("1d6", 0);
        prob.calculate().unwrap();
        let prob = prob.with_limits(Limits::default());
        assert!(prob.calculation().is_none());
    }

    proptest! {
        #[test]
        fn test_roll_within_bounds(
            seed in any::<u64>(),
            expr in prop_oneof![
                Just("3d6 + 2"),
                Just("mid20 - 1d4"),
                Just("4dF * 2"),
                Just("(2d10 + midF) * 3 / 2"),
                Just("1d8 * 1d8 - 10"),
            ],
        ) {
            let mut prob = seeded(expr, seed);
            let bounds = prob.calculate().unwrap().bounds();
            for rolled in prob.roll_n(20).unwrap() {
                prop_assert!(bounds.contains(&rolled), "{} rolled {}", expr, rolled);
            }
        }
    }
}
