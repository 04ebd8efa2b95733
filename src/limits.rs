/// Resource ceilings applied while rolling and enumerating an expression.
///
/// `None` disables a ceiling. The defaults are generous enough for anything a
/// person would type at a table and stop pathological inputs such as
/// `1000d1000 * 1000d1000` before they exhaust memory.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Limits {
    /// Dice drawn by a single roll.
    pub max_rolls: Option<usize>,
    /// Outcome pairs visited by one convolution, and dice times outcomes of one
    /// dice primitive.
    pub max_combinations: Option<usize>,
    /// Parenthesis nesting accepted for distribution evaluation.
    pub max_depth: Option<usize>,
}

impl Limits {
    pub const DEFAULT_MAX_ROLLS: usize = 1000;
    pub const DEFAULT_MAX_COMBINATIONS: usize = 1_000_000;
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    pub const fn unbounded() -> Self {
        Self {
            max_rolls: None,
            max_combinations: None,
            max_depth: None,
        }
    }

    pub const fn with_max_rolls(mut self, max_rolls: Option<usize>) -> Self {
        self.max_rolls = max_rolls;
        self
    }

    pub const fn with_max_combinations(mut self, max_combinations: Option<usize>) -> Self {
        self.max_combinations = max_combinations;
        self
    }

    pub const fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_rolls: Some(Self::DEFAULT_MAX_ROLLS),
            max_combinations: Some(Self::DEFAULT_MAX_COMBINATIONS),
            max_depth: Some(Self::DEFAULT_MAX_DEPTH),
        }
    }
}
