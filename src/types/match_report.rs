use std::fmt;
use std::time::Duration;

use super::value::Value;

/// Detailed outcome of [`Ruleset::test_detailed()`](super::Ruleset::test_detailed).
///
/// Carries the same result as [`Ruleset::test()`](super::Ruleset::test) plus
/// which rule produced it, how many rules were tried and how long it took.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct MatchReport {
    matched_rule: Option<usize>,
    result: Option<Vec<Value>>,
    rules_tested: usize,
    duration: Duration,
}

impl MatchReport {
    pub(crate) fn new(
        matched_rule: Option<usize>,
        result: Option<Vec<Value>>,
        rules_tested: usize,
        duration: Duration,
    ) -> Self {
        Self {
            matched_rule,
            result,
            rules_tested,
            duration,
        }
    }

    /// Index of the first matching rule.
    #[must_use]
    pub fn matched_rule(&self) -> Option<usize> {
        self.matched_rule
    }

    /// The matching rule's result values, or `None` for no match.
    #[must_use]
    pub fn result(&self) -> Option<&[Value]> {
        self.result.as_deref()
    }

    /// Consume the report, keeping only the result.
    #[must_use]
    pub fn into_result(self) -> Option<Vec<Value>> {
        self.result
    }

    /// Number of rules tested, including the matching one.
    #[must_use]
    pub fn rules_tested(&self) -> usize {
        self.rules_tested
    }

    /// Wall-clock duration of the test.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.matched_rule, &self.result) {
            (Some(index), Some(values)) => {
                let values: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "matched: rule {index} [{}]", values.join(", "))?;
            }
            _ => write!(f, "matched: none")?,
        }
        write!(f, ", rules tested: {}", self.rules_tested)?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
