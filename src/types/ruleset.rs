use std::fmt;

use crate::Error;

use super::match_report::MatchReport;
use super::row::Row;
use super::rule::Rule;
use super::value::Value;

/// Builder for constructing a [`Ruleset`] one rule row at a time.
///
/// # Example
///
/// ```
/// use echoclean::{Row, RulesetBuilder, Value};
///
/// let ruleset = RulesetBuilder::new()
///     .result_column("species")
///     .rule(Row::new().set("HiF", ">40").set("species", "Myoluc"))
///     .rule(Row::new().set("HiF", "").set("species", "unknown"))
///     .build()
///     .unwrap();
///
/// let row = Row::new().set("HiF", 45_i64);
/// assert_eq!(ruleset.test(&row).unwrap(), Some(vec![Value::from("Myoluc")]));
/// ```
#[derive(Debug, Default)]
pub struct RulesetBuilder {
    rows: Vec<Row>,
    result_columns: Vec<String>,
}

impl RulesetBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a result column. Result values are emitted in declaration order.
    #[must_use]
    pub fn result_column(mut self, column: &str) -> Self {
        self.result_columns.push(column.to_owned());
        self
    }

    /// Append a rule row. Rules are tested in the order they are added.
    #[must_use]
    pub fn rule(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Parse every rule row into an immutable `Ruleset`.
    ///
    /// # Errors
    ///
    /// See [`Ruleset::build`].
    pub fn build(self) -> Result<Ruleset, Error> {
        crate::compile::build(self.rows, &self.result_columns)
    }
}

/// An ordered, immutable list of [`Rule`]s evaluated with first-match-wins
/// semantics. Thread-safe and designed to live behind `Arc`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ruleset {
    pub(crate) rules: Vec<Rule>,
    pub(crate) result_columns: Vec<String>,
    pub(crate) criteria_columns: Vec<String>,
}

impl Ruleset {
    /// Build a ruleset from rule-table rows and the names of the result columns.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`](crate::SchemaError) if a row lacks a result column
    /// or a result column is declared twice, and
    /// [`ParseError`](crate::parse::ParseError) if a criterion cell is malformed.
    pub fn build<I, C>(rows: I, result_columns: &[C]) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Row>,
        C: AsRef<str>,
    {
        crate::compile::build(rows, result_columns)
    }

    /// Classify a row.
    ///
    /// The row is normalized into a private copy first; the caller's row is
    /// never modified. Returns the result values of the first matching rule, or
    /// `None` if no rule matches.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MissingColumn`](crate::SchemaError::MissingColumn)
    /// if the row lacks any column referenced by a criterion, whether or not
    /// that rule is reached, or [`Error::Value`] if a numeric criterion meets a
    /// non-numeric value.
    pub fn test(&self, row: &Row) -> Result<Option<Vec<Value>>, Error> {
        crate::evaluate::require_columns(&self.rules, &self.criteria_columns, row)?;
        crate::evaluate::evaluate(&self.rules, &row.normalized())
    }

    /// Classify a row with diagnostics.
    ///
    /// # Errors
    ///
    /// Same as [`test()`](Self::test).
    pub fn test_detailed(&self, row: &Row) -> Result<MatchReport, Error> {
        crate::evaluate::require_columns(&self.rules, &self.criteria_columns, row)?;
        crate::evaluate::evaluate_detailed(&self.rules, &row.normalized())
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Result column names, in the order result values are emitted.
    #[must_use]
    pub fn result_columns(&self) -> &[String] {
        &self.result_columns
    }

    /// Every column referenced by at least one criterion, in first-seen order.
    /// Every row passed to [`test()`](Self::test) must supply these.
    #[must_use]
    pub fn criteria_columns(&self) -> &[String] {
        &self.criteria_columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ruleset({} rules, {} criteria columns, {} result columns)",
            self.rules.len(),
            self.criteria_columns().len(),
            self.result_columns.len(),
        )
    }
}
