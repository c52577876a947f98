use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use super::error::ValueError;
use super::value::{Value, BLANK_MARKER};
use crate::parse::ParseError;

/// Comparison operators supported in numeric criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompareOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    /// Apply `lhs <op> rhs`.
    #[must_use]
    pub fn apply(self, lhs: f64, rhs: f64) -> bool {
        match self {
            CompareOp::Eq => lhs == rhs,
            CompareOp::Gt => lhs > rhs,
            CompareOp::Gte => lhs >= rhs,
            CompareOp::Lt => lhs < rhs,
            CompareOp::Lte => lhs <= rhs,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "=="),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Gte => write!(f, ">="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Lte => write!(f, "<="),
        }
    }
}

/// Numeric bounds of a [`Criterion::Number`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bounds {
    /// `value <op> bound`.
    Single { op: CompareOp, bound: f64 },
    /// Inclusive `low <= value <= high`. The bounds are kept in source order.
    Range { low: f64, high: f64 },
}

impl Bounds {
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        match *self {
            Bounds::Single { op, bound } => op.apply(value, bound),
            Bounds::Range { low, high } => low <= value && value <= high,
        }
    }
}

/// Membership predicate of a [`Criterion::Tokens`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenSet {
    pub(crate) values: BTreeSet<String>,
    pub(crate) negated: bool,
    pub(crate) allows_blank: bool,
}

impl TokenSet {
    /// Normalized tokens in sorted order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    /// The criterion reads "not ...".
    #[must_use]
    pub fn negated(&self) -> bool {
        self.negated
    }

    /// The token list carried an explicit `blank` entry.
    #[must_use]
    pub fn allows_blank(&self) -> bool {
        self.allows_blank
    }

    fn test(&self, value: &Value) -> bool {
        let blank = value.is_blank();
        if self.allows_blank && blank {
            return true;
        }
        // Blank candidates are looked up as the literal marker, so "not blank"
        // rejects them and "not something" accepts them.
        let key = if blank {
            Cow::Borrowed(BLANK_MARKER)
        } else {
            value.as_text()
        };
        let member = self.values.contains(key.as_ref());
        member != self.negated
    }
}

/// A single-column predicate parsed from one rule-table cell.
///
/// Criteria are immutable once parsed. Use [`Criterion::parse`] to build one
/// from raw cell text and [`Criterion::test`] to evaluate a candidate value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Criterion {
    /// Matches only blank values.
    Blank,
    /// Matches every non-blank value, and blank values too when
    /// `including_blank` is set (an empty rule cell, or `any including blank`).
    Any { including_blank: bool },
    /// Numeric comparison or inclusive range.
    Number(Bounds),
    /// Membership in a set of tokens, possibly negated.
    Tokens(TokenSet),
}

impl Criterion {
    /// Parse a rule cell. `column` is used only for error messages.
    ///
    /// Numeric cells are read through their text form, and numbers in a cell
    /// are unsigned: a cell holding `-3` parses as `= 3`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the cell holds more than two numbers.
    pub fn parse(raw: &Value, column: &str) -> Result<Self, ParseError> {
        crate::parse::parse_criterion(raw, column)
    }

    /// Evaluate a candidate value. The value is expected in the normalized
    /// form produced by [`Row::normalized`](super::Row::normalized).
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::NotNumeric`] when a numeric criterion is given a
    /// non-blank value that does not read as a number.
    pub fn test(&self, value: &Value) -> Result<bool, ValueError> {
        match self {
            Criterion::Blank => Ok(value.is_blank()),
            Criterion::Any { including_blank } => Ok(*including_blank || !value.is_blank()),
            Criterion::Number(bounds) => {
                if value.is_blank() {
                    return Ok(false);
                }
                let n = value.to_number().ok_or_else(|| ValueError::NotNumeric {
                    value: value.to_string(),
                })?;
                Ok(bounds.contains(n))
            }
            Criterion::Tokens(set) => Ok(set.test(value)),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Blank => write!(f, "blank"),
            Criterion::Any {
                including_blank: true,
            } => write!(f, "any including blank"),
            Criterion::Any {
                including_blank: false,
            } => write!(f, "any"),
            Criterion::Number(Bounds::Single { op, bound }) => write!(f, "{op} {bound}"),
            Criterion::Number(Bounds::Range { low, high }) => write!(f, "{low}-{high}"),
            Criterion::Tokens(set) => {
                if set.negated {
                    write!(f, "not ")?;
                }
                let tokens: Vec<&str> = set.values().collect();
                write!(f, "{{{}}}", tokens.join(", "))?;
                if set.allows_blank {
                    write!(f, " or blank")?;
                }
                Ok(())
            }
        }
    }
}
