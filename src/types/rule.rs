use crate::Error;

use super::criterion::Criterion;
use super::error::SchemaError;
use super::row::Row;
use super::value::Value;

/// A conjunction of per-column [`Criterion`]s with the result values it emits.
///
/// Built once from a rule-table row by [`Ruleset::build`](super::Ruleset::build)
/// and immutable thereafter. Criteria keep the rule row's column order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    index: usize,
    criteria: Vec<(String, Criterion)>,
    result: Vec<Value>,
}

impl Rule {
    /// Build a rule from one rule-table row. Result columns are taken out of the
    /// row in the given order; every remaining column is parsed as a criterion.
    ///
    /// `index` is the rule's position in its table, used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MissingResultColumn`] if the row lacks a result
    /// column, or a [`ParseError`](crate::parse::ParseError) for a malformed cell.
    pub fn from_row<C: AsRef<str>>(
        index: usize,
        mut row: Row,
        result_columns: &[C],
    ) -> Result<Self, Error> {
        let mut result = Vec::with_capacity(result_columns.len());
        for column in result_columns {
            let column = column.as_ref();
            let value = row
                .remove(column)
                .ok_or_else(|| SchemaError::MissingResultColumn {
                    rule: index,
                    column: column.to_owned(),
                })?;
            result.push(value);
        }

        let criteria = row
            .into_iter()
            .map(|(column, raw)| -> Result<(String, Criterion), Error> {
                let criterion = Criterion::parse(&raw, &column)?;
                Ok((column, criterion))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            index,
            criteria,
            result,
        })
    }

    /// Test a normalized row against this rule.
    ///
    /// Returns a fresh copy of the result values when every criterion passes,
    /// `None` as soon as one fails.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MissingColumn`] if the row lacks a criterion column,
    /// or [`Error::Value`] if a numeric criterion meets a non-numeric value.
    pub fn test(&self, row: &Row) -> Result<Option<Vec<Value>>, Error> {
        for (column, criterion) in &self.criteria {
            let value = row.get(column).ok_or_else(|| SchemaError::MissingColumn {
                rule: self.index,
                column: column.clone(),
            })?;
            let passed = criterion.test(value).map_err(|source| Error::Value {
                rule: self.index,
                column: column.clone(),
                source,
            })?;
            if !passed {
                return Ok(None);
            }
        }
        Ok(Some(self.result.clone()))
    }

    /// Position of this rule in its source table.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// `(column, criterion)` pairs in rule-row order.
    pub fn criteria(&self) -> impl Iterator<Item = (&str, &Criterion)> {
        self.criteria.iter().map(|(column, c)| (column.as_str(), c))
    }

    /// Result values in result-column order.
    #[must_use]
    pub fn result(&self) -> &[Value] {
        &self.result
    }
}
