use std::time::Instant;

use crate::{Error, MatchReport, Row, Rule, SchemaError, Value};

const LOG_TARGET: &str = "echoclean::evaluate";

/// Fail on the first criteria column the row does not supply, naming the
/// first rule that reads it.
pub(crate) fn require_columns(
    rules: &[Rule],
    columns: &[String],
    row: &Row,
) -> Result<(), SchemaError> {
    let Some(missing) = columns.iter().find(|c| row.get(c).is_none()) else {
        return Ok(());
    };
    let rule = rules
        .iter()
        .find(|r| r.criteria().any(|(column, _)| column == missing))
        .map_or(0, Rule::index);
    Err(SchemaError::MissingColumn {
        rule,
        column: missing.clone(),
    })
}

/// Test a normalized row against each rule in order and return the first match.
pub(crate) fn evaluate(rules: &[Rule], row: &Row) -> Result<Option<Vec<Value>>, Error> {
    for rule in rules {
        if let Some(result) = rule.test(row)? {
            log::trace!(target: LOG_TARGET, "row matched rule {}", rule.index());
            return Ok(Some(result));
        }
    }
    Ok(None)
}

pub(crate) fn evaluate_detailed(rules: &[Rule], row: &Row) -> Result<MatchReport, Error> {
    let start = Instant::now();
    let mut tested = 0;

    for rule in rules {
        tested += 1;
        if let Some(result) = rule.test(row)? {
            return Ok(MatchReport::new(
                Some(rule.index()),
                Some(result),
                tested,
                start.elapsed(),
            ));
        }
    }

    Ok(MatchReport::new(None, None, tested, start.elapsed()))
}
