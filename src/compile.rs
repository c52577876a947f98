use std::collections::HashSet;
use std::time::Instant;

use crate::{Error, Row, Rule, Ruleset, SchemaError};

const LOG_TARGET: &str = "echoclean::compile";

pub(crate) fn build<I, C>(rows: I, result_columns: &[C]) -> Result<Ruleset, Error>
where
    I: IntoIterator<Item = Row>,
    C: AsRef<str>,
{
    let start = Instant::now();
    let result_columns = check_result_columns(result_columns)?;

    let rules = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| Rule::from_row(index, row, &result_columns))
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        target: LOG_TARGET,
        "Parsed {} rules in {:.3}s",
        rules.len(),
        start.elapsed().as_secs_f64()
    );

    let criteria_columns = criteria_columns(&rules);

    Ok(Ruleset {
        rules,
        result_columns,
        criteria_columns,
    })
}

/// Every column referenced by a criterion, in first-seen rule order.
fn criteria_columns(rules: &[Rule]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for (column, _) in rules.iter().flat_map(Rule::criteria) {
        if !columns.iter().any(|c| c == column) {
            columns.push(column.to_owned());
        }
    }
    columns
}

fn check_result_columns<C: AsRef<str>>(columns: &[C]) -> Result<Vec<String>, SchemaError> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(columns.len());
    for column in columns {
        let column = column.as_ref();
        if !seen.insert(column) {
            return Err(SchemaError::DuplicateResultColumn {
                column: column.to_owned(),
            });
        }
        out.push(column.to_owned());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Criterion, Value};

    #[test]
    fn build_keeps_rule_order() {
        let rs = build(
            vec![
                Row::new().set("foo", "b").set("ret", "1"),
                Row::new().set("foo", "a").set("ret", "2"),
            ],
            &["ret"],
        )
        .unwrap();
        let indices: Vec<usize> = rs.rules().iter().map(Rule::index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(rs.rules()[1].result(), &[Value::from("2")]);
    }

    #[test]
    fn build_parses_every_criterion() {
        let rs = build(
            vec![Row::new().set("a", "blank").set("b", "any").set("ret", "x")],
            &["ret"],
        )
        .unwrap();
        let criteria: Vec<&Criterion> = rs.rules()[0].criteria().map(|(_, c)| c).collect();
        assert_eq!(criteria[0], &Criterion::Blank);
        assert_eq!(
            criteria[1],
            &Criterion::Any {
                including_blank: false
            }
        );
    }

    #[test]
    fn build_collects_criteria_columns() {
        let rs = build(
            vec![
                Row::new().set("foo", "a").set("ret", "1"),
                Row::new().set("bar", "b").set("foo", "c").set("ret", "2"),
            ],
            &["ret"],
        )
        .unwrap();
        assert_eq!(rs.criteria_columns, vec!["foo", "bar"]);
    }

    #[test]
    fn build_rejects_duplicate_result_columns() {
        let err = build(vec![], &["ret", "ret"]).unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaError::DuplicateResultColumn { ref column }) if column == "ret"
        ));
    }

    #[test]
    fn build_reports_missing_result_column_by_rule() {
        let err = build(
            vec![
                Row::new().set("foo", "a").set("ret", "1"),
                Row::new().set("foo", "b"),
            ],
            &["ret"],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaError::MissingResultColumn { rule: 1, .. })
        ));
    }

    #[test]
    fn build_reports_parse_errors() {
        let err = build(
            vec![Row::new().set("foo", "1-2-3").set("ret", "1")],
            &["ret"],
        )
        .unwrap_err();
        match err {
            Error::Parse(e) => assert_eq!(e.column(), "foo"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
