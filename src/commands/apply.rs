//! The `apply` command: classify a data table with a rule table.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use echoclean::night::night_of;
use echoclean::report::{xlsx_path, Outcome, Report};
use echoclean::table::{split_columns, Table};
use echoclean::Ruleset;

const LOG_TARGET: &str = "echoclean::apply";

/// Header row plus one; data row numbers in messages match the source file.
const FIRST_DATA_LINE: usize = 2;

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Rule table (.csv, tab-delimited .txt or .xlsx)
    #[arg(value_name = "RULES")]
    pub rules: PathBuf,

    /// Data table to classify (.csv, tab-delimited .txt or .xlsx)
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Output workbook; `.xlsx` is appended when missing
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Stop at the first row that cannot be classified instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Data column holding recorder file names, used to group rows by night
    #[arg(long, value_name = "COLUMN", default_value = "Filename")]
    pub filename_column: String,
}

pub fn apply_rules(args: &ApplyArgs) -> Result<()> {
    let rules = Table::from_path(&args.rules)
        .with_context(|| format!("could not read rules from '{}'", args.rules.display()))?;
    let data = Table::from_path(&args.data)
        .with_context(|| format!("could not read data from '{}'", args.data.display()))?;

    let split = split_columns(rules.columns(), data.columns());
    if split.criteria.is_empty() {
        log::warn!(target: LOG_TARGET, "No rule columns appear in the data; every rule matches every row");
    }
    log::info!(target: LOG_TARGET, "Criteria columns: {}", split.criteria.join(", "));
    log::info!(target: LOG_TARGET, "Result columns: {}", split.results.join(", "));

    let start = Instant::now();
    let ruleset = Ruleset::build(rules.into_rows(), &split.results)
        .with_context(|| format!("invalid rules in '{}'", args.rules.display()))?;
    log::info!(
        target: LOG_TARGET,
        "Parsed {} rules in {:.3}s",
        ruleset.len(),
        start.elapsed().as_secs_f64()
    );

    let with_night = data.columns().contains(&args.filename_column);
    if !with_night {
        log::debug!(target: LOG_TARGET, "No '{}' column in the data; skipping nights", args.filename_column);
    }

    let mut report = Report::new(ruleset.result_columns(), data.columns(), with_night)?;

    let start = Instant::now();
    for (i, row) in data.rows().iter().enumerate() {
        let line = i + FIRST_DATA_LINE;
        let night = if with_night {
            row.get(&args.filename_column)
                .and_then(|name| night_of(&name.as_text()))
        } else {
            None
        };

        match ruleset.test(row) {
            Ok(Some(values)) => report.append(row, Outcome::Matched(&values), night)?,
            Ok(None) => report.append(row, Outcome::Unmatched, night)?,
            Err(e) if args.strict => {
                return Err(e).with_context(|| format!("could not classify data row {line}"));
            }
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Skipping data row {line}: {e}");
                report.append(row, Outcome::Failed, night)?;
            }
        }
    }
    log::info!(
        target: LOG_TARGET,
        "Classified {} rows in {:.3}s",
        data.rows().len(),
        start.elapsed().as_secs_f64()
    );

    let output = xlsx_path(&args.output);
    let summary = report
        .save(&output)
        .with_context(|| format!("could not write report to '{}'", output.display()))?;

    log::info!(
        target: LOG_TARGET,
        "{} of {} rows classified ({} failed); report written to '{}'",
        summary.classified(),
        summary.total(),
        summary.failed(),
        output.display()
    );

    Ok(())
}
