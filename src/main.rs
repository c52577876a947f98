//! Apply expert-authored classification rules to acoustic monitoring output.
//!
//! # Usage
//!
//! ```bash
//! echoclean apply rules.csv sonobat_output.txt classified
//! ```
//!
//! Every column of the rule table that also appears in the data is a criterion
//! column; the remaining rule columns are result columns. Each data row is
//! classified by the first rule whose criteria all accept it, and the results
//! are written to `classified.xlsx` together with summary sheets.
//!
//! Rule and data tables may be `.csv` files, tab-delimited `.txt` files or
//! `.xlsx` workbooks (first worksheet).
//! When the data has a `Filename` column holding recorder timestamps
//! (`YYYYMMDD_HHMMSS_mmm`), rows are also grouped by survey night.

use clap::builder::styling::{AnsiColor, Effects};
use clap::builder::Styles;
use clap::{Parser, Subcommand};

mod commands;

use crate::commands::{apply_rules, ApplyArgs, LogLevel};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "echoclean", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify every row of a data table with a rule table
    Apply(ApplyArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    commands::init_logging(cli.log_level);

    match &cli.command {
        Command::Apply(args) => apply_rules(args),
    }
}
