mod criterion;
mod error;
mod match_report;
mod row;
mod rule;
mod ruleset;
mod value;

pub use criterion::{Bounds, CompareOp, Criterion, TokenSet};
pub use error::{SchemaError, ValueError};
pub use match_report::MatchReport;
pub use row::Row;
pub use rule::Rule;
pub use ruleset::{Ruleset, RulesetBuilder};
pub use value::{Value, BLANK_MARKER};
