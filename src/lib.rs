//! Ordered, first-match-wins classification rules over tabular rows.
//!
//! A rule table is a list of rows. Columns shared with the data are criteria;
//! the rest are result columns whose values a rule emits when every one of its
//! criteria accepts the data row. Criterion cells use a small text syntax:
//!
//! | Cell                         | Matches                                    |
//! |------------------------------|--------------------------------------------|
//! | *(empty)*                    | anything, including blank                  |
//! | `any`                        | any non-blank value                        |
//! | `any including blank`        | anything, including blank                  |
//! | `blank`                      | blank only                                 |
//! | `>5`, `<=10`, `= 3`          | numbers compared against the bound         |
//! | `5 - 10`                     | numbers in the inclusive range             |
//! | `Myoluc, Eptfus or Lasnoc`   | any listed value                           |
//! | `not Myoluc, Eptfus`         | anything except the listed values          |
//!
//! ```
//! use echoclean::{Row, Ruleset, Value};
//!
//! let rules = vec![
//!     Row::new().set("HiF", ">40").set("Qual", "any").set("species", "Myoluc"),
//!     Row::new().set("HiF", "").set("Qual", "").set("species", "unknown"),
//! ];
//! let ruleset = Ruleset::build(rules, &["species"]).unwrap();
//!
//! let row = Row::new().set("HiF", "45.5").set("Qual", "good");
//! assert_eq!(ruleset.test(&row).unwrap(), Some(vec![Value::from("Myoluc")]));
//! ```

mod compile;
mod error;
mod evaluate;
mod types;

pub mod parse;

#[cfg(feature = "cli")]
pub mod night;
#[cfg(feature = "cli")]
pub mod report;
#[cfg(feature = "cli")]
pub mod table;

pub use error::Error;
pub use parse::ParseError;
pub use types::{
    Bounds, CompareOp, Criterion, MatchReport, Row, Rule, Ruleset, RulesetBuilder, SchemaError,
    TokenSet, Value, ValueError, BLANK_MARKER,
};
