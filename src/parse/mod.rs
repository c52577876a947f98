mod error;
mod grammar;

pub use error::ParseError;

use crate::{Bounds, CompareOp, Criterion, TokenSet, Value, BLANK_MARKER};

const ANY: &str = "any";
const ANY_INCLUDING_BLANK: &str = "any including blank";
const NOT_PREFIX: &str = "not ";

/// Parse one rule-table cell into a [`Criterion`].
///
/// Precedence, first match wins: `blank`; empty, `any` or `any including
/// blank`; cells containing one or two numbers; everything else is a token list.
/// `column` is only used in error messages.
///
/// # Errors
///
/// Returns [`ParseError`] if the cell contains more than two numbers.
pub fn parse_criterion(raw: &Value, column: &str) -> Result<Criterion, ParseError> {
    let text = raw.as_text().trim().to_lowercase();

    match text.as_str() {
        BLANK_MARKER => return Ok(Criterion::Blank),
        "" | ANY_INCLUDING_BLANK => {
            return Ok(Criterion::Any {
                including_blank: true,
            })
        }
        ANY => {
            return Ok(Criterion::Any {
                including_blank: false,
            })
        }
        _ => {}
    }

    use winnow::Parser;
    let scan = grammar::numeric_scan
        .parse(text.as_str())
        .map_err(|e| ParseError::new(column, &text, e.to_string()))?;

    let bounds = match scan.numbers.as_slice() {
        [] => return Ok(Criterion::Tokens(token_set(&text))),
        [bound] => Bounds::Single {
            op: scan.comparator.unwrap_or(CompareOp::Eq),
            bound: *bound,
        },
        [low, high] => Bounds::Range {
            low: *low,
            high: *high,
        },
        _ => {
            return Err(ParseError::new(
                column,
                &text,
                "too many values for comparison",
            ))
        }
    };
    Ok(Criterion::Number(bounds))
}

fn token_set(text: &str) -> TokenSet {
    let mut set = TokenSet::default();
    for token in grammar::split_tokens(text) {
        if token == BLANK_MARKER {
            set.allows_blank = true;
        } else if let Some(rest) = token.strip_prefix(NOT_PREFIX) {
            // Only one negation clause is supported; anything after it is ignored.
            set.negated = true;
            set.values.insert(rest.trim().to_owned());
            break;
        } else {
            set.values.insert(token.to_owned());
        }
    }
    set
}
