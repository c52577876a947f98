use winnow::ascii::digit1;
use winnow::combinator::{alt, opt, repeat};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::any;

use crate::CompareOp;

/// Numbers and the first comparator found anywhere in a criterion cell.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct NumericScan {
    pub(crate) numbers: Vec<f64>,
    pub(crate) comparator: Option<CompareOp>,
}

#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Number(f64),
    Comparator(CompareOp),
    Other,
}

// -- Numbers ----------------------------------------------------------------

fn number(input: &mut &str) -> ModalResult<f64> {
    (digit1, opt(('.', digit1)))
        .take()
        .try_map(|s: &str| s.parse::<f64>())
        .parse_next(input)
}

fn compare_op(input: &mut &str) -> ModalResult<CompareOp> {
    alt((
        ">=".value(CompareOp::Gte),
        ">".value(CompareOp::Gt),
        "<=".value(CompareOp::Lte),
        "<".value(CompareOp::Lt),
    ))
    .parse_next(input)
}

fn piece(input: &mut &str) -> ModalResult<Piece> {
    alt((
        number.map(Piece::Number),
        compare_op.map(Piece::Comparator),
        any.value(Piece::Other),
    ))
    .parse_next(input)
}

/// Scan the whole input for unsigned decimal numbers and comparators.
/// Everything else (dashes, words, units) is skipped.
pub(crate) fn numeric_scan(input: &mut &str) -> ModalResult<NumericScan> {
    let pieces: Vec<Piece> = repeat(0.., piece).parse_next(input)?;
    let mut scan = NumericScan::default();
    for p in pieces {
        match p {
            Piece::Number(n) => scan.numbers.push(n),
            Piece::Comparator(op) => {
                scan.comparator.get_or_insert(op);
            }
            Piece::Other => {}
        }
    }
    Ok(scan)
}

// -- Token lists ------------------------------------------------------------

/// Split a token list on commas and on the standalone word `or`.
/// Tokens are trimmed; empty fragments are dropped.
pub(crate) fn split_tokens(text: &str) -> Vec<&str> {
    text.split(',').flat_map(split_on_or).collect()
}

fn split_on_or(fragment: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut word_start = None;
    let end = std::iter::once((fragment.len(), ' '));
    for (i, c) in fragment.char_indices().chain(end) {
        if c.is_whitespace() {
            if let Some(ws) = word_start.take() {
                if &fragment[ws..i] == "or" {
                    parts.push(fragment[start..ws].trim());
                    start = i;
                }
            }
        } else if word_start.is_none() {
            word_start = Some(i);
        }
    }
    parts.push(fragment[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}
