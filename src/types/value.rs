use std::borrow::Cow;
use std::fmt;

/// The literal rule-sheet word that stands for an empty cell.
pub const BLANK_MARKER: &str = "blank";

/// A single cell of a rule or data table.
///
/// Cells are tagged once at ingestion; the criterion parser and evaluator never
/// inspect raw types beyond these three variants.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// A missing or null cell.
    #[default]
    Empty,
    /// A numeric cell.
    Number(f64),
    /// A textual cell.
    Text(String),
}

impl Value {
    /// Returns `true` for any of the empty markers: a missing cell, text that is
    /// empty after trimming, or the literal word `blank` (in any case).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::Number(_) => false,
            Value::Text(s) => {
                let trimmed = s.trim();
                trimmed.is_empty() || trimmed.eq_ignore_ascii_case(BLANK_MARKER)
            }
        }
    }

    /// Canonical comparable form: text is trimmed and lower-cased, and every
    /// empty marker collapses to [`Value::Empty`]. Numbers pass through.
    #[must_use]
    pub fn normalized(&self) -> Value {
        match self {
            Value::Empty => Value::Empty,
            Value::Number(n) => Value::Number(*n),
            Value::Text(s) => {
                let text = s.trim().to_lowercase();
                if text.is_empty() || text == BLANK_MARKER {
                    Value::Empty
                } else {
                    Value::Text(text)
                }
            }
        }
    }

    /// Numeric reading of this value. Text is parsed after trimming.
    /// Returns `None` for empty cells and text that is not a number.
    #[must_use]
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Empty => None,
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Textual reading of this value; empty cells read as `""`.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Value::Empty => Cow::Borrowed(""),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::Text(s) => Cow::Borrowed(s),
        }
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Empty, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Number(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "{v}"),
        }
    }
}
