//! Survey-night extraction from recorder file names.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

/// `YYYYMMDD_HHMMSS_mmm`, anywhere in the file name.
static FILENAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{4})([0-9]{2})([0-9]{2})_([0-9]{2})([0-9]{2})([0-9]{2})_([0-9]{3})")
        .expect("file name pattern is valid")
});

/// Recordings before this hour belong to the previous night.
const NOON: u32 = 12;

/// The survey night a recording belongs to, read from its file name.
///
/// Directory components are ignored. Returns `None` when the name carries no
/// timestamp or the timestamp is not a valid date and time.
#[must_use]
pub fn night_of(filename: &str) -> Option<NaiveDate> {
    let name = filename
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename);
    let caps = FILENAME_RE.captures(name)?;
    let field = |i: usize| caps[i].parse::<u32>().ok();

    let year = i32::try_from(field(1)?).ok()?;
    let date = NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)?;
    let hour = field(4)?;
    NaiveTime::from_hms_milli_opt(hour, field(5)?, field(6)?, field(7)?)?;

    if hour < NOON {
        date.pred_opt()
    } else {
        Some(date)
    }
}

/// Render a night the way the report shows it: `MM/DD/YYYY`.
#[must_use]
pub fn format_night(night: NaiveDate) -> String {
    night.format("%m/%d/%Y").to_string()
}
