use chrono::{NaiveDate, NaiveTime};

/// A `DD-MM-YYYY` date string parsed into a normalized, comparable form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDate {
    /// ISO-8601 `YYYY-MM-DD`, day and month zero-padded.
    pub iso: String,
    /// Epoch milliseconds at midnight UTC of the parsed day. Used as a
    /// sort key only.
    pub timestamp_ms: i64,
    /// The input string as it appeared in the data file.
    pub original: String,
}

/// Parse a `DD-MM-YYYY` string (components zero-padded or not).
///
/// Returns `None` when the input does not split into exactly three
/// `-`-separated components, when a component is not numeric, or when the
/// day/month/year do not name a real calendar date. Callers surface the
/// last case as a load-time validation warning rather than an error.
pub fn parse_note_date(raw: &str) -> Option<ParsedDate> {
    let [day, month, year] = date_components(raw)?;

    let day_num: u32 = day.parse().ok()?;
    let month_num: u32 = month.parse().ok()?;
    let year_num: i32 = year.parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year_num, month_num, day_num)?;
    let timestamp_ms = date.and_time(NaiveTime::MIN).and_utc().timestamp_millis();

    Some(ParsedDate {
        iso: format!("{year_num:04}-{month_num:02}-{day_num:02}"),
        timestamp_ms,
        original: raw.to_string(),
    })
}

/// The raw day/month/year substrings of a `DD-MM-YYYY` string, unpadded and
/// unvalidated. The filter engine matches against these with exact string
/// equality.
pub fn date_components(raw: &str) -> Option<[&str; 3]> {
    let mut parts = raw.split('-');
    let day = parts.next()?;
    let month = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some([day, month, year])
}
