//! Row identifier handling

use std::borrow::Cow;

/// Normalize a raw identifier cell into a row key.
///
/// Spreadsheets frequently store numeric IDs as floats, so `"7.0"` in one file
/// and `"7"` in the other must match. A value that is all ASCII digits once a
/// single `.` is removed is replaced by the integer part of its numeric value.
/// The fractional part is truncated, so `"7.5"` also becomes `"7"`.
pub fn normalize_key(raw: &str) -> Cow<'_, str> {
    let stripped = raw.replacen('.', "", 1);
    if stripped.is_empty() || !stripped.bytes().all(|b| b.is_ascii_digit()) {
        return Cow::Borrowed(raw);
    }

    match raw.parse::<f64>() {
        Ok(value) => Cow::Owned(format!("{:.0}", value.trunc())),
        Err(_) => Cow::Borrowed(raw),
    }
}
