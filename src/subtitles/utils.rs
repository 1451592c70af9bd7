const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// Format milliseconds as an SRT timestamp (`HH:MM:SS,mmm`)
pub fn format_timestamp(ms: u64) -> String {
    let hours = ms / MS_PER_HOUR;
    let minutes = (ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let secs = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let millis = ms % MS_PER_SECOND;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Parse an SRT timestamp into milliseconds.
///
/// Accepts `HH:MM:SS,mmm` as well as a `.` fractional separator and hour
/// fields wider than two digits. A fraction shorter than three digits is
/// read as a decimal fraction (`,5` is 500 ms). Values too large for a
/// `u64` millisecond count yield `None`.
pub fn parse_timestamp(value: &str) -> Option<u64> {
    let value = value.trim();
    let (clock, frac) = match value.find(|c: char| c == ',' || c == '.') {
        Some(pos) => (&value[..pos], Some(&value[pos + 1..])),
        None => (value, None),
    };

    let mut fields = clock.split(':');
    let hours = parse_digits(fields.next()?)?;
    let minutes = parse_digits(fields.next()?)?;
    let secs = parse_digits(fields.next()?)?;
    if fields.next().is_some() || minutes >= 60 || secs >= 60 {
        return None;
    }

    let millis = match frac {
        Some(digits) => parse_fraction_ms(digits)?,
        None => 0,
    };

    // Hour fields have no width limit, so the total can overflow
    hours
        .checked_mul(MS_PER_HOUR)?
        .checked_add(minutes * MS_PER_MINUTE + secs * MS_PER_SECOND + millis)
}

fn parse_digits(field: &str) -> Option<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn parse_fraction_ms(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Only the first three digits carry whole milliseconds
    let mut millis = 0u64;
    for (i, b) in digits.bytes().take(3).enumerate() {
        millis += u64::from(b - b'0') * 10u64.pow(2 - i as u32);
    }
    Some(millis)
}
