//! Date, time, datetime and duration rendering

use std::fmt::{Display, Write};

use chrono::format::{Item, StrftimeItems};

use crate::model::TimeUnit;

/// True when `format` is a valid strftime pattern
pub fn is_valid_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Render `value` with a strftime pattern, falling back to its ISO form
pub(crate) fn format_temporal<T>(value: &T, format: &str) -> String
where
    T: Display + FormatWith,
{
    let mut out = String::new();
    if is_valid_format(format) && write!(out, "{}", value.format_with(format)).is_ok() {
        return out;
    }
    tracing::warn!(format, "Invalid temporal format, using ISO form");
    value.to_string()
}

/// The chrono types that accept strftime patterns
pub(crate) trait FormatWith {
    fn format_with<'a>(&self, format: &'a str) -> chrono::format::DelayedFormat<StrftimeItems<'a>>;
}

impl FormatWith for chrono::NaiveDate {
    fn format_with<'a>(&self, format: &'a str) -> chrono::format::DelayedFormat<StrftimeItems<'a>> {
        self.format(format)
    }
}

impl FormatWith for chrono::NaiveTime {
    fn format_with<'a>(&self, format: &'a str) -> chrono::format::DelayedFormat<StrftimeItems<'a>> {
        self.format(format)
    }
}

impl FormatWith for chrono::NaiveDateTime {
    fn format_with<'a>(&self, format: &'a str) -> chrono::format::DelayedFormat<StrftimeItems<'a>> {
        self.format(format)
    }
}

const NS_PER_DAY: i128 = 86_400 * 1_000_000_000;
const NS_PER_HOUR: i128 = 3_600 * 1_000_000_000;
const NS_PER_MINUTE: i128 = 60 * 1_000_000_000;
const NS_PER_SECOND: i128 = 1_000_000_000;

/// Render a duration as its non-zero components, e.g. `1d 2h 3m 4s 5ms`
pub(crate) fn format_duration(value: i64, unit: TimeUnit) -> String {
    let suffix = match unit {
        TimeUnit::Nanoseconds => "ns",
        TimeUnit::Microseconds => "µs",
        TimeUnit::Milliseconds => "ms",
    };
    if value == 0 {
        return format!("0{suffix}");
    }

    let nanos_per_unit = (1_000_000_000 / unit.per_second()) as i128;
    let mut rest = (value as i128 * nanos_per_unit).abs();
    let mut parts = Vec::new();
    for (size, name) in [
        (NS_PER_DAY, "d"),
        (NS_PER_HOUR, "h"),
        (NS_PER_MINUTE, "m"),
        (NS_PER_SECOND, "s"),
        (1_000_000, "ms"),
        (1_000, "µs"),
        (1, "ns"),
    ] {
        let count = rest / size;
        if count > 0 {
            parts.push(format!("{count}{name}"));
        }
        rest %= size;
    }

    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}{}", parts.join(" "))
}
