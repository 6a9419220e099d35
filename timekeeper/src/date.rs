use lazy_static::lazy_static;
use regex::Regex;
use std::error;
use std::fmt::{Display, Formatter};

/// Renders a number of seconds as `HH:MM:SS`.
///
/// This is an elapsed duration, not a time of day, so hours are never
/// wrapped: 90000 seconds renders as `25:00:00`. Negative input is clamped
/// to zero.
#[must_use]
pub fn format_elapsed(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[derive(Debug, PartialEq)]
pub enum Error {
    InvalidInput(String),
    OutOfRange(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidInput(s) => {
                write!(f, "Invalid input {s}")
            }
            Error::OutOfRange(s) => {
                write!(f, "Minutes and seconds must be below 60 in {s}")
            }
        }
    }
}

impl error::Error for Error {}

/// Parses a user supplied duration into seconds.
///
/// Accepted formats:
///  - `HH:MM:SS`, i.e. "25:00:00" or "1:01:01"
///  - `MM:SS`, i.e. "05:30"
///  - plain seconds, i.e. "3661"
///  - units of hours, minutes and seconds in that order, i.e. "1h30m", "45m", "2h5s"
///
/// # Errors
///
/// Returns `Error::InvalidInput` when the string matches none of the formats and
/// `Error::OutOfRange` when a colon separated component exceeds 59.
#[allow(clippy::missing_panics_doc)]
pub fn parse_elapsed(s: &str) -> Result<i64, Error> {
    lazy_static! {
        static ref CLOCK_EXPR: Regex =
            Regex::new(r"^(?:(?P<h>\d+):)?(?P<m>\d{1,2}):(?P<s>\d{2})$").unwrap();
        static ref SECONDS_EXPR: Regex = Regex::new(r"^\d+$").unwrap();
        static ref UNIT_EXPR: Regex =
            Regex::new(r"^(?:(?P<h>\d+)h)?(?:(?P<m>\d+)m)?(?:(?P<s>\d+)s)?$").unwrap();
    }

    let s = s.trim();
    if s.is_empty() {
        return Err(Error::InvalidInput(s.to_string()));
    }

    let component = |caps: &regex::Captures, name: &str| -> Result<i64, Error> {
        caps.name(name).map_or(Ok(0), |m| {
            m.as_str()
                .parse::<i64>()
                .map_err(|_| Error::InvalidInput(s.to_string()))
        })
    };

    if SECONDS_EXPR.is_match(s) {
        s.parse::<i64>()
            .map_err(|_| Error::InvalidInput(s.to_string()))
    } else if let Some(caps) = CLOCK_EXPR.captures(s) {
        let (h, m, sec) = (
            component(&caps, "h")?,
            component(&caps, "m")?,
            component(&caps, "s")?,
        );
        if m > 59 || sec > 59 {
            return Err(Error::OutOfRange(s.to_string()));
        }
        to_seconds(h, m, sec).ok_or_else(|| Error::InvalidInput(s.to_string()))
    } else if let Some(caps) = UNIT_EXPR.captures(s) {
        to_seconds(
            component(&caps, "h")?,
            component(&caps, "m")?,
            component(&caps, "s")?,
        )
        .ok_or_else(|| Error::InvalidInput(s.to_string()))
    } else {
        Err(Error::InvalidInput(s.to_string()))
    }
}

/// `None` when the sum does not fit
fn to_seconds(hours: i64, minutes: i64, seconds: i64) -> Option<i64> {
    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}
