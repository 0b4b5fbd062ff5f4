//! Local date and time for stamping new transactions.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::{Error, ledger::TIME_FORMAT};

/// Get the current UTC offset of `canonical_timezone`, e.g. "Africa/Libreville".
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The date and "HH:MM" time at which a transaction is entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTimestamp {
    /// The local date.
    pub date: Date,
    /// The local wall-clock time formatted as "HH:MM".
    pub time: String,
}

impl EntryTimestamp {
    /// Stamp `now` in the given offset.
    pub fn at(now: OffsetDateTime, offset: UtcOffset) -> Result<Self, Error> {
        let local = now.to_offset(offset);
        let time = local.time().format(TIME_FORMAT).map_err(|error| {
            tracing::error!("Could not format entry time: {error}");
            Error::InvalidTimestamp(error.to_string())
        })?;

        Ok(Self {
            date: local.date(),
            time,
        })
    }

    /// Stamp the current time in `canonical_timezone`.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidTimezoneError] if the timezone name is not known.
    pub fn now(canonical_timezone: &str) -> Result<Self, Error> {
        let offset = get_local_offset(canonical_timezone).ok_or_else(|| {
            tracing::error!("Invalid timezone {canonical_timezone}");
            Error::InvalidTimezoneError(canonical_timezone.to_owned())
        })?;

        Self::at(OffsetDateTime::now_utc(), offset)
    }
}

#[cfg(test)]
mod tests {
    use time::{
        UtcOffset,
        macros::{date, datetime},
    };

    use crate::Error;

    use super::{EntryTimestamp, get_local_offset};

    #[test]
    fn formats_hours_and_minutes() {
        let stamp = EntryTimestamp::at(datetime!(2024-03-09 07:05:59 UTC), UtcOffset::UTC).unwrap();

        assert_eq!(stamp.date, date!(2024 - 03 - 09));
        assert_eq!(stamp.time, "07:05");
    }

    #[test]
    fn uses_local_date_and_time() {
        let offset = UtcOffset::from_hms(1, 0, 0).unwrap();

        let stamp = EntryTimestamp::at(datetime!(2024-03-09 23:30 UTC), offset).unwrap();

        assert_eq!(stamp.date, date!(2024 - 03 - 10));
        assert_eq!(stamp.time, "00:30");
    }

    #[test]
    fn known_timezone_has_offset() {
        assert_eq!(get_local_offset("Etc/UTC"), Some(UtcOffset::UTC));
    }

    #[test]
    fn unknown_timezone_is_an_error() {
        let result = EntryTimestamp::now("Mars/Olympus_Mons");

        assert_eq!(
            result,
            Err(Error::InvalidTimezoneError("Mars/Olympus_Mons".to_owned()))
        );
    }
}
