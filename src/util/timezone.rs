use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use time::{Date, OffsetDateTime, UtcOffset};

/// UTC offset in effect in `tz` at `instant`.
pub fn local_offset(instant: OffsetDateTime, tz: Tz) -> UtcOffset {
    let utc = DateTime::<Utc>::from_timestamp(instant.unix_timestamp(), 0).unwrap_or_default();
    let seconds = tz
        .offset_from_utc_datetime(&utc.naive_utc())
        .fix()
        .local_minus_utc();
    UtcOffset::from_whole_seconds(seconds).unwrap_or(UtcOffset::UTC)
}

/// Calendar date of `instant` as seen from `tz`.
pub fn localized_date(instant: OffsetDateTime, tz: Tz) -> Date {
    instant.to_offset(local_offset(instant, tz)).date()
}
