//! Creation-date stamps for new posts.

use chrono_tz::Tz;
use time::{Date, OffsetDateTime, format_description::FormatItem, macros::format_description};

use super::timezone::localized_date;

/// `March 07, 2024`
pub const POST_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:zero], [year]");

/// Today's date in UTC, formatted for a post.
pub fn current_post_date() -> String {
    current_post_date_in(Tz::UTC)
}

/// Today's date in the given site time zone, formatted for a post.
pub fn current_post_date_in(tz: Tz) -> String {
    post_date_for(OffsetDateTime::now_utc(), tz)
}

pub fn post_date_for(instant: OffsetDateTime, tz: Tz) -> String {
    format_post_date(localized_date(instant, tz))
}

pub fn format_post_date(date: Date) -> String {
    date.format(POST_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}
