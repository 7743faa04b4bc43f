//! Market Hours Module
//!
//! Trading-session check for the exchange the dashboard follows (NSE,
//! Asia/Kolkata). IST is a fixed UTC+05:30 offset with no daylight saving,
//! so a `FixedOffset` is enough and no time-zone database is pulled in.
//!
//! While the market is open, cached quote data is treated as live and a
//! fresh fetch is preferred even inside the TTL window; outside the session
//! the TTL alone decides freshness.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc, Weekday};

/// IST offset from UTC in seconds (+05:30).
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Session open, minutes since midnight IST (09:15).
const OPEN_MINUTE: u32 = 9 * 60 + 15;

/// Session close, minutes since midnight IST (15:30), inclusive.
const CLOSE_MINUTE: u32 = 15 * 60 + 30;

// == Market Open Check ==
/// Whether the exchange is in its trading session at the given instant.
///
/// Open Monday through Friday, 09:15 to 15:30 IST inclusive, evaluated on
/// the minute. Exchange holidays are not modelled; a holiday behaves like a
/// regular trading day and only costs an unnecessary refetch.
pub fn is_market_open_at(instant: DateTime<Utc>) -> bool {
    let ist_offset = FixedOffset::east_opt(IST_OFFSET_SECS).expect("IST is a valid offset");
    let local = instant.with_timezone(&ist_offset);

    if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }

    let minute = local.hour() * 60 + local.minute();
    (OPEN_MINUTE..=CLOSE_MINUTE).contains(&minute)
}

/// Whether the exchange is in its trading session right now.
pub fn is_market_open_now() -> bool {
    is_market_open_at(Utc::now())
}
