mod maths_utils;
mod perf;
mod time_utils;

pub use time_utils::{
    AppInstant, TimeUtils, date_to_epoch_sec, epoch_sec_to_date, format_duration_ms,
    format_iso_date, format_last_updated, now_local, parse_cboe_date, parse_iso_date, today_utc,
};

pub(crate) use maths_utils::{mean, pct_of, round_to, upper_median};
