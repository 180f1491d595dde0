// Domain types and value objects
mod bin_width;
mod daily_point;
mod data_source;
mod futures_point;
mod time_range;

// Re-export commonly used types to the world
pub use bin_width::BinWidth;
pub use daily_point::{CorrelationPoint, DailyPoint, normalize_series};
pub use data_source::{DataSource, DataSourceConfig, default_start_date};
pub use futures_point::{FuturesPoint, SPOT_LABEL};
pub use time_range::TimeRange;
