use std::sync::LazyLock;

pub const ICON_RELOAD: &str = "\u{27f3}";
pub const ICON_WARNING: &str = "\u{26a0}";
pub const ICON_CLOCK: &str = "\u{23f1}";

pub struct UiText {
    pub app_title: String,
    pub app_subtitle: String,

    pub tab_distribution: String,
    pub tab_correlation: String,
    pub tab_futures: String,

    pub label_source: String,
    pub label_bin_width: String,
    pub label_range: String,
    pub label_days: String,
    pub label_reload: String,
    pub label_retry: String,
    pub label_last_updated: String,
    pub label_never: String,
    pub label_loading: String,
    pub label_fetch_failed: String,
    pub label_no_data: String,
    pub label_no_data_hint: String,

    pub label_mean: String,
    pub label_median: String,
    pub label_days_in_window: String,
    pub label_count: String,
    pub label_top_pct: String,
    pub label_close_at_or_above: String,

    pub label_vix: String,
    pub label_spx_change: String,
    pub label_spx_close: String,
    pub label_trend: String,
    pub label_trend_unavailable: String,
    pub label_points: String,

    pub label_spot: String,
    pub label_spread: String,
    pub label_structure: String,
    pub label_illustrative: String,
    pub label_live: String,
    pub label_lookback: String,
    pub label_price: String,
}

pub static UI_TEXT: LazyLock<UiText> = LazyLock::new(|| UiText {
    app_title: "VIX Lens".to_string(),
    app_subtitle: "Volatility index analytics".to_string(),

    tab_distribution: "Distribution".to_string(),
    tab_correlation: "VIX vs S&P 500".to_string(),
    tab_futures: "Futures Curve".to_string(),

    label_source: "Source:".to_string(),
    label_bin_width: "Bin width:".to_string(),
    label_range: "Range".to_string(),
    label_days: "days".to_string(),
    label_reload: format!("{} Reload", ICON_RELOAD),
    label_retry: format!("{} Retry", ICON_RELOAD),
    label_last_updated: format!("{} Updated", ICON_CLOCK),
    label_never: "never".to_string(),
    label_loading: "Loading market data...".to_string(),
    label_fetch_failed: format!("{} Could not load data", ICON_WARNING),
    label_no_data: "No data for this range".to_string(),
    label_no_data_hint: "The provider returned no usable points. Try another source or a wider range."
        .to_string(),

    label_mean: "Mean".to_string(),
    label_median: "Median".to_string(),
    label_days_in_window: "Days".to_string(),
    label_count: "Count".to_string(),
    label_top_pct: "Top".to_string(),
    label_close_at_or_above: "of days closed at or above".to_string(),

    label_vix: "VIX close".to_string(),
    label_spx_change: "S&P 500 daily change (%)".to_string(),
    label_spx_close: "S&P 500 close".to_string(),
    label_trend: "Trend".to_string(),
    label_trend_unavailable: "Trend unavailable (not enough spread)".to_string(),
    label_points: "Points".to_string(),

    label_spot: "Spot".to_string(),
    label_spread: "M2 - M1".to_string(),
    label_structure: "Structure".to_string(),
    label_illustrative: "Illustrative curve (live contracts unavailable)".to_string(),
    label_live: "Live quotes".to_string(),
    label_lookback: "Lookback:".to_string(),
    label_price: "Price".to_string(),
});
