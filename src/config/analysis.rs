//! Analysis and computation configuration

pub struct RangeSelectorConfig {
    /// Minimum number of trading days between the two handles.
    pub min_window: usize,
    /// Length of the trailing default window.
    pub trailing_window: usize,
}

pub struct HistogramConfig {
    /// Upper-tail shares strictly between 0 and this value (in %) are shown as "<0.1".
    pub tail_threshold_pct: f64,
    /// Tick step by bucket span: span < 5 -> 1, span < 15 -> 2, span > 60 -> 10, else 5.
    pub tick_step_small: i64,
    pub tick_step_medium: i64,
    pub tick_step_default: i64,
    pub tick_step_wide: i64,
    pub span_small: f64,
    pub span_medium: f64,
    pub span_wide: f64,
}

pub struct CorrelationConfig {
    pub change_decimals: i32,
}

pub struct AnalysisConfig {
    pub range: RangeSelectorConfig,
    pub histogram: HistogramConfig,
    pub correlation: CorrelationConfig,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    range: RangeSelectorConfig {
        min_window: 30,
        trailing_window: 365,
    },
    histogram: HistogramConfig {
        tail_threshold_pct: 0.1,
        tick_step_small: 1,
        tick_step_medium: 2,
        tick_step_default: 5,
        tick_step_wide: 10,
        span_small: 5.0,
        span_medium: 15.0,
        span_wide: 60.0,
    },
    correlation: CorrelationConfig { change_decimals: 4 },
};
