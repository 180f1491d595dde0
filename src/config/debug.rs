//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Requests, responses and fetch-slot generations.
    pub log_fetch: bool,

    /// Handle drags and range clamping.
    pub log_range_selector: bool,

    pub log_histogram: bool,
    pub log_alignment: bool,
    pub log_hover: bool,

    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,

    pub log_persistence: bool,
}

pub const DF: LogFlags = LogFlags {
    log_fetch: true,

    log_range_selector: false,
    log_histogram: false,
    log_alignment: false,
    log_hover: false,
    log_performance: false,
    log_persistence: false,
};
