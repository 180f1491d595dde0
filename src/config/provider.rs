use crate::domain::DataSource;

/// Per-request limits shared by every HTTP provider.
pub struct ClientDefaults {
    pub timeout_ms: u64,
    pub user_agent: &'static str,
}

pub struct YahooConfig {
    pub chart_base_url: &'static str,
    pub vix_symbol: &'static str,
    pub spx_symbol: &'static str,
    pub interval: &'static str,
}

pub struct CboeConfig {
    pub vix_history_csv_url: &'static str,
}

/// Relative paths appended to the proxy base url (e.g. `https://host/api`).
pub struct ProxyConfig {
    pub vix_path: &'static str,
    pub spx_path: &'static str,
    pub futures_path: &'static str,
    /// Path used by the browser build when no base url is given.
    pub web_default_base: &'static str,
}

pub struct FuturesConfig {
    /// How many monthly contracts to request after spot.
    pub contract_months: u32,
    pub symbol_prefix: &'static str,
    pub symbol_suffix: &'static str,
    /// Synthetic curve used when no contract resolves: spot (or base) + step per month.
    pub fallback_months: usize,
    pub fallback_base: f64,
    pub fallback_step: f64,
    pub price_decimals: i32,
}

pub struct HistoryDefaults {
    pub start_date: &'static str,
    pub default_source: DataSource,
}

pub struct ProviderConfig {
    pub client: ClientDefaults,
    pub yahoo: YahooConfig,
    pub cboe: CboeConfig,
    pub proxy: ProxyConfig,
    pub futures: FuturesConfig,
    pub history: HistoryDefaults,
}

pub const PROVIDER: ProviderConfig = ProviderConfig {
    client: ClientDefaults {
        timeout_ms: 10_000,
        user_agent: "Mozilla/5.0 (compatible; vix-lens/0.1)",
    },
    yahoo: YahooConfig {
        chart_base_url: "https://query1.finance.yahoo.com/v8/finance/chart",
        vix_symbol: "^VIX",
        spx_symbol: "^GSPC",
        interval: "1d",
    },
    cboe: CboeConfig {
        vix_history_csv_url: "https://cdn.cboe.com/api/global/us_indices/daily_prices/VIX_History.csv",
    },
    proxy: ProxyConfig {
        vix_path: "vix",
        spx_path: "spx",
        futures_path: "futures",
        web_default_base: "/api",
    },
    futures: FuturesConfig {
        contract_months: 8,
        symbol_prefix: "VX",
        symbol_suffix: ".CBF",
        fallback_months: 7,
        fallback_base: 15.0,
        fallback_step: 0.5,
        price_decimals: 2,
    },
    history: HistoryDefaults {
        start_date: "2020-01-01",
        default_source: DataSource::Yahoo,
    },
};
