use {async_trait::async_trait, chrono::NaiveDate, std::sync::Arc};

use crate::{
    data::{CboeProvider, FetchError, ProxyProvider, YahooProvider},
    domain::{DailyPoint, DataSource, DataSourceConfig, FuturesPoint},
    utils::today_utc,
};

/// Inclusive date range for a history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryRequest {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl HistoryRequest {
    pub fn from_config(config: &DataSourceConfig) -> Self {
        let end = config.end_date.unwrap_or_else(today_utc);
        Self {
            start: config.start_date.min(end),
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Abstract interface for fetching market data.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataProvider {
    fn source(&self) -> DataSource;

    /// Daily VIX closes, ascending, one point per date.
    async fn vix_history(&self, request: HistoryRequest) -> Result<Vec<DailyPoint>, FetchError>;

    /// Daily S&P 500 closes, ascending, one point per date.
    async fn spx_history(&self, request: HistoryRequest) -> Result<Vec<DailyPoint>, FetchError>;

    /// "Spot" then "M1".."Mn".
    async fn futures_curve(&self) -> Result<Vec<FuturesPoint>, FetchError>;
}

#[cfg(not(target_arch = "wasm32"))]
pub type SharedProvider = Arc<dyn MarketDataProvider + Send + Sync>;

#[cfg(target_arch = "wasm32")]
pub type SharedProvider = Arc<dyn MarketDataProvider>;

/// Picks the provider for a config: the proxy when a base url is set, else the direct source.
pub fn provider_for(config: &DataSourceConfig) -> Result<SharedProvider, FetchError> {
    if let Some(base) = &config.proxy_base_url {
        return Ok(Arc::new(ProxyProvider::new(base, config.source)?));
    }
    Ok(match config.source {
        DataSource::Yahoo => Arc::new(YahooProvider::new()?),
        DataSource::Cboe => Arc::new(CboeProvider::new()?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_end_defaults_to_today_and_never_precedes_start() {
        let mut config = DataSourceConfig::default();
        config.end_date = NaiveDate::from_ymd_opt(2019, 6, 1);
        let req = HistoryRequest::from_config(&config);
        assert_eq!(req.start, req.end);

        config.end_date = None;
        assert_eq!(HistoryRequest::from_config(&config).end, today_utc());
    }
}
