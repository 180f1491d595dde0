use {async_trait::async_trait, reqwest::Client, serde::Deserialize};

use crate::{
    config::{DF, PROVIDER},
    data::{
        FetchError, HistoryRequest, MarketDataProvider,
        http::{build_client, get_json},
    },
    domain::{DailyPoint, DataSource, FuturesPoint, normalize_series},
    utils::format_iso_date,
};

/// `{ "data": [...], "source": "yahoo" }`
#[derive(Deserialize, Debug)]
pub(crate) struct Envelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub source: Option<DataSource>,
}

/// Reads all three series from a companion HTTP proxy (`{base}/vix`, `{base}/spx`,
/// `{base}/futures`). Used by the browser build, which cannot call the upstream APIs directly.
pub struct ProxyProvider {
    client: Client,
    base_url: String,
    source: DataSource,
}

impl ProxyProvider {
    pub fn new(base_url: &str, source: DataSource) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            source,
        })
    }

    pub(crate) fn history_url(&self, path: &str, request: HistoryRequest) -> String {
        format!(
            "{}/{}?period1={}&period2={}&source={}",
            self.base_url,
            path,
            format_iso_date(request.start),
            format_iso_date(request.end),
            source_param(self.source)
        )
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, FetchError> {
        let envelope: Envelope<T> = get_json(&self.client, url).await?;
        if let Some(served_by) = envelope.source {
            if served_by != self.source {
                log::warn!("PROXY: asked for {} data, got {}", self.source, served_by);
            }
        }

        #[cfg(debug_assertions)]
        if DF.log_fetch {
            log::info!("FETCH: {} -> {} rows", url, envelope.data.len());
        }
        Ok(envelope.data)
    }

    async fn history(&self, path: &str, request: HistoryRequest) -> Result<Vec<DailyPoint>, FetchError> {
        let url = self.history_url(path, request);
        let points = self.fetch::<DailyPoint>(&url).await?;
        Ok(normalize_series(points))
    }
}

fn source_param(source: DataSource) -> &'static str {
    match source {
        DataSource::Yahoo => "yahoo",
        DataSource::Cboe => "cboe",
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for ProxyProvider {
    fn source(&self) -> DataSource {
        self.source
    }

    async fn vix_history(&self, request: HistoryRequest) -> Result<Vec<DailyPoint>, FetchError> {
        self.history(PROVIDER.proxy.vix_path, request).await
    }

    async fn spx_history(&self, request: HistoryRequest) -> Result<Vec<DailyPoint>, FetchError> {
        self.history(PROVIDER.proxy.spx_path, request).await
    }

    async fn futures_curve(&self) -> Result<Vec<FuturesPoint>, FetchError> {
        let url = format!("{}/{}", self.base_url, PROVIDER.proxy.futures_path);
        self.fetch::<FuturesPoint>(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn urls_carry_iso_dates_and_source() {
        let proxy = ProxyProvider::new("http://localhost:3000/api/", DataSource::Cboe).unwrap();
        let request = HistoryRequest {
            start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        };
        assert_eq!(
            proxy.history_url("vix", request),
            "http://localhost:3000/api/vix?period1=2020-01-01&period2=2024-06-30&source=cboe"
        );
    }

    #[test]
    fn envelope_decodes_futures() {
        let body = r#"{"data":[{"month":"Spot","price":14.2},{"month":"M1","price":15.1}],"source":"yahoo"}"#;
        let envelope: Envelope<FuturesPoint> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data.len(), 2);
        assert!(envelope.data[0].is_spot());
        assert_eq!(envelope.source, Some(DataSource::Yahoo));
    }
}
