use {
    async_trait::async_trait,
    chrono::{Datelike, Months, NaiveDate},
    reqwest::Client,
    serde::Deserialize,
};

use crate::{
    analysis::synthesize_contracts,
    config::{DF, PROVIDER},
    data::{
        FetchError, HistoryRequest, MarketDataProvider,
        http::{build_client, get_json},
    },
    domain::{DailyPoint, DataSource, FuturesPoint, normalize_series},
    utils::{TimeUtils, date_to_epoch_sec, epoch_sec_to_date, round_to, today_utc},
};

// --- Chart API response (only the fields we read) ---

#[derive(Deserialize, Debug)]
pub(crate) struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Deserialize, Debug)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartApiError>,
}

#[derive(Deserialize, Debug)]
struct ChartApiError {
    code: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    regular_market_price: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
}

#[derive(Deserialize, Debug, Default)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}

impl ChartEnvelope {
    fn into_result(self) -> Result<ChartResult, FetchError> {
        if let Some(err) = self.chart.error {
            return Err(FetchError::failed(format!(
                "chart error {}: {}",
                err.code,
                err.description.unwrap_or_default()
            )));
        }
        self.chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| FetchError::failed("chart response had no result"))
    }
}

fn column_at(column: &[Option<f64>], i: usize) -> Option<f64> {
    column.get(i).copied().flatten()
}

/// Zips timestamps with quote columns, dropping rows whose close is missing or not positive.
pub(crate) fn daily_points_from_chart(envelope: ChartEnvelope) -> Result<Vec<DailyPoint>, FetchError> {
    let result = envelope.into_result()?;
    let Some(quote) = result.indicators.quote.first() else {
        return Ok(Vec::new());
    };

    let points = result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let close = column_at(&quote.close, i).filter(|c| *c > 0.0)?;
            let date = epoch_sec_to_date(ts)?;
            Some(DailyPoint::new(date, close).with_range(
                column_at(&quote.open, i),
                column_at(&quote.high, i),
                column_at(&quote.low, i),
            ))
        })
        .collect();

    Ok(normalize_series(points))
}

fn encode_symbol(symbol: &str) -> String {
    symbol.replace('^', "%5E")
}

/// `VX{MM}{YY}.CBF` for the contract `offset` months after the month of `today`.
pub(crate) fn contract_symbol(today: NaiveDate, offset: u32) -> Option<String> {
    let month = today.with_day(1)?.checked_add_months(Months::new(offset))?;
    let cfg = &PROVIDER.futures;
    Some(format!(
        "{}{:02}{:02}{}",
        cfg.symbol_prefix,
        month.month(),
        month.year() % 100,
        cfg.symbol_suffix
    ))
}

/// Direct Yahoo Finance chart API client.
pub struct YahooProvider {
    client: Client,
}

impl YahooProvider {
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client()?,
        })
    }

    fn history_url(symbol: &str, request: HistoryRequest) -> String {
        // period2 is exclusive, so step past the last requested day
        let period2 = date_to_epoch_sec(request.end) + TimeUtils::SECS_IN_D;
        format!(
            "{}/{}?period1={}&period2={}&interval={}",
            PROVIDER.yahoo.chart_base_url,
            encode_symbol(symbol),
            date_to_epoch_sec(request.start),
            period2,
            PROVIDER.yahoo.interval
        )
    }

    pub(crate) async fn daily_history(
        &self,
        symbol: &str,
        request: HistoryRequest,
    ) -> Result<Vec<DailyPoint>, FetchError> {
        let url = Self::history_url(symbol, request);
        let envelope: ChartEnvelope = get_json(&self.client, &url).await?;
        let points: Vec<DailyPoint> = daily_points_from_chart(envelope)?
            .into_iter()
            .filter(|p| request.contains(p.date))
            .collect();

        #[cfg(debug_assertions)]
        if DF.log_fetch {
            log::info!("FETCH: {} -> {} daily points", symbol, points.len());
        }
        Ok(points)
    }

    /// Latest regular-market price for a symbol, if Yahoo knows one.
    pub(crate) async fn quote(&self, symbol: &str) -> Result<Option<f64>, FetchError> {
        let url = format!(
            "{}/{}?interval=1d&range=1d",
            PROVIDER.yahoo.chart_base_url,
            encode_symbol(symbol)
        );
        let envelope: ChartEnvelope = get_json(&self.client, &url).await?;
        Ok(envelope.into_result()?.meta.regular_market_price)
    }

    pub(crate) async fn curve(&self) -> Result<Vec<FuturesPoint>, FetchError> {
        let cfg = &PROVIDER.futures;
        let spot = self.quote(PROVIDER.yahoo.vix_symbol).await?;
        let mut curve = vec![FuturesPoint::spot(round_to(
            spot.unwrap_or(0.0),
            cfg.price_decimals,
        ))];

        let today = today_utc();
        let mut resolved = 0;
        for offset in 0..cfg.contract_months {
            let Some(symbol) = contract_symbol(today, offset) else {
                continue;
            };
            match self.quote(&symbol).await {
                Ok(Some(price)) if price > 0.0 => {
                    curve.push(FuturesPoint::contract(
                        offset as usize + 1,
                        round_to(price, cfg.price_decimals),
                    ));
                    resolved += 1;
                }
                Ok(_) => {}
                Err(err) => log::debug!("FETCH: no quote for {}: {}", symbol, err),
            }
        }

        if resolved == 0 {
            log::warn!("FETCH: no VIX futures contracts resolved, using a synthetic curve");
            curve.extend(synthesize_contracts(spot));
        }
        Ok(curve)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for YahooProvider {
    fn source(&self) -> DataSource {
        DataSource::Yahoo
    }

    async fn vix_history(&self, request: HistoryRequest) -> Result<Vec<DailyPoint>, FetchError> {
        self.daily_history(PROVIDER.yahoo.vix_symbol, request).await
    }

    async fn spx_history(&self, request: HistoryRequest) -> Result<Vec<DailyPoint>, FetchError> {
        self.daily_history(PROVIDER.yahoo.spx_symbol, request).await
    }

    async fn futures_curve(&self) -> Result<Vec<FuturesPoint>, FetchError> {
        self.curve().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART: &str = r#"{
        "chart": {
            "result": [{
                "meta": { "regularMarketPrice": 14.2 },
                "timestamp": [1704205800, 1704292200, 1704378600, 1704465000],
                "indicators": { "quote": [{
                    "open":  [13.2, 14.0, null, 14.1],
                    "high":  [14.2, 14.6, null, 14.3],
                    "low":   [13.0, 13.8, null, 13.9],
                    "close": [13.20, 14.04, null, 0.0]
                }]}
            }],
            "error": null
        }
    }"#;

    #[test]
    fn chart_rows_without_positive_close_are_dropped() {
        let envelope: ChartEnvelope = serde_json::from_str(CHART).unwrap();
        let points = daily_points_from_chart(envelope).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(points[0].close, 13.2);
        assert_eq!(points[0].high, Some(14.2));
        assert_eq!(points[1].year, 2024);
    }

    #[test]
    fn chart_error_surfaces_as_failure() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found"}}}"#;
        let envelope: ChartEnvelope = serde_json::from_str(body).unwrap();
        let err = daily_points_from_chart(envelope).unwrap_err();
        assert!(err.to_string().contains("Not Found"));
    }

    #[test]
    fn contract_symbols_roll_over_the_year() {
        let today = NaiveDate::from_ymd_opt(2024, 11, 20).unwrap();
        assert_eq!(contract_symbol(today, 0).as_deref(), Some("VX1124.CBF"));
        assert_eq!(contract_symbol(today, 2).as_deref(), Some("VX0125.CBF"));
    }

    #[test]
    fn history_url_covers_last_day() {
        let request = HistoryRequest {
            start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
        };
        let url = YahooProvider::history_url("^VIX", request);
        assert!(url.contains("/%5EVIX?"));
        assert!(url.contains("period1=1577836800"));
        assert!(url.contains("period2=1578009600"));
        assert!(url.ends_with("interval=1d"));
    }
}
