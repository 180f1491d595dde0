use {async_trait::async_trait, reqwest::Client, serde::Deserialize};

use crate::{
    config::{DF, PROVIDER},
    data::{
        FetchError, HistoryRequest, MarketDataProvider, YahooProvider,
        http::{build_client, get_text},
    },
    domain::{DailyPoint, DataSource, FuturesPoint, normalize_series},
    utils::parse_cboe_date,
};

/// One row of Cboe's `VIX_History.csv`: `DATE,OPEN,HIGH,LOW,CLOSE` with `MM/DD/YYYY` dates.
#[derive(Deserialize, Debug)]
struct CboeRow {
    #[serde(rename = "DATE")]
    date: String,
    #[serde(rename = "OPEN")]
    open: Option<f64>,
    #[serde(rename = "HIGH")]
    high: Option<f64>,
    #[serde(rename = "LOW")]
    low: Option<f64>,
    #[serde(rename = "CLOSE")]
    close: Option<f64>,
}

pub(crate) fn parse_vix_history(
    csv_text: &str,
    request: HistoryRequest,
) -> Result<Vec<DailyPoint>, FetchError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let mut points = Vec::new();
    for row in reader.deserialize::<CboeRow>() {
        let row = row?;
        let Some(date) = parse_cboe_date(&row.date) else {
            log::debug!("CBOE: skipping row with date {:?}", row.date);
            continue;
        };
        let Some(close) = row.close.filter(|c| *c > 0.0) else {
            continue;
        };
        if request.contains(date) {
            points.push(DailyPoint::new(date, close).with_range(row.open, row.high, row.low));
        }
    }
    Ok(normalize_series(points))
}

/// VIX history from Cboe's published CSV. Cboe has no S&P 500 or futures quote feed, so those
/// come from Yahoo.
pub struct CboeProvider {
    client: Client,
    yahoo: YahooProvider,
}

impl CboeProvider {
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client()?,
            yahoo: YahooProvider::new()?,
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for CboeProvider {
    fn source(&self) -> DataSource {
        DataSource::Cboe
    }

    async fn vix_history(&self, request: HistoryRequest) -> Result<Vec<DailyPoint>, FetchError> {
        let body = get_text(&self.client, PROVIDER.cboe.vix_history_csv_url).await?;
        let points = parse_vix_history(&body, request)?;

        #[cfg(debug_assertions)]
        if DF.log_fetch {
            log::info!("FETCH: Cboe VIX history -> {} daily points", points.len());
        }
        Ok(points)
    }

    async fn spx_history(&self, request: HistoryRequest) -> Result<Vec<DailyPoint>, FetchError> {
        self.yahoo.spx_history(request).await
    }

    async fn futures_curve(&self) -> Result<Vec<FuturesPoint>, FetchError> {
        self.yahoo.futures_curve().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const CSV: &str = "DATE,OPEN,HIGH,LOW,CLOSE
12/31/2019,13.46,14.00,13.42,13.78
01/02/2020,13.46,13.72,12.42,12.47
01/03/2020,15.01,16.20,13.13,14.02
01/06/2020,15.45,16.39,13.54,
01/07/2020,13.84,14.00,13.12,13.79
";

    fn request() -> HistoryRequest {
        HistoryRequest {
            start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2020, 1, 31).unwrap(),
        }
    }

    #[test]
    fn parses_rows_inside_request() {
        let points = parse_vix_history(CSV, request()).unwrap();
        let closes: Vec<f64> = points.iter().map(|p| p.close).collect();
        assert_eq!(closes, [12.47, 14.02, 13.79]);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());
        assert_eq!(points[0].low, Some(12.42));
    }

    #[test]
    fn garbage_number_is_an_error() {
        let bad = "DATE,OPEN,HIGH,LOW,CLOSE\n01/02/2020,a,b,c,d\n";
        assert!(parse_vix_history(bad, request()).is_err());
    }
}
