use {
    chrono::NaiveDate,
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter},
};

use crate::{config::PROVIDER, utils::parse_iso_date};

#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    Display,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    #[default]
    #[strum(to_string = "Yahoo")]
    Yahoo,
    #[strum(to_string = "Cboe")]
    Cboe,
}

/// Everything a provider needs to serve one fetch. Passed explicitly into every request.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSourceConfig {
    pub source: DataSource,
    /// When set, all series are read from `{base}/vix`, `{base}/spx` and `{base}/futures`.
    pub proxy_base_url: Option<String>,
    pub start_date: NaiveDate,
    /// `None` means "up to today".
    pub end_date: Option<NaiveDate>,
}

impl DataSourceConfig {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            proxy_base_url: None,
            start_date: default_start_date(),
            end_date: None,
        }
    }

    pub fn with_source(&self, source: DataSource) -> Self {
        Self {
            source,
            ..self.clone()
        }
    }
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self::new(PROVIDER.history.default_source)
    }
}

pub fn default_start_date() -> NaiveDate {
    parse_iso_date(PROVIDER.history.start_date).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_start_is_2020() {
        assert_eq!(
            DataSourceConfig::default().start_date,
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
        );
    }

    #[test]
    fn source_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&DataSource::Cboe).unwrap(), "\"cboe\"");
    }
}
