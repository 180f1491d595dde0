use {
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter},
};

/// Preset lookbacks offered on the futures view.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, Display,
)]
pub enum TimeRange {
    #[strum(to_string = "1M")]
    OneMonth,
    #[strum(to_string = "3M")]
    ThreeMonths,
    #[strum(to_string = "6M")]
    SixMonths,
    #[default]
    #[strum(to_string = "1Y")]
    OneYear,
    #[strum(to_string = "5Y")]
    FiveYears,
    #[strum(to_string = "ALL")]
    All,
}

impl TimeRange {
    /// Illustrative Spot..M7 curve for this lookback, shown when live contracts are unavailable.
    pub const fn illustrative_prices(self) -> [f64; 8] {
        match self {
            Self::OneMonth => [21.5, 20.8, 20.2, 19.8, 19.5, 19.2, 19.0, 18.9],
            Self::ThreeMonths => [18.0, 18.2, 18.5, 18.9, 19.2, 19.4, 19.6, 19.8],
            Self::SixMonths => [13.5, 14.8, 15.9, 16.7, 17.4, 17.9, 18.2, 18.5],
            Self::OneYear => [14.5, 15.2, 16.1, 16.8, 17.2, 17.5, 17.7, 17.9],
            Self::FiveYears => [16.0, 16.5, 17.2, 17.8, 18.2, 18.5, 18.8, 19.0],
            Self::All => [19.5, 19.8, 20.1, 20.4, 20.6, 20.8, 21.0, 21.2],
        }
    }
}
