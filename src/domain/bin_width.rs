use {
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter},
};

/// Histogram bucket width. Held as an integer number of tenths so bucket
/// boundaries stay exact.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, Display,
)]
pub enum BinWidth {
    #[default]
    #[strum(to_string = "1")]
    One,
    #[strum(to_string = "0.5")]
    Half,
    #[strum(to_string = "0.1")]
    Tenth,
}

impl BinWidth {
    pub const fn tenths(self) -> i64 {
        match self {
            Self::One => 10,
            Self::Half => 5,
            Self::Tenth => 1,
        }
    }

    pub fn value(self) -> f64 {
        self.tenths() as f64 / 10.0
    }

    /// Decimal places used for labels: 0 when w >= 1, else 1.
    pub const fn decimals(self) -> usize {
        match self {
            Self::One => 0,
            Self::Half | Self::Tenth => 1,
        }
    }

    pub fn format(self, value: f64) -> String {
        format!("{:.*}", self.decimals(), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_use_width_precision() {
        assert_eq!(BinWidth::One.format(12.0), "12");
        assert_eq!(BinWidth::Half.format(12.5), "12.5");
        assert_eq!(BinWidth::Tenth.format(12.0), "12.0");
        assert_eq!(BinWidth::Half.to_string(), "0.5");
    }
}
