use std::fs::read_to_string;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::fill::prices::QuoteBarSide;

pub const DEFAULT_STALE_PRICE_THRESHOLD_SECS: i64 = 3600;

/// Tunable behaviour of the fill models, usually loaded once from JSON at the start of a backtest.
/// Any field missing from the JSON takes its default.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FillSettings {
    /// How old the pricing data can be, relative to order submission, before a market fill is
    /// flagged as stale.
    pub stale_price_threshold_secs: i64,
    /// Overrides the side of quote bars used for triggers. Unset leaves the asset class default.
    pub quote_bar_side: Option<QuoteBarSide>,
}

impl Default for FillSettings {
    fn default() -> Self {
        Self {
            stale_price_threshold_secs: DEFAULT_STALE_PRICE_THRESHOLD_SECS,
            quote_bar_side: None,
        }
    }
}

impl FillSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Could not parse fill settings")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)
            .with_context(|| format!("Could not read fill settings from {}", path.display()))?;
        Self::from_json(&contents)
    }

    pub fn stale_price_threshold(&self) -> Duration {
        Duration::seconds(self.stale_price_threshold_secs)
    }
}

#[cfg(test)]
mod tests {
    use time::Duration;

    use super::FillSettings;
    use crate::fill::prices::QuoteBarSide;

    #[test]
    fn test_that_missing_fields_take_defaults() {
        let settings = FillSettings::from_json("{}").unwrap();
        assert_eq!(settings, FillSettings::default());
        assert_eq!(settings.stale_price_threshold(), Duration::hours(1));
    }

    #[test]
    fn test_that_settings_parse_from_json() {
        let settings = FillSettings::from_json(
            r#"{"stale_price_threshold_secs": 60, "quote_bar_side": "Mid"}"#,
        )
        .unwrap();
        assert_eq!(settings.stale_price_threshold(), Duration::minutes(1));
        assert_eq!(settings.quote_bar_side, Some(QuoteBarSide::Mid));
    }

    #[test]
    fn test_that_settings_load_from_file() {
        let path = std::env::temp_dir().join("islay_fill_settings_test.json");
        std::fs::write(&path, r#"{"stale_price_threshold_secs": 300}"#).unwrap();

        let settings = FillSettings::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(settings.stale_price_threshold(), Duration::minutes(5));
        assert_eq!(settings.quote_bar_side, None);

        assert!(FillSettings::from_path(&path).is_err());
    }

    #[test]
    fn test_that_bad_json_is_an_error() {
        assert!(FillSettings::from_json("{\"stale_price_threshold_secs\": \"a\"}").is_err());
    }
}
