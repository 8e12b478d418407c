use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

const MAX_TREND_MONTHS: u32 = 240;
const MAX_TREND_WEEKS: u32 = 520;

/// Display preferences applied when building view models for a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// User whose records are shown when the caller names none.
    #[serde(default = "Config::default_user_id_value")]
    pub default_user_id: i64,
    #[serde(default = "Config::default_warning_threshold")]
    pub warning_threshold: f64,
    #[serde(default = "Config::default_danger_threshold")]
    pub danger_threshold: f64,
    #[serde(default = "Config::default_palette")]
    pub palette: Vec<String>,
    #[serde(default = "Config::default_recent_expense_limit")]
    pub recent_expense_limit: usize,
    #[serde(default = "Config::default_trend_months")]
    pub trend_months: u32,
    #[serde(default = "Config::default_trend_weeks")]
    pub trend_weeks: u32,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for config and backups. Defaults to the platform config dir.
    pub config_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            default_user_id: Self::default_user_id_value(),
            warning_threshold: Self::default_warning_threshold(),
            danger_threshold: Self::default_danger_threshold(),
            palette: Self::default_palette(),
            recent_expense_limit: Self::default_recent_expense_limit(),
            trend_months: Self::default_trend_months(),
            trend_weeks: Self::default_trend_weeks(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            config_root: None,
        }
    }
}

impl Config {
    pub fn default_user_id_value() -> i64 {
        1
    }

    pub fn default_warning_threshold() -> f64 {
        75.0
    }

    pub fn default_danger_threshold() -> f64 {
        90.0
    }

    pub fn default_palette() -> Vec<String> {
        ["#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884D8", "#82CA9D"]
            .iter()
            .map(|color| color.to_string())
            .collect()
    }

    pub fn default_recent_expense_limit() -> usize {
        5
    }

    pub fn default_trend_months() -> u32 {
        6
    }

    pub fn default_trend_weeks() -> u32 {
        4
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Rejects settings the aggregation layer cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = [self.warning_threshold, self.danger_threshold];
        if thresholds.iter().any(|value| !value.is_finite() || *value < 0.0) {
            return Err(ConfigError::Invalid(
                "alert thresholds must be non-negative numbers".into(),
            ));
        }
        if self.warning_threshold > self.danger_threshold {
            return Err(ConfigError::Invalid(format!(
                "warning threshold {} exceeds danger threshold {}",
                self.warning_threshold, self.danger_threshold
            )));
        }
        if let Some(color) = self.palette.iter().find(|color| !is_hex_color(color)) {
            return Err(ConfigError::Invalid(format!(
                "palette entry `{color}` is not a #RRGGBB color"
            )));
        }
        if !(1..=MAX_TREND_MONTHS).contains(&self.trend_months) {
            return Err(ConfigError::Invalid(format!(
                "trendMonths must be between 1 and {MAX_TREND_MONTHS}, got {}",
                self.trend_months
            )));
        }
        if !(1..=MAX_TREND_WEEKS).contains(&self.trend_weeks) {
            return Err(ConfigError::Invalid(format!(
                "trendWeeks must be between 1 and {MAX_TREND_WEEKS}, got {}",
                self.trend_weeks
            )));
        }
        Ok(())
    }

    pub fn resolve_config_root(&self) -> PathBuf {
        if let Some(path) = &self.config_root {
            return path.clone();
        }

        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("finview")
    }
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|ch| ch.is_ascii_hexdigit()))
}
