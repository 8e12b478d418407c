//! Caller-supplied context threaded through every aggregation call.

use serde::{Deserialize, Serialize};

use crate::{common::UserId, views::AlertStatus};

/// Chart colors used when a category carries no color of its own.
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884D8", "#82CA9D",
];

/// Longest monthly trend a report will build.
pub const MAX_TREND_MONTHS: u32 = 240;

/// Longest weekly trend a report will build.
pub const MAX_TREND_WEEKS: u32 = 520;

/// Bucket name for expenses without a category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Alert label for budgets without a category.
pub const UNKNOWN_CATEGORY_LABEL: &str = "Unknown";

/// Identifies who the derived views are computed for, plus display knobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: UserId,
    #[serde(default)]
    pub preferences: DisplayPreferences,
}

impl Session {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            preferences: DisplayPreferences::default(),
        }
    }

    pub fn with_preferences(mut self, preferences: DisplayPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn owns(&self, owner: UserId) -> bool {
        self.user_id == owner
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPreferences {
    #[serde(default)]
    pub alert_thresholds: AlertThresholds,
    #[serde(default = "DisplayPreferences::default_palette")]
    pub palette: Vec<String>,
    #[serde(default = "DisplayPreferences::default_recent_limit")]
    pub recent_expense_limit: usize,
    #[serde(default = "DisplayPreferences::default_trend_months")]
    pub trend_months: u32,
    #[serde(default = "DisplayPreferences::default_trend_weeks")]
    pub trend_weeks: u32,
}

impl Default for DisplayPreferences {
    fn default() -> Self {
        Self {
            alert_thresholds: AlertThresholds::default(),
            palette: Self::default_palette(),
            recent_expense_limit: Self::default_recent_limit(),
            trend_months: Self::default_trend_months(),
            trend_weeks: Self::default_trend_weeks(),
        }
    }
}

impl DisplayPreferences {
    pub fn default_palette() -> Vec<String> {
        DEFAULT_PALETTE.iter().map(|color| color.to_string()).collect()
    }

    pub fn default_recent_limit() -> usize {
        5
    }

    pub fn default_trend_months() -> u32 {
        6
    }

    pub fn default_trend_weeks() -> u32 {
        4
    }

    /// Palette color for the `index`-th group, cycling through the palette.
    pub fn palette_color(&self, index: usize) -> String {
        if self.palette.is_empty() {
            return DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()].to_string();
        }
        self.palette[index % self.palette.len()].clone()
    }
}

/// Utilization cut-offs (percent) for budget alerts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlertThresholds {
    pub warning: f64,
    pub danger: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            warning: 75.0,
            danger: 90.0,
        }
    }
}

impl AlertThresholds {
    /// Compares at 1e-9 precision so cent amounts landing a hair under a
    /// threshold (4.05 of 4.50 is 89.99999999999999) still reach it.
    pub fn classify(&self, percentage: f64) -> AlertStatus {
        let percentage = (percentage * 1e9).round() / 1e9;
        if percentage >= self.danger {
            AlertStatus::Danger
        } else if percentage >= self.warning {
            AlertStatus::Warning
        } else {
            AlertStatus::Good
        }
    }
}
