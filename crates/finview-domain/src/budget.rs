//! Budget records and the period they measure spending over.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{category::*, common::*, expense::UserRefPayload};

/// Budgeting cadence. Every type except `Custom` has a derived period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetType {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
    Custom,
}

impl BudgetType {
    pub fn is_custom(self) -> bool {
        matches!(self, BudgetType::Custom)
    }
}

impl fmt::Display for BudgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetType::Daily => "Daily",
            BudgetType::Weekly => "Weekly",
            BudgetType::Monthly => "Monthly",
            BudgetType::Quarterly => "Quarterly",
            BudgetType::Yearly => "Yearly",
            BudgetType::Custom => "Custom",
        };
        f.write_str(label)
    }
}

/// Start/end dates of a budget, both inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimePeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl TimePeriod {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.start_date <= self.end_date
    }

    pub fn as_range(&self) -> Option<DateRange> {
        DateRange::new(self.start_date, self.end_date).ok()
    }
}

/// Period as it appears on the wire; either bound may be missing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimePeriodPayload {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl TimePeriodPayload {
    /// Returns a complete period only when both bounds are present.
    pub fn complete(&self) -> Option<TimePeriod> {
        Some(TimePeriod::new(self.start_date?, self.end_date?))
    }
}

impl From<TimePeriod> for TimePeriodPayload {
    fn from(period: TimePeriod) -> Self {
        Self {
            start_date: Some(period.start_date),
            end_date: Some(period.end_date),
        }
    }
}

/// Budget as delivered by the backend list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPayload {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRefPayload>,
    #[serde(default)]
    pub budget_type: Option<BudgetType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<TimePeriodPayload>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default, alias = "userId", skip_serializing_if = "Option::is_none")]
    pub owner_user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRefPayload>,
}

impl BudgetPayload {
    pub fn new(id: i64, name: impl Into<String>, amount: f64, budget_type: BudgetType) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            amount: Some(amount),
            budget_type: Some(budget_type),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: CategoryRefPayload) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.period = Some(TimePeriodPayload {
            start_date: Some(start),
            end_date: Some(end),
        });
        self
    }

    pub fn with_owner(mut self, owner: i64) -> Self {
        self.owner_user_id = Some(owner);
        self
    }

    pub fn owner_id(&self) -> Option<i64> {
        self.owner_user_id
            .or_else(|| self.user.as_ref().and_then(|user| user.id))
    }
}

/// A validated budget with a resolved period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: BudgetId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    pub budget_type: BudgetType,
    pub period: TimePeriod,
    pub active: bool,
    pub owner_user_id: UserId,
}

impl Budget {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        amount: f64,
        budget_type: BudgetType,
        period: TimePeriod,
        owner: UserId,
    ) -> Self {
        Self {
            id: BudgetId(id),
            name: name.into(),
            description: None,
            amount,
            category: None,
            budget_type,
            period,
            active: true,
            owner_user_id: owner,
        }
    }

    pub fn with_category(mut self, category: CategoryRef) -> Self {
        self.category = Some(category);
        self
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|category| category.name.as_str())
    }
}

impl BelongsToCategory for Budget {
    fn category_id(&self) -> Option<CategoryId> {
        self.category.as_ref().map(|category| category.id)
    }
}

impl Owned for Budget {
    fn owner(&self) -> UserId {
        self.owner_user_id
    }
}
