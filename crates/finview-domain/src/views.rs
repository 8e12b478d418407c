//! Derived, display-ready structures. Recomputed on every refresh, never persisted.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{budget::*, category::*, common::*, expense::*};

/// Utilization of a single budget against its matching expenses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub budget: Budget,
    pub total_expenses: f64,
    pub remaining_amount: f64,
    pub percentage_used: f64,
    pub is_over_budget: bool,
}

impl BudgetStatus {
    pub fn from_parts(budget: Budget, total_expenses: f64) -> Self {
        let remaining_amount = budget.amount - total_expenses;
        let percentage_used = percentage_of(total_expenses, budget.amount);
        let is_over_budget = total_expenses > budget.amount;
        Self {
            budget,
            total_expenses,
            remaining_amount,
            percentage_used,
            is_over_budget,
        }
    }

    pub fn tone(&self) -> ProgressTone {
        ProgressTone::classify(self.percentage_used)
    }
}

/// Budget status as precomputed by the backend status endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatusPayload {
    #[serde(default)]
    pub budget: BudgetPayload,
    #[serde(default)]
    pub total_expenses: Option<f64>,
    #[serde(default)]
    pub remaining_amount: Option<f64>,
    #[serde(default)]
    pub percentage_used: Option<f64>,
    #[serde(default, alias = "isOverBudget")]
    pub over_budget: Option<bool>,
}

/// Where a status list came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusSource {
    Backend,
    Local,
}

impl fmt::Display for StatusSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusSource::Backend => f.write_str("backend"),
            StatusSource::Local => f.write_str("local"),
        }
    }
}

/// Progress bar coloring used by the budgets list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProgressTone {
    Success,
    Warning,
    Error,
}

impl ProgressTone {
    pub fn classify(percentage: f64) -> Self {
        if percentage <= 70.0 {
            ProgressTone::Success
        } else if percentage <= 90.0 {
            ProgressTone::Warning
        } else {
            ProgressTone::Error
        }
    }
}

/// Header figures of the budgets list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOverview {
    pub total_budget_amount: f64,
    pub total_spent_amount: f64,
    pub over_budget_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdownEntry {
    pub category_name: String,
    pub total_amount: f64,
    pub color: String,
    pub percentage_of_total: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Good,
    Warning,
    Danger,
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertStatus::Good => "good",
            AlertStatus::Warning => "warning",
            AlertStatus::Danger => "danger",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    pub budget_id: BudgetId,
    pub category: String,
    pub percentage: f64,
    pub status: AlertStatus,
}

impl BudgetAlert {
    /// Whole-number percentage for labels such as "83% of budget used".
    pub fn rounded_percentage(&self) -> i64 {
        self.percentage.round() as i64
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTotals {
    pub total_budget: f64,
    pub total_spent: f64,
    pub remaining: f64,
    pub savings_rate: f64,
}

/// Statistics strip of the expenses list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseStats {
    pub count: usize,
    pub total: f64,
    pub average: f64,
    pub recurring_count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub total_categories: usize,
    pub total_budget: f64,
    pub active_categories: usize,
}

/// One visible row of the category tree view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRow {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub level: usize,
    pub has_children: bool,
    pub is_expanded: bool,
    pub is_active: bool,
    pub budget_amount: f64,
    pub budget_share: f64,
}

impl CategoryRow {
    pub fn from_category(category: &Category, level: usize, expanded: bool, total: f64) -> Self {
        let budget_amount = category.budget_or_zero();
        Self {
            id: category.id,
            name: category.name.clone(),
            color: category.color.clone(),
            level,
            has_children: category.has_children(),
            is_expanded: expanded,
            is_active: category.is_active,
            budget_amount,
            budget_share: percentage_of(budget_amount, total),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentExpense {
    pub id: ExpenseId,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub category: String,
}

/// Spending bucket for one month or week. Weekly buckets carry no budget line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    pub spent: f64,
    pub expense_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReportEntry {
    pub category_name: String,
    pub amount: f64,
    pub expense_count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodReportEntry {
    pub payment_method: PaymentMethod,
    pub amount: f64,
    pub expense_count: usize,
    pub percentage: f64,
}

/// Everything the dashboard renders, assembled in one pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub totals: DashboardTotals,
    pub recent_expenses: Vec<RecentExpense>,
    pub category_breakdown: Vec<CategoryBreakdownEntry>,
    pub monthly_trend: Vec<TrendPoint>,
    pub budget_alerts: Vec<BudgetAlert>,
}
