//! JSON snapshot of the backend lists a view model is computed from.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use finview_core::RawFinanceData;
use finview_domain::{BudgetPayload, BudgetStatusPayload, CategoryPayload, ExpensePayload};

use crate::errors::{FinviewError, Result};

/// `{ categories, expenses, budgets, budgetStatuses? }` exactly as fetched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub categories: Vec<CategoryPayload>,
    #[serde(default)]
    pub expenses: Vec<ExpensePayload>,
    #[serde(default)]
    pub budgets: Vec<BudgetPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_statuses: Option<Vec<BudgetStatusPayload>>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|err| {
            FinviewError::Snapshot(format!("cannot read {}: {err}", path.display()))
        })?;
        let snapshot = Self::from_json(&data)?;
        tracing::debug!(
            path = %path.display(),
            categories = snapshot.categories.len(),
            expenses = snapshot.expenses.len(),
            budgets = snapshot.budgets.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn raw(&self) -> RawFinanceData<'_> {
        RawFinanceData {
            categories: &self.categories,
            expenses: &self.expenses,
            budgets: &self.budgets,
            budget_statuses: self.budget_statuses.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_lists_default_to_empty() {
        let snapshot = Snapshot::from_json(r#"{"expenses":[]}"#).expect("parse");
        assert!(snapshot.categories.is_empty());
        assert!(snapshot.budget_statuses.is_none());
    }

    #[test]
    fn invalid_json_is_a_snapshot_error() {
        let err = Snapshot::from_json("{not json").expect_err("invalid");
        assert!(matches!(err, FinviewError::Snapshot(_)));
    }
}
