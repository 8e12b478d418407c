//! Boundary validation: turns loosely-typed backend payloads into domain entities.

use chrono::NaiveDate;

use finview_domain::{
    Budget, BudgetId, BudgetPayload, BudgetStatus, BudgetStatusPayload, BudgetType,
    CategoryId, CategoryPayload, CategoryRef, CategoryRefPayload, Expense, ExpenseId,
    ExpensePayload, Session, UserId,
};

use crate::{BudgetPeriodResolver, CategoryTree, CoreError, CoreResult};

/// Raw lists exactly as the backend delivered them.
#[derive(Debug, Clone, Copy)]
pub struct RawFinanceData<'a> {
    pub categories: &'a [CategoryPayload],
    pub expenses: &'a [ExpensePayload],
    pub budgets: &'a [BudgetPayload],
    pub budget_statuses: Option<&'a [BudgetStatusPayload]>,
}

/// Validated lists ready for aggregation.
#[derive(Debug, Clone, Default)]
pub struct FinanceData {
    pub categories: CategoryTree,
    pub expenses: Vec<Expense>,
    pub budgets: Vec<Budget>,
    pub backend_statuses: Option<Vec<BudgetStatus>>,
}

/// Validates backend payloads, failing fast with a message naming the bad record.
pub struct Intake;

impl Intake {
    /// Validates every list. `reference` derives periods for budgets sent without one.
    pub fn load(
        session: &Session,
        raw: RawFinanceData<'_>,
        reference: NaiveDate,
    ) -> CoreResult<FinanceData> {
        let categories = CategoryTree::from_payloads(raw.categories)?;
        let expenses = Self::expenses(session, raw.expenses)?;
        let budgets = Self::budgets(session, raw.budgets, reference)?;
        let backend_statuses = raw
            .budget_statuses
            .map(|statuses| {
                statuses
                    .iter()
                    .map(|status| Self::budget_status(session, status, reference))
                    .collect::<CoreResult<Vec<_>>>()
            })
            .transpose()?;

        tracing::info!(
            user = %session.user_id,
            categories = categories.len(),
            expenses = expenses.len(),
            budgets = budgets.len(),
            backend_statuses = backend_statuses.as_ref().map_or(0, Vec::len),
            "finance data validated"
        );
        Ok(FinanceData {
            categories,
            expenses,
            budgets,
            backend_statuses,
        })
    }

    pub fn expenses(session: &Session, payloads: &[ExpensePayload]) -> CoreResult<Vec<Expense>> {
        payloads
            .iter()
            .map(|payload| Self::expense(session, payload))
            .collect()
    }

    /// Records without an owner belong to the session user, since the list
    /// endpoint is already scoped to that user.
    pub fn expense(session: &Session, payload: &ExpensePayload) -> CoreResult<Expense> {
        let id = payload
            .id
            .map(ExpenseId)
            .ok_or_else(|| CoreError::Validation("expense has no id".into()))?;
        let description = payload
            .description
            .clone()
            .ok_or_else(|| CoreError::Validation(format!("expense {id} has no description")))?;
        let amount = Self::amount(payload.amount, &format!("expense {id}"))?;
        let date = payload
            .date
            .ok_or_else(|| CoreError::Validation(format!("expense {id} has no date")))?;
        let category = payload
            .category
            .as_ref()
            .map(|category| Self::category_ref(category, &format!("expense {id}")))
            .transpose()?;

        Ok(Expense {
            id,
            description,
            amount,
            date,
            category,
            payment_method: payload.payment_method,
            notes: payload.notes.clone(),
            is_recurring: payload.is_recurring.unwrap_or(false),
            recurrence_frequency: payload.recurrence_frequency,
            recurrence_end_date: payload.recurrence_end_date,
            owner_user_id: payload.owner_id().map_or(session.user_id, UserId),
        })
    }

    pub fn budgets(
        session: &Session,
        payloads: &[BudgetPayload],
        reference: NaiveDate,
    ) -> CoreResult<Vec<Budget>> {
        payloads
            .iter()
            .map(|payload| Self::budget(session, payload, reference))
            .collect()
    }

    /// Validates a budget. A missing period is derived for every type but
    /// `Custom`, whose dates cannot be inferred.
    pub fn budget(
        session: &Session,
        payload: &BudgetPayload,
        reference: NaiveDate,
    ) -> CoreResult<Budget> {
        let id = payload
            .id
            .map(BudgetId)
            .ok_or_else(|| CoreError::Validation("budget has no id".into()))?;
        let amount = Self::amount(payload.amount, &format!("budget {id}"))?;
        let category = payload
            .category
            .as_ref()
            .map(|category| Self::category_ref(category, &format!("budget {id}")))
            .transpose()?;
        let budget_type = payload.budget_type.unwrap_or_else(|| {
            tracing::debug!(budget = %id, "budget type missing, assuming monthly");
            BudgetType::default()
        });

        let period = match payload.period.and_then(|period| period.complete()) {
            Some(period) if !period.is_ordered() => {
                return Err(CoreError::Validation(format!(
                    "budget {id} period ends {} before it starts {}",
                    period.end_date, period.start_date
                )));
            }
            Some(period) => period,
            None if budget_type.is_custom() => {
                return Err(CoreError::Validation(format!(
                    "custom budget {id} requires start and end dates"
                )));
            }
            None => BudgetPeriodResolver::resolve(budget_type, reference, None),
        };

        let name = payload
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .or_else(|| category.as_ref().map(|category| category.name.clone()))
            .unwrap_or_else(|| format!("Budget {id}"));

        Ok(Budget {
            id,
            name,
            description: payload.description.clone(),
            amount,
            category,
            budget_type,
            period,
            active: payload.active.unwrap_or(true),
            owner_user_id: payload.owner_id().map_or(session.user_id, UserId),
        })
    }

    /// Converts a backend-computed status, deriving any figure the backend omitted.
    pub fn budget_status(
        session: &Session,
        payload: &BudgetStatusPayload,
        reference: NaiveDate,
    ) -> CoreResult<BudgetStatus> {
        let budget = Self::budget(session, &payload.budget, reference)?;
        let total_expenses = payload.total_expenses.ok_or_else(|| {
            CoreError::Validation(format!("status for budget {} has no total", budget.id))
        })?;
        let derived = BudgetStatus::from_parts(budget, total_expenses);
        Ok(BudgetStatus {
            remaining_amount: payload.remaining_amount.unwrap_or(derived.remaining_amount),
            percentage_used: payload.percentage_used.unwrap_or(derived.percentage_used),
            is_over_budget: payload.over_budget.unwrap_or(derived.is_over_budget),
            ..derived
        })
    }

    pub fn category_ref(payload: &CategoryRefPayload, owner: &str) -> CoreResult<CategoryRef> {
        let id = payload
            .id
            .map(CategoryId)
            .ok_or_else(|| CoreError::Validation(format!("{owner} references a category without id")))?;
        let name = payload.name.clone().ok_or_else(|| {
            CoreError::Validation(format!("{owner} references category {id} without name"))
        })?;
        Ok(CategoryRef {
            id,
            name,
            color: payload.color.clone(),
        })
    }

    fn amount(value: Option<f64>, owner: &str) -> CoreResult<f64> {
        match value {
            None => Err(CoreError::Validation(format!("{owner} has no amount"))),
            Some(amount) if !amount.is_finite() => Err(CoreError::Validation(format!(
                "{owner} has a non-finite amount"
            ))),
            Some(amount) if amount < 0.0 => Err(CoreError::Validation(format!(
                "{owner} has a negative amount {amount}"
            ))),
            Some(amount) => Ok(amount),
        }
    }
}
