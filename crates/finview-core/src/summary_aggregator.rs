//! Budget utilization, category breakdown, alerts, and headline totals.

use std::cmp::Ordering;

use finview_domain::{
    percentage_of, BelongsToCategory, Budget, BudgetAlert, BudgetOverview, BudgetStatus,
    CategoryBreakdownEntry, CategoryId, DashboardTotals, Expense, Owned,
    Session, StatusSource, UNCATEGORIZED_LABEL, UNKNOWN_CATEGORY_LABEL,
};

use crate::ExpenseFilter;

/// Stateless aggregation over already-fetched lists.
///
/// Every operation takes the caller's [`Session`]; records owned by another
/// user are ignored.
pub struct SummaryAggregator;

impl SummaryAggregator {
    /// One status per budget, in input order.
    pub fn budget_statuses(
        session: &Session,
        budgets: &[Budget],
        expenses: &[Expense],
    ) -> Vec<BudgetStatus> {
        owned(session, budgets)
            .map(|budget| {
                let spent = spent_in_category(session, expenses, budget.category_id());
                BudgetStatus::from_parts(budget.clone(), spent)
            })
            .collect()
    }

    /// Prefers the status list precomputed by the backend, keeping only the
    /// session user's entries, and falls back to local computation when none
    /// was delivered. Input order is kept either way.
    pub fn resolve_budget_statuses(
        session: &Session,
        backend: Option<&[BudgetStatus]>,
        budgets: &[Budget],
        expenses: &[Expense],
    ) -> (Vec<BudgetStatus>, StatusSource) {
        match backend {
            Some(statuses) => (
                statuses
                    .iter()
                    .filter(|status| session.owns(status.budget.owner()))
                    .cloned()
                    .collect(),
                StatusSource::Backend,
            ),
            None => {
                tracing::debug!("no backend budget statuses, computing locally");
                (
                    Self::budget_statuses(session, budgets, expenses),
                    StatusSource::Local,
                )
            }
        }
    }

    /// Spending grouped by category name, groups in first-seen order.
    ///
    /// Each group takes the color of the expense that opened it, falling back
    /// to the session palette by group position when that expense has none.
    pub fn category_breakdown(session: &Session, expenses: &[Expense]) -> Vec<CategoryBreakdownEntry> {
        let mut groups: Vec<(String, f64, Option<String>)> = Vec::new();
        for expense in owned(session, expenses) {
            let name = expense.category_name().unwrap_or(UNCATEGORIZED_LABEL);
            match groups.iter_mut().find(|(group, _, _)| group == name) {
                Some((_, total, _)) => *total += expense.amount,
                None => {
                    let color = expense
                        .category
                        .as_ref()
                        .and_then(|category| category.color.clone());
                    groups.push((name.to_string(), expense.amount, color));
                }
            }
        }

        let grand_total: f64 = groups.iter().map(|(_, total, _)| total).sum();
        groups
            .into_iter()
            .enumerate()
            .map(|(index, (category_name, total_amount, color))| CategoryBreakdownEntry {
                category_name,
                total_amount,
                color: color.unwrap_or_else(|| session.preferences.palette_color(index)),
                percentage_of_total: percentage_of(total_amount, grand_total),
            })
            .collect()
    }

    /// Utilization alerts sorted by percentage, highest first. Budgets with no
    /// matching spend produce no alert.
    pub fn budget_alerts(
        session: &Session,
        budgets: &[Budget],
        expenses: &[Expense],
    ) -> Vec<BudgetAlert> {
        Self::alerts_from_statuses(session, &Self::budget_statuses(session, budgets, expenses))
    }

    /// Alert classification over an existing status list, local or backend.
    pub fn alerts_from_statuses(session: &Session, statuses: &[BudgetStatus]) -> Vec<BudgetAlert> {
        let thresholds = session.preferences.alert_thresholds;
        let mut alerts: Vec<BudgetAlert> = statuses
            .iter()
            .filter(|status| status.percentage_used > 0.0)
            .map(|status| BudgetAlert {
                budget_id: status.budget.id,
                category: status
                    .budget
                    .category_name()
                    .unwrap_or(UNKNOWN_CATEGORY_LABEL)
                    .to_string(),
                percentage: status.percentage_used,
                status: thresholds.classify(status.percentage_used),
            })
            .collect();
        alerts.sort_by(|a, b| descending(a.percentage, b.percentage));
        alerts
    }

    /// Headline figures: all budgets against all spending.
    pub fn totals(session: &Session, budgets: &[Budget], expenses: &[Expense]) -> DashboardTotals {
        let total_budget: f64 = owned(session, budgets).map(|budget| budget.amount).sum();
        let total_spent: f64 = owned(session, expenses).map(|expense| expense.amount).sum();
        let remaining = total_budget - total_spent;
        DashboardTotals {
            total_budget,
            total_spent,
            remaining,
            savings_rate: if total_budget == 0.0 {
                0.0
            } else {
                remaining / total_budget * 100.0
            },
        }
    }

    pub fn budget_overview(statuses: &[BudgetStatus]) -> BudgetOverview {
        BudgetOverview {
            total_budget_amount: statuses.iter().map(|status| status.budget.amount).sum(),
            total_spent_amount: statuses.iter().map(|status| status.total_expenses).sum(),
            over_budget_count: statuses.iter().filter(|status| status.is_over_budget).count(),
        }
    }

    /// Expenses satisfying every predicate of `filter`, in input order.
    pub fn filter_expenses<'a>(
        session: &Session,
        expenses: &'a [Expense],
        filter: &ExpenseFilter,
    ) -> Vec<&'a Expense> {
        owned(session, expenses)
            .filter(|expense| filter.matches(expense))
            .collect()
    }
}

/// Records visible to the session user.
pub(crate) fn owned<'s, 'a: 's, T: Owned>(
    session: &'s Session,
    items: &'a [T],
) -> impl Iterator<Item = &'a T> + 's {
    items.iter().filter(move |item| session.owns(item.owner()))
}

/// A budget without a category matches nothing.
fn spent_in_category(session: &Session, expenses: &[Expense], category: Option<CategoryId>) -> f64 {
    let Some(category) = category else {
        return 0.0;
    };
    owned(session, expenses)
        .filter(|expense| expense.category_id() == Some(category))
        .map(|expense| expense.amount)
        .sum()
}

pub(crate) fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use finview_domain::{AlertStatus, BudgetType, CategoryRef, TimePeriod, UserId};

    const USER: UserId = UserId(1);

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn budget(id: i64, amount: f64, category: Option<(i64, &str)>) -> Budget {
        let budget = Budget::new(
            id,
            format!("Budget {id}"),
            amount,
            BudgetType::Monthly,
            TimePeriod::new(date(1), date(31)),
            USER,
        );
        match category {
            Some((cid, name)) => budget.with_category(CategoryRef::new(cid, name)),
            None => budget,
        }
    }

    fn expense(id: i64, amount: f64, category: Option<(i64, &str)>) -> Expense {
        let expense = Expense::new(id, format!("Expense {id}"), amount, date(10), USER);
        match category {
            Some((cid, name)) => expense.with_category(CategoryRef::new(cid, name)),
            None => expense,
        }
    }

    #[test]
    fn status_for_partially_used_budget() {
        let session = Session::new(USER);
        let budgets = vec![budget(1, 100.0, Some((7, "Food")))];
        let expenses = vec![
            expense(1, 40.0, Some((7, "Food"))),
            expense(2, 35.0, Some((7, "Food"))),
            expense(3, 99.0, Some((8, "Fuel"))),
        ];
        let statuses = SummaryAggregator::budget_statuses(&session, &budgets, &expenses);

        assert_eq!(statuses.len(), 1);
        let status = &statuses[0];
        assert_eq!(status.total_expenses, 75.0);
        assert_eq!(status.remaining_amount, 25.0);
        assert!((status.percentage_used - 75.0).abs() < 1e-9);
        assert!(!status.is_over_budget);
    }

    #[test]
    fn uncategorized_budget_matches_nothing() {
        let session = Session::new(USER);
        let budgets = vec![budget(1, 100.0, None)];
        let expenses = vec![expense(1, 40.0, None)];
        let statuses = SummaryAggregator::budget_statuses(&session, &budgets, &expenses);

        assert_eq!(statuses[0].total_expenses, 0.0);
    }

    #[test]
    fn statuses_keep_input_order() {
        let session = Session::new(USER);
        let budgets = vec![
            budget(1, 100.0, Some((1, "A"))),
            budget(2, 100.0, Some((2, "B"))),
        ];
        let expenses = vec![expense(1, 10.0, Some((1, "A"))), expense(2, 80.0, Some((2, "B")))];
        let statuses = SummaryAggregator::budget_statuses(&session, &budgets, &expenses);
        let ids: Vec<i64> = statuses.iter().map(|status| status.budget.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);

        let alerts = SummaryAggregator::alerts_from_statuses(&session, &statuses);
        assert_eq!(alerts[0].budget_id.get(), 2);
    }

    #[test]
    fn other_users_records_are_ignored() {
        let session = Session::new(USER);
        let mut foreign = expense(9, 500.0, Some((7, "Food")));
        foreign.owner_user_id = UserId(2);
        let expenses = vec![expense(1, 20.0, Some((7, "Food"))), foreign];
        let totals = SummaryAggregator::totals(&session, &[budget(1, 100.0, None)], &expenses);

        assert_eq!(totals.total_spent, 20.0);
    }

    #[test]
    fn breakdown_groups_by_name_with_uncategorized_bucket() {
        let session = Session::new(USER);
        let expenses = vec![
            expense(1, 30.0, Some((1, "Food"))),
            expense(2, 10.0, None),
            expense(3, 20.0, Some((2, "Food"))),
            expense(4, 40.0, Some((3, "Rent"))),
        ];
        let breakdown = SummaryAggregator::category_breakdown(&session, &expenses);

        let names: Vec<_> = breakdown.iter().map(|e| e.category_name.as_str()).collect();
        assert_eq!(names, vec!["Food", "Uncategorized", "Rent"]);
        assert_eq!(breakdown[0].total_amount, 50.0);
        assert_eq!(breakdown[1].color, "#00C49F");
        let sum: f64 = breakdown.iter().map(|e| e.percentage_of_total).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn breakdown_prefers_category_color() {
        let session = Session::new(USER);
        let expenses = vec![Expense::new(1, "Bus", 5.0, date(3), USER)
            .with_category(CategoryRef::new(4, "Transport").with_color("#123456"))];
        let breakdown = SummaryAggregator::category_breakdown(&session, &expenses);
        assert_eq!(breakdown[0].color, "#123456");
    }

    #[test]
    fn breakdown_color_comes_from_the_opening_expense() {
        let session = Session::new(USER);
        let expenses = vec![
            expense(1, 5.0, Some((4, "Transport"))),
            Expense::new(2, "Taxi", 9.0, date(4), USER)
                .with_category(CategoryRef::new(4, "Transport").with_color("#123456")),
        ];
        let breakdown = SummaryAggregator::category_breakdown(&session, &expenses);

        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].color, "#0088FE");
        assert_eq!(breakdown[0].total_amount, 14.0);
    }

    #[test]
    fn breakdown_of_zero_spend_reports_zero_percent() {
        let session = Session::new(USER);
        let expenses = vec![expense(1, 0.0, Some((1, "Food")))];
        let breakdown = SummaryAggregator::category_breakdown(&session, &expenses);
        assert_eq!(breakdown[0].percentage_of_total, 0.0);
    }

    #[test]
    fn alerts_classify_and_drop_idle_budgets() {
        let session = Session::new(USER);
        let budgets = vec![
            budget(1, 100.0, Some((1, "Idle"))),
            budget(2, 100.0, Some((2, "Warn"))),
            budget(3, 100.0, Some((3, "Danger"))),
            budget(4, 1000.0, Some((4, "Good"))),
        ];
        let expenses = vec![
            expense(1, 75.0, Some((2, "Warn"))),
            expense(2, 90.0, Some((3, "Danger"))),
            expense(3, 749.0, Some((4, "Good"))),
        ];
        let alerts = SummaryAggregator::budget_alerts(&session, &budgets, &expenses);

        let summary: Vec<_> = alerts
            .iter()
            .map(|alert| (alert.category.as_str(), alert.status))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Danger", AlertStatus::Danger),
                ("Warn", AlertStatus::Warning),
                ("Good", AlertStatus::Good),
            ]
        );
    }

    #[test]
    fn totals_guard_zero_budget() {
        let session = Session::new(USER);
        let totals = SummaryAggregator::totals(&session, &[], &[expense(1, 12.0, None)]);
        assert_eq!(totals.savings_rate, 0.0);
        assert_eq!(totals.remaining, -12.0);

        let totals = SummaryAggregator::totals(
            &session,
            &[budget(1, 200.0, None)],
            &[expense(1, 50.0, None)],
        );
        assert!((totals.savings_rate - 75.0).abs() < 1e-9);
    }

    #[test]
    fn overview_counts_over_budget_entries() {
        let session = Session::new(USER);
        let budgets = vec![budget(1, 50.0, Some((1, "A"))), budget(2, 50.0, Some((2, "B")))];
        let expenses = vec![expense(1, 60.0, Some((1, "A")))];
        let statuses = SummaryAggregator::budget_statuses(&session, &budgets, &expenses);
        let overview = SummaryAggregator::budget_overview(&statuses);

        assert_eq!(overview.total_budget_amount, 100.0);
        assert_eq!(overview.total_spent_amount, 60.0);
        assert_eq!(overview.over_budget_count, 1);
    }

    #[test]
    fn backend_statuses_take_precedence() {
        let session = Session::new(USER);
        let budgets = vec![budget(1, 100.0, Some((1, "A")))];
        let mut foreign = BudgetStatus::from_parts(budget(2, 100.0, Some((2, "B"))), 10.0);
        foreign.budget.owner_user_id = UserId(2);
        let backend = vec![
            BudgetStatus::from_parts(budget(1, 100.0, Some((1, "A"))), 42.0),
            foreign,
        ];

        let (statuses, source) = SummaryAggregator::resolve_budget_statuses(
            &session,
            Some(backend.as_slice()),
            &budgets,
            &[],
        );
        assert_eq!(source, StatusSource::Backend);
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].total_expenses, 42.0);

        let (local, source) =
            SummaryAggregator::resolve_budget_statuses(&session, None, &budgets, &[]);
        assert_eq!(source, StatusSource::Local);
        assert_eq!(local[0].total_expenses, 0.0);
    }

    #[test]
    fn alerts_reach_danger_at_exactly_ninety_percent_of_cents() {
        let session = Session::new(USER);
        let budgets = vec![budget(1, 4.50, Some((1, "Snacks")))];
        let expenses = vec![expense(1, 4.05, Some((1, "Snacks")))];
        let alerts = SummaryAggregator::budget_alerts(&session, &budgets, &expenses);

        assert_eq!(alerts[0].status, AlertStatus::Danger);
        assert_eq!(alerts[0].rounded_percentage(), 90);
    }
}
