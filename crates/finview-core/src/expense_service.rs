use std::cmp::Reverse;

use finview_domain::{Expense, ExpenseStats, RecentExpense, Session, UNCATEGORIZED_LABEL};

use crate::summary_aggregator::owned;

/// Figures shown around the expense list.
pub struct ExpenseService;

impl ExpenseService {
    pub fn stats(session: &Session, expenses: &[Expense]) -> ExpenseStats {
        let mut stats = ExpenseStats::default();
        for expense in owned(session, expenses) {
            stats.count += 1;
            stats.total += expense.amount;
            if expense.is_recurring {
                stats.recurring_count += 1;
            }
        }
        if stats.count > 0 {
            stats.average = stats.total / stats.count as f64;
        }
        stats
    }

    /// The `limit` most recent expenses, newest first. Same-day entries keep
    /// their input order.
    pub fn recent(session: &Session, expenses: &[Expense], limit: usize) -> Vec<RecentExpense> {
        let mut visible: Vec<&Expense> = owned(session, expenses).collect();
        visible.sort_by_key(|expense| Reverse(expense.date));
        visible
            .into_iter()
            .take(limit)
            .map(|expense| RecentExpense {
                id: expense.id,
                description: expense.description.clone(),
                amount: expense.amount,
                date: expense.date,
                category: expense
                    .category_name()
                    .unwrap_or(UNCATEGORIZED_LABEL)
                    .to_string(),
            })
            .collect()
    }
}
