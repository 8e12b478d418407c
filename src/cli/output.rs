//! Plain-text rendering of the page views. Colors are dropped automatically
//! when `colored` is overridden off.

use std::fmt;

use colored::{Color, Colorize};

use finview_domain::{AlertStatus, DashboardView, ProgressTone, TrendPoint};

use crate::engine::{BudgetsView, CategoriesView, ExpensesView, ReportsView};

pub fn amount(value: f64, currency: &str) -> String {
    format!("{value:.2} {currency}")
}

fn header(title: &str) -> String {
    format!("{}\n{}", title.bold().color(Color::BrightBlue), "─".repeat(40))
}

fn alert_color(status: AlertStatus) -> Color {
    match status {
        AlertStatus::Good => Color::Green,
        AlertStatus::Warning => Color::Yellow,
        AlertStatus::Danger => Color::Red,
    }
}

fn tone_color(tone: ProgressTone) -> Color {
    match tone {
        ProgressTone::Success => Color::Green,
        ProgressTone::Warning => Color::Yellow,
        ProgressTone::Error => Color::Red,
    }
}

/// Dashboard page: totals, alerts, breakdown, recent expenses and trend.
pub struct DashboardPage<'a> {
    pub view: &'a DashboardView,
    pub currency: &'a str,
}

impl fmt::Display for DashboardPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (view, currency) = (self.view, self.currency);
        let totals = &view.totals;
        writeln!(f, "{}", header("Dashboard"))?;
        writeln!(f, "Total budget : {}", amount(totals.total_budget, currency))?;
        writeln!(f, "Total spent  : {}", amount(totals.total_spent, currency))?;
        let remaining = amount(totals.remaining, currency);
        let remaining = if totals.remaining < 0.0 {
            remaining.red()
        } else {
            remaining.green()
        };
        writeln!(f, "Remaining    : {remaining}")?;
        writeln!(f, "Savings rate : {:.1}%", totals.savings_rate)?;

        writeln!(f, "\n{}", header("Budget alerts"))?;
        if view.budget_alerts.is_empty() {
            writeln!(f, "No active alerts")?;
        }
        for alert in &view.budget_alerts {
            let label = format!("[{}]", alert.status).color(alert_color(alert.status));
            writeln!(
                f,
                "{label} {}: {}% of budget used",
                alert.category,
                alert.rounded_percentage()
            )?;
        }

        writeln!(f, "\n{}", header("Spending by category"))?;
        for entry in &view.category_breakdown {
            writeln!(
                f,
                "{:<20} {:>14} {:>6.1}%",
                entry.category_name,
                amount(entry.total_amount, currency),
                entry.percentage_of_total
            )?;
        }

        writeln!(f, "\n{}", header("Recent expenses"))?;
        for expense in &view.recent_expenses {
            writeln!(
                f,
                "{} {:<24} {:<16} {:>14}",
                expense.date,
                expense.description,
                expense.category,
                amount(expense.amount, currency)
            )?;
        }

        writeln!(f, "\n{}", header("Monthly trend"))?;
        trend_lines(f, &view.monthly_trend, currency)
    }
}

pub struct BudgetsPage<'a> {
    pub view: &'a BudgetsView,
    pub currency: &'a str,
}

impl fmt::Display for BudgetsPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (view, currency) = (self.view, self.currency);
        writeln!(f, "{}", header(&format!("Budgets ({} figures)", view.source)))?;
        let overview = &view.overview;
        writeln!(
            f,
            "Budgeted {} | Spent {} | Over budget: {}",
            amount(overview.total_budget_amount, currency),
            amount(overview.total_spent_amount, currency),
            overview.over_budget_count
        )?;
        for status in &view.statuses {
            let percent =
                format!("{:>6.1}%", status.percentage_used).color(tone_color(status.tone()));
            let flag = if status.is_over_budget {
                " OVER".red().bold().to_string()
            } else {
                String::new()
            };
            let inactive = if status.budget.active { "" } else { " (inactive)" };
            writeln!(
                f,
                "{:<20} {:>14} of {:>14} {percent} ({} to {}){flag}{inactive}",
                status.budget.name,
                amount(status.total_expenses, currency),
                amount(status.budget.amount, currency),
                status.budget.period.start_date,
                status.budget.period.end_date,
            )?;
        }
        Ok(())
    }
}

pub struct CategoriesPage<'a> {
    pub view: &'a CategoriesView,
    pub currency: &'a str,
}

impl fmt::Display for CategoriesPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (view, currency) = (self.view, self.currency);
        let stats = &view.stats;
        writeln!(f, "{}", header("Categories"))?;
        writeln!(
            f,
            "{} categories, {} active, {} levels, budgeted {}",
            stats.total_categories,
            stats.active_categories,
            view.levels,
            amount(stats.total_budget, currency)
        )?;
        for row in &view.rows {
            let marker = match (row.has_children, row.is_expanded) {
                (false, _) => " ",
                (true, true) => "▾",
                (true, false) => "▸",
            };
            let name = if row.is_active {
                row.name.normal()
            } else {
                row.name.dimmed()
            };
            writeln!(
                f,
                "{}{marker} {name} {} ({:.1}%)",
                "  ".repeat(row.level),
                amount(row.budget_amount, currency),
                row.budget_share
            )?;
        }
        Ok(())
    }
}

pub struct ExpensesPage<'a> {
    pub view: &'a ExpensesView,
    pub currency: &'a str,
}

impl fmt::Display for ExpensesPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (view, currency) = (self.view, self.currency);
        let stats = &view.stats;
        writeln!(f, "{}", header("Expenses"))?;
        writeln!(
            f,
            "{} expenses, total {}, average {}, {} recurring",
            stats.count,
            amount(stats.total, currency),
            amount(stats.average, currency),
            stats.recurring_count
        )?;
        for expense in &view.expenses {
            let method = expense
                .payment_method
                .map(|method| method.to_string())
                .unwrap_or_default();
            writeln!(
                f,
                "{} {:<24} {:<16} {:<14} {:>14}",
                expense.date,
                expense.description,
                expense.category_name().unwrap_or("-"),
                method,
                amount(expense.amount, currency)
            )?;
        }
        Ok(())
    }
}

pub struct ReportsPage<'a> {
    pub view: &'a ReportsView,
    pub currency: &'a str,
}

impl fmt::Display for ReportsPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (view, currency) = (self.view, self.currency);
        writeln!(f, "{}", header("Monthly trend"))?;
        trend_lines(f, &view.monthly_trend, currency)?;
        writeln!(f, "\n{}", header("Weekly trend"))?;
        trend_lines(f, &view.weekly_trend, currency)?;

        writeln!(f, "\n{}", header("By category"))?;
        for entry in &view.by_category {
            writeln!(
                f,
                "{:<20} {:>14} {:>4} items {:>6.1}%",
                entry.category_name,
                amount(entry.amount, currency),
                entry.expense_count,
                entry.percentage
            )?;
        }

        writeln!(f, "\n{}", header("By payment method"))?;
        for entry in &view.by_payment_method {
            writeln!(
                f,
                "{:<20} {:>14} {:>4} items {:>6.1}%",
                entry.payment_method.to_string(),
                amount(entry.amount, currency),
                entry.expense_count,
                entry.percentage
            )?;
        }
        Ok(())
    }
}

/// Renders a page without its trailing newline.
pub fn page(page: impl fmt::Display) -> String {
    page.to_string().trim_end().to_string()
}

fn trend_lines(f: &mut fmt::Formatter<'_>, points: &[TrendPoint], currency: &str) -> fmt::Result {
    for point in points {
        let budget = point
            .budget
            .map(|budget| format!(" / budget {}", amount(budget, currency)))
            .unwrap_or_default();
        writeln!(
            f,
            "{:<10} {:>14} ({} items){budget}",
            point.label,
            amount(point.spent, currency),
            point.expense_count
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use finview_domain::{BudgetOverview, StatusSource};

    #[test]
    fn amounts_use_two_decimals() {
        assert_eq!(amount(12.5, "EUR"), "12.50 EUR");
    }

    #[test]
    fn empty_budget_view_still_prints_overview() {
        colored::control::set_override(false);
        let view = BudgetsView {
            source: StatusSource::Local,
            overview: BudgetOverview::default(),
            statuses: Vec::new(),
        };
        let text = page(BudgetsPage {
            view: &view,
            currency: "USD",
        });
        assert!(text.contains("Budgets (local figures)"));
        assert!(text.ends_with("Over budget: 0"));
    }

    #[test]
    fn trend_page_lists_every_bucket() {
        colored::control::set_override(false);
        let point = |label: &str, spent: f64| TrendPoint {
            label: label.into(),
            start: chrono::NaiveDate::MIN,
            end: chrono::NaiveDate::MIN,
            budget: None,
            spent,
            expense_count: 1,
        };
        let view = ReportsView {
            monthly_trend: vec![point("Mar 2025", 12.0)],
            weekly_trend: vec![point("Week 1", 3.0), point("Week 2", 9.0)],
            by_category: Vec::new(),
            by_payment_method: Vec::new(),
        };
        let text = page(ReportsPage {
            view: &view,
            currency: "EUR",
        });
        assert!(text.contains("Mar 2025"));
        assert!(text.contains("Week 2"));
        assert!(text.contains("9.00 EUR"));
        assert!(text.ends_with(&format!("By payment method\n{}", "─".repeat(40))));
    }
}
