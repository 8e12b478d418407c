//! Period reports: month and week trend buckets, category and payment-method
//! rankings.

use chrono::{Datelike, Duration, NaiveDate};

use finview_domain::{
    percentage_of, Budget, CategoryId, CategoryReportEntry, DateRange, Expense, PaymentMethod,
    PaymentMethodReportEntry, Session, TrendPoint, MAX_TREND_MONTHS, MAX_TREND_WEEKS,
};

use crate::{
    period_resolver::{monday_week_start, month_bounds, shift_month_start},
    summary_aggregator::{descending, owned},
};

pub struct ReportService;

impl ReportService {
    /// `months` consecutive calendar months ending with the reference month,
    /// oldest first. Every bucket carries the summed amount of the user's budgets.
    /// At most [`MAX_TREND_MONTHS`] buckets are built.
    pub fn monthly_trend(
        session: &Session,
        budgets: &[Budget],
        expenses: &[Expense],
        months: u32,
        reference: NaiveDate,
    ) -> Vec<TrendPoint> {
        let months = Self::capped(months, MAX_TREND_MONTHS, "months");
        let total_budget: f64 = owned(session, budgets).map(|budget| budget.amount).sum();
        (0..months)
            .rev()
            .map(|offset| {
                let first = shift_month_start(reference, -(offset as i32));
                let bounds = month_bounds(first.year(), first.month(), first);
                let (spent, expense_count) =
                    Self::sum_between(session, expenses, bounds.start_date, bounds.end_date);
                TrendPoint {
                    label: first.format("%b %Y").to_string(),
                    start: bounds.start_date,
                    end: bounds.end_date,
                    budget: Some(total_budget),
                    spent,
                    expense_count,
                }
            })
            .collect()
    }

    /// `weeks` consecutive Monday-to-Sunday weeks ending with the week that
    /// contains `reference`, labelled "Week 1" (oldest) onward. At most
    /// [`MAX_TREND_WEEKS`] buckets are built; weeks before the calendar's
    /// first representable day are skipped.
    pub fn weekly_trend(
        session: &Session,
        expenses: &[Expense],
        weeks: u32,
        reference: NaiveDate,
    ) -> Vec<TrendPoint> {
        let weeks = Self::capped(weeks, MAX_TREND_WEEKS, "weeks");
        let current = monday_week_start(reference);
        (0..weeks)
            .rev()
            .filter_map(|offset| {
                let start = current.checked_sub_signed(Duration::weeks(offset as i64))?;
                let end = start
                    .checked_add_signed(Duration::days(6))
                    .unwrap_or(NaiveDate::MAX);
                let (spent, expense_count) = Self::sum_between(session, expenses, start, end);
                Some(TrendPoint {
                    label: format!("Week {}", weeks - offset),
                    start,
                    end,
                    budget: None,
                    spent,
                    expense_count,
                })
            })
            .collect()
    }

    /// Spending per category, largest first. Uncategorized expenses count
    /// towards the percentage base but get no row.
    pub fn category_report(
        session: &Session,
        expenses: &[Expense],
        range: Option<DateRange>,
    ) -> Vec<CategoryReportEntry> {
        let in_range = Self::in_range(session, expenses, range);
        let base: f64 = in_range.iter().map(|expense| expense.amount).sum();

        let mut groups: Vec<(CategoryId, String, f64, usize)> = Vec::new();
        for expense in &in_range {
            let Some(category) = expense.category.as_ref() else {
                continue;
            };
            match groups.iter_mut().find(|(id, ..)| *id == category.id) {
                Some((_, _, amount, count)) => {
                    *amount += expense.amount;
                    *count += 1;
                }
                None => groups.push((category.id, category.name.clone(), expense.amount, 1)),
            }
        }

        let mut report: Vec<CategoryReportEntry> = groups
            .into_iter()
            .map(|(_, category_name, amount, expense_count)| CategoryReportEntry {
                category_name,
                amount,
                expense_count,
                percentage: percentage_of(amount, base),
            })
            .collect();
        report.sort_by(|a, b| descending(a.amount, b.amount));
        report
    }

    /// Spending per payment method, largest first. Expenses without a method
    /// count towards the percentage base but get no row.
    pub fn payment_method_report(
        session: &Session,
        expenses: &[Expense],
        range: Option<DateRange>,
    ) -> Vec<PaymentMethodReportEntry> {
        let in_range = Self::in_range(session, expenses, range);
        let base: f64 = in_range.iter().map(|expense| expense.amount).sum();

        let mut report: Vec<PaymentMethodReportEntry> = PaymentMethod::ALL
            .iter()
            .filter_map(|method| {
                let matching: Vec<&&Expense> = in_range
                    .iter()
                    .filter(|expense| expense.payment_method == Some(*method))
                    .collect();
                if matching.is_empty() {
                    return None;
                }
                let amount: f64 = matching.iter().map(|expense| expense.amount).sum();
                Some(PaymentMethodReportEntry {
                    payment_method: *method,
                    amount,
                    expense_count: matching.len(),
                    percentage: percentage_of(amount, base),
                })
            })
            .collect();
        report.sort_by(|a, b| descending(a.amount, b.amount));
        report
    }

    fn capped(requested: u32, max: u32, unit: &str) -> u32 {
        if requested > max {
            tracing::warn!(requested, max, unit, "trend length capped");
        }
        requested.min(max)
    }

    fn in_range<'a>(
        session: &Session,
        expenses: &'a [Expense],
        range: Option<DateRange>,
    ) -> Vec<&'a Expense> {
        owned(session, expenses)
            .filter(|expense| range.map_or(true, |range| range.contains(expense.date)))
            .collect()
    }

    fn sum_between(
        session: &Session,
        expenses: &[Expense],
        start: NaiveDate,
        end: NaiveDate,
    ) -> (f64, usize) {
        owned(session, expenses)
            .filter(|expense| expense.date >= start && expense.date <= end)
            .fold((0.0, 0), |(sum, count), expense| (sum + expense.amount, count + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finview_domain::{BudgetType, CategoryRef, TimePeriod, UserId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(id: i64, amount: f64, on: NaiveDate) -> Expense {
        Expense::new(id, format!("Expense {id}"), amount, on, UserId(1))
    }

    #[test]
    fn monthly_trend_ends_at_reference_month_and_crosses_years() {
        let session = Session::new(UserId(1));
        let expenses = vec![
            expense(1, 10.0, date(2024, 11, 30)),
            expense(2, 20.0, date(2025, 1, 1)),
            expense(3, 5.0, date(2025, 1, 31)),
            expense(4, 99.0, date(2025, 2, 1)),
        ];
        let budgets = vec![Budget::new(
            1,
            "Everything",
            500.0,
            BudgetType::Monthly,
            TimePeriod::new(date(2025, 1, 1), date(2025, 1, 31)),
            UserId(1),
        )];
        let trend =
            ReportService::monthly_trend(&session, &budgets, &expenses, 3, date(2025, 1, 15));

        let labels: Vec<_> = trend.iter().map(|point| point.label.as_str()).collect();
        assert_eq!(labels, vec!["Nov 2024", "Dec 2024", "Jan 2025"]);
        assert_eq!(trend[0].spent, 10.0);
        assert_eq!(trend[1].expense_count, 0);
        assert_eq!(trend[2].spent, 25.0);
        assert_eq!(trend[2].end, date(2025, 1, 31));
        assert!(trend.iter().all(|point| point.budget == Some(500.0)));
    }

    #[test]
    fn weekly_trend_uses_monday_weeks() {
        let session = Session::new(UserId(1));
        // 2025-03-12 is a Wednesday; its week runs Monday 03-10 to Sunday 03-16.
        let expenses = vec![
            expense(1, 7.0, date(2025, 3, 8)),
            expense(2, 3.0, date(2025, 3, 9)),
            expense(3, 4.0, date(2025, 3, 10)),
            expense(4, 6.0, date(2025, 3, 16)),
        ];
        let trend = ReportService::weekly_trend(&session, &expenses, 2, date(2025, 3, 12));

        assert_eq!(trend[0].label, "Week 1");
        assert_eq!(trend[0].start, date(2025, 3, 3));
        assert_eq!(trend[0].end, date(2025, 3, 9));
        assert_eq!(trend[0].spent, 10.0);
        assert_eq!(trend[1].start, date(2025, 3, 10));
        assert_eq!(trend[1].end, date(2025, 3, 16));
        assert_eq!(trend[1].spent, 10.0);
        assert_eq!(trend[1].budget, None);
    }

    #[test]
    fn oversized_trend_lengths_are_capped() {
        let session = Session::new(UserId(1));
        let reference = date(2025, 3, 15);

        let weekly = ReportService::weekly_trend(&session, &[], 20_000_000, reference);
        assert_eq!(weekly.len(), MAX_TREND_WEEKS as usize);
        assert_eq!(weekly.last().map(|point| point.start), Some(date(2025, 3, 10)));

        let monthly = ReportService::monthly_trend(&session, &[], &[], u32::MAX, reference);
        assert_eq!(monthly.len(), MAX_TREND_MONTHS as usize);
        assert_eq!(monthly.last().map(|point| point.label.as_str()), Some("Mar 2025"));
    }

    #[test]
    fn weeks_before_the_calendar_start_are_skipped() {
        let session = Session::new(UserId(1));
        let trend = ReportService::weekly_trend(&session, &[], 3, NaiveDate::MIN);
        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].label, "Week 3");
    }

    #[test]
    fn category_report_ranks_and_keeps_uncategorized_in_base() {
        let session = Session::new(UserId(1));
        let on = date(2025, 5, 5);
        let expenses = vec![
            expense(1, 10.0, on).with_category(CategoryRef::new(1, "Food")),
            expense(2, 30.0, on).with_category(CategoryRef::new(2, "Rent")),
            expense(3, 60.0, on),
            expense(4, 99.0, date(2025, 6, 1)).with_category(CategoryRef::new(1, "Food")),
        ];
        let range = DateRange::new(date(2025, 5, 1), date(2025, 5, 31)).ok();
        let report = ReportService::category_report(&session, &expenses, range);

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].category_name, "Rent");
        assert!((report[0].percentage - 30.0).abs() < 1e-9);
        assert_eq!(report[1].expense_count, 1);
    }

    #[test]
    fn payment_method_report_skips_unknown_methods() {
        let session = Session::new(UserId(1));
        let on = date(2025, 5, 5);
        let expenses = vec![
            expense(1, 10.0, on).with_payment_method(PaymentMethod::Cash),
            expense(2, 30.0, on).with_payment_method(PaymentMethod::CreditCard),
            expense(3, 20.0, on).with_payment_method(PaymentMethod::CreditCard),
            expense(4, 40.0, on),
        ];
        let report = ReportService::payment_method_report(&session, &expenses, None);

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].payment_method, PaymentMethod::CreditCard);
        assert_eq!(report[0].expense_count, 2);
        assert!((report[0].percentage - 50.0).abs() < 1e-9);
        assert!((report[1].percentage - 10.0).abs() < 1e-9);
    }
}
