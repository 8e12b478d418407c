//! Canonical date ranges for each budget type.

use chrono::{Datelike, Duration, NaiveDate};

use finview_domain::{BudgetType, TimePeriod};

/// Computes budget periods from a budget type and a reference date.
pub struct BudgetPeriodResolver;

impl BudgetPeriodResolver {
    /// Returns the derived period for `budget_type`, or `current` for `Custom`.
    ///
    /// A `Custom` budget with nothing to preserve falls back to the monthly range.
    pub fn resolve(
        budget_type: BudgetType,
        reference: NaiveDate,
        current: Option<TimePeriod>,
    ) -> TimePeriod {
        match Self::derived(budget_type, reference) {
            Some(period) => period,
            None => current.unwrap_or_else(|| Self::default_period(reference)),
        }
    }

    /// Formula-derived period; `None` for `Custom`, whose dates belong to the caller.
    pub fn derived(budget_type: BudgetType, reference: NaiveDate) -> Option<TimePeriod> {
        let period = match budget_type {
            BudgetType::Daily => TimePeriod::new(reference, reference),
            BudgetType::Weekly => {
                let start = week_start(reference);
                TimePeriod::new(start, start + Duration::days(6))
            }
            BudgetType::Monthly => month_bounds(reference.year(), reference.month(), reference),
            BudgetType::Quarterly => {
                let first_month = (reference.month0() / 3) * 3 + 1;
                let start = month_bounds(reference.year(), first_month, reference).start_date;
                let end = month_bounds(reference.year(), first_month + 2, reference).end_date;
                TimePeriod::new(start, end)
            }
            BudgetType::Yearly => {
                let start = month_bounds(reference.year(), 1, reference).start_date;
                let end = month_bounds(reference.year(), 12, reference).end_date;
                TimePeriod::new(start, end)
            }
            BudgetType::Custom => return None,
        };
        Some(period)
    }

    /// Period pre-filled into a new budget form.
    pub fn default_period(reference: NaiveDate) -> TimePeriod {
        month_bounds(reference.year(), reference.month(), reference)
    }

    /// Resync rule for the edit form: switching to `Custom` keeps the dates
    /// already set, any other type recomputes them.
    pub fn on_type_changed(
        current: TimePeriod,
        new_type: BudgetType,
        reference: NaiveDate,
    ) -> TimePeriod {
        let period = Self::resolve(new_type, reference, Some(current));
        tracing::debug!(
            budget_type = %new_type,
            start = %period.start_date,
            end = %period.end_date,
            "budget period resynced"
        );
        period
    }
}

/// Most recent Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Most recent Monday on or before `date`; the bucket start of weekly reports.
pub fn monday_week_start(date: NaiveDate) -> NaiveDate {
    let offset = Duration::days(date.weekday().num_days_from_monday() as i64);
    date.checked_sub_signed(offset).unwrap_or(date)
}

/// First and last day of `year`/`month`; `fallback` only guards chrono's representable range.
pub fn month_bounds(year: i32, month: u32, fallback: NaiveDate) -> TimePeriod {
    let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(fallback);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let end = next.and_then(|first| first.pred_opt()).unwrap_or(fallback);
    TimePeriod::new(start, end)
}

/// Shifts a year/month pair by `months`, returning the first day of the result.
pub fn shift_month_start(date: NaiveDate, months: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}
