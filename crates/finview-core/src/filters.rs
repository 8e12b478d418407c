//! Expense list filters and the quick date presets of the expenses view.

use chrono::{Datelike, Duration, NaiveDate};

use finview_domain::{BelongsToCategory, CategoryId, DateRange, Expense, TimePeriod};

use crate::period_resolver::month_bounds;

/// Predicates applied to an expense list; unset predicates match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    pub search_term: Option<String>,
    pub category_id: Option<CategoryId>,
    pub date_range: Option<DateRange>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank terms are ignored.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search_term = (!term.trim().is_empty()).then_some(term);
        self
    }

    pub fn category(mut self, id: CategoryId) -> Self {
        self.category_id = Some(id);
        self
    }

    pub fn within(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_preset(mut self, preset: DatePreset, reference: NaiveDate) -> Self {
        self.date_range = preset.range(reference);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search_term.is_none() && self.category_id.is_none() && self.date_range.is_none()
    }

    /// All set predicates must hold.
    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(term) = &self.search_term {
            let needle = term.to_lowercase();
            let in_description = expense.description.to_lowercase().contains(&needle);
            let in_category = expense
                .category_name()
                .is_some_and(|name| name.to_lowercase().contains(&needle));
            if !in_description && !in_category {
                return false;
            }
        }
        if let Some(category_id) = self.category_id {
            if expense.category_id() != Some(category_id) {
                return false;
            }
        }
        if let Some(range) = &self.date_range {
            if !range.contains(expense.date) {
                return false;
            }
        }
        true
    }
}

/// Quick date filters offered above the expense list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePreset {
    All,
    Today,
    LastSevenDays,
    #[default]
    ThisMonth,
}

impl DatePreset {
    /// Inclusive range for the preset; `None` means no date restriction.
    ///
    /// `LastSevenDays` has no upper bound, so future-dated entries stay visible.
    pub fn range(self, reference: NaiveDate) -> Option<DateRange> {
        match self {
            DatePreset::All => None,
            DatePreset::Today => Some(DateRange::day(reference)),
            DatePreset::LastSevenDays => Some(DateRange {
                start: reference - Duration::days(7),
                end: NaiveDate::MAX,
            }),
            DatePreset::ThisMonth => {
                let TimePeriod {
                    start_date,
                    end_date,
                } = month_bounds(reference.year(), reference.month(), reference);
                Some(DateRange {
                    start: start_date,
                    end: end_date,
                })
            }
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(DatePreset::All),
            "today" => Some(DatePreset::Today),
            "week" | "last7" => Some(DatePreset::LastSevenDays),
            "month" => Some(DatePreset::ThisMonth),
            _ => None,
        }
    }
}
