//! Session-scoped façade over the core services, one method per page.

use serde::Serialize;

use finview_config::Config;
use finview_core::{
    CategoryTree, Clock, DashboardService, ExpansionState, ExpenseFilter, ExpenseService,
    FinanceData, Intake, ReportService, SummaryAggregator,
};
use finview_domain::{
    AlertThresholds, BudgetOverview, BudgetStatus, CategoryReportEntry, CategoryRow,
    CategoryStats, DashboardView, DisplayPreferences, Expense, ExpenseStats,
    PaymentMethodReportEntry, Session, StatusSource, TrendPoint, UserId,
};

use crate::{errors::Result, snapshot::Snapshot};

/// Session for `user` (or the configured default) carrying the config's display knobs.
pub fn session_from_config(config: &Config, user: Option<i64>) -> Session {
    let preferences = DisplayPreferences {
        alert_thresholds: AlertThresholds {
            warning: config.warning_threshold,
            danger: config.danger_threshold,
        },
        palette: config.palette.clone(),
        recent_expense_limit: config.recent_expense_limit,
        trend_months: config.trend_months,
        trend_weeks: config.trend_weeks,
    };
    Session::new(UserId(user.unwrap_or(config.default_user_id))).with_preferences(preferences)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetsView {
    pub source: StatusSource,
    pub overview: BudgetOverview,
    pub statuses: Vec<BudgetStatus>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesView {
    pub stats: CategoryStats,
    pub levels: usize,
    pub rows: Vec<CategoryRow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensesView {
    pub stats: ExpenseStats,
    pub expenses: Vec<Expense>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportsView {
    pub monthly_trend: Vec<TrendPoint>,
    pub weekly_trend: Vec<TrendPoint>,
    pub by_category: Vec<CategoryReportEntry>,
    pub by_payment_method: Vec<PaymentMethodReportEntry>,
}

/// Validated data for one session plus the clock that anchors every
/// date-relative view.
pub struct ViewModelEngine {
    session: Session,
    clock: Box<dyn Clock>,
    data: FinanceData,
}

impl ViewModelEngine {
    pub fn load(session: Session, clock: Box<dyn Clock>, snapshot: &Snapshot) -> Result<Self> {
        let data = Intake::load(&session, snapshot.raw(), clock.today())?;
        Ok(Self {
            session,
            clock,
            data,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn categories(&self) -> &CategoryTree {
        &self.data.categories
    }

    pub fn dashboard(&self) -> DashboardView {
        DashboardService::build(&self.session, self.clock.as_ref(), &self.data)
    }

    /// Statuses in budget input order. Inactive budgets are listed only when
    /// `include_inactive` is set; the overview covers the listed entries.
    pub fn budgets_view(&self, include_inactive: bool) -> BudgetsView {
        let (mut statuses, source) = SummaryAggregator::resolve_budget_statuses(
            &self.session,
            self.data.backend_statuses.as_deref(),
            &self.data.budgets,
            &self.data.expenses,
        );
        if !include_inactive {
            statuses.retain(|status| status.budget.active);
        }
        BudgetsView {
            source,
            overview: SummaryAggregator::budget_overview(&statuses),
            statuses,
        }
    }

    pub fn categories_view(&self, expansion: &ExpansionState) -> CategoriesView {
        let tree = &self.data.categories;
        CategoriesView {
            stats: tree.stats(),
            levels: tree.count_levels(),
            rows: tree.rows(expansion),
        }
    }

    /// Filtered list plus statistics over the filtered entries.
    pub fn expenses_view(&self, filter: &ExpenseFilter) -> ExpensesView {
        let expenses: Vec<Expense> =
            SummaryAggregator::filter_expenses(&self.session, &self.data.expenses, filter)
                .into_iter()
                .cloned()
                .collect();
        ExpensesView {
            stats: ExpenseService::stats(&self.session, &expenses),
            expenses,
        }
    }

    /// Trends anchored at today; rankings over the filter's date range.
    pub fn reports_view(&self, filter: &ExpenseFilter) -> ReportsView {
        let today = self.clock.today();
        let prefs = &self.session.preferences;
        let expenses = &self.data.expenses;
        ReportsView {
            monthly_trend: ReportService::monthly_trend(
                &self.session,
                &self.data.budgets,
                expenses,
                prefs.trend_months,
                today,
            ),
            weekly_trend: ReportService::weekly_trend(
                &self.session,
                expenses,
                prefs.trend_weeks,
                today,
            ),
            by_category: ReportService::category_report(
                &self.session,
                expenses,
                filter.date_range,
            ),
            by_payment_method: ReportService::payment_method_report(
                &self.session,
                expenses,
                filter.date_range,
            ),
        }
    }
}
