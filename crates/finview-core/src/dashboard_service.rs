use finview_domain::{DashboardView, Session};

use crate::{time::Clock, ExpenseService, FinanceData, ReportService, SummaryAggregator};

/// Assembles the dashboard view model in one pass.
pub struct DashboardService;

impl DashboardService {
    /// Alerts come from the backend status list when one was delivered.
    pub fn build(session: &Session, clock: &dyn Clock, data: &FinanceData) -> DashboardView {
        let today = clock.today();
        let prefs = &session.preferences;

        let (statuses, _) = SummaryAggregator::resolve_budget_statuses(
            session,
            data.backend_statuses.as_deref(),
            &data.budgets,
            &data.expenses,
        );
        let budget_alerts = SummaryAggregator::alerts_from_statuses(session, &statuses);

        let view = DashboardView {
            totals: SummaryAggregator::totals(session, &data.budgets, &data.expenses),
            recent_expenses: ExpenseService::recent(
                session,
                &data.expenses,
                prefs.recent_expense_limit,
            ),
            category_breakdown: SummaryAggregator::category_breakdown(session, &data.expenses),
            monthly_trend: ReportService::monthly_trend(
                session,
                &data.budgets,
                &data.expenses,
                prefs.trend_months,
                today,
            ),
            budget_alerts,
        };
        tracing::debug!(
            user = %session.user_id,
            %today,
            alerts = view.budget_alerts.len(),
            "dashboard assembled"
        );
        view
    }
}
