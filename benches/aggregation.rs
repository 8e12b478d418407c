use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use finview::{
    finview_core::{CategoryTree, ExpenseFilter, ReportService, SummaryAggregator},
    finview_domain::{
        Budget, BudgetType, CategoryPayload, CategoryRef, Expense, PaymentMethod, Session,
        TimePeriod, UserId,
    },
};

const USER: UserId = UserId(1);

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

fn sample_expenses(count: usize) -> Vec<Expense> {
    let categories: Vec<CategoryRef> = (1..=12)
        .map(|id| CategoryRef::new(id, format!("Category {id}")))
        .collect();
    (0..count)
        .map(|idx| {
            let date = start() + Duration::days((idx % 365) as i64);
            let expense = Expense::new(
                idx as i64,
                format!("Expense {idx}"),
                5.0 + (idx % 120) as f64,
                date,
                USER,
            )
            .with_payment_method(PaymentMethod::ALL[idx % PaymentMethod::ALL.len()]);
            if idx % 10 == 0 {
                expense
            } else {
                expense.with_category(categories[idx % categories.len()].clone())
            }
        })
        .collect()
}

fn sample_budgets() -> Vec<Budget> {
    let period = TimePeriod::new(start(), start() + Duration::days(364));
    (1..=12)
        .map(|id| {
            Budget::new(id, format!("Budget {id}"), 2_500.0, BudgetType::Yearly, period, USER)
                .with_category(CategoryRef::new(id, format!("Category {id}")))
        })
        .collect()
}

/// A forest of `roots` trees, each `depth` levels deep with `fanout` children per node.
fn sample_forest(roots: i64, depth: usize, fanout: i64) -> Vec<CategoryPayload> {
    fn build(next_id: &mut i64, depth: usize, fanout: i64) -> CategoryPayload {
        let id = *next_id;
        *next_id += 1;
        let children = if depth == 0 {
            Vec::new()
        } else {
            (0..fanout)
                .map(|_| build(next_id, depth - 1, fanout))
                .collect()
        };
        CategoryPayload::new(id, format!("Category {id}")).with_children(children)
    }
    let mut next_id = 1;
    (0..roots)
        .map(|_| build(&mut next_id, depth, fanout))
        .collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let session = Session::new(USER);
    let expenses = sample_expenses(black_box(10_000));
    let budgets = sample_budgets();

    c.bench_function("budget_alerts_10k", |b| {
        b.iter(|| SummaryAggregator::budget_alerts(&session, &budgets, &expenses))
    });

    c.bench_function("category_breakdown_10k", |b| {
        b.iter(|| SummaryAggregator::category_breakdown(&session, &expenses))
    });

    let filter = ExpenseFilter::new().search("expense 9");
    c.bench_function("filter_expenses_10k", |b| {
        b.iter(|| SummaryAggregator::filter_expenses(&session, &expenses, &filter).len())
    });

    c.bench_function("monthly_trend_12_10k", |b| {
        b.iter(|| {
            ReportService::monthly_trend(&session, &budgets, &expenses, 12, start() + Duration::days(364))
        })
    });
}

fn bench_category_tree(c: &mut Criterion) {
    let forest = sample_forest(4, 4, 4);

    c.bench_function("category_tree_build_1364", |b| {
        b.iter(|| CategoryTree::from_payloads(black_box(&forest)).expect("valid forest"))
    });

    let tree = CategoryTree::from_payloads(&forest).expect("valid forest");
    c.bench_function("category_tree_flatten_1364", |b| {
        b.iter(|| tree.flatten().len())
    });
}

criterion_group!(benches, bench_aggregation, bench_category_tree);
criterion_main!(benches);
