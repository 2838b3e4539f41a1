use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{
    page_shell, use_user_scope, BudgetPredictionPanel, BudgetRecommendationsPanel,
    MonthlyLimitPanel, StatCard,
};
use crate::format::format_amount;
use crate::insights::{total_for_kind, TrendSummary};
use crate::models::{AnalyticsSnapshot, PeriodicTrends, TrendPeriod, TxnType};
use crate::tasks::RequestGeneration;

fn trend_cards(summary: &TrendSummary) -> Html {
    html! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
            <StatCard
                title="Highest spend today"
                value={format_amount(summary.highest.total)}
                caption={AttrValue::from(summary.highest.category.clone())}
                icon="🔺"
                accent="text-red-600"
            />
            <StatCard
                title="Lowest spend today"
                value={format_amount(summary.lowest.total)}
                caption={AttrValue::from(summary.lowest.category.clone())}
                icon="🔻"
                accent="text-green-600"
            />
            <StatCard
                title="Most frequent category"
                value={summary.most_frequent_category.clone()}
                icon="🔁"
            />
        </div>
    }
}

fn period_totals(trends: &PeriodicTrends) -> Html {
    html! {
        <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-6">
            { for TrendPeriod::ALL.into_iter().map(|period| {
                let rows = trends.period(period);
                let income = total_for_kind(rows, TxnType::Income);
                let expense = total_for_kind(rows, TxnType::Expense);
                html! {
                    <div class="bg-white rounded-2xl shadow-md p-5 border border-gray-100">
                        <h3 class="text-sm font-semibold text-gray-500 uppercase mb-3">
                            { format!("{} This {}", period.icon(), period.label()) }
                        </h3>
                        <p class="text-green-600 font-bold">{ format!("Income: {}", format_amount(income)) }</p>
                        <p class="text-red-600 font-bold">{ format!("Expense: {}", format_amount(expense)) }</p>
                    </div>
                }
            }) }
        </div>
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let scope = use_user_scope();
    let trend = use_state(|| None::<TrendSummary>);
    let trends = use_state(|| None::<PeriodicTrends>);
    let snapshot_generation = use_state(RequestGeneration::new);
    let trends_generation = use_state(RequestGeneration::new);

    {
        let trend = trend.clone();
        let trends = trends.clone();
        let snapshot_generation = (*snapshot_generation).clone();
        let trends_generation = (*trends_generation).clone();
        let client = scope.client.clone();
        use_effect_with_deps(
            move |user_id: &Option<String>| {
                if let Some(user_id) = user_id.clone() {
                    let snapshot_ticket = snapshot_generation.issue();
                    let trends_ticket = trends_generation.issue();
                    let trends_client = client.clone();
                    let trends_user = user_id.clone();
                    spawn_local(async move {
                        match client.analytics_all(&user_id).await {
                            Ok(snapshot) if snapshot_ticket.is_current() => {
                                trend.set(Some(daily_expense_trend(&snapshot)));
                            }
                            Ok(_) => {}
                            Err(err) => tracing::error!(error = %err, "failed to load analytics"),
                        }
                    });
                    spawn_local(async move {
                        match trends_client.analytics_trends(&trends_user).await {
                            Ok(found) if trends_ticket.is_current() => trends.set(Some(found)),
                            Ok(_) => {}
                            Err(err) => tracing::error!(error = %err, "failed to load trends"),
                        }
                    });
                }
                move || {
                    snapshot_generation.invalidate();
                    trends_generation.invalidate();
                }
            },
            scope.user_id.clone(),
        );
    }

    let content = html! {
        <>
            <section class="space-y-4">
                <h2 class="text-2xl font-bold text-gray-800">{"📌 Today's Spending"}</h2>
                { trend_cards(&(*trend).clone().unwrap_or_else(|| TrendSummary::from_rows(&[]))) }
            </section>
            <section class="space-y-4">
                <h2 class="text-2xl font-bold text-gray-800">{"📈 Income vs Expense"}</h2>
                { period_totals(&(*trends).clone().unwrap_or_default()) }
            </section>
            <section class="bg-white/80 rounded-2xl shadow-lg p-6">
                <BudgetPredictionPanel />
            </section>
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-8">
                <section class="bg-white/80 rounded-2xl shadow-lg p-6"><BudgetRecommendationsPanel /></section>
                <section class="bg-white/80 rounded-2xl shadow-lg p-6"><MonthlyLimitPanel /></section>
            </div>
        </>
    };

    page_shell("Dashboard", "Your money at a glance", content)
}

fn daily_expense_trend(snapshot: &AnalyticsSnapshot) -> TrendSummary {
    TrendSummary::from_rows(&snapshot.only(TxnType::Expense).date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryTotal;

    fn row(category: &str, total: f64, kind: TxnType) -> CategoryTotal {
        CategoryTotal {
            category: category.to_string(),
            total,
            kind,
        }
    }

    #[test]
    fn daily_trend_ignores_income() {
        let snapshot = AnalyticsSnapshot {
            date: vec![
                row("Salary", 50_000.0, TxnType::Income),
                row("Food", 300.0, TxnType::Expense),
                row("Travel", 120.0, TxnType::Expense),
            ],
            ..AnalyticsSnapshot::default()
        };
        let trend = daily_expense_trend(&snapshot);
        assert_eq!(trend.highest.category, "Food");
        assert_eq!(trend.lowest.category, "Travel");
    }

    #[test]
    fn no_expenses_give_placeholders() {
        let trend = daily_expense_trend(&AnalyticsSnapshot::default());
        assert_eq!(trend.most_frequent_category, "-");
        assert_eq!(trend.highest.total, 0.0);
    }
}
