use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::snapshot_or_empty;
use crate::components::{
    page_shell, use_user_scope, BudgetPredictionPanel, BudgetRecommendationsPanel, StatCard,
};
use crate::format::{format_amount, format_whole};
use crate::insights::{
    average_total, max_total, sorted_by_total, sum_totals, top_categories, TOP_CATEGORIES,
};
use crate::models::{AnalyticsSnapshot, CategoryTotal, Period, TxnType};
use crate::tasks::RequestGeneration;

#[derive(Properties, PartialEq)]
pub struct KindAnalysisProps {
    pub kind: TxnType,
}

fn titles(kind: TxnType) -> (&'static str, &'static str) {
    match kind {
        TxnType::Income => ("Income Analysis", "Where your money comes from"),
        TxnType::Expense => ("Expense Analysis", "Where your money goes"),
    }
}

fn category_bars(rows: &[CategoryTotal], kind: TxnType) -> Html {
    let largest = max_total(rows);
    let bar = match kind {
        TxnType::Income => "h-2 rounded-full bg-green-500",
        TxnType::Expense => "h-2 rounded-full bg-red-500",
    };
    html! {
        <div class="space-y-3">
            { for rows.iter().map(|row| {
                let width = if largest > 0.0 { row.total / largest * 100.0 } else { 0.0 };
                html! {
                    <div>
                        <div class="flex justify-between text-sm mb-1">
                            <span class="font-medium text-gray-700">{ row.category.clone() }</span>
                            <span class="text-gray-600">{ format_amount(row.total) }</span>
                        </div>
                        <div class="w-full bg-gray-100 rounded-full">
                            <div class={bar} style={format!("width: {:.1}%", width)}></div>
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}

#[function_component(KindAnalysisPage)]
pub fn kind_analysis_page(props: &KindAnalysisProps) -> Html {
    let kind = props.kind;
    let scope = use_user_scope();
    let snapshot = use_state(|| None::<AnalyticsSnapshot>);
    let selected = use_state(|| Period::Month);
    let generation = use_state(RequestGeneration::new);

    {
        let snapshot = snapshot.clone();
        let generation = (*generation).clone();
        let client = scope.client.clone();
        use_effect_with_deps(
            move |(user_id, kind): &(Option<String>, TxnType)| {
                if let Some(user_id) = user_id.clone() {
                    let kind = *kind;
                    let ticket = generation.issue();
                    spawn_local(async move {
                        let result = client.analytics_all(&user_id).await;
                        if ticket.is_current() {
                            snapshot.set(Some(snapshot_or_empty(result).only(kind)));
                        }
                    });
                }
                move || generation.invalidate()
            },
            (scope.user_id.clone(), kind),
        );
    }

    let (title, subtitle) = titles(kind);
    let Some(data) = (*snapshot).clone() else {
        return page_shell(
            title,
            subtitle,
            html! { <p class="text-center text-gray-500">{"Loading analytics..."}</p> },
        );
    };

    let period_cards = html! {
        <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-6">
            { for Period::ALL.into_iter().map(|period| {
                let rows = data.period(period);
                let selected = selected.clone();
                let ring = if *selected == period { "ring-2 ring-indigo-500 rounded-2xl" } else { "rounded-2xl" };
                html! {
                    <div class={classes!("cursor-pointer", ring)} onclick={Callback::from(move |_| selected.set(period))}>
                        <StatCard
                            title={period.label()}
                            value={format_whole(sum_totals(rows))}
                            caption={AttrValue::from(format!("{} entries", rows.len()))}
                            icon={period.icon()}
                        />
                    </div>
                }
            }) }
        </div>
    };

    let rows = data.period(*selected);
    let top = top_categories(rows, TOP_CATEGORIES);
    let all_sorted = sorted_by_total(rows);

    let breakdown = html! {
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-8">
            <div class="bg-white/80 rounded-2xl shadow-lg p-6 space-y-4">
                <h2 class="text-xl font-bold text-gray-800">{ format!("🏆 Top {} Categories ({})", TOP_CATEGORIES, selected.label()) }</h2>
                if top.is_empty() {
                    <p class="text-gray-500 italic">{"No data for this period."}</p>
                } else {
                    { category_bars(&top, kind) }
                }
            </div>
            <div class="bg-white/80 rounded-2xl shadow-lg p-6 space-y-4">
                <h2 class="text-xl font-bold text-gray-800">{"📋 All Categories"}</h2>
                <ul class="divide-y divide-gray-100">
                    { for all_sorted.iter().map(|row| html! {
                        <li class="flex justify-between py-2 text-sm">
                            <span class="text-gray-700">{ row.category.clone() }</span>
                            <span class="font-semibold">{ format_amount(row.total) }</span>
                        </li>
                    }) }
                </ul>
            </div>
        </div>
    };

    let quick_stats = html! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
            <StatCard title="Entries" value={rows.len().to_string()} icon="🧾" />
            <StatCard title="Average" value={format_whole(average_total(rows))} icon="➗" />
            <StatCard title="Largest" value={format_amount(max_total(rows))} icon="⬆️" />
        </div>
    };

    let content = html! {
        <>
            { period_cards }
            { breakdown }
            { quick_stats }
            if kind == TxnType::Expense {
                <section class="bg-white/80 rounded-2xl shadow-lg p-6"><BudgetPredictionPanel /></section>
                <section class="bg-white/80 rounded-2xl shadow-lg p-6"><BudgetRecommendationsPanel /></section>
            }
        </>
    };

    page_shell(title, subtitle, content)
}
