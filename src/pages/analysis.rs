use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::snapshot_or_empty;
use crate::components::{page_shell, use_user_scope, StatCard};
use crate::format::format_amount;
use crate::models::{
    AnalyticsFilter, AnalyticsSnapshot, CategoryTotal, FilteredRow, Period, TxnType,
};
use crate::tasks::RequestGeneration;

/// Client-side narrowing of a period's rows; `None` keeps everything.
fn rows_of_kind(rows: &[CategoryTotal], kind: Option<TxnType>) -> Vec<CategoryTotal> {
    rows.iter()
        .filter(|r| kind.map_or(true, |k| r.kind == k))
        .cloned()
        .collect()
}

fn kind_options(selected: Option<TxnType>) -> Html {
    html! {
        <>
            <option value="" selected={selected.is_none()}>{"All types"}</option>
            { for [TxnType::Income, TxnType::Expense].into_iter().map(|kind| html! {
                <option value={kind.as_str()} selected={selected == Some(kind)}>{ kind.as_str() }</option>
            }) }
        </>
    }
}

fn amount_class(kind: TxnType) -> &'static str {
    match kind {
        TxnType::Income => "px-4 py-2 text-right font-semibold text-green-600",
        TxnType::Expense => "px-4 py-2 text-right font-semibold text-red-600",
    }
}

fn summary_cards(snapshot: &AnalyticsSnapshot) -> Html {
    let summary = &snapshot.summary;
    let amount = |value: Option<f64>| format_amount(value.unwrap_or(0.0));
    html! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
            <StatCard title="Total Income" value={amount(summary.total_income)} icon="💰" accent="text-green-600" />
            <StatCard title="Total Expense" value={amount(summary.total_expense)} icon="💸" accent="text-red-600" />
            <StatCard title="Net Savings" value={amount(summary.net_savings)} icon="🏦" />
        </div>
    }
}

#[function_component(AnalysisPage)]
pub fn analysis_page() -> Html {
    let scope = use_user_scope();
    let snapshot = use_state(|| None::<AnalyticsSnapshot>);
    let period = use_state(|| Period::Month);
    let kind_filter = use_state(|| None::<TxnType>);
    let filter = use_state(AnalyticsFilter::default);
    let filtered = use_state(|| None::<Vec<FilteredRow>>);
    let snapshot_generation = use_state(RequestGeneration::new);
    let filter_generation = use_state(RequestGeneration::new);

    {
        let snapshot = snapshot.clone();
        let snapshot_generation = (*snapshot_generation).clone();
        let filter_generation = (*filter_generation).clone();
        let client = scope.client.clone();
        use_effect_with_deps(
            move |user_id: &Option<String>| {
                if let Some(user_id) = user_id.clone() {
                    let ticket = snapshot_generation.issue();
                    spawn_local(async move {
                        let result = client.analytics_all(&user_id).await;
                        if ticket.is_current() {
                            snapshot.set(Some(snapshot_or_empty(result)));
                        }
                    });
                }
                move || {
                    snapshot_generation.invalidate();
                    filter_generation.invalidate();
                }
            },
            scope.user_id.clone(),
        );
    }

    let on_filter_field = |apply: fn(&mut AnalyticsFilter, String)| {
        let filter = filter.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*filter).clone();
            apply(&mut next, input.value());
            filter.set(next);
        })
    };
    let on_filter_kind = {
        let filter = filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*filter).clone();
            next.kind = TxnType::parse(&select.value());
            filter.set(next);
        })
    };
    let on_apply = {
        let filter = filter.clone();
        let filtered = filtered.clone();
        let generation = (*filter_generation).clone();
        let client = scope.client.clone();
        let user_id = scope.user_id.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(user_id) = user_id.clone() else {
                return;
            };
            let query = (*filter).clone();
            let client = client.clone();
            let filtered = filtered.clone();
            let ticket = generation.issue();
            spawn_local(async move {
                match client.analytics_filter(&user_id, &query).await {
                    Ok(rows) if ticket.is_current() => {
                        tracing::debug!(count = rows.len(), "filtered analytics loaded");
                        filtered.set(Some(rows));
                    }
                    Ok(_) => {}
                    Err(err) => tracing::error!(error = %err, "filtered analytics failed"),
                }
            });
        })
    };
    let on_kind_filter = {
        let kind_filter = kind_filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            kind_filter.set(TxnType::parse(&select.value()));
        })
    };

    let Some(data) = (*snapshot).clone() else {
        return page_shell(
            "Overall Analysis",
            "Income and expenses across every period",
            html! { <p class="text-center text-gray-500">{"Loading analytics..."}</p> },
        );
    };
    let period_rows = rows_of_kind(data.period(*period), *kind_filter);

    let tabs = html! {
        <div class="flex flex-wrap gap-2 justify-center">
            { for Period::ALL.into_iter().map(|p| {
                let period = period.clone();
                let class = if *period == p {
                    "px-4 py-2 rounded-lg bg-indigo-600 text-white font-medium"
                } else {
                    "px-4 py-2 rounded-lg bg-white text-gray-700 border border-gray-200 hover:bg-indigo-50"
                };
                html! {
                    <button {class} onclick={Callback::from(move |_| period.set(p))}>
                        { format!("{} {}", p.icon(), p.label()) }
                    </button>
                }
            }) }
        </div>
    };

    let period_table = html! {
        <div class="bg-white/80 rounded-2xl shadow-lg p-6 space-y-4">
            <div class="flex justify-between items-center">
                <h2 class="text-xl font-bold text-gray-800">{ format!("{} Breakdown", period.label()) }</h2>
                <select onchange={on_kind_filter} class="border p-2 rounded text-sm">
                    { kind_options(*kind_filter) }
                </select>
            </div>
            if period_rows.is_empty() {
                <p class="text-gray-500 italic">{"No data for this period."}</p>
            } else {
                <table class="w-full text-sm">
                    <thead>
                        <tr class="text-left text-gray-500 border-b">
                            <th class="px-4 py-2">{"Category"}</th>
                            <th class="px-4 py-2">{"Type"}</th>
                            <th class="px-4 py-2 text-right">{"Total"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for period_rows.iter().map(|row| html! {
                            <tr class="border-b last:border-0">
                                <td class="px-4 py-2">{ row.category.clone() }</td>
                                <td class="px-4 py-2">{ row.kind.as_str() }</td>
                                <td class={amount_class(row.kind)}>{ format_amount(row.total) }</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            }
        </div>
    };

    let filter_form = html! {
        <div class="bg-white/80 rounded-2xl shadow-lg p-6 space-y-4">
            <h2 class="text-xl font-bold text-gray-800">{"🔍 Filter Transactions"}</h2>
            <form onsubmit={on_apply} class="grid grid-cols-1 md:grid-cols-5 gap-3">
                <input type="date" class="border p-2 rounded" value={filter.start_date.clone()}
                    oninput={on_filter_field(|f, v| f.start_date = v)} />
                <input type="date" class="border p-2 rounded" value={filter.end_date.clone()}
                    oninput={on_filter_field(|f, v| f.end_date = v)} />
                <select onchange={on_filter_kind} class="border p-2 rounded">
                    { kind_options(filter.kind) }
                </select>
                <input type="text" placeholder="Category" class="border p-2 rounded" value={filter.category.clone()}
                    oninput={on_filter_field(|f, v| f.category = v)} />
                <button type="submit" class="bg-indigo-600 text-white rounded-lg px-4 py-2 hover:bg-indigo-700">{"Apply"}</button>
            </form>
            if let Some(rows) = &*filtered {
                if rows.is_empty() {
                    <p class="text-gray-500 italic">{"No transactions match these filters."}</p>
                } else {
                    <table class="w-full text-sm">
                        <thead>
                            <tr class="text-left text-gray-500 border-b">
                                <th class="px-4 py-2">{"Date"}</th>
                                <th class="px-4 py-2">{"Category"}</th>
                                <th class="px-4 py-2">{"Type"}</th>
                                <th class="px-4 py-2 text-right">{"Total"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for rows.iter().map(|row| html! {
                                <tr class="border-b last:border-0">
                                    <td class="px-4 py-2">{ row.date.format("%Y-%m-%d").to_string() }</td>
                                    <td class="px-4 py-2">{ row.category.clone() }</td>
                                    <td class="px-4 py-2">{ row.kind.as_str() }</td>
                                    <td class={amount_class(row.kind)}>{ format_amount(row.total) }</td>
                                </tr>
                            }) }
                        </tbody>
                    </table>
                }
            }
        </div>
    };

    let content = html! {
        <>
            { summary_cards(&data) }
            { tabs }
            { period_table }
            { filter_form }
        </>
    };

    page_shell("Overall Analysis", "Income and expenses across every period", content)
}
