use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::use_user_scope;
use crate::format::format_amount;
use crate::insights::{LimitStatus, LimitTier};
use crate::storage::SessionStore;
use crate::tasks::RequestGeneration;

fn bar_color(tier: LimitTier) -> &'static str {
    match tier {
        LimitTier::OverLimit => "bg-red-500",
        LimitTier::NearLimit => "bg-yellow-500",
        LimitTier::Ok => "bg-green-500",
    }
}

#[function_component(MonthlyLimitPanel)]
pub fn monthly_limit_panel() -> Html {
    let scope = use_user_scope();
    let default_limit = scope.config.default_monthly_limit;
    let limit = use_state(|| SessionStore::browser().load_monthly_limit(default_limit));
    let spent = use_state(|| None::<f64>);
    let generation = use_state(RequestGeneration::new);

    {
        let spent = spent.clone();
        let generation = (*generation).clone();
        let client = scope.client.clone();
        use_effect_with_deps(
            move |user_id: &Option<String>| {
                if let Some(user_id) = user_id.clone() {
                    let ticket = generation.issue();
                    spawn_local(async move {
                        match client.monthly_spending(&user_id).await {
                            Ok(found) if ticket.is_current() => spent.set(Some(found.total_spent)),
                            Ok(_) => {}
                            Err(err) => tracing::error!(error = %err, "failed to fetch spending"),
                        }
                    });
                }
                move || generation.invalidate()
            },
            scope.user_id.clone(),
        );
    }

    let on_limit = {
        let limit = limit.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input
                .value()
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .unwrap_or(0.0);
            limit.set(value);
            if let Err(err) = SessionStore::browser().save_monthly_limit(value) {
                tracing::warn!(error = %err, "could not persist monthly limit");
            }
        })
    };

    let status = (*spent).map(|spent| (spent, LimitStatus::evaluate(*limit, spent)));

    html! {
        <div class="space-y-4">
            <h2 class="text-xl font-bold text-gray-800">{"🎯 Monthly Limit"}</h2>
            <div>
                <label class="text-gray-700 font-medium text-sm mb-1 block">{"Set your monthly limit (₹):"}</label>
                <input type="number" value={limit.to_string()} oninput={on_limit}
                    class="w-40 p-2 border border-gray-300 rounded-md shadow-sm focus:outline-none focus:ring-2 focus:ring-blue-500" />
            </div>

            if let Some((spent, status)) = status {
                <div class="space-y-2">
                    <div class="flex justify-between text-sm text-gray-600">
                        <span>{ format!("Spent: {}", format_amount(spent)) }</span>
                        <span>{ format!("Limit: {}", format_amount(*limit)) }</span>
                    </div>
                    <div class="w-full h-4 bg-gray-200 rounded-full overflow-hidden">
                        <div class={classes!("h-full", "transition-all", "duration-700", bar_color(status.tier))}
                            style={format!("width: {}%", status.percentage)}></div>
                    </div>
                    if status.remaining >= 0.0 {
                        <p class="text-green-700 text-sm font-medium">
                            { format!("✅ You have {} left in your budget.", format_amount(status.remaining)) }
                        </p>
                    } else {
                        <p class="text-red-600 text-sm font-medium">
                            { format!("⚠️ Over limit by {}!", format_amount(status.remaining.abs())) }
                        </p>
                    }
                </div>
            }
        </div>
    }
}
