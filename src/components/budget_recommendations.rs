use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::use_user_scope;
use crate::error::ApiError;
use crate::format::format_amount;
use crate::models::BudgetRecommendation;
use crate::tasks::RequestGeneration;

const DEFAULT_MONTHS: u32 = 6;
const DEFAULT_TARGET_SAVING: f64 = 2000.0;

/// Blank fields fall back to the server's own defaults.
fn parse_inputs(months: &str, saving: &str) -> Option<(u32, f64)> {
    let months = match months.trim() {
        "" => DEFAULT_MONTHS,
        raw => raw.parse::<u32>().ok().filter(|m| *m > 0)?,
    };
    let saving = match saving.trim() {
        "" => DEFAULT_TARGET_SAVING,
        raw => raw.parse::<f64>().ok().filter(|s| s.is_finite() && *s >= 0.0)?,
    };
    Some((months, saving))
}

fn failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Rejected {
            detail: Some(detail),
            ..
        } => detail.clone(),
        _ => "Something went wrong.".to_string(),
    }
}

#[function_component(BudgetRecommendationsPanel)]
pub fn budget_recommendations_panel() -> Html {
    let scope = use_user_scope();
    let months = use_state(String::new);
    let saving = use_state(String::new);
    let recommendation = use_state(|| None::<BudgetRecommendation>);
    let error = use_state(|| None::<String>);
    let generation = use_state(RequestGeneration::new);

    {
        let generation = (*generation).clone();
        use_effect_with_deps(move |_| move || generation.invalidate(), ());
    }

    let on_fetch = {
        let months = months.clone();
        let saving = saving.clone();
        let recommendation = recommendation.clone();
        let error = error.clone();
        let generation = (*generation).clone();
        Callback::from(move |_| {
            let Some(user_id) = scope.user_id.clone() else {
                return;
            };
            let Some((months, target_saving)) = parse_inputs(&months, &saving) else {
                error.set(Some("Please enter valid numbers.".to_string()));
                return;
            };
            let client = scope.client.clone();
            let recommendation = recommendation.clone();
            let error = error.clone();
            let ticket = generation.issue();
            spawn_local(async move {
                let result = client
                    .recommend_budget(&user_id, months, target_saving)
                    .await;
                if !ticket.is_current() {
                    return;
                }
                match result {
                    Ok(found) => {
                        recommendation.set(Some(found));
                        error.set(None);
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "budget recommendation failed");
                        error.set(Some(failure_message(&err)));
                        recommendation.set(None);
                    }
                }
            });
        })
    };

    let on_months = {
        let months = months.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            months.set(input.value());
        })
    };
    let on_saving = {
        let saving = saving.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            saving.set(input.value());
        })
    };

    html! {
        <div class="space-y-4">
            <h2 class="text-xl font-bold text-gray-800">{"💡 Budget Recommendations"}</h2>
            <div class="flex flex-wrap gap-3 items-center">
                <input type="number" class="border p-1 text-sm rounded w-40" placeholder="Enter Months"
                    value={(*months).clone()} oninput={on_months} />
                <input type="number" class="border p-1 text-sm rounded w-40" placeholder="Target Saving (e.g., 2000)"
                    value={(*saving).clone()} oninput={on_saving} />
                <button class="bg-indigo-100 text-indigo-700 text-sm px-3 py-1 rounded hover:bg-indigo-200" onclick={on_fetch}>
                    {"Get Recommendations"}
                </button>
            </div>

            if let Some(msg) = &*error {
                <p class="text-red-600 font-medium">{ msg.clone() }</p>
            }

            if let Some(rec) = &*recommendation {
                <div class="space-y-3">
                    <p class="text-gray-700">
                        { format!(
                            "📆 Based on the past {} months, your average spending is {}. After saving {}, here's your suggested budget:",
                            rec.months_considered,
                            format_amount(rec.total_spent),
                            format_amount(rec.target_saving)
                        ) }
                    </p>
                    <div class="grid grid-cols-1 sm:grid-cols-2 gap-3">
                        { for rec.recommended_budget.iter().map(|(category, amount)| html! {
                            <div key={category.clone()} class="flex justify-between bg-indigo-50 rounded-lg px-4 py-2">
                                <span class="font-medium text-gray-700">{ category.clone() }</span>
                                <span class="font-bold text-indigo-700">{ format_amount(*amount) }</span>
                            </div>
                        }) }
                    </div>
                </div>
            }
        </div>
    }
}
