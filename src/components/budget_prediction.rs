use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::use_user_scope;
use crate::format::format_amount;
use crate::models::BudgetPrediction;
use crate::tasks::RequestGeneration;

/// The server ignores this and always looks back over twelve months.
const PREDICTION_MONTHS: u32 = 6;

#[function_component(BudgetPredictionPanel)]
pub fn budget_prediction_panel() -> Html {
    let scope = use_user_scope();
    let predictions = use_state(|| None::<BudgetPrediction>);
    let generation = use_state(RequestGeneration::new);

    {
        let predictions = predictions.clone();
        let generation = (*generation).clone();
        let client = scope.client.clone();
        use_effect_with_deps(
            move |user_id: &Option<String>| {
                if let Some(user_id) = user_id.clone() {
                    let months = PREDICTION_MONTHS;
                    let ticket = generation.issue();
                    spawn_local(async move {
                        match client.predict_budget(&user_id, months).await {
                            Ok(found) if ticket.is_current() => predictions.set(Some(found)),
                            Ok(_) => tracing::debug!(months, "dropping stale budget prediction"),
                            Err(err) => tracing::error!(error = %err, "budget prediction failed"),
                        }
                    });
                }
                move || generation.invalidate()
            },
            scope.user_id.clone(),
        );
    }

    let Some(predicted) = (*predictions).clone() else {
        return html! { <p class="text-gray-500 text-center">{"Loading budget predictions..."}</p> };
    };
    let total: f64 = predicted.values().sum();

    html! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold text-indigo-700 text-center">{"📈 Next Month's Predicted Budget"}</h2>
            <p class="text-center text-lg text-gray-700 font-semibold">
                { format!("🧾 Total Budget Prediction: {}", format_amount(total)) }
            </p>
            if predicted.is_empty() {
                <p class="text-center text-gray-500">{"Not enough history to predict next month yet."}</p>
            }
            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-6">
                { for predicted.iter().map(|(category, amount)| html! {
                    <div key={category.clone()} class="bg-white rounded-2xl shadow-lg p-6 text-center border border-indigo-200">
                        <h3 class="text-lg font-semibold text-gray-800 mb-2">{ category.clone() }</h3>
                        <p class="text-2xl font-bold text-indigo-600">{ format_amount(*amount) }</p>
                    </div>
                }) }
            </div>
        </div>
    }
}
