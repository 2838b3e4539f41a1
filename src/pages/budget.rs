use yew::prelude::*;

use crate::components::{
    page_shell, BudgetPredictionPanel, BudgetRecommendationsPanel, MonthlyLimitPanel,
};

#[function_component(BudgetPage)]
pub fn budget_page() -> Html {
    let content = html! {
        <>
            <section class="bg-white/80 rounded-2xl shadow-lg p-6 space-y-4">
                <p class="text-right text-sm text-gray-500">{"Based on your last 12 months of expenses"}</p>
                <BudgetPredictionPanel />
            </section>
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-8">
                <section class="bg-white/80 rounded-2xl shadow-lg p-6"><BudgetRecommendationsPanel /></section>
                <section class="bg-white/80 rounded-2xl shadow-lg p-6"><MonthlyLimitPanel /></section>
            </div>
        </>
    };

    page_shell("Budget Insights", "Predictions, recommendations and your monthly limit", content)
}
