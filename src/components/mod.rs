mod budget_prediction;
mod budget_recommendations;
pub mod icons;
mod monthly_limit;
mod sidebar;
mod stat_card;
mod transaction_card;

pub use budget_prediction::BudgetPredictionPanel;
pub use budget_recommendations::BudgetRecommendationsPanel;
pub use monthly_limit::MonthlyLimitPanel;
pub use sidebar::Sidebar;
pub use stat_card::StatCard;
pub use transaction_card::TransactionCard;

use yew::prelude::*;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::session::SessionContext;

/// What an authenticated view needs to call the backend on the user's behalf.
#[derive(Clone, PartialEq)]
pub struct UserScope {
    pub client: ApiClient,
    pub user_id: Option<String>,
    pub config: AppConfig,
}

#[hook]
pub fn use_user_scope() -> UserScope {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let user_id = use_context::<SessionContext>().and_then(|ctx| ctx.user_id());
    UserScope {
        client: ApiClient::from_config(&config),
        user_id,
        config,
    }
}

/// Blocking browser prompt.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

pub fn page_shell(title: &str, subtitle: &str, children: Html) -> Html {
    html! {
        <div class="min-h-screen bg-gradient-to-br from-slate-50 to-gray-100">
            <div class="container mx-auto px-4 py-8 max-w-7xl space-y-8">
                <div class="text-center">
                    <h1 class="text-4xl font-bold bg-gradient-to-r from-indigo-600 to-purple-600 bg-clip-text text-transparent mb-2">{ title }</h1>
                    <p class="text-gray-600 text-lg">{ subtitle }</p>
                </div>
                { children }
            </div>
        </div>
    }
}
