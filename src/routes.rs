use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{
    AnalysisPage, AuthPage, BudgetPage, CsvUploadPage, DashboardPage, KindAnalysisPage,
    TransactionsPage,
};
use crate::models::TxnType;
use crate::session::SessionContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Routable)]
pub enum Route {
    #[at("/")]
    Dashboard,
    #[at("/transactions")]
    Transactions,
    #[at("/analysis")]
    Analysis,
    #[at("/income-analysis")]
    IncomeAnalysis,
    #[at("/expense-analysis")]
    ExpenseAnalysis,
    #[at("/budget")]
    Budget,
    #[at("/csv-analysis")]
    CsvUpload,
    #[at("/auth")]
    Auth,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Routes offered in the sidebar once signed in.
    pub const NAVIGATION: [Route; 7] = [
        Route::Dashboard,
        Route::Transactions,
        Route::Analysis,
        Route::IncomeAnalysis,
        Route::ExpenseAnalysis,
        Route::Budget,
        Route::CsvUpload,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Transactions => "Transactions",
            Route::Analysis => "Overall Analysis",
            Route::IncomeAnalysis => "Income Analysis",
            Route::ExpenseAnalysis => "Expense Analysis",
            Route::Budget => "Budget Insights",
            Route::CsvUpload => "CSV Analysis",
            Route::Auth => "Sign In",
            Route::NotFound => "Not Found",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    Render(Route),
    Redirect(Route),
}

/// Which view a path resolves to for the given auth state.
pub fn gate(route: Route, authenticated: bool) -> RouteOutcome {
    match (authenticated, route) {
        (false, Route::Auth) => RouteOutcome::Render(Route::Auth),
        (false, _) => RouteOutcome::Redirect(Route::Auth),
        (true, Route::Auth | Route::NotFound) => RouteOutcome::Redirect(Route::Dashboard),
        (true, other) => RouteOutcome::Render(other),
    }
}

pub fn switch(route: Route) -> Html {
    html! { <GatedRoute {route} /> }
}

#[derive(Properties, PartialEq)]
struct GatedRouteProps {
    route: Route,
}

#[function_component(GatedRoute)]
fn gated_route(props: &GatedRouteProps) -> Html {
    let authenticated = use_context::<SessionContext>()
        .map(|ctx| ctx.session().is_some())
        .unwrap_or(false);

    match gate(props.route, authenticated) {
        RouteOutcome::Redirect(to) => html! { <Redirect<Route> {to} /> },
        RouteOutcome::Render(route) => match route {
            Route::Dashboard => html! { <DashboardPage /> },
            Route::Transactions => html! { <TransactionsPage /> },
            Route::Analysis => html! { <AnalysisPage /> },
            Route::IncomeAnalysis => html! { <KindAnalysisPage kind={TxnType::Income} /> },
            Route::ExpenseAnalysis => html! { <KindAnalysisPage kind={TxnType::Expense} /> },
            Route::Budget => html! { <BudgetPage /> },
            Route::CsvUpload => html! { <CsvUploadPage /> },
            Route::Auth => html! { <AuthPage /> },
            Route::NotFound => html! {},
        },
    }
}
