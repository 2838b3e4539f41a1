use yew::prelude::*;
use yew_router::prelude::*;

use super::icons::{
    icon_bar_chart, icon_credit_card, icon_file, icon_home, icon_log_out, icon_trending_down,
    icon_trending_up, icon_wallet,
};
use crate::format::user_initials;
use crate::routes::Route;
use crate::session::SessionContext;

fn nav_icon(route: Route) -> Html {
    match route {
        Route::Dashboard => icon_home(),
        Route::Transactions => icon_credit_card(),
        Route::Analysis => icon_bar_chart(),
        Route::IncomeAnalysis => icon_trending_up(),
        Route::ExpenseAnalysis => icon_trending_down(),
        Route::Budget => icon_wallet(),
        _ => icon_file(),
    }
}

#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    let session = use_context::<SessionContext>();
    let navigator = use_navigator();
    let active = use_route::<Route>();
    let confirm_logout = use_state(|| false);

    let name = session
        .as_ref()
        .map(|s| s.display_name())
        .unwrap_or_default();
    let initials = user_initials(&name);

    let on_ask_logout = {
        let confirm_logout = confirm_logout.clone();
        Callback::from(move |_| confirm_logout.set(true))
    };
    let on_cancel_logout = {
        let confirm_logout = confirm_logout.clone();
        Callback::from(move |_| confirm_logout.set(false))
    };
    let on_logout = {
        let confirm_logout = confirm_logout.clone();
        Callback::from(move |_| {
            if let Some(session) = &session {
                session.sign_out();
            }
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Auth);
            }
            confirm_logout.set(false);
        })
    };

    html! {
        <div class="w-64 h-screen p-4 flex flex-col">
            <div class="flex items-center gap-3 px-2 mb-8">
                <div class="w-11 h-11 bg-indigo-600 text-white rounded-full flex items-center justify-center font-bold">
                    { initials }
                </div>
                <div class="min-w-0">
                    <p class="text-xs text-gray-500">{"Signed in as"}</p>
                    <p class="text-sm font-semibold text-gray-800 truncate">{ name }</p>
                </div>
            </div>

            <nav class="flex-1 space-y-1">
                { for Route::NAVIGATION.iter().map(|route| {
                    let class_name = if active == Some(*route) {
                        "flex items-center gap-3 px-4 py-3 rounded-xl text-sm font-medium bg-indigo-100 text-indigo-700"
                    } else {
                        "flex items-center gap-3 px-4 py-3 rounded-xl text-sm font-medium text-gray-600 hover:bg-white"
                    };
                    html! {
                        <Link<Route> to={*route} classes={classes!(class_name)}>
                            <span class="shrink-0">{ nav_icon(*route) }</span>
                            <span class="truncate">{ route.label() }</span>
                        </Link<Route>>
                    }
                }) }
            </nav>

            <div class="mt-auto pt-4">
                if *confirm_logout {
                    <div class="bg-white border rounded-xl p-3 space-y-2">
                        <p class="text-sm text-gray-700">{"Log out of your account?"}</p>
                        <div class="flex gap-2">
                            <button onclick={on_logout} class="flex-1 bg-red-500 text-white text-sm py-1 rounded-lg">{"Log Out"}</button>
                            <button onclick={on_cancel_logout} class="flex-1 bg-gray-200 text-gray-700 text-sm py-1 rounded-lg">{"Cancel"}</button>
                        </div>
                    </div>
                } else {
                    <button onclick={on_ask_logout} class="flex items-center gap-3 w-full px-4 py-3 rounded-xl hover:bg-white text-sm font-medium text-gray-600">
                        { icon_log_out() }
                        <span>{"Log Out"}</span>
                    </button>
                }
            </div>
        </div>
    }
}
