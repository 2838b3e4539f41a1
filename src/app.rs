use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::Sidebar;
use crate::config::AppConfig;
use crate::routes::{switch, Route};
use crate::session::{AuthStatus, SessionContext, SessionState};
use crate::storage::affects_session;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(AppConfig::from_env);
    let state = use_reducer(SessionState::default);
    let session = SessionContext::new(state);

    // restore the stored session, then follow changes made in other tabs
    {
        let session = session.clone();
        use_effect_with_deps(
            move |_| {
                session.restore();
                let listener = web_sys::window().map(|window| {
                    EventListener::new(&window, "storage", move |event| {
                        let key = event
                            .dyn_ref::<web_sys::StorageEvent>()
                            .and_then(|e| e.key());
                        if affects_session(key.as_deref()) {
                            session.sync_from_storage();
                        }
                    })
                });
                move || drop(listener)
            },
            (),
        );
    }

    let body = if session.status() == AuthStatus::Checking {
        html! {
            <div class="flex justify-center items-center min-h-screen text-gray-500">
                {"Loading..."}
            </div>
        }
    } else {
        html! {
            <BrowserRouter>
                <Shell />
            </BrowserRouter>
        }
    };

    html! {
        <ContextProvider<AppConfig> context={(*config).clone()}>
            <ContextProvider<SessionContext> context={session}>
                { body }
            </ContextProvider<SessionContext>>
        </ContextProvider<AppConfig>>
    }
}

#[function_component(Shell)]
fn shell() -> Html {
    let signed_in = use_context::<SessionContext>()
        .map(|ctx| ctx.session().is_some())
        .unwrap_or(false);

    html! {
        <div class="flex min-h-screen bg-slate-50">
            if signed_in {
                <aside class="bg-gray-100 border-r">
                    <Sidebar />
                </aside>
            }
            <main class="flex-1 overflow-y-auto">
                <Switch<Route> render={switch} />
            </main>
        </div>
    }
}
