use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::ApiClient;
use crate::auth::{authenticate, AuthForm, AuthMode};
use crate::config::AppConfig;
use crate::routes::Route;
use crate::session::SessionContext;

fn field_input(
    form: &UseStateHandle<AuthForm>,
    apply: fn(&mut AuthForm, String),
) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut next = (*form).clone();
        apply(&mut next, input.value());
        form.set(next);
    })
}

#[function_component(AuthPage)]
pub fn auth_page() -> Html {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let session = use_context::<SessionContext>();
    let navigator = use_navigator();
    let form = use_state(AuthForm::default);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let form = form.clone();
        let error = error.clone();
        let loading = loading.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading || !form.can_submit() {
                return;
            }

            loading.set(true);
            error.set(None);

            let submitted = (*form).clone();
            let client = ApiClient::from_config(&config);
            let timeout = config.auth_timeout;
            let error = error.clone();
            let loading = loading.clone();
            let session = session.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                tracing::debug!(mode = ?submitted.mode, "submitting credentials");
                match authenticate(&client, &submitted, timeout).await {
                    Ok(identity) => {
                        loading.set(false);
                        if let Some(session) = &session {
                            session.sign_in(identity);
                        }
                        if let Some(navigator) = &navigator {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, mode = ?submitted.mode, "authentication failed");
                        error.set(Some(err.user_message()));
                        loading.set(false);
                    }
                }
            });
        })
    };

    let toggle_mode = {
        let form = form.clone();
        let error = error.clone();
        Callback::from(move |_| {
            form.set(form.toggle_mode());
            error.set(None);
        })
    };

    let is_login = form.mode == AuthMode::Login;
    let disabled = *loading || !form.can_submit();
    let button_class = if disabled {
        "p-2 rounded w-full font-semibold bg-gray-300 text-gray-500 cursor-not-allowed"
    } else {
        "p-2 rounded w-full font-semibold bg-blue-500 text-white hover:bg-blue-600"
    };

    html! {
        <div class="p-6 max-w-md mx-auto bg-white shadow-md rounded mt-10">
            <h2 class="text-xl font-bold mb-4">{ form.mode.title() }</h2>

            <form onsubmit={on_submit}>
                if !is_login {
                    <input type="text" placeholder="Name" class="border p-2 mb-2 w-full rounded"
                        value={form.name.clone()}
                        oninput={field_input(&form, |f, v| f.name = v)} />
                }
                <input type="text" placeholder="Mobile" class="border p-2 mb-2 w-full rounded"
                    value={form.mobile.clone()}
                    oninput={field_input(&form, |f, v| f.mobile = v)} />
                <input type="password" placeholder="Password" class="border p-2 mb-2 w-full rounded"
                    value={form.password.clone()}
                    oninput={field_input(&form, |f, v| f.password = v)} />

                <button type="submit" class={button_class} {disabled}>
                    { if *loading { "Processing..." } else { form.mode.title() } }
                </button>
            </form>

            if let Some(msg) = &*error {
                <p class="text-red-500 mt-2 text-sm">{ msg.clone() }</p>
            }

            <p class="mt-4 text-sm">
                { if is_login { "Don't have an account? " } else { "Already have an account? " } }
                <button type="button" onclick={toggle_mode} class="text-blue-500 underline">
                    { if is_login { "Sign up" } else { "Log in" } }
                </button>
            </p>
        </div>
    }
}
