use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, GateDecision, LoginOutcome};

#[component]
pub fn LoginPage() -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);
    let navigate = use_navigate();

    // Already logged in: skip straight to the workspace
    {
        let navigate = navigate.clone();
        spawn_local(async move {
            if let Ok(GateDecision::Allow) = commands::check_session().await {
                navigate(
                    "/",
                    NavigateOptions {
                        replace: true,
                        ..Default::default()
                    },
                );
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        set_submitting.set(true);
        set_error.set(None);

        let user = username.get_untracked();
        let pass = password.get_untracked();
        let navigate = navigate.clone();
        spawn_local(async move {
            match commands::login(&user, &pass).await {
                Ok(LoginOutcome::LoggedIn) => navigate("/", Default::default()),
                Ok(LoginOutcome::Rejected { message }) => set_error.set(Some(message)),
                Err(e) => set_error.set(Some(e)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <main class="login-page">
            <form class="login-card" on:submit=on_submit>
                <h1>"HR AI Docs"</h1>
                <p class="section-description">"Sign in to generate letters."</p>

                <div class="form-group">
                    <label for="username">"Username"</label>
                    <input
                        id="username"
                        type="text"
                        class="input"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        type="password"
                        class="input"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </div>

                <Show when=move || error.get().is_some()>
                    <p class="error-banner">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </main>
    }
}
