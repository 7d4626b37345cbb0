//! Route guard for pages that need a logged-in session.
//!
//! Nothing protected is rendered until the backend has answered, so a
//! logged-out user never sees a flash of the workspace before redirecting.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, GateDecision};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GatePhase {
    Checking,
    Allowed,
    Denied,
}

#[component]
pub fn RequireSession(children: ChildrenFn) -> impl IntoView {
    let (phase, set_phase) = signal(GatePhase::Checking);
    let navigate = use_navigate();

    Effect::new(move |_| {
        let navigate = navigate.clone();
        spawn_local(async move {
            let target = match commands::check_session().await {
                Ok(GateDecision::Allow) => {
                    set_phase.set(GatePhase::Allowed);
                    return;
                }
                Ok(GateDecision::Redirect { to }) => to,
                // Storage trouble reads as logged out
                Err(_) => "/login".to_string(),
            };
            set_phase.set(GatePhase::Denied);
            navigate(
                &target,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        });
    });

    view! {
        <Show
            when=move || phase.get() == GatePhase::Allowed
            fallback=|| view! { <div class="gate-pending"></div> }
        >
            {children()}
        </Show>
    }
}
