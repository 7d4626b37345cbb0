use leptos::prelude::*;

use crate::commands::{DocumentType, DocumentTypeInfo};

/// Letter type picker plus logout.
///
/// Type changes are blocked while a generation is in flight.
#[component]
pub fn Sidebar(
    #[prop(into)] types: Signal<Vec<DocumentTypeInfo>>,
    #[prop(into)] selected: Signal<DocumentType>,
    #[prop(into)] locked: Signal<bool>,
    #[prop(into)] on_select: Callback<DocumentType>,
    #[prop(into)] on_logout: Callback<()>,
) -> impl IntoView {
    view! {
        <nav class="sidebar">
            <div class="sidebar-header">
                <h1 class="sidebar-title">"HR AI Docs"</h1>
                <p class="sidebar-subtitle">"Letter Generator"</p>
            </div>
            <ul class="nav-list">
                {move || {
                    types
                        .get()
                        .into_iter()
                        .map(|info| {
                            let kind = info.kind;
                            view! {
                                <li class="nav-item">
                                    <button
                                        class="nav-link"
                                        class:active=move || selected.get() == kind
                                        disabled=move || locked.get()
                                        on:click=move |_| on_select.run(kind)
                                    >
                                        {info.label}
                                    </button>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </ul>
            <div class="sidebar-footer">
                <button class="btn btn-secondary" on:click=move |_| on_logout.run(())>
                    "Log out"
                </button>
            </div>
        </nav>
    }
}
