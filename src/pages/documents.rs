use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, DocumentForm, DocumentType, DocumentTypeInfo, GenerationResult, GenerationState};
use crate::components::field_input::FieldInput;
use crate::components::form_section::{group_by_section, FormSection};
use crate::components::generation_result::GenerationResultPanel;
use crate::components::sidebar::Sidebar;

#[component]
pub fn DocumentsPage() -> impl IntoView {
    let (types, set_types) = signal::<Vec<DocumentTypeInfo>>(Vec::new());
    let (form, set_form) = signal(DocumentForm::default());
    let (generating, set_generating) = signal(false);
    let (result, set_result) = signal::<Option<GenerationResult>>(None);
    let (error, set_error) = signal::<Option<String>>(None);
    let (download_status, set_download_status) = signal::<Option<String>>(None);
    let (service_url, set_service_url) = signal(String::new());
    let navigate = StoredValue::new_local(use_navigate());

    // Fresh Offer form on every visit; results are not carried over
    Effect::new(move |_| {
        spawn_local(async move {
            match commands::list_document_types().await {
                Ok(list) => set_types.set(list),
                Err(e) => set_error.set(Some(e)),
            }
            match commands::open_form(DocumentType::Offer).await {
                Ok(f) => set_form.set(f),
                Err(e) => set_error.set(Some(e)),
            }
            if let Ok(settings) = commands::get_client_settings().await {
                set_service_url.set(settings.base_url);
            }
        });
    });

    let selected = Signal::derive(move || form.get().document_type);
    let current_info = Memo::new(move |_| {
        let kind = form.get().document_type;
        types.get().into_iter().find(|info| info.kind == kind)
    });

    let on_select = Callback::new(move |kind: DocumentType| {
        if generating.get_untracked() || kind == form.get_untracked().document_type {
            return;
        }
        spawn_local(async move {
            match commands::select_document_type(kind).await {
                Ok(f) => {
                    set_form.set(f);
                    set_result.set(None);
                    set_error.set(None);
                    set_download_status.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    });

    let on_field = move |field: String, value: String| {
        set_form.update(|f| {
            f.fields.insert(field.clone(), value.clone());
        });
        spawn_local(async move {
            if let Err(e) = commands::update_field(&field, &value).await {
                set_error.set(Some(e));
            }
        });
    };

    let on_reset = move |_| {
        spawn_local(async move {
            match commands::reset_form().await {
                Ok(f) => {
                    set_form.set(f);
                    set_result.set(None);
                    set_error.set(None);
                    set_download_status.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let on_generate = move |_| {
        if generating.get_untracked() {
            return;
        }
        set_generating.set(true);
        set_error.set(None);
        set_result.set(None);
        set_download_status.set(None);

        spawn_local(async move {
            match commands::generate_document().await {
                Ok(GenerationState::Succeeded { result, .. }) => set_result.set(Some(result)),
                Ok(GenerationState::Failed { message, .. }) => set_error.set(Some(message)),
                // Another request was already running
                Ok(_) => {}
                Err(e) => set_error.set(Some(e)),
            }
            set_generating.set(false);
        });
    };

    let on_download = Callback::new(move |file_name: String| {
        set_download_status.set(Some("Downloading...".to_string()));
        spawn_local(async move {
            match commands::download_document(&file_name).await {
                Ok(path) => set_download_status.set(Some(format!("Saved to {}", path))),
                Err(e) => set_download_status.set(Some(format!("Download failed: {}", e))),
            }
        });
    });

    let on_logout = Callback::new(move |_: ()| {
        let navigate = navigate.get_value();
        spawn_local(async move {
            let _ = commands::logout().await;
            navigate("/login", Default::default());
        });
    });

    view! {
        <div class="app-layout">
            <Sidebar
                types=types
                selected=selected
                locked=generating
                on_select=on_select
                on_logout=on_logout
            />
            <main class="content">
                <div class="page documents-page">
                    <h2>{move || current_info.get().map(|i| i.label).unwrap_or_default()}</h2>
                    <Show when=move || !service_url.get().is_empty()>
                        <p class="section-description">
                            {move || format!("Document service: {}", service_url.get())}
                        </p>
                    </Show>

                    {move || {
                        let fields = current_info.get().map(|i| i.fields).unwrap_or_default();
                        group_by_section(&fields)
                            .into_iter()
                            .map(|(title, members)| {
                                view! {
                                    <FormSection title=title>
                                        {members
                                            .into_iter()
                                            .map(|field| {
                                                let name = field.name.clone();
                                                let key = field.name.clone();
                                                view! {
                                                    <FieldInput
                                                        name=field.name
                                                        label=field.label
                                                        value=Signal::derive(move || form.get().value(&key))
                                                        on_input=Callback::new(move |value: String| {
                                                            on_field(name.clone(), value)
                                                        })
                                                    />
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </FormSection>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}

                    <div class="form-actions">
                        <button
                            class="btn btn-primary"
                            disabled=move || generating.get()
                            on:click=on_generate
                        >
                            {move || {
                                if generating.get() {
                                    "Generating...".to_string()
                                } else {
                                    format!(
                                        "Generate {}",
                                        current_info.get().map(|i| i.label).unwrap_or_default()
                                    )
                                }
                            }}
                        </button>
                        <button
                            class="btn btn-secondary"
                            disabled=move || generating.get()
                            on:click=on_reset
                        >
                            "Reset"
                        </button>
                    </div>

                    <Show when=move || error.get().is_some()>
                        <p class="error-banner">{move || error.get().unwrap_or_default()}</p>
                    </Show>

                    {move || result.get().map(|r| view! {
                        <GenerationResultPanel
                            result=r
                            on_download=on_download
                            download_status=download_status
                        />
                    })}
                </div>
            </main>
        </div>
    }
}
