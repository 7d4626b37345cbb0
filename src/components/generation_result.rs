use leptos::prelude::*;

use crate::commands::GenerationResult;

#[component]
pub fn GenerationResultPanel(
    result: GenerationResult,
    /// Invoked with the file name when the user asks for a local copy
    #[prop(into)]
    on_download: Callback<String>,
    #[prop(into)] download_status: Signal<Option<String>>,
) -> impl IntoView {
    let (file, review) = match result {
        GenerationResult::Artifact {
            file_name,
            download_url,
            review,
            saved_to,
        } => (Some((file_name, download_url, saved_to)), review),
        GenerationResult::NoArtifact { review } => (None, review),
    };

    view! {
        <div class="result-panel">
            <h3>"Generated"</h3>
            {match file {
                Some((file_name, download_url, saved_to)) => {
                    let name = file_name.clone();
                    let href = download_url.clone();
                    view! {
                        <div class="result-file">
                            <span class="result-file-name">{file_name}</span>
                            <a class="result-link" href=href target="_blank">
                                {download_url}
                            </a>
                            {match saved_to {
                                Some(path) => view! {
                                    <span class="status-text">{format!("Saved to {}", path)}</span>
                                }.into_any(),
                                None => view! {
                                    <button
                                        class="btn btn-primary"
                                        on:click=move |_| on_download.run(name.clone())
                                    >
                                        "Download"
                                    </button>
                                }.into_any(),
                            }}
                        </div>
                    }.into_any()
                }
                None => view! {
                    <p class="result-empty">"The service returned no file for this request."</p>
                }.into_any(),
            }}
            <Show when=move || download_status.get().is_some()>
                <span class="status-text">{move || download_status.get().unwrap_or_default()}</span>
            </Show>
            {review.map(|text| view! {
                <div class="review">
                    <h4>"AI Review"</h4>
                    <pre class="review-text">{text}</pre>
                </div>
            })}
        </div>
    }
}
