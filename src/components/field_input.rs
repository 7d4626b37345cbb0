use leptos::prelude::*;

/// A labelled single-line text input bound to one form field.
#[component]
pub fn FieldInput(
    /// Field key, used for the element id
    #[prop(into)]
    name: String,
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
) -> impl IntoView {
    let id = format!("field-{}", name);

    view! {
        <div class="form-group">
            <label for=id.clone()>{label.clone()}</label>
            <input
                id=id
                type="text"
                class="input"
                placeholder=label
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </div>
    }
}
