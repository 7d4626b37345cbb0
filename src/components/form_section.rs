use leptos::prelude::*;

use crate::commands::FieldInfo;

#[component]
pub fn FormSection(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <section class="form-section">
            <h3 class="form-section-title">{title}</h3>
            <div class="form-grid">{children()}</div>
        </section>
    }
}

/// Group fields by section title, keeping first-seen section order.
pub fn group_by_section(fields: &[FieldInfo]) -> Vec<(String, Vec<FieldInfo>)> {
    let mut groups: Vec<(String, Vec<FieldInfo>)> = Vec::new();
    for field in fields {
        match groups.iter_mut().find(|(title, _)| *title == field.section_title) {
            Some((_, members)) => members.push(field.clone()),
            None => groups.push((field.section_title.clone(), vec![field.clone()])),
        }
    }
    groups
}
