use leptos::prelude::*;

/// Labelled input with an inline error slot
#[component]
pub fn InputField(
    /// Element id, also used for the label's `for`
    id: &'static str,
    label: &'static str,
    /// Input type (text, password, email)
    #[prop(default = "text")]
    input_type: &'static str,
    #[prop(default = "")]
    autocomplete: &'static str,
    #[prop(default = "")]
    placeholder: &'static str,
    value: RwSignal<String>,
    /// Called with the new value on every keystroke
    on_input: Callback<String>,
    #[prop(into, default = Signal::from(false))]
    disabled: Signal<bool>,
    #[prop(into, default = Signal::from(None::<String>))]
    error: Signal<Option<String>>,
) -> impl IntoView {
    let error_id = format!("{id}-error");
    let described_by = error_id.clone();

    view! {
        <div class="field">
            <label for=id class="field-label">{label}</label>
            <input
                type=input_type
                id=id
                name=id
                autocomplete=autocomplete
                placeholder=placeholder
                class="input"
                class:input-invalid=move || error.get().is_some()
                aria-invalid=move || if error.get().is_some() { "true" } else { "false" }
                aria-describedby=described_by
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
                disabled=move || disabled.get()
            />
            {move || {
                let error_id = error_id.clone();
                error.get().map(|message| view! {
                    <p id=error_id class="field-error">{message}</p>
                })
            }}
        </div>
    }
}
