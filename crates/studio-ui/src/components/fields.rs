//! Labelled dialog inputs with inline validation messages.
//!
//! # Design
//! - Inputs are controlled: the value comes from the store, edits go out
//!   through a callback.
//! - Files are read into memory as soon as they are picked so the submit
//!   path stays synchronous up to the request.

use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use gloo::console;
use gloo::file::File;
use gloo::file::futures::read_as_bytes;
use studio_api_models::FilePart;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct TextFieldProps {
    pub label: AttrValue,
    pub value: AttrValue,
    pub on_input: Callback<String>,
    /// Translation key of the validation message, if the field failed.
    #[prop_or_default]
    pub error: Option<&'static str>,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub multiline: bool,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
}

#[function_component(TextField)]
pub(crate) fn text_field(props: &TextFieldProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let message = props.error.map(|key| bundle.text(key, ""));
    let invalid = message.is_some();

    let control = if props.multiline {
        let on_input = props.on_input.clone();
        let oninput = Callback::from(move |event: InputEvent| {
            if let Some(area) = event.target_dyn_into::<HtmlTextAreaElement>() {
                on_input.emit(area.value());
            }
        });
        html! {
            <textarea
                class={classes!("textarea", invalid.then_some("textarea-error"))}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                disabled={props.disabled}
                aria-invalid={invalid.to_string()}
                {oninput}
            />
        }
    } else {
        let on_input = props.on_input.clone();
        let oninput = Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                on_input.emit(input.value());
            }
        });
        html! {
            <input
                class={classes!("input", invalid.then_some("input-error"))}
                type={props.input_type.clone()}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                disabled={props.disabled}
                aria-invalid={invalid.to_string()}
                {oninput}
            />
        }
    };

    html! {
        <label class="form-field">
            <span class="label-text">{props.label.clone()}</span>
            {control}
            {message.map(|text| html! { <p class="error-text">{text}</p> }).unwrap_or_default()}
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct FileFieldProps {
    pub label: AttrValue,
    /// Name of the file already picked, if any.
    #[prop_or_default]
    pub selected: Option<AttrValue>,
    pub on_file: Callback<FilePart>,
    #[prop_or_default]
    pub error: Option<&'static str>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(FileField)]
pub(crate) fn file_field(props: &FileFieldProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key, "");
    let file_input = use_node_ref();
    let reading = use_state(|| false);

    let on_pick = {
        let file_input = file_input.clone();
        Callback::from(move |_| {
            if let Some(input) = file_input.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_change = {
        let on_file = props.on_file.clone();
        let reading = reading.clone();
        Callback::from(move |event: Event| {
            let Some(input) = event.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let Some(picked) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let on_file = on_file.clone();
            let reading = reading.clone();
            reading.set(true);
            yew::platform::spawn_local(async move {
                let file = File::from(picked);
                match read_as_bytes(&file).await {
                    Ok(bytes) => on_file.emit(FilePart {
                        file_name: file.name(),
                        content_type: Some(file.raw_mime_type()).filter(|mime| !mime.is_empty()),
                        bytes,
                    }),
                    Err(err) => console::error!("file read failed", file.name(), err.to_string()),
                }
                reading.set(false);
            });
        })
    };

    let message = props.error.map(|key| bundle.text(key, ""));
    let status = if *reading {
        t("form.reading_file")
    } else {
        props
            .selected
            .as_ref()
            .map_or_else(|| t("form.no_file"), ToString::to_string)
    };

    html! {
        <div class="form-field">
            <span class="label-text">{props.label.clone()}</span>
            <input
                ref={file_input}
                class="file-input-hidden"
                type="file"
                accept="image/*"
                onchange={on_change}
            />
            <div class="file-picker">
                <button
                    type="button"
                    class="btn btn-ghost btn-sm"
                    disabled={props.disabled || *reading}
                    onclick={on_pick}
                >
                    {t("form.choose_file")}
                </button>
                <span class="muted">{status}</span>
            </div>
            {message.map(|text| html! { <p class="error-text">{text}</p> }).unwrap_or_default()}
        </div>
    }
}
