//! Modal frame for the mutation dialogs.
//!
//! # Design
//! - Visibility is owned by the caller's store slice.
//! - Escape and backdrop clicks ask the caller to close; the caller decides
//!   whether a running submission allows it.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    pub open: bool,
    pub title: AttrValue,
    #[prop_or_default]
    pub description: Option<AttrValue>,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Modal)]
pub(crate) fn modal(props: &ModalProps) -> Html {
    if !props.open {
        return html! {};
    }
    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };
    let on_keydown = {
        let on_close = props.on_close.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Escape" {
                on_close.emit(());
            }
        })
    };
    let stop = Callback::from(|event: MouseEvent| event.stop_propagation());

    html! {
        <div class="modal-backdrop" onclick={on_backdrop} onkeydown={on_keydown}>
            <div class="modal-box" role="dialog" aria-modal="true" onclick={stop}>
                <h3>{props.title.clone()}</h3>
                {props.description.clone().map(|text| html! {
                    <p class="muted">{text}</p>
                }).unwrap_or_default()}
                {for props.children.iter()}
            </div>
        </div>
    }
}
