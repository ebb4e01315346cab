//! Delete trigger bound to a shared busy flag.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct RemoveButtonProps {
    pub label: AttrValue,
    /// Flag shared with every sibling trigger; disables the button while set.
    pub busy: bool,
    pub on_remove: Callback<()>,
}

#[function_component(RemoveButton)]
pub(crate) fn remove_button(props: &RemoveButtonProps) -> Html {
    let onclick = {
        let on_remove = props.on_remove.clone();
        Callback::from(move |event: MouseEvent| {
            event.stop_propagation();
            on_remove.emit(());
        })
    };
    html! {
        <button
            type="button"
            class="btn btn-error btn-sm"
            disabled={props.busy}
            aria-busy={props.busy.to_string()}
            {onclick}
        >
            {props.label.clone()}
        </button>
    }
}
