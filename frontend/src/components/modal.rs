use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub is_open: bool,
    pub title: AttrValue,
    pub on_close: Callback<()>,
    /// Extra class on the dialog, e.g. "repas-modal-wide"
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Html,
}

/// Backdrop + dialog frame shared by every manager modal.
/// Clicking the backdrop closes; clicks inside the dialog do not bubble out.
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            on_close.emit(());
        })
    };

    if !props.is_open {
        return html! {};
    }

    html! {
        <div class="repas-modal-backdrop" onclick={on_backdrop_click}>
            <div class={classes!("repas-modal", props.class.clone())} onclick={on_modal_click}>
                <div class="repas-modal-header">
                    <h5 class="repas-modal-title">{props.title.clone()}</h5>
                    <button type="button" class="btn-close" aria-label="Fermer" onclick={on_close_click}></button>
                </div>
                <div class="repas-modal-content">
                    {props.children.clone()}
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct MessageProps {
    pub error: Option<String>,
    #[prop_or_default]
    pub success: Option<String>,
}

/// Error/success banners shown at the top of a modal
#[function_component(ModalMessages)]
pub fn modal_messages(props: &MessageProps) -> Html {
    html! {
        <>
            if let Some(error) = props.error.clone() {
                <div class="alert alert-danger repas-modal-error">{error}</div>
            }
            if let Some(success) = props.success.clone() {
                <div class="alert alert-success repas-modal-success">{success}</div>
            }
        </>
    }
}
