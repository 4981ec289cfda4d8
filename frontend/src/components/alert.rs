use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Success,
    Info,
}

impl AlertKind {
    fn class(self) -> &'static str {
        match self {
            AlertKind::Error => "alert alert-error",
            AlertKind::Success => "alert alert-success",
            AlertKind::Info => "alert alert-info",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct AlertProps {
    pub message: AttrValue,
    pub kind: AlertKind,
    #[prop_or_default]
    pub on_close: Option<Callback<MouseEvent>>,
}

#[function_component(Alert)]
pub fn alert(props: &AlertProps) -> Html {
    if props.message.is_empty() {
        return html! {};
    }
    html! {
        <div class={props.kind.class()} role="alert">
            <p>{ props.message.clone() }</p>
            if let Some(on_close) = props.on_close.clone() {
                <button class="alert-close" onclick={on_close}>{"✕"}</button>
            }
        </div>
    }
}
