use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SpinnerProps {
    #[prop_or_else(|| AttrValue::from("Loading..."))]
    pub text: AttrValue,
}

#[function_component(Spinner)]
pub fn spinner(props: &SpinnerProps) -> Html {
    html! {
        <div class="spinner">
            <div class="spinner-ring"></div>
            <p class="spinner-text">{ props.text.clone() }</p>
        </div>
    }
}
