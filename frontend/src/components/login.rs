use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::alert::{Alert, AlertKind};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct LoginViewProps {
    pub api: ApiClient,
}

/// Landing card for a logged-out owner. The backend hands back the
/// provider's authorization URL; the browser is sent there and returns
/// with a `?token=` the dashboard captures.
#[function_component(LoginView)]
pub fn login_view(props: &LoginViewProps) -> Html {
    let error = use_state(|| Option::<String>::None);

    let on_login = {
        let api = props.api.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            let api = api.clone();
            let error = error.clone();
            spawn_local(async move {
                match api.initiate_login().await {
                    Ok(response) => {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href(&response.authorization_url);
                        }
                    }
                    Err(e) => {
                        gloo::console::error!(format!("Error during login: {}", e));
                        error.set(Some("Failed to initiate login. Please try again.".to_string()));
                    }
                }
            });
        })
    };
    let dismiss = {
        let error = error.clone();
        Callback::from(move |_: MouseEvent| error.set(None))
    };

    html! {
        <main class="login-page">
            <div class="card">
                <h1>{"Welcome to Schedule Sync"}</h1>
                <p>{"Please log in with your Google account to continue."}</p>
                if let Some(message) = &*error {
                    <Alert message={message.clone()} kind={AlertKind::Error} on_close={dismiss} />
                }
                <button class="primary" onclick={on_login}>{"Login with Google"}</button>
            </div>
        </main>
    }
}
