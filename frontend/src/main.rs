mod components;
mod hooks;
mod services;

use yew::prelude::*;

use components::booking_page::BookingPage;
use components::dashboard::DashboardPage;

/// Which top-level view the URL selects: the owner dashboard at `/`, or a
/// public booking page at `/{token}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Dashboard,
    Booking { token: String },
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let segment = path.trim_matches('/');
        if segment.is_empty() || segment.contains('/') {
            Route::Dashboard
        } else {
            Route::Booking {
                token: segment.to_string(),
            }
        }
    }

    fn from_window() -> Self {
        let path = web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string());
        Self::parse(&path)
    }
}

#[function_component(App)]
fn app() -> Html {
    let route = use_memo((), |_| Route::from_window());
    match &*route {
        Route::Dashboard => html! { <DashboardPage /> },
        Route::Booking { token } => html! {
            <BookingPage token={AttrValue::from(token.clone())} />
        },
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
