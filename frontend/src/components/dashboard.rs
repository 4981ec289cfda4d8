use shared::grid::SlotFilter;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::alert::{Alert, AlertKind};
use crate::components::calendar_grid::CalendarGrid;
use crate::components::login::LoginView;
use crate::components::settings_panel::SettingsPanel;
use crate::components::spinner::Spinner;
use crate::hooks::use_my_slots::use_my_slots;
use crate::hooks::use_settings::use_settings;
use crate::hooks::FetchState;
use crate::services::api::ApiClient;
use crate::services::auth::AuthSession;

/// Owner's view at `/`: login card when no token is stored, otherwise the
/// dashboard proper. The OAuth return leg lands here with `?token=…`,
/// which is persisted and stripped before the logged-in check.
#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let api = use_memo((), |_| ApiClient::new());
    let auth = AuthSession::new();
    let logged_in = {
        let auth = auth.clone();
        use_state(move || {
            auth.capture_token_from_url();
            auth.is_logged_in()
        })
    };

    let on_logout = {
        let logged_in = logged_in.clone();
        let auth = auth.clone();
        Callback::from(move |_: ()| {
            auth.clear();
            logged_in.set(false);
        })
    };

    if *logged_in {
        html! { <DashboardView api={(*api).clone()} {on_logout} /> }
    } else {
        html! { <LoginView api={(*api).clone()} /> }
    }
}

#[derive(Properties, PartialEq)]
struct DashboardViewProps {
    api: ApiClient,
    on_logout: Callback<()>,
}

#[function_component(DashboardView)]
fn dashboard_view(props: &DashboardViewProps) -> Html {
    let auth = AuthSession::new();
    let slots = use_my_slots(props.api.clone(), auth.clone());
    let settings = use_settings(props.api.clone(), auth.clone());

    let syncing = use_state(|| false);
    let sync_message = use_state(|| Option::<(AlertKind, String)>::None);
    // Completions that arrive after teardown are dropped
    let alive = use_mut_ref(|| true);
    {
        let alive = alive.clone();
        use_effect_with((), move |_| {
            move || {
                *alive.borrow_mut() = false;
            }
        });
    }

    let on_sync = {
        let api = props.api.clone();
        let auth = auth.clone();
        let syncing = syncing.clone();
        let sync_message = sync_message.clone();
        let refresh = slots.refresh.clone();
        let alive = alive.clone();
        Callback::from(move |_: MouseEvent| {
            if *syncing {
                return;
            }
            syncing.set(true);
            sync_message.set(None);
            let api = api.clone();
            let auth = auth.clone();
            let syncing = syncing.clone();
            let sync_message = sync_message.clone();
            let refresh = refresh.clone();
            let alive = alive.clone();
            spawn_local(async move {
                let result = api.trigger_sync(&auth).await;
                if !*alive.borrow() {
                    return;
                }
                syncing.set(false);
                match result {
                    Ok(response) => {
                        sync_message.set(Some((AlertKind::Success, response.message)));
                        refresh.emit(());
                    }
                    Err(e) => {
                        gloo::console::error!(format!("Sync failed: {}", e));
                        sync_message.set(Some((AlertKind::Error, e.to_string())));
                    }
                }
            });
        })
    };
    let dismiss_sync_message = {
        let sync_message = sync_message.clone();
        Callback::from(move |_: MouseEvent| sync_message.set(None))
    };
    let on_logout = props.on_logout.clone().reform(|_: MouseEvent| ());
    let on_retry = slots.refresh.clone().reform(|_: MouseEvent| ());

    html! {
        <main class="dashboard">
            <header class="dashboard-header">
                <h1>{"Schedule Sync"}</h1>
                <div class="header-actions">
                    <button class="primary" onclick={on_sync} disabled={*syncing}>
                        { if *syncing { "Syncing..." } else { "Sync Calendar" } }
                    </button>
                    <button class="secondary" onclick={on_logout}>{"Log out"}</button>
                </div>
            </header>

            if let Some((kind, message)) = &*sync_message {
                <Alert
                    message={message.clone()}
                    kind={*kind}
                    on_close={dismiss_sync_message}
                />
            }

            <SettingsPanel
                state={settings.state.clone()}
                edit={settings.edit.clone()}
                save={settings.save.clone()}
                dismiss_error={settings.dismiss_error.clone()}
            />

            <section class="my-calendar">
                {
                    match &slots.state {
                        FetchState::Loading => html! { <Spinner text="Loading your slots..." /> },
                        FetchState::Failed(error) => html! {
                            <div class="card error">
                                <Alert message={error.to_string()} kind={AlertKind::Error} />
                                <button class="secondary" onclick={on_retry}>{"Try again"}</button>
                            </div>
                        },
                        FetchState::Loaded(data) => html! {
                            <CalendarGrid
                                slots={data.slots.clone()}
                                filter={SlotFilter::All}
                                on_select={Callback::noop()}
                            />
                        },
                    }
                }
            </section>
        </main>
    }
}
