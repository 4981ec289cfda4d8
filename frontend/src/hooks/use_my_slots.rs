use shared::MySlotsResponse;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::FetchState;
use crate::services::api::ApiClient;
use crate::services::auth::AuthSession;

pub struct UseMySlotsResult {
    pub state: FetchState<MySlotsResponse>,
    pub refresh: Callback<()>,
}

/// Load the owner's own slots for the dashboard calendar. `refresh` is
/// re-emitted after a sync trigger so the grid picks up regenerated slots.
#[hook]
pub fn use_my_slots(api: ApiClient, auth: AuthSession) -> UseMySlotsResult {
    let state = use_state(|| FetchState::Loading);
    let generation = use_mut_ref(|| 0u64);

    let refresh = {
        let state = state.clone();
        let generation = generation.clone();
        let api = api.clone();
        let auth = auth.clone();
        use_callback((), move |_, _| {
            *generation.borrow_mut() += 1;
            let this_generation = *generation.borrow();
            let state = state.clone();
            let generation = generation.clone();
            let api = api.clone();
            let auth = auth.clone();
            state.set(FetchState::Loading);
            spawn_local(async move {
                let result = api.fetch_my_slots(&auth).await;
                if *generation.borrow() != this_generation {
                    return;
                }
                match result {
                    Ok(data) => state.set(FetchState::Loaded(data)),
                    Err(e) => {
                        gloo::console::error!(format!("Failed to fetch own slots: {}", e));
                        state.set(FetchState::Failed(e));
                    }
                }
            });
        })
    };

    {
        let refresh = refresh.clone();
        let generation = generation.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            move || {
                *generation.borrow_mut() += 1;
            }
        });
    }

    UseMySlotsResult {
        state: (*state).clone(),
        refresh,
    }
}
