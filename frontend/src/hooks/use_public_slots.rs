use shared::PublicSlotsResponse;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::FetchState;
use crate::services::api::ApiClient;

pub struct UsePublicSlotsResult {
    pub state: FetchState<PublicSlotsResponse>,
    pub refresh: Callback<()>,
}

/// Load the public booking page's data for one URL token, with an explicit
/// refresh for the post-booking refetch.
#[hook]
pub fn use_public_slots(api: ApiClient, token: String) -> UsePublicSlotsResult {
    let state = use_state(|| FetchState::Loading);
    // Bumped on every fetch and on teardown; a completion whose generation
    // no longer matches is discarded instead of applied to stale state.
    let generation = use_mut_ref(|| 0u64);

    let refresh = {
        let state = state.clone();
        let generation = generation.clone();
        let api = api.clone();
        let token = token.clone();
        use_callback((), move |_, _| {
            *generation.borrow_mut() += 1;
            let this_generation = *generation.borrow();
            let state = state.clone();
            let generation = generation.clone();
            let api = api.clone();
            let token = token.clone();
            state.set(FetchState::Loading);
            spawn_local(async move {
                let result = api.fetch_public_slots(&token).await;
                if *generation.borrow() != this_generation {
                    return;
                }
                match result {
                    Ok(data) => state.set(FetchState::Loaded(data)),
                    Err(e) => {
                        gloo::console::error!(format!("Failed to fetch public slots: {}", e));
                        state.set(FetchState::Failed(e));
                    }
                }
            });
        })
    };

    {
        let refresh = refresh.clone();
        let generation = generation.clone();
        use_effect_with(token, move |_| {
            refresh.emit(());
            move || {
                *generation.borrow_mut() += 1;
            }
        });
    }

    UsePublicSlotsResult {
        state: (*state).clone(),
        refresh,
    }
}
