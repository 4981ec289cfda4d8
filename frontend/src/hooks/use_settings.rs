use std::rc::Rc;

use shared::settings::{SettingsAction, SettingsForm};
use shared::UserSettings;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::auth::AuthSession;

/// Reducer wrapper so edits and save/load completions always apply to the
/// current form, not a render-time snapshot.
struct SettingsFormState(SettingsForm);

impl Reducible for SettingsFormState {
    type Action = SettingsAction;

    fn reduce(self: Rc<Self>, action: SettingsAction) -> Rc<Self> {
        let mut next = self.0.clone();
        next.apply(action);
        Rc::new(SettingsFormState(next))
    }
}

pub struct UseSettingsResult {
    pub state: SettingsForm,
    pub edit: Callback<UserSettings>,
    pub save: Callback<()>,
    pub dismiss_error: Callback<()>,
}

#[hook]
pub fn use_settings(api: ApiClient, auth: AuthSession) -> UseSettingsResult {
    let form = use_reducer(|| SettingsFormState(SettingsForm::new()));

    {
        let form = form.clone();
        let api = api.clone();
        let auth = auth.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api.fetch_settings(&auth).await {
                    Ok(settings) => form.dispatch(SettingsAction::Loaded(settings)),
                    Err(e) => {
                        gloo::console::error!(format!("Failed to fetch settings: {}", e));
                        form.dispatch(SettingsAction::LoadFailed(format!(
                            "Could not load settings: {}",
                            e
                        )));
                    }
                }
            });
        });
    }

    // The PUT fires when the form enters the saving state, with whatever
    // the form holds at that moment as the payload.
    {
        let form = form.clone();
        let saving = form.0.saving;
        use_effect_with(saving, move |saving| {
            if *saving {
                let payload = form.0.settings.clone();
                spawn_local(async move {
                    match api.save_settings(&auth, &payload).await {
                        Ok(echo) => form.dispatch(SettingsAction::SaveSucceeded(echo)),
                        Err(e) => {
                            gloo::console::error!(format!("Failed to save settings: {}", e));
                            form.dispatch(SettingsAction::SaveFailed(format!(
                                "Failed to save settings: {}",
                                e
                            )));
                        }
                    }
                });
            }
        });
    }

    let edit = {
        let form = form.clone();
        Callback::from(move |settings: UserSettings| {
            form.dispatch(SettingsAction::Edit(settings))
        })
    };
    let save = {
        let form = form.clone();
        Callback::from(move |_: ()| form.dispatch(SettingsAction::BeginSave))
    };
    let dismiss_error = {
        let form = form.clone();
        Callback::from(move |_: ()| form.dispatch(SettingsAction::DismissError))
    };

    UseSettingsResult {
        state: form.0.clone(),
        edit,
        save,
        dismiss_error,
    }
}
