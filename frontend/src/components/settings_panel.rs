use shared::grid::{interval_label, time_intervals};
use shared::settings::SettingsForm;
use shared::{UserSettings, SLOT_DURATION_CHOICES};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::alert::{Alert, AlertKind};
use crate::components::spinner::Spinner;

#[derive(Properties, PartialEq)]
pub struct SettingsPanelProps {
    pub state: SettingsForm,
    pub edit: Callback<UserSettings>,
    pub save: Callback<()>,
    pub dismiss_error: Callback<()>,
}

/// Working-hours and slot-duration form. Edits go to a local copy; the
/// backend's echo replaces it once a save lands.
#[function_component(SettingsPanel)]
pub fn settings_panel(props: &SettingsPanelProps) -> Html {
    if props.state.loading {
        return html! {
            <div class="settings-panel">
                <Spinner text="Loading settings..." />
            </div>
        };
    }
    let settings = &props.state.settings;

    // Every half hour of the day, "00:00" through "23:30"
    let time_options: Vec<String> = time_intervals(0, 24, 30)
        .into_iter()
        .map(interval_label)
        .collect();

    let on_start_change = {
        let edit = props.edit.clone();
        let settings = settings.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = settings.clone();
            next.working_hours.start = select.value();
            edit.emit(next);
        })
    };
    let on_end_change = {
        let edit = props.edit.clone();
        let settings = settings.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = settings.clone();
            next.working_hours.end = select.value();
            edit.emit(next);
        })
    };
    let on_duration_change = {
        let edit = props.edit.clone();
        let settings = settings.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(minutes) = select.value().parse::<u32>() {
                let mut next = settings.clone();
                next.slot_duration = minutes;
                edit.emit(next);
            }
        })
    };
    let on_save = {
        let save = props.save.clone();
        Callback::from(move |_: MouseEvent| save.emit(()))
    };

    html! {
        <div class="settings-panel">
            <h2>{"Settings"}</h2>
            if let Some(error) = &props.state.error {
                <Alert
                    message={error.clone()}
                    kind={AlertKind::Error}
                    on_close={props.dismiss_error.clone().reform(|_| ())}
                />
            }
            <div class="settings-fields">
                <div class="settings-field">
                    <label>{"Working Hours"}</label>
                    <div class="working-hours">
                        <select value={settings.working_hours.start.clone()} onchange={on_start_change}>
                            { for time_options.iter().map(|time| html! {
                                <option
                                    key={format!("start-{}", time)}
                                    value={time.clone()}
                                    selected={*time == settings.working_hours.start}
                                >
                                    { time }
                                </option>
                            })}
                        </select>
                        <span>{"to"}</span>
                        <select value={settings.working_hours.end.clone()} onchange={on_end_change}>
                            { for time_options.iter().map(|time| html! {
                                <option
                                    key={format!("end-{}", time)}
                                    value={time.clone()}
                                    selected={*time == settings.working_hours.end}
                                >
                                    { time }
                                </option>
                            })}
                        </select>
                    </div>
                </div>
                <div class="settings-field">
                    <label for="slot-duration">{"Slot Duration"}</label>
                    <select id="slot-duration" onchange={on_duration_change}>
                        { for SLOT_DURATION_CHOICES.iter().map(|minutes| html! {
                            <option
                                key={minutes.to_string()}
                                value={minutes.to_string()}
                                selected={*minutes == settings.slot_duration}
                            >
                                { format!("{} minutes", minutes) }
                            </option>
                        })}
                    </select>
                </div>
            </div>
            <div class="settings-actions">
                <button class="primary" onclick={on_save} disabled={props.state.saving}>
                    { if props.state.saving { "Saving..." } else { "Save Settings" } }
                </button>
            </div>
        </div>
    }
}
