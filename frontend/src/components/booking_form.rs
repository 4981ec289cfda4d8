use shared::session::{BookingSession, SubmissionState};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::alert::{Alert, AlertKind};
use crate::services::dates::{format_slot_time, viewer_offset};

#[derive(Properties, PartialEq)]
pub struct BookingFormProps {
    pub session: BookingSession,
    pub set_name: Callback<String>,
    pub set_email: Callback<String>,
    pub submit: Callback<()>,
    pub cancel: Callback<()>,
    pub dismiss: Callback<()>,
}

/// Name/email form under the grid, shown once a slot is selected. Failed
/// attempts keep the entered fields so a retry needs no retyping.
#[function_component(BookingForm)]
pub fn booking_form(props: &BookingFormProps) -> Html {
    let Some(selected) = &props.session.selected_slot else {
        return html! {};
    };
    let submitting = props.session.is_submitting();

    let oninput_name = {
        let set_name = props.set_name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set_name.emit(input.value());
        })
    };
    let oninput_email = {
        let set_email = props.set_email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set_email.emit(input.value());
        })
    };
    let onsubmit = {
        let submit = props.submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit.emit(());
        })
    };
    let oncancel = {
        let cancel = props.cancel.clone();
        Callback::from(move |_: MouseEvent| cancel.emit(()))
    };

    html! {
        <div class="booking-form">
            <h3>
                {"Confirm your booking for "}
                { format_slot_time(selected.start_time, viewer_offset()) }
            </h3>
            <form {onsubmit}>
                <div class="form-field">
                    <label for="booker-name">{"Your Name"}</label>
                    <input
                        id="booker-name"
                        type="text"
                        value={props.session.booker_name.clone()}
                        oninput={oninput_name}
                        disabled={submitting}
                    />
                </div>
                <div class="form-field">
                    <label for="booker-email">{"Your Email"}</label>
                    <input
                        id="booker-email"
                        type="email"
                        value={props.session.booker_email.clone()}
                        oninput={oninput_email}
                        disabled={submitting}
                    />
                </div>
                if let Some(message) = &props.session.validation_error {
                    <Alert message={message.clone()} kind={AlertKind::Error} />
                }
                if let SubmissionState::Failed(reason) = &props.session.state {
                    <Alert
                        message={reason.clone()}
                        kind={AlertKind::Error}
                        on_close={props.dismiss.clone().reform(|_| ())}
                    />
                }
                <div class="form-actions">
                    <button type="submit" class="primary" disabled={submitting}>
                        { if submitting { "Booking..." } else { "Confirm Booking" } }
                    </button>
                    <button type="button" class="secondary" onclick={oncancel} disabled={submitting}>
                        {"Cancel"}
                    </button>
                </div>
            </form>
        </div>
    }
}
