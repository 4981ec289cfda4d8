use std::rc::Rc;

use shared::session::{BookingAction, BookingSession};
use shared::{CreateBookingRequest, Slot};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::dates::{format_slot_time, viewer_offset};

/// Reducer wrapper so every action runs against the current session,
/// regardless of which render the dispatching callback was created in.
struct BookingState(BookingSession);

impl Reducible for BookingState {
    type Action = BookingAction;

    fn reduce(self: Rc<Self>, action: BookingAction) -> Rc<Self> {
        let mut next = self.0.clone();
        next.apply(action);
        Rc::new(BookingState(next))
    }
}

pub struct UseBookingResult {
    pub session: BookingSession,
    pub select: Callback<Slot>,
    pub set_name: Callback<String>,
    pub set_email: Callback<String>,
    pub submit: Callback<()>,
    pub cancel: Callback<()>,
    pub dismiss: Callback<()>,
}

/// Drive the shared [`BookingSession`] from the public booking page.
/// Validation happens synchronously inside the reducer; the network call
/// fires from an effect once the session actually enters the submitting
/// state, so only a valid session issues a request. `on_booked` fires
/// after a confirmed booking so the page can refetch its slot collection.
#[hook]
pub fn use_booking(api: ApiClient, token: String, on_booked: Callback<()>) -> UseBookingResult {
    let session = use_reducer(|| BookingState(BookingSession::new()));

    {
        let session = session.clone();
        let submitting = session.0.is_submitting();
        use_effect_with(submitting, move |submitting| {
            if *submitting {
                if let Some(pending) = session.0.pending() {
                    let start_time = session.0.selected_slot.as_ref().map(|s| s.start_time);
                    let request = CreateBookingRequest {
                        public_url_token: token.clone(),
                        slot_id: pending.slot_id,
                        booker_name: pending.booker_name,
                        booker_email: pending.booker_email,
                    };
                    spawn_local(async move {
                        // The reducer drops completions once the session has
                        // left the submitting state (cancel, teardown).
                        match api.create_booking(&request).await {
                            Ok(()) => {
                                let when = start_time
                                    .map(|t| format_slot_time(t, viewer_offset()))
                                    .unwrap_or_default();
                                session.dispatch(BookingAction::CompleteSuccess(format!(
                                    "Booking confirmed for {}! A calendar invitation has been sent to your email.",
                                    when
                                )));
                                on_booked.emit(());
                            }
                            Err(e) => {
                                gloo::console::error!(format!("Booking failed: {}", e));
                                session.dispatch(BookingAction::CompleteFailure(e.to_string()));
                            }
                        }
                    });
                }
            }
        });
    }

    let select = {
        let session = session.clone();
        Callback::from(move |slot: Slot| session.dispatch(BookingAction::Select(slot)))
    };
    let set_name = {
        let session = session.clone();
        Callback::from(move |name: String| session.dispatch(BookingAction::SetName(name)))
    };
    let set_email = {
        let session = session.clone();
        Callback::from(move |email: String| session.dispatch(BookingAction::SetEmail(email)))
    };
    let submit = {
        let session = session.clone();
        Callback::from(move |_: ()| session.dispatch(BookingAction::Submit))
    };
    let cancel = {
        let session = session.clone();
        Callback::from(move |_: ()| session.dispatch(BookingAction::Cancel))
    };
    let dismiss = {
        let session = session.clone();
        Callback::from(move |_: ()| session.dispatch(BookingAction::Dismiss))
    };

    UseBookingResult {
        session: session.0.clone(),
        select,
        set_name,
        set_email,
        submit,
        cancel,
        dismiss,
    }
}
