use shared::grid::SlotFilter;
use shared::session::SubmissionState;
use shared::{Slot, SlotStatus};
use yew::prelude::*;

use crate::components::booking_form::BookingForm;
use crate::components::calendar_grid::CalendarGrid;
use crate::components::spinner::Spinner;
use crate::hooks::use_booking::use_booking;
use crate::hooks::use_public_slots::use_public_slots;
use crate::hooks::FetchState;
use crate::services::api::ApiClient;

/// Booked slots never render on the public page, so a collection with no
/// available slot shows the empty-state message instead of the grid.
fn has_available_slots(slots: &[Slot]) -> bool {
    slots.iter().any(|slot| slot.status == SlotStatus::Available)
}

#[derive(Properties, PartialEq)]
pub struct BookingPageProps {
    /// Public URL token identifying whose calendar this is
    pub token: AttrValue,
}

/// The anonymous booking page: fetch the owner's available slots, let the
/// visitor pick a cell and submit. A confirmed booking refetches the slot
/// collection so the taken slot drops out of the grid.
#[function_component(BookingPage)]
pub fn booking_page(props: &BookingPageProps) -> Html {
    let api = use_memo((), |_| ApiClient::new());
    let slots = use_public_slots((*api).clone(), props.token.to_string());
    let booking = use_booking(
        (*api).clone(),
        props.token.to_string(),
        slots.refresh.clone(),
    );

    if let SubmissionState::Succeeded(message) = &booking.session.state {
        let on_dismiss = booking.dismiss.clone().reform(|_: MouseEvent| ());
        return html! {
            <main class="booking-page">
                <div class="card confirmation">
                    <h1>{"Booking Confirmed!"}</h1>
                    <p>{ message.clone() }</p>
                    <button class="primary" onclick={on_dismiss}>{"Book another slot"}</button>
                </div>
            </main>
        };
    }

    match &slots.state {
        FetchState::Loading => html! {
            <main class="booking-page">
                <Spinner />
            </main>
        },
        FetchState::Failed(error) => html! {
            <main class="booking-page">
                <div class="card error">
                    <h1>{"Error"}</h1>
                    <p>{ error.to_string() }</p>
                </div>
            </main>
        },
        FetchState::Loaded(data) => {
            if !has_available_slots(&data.slots) {
                return html! {
                    <main class="booking-page">
                        <h1>{ format!("Book a meeting with {}", data.user_name) }</h1>
                        <div class="card empty">
                            <p>{"No available slots at this time."}</p>
                        </div>
                    </main>
                };
            }
            let selected_slot_id = booking
                .session
                .selected_slot
                .as_ref()
                .map(|slot| AttrValue::from(slot.slot_id.clone()));
            html! {
                <main class="booking-page">
                    <h1>{ format!("Book a meeting with {}", data.user_name) }</h1>
                    <p class="subtitle">{"Select an available time slot below."}</p>
                    <CalendarGrid
                        slots={data.slots.clone()}
                        filter={SlotFilter::AvailableOnly}
                        {selected_slot_id}
                        on_select={booking.select.clone()}
                    />
                    <BookingForm
                        session={booking.session.clone()}
                        set_name={booking.set_name.clone()}
                        set_email={booking.set_email.clone()}
                        submit={booking.submit.clone()}
                        cancel={booking.cancel.clone()}
                        dismiss={booking.dismiss.clone()}
                    />
                </main>
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn slot(id: &str, status: SlotStatus) -> Slot {
        Slot {
            slot_id: id.to_string(),
            start_time: Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 6, 3, 9, 30, 0).unwrap(),
            status,
        }
    }

    #[wasm_bindgen_test]
    fn an_empty_collection_has_no_available_slots() {
        assert!(!has_available_slots(&[]));
    }

    #[wasm_bindgen_test]
    fn a_fully_booked_collection_has_no_available_slots() {
        let slots = vec![slot("s1", SlotStatus::Booked), slot("s2", SlotStatus::Booked)];
        assert!(!has_available_slots(&slots));
    }

    #[wasm_bindgen_test]
    fn one_available_slot_is_enough_to_show_the_grid() {
        let slots = vec![slot("s1", SlotStatus::Booked), slot("s2", SlotStatus::Available)];
        assert!(has_available_slots(&slots));
    }
}
