use chrono::{Datelike, Duration};
use shared::grid::{cell_state, interval_label, time_intervals, CellState, SlotFilter, SlotIndex, WeekWindow};
use shared::Slot;
use yew::prelude::*;

use crate::services::dates::{format_week_range, today, viewer_offset, weekday_short};

// Fixed grid shape; the backend only generates slots inside working hours
const GRID_START_HOUR: u32 = 9;
const GRID_END_HOUR: u32 = 18;
const GRID_STEP_MINUTES: u32 = 30;

#[derive(Properties, PartialEq)]
pub struct CalendarGridProps {
    pub slots: Vec<Slot>,
    /// Public page drops booked slots; dashboard keeps them as blocked
    pub filter: SlotFilter,
    #[prop_or_default]
    pub selected_slot_id: Option<AttrValue>,
    pub on_select: Callback<Slot>,
}

/// The weekly calendar: Monday-start week columns crossed with half-hour
/// rows. The whole grid recomputes from (view date, slots) on any change;
/// there is no partial update.
#[function_component(CalendarGrid)]
pub fn calendar_grid(props: &CalendarGridProps) -> Html {
    let view_date = use_state(today);

    let week = WeekWindow::containing(*view_date);
    let times = time_intervals(GRID_START_HOUR, GRID_END_HOUR, GRID_STEP_MINUTES);
    let index = SlotIndex::build(&props.slots, props.filter);
    let offset = viewer_offset();

    let prev_week = {
        let view_date = view_date.clone();
        Callback::from(move |_: MouseEvent| {
            view_date.set(*view_date - Duration::days(7));
        })
    };
    let next_week = {
        let view_date = view_date.clone();
        Callback::from(move |_: MouseEvent| {
            view_date.set(*view_date + Duration::days(7));
        })
    };

    html! {
        <div class="calendar">
            <div class="calendar-controls">
                <button class="week-nav" onclick={prev_week}>{"‹ Prev"}</button>
                <h3 class="week-range">{ format_week_range(week.monday(), week.sunday()) }</h3>
                <button class="week-nav" onclick={next_week}>{"Next ›"}</button>
            </div>
            <div class="calendar-grid">
                <div class="calendar-row calendar-header">
                    <div class="time-gutter"></div>
                    { for week.days().iter().map(|day| html! {
                        <div class="day-header" key={day.to_string()}>
                            <div class="day-name">{ weekday_short(*day) }</div>
                            <div class="day-number">{ day.day() }</div>
                        </div>
                    })}
                </div>
                { for times.iter().map(|time| {
                    let label = interval_label(*time);
                    html! {
                        <div class="calendar-row" key={label.clone()}>
                            <div class="time-gutter">{ &label }</div>
                            { for week.days().iter().map(|day| {
                                let cell = cell_state(&index, *day, *time, offset);
                                let key = format!("{}T{}", day, label);
                                match cell {
                                    CellState::Empty => html! {
                                        <div class="cell cell-empty" {key}></div>
                                    },
                                    CellState::Available(slot) => {
                                        let selected = props
                                            .selected_slot_id
                                            .as_deref()
                                            .is_some_and(|id| id == slot.slot_id);
                                        let class = if selected {
                                            "cell cell-available selected"
                                        } else {
                                            "cell cell-available"
                                        };
                                        let onclick = {
                                            let on_select = props.on_select.clone();
                                            let slot = slot.clone();
                                            Callback::from(move |_: MouseEvent| {
                                                on_select.emit(slot.clone());
                                            })
                                        };
                                        html! {
                                            <button {class} {key} {onclick}>{ &label }</button>
                                        }
                                    }
                                    CellState::Booked(_) => html! {
                                        <div class="cell cell-booked" {key}>{ &label }</div>
                                    },
                                }
                            })}
                        </div>
                    }
                })}
            </div>
        </div>
    }
}
