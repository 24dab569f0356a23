use agenda_shared::api::CalendarEvent;
use agenda_shared::models::{Technician, TechnicianId};
use chrono::{Datelike, NaiveDate};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::event_chip::EventChip;
use crate::controller::calendar::{CalendarState, WEEKDAY_LABELS};

#[derive(Properties, PartialEq)]
pub struct CalendarToolbarProps {
    pub calendar: CalendarState,
    pub technicians: Vec<Technician>,
    pub on_previous: Callback<()>,
    pub on_next: Callback<()>,
    pub on_today: Callback<()>,
    pub on_filter: Callback<Option<TechnicianId>>,
}

#[function_component(CalendarToolbar)]
pub fn calendar_toolbar(props: &CalendarToolbarProps) -> Html {
    let on_previous = props.on_previous.reform(|_: MouseEvent| ());
    let on_next = props.on_next.reform(|_: MouseEvent| ());
    let on_today = props.on_today.reform(|_: MouseEvent| ());
    let on_filter = props.on_filter.reform(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        select.value().parse::<TechnicianId>().ok()
    });

    let filter = props.calendar.technician_filter();

    html! {
        <div class="d-flex flex-wrap align-items-center justify-content-between gap-2 mb-3">
            <div class="btn-group">
                <button type="button" class="btn btn-outline-primary" onclick={on_previous}>{ "‹" }</button>
                <button type="button" class="btn btn-outline-primary" onclick={on_next}>{ "›" }</button>
                <button type="button" class="btn btn-outline-secondary" onclick={on_today}>{ "Hoje" }</button>
            </div>
            <h2 class="h4 mb-0 text-capitalize">
                { props.calendar.title() }
                if props.calendar.is_loading() {
                    <span class="spinner-border spinner-border-sm ms-2" role="status"></span>
                }
            </h2>
            <select class="form-select w-auto" onchange={on_filter}>
                <option value="" selected={filter.is_none()}>{ "Todos os técnicos" }</option>
                { for props.technicians.iter().map(|technician| html! {
                    <option
                        value={technician.id.to_string()}
                        selected={filter == Some(technician.id)}
                    >
                        { &technician.name }
                    </option>
                })}
            </select>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct MonthGridProps {
    pub calendar: CalendarState,
    /// `None` makes the grid read-only.
    #[prop_or_default]
    pub on_day_click: Option<Callback<NaiveDate>>,
    #[prop_or_default]
    pub on_event_click: Option<Callback<CalendarEvent>>,
}

#[function_component(MonthGrid)]
pub fn month_grid(props: &MonthGridProps) -> Html {
    let calendar = &props.calendar;

    let day_cell = |day: NaiveDate| {
        let onclick = props
            .on_day_click
            .clone()
            .map(|on_day_click| Callback::from(move |_: MouseEvent| on_day_click.emit(day)));
        let outside = !calendar.in_displayed_month(day);
        let today = day == calendar.today();

        html! {
            <td
                class={classes!(
                    "agenda-day",
                    outside.then_some("agenda-day-outside"),
                    today.then_some("agenda-day-today")
                )}
                onclick={onclick}
            >
                <div class="agenda-day-number">{ day.day() }</div>
                { for calendar.events_on(day).map(|event| html! {
                    <EventChip event={event.clone()} on_click={props.on_event_click.clone()} />
                })}
            </td>
        }
    };

    html! {
        <table class="table table-bordered agenda-month">
            <thead>
                <tr>
                    { for WEEKDAY_LABELS.iter().map(|label| html! { <th class="text-center">{ *label }</th> }) }
                </tr>
            </thead>
            <tbody>
                { for calendar.weeks().into_iter().map(|week| html! {
                    <tr>{ for week.into_iter().map(&day_cell) }</tr>
                })}
            </tbody>
        </table>
    }
}
