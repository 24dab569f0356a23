use agenda_shared::api::CalendarEvent;
use yew::prelude::*;

use crate::controller::calendar::tooltip_rows;

#[derive(Properties, PartialEq)]
pub struct EventChipProps {
    pub event: CalendarEvent,
    /// `None` renders the event as inert.
    #[prop_or_default]
    pub on_click: Option<Callback<CalendarEvent>>,
}

/// One appointment block inside a day cell, with a hover card.
#[function_component(EventChip)]
pub fn event_chip(props: &EventChipProps) -> Html {
    let event = &props.event;
    let clickable = props.on_click.is_some() && event.is_editable();

    let onclick = {
        let event = event.clone();
        let on_click = props.on_click.clone();
        Callback::from(move |e: MouseEvent| {
            // Keep the day cell from treating this as a click on empty space.
            e.stop_propagation();
            if let Some(on_click) = &on_click {
                if event.is_editable() {
                    on_click.emit(event.clone());
                }
            }
        })
    };

    let rows = tooltip_rows(event);
    let style = format!("background:{};", event.color());

    html! {
        <div
            class={classes!("agenda-event", clickable.then_some("agenda-event-clickable"))}
            onclick={onclick}
        >
            <div class="agenda-event-title" style={style}>{ &event.title }</div>
            if !rows.is_empty() {
                <div class="agenda-tooltip" role="tooltip">
                    { for rows.into_iter().map(|(label, value)| html! {
                        <div><b>{ format!("{}:", label) }</b>{ " " }{ value }</div>
                    })}
                </div>
            }
        </div>
    }
}
