use agenda_shared::api::CalendarEvent;
use agenda_shared::models::TechnicianId;
use chrono::{Local, NaiveDate};
use yew::prelude::*;

use crate::components::appointment_modals::{CreateModal, DuplicateModal, EditModal};
use crate::components::calendar::{CalendarToolbar, MonthGrid};
use crate::config::AppConfig;
use crate::controller::handle::ControllerHandle;
use crate::controller::{SchedulerController, Surface};
use crate::services::{ApiService, BrowserDialogs};

#[derive(Properties, PartialEq)]
pub struct AgendaProps {
    /// Calendar only: no create, edit or duplicate.
    #[prop_or_default]
    pub read_only: bool,
}

#[function_component(Agenda)]
pub fn agenda(props: &AgendaProps) -> Html {
    let config = use_memo((), |_| AppConfig::load());
    let redraw = use_force_update();
    let handle = {
        let config = config.clone();
        use_memo((), move |_| {
            let controller = SchedulerController::new(
                ApiService::new(config.api_base_url.clone()),
                BrowserDialogs,
                Local::now().date_naive(),
            )
            .on_change(move || redraw.force_update());
            ControllerHandle::new(controller)
        })
    };
    let handle: ControllerHandle = (*handle).clone();

    {
        let handle = handle.clone();
        use_effect_with((), move |_| {
            handle.spawn(|controller| async move {
                controller.refresh().await;
            });
            || ()
        });
    }

    let state = handle.snapshot();

    let on_previous = {
        let handle = handle.clone();
        Callback::from(move |_: ()| handle.previous_month())
    };
    let on_next = {
        let handle = handle.clone();
        Callback::from(move |_: ()| handle.next_month())
    };
    let on_today = {
        let handle = handle.clone();
        Callback::from(move |_: ()| handle.go_to_today())
    };
    let on_filter = {
        let handle = handle.clone();
        Callback::from(move |technician: Option<TechnicianId>| {
            handle.spawn(move |controller| async move {
                controller.set_technician_filter(technician).await;
            })
        })
    };

    let (on_day_click, on_event_click) = if props.read_only {
        (None, None)
    } else {
        let on_day_click = {
            let handle = handle.clone();
            Callback::from(move |date: NaiveDate| handle.day_click(date))
        };
        let on_event_click = {
            let handle = handle.clone();
            Callback::from(move |event: CalendarEvent| {
                handle.spawn(move |controller| async move {
                    controller.event_click(&event).await;
                })
            })
        };
        (Some(on_day_click), Some(on_event_click))
    };

    let surface = if props.read_only {
        Surface::None
    } else {
        state.surface
    };

    html! {
        <div class="container-fluid py-3">
            <CalendarToolbar
                calendar={state.calendar.clone()}
                technicians={config.technicians.clone()}
                on_previous={on_previous}
                on_next={on_next}
                on_today={on_today}
                on_filter={on_filter}
            />
            <MonthGrid
                calendar={state.calendar.clone()}
                on_day_click={on_day_click}
                on_event_click={on_event_click}
            />
            {match surface {
                Surface::Create => html! {
                    <CreateModal
                        handle={handle.clone()}
                        form={state.create.clone()}
                        units={state.create_units.clone()}
                        clients={config.clients.clone()}
                        technicians={config.technicians.clone()}
                    />
                },
                Surface::Edit => html! {
                    <EditModal
                        handle={handle.clone()}
                        form={state.edit.clone()}
                        units={state.edit_units.clone()}
                        clients={config.clients.clone()}
                        technicians={config.technicians.clone()}
                    />
                },
                Surface::Duplicate => html! {
                    <DuplicateModal handle={handle.clone()} form={state.duplicate.clone()} />
                },
                Surface::None => html! {},
            }}
        </div>
    }
}
