//! The agenda controller: owns the page state and runs every user action
//! against the scheduling backend.
//!
//! Handlers share one `Rc<SchedulerController>`. State lives in a `RefCell`
//! that is only borrowed between awaits, so several actions can be in flight
//! on the event loop at once; generation tokens in [`CalendarState`] and
//! [`UnitSelect`] keep late responses from overwriting newer ones.

pub mod calendar;
pub mod forms;
pub mod handle;
pub mod state;
pub mod unit_select;

#[cfg(test)]
mod tests;

use std::cell::{Ref, RefCell};

use agenda_shared::api::CalendarEvent;
use agenda_shared::models::{ClientId, TechnicianId};
use chrono::NaiveDate;

use crate::error::{ApiError, Mutation};
use crate::services::{Dialogs, SchedulingApi};

pub use calendar::CalendarState;
pub use forms::{FieldChange, FormKind};
pub use state::{SchedulerState, Surface};
pub use unit_select::{LoadTicket, UnitSelect, UnitSelectPhase};

pub const DELETE_CONFIRMATION: &str = "Tem certeza que deseja excluir este agendamento?";

/// How a user action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Succeeded,
    Failed,
    /// The user declined the confirmation; nothing was sent.
    Declined,
}

pub struct SchedulerController<A, D> {
    api: A,
    dialogs: D,
    state: RefCell<SchedulerState>,
    redraw: Option<Box<dyn Fn()>>,
}

impl<A: SchedulingApi, D: Dialogs> SchedulerController<A, D> {
    pub fn new(api: A, dialogs: D, today: NaiveDate) -> Self {
        Self {
            api,
            dialogs,
            state: RefCell::new(SchedulerState::new(today)),
            redraw: None,
        }
    }

    /// Called after every state change, e.g. to re-render the page.
    pub fn on_change(mut self, redraw: impl Fn() + 'static) -> Self {
        self.redraw = Some(Box::new(redraw));
        self
    }

    pub fn state(&self) -> Ref<'_, SchedulerState> {
        self.state.borrow()
    }

    pub fn snapshot(&self) -> SchedulerState {
        self.state.borrow().clone()
    }

    fn update<R>(&self, f: impl FnOnce(&mut SchedulerState) -> R) -> R {
        let result = {
            let mut state = self.state.borrow_mut();
            f(&mut state)
        };
        if let Some(redraw) = &self.redraw {
            redraw();
        }
        result
    }

    // ------------------------------------------------------------------
    // Calendar view
    // ------------------------------------------------------------------

    /// Fetches the appointment listing and replaces the rendered events.
    pub async fn refresh(&self) {
        let (generation, technician) = self.update(|state| {
            (
                state.calendar.begin_fetch(),
                state.calendar.technician_filter(),
            )
        });

        match self.api.list_events(technician).await {
            Ok(events) => {
                let count = events.len();
                if self.update(|state| state.calendar.complete_fetch(generation, events)) {
                    tracing::debug!(count, "appointments loaded");
                } else {
                    tracing::debug!(generation, "dropping stale appointment listing");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load appointments");
                self.update(|state| state.calendar.fail_fetch(generation));
            }
        }
    }

    pub async fn set_technician_filter(&self, technician: Option<TechnicianId>) {
        self.update(|state| state.calendar.set_technician_filter(technician));
        self.refresh().await;
    }

    pub fn previous_month(&self) {
        self.update(|state| state.calendar.previous_month());
    }

    pub fn next_month(&self) {
        self.update(|state| state.calendar.next_month());
    }

    pub fn go_to_today(&self) {
        self.update(|state| state.calendar.go_to_today());
    }

    /// Empty day clicked: open the create form on that date.
    pub fn day_click(&self, date: NaiveDate) {
        self.update(|state| {
            state.create.date = Some(date);
            state.show(Surface::Create);
        });
    }

    /// Event clicked: load it into the edit form and restore its unit once
    /// the client's units arrive. Masked events are ignored.
    pub async fn event_click(&self, event: &CalendarEvent) {
        let Some(details) = event.extended_props.as_ref().filter(|_| event.is_editable()) else {
            tracing::debug!(title = %event.title, "event has no details, not editable");
            return;
        };

        let ticket = self.update(|state| {
            state.edit = forms::EditForm::from_event(event);
            state.show(Surface::Edit);
            match details.client_id {
                Some(client) => Some(state.edit_units.begin_load(client, details.unit_id)),
                None => {
                    state.edit_units.reset();
                    None
                }
            }
        });

        if let Some(ticket) = ticket {
            self.load_units(FormKind::Edit, ticket).await;
        }
    }

    // ------------------------------------------------------------------
    // Forms
    // ------------------------------------------------------------------

    pub fn edit_field(&self, kind: FormKind, change: FieldChange) {
        self.update(|state| state.apply(kind, change));
    }

    /// Client changed in the create or edit form: replace the paired unit
    /// options with that client's units.
    pub async fn change_client(&self, kind: FormKind, client: Option<ClientId>) {
        let ticket = self.update(|state| {
            match kind {
                FormKind::Create => state.create.draft.client_id = client,
                FormKind::Edit => state.edit.draft.client_id = client,
                FormKind::Duplicate => return None,
            }
            let units = state.units_mut(kind)?;
            match client {
                Some(client) => Some(units.begin_load(client, None)),
                None => {
                    units.reset();
                    None
                }
            }
        });

        if let Some(ticket) = ticket {
            self.load_units(kind, ticket).await;
        }
    }

    async fn load_units(&self, kind: FormKind, ticket: LoadTicket) {
        let result = self.api.list_units(ticket.client()).await;
        let applied = self.update(|state| {
            let Some(units) = state.units_mut(kind) else {
                return false;
            };
            match &result {
                Ok(list) => units.complete(ticket, list.clone()),
                Err(_) => units.fail(ticket),
            }
        });

        match result {
            Err(e) if applied => {
                tracing::warn!(client = ticket.client(), error = %e, "failed to load units")
            }
            _ if !applied => {
                tracing::debug!(client = ticket.client(), "dropping stale unit list")
            }
            _ => {}
        }
    }

    pub fn close_surface(&self) {
        self.update(|state| {
            let surface = state.surface;
            state.close(surface);
        });
    }

    pub async fn submit_create(&self) -> ActionOutcome {
        let (session, fields) = {
            let state = self.state.borrow();
            (
                state.session(),
                state
                    .create
                    .draft
                    .to_fields(state.create_units.selected(), state.create.date),
            )
        };

        let result = self.api.create_appointment(&fields).await;
        self.finish(Mutation::Create, Surface::Create, session, result)
            .await
    }

    pub async fn submit_update(&self) -> ActionOutcome {
        let (session, id, fields) = {
            let state = self.state.borrow();
            (
                state.session(),
                state.edit.appointment_id,
                state.edit.draft.to_fields(state.edit_units.selected(), None),
            )
        };

        let result = match id {
            Some(id) => self.api.update_appointment(id, &fields).await,
            None => Err(ApiError::MissingId),
        };
        self.finish(Mutation::Update, Surface::Edit, session, result)
            .await
    }

    /// Deletes the appointment in the edit form after the user confirms.
    pub async fn delete(&self) -> ActionOutcome {
        let (session, id) = {
            let state = self.state.borrow();
            (state.session(), state.edit.appointment_id)
        };
        if !self.dialogs.confirm(DELETE_CONFIRMATION) {
            return ActionOutcome::Declined;
        }

        let result = match id {
            Some(id) => self.api.delete_appointment(id).await,
            None => Err(ApiError::MissingId),
        };
        self.finish(Mutation::Delete, Surface::Edit, session, result)
            .await
    }

    /// Swaps the edit form for the duplicate form, carrying the id over.
    pub fn duplicate_intent(&self) {
        self.update(|state| {
            state.duplicate.source_id = state.edit.appointment_id;
            state.close(Surface::Edit);
            state.show(Surface::Duplicate);
        });
    }

    pub async fn submit_duplicate(&self) -> ActionOutcome {
        let (session, id, fields) = {
            let state = self.state.borrow();
            (
                state.session(),
                state.duplicate.source_id,
                state.duplicate.to_fields(),
            )
        };

        let result = match id {
            Some(id) => self.api.duplicate_appointment(id, &fields).await,
            None => Err(ApiError::MissingId),
        };
        self.finish(Mutation::Duplicate, Surface::Duplicate, session, result)
            .await
    }

    async fn finish(
        &self,
        mutation: Mutation,
        surface: Surface,
        session: u64,
        result: Result<(), ApiError>,
    ) -> ActionOutcome {
        match result {
            Ok(()) => {
                tracing::info!(?mutation, "appointment saved");
                if !self.update(|state| state.close_if_current(surface, session)) {
                    tracing::debug!(?mutation, "form changed while saving, leaving it open");
                }
                self.refresh().await;
                ActionOutcome::Succeeded
            }
            Err(e) => {
                tracing::warn!(?mutation, error = %e, "appointment request failed");
                self.dialogs.alert(mutation.failure_message());
                ActionOutcome::Failed
            }
        }
    }
}
