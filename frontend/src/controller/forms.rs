//! Field values of the create, edit and duplicate forms.

use agenda_shared::api::{AppointmentFields, CalendarEvent, DuplicateFields};
use agenda_shared::models::{AppointmentId, AppointmentStatus, ClientId, TechnicianId, UnitId};
use chrono::NaiveDate;

/// Which form a client or field change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Create,
    Edit,
    Duplicate,
}

/// A single field edit coming from the UI. Client changes go through
/// `SchedulerController::change_client` since they reload the units.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Unit(Option<UnitId>),
    Technician(Option<TechnicianId>),
    Status(AppointmentStatus),
    Observations(String),
    Date(Option<NaiveDate>),
}

/// Fields common to the create and edit forms. The unit lives in the paired
/// `UnitSelect`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentDraft {
    pub client_id: Option<ClientId>,
    pub technician_id: Option<TechnicianId>,
    pub status: AppointmentStatus,
    pub observations: String,
}

impl AppointmentDraft {
    pub fn to_fields(&self, unit_id: Option<UnitId>, date: Option<NaiveDate>) -> AppointmentFields {
        AppointmentFields {
            client_id: self.client_id,
            unit_id,
            technician_id: self.technician_id,
            status: self.status.clone(),
            observations: self.observations.clone(),
            date,
        }
    }

    /// Applies `change`; returns false when the field is not part of a draft.
    fn apply(&mut self, change: FieldChange) -> bool {
        match change {
            FieldChange::Technician(technician) => self.technician_id = technician,
            FieldChange::Status(status) => self.status = status,
            FieldChange::Observations(text) => self.observations = text,
            FieldChange::Unit(_) | FieldChange::Date(_) => return false,
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateForm {
    pub date: Option<NaiveDate>,
    pub draft: AppointmentDraft,
}

impl CreateForm {
    pub fn apply(&mut self, change: FieldChange) {
        match change {
            FieldChange::Date(date) => self.date = date,
            other => {
                self.draft.apply(other);
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditForm {
    /// Hidden field: the appointment being edited.
    pub appointment_id: Option<AppointmentId>,
    pub draft: AppointmentDraft,
}

impl EditForm {
    /// Copies an event's stored values. The unit is restored separately,
    /// once the client's units have been fetched. A missing status stays
    /// blank rather than turning into one of the known labels.
    pub fn from_event(event: &CalendarEvent) -> Self {
        let details = event.extended_props.clone().unwrap_or_default();
        Self {
            appointment_id: event.appointment_id(),
            draft: AppointmentDraft {
                client_id: details.client_id,
                technician_id: details.technician_id,
                status: details
                    .status
                    .unwrap_or_else(|| AppointmentStatus::Other(String::new())),
                observations: details.observations.unwrap_or_default(),
            },
        }
    }

    pub fn apply(&mut self, change: FieldChange) {
        self.draft.apply(change);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DuplicateForm {
    /// Appointment the copy is made from, carried over from the edit form.
    pub source_id: Option<AppointmentId>,
    pub date: Option<NaiveDate>,
}

impl DuplicateForm {
    pub fn to_fields(&self) -> DuplicateFields {
        DuplicateFields { date: self.date }
    }

    pub fn apply(&mut self, change: FieldChange) {
        if let FieldChange::Date(date) = change {
            self.date = date;
        }
    }
}
