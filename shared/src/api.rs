use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    AppointmentId, AppointmentStatus, ClientId, TechnicianId, UnitId, DEFAULT_EVENT_COLOR,
};

// ============================================================================
// Endpoints
// ============================================================================

pub mod endpoints {
    use crate::models::{AppointmentId, ClientId};

    pub const EVENTS: &str = "/api/agendamentos";
    pub const CREATE: &str = "/add_agendamento";

    /// Query parameter that restricts [`EVENTS`] to one technician.
    pub const TECHNICIAN_FILTER: &str = "tecnico_id";

    pub fn units(client_id: ClientId) -> String {
        format!("/api/unidades/{}", client_id)
    }

    pub fn update(id: AppointmentId) -> String {
        format!("/update_agendamento/{}", id)
    }

    pub fn delete(id: AppointmentId) -> String {
        format!("/delete_agendamento/{}", id)
    }

    pub fn duplicate(id: AppointmentId) -> String {
        format!("/duplicate_agendamento/{}", id)
    }
}

// ============================================================================
// Calendar events
// ============================================================================

/// One entry of the `/api/agendamentos` listing.
///
/// Events belonging to other clients may come back masked: no id and no
/// `extendedProps`, only a title and a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: Option<AppointmentId>,
    pub title: String,
    /// Date or date-time of the appointment; the backend may leave it null.
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_props: Option<EventDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDetails {
    #[serde(default)]
    pub id: Option<AppointmentId>,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(default, rename = "observacoes")]
    pub observations: Option<String>,
    #[serde(default, rename = "cliente")]
    pub client: Option<String>,
    #[serde(default, rename = "unidade")]
    pub unit: Option<String>,
    #[serde(default, rename = "tecnico")]
    pub technician: Option<String>,
    #[serde(default, rename = "cliente_id")]
    pub client_id: Option<ClientId>,
    #[serde(default, rename = "unidade_id")]
    pub unit_id: Option<UnitId>,
    #[serde(default, rename = "tecnico_id")]
    pub technician_id: Option<TechnicianId>,
}

impl CalendarEvent {
    /// Id of the underlying appointment, preferring the one in
    /// `extendedProps`.
    pub fn appointment_id(&self) -> Option<AppointmentId> {
        self.extended_props
            .as_ref()
            .and_then(|details| details.id)
            .or(self.id)
    }

    pub fn status(&self) -> Option<&AppointmentStatus> {
        self.extended_props
            .as_ref()
            .and_then(|details| details.status.as_ref())
    }

    /// Block color for this event; missing status falls back to the default.
    pub fn color(&self) -> &'static str {
        self.status()
            .map(AppointmentStatus::color)
            .unwrap_or(DEFAULT_EVENT_COLOR)
    }

    /// Calendar day of the event. `start` is either `YYYY-MM-DD` or an ISO
    /// date-time starting with one.
    pub fn date(&self) -> Option<NaiveDate> {
        let day = self.start.as_deref()?.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    /// Masked events carry no details and cannot be opened for editing.
    pub fn is_editable(&self) -> bool {
        self.extended_props.is_some() && self.appointment_id().is_some()
    }
}

// ============================================================================
// Submissions
// ============================================================================

/// Field names expected by the form endpoints.
pub mod fields {
    pub const CLIENT: &str = "cliente_id";
    pub const UNIT: &str = "unidade_id";
    pub const TECHNICIAN: &str = "tecnico_id";
    pub const STATUS: &str = "status";
    pub const OBSERVATIONS: &str = "observacoes";
    pub const DATE: &str = "data";
}

/// Fields posted by the create and update forms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentFields {
    pub client_id: Option<ClientId>,
    pub unit_id: Option<UnitId>,
    pub technician_id: Option<TechnicianId>,
    pub status: AppointmentStatus,
    pub observations: String,
    /// Only the create form carries a date; updates keep the stored one.
    pub date: Option<NaiveDate>,
}

impl AppointmentFields {
    /// Name/value pairs in the order the form renders them. Unset selects
    /// are posted as empty strings, like an empty `<select>` would be.
    pub fn form_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            (fields::CLIENT, optional_id(self.client_id)),
            (fields::UNIT, optional_id(self.unit_id)),
            (fields::TECHNICIAN, optional_id(self.technician_id)),
            (fields::STATUS, self.status.label().to_string()),
            (fields::OBSERVATIONS, self.observations.clone()),
        ];
        if let Some(date) = self.date {
            pairs.push((fields::DATE, format_date(date)));
        }
        pairs
    }
}

/// Fields posted by the duplicate form: the copy's new date. Everything else
/// is taken from the source appointment by the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DuplicateFields {
    pub date: Option<NaiveDate>,
}

impl DuplicateFields {
    pub fn form_pairs(&self) -> Vec<(&'static str, String)> {
        vec![(
            fields::DATE,
            self.date.map(format_date).unwrap_or_default(),
        )]
    }
}

fn optional_id(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Body returned by every mutating endpoint. A missing `success` key is a
/// failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub success: bool,
}
