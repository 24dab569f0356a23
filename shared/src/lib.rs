//! Wire types shared between the agenda frontend and the scheduling backend.

pub mod api;
pub mod models;

pub use api::{
    endpoints, AppointmentFields, CalendarEvent, DuplicateFields, EventDetails, MutationResponse,
};
pub use models::{
    AppointmentId, AppointmentStatus, Client, ClientId, NamedRecord, Technician, TechnicianId,
    Unit, UnitId, DEFAULT_EVENT_COLOR,
};
