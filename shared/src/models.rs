use std::fmt;

use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub type AppointmentId = i64;
pub type ClientId = i64;
pub type UnitId = i64;
pub type TechnicianId = i64;

/// Status of an appointment as stored by the backend.
///
/// The wire value is the Portuguese label shown to users. Labels outside the
/// known set are kept verbatim in [`AppointmentStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppointmentStatus {
    #[default]
    PendingConfirmation,
    Confirmed,
    Cancelled,
    Rescheduled,
    Other(String),
}

impl AppointmentStatus {
    /// Statuses offered by the appointment forms, in display order.
    pub const SELECTABLE: [AppointmentStatus; 4] = [
        AppointmentStatus::PendingConfirmation,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::Rescheduled,
    ];

    pub fn label(&self) -> &str {
        match self {
            AppointmentStatus::PendingConfirmation => "Pendente Conf.",
            AppointmentStatus::Confirmed => "Confirmado",
            AppointmentStatus::Cancelled => "Cancelado",
            AppointmentStatus::Rescheduled => "Reagendado",
            AppointmentStatus::Other(label) => label,
        }
    }

    /// Background color used for calendar blocks with this status.
    pub fn color(&self) -> &'static str {
        match self {
            AppointmentStatus::PendingConfirmation => "#f1c40f",
            AppointmentStatus::Confirmed => "#27ae60",
            AppointmentStatus::Cancelled => "#e74c3c",
            AppointmentStatus::Rescheduled => "#e67e22",
            AppointmentStatus::Other(_) => DEFAULT_EVENT_COLOR,
        }
    }
}

/// Color for events whose status is missing or not one of the known labels.
pub const DEFAULT_EVENT_COLOR: &str = "#3498db";

impl From<String> for AppointmentStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Pendente Conf." => AppointmentStatus::PendingConfirmation,
            "Confirmado" => AppointmentStatus::Confirmed,
            "Cancelado" => AppointmentStatus::Cancelled,
            "Reagendado" => AppointmentStatus::Rescheduled,
            _ => AppointmentStatus::Other(label),
        }
    }
}

impl From<&str> for AppointmentStatus {
    fn from(label: &str) -> Self {
        AppointmentStatus::from(label.to_string())
    }
}

impl From<AppointmentStatus> for String {
    fn from(status: AppointmentStatus) -> Self {
        match status {
            AppointmentStatus::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An id + display name pair (client, unit or technician).
///
/// The backend serializes these as raw table rows, e.g. a unit is
/// `[id, nome, cliente_id]`. Only the first two columns are read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedRecord {
    pub id: i64,
    pub name: String,
}

pub type Client = NamedRecord;
pub type Unit = NamedRecord;
pub type Technician = NamedRecord;

impl NamedRecord {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Serialize for NamedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.id, &self.name).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NamedRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = NamedRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a row of at least [id, name]")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let id = seq
                    .next_element::<i64>()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let name = seq
                    .next_element::<String>()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(NamedRecord { id, name })
            }
        }

        deserializer.deserialize_seq(RowVisitor)
    }
}
