//! Month calendar state: the loaded events, the displayed month and the
//! technician filter.

use agenda_shared::api::CalendarEvent;
use agenda_shared::models::TechnicianId;
use chrono::{Datelike, Duration, Months, NaiveDate};

/// Rows in the month grid. Months always span six weeks.
pub const WEEKS_PER_GRID: usize = 6;

pub const WEEKDAY_LABELS: [&str; 7] = ["dom.", "seg.", "ter.", "qua.", "qui.", "sex.", "sáb."];

const MONTH_NAMES: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarState {
    events: Vec<CalendarEvent>,
    generation: u64,
    loading: bool,
    month: NaiveDate,
    today: NaiveDate,
    technician_filter: Option<TechnicianId>,
}

impl CalendarState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            events: Vec::new(),
            generation: 0,
            loading: false,
            month: first_of_month(today),
            today,
            technician_filter: None,
        }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// First day of the displayed month.
    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn technician_filter(&self) -> Option<TechnicianId> {
        self.technician_filter
    }

    pub fn set_technician_filter(&mut self, technician: Option<TechnicianId>) {
        self.technician_filter = technician;
    }

    /// Marks a fetch as started and returns its generation.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    /// Installs the result of fetch `generation` unless a newer fetch began.
    pub fn complete_fetch(&mut self, generation: u64, events: Vec<CalendarEvent>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.events = events;
        self.loading = false;
        true
    }

    /// A failed fetch keeps whatever was shown before.
    pub fn fail_fetch(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.loading = false;
        true
    }

    pub fn previous_month(&mut self) {
        if let Some(month) = self.month.checked_sub_months(Months::new(1)) {
            self.month = month;
        }
    }

    pub fn next_month(&mut self) {
        if let Some(month) = self.month.checked_add_months(Months::new(1)) {
            self.month = month;
        }
    }

    pub fn go_to_today(&mut self) {
        self.month = first_of_month(self.today);
    }

    /// `"outubro de 2026"`
    pub fn title(&self) -> String {
        format!(
            "{} de {}",
            MONTH_NAMES[self.month.month0() as usize],
            self.month.year()
        )
    }

    /// Days shown in the grid, one array per week, Sunday first.
    pub fn weeks(&self) -> Vec<[NaiveDate; 7]> {
        let offset = self.month.weekday().num_days_from_sunday() as i64;
        let start = self.month - Duration::days(offset);
        (0..WEEKS_PER_GRID)
            .map(|week| {
                let week_offset = week as i64 * 7;
                std::array::from_fn(|day| start + Duration::days(week_offset + day as i64))
            })
            .collect()
    }

    pub fn in_displayed_month(&self, day: NaiveDate) -> bool {
        day.year() == self.month.year() && day.month() == self.month.month()
    }

    /// Events placed on `day`, in listing order.
    pub fn events_on(&self, day: NaiveDate) -> impl Iterator<Item = &CalendarEvent> + '_ {
        self.events
            .iter()
            .filter(move |event| event.date() == Some(day))
    }
}

fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

/// Rows of the hover card shown over an event: label, value.
pub fn tooltip_rows(event: &CalendarEvent) -> Vec<(&'static str, String)> {
    let Some(details) = event.extended_props.as_ref() else {
        return Vec::new();
    };

    vec![
        ("Cliente", details.client.clone().unwrap_or_default()),
        ("Unidade", details.unit.clone().unwrap_or_default()),
        (
            "Status",
            details
                .status
                .as_ref()
                .map(|status| status.to_string())
                .unwrap_or_default(),
        ),
        ("Técnico", details.technician.clone().unwrap_or_default()),
        ("Obs", details.observations.clone().unwrap_or_default()),
    ]
}
