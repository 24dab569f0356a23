use chrono::NaiveDate;

use super::calendar::CalendarState;
use super::forms::{CreateForm, DuplicateForm, EditForm, FieldChange, FormKind};
use super::unit_select::UnitSelect;

/// The modal currently on screen, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Surface {
    #[default]
    None,
    Create,
    Edit,
    Duplicate,
}

/// Everything the agenda page renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerState {
    pub calendar: CalendarState,
    pub surface: Surface,
    pub create: CreateForm,
    pub create_units: UnitSelect,
    pub edit: EditForm,
    pub edit_units: UnitSelect,
    pub duplicate: DuplicateForm,
    /// Bumped whenever a surface is opened or closed, so a request started
    /// from one form can tell whether that form is still on screen.
    session: u64,
}

impl SchedulerState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            calendar: CalendarState::new(today),
            surface: Surface::None,
            create: CreateForm::default(),
            create_units: UnitSelect::default(),
            edit: EditForm::default(),
            edit_units: UnitSelect::default(),
            duplicate: DuplicateForm::default(),
            session: 0,
        }
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn show(&mut self, surface: Surface) {
        self.session += 1;
        self.surface = surface;
    }

    /// Unit selector paired with the client field of `kind`. The duplicate
    /// form has none.
    pub fn units_mut(&mut self, kind: FormKind) -> Option<&mut UnitSelect> {
        match kind {
            FormKind::Create => Some(&mut self.create_units),
            FormKind::Edit => Some(&mut self.edit_units),
            FormKind::Duplicate => None,
        }
    }

    pub fn apply(&mut self, kind: FormKind, change: FieldChange) {
        match (kind, change) {
            (FormKind::Create, FieldChange::Unit(unit)) => self.create_units.select(unit),
            (FormKind::Edit, FieldChange::Unit(unit)) => self.edit_units.select(unit),
            (FormKind::Create, change) => self.create.apply(change),
            (FormKind::Edit, change) => self.edit.apply(change),
            (FormKind::Duplicate, change) => self.duplicate.apply(change),
        }
    }

    /// Hides `surface` if it is the one showing and discards its form.
    pub fn close(&mut self, surface: Surface) {
        self.session += 1;
        match surface {
            Surface::Create => {
                self.create = CreateForm::default();
                self.create_units.reset();
            }
            Surface::Edit => {
                self.edit = EditForm::default();
                self.edit_units.reset();
            }
            Surface::Duplicate => self.duplicate = DuplicateForm::default(),
            Surface::None => {}
        }

        if self.surface == surface {
            self.surface = Surface::None;
        }
    }

    /// Closes `surface` only if nothing was opened or closed since `session`.
    pub fn close_if_current(&mut self, surface: Surface, session: u64) -> bool {
        if self.session != session {
            return false;
        }
        self.close(surface);
        true
    }
}
