//! Unit dropdown bound to a client dropdown.
//!
//! Each load is tagged with a generation; only the latest one may fill the
//! options, so a slow response for a previous client is dropped.

use agenda_shared::models::{ClientId, Unit, UnitId};

/// Placeholder option shown while units are being fetched.
pub const LOADING_LABEL: &str = "Carregando...";

/// Empty first option shown when the list has units but none is selected.
pub const SELECT_PROMPT: &str = "Selecione...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSelectPhase {
    #[default]
    Idle,
    Loading,
    Populated,
    /// Populated, then the saved unit of the edited appointment was selected.
    Reselected,
}

/// Proof that a load was started; handed back with the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    client: ClientId,
}

impl LoadTicket {
    pub fn client(&self) -> ClientId {
        self.client
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitSelect {
    generation: u64,
    phase: UnitSelectPhase,
    options: Vec<Unit>,
    selected: Option<UnitId>,
    reselect: Option<UnitId>,
}

impl UnitSelect {
    pub fn phase(&self) -> UnitSelectPhase {
        self.phase
    }

    pub fn options(&self) -> &[Unit] {
        &self.options
    }

    pub fn selected(&self) -> Option<UnitId> {
        self.selected
    }

    pub fn is_loading(&self) -> bool {
        self.phase == UnitSelectPhase::Loading
    }

    /// Label of the empty first option, if one is needed. Without it the
    /// browser would display the first unit while nothing is selected here.
    pub fn placeholder(&self) -> Option<&'static str> {
        if self.is_loading() {
            Some(LOADING_LABEL)
        } else if self.selected.is_none() && !self.options.is_empty() {
            Some(SELECT_PROMPT)
        } else {
            None
        }
    }

    /// Clears the options and starts a load for `client`. `reselect` is the
    /// unit to pick once the list arrives.
    pub fn begin_load(&mut self, client: ClientId, reselect: Option<UnitId>) -> LoadTicket {
        self.generation += 1;
        self.phase = UnitSelectPhase::Loading;
        self.options.clear();
        self.selected = None;
        self.reselect = reselect;
        LoadTicket {
            generation: self.generation,
            client,
        }
    }

    /// Replaces every option with `units`. Returns false, leaving the
    /// selector untouched, when a newer load has started since `ticket`.
    pub fn complete(&mut self, ticket: LoadTicket, units: Vec<Unit>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }

        self.options = units;
        match self.reselect.take() {
            Some(unit) => {
                self.selected = self
                    .options
                    .iter()
                    .any(|option| option.id == unit)
                    .then_some(unit);
                self.phase = UnitSelectPhase::Reselected;
            }
            None => {
                self.selected = self.options.first().map(|option| option.id);
                self.phase = UnitSelectPhase::Populated;
            }
        }
        true
    }

    /// Drops the placeholder after a failed load. Stale failures are ignored.
    pub fn fail(&mut self, ticket: LoadTicket) -> bool {
        if ticket.generation != self.generation {
            return false;
        }

        self.phase = UnitSelectPhase::Idle;
        self.options.clear();
        self.selected = None;
        self.reselect = None;
        true
    }

    /// Back to an empty selector. Any load in flight becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.phase = UnitSelectPhase::Idle;
        self.options.clear();
        self.selected = None;
        self.reselect = None;
    }

    /// User picked an option. Ids not in the list are ignored.
    pub fn select(&mut self, unit: Option<UnitId>) {
        match unit {
            Some(id) if self.options.iter().any(|option| option.id == id) => {
                self.selected = Some(id)
            }
            Some(_) => {}
            None => self.selected = None,
        }
    }
}
