use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use agenda_shared::api::{AppointmentFields, CalendarEvent, DuplicateFields, EventDetails};
use agenda_shared::models::{AppointmentId, AppointmentStatus, ClientId, TechnicianId, Unit};
use async_trait::async_trait;
use chrono::NaiveDate;
use futures::channel::oneshot;
use futures::executor::block_on;

use super::*;
use crate::error::ApiError;
use crate::services::{Dialogs, SchedulingApi};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    ListEvents(Option<TechnicianId>),
    ListUnits(ClientId),
    Create(AppointmentFields),
    Update(AppointmentId, AppointmentFields),
    Delete(AppointmentId),
    Duplicate(AppointmentId, DuplicateFields),
}

/// Records every call and answers from canned data. A client with a gate
/// registered holds its unit response until the gate's sender fires; a
/// mutation gate does the same for the next create, update, delete or
/// duplicate.
#[derive(Default)]
struct MockApi {
    calls: RefCell<Vec<Call>>,
    events: RefCell<Vec<CalendarEvent>>,
    units: RefCell<HashMap<ClientId, Vec<Unit>>>,
    unit_gates: RefCell<HashMap<ClientId, oneshot::Receiver<()>>>,
    mutation_gate: RefCell<Option<oneshot::Receiver<()>>>,
    mutation_error: RefCell<Option<ApiError>>,
}

impl MockApi {
    fn with_units(self, client: ClientId, units: Vec<Unit>) -> Self {
        self.units.borrow_mut().insert(client, units);
        self
    }

    fn with_events(self, events: Vec<CalendarEvent>) -> Self {
        *self.events.borrow_mut() = events;
        self
    }

    fn failing_with(self, error: ApiError) -> Self {
        *self.mutation_error.borrow_mut() = Some(error);
        self
    }

    fn gate_units(&self, client: ClientId) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.unit_gates.borrow_mut().insert(client, rx);
        tx
    }

    fn gate_mutation(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.mutation_gate.borrow_mut() = Some(rx);
        tx
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| predicate(call)).count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    async fn mutation_result(&self) -> Result<(), ApiError> {
        let gate = self.mutation_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        match self.mutation_error.borrow().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl SchedulingApi for MockApi {
    async fn list_events(
        &self,
        technician: Option<TechnicianId>,
    ) -> Result<Vec<CalendarEvent>, ApiError> {
        self.record(Call::ListEvents(technician));
        Ok(self.events.borrow().clone())
    }

    async fn list_units(&self, client: ClientId) -> Result<Vec<Unit>, ApiError> {
        self.record(Call::ListUnits(client));
        let gate = self.unit_gates.borrow_mut().remove(&client);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.units
            .borrow()
            .get(&client)
            .cloned()
            .ok_or(ApiError::Status(404))
    }

    async fn create_appointment(&self, fields: &AppointmentFields) -> Result<(), ApiError> {
        self.record(Call::Create(fields.clone()));
        self.mutation_result().await
    }

    async fn update_appointment(
        &self,
        id: AppointmentId,
        fields: &AppointmentFields,
    ) -> Result<(), ApiError> {
        self.record(Call::Update(id, fields.clone()));
        self.mutation_result().await
    }

    async fn delete_appointment(&self, id: AppointmentId) -> Result<(), ApiError> {
        self.record(Call::Delete(id));
        self.mutation_result().await
    }

    async fn duplicate_appointment(
        &self,
        id: AppointmentId,
        fields: &DuplicateFields,
    ) -> Result<(), ApiError> {
        self.record(Call::Duplicate(id, fields.clone()));
        self.mutation_result().await
    }
}

#[derive(Default)]
struct MockDialogs {
    alerts: RefCell<Vec<String>>,
    confirms: RefCell<Vec<String>>,
    accept: Cell<bool>,
}

impl MockDialogs {
    fn accepting() -> Self {
        let dialogs = Self::default();
        dialogs.accept.set(true);
        dialogs
    }
}

impl Dialogs for MockDialogs {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.accept.get()
    }
}

type TestController = SchedulerController<MockApi, MockDialogs>;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn controller(api: MockApi) -> TestController {
    SchedulerController::new(api, MockDialogs::default(), today())
}

fn units(client: ClientId, ids: &[i64]) -> Vec<Unit> {
    ids.iter()
        .map(|id| Unit::new(*id, format!("Unidade {}-{}", client, id)))
        .collect()
}

fn event(id: AppointmentId, client: ClientId, unit: i64) -> CalendarEvent {
    CalendarEvent {
        id: Some(id),
        title: "ACME - Matriz".into(),
        start: Some("2026-10-05".into()),
        background_color: None,
        border_color: None,
        extended_props: Some(EventDetails {
            status: Some(AppointmentStatus::Confirmed),
            observations: Some("chave na portaria".into()),
            client: Some("ACME".into()),
            unit: Some("Matriz".into()),
            technician: Some("Joana".into()),
            client_id: Some(client),
            unit_id: Some(unit),
            technician_id: Some(9),
            id: None,
        }),
    }
}

fn list_event_calls(call: &Call) -> bool {
    matches!(call, Call::ListEvents(_))
}

#[test]
fn test_refresh_loads_events() {
    let controller = controller(MockApi::default().with_events(vec![event(12, 1, 3)]));
    block_on(controller.refresh());

    let state = controller.state();
    assert_eq!(state.calendar.events().len(), 1);
    assert!(!state.calendar.is_loading());
    assert_eq!(controller.api.calls(), vec![Call::ListEvents(None)]);
}

#[test]
fn test_technician_filter_refetches() {
    let controller = controller(MockApi::default());
    block_on(controller.set_technician_filter(Some(9)));
    assert_eq!(controller.api.calls(), vec![Call::ListEvents(Some(9))]);

    block_on(controller.set_technician_filter(None));
    assert_eq!(controller.api.calls()[1], Call::ListEvents(None));
}

#[test]
fn test_day_click_opens_create_with_date() {
    let controller = controller(MockApi::default());
    let date = NaiveDate::from_ymd_opt(2026, 10, 22).unwrap();
    controller.day_click(date);

    let state = controller.state();
    assert_eq!(state.surface, Surface::Create);
    assert_eq!(state.create.date, Some(date));
    assert!(controller.api.calls().is_empty());
}

#[test]
fn test_create_success_closes_and_refreshes_once() {
    let controller = controller(MockApi::default().with_units(1, units(1, &[3, 4])));
    controller.day_click(NaiveDate::from_ymd_opt(2026, 10, 22).unwrap());
    block_on(controller.change_client(FormKind::Create, Some(1)));
    controller.edit_field(FormKind::Create, FieldChange::Unit(Some(4)));
    controller.edit_field(FormKind::Create, FieldChange::Technician(Some(9)));
    controller.edit_field(
        FormKind::Create,
        FieldChange::Observations("levar escada".into()),
    );

    let outcome = block_on(controller.submit_create());
    assert_eq!(outcome, ActionOutcome::Succeeded);

    let calls = controller.api.calls();
    assert_eq!(
        calls[1],
        Call::Create(AppointmentFields {
            client_id: Some(1),
            unit_id: Some(4),
            technician_id: Some(9),
            status: AppointmentStatus::PendingConfirmation,
            observations: "levar escada".into(),
            date: NaiveDate::from_ymd_opt(2026, 10, 22),
        })
    );
    assert_eq!(controller.api.count(list_event_calls), 1);
    assert_eq!(controller.state().surface, Surface::None);
    assert!(controller.dialogs.alerts.borrow().is_empty());
}

#[test]
fn test_create_failure_alerts_once_and_stays_open() {
    let controller = controller(MockApi::default().failing_with(ApiError::Rejected));
    controller.day_click(NaiveDate::from_ymd_opt(2026, 10, 22).unwrap());

    let outcome = block_on(controller.submit_create());
    assert_eq!(outcome, ActionOutcome::Failed);
    assert_eq!(controller.state().surface, Surface::Create);
    assert_eq!(
        *controller.dialogs.alerts.borrow(),
        vec!["Erro ao salvar agendamento!".to_string()]
    );
    assert_eq!(controller.api.count(list_event_calls), 0);
}

#[test]
fn test_malformed_response_is_a_failure() {
    let controller = controller(
        MockApi::default().failing_with(ApiError::Decode("expected value".into())),
    );
    controller.day_click(today());

    assert_eq!(block_on(controller.submit_create()), ActionOutcome::Failed);
    assert_eq!(controller.dialogs.alerts.borrow().len(), 1);
    assert_eq!(controller.state().create.date, Some(today()));
}

#[test]
fn test_client_change_replaces_units_in_both_forms() {
    let controller = controller(
        MockApi::default()
            .with_units(1, units(1, &[3, 4]))
            .with_units(2, units(2, &[7])),
    );

    block_on(controller.change_client(FormKind::Create, Some(1)));
    assert_eq!(controller.state().create_units.options(), units(1, &[3, 4]).as_slice());

    block_on(controller.change_client(FormKind::Create, Some(2)));
    assert_eq!(controller.state().create_units.options(), units(2, &[7]).as_slice());
    assert_eq!(controller.state().create.draft.client_id, Some(2));

    block_on(controller.change_client(FormKind::Edit, Some(1)));
    let state = controller.state();
    assert_eq!(state.edit_units.options(), units(1, &[3, 4]).as_slice());
    assert_eq!(state.create_units.options(), units(2, &[7]).as_slice());
}

#[test]
fn test_clearing_client_issues_no_request() {
    let controller = controller(MockApi::default().with_units(1, units(1, &[3])));
    block_on(controller.change_client(FormKind::Create, Some(1)));
    block_on(controller.change_client(FormKind::Create, None));

    assert_eq!(controller.api.calls(), vec![Call::ListUnits(1)]);
    assert_eq!(controller.state().create_units.phase(), UnitSelectPhase::Idle);
    assert!(controller.state().create_units.options().is_empty());
}

#[test]
fn test_last_client_selection_wins() {
    let api = MockApi::default()
        .with_units(1, units(1, &[3, 4]))
        .with_units(2, units(2, &[7]));
    let slow = api.gate_units(1);
    let controller = controller(api);

    block_on(async {
        futures::join!(
            controller.change_client(FormKind::Create, Some(1)),
            async {
                controller.change_client(FormKind::Create, Some(2)).await;
                let _ = slow.send(());
            }
        );
    });

    let state = controller.state();
    assert_eq!(state.create_units.options(), units(2, &[7]).as_slice());
    assert_eq!(state.create_units.selected(), Some(7));
    assert_eq!(
        controller.api.calls(),
        vec![Call::ListUnits(1), Call::ListUnits(2)]
    );
}

#[test]
fn test_event_click_reselects_saved_unit_after_loading() {
    let api = MockApi::default().with_units(1, units(1, &[3, 4, 5]));
    let gate = api.gate_units(1);
    let controller = controller(api);
    let clicked = event(12, 1, 4);

    block_on(async {
        futures::join!(controller.event_click(&clicked), async {
            {
                let state = controller.state();
                assert_eq!(state.surface, Surface::Edit);
                assert!(state.edit_units.is_loading());
                assert!(state.edit_units.options().is_empty());
            }
            let _ = gate.send(());
        });
    });

    let state = controller.state();
    assert_eq!(state.edit.appointment_id, Some(12));
    assert_eq!(state.edit.draft.client_id, Some(1));
    assert_eq!(state.edit.draft.technician_id, Some(9));
    assert_eq!(state.edit.draft.status, AppointmentStatus::Confirmed);
    assert_eq!(state.edit.draft.observations, "chave na portaria");
    assert_eq!(state.edit_units.selected(), Some(4));
    assert_eq!(state.edit_units.phase(), UnitSelectPhase::Reselected);
}

#[test]
fn test_masked_event_is_ignored() {
    let controller = controller(MockApi::default());
    let masked = CalendarEvent {
        id: None,
        title: "Data indisponível".into(),
        start: Some("2026-10-06".into()),
        background_color: Some("#95a5a6".into()),
        border_color: Some("#95a5a6".into()),
        extended_props: None,
    };

    block_on(controller.event_click(&masked));
    assert_eq!(controller.state().surface, Surface::None);
    assert!(controller.api.calls().is_empty());
}

#[test]
fn test_update_sends_edited_fields() {
    let controller = controller(MockApi::default().with_units(1, units(1, &[3, 4])));
    block_on(controller.event_click(&event(12, 1, 3)));
    controller.edit_field(
        FormKind::Edit,
        FieldChange::Status(AppointmentStatus::Rescheduled),
    );

    assert_eq!(block_on(controller.submit_update()), ActionOutcome::Succeeded);
    let calls = controller.api.calls();
    assert_eq!(
        calls[1],
        Call::Update(
            12,
            AppointmentFields {
                client_id: Some(1),
                unit_id: Some(3),
                technician_id: Some(9),
                status: AppointmentStatus::Rescheduled,
                observations: "chave na portaria".into(),
                date: None,
            }
        )
    );
    assert_eq!(calls[2], Call::ListEvents(None));
    assert_eq!(controller.state().surface, Surface::None);
}

#[test]
fn test_update_failure_keeps_edit_open() {
    let controller = controller(
        MockApi::default()
            .with_units(1, units(1, &[3]))
            .failing_with(ApiError::Status(500)),
    );
    block_on(controller.event_click(&event(12, 1, 3)));

    assert_eq!(block_on(controller.submit_update()), ActionOutcome::Failed);
    assert_eq!(controller.state().surface, Surface::Edit);
    assert_eq!(
        *controller.dialogs.alerts.borrow(),
        vec!["Erro ao atualizar!".to_string()]
    );
}

#[test]
fn test_update_without_loaded_appointment_sends_nothing() {
    let controller = controller(MockApi::default());
    assert_eq!(block_on(controller.submit_update()), ActionOutcome::Failed);
    assert!(controller.api.calls().is_empty());
    assert_eq!(controller.dialogs.alerts.borrow().len(), 1);
}

#[test]
fn test_declined_delete_sends_nothing() {
    let controller = controller(MockApi::default().with_units(1, units(1, &[3])));
    block_on(controller.event_click(&event(12, 1, 3)));

    assert_eq!(block_on(controller.delete()), ActionOutcome::Declined);
    assert_eq!(controller.api.count(|call| matches!(call, Call::Delete(_))), 0);
    assert_eq!(
        *controller.dialogs.confirms.borrow(),
        vec![DELETE_CONFIRMATION.to_string()]
    );
    assert_eq!(controller.state().surface, Surface::Edit);
}

#[test]
fn test_confirmed_delete_sends_one_request() {
    let controller = SchedulerController::new(
        MockApi::default().with_units(1, units(1, &[3])),
        MockDialogs::accepting(),
        today(),
    );
    block_on(controller.event_click(&event(12, 1, 3)));

    assert_eq!(block_on(controller.delete()), ActionOutcome::Succeeded);
    assert_eq!(
        controller.api.count(|call| matches!(call, Call::Delete(_))),
        1
    );
    assert!(controller.api.calls().contains(&Call::Delete(12)));
    assert_eq!(controller.api.count(list_event_calls), 1);
    assert_eq!(controller.state().surface, Surface::None);
}

#[test]
fn test_failed_delete_alerts() {
    let controller = SchedulerController::new(
        MockApi::default()
            .with_units(1, units(1, &[3]))
            .failing_with(ApiError::Rejected),
        MockDialogs::accepting(),
        today(),
    );
    block_on(controller.event_click(&event(12, 1, 3)));

    assert_eq!(block_on(controller.delete()), ActionOutcome::Failed);
    assert_eq!(
        *controller.dialogs.alerts.borrow(),
        vec!["Erro ao excluir!".to_string()]
    );
    assert_eq!(controller.state().surface, Surface::Edit);
}

#[test]
fn test_duplicate_intent_swaps_surfaces_without_requests() {
    let controller = controller(MockApi::default().with_units(1, units(1, &[3])));
    block_on(controller.event_click(&event(12, 1, 3)));
    let before = controller.api.calls().len();

    controller.duplicate_intent();

    let state = controller.state();
    assert_eq!(state.duplicate.source_id, Some(12));
    assert_eq!(state.surface, Surface::Duplicate);
    assert_eq!(controller.api.calls().len(), before);
}

#[test]
fn test_duplicate_submits_new_date_for_source() {
    let controller = controller(MockApi::default().with_units(1, units(1, &[3])));
    block_on(controller.event_click(&event(12, 1, 3)));
    controller.duplicate_intent();
    let date = NaiveDate::from_ymd_opt(2026, 11, 9);
    controller.edit_field(FormKind::Duplicate, FieldChange::Date(date));

    assert_eq!(block_on(controller.submit_duplicate()), ActionOutcome::Succeeded);
    assert!(controller
        .api
        .calls()
        .contains(&Call::Duplicate(12, DuplicateFields { date })));
    assert_eq!(controller.state().surface, Surface::None);
    assert_eq!(controller.state().duplicate.source_id, None);
}

#[test]
fn test_duplicate_failure_alerts() {
    let controller = controller(MockApi::default().failing_with(ApiError::Status(404)));
    controller.update(|state| {
        state.duplicate.source_id = Some(99);
        state.surface = Surface::Duplicate;
    });

    assert_eq!(block_on(controller.submit_duplicate()), ActionOutcome::Failed);
    assert_eq!(
        *controller.dialogs.alerts.borrow(),
        vec!["Erro ao duplicar!".to_string()]
    );
    assert_eq!(controller.state().surface, Surface::Duplicate);
}

#[test]
fn test_close_surface_drops_inflight_units() {
    let api = MockApi::default().with_units(1, units(1, &[3]));
    let gate = api.gate_units(1);
    let controller = controller(api);
    controller.day_click(today());

    block_on(async {
        futures::join!(
            controller.change_client(FormKind::Create, Some(1)),
            async {
                controller.close_surface();
                let _ = gate.send(());
            }
        );
    });

    let state = controller.state();
    assert_eq!(state.surface, Surface::None);
    assert!(state.create_units.options().is_empty());
    assert_eq!(state.create.date, None);
}

#[test]
fn test_redraw_runs_after_state_changes() {
    let redraws = std::rc::Rc::new(Cell::new(0));
    let counter = redraws.clone();
    let controller = SchedulerController::new(MockApi::default(), MockDialogs::default(), today())
        .on_change(move || counter.set(counter.get() + 1));

    controller.next_month();
    controller.day_click(today());
    assert_eq!(redraws.get(), 2);
    assert_eq!(
        controller.snapshot().calendar.month(),
        NaiveDate::from_ymd_opt(2026, 11, 1).unwrap()
    );
}

#[test]
fn test_saved_unit_missing_from_list_asks_for_a_choice() {
    let controller = controller(MockApi::default().with_units(1, units(1, &[3, 4])));
    block_on(controller.event_click(&event(12, 1, 99)));

    {
        let state = controller.state();
        assert_eq!(state.edit_units.options(), units(1, &[3, 4]).as_slice());
        assert_eq!(state.edit_units.selected(), None);
        assert_eq!(state.edit_units.placeholder(), Some(unit_select::SELECT_PROMPT));
    }

    controller.edit_field(FormKind::Edit, FieldChange::Unit(Some(4)));
    assert_eq!(controller.state().edit_units.placeholder(), None);
    assert_eq!(block_on(controller.submit_update()), ActionOutcome::Succeeded);
    assert!(matches!(
        &controller.api.calls()[1],
        Call::Update(12, fields) if fields.unit_id == Some(4)
    ));
}

#[test]
fn test_update_of_event_without_status_keeps_it_blank() {
    let controller = controller(MockApi::default().with_units(1, units(1, &[3])));
    let mut untagged = event(12, 1, 3);
    if let Some(details) = untagged.extended_props.as_mut() {
        details.status = None;
    }
    block_on(controller.event_click(&untagged));

    assert_eq!(block_on(controller.submit_update()), ActionOutcome::Succeeded);
    assert!(matches!(
        &controller.api.calls()[1],
        Call::Update(12, fields) if fields.status == AppointmentStatus::Other(String::new())
    ));
}

#[test]
fn test_late_update_leaves_newly_opened_form_alone() {
    let api = MockApi::default().with_units(1, units(1, &[3, 4]));
    let gate = api.gate_mutation();
    let controller = controller(api);
    block_on(controller.event_click(&event(12, 1, 3)));

    block_on(async {
        futures::join!(
            async {
                assert_eq!(controller.submit_update().await, ActionOutcome::Succeeded);
            },
            async {
                controller.close_surface();
                controller.event_click(&event(15, 1, 4)).await;
                let _ = gate.send(());
            }
        );
    });

    let state = controller.state();
    assert_eq!(state.surface, Surface::Edit);
    assert_eq!(state.edit.appointment_id, Some(15));
    assert_eq!(state.edit_units.selected(), Some(4));
    assert_eq!(controller.api.count(list_event_calls), 1);
}
