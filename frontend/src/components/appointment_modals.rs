use agenda_shared::models::{Client, ClientId, Technician};
use yew::prelude::*;

use crate::components::appointment_form::{AppointmentFieldset, DateField};
use crate::components::modal::Modal;
use crate::controller::forms::{CreateForm, DuplicateForm, EditForm, FieldChange, FormKind};
use crate::controller::handle::ControllerHandle;
use crate::controller::unit_select::UnitSelect;

fn close_callback(handle: &ControllerHandle) -> Callback<()> {
    let handle = handle.clone();
    Callback::from(move |_| handle.close_surface())
}

fn field_callback(handle: &ControllerHandle, kind: FormKind) -> Callback<FieldChange> {
    let handle = handle.clone();
    Callback::from(move |change| handle.edit_field(kind, change))
}

fn client_callback(handle: &ControllerHandle, kind: FormKind) -> Callback<Option<ClientId>> {
    let handle = handle.clone();
    Callback::from(move |client: Option<ClientId>| {
        handle.spawn(move |controller| async move {
            controller.change_client(kind, client).await;
        })
    })
}

#[derive(Properties, PartialEq)]
pub struct CreateModalProps {
    pub handle: ControllerHandle,
    pub form: CreateForm,
    pub units: UnitSelect,
    pub clients: Vec<Client>,
    pub technicians: Vec<Technician>,
}

#[function_component(CreateModal)]
pub fn create_modal(props: &CreateModalProps) -> Html {
    let onsubmit = {
        let handle = props.handle.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            handle.spawn(|controller| async move {
                controller.submit_create().await;
            });
        })
    };
    let on_change = field_callback(&props.handle, FormKind::Create);

    html! {
        <Modal title="Novo Agendamento" on_close={close_callback(&props.handle)}>
            <form id="formNovoAgendamento" onsubmit={onsubmit}>
                <div class="modal-body">
                    <DateField id="novaData" value={props.form.date} on_change={on_change.clone()} />
                    <AppointmentFieldset
                        prefix="nova"
                        draft={props.form.draft.clone()}
                        units={props.units.clone()}
                        clients={props.clients.clone()}
                        technicians={props.technicians.clone()}
                        on_client={client_callback(&props.handle, FormKind::Create)}
                        on_change={on_change}
                    />
                </div>
                <div class="modal-footer">
                    <button type="submit" class="btn btn-primary">{ "Salvar" }</button>
                </div>
            </form>
        </Modal>
    }
}

#[derive(Properties, PartialEq)]
pub struct EditModalProps {
    pub handle: ControllerHandle,
    pub form: EditForm,
    pub units: UnitSelect,
    pub clients: Vec<Client>,
    pub technicians: Vec<Technician>,
}

#[function_component(EditModal)]
pub fn edit_modal(props: &EditModalProps) -> Html {
    let onsubmit = {
        let handle = props.handle.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            handle.spawn(|controller| async move {
                controller.submit_update().await;
            });
        })
    };
    let on_delete = {
        let handle = props.handle.clone();
        Callback::from(move |_: MouseEvent| {
            handle.spawn(|controller| async move {
                controller.delete().await;
            });
        })
    };
    let on_duplicate = {
        let handle = props.handle.clone();
        Callback::from(move |_: MouseEvent| handle.duplicate_intent())
    };
    let appointment_id = props
        .form
        .appointment_id
        .map(|id| id.to_string())
        .unwrap_or_default();

    html! {
        <Modal title="Detalhes do Agendamento" on_close={close_callback(&props.handle)}>
            <form id="formEditarAgendamento" onsubmit={onsubmit}>
                <div class="modal-body">
                    <input type="hidden" id="editAgendamentoId" value={appointment_id} />
                    <AppointmentFieldset
                        prefix="edit"
                        draft={props.form.draft.clone()}
                        units={props.units.clone()}
                        clients={props.clients.clone()}
                        technicians={props.technicians.clone()}
                        on_client={client_callback(&props.handle, FormKind::Edit)}
                        on_change={field_callback(&props.handle, FormKind::Edit)}
                    />
                </div>
                <div class="modal-footer">
                    <button type="button" class="btn btn-outline-danger me-auto" onclick={on_delete}>{ "Excluir" }</button>
                    <button type="button" class="btn btn-outline-secondary" onclick={on_duplicate}>{ "Duplicar" }</button>
                    <button type="submit" class="btn btn-primary">{ "Atualizar" }</button>
                </div>
            </form>
        </Modal>
    }
}

#[derive(Properties, PartialEq)]
pub struct DuplicateModalProps {
    pub handle: ControllerHandle,
    pub form: DuplicateForm,
}

#[function_component(DuplicateModal)]
pub fn duplicate_modal(props: &DuplicateModalProps) -> Html {
    let onsubmit = {
        let handle = props.handle.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            handle.spawn(|controller| async move {
                controller.submit_duplicate().await;
            });
        })
    };
    let source_id = props
        .form
        .source_id
        .map(|id| id.to_string())
        .unwrap_or_default();

    html! {
        <Modal title="Duplicar Agendamento" on_close={close_callback(&props.handle)}>
            <form id="formDuplicar" onsubmit={onsubmit}>
                <div class="modal-body">
                    <input type="hidden" id="dupId" value={source_id} />
                    <p class="text-muted">{ "Cliente, unidade, técnico, status e observações são copiados do agendamento original." }</p>
                    <DateField
                        id="dupData"
                        value={props.form.date}
                        on_change={field_callback(&props.handle, FormKind::Duplicate)}
                    />
                </div>
                <div class="modal-footer">
                    <button type="submit" class="btn btn-primary">{ "Duplicar" }</button>
                </div>
            </form>
        </Modal>
    }
}
