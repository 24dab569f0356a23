use agenda_shared::api::format_date;
use agenda_shared::models::{AppointmentStatus, Client, ClientId, Technician};
use chrono::NaiveDate;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::controller::forms::{AppointmentDraft, FieldChange};
use crate::controller::unit_select::UnitSelect;

fn selected_id(e: Event) -> Option<i64> {
    let select: HtmlSelectElement = e.target_unchecked_into();
    select.value().parse().ok()
}

#[derive(Properties, PartialEq)]
pub struct DateFieldProps {
    pub id: AttrValue,
    pub value: Option<NaiveDate>,
    pub on_change: Callback<FieldChange>,
}

#[function_component(DateField)]
pub fn date_field(props: &DateFieldProps) -> Html {
    let onchange = props.on_change.reform(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        FieldChange::Date(NaiveDate::parse_from_str(&input.value(), "%Y-%m-%d").ok())
    });

    html! {
        <div class="mb-3">
            <label class="form-label" for={props.id.clone()}>{ "Data" }</label>
            <input
                id={props.id.clone()}
                type="date"
                name="data"
                class="form-control"
                required=true
                value={props.value.map(format_date).unwrap_or_default()}
                onchange={onchange}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AppointmentFieldsetProps {
    /// Prefix for element ids, e.g. `nova` or `edit`.
    pub prefix: AttrValue,
    pub draft: AppointmentDraft,
    pub units: UnitSelect,
    pub clients: Vec<Client>,
    pub technicians: Vec<Technician>,
    pub on_client: Callback<Option<ClientId>>,
    pub on_change: Callback<FieldChange>,
}

/// Client, unit, technician, status and observations inputs shared by the
/// create and edit forms.
#[function_component(AppointmentFieldset)]
pub fn appointment_fieldset(props: &AppointmentFieldsetProps) -> Html {
    let id = |field: &str| format!("{}-{}", props.prefix, field);
    let draft = &props.draft;

    let on_client = props.on_client.reform(selected_id);
    let on_unit = props
        .on_change
        .reform(|e: Event| FieldChange::Unit(selected_id(e)));
    let on_technician = props
        .on_change
        .reform(|e: Event| FieldChange::Technician(selected_id(e)));
    let on_status = props.on_change.reform(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        FieldChange::Status(AppointmentStatus::from(select.value()))
    });
    let on_observations = props.on_change.reform(|e: InputEvent| {
        let area: HtmlTextAreaElement = e.target_unchecked_into();
        FieldChange::Observations(area.value())
    });

    // A stored status outside the known set stays selectable while editing.
    let mut statuses = AppointmentStatus::SELECTABLE.to_vec();
    if !statuses.contains(&draft.status) {
        statuses.push(draft.status.clone());
    }

    let units = &props.units;
    let unit_options = html! {
        <>
            if let Some(prompt) = units.placeholder() {
                <option value="" selected=true>{ prompt }</option>
            }
            { for units.options().iter().map(|unit| html! {
                <option
                    value={unit.id.to_string()}
                    selected={units.selected() == Some(unit.id)}
                >
                    { &unit.name }
                </option>
            })}
        </>
    };

    html! {
        <>
            <div class="mb-3">
                <label class="form-label" for={id("cliente")}>{ "Cliente" }</label>
                <select id={id("cliente")} name="cliente_id" class="form-select" required=true onchange={on_client}>
                    <option value="" selected={draft.client_id.is_none()}>{ "Selecione..." }</option>
                    { for props.clients.iter().map(|client| html! {
                        <option
                            value={client.id.to_string()}
                            selected={draft.client_id == Some(client.id)}
                        >
                            { &client.name }
                        </option>
                    })}
                </select>
            </div>
            <div class="mb-3">
                <label class="form-label" for={id("unidade")}>{ "Unidade" }</label>
                <select id={id("unidade")} name="unidade_id" class="form-select" required=true onchange={on_unit}>
                    { unit_options }
                </select>
            </div>
            <div class="mb-3">
                <label class="form-label" for={id("tecnico")}>{ "Técnico" }</label>
                <select id={id("tecnico")} name="tecnico_id" class="form-select" required=true onchange={on_technician}>
                    <option value="" selected={draft.technician_id.is_none()}>{ "Selecione..." }</option>
                    { for props.technicians.iter().map(|technician| html! {
                        <option
                            value={technician.id.to_string()}
                            selected={draft.technician_id == Some(technician.id)}
                        >
                            { &technician.name }
                        </option>
                    })}
                </select>
            </div>
            <div class="mb-3">
                <label class="form-label" for={id("status")}>{ "Status" }</label>
                <select id={id("status")} name="status" class="form-select" onchange={on_status}>
                    { for statuses.into_iter().map(|status| html! {
                        <option
                            value={status.label().to_string()}
                            selected={status == draft.status}
                        >
                            { status.label().to_string() }
                        </option>
                    })}
                </select>
            </div>
            <div class="mb-3">
                <label class="form-label" for={id("observacoes")}>{ "Observações" }</label>
                <textarea
                    id={id("observacoes")}
                    name="observacoes"
                    class="form-control"
                    rows="3"
                    value={draft.observations.clone()}
                    oninput={on_observations}
                />
            </div>
        </>
    }
}
