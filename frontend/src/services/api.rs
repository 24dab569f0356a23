use agenda_shared::api::{
    endpoints, AppointmentFields, CalendarEvent, DuplicateFields, MutationResponse,
};
use agenda_shared::models::{AppointmentId, ClientId, TechnicianId, Unit};
use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use web_sys::FormData;

use crate::error::ApiError;

/// Calls the agenda needs from the scheduling backend.
///
/// Futures are not `Send`: everything runs on the browser's event loop.
#[async_trait(?Send)]
pub trait SchedulingApi {
    async fn list_events(
        &self,
        technician: Option<TechnicianId>,
    ) -> Result<Vec<CalendarEvent>, ApiError>;

    async fn list_units(&self, client: ClientId) -> Result<Vec<Unit>, ApiError>;

    async fn create_appointment(&self, fields: &AppointmentFields) -> Result<(), ApiError>;

    async fn update_appointment(
        &self,
        id: AppointmentId,
        fields: &AppointmentFields,
    ) -> Result<(), ApiError>;

    async fn delete_appointment(&self, id: AppointmentId) -> Result<(), ApiError>;

    async fn duplicate_appointment(
        &self,
        id: AppointmentId,
        fields: &DuplicateFields,
    ) -> Result<(), ApiError>;
}

/// [`SchedulingApi`] over `fetch`.
pub struct ApiService {
    base_url: String,
}

impl ApiService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await.map_err(ApiError::network)?;
        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if !response.ok() {
            return Err(ApiError::Status(response.status()));
        }

        response.json().await.map_err(ApiError::decode)
    }

    async fn mutate(request: Request) -> Result<(), ApiError> {
        let response = request.send().await.map_err(ApiError::network)?;
        let body: MutationResponse = Self::parse(response).await?;
        if body.success {
            Ok(())
        } else {
            Err(ApiError::Rejected)
        }
    }

    async fn post_form(&self, path: &str, pairs: &[(&str, String)]) -> Result<(), ApiError> {
        let form = FormData::new().map_err(ApiError::encode)?;
        for (name, value) in pairs {
            form.append_with_str(name, value)
                .map_err(ApiError::encode)?;
        }

        let request = Request::post(&self.url(path))
            .body(form)
            .map_err(ApiError::encode)?;
        Self::mutate(request).await
    }
}

#[async_trait(?Send)]
impl SchedulingApi for ApiService {
    async fn list_events(
        &self,
        technician: Option<TechnicianId>,
    ) -> Result<Vec<CalendarEvent>, ApiError> {
        let mut request = Request::get(&self.url(endpoints::EVENTS));
        if let Some(technician) = technician {
            request = request.query([(endpoints::TECHNICIAN_FILTER, technician.to_string())]);
        }
        tracing::debug!(?technician, "GET {}", endpoints::EVENTS);

        Self::fetch_json(request).await
    }

    async fn list_units(&self, client: ClientId) -> Result<Vec<Unit>, ApiError> {
        let path = endpoints::units(client);
        tracing::debug!("GET {}", path);

        Self::fetch_json(Request::get(&self.url(&path))).await
    }

    async fn create_appointment(&self, fields: &AppointmentFields) -> Result<(), ApiError> {
        tracing::debug!("POST {}", endpoints::CREATE);
        self.post_form(endpoints::CREATE, &fields.form_pairs()).await
    }

    async fn update_appointment(
        &self,
        id: AppointmentId,
        fields: &AppointmentFields,
    ) -> Result<(), ApiError> {
        let path = endpoints::update(id);
        tracing::debug!("POST {}", path);
        self.post_form(&path, &fields.form_pairs()).await
    }

    async fn delete_appointment(&self, id: AppointmentId) -> Result<(), ApiError> {
        let path = endpoints::delete(id);
        tracing::debug!("DELETE {}", path);
        let request = Request::delete(&self.url(&path))
            .build()
            .map_err(ApiError::encode)?;
        Self::mutate(request).await
    }

    async fn duplicate_appointment(
        &self,
        id: AppointmentId,
        fields: &DuplicateFields,
    ) -> Result<(), ApiError> {
        let path = endpoints::duplicate(id);
        tracing::debug!("POST {}", path);
        self.post_form(&path, &fields.form_pairs()).await
    }
}
