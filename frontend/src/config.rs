use agenda_shared::models::{Client, Technician};
use anyhow::{Context, Result};
use serde::Deserialize;

/// Id of the `<script type="application/json">` element the backend template
/// renders the page configuration into.
pub const CONFIG_ELEMENT_ID: &str = "agenda-config";

/// Base URL used when the page does not provide one. Empty means same origin.
const DEFAULT_API_BASE_URL: &str = match option_env!("AGENDA_API_BASE_URL") {
    Some(url) => url,
    None => "",
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Options of the client dropdowns.
    #[serde(default, rename = "clientes")]
    pub clients: Vec<Client>,
    /// Options of the technician dropdowns and of the calendar filter.
    #[serde(default, rename = "tecnicos")]
    pub technicians: Vec<Technician>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            clients: Vec::new(),
            technicians: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("agenda config is not valid JSON")
    }

    fn from_document() -> Result<Self> {
        let document = gloo::utils::document();
        let element = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .with_context(|| format!("#{} element not found", CONFIG_ELEMENT_ID))?;
        let json = element
            .text_content()
            .context("config element has no text")?;
        Self::from_json(&json)
    }

    /// Reads the page configuration, falling back to defaults when it is
    /// missing or broken.
    pub fn load() -> Self {
        match Self::from_document() {
            Ok(config) => {
                tracing::debug!(
                    clients = config.clients.len(),
                    technicians = config.technicians.len(),
                    "agenda config loaded"
                );
                config
            }
            Err(e) => {
                tracing::error!("Falling back to default config: {:#}", e);
                Self::default()
            }
        }
    }
}
