//! Failure taxonomy for calls to the scheduling backend.
//!
//! Every variant ends up as the same per-action alert; the variant itself is
//! only logged.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status
    #[error("HTTP error: {0}")]
    Status(u16),

    /// The body could not be parsed into the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The form body could not be built
    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// The backend answered `success: false`
    #[error("Request rejected by the server")]
    Rejected,

    /// No appointment is loaded in the form
    #[error("No appointment selected")]
    MissingId,
}

impl ApiError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        ApiError::Network(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        ApiError::Decode(err.to_string())
    }

    pub fn encode(err: impl std::fmt::Debug) -> Self {
        ApiError::Encode(format!("{:?}", err))
    }
}

/// Mutating operations offered by the agenda forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
    Duplicate,
}

impl Mutation {
    /// Alert shown when the operation fails for any reason.
    pub fn failure_message(self) -> &'static str {
        match self {
            Mutation::Create => "Erro ao salvar agendamento!",
            Mutation::Update => "Erro ao atualizar!",
            Mutation::Delete => "Erro ao excluir!",
            Mutation::Duplicate => "Erro ao duplicar!",
        }
    }
}
