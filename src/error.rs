use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

/// Failure raised while retrieving the fund list from the quotes endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Falha ao buscar dados ({0})")]
    Status(u16),
    /// Transport or decoding failure; the detail is kept for logs only.
    #[error("Erro inesperado")]
    Unexpected(String),
}

impl FetchError {
    pub fn unexpected<T: Into<String>>(detail: T) -> Self {
        FetchError::Unexpected(detail.into())
    }

    pub fn detail(&self) -> String {
        match self {
            FetchError::Status(code) => format!("upstream responded with status {code}"),
            FetchError::Unexpected(detail) => detail.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The user aborted an in-flight load.
    #[error("Busca cancelada pelo usuário")]
    Cancelled,
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }
}
