use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("{}", http_message(.status, .message))]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    /// Text shown inline on a page. Validation messages and server-provided
    /// error bodies are shown as-is; everything else uses the display form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(message) => message.clone(),
            AppError::Http { message, .. } if !message.is_empty() => message.clone(),
            _ => self.to_string(),
        }
    }

    /// HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn http_message(status: &u16, message: &str) -> String {
    if message.is_empty() {
        format!("Request failed ({status})")
    } else {
        format!("Request failed ({status}): {message}")
    }
}
