// Error types shared by the library. Each layer gets its own enum so the
// session can match on what went wrong instead of inspecting strings.

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single call to the remote completion service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, TLS, connection
    /// reset, malformed header value...).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// 401/403 from the service. A missing API key ends up here.
    #[error("authentication failed ({status}): {body}")]
    Unauthorized { status: u16, body: String },

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// A 2xx response whose body does not carry generated text.
    #[error("unexpected response: {0}")]
    ResponseShape(String),
}

impl ApiError {
    /// Classify a non-success HTTP status together with its body.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => ApiError::Unauthorized { status, body },
            _ => ApiError::Status { status, body },
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

/// Failures reading or writing the menu file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("El archivo '{}' no fue encontrado.", path.display())]
    NotFound { path: PathBuf },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound { path }
        } else {
            StoreError::Io { path, source }
        }
    }
}

/// Failures while collecting input from the user.
#[derive(Debug, Error)]
pub enum InputError {
    /// Day or meal count was not an integer.
    #[error("Por favor, introduce un número válido para los días y las comidas.")]
    InvalidNumber(#[from] ParseIntError),

    /// The terminal itself failed; nothing sensible can be done with it.
    #[error("console error: {0}")]
    Console(#[from] std::io::Error),
}
