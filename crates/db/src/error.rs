/// Errors from the backend client layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("Backend API error ({status}): {message}")]
    Api {
        status: u16,
        /// Backend error code (e.g. a PostgreSQL SQLSTATE), when provided.
        code: Option<String>,
        message: String,
    },

    /// A payload could not be turned into JSON.
    #[error("Failed to encode payload for {table}: {source}")]
    Encode {
        table: String,
        #[source]
        source: serde_json::Error,
    },

    /// Returned rows did not match the expected shape.
    #[error("Failed to decode rows from {table}: {source}")]
    Decode {
        table: String,
        #[source]
        source: serde_json::Error,
    },

    /// A write that should return the stored row returned nothing.
    #[error("Backend returned no rows for {operation} on {table}")]
    EmptyResponse {
        table: String,
        operation: &'static str,
    },

    #[error("Invalid backend configuration: {0}")]
    Config(String),
}

impl DbError {
    /// Short machine-readable category, used in logs and failure reports.
    pub fn kind(&self) -> &'static str {
        match self {
            DbError::Request(_) => "request",
            DbError::Api { .. } => "api",
            DbError::Encode { .. } => "encode",
            DbError::Decode { .. } => "decode",
            DbError::EmptyResponse { .. } => "empty_response",
            DbError::Config(_) => "config",
        }
    }
}
