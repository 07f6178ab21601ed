use thiserror::Error;

/// Errors returned by the assist service client.
#[derive(Debug, Error)]
pub enum AssistError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status. `message` is the service's
    /// `error` field when it sent one.
    #[error("assist service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid assist base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("unsupported language '{0}'; expected 'en' or 'hi'")]
    UnsupportedLanguage(String),

    #[error("unknown SEO template '{0}'; expected 'default', 'sale', or 'new'")]
    UnknownTemplate(String),
}
