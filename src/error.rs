use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// No API key was supplied and none could be found in the environment.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A terminal call was made before every required parameter was bound.
    #[error("{endpoint}: missing required parameter(s): {}", missing.join(", "))]
    MissingParameters {
        endpoint: &'static str,
        missing: Vec<&'static str>,
    },

    /// Export format outside csv/html/xml/json.
    #[error("unsupported download format {0:?} (expected one of: csv, html, xml, json)")]
    UnsupportedFormat(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}
