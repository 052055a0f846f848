use reqwest::StatusCode;
use thiserror::Error;

/// Failures of the fetch/decode stages.
///
/// Transport errors are stored without their URL, which carries the API key.
/// Every message starts with `Error` so the diagnostic written to stderr is
/// recognizable by whatever is watching the widget's output.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Error making request: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Error reading response: {0}")]
    Read(#[source] reqwest::Error),

    #[error("Error: weather API returned status {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Error parsing JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl WeatherError {
    /// Short machine-friendly name of the failure kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            WeatherError::Network(_) => "network",
            WeatherError::Read(_) => "read",
            WeatherError::Status { .. } => "status",
            WeatherError::Parse(_) => "parse",
        }
    }
}
