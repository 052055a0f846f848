//! Status-bar record: building it from a reading and encoding it as one JSON
//! line.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::{
    model::{WeatherReading, WeatherRequest},
    provider::WeatherProvider,
    translate::{self, Translation},
};

const CLASS_PREFIX: &str = "class-";

/// Last-resort payload when encoding fails.
pub const ERROR_JSON: &str = r#"{"text":"Error","alt":0,"class":"error"}"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub text: String,
    pub alt: u32,
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl OutputRecord {
    pub fn from_reading(reading: &WeatherReading, translation: &Translation) -> Self {
        Self {
            text: format!("{:.1}°C ({})", reading.temperature_c, reading.condition_text),
            alt: reading.condition_code,
            class: format!("{CLASS_PREFIX}{}", reading.condition_code),
            tooltip: Some(translation.tooltip()),
        }
    }

    /// The fixed error record; `message` ends up in the tooltip.
    pub fn error(message: impl Display) -> Self {
        Self {
            text: "Error".to_string(),
            alt: 0,
            class: "error".to_string(),
            tooltip: Some(message.to_string()),
        }
    }

    pub fn to_json_line(&self) -> String {
        encode_line(self)
    }
}

/// Serialize `value` as a single line of JSON, substituting the fixed error
/// record if serialization fails. The result is always valid JSON.
pub fn encode_line<T: Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(line) => line,
        Err(err) => {
            warn!(%err, "failed to encode widget record, emitting error record");
            ERROR_JSON.to_string()
        }
    }
}

/// Fetch, translate and format. Failures turn into the error record so the
/// caller always has something to print.
pub async fn current_record(
    provider: &dyn WeatherProvider,
    request: &WeatherRequest,
) -> OutputRecord {
    match provider.current(request).await {
        Ok(reading) => {
            let translation = translate::translate(&reading);
            if !translation.is_found() {
                warn!(
                    code = reading.condition_code,
                    text = %reading.condition_text,
                    "no translation for condition"
                );
            }
            OutputRecord::from_reading(&reading, &translation)
        }
        Err(err) => {
            error!(kind = err.kind(), "{err}");
            OutputRecord::error(&err)
        }
    }
}
