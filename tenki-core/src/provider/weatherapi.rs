use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::Settings,
    error::WeatherError,
    model::{WeatherReading, WeatherRequest},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1";
pub const DEFAULT_LANG: &str = "ja";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    lang: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            lang: DEFAULT_LANG.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Build a provider from resolved settings, applying the optional timeout.
    pub fn from_settings(settings: &Settings) -> Result<Self, WeatherError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| WeatherError::Network(e.without_url()))?;

        Ok(Self {
            api_key: settings.api_key.clone(),
            lang: settings.lang.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Single GET against `current.json`, returning the raw body.
    pub async fn fetch_current(&self, location: &str) -> Result<Vec<u8>, WeatherError> {
        let url = format!("{}/current.json", self.base_url);
        debug!(%url, location, lang = %self.lang, "requesting current conditions");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", location),
                ("key", self.api_key.as_str()),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.without_url()))?;

        let status = res.status();
        let body = res.bytes().await.map_err(|e| WeatherError::Read(e.without_url()))?;
        debug!(%status, bytes = body.len(), "response received");

        if !status.is_success() {
            return Err(WeatherError::Status { status, message: error_message(&body) });
        }

        Ok(body.to_vec())
    }
}

/// Decode a `current.json` body.
pub fn decode_current(body: &[u8]) -> Result<WeatherReading, WeatherError> {
    let parsed: WaResponse = serde_json::from_slice(body)?;
    let current = parsed.current;

    Ok(WeatherReading {
        temperature_c: current.temp_c,
        condition_text: current.condition.text,
        condition_code: current.condition.code,
        is_day: current.is_day != Some(0),
    })
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    code: u32,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    is_day: Option<u8>,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    current: WaCurrent,
}

#[derive(Debug, Deserialize)]
struct WaErrorDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct WaErrorBody {
    error: WaErrorDetail,
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn current(&self, request: &WeatherRequest) -> Result<WeatherReading, WeatherError> {
        let body = self.fetch_current(&request.location).await?;
        decode_current(&body)
    }
}

/// Prefer the provider's own error message; fall back to the raw body.
fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<WaErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => truncate_body(&String::from_utf8_lossy(body)),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "location": {"name": "Tokyo", "country": "Japan"},
        "current": {
            "temp_c": 5.0,
            "is_day": 1,
            "condition": {"text": "晴れ", "icon": "//cdn/113.png", "code": 1000},
            "humidity": 40
        }
    }"#;

    #[test]
    fn decodes_current_conditions() {
        let reading = decode_current(SAMPLE.as_bytes()).unwrap();
        assert_eq!(
            reading,
            WeatherReading {
                temperature_c: 5.0,
                condition_text: "晴れ".to_string(),
                condition_code: 1000,
                is_day: true,
            }
        );
    }

    #[test]
    fn night_flag_and_missing_flag() {
        let night = r#"{"current":{"temp_c":-1.5,"is_day":0,"condition":{"text":"快晴","code":1000}}}"#;
        assert!(!decode_current(night.as_bytes()).unwrap().is_day);

        let absent = r#"{"current":{"temp_c":3,"condition":{"text":"霧","code":1135}}}"#;
        let reading = decode_current(absent.as_bytes()).unwrap();
        assert!(reading.is_day);
        assert_eq!(reading.temperature_c, 3.0);
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = decode_current(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, WeatherError::Parse(_)));
    }

    #[test]
    fn missing_or_mistyped_fields_are_parse_errors() {
        let missing_code = r#"{"current":{"temp_c":3,"condition":{"text":"霧"}}}"#;
        assert!(matches!(decode_current(missing_code.as_bytes()), Err(WeatherError::Parse(_))));

        let string_temp = r#"{"current":{"temp_c":"3","condition":{"text":"霧","code":1135}}}"#;
        assert!(matches!(decode_current(string_temp.as_bytes()), Err(WeatherError::Parse(_))));
    }

    #[test]
    fn error_message_prefers_provider_message() {
        let body = br#"{"error":{"code":2006,"message":"API key is invalid."}}"#;
        assert_eq!(error_message(body), "API key is invalid.");
        assert_eq!(error_message(b"Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "雨".repeat(300);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);

        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let provider = WeatherApiProvider::new("KEY".into()).with_base_url("http://localhost:1/v1/");
        assert_eq!(provider.base_url, "http://localhost:1/v1");
    }
}
