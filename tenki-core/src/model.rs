#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub location: String,
}

impl WeatherRequest {
    pub fn new(location: impl Into<String>) -> Self {
        Self { location: location.into() }
    }
}

/// Current conditions as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub temperature_c: f64,
    /// Condition label in the language requested from the provider.
    pub condition_text: String,
    pub condition_code: u32,
    pub is_day: bool,
}
