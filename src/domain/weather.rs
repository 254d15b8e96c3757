use serde::{Deserialize, Serialize};

/// Current conditions for a single city, reshaped from the provider's payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: u8,
    pub condition: String,
}
