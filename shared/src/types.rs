//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Unit system requested from the weather provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Celsius, metres per second
    #[default]
    Metric,
    /// Fahrenheit, miles per hour
    Imperial,
    /// Kelvin, metres per second
    Standard,
}

impl Units {
    /// Value for the provider's `units` query parameter
    pub fn as_query_value(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    /// Convert a provider temperature to degrees Celsius
    pub fn temperature_to_celsius(&self, value: f64) -> f64 {
        match self {
            Units::Metric => value,
            Units::Imperial => (value - 32.0) * 5.0 / 9.0,
            Units::Standard => value - 273.15,
        }
    }

    /// Convert a provider wind speed to metres per second
    pub fn wind_to_mps(&self, value: f64) -> f64 {
        match self {
            Units::Imperial => value * 0.44704,
            Units::Metric | Units::Standard => value,
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_query_value())
    }
}

impl std::str::FromStr for Units {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            "standard" => Ok(Units::Standard),
            _ => Err("Units must be one of: metric, imperial, standard"),
        }
    }
}

/// Query limit for listing endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Limit(u32);

impl Limit {
    pub const DEFAULT: u32 = 20;
    pub const MAX: u32 = 100;

    /// Clamp a requested limit into `1..=MAX`, using the default when absent
    pub fn new(requested: Option<u32>) -> Self {
        Self(requested.unwrap_or(Self::DEFAULT).clamp(1, Self::MAX))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_conversion() {
        assert_eq!(Units::Metric.temperature_to_celsius(16.0), 16.0);
        assert!((Units::Imperial.temperature_to_celsius(68.0) - 20.0).abs() < 1e-9);
        assert!((Units::Standard.temperature_to_celsius(293.15) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_wind_conversion() {
        assert_eq!(Units::Metric.wind_to_mps(3.0), 3.0);
        assert_eq!(Units::Standard.wind_to_mps(3.0), 3.0);
        assert!((Units::Imperial.wind_to_mps(10.0) - 4.4704).abs() < 1e-9);
    }

    #[test]
    fn test_units_parsing() {
        assert_eq!("metric".parse::<Units>(), Ok(Units::Metric));
        assert_eq!(" Imperial ".parse::<Units>(), Ok(Units::Imperial));
        assert!("kelvin".parse::<Units>().is_err());
    }

    #[test]
    fn test_limit_clamping() {
        assert_eq!(Limit::new(None).get(), 20);
        assert_eq!(Limit::new(Some(0)).get(), 1);
        assert_eq!(Limit::new(Some(500)).get(), 100);
        assert_eq!(Limit::new(Some(7)).get(), 7);
    }
}
