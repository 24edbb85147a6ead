//! Validation utilities for user input

/// Longest city name accepted from the search form
pub const MAX_CITY_LENGTH: usize = 100;

/// Validate a city search term and return it trimmed
pub fn validate_city(input: &str) -> Result<String, &'static str> {
    let city = input.trim();

    if city.is_empty() {
        return Err("Please enter a city name");
    }
    if city.chars().count() > MAX_CITY_LENGTH {
        return Err("City name must be at most 100 characters");
    }
    if city.chars().any(char::is_control) {
        return Err("City name contains invalid characters");
    }

    Ok(city.to_string())
}

/// Validate that a score lies on the 0-10 scale
pub fn validate_score(score: f64) -> Result<(), &'static str> {
    if !score.is_finite() || !(0.0..=10.0).contains(&score) {
        return Err("Score must be between 0 and 10");
    }
    Ok(())
}
