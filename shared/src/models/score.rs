//! Activity scoring models
//!
//! Each scorer adds integer points per weather factor, then scales the total
//! to a 0.0-10.0 score with one decimal place.

use serde::{Deserialize, Serialize};

use super::weather::NormalizedWeather;

/// Upper bound on raw points before scaling
const MAX_POINTS: i32 = 100;

/// Outdoor activity being rated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    MushroomForaging,
    Hiking,
}

impl Activity {
    pub fn title(&self) -> &'static str {
        match self {
            Activity::MushroomForaging => "Mushroom Foraging",
            Activity::Hiking => "Hiking",
        }
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Scored outcome of one activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// 0.0-10.0, one decimal place
    pub score: f64,
    /// One entry per triggered rule, in evaluation order
    pub reasons: Vec<String>,
}

impl ScoreResult {
    pub fn rating(&self) -> ConditionRating {
        classify_score(self.score)
    }
}

/// Verbal rating shown next to a score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConditionRating {
    /// 8.0 and above
    Excellent,
    /// 6.0-7.9
    Good,
    /// 4.0-5.9
    Fair,
    /// Below 4.0
    Poor,
}

impl std::fmt::Display for ConditionRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionRating::Excellent => write!(f, "Excellent"),
            ConditionRating::Good => write!(f, "Good"),
            ConditionRating::Fair => write!(f, "Fair"),
            ConditionRating::Poor => write!(f, "Poor"),
        }
    }
}

/// Classify a 0-10 score
pub fn classify_score(score: f64) -> ConditionRating {
    if score >= 8.0 {
        ConditionRating::Excellent
    } else if score >= 6.0 {
        ConditionRating::Good
    } else if score >= 4.0 {
        ConditionRating::Fair
    } else {
        ConditionRating::Poor
    }
}

/// Running point total with the reasons that produced it
struct Tally {
    points: i32,
    reasons: Vec<String>,
}

impl Tally {
    fn new() -> Self {
        Self {
            points: 0,
            reasons: Vec::new(),
        }
    }

    fn add(&mut self, points: i32, reason: String) {
        self.points += points;
        self.reasons.push(reason);
    }

    /// Clamp raw points to `0..=MAX_POINTS`, then scale to 0-10
    fn finish(self) -> ScoreResult {
        let clamped = self.points.clamp(0, MAX_POINTS);
        ScoreResult {
            score: round_one_decimal(f64::from(clamped) / 10.0),
            reasons: self.reasons,
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rate mushroom-foraging suitability
pub fn score_mushroom(weather: &NormalizedWeather) -> ScoreResult {
    let mut tally = Tally::new();

    let temp = weather.temperature;
    if (12.0..=20.0).contains(&temp) {
        tally.add(25, format!("Ideal temperature for fungi ({temp:.1}°C)"));
    } else if (8.0..12.0).contains(&temp) || (temp > 20.0 && temp <= 24.0) {
        tally.add(15, format!("Acceptable temperature ({temp:.1}°C)"));
    }

    let humidity = weather.humidity;
    if humidity >= 85.0 {
        tally.add(20, format!("Very humid air ({humidity:.0}%)"));
    } else if humidity >= 70.0 {
        tally.add(10, format!("Moderately humid air ({humidity:.0}%)"));
    }

    let rain = weather.rainfall_48h;
    if (5.0..=25.0).contains(&rain) {
        tally.add(20, format!("Good recent rainfall ({rain:.1} mm in 48h)"));
    } else if rain > 0.0 {
        tally.add(10, format!("Some recent rainfall ({rain:.1} mm in 48h)"));
    }

    match weather.month {
        9 | 10 => tally.add(20, "Peak mushroom season".to_string()),
        8 | 11 => tally.add(10, "Shoulder mushroom season".to_string()),
        _ => {}
    }

    if let Some(soil) = weather.soil_moisture {
        if (30.0..=60.0).contains(&soil) {
            tally.add(15, format!("Ideal soil moisture ({soil:.0}%)"));
        } else if (20.0..30.0).contains(&soil) || (soil > 60.0 && soil <= 70.0) {
            tally.add(8, format!("Acceptable soil moisture ({soil:.0}%)"));
        }
    }

    tally.finish()
}

/// Rate hiking comfort
///
/// Rain, strong UV and short days subtract points. The total is floored at
/// zero before scaling.
pub fn score_hiking(weather: &NormalizedWeather) -> ScoreResult {
    let mut tally = Tally::new();

    let temp = weather.temperature;
    if (15.0..=24.0).contains(&temp) {
        tally.add(30, format!("Comfortable temperature ({temp:.1}°C)"));
    } else if (10.0..15.0).contains(&temp) || (temp > 24.0 && temp <= 28.0) {
        tally.add(20, format!("Mild temperature ({temp:.1}°C)"));
    }

    let humidity = weather.humidity;
    if humidity <= 60.0 {
        tally.add(15, format!("Low humidity ({humidity:.0}%)"));
    } else if humidity <= 75.0 {
        tally.add(10, format!("Moderate humidity ({humidity:.0}%)"));
    }

    let wind = weather.wind_speed;
    if (0.0..=5.0).contains(&wind) {
        tally.add(15, format!("Light wind ({wind:.1} m/s)"));
    } else if wind > 5.0 && wind <= 8.0 {
        tally.add(10, format!("Breezy but manageable ({wind:.1} m/s)"));
    }

    let rain = weather.rainfall_24h;
    if rain == 0.0 {
        tally.add(15, "No recent rain".to_string());
    } else if rain <= 3.0 {
        tally.add(8, format!("Light rain ({rain:.1} mm)"));
    } else {
        tally.add(-10, format!("Heavy rain penalty ({rain:.1} mm)"));
    }

    if let Some(uv) = weather.uv_index {
        if (0.0..=5.0).contains(&uv) {
            tally.add(10, format!("Low UV index ({uv:.0})"));
        } else if (6.0..=7.0).contains(&uv) {
            tally.add(5, format!("Moderate UV index ({uv:.0})"));
        } else {
            tally.add(-5, format!("High UV penalty ({uv:.0})"));
        }
    }

    if let Some(daylight) = weather.daylight_hours {
        if daylight >= 10.0 {
            tally.add(10, format!("Long daylight ({daylight:.1} h)"));
        } else if daylight >= 7.0 {
            tally.add(5, format!("Moderate daylight ({daylight:.1} h)"));
        } else {
            tally.add(-5, format!("Short daylight penalty ({daylight:.1} h)"));
        }
    }

    if matches!(weather.month, 4 | 5 | 9 | 10) {
        tally.add(5, "Seasonal hiking bonus".to_string());
    }

    tally.finish()
}
