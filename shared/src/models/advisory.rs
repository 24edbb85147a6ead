//! Advisory report models: the verdict and everything the UI renders

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::score::{score_hiking, score_mushroom, Activity, ConditionRating, ScoreResult};
use super::weather::{normalize_with_units, NormalizedWeather, WeatherConditions};
use crate::types::Units;

/// Both scores below this send everyone indoors
pub const OUTDOOR_THRESHOLD: f64 = 5.0;

/// Score at which a recommendation becomes enthusiastic
const EXCEPTIONAL_SCORE: f64 = 8.0;

/// Final verdict after comparing the two activity scores
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Indoors,
    Mushroom,
    Hiking,
    Either,
}

impl Recommendation {
    /// Stable label persisted with each query
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::Indoors => "indoors",
            Recommendation::Mushroom => "mushroom",
            Recommendation::Hiking => "hiking",
            Recommendation::Either => "either",
        }
    }

    /// Message shown in the recommendation banner
    pub fn message(&self, mushroom: f64, hiking: f64) -> &'static str {
        match self {
            Recommendation::Indoors => {
                "Not ideal for outdoor activities today. Perfect time to stay cozy indoors with a good book or movie!"
            }
            Recommendation::Mushroom if mushroom >= EXCEPTIONAL_SCORE => {
                "Exceptional mushroom foraging weather!"
            }
            Recommendation::Mushroom => "Great conditions for mushroom foraging!",
            Recommendation::Hiking if hiking >= EXCEPTIONAL_SCORE => "Perfect hiking weather!",
            Recommendation::Hiking => "Good day for a hike!",
            Recommendation::Either => {
                "Both activities look promising today! Follow your heart and choose your adventure!"
            }
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Recommendation {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "indoors" => Ok(Recommendation::Indoors),
            "mushroom" => Ok(Recommendation::Mushroom),
            "hiking" => Ok(Recommendation::Hiking),
            "either" => Ok(Recommendation::Either),
            _ => Err("Unknown recommendation label"),
        }
    }
}

/// Pick an activity from the two scores
pub fn recommend(mushroom: f64, hiking: f64) -> Recommendation {
    if mushroom < OUTDOOR_THRESHOLD && hiking < OUTDOOR_THRESHOLD {
        Recommendation::Indoors
    } else if mushroom > hiking {
        Recommendation::Mushroom
    } else if hiking > mushroom {
        Recommendation::Hiking
    } else {
        Recommendation::Either
    }
}

/// One scored activity as rendered on a score card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityReport {
    pub activity: Activity,
    pub score: f64,
    pub rating: ConditionRating,
    pub reasons: Vec<String>,
}

impl ActivityReport {
    pub fn new(activity: Activity, result: ScoreResult) -> Self {
        Self {
            activity,
            score: result.score,
            rating: result.rating(),
            reasons: result.reasons,
        }
    }
}

/// Complete advisory for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryReport {
    pub city: String,
    pub conditions: WeatherConditions,
    pub weather: NormalizedWeather,
    pub mushroom: ActivityReport,
    pub hiking: ActivityReport,
    pub recommendation: Recommendation,
    pub message: String,
}

/// Score a normalized record and build the report
pub fn assess_normalized(
    city: &str,
    conditions: WeatherConditions,
    weather: NormalizedWeather,
) -> AdvisoryReport {
    let mushroom = ActivityReport::new(Activity::MushroomForaging, score_mushroom(&weather));
    let hiking = ActivityReport::new(Activity::Hiking, score_hiking(&weather));
    let recommendation = recommend(mushroom.score, hiking.score);

    AdvisoryReport {
        city: city.to_string(),
        conditions,
        message: recommendation.message(mushroom.score, hiking.score).to_string(),
        weather,
        mushroom,
        hiking,
        recommendation,
    }
}

/// Normalize a raw provider payload, score it and build the report
pub fn assess(city: &str, raw: &Value, units: Units) -> AdvisoryReport {
    assess_normalized(
        city,
        WeatherConditions::from_payload(raw),
        normalize_with_units(raw, units),
    )
}
