//! Server-rendered HTML pages
//!
//! Pages are built from a single layout template. Every piece of text that
//! originates from a request or the weather provider is HTML-escaped.

use html_escape::{encode_double_quoted_attribute, encode_text};
use shared::{Activity, ActivityReport, AdvisoryReport, NormalizedWeather, Recommendation, WeatherConditions};

use crate::error::AppError;

const LAYOUT: &str = include_str!("views/layout.html");

const PAGE_TITLE: &str = "Spores & Outdoors";

/// Landing page with the city form
pub fn index_page() -> String {
    render_layout("", "")
}

/// Full advisory for a city
pub fn advice_page(report: &AdvisoryReport) -> String {
    let content = format!(
        concat!(
            "<div class=\"columns\">\n",
            "<section>\n<h3>🌤️ Current Weather</h3>\n{weather}</section>\n",
            "<section>\n<h3>🎯 Activity Scores</h3>\n{mushroom}{hiking}</section>\n",
            "</div>\n",
            "<h3>🎯 Today's Recommendation</h3>\n{banner}"
        ),
        weather = weather_card(&report.city, &report.conditions, &report.weather),
        mushroom = score_card(&report.mushroom),
        hiking = score_card(&report.hiking),
        banner = recommendation_banner(report.recommendation, &report.message),
    );

    render_layout(&report.city, &content)
}

/// Form page showing why a lookup failed
pub fn error_page(city: &str, error: &AppError) -> String {
    let (class, icon) = match error {
        AppError::Validation { .. } => ("warning", "📝"),
        AppError::InvalidApiKey => ("error", "🔑"),
        AppError::CityNotFound(_) => ("error", "🗺️"),
        AppError::WeatherServiceUnavailable(_) | AppError::Network(_) => ("error", "🌐"),
        AppError::MissingApiKey => ("error", "⚠️"),
        _ => ("error", "❌"),
    };

    let content = format!(
        "<div class=\"banner {}\">{} {}</div>\n",
        class,
        icon,
        encode_text(&error.user_message())
    );

    render_layout(city, &content)
}

fn render_layout(city: &str, content: &str) -> String {
    let title = encode_text(PAGE_TITLE);
    let city = encode_double_quoted_attribute(city);

    fill(
        LAYOUT,
        &[
            ("TITLE", title.as_ref()),
            ("CITY", city.as_ref()),
            ("CONTENT", content),
        ],
    )
}

/// Substitute `{{{KEY}}}` placeholders in a single pass.
///
/// Inserted values are never rescanned, so user text cannot expand into
/// another placeholder.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 3..];

        let Some(end) = after.find("}}}") else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };

        let key = &after[..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 3 + end + 3]),
        }
        rest = &after[end + 3..];
    }

    out.push_str(rest);
    out
}

fn weather_card(city: &str, conditions: &WeatherConditions, weather: &NormalizedWeather) -> String {
    format!(
        concat!(
            "<div class=\"weather-card\">\n",
            "<h4>📍 {city}</h4>\n",
            "<div class=\"weather-metric\"><strong>🌤️ Condition:</strong> {desc} ",
            "<span class=\"muted\">({main})</span></div>\n",
            "<div class=\"weather-metric\"><strong>🌡️ Temperature:</strong> {temp:.1}°C</div>\n",
            "<div class=\"weather-metric\"><strong>💧 Humidity:</strong> {humidity:.0}%</div>\n",
            "<div class=\"weather-metric\"><strong>💨 Wind Speed:</strong> {wind:.1} m/s</div>\n",
            "</div>\n"
        ),
        city = encode_text(city),
        desc = encode_text(&conditions.display_description()),
        main = encode_text(conditions.display_main()),
        temp = weather.temperature,
        humidity = weather.humidity,
        wind = weather.wind_speed,
    )
}

fn score_card(report: &ActivityReport) -> String {
    let icon = match report.activity {
        Activity::MushroomForaging => "🍄",
        Activity::Hiking => "🥾",
    };

    format!(
        concat!(
            "<div class=\"score-card\">\n",
            "<h4>{icon} {title}</h4>\n",
            "<div class=\"score\">{score:.1}/10</div>\n",
            "<div class=\"rating\">{rating} conditions</div>\n",
            "{reasons}",
            "</div>\n"
        ),
        icon = icon,
        title = report.activity.title(),
        score = report.score,
        rating = report.rating,
        reasons = render_reasons(&report.reasons),
    )
}

fn render_reasons(reasons: &[String]) -> String {
    if reasons.is_empty() {
        return "<em>No major contributing factors</em>\n".to_string();
    }

    let items: String = reasons
        .iter()
        .map(|reason| format!("<li>{}</li>", encode_text(reason)))
        .collect();
    format!("<ul class=\"reasons\">{}</ul>\n", items)
}

fn recommendation_banner(recommendation: Recommendation, message: &str) -> String {
    let (class, icon) = match recommendation {
        Recommendation::Indoors => ("warning", "🏠"),
        Recommendation::Mushroom => ("success", "🍄"),
        Recommendation::Hiking => ("success", "🥾"),
        Recommendation::Either => ("info", "🌟"),
    };

    format!(
        "<div class=\"banner {}\">{} {}</div>\n",
        class,
        icon,
        encode_text(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::{assess, Units};

    fn sample_report(city: &str) -> AdvisoryReport {
        let raw = json!({
            "main": { "temp": 16.0, "humidity": 90 },
            "wind": { "speed": 2.0 },
            "rain": { "1h": 5.0, "3h": 10.0 },
            "weather": [{ "main": "Rain", "description": "moderate rain" }],
            "dt": 1726401600
        });
        assess(city, &raw, Units::Metric)
    }

    #[test]
    fn test_index_page_has_form_and_no_placeholders() {
        let html = index_page();
        assert!(html.contains("action=\"/advice\""));
        assert!(html.contains("Spores &amp; Outdoors"));
        assert!(!html.contains("{{{"));
    }

    #[test]
    fn test_advice_page_renders_scores() {
        let html = advice_page(&sample_report("Berlin"));
        assert!(html.contains("📍 Berlin"));
        assert!(html.contains("Moderate Rain"));
        assert!(html.contains("8.5/10"));
        assert!(html.contains("Excellent conditions"));
        assert!(html.contains("Exceptional mushroom foraging weather!"));
        assert!(html.contains("Peak mushroom season"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let html = advice_page(&sample_report("<script>alert(1)</script>"));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_city_cannot_inject_placeholders() {
        let html = error_page("{{{CONTENT}}}", &AppError::CityNotFound("x".into()));
        assert_eq!(html.matches("class=\"banner error\"").count(), 1);
    }

    #[test]
    fn test_empty_reasons() {
        assert_eq!(
            render_reasons(&[]),
            "<em>No major contributing factors</em>\n"
        );
    }

    #[test]
    fn test_error_page_uses_friendly_message() {
        let html = error_page("Atlantis", &AppError::CityNotFound("Atlantis".into()));
        assert!(html.contains("City 'Atlantis' not found"));
        assert!(html.contains("value=\"Atlantis\""));
    }

    #[test]
    fn test_fill_leaves_unknown_placeholders() {
        assert_eq!(fill("a {{{X}}} b", &[]), "a {{{X}}} b");
        assert_eq!(fill("{{{X}}}{{{Y}}}", &[("X", "1"), ("Y", "2")]), "12");
        assert_eq!(fill("open {{{X", &[("X", "1")]), "open {{{X");
    }
}
