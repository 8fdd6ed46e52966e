//! Event-to-row extraction.
//!
//! Maps one raw event to an optional flattened sample. Extraction is
//! deliberately permissive: an event missing its color value or season
//! label is dropped silently rather than failing the export.

use crate::models::{Event, SampleRow};
use serde_json::{Map, Value};
use tracing::debug;

/// Flatten one event into a sample row.
///
/// Returns `None` when the event lacks a usable `rgb` array or a season
/// label. The season is taken from `season`, falling back to
/// `skin_season` when the primary field is absent, null, or empty.
pub fn extract_sample(event: &Event) -> Option<SampleRow> {
    let props = &event.attributes.event_properties;

    let Some((r, g, b)) = color_channels(props) else {
        debug!("Dropping event {:?}: no usable rgb value", event.id);
        return None;
    };

    let Some(season) = season_label(props) else {
        debug!("Dropping event {:?}: no season label", event.id);
        return None;
    };

    let confidence = props.get("skin_season_confidence").and_then(Value::as_f64);
    let email = event
        .attributes
        .profile
        .as_ref()
        .and_then(|profile| profile.email.clone());

    Some(SampleRow {
        email,
        r,
        g,
        b,
        season,
        confidence,
    })
}

/// The first three numeric elements of the `rgb` property, in order.
///
/// Arrays shorter than three elements or with non-numeric entries are
/// rejected, which drops the event.
fn color_channels(props: &Map<String, Value>) -> Option<(f64, f64, f64)> {
    let rgb = props.get("rgb")?.as_array()?;

    let r = rgb.first()?.as_f64()?;
    let g = rgb.get(1)?.as_f64()?;
    let b = rgb.get(2)?.as_f64()?;

    Some((r, g, b))
}

/// Season label, preferring `season` over `skin_season`.
fn season_label(props: &Map<String, Value>) -> Option<String> {
    string_prop(props, "season").or_else(|| string_prop(props, "skin_season"))
}

/// A property as a non-empty string. Null, non-string, and empty values
/// all yield `None` so the caller falls through to the next candidate.
fn string_prop(props: &Map<String, Value>, key: &str) -> Option<String> {
    props
        .get(key)?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventPage;
    use serde_json::json;

    fn event_from(value: Value) -> Event {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_extracts_full_event() {
        let event = event_from(json!({
            "id": "ev1",
            "attributes": {
                "event_properties": {
                    "rgb": [182, 121, 99],
                    "season": "Autumn",
                    "skin_season": "Summer",
                    "skin_season_confidence": 0.91
                },
                "profile": {"email": "ana@example.com"}
            }
        }));

        let row = extract_sample(&event).unwrap();
        assert_eq!(row.email.as_deref(), Some("ana@example.com"));
        assert_eq!(row.channels(), [182.0, 121.0, 99.0]);
        // Primary field wins over the fallback
        assert_eq!(row.season, "Autumn");
        assert_eq!(row.confidence, Some(0.91));
    }

    #[test]
    fn test_season_fallback() {
        let event = event_from(json!({
            "attributes": {
                "event_properties": {
                    "rgb": [10, 20, 30],
                    "skin_season": "Autumn"
                }
            }
        }));

        let row = extract_sample(&event).unwrap();
        assert_eq!(row.season, "Autumn");
    }

    #[test]
    fn test_null_and_empty_season_fall_through() {
        let event = event_from(json!({
            "attributes": {
                "event_properties": {
                    "rgb": [10, 20, 30],
                    "season": null,
                    "skin_season": "Winter"
                }
            }
        }));
        assert_eq!(extract_sample(&event).unwrap().season, "Winter");

        let event = event_from(json!({
            "attributes": {
                "event_properties": {
                    "rgb": [10, 20, 30],
                    "season": "",
                    "skin_season": "Winter"
                }
            }
        }));
        assert_eq!(extract_sample(&event).unwrap().season, "Winter");
    }

    #[test]
    fn test_drops_event_without_rgb() {
        let event = event_from(json!({
            "attributes": {
                "event_properties": {"season": "Winter"}
            }
        }));
        assert!(extract_sample(&event).is_none());
    }

    #[test]
    fn test_drops_event_without_any_season() {
        let event = event_from(json!({
            "attributes": {
                "event_properties": {"rgb": [1, 2, 3]}
            }
        }));
        assert!(extract_sample(&event).is_none());
    }

    #[test]
    fn test_drops_short_or_non_numeric_rgb() {
        let short = event_from(json!({
            "attributes": {
                "event_properties": {"rgb": [10, 20], "season": "Spring"}
            }
        }));
        assert!(extract_sample(&short).is_none());

        let empty = event_from(json!({
            "attributes": {
                "event_properties": {"rgb": [], "season": "Spring"}
            }
        }));
        assert!(extract_sample(&empty).is_none());

        let non_numeric = event_from(json!({
            "attributes": {
                "event_properties": {"rgb": ["r", "g", "b"], "season": "Spring"}
            }
        }));
        assert!(extract_sample(&non_numeric).is_none());
    }

    #[test]
    fn test_missing_profile_yields_no_email() {
        let event = event_from(json!({
            "attributes": {
                "event_properties": {"rgb": [96, 60, 52], "season": "Winter"}
            }
        }));

        let row = extract_sample(&event).unwrap();
        assert_eq!(row.email, None);
        assert_eq!(row.confidence, None);
    }

    #[test]
    fn test_fixture_page_yields_expected_rows() {
        let page: EventPage =
            serde_json::from_str(include_str!("../../fixtures/events_page.json")).unwrap();

        let rows: Vec<_> = page.data.iter().filter_map(extract_sample).collect();

        // 5 events: one lacks rgb, one lacks both season fields
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].season, "Autumn");
        assert_eq!(rows[1].season, "Summer");
        assert_eq!(rows[2].season, "Winter");
        assert_eq!(rows[2].email, None);
    }
}
