//! Data models for the colorimetry exporter.
//!
//! This module contains the wire-format structures returned by the
//! Klaviyo events API and the flattened sample rows the exporter
//! produces from them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One page of the events API response.
///
/// Klaviyo returns `{"data": [...], "links": {"next": ...}}`. Both fields
/// are defaulted so a sparse or empty body deserializes cleanly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPage {
    /// Events on this page, in API order.
    #[serde(default)]
    pub data: Vec<Event>,
    /// Pagination links for this page.
    #[serde(default)]
    pub links: PageLinks,
}

impl EventPage {
    /// The cursor for the page after this one, if any.
    ///
    /// An empty string counts as "no next page". Klaviyo terminates
    /// pagination with `null` or an absent field, but an empty link would
    /// otherwise send the loop back to the first page.
    pub fn next_cursor(&self) -> Option<&str> {
        self.links.next.as_deref().filter(|link| !link.is_empty())
    }
}

/// Pagination links attached to a page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageLinks {
    /// Fully-qualified URL of the next page, or null on the last page.
    #[serde(default)]
    pub next: Option<String>,
}

/// A single raw event record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Event {
    /// Event ID assigned by Klaviyo. Only used for debug logging.
    #[serde(default)]
    pub id: Option<String>,
    /// The event's attribute block.
    #[serde(default)]
    pub attributes: EventAttributes,
}

/// Attribute block of an event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventAttributes {
    /// Free-form properties recorded with the event. All measurement
    /// fields (rgb, season, confidence) live here under string keys.
    #[serde(default)]
    pub event_properties: Map<String, Value>,
    /// The profile the event belongs to, when the API includes it.
    #[serde(default)]
    pub profile: Option<ProfileInfo>,
}

/// Profile details nested in an event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileInfo {
    /// Email address of the profile, if known.
    #[serde(default)]
    pub email: Option<String>,
}

/// A flattened color-measurement sample.
///
/// Serde field order doubles as the CSV column order:
/// `email, r, g, b, season, confidence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRow {
    /// Email of the measured customer, when the event carried a profile.
    pub email: Option<String>,
    /// Red channel of the measured color.
    pub r: f64,
    /// Green channel of the measured color.
    pub g: f64,
    /// Blue channel of the measured color.
    pub b: f64,
    /// Seasonal color classification (e.g. "Autumn").
    pub season: String,
    /// Classifier confidence score, when recorded.
    pub confidence: Option<f64>,
}

impl SampleRow {
    /// The three color channels as an array, in r/g/b order.
    pub fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

/// Average color channels for one season group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonAverages {
    /// Season label the group was keyed on.
    pub season: String,
    /// Mean red channel.
    pub r: f64,
    /// Mean green channel.
    pub g: f64,
    /// Mean blue channel.
    pub b: f64,
    /// Number of samples in the group.
    pub count: usize,
}
