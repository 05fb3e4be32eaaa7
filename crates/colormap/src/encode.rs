//! Circle radius, circle style and popup content for earthquake events.

use chrono::{DateTime, Utc};
use quakemap_core::Earthquake;

use crate::scheme::{band_color, Rgb};

/// Metres of circle radius per unit of magnitude.
pub const RADIUS_SCALE: f64 = 20_000.0;

/// Circle radius in metres.
///
/// Linear and unclamped: zero or negative magnitudes give a zero or negative
/// radius, which the renderer draws as a degenerate circle.
pub fn radius(magnitude: f64) -> f64 {
    magnitude * RADIUS_SCALE
}

/// Style for one earthquake circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleStyle {
    /// Radius in metres.
    pub radius: f64,
    /// Stroke and fill color.
    pub color: Rgb,
    /// Fill opacity in [0, 1].
    pub fill_opacity: f64,
}

/// Fully opaque circle sized and colored by magnitude.
pub fn circle_style(magnitude: f64) -> CircleStyle {
    CircleStyle {
        radius: radius(magnitude),
        color: band_color(magnitude),
        fill_opacity: 1.0,
    }
}

/// Render an epoch-millisecond timestamp the way a browser prints a `Date`,
/// pinned to UTC: `Tue Nov 14 2023 22:13:20 GMT+0000`.
///
/// Timestamps outside the representable range render as `Invalid Date`.
pub fn format_timestamp(time_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(time_ms) {
        Some(dt) => dt.format("%a %b %d %Y %H:%M:%S GMT%z").to_string(),
        None => "Invalid Date".to_string(),
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Popup markup: place as a heading, a rule, then the event time.
pub fn popup_html(place: Option<&str>, time_ms: Option<i64>) -> String {
    let place = escape_html(place.unwrap_or("Unknown location"));
    let when = match time_ms {
        Some(ms) => format_timestamp(ms),
        None => "Unknown time".to_string(),
    };
    format!("<h3>{}</h3><hr><p>{}</p>", place, when)
}

/// Popup markup for a parsed event.
pub fn popup_for(eq: &Earthquake) -> String {
    popup_html(eq.place.as_deref(), eq.time_ms)
}
