//! Static magnitude legend.

use quakemap_colormap::{band_color, escape_html, MagnitudeBand, Rgb};

use crate::control::ControlPosition;

/// One legend row: a swatch and its range label.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendRow {
    pub band: MagnitudeBand,
    pub color: Rgb,
    pub label: String,
}

/// Legend panel listing every magnitude band, lowest first.
///
/// Built once; it does not change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    position: ControlPosition,
    class_name: &'static str,
    rows: Vec<LegendRow>,
}

impl Default for Legend {
    fn default() -> Self {
        Self::new()
    }
}

impl Legend {
    pub fn new() -> Self {
        // Swatches go through the same lookup as the circles, sampled inside
        // each band so no boundary value is involved.
        let rows = MagnitudeBand::ALL
            .iter()
            .map(|&band| LegendRow {
                band,
                color: band_color(band.representative()),
                label: band.label(),
            })
            .collect();
        Self {
            position: ControlPosition::BottomRight,
            class_name: "info legend",
            rows,
        }
    }

    pub fn rows(&self) -> &[LegendRow] {
        &self.rows
    }

    pub fn position(&self) -> ControlPosition {
        self.position
    }

    pub fn class_name(&self) -> &'static str {
        self.class_name
    }

    /// Inner markup for the legend container.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for row in &self.rows {
            html.push_str(&format!(
                "<i style=\"background:{}\"></i> {}",
                row.color.css(),
                row_label_html(row.band)
            ));
        }
        html
    }
}

fn row_label_html(band: MagnitudeBand) -> String {
    match band {
        MagnitudeBand::FiveAndAbove => escape_html(&band.label()),
        other => format!("{}&ndash;{}<br>", other.index(), other.index() + 1),
    }
}
