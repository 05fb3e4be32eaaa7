//! # Quakemap Colormap
//!
//! Visual encoding of earthquake magnitudes.
//!
//! Six half-open [`MagnitudeBand`]s partition the real line; [`band_color`]
//! is the single lookup shared by circle styling and the legend, so the two
//! can never disagree on boundary values. [`radius`] scales magnitude
//! linearly to metres and [`popup_html`] renders the place/time label.
//!
//! ## Usage
//!
//! ```ignore
//! use quakemap_colormap::{band_color, circle_style, MagnitudeBand};
//!
//! assert_eq!(band_color(1.0), MagnitudeBand::OneToTwo.color());
//! let style = circle_style(2.5);
//! ```

mod scheme;
mod encode;

pub use scheme::{band_color, MagnitudeBand, Rgb};
pub use encode::{
    circle_style, escape_html, format_timestamp, popup_for, popup_html, radius, CircleStyle,
    RADIUS_SCALE,
};
