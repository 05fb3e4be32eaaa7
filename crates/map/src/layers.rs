//! Overlay layers: earthquake circles and the fault-line group.

use std::sync::{Arc, PoisonError, RwLock};

use quakemap_colormap::{circle_style, popup_for, CircleStyle};
use quakemap_core::{Earthquake, PlateBoundary};
use serde::Serialize;
use tracing::debug;

// ---------------------------------------------------------------------------
// Earthquakes
// ---------------------------------------------------------------------------

/// One rendered earthquake: a styled circle with a bound popup.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeCircle {
    pub lat: f64,
    pub lon: f64,
    pub style: CircleStyle,
    /// Popup markup.
    pub popup: String,
}

impl EarthquakeCircle {
    pub fn from_earthquake(eq: &Earthquake) -> Self {
        Self {
            lat: eq.lat(),
            lon: eq.lon(),
            style: circle_style(eq.encoded_magnitude()),
            popup: popup_for(eq),
        }
    }
}

/// Point layer built from an earthquake feed.
///
/// Consumes the raw records; only the encoded circles are retained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EarthquakeLayer {
    circles: Vec<EarthquakeCircle>,
}

impl EarthquakeLayer {
    pub fn from_earthquakes(quakes: impl IntoIterator<Item = Earthquake>) -> Self {
        let circles: Vec<EarthquakeCircle> = quakes
            .into_iter()
            .map(|eq| EarthquakeCircle::from_earthquake(&eq))
            .collect();
        debug!("built earthquake layer with {} circles", circles.len());
        Self { circles }
    }

    pub fn circles(&self) -> &[EarthquakeCircle] {
        &self.circles
    }

    pub fn len(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Fault lines
// ---------------------------------------------------------------------------

/// Path style for plate boundaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    pub color: String,
    pub fill_opacity: f64,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: "orange".to_string(),
            fill_opacity: 0.0,
        }
    }
}

/// Whether boundaries have arrived yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultLineState {
    /// Created, nothing added yet.
    Absent,
    /// At least one boundary has been added. Terminal.
    Present,
}

#[derive(Debug, Default)]
struct GroupInner {
    boundaries: Vec<PlateBoundary>,
    revision: u64,
}

/// Append-only container for plate boundaries.
///
/// Created empty before the boundary fetch starts, handed to the map
/// composition, and filled in whenever the fetch completes. Clones share the
/// same contents; boundaries are never removed.
#[derive(Debug, Clone, Default)]
pub struct FaultLineGroup {
    inner: Arc<RwLock<GroupInner>>,
    style: PathStyle,
}

impl FaultLineGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append boundaries and return how many were added.
    ///
    /// An empty batch leaves the group and its revision unchanged.
    pub fn extend(&self, boundaries: impl IntoIterator<Item = PlateBoundary>) -> usize {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let before = inner.boundaries.len();
        inner.boundaries.extend(boundaries);
        let added = inner.boundaries.len() - before;
        if added > 0 {
            inner.revision += 1;
            debug!("fault-line group now holds {} boundaries", inner.boundaries.len());
        }
        added
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .boundaries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of non-empty batches appended so far.
    pub fn revision(&self) -> u64 {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).revision
    }

    pub fn state(&self) -> FaultLineState {
        if self.is_empty() {
            FaultLineState::Absent
        } else {
            FaultLineState::Present
        }
    }

    /// Run `f` over the current boundaries without copying them.
    pub fn with_boundaries<R>(&self, f: impl FnOnce(&[PlateBoundary]) -> R) -> R {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&inner.boundaries)
    }

    /// Copy of the current boundaries.
    pub fn snapshot(&self) -> Vec<PlateBoundary> {
        self.with_boundaries(|b| b.to_vec())
    }

    pub fn style(&self) -> &PathStyle {
        &self.style
    }

    /// Whether `other` is a handle to the same group.
    pub fn same_group(&self, other: &FaultLineGroup) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{line_string, Geometry};
    use quakemap_colormap::MagnitudeBand;

    fn boundary() -> PlateBoundary {
        PlateBoundary::new(Geometry::LineString(line_string![
            (x: 0.0, y: 0.0),
            (x: 5.0, y: 5.0),
        ]))
    }

    #[test]
    fn circles_follow_encoding() {
        let layer = EarthquakeLayer::from_earthquakes(vec![
            Earthquake::new(-117.0, 35.0).with_magnitude(2.5),
            Earthquake::new(142.0, 38.0).with_magnitude(5.0),
            Earthquake::new(-150.0, 61.0),
        ]);
        assert_eq!(layer.len(), 3);

        let c = &layer.circles()[0];
        assert_eq!((c.lat, c.lon), (35.0, -117.0));
        assert_eq!(c.style.radius, 50_000.0);
        assert_eq!(c.style.color, MagnitudeBand::TwoToThree.color());
        assert_eq!(c.style.fill_opacity, 1.0);

        assert_eq!(layer.circles()[1].style.color, MagnitudeBand::FiveAndAbove.color());

        // null magnitude: lowest band, zero radius
        let missing = &layer.circles()[2];
        assert_eq!(missing.style.radius, 0.0);
        assert_eq!(missing.style.color, MagnitudeBand::BelowOne.color());
    }

    #[test]
    fn group_starts_absent() {
        let group = FaultLineGroup::new();
        assert!(group.is_empty());
        assert_eq!(group.state(), FaultLineState::Absent);
        assert_eq!(group.revision(), 0);
        assert_eq!(group.style().color, "orange");
        assert_eq!(group.style().fill_opacity, 0.0);
    }

    #[test]
    fn clones_share_contents() {
        let group = FaultLineGroup::new();
        let handle = group.clone();
        assert!(group.same_group(&handle));

        assert_eq!(handle.extend(vec![boundary(), boundary()]), 2);
        assert_eq!(group.len(), 2);
        assert_eq!(group.state(), FaultLineState::Present);
        assert_eq!(group.revision(), 1);

        assert!(!group.same_group(&FaultLineGroup::new()));
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let group = FaultLineGroup::new();
        assert_eq!(group.extend(Vec::new()), 0);
        assert_eq!(group.revision(), 0);
        assert_eq!(group.state(), FaultLineState::Absent);
    }

    #[test]
    fn concurrent_appends() {
        let group = FaultLineGroup::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let g = group.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        g.extend(std::iter::once(boundary()));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(group.len(), 100);
        assert_eq!(group.revision(), 100);
        assert_eq!(group.snapshot().len(), 100);
    }
}
