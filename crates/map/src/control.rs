//! Layer control: exclusive base selection plus independent overlay toggles.

use std::fmt;

use serde::Serialize;

use crate::error::{MapError, Result};
use crate::tiles::BaseMap;

/// Map corner a control is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Independently toggleable overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    Earthquakes,
    FaultLines,
}

impl Overlay {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Earthquakes => "Earthquakes",
            Self::FaultLines => "FaultLines",
        }
    }
}

impl fmt::Display for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the layer control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerEntry {
    Base(BaseMap),
    Overlay(Overlay),
}

impl LayerEntry {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Base(b) => b.name(),
            Self::Overlay(o) => o.name(),
        }
    }
}

/// Layer-toggle widget state.
///
/// Exactly one base map is active at any time. Overlays are checkboxes and
/// never affect each other or the base selection.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerControl {
    bases: Vec<BaseMap>,
    active_base: BaseMap,
    overlays: Vec<(Overlay, bool)>,
    collapsed: bool,
    position: ControlPosition,
}

impl LayerControl {
    /// Control over `bases` with `active` selected and every overlay shown.
    ///
    /// `active` is added to the base list if missing.
    pub fn new(bases: &[BaseMap], active: BaseMap, overlays: &[Overlay]) -> Self {
        let mut bases = bases.to_vec();
        if !bases.contains(&active) {
            bases.insert(0, active);
        }
        Self {
            bases,
            active_base: active,
            overlays: overlays.iter().map(|&o| (o, true)).collect(),
            collapsed: false,
            position: ControlPosition::TopRight,
        }
    }

    pub fn bases(&self) -> &[BaseMap] {
        &self.bases
    }

    pub fn overlays(&self) -> impl Iterator<Item = (Overlay, bool)> + '_ {
        self.overlays.iter().copied()
    }

    pub fn active_base(&self) -> BaseMap {
        self.active_base
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn position(&self) -> ControlPosition {
        self.position
    }

    /// Every entry, bases first, in display order.
    pub fn entries(&self) -> Vec<LayerEntry> {
        self.bases
            .iter()
            .map(|&b| LayerEntry::Base(b))
            .chain(self.overlays.iter().map(|&(o, _)| LayerEntry::Overlay(o)))
            .collect()
    }

    /// Make `base` the single active base map.
    pub fn select_base(&mut self, base: BaseMap) -> Result<()> {
        if !self.bases.contains(&base) {
            return Err(MapError::UnknownLayer(base.name().to_string()));
        }
        self.active_base = base;
        Ok(())
    }

    /// Show or hide one overlay.
    pub fn set_overlay(&mut self, overlay: Overlay, visible: bool) -> Result<()> {
        let slot = self
            .overlays
            .iter_mut()
            .find(|(o, _)| *o == overlay)
            .ok_or_else(|| MapError::UnknownLayer(overlay.name().to_string()))?;
        slot.1 = visible;
        Ok(())
    }

    /// Act on a click: a base entry becomes the active base, an overlay
    /// entry flips its checkbox.
    pub fn toggle(&mut self, entry: LayerEntry) -> Result<()> {
        match entry {
            LayerEntry::Base(b) => self.select_base(b),
            LayerEntry::Overlay(o) => {
                let visible = self.is_visible(entry);
                self.set_overlay(o, !visible)
            }
        }
    }

    pub fn is_visible(&self, entry: LayerEntry) -> bool {
        match entry {
            LayerEntry::Base(b) => self.active_base == b,
            LayerEntry::Overlay(o) => self
                .overlays
                .iter()
                .any(|&(candidate, visible)| candidate == o && visible),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control() -> LayerControl {
        LayerControl::new(
            &BaseMap::ALL,
            BaseMap::Outdoor,
            &[Overlay::Earthquakes, Overlay::FaultLines],
        )
    }

    fn visibility(c: &LayerControl) -> Vec<bool> {
        c.entries().into_iter().map(|e| c.is_visible(e)).collect()
    }

    #[test]
    fn defaults() {
        let c = control();
        assert_eq!(c.entries().len(), 5);
        assert!(!c.collapsed());
        assert_eq!(c.position(), ControlPosition::TopRight);
        assert_eq!(visibility(&c), [true, false, false, true, true]);
    }

    #[test]
    fn overlay_toggle_changes_only_that_entry() {
        for overlay in [Overlay::Earthquakes, Overlay::FaultLines] {
            let mut c = control();
            let before = visibility(&c);
            c.toggle(LayerEntry::Overlay(overlay)).unwrap();
            let after = visibility(&c);

            let changed: Vec<usize> = (0..before.len()).filter(|&i| before[i] != after[i]).collect();
            assert_eq!(changed.len(), 1);
            assert_eq!(c.entries()[changed[0]], LayerEntry::Overlay(overlay));

            c.toggle(LayerEntry::Overlay(overlay)).unwrap();
            assert_eq!(visibility(&c), before);
        }
    }

    #[test]
    fn base_selection_is_exclusive_and_leaves_overlays_alone() {
        let mut c = control();
        c.set_overlay(Overlay::FaultLines, false).unwrap();

        for base in BaseMap::ALL {
            c.toggle(LayerEntry::Base(base)).unwrap();
            let active: Vec<BaseMap> = BaseMap::ALL
                .into_iter()
                .filter(|&b| c.is_visible(LayerEntry::Base(b)))
                .collect();
            assert_eq!(active, [base]);
            assert!(c.is_visible(LayerEntry::Overlay(Overlay::Earthquakes)));
            assert!(!c.is_visible(LayerEntry::Overlay(Overlay::FaultLines)));
        }
    }

    #[test]
    fn reselecting_active_base_changes_nothing() {
        let mut c = control();
        let before = visibility(&c);
        c.toggle(LayerEntry::Base(BaseMap::Outdoor)).unwrap();
        assert_eq!(visibility(&c), before);
    }

    #[test]
    fn unknown_entries_are_rejected() {
        let mut c = LayerControl::new(&[BaseMap::Outdoor], BaseMap::Outdoor, &[Overlay::FaultLines]);
        assert!(matches!(
            c.select_base(BaseMap::Satellite),
            Err(MapError::UnknownLayer(_))
        ));
        assert!(c.toggle(LayerEntry::Overlay(Overlay::Earthquakes)).is_err());
        assert!(!c.is_visible(LayerEntry::Overlay(Overlay::Earthquakes)));
    }

    #[test]
    fn position_serializes_like_leaflet() {
        let json = serde_json::to_string(&ControlPosition::BottomRight).unwrap();
        assert_eq!(json, "\"bottomright\"");
    }
}
