// Copyright 2025 the Zonemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The set of selected zones and shapes.

use alloc::collections::BTreeMap;

use zonemap_selection::Selection;

use crate::{ShapeId, ZoneFeature, ZoneKey};

/// Selected zones and selected shapes, each in selection order.
///
/// Zones are keyed by [`ZoneKey`] so the same zone can never be selected
/// twice; the zone's data is kept alongside for hosts that export it.
#[derive(Clone, Debug, Default)]
pub struct SelectionSet {
    zones: Selection<ZoneKey>,
    zone_data: BTreeMap<ZoneKey, ZoneFeature>,
    shapes: Selection<ShapeId>,
}

impl SelectionSet {
    /// Returns `true` when neither zones nor shapes are selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty() && self.shapes.is_empty()
    }

    /// Number of selected zones.
    #[must_use]
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Returns `true` if the zone with `key` is selected.
    #[must_use]
    pub fn contains_zone(&self, key: &ZoneKey) -> bool {
        self.zones.contains(key)
    }

    /// Selected zones, oldest first.
    pub fn zones(&self) -> impl Iterator<Item = &ZoneFeature> + '_ {
        self.zones.iter().filter_map(|key| self.zone_data.get(key))
    }

    /// Selected shape ids, oldest first.
    #[must_use]
    pub fn shapes(&self) -> &[ShapeId] {
        self.shapes.items()
    }

    /// Returns `true` if the shape is selected.
    #[must_use]
    pub fn contains_shape(&self, id: ShapeId) -> bool {
        self.shapes.contains(&id)
    }

    /// Combined revision of both selections; changes whenever either does.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.zones.revision().wrapping_add(self.shapes.revision())
    }

    /// Toggles a zone and returns whether it is selected afterwards.
    pub(crate) fn toggle_zone(&mut self, zone: ZoneFeature) -> bool {
        let key = zone.key();
        if self.zones.toggle(key.clone()) {
            self.zone_data.insert(key, zone);
            true
        } else {
            self.zone_data.remove(&key);
            false
        }
    }

    /// Deselects the most recently selected zone.
    pub(crate) fn pop_last_zone(&mut self) -> Option<ZoneFeature> {
        let key = self.zones.pop_last()?;
        self.zone_data.remove(&key)
    }

    pub(crate) fn toggle_shape(&mut self, id: ShapeId) -> bool {
        self.shapes.toggle(id)
    }

    pub(crate) fn select_shape(&mut self, id: ShapeId) {
        self.shapes.add(id);
    }

    pub(crate) fn deselect_shape(&mut self, id: ShapeId) -> bool {
        self.shapes.remove(&id).is_some()
    }

    pub(crate) fn clear(&mut self) {
        self.zones.clear();
        self.zone_data.clear();
        self.shapes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use zonemap_overlay::Properties;

    fn zone(id: &str) -> ZoneFeature {
        ZoneFeature {
            zone_id: Some(String::from(id)),
            geometry: None,
            properties: Properties::new(),
        }
    }

    #[test]
    fn zones_toggle_and_pop_in_order() {
        let mut s = SelectionSet::default();
        assert!(s.toggle_zone(zone("a")));
        assert!(s.toggle_zone(zone("b")));
        assert!(!s.toggle_zone(zone("a")));
        assert!(s.toggle_zone(zone("c")));

        let ids: alloc::vec::Vec<_> = s.zones().filter_map(|z| z.zone_id.as_deref()).collect();
        assert_eq!(ids, ["b", "c"]);

        assert_eq!(s.pop_last_zone().and_then(|z| z.zone_id), Some(String::from("c")));
        assert_eq!(s.zone_count(), 1);
    }

    #[test]
    fn revision_moves_on_any_change() {
        let mut s = SelectionSet::default();
        let r0 = s.revision();
        s.select_shape(ShapeId(1));
        let r1 = s.revision();
        assert_ne!(r0, r1);
        s.select_shape(ShapeId(1));
        assert_eq!(s.revision(), r1, "re-selecting is a no-op");
        assert!(s.deselect_shape(ShapeId(1)));
        assert!(!s.deselect_shape(ShapeId(1)));
        assert!(s.is_empty());
    }
}
