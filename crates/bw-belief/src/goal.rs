//! One goal block and the places it might be.

use bw_core::{BlockKey, Location, ObjectId, Visualization};

/// A `(location, object id)` pair for a goal block.
///
/// The id is unknown for candidates learned from teammates, whose messages
/// carry only the location.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Candidate<'a> {
    pub location: Location,
    pub id: Option<&'a ObjectId>,
}

/// A goal block as this agent knows it.
///
/// `locations` and `ids` are parallel: entry `i` of both describes the same
/// sighting.  The fields are private so the alignment cannot be broken from
/// outside.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoalBlock {
    key: BlockKey,
    visualization: Visualization,
    drop_off: Location,
    locations: Vec<Location>,
    ids: Vec<Option<ObjectId>>,
}

impl GoalBlock {
    pub fn new(key: BlockKey, visualization: Visualization, drop_off: Location) -> Self {
        Self { key, visualization, drop_off, locations: Vec::new(), ids: Vec::new() }
    }

    #[inline]
    pub fn key(&self) -> BlockKey {
        self.key
    }

    #[inline]
    pub fn visualization(&self) -> &Visualization {
        &self.visualization
    }

    #[inline]
    pub fn drop_off(&self) -> Location {
        self.drop_off
    }

    pub fn candidate_locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn candidate_ids(&self) -> &[Option<ObjectId>] {
        &self.ids
    }

    pub fn candidates(&self) -> impl Iterator<Item = Candidate<'_>> + '_ {
        self.locations
            .iter()
            .zip(&self.ids)
            .map(|(&location, id)| Candidate { location, id: id.as_ref() })
    }

    pub fn has_candidates(&self) -> bool {
        !self.locations.is_empty()
    }

    /// Append a sighting.
    ///
    /// Repeating a known sighting is a no-op, as is an id-less report of a
    /// location that is already listed.  Returns `true` if an entry was
    /// added.
    pub fn record(&mut self, location: Location, id: Option<ObjectId>) -> bool {
        let known = self
            .locations
            .iter()
            .zip(&self.ids)
            .any(|(l, i)| *l == location && (id.is_none() || *i == id));
        if known {
            return false;
        }
        self.locations.push(location);
        self.ids.push(id);
        true
    }

    /// Drop every candidate at `location`; returns how many were removed.
    pub fn remove_at(&mut self, location: Location) -> usize {
        let before = self.locations.len();
        let mut i = 0;
        while i < self.locations.len() {
            if self.locations[i] == location {
                self.locations.remove(i);
                self.ids.remove(i);
            } else {
                i += 1;
            }
        }
        before - self.locations.len()
    }

    /// Forget the colour channel of the descriptor.
    pub fn strip_colour(&mut self) {
        self.visualization.colour = None;
    }
}
