//! Read-only world snapshot handed to an agent each tick.

use bw_core::{AgentName, Location, ObjectId, Tick, Visualization};
use serde::{Deserialize, Serialize};

/// Class tag of doors.
pub const DOOR_TAG: &str = "Door";
/// Class tag of blocks that can be picked up.
pub const COLLECTABLE_TAG: &str = "CollectableBlock";
/// Class tag of the drop-zone markers that describe the goal blocks.
pub const DROP_ZONE_TAG: &str = "GhostBlock";

/// One object as the world engine reports it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldObject {
    pub id: ObjectId,
    pub location: Location,
    #[serde(default)]
    pub class_tags: Vec<String>,
    #[serde(default)]
    pub is_open: bool,
    #[serde(default)]
    pub room_name: Option<String>,
    #[serde(default)]
    pub visualization: Option<Visualization>,
    #[serde(default)]
    pub is_collectable: bool,
}

impl WorldObject {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.class_tags.iter().any(|t| t == tag)
    }

    pub fn is_door(&self) -> bool {
        self.has_tag(DOOR_TAG)
    }

    /// A block that can be grabbed right now.
    pub fn is_collectable_block(&self) -> bool {
        self.is_collectable && self.has_tag(COLLECTABLE_TAG) && self.visualization.is_some()
    }

    pub fn is_drop_zone_marker(&self) -> bool {
        self.has_tag(DROP_ZONE_TAG) && self.visualization.is_some()
    }

    /// Room a door belongs to; doors without one report an empty name.
    pub fn room(&self) -> &str {
        self.room_name.as_deref().unwrap_or_default()
    }
}

/// What one agent perceives at the start of a tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldView {
    pub tick: Tick,
    pub agent: AgentName,
    pub agent_location: Location,
    /// Every member of the team, possibly including the viewer.
    pub team_members: Vec<AgentName>,
    pub objects: Vec<WorldObject>,
    /// Objects the agent holds, when the world reports them.
    #[serde(default)]
    pub carrying: Option<Vec<ObjectId>>,
}

impl WorldView {
    pub fn doors(&self) -> impl Iterator<Item = &WorldObject> {
        self.objects.iter().filter(|o| o.is_door())
    }

    pub fn collectable_blocks(&self) -> impl Iterator<Item = &WorldObject> {
        self.objects.iter().filter(|o| o.is_collectable_block())
    }

    /// Collectable blocks on `location`.
    pub fn blocks_at(&self, location: Location) -> impl Iterator<Item = &WorldObject> {
        self.collectable_blocks().filter(move |o| o.location == location)
    }

    /// Drop-zone markers in goal order (sorted by object id).
    pub fn drop_zone(&self) -> Vec<&WorldObject> {
        let mut markers: Vec<&WorldObject> =
            self.objects.iter().filter(|o| o.is_drop_zone_marker()).collect();
        markers.sort_by(|a, b| a.id.cmp(&b.id));
        markers
    }

    /// Teammates, i.e. team members other than the viewer.
    pub fn teammates(&self) -> impl Iterator<Item = &AgentName> {
        self.team_members.iter().filter(|m| **m != self.agent)
    }

    /// Distinct room names behind the visible doors, sorted.
    pub fn room_names(&self) -> Vec<String> {
        let mut rooms: Vec<String> = self
            .doors()
            .filter_map(|d| d.room_name.clone())
            .collect();
        rooms.sort();
        rooms.dedup();
        rooms
    }
}
