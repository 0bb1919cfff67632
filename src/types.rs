//! Core data types for the group aligner.
//!
//! This module defines the rectangles the bounds engine works on, the handles that identify
//! groups and nodes to the host, and the [`Scene`] host model that snapshots groups into engine
//! inputs and applies the resulting updates back.

use crate::config::AlignerConfig;
use crate::constants::{DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for graph nodes.
pub type NodeId = Uuid;

/// Unique identifier for group-boxes.
pub type GroupId = Uuid;

/// Axis-aligned rectangle in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Horizontal extent, never negative
    pub width: f32,
    /// Vertical extent, never negative
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns true when `other` lies entirely within this rectangle (edges may touch).
    pub fn encloses(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Returns true when the point lies inside the rectangle.
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    /// Returns a copy shifted by the given offsets.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Width/height pair. Defaults to the minimum group size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Size {
    /// Horizontal size
    pub width: f32,
    /// Vertical size
    pub height: f32,
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: DEFAULT_MIN_WIDTH,
            height: DEFAULT_MIN_HEIGHT,
        }
    }
}

/// Execution mode of a graph node, using the host graph's numeric event-mode codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum NodeMode {
    /// Node runs normally
    #[default]
    Always,
    /// Node is muted and never runs
    Never,
    /// Node passes its inputs straight through
    Bypass,
}

impl NodeMode {
    /// Numeric code the host graph uses for this mode.
    pub const fn code(self) -> u8 {
        match self {
            NodeMode::Always => 0,
            NodeMode::Never => 2,
            NodeMode::Bypass => 4,
        }
    }
}

/// A node in the host graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique identifier for this node
    pub id: NodeId,
    /// Display title
    pub title: String,
    /// Node class, used to look up colour presets
    #[serde(default)]
    pub node_type: String,
    /// Bounds on the canvas
    pub rect: Rect,
    /// Current execution mode
    #[serde(default)]
    pub mode: NodeMode,
}

impl GraphNode {
    /// Creates a new node with a fresh ID in [`NodeMode::Always`]. Its type starts out as
    /// the title.
    pub fn new(title: impl Into<String>, rect: Rect) -> Self {
        let title = title.into();
        Self {
            id: Uuid::new_v4(),
            node_type: title.clone(),
            title,
            rect,
            mode: NodeMode::Always,
        }
    }

    /// Sets the node class.
    pub fn with_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = node_type.into();
        self
    }
}

/// A group-box on the canvas. Membership is geometric, not stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier for this group
    pub id: GroupId,
    /// Display title, drawn in the title bar
    pub title: String,
    /// Bounds on the canvas
    pub rect: Rect,
}

impl Group {
    /// Creates a new group with a fresh ID.
    pub fn new(title: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            rect,
        }
    }
}

/// Read-only snapshot of a node's bounds handed to the bounds engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBox {
    /// Host handle of the node
    pub id: NodeId,
    /// Node bounds at snapshot time
    pub rect: Rect,
}

/// Snapshot of a group-box handed to the bounds engine.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBox {
    /// Host handle of the group
    pub id: GroupId,
    /// Group bounds at snapshot time
    pub rect: Rect,
    /// Nodes fully enclosed by the group; `None` when the host could not resolve them
    pub members: Option<Vec<NodeBox>>,
}

impl GroupBox {
    /// Snapshot of a group without resolved members.
    pub fn new(id: GroupId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            members: None,
        }
    }

    /// Attaches a resolved member set.
    pub fn with_members(mut self, members: Vec<NodeBox>) -> Self {
        self.members = Some(members);
        self
    }
}

/// New bounds for one group, produced by the bounds engine and applied by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupUpdate {
    /// Group to update
    pub id: GroupId,
    /// Target rectangle (or delta when `is_absolute` is false)
    pub rect: Rect,
    /// Whether the host should clamp the result to the configured minimum size
    pub clamp_to_minimum: bool,
    /// Whether `rect` is an absolute placement rather than a delta
    pub is_absolute: bool,
}

/// A group's bounds before and after an applied update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsChange {
    /// Group that changed
    pub group_id: GroupId,
    /// Bounds before the update
    pub old_rect: Rect,
    /// Bounds after the update
    pub new_rect: Rect,
}

/// The host graph: every node and group on the canvas.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Scene {
    /// All nodes, indexed by ID
    pub nodes: HashMap<NodeId, GraphNode>,
    /// All groups, indexed by ID
    pub groups: HashMap<GroupId, Group>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the scene to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a scene from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Adds a node and returns its ID.
    pub fn add_node(&mut self, node: GraphNode) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Adds a group and returns its ID.
    pub fn add_group(&mut self, group: Group) -> GroupId {
        let id = group.id;
        self.groups.insert(id, group);
        id
    }

    /// Nodes lying entirely within `rect`.
    pub fn nodes_within(&self, rect: &Rect) -> Vec<NodeBox> {
        self.nodes
            .values()
            .filter(|node| rect.encloses(&node.rect))
            .map(|node| NodeBox {
                id: node.id,
                rect: node.rect,
            })
            .collect()
    }

    /// Snapshot of a group together with the nodes it currently contains.
    ///
    /// Returns `None` when the group does not exist.
    pub fn group_box(&self, group_id: GroupId) -> Option<GroupBox> {
        let group = self.groups.get(&group_id)?;
        Some(GroupBox::new(group.id, group.rect).with_members(self.nodes_within(&group.rect)))
    }

    /// Applies engine updates to the groups, skipping handles that no longer exist.
    ///
    /// # Returns
    ///
    /// The bounds that actually changed, in update order.
    pub fn apply_updates(
        &mut self,
        updates: &[GroupUpdate],
        config: &AlignerConfig,
    ) -> Vec<BoundsChange> {
        let mut changes = Vec::with_capacity(updates.len());
        for update in updates {
            let Some(group) = self.groups.get_mut(&update.id) else {
                log::warn!("Skipping update for missing group {}", update.id);
                continue;
            };
            let old_rect = group.rect;
            let mut new_rect = if update.is_absolute {
                update.rect
            } else {
                Rect::new(
                    old_rect.x + update.rect.x,
                    old_rect.y + update.rect.y,
                    old_rect.width + update.rect.width,
                    old_rect.height + update.rect.height,
                )
            };
            if update.clamp_to_minimum {
                new_rect.width = new_rect.width.max(config.min_node_size.width);
                new_rect.height = new_rect.height.max(config.min_node_size.height);
            }
            if new_rect != old_rect {
                group.rect = new_rect;
                changes.push(BoundsChange {
                    group_id: update.id,
                    old_rect,
                    new_rect,
                });
            }
        }
        changes
    }

    /// Moves a group together with every node it encloses.
    pub fn move_group(&mut self, group_id: GroupId, dx: f32, dy: f32) {
        let Some(group) = self.groups.get_mut(&group_id) else {
            return;
        };
        let enclosing = group.rect;
        group.rect = enclosing.translated(dx, dy);
        for node in self.nodes.values_mut() {
            if enclosing.encloses(&node.rect) {
                node.rect = node.rect.translated(dx, dy);
            }
        }
    }

    /// Topmost node under the given world position, if any.
    pub fn node_at(&self, px: f32, py: f32) -> Option<NodeId> {
        self.nodes
            .values()
            .filter(|node| node.rect.contains_point(px, py))
            .min_by(|a, b| {
                (a.rect.width * a.rect.height).total_cmp(&(b.rect.width * b.rect.height))
            })
            .map(|node| node.id)
    }

    /// Smallest group whose title bar lies under the given world position, if any.
    pub fn group_title_at(&self, px: f32, py: f32, title_height: f32) -> Option<GroupId> {
        self.groups
            .values()
            .filter(|group| {
                let title = Rect::new(
                    group.rect.x,
                    group.rect.y,
                    group.rect.width,
                    title_height.min(group.rect.height),
                );
                title.contains_point(px, py)
            })
            .min_by(|a, b| {
                (a.rect.width * a.rect.height).total_cmp(&(b.rect.width * b.rect.height))
            })
            .map(|group| group.id)
    }
}
