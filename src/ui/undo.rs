//! Undo/redo functionality for tracking and reversing user actions.
//!
//! Every alignment, fit, mode toggle and drag is recorded as the set of values it changed, so
//! undoing is a matter of writing the old values back.

use crate::constants::MAX_UNDO_HISTORY;
use crate::mute::ModeChange;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// A node's bounds before and after a move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeMove {
    /// Node that moved
    pub node_id: NodeId,
    /// Bounds before the move
    pub old_rect: Rect,
    /// Bounds after the move
    pub new_rect: Rect,
}

/// Represents different types of actions that can be undone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UndoAction {
    /// A bounds operation resized or moved groups
    BoundsChanged {
        changes: Vec<BoundsChange>,
    },
    /// Nodes were muted, bypassed or restored
    ModesChanged {
        changes: Vec<ModeChange>,
    },
    /// Groups and nodes were dragged
    ItemsMoved {
        groups: Vec<BoundsChange>,
        nodes: Vec<NodeMove>,
    },
}

impl UndoAction {
    /// Builds the action describing everything that moved between `before` and `after`.
    ///
    /// Returns `None` when nothing moved.
    pub fn from_scene_diff(before: &Scene, after: &Scene) -> Option<Self> {
        let groups: Vec<BoundsChange> = after
            .groups
            .values()
            .filter_map(|group| {
                let old = before.groups.get(&group.id)?;
                (old.rect != group.rect).then_some(BoundsChange {
                    group_id: group.id,
                    old_rect: old.rect,
                    new_rect: group.rect,
                })
            })
            .collect();
        let nodes: Vec<NodeMove> = after
            .nodes
            .values()
            .filter_map(|node| {
                let old = before.nodes.get(&node.id)?;
                (old.rect != node.rect).then_some(NodeMove {
                    node_id: node.id,
                    old_rect: old.rect,
                    new_rect: node.rect,
                })
            })
            .collect();
        if groups.is_empty() && nodes.is_empty() {
            None
        } else {
            Some(UndoAction::ItemsMoved { groups, nodes })
        }
    }
}

/// Manages undo/redo history for the application.
#[derive(Debug, Clone, Default)]
pub struct UndoHistory {
    /// Stack of actions that can be undone
    undo_stack: Vec<UndoAction>,
    /// Stack of actions that can be redone
    redo_stack: Vec<UndoAction>,
}

impl UndoHistory {
    /// Creates a new empty undo history.
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Adds an action to the undo history.
    ///
    /// This clears the redo stack since a new action invalidates any previously undone actions.
    pub fn push_action(&mut self, action: UndoAction) {
        self.undo_stack.push(action);
        self.redo_stack.clear();

        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    /// Returns true if there are actions that can be undone.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are actions that can be redone.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Pops the most recent action from the undo stack.
    pub fn pop_undo(&mut self) -> Option<UndoAction> {
        self.undo_stack.pop()
    }

    /// Pops the most recent action from the redo stack.
    pub fn pop_redo(&mut self) -> Option<UndoAction> {
        self.redo_stack.pop()
    }

    /// Pushes an action onto the undo stack without touching the redo stack.
    pub fn push_undo(&mut self, action: UndoAction) {
        self.undo_stack.push(action);
    }

    /// Pushes an action onto the redo stack.
    pub fn push_redo(&mut self, action: UndoAction) {
        self.redo_stack.push(action);
    }

    /// Clears all undo and redo history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

/// Extension methods for applying undo/redo actions to a scene.
pub trait UndoableScene {
    /// Reverses an action, returning the action that re-applies it.
    fn apply_undo(&mut self, action: &UndoAction) -> Option<UndoAction>;
}

fn reversed_bounds(changes: &[BoundsChange]) -> Vec<BoundsChange> {
    changes
        .iter()
        .map(|c| BoundsChange {
            group_id: c.group_id,
            old_rect: c.new_rect,
            new_rect: c.old_rect,
        })
        .collect()
}

impl UndoableScene for Scene {
    fn apply_undo(&mut self, action: &UndoAction) -> Option<UndoAction> {
        match action {
            UndoAction::BoundsChanged { changes } => {
                for change in changes {
                    if let Some(group) = self.groups.get_mut(&change.group_id) {
                        group.rect = change.old_rect;
                    }
                }
                Some(UndoAction::BoundsChanged {
                    changes: reversed_bounds(changes),
                })
            }
            UndoAction::ModesChanged { changes } => {
                for change in changes {
                    if let Some(node) = self.nodes.get_mut(&change.node_id) {
                        node.mode = change.old_mode;
                    }
                }
                Some(UndoAction::ModesChanged {
                    changes: changes
                        .iter()
                        .map(|c| ModeChange {
                            node_id: c.node_id,
                            old_mode: c.new_mode,
                            new_mode: c.old_mode,
                        })
                        .collect(),
                })
            }
            UndoAction::ItemsMoved { groups, nodes } => {
                for change in groups {
                    if let Some(group) = self.groups.get_mut(&change.group_id) {
                        group.rect = change.old_rect;
                    }
                }
                for moved in nodes {
                    if let Some(node) = self.nodes.get_mut(&moved.node_id) {
                        node.rect = moved.old_rect;
                    }
                }
                Some(UndoAction::ItemsMoved {
                    groups: reversed_bounds(groups),
                    nodes: nodes
                        .iter()
                        .map(|m| NodeMove {
                            node_id: m.node_id,
                            old_rect: m.new_rect,
                            new_rect: m.old_rect,
                        })
                        .collect(),
                })
            }
        }
    }
}
