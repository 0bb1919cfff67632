//! Mute and bypass toggling for selected nodes.
//!
//! If every selected node is already in the target mode they are all restored to
//! [`NodeMode::Always`]; otherwise every node not yet in the target mode is switched to it.

use crate::operations::{OperationError, OperationResult};
use crate::types::*;

/// A node mode change, kept for undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ModeChange {
    /// Node that changed
    pub node_id: NodeId,
    /// Mode before the toggle
    pub old_mode: NodeMode,
    /// Mode after the toggle
    pub new_mode: NodeMode,
}

/// Toggles the selected nodes between `target` and [`NodeMode::Always`].
///
/// Unknown node IDs are ignored.
pub fn toggle_mode(
    scene: &mut Scene,
    selection: &[NodeId],
    target: NodeMode,
) -> Result<Vec<ModeChange>, OperationError> {
    let selected: Vec<NodeId> = selection
        .iter()
        .copied()
        .filter(|id| scene.nodes.contains_key(id))
        .collect();
    if selected.is_empty() {
        let label = match target {
            NodeMode::Bypass => "bypass",
            NodeMode::Always | NodeMode::Never => "mute",
        };
        return Err(OperationError::NoNodesSelected(label));
    }

    let all_in_target = selected.iter().all(|id| scene.nodes[id].mode == target);
    let new_mode = if all_in_target { NodeMode::Always } else { target };

    let mut changes = Vec::new();
    for id in selected {
        if let Some(node) = scene.nodes.get_mut(&id) {
            if node.mode != new_mode {
                changes.push(ModeChange {
                    node_id: id,
                    old_mode: node.mode,
                    new_mode,
                });
                node.mode = new_mode;
            }
        }
    }
    log::info!("Set {} nodes to {new_mode:?}", changes.len());
    Ok(changes)
}

/// Mutes the selected nodes, or unmutes them when all are muted.
pub fn toggle_mute(scene: &mut Scene, selection: &[NodeId]) -> OperationResult {
    toggle_mode(scene, selection, NodeMode::Never).into()
}

/// Bypasses the selected nodes, or restores them when all are bypassed.
pub fn toggle_bypass(scene: &mut Scene, selection: &[NodeId]) -> OperationResult {
    toggle_mode(scene, selection, NodeMode::Bypass).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with_nodes(modes: &[NodeMode]) -> (Scene, Vec<NodeId>) {
        let mut scene = Scene::new();
        let ids = modes
            .iter()
            .enumerate()
            .map(|(i, mode)| {
                let mut node = GraphNode::new(
                    format!("Node {i}"),
                    Rect::new(i as f32 * 100.0, 0.0, 80.0, 60.0),
                );
                node.mode = *mode;
                scene.add_node(node)
            })
            .collect();
        (scene, ids)
    }

    #[test]
    fn test_mute_mixed_selection_mutes_all() {
        let (mut scene, ids) =
            scene_with_nodes(&[NodeMode::Always, NodeMode::Never, NodeMode::Bypass]);

        let result = toggle_mute(&mut scene, &ids);

        assert!(result.success);
        assert!(ids.iter().all(|id| scene.nodes[id].mode == NodeMode::Never));
    }

    #[test]
    fn test_mute_when_all_muted_restores() {
        let (mut scene, ids) = scene_with_nodes(&[NodeMode::Never, NodeMode::Never]);

        let changes = toggle_mode(&mut scene, &ids, NodeMode::Never).unwrap();

        assert_eq!(changes.len(), 2);
        assert!(ids.iter().all(|id| scene.nodes[id].mode == NodeMode::Always));
    }

    #[test]
    fn test_bypass_toggle_round_trip() {
        let (mut scene, ids) = scene_with_nodes(&[NodeMode::Always, NodeMode::Bypass]);

        let first = toggle_mode(&mut scene, &ids, NodeMode::Bypass).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].node_id, ids[0]);
        assert!(ids.iter().all(|id| scene.nodes[id].mode == NodeMode::Bypass));

        assert!(toggle_bypass(&mut scene, &ids).success);
        assert!(ids.iter().all(|id| scene.nodes[id].mode == NodeMode::Always));
    }

    #[test]
    fn test_empty_selection_reports_message() {
        let (mut scene, _) = scene_with_nodes(&[NodeMode::Always]);

        let result = toggle_mute(&mut scene, &[]);

        assert!(!result.success);
        assert_eq!(
            result.message.as_deref(),
            Some("Please select nodes to toggle mute status")
        );
        assert_eq!(
            toggle_bypass(&mut scene, &[uuid::Uuid::new_v4()]).message.as_deref(),
            Some("Please select nodes to toggle bypass status")
        );
    }
}
