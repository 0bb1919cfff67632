//! Host-facing entry points.
//!
//! Validates the selection, snapshots the selected groups from the scene, runs one bounds engine
//! operation and applies the result. Failures never escape: every entry point reports through an
//! [`OperationResult`].

use crate::config::AlignerConfig;
use crate::geometry::GroupOperation;
use crate::types::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons an operation could not run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// Nothing was selected
    #[error("Please select groups to align")]
    NoGroupsSelected,
    /// A multi-group operation got too few groups
    #[error("Please select at least {required} groups (found {found})")]
    NotEnoughGroups {
        /// Groups the operation needs
        required: usize,
        /// Groups actually selected
        found: usize,
    },
    /// A single-group operation got more than one group
    #[error("Please select exactly one group (found {found})")]
    SingleGroupRequired {
        /// Groups actually selected
        found: usize,
    },
    /// A selected handle is no longer in the scene
    #[error("Group {0} no longer exists")]
    UnknownGroup(GroupId),
    /// Mode toggles need at least one node
    #[error("Please select nodes to toggle {0} status")]
    NoNodesSelected(&'static str),
}

/// Outcome reported back to the caller of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OperationResult {
    /// Whether the operation ran
    pub success: bool,
    /// Explanation when it did not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OperationResult {
    /// A successful outcome.
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// A failed outcome carrying `message`.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

impl<T> From<Result<T, OperationError>> for OperationResult {
    fn from(result: Result<T, OperationError>) -> Self {
        match result {
            Ok(_) => Self::ok(),
            Err(err) => Self::failed(err.to_string()),
        }
    }
}

/// Minimum number of groups a multi-group operation needs.
pub const MIN_MULTI_GROUP_SELECTION: usize = 2;

/// Snapshots the selected groups with their enclosed nodes and checks there are enough of them.
///
/// Handles no longer in the scene are skipped so the rest of the batch still runs; the size
/// checks apply to the groups that remain.
pub fn snapshot_selection(
    scene: &Scene,
    selection: &[GroupId],
    operation: GroupOperation,
) -> Result<Vec<GroupBox>, OperationError> {
    if selection.is_empty() {
        return Err(OperationError::NoGroupsSelected);
    }

    let groups: Vec<GroupBox> = selection
        .iter()
        .filter_map(|id| {
            let snapshot = scene.group_box(*id);
            if snapshot.is_none() {
                log::warn!("Skipping group {id}: no longer in the scene");
            }
            snapshot
        })
        .collect();

    if groups.is_empty() {
        return Err(OperationError::UnknownGroup(selection[0]));
    }
    if operation.is_multi_group() {
        if groups.len() < MIN_MULTI_GROUP_SELECTION {
            return Err(OperationError::NotEnoughGroups {
                required: MIN_MULTI_GROUP_SELECTION,
                found: groups.len(),
            });
        }
    } else if groups.len() != 1 {
        return Err(OperationError::SingleGroupRequired {
            found: groups.len(),
        });
    }
    Ok(groups)
}

/// Runs `operation` over the selected groups and applies the result to the scene.
///
/// # Returns
///
/// The bounds that changed; empty when the operation was a no-op.
pub fn apply_group_operation(
    scene: &mut Scene,
    selection: &[GroupId],
    operation: GroupOperation,
    alternate: bool,
    config: &AlignerConfig,
) -> Result<Vec<BoundsChange>, OperationError> {
    let groups = snapshot_selection(scene, selection, operation)?;
    let updates = operation.compute(&groups, alternate, config);
    let changes = scene.apply_updates(&updates, config);
    log::info!(
        "{} (alternate: {alternate}): {} of {} groups changed",
        operation.label(),
        changes.len(),
        groups.len()
    );
    Ok(changes)
}

/// Boundary wrapper around [`apply_group_operation`] that reports instead of failing.
pub fn run_group_operation(
    scene: &mut Scene,
    selection: &[GroupId],
    operation: GroupOperation,
    alternate: bool,
    config: &AlignerConfig,
) -> OperationResult {
    let result = apply_group_operation(scene, selection, operation, alternate, config);
    if let Err(err) = &result {
        log::debug!("{} skipped: {err}", operation.label());
    }
    result.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Axis, Edge};
    use uuid::Uuid;

    fn two_groups() -> (Scene, GroupId, GroupId) {
        let mut scene = Scene::new();
        let a = scene.add_group(Group::new("A", Rect::new(0.0, 0.0, 100.0, 100.0)));
        let b = scene.add_group(Group::new("B", Rect::new(40.0, 200.0, 100.0, 100.0)));
        (scene, a, b)
    }

    #[test]
    fn test_align_applies_to_scene() {
        let (mut scene, a, b) = two_groups();
        let config = AlignerConfig::default();

        let result = run_group_operation(
            &mut scene,
            &[a, b],
            GroupOperation::AlignEdge(Edge::Left),
            false,
            &config,
        );

        assert!(result.success);
        assert_eq!(scene.groups[&b].rect, Rect::new(0.0, 200.0, 140.0, 100.0));
        assert_eq!(scene.groups[&a].rect, Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_empty_selection_reports_failure() {
        let (mut scene, _, _) = two_groups();
        let result = run_group_operation(
            &mut scene,
            &[],
            GroupOperation::FitFull,
            false,
            &AlignerConfig::default(),
        );

        assert!(!result.success);
        assert_eq!(result.message.as_deref(), Some("Please select groups to align"));
    }

    #[test]
    fn test_multi_group_operation_needs_two_groups() {
        let (mut scene, a, _) = two_groups();
        let before = scene.groups[&a].rect;

        let result = run_group_operation(
            &mut scene,
            &[a],
            GroupOperation::EqualizeExtent(Axis::Horizontal),
            false,
            &AlignerConfig::default(),
        );

        assert!(!result.success);
        assert_eq!(
            result.message.as_deref(),
            Some("Please select at least 2 groups (found 1)")
        );
        assert_eq!(scene.groups[&a].rect, before);
    }

    #[test]
    fn test_single_group_operation_rejects_multiple() {
        let (scene, a, b) = two_groups();
        let err = snapshot_selection(&scene, &[a, b], GroupOperation::FitEdge(Edge::Top))
            .unwrap_err();
        assert_eq!(err, OperationError::SingleGroupRequired { found: 2 });
    }

    #[test]
    fn test_unknown_group_is_reported() {
        let (mut scene, _, _) = two_groups();
        let ghost = Uuid::new_v4();

        let err = apply_group_operation(
            &mut scene,
            &[ghost],
            GroupOperation::FitFull,
            false,
            &AlignerConfig::default(),
        )
        .unwrap_err();

        assert_eq!(err, OperationError::UnknownGroup(ghost));
    }

    #[test]
    fn test_stale_group_does_not_block_batch() {
        let (mut scene, a, b) = two_groups();
        let ghost = Uuid::new_v4();

        let result = run_group_operation(
            &mut scene,
            &[a, b, ghost],
            GroupOperation::AlignEdge(Edge::Left),
            false,
            &AlignerConfig::default(),
        );

        assert!(result.success);
        assert_eq!(scene.groups[&b].rect, Rect::new(0.0, 200.0, 140.0, 100.0));
        assert_eq!(scene.groups[&a].rect, Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_stale_groups_count_against_selection_size() {
        let (scene, a, _) = two_groups();
        let ghost = Uuid::new_v4();

        let err = snapshot_selection(&scene, &[a, ghost], GroupOperation::AlignEdge(Edge::Top))
            .unwrap_err();
        assert_eq!(
            err,
            OperationError::NotEnoughGroups {
                required: 2,
                found: 1
            }
        );

        let single = snapshot_selection(&scene, &[ghost, a], GroupOperation::FitFull).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].id, a);
    }

    #[test]
    fn test_fit_without_nodes_succeeds_as_noop() {
        let (mut scene, a, _) = two_groups();

        let changes = apply_group_operation(
            &mut scene,
            &[a],
            GroupOperation::FitFull,
            false,
            &AlignerConfig::default(),
        )
        .unwrap();

        assert!(changes.is_empty());
    }

    #[test]
    fn test_fit_uses_enclosed_nodes() {
        let (mut scene, a, _) = two_groups();
        scene.add_node(GraphNode::new("n", Rect::new(20.0, 20.0, 30.0, 30.0)));

        let changes = apply_group_operation(
            &mut scene,
            &[a],
            GroupOperation::FitFull,
            false,
            &AlignerConfig::default(),
        )
        .unwrap();

        assert_eq!(changes.len(), 1);
        assert_eq!(scene.groups[&a].rect, Rect::new(9.0, 9.0, 51.0, 51.0));
    }

    #[test]
    fn test_result_serializes_like_host_result() {
        let ok = serde_json::to_value(OperationResult::ok()).unwrap();
        assert_eq!(ok, serde_json::json!({"success": true}));

        let failed = serde_json::to_value(OperationResult::failed("nope")).unwrap();
        assert_eq!(failed, serde_json::json!({"success": false, "message": "nope"}));
    }
}
