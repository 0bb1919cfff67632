//! Group bounds engine.
//!
//! Pure functions that compute new group rectangles from snapshots of the groups (and the nodes
//! they enclose). Nothing here touches the scene; every operation returns [`GroupUpdate`]s for
//! the host to apply.
//!
//! Directional operations are written once against an [`Axis`] and an [`Edge`]:
//! - multi-group edge alignment, which toggles into width/height equalization once the groups
//!   are already aligned
//! - multi-group extent equalization, optionally widened to fit member nodes
//! - single-group fit to content, per edge, per axis, or on all four sides

use crate::config::AlignerConfig;
use crate::constants::{
    ALIGN_TOLERANCE, DEFAULT_PADDING, HORIZONTAL_OFFSET, TITLE_BAR_PADDING, VERTICAL_OFFSET,
};
use crate::types::*;
use log::debug;

/// Coordinate axis an operation works along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// x position and width
    Horizontal,
    /// y position and height
    Vertical,
}

impl Axis {
    /// Near (smaller) coordinate of `rect` on this axis.
    pub fn start(self, rect: &Rect) -> f32 {
        match self {
            Axis::Horizontal => rect.x,
            Axis::Vertical => rect.y,
        }
    }

    /// Extent of `rect` on this axis.
    pub fn extent(self, rect: &Rect) -> f32 {
        match self {
            Axis::Horizontal => rect.width,
            Axis::Vertical => rect.height,
        }
    }

    /// Far (larger) coordinate of `rect` on this axis.
    pub fn end(self, rect: &Rect) -> f32 {
        self.start(rect) + self.extent(rect)
    }

    /// Copy of `rect` with this axis replaced; the perpendicular axis is untouched.
    pub fn with_span(self, rect: &Rect, start: f32, extent: f32) -> Rect {
        match self {
            Axis::Horizontal => Rect::new(start, rect.y, extent, rect.height),
            Axis::Vertical => Rect::new(rect.x, start, rect.width, extent),
        }
    }

    /// Configured minimum extent on this axis.
    pub fn floor(self, config: &AlignerConfig) -> f32 {
        match self {
            Axis::Horizontal => config.min_node_size.width,
            Axis::Vertical => config.min_node_size.height,
        }
    }

    /// Padding between member nodes and the near edge. The title bar allowance only applies
    /// vertically.
    fn near_padding(self, with_title_bar: bool) -> f32 {
        match self {
            Axis::Horizontal => DEFAULT_PADDING + HORIZONTAL_OFFSET,
            Axis::Vertical if with_title_bar => {
                DEFAULT_PADDING + TITLE_BAR_PADDING + VERTICAL_OFFSET
            }
            Axis::Vertical => DEFAULT_PADDING + VERTICAL_OFFSET,
        }
    }
}

/// One of the four sides of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Near horizontal edge
    Left,
    /// Far horizontal edge
    Right,
    /// Near vertical edge
    Top,
    /// Far vertical edge
    Bottom,
}

impl Edge {
    /// Axis this edge lies on.
    pub fn axis(self) -> Axis {
        match self {
            Edge::Left | Edge::Right => Axis::Horizontal,
            Edge::Top | Edge::Bottom => Axis::Vertical,
        }
    }

    /// True for the left and top edges.
    pub fn is_near(self) -> bool {
        matches!(self, Edge::Left | Edge::Top)
    }

    /// Coordinate of this edge of `rect`.
    pub fn position(self, rect: &Rect) -> f32 {
        if self.is_near() {
            self.axis().start(rect)
        } else {
            self.axis().end(rect)
        }
    }

    /// Moves this edge of `rect` to `target`, holding the opposite edge, with the extent
    /// floored at `floor`.
    fn move_to(self, rect: &Rect, target: f32, floor: f32) -> Rect {
        let axis = self.axis();
        if self.is_near() {
            let extent = (axis.end(rect) - target).max(floor);
            axis.with_span(rect, target, extent)
        } else {
            let start = axis.start(rect);
            axis.with_span(rect, start, (target - start).max(floor))
        }
    }
}

/// Tight bounds around a set of nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBounds {
    /// Smallest node left edge
    pub min_x: f32,
    /// Smallest node top edge
    pub min_y: f32,
    /// Largest node right edge
    pub max_x: f32,
    /// Largest node bottom edge
    pub max_y: f32,
}

impl NodeBounds {
    /// Near bound on `axis`.
    pub fn min(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.min_x,
            Axis::Vertical => self.min_y,
        }
    }

    /// Far bound on `axis`.
    pub fn max(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.max_x,
            Axis::Vertical => self.max_y,
        }
    }

    /// Padded `(near, far)` coordinates a group edge should sit at to enclose these nodes.
    pub fn padded_span(&self, axis: Axis, with_title_bar: bool) -> (f32, f32) {
        (
            self.min(axis) - axis.near_padding(with_title_bar),
            self.max(axis) + DEFAULT_PADDING,
        )
    }
}

/// Computes the tight bounds of `nodes`, or `None` when there are no nodes.
pub fn node_bounds(nodes: &[NodeBox]) -> Option<NodeBounds> {
    let (first, rest) = nodes.split_first()?;
    let seed = NodeBounds {
        min_x: first.rect.x,
        min_y: first.rect.y,
        max_x: first.rect.right(),
        max_y: first.rect.bottom(),
    };
    Some(rest.iter().fold(seed, |acc, node| NodeBounds {
        min_x: acc.min_x.min(node.rect.x),
        min_y: acc.min_y.min(node.rect.y),
        max_x: acc.max_x.max(node.rect.right()),
        max_y: acc.max_y.max(node.rect.bottom()),
    }))
}

fn extreme(values: impl Iterator<Item = f32>, pick_max: bool) -> Option<f32> {
    values.reduce(|a, b| if pick_max { a.max(b) } else { a.min(b) })
}

fn resized(id: GroupId, rect: Rect, clamp_to_minimum: bool) -> GroupUpdate {
    GroupUpdate {
        id,
        rect,
        clamp_to_minimum,
        is_absolute: true,
    }
}

/// Aligns one edge of every group to the outermost (or, with `alternate`, innermost) edge.
///
/// When every edge is already within [`ALIGN_TOLERANCE`] of the target, the groups are instead
/// shrunk to the smallest extent among them, keeping the aligned edge in place.
///
/// # Arguments
///
/// * `groups` - Snapshots of the selected groups
/// * `edge` - Edge to align
/// * `alternate` - Picks the opposite extreme as the target
/// * `config` - Supplies the minimum extent
///
/// # Returns
///
/// Updates for the groups that move; untouched groups are omitted.
pub fn align_groups_to_edge(
    groups: &[GroupBox],
    edge: Edge,
    alternate: bool,
    config: &AlignerConfig,
) -> Vec<GroupUpdate> {
    let axis = edge.axis();
    let floor = axis.floor(config);
    // Near edges align to the minimum, far edges to the maximum; alternate flips both.
    let pick_max = edge.is_near() == alternate;
    let Some(target) = extreme(groups.iter().map(|g| edge.position(&g.rect)), pick_max) else {
        return Vec::new();
    };

    let aligned = groups
        .iter()
        .all(|g| (edge.position(&g.rect) - target).abs() < ALIGN_TOLERANCE);

    if aligned {
        let Some(smallest) = extreme(groups.iter().map(|g| axis.extent(&g.rect)), false) else {
            return Vec::new();
        };
        let min_extent = smallest.max(floor);
        debug!("{edge:?} edges already aligned; equalizing extent to {min_extent}");
        return groups
            .iter()
            .filter(|g| axis.extent(&g.rect) > min_extent)
            .map(|g| {
                // Right/bottom keep their far edge: holding the near one would undo the alignment.
                let start = if edge.is_near() {
                    axis.start(&g.rect)
                } else {
                    axis.end(&g.rect) - min_extent
                };
                resized(g.id, axis.with_span(&g.rect, start, min_extent), true)
            })
            .collect();
    }

    groups
        .iter()
        .filter(|g| {
            let position = edge.position(&g.rect);
            if pick_max {
                position < target
            } else {
                position > target
            }
        })
        .map(|g| resized(g.id, edge.move_to(&g.rect, target, floor), true))
        .collect()
}

/// Gives every group the same extent on `axis`: the largest one, or with `alternate` the
/// smallest, never below the configured minimum.
///
/// Groups are resized about their own centre. With `alternate`, a group whose member nodes are
/// known is instead anchored at its padded node bounds and never shrunk below them.
pub fn equalize_groups(
    groups: &[GroupBox],
    axis: Axis,
    alternate: bool,
    config: &AlignerConfig,
) -> Vec<GroupUpdate> {
    let Some(chosen) = extreme(groups.iter().map(|g| axis.extent(&g.rect)), !alternate) else {
        return Vec::new();
    };
    let target = chosen.max(axis.floor(config));

    let mut updates = Vec::new();
    for group in groups {
        let extent = axis.extent(&group.rect);
        if extent == target {
            continue;
        }

        let content = if alternate {
            group.members.as_deref().and_then(node_bounds)
        } else {
            None
        };

        let update = match content {
            Some(bounds) => {
                let (near, far) = bounds.padded_span(axis, true);
                let fitted = target.max(far - near);
                resized(group.id, axis.with_span(&group.rect, near, fitted), false)
            }
            None => {
                let centre = axis.start(&group.rect) + extent / 2.0;
                let rect = axis.with_span(&group.rect, centre - target / 2.0, target);
                resized(group.id, rect, true)
            }
        };
        updates.push(update);
    }
    updates
}

fn member_bounds(group: &GroupBox, operation: &str) -> Option<NodeBounds> {
    let bounds = group.members.as_deref().and_then(node_bounds);
    if bounds.is_none() {
        debug!("{operation}: no nodes in group {}, skipping", group.id);
    }
    bounds
}

/// Moves one edge of a group onto its padded member bounds, holding the opposite edge.
pub fn fit_group_edge(group: &GroupBox, edge: Edge, config: &AlignerConfig) -> Option<GroupUpdate> {
    let bounds = member_bounds(group, "fit edge")?;
    let axis = edge.axis();
    let (near, far) = bounds.padded_span(axis, true);
    let target = if edge.is_near() { near } else { far };
    Some(resized(
        group.id,
        edge.move_to(&group.rect, target, axis.floor(config)),
        false,
    ))
}

fn fit_span(
    rect: &Rect,
    bounds: &NodeBounds,
    axis: Axis,
    title_bar: bool,
    config: &AlignerConfig,
) -> Rect {
    let (near, far) = bounds.padded_span(axis, title_bar);
    axis.with_span(rect, near, (far - near).max(axis.floor(config)))
}

/// Moves both edges on `axis` onto the padded member bounds; the other axis is untouched.
pub fn fit_group_axis(group: &GroupBox, axis: Axis, config: &AlignerConfig) -> Option<GroupUpdate> {
    let bounds = member_bounds(group, "fit axis")?;
    let rect = fit_span(&group.rect, &bounds, axis, true, config);
    Some(resized(group.id, rect, false))
}

/// Replaces the group's rectangle with its padded member bounds on all four sides.
pub fn fit_group_full(group: &GroupBox, config: &AlignerConfig) -> Option<GroupUpdate> {
    let bounds = member_bounds(group, "fit full")?;
    let rect = fit_span(&group.rect, &bounds, Axis::Horizontal, false, config);
    let rect = fit_span(&rect, &bounds, Axis::Vertical, false, config);
    Some(resized(group.id, rect, false))
}

/// Every operation the bounds engine offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOperation {
    /// Align an edge across several groups
    AlignEdge(Edge),
    /// Equalize width or height across several groups
    EqualizeExtent(Axis),
    /// Fit one edge of a single group to its nodes
    FitEdge(Edge),
    /// Fit both edges on one axis of a single group to its nodes
    FitAxis(Axis),
    /// Fit a single group to its nodes on all sides
    FitFull,
}

impl GroupOperation {
    /// All operations in toolbar order.
    pub const ALL: [GroupOperation; 13] = [
        GroupOperation::AlignEdge(Edge::Left),
        GroupOperation::AlignEdge(Edge::Right),
        GroupOperation::AlignEdge(Edge::Top),
        GroupOperation::AlignEdge(Edge::Bottom),
        GroupOperation::EqualizeExtent(Axis::Horizontal),
        GroupOperation::EqualizeExtent(Axis::Vertical),
        GroupOperation::FitEdge(Edge::Left),
        GroupOperation::FitEdge(Edge::Right),
        GroupOperation::FitEdge(Edge::Top),
        GroupOperation::FitEdge(Edge::Bottom),
        GroupOperation::FitAxis(Axis::Horizontal),
        GroupOperation::FitAxis(Axis::Vertical),
        GroupOperation::FitFull,
    ];

    /// True for operations that work across several groups.
    pub fn is_multi_group(self) -> bool {
        matches!(
            self,
            GroupOperation::AlignEdge(_) | GroupOperation::EqualizeExtent(_)
        )
    }

    /// Human-readable label for buttons and logs.
    pub fn label(self) -> &'static str {
        match self {
            GroupOperation::AlignEdge(Edge::Left) => "Align left",
            GroupOperation::AlignEdge(Edge::Right) => "Align right",
            GroupOperation::AlignEdge(Edge::Top) => "Align top",
            GroupOperation::AlignEdge(Edge::Bottom) => "Align bottom",
            GroupOperation::EqualizeExtent(Axis::Horizontal) => "Equal width",
            GroupOperation::EqualizeExtent(Axis::Vertical) => "Equal height",
            GroupOperation::FitEdge(Edge::Left) => "Fit left",
            GroupOperation::FitEdge(Edge::Right) => "Fit right",
            GroupOperation::FitEdge(Edge::Top) => "Fit top",
            GroupOperation::FitEdge(Edge::Bottom) => "Fit bottom",
            GroupOperation::FitAxis(Axis::Horizontal) => "Fit width",
            GroupOperation::FitAxis(Axis::Vertical) => "Fit height",
            GroupOperation::FitFull => "Fit to nodes",
        }
    }

    /// Runs the operation over `groups`. Single-group operations use the first group.
    pub fn compute(
        self,
        groups: &[GroupBox],
        alternate: bool,
        config: &AlignerConfig,
    ) -> Vec<GroupUpdate> {
        match self {
            GroupOperation::AlignEdge(edge) => align_groups_to_edge(groups, edge, alternate, config),
            GroupOperation::EqualizeExtent(axis) => equalize_groups(groups, axis, alternate, config),
            GroupOperation::FitEdge(edge) => groups
                .first()
                .and_then(|g| fit_group_edge(g, edge, config))
                .into_iter()
                .collect(),
            GroupOperation::FitAxis(axis) => groups
                .first()
                .and_then(|g| fit_group_axis(g, axis, config))
                .into_iter()
                .collect(),
            GroupOperation::FitFull => groups
                .first()
                .and_then(|g| fit_group_full(g, config))
                .into_iter()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn group(x: f32, y: f32, width: f32, height: f32) -> GroupBox {
        GroupBox::new(Uuid::new_v4(), Rect::new(x, y, width, height))
    }

    fn node(x: f32, y: f32, width: f32, height: f32) -> NodeBox {
        NodeBox {
            id: Uuid::new_v4(),
            rect: Rect::new(x, y, width, height),
        }
    }

    /// Applies updates to snapshots the way the host would (absolute placement, clamped).
    fn apply(groups: &mut [GroupBox], updates: &[GroupUpdate], config: &AlignerConfig) {
        for update in updates {
            let target = groups.iter_mut().find(|g| g.id == update.id).unwrap();
            let mut rect = update.rect;
            if update.clamp_to_minimum {
                rect.width = rect.width.max(config.min_node_size.width);
                rect.height = rect.height.max(config.min_node_size.height);
            }
            target.rect = rect;
        }
    }

    fn rect_of(updates: &[GroupUpdate], id: GroupId) -> Option<Rect> {
        updates.iter().find(|u| u.id == id).map(|u| u.rect)
    }

    #[test]
    fn test_node_bounds_empty_is_none() {
        assert!(node_bounds(&[]).is_none());
    }

    #[test]
    fn test_node_bounds_tight() {
        let nodes = [node(10.0, 40.0, 30.0, 20.0), node(-5.0, 50.0, 10.0, 100.0)];
        let bounds = node_bounds(&nodes).unwrap();
        assert_eq!(
            bounds,
            NodeBounds {
                min_x: -5.0,
                min_y: 40.0,
                max_x: 40.0,
                max_y: 150.0,
            }
        );
    }

    #[test]
    fn test_align_left_direction_toggle() {
        let config = AlignerConfig::default();
        let a = group(0.0, 0.0, 50.0, 50.0);
        let b = group(100.0, 0.0, 50.0, 50.0);
        let groups = vec![a.clone(), b.clone()];

        let updates = align_groups_to_edge(&groups, Edge::Left, false, &config);
        assert_eq!(updates.len(), 1);
        assert_eq!(rect_of(&updates, b.id), Some(Rect::new(0.0, 0.0, 150.0, 50.0)));

        let updates = align_groups_to_edge(&groups, Edge::Left, true, &config);
        assert_eq!(updates.len(), 1);
        // Right edge at 50 sits left of the target, so the minimum width wins.
        assert_eq!(rect_of(&updates, a.id), Some(Rect::new(100.0, 0.0, 50.0, 50.0)));
    }

    #[test]
    fn test_align_right_and_bottom_hold_near_edge() {
        let config = AlignerConfig::default();
        let a = group(0.0, 0.0, 100.0, 100.0);
        let b = group(20.0, 10.0, 200.0, 300.0);
        let groups = vec![a.clone(), b.clone()];

        let right = align_groups_to_edge(&groups, Edge::Right, false, &config);
        assert_eq!(rect_of(&right, a.id), Some(Rect::new(0.0, 0.0, 220.0, 100.0)));
        assert!(rect_of(&right, b.id).is_none());

        let bottom = align_groups_to_edge(&groups, Edge::Bottom, true, &config);
        assert_eq!(rect_of(&bottom, b.id), Some(Rect::new(20.0, 10.0, 200.0, 90.0)));
        assert!(rect_of(&bottom, a.id).is_none());
    }

    #[test]
    fn test_align_top_uses_vertical_floor() {
        let config = AlignerConfig {
            min_node_size: Size {
                width: 50.0,
                height: 80.0,
            },
            color_presets: None,
        };
        let a = group(0.0, 0.0, 100.0, 60.0);
        let b = group(200.0, 100.0, 100.0, 60.0);

        let updates = align_groups_to_edge(&[a.clone(), b], Edge::Top, true, &config);

        assert_eq!(rect_of(&updates, a.id), Some(Rect::new(0.0, 100.0, 100.0, 80.0)));
    }

    #[test]
    fn test_aligned_groups_equalize_once_then_noop() {
        let config = AlignerConfig::default();
        let mut groups = vec![group(0.0, 0.0, 100.0, 60.0), group(30.0, 80.0, 100.0, 60.0)];

        let first = align_groups_to_edge(&groups, Edge::Left, false, &config);
        assert_eq!(first.len(), 1);
        apply(&mut groups, &first, &config);
        assert_eq!(groups[1].rect, Rect::new(0.0, 80.0, 130.0, 60.0));

        let second = align_groups_to_edge(&groups, Edge::Left, false, &config);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].rect, Rect::new(0.0, 80.0, 100.0, 60.0));
        apply(&mut groups, &second, &config);

        let third = align_groups_to_edge(&groups, Edge::Left, false, &config);
        assert!(third.is_empty());
    }

    #[test]
    fn test_equalize_on_far_edge_keeps_edge_aligned() {
        let config = AlignerConfig::default();
        let a = group(0.0, 0.0, 100.0, 50.0);
        let b = group(40.0, 60.0, 60.5, 50.0);

        let updates = align_groups_to_edge(&[a.clone(), b], Edge::Right, false, &config);

        assert_eq!(updates.len(), 1);
        assert_eq!(rect_of(&updates, a.id), Some(Rect::new(39.5, 0.0, 60.5, 50.0)));
    }

    #[test]
    fn test_equalize_when_aligned_never_goes_below_floor() {
        let config = AlignerConfig::default();
        let a = group(0.0, 0.0, 20.0, 50.0);
        let b = group(0.5, 60.0, 90.0, 50.0);

        let updates = align_groups_to_edge(&[a, b.clone()], Edge::Left, false, &config);

        assert_eq!(rect_of(&updates, b.id), Some(Rect::new(0.5, 60.0, 50.0, 50.0)));
    }

    #[test]
    fn test_empty_selection_is_noop() {
        let config = AlignerConfig::default();
        assert!(align_groups_to_edge(&[], Edge::Left, false, &config).is_empty());
        assert!(equalize_groups(&[], Axis::Horizontal, true, &config).is_empty());
        for operation in GroupOperation::ALL {
            assert!(operation.compute(&[], false, &config).is_empty());
        }
    }

    #[test]
    fn test_equalize_width_centered_then_noop() {
        let config = AlignerConfig::default();
        let mut groups = vec![
            group(0.0, 0.0, 50.0, 40.0),
            group(100.0, 0.0, 80.0, 40.0),
            group(300.0, 0.0, 120.0, 40.0),
        ];

        let updates = equalize_groups(&groups, Axis::Horizontal, false, &config);

        assert_eq!(updates.len(), 2);
        assert_eq!(rect_of(&updates, groups[0].id), Some(Rect::new(-35.0, 0.0, 120.0, 40.0)));
        assert_eq!(rect_of(&updates, groups[1].id), Some(Rect::new(80.0, 0.0, 120.0, 40.0)));
        assert!(updates.iter().all(|u| u.clamp_to_minimum && u.is_absolute));

        apply(&mut groups, &updates, &config);
        assert!(equalize_groups(&groups, Axis::Horizontal, false, &config).is_empty());
    }

    #[test]
    fn test_equalize_alternate_uses_smallest_with_floor() {
        let config = AlignerConfig::default();
        let groups = vec![group(0.0, 0.0, 100.0, 30.0), group(0.0, 100.0, 100.0, 90.0)];

        let updates = equalize_groups(&groups, Axis::Vertical, true, &config);

        // No members resolved: centred default path with a 50 floor on the target.
        assert_eq!(updates.len(), 2);
        assert_eq!(rect_of(&updates, groups[0].id), Some(Rect::new(0.0, -10.0, 100.0, 50.0)));
        assert_eq!(rect_of(&updates, groups[1].id), Some(Rect::new(0.0, 120.0, 100.0, 50.0)));
    }

    #[test]
    fn test_equalize_alternate_never_shrinks_below_content() {
        let config = AlignerConfig::default();
        let wide = group(0.0, 0.0, 300.0, 100.0).with_members(vec![node(20.0, 10.0, 200.0, 50.0)]);
        let narrow = group(0.0, 200.0, 100.0, 100.0).with_members(vec![]);

        let updates = equalize_groups(&[wide.clone(), narrow], Axis::Horizontal, true, &config);

        let update = updates.iter().find(|u| u.id == wide.id).unwrap();
        // Padded content spans 9..230.
        assert_eq!(update.rect, Rect::new(9.0, 0.0, 221.0, 100.0));
        assert!(!update.clamp_to_minimum);
    }

    #[test]
    fn test_equalize_alternate_vertical_reserves_title_bar() {
        let config = AlignerConfig::default();
        let tall = group(0.0, 0.0, 100.0, 400.0).with_members(vec![node(10.0, 100.0, 50.0, 50.0)]);
        let short = group(200.0, 0.0, 100.0, 100.0);

        let updates = equalize_groups(&[tall.clone(), short], Axis::Vertical, true, &config);

        // Content needs 100-75 .. 150+10, i.e. 25..160; larger than the 100 target.
        assert_eq!(rect_of(&updates, tall.id), Some(Rect::new(0.0, 25.0, 100.0, 135.0)));
    }

    #[test]
    fn test_equalize_unresolved_members_fall_back_to_centre() {
        let config = AlignerConfig::default();
        let resolved = group(0.0, 0.0, 200.0, 100.0).with_members(vec![node(50.0, 20.0, 60.0, 40.0)]);
        let unresolved = group(0.0, 200.0, 150.0, 100.0);
        let smallest = group(0.0, 400.0, 100.0, 100.0);

        let updates = equalize_groups(
            &[resolved.clone(), unresolved.clone(), smallest],
            Axis::Horizontal,
            true,
            &config,
        );

        assert_eq!(updates.len(), 2);
        assert_eq!(rect_of(&updates, resolved.id), Some(Rect::new(39.0, 0.0, 100.0, 100.0)));
        assert_eq!(rect_of(&updates, unresolved.id), Some(Rect::new(25.0, 200.0, 100.0, 100.0)));
    }

    #[test]
    fn test_fit_full_padding() {
        let config = AlignerConfig::default();
        let target = group(-500.0, -500.0, 20.0, 20.0)
            .with_members(vec![node(0.0, 0.0, 40.0, 40.0), node(60.0, 60.0, 40.0, 40.0)]);

        let update = fit_group_full(&target, &config).unwrap();

        assert_eq!(update.rect, Rect::new(-11.0, -11.0, 121.0, 121.0));
        assert!(update.is_absolute);
        assert!(!update.clamp_to_minimum);
    }

    #[test]
    fn test_fit_without_members_is_noop() {
        let config = AlignerConfig::default();
        let empty = group(0.0, 0.0, 100.0, 100.0).with_members(vec![]);
        let unresolved = group(0.0, 0.0, 100.0, 100.0);

        assert!(fit_group_full(&empty, &config).is_none());
        assert!(fit_group_edge(&unresolved, Edge::Top, &config).is_none());
        assert!(fit_group_axis(&empty, Axis::Vertical, &config).is_none());
    }

    #[test]
    fn test_fit_single_edges() {
        let config = AlignerConfig::default();
        let g = group(0.0, 0.0, 400.0, 400.0).with_members(vec![node(100.0, 150.0, 100.0, 100.0)]);

        let left = fit_group_edge(&g, Edge::Left, &config).unwrap();
        assert_eq!(left.rect, Rect::new(89.0, 0.0, 311.0, 400.0));

        let right = fit_group_edge(&g, Edge::Right, &config).unwrap();
        assert_eq!(right.rect, Rect::new(0.0, 0.0, 210.0, 400.0));

        let top = fit_group_edge(&g, Edge::Top, &config).unwrap();
        assert_eq!(top.rect, Rect::new(0.0, 75.0, 400.0, 325.0));

        let bottom = fit_group_edge(&g, Edge::Bottom, &config).unwrap();
        assert_eq!(bottom.rect, Rect::new(0.0, 0.0, 400.0, 260.0));
    }

    #[test]
    fn test_fit_axes() {
        let config = AlignerConfig::default();
        let g = group(0.0, 0.0, 400.0, 400.0).with_members(vec![node(100.0, 150.0, 100.0, 100.0)]);

        let horizontal = fit_group_axis(&g, Axis::Horizontal, &config).unwrap();
        assert_eq!(horizontal.rect, Rect::new(89.0, 0.0, 121.0, 400.0));

        let vertical = fit_group_axis(&g, Axis::Vertical, &config).unwrap();
        assert_eq!(vertical.rect, Rect::new(0.0, 75.0, 400.0, 185.0));
    }

    #[test]
    fn test_fit_respects_minimum_size() {
        let config = AlignerConfig {
            min_node_size: Size {
                width: 200.0,
                height: 200.0,
            },
            color_presets: None,
        };
        let g = group(0.0, 0.0, 400.0, 400.0).with_members(vec![node(100.0, 150.0, 10.0, 10.0)]);

        for operation in GroupOperation::ALL.into_iter().filter(|op| !op.is_multi_group()) {
            for update in operation.compute(std::slice::from_ref(&g), false, &config) {
                assert!(update.rect.width >= 200.0, "{} width", operation.label());
                assert!(update.rect.height >= 200.0, "{} height", operation.label());
            }
        }
    }

    #[test]
    fn test_multi_group_results_respect_minimum_size() {
        let config = AlignerConfig::default();
        let groups = vec![
            group(0.0, 0.0, 55.0, 60.0).with_members(vec![]),
            group(70.0, 35.0, 60.0, 80.0).with_members(vec![node(75.0, 40.0, 5.0, 5.0)]),
            group(200.0, 5.0, 235.0, 300.0),
        ];

        for operation in GroupOperation::ALL.into_iter().filter(|op| op.is_multi_group()) {
            for alternate in [false, true] {
                for update in operation.compute(&groups, alternate, &config) {
                    assert!(update.rect.width >= 50.0, "{} width", operation.label());
                    assert!(update.rect.height >= 50.0, "{} height", operation.label());
                }
            }
        }
    }

    #[test]
    fn test_operation_catalogue() {
        let multi = GroupOperation::ALL.iter().filter(|op| op.is_multi_group()).count();
        assert_eq!(multi, 6);
        assert_eq!(GroupOperation::FitFull.label(), "Fit to nodes");
    }
}
