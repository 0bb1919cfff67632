//! Built-in demo scenes that can be quickly loaded from the UI.
//!
//! Each scene leaves groups deliberately misaligned or loosely sized so every toolbar
//! operation has something to do.

use crate::types::*;

/// Kinds of built-in demo scenes available from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoKind {
    /// Three groups in a ragged column
    StaggeredColumn,
    /// Two side-by-side groups of very different sizes
    UnevenPair,
}

/// Metadata for a single demo scene.
pub struct DemoInfo {
    /// Stable identifier for the demo
    pub kind: DemoKind,
    /// Human-friendly display name
    pub name: &'static str,
}

/// Returns all demos with their display names.
pub const fn all_demos() -> &'static [DemoInfo] {
    const DEMOS: &[DemoInfo] = &[
        DemoInfo {
            kind: DemoKind::StaggeredColumn,
            name: "Staggered column",
        },
        DemoInfo {
            kind: DemoKind::UnevenPair,
            name: "Uneven pair",
        },
    ];
    DEMOS
}

/// Builds a scene for the given demo kind.
pub fn build_demo(kind: DemoKind) -> Scene {
    match kind {
        DemoKind::StaggeredColumn => build_staggered_column(),
        DemoKind::UnevenPair => build_uneven_pair(),
    }
}

fn add_group_with_nodes(
    scene: &mut Scene,
    title: &str,
    rect: Rect,
    nodes: &[(&str, &str, Rect)],
) {
    scene.add_group(Group::new(title, rect));
    for (name, node_type, node_rect) in nodes {
        scene.add_node(GraphNode::new(*name, *node_rect).with_type(*node_type));
    }
}

fn build_staggered_column() -> Scene {
    let mut scene = Scene::new();
    add_group_with_nodes(
        &mut scene,
        "Loaders",
        Rect::new(0.0, 0.0, 420.0, 220.0),
        &[
            (
                "Load Checkpoint",
                "CheckpointLoaderSimple",
                Rect::new(30.0, 90.0, 160.0, 100.0),
            ),
            ("Load LoRA", "LoraLoader", Rect::new(220.0, 90.0, 150.0, 80.0)),
        ],
    );
    add_group_with_nodes(
        &mut scene,
        "Conditioning",
        Rect::new(60.0, 260.0, 360.0, 200.0),
        &[(
            "Text Encode",
            "CLIPTextEncode",
            Rect::new(100.0, 340.0, 200.0, 90.0),
        )],
    );
    add_group_with_nodes(
        &mut scene,
        "Sampling",
        Rect::new(-40.0, 500.0, 520.0, 260.0),
        &[
            ("KSampler", "KSampler", Rect::new(0.0, 590.0, 180.0, 140.0)),
            ("VAE Decode", "VAEDecode", Rect::new(220.0, 600.0, 140.0, 60.0)),
        ],
    );
    scene
}

fn build_uneven_pair() -> Scene {
    let mut scene = Scene::new();
    add_group_with_nodes(
        &mut scene,
        "Inputs",
        Rect::new(0.0, 40.0, 260.0, 180.0),
        &[("Load Image", "LoadImage", Rect::new(40.0, 120.0, 160.0, 80.0))],
    );
    add_group_with_nodes(
        &mut scene,
        "Outputs",
        Rect::new(320.0, 0.0, 480.0, 420.0),
        &[
            ("Upscale", "ImageScale", Rect::new(360.0, 100.0, 150.0, 80.0)),
            ("Save Image", "SaveImage", Rect::new(560.0, 220.0, 180.0, 140.0)),
        ],
    );
    scene.add_node(
        GraphNode::new("Preview", Rect::new(900.0, 60.0, 160.0, 120.0)).with_type("PreviewImage"),
    );
    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_demo_builds_with_enclosed_nodes() {
        for info in all_demos() {
            let scene = build_demo(info.kind);
            assert!(!scene.groups.is_empty(), "{}", info.name);
            for group in scene.groups.values() {
                let members = scene.group_box(group.id).unwrap().members.unwrap();
                assert!(!members.is_empty(), "{} / {}", info.name, group.title);
            }
        }
    }
}
