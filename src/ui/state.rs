//! Application state management structures.
//!
//! This module contains the state structures that track the editor's canvas navigation,
//! selection and dragging, alongside the scene being edited.

use super::undo::UndoHistory;
use crate::color_presets::PresetStore;
use crate::config::AlignerConfig;
use crate::demo::{build_demo, DemoKind};
use crate::types::*;
use eframe::egui;
use serde::{Deserialize, Serialize};

/// State related to canvas navigation and display.
///
/// Tracks the current pan offset, zoom level, and display options for the canvas.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasState {
    /// Current canvas pan offset for navigation (in screen space)
    #[serde(skip)]
    pub offset: egui::Vec2,
    /// Current zoom level (1.0 = normal, 2.0 = 2x zoom, 0.5 = 50% zoom)
    pub zoom_factor: f32,
    /// Whether the grid should be displayed on the canvas
    pub show_grid: bool,
    /// Whether the initial offset has been applied this session
    #[serde(skip)]
    pub centered: bool,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            offset: egui::Vec2::ZERO,
            zoom_factor: 1.0,
            show_grid: true,
            centered: false,
        }
    }
}

/// What the pointer is currently dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// A group, carrying its enclosed nodes along
    Group(GroupId),
    /// A single node
    Node(NodeId),
}

/// State related to selection and pointer interaction.
#[derive(Default)]
pub struct InteractionState {
    /// Selected groups, in selection order
    pub selected_groups: Vec<GroupId>,
    /// Selected nodes, in selection order
    pub selected_nodes: Vec<NodeId>,
    /// Item being dragged, if any
    pub dragging: Option<DragTarget>,
    /// World position of the pointer on the previous drag frame
    pub last_drag_world: Option<egui::Pos2>,
    /// Scene before the current drag started (for undo)
    pub drag_snapshot: Option<Scene>,
    /// Whether the user is currently panning the canvas
    pub is_panning: bool,
    /// Last mouse position during panning operation
    pub last_pan_pos: Option<egui::Pos2>,
}

impl InteractionState {
    /// Clears every selection.
    pub fn clear_selection(&mut self) {
        self.selected_groups.clear();
        self.selected_nodes.clear();
    }
}

/// The main application structure containing UI state and the scene.
///
/// This struct implements the `eframe::App` trait and handles all user interface
/// rendering and interaction logic.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct AlignerApp {
    /// The scene being edited
    pub scene: Scene,
    /// Minimum sizes used by every operation; supplied at startup
    #[serde(skip)]
    pub config: AlignerConfig,
    /// Canvas navigation and display state
    pub canvas: CanvasState,
    /// Selection and drag state
    #[serde(skip)]
    pub interaction: InteractionState,
    /// Undo/redo history
    #[serde(skip)]
    pub undo_history: UndoHistory,
    /// Message from the last operation, shown in the status bar
    #[serde(skip)]
    pub status: Option<String>,
    /// Colour presets applied to nodes by type; stored in their own file
    #[serde(skip)]
    pub presets: PresetStore,
    /// Colour picked in the preset editor
    #[serde(skip)]
    pub preset_color: egui::Color32,
    /// Whether dark mode visuals are enabled
    pub dark_mode: bool,
}

impl Default for AlignerApp {
    fn default() -> Self {
        Self {
            scene: build_demo(DemoKind::StaggeredColumn),
            config: AlignerConfig::default(),
            canvas: CanvasState::default(),
            interaction: InteractionState::default(),
            undo_history: UndoHistory::new(),
            status: None,
            presets: PresetStore::default(),
            preset_color: egui::Color32::from_rgb(51, 85, 119),
            dark_mode: true,
        }
    }
}

impl AlignerApp {
    /// Creates an app showing the default demo scene with the given configuration and presets.
    pub fn new(config: AlignerConfig, presets: PresetStore) -> Self {
        Self {
            config,
            presets,
            ..Default::default()
        }
    }

    /// Serializes the application state to JSON.
    ///
    /// # Returns
    ///
    /// A JSON string representation of the app state, or an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes application state from JSON.
    ///
    /// # Arguments
    ///
    /// * `json` - JSON string containing the serialized app state
    ///
    /// # Returns
    ///
    /// An `AlignerApp` instance, or an error if deserialization fails.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Replaces the scene with a demo, dropping selection and history.
    pub fn load_demo(&mut self, kind: DemoKind) {
        self.scene = build_demo(kind);
        self.interaction = InteractionState::default();
        self.undo_history.clear();
        self.status = None;
        self.canvas.centered = false;
    }
}
