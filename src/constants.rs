//! Shared application-wide constants.
//! Centralizes the padding rules of the bounds engine and tweakable values used by the editor.

// Bounds engine
/// Padding (in world units) left between member nodes and a fitted group edge.
pub const DEFAULT_PADDING: f32 = 10.0;
/// Extra room reserved above member nodes for the group's title bar.
pub const TITLE_BAR_PADDING: f32 = 64.0;
/// Border correction applied to the left edge when fitting to nodes.
pub const HORIZONTAL_OFFSET: f32 = 1.0;
/// Border correction applied to the top edge when fitting to nodes.
pub const VERTICAL_OFFSET: f32 = 1.0;
/// Edges closer than this to the alignment target count as already aligned.
pub const ALIGN_TOLERANCE: f32 = 1.0;

// Configuration defaults
/// Minimum group width used when no configuration overrides it.
pub const DEFAULT_MIN_WIDTH: f32 = 50.0;
/// Minimum group height used when no configuration overrides it.
pub const DEFAULT_MIN_HEIGHT: f32 = 50.0;

// Group rendering
/// Height of the title strip drawn at the top of a group (world units).
pub const GROUP_TITLE_HEIGHT: f32 = 34.0;
/// Corner radius for group rectangles (in screen pixels after transform).
pub const GROUP_CORNER_RADIUS: f32 = 4.0;
/// Stroke width for group rectangle outlines (in screen pixels).
pub const GROUP_STROKE_WIDTH: f32 = 1.5;
/// Base padding for positioning the group label inside the title strip. Scaled by zoom.
pub const GROUP_LABEL_PADDING_BASE: f32 = 6.0;

// Node rendering
/// Corner radius for node rectangles (in screen pixels).
pub const NODE_CORNER_RADIUS: f32 = 6.0;

// Grid/drawing
/// Grid cell size in world units.
pub const GRID_SIZE: f32 = 20.0;

// Zoom
/// Smallest allowed canvas zoom factor.
pub const MIN_ZOOM: f32 = 0.25;
/// Largest allowed canvas zoom factor.
pub const MAX_ZOOM: f32 = 5.0;

// Undo/redo
/// Maximum number of undo history entries to retain.
pub const MAX_UNDO_HISTORY: usize = 100;
