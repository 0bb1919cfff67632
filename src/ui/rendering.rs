//! Canvas rendering functionality for groups, nodes, and grid.
//!
//! Elements are drawn in layers: grid first, then groups (largest first so nested groups stay
//! visible), then nodes on top.

use super::state::AlignerApp;
use crate::color_presets::{self, ColorPreset};
use crate::constants::*;
use crate::types::*;
use eframe::egui;
use eframe::epaint::StrokeKind;

const SELECTION_COLOR: egui::Color32 = egui::Color32::from_rgb(100, 150, 255);
const NODE_FILL: egui::Color32 = egui::Color32::from_rgb(53, 53, 53);
const NODE_TITLE_COLOR: egui::Color32 = egui::Color32::from_gray(220);
const BYPASS_FILL: egui::Color32 = egui::Color32::from_rgb(110, 40, 120);

fn hex_color(hex: &str) -> Option<egui::Color32> {
    let [r, g, b, a] = color_presets::rgba(hex)?;
    Some(egui::Color32::from_rgba_unmultiplied(r, g, b, a))
}

/// Body colour a preset gives its nodes.
pub(super) fn preset_body_color(preset: &ColorPreset) -> Option<egui::Color32> {
    preset.bgcolor.as_deref().and_then(hex_color)
}

impl AlignerApp {
    /// Renders all scene elements on the canvas.
    pub fn render_scene(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        if self.canvas.show_grid {
            self.draw_grid(painter, canvas_rect);
        }

        let mut groups: Vec<&Group> = self.scene.groups.values().collect();
        groups.sort_by(|a, b| {
            (b.rect.width * b.rect.height).total_cmp(&(a.rect.width * a.rect.height))
        });
        for group in groups {
            self.draw_group(painter, group);
        }

        for node in self.scene.nodes.values() {
            self.draw_node(painter, node);
        }
    }

    fn screen_rect(&self, rect: &Rect) -> egui::Rect {
        let min = self.world_to_screen(egui::pos2(rect.x, rect.y));
        let max = self.world_to_screen(egui::pos2(rect.right(), rect.bottom()));
        egui::Rect::from_min_max(min, max)
    }

    /// Draws grid lines every [`GRID_SIZE`] world units, skipping them when zoomed far out.
    pub fn draw_grid(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let spacing = GRID_SIZE * self.canvas.zoom_factor;
        if spacing < 6.0 {
            return;
        }
        let stroke = egui::Stroke::new(
            1.0,
            egui::Color32::from_rgba_unmultiplied(128, 128, 128, 32),
        );

        let mut x = canvas_rect.left() + self.canvas.offset.x.rem_euclid(spacing);
        while x < canvas_rect.right() {
            painter.line_segment(
                [egui::pos2(x, canvas_rect.top()), egui::pos2(x, canvas_rect.bottom())],
                stroke,
            );
            x += spacing;
        }
        let mut y = canvas_rect.top() + self.canvas.offset.y.rem_euclid(spacing);
        while y < canvas_rect.bottom() {
            painter.line_segment(
                [egui::pos2(canvas_rect.left(), y), egui::pos2(canvas_rect.right(), y)],
                stroke,
            );
            y += spacing;
        }
    }

    /// Draws a group box with its title strip.
    pub fn draw_group(&self, painter: &egui::Painter, group: &Group) {
        let screen_rect = self.screen_rect(&group.rect);
        let is_selected = self.interaction.selected_groups.contains(&group.id);

        painter.rect_filled(
            screen_rect,
            GROUP_CORNER_RADIUS,
            egui::Color32::from_rgba_unmultiplied(128, 128, 128, 24),
        );

        let title_height = (GROUP_TITLE_HEIGHT * self.canvas.zoom_factor).min(screen_rect.height());
        let title_rect = egui::Rect::from_min_size(
            screen_rect.min,
            egui::vec2(screen_rect.width(), title_height),
        );
        painter.rect_filled(
            title_rect,
            GROUP_CORNER_RADIUS,
            egui::Color32::from_rgba_unmultiplied(128, 128, 128, 60),
        );

        let stroke_color = if is_selected {
            SELECTION_COLOR
        } else {
            egui::Color32::from_rgba_unmultiplied(128, 128, 128, 128)
        };
        painter.rect_stroke(
            screen_rect,
            GROUP_CORNER_RADIUS,
            egui::Stroke::new(GROUP_STROKE_WIDTH, stroke_color),
            StrokeKind::Inside,
        );

        let padding = GROUP_LABEL_PADDING_BASE * self.canvas.zoom_factor.max(0.5);
        let font_size = (14.0 * self.canvas.zoom_factor).clamp(8.0, 28.0);
        painter.text(
            egui::pos2(title_rect.min.x + padding, title_rect.center().y),
            egui::Align2::LEFT_CENTER,
            if group.title.is_empty() { "Group" } else { group.title.as_str() },
            egui::FontId::proportional(font_size),
            self.text_color(),
        );
    }

    /// Draws a node in its preset colours, tinted by its execution mode.
    pub fn draw_node(&self, painter: &egui::Painter, node: &GraphNode) {
        let screen_rect = self.screen_rect(&node.rect);
        let is_selected = self.interaction.selected_nodes.contains(&node.id);
        let preset = self.presets.preset_for(&node.node_type);

        let base_fill = preset.and_then(preset_body_color).unwrap_or(NODE_FILL);
        let fill = match node.mode {
            NodeMode::Always => base_fill,
            NodeMode::Never => base_fill.gamma_multiply(0.35),
            NodeMode::Bypass => BYPASS_FILL,
        };
        painter.rect_filled(screen_rect, NODE_CORNER_RADIUS, fill);

        let stroke = if is_selected {
            egui::Stroke::new(2.0, SELECTION_COLOR)
        } else {
            egui::Stroke::new(1.0, egui::Color32::from_gray(90))
        };
        painter.rect_stroke(screen_rect, NODE_CORNER_RADIUS, stroke, StrokeKind::Outside);

        let title_color = preset
            .and_then(|p| p.color.as_deref())
            .and_then(hex_color)
            .unwrap_or(NODE_TITLE_COLOR);
        let font_size = (12.0 * self.canvas.zoom_factor).clamp(6.0, 24.0);
        painter.text(
            screen_rect.center(),
            egui::Align2::CENTER_CENTER,
            &node.title,
            egui::FontId::proportional(font_size),
            title_color,
        );
    }

    fn text_color(&self) -> egui::Color32 {
        if self.dark_mode {
            egui::Color32::from_gray(220)
        } else {
            egui::Color32::from_gray(40)
        }
    }
}
