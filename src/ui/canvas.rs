//! Canvas interaction and navigation functionality.
//!
//! This module handles canvas panning, zooming, click selection, dragging of nodes and groups,
//! and coordinate transformations between screen and world space.

use super::state::{AlignerApp, DragTarget};
use super::undo::UndoAction;
use crate::constants::{GROUP_TITLE_HEIGHT, MAX_ZOOM, MIN_ZOOM};
use eframe::egui;

impl AlignerApp {
    /// Converts screen coordinates to world coordinates accounting for zoom and pan.
    pub fn screen_to_world(&self, screen_pos: egui::Pos2) -> egui::Pos2 {
        (screen_pos - self.canvas.offset) / self.canvas.zoom_factor
    }

    /// Converts world coordinates to screen coordinates accounting for zoom and pan.
    pub fn world_to_screen(&self, world_pos: egui::Pos2) -> egui::Pos2 {
        world_pos * self.canvas.zoom_factor + self.canvas.offset
    }

    /// Handles middle-click or Cmd/Ctrl+left-click canvas panning functionality.
    pub fn handle_canvas_panning(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        // modifiers.command automatically uses Cmd on macOS and Ctrl elsewhere
        let should_pan = ui.input(|i| {
            i.pointer.middle_down() || (i.pointer.primary_down() && i.modifiers.command)
        });

        if should_pan {
            if let Some(current_pos) = response.interact_pointer_pos() {
                if !self.interaction.is_panning {
                    self.interaction.is_panning = true;
                    self.interaction.last_pan_pos = Some(current_pos);
                } else if let Some(last_pos) = self.interaction.last_pan_pos {
                    self.canvas.offset += current_pos - last_pos;
                    self.interaction.last_pan_pos = Some(current_pos);
                }
            }
        } else {
            self.interaction.is_panning = false;
            self.interaction.last_pan_pos = None;
        }
    }

    /// Handles scroll wheel zooming, keeping the world position under the cursor fixed.
    pub fn handle_canvas_zoom(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll_delta == 0.0 {
            return;
        }
        let Some(mouse_pos) = ui
            .input(|i| i.pointer.hover_pos())
            .or_else(|| response.interact_pointer_pos())
        else {
            return;
        };
        if !response.rect.contains(mouse_pos) {
            return;
        }

        let world_before = self.screen_to_world(mouse_pos);
        let zoom_delta = if scroll_delta > 0.0 { 0.025 } else { -0.025 };
        let old_zoom = self.canvas.zoom_factor;
        self.canvas.zoom_factor = (old_zoom + zoom_delta).clamp(MIN_ZOOM, MAX_ZOOM);

        if (self.canvas.zoom_factor - old_zoom).abs() > f32::EPSILON {
            let world_after = self.world_to_screen(world_before);
            self.canvas.offset += mouse_pos - world_after;
        }
    }

    /// Handles selection clicks and dragging with the left mouse button.
    ///
    /// Shift-click toggles an item in the selection; a plain click replaces it. Clicking a
    /// node takes precedence over the title bar of the group it sits in.
    pub fn handle_pointer(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        if self.interaction.is_panning {
            return;
        }
        let shift = ui.input(|i| i.modifiers.shift);

        if response.drag_started_by(egui::PointerButton::Primary)
            || response.clicked_by(egui::PointerButton::Primary)
        {
            if let Some(pos) = response.interact_pointer_pos() {
                let world = self.screen_to_world(pos);
                let target = self.item_at(world);
                self.select(target, shift);
                if response.drag_started_by(egui::PointerButton::Primary) {
                    if let Some(target) = target {
                        self.interaction.dragging = Some(target);
                        self.interaction.last_drag_world = Some(world);
                        self.interaction.drag_snapshot = Some(self.scene.clone());
                    }
                }
            }
        }

        if response.dragged_by(egui::PointerButton::Primary) {
            if let (Some(target), Some(last), Some(pos)) = (
                self.interaction.dragging,
                self.interaction.last_drag_world,
                response.interact_pointer_pos(),
            ) {
                let world = self.screen_to_world(pos);
                let delta = world - last;
                self.drag_by(target, delta.x, delta.y);
                self.interaction.last_drag_world = Some(world);
            }
        }

        if response.drag_stopped() {
            self.finish_drag();
        }
    }

    /// Topmost item under a world position: nodes first, then group title bars.
    pub fn item_at(&self, world: egui::Pos2) -> Option<DragTarget> {
        self.scene
            .node_at(world.x, world.y)
            .map(DragTarget::Node)
            .or_else(|| {
                self.scene
                    .group_title_at(world.x, world.y, GROUP_TITLE_HEIGHT)
                    .map(DragTarget::Group)
            })
    }

    /// Updates the selection for a click on `target` (or empty canvas).
    pub fn select(&mut self, target: Option<DragTarget>, additive: bool) {
        if !additive {
            self.interaction.clear_selection();
        }
        match target {
            Some(DragTarget::Group(id)) => toggle(&mut self.interaction.selected_groups, id),
            Some(DragTarget::Node(id)) => toggle(&mut self.interaction.selected_nodes, id),
            None => {}
        }
    }

    fn drag_by(&mut self, target: DragTarget, dx: f32, dy: f32) {
        match target {
            DragTarget::Group(id) => self.scene.move_group(id, dx, dy),
            DragTarget::Node(id) => {
                if let Some(node) = self.scene.nodes.get_mut(&id) {
                    node.rect = node.rect.translated(dx, dy);
                }
            }
        }
    }

    /// Ends a drag, recording the movement for undo.
    pub fn finish_drag(&mut self) {
        self.interaction.dragging = None;
        self.interaction.last_drag_world = None;
        if let Some(before) = self.interaction.drag_snapshot.take() {
            if let Some(action) = UndoAction::from_scene_diff(&before, &self.scene) {
                self.undo_history.push_action(action);
            }
        }
    }
}

fn toggle<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if let Some(pos) = items.iter().position(|existing| *existing == item) {
        items.remove(pos);
    } else {
        items.push(item);
    }
}
