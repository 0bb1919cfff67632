//! User interface for the group aligner.
//!
//! This module contains the editor host: the main application struct, toolbar, canvas, and the
//! keyboard shortcuts that drive the bounds engine.
//!
//! # Module Organization
//!
//! - `state` - Application state structures and the main AlignerApp
//! - `canvas` - Canvas navigation, selection, and dragging
//! - `rendering` - Drawing groups, nodes, and the grid
//! - `undo` - Undo/redo of applied operations and drags
//!
//! Colour presets are edited from the side panel and saved to the configured preset file.

mod canvas;
mod rendering;
mod state;
mod undo;


pub use state::AlignerApp;
pub use undo::{UndoAction, UndoableScene};

use crate::color_presets::{hex8, ColorPreset};
use crate::demo::all_demos;
use crate::geometry::{Axis, Edge, GroupOperation};
use crate::mute::toggle_mode;
use crate::operations::{apply_group_operation, OperationResult};
use crate::types::*;
use eframe::egui;

/// Actions reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShortcutAction {
    Group(GroupOperation),
    Mode(NodeMode),
    Undo,
    Redo,
}

impl eframe::App for AlignerApp {
    /// Persist the scene and view settings between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.to_json() {
            Ok(json) => storage.set_string("app_state", json),
            Err(err) => log::error!("Failed to serialize app state: {err}"),
        }
    }

    /// Main update function called by egui for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let visuals = if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            self.draw_status_bar(ui);
        });

        egui::SidePanel::right("selection_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                self.draw_selection_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });
    }
}

impl AlignerApp {
    /// Runs a bounds operation over the selected groups and records it for undo.
    pub fn perform_group_operation(&mut self, operation: GroupOperation, alternate: bool) {
        let selection = self.interaction.selected_groups.clone();
        let outcome = apply_group_operation(
            &mut self.scene,
            &selection,
            operation,
            alternate,
            &self.config,
        )
        .map(|changes| {
            if !changes.is_empty() {
                self.undo_history
                    .push_action(UndoAction::BoundsChanged { changes });
            }
        });
        self.report(operation.label(), outcome.into());
    }

    /// Toggles the selected nodes into (or out of) `target` mode and records it for undo.
    pub fn perform_mode_toggle(&mut self, target: NodeMode) {
        let selection = self.interaction.selected_nodes.clone();
        let outcome = toggle_mode(&mut self.scene, &selection, target).map(|changes| {
            if !changes.is_empty() {
                self.undo_history
                    .push_action(UndoAction::ModesChanged { changes });
            }
        });
        let label = if target == NodeMode::Bypass { "Bypass" } else { "Mute" };
        self.report(label, outcome.into());
    }

    fn report(&mut self, label: &str, result: OperationResult) {
        if result.success {
            self.status = Some(format!("{label}: done"));
        } else {
            let message = result.message.unwrap_or_else(|| "failed".to_string());
            log::warn!("{label}: {message}");
            self.status = Some(message);
        }
    }

    /// Remembers the picked colour as the body colour of every selected node's type.
    pub fn save_preset_for_selection(&mut self) {
        let mut types: Vec<String> = Vec::new();
        for node in self
            .interaction
            .selected_nodes
            .iter()
            .filter_map(|id| self.scene.nodes.get(id))
        {
            if !types.contains(&node.node_type) {
                types.push(node.node_type.clone());
            }
        }
        if types.is_empty() {
            self.report(
                "Colour preset",
                OperationResult::failed("Please select nodes to save a colour preset"),
            );
            return;
        }

        let color = hex8(self.preset_color.to_srgba_unmultiplied());
        let accepted = self.presets.upsert(
            types
                .into_iter()
                .map(|node_type| ColorPreset::with_bgcolor(node_type, color.clone())),
        );
        if accepted == 0 {
            self.report(
                "Colour preset",
                OperationResult::failed("Note nodes do not take colour presets"),
            );
            return;
        }
        log::info!("Saved colour {color} for {accepted} node types");
        self.persist_presets();
        self.report("Colour preset", OperationResult::ok());
    }

    /// Removes a single preset entry.
    pub fn delete_preset(&mut self, preset: &ColorPreset) {
        let Some(color) = preset.bgcolor.as_deref().or(preset.color.as_deref()) else {
            return;
        };
        if self.presets.delete_color(color, Some(&preset.node_type)) > 0 {
            self.persist_presets();
        }
    }

    /// Drops every colour preset.
    pub fn clear_presets(&mut self) {
        let removed = self.presets.clear();
        log::info!("Cleared {removed} colour presets");
        self.persist_presets();
    }

    fn persist_presets(&mut self) {
        let Some(path) = &self.config.color_presets else {
            return;
        };
        if let Err(err) = self.presets.save(path) {
            log::error!("Failed to save colour presets to {}: {err}", path.display());
            self.status = Some(format!("Failed to save colour presets: {err}"));
        }
    }

    /// Performs an undo operation.
    pub fn perform_undo(&mut self) {
        if let Some(action) = self.undo_history.pop_undo() {
            if let Some(redo_action) = self.scene.apply_undo(&action) {
                self.undo_history.push_redo(redo_action);
            }
        }
    }

    /// Performs a redo operation.
    pub fn perform_redo(&mut self) {
        if let Some(action) = self.undo_history.pop_redo() {
            if let Some(undo_action) = self.scene.apply_undo(&action) {
                // Don't call push_action here as it would clear the redo stack
                self.undo_history.push_undo(undo_action);
            }
        }
    }

    /// Maps a shortcut key to a bounds operation. The same keys fit a lone selected group to
    /// its nodes and align or equalize several.
    fn operation_for_key(key: egui::Key, single_group: bool) -> Option<GroupOperation> {
        let edge = |edge: Edge| {
            if single_group {
                GroupOperation::FitEdge(edge)
            } else {
                GroupOperation::AlignEdge(edge)
            }
        };
        let axis = |axis: Axis| {
            if single_group {
                GroupOperation::FitAxis(axis)
            } else {
                GroupOperation::EqualizeExtent(axis)
            }
        };
        match key {
            egui::Key::A => Some(edge(Edge::Left)),
            egui::Key::D => Some(edge(Edge::Right)),
            egui::Key::W => Some(edge(Edge::Top)),
            egui::Key::S => Some(edge(Edge::Bottom)),
            egui::Key::H => Some(axis(Axis::Horizontal)),
            egui::Key::V => Some(axis(Axis::Vertical)),
            egui::Key::F => Some(GroupOperation::FitFull),
            _ => None,
        }
    }

    fn shortcut_for(
        key: egui::Key,
        modifiers: egui::Modifiers,
        single_group: bool,
    ) -> Option<(ShortcutAction, bool)> {
        let command = modifiers.command || modifiers.ctrl;
        if command {
            return match key {
                egui::Key::Z if modifiers.shift => Some((ShortcutAction::Redo, false)),
                egui::Key::Z => Some((ShortcutAction::Undo, false)),
                egui::Key::Y => Some((ShortcutAction::Redo, false)),
                egui::Key::M => Some((ShortcutAction::Mode(NodeMode::Never), false)),
                egui::Key::B => Some((ShortcutAction::Mode(NodeMode::Bypass), false)),
                _ => None,
            };
        }
        if modifiers.shift {
            return Self::operation_for_key(key, single_group)
                .map(|op| (ShortcutAction::Group(op), modifiers.alt));
        }
        None
    }

    /// Handles keyboard shortcuts. The Alt state of each key event is the alternate flag.
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let single_group = self.interaction.selected_groups.len() == 1;
        // Scan raw key events so modifiers are read from the event itself
        let actions: Vec<(ShortcutAction, bool)> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|ev| match ev {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        modifiers,
                        ..
                    } => Self::shortcut_for(*key, *modifiers, single_group),
                    _ => None,
                })
                .collect()
        });

        for (action, alternate) in actions {
            match action {
                ShortcutAction::Group(operation) => {
                    self.perform_group_operation(operation, alternate)
                }
                ShortcutAction::Mode(mode) => self.perform_mode_toggle(mode),
                ShortcutAction::Undo => self.perform_undo(),
                ShortcutAction::Redo => self.perform_redo(),
            }
        }
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        let alternate = ui.input(|i| i.modifiers.alt);
        ui.horizontal_wrapped(|ui| {
            ui.add_enabled_ui(self.undo_history.can_undo(), |ui| {
                if ui.button("⟲ Undo").clicked() {
                    self.perform_undo();
                }
            });
            ui.add_enabled_ui(self.undo_history.can_redo(), |ui| {
                if ui.button("⟳ Redo").clicked() {
                    self.perform_redo();
                }
            });

            ui.separator();

            for operation in GroupOperation::ALL.into_iter().filter(|op| op.is_multi_group()) {
                if ui.button(operation.label()).clicked() {
                    self.perform_group_operation(operation, alternate);
                }
            }

            ui.separator();

            for operation in GroupOperation::ALL.into_iter().filter(|op| !op.is_multi_group()) {
                if ui.button(operation.label()).clicked() {
                    self.perform_group_operation(operation, alternate);
                }
            }

            ui.separator();

            if ui.button("Mute").clicked() {
                self.perform_mode_toggle(NodeMode::Never);
            }
            if ui.button("Bypass").clicked() {
                self.perform_mode_toggle(NodeMode::Bypass);
            }

            ui.separator();

            ui.menu_button("Demos", |ui| {
                for info in all_demos() {
                    if ui.button(info.name).clicked() {
                        self.load_demo(info.kind);
                        ui.close();
                    }
                }
            });
            ui.checkbox(&mut self.canvas.show_grid, "Grid");
            ui.checkbox(&mut self.dark_mode, "Dark");
        });
    }

    fn draw_status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let alternate = ui.input(|i| i.modifiers.alt);
            ui.label(if alternate { "Alt: alternate mode" } else { "Hold Alt for alternate mode" });
            ui.separator();
            ui.label(self.status.as_deref().unwrap_or("Ready"));
        });
    }

    fn draw_selection_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Groups");
        let mut groups: Vec<(GroupId, String, Rect)> = self
            .scene
            .groups
            .values()
            .map(|g| (g.id, g.title.clone(), g.rect))
            .collect();
        groups.sort_by(|a, b| a.1.cmp(&b.1));
        for (id, title, rect) in groups {
            let selected = self.interaction.selected_groups.contains(&id);
            let text = format!(
                "{title}  ({:.0}, {:.0})  {:.0}×{:.0}",
                rect.x, rect.y, rect.width, rect.height
            );
            if ui.selectable_label(selected, text).clicked() {
                let additive = ui.input(|i| i.modifiers.shift);
                self.select(Some(state::DragTarget::Group(id)), additive);
            }
        }

        ui.separator();
        ui.label(format!(
            "Selected: {} groups, {} nodes",
            self.interaction.selected_groups.len(),
            self.interaction.selected_nodes.len()
        ));
        ui.label(format!(
            "Minimum size: {:.0}×{:.0}",
            self.config.min_node_size.width, self.config.min_node_size.height
        ));

        ui.separator();
        self.draw_preset_editor(ui);

        ui.separator();
        ui.small("Shift+A/D/W/S: align edges, or fit one group");
        ui.small("Shift+H/V: equal width/height, or fit one group");
        ui.small("Shift+F: fit group to nodes");
        ui.small("Ctrl+M / Ctrl+B: mute / bypass nodes");
    }

    fn draw_preset_editor(&mut self, ui: &mut egui::Ui) {
        ui.heading("Colour presets");
        ui.horizontal(|ui| {
            ui.color_edit_button_srgba(&mut self.preset_color);
            if ui.button("Save for selected types").clicked() {
                self.save_preset_for_selection();
            }
        });

        let mut removed = None;
        for preset in &self.presets.nodes {
            ui.horizontal(|ui| {
                let (swatch, _) =
                    ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                if let Some(fill) = rendering::preset_body_color(preset) {
                    ui.painter().rect_filled(swatch, 2.0, fill);
                }
                ui.label(preset.node_type.as_str());
                if ui.small_button("✖").on_hover_text("Remove preset").clicked() {
                    removed = Some(preset.clone());
                }
            });
        }
        if let Some(preset) = removed {
            self.delete_preset(&preset);
        }

        if !self.presets.nodes.is_empty() && ui.button("Clear presets").clicked() {
            self.clear_presets();
        }
    }

    fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());

        // Put the world origin near the top-left of the canvas on first frame
        if !self.canvas.centered {
            self.canvas.offset = response.rect.min.to_vec2() + egui::vec2(80.0, 80.0);
            self.canvas.centered = true;
        }

        self.handle_canvas_panning(ui, &response);
        self.handle_canvas_zoom(ui, &response);
        self.handle_pointer(ui, &response);

        self.render_scene(&painter, response.rect);
    }
}
