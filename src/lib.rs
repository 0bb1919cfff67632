//! # Group Aligner
//!
//! Alignment and sizing tools for group-boxes in a node-graph editor.
//!
//! The core is a pure bounds engine ([`geometry`]) that turns snapshots of groups and the nodes
//! they enclose into new group rectangles:
//! - **Align** an edge across several groups, or equalize their extent once already aligned
//! - **Equalize** width or height across several groups
//! - **Fit** a single group to its nodes, per edge, per axis, or on all sides
//!
//! Around it sit a small host model ([`Scene`]), a reporting boundary ([`operations`]),
//! node mute/bypass toggles ([`mute`]), per-type node colours ([`color_presets`]) and an egui
//! editor for trying it all out.
//!
//! Every operation takes an explicit `alternate` flag, which the editor reads from the Alt key.

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod types;
mod ui;

pub mod color_presets;
pub mod config;
pub mod constants;
pub mod demo;
pub mod geometry;
pub mod mute;
pub mod operations;

// Re-export public types and functions
pub use color_presets::{ColorPreset, PresetError, PresetStore};
pub use config::{AlignerConfig, ConfigError};
pub use geometry::{Axis, Edge, GroupOperation};
pub use operations::{run_group_operation, OperationError, OperationResult};
pub use types::*;
use ui::AlignerApp;

/// Runs the editor with the given configuration.
///
/// The previous session's scene is restored from eframe storage when available.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use group_aligner::{run_app, AlignerConfig};
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app(AlignerConfig::default())
/// }
/// ```
pub fn run_app(config: AlignerConfig) -> Result<(), eframe::Error> {
    let presets = match &config.color_presets {
        Some(path) => PresetStore::load(path).unwrap_or_else(|err| {
            log::warn!("{}: {err}; starting without colour presets", path.display());
            PresetStore::default()
        }),
        None => PresetStore::default(),
    };

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Group Aligner",
        options,
        Box::new(move |cc| {
            let restored = cc
                .storage
                .and_then(|storage| storage.get_string("app_state"))
                .and_then(|json| match AlignerApp::from_json(&json) {
                    Ok(app) => Some(app),
                    Err(err) => {
                        log::warn!("Discarding saved state: {err}");
                        None
                    }
                });
            let app = match restored {
                Some(mut app) => {
                    app.config = config;
                    app.presets = presets;
                    app
                }
                None => AlignerApp::new(config, presets),
            };
            Ok(Box::new(app))
        }),
    )
}
