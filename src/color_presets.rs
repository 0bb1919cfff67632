//! Per-node-type colour presets.
//!
//! A preset gives every node of one type a title colour and/or a body colour. Presets live in
//! a JSON file shaped `{ "version": 1, "nodes": [{ "type", "color"?, "bgcolor"? }] }` with
//! colours stored as `#RRGGBBAA`. Note nodes never carry presets.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Version written to new preset files.
pub const PRESET_STORE_VERSION: u32 = 1;

/// Type recorded for entries that do not name one.
pub const UNKNOWN_TYPE: &str = "Unknown";

const NOTE_TYPES: [&str; 2] = ["MarkdownNote", "Note"];

/// Errors raised while reading or writing a preset file.
#[derive(Debug, Error)]
pub enum PresetError {
    /// The file could not be read or written
    #[error("preset file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not JSON
    #[error("preset file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Colours remembered for one node type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPreset {
    /// Node type the preset applies to
    #[serde(rename = "type", default)]
    pub node_type: String,
    /// Title colour
    #[serde(default)]
    pub color: Option<String>,
    /// Body colour
    #[serde(default)]
    pub bgcolor: Option<String>,
}

impl ColorPreset {
    /// Creates a preset with only a body colour.
    pub fn with_bgcolor(node_type: impl Into<String>, bgcolor: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            color: None,
            bgcolor: Some(bgcolor.into()),
        }
    }

    /// Canonical form of this entry: colours as `#RRGGBBAA` (invalid ones dropped) and an
    /// empty type replaced by [`UNKNOWN_TYPE`]. Note nodes give `None`.
    pub fn normalized(&self) -> Option<Self> {
        if is_note_type(&self.node_type) {
            return None;
        }
        let node_type = if self.node_type.is_empty() {
            UNKNOWN_TYPE.to_string()
        } else {
            self.node_type.clone()
        };
        Some(Self {
            node_type,
            color: self.color.as_deref().and_then(normalize_hex8),
            bgcolor: self.bgcolor.as_deref().and_then(normalize_hex8),
        })
    }

    fn has_color(&self) -> bool {
        self.color.is_some() || self.bgcolor.is_some()
    }

    fn uses_color(&self, target: &str) -> bool {
        let matches = |value: &Option<String>| {
            value.as_deref().and_then(normalize_hex8).as_deref() == Some(target)
        };
        matches(&self.color) || matches(&self.bgcolor)
    }
}

/// The preset file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetStore {
    /// File format version
    pub version: u32,
    /// One entry per node type, in insertion order
    pub nodes: Vec<ColorPreset>,
}

impl Default for PresetStore {
    fn default() -> Self {
        Self {
            version: PRESET_STORE_VERSION,
            nodes: Vec::new(),
        }
    }
}

impl PresetStore {
    /// Parses a preset document.
    ///
    /// A document that is not an object with a `nodes` array is treated as empty. Malformed and
    /// note entries are dropped, and colours are normalized.
    pub fn from_json_str(json: &str) -> Result<Self, PresetError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let Some(entries) = value.get("nodes").and_then(serde_json::Value::as_array) else {
            log::warn!("Preset document has no node list; starting empty");
            return Ok(Self::default());
        };
        let version = value
            .get("version")
            .and_then(serde_json::Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(PRESET_STORE_VERSION);

        let nodes = entries
            .iter()
            .filter_map(|entry| match serde_json::from_value::<ColorPreset>(entry.clone()) {
                Ok(preset) => preset.normalized(),
                Err(err) => {
                    log::debug!("Skipping malformed preset {entry}: {err}");
                    None
                }
            })
            .collect();
        Ok(Self { version, nodes })
    }

    /// Reads a preset file. A missing file gives an empty store.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PresetError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_json_str(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes the store as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PresetError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Preset for a node type, matched on [`normalize_name`].
    pub fn preset_for(&self, node_type: &str) -> Option<&ColorPreset> {
        let wanted = normalize_name(node_type);
        if wanted.is_empty() {
            return None;
        }
        self.nodes
            .iter()
            .find(|preset| normalize_name(&preset.node_type) == wanted)
    }

    /// Merges `incoming` into the store, keyed by type.
    ///
    /// Incoming entries replace existing ones of the same type in place; new types are appended
    /// in the order they arrive. Entries without a valid colour are ignored and duplicate types
    /// collapse to the last one seen.
    ///
    /// # Returns
    ///
    /// The number of incoming entries accepted.
    pub fn upsert(&mut self, incoming: impl IntoIterator<Item = ColorPreset>) -> usize {
        let incoming: Vec<ColorPreset> = incoming
            .into_iter()
            .filter_map(|preset| preset.normalized())
            .filter(ColorPreset::has_color)
            .collect();
        let accepted = incoming.len();

        let existing = std::mem::take(&mut self.nodes)
            .into_iter()
            .filter_map(|preset| preset.normalized());

        let mut order: Vec<String> = Vec::new();
        let mut by_type: HashMap<String, ColorPreset> = HashMap::new();
        for preset in existing.chain(incoming) {
            if !by_type.contains_key(&preset.node_type) {
                order.push(preset.node_type.clone());
            }
            by_type.insert(preset.node_type.clone(), preset);
        }
        self.nodes = order
            .into_iter()
            .filter_map(|node_type| by_type.remove(&node_type))
            .collect();
        accepted
    }

    /// Removes presets using `color` as either colour.
    ///
    /// With `node_type`, only the first matching entry of that type goes.
    ///
    /// # Returns
    ///
    /// The number of entries removed; zero when `color` is not a valid colour.
    pub fn delete_color(&mut self, color: &str, node_type: Option<&str>) -> usize {
        let Some(target) = normalize_hex8(color) else {
            return 0;
        };
        match node_type {
            Some(node_type) => {
                let position = self
                    .nodes
                    .iter()
                    .position(|p| p.node_type == node_type && p.uses_color(&target));
                match position {
                    Some(index) => {
                        self.nodes.remove(index);
                        1
                    }
                    None => 0,
                }
            }
            None => {
                let before = self.nodes.len();
                self.nodes.retain(|p| !p.uses_color(&target));
                before - self.nodes.len()
            }
        }
    }

    /// Removes every preset, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let removed = self.nodes.len();
        self.nodes.clear();
        removed
    }
}

/// Normalizes a hex colour to `#RRGGBBAA`.
///
/// Accepts `RGB`, `RGBA`, `RRGGBB` and `RRGGBBAA`, with or without `#`. Non-hex characters are
/// ignored; any other digit count gives `None`.
pub fn normalize_hex8(input: &str) -> Option<String> {
    let digits: String = input
        .chars()
        .filter(char::is_ascii_hexdigit)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let expanded: String = match digits.len() {
        3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => digits,
        _ => return None,
    };
    if expanded.len() == 6 {
        Some(format!("#{expanded}FF"))
    } else {
        Some(format!("#{expanded}"))
    }
}

/// Normalizes a node type or title: parenthesised parts and non-alphanumerics are removed.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut rest = name;
    while let Some(open) = rest.find('(') {
        let Some(close) = rest[open..].find(')') else {
            break;
        };
        out.push_str(&rest[..open]);
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);
    out.retain(|c| c.is_ascii_alphanumeric());
    out
}

/// Whether `node_type` names a note node, which never takes presets.
pub fn is_note_type(node_type: &str) -> bool {
    let name = normalize_name(node_type);
    NOTE_TYPES.iter().any(|note| name == *note)
}

/// Parses any accepted hex form into `[r, g, b, a]`.
pub fn rgba(hex: &str) -> Option<[u8; 4]> {
    let normalized = normalize_hex8(hex)?;
    let mut channels = [0u8; 4];
    for (i, channel) in channels.iter_mut().enumerate() {
        let start = 1 + i * 2;
        *channel = u8::from_str_radix(&normalized[start..start + 2], 16).ok()?;
    }
    Some(channels)
}

/// Formats channels as `#RRGGBBAA`.
pub fn hex8([r, g, b, a]: [u8; 4]) -> String {
    format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
}
