//! Skin configuration loaded from TOML.
//!
//! A skin file tunes the image cache budget and painter behavior and
//! registers nine-slice metrics per widget kind:
//!
//! ```toml
//! [cache]
//! max_pixels = 8388608
//!
//! [painter]
//! focus_ring_margin = 3
//!
//! [[metrics]]
//! widget = "push_button"
//! min_width = 18
//! min_height = 22
//! west = 8
//! east = 8
//! north = 4
//! south = 6
//! stretch_vertically = false
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SkinError};
use crate::metrics::{MetricsTable, NineSliceMetrics};
use crate::state::{ControlSize, WidgetKind};

/// Image cache tuning (`[cache]`).
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Pixel budget shared by all cached control images.
    #[serde(default = "default_max_pixels")]
    pub max_pixels: usize,
}

fn default_max_pixels() -> usize {
    8 * 1024 * 1024
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_pixels: default_max_pixels(),
        }
    }
}

/// Painter tuning (`[painter]`).
#[derive(Debug, Clone, Deserialize)]
pub struct PainterConfig {
    /// Extra pixels reserved on every side of a focused control for the
    /// focus ring.
    #[serde(default = "default_focus_ring_margin")]
    pub focus_ring_margin: u32,
}

fn default_focus_ring_margin() -> u32 {
    3
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            focus_ring_margin: default_focus_ring_margin(),
        }
    }
}

/// One `[[metrics]]` row: nine-slice metrics for a widget kind, optionally
/// restricted to one size class.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsEntry {
    pub widget: WidgetKind,
    #[serde(default)]
    pub size: Option<ControlSize>,
    #[serde(flatten)]
    pub metrics: NineSliceMetrics,
}

/// A fully parsed skin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkinConfig {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub painter: PainterConfig,
    #[serde(default)]
    pub metrics: Vec<MetricsEntry>,
}

impl SkinConfig {
    /// Parse a skin from a TOML string.
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| SkinError::Config(format!("skin.toml: {e}")))
    }

    /// Load a skin from a TOML file on disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| SkinError::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&source).map_err(|e| SkinError::Config(format!("{}: {e}", path.display())))
    }

    /// The skin embedded in the library.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(include_str!("../../../skins/default/skin.toml"))
    }

    /// Build a validated metrics table from the `[[metrics]]` rows.
    ///
    /// Later rows for the same widget and size replace earlier ones.
    pub fn metrics_table(&self) -> Result<MetricsTable> {
        let mut table = MetricsTable::new();
        for entry in &self.metrics {
            entry.metrics.validate().map_err(|e| {
                SkinError::Config(format!("metrics for {:?}: {e}", entry.widget))
            })?;
            match entry.size {
                Some(size) => table.insert_sized(entry.widget, size, entry.metrics),
                None => table.insert(entry.widget, entry.metrics),
            }
        }
        Ok(table)
    }
}
