//! Plot-theme applier.
//!
//! Consumes [`PlotDefaults`] and publishes one process-global [`Theme`]
//! snapshot. The theme is swapped atomically, so readers never observe a
//! half-applied update, and re-applying equal defaults is a no-op
//! difference-wise.

use crate::config::{PlotContext, PlotDefaults, PlotPalette, PlotStyle};
use arc_swap::ArcSwap;
use serde::Serialize;
use std::sync::{Arc, OnceLock};

/// A resolved charting theme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub context: PlotContext,
    pub style: PlotStyle,
    pub palette: PlotPalette,
    /// Figure size (width, height) in inches.
    pub figsize: (u32, u32),
    pub dpi: u32,
    /// Save-figure format token, lowercase.
    pub savefig_format: String,
    /// Bounding-box mode for saved figures.
    pub savefig_bbox: String,
    pub font: String,
    /// Base font size with the context scale applied, in points.
    pub font_size: f64,
}

impl Theme {
    fn from_defaults(cfg: &PlotDefaults) -> Self {
        Self {
            context: cfg.context,
            style: cfg.style,
            palette: cfg.palette,
            figsize: cfg.figsize,
            dpi: cfg.dpi,
            savefig_format: cfg.format.to_lowercase(),
            savefig_bbox: cfg.bbox.clone(),
            font: cfg.font.clone(),
            font_size: f64::from(cfg.fontsize) * cfg.font_scale,
        }
    }
}

/// The theme before any configuration is applied, derived from the
/// compiled-in plotting defaults rather than restating them.
impl Default for Theme {
    fn default() -> Self {
        Self::from_defaults(&PlotDefaults::default())
    }
}

fn theme_cell() -> &'static ArcSwap<Theme> {
    static THEME: OnceLock<ArcSwap<Theme>> = OnceLock::new();
    THEME.get_or_init(|| ArcSwap::from_pointee(Theme::default()))
}

/// Apply plotting defaults as one atomic global-theme update.
pub fn apply_theme(cfg: &PlotDefaults) {
    theme_cell().store(Arc::new(Theme::from_defaults(cfg)));
}

/// Current global theme snapshot.
pub fn current_theme() -> Arc<Theme> {
    theme_cell().load_full()
}
