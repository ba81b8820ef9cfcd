//! Plotting defaults.

use crate::config::source::{Scope, Source, default_source};
use crate::config::validate;
use crate::error::ConfigResult;
use serde::Serialize;
use std::fmt;

/// Environment prefix for plotting variables.
pub const PLOT_PREFIX: &str = "PLOT_";

/// Plot context, sized for the output medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotContext {
    Paper,
    Notebook,
    Talk,
    Poster,
}

impl PlotContext {
    pub const ALL: [&'static str; 4] = ["paper", "notebook", "talk", "poster"];

    pub fn parse(field: &str, raw: &str) -> ConfigResult<Self> {
        Ok(match validate::one_of(field, raw, &Self::ALL)? {
            0 => PlotContext::Paper,
            1 => PlotContext::Notebook,
            2 => PlotContext::Talk,
            _ => PlotContext::Poster,
        })
    }

    pub fn as_str(&self) -> &'static str {
        Self::ALL[*self as usize]
    }
}

/// Axes style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotStyle {
    White,
    Dark,
    Whitegrid,
    Darkgrid,
    Ticks,
}

impl PlotStyle {
    pub const ALL: [&'static str; 5] = ["white", "dark", "whitegrid", "darkgrid", "ticks"];

    pub fn parse(field: &str, raw: &str) -> ConfigResult<Self> {
        Ok(match validate::one_of(field, raw, &Self::ALL)? {
            0 => PlotStyle::White,
            1 => PlotStyle::Dark,
            2 => PlotStyle::Whitegrid,
            3 => PlotStyle::Darkgrid,
            _ => PlotStyle::Ticks,
        })
    }

    pub fn as_str(&self) -> &'static str {
        Self::ALL[*self as usize]
    }
}

/// Color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotPalette {
    Deep,
    Muted,
    Pastel,
    Bright,
    Dark,
    Colorblind,
}

impl PlotPalette {
    pub const ALL: [&'static str; 6] = ["deep", "muted", "pastel", "bright", "dark", "colorblind"];

    pub fn parse(field: &str, raw: &str) -> ConfigResult<Self> {
        Ok(match validate::one_of(field, raw, &Self::ALL)? {
            0 => PlotPalette::Deep,
            1 => PlotPalette::Muted,
            2 => PlotPalette::Pastel,
            3 => PlotPalette::Bright,
            4 => PlotPalette::Dark,
            _ => PlotPalette::Colorblind,
        })
    }

    pub fn as_str(&self) -> &'static str {
        Self::ALL[*self as usize]
    }
}

impl fmt::Display for PlotContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PlotStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PlotPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plotting defaults, resolved under the `PLOT_` prefix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotDefaults {
    /// Figure size (width, height) in inches.
    pub figsize: (u32, u32),
    /// Output resolution in dots per inch.
    pub dpi: u32,
    /// Save-figure format token, lowercase.
    pub format: String,
    /// Bounding-box mode for saved figures.
    pub bbox: String,
    pub context: PlotContext,
    pub style: PlotStyle,
    pub palette: PlotPalette,
    /// Font family.
    pub font: String,
    /// Multiplier applied to the base font size.
    pub font_scale: f64,
    /// Base font size in points.
    pub fontsize: u32,
}

/// The compiled-in plotting defaults. Consumers that need a baseline theme
/// before resolution derive it from here, so these literals live in exactly
/// one place.
impl Default for PlotDefaults {
    fn default() -> Self {
        Self {
            figsize: (12, 7),
            dpi: 300,
            format: "png".to_string(),
            bbox: "tight".to_string(),
            context: PlotContext::Notebook,
            style: PlotStyle::Whitegrid,
            palette: PlotPalette::Deep,
            font: "sans-serif".to_string(),
            font_scale: 1.0,
            fontsize: 12,
        }
    }
}

impl PlotDefaults {
    pub fn load() -> ConfigResult<Self> {
        Self::resolve(&default_source())
    }

    /// Resolve fields in declaration order, overrides through their
    /// validators, absent fields straight from [`PlotDefaults::default`].
    pub fn resolve(source: &dyn Source) -> ConfigResult<Self> {
        let scope = Scope::new(PLOT_PREFIX, source);
        let base = Self::default();
        Ok(Self {
            figsize: scope.or_default("FIGSIZE", base.figsize, validate::figure_size)?,
            dpi: scope.or_default("DPI", base.dpi, validate::positive_int)?,
            format: scope.or_default("FORMAT", base.format, validate::lower_token)?,
            bbox: scope.or_default("BBOX", base.bbox, validate::non_empty)?,
            context: scope.or_default("CONTEXT", base.context, PlotContext::parse)?,
            style: scope.or_default("STYLE", base.style, PlotStyle::parse)?,
            palette: scope.or_default("PALETTE", base.palette, PlotPalette::parse)?,
            font: scope.or_default("FONT", base.font, validate::non_empty)?,
            font_scale: scope.or_default("FONT_SCALE", base.font_scale, validate::positive_float)?,
            fontsize: scope.or_default("FONTSIZE", base.fontsize, validate::positive_int)?,
        })
    }
}
