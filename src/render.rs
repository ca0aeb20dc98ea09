use std::path::PathBuf;

pub(crate) mod export;
pub(crate) mod labels;
pub(crate) mod polar;
pub(crate) mod raster;
pub(crate) mod svg;
pub(crate) mod text;

/// Output canvas and rendering options.
#[derive(Clone, Debug)]
pub struct RenderOpts {
    /// Side of the square canvas, in inches.
    pub size_in: f64,
    /// Pixels per inch; also converts point sizes to pixels.
    pub dpi: f64,
    /// Outer data radius as a fraction of the canvas side.
    pub outer_fraction: f64,
    /// Move repel-flagged labels off each other and off markers.
    pub repel: bool,
    /// Extra directories scanned for `.ttf` / `.otf` / `.ttc` fonts when rasterizing.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            size_in: 10.0,
            dpi: 100.0,
            outer_fraction: 0.46,
            repel: true,
            font_dirs: Vec::new(),
        }
    }
}

impl RenderOpts {
    /// Canvas side in whole pixels.
    pub fn canvas_px(&self) -> u32 {
        (self.size_in * self.dpi).round().max(1.0) as u32
    }

    /// Pixels per typographic point.
    pub fn px_per_pt(&self) -> f64 {
        crate::foundation::core::pt_to_px(1.0, self.dpi)
    }

    /// Check sizes are usable.
    pub fn validate(&self) -> crate::foundation::error::VinylResult<()> {
        use crate::foundation::error::VinylError;
        if !(self.size_in.is_finite() && self.size_in > 0.0) {
            return Err(VinylError::config("canvas size must be > 0 inches"));
        }
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(VinylError::config("dpi must be > 0"));
        }
        if !(self.outer_fraction > 0.0 && self.outer_fraction <= 0.5) {
            return Err(VinylError::config("outer_fraction must be within (0, 0.5]"));
        }
        const MAX_PX: f64 = 16_384.0;
        if self.size_in * self.dpi > MAX_PX {
            return Err(VinylError::config(format!(
                "canvas too large: {} px (max {MAX_PX})",
                self.size_in * self.dpi
            )));
        }
        Ok(())
    }
}
