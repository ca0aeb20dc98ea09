use std::path::Path;

use crate::compose::primitive::DrawProgram;
use crate::foundation::error::{VinylError, VinylResult};
use crate::render::RenderOpts;
use crate::render::labels::LabelLayout;
use crate::render::raster::{rasterize_svg, write_png};
use crate::render::svg::render_svg;

/// Output file formats, chosen from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Vector output.
    Svg,
    /// Raster output.
    Png,
}

impl OutputFormat {
    /// Pick the format for `path` (case-insensitive `.svg` / `.png`).
    pub fn from_path(path: &Path) -> VinylResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("svg") => Ok(Self::Svg),
            Some("png") => Ok(Self::Png),
            _ => Err(VinylError::render(format!(
                "unsupported output '{}': expected .svg or .png",
                path.display()
            ))),
        }
    }
}

/// Render `program` and write it to `out`, creating missing parent directories.
#[tracing::instrument(skip(program, opts, layout), fields(out = %out.display()))]
pub fn export(
    program: &DrawProgram,
    opts: &RenderOpts,
    layout: &dyn LabelLayout,
    out: &Path,
) -> VinylResult<OutputFormat> {
    let format = OutputFormat::from_path(out)?;
    let svg = render_svg(program, opts, layout)?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            VinylError::render(format!("create output dir '{}': {e}", parent.display()))
        })?;
    }

    match format {
        OutputFormat::Svg => std::fs::write(out, svg.as_bytes())
            .map_err(|e| VinylError::render(format!("write svg '{}': {e}", out.display())))?,
        OutputFormat::Png => {
            let image = rasterize_svg(&svg, &opts.font_dirs)?;
            write_png(&image, out)?;
        }
    }
    tracing::info!(format = ?format, "wrote chart");
    Ok(format)
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
