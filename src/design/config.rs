//! Design constants for the vinyl chart.
//!
//! Every field is required when loading from JSON. Nothing is filled in from defaults, so a
//! partial file fails with [`VinylError::Config`] instead of silently changing the picture.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::color::Color;
use crate::foundation::core::Domain;
use crate::foundation::error::{VinylError, VinylResult};
use crate::geometry::transform::GlyphScale;

/// Upper bound on repeated decoration elements: grooves, year ticks, gradient strips.
pub const MAX_REPEATS: usize = 10_000;

/// Polar coordinate mapping: `x` (release year) becomes angle, `y` (ordinal) becomes radius.
///
/// The angle domain covers one full clockwise turn starting at 12 o'clock. The low end of the
/// radius domain maps to the center.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolarSpec {
    /// Data range mapped onto the full turn.
    pub angle: Domain,
    /// Data range mapped from the center to the outer radius.
    pub radius: Domain,
}

/// Named colors.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Palette {
    /// Canvas behind the record, also used for the center hole.
    pub background: Color,
    /// Record label (band A).
    pub label: Color,
    /// Record body (band B).
    pub body: Color,
    /// Groove guide lines.
    pub groove: Color,
    /// Soft light at the edge gradient.
    pub sheen: Color,
    /// Axis labels on the body.
    pub axis_text: Color,
    /// Title text on the label.
    pub title_text: Color,
    /// Data points and density glow.
    pub points: Color,
    /// Highlight rings.
    pub accent: Color,
    /// Highlight label text and leader lines.
    pub highlight_text: Color,
}

/// Radial extent of the record body. Band A always covers the whole radius domain.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BandSpec {
    /// Radius range of band B.
    pub body: Domain,
}

/// Opacity ramps at the two angular edges of the body band.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GradientSpec {
    /// Angular width of each ramp, in years.
    pub span: f64,
    /// Number of strips per ramp.
    pub steps: u32,
    /// Opacity at the bright end of a ramp.
    pub max_opacity: f64,
}

/// Concentric guide lines across the body band.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrooveSpec {
    /// Radial spacing between guides.
    pub interval: f64,
    /// Guide width in points.
    pub line_width: f64,
    /// Width of the two boundary guides in points.
    pub edge_width: f64,
    /// Guide opacity.
    pub opacity: f64,
}

/// Count-axis labelling.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RadialAxisSpec {
    /// Radii that get a numeric label.
    pub ticks: Vec<f64>,
    /// Multi-line description, `\n` separated.
    pub description: String,
    /// Radius the description is placed at.
    pub description_radius: f64,
    /// Font size in points.
    pub font_size: f64,
}

/// The hole in the middle of the record.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CenterHoleSpec {
    /// Diameter in points.
    pub size: f64,
}

/// Title block on the label.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TitleSpec {
    /// Title, may contain `\n`.
    pub title: String,
    /// Subtitle, may contain `\n`.
    pub subtitle: String,
    /// Data-space anchor of the title.
    pub title_at: kurbo::Point,
    /// Data-space anchor of the subtitle.
    pub subtitle_at: kurbo::Point,
    /// Title font size in points.
    pub title_size: f64,
    /// Subtitle font size in points.
    pub subtitle_size: f64,
}

/// Release-year guides and labels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YearTickSpec {
    /// First labelled year.
    pub from: i32,
    /// Last labelled year (inclusive).
    pub to: i32,
    /// Years between labels.
    pub step: i32,
    /// Guide radial extent.
    pub guide: Domain,
    /// Radius of the year labels.
    pub label_radius: f64,
    /// Guide width in points.
    pub line_width: f64,
    /// Guide opacity.
    pub opacity: f64,
    /// Font size in points.
    pub font_size: f64,
}

/// Small uniform markers, one per song.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointSpec {
    /// Diameter in points.
    pub size: f64,
    /// Marker opacity.
    pub opacity: f64,
}

/// Popularity glow.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DensitySpec {
    /// Opacity of each glyph-sized circle.
    pub opacity: f64,
}

/// Top-ten decoration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HighlightSpec {
    /// Label font size in points.
    pub label_size: f64,
    /// Ring line width in points.
    pub ring_width: f64,
}

/// Complete design of the chart.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesignConfig {
    /// Coordinate mapping shared by every layer.
    pub polar: PolarSpec,
    /// Colors.
    pub palette: Palette,
    /// Font family for all text.
    pub font_family: String,
    /// Body band extent.
    pub bands: BandSpec,
    /// Edge light falloff.
    pub gradient: GradientSpec,
    /// Groove guides.
    pub grooves: GrooveSpec,
    /// Count axis labels.
    pub radial_axis: RadialAxisSpec,
    /// Center hole.
    pub center_hole: CenterHoleSpec,
    /// Title block.
    pub titles: TitleSpec,
    /// Year guides.
    pub year_ticks: YearTickSpec,
    /// All-records layer.
    pub points: PointSpec,
    /// Density layer.
    pub density: DensitySpec,
    /// Highlight labels and rings.
    pub highlight: HighlightSpec,
    /// Glyph size curve.
    pub glyph: GlyphScale,
}

impl DesignConfig {
    /// The reference vinyl design.
    pub fn reference() -> Self {
        let d = Domain::new;
        Self {
            polar: PolarSpec {
                angle: d(1955.0, 2020.0),
                radius: d(-40.0, 80.0),
            },
            palette: Palette {
                background: Color::rgb8(0xf4, 0xf1, 0xea),
                label: Color::rgb8(0xc0, 0x1f, 0x2a),
                body: Color::rgb8(0x1d, 0x1d, 0x1f),
                groove: Color::rgb8(0x3a, 0x3a, 0x3e),
                sheen: Color::rgb8(0xff, 0xff, 0xff),
                axis_text: Color::rgb8(0x8a, 0x8a, 0x90),
                title_text: Color::rgb8(0xfa, 0xf6, 0xee),
                points: Color::rgb8(0xe9, 0xe4, 0xd8),
                accent: Color::rgb8(0xf2, 0xb7, 0x05),
                highlight_text: Color::rgb8(0xfa, 0xf6, 0xee),
            },
            font_family: "sans-serif".to_owned(),
            bands: BandSpec {
                body: d(-6.0, 80.0),
            },
            gradient: GradientSpec {
                span: 3.0,
                steps: 12,
                max_opacity: 0.12,
            },
            grooves: GrooveSpec {
                interval: 5.0,
                line_width: 0.3,
                edge_width: 1.6,
                opacity: 0.7,
            },
            radial_axis: RadialAxisSpec {
                ticks: vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0],
                description: "songs per\nrelease year".to_owned(),
                description_radius: -3.0,
                font_size: 5.0,
            },
            center_hole: CenterHoleSpec { size: 9.0 },
            titles: TitleSpec {
                title: "THE 500 GREATEST\nSONGS OF ALL TIME".to_owned(),
                subtitle: "ranked songs by release year\nlarger glow = higher rank".to_owned(),
                title_at: kurbo::Point::new(1955.0, -24.0),
                subtitle_at: kurbo::Point::new(1987.5, -26.0),
                title_size: 9.0,
                subtitle_size: 5.5,
            },
            year_ticks: YearTickSpec {
                from: 1960,
                to: 2015,
                step: 5,
                guide: d(-6.0, 72.0),
                label_radius: 76.0,
                line_width: 0.3,
                opacity: 0.35,
                font_size: 6.0,
            },
            points: PointSpec {
                size: 1.6,
                opacity: 0.55,
            },
            density: DensitySpec { opacity: 0.05 },
            highlight: HighlightSpec {
                label_size: 5.0,
                ring_width: 0.8,
            },
            glyph: GlyphScale::default(),
        }
    }

    /// Parse a design from JSON. Missing fields are a config error.
    pub fn from_json_str(s: &str) -> VinylResult<Self> {
        serde_json::from_str(s).map_err(|e| VinylError::config(format!("design json: {e}")))
    }

    /// Read and parse a design JSON file.
    pub fn from_path(path: &Path) -> VinylResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read design '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Year labels in ascending order.
    pub fn year_tick_values(&self) -> Vec<i32> {
        let t = &self.year_ticks;
        if t.step <= 0 {
            return Vec::new();
        }
        (t.from..=t.to).step_by(t.step as usize).collect()
    }

    /// Radii of the interior grooves: multiples of `grooves.interval` strictly inside
    /// `bands.body`, ascending.
    pub fn groove_radii(&self) -> VinylResult<Vec<f64>> {
        let body = self.bands.body;
        let interval = self.grooves.interval;
        positive("grooves.interval", interval)?;

        let first = (body.min / interval).ceil() * interval;
        let count = ((body.max - first) / interval).ceil().max(0.0);
        if !count.is_finite() || count > MAX_REPEATS as f64 {
            return Err(VinylError::config(format!(
                "grooves.interval {interval} yields too many grooves in bands.body \
                 (max {MAX_REPEATS})"
            )));
        }
        Ok((0..count as usize)
            .map(|i| first + i as f64 * interval)
            .filter(|&y| y > body.min && y < body.max)
            .collect())
    }

    /// Check every constant is usable.
    pub fn validate(&self) -> VinylResult<()> {
        let polar = &self.polar;
        polar.angle.validate("polar.angle")?;
        polar.radius.validate("polar.radius")?;

        self.bands.body.validate("bands.body")?;
        if !polar.radius.encloses(self.bands.body) {
            return Err(VinylError::config(
                "bands.body must lie within polar.radius",
            ));
        }

        let g = &self.gradient;
        positive("gradient.span", g.span)?;
        if g.span * 2.0 > polar.angle.span() {
            return Err(VinylError::config(
                "gradient.span must fit twice within polar.angle",
            ));
        }
        if g.steps == 0 || g.steps as usize > MAX_REPEATS {
            return Err(VinylError::config(format!(
                "gradient.steps must be within 1..={MAX_REPEATS}"
            )));
        }
        opacity("gradient.max_opacity", g.max_opacity)?;

        let gr = &self.grooves;
        positive("grooves.interval", gr.interval)?;
        positive("grooves.line_width", gr.line_width)?;
        positive("grooves.edge_width", gr.edge_width)?;
        opacity("grooves.opacity", gr.opacity)?;
        self.groove_radii()?;

        let ax = &self.radial_axis;
        for &t in &ax.ticks {
            in_domain("radial_axis.ticks", t, polar.radius)?;
        }
        in_domain(
            "radial_axis.description_radius",
            ax.description_radius,
            polar.radius,
        )?;
        positive("radial_axis.font_size", ax.font_size)?;

        positive("center_hole.size", self.center_hole.size)?;

        let ti = &self.titles;
        positive("titles.title_size", ti.title_size)?;
        positive("titles.subtitle_size", ti.subtitle_size)?;
        in_domain("titles.title_at.x", ti.title_at.x, polar.angle)?;
        in_domain("titles.title_at.y", ti.title_at.y, polar.radius)?;
        in_domain("titles.subtitle_at.x", ti.subtitle_at.x, polar.angle)?;
        in_domain("titles.subtitle_at.y", ti.subtitle_at.y, polar.radius)?;

        let yt = &self.year_ticks;
        if yt.step <= 0 {
            return Err(VinylError::config("year_ticks.step must be > 0"));
        }
        if yt.from > yt.to {
            return Err(VinylError::config("year_ticks.from must be <= year_ticks.to"));
        }
        in_domain("year_ticks.from", f64::from(yt.from), polar.angle)?;
        in_domain("year_ticks.to", f64::from(yt.to), polar.angle)?;
        let tick_count = (i64::from(yt.to) - i64::from(yt.from)) / i64::from(yt.step) + 1;
        if tick_count > MAX_REPEATS as i64 {
            return Err(VinylError::config(format!(
                "year_ticks yields {tick_count} ticks (max {MAX_REPEATS})"
            )));
        }
        yt.guide.validate("year_ticks.guide")?;
        if !polar.radius.encloses(yt.guide) {
            return Err(VinylError::config(
                "year_ticks.guide must lie within polar.radius",
            ));
        }
        in_domain("year_ticks.label_radius", yt.label_radius, polar.radius)?;
        positive("year_ticks.line_width", yt.line_width)?;
        opacity("year_ticks.opacity", yt.opacity)?;
        positive("year_ticks.font_size", yt.font_size)?;

        positive("points.size", self.points.size)?;
        opacity("points.opacity", self.points.opacity)?;
        opacity("density.opacity", self.density.opacity)?;
        positive("highlight.label_size", self.highlight.label_size)?;
        positive("highlight.ring_width", self.highlight.ring_width)?;

        if self.font_family.trim().is_empty() {
            return Err(VinylError::config("font_family must be non-empty"));
        }

        self.glyph.validate()
    }
}

fn positive(name: &str, v: f64) -> VinylResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(VinylError::config(format!("{name} must be > 0 (got {v})")))
    }
}

fn opacity(name: &str, v: f64) -> VinylResult<()> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(VinylError::config(format!(
            "{name} must be within 0..=1 (got {v})"
        )))
    }
}

fn in_domain(name: &str, v: f64, d: Domain) -> VinylResult<()> {
    if d.contains(v) {
        Ok(())
    } else {
        Err(VinylError::config(format!(
            "{name} = {v} is outside [{}, {}]",
            d.min, d.max
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/design/config.rs"]
mod tests;
