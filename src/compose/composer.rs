//! Builds the ordered drawing program for the vinyl chart.
//!
//! Layers are emitted in a fixed order so that later layers paint over earlier ones: the two
//! background bands, the edge light, grooves, axis text, center hole, titles and year guides
//! come first, and only then the four data layers.

use kurbo::Point;

use crate::compose::primitive::{
    DrawItem, DrawProgram, Layer, LayerPrimitive, PointPrim, RectPrim, SegmentPrim, TextAnchor,
    TextPrim,
};
use crate::design::config::DesignConfig;
use crate::foundation::color::Color;
use crate::foundation::error::VinylResult;
use crate::geometry::transform::DerivedRecord;

struct ProgramBuilder {
    layer: Layer,
    items: Vec<DrawItem>,
}

impl ProgramBuilder {
    fn new() -> Self {
        Self {
            layer: Layer::BandLabel,
            items: Vec::new(),
        }
    }

    fn layer(&mut self, layer: Layer) -> &mut Self {
        debug_assert!(layer >= self.layer, "layers must be emitted in order");
        self.layer = layer;
        self
    }

    fn push(&mut self, primitive: LayerPrimitive) -> &mut Self {
        self.items.push(DrawItem {
            layer: self.layer,
            primitive,
        });
        self
    }

    fn rect(&mut self, x: (f64, f64), y: (f64, f64), fill: Color, opacity: f64) -> &mut Self {
        self.push(LayerPrimitive::Rect(RectPrim {
            x0: x.0,
            x1: x.1,
            y0: y.0,
            y1: y.1,
            fill,
            opacity,
        }))
    }

    fn segment(
        &mut self,
        from: Point,
        to: Point,
        stroke: Color,
        width: f64,
        opacity: f64,
    ) -> &mut Self {
        self.push(LayerPrimitive::Segment(SegmentPrim {
            from,
            to,
            stroke,
            width,
            opacity,
        }))
    }

    fn text(&mut self, text: TextPrim) -> &mut Self {
        self.push(LayerPrimitive::Text(text))
    }

    fn point(&mut self, point: PointPrim) -> &mut Self {
        self.push(LayerPrimitive::Point(point))
    }

    fn count(&self, layer: Layer) -> usize {
        self.items.iter().filter(|i| i.layer == layer).count()
    }

    fn finish(self, design: &DesignConfig) -> DrawProgram {
        DrawProgram {
            polar: design.polar,
            background: design.palette.background,
            font_family: design.font_family.clone(),
            items: self.items,
        }
    }
}

/// Compose the full drawing program.
///
/// `highlights` is expected to be the top-ranked subset of `derived`. With no records the program
/// holds decoration only.
#[tracing::instrument(skip_all, fields(records = derived.len(), highlights = highlights.len()))]
pub fn compose(
    derived: &[DerivedRecord],
    highlights: &[&DerivedRecord],
    design: &DesignConfig,
) -> VinylResult<DrawProgram> {
    design.validate()?;

    let mut b = ProgramBuilder::new();
    background_bands(&mut b, design);
    edge_gradient(&mut b, design);
    grooves(&mut b, design)?;
    radial_axis(&mut b, design);
    center_hole(&mut b, design);
    titles(&mut b, design);
    angular_axis(&mut b, design);
    all_records(&mut b, derived, design);
    density(&mut b, derived, design);
    highlight_labels(&mut b, highlights, design);
    highlight_rings(&mut b, highlights, design);

    for layer in Layer::ALL {
        tracing::debug!(layer = layer.name(), items = b.count(layer), "composed layer");
    }
    Ok(b.finish(design))
}

fn background_bands(b: &mut ProgramBuilder, design: &DesignConfig) {
    let angle = design.polar.angle;
    let radius = design.polar.radius;
    let body = design.bands.body;
    let palette = &design.palette;

    b.layer(Layer::BandLabel).rect(
        (angle.min, angle.max),
        (radius.min, radius.max),
        palette.label,
        1.0,
    );
    b.layer(Layer::BandBody).rect(
        (angle.min, angle.max),
        (body.min, body.max),
        palette.body,
        1.0,
    );
}

/// Opacity of strip `i` of `steps`, linear from `max` at the record's seam down to exactly 0 at
/// the inner end of the ramp. `leading` strips start at the low end of the angle domain.
fn ramp_opacity(i: u32, steps: u32, max: f64, leading: bool) -> f64 {
    if steps <= 1 {
        return max;
    }
    let t = f64::from(i) / f64::from(steps - 1);
    if leading { max * (1.0 - t) } else { max * t }
}

fn edge_gradient(b: &mut ProgramBuilder, design: &DesignConfig) {
    let g = design.gradient;
    let angle = design.polar.angle;
    let body = design.bands.body;
    let w = g.span / f64::from(g.steps);
    let sheen = design.palette.sheen;

    b.layer(Layer::EdgeGradient);
    for i in 0..g.steps {
        let x0 = angle.min + f64::from(i) * w;
        b.rect(
            (x0, x0 + w),
            (body.min, body.max),
            sheen,
            ramp_opacity(i, g.steps, g.max_opacity, true),
        );
    }
    for i in 0..g.steps {
        let x0 = angle.max - g.span + f64::from(i) * w;
        b.rect(
            (x0, x0 + w),
            (body.min, body.max),
            sheen,
            ramp_opacity(i, g.steps, g.max_opacity, false),
        );
    }
}

fn grooves(b: &mut ProgramBuilder, design: &DesignConfig) -> VinylResult<()> {
    let gr = design.grooves;
    let angle = design.polar.angle;
    let body = design.bands.body;
    let color = design.palette.groove;

    b.layer(Layer::Grooves);
    for y in design.groove_radii()? {
        b.segment(
            Point::new(angle.min, y),
            Point::new(angle.max, y),
            color,
            gr.line_width,
            gr.opacity,
        );
    }
    for edge in [body.min, body.max] {
        b.segment(
            Point::new(angle.min, edge),
            Point::new(angle.max, edge),
            color,
            gr.edge_width,
            1.0,
        );
    }
    Ok(())
}

fn format_tick(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

fn radial_axis(b: &mut ProgramBuilder, design: &DesignConfig) {
    let ax = &design.radial_axis;
    let x = design.polar.angle.min;
    let color = design.palette.axis_text;

    b.layer(Layer::RadialAxis);
    for &t in &ax.ticks {
        b.text(TextPrim {
            at: Point::new(x, t),
            text: format_tick(t),
            color,
            size: ax.font_size,
            anchor: TextAnchor::Start,
            bold: false,
            repel: false,
        });
    }
    b.text(TextPrim {
        at: Point::new(x, ax.description_radius),
        text: ax.description.clone(),
        color,
        size: ax.font_size,
        anchor: TextAnchor::Start,
        bold: false,
        repel: false,
    });
}

fn center_hole(b: &mut ProgramBuilder, design: &DesignConfig) {
    b.layer(Layer::CenterHole).point(PointPrim {
        at: Point::new(design.polar.angle.min, design.polar.radius.min),
        size: design.center_hole.size,
        fill: Some(design.palette.background),
        stroke: None,
        stroke_width: 0.0,
        opacity: 1.0,
    });
}

fn titles(b: &mut ProgramBuilder, design: &DesignConfig) {
    let t = &design.titles;
    let color = design.palette.title_text;

    b.layer(Layer::Titles)
        .text(TextPrim {
            at: t.title_at,
            text: t.title.clone(),
            color,
            size: t.title_size,
            anchor: TextAnchor::Middle,
            bold: true,
            repel: false,
        })
        .text(TextPrim {
            at: t.subtitle_at,
            text: t.subtitle.clone(),
            color,
            size: t.subtitle_size,
            anchor: TextAnchor::Middle,
            bold: false,
            repel: false,
        });
}

fn angular_axis(b: &mut ProgramBuilder, design: &DesignConfig) {
    let yt = design.year_ticks;
    let color = design.palette.axis_text;

    b.layer(Layer::AngularAxis);
    for year in design.year_tick_values() {
        let x = f64::from(year);
        b.segment(
            Point::new(x, yt.guide.min),
            Point::new(x, yt.guide.max),
            color,
            yt.line_width,
            yt.opacity,
        )
        .text(TextPrim {
            at: Point::new(x, yt.label_radius),
            text: year.to_string(),
            color,
            size: yt.font_size,
            anchor: TextAnchor::Middle,
            bold: false,
            repel: false,
        });
    }
}

fn record_at(d: &DerivedRecord) -> Point {
    Point::new(f64::from(d.release_year()), f64::from(d.ordinal_in_year))
}

fn all_records(b: &mut ProgramBuilder, derived: &[DerivedRecord], design: &DesignConfig) {
    b.layer(Layer::AllRecords);
    for d in derived {
        b.point(PointPrim {
            at: record_at(d),
            size: design.points.size,
            fill: Some(design.palette.points),
            stroke: None,
            stroke_width: 0.0,
            opacity: design.points.opacity,
        });
    }
}

fn density(b: &mut ProgramBuilder, derived: &[DerivedRecord], design: &DesignConfig) {
    b.layer(Layer::Density);
    for d in derived {
        b.point(PointPrim {
            at: record_at(d),
            size: d.glyph_size,
            fill: Some(design.palette.points),
            stroke: None,
            stroke_width: 0.0,
            opacity: design.density.opacity,
        });
    }
}

/// Label text for a highlighted record: `"{rank}. {artist}\n{title}"`.
pub fn highlight_label(d: &DerivedRecord) -> String {
    format!("{}. {}\n{}", d.rank(), d.song.artist, d.song.title)
}

fn highlight_labels(b: &mut ProgramBuilder, highlights: &[&DerivedRecord], design: &DesignConfig) {
    b.layer(Layer::HighlightLabels);
    for d in highlights {
        let at = record_at(d);
        b.text(TextPrim {
            at: Point::new(at.x, at.y + d.glyph_size),
            text: highlight_label(d),
            color: design.palette.highlight_text,
            size: design.highlight.label_size,
            anchor: TextAnchor::Middle,
            bold: false,
            repel: true,
        });
    }
}

fn highlight_rings(b: &mut ProgramBuilder, highlights: &[&DerivedRecord], design: &DesignConfig) {
    b.layer(Layer::HighlightRings);
    for d in highlights {
        b.point(PointPrim {
            at: record_at(d),
            size: d.glyph_size,
            fill: None,
            stroke: Some(design.palette.accent),
            stroke_width: design.highlight.ring_width,
            opacity: 1.0,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composer.rs"]
mod tests;
