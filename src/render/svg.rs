//! SVG serialization of a [`DrawProgram`].

use std::fmt::Write as _;

use kurbo::{Circle, Point, Rect, Size};

use crate::compose::primitive::{
    DrawProgram, Layer, LayerPrimitive, PointPrim, RectPrim, SegmentPrim, TextAnchor, TextPrim,
};
use crate::foundation::error::{VinylError, VinylResult};
use crate::render::RenderOpts;
use crate::render::labels::{FixedLayout, LINE_HEIGHT_EM, LabelBox, LabelLayout, leader_end};
use crate::render::polar::PolarMapping;
use crate::render::raster::build_fontdb;
use crate::render::text::TextMeasure;

/// Leader lines are drawn once a label moved further than this many line heights.
const LEADER_MIN_LINES: f64 = 0.5;
/// Leader line width in points.
const LEADER_WIDTH_PT: f64 = 0.4;

#[derive(Clone, Copy, Debug)]
struct PlacedLabel {
    center: Point,
    size: Size,
    anchor_px: Point,
}

/// Render `program` to an SVG document.
#[tracing::instrument(skip_all, fields(items = program.len()))]
pub fn render_svg(
    program: &DrawProgram,
    opts: &RenderOpts,
    layout: &dyn LabelLayout,
) -> VinylResult<String> {
    opts.validate()?;
    let side = f64::from(opts.canvas_px());
    let mapping = PolarMapping::new(program.polar, side, side, opts.outer_fraction);

    let placed = if opts.repel {
        place_labels(program, &mapping, opts, layout)
    } else {
        place_labels(program, &mapping, opts, &FixedLayout)
    };

    let mut out = String::with_capacity(64 * program.len() + 256);
    write_document(&mut out, program, &mapping, opts, &placed)
        .map_err(|e| VinylError::render(format!("format svg: {e}")))?;
    tracing::debug!(bytes = out.len(), "svg written");
    Ok(out)
}

fn box_center(anchor_px: Point, size: Size, anchor: TextAnchor) -> Point {
    match anchor {
        TextAnchor::Start => Point::new(anchor_px.x + size.width * 0.5, anchor_px.y),
        TextAnchor::Middle => anchor_px,
        TextAnchor::End => Point::new(anchor_px.x - size.width * 0.5, anchor_px.y),
    }
}

fn place_labels(
    program: &DrawProgram,
    mapping: &PolarMapping,
    opts: &RenderOpts,
    layout: &dyn LabelLayout,
) -> Vec<Option<PlacedLabel>> {
    let px = opts.px_per_pt();
    let mut slots = Vec::new();
    let mut boxes = Vec::new();
    let mut obstacles = Vec::<Circle>::new();
    let mut measure: Option<TextMeasure> = None;

    for (i, item) in program.items.iter().enumerate() {
        match &item.primitive {
            LayerPrimitive::Text(t) if t.repel => {
                let m = measure.get_or_insert_with(|| {
                    TextMeasure::new(&build_fontdb(&opts.font_dirs), &program.font_family)
                });
                let anchor_px = mapping.map(t.at);
                let size = m.measure(&t.text, t.size * px);
                slots.push(i);
                boxes.push(LabelBox {
                    anchor: box_center(anchor_px, size, t.anchor),
                    size,
                });
            }
            LayerPrimitive::Point(p)
                if !item.layer.is_decoration() && item.layer != Layer::Density =>
            {
                obstacles.push(mapping.circle(p.at, (p.size + p.stroke_width) * px));
            }
            _ => {}
        }
    }

    let mut placed = vec![None; program.len()];
    if boxes.is_empty() {
        return placed;
    }

    let side = f64::from(opts.canvas_px());
    let centers = layout.place(&boxes, &obstacles, Rect::new(0.0, 0.0, side, side));
    for ((slot, b), center) in slots.into_iter().zip(&boxes).zip(centers) {
        let LayerPrimitive::Text(t) = &program.items[slot].primitive else {
            continue;
        };
        placed[slot] = Some(PlacedLabel {
            center,
            size: b.size,
            anchor_px: mapping.map(t.at),
        });
    }
    tracing::debug!(
        labels = boxes.len(),
        obstacles = obstacles.len(),
        family = measure.as_ref().and_then(|m| m.family()).unwrap_or("<none>"),
        "placed labels"
    );
    placed
}

fn write_document(
    out: &mut String,
    program: &DrawProgram,
    mapping: &PolarMapping,
    opts: &RenderOpts,
    placed: &[Option<PlacedLabel>],
) -> std::fmt::Result {
    let side = opts.canvas_px();
    let px = opts.px_per_pt();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{side}" height="{side}" viewBox="0 0 {side} {side}">"#
    )?;
    writeln!(
        out,
        r#"<rect width="{side}" height="{side}" fill="{}" fill-opacity="{:.3}"/>"#,
        program.background.svg_rgb(),
        program.background.alpha()
    )?;

    let mut current: Option<Layer> = None;
    for (i, item) in program.items.iter().enumerate() {
        if current != Some(item.layer) {
            if current.is_some() {
                writeln!(out, "</g>")?;
            }
            writeln!(out, r#"<g id="{}">"#, item.layer.name())?;
            current = Some(item.layer);
        }
        match &item.primitive {
            LayerPrimitive::Rect(r) => write_rect(out, mapping, r)?,
            LayerPrimitive::Segment(s) => write_segment(out, mapping, s, px)?,
            LayerPrimitive::Point(p) => write_point(out, mapping, p, px)?,
            LayerPrimitive::Text(t) => {
                write_text(out, mapping, t, placed[i], &program.font_family, px)?
            }
        }
    }
    if current.is_some() {
        writeln!(out, "</g>")?;
    }
    writeln!(out, "</svg>")
}

fn write_rect(out: &mut String, mapping: &PolarMapping, r: &RectPrim) -> std::fmt::Result {
    writeln!(
        out,
        r#"<path d="{}" fill="{}" fill-opacity="{:.4}" fill-rule="evenodd"/>"#,
        mapping.rect_path(r).to_svg(),
        r.fill.svg_rgb(),
        r.fill.alpha() * r.opacity
    )
}

fn write_segment(
    out: &mut String,
    mapping: &PolarMapping,
    s: &SegmentPrim,
    px: f64,
) -> std::fmt::Result {
    writeln!(
        out,
        r#"<path d="{}" fill="none" stroke="{}" stroke-width="{:.3}" stroke-opacity="{:.4}"/>"#,
        mapping.segment_path(s.from, s.to).to_svg(),
        s.stroke.svg_rgb(),
        s.width * px,
        s.stroke.alpha() * s.opacity
    )
}

fn write_point(out: &mut String, mapping: &PolarMapping, p: &PointPrim, px: f64) -> std::fmt::Result {
    let c = mapping.circle(p.at, p.size * px);
    write!(
        out,
        r#"<circle cx="{:.3}" cy="{:.3}" r="{:.3}""#,
        c.center.x, c.center.y, c.radius
    )?;
    match p.fill {
        Some(fill) => write!(
            out,
            r#" fill="{}" fill-opacity="{:.4}""#,
            fill.svg_rgb(),
            fill.alpha() * p.opacity
        )?,
        None => write!(out, r#" fill="none""#)?,
    }
    if let Some(stroke) = p.stroke {
        write!(
            out,
            r#" stroke="{}" stroke-width="{:.3}" stroke-opacity="{:.4}""#,
            stroke.svg_rgb(),
            p.stroke_width * px,
            stroke.alpha() * p.opacity
        )?;
    }
    writeln!(out, "/>")
}

fn write_text(
    out: &mut String,
    mapping: &PolarMapping,
    t: &TextPrim,
    placed: Option<PlacedLabel>,
    font_family: &str,
    px: f64,
) -> std::fmt::Result {
    let font_px = t.size * px;
    let line_h = font_px * LINE_HEIGHT_EM;

    let (x, cy) = match placed {
        Some(p) => {
            let moved = (p.center - box_center(p.anchor_px, p.size, t.anchor)).hypot();
            if moved > LEADER_MIN_LINES * line_h {
                let rect = Rect::from_center_size(p.center, p.size);
                let end = leader_end(rect, p.anchor_px);
                writeln!(
                    out,
                    r#"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" stroke="{}" stroke-width="{:.3}" stroke-opacity="{:.4}"/>"#,
                    p.anchor_px.x,
                    p.anchor_px.y,
                    end.x,
                    end.y,
                    t.color.svg_rgb(),
                    LEADER_WIDTH_PT * px,
                    t.color.alpha() * 0.8
                )?;
            }
            let x = match t.anchor {
                TextAnchor::Start => p.center.x - p.size.width * 0.5,
                TextAnchor::Middle => p.center.x,
                TextAnchor::End => p.center.x + p.size.width * 0.5,
            };
            (x, p.center.y)
        }
        None => {
            let at = mapping.map(t.at);
            (at.x, at.y)
        }
    };

    let anchor = match t.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    write!(
        out,
        r#"<text font-family="{}" font-size="{:.3}" fill="{}" fill-opacity="{:.4}" text-anchor="{anchor}" dominant-baseline="central""#,
        escape(font_family),
        font_px,
        t.color.svg_rgb(),
        t.color.alpha()
    )?;
    if t.bold {
        write!(out, r#" font-weight="bold""#)?;
    }
    write!(out, ">")?;

    let lines: Vec<&str> = t.text.split('\n').collect();
    let y0 = cy - (lines.len() as f64 - 1.0) * line_h * 0.5;
    for (k, line) in lines.iter().enumerate() {
        write!(
            out,
            r#"<tspan x="{x:.3}" y="{:.3}">{}</tspan>"#,
            y0 + k as f64 * line_h,
            escape(line)
        )?;
    }
    writeln!(out, "</text>")
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
