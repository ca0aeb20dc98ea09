//! Placement of repel-flagged text labels.
//!
//! Layout runs in canvas pixels after the polar mapping. Labels are treated as axis-aligned
//! boxes and data markers as circles.

use kurbo::{Circle, Point, Rect, Size, Vec2};

/// A label to place: its mapped anchor and measured box size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelBox {
    /// Preferred center of the box, in pixels.
    pub anchor: Point,
    /// Box size in pixels.
    pub size: Size,
}

impl LabelBox {
    fn rect_at(&self, center: Point, pad: f64) -> Rect {
        Rect::from_center_size(center, self.size).inflate(pad, pad)
    }
}

/// Line height used for multi-line text, in em.
pub const LINE_HEIGHT_EM: f64 = 1.2;

/// Strategy that moves labels off each other and off data markers.
pub trait LabelLayout {
    /// Return one resolved box center per label, in input order.
    fn place(&self, labels: &[LabelBox], obstacles: &[Circle], bounds: Rect) -> Vec<Point>;
}

/// Leaves every label on its anchor.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedLayout;

impl LabelLayout for FixedLayout {
    fn place(&self, labels: &[LabelBox], _obstacles: &[Circle], _bounds: Rect) -> Vec<Point> {
        labels.iter().map(|l| l.anchor).collect()
    }
}

/// Iterative force-based overlap removal.
///
/// Each round pushes overlapping label pairs apart along the line between their centers, pushes
/// labels out of obstacle circles, and pulls every label back towards its anchor with a weak
/// spring. Boxes stay inside the bounds. The result depends only on the inputs.
#[derive(Clone, Copy, Debug)]
pub struct RepelLayout {
    /// Maximum number of rounds.
    pub iterations: u32,
    /// Extra gap kept around every box, in pixels.
    pub padding: f64,
    /// Fraction of the distance to the anchor recovered per round.
    pub spring: f64,
    /// Fraction of the overlap resolved per round.
    pub step: f64,
}

impl Default for RepelLayout {
    fn default() -> Self {
        Self {
            iterations: 400,
            padding: 2.0,
            spring: 0.01,
            step: 0.5,
        }
    }
}

/// Deterministic push direction for coincident centers.
fn fallback_dir(i: usize) -> Vec2 {
    let golden = 2.399_963_229_728_653;
    Vec2::from_angle(i as f64 * golden)
}

fn rect_overlap(a: Rect, b: Rect) -> Option<(f64, f64)> {
    let ox = a.x1.min(b.x1) - a.x0.max(b.x0);
    let oy = a.y1.min(b.y1) - a.y0.max(b.y0);
    (ox > 0.0 && oy > 0.0).then_some((ox, oy))
}

/// Push needed to move `r` out of circle `c`, if they intersect.
fn circle_push(r: Rect, c: &Circle, i: usize) -> Option<Vec2> {
    let nearest = Point::new(c.center.x.clamp(r.x0, r.x1), c.center.y.clamp(r.y0, r.y1));
    let d = nearest - c.center;
    let dist = d.hypot();
    if dist >= c.radius {
        return None;
    }
    if dist > 1e-9 {
        return Some(d * ((c.radius - dist) / dist));
    }
    // Circle center inside the box: push the box center away from the circle center.
    let away = r.center() - c.center;
    let dir = if away.hypot() > 1e-9 {
        away.normalize()
    } else {
        fallback_dir(i)
    };
    let reach = c.radius + 0.5 * r.width().min(r.height());
    Some(dir * reach)
}

fn clamp_center(center: Point, size: Size, bounds: Rect) -> Point {
    let hw = (size.width * 0.5).min(bounds.width() * 0.5);
    let hh = (size.height * 0.5).min(bounds.height() * 0.5);
    Point::new(
        center.x.clamp(bounds.x0 + hw, bounds.x1 - hw),
        center.y.clamp(bounds.y0 + hh, bounds.y1 - hh),
    )
}

impl LabelLayout for RepelLayout {
    fn place(&self, labels: &[LabelBox], obstacles: &[Circle], bounds: Rect) -> Vec<Point> {
        let mut pos: Vec<Point> = labels
            .iter()
            .map(|l| clamp_center(l.anchor, l.size, bounds))
            .collect();
        let mut force = vec![Vec2::ZERO; labels.len()];

        for round in 0..self.iterations {
            force.iter_mut().for_each(|f| *f = Vec2::ZERO);
            let mut overlapping = false;

            for i in 0..labels.len() {
                let ri = labels[i].rect_at(pos[i], self.padding);
                for j in (i + 1)..labels.len() {
                    let rj = labels[j].rect_at(pos[j], self.padding);
                    let Some((ox, oy)) = rect_overlap(ri, rj) else {
                        continue;
                    };
                    overlapping = true;
                    let d = pos[j] - pos[i];
                    let dir = if d.hypot() > 1e-9 {
                        d.normalize()
                    } else {
                        fallback_dir(i + j)
                    };
                    let push = dir * (0.5 * ox.min(oy));
                    force[i] -= push;
                    force[j] += push;
                }
                for c in obstacles {
                    if let Some(push) = circle_push(ri, c, i) {
                        overlapping = true;
                        force[i] += push;
                    }
                }
            }

            if !overlapping {
                tracing::debug!(rounds = round, "label layout settled");
                break;
            }

            for (i, l) in labels.iter().enumerate() {
                let pull = (l.anchor - pos[i]) * self.spring;
                let next = pos[i] + force[i] * self.step + pull;
                pos[i] = clamp_center(next, l.size, bounds);
            }
        }
        pos
    }
}

/// Closest point of `rect` to `p`; where a leader line from `p` meets its label.
pub fn leader_end(rect: Rect, p: Point) -> Point {
    Point::new(p.x.clamp(rect.x0, rect.x1), p.y.clamp(rect.y0, rect.y1))
}

#[cfg(test)]
#[path = "../../tests/unit/render/labels.rs"]
mod tests;
