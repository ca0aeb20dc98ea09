use std::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{Arc, BezPath, Circle, Point, Shape as _, Vec2};

use crate::compose::primitive::RectPrim;
use crate::design::config::PolarSpec;

/// Flattening tolerance for arcs and circles, in pixels.
pub const TOLERANCE: f64 = 0.05;

/// Data-space angular steps finer than this (radians) are not subdivided further.
const MUNCH_STEP: f64 = TAU / 360.0;

/// Maps data coordinates onto canvas pixels.
///
/// `x` becomes the angle, measured clockwise from 12 o'clock, with the angle domain covering one
/// full turn. `y` becomes the distance from the center; the low end of the radius domain sits
/// on the center and values below it are clamped there.
#[derive(Clone, Copy, Debug)]
pub struct PolarMapping {
    spec: PolarSpec,
    center: Point,
    outer_radius: f64,
}

impl PolarMapping {
    /// Mapping for a `width x height` pixel canvas whose outer data radius spans
    /// `outer_fraction` of the shorter side.
    pub fn new(spec: PolarSpec, width: f64, height: f64, outer_fraction: f64) -> Self {
        Self {
            spec,
            center: Point::new(width * 0.5, height * 0.5),
            outer_radius: width.min(height) * outer_fraction,
        }
    }

    /// Clockwise angle from 12 o'clock, in radians.
    pub fn theta(&self, x: f64) -> f64 {
        self.spec.angle.normalize(x) * TAU
    }

    /// Distance from the center, in pixels.
    pub fn radius(&self, y: f64) -> f64 {
        (self.spec.radius.normalize(y) * self.outer_radius).max(0.0)
    }

    /// Map a data point to canvas pixels.
    pub fn map(&self, p: Point) -> Point {
        self.at(self.theta(p.x), self.radius(p.y))
    }

    fn at(&self, theta: f64, r: f64) -> Point {
        self.center + Vec2::new(r * theta.sin(), -r * theta.cos())
    }

    fn arc(&self, r: f64, theta0: f64, sweep: f64) -> Arc {
        Arc {
            center: self.center,
            radii: Vec2::new(r, r),
            start_angle: theta0 - FRAC_PI_2,
            sweep_angle: sweep,
            x_rotation: 0.0,
        }
    }

    /// Filled outline of a data rectangle: an annular sector, or an annulus / disc when the
    /// rectangle spans the full angle domain. Fill with the even-odd rule.
    pub fn rect_path(&self, rect: &RectPrim) -> BezPath {
        let (x0, x1) = ordered(rect.x0, rect.x1);
        let (y0, y1) = ordered(rect.y0, rect.y1);
        let theta0 = self.theta(x0);
        let sweep = self.theta(x1) - theta0;
        let r_in = self.radius(y0);
        let r_out = self.radius(y1);

        if sweep >= TAU - 1e-9 {
            let mut path = Circle::new(self.center, r_out).to_path(TOLERANCE);
            if r_in > 0.0 {
                path.extend(Circle::new(self.center, r_in).path_elements(TOLERANCE));
            }
            return path;
        }

        let mut path = BezPath::new();
        path.move_to(self.at(theta0, r_out));
        path.extend(self.arc(r_out, theta0, sweep).append_iter(TOLERANCE));
        if r_in > 0.0 {
            path.line_to(self.at(theta0 + sweep, r_in));
            path.extend(self.arc(r_in, theta0 + sweep, -sweep).append_iter(TOLERANCE));
        } else {
            path.line_to(self.center);
        }
        path.close_path();
        path
    }

    /// Stroke outline of a data segment. Constant-radius segments become exact arcs (a full
    /// circle when they span the whole angle domain), constant-angle segments stay straight, and
    /// anything else is subdivided before mapping.
    pub fn segment_path(&self, from: Point, to: Point) -> BezPath {
        let theta0 = self.theta(from.x);
        let sweep = self.theta(to.x) - theta0;

        if from.y == to.y {
            let r = self.radius(from.y);
            if sweep.abs() >= TAU - 1e-9 {
                return Circle::new(self.center, r).to_path(TOLERANCE);
            }
            let mut path = BezPath::new();
            path.move_to(self.at(theta0, r));
            path.extend(self.arc(r, theta0, sweep).append_iter(TOLERANCE));
            return path;
        }

        let mut path = BezPath::new();
        path.move_to(self.map(from));
        if from.x == to.x {
            path.line_to(self.map(to));
            return path;
        }

        let steps = ((sweep.abs() / MUNCH_STEP).ceil() as usize).max(2);
        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            path.line_to(self.map(from.lerp(to, t)));
        }
        path
    }

    /// Pixel circle for a marker of `diameter_px` centered on data point `at`.
    pub fn circle(&self, at: Point, diameter_px: f64) -> Circle {
        Circle::new(self.map(at), diameter_px * 0.5)
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
#[path = "../../tests/unit/render/polar.rs"]
mod tests;
