use crate::foundation::error::{VinylError, VinylResult};

pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Closed numeric interval `[min, max]` with `min < max`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Domain {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Domain {
    /// Interval from `min` to `max`. Bounds are checked by [`Domain::validate`].
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Check bounds are finite and strictly ordered. `what` names the domain in the error.
    pub fn validate(self, what: &str) -> VinylResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(VinylError::config(format!("{what} bounds must be finite")));
        }
        if self.min >= self.max {
            return Err(VinylError::config(format!(
                "{what} must have min < max (got [{}, {}])",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Width of the interval.
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Map `v` to `0..1` relative to the bounds. Values outside the domain are not clamped.
    pub fn normalize(self, v: f64) -> f64 {
        (v - self.min) / self.span()
    }

    /// Return `true` when `v` lies inside the closed interval.
    pub fn contains(self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }

    /// Return `true` when `inner` fits inside `self`.
    pub fn encloses(self, inner: Domain) -> bool {
        self.contains(inner.min) && self.contains(inner.max)
    }
}

/// Clamp scalar value to normalized range `[0, 1]`.
#[inline]
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Convert a typographic point size into pixels at `dpi`.
#[inline]
pub fn pt_to_px(pt: f64, dpi: f64) -> f64 {
    pt * dpi / 72.0
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
