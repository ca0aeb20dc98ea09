//! Data-to-geometry transform: within-year ordinals and rank-scaled glyph sizes.

use std::collections::{BTreeMap, BTreeSet};

use crate::data::record::SongRecord;
use crate::foundation::error::{VinylError, VinylResult};

/// Records with a rank strictly below this are highlighted.
pub const HIGHLIGHT_RANK_LIMIT: u32 = 11;

/// Pre-scale sizes below this suggest the constants do not fit the dataset size.
const CALIBRATION_FLOOR: f64 = 2.0;

/// Constants of `size = (base + slope * ln(rank)) / scale`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlyphScale {
    /// Size of rank 1 before scaling.
    pub base: f64,
    /// Log-rank coefficient; negative so size shrinks with rank.
    pub slope: f64,
    /// Divisor applied last.
    pub scale: f64,
}

impl Default for GlyphScale {
    fn default() -> Self {
        Self {
            base: 40.0,
            slope: -5.26,
            scale: 1.8,
        }
    }
}

impl GlyphScale {
    /// Reference constants with a custom divisor.
    pub fn with_scale(scale: f64) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    /// Check the constants describe a positive, strictly decreasing size curve.
    pub fn validate(self) -> VinylResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(VinylError::config(format!(
                "glyph scale must be finite and > 0 (got {})",
                self.scale
            )));
        }
        if !self.base.is_finite() || self.base <= 0.0 {
            return Err(VinylError::config("glyph base must be finite and > 0"));
        }
        if !self.slope.is_finite() || self.slope >= 0.0 {
            return Err(VinylError::config("glyph slope must be finite and < 0"));
        }
        Ok(())
    }

    fn unscaled(self, rank: u32) -> f64 {
        self.base + self.slope * f64::from(rank).ln()
    }

    /// Glyph size for `rank`. Fails for rank 0 and for ranks past the curve's zero crossing.
    pub fn size_for_rank(self, rank: u32) -> VinylResult<f64> {
        if rank == 0 {
            return Err(VinylError::data("rank must be >= 1"));
        }
        let size = self.unscaled(rank) / self.scale;
        if size <= 0.0 || !size.is_finite() {
            return Err(VinylError::data(format!(
                "rank {rank} is past the glyph size range (size {size:.4} <= 0)"
            )));
        }
        Ok(size)
    }
}

/// A song record with its derived drawing coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DerivedRecord {
    /// Source record.
    #[serde(flatten)]
    pub song: SongRecord,
    /// 1-based position among songs of the same release year, least popular first.
    pub ordinal_in_year: u32,
    /// Marker size in points; strictly decreasing in rank.
    pub glyph_size: f64,
}

impl DerivedRecord {
    /// Popularity rank of the underlying song.
    pub fn rank(&self) -> u32 {
        self.song.rank
    }

    /// Release year of the underlying song.
    pub fn release_year(&self) -> i32 {
        self.song.release_year
    }
}

/// Derive ordinals and glyph sizes for every record.
///
/// Within a release year, records are visited in descending rank order and numbered from 1, so
/// the most popular song of a year sits on the outermost ordinal. Output is sorted by ascending
/// rank regardless of input order.
#[tracing::instrument(skip(records), fields(count = records.len()))]
pub fn derive(records: &[SongRecord], scale: GlyphScale) -> VinylResult<Vec<DerivedRecord>> {
    scale.validate()?;

    let mut seen = BTreeSet::new();
    for r in records {
        if r.rank == 0 {
            return Err(VinylError::data(format!(
                "'{}' has non-positive rank 0",
                r.title
            )));
        }
        if !seen.insert(r.rank) {
            return Err(VinylError::data(format!("duplicate rank {}", r.rank)));
        }
    }

    let mut by_rank: Vec<&SongRecord> = records.iter().collect();
    by_rank.sort_by_key(|r| r.rank);

    let mut next_ordinal = BTreeMap::<i32, u32>::new();
    let mut out = Vec::with_capacity(by_rank.len());
    for song in by_rank.iter().rev() {
        let ordinal = next_ordinal.entry(song.release_year).or_insert(0);
        *ordinal += 1;
        out.push(DerivedRecord {
            song: (*song).clone(),
            ordinal_in_year: *ordinal,
            glyph_size: scale.size_for_rank(song.rank)?,
        });
    }
    out.reverse();

    if let Some(worst) = out.last() {
        let unscaled = scale.unscaled(worst.rank());
        if unscaled < CALIBRATION_FLOOR {
            tracing::warn!(
                rank = worst.rank(),
                unscaled,
                "smallest glyph is below the calibrated size range; constants may not fit this dataset"
            );
        }
    }
    if let Some((year, count)) = next_ordinal.iter().max_by_key(|(_, n)| **n) {
        tracing::debug!(
            years = next_ordinal.len(),
            busiest_year = year,
            busiest_count = count,
            "derived ordinals"
        );
    }

    Ok(out)
}

/// The top-ranked subset (`rank < 11`), in ascending rank order.
pub fn highlights(derived: &[DerivedRecord]) -> Vec<&DerivedRecord> {
    let mut out: Vec<&DerivedRecord> = derived
        .iter()
        .filter(|d| d.rank() < HIGHLIGHT_RANK_LIMIT)
        .collect();
    out.sort_by_key(|d| d.rank());
    out
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/transform.rs"]
mod tests;
