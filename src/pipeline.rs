use std::path::Path;

use crate::compose::composer::compose;
use crate::compose::primitive::DrawProgram;
use crate::data::load::{DataSource, load_songs};
use crate::data::record::SongRecord;
use crate::design::config::DesignConfig;
use crate::foundation::error::VinylResult;
use crate::geometry::transform::{DerivedRecord, derive, highlights};
use crate::render::RenderOpts;
use crate::render::export::{OutputFormat, export};
use crate::render::labels::{FixedLayout, LabelLayout, RepelLayout};

/// Derived records plus the drawing program built from them.
#[derive(Clone, Debug)]
pub struct Chart {
    /// Every record with its ordinal and glyph size, ascending rank.
    pub derived: Vec<DerivedRecord>,
    /// Ordered primitives ready for rendering.
    pub program: DrawProgram,
}

/// What a [`run`] produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of songs drawn.
    pub records: usize,
    /// Number of highlighted songs.
    pub highlights: usize,
    /// Number of primitives rendered.
    pub primitives: usize,
    /// Format written.
    pub format: OutputFormat,
}

/// Derive geometry and compose the drawing program for `songs`.
pub fn build_chart(songs: &[SongRecord], design: &DesignConfig) -> VinylResult<Chart> {
    let derived = derive(songs, design.glyph)?;
    let top = highlights(&derived);
    for d in &top {
        tracing::info!(
            rank = d.rank(),
            year = d.release_year(),
            artist = %d.song.artist,
            title = %d.song.title,
            "highlight"
        );
    }
    let program = compose(&derived, &top, design)?;
    Ok(Chart { derived, program })
}

/// Load, derive, compose and export in one pass.
#[tracing::instrument(skip(design, opts), fields(source = %source, out = %out.display()))]
pub fn run(
    source: &DataSource,
    design: &DesignConfig,
    opts: &RenderOpts,
    out: &Path,
) -> VinylResult<RunSummary> {
    let songs = load_songs(source)?;
    let chart = build_chart(&songs, design)?;

    let repel = RepelLayout::default();
    let layout: &dyn LabelLayout = if opts.repel { &repel } else { &FixedLayout };
    let format = export(&chart.program, opts, layout, out)?;

    Ok(RunSummary {
        records: chart.derived.len(),
        highlights: highlights(&chart.derived).len(),
        primitives: chart.program.len(),
        format,
    })
}
