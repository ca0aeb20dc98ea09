//! Vinyl renders a ranked song list as a polar "vinyl record" chart.
//!
//! Release year maps to angle (one turn around the record) and the per-year ordinal maps to
//! radius, so each year grows a spoke of stacked glyphs. The pipeline is:
//!
//! - Load [`SongRecord`]s from CSV
//! - [`derive`] per-year ordinals and rank-scaled glyph sizes
//! - [`compose`] an ordered [`DrawProgram`] of layered primitives
//! - Render it to SVG or PNG with [`export`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod compose;
pub(crate) mod data;
pub(crate) mod design;
pub(crate) mod geometry;
/// Load-to-export orchestration.
pub mod pipeline;
pub(crate) mod render;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{BezPath, Domain, Point, Rect, Vec2, clamp01, pt_to_px};
pub use crate::foundation::error::{VinylError, VinylResult};

pub use crate::data::load::{DataSource, load_songs, load_songs_from_path, parse_songs_csv};
pub use crate::data::record::SongRecord;
pub use crate::geometry::transform::{
    DerivedRecord, GlyphScale, HIGHLIGHT_RANK_LIMIT, derive, highlights,
};

pub use crate::design::config::{
    BandSpec, CenterHoleSpec, DensitySpec, DesignConfig, GradientSpec, GrooveSpec, HighlightSpec,
    Palette, PointSpec, PolarSpec, RadialAxisSpec, TitleSpec, YearTickSpec,
};

pub use crate::compose::composer::{compose, highlight_label};
pub use crate::compose::primitive::{
    DrawItem, DrawProgram, Layer, LayerPrimitive, PointPrim, RectPrim, SegmentPrim, TextAnchor,
    TextPrim,
};

pub use crate::render::RenderOpts;
pub use crate::render::export::{OutputFormat, export};
pub use crate::render::labels::{
    FixedLayout, LINE_HEIGHT_EM, LabelBox, LabelLayout, RepelLayout, leader_end,
};
pub use crate::render::text::TextMeasure;
pub use crate::render::polar::PolarMapping;
pub use crate::render::raster::{RasterImage, build_fontdb, rasterize_svg, write_png};
pub use crate::render::svg::render_svg;

pub use crate::pipeline::{Chart, RunSummary, build_chart, run};
