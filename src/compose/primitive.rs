use kurbo::Point;

use crate::design::config::PolarSpec;
use crate::foundation::color::Color;

/// The composer step that emitted a primitive, in emission order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Full-domain label band.
    BandLabel,
    /// Record body band.
    BandBody,
    /// Light falloff at the body's angular edges.
    EdgeGradient,
    /// Concentric guides and boundary rings.
    Grooves,
    /// Count-axis labels.
    RadialAxis,
    /// Center hole.
    CenterHole,
    /// Title and subtitle.
    Titles,
    /// Release-year guides and labels.
    AngularAxis,
    /// One small marker per song.
    AllRecords,
    /// One glyph-sized translucent circle per song.
    Density,
    /// Top-ten text labels.
    HighlightLabels,
    /// Top-ten rings.
    HighlightRings,
}

impl Layer {
    /// Every layer in emission order.
    pub const ALL: [Layer; 12] = [
        Layer::BandLabel,
        Layer::BandBody,
        Layer::EdgeGradient,
        Layer::Grooves,
        Layer::RadialAxis,
        Layer::CenterHole,
        Layer::Titles,
        Layer::AngularAxis,
        Layer::AllRecords,
        Layer::Density,
        Layer::HighlightLabels,
        Layer::HighlightRings,
    ];

    /// `true` for background and axis decoration, `false` for data-encoding layers.
    pub fn is_decoration(self) -> bool {
        self < Layer::AllRecords
    }

    /// Stable snake_case name, used for SVG group ids.
    pub fn name(self) -> &'static str {
        match self {
            Layer::BandLabel => "band_label",
            Layer::BandBody => "band_body",
            Layer::EdgeGradient => "edge_gradient",
            Layer::Grooves => "grooves",
            Layer::RadialAxis => "radial_axis",
            Layer::CenterHole => "center_hole",
            Layer::Titles => "titles",
            Layer::AngularAxis => "angular_axis",
            Layer::AllRecords => "all_records",
            Layer::Density => "density",
            Layer::HighlightLabels => "highlight_labels",
            Layer::HighlightRings => "highlight_rings",
        }
    }
}

/// Filled data-space rectangle `[x0, x1] x [y0, y1]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RectPrim {
    /// Angular start (year).
    pub x0: f64,
    /// Angular end (year).
    pub x1: f64,
    /// Inner radius (count).
    pub y0: f64,
    /// Outer radius (count).
    pub y1: f64,
    /// Fill color.
    pub fill: Color,
    /// Multiplied with the fill alpha.
    pub opacity: f64,
}

/// Straight data-space line. Curves once mapped to polar space.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SegmentPrim {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
    /// Line color.
    pub stroke: Color,
    /// Line width in points.
    pub width: f64,
    /// Multiplied with the stroke alpha.
    pub opacity: f64,
}

/// Circular marker.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PointPrim {
    /// Center.
    pub at: Point,
    /// Diameter in points.
    pub size: f64,
    /// Fill, `None` for a ring.
    pub fill: Option<Color>,
    /// Outline, `None` for no outline.
    pub stroke: Option<Color>,
    /// Outline width in points.
    pub stroke_width: f64,
    /// Multiplied with fill and stroke alpha.
    pub opacity: f64,
}

/// Horizontal placement of text relative to its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    /// Text starts at the anchor.
    Start,
    /// Text is centered on the anchor.
    Middle,
    /// Text ends at the anchor.
    End,
}

/// Text block; `\n` separates lines, which are centered vertically on the anchor.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextPrim {
    /// Anchor point.
    pub at: Point,
    /// Content.
    pub text: String,
    /// Text color.
    pub color: Color,
    /// Font size in points.
    pub size: f64,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Bold weight.
    pub bold: bool,
    /// Let the renderer move the label away from overlaps.
    pub repel: bool,
}

/// One drawing instruction in data space.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerPrimitive {
    /// Filled rectangle.
    Rect(RectPrim),
    /// Line.
    Segment(SegmentPrim),
    /// Marker.
    Point(PointPrim),
    /// Text.
    Text(TextPrim),
}

/// A primitive tagged with the layer that emitted it.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DrawItem {
    /// Emitting layer.
    pub layer: Layer,
    /// The instruction.
    pub primitive: LayerPrimitive,
}

/// Ordered drawing program. Later items paint over earlier ones.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DrawProgram {
    /// Coordinate mapping shared by every item.
    pub polar: PolarSpec,
    /// Canvas color behind everything.
    pub background: Color,
    /// Font family for text items.
    pub font_family: String,
    /// Items in paint order.
    pub items: Vec<DrawItem>,
}

impl DrawProgram {
    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when nothing would be drawn.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items emitted by `layer`, in order.
    pub fn layer_items(&self, layer: Layer) -> impl Iterator<Item = &LayerPrimitive> + '_ {
        self.items
            .iter()
            .filter(move |i| i.layer == layer)
            .map(|i| &i.primitive)
    }

    /// Index of the first item of `layer`.
    pub fn first_index_of(&self, layer: Layer) -> Option<usize> {
        self.items.iter().position(|i| i.layer == layer)
    }

    /// Index of the last item of `layer`.
    pub fn last_index_of(&self, layer: Layer) -> Option<usize> {
        self.items.iter().rposition(|i| i.layer == layer)
    }
}
