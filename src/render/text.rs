//! Shaped text measurement for label boxes.
//!
//! Labels are shaped with Parley against the same face usvg will pick when rasterizing, so the
//! boxes the label layout pushes around match the drawn text. Lines are stacked at
//! [`LINE_HEIGHT_EM`], the spacing the SVG writer uses for `<tspan>` rows.

use std::borrow::Cow;

use kurbo::Size;

use crate::render::labels::LINE_HEIGHT_EM;

/// Average advance used only when no font face is available at all.
const FALLBACK_ADVANCE_EM: f64 = 0.55;

/// Parley contexts plus the family name registered from the font database.
pub struct TextMeasure {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family: Option<String>,
}

impl TextMeasure {
    /// Resolve `font_family` (a CSS-style comma separated list) in `fontdb` and register the
    /// matching face with Parley.
    pub fn new(fontdb: &usvg::fontdb::Database, font_family: &str) -> Self {
        let mut font_ctx = parley::FontContext::default();
        let family = resolve_face(fontdb, font_family).and_then(|id| {
            let name = fontdb.face(id)?.families.first()?.0.clone();
            let bytes = fontdb.with_face_data(id, |data, _index| data.to_vec())?;
            font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(bytes), None);
            Some(name)
        });
        match &family {
            Some(name) => tracing::debug!(family = %name, "label font resolved"),
            None => tracing::warn!(
                requested = font_family,
                "no font face available; label boxes use an average glyph advance"
            ),
        }

        Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
        }
    }

    /// Family name used for shaping, if a face was found.
    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    /// Box of `text` at `font_px`: widest shaped line by the stacked line heights.
    pub fn measure(&mut self, text: &str, font_px: f64) -> Size {
        let lines = text.split('\n').count().max(1);
        let height = lines as f64 * font_px * LINE_HEIGHT_EM;

        let Some(family) = self.family.clone() else {
            let widest = text.split('\n').map(|l| l.chars().count()).max().unwrap_or(0);
            return Size::new(widest as f64 * font_px * FALLBACK_ADVANCE_EM, height);
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font_px as f32));
        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let width = layout
            .lines()
            .map(|line| f64::from(line.metrics().advance))
            .fold(0.0, f64::max);
        Size::new(width, height)
    }
}

fn resolve_face(fontdb: &usvg::fontdb::Database, font_family: &str) -> Option<usvg::fontdb::ID> {
    use usvg::fontdb::Family;

    let mut families: Vec<Family<'_>> = font_family
        .split(',')
        .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\''))
        .filter(|f| !f.is_empty())
        .map(|f| match f.to_ascii_lowercase().as_str() {
            "serif" => Family::Serif,
            "sans-serif" => Family::SansSerif,
            "cursive" => Family::Cursive,
            "fantasy" => Family::Fantasy,
            "monospace" => Family::Monospace,
            _ => Family::Name(f),
        })
        .collect();
    families.push(Family::SansSerif);

    let query = usvg::fontdb::Query {
        families: &families,
        weight: usvg::fontdb::Weight::NORMAL,
        stretch: usvg::fontdb::Stretch::Normal,
        style: usvg::fontdb::Style::Normal,
    };
    fontdb
        .query(&query)
        .or_else(|| fontdb.faces().next().map(|f| f.id))
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
