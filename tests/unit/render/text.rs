use super::*;
use crate::render::raster::build_fontdb;

fn system_measure() -> Option<TextMeasure> {
    let m = TextMeasure::new(&build_fontdb(&[]), "sans-serif");
    m.family().is_some().then_some(m)
}

#[test]
fn shaped_width_follows_glyph_shapes() {
    let Some(mut m) = system_measure() else {
        return;
    };
    let wide = m.measure("WWWWWWWWWW", 10.0);
    let narrow = m.measure("iiiiiiiiii", 10.0);
    assert!(wide.width > narrow.width * 1.5, "{wide:?} vs {narrow:?}");
    assert!(narrow.width > 0.0);
}

#[test]
fn width_scales_with_font_size_and_uses_widest_line() {
    let Some(mut m) = system_measure() else {
        return;
    };
    let small = m.measure("Aretha Franklin", 10.0);
    let large = m.measure("Aretha Franklin", 20.0);
    assert!((large.width / small.width - 2.0).abs() < 0.2);

    let two = m.measure("Ab\nAretha Franklin", 10.0);
    assert!((two.width - small.width).abs() < 0.5);
}

#[test]
fn height_stacks_lines_at_tspan_spacing() {
    let mut m = TextMeasure::new(&build_fontdb(&[]), "sans-serif");
    let one = m.measure("1. Aretha Franklin", 10.0);
    let two = m.measure("1. Aretha Franklin\nRespect", 10.0);
    assert!((one.height - 10.0 * LINE_HEIGHT_EM).abs() < 1e-9);
    assert!((two.height - 20.0 * LINE_HEIGHT_EM).abs() < 1e-9);
}

#[test]
fn empty_font_database_falls_back_to_average_advance() {
    let db = usvg::fontdb::Database::new();
    let mut m = TextMeasure::new(&db, "Nope Sans");
    assert!(m.family().is_none());
    let s = m.measure("ab\nabcd", 10.0);
    assert!((s.width - 4.0 * 10.0 * FALLBACK_ADVANCE_EM).abs() < 1e-9);
    assert!((s.height - 2.0 * 10.0 * LINE_HEIGHT_EM).abs() < 1e-9);
}
