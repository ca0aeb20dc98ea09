use super::*;
use crate::data::record::SongRecord;
use crate::foundation::core::Domain;
use crate::geometry::transform::{GlyphScale, derive, highlights};

fn derived_sample(n: u32) -> Vec<DerivedRecord> {
    let songs: Vec<_> = (1..=n)
        .map(|r| SongRecord::new(r, format!("Song {r}"), format!("Artist {r}"), 1960 + (r % 40) as i32))
        .collect();
    derive(&songs, GlyphScale::default()).unwrap()
}

fn compose_n(n: u32) -> DrawProgram {
    let derived = derived_sample(n);
    let top = highlights(&derived);
    compose(&derived, &top, &DesignConfig::reference()).unwrap()
}

#[test]
fn layers_appear_in_emission_order() {
    let program = compose_n(50);
    let mut last = Layer::BandLabel;
    for item in &program.items {
        assert!(item.layer >= last, "{:?} after {:?}", item.layer, last);
        last = item.layer;
    }
    for layer in Layer::ALL {
        assert!(program.first_index_of(layer).is_some(), "{layer:?} missing");
    }
}

#[test]
fn data_ink_follows_all_decoration() {
    let program = compose_n(120);
    let last_decoration = program
        .items
        .iter()
        .rposition(|i| i.layer.is_decoration())
        .unwrap();
    let first_data = program
        .items
        .iter()
        .position(|i| !i.layer.is_decoration())
        .unwrap();
    assert!(first_data > last_decoration);
    assert!(program.first_index_of(Layer::HighlightLabels) > program.last_index_of(Layer::Density));
    assert!(program.first_index_of(Layer::HighlightRings) > program.last_index_of(Layer::Density));
}

#[test]
fn empty_input_yields_decoration_only() {
    let program = compose(&[], &[], &DesignConfig::reference()).unwrap();
    assert!(!program.is_empty());
    assert!(program.items.iter().all(|i| i.layer.is_decoration()));
}

#[test]
fn one_point_per_record_in_both_point_layers() {
    let program = compose_n(37);
    assert_eq!(program.layer_items(Layer::AllRecords).count(), 37);
    assert_eq!(program.layer_items(Layer::Density).count(), 37);
    assert_eq!(program.layer_items(Layer::HighlightLabels).count(), 10);
    assert_eq!(program.layer_items(Layer::HighlightRings).count(), 10);
}

#[test]
fn density_points_use_glyph_size() {
    let derived = derived_sample(12);
    let top = highlights(&derived);
    let program = compose(&derived, &top, &DesignConfig::reference()).unwrap();
    let sizes: Vec<f64> = program
        .layer_items(Layer::Density)
        .map(|p| match p {
            LayerPrimitive::Point(p) => p.size,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    let expected: Vec<f64> = derived.iter().map(|d| d.glyph_size).collect();
    assert_eq!(sizes, expected);
}

#[test]
fn highlight_labels_sit_above_their_glyph() {
    let derived = derived_sample(10);
    let top = highlights(&derived);
    let program = compose(&derived, &top, &DesignConfig::reference()).unwrap();
    let first = program.layer_items(Layer::HighlightLabels).next().unwrap();
    let LayerPrimitive::Text(t) = first else {
        panic!("expected text");
    };
    let d = top[0];
    assert_eq!(t.text, "1. Artist 1\nSong 1");
    assert!(t.repel);
    assert_eq!(t.at.x, f64::from(d.release_year()));
    assert!((t.at.y - (f64::from(d.ordinal_in_year) + d.glyph_size)).abs() < 1e-12);
}

#[test]
fn rings_are_unfilled_with_accent_stroke() {
    let program = compose_n(15);
    let design = DesignConfig::reference();
    for p in program.layer_items(Layer::HighlightRings) {
        let LayerPrimitive::Point(p) = p else {
            panic!("expected point");
        };
        assert!(p.fill.is_none());
        assert_eq!(p.stroke, Some(design.palette.accent));
    }
}

#[test]
fn gradient_ramps_are_monotonic_and_meet_at_the_seam() {
    let program = compose(&[], &[], &DesignConfig::reference()).unwrap();
    let rects: Vec<&RectPrim> = program
        .layer_items(Layer::EdgeGradient)
        .filter_map(|p| match p {
            LayerPrimitive::Rect(r) => Some(r),
            _ => None,
        })
        .collect();
    let steps = DesignConfig::reference().gradient.steps as usize;
    assert_eq!(rects.len(), steps * 2);
    let (lead, trail) = rects.split_at(steps);
    assert!(lead.windows(2).all(|w| w[0].opacity > w[1].opacity));
    assert!(trail.windows(2).all(|w| w[0].opacity < w[1].opacity));
    assert!(lead.windows(2).all(|w| (w[0].x1 - w[1].x0).abs() < 1e-9));
    assert_eq!(lead[0].x0, 1955.0);
    assert!((trail[steps - 1].x1 - 2020.0).abs() < 1e-9);
}

#[test]
fn grooves_cover_body_with_bold_edges() {
    let program = compose(&[], &[], &DesignConfig::reference()).unwrap();
    let design = DesignConfig::reference();
    let segs: Vec<&SegmentPrim> = program
        .layer_items(Layer::Grooves)
        .filter_map(|p| match p {
            LayerPrimitive::Segment(s) => Some(s),
            _ => None,
        })
        .collect();
    let bold: Vec<_> = segs
        .iter()
        .filter(|s| s.width == design.grooves.edge_width)
        .collect();
    assert_eq!(bold.len(), 2);
    assert_eq!(bold[0].from.y, design.bands.body.min);
    assert_eq!(bold[1].from.y, design.bands.body.max);
    assert!(segs.iter().all(|s| s.from.y == s.to.y));
}

#[test]
fn year_axis_labels_every_five_years() {
    let program = compose(&[], &[], &DesignConfig::reference()).unwrap();
    let labels: Vec<String> = program
        .layer_items(Layer::AngularAxis)
        .filter_map(|p| match p {
            LayerPrimitive::Text(t) => Some(t.text.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(labels.first().map(String::as_str), Some("1960"));
    assert_eq!(labels.last().map(String::as_str), Some("2015"));
    assert_eq!(labels.len(), 12);
}

#[test]
fn invalid_design_is_rejected() {
    let mut design = DesignConfig::reference();
    design.polar.radius.max = design.polar.radius.min;
    assert!(matches!(
        compose(&[], &[], &design),
        Err(crate::foundation::error::VinylError::Config(_))
    ));
}

#[test]
fn ramp_opacity_runs_from_max_to_zero() {
    assert_eq!(ramp_opacity(0, 4, 0.6, true), 0.6);
    assert_eq!(ramp_opacity(3, 4, 0.6, true), 0.0);
    assert_eq!(ramp_opacity(0, 4, 0.6, false), 0.0);
    assert_eq!(ramp_opacity(3, 4, 0.6, false), 0.6);
    assert!((ramp_opacity(1, 4, 0.6, true) - 0.4).abs() < 1e-12);
    assert_eq!(ramp_opacity(0, 1, 0.6, true), 0.6);
}

#[test]
fn gradient_fades_to_zero_away_from_the_seam() {
    let design = DesignConfig::reference();
    let program = compose(&[], &[], &design).unwrap();
    let opacities: Vec<f64> = program
        .layer_items(Layer::EdgeGradient)
        .filter_map(|p| match p {
            LayerPrimitive::Rect(r) => Some(r.opacity),
            _ => None,
        })
        .collect();
    let steps = design.gradient.steps as usize;
    assert_eq!(opacities[0], design.gradient.max_opacity);
    assert_eq!(opacities[steps - 1], 0.0);
    assert_eq!(opacities[steps], 0.0);
    assert_eq!(opacities[2 * steps - 1], design.gradient.max_opacity);
}

#[test]
fn grooves_sit_on_interval_multiples_inside_body() {
    let design = DesignConfig::reference();
    let program = compose(&[], &[], &design).unwrap();
    let thin: Vec<f64> = program
        .layer_items(Layer::Grooves)
        .filter_map(|p| match p {
            LayerPrimitive::Segment(s) if s.width == design.grooves.line_width => Some(s.from.y),
            _ => None,
        })
        .collect();
    // body [-6, 80] every 5: -5, 0, ..., 75
    assert_eq!(thin.len(), 17);
    assert_eq!(thin.first(), Some(&-5.0));
    assert_eq!(thin.last(), Some(&75.0));
}

#[test]
fn groove_interval_too_fine_for_body_is_rejected() {
    let mut design = DesignConfig::reference();
    design.polar.radius = Domain::new(-40.0, 1e17);
    design.bands.body = Domain::new(1e16, 1e17);
    design.grooves.interval = 1.0;
    let err = compose(&[], &[], &design).unwrap_err();
    assert!(matches!(err, crate::foundation::error::VinylError::Config(_)));
}

#[test]
fn ticks_format_without_trailing_zeroes() {
    assert_eq!(format_tick(20.0), "20");
    assert_eq!(format_tick(2.5), "2.5");
}
