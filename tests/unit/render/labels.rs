use super::*;

fn bounds() -> Rect {
    Rect::new(0.0, 0.0, 1000.0, 1000.0)
}

fn label(x: f64, y: f64) -> LabelBox {
    LabelBox {
        anchor: Point::new(x, y),
        size: Size::new(80.0, 24.0),
    }
}

fn boxes(labels: &[LabelBox], pos: &[Point]) -> Vec<Rect> {
    labels
        .iter()
        .zip(pos)
        .map(|(l, p)| Rect::from_center_size(*p, l.size))
        .collect()
}

#[test]
fn fixed_layout_keeps_anchors() {
    let labels = [label(100.0, 100.0), label(100.0, 100.0)];
    let pos = FixedLayout.place(&labels, &[], bounds());
    assert_eq!(pos, vec![Point::new(100.0, 100.0); 2]);
}

#[test]
fn repel_separates_stacked_labels() {
    let labels = [
        label(500.0, 500.0),
        label(505.0, 502.0),
        label(498.0, 497.0),
    ];
    let pos = RepelLayout::default().place(&labels, &[], bounds());
    let rects = boxes(&labels, &pos);
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            assert!(
                rect_overlap(rects[i], rects[j]).is_none(),
                "{i} and {j} still overlap: {:?} {:?}",
                rects[i],
                rects[j]
            );
        }
    }
}

#[test]
fn repel_handles_identical_anchors_deterministically() {
    let labels = [label(300.0, 300.0), label(300.0, 300.0)];
    let a = RepelLayout::default().place(&labels, &[], bounds());
    let b = RepelLayout::default().place(&labels, &[], bounds());
    assert_eq!(a, b);
    assert_ne!(a[0], a[1]);
}

#[test]
fn repel_moves_label_off_a_marker() {
    let labels = [label(500.0, 500.0)];
    let marker = Circle::new(Point::new(500.0, 510.0), 20.0);
    let pos = RepelLayout::default().place(&labels, &[marker], bounds());
    let r = Rect::from_center_size(pos[0], labels[0].size);
    assert!(circle_push(r, &marker, 0).is_none(), "{r:?}");
}

#[test]
fn isolated_label_stays_on_its_anchor() {
    let labels = [label(200.0, 200.0)];
    let pos = RepelLayout::default().place(&labels, &[], bounds());
    assert_eq!(pos[0], Point::new(200.0, 200.0));
}

#[test]
fn labels_are_kept_inside_bounds() {
    let labels = [label(5.0, 5.0)];
    let pos = RepelLayout::default().place(&labels, &[], bounds());
    let r = Rect::from_center_size(pos[0], labels[0].size);
    assert!(r.x0 >= 0.0 && r.y0 >= 0.0);
}

#[test]
fn leader_ends_on_nearest_box_edge() {
    let r = Rect::new(10.0, 10.0, 50.0, 30.0);
    assert_eq!(leader_end(r, Point::new(0.0, 20.0)), Point::new(10.0, 20.0));
    assert_eq!(leader_end(r, Point::new(60.0, 40.0)), Point::new(50.0, 30.0));
}
