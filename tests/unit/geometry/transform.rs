use std::collections::BTreeMap;

use super::*;

fn song(rank: u32, year: i32) -> SongRecord {
    SongRecord::new(rank, format!("Song {rank}"), format!("Artist {rank}"), year)
}

fn sample() -> Vec<SongRecord> {
    vec![
        song(7, 1965),
        song(1, 1967),
        song(12, 1965),
        song(3, 1971),
        song(30, 1967),
        song(2, 1965),
        song(15, 1971),
        song(9, 1990),
    ]
}

#[test]
fn rank_one_matches_reference_size() {
    let s = GlyphScale::default().size_for_rank(1).unwrap();
    assert!((s - 40.0 / 1.8).abs() < 1e-12);
}

#[test]
fn rank_2000_is_tiny_but_positive() {
    let s = GlyphScale::default().size_for_rank(2000).unwrap();
    assert!(s > 0.0 && s < 0.02, "{s}");
}

#[test]
fn ranks_past_zero_crossing_are_rejected() {
    assert!(matches!(
        GlyphScale::default().size_for_rank(5000),
        Err(VinylError::Data(_))
    ));
    assert!(matches!(
        GlyphScale::default().size_for_rank(0),
        Err(VinylError::Data(_))
    ));
}

#[test]
fn glyph_size_strictly_decreases_with_rank() {
    let songs: Vec<_> = (1..=500).map(|r| song(r, 1960 + (r % 50) as i32)).collect();
    let derived = derive(&songs, GlyphScale::default()).unwrap();
    for pair in derived.windows(2) {
        assert!(pair[0].rank() < pair[1].rank());
        assert!(pair[0].glyph_size > pair[1].glyph_size);
    }
}

#[test]
fn ordinals_are_contiguous_per_year() {
    let derived = derive(&sample(), GlyphScale::default()).unwrap();
    let mut per_year = BTreeMap::<i32, Vec<u32>>::new();
    for d in &derived {
        per_year
            .entry(d.release_year())
            .or_default()
            .push(d.ordinal_in_year);
    }
    for ordinals in per_year.values_mut() {
        ordinals.sort_unstable();
        let expected: Vec<u32> = (1..=ordinals.len() as u32).collect();
        assert_eq!(*ordinals, expected);
    }
}

#[test]
fn least_popular_song_of_a_year_gets_ordinal_one() {
    let derived = derive(&sample(), GlyphScale::default()).unwrap();
    let ordinal = |rank: u32| {
        derived
            .iter()
            .find(|d| d.rank() == rank)
            .map(|d| d.ordinal_in_year)
            .unwrap()
    };
    // 1965: ranks 2, 7, 12
    assert_eq!(ordinal(12), 1);
    assert_eq!(ordinal(7), 2);
    assert_eq!(ordinal(2), 3);
    // a year with one song
    assert_eq!(ordinal(9), 1);
}

#[test]
fn output_is_sorted_by_rank_and_pure() {
    let a = derive(&sample(), GlyphScale::default()).unwrap();
    let mut shuffled = sample();
    shuffled.reverse();
    let b = derive(&shuffled, GlyphScale::default()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.first().map(|d| d.rank()), Some(1));
}

#[test]
fn duplicate_and_zero_ranks_fail() {
    let err = derive(&[song(1, 1970), song(1, 1971)], GlyphScale::default()).unwrap_err();
    assert!(matches!(err, VinylError::Data(_)));
    let err = derive(&[song(0, 1970)], GlyphScale::default()).unwrap_err();
    assert!(matches!(err, VinylError::Data(_)));
}

#[test]
fn invalid_scale_is_a_config_error() {
    for scale in [0.0, -1.0, f64::NAN] {
        let err = derive(&sample(), GlyphScale::with_scale(scale)).unwrap_err();
        assert!(matches!(err, VinylError::Config(_)));
    }
}

#[test]
fn empty_input_derives_nothing() {
    let derived = derive(&[], GlyphScale::default()).unwrap();
    assert!(derived.is_empty());
    assert!(highlights(&derived).is_empty());
}

#[test]
fn highlights_are_top_ten_in_rank_order() {
    let songs: Vec<_> = (1..=40).rev().map(|r| song(r, 1970)).collect();
    let derived = derive(&songs, GlyphScale::default()).unwrap();
    let top = highlights(&derived);
    let ranks: Vec<u32> = top.iter().map(|d| d.rank()).collect();
    assert_eq!(ranks, (1..=10).collect::<Vec<_>>());

    let few = derive(&sample(), GlyphScale::default()).unwrap();
    let top = highlights(&few);
    assert_eq!(
        top.iter().map(|d| d.rank()).collect::<Vec<_>>(),
        vec![1, 2, 3, 7, 9]
    );
}
