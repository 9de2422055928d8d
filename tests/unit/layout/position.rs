use super::*;

fn dims(w: u32, h: u32) -> Dimensions {
    Dimensions::new(w, h)
}

const PLACED: [Anchor; 9] = [
    Anchor::TopLeft,
    Anchor::TopCenter,
    Anchor::TopRight,
    Anchor::CenterLeft,
    Anchor::Center,
    Anchor::CenterRight,
    Anchor::BottomLeft,
    Anchor::BottomCenter,
    Anchor::BottomRight,
];

#[test]
fn center_on_square_canvas() {
    assert_eq!(
        resolve(Anchor::Center, dims(100, 100), dims(20, 10)),
        PixelOffset::new(40, 55)
    );
}

#[test]
fn top_right_on_square_canvas() {
    assert_eq!(
        resolve(Anchor::TopRight, dims(100, 100), dims(20, 10)),
        PixelOffset::new(80, 10)
    );
}

#[test]
fn full_table_matches_expected_coordinates() {
    let canvas = dims(200, 120);
    let stamp = dims(30, 16);
    let expected = [
        (Anchor::TopLeft, (0, 16)),
        (Anchor::TopCenter, (85, 16)),
        (Anchor::TopRight, (170, 16)),
        (Anchor::CenterLeft, (0, 68)),
        (Anchor::Center, (85, 68)),
        (Anchor::CenterRight, (170, 68)),
        (Anchor::BottomLeft, (0, 120)),
        (Anchor::BottomCenter, (85, 120)),
        (Anchor::BottomRight, (170, 120)),
    ];
    for (anchor, (x, y)) in expected {
        assert_eq!(
            resolve(anchor, canvas, stamp),
            PixelOffset::new(x, y),
            "{anchor}"
        );
    }
}

#[test]
fn odd_sizes_use_floor_halves_without_correction() {
    assert_eq!(resolve(Anchor::Center, dims(101, 101), dims(21, 11)).x, 40);
    assert_eq!(resolve(Anchor::Center, dims(101, 101), dims(21, 11)).y, 55);
    // 100/2 - 21/2 = 50 - 10 = 40, not (100-21)/2 = 39.
    assert_eq!(resolve(Anchor::Center, dims(100, 100), dims(21, 11)).x, 40);
    assert_eq!(resolve(Anchor::TopCenter, dims(99, 10), dims(10, 4)).x, 44);
}

#[test]
fn even_centering_is_exact() {
    for (cw, sw) in [(100u32, 20u32), (64, 64), (2, 0), (400, 38)] {
        let p = resolve(Anchor::Center, dims(cw, 50), dims(sw, 10));
        assert_eq!(p.x, (cw as i32 - sw as i32) / 2);
    }
}

#[test]
fn right_anchors_touch_right_edge() {
    for (cw, sw) in [(100u32, 20u32), (7, 3), (5, 9), (1, 1)] {
        for anchor in [Anchor::TopRight, Anchor::CenterRight, Anchor::BottomRight] {
            let p = resolve(anchor, dims(cw, 40), dims(sw, 4));
            assert_eq!(p.x + sw as i32, cw as i32);
        }
    }
}

#[test]
fn oversized_stamp_produces_negative_coordinates() {
    let p = resolve(Anchor::BottomRight, dims(10, 10), dims(30, 30));
    assert_eq!(p, PixelOffset::new(-20, 10));
    let p = resolve(Anchor::Center, dims(10, 10), dims(30, 30));
    assert_eq!(p, PixelOffset::new(-10, 20));
}

#[test]
fn tile_and_custom_fall_back_to_center() {
    let canvas = dims(100, 100);
    let stamp = dims(20, 10);
    let center = resolve(Anchor::Center, canvas, stamp);
    assert_eq!(resolve(Anchor::Tile, canvas, stamp), center);
    assert_eq!(resolve(Anchor::Custom, canvas, stamp), center);
}

#[test]
fn resolution_is_pure_and_independent_across_calls() {
    let canvas = dims(321, 123);
    let stamp = dims(45, 17);
    let first: Vec<_> = PLACED.iter().map(|&a| resolve(a, canvas, stamp)).collect();
    // Interleave unrelated resolutions with swapped roles.
    for &a in &PLACED {
        let _ = resolve(a, stamp, canvas);
    }
    let second: Vec<_> = PLACED.iter().map(|&a| resolve(a, canvas, stamp)).collect();
    assert_eq!(first, second);
}

#[test]
fn anchor_parses_common_spellings() {
    assert_eq!("top-left".parse::<Anchor>().unwrap(), Anchor::TopLeft);
    assert_eq!("BOTTOM_RIGHT".parse::<Anchor>().unwrap(), Anchor::BottomRight);
    assert_eq!("CenterLeft".parse::<Anchor>().unwrap(), Anchor::CenterLeft);
    assert_eq!("tile".parse::<Anchor>().unwrap(), Anchor::Tile);
    assert!("middle".parse::<Anchor>().is_err());
    for a in Anchor::ALL {
        assert_eq!(a.to_string().parse::<Anchor>().unwrap(), a);
    }
}

#[test]
fn anchor_serde_uses_variant_names() {
    let json = serde_json::to_string(&Anchor::BottomCenter).unwrap();
    assert_eq!(json, "\"BottomCenter\"");
    let back: Anchor = serde_json::from_str("\"TopRight\"").unwrap();
    assert_eq!(back, Anchor::TopRight);
}
