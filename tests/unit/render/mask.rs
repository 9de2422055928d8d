use super::*;

#[test]
fn new_rejects_wrong_length() {
    assert!(GlyphMask::new(2, 2, 0, 0, vec![0; 3]).is_err());
    assert!(GlyphMask::new(2, 2, 0, 0, vec![0; 4]).is_ok());
}

#[test]
fn ink_bounds_are_relative_to_pen_origin() {
    // 4x4 mask, pen origin at (1, 3); ink occupies x=1..3, y=1..3.
    let mut cov = vec![0u8; 16];
    for y in 1..3 {
        for x in 1..3 {
            cov[y * 4 + x] = 200;
        }
    }
    let mask = GlyphMask::new(4, 4, 1, 3, cov).unwrap();
    assert_eq!(mask.ink_bounds(), Some((0, -2, 2, 0)));
}

#[test]
fn empty_mask_has_no_ink() {
    assert_eq!(GlyphMask::empty().ink_bounds(), None);
    let blank = GlyphMask::new(3, 3, 0, 0, vec![0; 9]).unwrap();
    assert_eq!(blank.ink_bounds(), None);
    assert_eq!(blank.coverage_at(10, 10), 0);
}
