use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_half_opacity_mixes_evenly() {
    let dst = [0, 0, 255, 255];
    let src = [255, 0, 0, 255];
    let out = over(dst, src, 128.0 / 255.0);
    assert_eq!(out, [128, 0, 127, 255]);
}

#[test]
fn scale_by_full_coverage_is_identity() {
    assert_eq!(scale([10, 20, 30, 40], 255), [10, 20, 30, 40]);
    assert_eq!(scale([10, 20, 30, 40], 0), [0, 0, 0, 0]);
}
