//! Sweeps over content/container/pivot grids checking the fit invariants
//! that must hold for every input, not just the hand-picked cases in the
//! unit tests.

use assert_approx_eq::assert_approx_eq;
use lunekit::*;

const DIMS: [f32; 7] = [1.0, 3.0, 50.0, 100.0, 199.0, 640.0, 1920.0];
const PIVOTS: [f32; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

fn each_case(mut f: impl FnMut(Size, Size)) {
    for &cw in &DIMS {
        for &ch in &DIMS {
            for &kw in &DIMS {
                for &kh in &DIMS {
                    f(Size::new(cw, ch), Size::new(kw, kh));
                }
            }
        }
    }
}

fn rel_eps(a: f32) -> f32 {
    a.abs().max(1.0) * 1e-4
}

/// Resolved bounds keep the content's aspect ratio. Tolerance covers the
/// cancellation in `container + adjustment` for extreme ratios.
fn assert_keeps_aspect(b: Bounds, content: Size, container: Size) {
    let lhs = b.width * content.height;
    let rhs = b.height * content.width;
    let eps = lhs.abs().max(rhs.abs()) * 1e-4
        + container.width.max(container.height) * content.width.max(content.height) * 1e-5;
    assert!((lhs - rhs).abs() <= eps, "{content:?} in {container:?}: {b:?}");
}

#[test]
fn stretch_always_flush() {
    each_case(|content, container| {
        for &p in &PIVOTS {
            let pivot = Pivot::new(p, 1.0 - p).unwrap();
            let r = compute(content, container, FitMode::Stretch, pivot).unwrap();
            assert_eq!(r.offset_min, Offset::new(0.0, 0.0));
            assert_eq!(r.offset_max, Offset::new(0.0, 0.0));
            let b = r.bounds(container);
            assert_eq!((b.x, b.y), (0.0, 0.0));
            assert_eq!((b.width, b.height), (container.width, container.height));
        }
    });
}

#[test]
fn edges_split_adjustment_around_pivot() {
    each_case(|content, container| {
        for mode in [FitMode::Contain, FitMode::Cover] {
            for &p in &PIVOTS {
                let pivot = Pivot::new(p, p).unwrap();
                let r = compute(content, container, mode, pivot).unwrap();
                let axis = r.adjusted.expect("aspect modes always pick an axis");
                let (lo, hi) = match axis {
                    Axis::Horizontal => (r.offset_min.x, r.offset_max.x),
                    Axis::Vertical => (r.offset_min.y, r.offset_max.y),
                };
                let value = match axis {
                    Axis::Vertical => {
                        container.width * (content.height / content.width) - container.height
                    }
                    Axis::Horizontal => {
                        container.height * (content.width / content.height) - container.width
                    }
                };
                assert_approx_eq!(hi - lo, value, rel_eps(value));
                assert_eq!(r.adjustment(), hi - lo);
                if p == 0.0 {
                    assert_eq!(lo, 0.0);
                }
                if p == 1.0 {
                    assert_eq!(hi, 0.0);
                }
                // Unadjusted axis stays flush.
                let (lo2, hi2) = match axis {
                    Axis::Horizontal => (r.offset_min.y, r.offset_max.y),
                    Axis::Vertical => (r.offset_min.x, r.offset_max.x),
                };
                assert_eq!((lo2, hi2), (0.0, 0.0));
            }
        }
    });
}

#[test]
fn contain_fits_inside_and_touches_one_axis() {
    each_case(|content, container| {
        let r = compute(content, container, FitMode::Contain, Pivot::center()).unwrap();
        let b = r.bounds(container);
        let ctx = format!("{content:?} in {container:?}: {b:?}");
        assert!(b.width <= container.width + rel_eps(container.width), "{ctx}");
        assert!(b.height <= container.height + rel_eps(container.height), "{ctx}");
        let touches_w = (b.width - container.width).abs() <= rel_eps(container.width);
        let touches_h = (b.height - container.height).abs() <= rel_eps(container.height);
        assert!(touches_w || touches_h);
        assert_keeps_aspect(b, content, container);
    });
}

#[test]
fn cover_covers_and_touches_one_axis() {
    each_case(|content, container| {
        let r = compute(content, container, FitMode::Cover, Pivot::center()).unwrap();
        let b = r.bounds(container);
        assert!(b.width + rel_eps(container.width) >= container.width);
        assert!(b.height + rel_eps(container.height) >= container.height);
        assert!(b.x <= rel_eps(container.width) && b.y <= rel_eps(container.height));
        let touches_w = (b.width - container.width).abs() <= rel_eps(container.width);
        let touches_h = (b.height - container.height).abs() <= rel_eps(container.height);
        assert!(touches_w || touches_h);
        assert_keeps_aspect(b, content, container);
    });
}

#[test]
fn compute_is_idempotent() {
    each_case(|content, container| {
        for mode in [FitMode::Stretch, FitMode::Contain, FitMode::Cover] {
            let fitter = AspectFitter::new(mode).pivot(Pivot::new(0.3, 0.8).unwrap());
            assert_eq!(fitter.compute(content, container), fitter.compute(content, container));
        }
    });
}

#[test]
fn documented_fixtures() {
    let content = Size::new(100.0, 50.0);
    let container = Size::new(200.0, 200.0);

    let contain = compute(content, container, FitMode::Contain, Pivot::center()).unwrap();
    assert_eq!(contain.adjustment(), -100.0);
    assert_eq!((contain.offset_min.y, contain.offset_max.y), (50.0, -50.0));

    let cover = compute(content, container, FitMode::Cover, Pivot::center()).unwrap();
    assert_eq!(cover.adjustment(), 200.0);
    assert_eq!((cover.offset_min.x, cover.offset_max.x), (-100.0, 100.0));

    for mode in [FitMode::Contain, FitMode::Cover] {
        let (content, container) = (Size::new(100.0, 100.0), Size::new(50.0, 50.0));
        let r = compute(content, container, mode, Pivot::center()).unwrap();
        assert_eq!(r.adjusted, Some(Axis::Horizontal));
        assert_eq!(r.adjustment(), 0.0);
    }
}

#[test]
fn degenerate_content_fails_everywhere() {
    for mode in [FitMode::Stretch, FitMode::Contain, FitMode::Cover] {
        for content in [Size::new(0.0, 50.0), Size::new(100.0, 0.0)] {
            let err = AspectFitter::new(mode).compute(content, Size::new(10.0, 10.0)).unwrap_err();
            assert_eq!(err, FitError::DegenerateContent);
            assert!(!err.to_string().is_empty());
        }
    }
}

#[test]
fn mode_from_config_string_drives_fit() {
    let mut auto = AutoFit::new(AspectFitter::new("outside".parse().unwrap()));
    let content = Size::from_units(1.0, 0.5, 100.0);
    let r = auto.update(content, Size::new(200.0, 200.0)).unwrap().unwrap();
    assert_eq!(auto.fitter().mode, FitMode::Cover);
    assert_eq!(r.bounds(Size::new(200.0, 200.0)).width, 400.0);
}
