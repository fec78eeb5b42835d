use proptest::prelude::*;

use cue::convert::{rgb_to_chromaticity, rgb_to_xy};
use cue::gamut::{closest_on_segment, distance, Gamut, GamutType};
use cue::types::{ChromaticityPoint, Rgb, XY};

const EPS: f64 = 1e-9;

fn gamut_type() -> impl Strategy<Value = GamutType> {
    prop_oneof![
        Just(GamutType::A),
        Just(GamutType::B),
        Just(GamutType::C),
        Just(GamutType::Full),
    ]
}

fn point() -> impl Strategy<Value = ChromaticityPoint> {
    (-0.5..1.5f64, -0.5..1.5f64, 0.0..=1.0f64)
        .prop_map(|(x, y, b)| ChromaticityPoint::new(x, y, b))
}

fn inside_point(gt: GamutType) -> impl Strategy<Value = ChromaticityPoint> {
    (0.01..1.0f64, 0.01..1.0f64, 0.01..1.0f64, 0.0..=1.0f64).prop_map(move |(u, v, w, b)| {
        let g = gt.color_gamut();
        let xy = (g.red * u + g.green * v + g.blue * w) * (1.0 / (u + v + w));
        ChromaticityPoint::new(xy.x, xy.y, b)
    })
}

fn on_edge(gamut: &Gamut, xy: XY) -> bool {
    gamut
        .vertices()
        .edges()
        .iter()
        .any(|&(a, b)| distance(closest_on_segment(xy, a, b), xy) < EPS)
}

proptest! {
    #[test]
    fn inside_points_are_unchanged(
        (gt, p) in gamut_type().prop_flat_map(|gt| (Just(gt), inside_point(gt)))
    ) {
        let gamut = Gamut::from(gt);
        prop_assert!(gamut.contains(p.xy()));
        prop_assert_eq!(gamut.clamp(p), p);
    }

    #[test]
    fn outside_points_land_on_an_edge(gt in gamut_type(), p in point()) {
        let gamut = Gamut::from(gt);
        prop_assume!(!gamut.contains(p.xy()));

        let res = gamut.clamp(p);
        prop_assert!(on_edge(&gamut, res.xy()));
        prop_assert_eq!(res.brightness, p.brightness);
    }

    #[test]
    fn clamping_is_idempotent(gt in gamut_type(), p in point()) {
        let gamut = Gamut::from(gt);
        let once = gamut.clamp(p);
        let twice = gamut.clamp(once);

        prop_assert!(distance(once.xy(), twice.xy()) < EPS);
    }

    #[test]
    fn projection_is_no_farther_than_any_vertex(gt in gamut_type(), p in point()) {
        let gamut = Gamut::from(gt);
        let v = gamut.vertices();
        let d = distance(gamut.project(p).xy(), p.xy());

        for vertex in [v.red, v.green, v.blue] {
            prop_assert!(d <= distance(vertex, p.xy()) + EPS);
        }
    }

    #[test]
    fn segment_result_stays_on_segment(
        px in -2.0..2.0f64, py in -2.0..2.0f64,
        ax in -1.0..1.0f64, ay in -1.0..1.0f64,
        bx in -1.0..1.0f64, by in -1.0..1.0f64,
    ) {
        let (a, b) = (XY::new(ax, ay), XY::new(bx, by));
        let c = closest_on_segment(XY::new(px, py), a, b);

        let len = distance(a, b);
        prop_assert!((distance(a, c) + distance(c, b) - len).abs() < 1e-9);
    }

    #[test]
    fn converted_colors_are_reproducible(
        r in any::<u8>(), g in any::<u8>(), b in any::<u8>(), gt in gamut_type()
    ) {
        let gamut = Gamut::from(gt);
        let rgb = Rgb::new(r, g, b);
        prop_assume!(rgb != Rgb::new(0, 0, 0));

        let res = rgb_to_xy(rgb, &gamut);
        prop_assert!(gamut.contains(res.xy()) || on_edge(&gamut, res.xy()));
        prop_assert_eq!(res.brightness, rgb_to_chromaticity(rgb).brightness);
    }
}
