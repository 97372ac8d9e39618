//! Whole-patch behaviour: geometric properties of the surface and agreement
//! between the direct and cached query strategies.

use bezel_patch::{
    evaluate, split_u, split_v, ControlGrid, DVec3, Interval, Patch, PatchMode, PatchSettings, Ray,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn unit_square() -> ControlGrid {
    ControlGrid::from_fn(|i, j| DVec3::new(i as f64 / 3.0, j as f64 / 3.0, 0.0))
}

fn random_grid(rng: &mut StdRng) -> ControlGrid {
    ControlGrid::from_fn(|i, j| {
        DVec3::new(
            i as f64 + rng.gen_range(-0.3..0.3),
            j as f64 + rng.gen_range(-0.3..0.3),
            rng.gen_range(-1.0..1.0),
        )
    })
}

fn dome() -> ControlGrid {
    let lift = [0.0, 1.0, 1.0, 0.0];
    ControlGrid::from_fn(|i, j| DVec3::new(i as f64, j as f64, lift[i] * lift[j]))
}

fn sorted_depths(patch: &Patch, ray: &Ray) -> Vec<f64> {
    let mut depths: Vec<f64> = patch.intersections(ray).iter().map(|h| h.depth).collect();
    depths.sort_by(f64::total_cmp);
    depths
}

#[test]
fn test_unit_square_single_hit() {
    init_logging();
    let ray = Ray::new(DVec3::new(0.5, 0.5, 1.0), DVec3::new(0.0, 0.0, -1.0));

    for mode in [PatchMode::Cached, PatchMode::Direct] {
        let patch = Patch::new(unit_square(), PatchSettings::default().with_mode(mode)).unwrap();
        let hits = patch.intersections(&ray);
        assert_eq!(hits.len(), 1, "{:?}", mode);

        let hit = hits[0];
        assert!((hit.depth - 1.0).abs() < 1e-9);
        assert!((hit.point - DVec3::new(0.5, 0.5, 0.0)).length() < 1e-9);
        assert!((hit.normal.z.abs() - 1.0).abs() < 1e-9);
        assert!((hit.u - 0.5).abs() < 1e-9);
        assert!((hit.v - 0.5).abs() < 1e-9);
    }
}

#[test]
fn test_unit_square_miss() {
    let ray = Ray::new(DVec3::new(2.0, 2.0, 1.0), DVec3::new(0.0, 0.0, -1.0));

    for mode in [PatchMode::Cached, PatchMode::Direct] {
        let patch = Patch::new(unit_square(), PatchSettings::default().with_mode(mode)).unwrap();
        assert!(patch.intersections(&ray).is_empty(), "{:?}", mode);
    }
}

#[test]
fn test_hit_behind_origin_is_ignored() {
    let patch = Patch::new(unit_square(), PatchSettings::default()).unwrap();
    let ray = Ray::new(DVec3::new(0.3, 0.6, 1.0), DVec3::new(0.0, 0.0, 1.0));
    assert!(patch.intersections(&ray).is_empty());
}

#[test]
fn test_corners_are_interpolated() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let grid = random_grid(&mut rng);
        let [c00, c03, c33, c30] = grid.corners();

        assert!((evaluate(&grid, 0.0, 0.0).position - c00).length() < 1e-12);
        assert!((evaluate(&grid, 0.0, 1.0).position - c03).length() < 1e-12);
        assert!((evaluate(&grid, 1.0, 1.0).position - c33).length() < 1e-12);
        assert!((evaluate(&grid, 1.0, 0.0).position - c30).length() < 1e-12);
    }
}

#[test]
fn test_subdivision_reproduces_surface() {
    let mut rng = StdRng::seed_from_u64(11);
    let grid = random_grid(&mut rng);
    let (low_u, high_u) = split_u(&grid);
    let (low_v, high_v) = split_v(&grid);

    for _ in 0..50 {
        let s: f64 = rng.gen();
        let t: f64 = rng.gen();

        let expected = evaluate(&grid, s / 2.0, t).position;
        assert!((evaluate(&low_u, s, t).position - expected).length() < 1e-10);

        let expected = evaluate(&grid, 0.5 + s / 2.0, t).position;
        assert!((evaluate(&high_u, s, t).position - expected).length() < 1e-10);

        let expected = evaluate(&grid, s, t / 2.0).position;
        assert!((evaluate(&low_v, s, t).position - expected).length() < 1e-10);

        let expected = evaluate(&grid, s, 0.5 + t / 2.0).position;
        assert!((evaluate(&high_v, s, t).position - expected).length() < 1e-10);
    }
}

#[test]
fn test_surface_inside_bounding_sphere() {
    let mut rng = StdRng::seed_from_u64(3);
    let grid = random_grid(&mut rng);
    let patch = Patch::new(grid, PatchSettings::default()).unwrap();
    let sphere = patch.bounding_sphere();

    for i in 0..=10 {
        for j in 0..=10 {
            let p = patch.evaluate(i as f64 / 10.0, j as f64 / 10.0).position;
            assert!(sphere.contains(p, 1e-9));
        }
    }
}

#[test]
fn test_direct_and_cached_agree() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..5 {
        let grid = random_grid(&mut rng);
        let settings = PatchSettings::default().with_steps(4, 4).with_flatness(0.02);
        let cached = Patch::new(grid, settings.clone()).unwrap();
        let direct = Patch::new(grid, settings.with_mode(PatchMode::Direct)).unwrap();

        for _ in 0..100 {
            let origin = DVec3::new(
                rng.gen_range(-2.0..5.0),
                rng.gen_range(-2.0..5.0),
                rng.gen_range(2.0..6.0),
            );
            let target = DVec3::new(rng.gen_range(0.0..3.0), rng.gen_range(0.0..3.0), 0.0);
            let ray = Ray::new(origin, target - origin);

            let a = sorted_depths(&cached, &ray);
            let b = sorted_depths(&direct, &ray);
            assert_eq!(a.len(), b.len());
            for (da, db) in a.iter().zip(&b) {
                assert!((da - db).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn test_hits_lie_near_surface() {
    let patch = Patch::new(dome(), PatchSettings::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..100 {
        let x = rng.gen_range(0.1..2.9);
        let y = rng.gen_range(0.1..2.9);
        let ray = Ray::new(DVec3::new(x, y, 4.0), DVec3::new(0.0, 0.0, -1.0));

        let hit = patch.closest_hit(&ray, Interval::FORWARD).unwrap();
        let surface = patch.evaluate(hit.u, hit.v);
        assert!((surface.position - hit.point).length() < 0.05);
        assert!(hit.normal.dot(surface.normal) > 0.9);
        assert!((hit.normal.length() - 1.0).abs() < 1e-6);
    }
}

#[test]
fn test_degenerate_grid_has_no_hits() {
    init_logging();
    let grid = ControlGrid::from_fn(|_, _| DVec3::new(1.0, 2.0, 3.0));
    for mode in [PatchMode::Cached, PatchMode::Direct] {
        let patch = Patch::new(grid, PatchSettings::default().with_mode(mode)).unwrap();
        let ray = Ray::new(DVec3::new(1.0, 2.0, 10.0), DVec3::new(0.0, 0.0, -1.0));

        let hits = patch.intersections(&ray);
        assert!(hits.is_empty());
        assert!(hits.iter().all(|h| !h.depth.is_nan()));
    }
}

#[test]
fn test_legacy_type_numbers() {
    init_logging();
    assert_eq!(PatchMode::from_type(0).unwrap(), PatchMode::Direct);
    assert_eq!(PatchMode::from_type(1).unwrap(), PatchMode::Cached);
    assert_eq!(PatchMode::from_type(3).unwrap(), PatchMode::Cached);
    assert!(PatchMode::from_type(-1).is_err());
}

#[test]
fn test_transform_rebuilds_cached_tree() {
    let mut patch = Patch::new(dome(), PatchSettings::default()).unwrap();
    let ray = Ray::new(DVec3::new(1.4, 1.6, 10.0), DVec3::new(0.0, 0.0, -1.0));
    let before = sorted_depths(&patch, &ray);

    patch.translate(DVec3::new(0.0, 0.0, -2.0)).unwrap();
    let after = sorted_depths(&patch, &ray);

    assert_eq!(before.len(), 1);
    assert_eq!(after.len(), 1);
    assert!((after[0] - before[0] - 2.0).abs() < 1e-9);
}
