use geo_guess::core::scoring::EARTH_RADIUS_KM;
use geo_guess::{compute_distance, compute_score, Coordinate, ScoringEngine, ScoringParams};

fn sample_points() -> Vec<Coordinate> {
    vec![
        Coordinate::new(0.0, 0.0),
        Coordinate::new(48.8566, 2.3522),
        Coordinate::new(40.0, -74.0),
        Coordinate::new(-33.8688, 151.2093),
        Coordinate::new(35.6762, 139.6503),
        Coordinate::new(-90.0, 0.0),
        Coordinate::new(90.0, 45.0),
        Coordinate::new(0.0, 180.0),
        Coordinate::new(0.0, -180.0),
        Coordinate::new(-54.8, -68.3),
        Coordinate::new(64.1, -21.9),
    ]
}

#[test]
fn test_distance_to_self_is_zero() {
    for p in sample_points() {
        assert_eq!(compute_distance(p, p), 0.0, "point {:?}", p);
    }
}

#[test]
fn test_distance_is_symmetric() {
    let points = sample_points();
    for a in &points {
        for b in &points {
            assert_eq!(compute_distance(*a, *b), compute_distance(*b, *a));
        }
    }
}

#[test]
fn test_triangle_inequality() {
    let points = sample_points();
    for a in &points {
        for b in &points {
            for c in &points {
                let direct = compute_distance(*a, *c);
                let via = compute_distance(*a, *b) + compute_distance(*b, *c);
                assert!(
                    direct <= via + 1e-6,
                    "{:?} -> {:?} -> {:?}: {} > {}",
                    a,
                    b,
                    c,
                    direct,
                    via
                );
            }
        }
    }
}

#[test]
fn test_distance_bounded_by_half_circumference() {
    let max = std::f64::consts::PI * EARTH_RADIUS_KM;
    let points = sample_points();
    for a in &points {
        for b in &points {
            let d = compute_distance(*a, *b);
            assert!(d >= 0.0 && d <= max + 1e-6);
        }
    }
}

#[test]
fn test_antipodal_distance() {
    let d = compute_distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
    assert!((d - 20015.09).abs() < 0.1, "got {}", d);
}

#[test]
fn test_score_caps_and_floor() {
    let params = ScoringParams::default();
    assert_eq!(compute_score(0.0, &params), params.max_score);
    for d in [100.0, 100.0001, 150.0, 20015.0] {
        assert_eq!(compute_score(d, &params), 0, "distance {}", d);
    }
}

#[test]
fn test_score_monotonic_non_increasing() {
    let params = ScoringParams::default();
    let mut previous = compute_score(0.0, &params);
    let mut d = 0.0;
    while d <= 120.0 {
        let score = compute_score(d, &params);
        assert!(score <= previous, "score rose at {} km", d);
        previous = score;
        d += 0.25;
    }
}

#[test]
fn test_scenario_same_city() {
    let paris = Coordinate::new(48.8566, 2.3522);
    let result = ScoringEngine::default().evaluate(paris, paris);
    assert_eq!(result.distance_km, 0.0);
    assert_eq!(result.score, 1000);
}

#[test]
fn test_scenario_one_degree_at_equator() {
    let result =
        ScoringEngine::default().evaluate(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
    assert!((result.distance_km - 111.19).abs() < 0.01);
    assert_eq!(result.score, 0);
}

#[test]
fn test_scenario_near_new_york() {
    let result = ScoringEngine::default().evaluate(
        Coordinate::new(40.0, -74.0),
        Coordinate::new(40.5, -74.5),
    );
    assert!(
        (result.distance_km - 69.94).abs() < 0.01,
        "got {}",
        result.distance_km
    );
    assert_eq!(result.score, 301);
}

#[test]
fn test_engine_is_shareable_across_threads() {
    let engine = ScoringEngine::default();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                engine.evaluate(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, i as f64 * 0.1))
            })
        })
        .collect();

    let scores: Vec<u32> = handles
        .into_iter()
        .map(|h| h.join().unwrap().score)
        .collect();
    assert_eq!(scores[0], 1000);
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}
