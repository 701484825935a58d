use rand::Rng;

use ridgematch::{
    Angle, EdgeMatch, EdgeMatcher, EdgeShape, MatcherConfig, MinutiaPair, NeighborEdge,
};

fn random_edge<R: Rng>(rng: &mut R) -> EdgeShape {
    EdgeShape {
        length: rng.random_range(0..500),
        reference_angle: Angle(rng.random()),
        neighbor_angle: Angle(rng.random()),
    }
}

fn perturbed_angle<R: Rng>(rng: &mut R, angle: Angle, tolerance: Angle) -> Angle {
    let delta = rng.random_range(-i32::from(tolerance.0)..=i32::from(tolerance.0));
    Angle((i32::from(angle.0) + delta).rem_euclid(256) as u8)
}

fn perturbed_edge<R: Rng>(rng: &mut R, edge: &EdgeShape, config: &MatcherConfig) -> EdgeShape {
    let distance_error = i32::from(config.max_distance_error());
    let delta = rng.random_range(-distance_error..=distance_error);
    EdgeShape {
        length: (i32::from(edge.length) + delta).clamp(0, i32::from(u16::MAX)) as u16,
        reference_angle: perturbed_angle(rng, edge.reference_angle, config.max_angle_error()),
        neighbor_angle: perturbed_angle(rng, edge.neighbor_angle, config.max_angle_error()),
    }
}

/// Any edge reachable by an in-tolerance perturbation must hash into one of
/// the buckets the original edge's coverage enumerates.
#[test]
fn hash_coverage_soundness() {
    let mut rng = rand::rng();
    let matcher = EdgeMatcher::new(MatcherConfig::default());
    for _ in 0..10_000 {
        let edge = random_edge(&mut rng);
        let perturbed = perturbed_edge(&mut rng, &edge, matcher.config());
        let buckets: Vec<u32> = matcher.hash_coverage(&edge).collect();
        assert!(
            buckets.contains(&matcher.compute_hash(&perturbed)),
            "coverage of {edge:?} misses bucket of {perturbed:?}"
        );
    }
}

#[test]
fn hash_coverage_soundness_at_extreme_tolerances() {
    let mut rng = rand::rng();
    for config in [
        MatcherConfig::new(1, Angle(1)).unwrap(),
        MatcherConfig::new(50, Angle(63)).unwrap(),
        MatcherConfig::new(1, Angle(63)).unwrap(),
        MatcherConfig::new(50, Angle(1)).unwrap(),
    ] {
        let matcher = EdgeMatcher::new(config);
        for _ in 0..1_000 {
            let edge = random_edge(&mut rng);
            let perturbed = perturbed_edge(&mut rng, &edge, matcher.config());
            let buckets: Vec<u32> = matcher.hash_coverage(&edge).collect();
            assert!(buckets.contains(&matcher.compute_hash(&perturbed)));
        }
    }
}

#[test]
fn angle_closeness_is_symmetric() {
    let mut rng = rand::rng();
    for _ in 0..10_000 {
        let a = Angle(rng.random());
        let b = Angle(rng.random());
        let tolerance = Angle(rng.random_range(1..=63));
        assert_eq!(a.is_within(b, tolerance), b.is_within(a, tolerance));
    }
}

fn random_star<R: Rng>(rng: &mut R, size: usize) -> Vec<NeighborEdge> {
    let mut star: Vec<NeighborEdge> = (0..size)
        .map(|neighbor| NeighborEdge {
            edge: random_edge(rng),
            neighbor,
        })
        .collect();
    star.sort_by_key(|neighbor_edge| neighbor_edge.edge.length);
    star
}

fn brute_force_pairs(
    matcher: &EdgeMatcher,
    probe_star: &[NeighborEdge],
    candidate_star: &[NeighborEdge],
) -> Vec<EdgeMatch> {
    let mut matches = Vec::new();
    for candidate_edge in candidate_star {
        for probe_edge in probe_star {
            if matcher.matching_edges(&probe_edge.edge, &candidate_edge.edge) {
                matches.push(EdgeMatch {
                    pair: MinutiaPair {
                        probe: probe_edge.neighbor,
                        candidate: candidate_edge.neighbor,
                    },
                    distance: candidate_edge.edge.length,
                });
            }
        }
    }
    matches
}

/// The sliding-window scan must emit exactly what the quadratic scan emits,
/// in the same grouped order.
#[test]
fn sliding_window_matches_brute_force() {
    let mut rng = rand::rng();
    let matcher = EdgeMatcher::new(MatcherConfig::default());
    for _ in 0..500 {
        let probe_size = rng.random_range(0..40);
        let candidate_size = rng.random_range(0..40);
        let probe_star = random_star(&mut rng, probe_size);
        let candidate_star = random_star(&mut rng, candidate_size);
        assert_eq!(
            matcher.find_matching_pairs(&probe_star, &candidate_star),
            brute_force_pairs(&matcher, &probe_star, &candidate_star),
        );
    }
}
