use proptest::prelude::*;
use voromap::{
    Domain, ExactLpMetric, Execution, InexactLpMetric, Point, SeparableMetric, SetPredicate,
    VoronoiMap,
};

/// Brute-force nearest site, smallest in co-lexicographic order among equals.
fn brute_nearest<const D: usize>(
    metric: &ExactLpMetric,
    sites: &SetPredicate<D>,
    p: &Point<D>,
) -> Option<Point<D>> {
    sites
        .iter()
        .copied()
        .min_by(|a, b| {
            let da = SeparableMetric::<D>::raw_distance(metric, p, a);
            let db = SeparableMetric::<D>::raw_distance(metric, p, b);
            da.cmp(&db).then_with(|| a.iter().rev().cmp(b.iter().rev()))
        })
}

fn arb_sites_2d(extent: i32) -> impl Strategy<Value = Vec<[i32; 2]>> {
    prop::collection::vec(prop::array::uniform2(0..extent), 0..12)
}

fn arb_sites_3d(extent: i32) -> impl Strategy<Value = Vec<[i32; 3]>> {
    prop::collection::vec(prop::array::uniform3(0..extent), 1..8)
}

proptest! {
    #[test]
    fn exact_2d_matches_brute_force(
        p in 1u32..=4,
        sites in arb_sites_2d(12),
        parallel in any::<bool>(),
    ) {
        let domain = Domain::new([0, 0], [11, 11]).unwrap();
        let sites: SetPredicate<2> = sites.into_iter().collect();
        let metric = ExactLpMetric::new(p);
        let execution = if parallel { Execution::Parallel } else { Execution::Sequential };
        let voro = VoronoiMap::with_execution(domain, &sites, metric, execution).unwrap();

        for (point, site) in voro.iter() {
            let expected = brute_nearest(&metric, &sites, &point);
            prop_assert_eq!(site, expected, "at {:?} with p = {}", point, p);
        }
    }

    #[test]
    fn exact_3d_matches_brute_force(
        p in 1u32..=3,
        sites in arb_sites_3d(7),
    ) {
        let domain = Domain::new([0, 0, 0], [6, 6, 6]).unwrap();
        let sites: SetPredicate<3> = sites.into_iter().collect();
        let metric = ExactLpMetric::new(p);
        let voro = VoronoiMap::new(domain, &sites, metric).unwrap();

        for (point, site) in voro.iter() {
            let expected = brute_nearest(&metric, &sites, &point);
            prop_assert_eq!(site, expected, "at {:?} with p = {}", point, p);
        }
    }

    #[test]
    fn exact_1d_on_shifted_domain(
        lower in -50i32..50,
        len in 1i32..40,
        offsets in prop::collection::vec(0i32..40, 1..6),
    ) {
        let domain = Domain::new([lower], [lower + len - 1]).unwrap();
        let sites: SetPredicate<1> = offsets.into_iter().map(|o| [lower + o % len]).collect();
        let metric = ExactLpMetric::L2;
        let voro = VoronoiMap::new(domain, &sites, metric).unwrap();

        for (point, site) in voro.iter() {
            prop_assert_eq!(site, brute_nearest(&metric, &sites, &point));
        }
    }

    #[test]
    fn inexact_distance_is_minimal(
        p in 1.0f64..4.0,
        sites in arb_sites_2d(10).prop_filter("needs a site", |s| !s.is_empty()),
    ) {
        let domain = Domain::new([0, 0], [9, 9]).unwrap();
        let sites: SetPredicate<2> = sites.into_iter().collect();
        let metric = InexactLpMetric::new(p);
        let voro = VoronoiMap::new(domain, &sites, metric).unwrap();

        for (point, _) in voro.iter() {
            let d = voro.distance(&point).unwrap();
            let best = sites
                .iter()
                .map(|s| SeparableMetric::<2>::distance(&metric, &point, s))
                .fold(f64::INFINITY, f64::min);
            let tolerance = 1e-9 * best.max(1.0);
            prop_assert!((d - best).abs() <= tolerance, "at {:?}: {} vs {}", point, d, best);
        }
    }
}
