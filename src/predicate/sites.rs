use super::SetPredicate;
use crate::domain::{Domain, Point};
use rand::Rng;

/// Draws `count` uniformly distributed points of `domain` as a site set.
///
/// Duplicate draws are merged, so the set can hold fewer than `count` sites.
pub fn random_sites<const D: usize, R: Rng + ?Sized>(
    domain: &Domain<D>,
    count: usize,
    rng: &mut R,
) -> SetPredicate<D> {
    (0..count).map(|_| random_point(domain, rng)).collect()
}

/// Draws one uniformly distributed point of `domain`.
pub fn random_point<const D: usize, R: Rng + ?Sized>(domain: &Domain<D>, rng: &mut R) -> Point<D> {
    let mut point = *domain.lower();
    for (a, c) in point.iter_mut().enumerate() {
        *c = rng.gen_range(domain.lower()[a]..=domain.upper()[a]);
    }
    point
}
