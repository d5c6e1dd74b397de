pub mod sites;

use crate::domain::{Domain, Point};
use crate::error::VoronoiError;
use std::collections::HashSet;

/// Membership test that tells sites apart from background points.
///
/// A point where the predicate holds is a site (distance 0). The predicate is only
/// consulted while a map is being built, and must be deterministic during that time.
/// Must be Sync to support parallel seeding.
pub trait PointPredicate<const D: usize>: Sync {
    fn test(&self, point: &Point<D>) -> bool;
}

impl<const D: usize, F> PointPredicate<D> for F
where
    F: Fn(&Point<D>) -> bool + Sync,
{
    fn test(&self, point: &Point<D>) -> bool {
        self(point)
    }
}

/// A predicate backed by an explicit set of sites.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SetPredicate<const D: usize> {
    sites: HashSet<Point<D>>,
}

impl<const D: usize> SetPredicate<D> {
    pub fn new() -> Self {
        Self { sites: HashSet::new() }
    }

    /// Adds a site, returns `false` if it was already present.
    pub fn insert(&mut self, site: Point<D>) -> bool {
        self.sites.insert(site)
    }

    pub fn contains(&self, site: &Point<D>) -> bool {
        self.sites.contains(site)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point<D>> {
        self.sites.iter()
    }
}

impl<const D: usize> FromIterator<Point<D>> for SetPredicate<D> {
    fn from_iter<I: IntoIterator<Item = Point<D>>>(iter: I) -> Self {
        Self { sites: iter.into_iter().collect() }
    }
}

impl<const D: usize> PointPredicate<D> for SetPredicate<D> {
    fn test(&self, point: &Point<D>) -> bool {
        self.sites.contains(point)
    }
}

/// A predicate backed by a dense boolean image over a domain, in canonical order.
///
/// Points outside the domain are background.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskPredicate<const D: usize> {
    domain: Domain<D>,
    mask: Vec<bool>,
}

impl<const D: usize> MaskPredicate<D> {
    pub fn new(domain: Domain<D>, mask: Vec<bool>) -> Result<Self, VoronoiError> {
        if mask.len() != domain.size() {
            return Err(VoronoiError::MaskSizeMismatch {
                expected: domain.size(),
                found: mask.len(),
            });
        }
        Ok(Self { domain, mask })
    }

    /// Materializes `predicate` over `domain`.
    pub fn from_predicate<P: PointPredicate<D>>(domain: Domain<D>, predicate: &P) -> Self {
        let mask = domain.iter().map(|p| predicate.test(&p)).collect();
        Self { domain, mask }
    }

    /// Materializes a fallible test over `domain`, stopping at the first error.
    pub fn try_from_fn<E>(
        domain: Domain<D>,
        mut test: impl FnMut(&Point<D>) -> Result<bool, E>,
    ) -> Result<Self, E> {
        let mask = domain.iter().map(|p| test(&p)).collect::<Result<_, E>>()?;
        Ok(Self { domain, mask })
    }

    pub fn domain(&self) -> &Domain<D> {
        &self.domain
    }
}

impl<const D: usize> PointPredicate<D> for MaskPredicate<D> {
    fn test(&self, point: &Point<D>) -> bool {
        self.domain.index_of(point).is_some_and(|i| self.mask[i])
    }
}

/// Holds everywhere or nowhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstantPredicate(pub bool);

impl<const D: usize> PointPredicate<D> for ConstantPredicate {
    fn test(&self, _point: &Point<D>) -> bool {
        self.0
    }
}

/// Negation of a predicate, e.g. to take the sites as the complement of a shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotPredicate<P>(pub P);

impl<const D: usize, P: PointPredicate<D>> PointPredicate<D> for NotPredicate<P> {
    fn test(&self, point: &Point<D>) -> bool {
        !self.0.test(point)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AndPredicate<A, B>(pub A, pub B);

impl<const D: usize, A, B> PointPredicate<D> for AndPredicate<A, B>
where
    A: PointPredicate<D>,
    B: PointPredicate<D>,
{
    fn test(&self, point: &Point<D>) -> bool {
        self.0.test(point) && self.1.test(point)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrPredicate<A, B>(pub A, pub B);

impl<const D: usize, A, B> PointPredicate<D> for OrPredicate<A, B>
where
    A: PointPredicate<D>,
    B: PointPredicate<D>,
{
    fn test(&self, point: &Point<D>) -> bool {
        self.0.test(point) || self.1.test(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_predicate() {
        let set: SetPredicate<2> = [[0, -6], [6, 0], [-6, 0], [6, 0]].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert!(set.test(&[6, 0]));
        assert!(!set.test(&[0, 0]));
    }

    #[test]
    fn test_mask_predicate() {
        let domain = Domain::new([0, 0], [1, 1]).unwrap();
        assert_eq!(
            MaskPredicate::new(domain, vec![true; 3]).unwrap_err(),
            VoronoiError::MaskSizeMismatch { expected: 4, found: 3 }
        );

        let mask = MaskPredicate::new(domain, vec![false, true, false, false]).unwrap();
        assert!(mask.test(&[1, 0]));
        assert!(!mask.test(&[0, 1]));
        assert!(!mask.test(&[5, 5]));
    }

    #[test]
    fn test_mask_from_closure() {
        let domain = Domain::new([-3], [3]).unwrap();
        let mask = MaskPredicate::from_predicate(domain, &|p: &Point<1>| p[0] % 2 == 0);
        let sites: Vec<i32> = domain.iter().filter(|p| mask.test(p)).map(|p| p[0]).collect();
        assert_eq!(sites, vec![-2, 0, 2]);
    }

    #[test]
    fn test_mask_from_fallible_test() {
        let domain = Domain::new([0, 0], [3, 3]).unwrap();
        let mask = MaskPredicate::try_from_fn(domain, |p| Ok::<_, String>(p[0] == p[1])).unwrap();
        assert!(mask.test(&[2, 2]));
        assert!(!mask.test(&[2, 1]));

        // The first failure is reported and evaluation stops there.
        let mut calls = 0;
        let err = MaskPredicate::try_from_fn(domain, |p| {
            calls += 1;
            if *p == [1, 1] { Err(format!("failed at {:?}", p)) } else { Ok(true) }
        })
        .unwrap_err();
        assert_eq!(err, "failed at [1, 1]");
        assert_eq!(calls, 6);
    }

    #[test]
    fn test_combinators() {
        let disc = |p: &Point<2>| p[0] * p[0] + p[1] * p[1] <= 4;
        let right = |p: &Point<2>| p[0] > 0;

        assert!(NotPredicate(disc).test(&[3, 0]));
        assert!(!NotPredicate(disc).test(&[1, 1]));
        assert!(AndPredicate(disc, right).test(&[1, 0]));
        assert!(!AndPredicate(disc, right).test(&[-1, 0]));
        assert!(OrPredicate(disc, right).test(&[5, 5]));
        assert!(!OrPredicate(disc, right).test(&[-5, 5]));
        assert!(PointPredicate::<2>::test(&ConstantPredicate(true), &[9, 9]));
    }
}
