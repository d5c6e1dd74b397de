pub mod exact;
pub mod inexact;

use crate::domain::{Domain, Line, Point};
use crate::error::VoronoiError;
use std::cmp::Ordering;
use std::fmt::Debug;

/// Outcome of comparing the distances from a point to two sites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Closest {
    /// The first site is strictly closer.
    First,
    /// The second site is strictly closer.
    Second,
    /// Both sites are at the same distance.
    Both,
}

/// Trait defining a separable Lp metric for the dimension sweep.
///
/// A metric is separable when the distance is a monotone function of a sum of
/// per-axis terms, so that the nearest site can be found one axis at a time.
/// Implementations must be Send + Sync to support parallel sweeps.
pub trait SeparableMetric<const D: usize>: Send + Sync {
    /// Monotone surrogate of the distance, typically `sum(|p[i] - q[i]|^p)` without the root.
    type Value: Copy + PartialOrd + Debug + Send + Sync;

    /// The exponent `p` of the metric.
    fn exponent(&self) -> f64;

    /// Checks the metric parameters, and that the surrogate can represent every
    /// distance between two points of `domain`.
    fn validate(&self, domain: &Domain<D>) -> Result<(), VoronoiError>;

    /// Surrogate distance between `p` and `q`, ordered like the true distance.
    fn raw_distance(&self, p: &Point<D>, q: &Point<D>) -> Self::Value;

    /// True Lp distance between `p` and `q`.
    fn distance(&self, p: &Point<D>, q: &Point<D>) -> f64;

    /// Which of `first` and `second` is closer to `origin`.
    fn closest(&self, origin: &Point<D>, first: &Point<D>, second: &Point<D>) -> Closest {
        let a = self.raw_distance(origin, first);
        let b = self.raw_distance(origin, second);
        match a.partial_cmp(&b) {
            Some(Ordering::Less) => Closest::First,
            Some(Ordering::Greater) => Closest::Second,
            _ => Closest::Both,
        }
    }

    /// Hidden-point-removal test of the lower-envelope reduction.
    ///
    /// `u`, `v` and `w` are candidates with strictly increasing coordinates along
    /// `line.axis()`. Returns `true` when no integer position of `line` exists where
    /// `v` is strictly closer than `u` and not farther than `w`, i.e. `v` can never
    /// be selected on this line.
    ///
    /// The default implementation bisects both conditions along the line; it needs
    /// `O(log n)` distance evaluations.
    fn hidden_by(&self, u: &Point<D>, v: &Point<D>, w: &Point<D>, line: &Line<D>) -> bool {
        hidden_by_bisect(self, u, v, w, line)
    }
}

/// Hidden test by bisection of the two monotone "strictly closer" conditions.
///
/// Finds the first position where `v` beats `u`; `v` is hidden iff there is none, or
/// iff `w` already beats `v` at that position.
pub(crate) fn hidden_by_bisect<const D: usize, M: SeparableMetric<D> + ?Sized>(
    metric: &M,
    u: &Point<D>,
    v: &Point<D>,
    w: &Point<D>,
    line: &Line<D>,
) -> bool {
    let hi = line.upper();
    let Some(from) = first_satisfying(line.lower(), hi, |x| {
        metric.closest(&line.at(x), u, v) == Closest::Second
    }) else {
        return true;
    };
    let beaten = first_satisfying(from, hi, |x| {
        metric.closest(&line.at(x), v, w) == Closest::Second
    });
    beaten == Some(from)
}

/// Smallest `x` in `lo..=hi` for which `predicate` holds, assuming it is monotone
/// (false on a prefix, true on the rest).
pub(crate) fn first_satisfying(
    lo: i32,
    hi: i32,
    mut predicate: impl FnMut(i32) -> bool,
) -> Option<i32> {
    if lo > hi || !predicate(hi) {
        return None;
    }
    let mut lo = lo as i64;
    let mut hi = hi as i64;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if predicate(mid as i32) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    Some(lo as i32)
}
