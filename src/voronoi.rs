use crate::domain::{Domain, Point};
use crate::error::VoronoiError;
use crate::metric::SeparableMetric;
use crate::predicate::PointPredicate;
use crate::sweep::{Execution, SeparableSweep};
use std::collections::HashSet;

/// Discrete Voronoi map of a site set over a rectangular domain.
///
/// Every point of the domain is mapped to its nearest site under the metric `M`.
/// When several sites are equally near, the map holds the one that is smallest in
/// co-lexicographic order (last axis compared first), so that the result does not
/// depend on how the sites were supplied.
///
/// The map is computed once at construction and is immutable afterwards; a different
/// site set requires a new map.
#[derive(Clone, Debug)]
pub struct VoronoiMap<const D: usize, M> {
    domain: Domain<D>,
    metric: M,
    pub(crate) sites: Vec<Option<Point<D>>>,
}

impl<const D: usize, M: SeparableMetric<D>> VoronoiMap<D, M> {
    /// Computes the Voronoi map of the sites of `predicate` over `domain`.
    ///
    /// Fails if the metric parameter is invalid or if the metric cannot represent the
    /// distances of `domain` exactly.
    pub fn new<P: PointPredicate<D>>(
        domain: Domain<D>,
        predicate: &P,
        metric: M,
    ) -> Result<Self, VoronoiError> {
        Self::with_execution(domain, predicate, metric, Execution::default())
    }

    /// Same as [`VoronoiMap::new`], scheduling the sweep with `execution`.
    pub fn with_execution<P: PointPredicate<D>>(
        domain: Domain<D>,
        predicate: &P,
        metric: M,
        execution: Execution,
    ) -> Result<Self, VoronoiError> {
        metric.validate(&domain)?;
        let sites = SeparableSweep::new(domain, &metric, execution).run(predicate);
        Ok(Self { domain, metric, sites })
    }

    pub fn domain(&self) -> &Domain<D> {
        &self.domain
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Nearest site of `point`, or `None` if the site set is empty.
    pub fn nearest_site(&self, point: &Point<D>) -> Result<Option<Point<D>>, VoronoiError> {
        let index = self.domain.checked_index(point)?;
        Ok(self.sites[index])
    }

    /// Surrogate distance from `point` to its nearest site, see [`SeparableMetric::raw_distance`].
    pub fn raw_distance(&self, point: &Point<D>) -> Result<Option<M::Value>, VoronoiError> {
        Ok(self
            .nearest_site(point)?
            .map(|site| self.metric.raw_distance(point, &site)))
    }

    /// Distance from `point` to its nearest site, `f64::INFINITY` if there is none.
    pub fn distance(&self, point: &Point<D>) -> Result<f64, VoronoiError> {
        Ok(self
            .nearest_site(point)?
            .map_or(f64::INFINITY, |site| self.metric.distance(point, &site)))
    }

    /// Whether the site set is non-empty.
    pub fn has_sites(&self) -> bool {
        // Either every cell holds a site or none does.
        self.sites[0].is_some()
    }

    /// Number of distinct sites referenced by the map.
    ///
    /// Sites whose Voronoi cell contains no other point than themselves still count.
    pub fn site_count(&self) -> usize {
        self.sites.iter().flatten().collect::<HashSet<_>>().len()
    }

    /// Iterates over `(point, nearest site)` pairs of the whole domain.
    pub fn iter(&self) -> impl Iterator<Item = (Point<D>, Option<Point<D>>)> + '_ {
        self.domain.iter().zip(self.sites.iter().copied())
    }
}
