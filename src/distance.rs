use crate::domain::{Domain, Point};
use crate::error::VoronoiError;
use crate::metric::SeparableMetric;
use crate::predicate::PointPredicate;
use crate::sweep::Execution;
use crate::voronoi::VoronoiMap;
use rayon::prelude::*;

/// Distance transform: the distance from every point of a domain to the nearest site.
///
/// Built eagerly from a [`VoronoiMap`], which it keeps for nearest-site queries.
/// Points of an empty site set are at `f64::INFINITY`.
#[derive(Clone, Debug)]
pub struct DistanceTransformation<const D: usize, M> {
    voronoi: VoronoiMap<D, M>,
    distances: Vec<f64>,
}

impl<const D: usize, M: SeparableMetric<D>> DistanceTransformation<D, M> {
    pub fn new<P: PointPredicate<D>>(
        domain: Domain<D>,
        predicate: &P,
        metric: M,
    ) -> Result<Self, VoronoiError> {
        Self::with_execution(domain, predicate, metric, Execution::default())
    }

    pub fn with_execution<P: PointPredicate<D>>(
        domain: Domain<D>,
        predicate: &P,
        metric: M,
        execution: Execution,
    ) -> Result<Self, VoronoiError> {
        let voronoi = VoronoiMap::with_execution(domain, predicate, metric, execution)?;
        Ok(Self::from_voronoi(voronoi, execution))
    }

    /// Evaluates the distance of every point of an existing map.
    pub fn from_voronoi(voronoi: VoronoiMap<D, M>, execution: Execution) -> Self {
        let domain = voronoi.domain();
        let metric = voronoi.metric();
        let sites = &voronoi.sites;
        let evaluate = |index: usize| {
            sites[index].map_or(f64::INFINITY, |site| {
                metric.distance(&domain.point_at(index), &site)
            })
        };
        let distances = match execution {
            Execution::Sequential => (0..sites.len()).map(evaluate).collect(),
            Execution::Parallel => (0..sites.len()).into_par_iter().map(evaluate).collect(),
        };
        Self { voronoi, distances }
    }

    pub fn domain(&self) -> &Domain<D> {
        self.voronoi.domain()
    }

    pub fn voronoi(&self) -> &VoronoiMap<D, M> {
        &self.voronoi
    }

    pub fn into_voronoi(self) -> VoronoiMap<D, M> {
        self.voronoi
    }

    /// Distance from `point` to its nearest site.
    pub fn distance(&self, point: &Point<D>) -> Result<f64, VoronoiError> {
        let index = self.voronoi.domain().checked_index(point)?;
        Ok(self.distances[index])
    }

    /// Largest finite distance of the domain, `None` without sites.
    pub fn max_distance(&self) -> Option<f64> {
        self.distances
            .iter()
            .copied()
            .filter(|d| d.is_finite())
            .reduce(f64::max)
    }

    /// Iterates over `(point, distance)` pairs of the whole domain.
    pub fn iter(&self) -> impl Iterator<Item = (Point<D>, f64)> + '_ {
        self.voronoi.domain().iter().zip(self.distances.iter().copied())
    }
}
