use crate::domain::Domain;
use crate::metric::exact::ExactLpMetric;
use crate::metric::inexact::InexactLpMetric;
use crate::predicate::sites::random_sites;
use crate::predicate::PointPredicate;
use crate::sweep::Execution;
use crate::voronoi::VoronoiMap;
use crate::wasm::utils::{JsPredicate, distances, get_seed, nearest_site, parse_sites};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

enum Inner2D {
    Exact(VoronoiMap<2, ExactLpMetric>),
    Inexact(VoronoiMap<2, InexactLpMetric>),
}

impl Inner2D {
    fn build<P: PointPredicate<2>>(
        domain: Domain<2>,
        predicate: &P,
        metric: Metric2D,
    ) -> Result<Self, JsError> {
        Ok(match metric {
            Metric2D::Exact(p) => Self::Exact(VoronoiMap::with_execution(
                domain,
                predicate,
                ExactLpMetric::new(p),
                Execution::Parallel,
            )?),
            Metric2D::Inexact(p) => Self::Inexact(VoronoiMap::with_execution(
                domain,
                predicate,
                InexactLpMetric::new(p),
                Execution::Parallel,
            )?),
        })
    }
}

#[derive(Clone, Copy)]
enum Metric2D {
    Exact(u32),
    Inexact(f64),
}

/// Discrete Voronoi map over the rectangle `[min_x, max_x] x [min_y, max_y]`.
#[wasm_bindgen(js_name = VoronoiMap2D)]
pub struct VoronoiMap2D {
    inner: Inner2D,
}

#[wasm_bindgen(js_class = VoronoiMap2D)]
impl VoronoiMap2D {
    /// Builds the map of `sites` (flat `[x, y, x, y, ...]`) under the exact L`p` metric.
    #[wasm_bindgen(constructor)]
    pub fn new(
        min_x: i32,
        min_y: i32,
        max_x: i32,
        max_y: i32,
        sites: &[i32],
        p: u32,
    ) -> Result<VoronoiMap2D, JsError> {
        let domain = Domain::new([min_x, min_y], [max_x, max_y])?;
        let inner = Inner2D::build(domain, &parse_sites::<2>(sites)?, Metric2D::Exact(p))?;
        Ok(VoronoiMap2D { inner })
    }

    /// Builds the map under the floating-point L`p` metric, `p` may be fractional.
    #[wasm_bindgen(js_name = newInexact)]
    pub fn new_inexact(
        min_x: i32,
        min_y: i32,
        max_x: i32,
        max_y: i32,
        sites: &[i32],
        p: f64,
    ) -> Result<VoronoiMap2D, JsError> {
        let domain = Domain::new([min_x, min_y], [max_x, max_y])?;
        let inner = Inner2D::build(domain, &parse_sites::<2>(sites)?, Metric2D::Inexact(p))?;
        Ok(VoronoiMap2D { inner })
    }

    /// Builds the map of the points where the JS function `(x, y) => boolean` holds.
    #[wasm_bindgen(js_name = fromPredicate)]
    pub fn from_predicate(
        min_x: i32,
        min_y: i32,
        max_x: i32,
        max_y: i32,
        predicate: JsValue,
        p: u32,
    ) -> Result<VoronoiMap2D, JsError> {
        let domain = Domain::new([min_x, min_y], [max_x, max_y])?;
        let mask = JsPredicate::new(predicate)?.to_mask(domain)?;
        let inner = Inner2D::build(domain, &mask, Metric2D::Exact(p))?;
        Ok(VoronoiMap2D { inner })
    }

    /// Builds the map of `count` random sites.
    pub fn random(
        min_x: i32,
        min_y: i32,
        max_x: i32,
        max_y: i32,
        count: usize,
        p: u32,
    ) -> Result<VoronoiMap2D, JsError> {
        let domain = Domain::new([min_x, min_y], [max_x, max_y])?;
        let mut rng = StdRng::seed_from_u64(get_seed());
        let sites = random_sites(&domain, count, &mut rng);
        let inner = Inner2D::build(domain, &sites, Metric2D::Exact(p))?;
        Ok(VoronoiMap2D { inner })
    }

    /// Nearest site `[x, y]` of a point, `undefined` without sites.
    pub fn nearest_site(&self, x: i32, y: i32) -> Result<Option<Vec<i32>>, JsError> {
        match &self.inner {
            Inner2D::Exact(map) => nearest_site(map, &[x, y]),
            Inner2D::Inexact(map) => nearest_site(map, &[x, y]),
        }
    }

    /// Distance of a point to its nearest site, `Infinity` without sites.
    pub fn distance(&self, x: i32, y: i32) -> Result<f64, JsError> {
        Ok(match &self.inner {
            Inner2D::Exact(map) => map.distance(&[x, y])?,
            Inner2D::Inexact(map) => map.distance(&[x, y])?,
        })
    }

    /// Distance of every point, row by row (x varying fastest).
    pub fn distances(&self) -> Vec<f64> {
        match &self.inner {
            Inner2D::Exact(map) => distances(map),
            Inner2D::Inexact(map) => distances(map),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn site_count(&self) -> usize {
        match &self.inner {
            Inner2D::Exact(map) => map.site_count(),
            Inner2D::Inexact(map) => map.site_count(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> usize {
        self.domain().extent(0)
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize {
        self.domain().extent(1)
    }
}

impl VoronoiMap2D {
    fn domain(&self) -> &Domain<2> {
        match &self.inner {
            Inner2D::Exact(map) => map.domain(),
            Inner2D::Inexact(map) => map.domain(),
        }
    }
}
