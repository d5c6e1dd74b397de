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

enum Inner3D {
    Exact(VoronoiMap<3, ExactLpMetric>),
    Inexact(VoronoiMap<3, InexactLpMetric>),
}

impl Inner3D {
    fn build<P: PointPredicate<3>>(
        domain: Domain<3>,
        predicate: &P,
        metric: Metric3D,
    ) -> Result<Self, JsError> {
        Ok(match metric {
            Metric3D::Exact(p) => Self::Exact(VoronoiMap::with_execution(
                domain,
                predicate,
                ExactLpMetric::new(p),
                Execution::Parallel,
            )?),
            Metric3D::Inexact(p) => Self::Inexact(VoronoiMap::with_execution(
                domain,
                predicate,
                InexactLpMetric::new(p),
                Execution::Parallel,
            )?),
        })
    }
}

#[derive(Clone, Copy)]
enum Metric3D {
    Exact(u32),
    Inexact(f64),
}

/// Discrete Voronoi map over the box `[min_x, max_x] x [min_y, max_y] x [min_z, max_z]`.
#[wasm_bindgen(js_name = VoronoiMap3D)]
pub struct VoronoiMap3D {
    inner: Inner3D,
}

#[wasm_bindgen(js_class = VoronoiMap3D)]
impl VoronoiMap3D {
    /// Builds the map of `sites` (flat `[x, y, z, x, y, z, ...]`) under the exact L`p` metric.
    #[wasm_bindgen(constructor)]
    pub fn new(
        min_x: i32,
        min_y: i32,
        min_z: i32,
        max_x: i32,
        max_y: i32,
        max_z: i32,
        sites: &[i32],
        p: u32,
    ) -> Result<VoronoiMap3D, JsError> {
        let domain = Domain::new([min_x, min_y, min_z], [max_x, max_y, max_z])?;
        let inner = Inner3D::build(domain, &parse_sites::<3>(sites)?, Metric3D::Exact(p))?;
        Ok(VoronoiMap3D { inner })
    }

    /// Builds the map under the floating-point L`p` metric, `p` may be fractional.
    #[wasm_bindgen(js_name = newInexact)]
    pub fn new_inexact(
        min_x: i32,
        min_y: i32,
        min_z: i32,
        max_x: i32,
        max_y: i32,
        max_z: i32,
        sites: &[i32],
        p: f64,
    ) -> Result<VoronoiMap3D, JsError> {
        let domain = Domain::new([min_x, min_y, min_z], [max_x, max_y, max_z])?;
        let inner = Inner3D::build(domain, &parse_sites::<3>(sites)?, Metric3D::Inexact(p))?;
        Ok(VoronoiMap3D { inner })
    }

    /// Builds the map of the points where the JS function `(x, y, z) => boolean` holds.
    #[wasm_bindgen(js_name = fromPredicate)]
    pub fn from_predicate(
        min_x: i32,
        min_y: i32,
        min_z: i32,
        max_x: i32,
        max_y: i32,
        max_z: i32,
        predicate: JsValue,
        p: u32,
    ) -> Result<VoronoiMap3D, JsError> {
        let domain = Domain::new([min_x, min_y, min_z], [max_x, max_y, max_z])?;
        let mask = JsPredicate::new(predicate)?.to_mask(domain)?;
        let inner = Inner3D::build(domain, &mask, Metric3D::Exact(p))?;
        Ok(VoronoiMap3D { inner })
    }

    /// Builds the map of `count` random sites.
    pub fn random(
        min_x: i32,
        min_y: i32,
        min_z: i32,
        max_x: i32,
        max_y: i32,
        max_z: i32,
        count: usize,
        p: u32,
    ) -> Result<VoronoiMap3D, JsError> {
        let domain = Domain::new([min_x, min_y, min_z], [max_x, max_y, max_z])?;
        let mut rng = StdRng::seed_from_u64(get_seed());
        let sites = random_sites(&domain, count, &mut rng);
        let inner = Inner3D::build(domain, &sites, Metric3D::Exact(p))?;
        Ok(VoronoiMap3D { inner })
    }

    /// Nearest site `[x, y, z]` of a point, `undefined` without sites.
    pub fn nearest_site(&self, x: i32, y: i32, z: i32) -> Result<Option<Vec<i32>>, JsError> {
        match &self.inner {
            Inner3D::Exact(map) => nearest_site(map, &[x, y, z]),
            Inner3D::Inexact(map) => nearest_site(map, &[x, y, z]),
        }
    }

    /// Distance of a point to its nearest site, `Infinity` without sites.
    pub fn distance(&self, x: i32, y: i32, z: i32) -> Result<f64, JsError> {
        Ok(match &self.inner {
            Inner3D::Exact(map) => map.distance(&[x, y, z])?,
            Inner3D::Inexact(map) => map.distance(&[x, y, z])?,
        })
    }

    /// Distance of every point, x varying fastest, then y, then z.
    pub fn distances(&self) -> Vec<f64> {
        match &self.inner {
            Inner3D::Exact(map) => distances(map),
            Inner3D::Inexact(map) => distances(map),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn site_count(&self) -> usize {
        match &self.inner {
            Inner3D::Exact(map) => map.site_count(),
            Inner3D::Inexact(map) => map.site_count(),
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

    #[wasm_bindgen(getter)]
    pub fn depth(&self) -> usize {
        self.domain().extent(2)
    }
}

impl VoronoiMap3D {
    fn domain(&self) -> &Domain<3> {
        match &self.inner {
            Inner3D::Exact(map) => map.domain(),
            Inner3D::Inexact(map) => map.domain(),
        }
    }
}
