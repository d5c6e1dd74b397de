use crate::domain::{Domain, Point};
use crate::error::VoronoiError;
use crate::metric::SeparableMetric;
use crate::predicate::{MaskPredicate, SetPredicate};
use crate::voronoi::VoronoiMap;
use js_sys::{Array, Function};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(typescript_custom_section)]
const TS_NEAREST_SITE: &'static str = r#"
/** Exponent of the Manhattan metric. */
export const METRIC_L1 = 1;
/** Exponent of the Euclidean metric. */
export const METRIC_L2 = 2;
"#;

/// Reads a flat coordinate array `[x, y, x, y, ...]` as a site set.
pub fn parse_sites<const D: usize>(flat: &[i32]) -> Result<SetPredicate<D>, VoronoiError> {
    if flat.len() % D != 0 {
        return Err(VoronoiError::InvalidSiteArray { dimension: D, length: flat.len() });
    }
    Ok(flat
        .chunks_exact(D)
        .map(|chunk| {
            let mut point = [0; D];
            point.copy_from_slice(chunk);
            point
        })
        .collect())
}

pub fn nearest_site<const D: usize, M: SeparableMetric<D>>(
    map: &VoronoiMap<D, M>,
    point: &Point<D>,
) -> Result<Option<Vec<i32>>, JsError> {
    Ok(map.nearest_site(point)?.map(|site| site.to_vec()))
}

/// Distances of every domain point in canonical order, x varying fastest.
pub fn distances<const D: usize, M: SeparableMetric<D>>(map: &VoronoiMap<D, M>) -> Vec<f64> {
    map.iter()
        .map(|(point, site)| {
            site.map_or(f64::INFINITY, |site| map.metric().distance(&point, &site))
        })
        .collect()
}

/// A JS function `(x, y, ...) => boolean` selecting the sites of a domain.
///
/// JS values cannot cross threads, so the function is evaluated once per point on the
/// calling thread and the result is handed to the sweep as a mask.
pub struct JsPredicate {
    func: Function,
}

impl JsPredicate {
    pub fn new(val: JsValue) -> Result<Self, JsError> {
        let func = val
            .dyn_into::<Function>()
            .map_err(|_| JsError::new("predicate must be a function"))?;
        Ok(Self { func })
    }

    /// Evaluates the function over `domain`. An exception thrown by the function
    /// aborts the evaluation.
    pub fn to_mask<const D: usize>(&self, domain: Domain<D>) -> Result<MaskPredicate<D>, JsError> {
        MaskPredicate::try_from_fn(domain, |point| {
            let args: Array = point.iter().map(|&c| JsValue::from(c)).collect();
            self.func
                .apply(&JsValue::NULL, &args)
                .map(|res| res.is_truthy())
                .map_err(|e| JsError::new(&format!("predicate threw at {:?}: {:?}", point, e)))
        })
    }
}

pub fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        123456789 // Fixed seed for tests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sites() {
        let sites = parse_sites::<2>(&[1, 2, 3, 4, 1, 2]).unwrap();
        assert_eq!(sites.len(), 2);
        assert!(sites.contains(&[1, 2]));
        assert!(sites.contains(&[3, 4]));

        assert!(parse_sites::<3>(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_parse_sites_rejects_partial_points() {
        assert_eq!(
            parse_sites::<2>(&[1, 2, 3, 4, 9]).unwrap_err(),
            VoronoiError::InvalidSiteArray { dimension: 2, length: 5 }
        );
        assert_eq!(
            parse_sites::<3>(&[1, 2]).unwrap_err(),
            VoronoiError::InvalidSiteArray { dimension: 3, length: 2 }
        );
    }
}
