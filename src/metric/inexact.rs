use super::SeparableMetric;
use crate::domain::{Domain, Point};
use crate::error::VoronoiError;

/// Lp metric with a real exponent, evaluated in `f64`.
///
/// Faster than [`ExactLpMetric`](super::exact::ExactLpMetric) for large exponents and
/// the only choice for non-integer `p`, but near-ties may be misclassified within
/// floating-point rounding. The selected sites can then differ from the exact ones
/// by an amount of the order of the rounding error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InexactLpMetric {
    exponent: f64,
}

impl InexactLpMetric {
    /// Creates the metric `L_exponent`. The exponent is checked when a map is built.
    pub const fn new(exponent: f64) -> Self {
        Self { exponent }
    }

    pub fn p(&self) -> f64 {
        self.exponent
    }
}

impl<const D: usize> SeparableMetric<D> for InexactLpMetric {
    type Value = f64;

    fn exponent(&self) -> f64 {
        self.exponent
    }

    fn validate(&self, _domain: &Domain<D>) -> Result<(), VoronoiError> {
        if !self.exponent.is_finite() || self.exponent < 1.0 {
            return Err(VoronoiError::InvalidMetricParameter {
                exponent: self.exponent,
            });
        }
        Ok(())
    }

    fn raw_distance(&self, p: &Point<D>, q: &Point<D>) -> f64 {
        (0..D)
            .map(|i| ((p[i] as i64 - q[i] as i64).abs() as f64).powf(self.exponent))
            .sum()
    }

    fn distance(&self, p: &Point<D>, q: &Point<D>) -> f64 {
        SeparableMetric::<D>::raw_distance(self, p, q).powf(1.0 / self.exponent)
    }
}
