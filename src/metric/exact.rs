use super::{Closest, SeparableMetric, hidden_by_bisect};
use crate::domain::{Domain, Line, Point};
use crate::error::VoronoiError;

/// Lp metric with an integer exponent, evaluated in exact integer arithmetic.
///
/// Distances are compared through the surrogate `sum(|p[i] - q[i]|^p)` stored in a
/// `u128`, so there is no rounding and results are reproducible bit for bit.
/// [`SeparableMetric::validate`] rejects domains on which the surrogate could overflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ExactLpMetric {
    exponent: u32,
}

impl ExactLpMetric {
    /// Manhattan distance.
    pub const L1: Self = Self { exponent: 1 };
    /// Euclidean distance.
    pub const L2: Self = Self { exponent: 2 };

    /// Creates the metric `L_exponent`. The exponent is checked when a map is built.
    pub const fn new(exponent: u32) -> Self {
        Self { exponent }
    }

    pub fn p(&self) -> u32 {
        self.exponent
    }

    /// `|delta|^p`, saturating outside validated domains.
    fn power(&self, delta: i64) -> u128 {
        (delta.unsigned_abs() as u128).saturating_pow(self.exponent)
    }

    /// Squared distance from `site` to the line, ignoring the axis of the line.
    fn squared_offset<const D: usize>(site: &Point<D>, line: &Line<D>) -> i128 {
        let origin = line.origin();
        (0..D)
            .filter(|&a| a != line.axis())
            .map(|a| {
                let d = origin[a] as i128 - site[a] as i128;
                d * d
            })
            .sum()
    }

    /// Euclidean hidden test with closed-form bisector abscissas.
    ///
    /// `v` strictly beats `u` at `x` iff `2x(v_k - u_k) > v_k^2 - u_k^2 + A_v - A_u`
    /// where `A` is the squared offset from the line.
    fn hidden_by_l2<const D: usize>(
        u: &Point<D>,
        v: &Point<D>,
        w: &Point<D>,
        line: &Line<D>,
    ) -> bool {
        let axis = line.axis();
        let (uk, vk, wk) = (u[axis] as i128, v[axis] as i128, w[axis] as i128);
        let (au, av, aw) = (
            Self::squared_offset(u, line),
            Self::squared_offset(v, line),
            Self::squared_offset(w, line),
        );

        // First position where `v` strictly beats `u`.
        let from = (vk * vk - uk * uk + av - au).div_euclid(2 * (vk - uk)) + 1;
        // First position where `w` strictly beats `v`.
        let until = (wk * wk - vk * vk + aw - av).div_euclid(2 * (wk - vk)) + 1;

        let lo = from.max(line.lower() as i128);
        let hi = (until - 1).min(line.upper() as i128);
        lo > hi
    }
}

impl<const D: usize> SeparableMetric<D> for ExactLpMetric {
    type Value = u128;

    fn exponent(&self) -> f64 {
        self.exponent as f64
    }

    fn validate(&self, domain: &Domain<D>) -> Result<(), VoronoiError> {
        if self.exponent < 1 {
            return Err(VoronoiError::InvalidMetricParameter {
                exponent: self.exponent as f64,
            });
        }
        let span = domain.max_span();
        (span as u128)
            .checked_pow(self.exponent)
            .and_then(|term| term.checked_mul(D as u128))
            .map(|_| ())
            .ok_or(VoronoiError::MetricOverflow {
                exponent: self.exponent,
                span,
            })
    }

    fn raw_distance(&self, p: &Point<D>, q: &Point<D>) -> u128 {
        (0..D).fold(0u128, |acc, i| {
            acc.saturating_add(self.power(p[i] as i64 - q[i] as i64))
        })
    }

    fn distance(&self, p: &Point<D>, q: &Point<D>) -> f64 {
        let raw = self.raw_distance(p, q) as f64;
        match self.exponent {
            1 => raw,
            2 => raw.sqrt(),
            e => raw.powf(1.0 / e as f64),
        }
    }

    fn closest(&self, origin: &Point<D>, first: &Point<D>, second: &Point<D>) -> Closest {
        let a = self.raw_distance(origin, first);
        let b = self.raw_distance(origin, second);
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Closest::First,
            std::cmp::Ordering::Greater => Closest::Second,
            std::cmp::Ordering::Equal => Closest::Both,
        }
    }

    fn hidden_by(&self, u: &Point<D>, v: &Point<D>, w: &Point<D>, line: &Line<D>) -> bool {
        if self.exponent == 2 {
            return Self::hidden_by_l2(u, v, w, line);
        }
        hidden_by_bisect(self, u, v, w, line)
    }
}
