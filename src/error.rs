use thiserror::Error;

/// Errors reported by domain, predicate and map construction, and by map queries.
///
/// The absence of any site is not an error: queries report it as `None` or
/// `f64::INFINITY`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VoronoiError {
    /// The lower bound exceeds the upper bound on some axis.
    #[error("invalid domain: lower bound {lower} exceeds upper bound {upper} on axis {axis}")]
    InvalidDomain { axis: usize, lower: i32, upper: i32 },

    /// A domain needs at least one axis.
    #[error("invalid domain: a domain must have at least one axis")]
    ZeroDimensional,

    /// The number of cells does not fit in `usize`.
    #[error("invalid domain: cell count overflows at axis {axis}")]
    DomainTooLarge { axis: usize },

    /// The metric exponent is below 1 or not finite.
    #[error("invalid metric exponent {exponent}: expected a finite p >= 1")]
    InvalidMetricParameter { exponent: f64 },

    /// The exact surrogate distance of the metric cannot represent every distance in the domain.
    #[error("exact L{exponent} distances overflow 128 bits over an axis span of {span}")]
    MetricOverflow { exponent: u32, span: u64 },

    /// A query point lies outside the domain of the map.
    #[error("point {point:?} lies outside the domain {lower:?}..={upper:?}")]
    OutOfDomainQuery {
        point: Vec<i32>,
        lower: Vec<i32>,
        upper: Vec<i32>,
    },

    /// A flat coordinate array does not hold a whole number of points.
    #[error("site array of length {length} does not hold whole {dimension}D points")]
    InvalidSiteArray { dimension: usize, length: usize },

    /// A mask predicate does not hold one value per domain cell.
    #[error("mask holds {found} values but the domain has {expected} cells")]
    MaskSizeMismatch { expected: usize, found: usize },
}
