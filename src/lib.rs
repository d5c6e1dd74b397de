//! # voromap
//!
//! `voromap` is a Rust library for discrete Voronoi maps and distance transforms on
//! N-dimensional integer grids, designed to be used in Rust as well as compiled to
//! WebAssembly (WASM). For every point of a rectangular domain it finds the nearest
//! site of a point set under an Lp metric.
//!
//! ## Features
//!
//! - **Separable sweep**: the nearest sites are computed one axis at a time by 1-D
//!   lower-envelope reductions, in time linear in the domain size for the Euclidean metric.
//! - **Exact metrics**: integer exponents are evaluated in exact integer arithmetic,
//!   so the result is provably the nearest site and reproducible bit for bit.
//! - **Inexact metrics**: any real exponent `p >= 1`, evaluated in `f64`.
//! - **Parallel**: the lines of every pass can be reduced in parallel with `rayon`.
//! - **WASM-first**: 2D and 3D maps are exposed to JavaScript with `wasm-bindgen`.
//!
//! ## Example
//!
//! ```
//! use voromap::{Domain, ExactLpMetric, SetPredicate, VoronoiMap};
//!
//! let domain = Domain::new([-10, -10], [10, 10]).unwrap();
//! let sites: SetPredicate<2> = [[0, -6], [6, 0], [-6, 0]].into_iter().collect();
//! let voro = VoronoiMap::new(domain, &sites, ExactLpMetric::L2).unwrap();
//!
//! assert_eq!(voro.nearest_site(&[5, 1]).unwrap(), Some([6, 0]));
//! assert_eq!(voro.distance(&[0, 0]).unwrap(), 6.0);
//! ```
//!
//! ## Main Interface
//!
//! The primary entry points are [`VoronoiMap`] and [`DistanceTransformation`].

mod distance;
mod domain;
mod envelope;
mod error;
mod metric;
mod predicate;
mod sweep;
mod voronoi;
pub mod wasm;

pub use distance::DistanceTransformation;
pub use domain::Domain;
pub use domain::DomainIter;
pub use domain::Line;
pub use domain::Point;
pub use envelope::LowerEnvelope;
pub use error::VoronoiError;
pub use metric::Closest;
pub use metric::SeparableMetric;
pub use metric::exact::ExactLpMetric;
pub use metric::inexact::InexactLpMetric;
pub use predicate::AndPredicate;
pub use predicate::ConstantPredicate;
pub use predicate::MaskPredicate;
pub use predicate::NotPredicate;
pub use predicate::OrPredicate;
pub use predicate::PointPredicate;
pub use predicate::SetPredicate;
pub use predicate::sites::random_point;
pub use predicate::sites::random_sites;
pub use sweep::Execution;
pub use sweep::SeparableSweep;
pub use sweep::SweepState;
pub use voronoi::VoronoiMap;
