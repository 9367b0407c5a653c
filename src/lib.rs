//! A Rust library implementing summary statistics for MCMC traces: highest posterior
//! density (HPD) intervals, batch means standard errors and empirical quantiles.
//!
//! Every statistic works on univariate traces as well as multivariate ones, where the
//! leading axes index independent scalar variables and the trailing axis holds the draws.
//! The `*_axis` variants accept traces whose draws live on some other axis (e.g. the
//! sample-first layout many samplers write).
//!
//! This crate is language agnostic and intended to work with the outputs of any MCMC sampler
//! (e.g. Stan, PyMC3, Turing.jl, etc.)
#[cfg(test)]
#[macro_use]
extern crate approx;

/// Batch means standard error
pub mod batchsd;
/// Error and result types shared by every statistic
pub mod error;
/// Highest posterior density (minimum width credible) intervals
pub mod hpd;
/// Coordinate generation over the leading axes of a trace
pub mod indices;
/// Nearest-rank quantiles
pub mod quantiles;
/// Helpers for summary statistics and moving the sample axis around, mostly
/// intended for internal use
pub mod utils;

pub use batchsd::{batchsd, batchsd_axis, DEFAULT_BATCHES};
pub use error::{Error, Result};
pub use hpd::{calc_min_interval, hpd, hpd_axis};
pub use indices::{make_indices, Indices};
pub use quantiles::{calc_quantiles, calc_quantiles_axis, Quantiles, DEFAULT_QUANTILES};

/// One-dimensional vector of numeric values
pub type Array1 = Vec<f64>;
/// Multi-dimensional array of samples, draws on the trailing axis
pub type Trace = ndarray::ArrayD<f64>;
