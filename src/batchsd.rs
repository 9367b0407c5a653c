use crate::error::{Error, Result};
use crate::utils::{check_leading_extents, mean, move_axis_last, std_dev, trailing_axis};
use crate::Trace;
use log::{debug, warn};
use ndarray::{ArrayBase, ArrayD, ArrayViewD, Axis, Data, Dimension, IxDyn};

/// Number of batches used when the caller has no better choice.
pub const DEFAULT_BATCHES: usize = 5;

/// Computes the batch means standard error of a single chain of draws.
///
/// The draws are split into `batches` contiguous batches of
/// `floor(n / batches)` draws each, any `n % batches` trailing draws are
/// dropped, and the standard deviation of the batch means is scaled by
/// `1 / sqrt(batches)`.  With a single batch this is the ordinary standard
/// error of the mean.  Standard deviations use divisor `n`.
///
/// # Arguments
/// * `trace` - Draws of one scalar variable, in sampling order
/// * `batches` - Number of batches, between 1 and the number of draws
pub fn batch_standard_error(trace: &[f64], batches: usize) -> Result<f64> {
    if batches == 0 || batches > trace.len() {
        return Err(Error::InvalidParameter(format!(
            "batches must be between 1 and the number of samples ({}), got {}",
            trace.len(),
            batches
        )));
    }
    if batches == 1 {
        return Ok(std_dev(trace)? / (trace.len() as f64).sqrt());
    }

    let batch_size = trace.len() / batches;
    let means = trace[..batch_size * batches]
        .chunks(batch_size)
        .map(mean)
        .collect::<Result<Vec<f64>>>()?;
    Ok(std_dev(&means)? / (batches as f64).sqrt())
}

/// Calculates the simulation standard error of a trace, accounting for
/// autocorrelated samples.  Each variable's draws are divided into batches
/// and the standard deviation of the batch means is reported.
///
/// Draws are expected on the trailing axis; a trace of shape
/// `(d1, ..., dk, n)` gives an array of shape `(d1, ..., dk)`, and a
/// univariate trace gives a 0-dimensional array.
pub fn batchsd<S, D>(trace: &ArrayBase<S, D>, batches: usize) -> Result<Trace>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let axis = trailing_axis(trace.ndim())?;
    batchsd_axis(trace, axis, batches)
}

/// Same as [`batchsd`], but with the draws on `axis`.
pub fn batchsd_axis<S, D>(trace: &ArrayBase<S, D>, axis: Axis, batches: usize) -> Result<Trace>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let tx = move_axis_last(trace, axis)?;
    check_leading_extents(&tx)?;
    let n = tx.shape()[tx.ndim() - 1];
    if batches == 0 || batches > n {
        return Err(Error::InvalidParameter(format!(
            "batches must be between 1 and the number of samples ({}), got {}",
            n, batches
        )));
    }
    debug!(
        "batchsd over shape {:?} with {} batches",
        &tx.shape()[..tx.ndim() - 1],
        batches
    );
    if n % batches != 0 {
        warn!(
            "{} samples don't split into {} equal batches, dropping the last {}",
            n,
            batches,
            n % batches
        );
    }
    batchsd_recursive(tx, batches)
}

fn batchsd_recursive(trace: ArrayViewD<'_, f64>, batches: usize) -> Result<ArrayD<f64>> {
    if trace.ndim() == 1 {
        let samples: Vec<f64> = trace.iter().copied().collect();
        let se = batch_standard_error(&samples, batches)?;
        return Ok(ArrayD::from_elem(IxDyn(&[]), se));
    }

    // peel off the leading axis and stitch the results back together
    let leading = trace.shape()[..trace.ndim() - 1].to_vec();
    let mut values = Vec::new();
    for sub in trace.outer_iter() {
        values.extend(batchsd_recursive(sub, batches)?.iter().copied());
    }
    Ok(ArrayD::from_shape_vec(IxDyn(&leading), values)?)
}
