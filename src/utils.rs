use crate::error::{Error, Result};
use average::{Estimate, Mean, Variance};
use ndarray::{ArrayBase, ArrayD, ArrayViewD, Axis, Data, Dimension};

/// Compute the arithmetic mean of an array.
pub fn mean(arr: &[f64]) -> Result<f64> {
    if arr.is_empty() {
        return Err(Error::InsufficientData(
            "Can't take mean of empty array".to_string(),
        ));
    }
    let mut acc = Mean::new();
    for &x in arr {
        acc.add(x);
    }
    Ok(acc.mean())
}

/// Compute the population standard deviation of an array (divisor `n`, no
/// Bessel's correction).
pub fn std_dev(arr: &[f64]) -> Result<f64> {
    if arr.is_empty() {
        return Err(Error::InsufficientData(
            "Can't take standard deviation of empty array".to_string(),
        ));
    }
    if arr.len() == 1 {
        return Ok(0.0);
    }
    let mut acc = Variance::new();
    for &x in arr {
        acc.add(x);
    }
    let n = arr.len() as f64;
    Ok((acc.sample_variance() * (n - 1.0) / n).sqrt())
}

/// Returns a sorted copy of `arr`, leaving the input untouched.
pub fn sorted(arr: &[f64]) -> Result<Vec<f64>> {
    Error::check_orderable(arr)?;
    let mut out = arr.to_vec();
    out.sort_by(|a, b| a.total_cmp(b));
    Ok(out)
}

/// The trailing axis of an array of rank `ndim`, where the draws live by default.
pub fn trailing_axis(ndim: usize) -> Result<Axis> {
    if ndim == 0 {
        return Err(Error::InvalidParameter(
            "trace must have at least one axis".to_string(),
        ));
    }
    Ok(Axis(ndim - 1))
}

/// Returns a view of `x` in which `axis` has been moved to the end.  The
/// remaining axes keep their relative order.
pub fn move_axis_last<S, D>(x: &ArrayBase<S, D>, axis: Axis) -> Result<ArrayViewD<'_, f64>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let ndim = x.ndim();
    if axis.index() >= ndim {
        return Err(Error::InvalidParameter(format!(
            "sample axis {} out of range for array of rank {}",
            axis.index(),
            ndim
        )));
    }
    let mut order: Vec<usize> = (0..ndim).filter(|&a| a != axis.index()).collect();
    order.push(axis.index());
    Ok(x.view().into_dyn().permuted_axes(order))
}

/// Checks that every axis but the trailing (sample) one has a positive
/// extent.  A trace with an empty leading axis describes no variables at all.
pub fn check_leading_extents(x: &ArrayViewD<'_, f64>) -> Result<()> {
    let last = trailing_axis(x.ndim())?;
    if let Some(axis) = x.shape()[..last.index()].iter().position(|&d| d == 0) {
        return Err(Error::InvalidParameter(format!(
            "axis {} has zero extent, traces need at least one variable per axis",
            axis
        )));
    }
    Ok(())
}

/// Returns an owned copy of `x` with every lane along the trailing axis
/// sorted ascending.
pub fn sort_trailing(x: &ArrayViewD<'_, f64>) -> Result<ArrayD<f64>> {
    let last = trailing_axis(x.ndim())?;
    let mut out = x.to_owned();
    for mut lane in out.lanes_mut(last) {
        let lane_sorted = sorted(&lane.to_vec())?;
        for (dst, src) in lane.iter_mut().zip(lane_sorted) {
            *dst = src;
        }
    }
    Ok(out)
}
