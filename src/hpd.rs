use crate::error::{Error, Result};
use crate::indices::make_indices;
use crate::utils::{check_leading_extents, move_axis_last, sort_trailing, sorted, trailing_axis};
use crate::Trace;
use log::debug;
use ndarray::{arr1, ArrayBase, ArrayD, Axis, Data, Dimension, IxDyn};

/// Finds the narrowest window of adjacent samples covering a `1 - alpha`
/// share of the draws.
///
/// The window spans `floor((1 - alpha) * n)` positions, and among the
/// `n - floor((1 - alpha) * n)` candidates the one with the smallest width
/// wins (ties go to the lowest starting position).  Both bounds are actual
/// sample values, no interpolation happens.
///
/// # Arguments
/// * `x` - Samples sorted ascending
/// * `alpha` - Desired two-sided error probability, in (0, 1)
pub fn calc_min_interval(x: &[f64], alpha: f64) -> Result<(f64, f64)> {
    Error::check_alpha(alpha)?;
    let n = x.len();
    let cred_mass = 1.0 - alpha;

    let interval_idx_inc = (cred_mass * n as f64).floor() as usize;
    let n_intervals = n.saturating_sub(interval_idx_inc);
    if n_intervals == 0 {
        return Err(Error::InsufficientData(format!(
            "Too few elements for interval calculation ({} samples, alpha={})",
            n, alpha
        )));
    }

    let mut min_idx = 0;
    let mut min_width = x[interval_idx_inc] - x[0];
    for i in 1..n_intervals {
        let width = x[i + interval_idx_inc] - x[i];
        if width < min_width {
            min_width = width;
            min_idx = i;
        }
    }
    Ok((x[min_idx], x[min_idx + interval_idx_inc]))
}

/// Calculates the highest posterior density (HPD) interval of a trace for the
/// given `alpha`.  The HPD is the minimum width Bayesian credible interval.
///
/// The draws are expected on the trailing axis.  For a trace of shape
/// `(d1, ..., dk, n)` the result has shape `(d1, ..., dk, 2)`, holding the
/// lower and upper bound for every variable; a univariate trace gives a
/// two-element array.  The input is never modified.
///
/// # Arguments
/// * `x` - Array of MCMC samples
/// * `alpha` - Desired probability of type I error, in (0, 1)
pub fn hpd<S, D>(x: &ArrayBase<S, D>, alpha: f64) -> Result<Trace>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let axis = trailing_axis(x.ndim())?;
    hpd_axis(x, axis, alpha)
}

/// Same as [`hpd`], but with the draws on `axis`.  The remaining axes keep
/// their order in the output, followed by the `(lower, upper)` axis.
pub fn hpd_axis<S, D>(x: &ArrayBase<S, D>, axis: Axis, alpha: f64) -> Result<Trace>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    Error::check_alpha(alpha)?;
    let tx = move_axis_last(x, axis)?;
    check_leading_extents(&tx)?;

    if tx.ndim() == 1 {
        let sx = sorted(&tx.iter().copied().collect::<Vec<f64>>())?;
        let (lower, upper) = calc_min_interval(&sx, alpha)?;
        return Ok(arr1(&[lower, upper]).into_dyn());
    }

    let sx = sort_trailing(&tx)?;
    let dims = sx.shape();
    let leading = &dims[..dims.len() - 1];
    debug!(
        "hpd over {:?} variables with {} samples each, alpha={}",
        leading,
        dims[dims.len() - 1],
        alpha
    );

    let mut out_shape = leading.to_vec();
    out_shape.push(2);
    let mut intervals = ArrayD::<f64>::zeros(IxDyn(&out_shape));

    for index in make_indices(leading)?.iter() {
        let mut lane = sx.view();
        for &i in index.slice() {
            lane = lane.index_axis_move(Axis(0), i);
        }
        let samples: Vec<f64> = lane.iter().copied().collect();
        let (lower, upper) = calc_min_interval(&samples, alpha)?;

        let mut cell = index.slice().to_vec();
        cell.push(0);
        intervals[IxDyn(&cell)] = lower;
        let last = cell.len() - 1;
        cell[last] = 1;
        intervals[IxDyn(&cell)] = upper;
    }
    Ok(intervals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{s, Array, Array1, Array2, Array3};
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn pseudo_samples(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..n).map(|_| rng.gen::<f64>()).collect()
    }

    #[test]
    fn test_min_interval_ties_go_to_first_window() {
        let x: Vec<f64> = (1..=10).map(|v| v as f64).collect();
        let (lower, upper) = calc_min_interval(&x, 0.2).unwrap();
        assert_eq!((lower, upper), (1.0, 9.0));
    }

    #[test]
    fn test_min_interval_picks_dense_region() {
        let x = vec![0.0, 0.1, 0.2, 0.3, 5.0, 10.0];
        let (lower, upper) = calc_min_interval(&x, 0.5).unwrap();
        assert_eq!(lower, 0.0);
        assert_eq!(upper, 0.3);
    }

    #[test]
    fn test_min_interval_too_few_elements() {
        let empty: Vec<f64> = vec![];
        assert!(matches!(
            calc_min_interval(&empty, 0.05),
            Err(Error::InsufficientData(_))
        ));
        // 1 - alpha rounds to exactly 1, leaving no candidate window
        assert!(matches!(
            calc_min_interval(&[1.0, 2.0, 3.0], 1e-18),
            Err(Error::InsufficientData(_))
        ));
    }

    #[test]
    fn test_min_interval_rejects_bad_alpha() {
        let x = vec![1.0, 2.0, 3.0];
        assert!(matches!(
            calc_min_interval(&x, 0.0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            calc_min_interval(&x, 1.5),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_hpd_univariate() {
        let x = Array1::from(vec![10.0, 0.3, 0.0, 5.0, 0.2, 0.1]);
        let interval = hpd(&x, 0.5).unwrap();
        assert_eq!(interval.shape(), &[2]);
        assert_eq!(interval[[0]], 0.0);
        assert_eq!(interval[[1]], 0.3);
        // untouched
        assert_eq!(x[0], 10.0);
    }

    #[test]
    fn test_hpd_multivariate_matches_each_slice() {
        let values = pseudo_samples(2 * 3 * 50, 7);
        let x = Array3::from_shape_vec((2, 3, 50), values).unwrap();
        let before = x.clone();
        let intervals = hpd(&x, 0.1).unwrap();
        assert_eq!(intervals.shape(), &[2, 3, 2]);
        assert_eq!(x, before);

        for i in 0..2 {
            for j in 0..3 {
                let single = hpd(&x.slice(s![i, j, ..]), 0.1).unwrap();
                assert_eq!(intervals[[i, j, 0]], single[[0]]);
                assert_eq!(intervals[[i, j, 1]], single[[1]]);
                assert!(intervals[[i, j, 0]] <= intervals[[i, j, 1]]);
            }
        }
    }

    #[test]
    fn test_hpd_sample_first_layout() {
        let values = pseudo_samples(40 * 3, 11);
        let sample_first = Array2::from_shape_vec((40, 3), values).unwrap();
        let trailing = sample_first.t().to_owned();
        let a = hpd_axis(&sample_first, Axis(0), 0.05).unwrap();
        let b = hpd(&trailing, 0.05).unwrap();
        assert_eq!(a.shape(), &[3, 2]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_hpd_errors() {
        let short = Array2::<f64>::zeros((2, 0));
        assert!(matches!(
            hpd(&short, 0.05),
            Err(Error::InsufficientData(_))
        ));
        let nan = Array1::from(vec![1.0, f64::NAN, 2.0]);
        assert!(matches!(hpd(&nan, 0.05), Err(Error::InvalidParameter(_))));
        let x = Array1::from(vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            hpd_axis(&x, Axis(1), 0.05),
            Err(Error::InvalidParameter(_))
        ));
        let scalar = Array::from_elem((), 1.0);
        assert!(hpd(&scalar, 0.05).is_err());
    }

    #[test]
    fn test_hpd_empty_leading_axis() {
        let no_variables = Array2::<f64>::zeros((0, 5));
        assert!(matches!(
            hpd(&no_variables, 0.05),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            hpd_axis(&Array2::<f64>::zeros((5, 0)), Axis(0), 0.05),
            Err(Error::InvalidParameter(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_interval_bounds_come_from_samples(
            values in prop::collection::btree_set(-10_000i32..10_000, 1..200),
            alpha in 0.01f64..0.99,
        ) {
            let x: Vec<f64> = values.into_iter().map(f64::from).collect();
            let (lower, upper) = calc_min_interval(&x, alpha).unwrap();
            prop_assert!(lower <= upper);
            prop_assert!(x.contains(&lower));
            prop_assert!(x.contains(&upper));

            let interval_idx_inc = ((1.0 - alpha) * x.len() as f64).floor() as usize;
            let covered = x.iter().filter(|&&v| lower <= v && v <= upper).count();
            prop_assert_eq!(covered, interval_idx_inc + 1);
        }

        #[test]
        fn prop_hpd_univariate_equals_min_interval(
            values in prop::collection::vec(-1e3f64..1e3, 1..100),
            alpha in 0.01f64..0.99,
        ) {
            let x = Array1::from(values.clone());
            let interval = hpd(&x, alpha).unwrap();

            let mut sx = values.clone();
            sx.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let (lower, upper) = calc_min_interval(&sx, alpha).unwrap();
            prop_assert_eq!(interval[[0]], lower);
            prop_assert_eq!(interval[[1]], upper);
            prop_assert_eq!(x.to_vec(), values);
        }
    }
}
