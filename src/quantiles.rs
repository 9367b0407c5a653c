use crate::error::{Error, Result};
use crate::utils::{check_leading_extents, move_axis_last, sort_trailing, trailing_axis};
use crate::Trace;
use log::debug;
use ndarray::{ArrayBase, Axis, Data, Dimension};

/// Percentages reported when the caller doesn't ask for specific ones.
pub const DEFAULT_QUANTILES: [f64; 5] = [2.5, 25.0, 50.0, 75.0, 97.5];

/// Requested percentages mapped to their values, in the order they were
/// first requested.  Values have the shape of the trace's leading axes, so a
/// univariate trace gives 0-dimensional arrays.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Quantiles {
    entries: Vec<(f64, Trace)>,
}

impl Quantiles {
    fn insert(&mut self, q: f64, value: Trace) {
        match self.entries.iter_mut().find(|(key, _)| *key == q) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((q, value)),
        }
    }

    pub fn get(&self, q: f64) -> Option<&Trace> {
        self.entries
            .iter()
            .find(|(key, _)| *key == q)
            .map(|(_, value)| value)
    }

    /// The scalar value at `q` for a univariate trace.  `None` if `q` wasn't
    /// requested or the trace was multivariate.
    pub fn value(&self, q: f64) -> Option<f64> {
        self.get(q)
            .filter(|value| value.ndim() == 0)
            .and_then(|value| value.iter().next().copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &Trace)> {
        self.entries.iter().map(|(q, value)| (*q, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Returns the requested quantiles of a trace, draws on the trailing axis.
///
/// Quantiles are nearest-rank: the value reported for percentage `q` is the
/// sorted sample at position `floor(n * q / 100)`, so it is always one of the
/// draws.  Asking for a position past the last draw (e.g. `q = 100`, or a
/// high percentage on a very short trace) is an error and nothing is
/// returned.
///
/// # Arguments
/// * `x` - Array of MCMC samples
/// * `qlist` - Percentages in [0, 100], see [`DEFAULT_QUANTILES`]
pub fn calc_quantiles<S, D>(x: &ArrayBase<S, D>, qlist: &[f64]) -> Result<Quantiles>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let axis = trailing_axis(x.ndim())?;
    calc_quantiles_axis(x, axis, qlist)
}

/// Same as [`calc_quantiles`], but with the draws on `axis`.
pub fn calc_quantiles_axis<S, D>(x: &ArrayBase<S, D>, axis: Axis, qlist: &[f64]) -> Result<Quantiles>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    for &q in qlist {
        Error::check_percentage(q)?;
    }
    let tx = move_axis_last(x, axis)?;
    check_leading_extents(&tx)?;
    let sx = sort_trailing(&tx)?;
    let sample_axis = Axis(sx.ndim() - 1);
    let n = sx.len_of(sample_axis);
    debug!("quantiles {:?} of {} samples per variable", qlist, n);

    let mut quantiles = Quantiles::default();
    for &q in qlist {
        let index = (n as f64 * q / 100.0).floor() as usize;
        if index >= n {
            return Err(Error::InsufficientData(format!(
                "Too few elements for quantile calculation: {}% needs sample {} of {}",
                q, index, n
            )));
        }
        quantiles.insert(q, sx.index_axis(sample_axis, index).to_owned());
    }
    Ok(quantiles)
}
