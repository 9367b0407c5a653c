use thiserror::Error;

/// Errors raised while summarizing a trace
#[derive(Error, Debug)]
pub enum Error {
    /// The trace holds too few samples for the requested interval or quantile
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A caller supplied `alpha`, `batches`, quantile or axis is out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Reassembling per-variable results into an array failed
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Checks that `alpha` is a usable two-sided error probability, i.e. in (0, 1).
    pub fn check_alpha(alpha: f64) -> Result<()> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "alpha must be in (0, 1), got {}",
                alpha
            )));
        }
        Ok(())
    }

    /// Checks that a quantile percentage is in [0, 100].
    pub fn check_percentage(q: f64) -> Result<()> {
        if !(0.0..=100.0).contains(&q) {
            return Err(Error::InvalidParameter(format!(
                "quantile must be in [0, 100], got {}",
                q
            )));
        }
        Ok(())
    }

    /// Checks that no sample is NaN, since those can't be ordered.
    pub fn check_orderable(samples: &[f64]) -> Result<()> {
        if samples.iter().any(|x| x.is_nan()) {
            return Err(Error::InvalidParameter(
                "samples must not contain NaN".to_string(),
            ));
        }
        Ok(())
    }
}
