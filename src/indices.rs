use crate::error::{Error, Result};
use ndarray::IxDyn;

/// Every coordinate of a rectangular grid, fully materialized.
///
/// A grid with a single axis is kept as plain positions rather than
/// one-element tuples, so callers can tell univariate and multivariate
/// traces apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indices {
    Univariate(Vec<usize>),
    Multivariate(Vec<Vec<usize>>),
}

impl Indices {
    pub fn len(&self) -> usize {
        match self {
            Indices::Univariate(positions) => positions.len(),
            Indices::Multivariate(tuples) => tuples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the coordinates as ndarray indices.  A univariate
    /// position `i` is yielded as the one-axis index `[i]`.
    pub fn iter(&self) -> Box<dyn Iterator<Item = IxDyn> + '_> {
        match self {
            Indices::Univariate(positions) => Box::new(positions.iter().map(|&i| IxDyn(&[i]))),
            Indices::Multivariate(tuples) => Box::new(tuples.iter().map(|t| IxDyn(t))),
        }
    }
}

/// Generates the complete set of coordinates for a grid with the given
/// per-axis extents, i.e. the Cartesian product `0..d1 x ... x 0..dk`.
///
/// With a single extent `d` the result is just the positions `0..d`.  An
/// empty list of extents describes a scalar and yields one empty coordinate.
/// Coordinates come out in row-major order, though callers should only rely
/// on every cell being present exactly once.
pub fn make_indices(dimensions: &[usize]) -> Result<Indices> {
    if let Some(axis) = dimensions.iter().position(|&d| d == 0) {
        return Err(Error::InvalidParameter(format!(
            "axis {} has zero extent, extents must be positive",
            axis
        )));
    }
    if dimensions.len() == 1 {
        return Ok(Indices::Univariate((0..dimensions[0]).collect()));
    }

    let mut indices: Vec<Vec<usize>> = vec![Vec::new()];
    // build from the last axis outward, prepending each new leading coordinate
    for &extent in dimensions.iter().rev() {
        let mut next = Vec::with_capacity(indices.len() * extent);
        for j in 0..extent {
            for tail in indices.iter() {
                let mut index = Vec::with_capacity(tail.len() + 1);
                index.push(j);
                index.extend_from_slice(tail);
                next.push(index);
            }
        }
        indices = next;
    }
    Ok(Indices::Multivariate(indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Dimension;
    use std::collections::HashSet;

    #[test]
    fn test_univariate_indices() {
        let indices = make_indices(&[4]).unwrap();
        assert_eq!(indices, Indices::Univariate(vec![0, 1, 2, 3]));
        assert_eq!(indices.len(), 4);
        let as_ix: Vec<IxDyn> = indices.iter().collect();
        assert_eq!(as_ix[2], IxDyn(&[2]));
    }

    #[test]
    fn test_two_dimensional_indices() {
        let indices = make_indices(&[2, 3]).unwrap();
        assert_eq!(indices.len(), 6);
        let distinct: HashSet<Vec<usize>> = match &indices {
            Indices::Multivariate(tuples) => tuples.iter().cloned().collect(),
            Indices::Univariate(_) => panic!("expected tuples for a 2-d grid"),
        };
        let mut expected = HashSet::new();
        for i in 0..2 {
            for j in 0..3 {
                expected.insert(vec![i, j]);
            }
        }
        assert_eq!(distinct, expected);
    }

    #[test]
    fn test_three_dimensional_indices() {
        let indices = make_indices(&[2, 1, 3]).unwrap();
        assert_eq!(indices.len(), 6);
        assert!(indices.iter().all(|ix| ix.ndim() == 3));
        assert!(indices.iter().all(|ix| ix[1] == 0 && ix[0] < 2 && ix[2] < 3));
    }

    #[test]
    fn test_scalar_grid() {
        let indices = make_indices(&[]).unwrap();
        assert_eq!(indices, Indices::Multivariate(vec![vec![]]));
    }

    #[test]
    fn test_zero_extent() {
        assert!(matches!(
            make_indices(&[3, 0]),
            Err(Error::InvalidParameter(_))
        ));
        assert!(make_indices(&[0]).is_err());
    }
}
