//! Sequence helpers shared by the paired statistics

use alloc::vec::Vec;

use crate::{Operand, Result, StatisticsError};

/// Returns the present values of a sequence of optional values, in order
///
/// # Arguments
///
/// * `values` - The sequence, where `None` marks a missing entry
///
/// # Returns
///
/// * `Vec<T>` - The present values
#[inline]
pub fn present_values<T, I>(values: I) -> Vec<T>
where
    I: IntoIterator<Item = Option<T>>,
{
    values.into_iter().flatten().collect()
}

/// Materializes a pair of sequences and validates them for a paired statistic
///
/// Emptiness is checked for `source` before `other`, and both before lengths.
///
/// # Arguments
///
/// * `source` - The first sequence
/// * `other` - The second sequence, paired positionally with `source`
///
/// # Returns
///
/// * `Result<(Vec<T>, Vec<T>)>` - Both sequences as indexable containers of equal length
pub fn materialize_pair<T, S, O>(source: S, other: O) -> Result<(Vec<T>, Vec<T>)>
where
    S: IntoIterator<Item = T>,
    O: IntoIterator<Item = T>,
{
    let source: Vec<T> = source.into_iter().collect();
    if source.is_empty() {
        return Err(StatisticsError::EmptySequence(Operand::Source));
    }

    let other: Vec<T> = other.into_iter().collect();
    if other.is_empty() {
        return Err(StatisticsError::EmptySequence(Operand::Other));
    }

    if source.len() != other.len() {
        return Err(StatisticsError::LengthMismatch {
            source_len: source.len(),
            other_len: other.len(),
        });
    }

    Ok((source, other))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_values() {
        assert_eq!(present_values([Some(1), None, Some(3)]), vec![1, 3]);
        assert!(present_values::<i32, _>([None, None]).is_empty());
    }

    #[test]
    fn test_materialize_pair_checks_source_first() {
        let res = materialize_pair(Vec::<i32>::new(), Vec::<i32>::new());
        assert_eq!(res, Err(StatisticsError::EmptySequence(Operand::Source)));

        let res = materialize_pair(vec![1], Vec::<i32>::new());
        assert_eq!(res, Err(StatisticsError::EmptySequence(Operand::Other)));
    }

    #[test]
    fn test_materialize_pair_length_mismatch() {
        let res = materialize_pair(vec![1, 2], vec![1, 2, 3]);
        assert_eq!(
            res,
            Err(StatisticsError::LengthMismatch {
                source_len: 2,
                other_len: 3
            })
        );
    }

    #[test]
    fn test_materialize_pair_from_iterators() {
        let res = materialize_pair((1..=3).map(|v| v * 2), [5, 6, 7].iter().copied());
        assert_eq!(res, Ok((vec![2, 4, 6], vec![5, 6, 7])));
    }
}
