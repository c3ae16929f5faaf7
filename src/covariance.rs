use tracing::{debug, trace};

use crate::{
    Operand, Result, Sample, StatisticsError,
    helper::{materialize_pair, present_values},
};

/// Returns the sum of deviation cross-products of two equal-length, non-empty slices
///
/// Means are taken first, then `(x - mean_x) * (y - mean_y)` is accumulated in `f64`
/// over positional pairs.
pub(crate) fn co_moment<T: Sample>(source: &[T], other: &[T]) -> Result<f64> {
    let mean_source = T::mean(source).ok_or(StatisticsError::Overflow)?;
    let mean_other = T::mean(other).ok_or(StatisticsError::Overflow)?;

    source
        .iter()
        .zip(other)
        .try_fold(0.0, |acc, (&x, &y)| {
            T::cross_deviation(x, mean_source, y, mean_other).map(|p| acc + p)
        })
        .ok_or(StatisticsError::Overflow)
}

/// Co-moment sums of a pair, `(sum_xy, sum_xx, sum_yy)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CoMoments {
    pub xy: f64,
    pub xx: f64,
    pub yy: f64,
}

/// Returns the cross and self co-moments of two equal-length, non-empty slices
///
/// Each mean is taken once, then all three sums are accumulated in a single pass.
pub(crate) fn co_moments<T: Sample>(source: &[T], other: &[T]) -> Result<CoMoments> {
    let mean_source = T::mean(source).ok_or(StatisticsError::Overflow)?;
    let mean_other = T::mean(other).ok_or(StatisticsError::Overflow)?;

    source
        .iter()
        .zip(other)
        .try_fold(
            CoMoments {
                xy: 0.0,
                xx: 0.0,
                yy: 0.0,
            },
            |acc, (&x, &y)| {
                Some(CoMoments {
                    xy: acc.xy + T::cross_deviation(x, mean_source, y, mean_other)?,
                    xx: acc.xx + T::cross_deviation(x, mean_source, x, mean_source)?,
                    yy: acc.yy + T::cross_deviation(y, mean_other, y, mean_other)?,
                })
            },
        )
        .ok_or(StatisticsError::Overflow)
}

/// Returns the divisor for `n` samples, `n - 1` when `ddof` is set
pub(crate) fn divisor(n: usize, ddof: bool) -> Result<f64> {
    if ddof {
        if n < 2 {
            return Err(StatisticsError::InsufficientData {
                required: 2,
                found: n,
            });
        }
        Ok((n - 1) as f64)
    } else {
        Ok(n as f64)
    }
}

pub(crate) fn narrow<T: Sample>(value: f64) -> Result<T::Output> {
    T::narrow(value).ok_or(StatisticsError::Unrepresentable)
}

pub(crate) fn cov_with<T, S, O>(source: S, other: O, ddof: bool) -> Result<T::Output>
where
    T: Sample,
    S: IntoIterator<Item = T>,
    O: IntoIterator<Item = T>,
{
    let (source, other) = materialize_pair(source, other)?;
    let n = source.len();
    let d = divisor(n, ddof)?;
    trace!(samples = n, ddof, "computing covariance");

    narrow::<T>(co_moment(&source, &other)? / d)
}

pub(crate) fn cov_optional_with<T, S, O>(source: S, other: O, ddof: bool) -> Result<Option<T::Output>>
where
    T: Sample,
    S: IntoIterator<Item = Option<T>>,
    O: IntoIterator<Item = Option<T>>,
{
    let values = present_values(source);
    if values.is_empty() {
        debug!("source has no present values, covariance is undefined");
        return Ok(None);
    }

    // Filtered independently, not pairwise: differing gaps surface as a length mismatch
    cov_with(values, present_values(other), ddof).map(Some)
}

/// Computes the population covariance of two paired sequences.
///
/// Both sequences are materialized, their arithmetic means taken, and the
/// deviation cross-products of element `i` of `source` with element `i` of
/// `other` summed in `f64` and divided by the element count. The result is then
/// cast to the widened output type of `T` (see [`Sample`]).
///
/// # Arguments
///
/// * `source` - The first sequence
/// * `other` - The second sequence, paired positionally with `source`
///
/// # Returns
///
/// * `Result<T::Output>` - The covariance, or
///   - `EmptySequence` if either sequence has no elements
///   - `LengthMismatch` if the sequences have different lengths
///   - `Overflow` / `Unrepresentable` if a decimal computation leaves its range
///
/// # Examples
///
/// ```
/// use seq_statistics::covariance;
/// use rust_decimal_macros::dec;
///
/// let cov = covariance([1i32, 2, 3, 4, 5], [2, 4, 6, 8, 10]).unwrap();
/// assert_eq!(cov, 4.0);
///
/// let cov = covariance([dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)], [dec!(2), dec!(4), dec!(6), dec!(8), dec!(10)]).unwrap();
/// assert_eq!(cov, dec!(4));
/// ```
pub fn covariance<T, S, O>(source: S, other: O) -> Result<T::Output>
where
    T: Sample,
    S: IntoIterator<Item = T>,
    O: IntoIterator<Item = T>,
{
    cov_with(source, other, false)
}

/// Computes the population covariance of two possibly absent sequences.
///
/// Same as [`covariance`], with an absent argument reported as
/// `InvalidArgument` before any sequence is inspected.
///
/// # Arguments
///
/// * `source` - The first sequence, if any
/// * `other` - The second sequence, if any
///
/// # Returns
///
/// * `Result<T::Output>` - The covariance, or `InvalidArgument` naming the absent side
///
/// # Examples
///
/// ```
/// use seq_statistics::{Operand, StatisticsError, checked_covariance};
///
/// let res = checked_covariance(Some(vec![1.0, 2.0]), None::<Vec<f64>>);
/// assert_eq!(res, Err(StatisticsError::InvalidArgument(Operand::Other)));
/// ```
pub fn checked_covariance<T, S, O>(source: Option<S>, other: Option<O>) -> Result<T::Output>
where
    T: Sample,
    S: IntoIterator<Item = T>,
    O: IntoIterator<Item = T>,
{
    let source = source.ok_or(StatisticsError::InvalidArgument(Operand::Source))?;
    let other = other.ok_or(StatisticsError::InvalidArgument(Operand::Other))?;
    covariance(source, other)
}

/// Computes the population covariance of two sequences with missing entries.
///
/// Each sequence is reduced to its present values independently of the other.
/// When `source` has no present value there is nothing to compute and `Ok(None)`
/// is returned. Otherwise the filtered sequences go through [`covariance`], so
/// sequences whose missing positions differ end up with different lengths and
/// fail with `LengthMismatch` rather than being intersected.
///
/// # Arguments
///
/// * `source` - The first sequence, `None` marking a missing entry
/// * `other` - The second sequence, `None` marking a missing entry
///
/// # Returns
///
/// * `Result<Option<T::Output>>` - The covariance, `None` if `source` has no present value
///
/// # Examples
///
/// ```
/// use seq_statistics::{StatisticsError, covariance_optional};
///
/// let cov = covariance_optional([None::<i32>, None], [Some(1), Some(2)]).unwrap();
/// assert_eq!(cov, None);
///
/// let cov = covariance_optional([Some(1), None, Some(3)], [Some(10), None, Some(30)]).unwrap();
/// assert_eq!(cov, Some(10.0));
///
/// let res = covariance_optional([Some(1), None, Some(3)], [Some(10), Some(20), Some(30)]);
/// assert!(matches!(res, Err(StatisticsError::LengthMismatch { .. })));
/// ```
pub fn covariance_optional<T, S, O>(source: S, other: O) -> Result<Option<T::Output>>
where
    T: Sample,
    S: IntoIterator<Item = Option<T>>,
    O: IntoIterator<Item = Option<T>>,
{
    cov_optional_with(source, other, false)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use assert_approx_eq::assert_approx_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    const X: [f64; 6] = [0.496714, -0.138264, 0.647689, 1.523030, -0.234153, -0.234137];
    const Y: [f64; 6] = [0.115991, -0.329650, 0.574363, 0.109481, -1.026366, -0.445040];

    fn population_variance(values: &[f64]) -> f64 {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
    }

    #[test]
    fn test_covariance_scenario_across_types() {
        assert_eq!(covariance([1i32, 2, 3, 4, 5], [2, 4, 6, 8, 10]), Ok(4.0));
        assert_eq!(covariance([1i64, 2, 3, 4, 5], [2, 4, 6, 8, 10]), Ok(4.0));
        assert_eq!(covariance([1.0f32, 2.0, 3.0, 4.0, 5.0], [2.0, 4.0, 6.0, 8.0, 10.0]), Ok(4.0));
        assert_eq!(covariance([1.0f64, 2.0, 3.0, 4.0, 5.0], [2.0, 4.0, 6.0, 8.0, 10.0]), Ok(4.0));
        assert_eq!(
            covariance(
                [dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)],
                [dec!(2), dec!(4), dec!(6), dec!(8), dec!(10)]
            ),
            Ok(dec!(4))
        );
    }

    #[test]
    fn test_co_moments_match_single_co_moment() {
        let sums = co_moments(&X, &Y).unwrap();
        assert_eq!(sums.xy, co_moment(&X, &Y).unwrap());
        assert_eq!(sums.xx, co_moment(&X, &X).unwrap());
        assert_eq!(sums.yy, co_moment(&Y, &Y).unwrap());

        let sums = co_moments(&[dec!(1), dec!(2), dec!(3)], &[dec!(2), dec!(4), dec!(9)]).unwrap();
        assert_eq!(sums, CoMoments { xy: 7.0, xx: 2.0, yy: 26.0 });
    }

    #[test]
    fn test_co_moments_overflow() {
        assert_eq!(
            co_moments(&[Decimal::MAX, Decimal::MAX], &[dec!(1), dec!(2)]),
            Err(StatisticsError::Overflow)
        );
    }

    #[test]
    fn test_covariance_accepts_iterators() {
        let source: Vec<i32> = (1..=5).collect();
        let cov = covariance(source.iter().copied(), source.iter().map(|v| v * 2));
        assert_eq!(cov, Ok(4.0));
    }

    #[test]
    fn test_covariance_with_itself_is_variance() {
        assert_approx_eq!(covariance(X, X).unwrap(), population_variance(&X), 1e-12);
    }

    #[test]
    fn test_covariance_symmetry() {
        assert_eq!(covariance(X, Y), covariance(Y, X));
    }

    #[test]
    fn test_covariance_shift_invariance() {
        let base = covariance(X, Y).unwrap();
        let shifted = covariance(X.map(|v| v + 100.0), Y).unwrap();
        assert_approx_eq!(base, shifted, 1e-9);

        let shifted = covariance(X, Y.map(|v| v - 42.5)).unwrap();
        assert_approx_eq!(base, shifted, 1e-9);
    }

    #[test]
    fn test_covariance_linear_scaling() {
        let base = covariance(X, Y).unwrap();
        let scaled = covariance(X.map(|v| v * 3.0), Y).unwrap();
        assert_approx_eq!(scaled, 3.0 * base, 1e-12);

        let scaled = covariance(X, Y.map(|v| v * -0.5)).unwrap();
        assert_approx_eq!(scaled, -0.5 * base, 1e-12);
    }

    #[test]
    fn test_covariance_pairs_by_position() {
        // Reordering both sides identically keeps the value
        let base = covariance(X, Y).unwrap();
        let mut x = X;
        let mut y = Y;
        x.reverse();
        y.reverse();
        assert_approx_eq!(covariance(x, y).unwrap(), base, 1e-12);

        // Reordering one side does not
        assert!((covariance(x, Y).unwrap() - base).abs() > 1e-3);
    }

    #[test]
    fn test_covariance_empty_sequences() {
        assert_eq!(
            covariance(Vec::<f64>::new(), Vec::<f64>::new()),
            Err(StatisticsError::EmptySequence(Operand::Source))
        );
        assert_eq!(
            covariance([1.0], Vec::<f64>::new()),
            Err(StatisticsError::EmptySequence(Operand::Other))
        );
    }

    #[test]
    fn test_covariance_length_mismatch() {
        assert_eq!(
            covariance([1, 2, 3], [1, 2]),
            Err(StatisticsError::LengthMismatch {
                source_len: 3,
                other_len: 2
            })
        );
    }

    #[test]
    fn test_checked_covariance_absent_arguments() {
        assert_eq!(
            checked_covariance(None::<Vec<i32>>, Some(vec![1])),
            Err(StatisticsError::InvalidArgument(Operand::Source))
        );
        // Absence is reported before emptiness
        assert_eq!(
            checked_covariance(Some(Vec::<i32>::new()), None::<Vec<i32>>),
            Err(StatisticsError::InvalidArgument(Operand::Other))
        );
        assert_eq!(checked_covariance(Some([1, 2, 3]), Some([3, 2, 1])), Ok(-2.0 / 3.0));
    }

    #[test]
    fn test_integer_inputs_do_not_overflow() {
        assert_eq!(covariance([i32::MAX, i32::MAX], [1, 2]), Ok(0.0));
        assert_eq!(covariance([i64::MIN, i64::MIN], [i64::MAX, i64::MAX]), Ok(0.0));
    }

    #[test]
    fn test_f32_result_is_widened() {
        let cov: f64 = covariance([1.0f32, 2.0, 3.0], [1.0f32, 2.0, 3.0]).unwrap();
        assert_eq!(cov, 2.0 / 3.0);
    }

    #[test]
    fn test_decimal_matches_reference_within_last_place() {
        let source = [dec!(1.5), dec!(2.5), dec!(3.5)];
        let other = [dec!(2), dec!(4), dec!(7)];

        let n = Decimal::from(3u64);
        let mean_s = source.iter().sum::<Decimal>() / n;
        let mean_o = other.iter().sum::<Decimal>() / n;
        let reference = source
            .iter()
            .zip(other.iter())
            .map(|(s, o)| (s - mean_s) * (o - mean_o))
            .sum::<Decimal>()
            / n;

        let cov = covariance(source, other).unwrap();
        assert!((cov - reference).abs() <= dec!(0.000000000000001));
    }

    #[test]
    fn test_decimal_overflow() {
        assert_eq!(
            covariance([Decimal::MAX, Decimal::MAX], [dec!(1), dec!(2)]),
            Err(StatisticsError::Overflow)
        );
    }

    #[test]
    fn test_optional_no_result() {
        assert_eq!(covariance_optional([None::<i32>, None], [Some(1), Some(2)]), Ok(None));
        assert_eq!(covariance_optional(Vec::<Option<f64>>::new(), Vec::new()), Ok(None));
    }

    #[test]
    fn test_optional_filters_independently() {
        assert_eq!(
            covariance_optional([Some(1), None, Some(3)], [Some(10), Some(20), Some(30)]),
            Err(StatisticsError::LengthMismatch {
                source_len: 2,
                other_len: 3
            })
        );
        // Gaps at different positions with equal counts still pair up
        assert_eq!(
            covariance_optional([Some(1), None, Some(3)], [None, Some(10), Some(30)]),
            Ok(Some(10.0))
        );
    }

    #[test]
    fn test_optional_all_missing_other() {
        assert_eq!(
            covariance_optional([Some(1.0), Some(2.0)], [None, None]),
            Err(StatisticsError::EmptySequence(Operand::Other))
        );
    }

    #[test]
    fn test_optional_decimal() {
        let cov = covariance_optional(
            [Some(dec!(1)), None, Some(dec!(2)), Some(dec!(3)), Some(dec!(4)), Some(dec!(5))],
            [Some(dec!(2)), Some(dec!(4)), Some(dec!(6)), Some(dec!(8)), Some(dec!(10)), None],
        );
        assert_eq!(cov, Ok(Some(dec!(4))));
    }
}
