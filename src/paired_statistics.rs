use alloc::vec::Vec;

use num_traits::Float;
use tracing::trace;

use crate::{
    Operand, Result, Sample, StatisticsError,
    covariance::{co_moment, co_moments, cov_optional_with, cov_with, divisor, narrow},
    helper::materialize_pair,
};

/// A structure that computes statistics over pairs of sequences.
///
/// `PairedStatistics` carries the divisor configuration shared by its measures:
/// population statistics divide by `n`, and with the Delta Degrees of Freedom
/// set they divide by `n - 1`. Each call materializes its inputs, takes the
/// means in a first pass and the deviation cross-products in a second one.
///
/// The default configuration yields exactly the values of [`crate::covariance`]
/// and [`crate::covariance_optional`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairedStatistics {
    /// Delta Degrees of Freedom
    ddof: bool,
}

impl PairedStatistics {
    /// Creates a new `PairedStatistics` instance computing population statistics.
    ///
    /// # Returns
    ///
    /// * `Self` - The `PairedStatistics` instance
    pub const fn new() -> Self {
        Self { ddof: false }
    }

    /// Returns the Delta Degrees of Freedom
    ///
    /// # Returns
    ///
    /// * `bool` - The Delta Degrees of Freedom
    pub const fn ddof(&self) -> bool {
        self.ddof
    }

    /// Sets the Delta Degrees of Freedom
    ///
    /// # Arguments
    ///
    /// * `ddof` - The Delta Degrees of Freedom
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The statistics object
    pub const fn set_ddof(&mut self, ddof: bool) -> &mut Self {
        self.ddof = ddof;
        self
    }

    /// Returns the covariance of two paired sequences
    ///
    /// Covariance measures how two variables change together, indicating the direction
    /// of their linear relationship.
    ///
    /// # Arguments
    ///
    /// * `source` - The first sequence
    /// * `other` - The second sequence, paired positionally with `source`
    ///
    /// # Returns
    ///
    /// * `Result<T::Output>` - The covariance
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_statistics::PairedStatistics;
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let x = [2.0f64, 4.0, 6.0];
    /// let y = [1.0f64, 3.0, 2.0];
    ///
    /// let mut stats = PairedStatistics::new();
    /// assert_approx_eq!(stats.cov(x, y).unwrap(), 0.6667, 0.001);
    ///
    /// stats.set_ddof(true);
    /// assert_approx_eq!(stats.cov(x, y).unwrap(), 1.0, 0.001);
    /// ```
    pub fn cov<T, S, O>(&self, source: S, other: O) -> Result<T::Output>
    where
        T: Sample,
        S: IntoIterator<Item = T>,
        O: IntoIterator<Item = T>,
    {
        cov_with(source, other, self.ddof)
    }

    /// Returns the covariance of two sequences with missing entries
    ///
    /// Behaves like [`crate::covariance_optional`] with the configured divisor.
    ///
    /// # Arguments
    ///
    /// * `source` - The first sequence, `None` marking a missing entry
    /// * `other` - The second sequence, `None` marking a missing entry
    ///
    /// # Returns
    ///
    /// * `Result<Option<T::Output>>` - The covariance, `None` if `source` has no present value
    pub fn cov_optional<T, S, O>(&self, source: S, other: O) -> Result<Option<T::Output>>
    where
        T: Sample,
        S: IntoIterator<Item = Option<T>>,
        O: IntoIterator<Item = Option<T>>,
    {
        cov_optional_with(source, other, self.ddof)
    }

    /// Returns the variance of a sequence
    ///
    /// The covariance of the sequence with itself.
    ///
    /// # Arguments
    ///
    /// * `values` - The sequence
    ///
    /// # Returns
    ///
    /// * `Result<T::Output>` - The variance, or `EmptySequence` if there are no values
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_statistics::PairedStatistics;
    ///
    /// let values = [1, 2, 3, 4, 5];
    /// assert_eq!(PairedStatistics::new().var(values), Ok(2.0));
    /// assert_eq!(PairedStatistics::new().set_ddof(true).var(values), Ok(2.5));
    /// ```
    pub fn var<T, I>(&self, values: I) -> Result<T::Output>
    where
        T: Sample,
        I: IntoIterator<Item = T>,
    {
        narrow::<T>(self.raw_var(values)?)
    }

    /// Returns the standard deviation of a sequence
    ///
    /// The square root is taken on the `f64` variance before the cast to the output type.
    ///
    /// # Arguments
    ///
    /// * `values` - The sequence
    ///
    /// # Returns
    ///
    /// * `Result<T::Output>` - The standard deviation
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_statistics::PairedStatistics;
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let stddev = PairedStatistics::new().stddev([2.0f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    /// assert_approx_eq!(stddev, 2.0);
    /// ```
    pub fn stddev<T, I>(&self, values: I) -> Result<T::Output>
    where
        T: Sample,
        I: IntoIterator<Item = T>,
    {
        narrow::<T>(Float::sqrt(self.raw_var(values)?))
    }

    /// Returns the correlation coefficient (Pearson's r) of two paired sequences
    ///
    /// Correlation normalizes covariance by the product of standard deviations, producing
    /// a standardized measure of linear relationship strength between -1 and 1. The
    /// divisor cancels out, so the Delta Degrees of Freedom has no effect.
    ///
    /// # Arguments
    ///
    /// * `source` - The first sequence
    /// * `other` - The second sequence, paired positionally with `source`
    ///
    /// # Returns
    ///
    /// * `Result<T::Output>` - The correlation, or `ZeroVariance` naming a constant sequence
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_statistics::PairedStatistics;
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let stats = PairedStatistics::new();
    /// assert_approx_eq!(stats.corr([1i32, 2, 3, 4, 5], [2, 4, 6, 8, 10]).unwrap(), 1.0);
    /// assert_approx_eq!(stats.corr([1i32, 2, 3, 4, 5], [5, 4, 3, 2, 1]).unwrap(), -1.0);
    /// ```
    pub fn corr<T, S, O>(&self, source: S, other: O) -> Result<T::Output>
    where
        T: Sample,
        S: IntoIterator<Item = T>,
        O: IntoIterator<Item = T>,
    {
        let (source, other) = materialize_pair(source, other)?;
        trace!(samples = source.len(), "computing correlation");

        let sums = co_moments(&source, &other)?;
        if sums.xx == 0.0 {
            return Err(StatisticsError::ZeroVariance(Operand::Source));
        }
        if sums.yy == 0.0 {
            return Err(StatisticsError::ZeroVariance(Operand::Other));
        }

        narrow::<T>(sums.xy / (Float::sqrt(sums.xx) * Float::sqrt(sums.yy)))
    }

    /// Returns the beta coefficient of `source` against `other`
    ///
    /// Beta is the covariance of the pair divided by the variance of `other`, the
    /// sensitivity of the first series to moves in the second.
    ///
    /// # Arguments
    ///
    /// * `source` - The dependent sequence
    /// * `other` - The reference sequence, paired positionally with `source`
    ///
    /// # Returns
    ///
    /// * `Result<T::Output>` - The beta, or `ZeroVariance` if `other` is constant
    ///
    /// # Examples
    ///
    /// ```
    /// use seq_statistics::PairedStatistics;
    ///
    /// let beta = PairedStatistics::new().beta([2, 4, 6, 8, 10], [1, 2, 3, 4, 5]);
    /// assert_eq!(beta, Ok(2.0));
    /// ```
    pub fn beta<T, S, O>(&self, source: S, other: O) -> Result<T::Output>
    where
        T: Sample,
        S: IntoIterator<Item = T>,
        O: IntoIterator<Item = T>,
    {
        let (source, other) = materialize_pair(source, other)?;
        trace!(samples = source.len(), "computing beta");

        let sums = co_moments(&source, &other)?;
        if sums.yy == 0.0 {
            return Err(StatisticsError::ZeroVariance(Operand::Other));
        }

        narrow::<T>(sums.xy / sums.yy)
    }

    fn raw_var<T, I>(&self, values: I) -> Result<f64>
    where
        T: Sample,
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        if values.is_empty() {
            return Err(StatisticsError::EmptySequence(Operand::Source));
        }
        let d = divisor(values.len(), self.ddof)?;
        trace!(samples = values.len(), ddof = self.ddof, "computing variance");

        Ok(co_moment(&values, &values)? / d)
    }
}
