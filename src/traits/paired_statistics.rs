use crate::{Result, Sample};

/// Method-call form of [`crate::covariance`] for any sequence of samples
///
/// # Examples
///
/// ```
/// use seq_statistics::CovarianceExt;
///
/// let cov = vec![1, 2, 3, 4, 5].covariance([2, 4, 6, 8, 10]);
/// assert_eq!(cov, Ok(4.0));
///
/// let cov = [1.0, 2.0, 3.0].iter().copied().covariance([3.0, 2.0, 1.0]);
/// assert_eq!(cov, Ok(-2.0 / 3.0));
/// ```
pub trait CovarianceExt<T: Sample>: IntoIterator<Item = T> + Sized {
    /// Returns the population covariance of `self` paired with `other`
    ///
    /// # Arguments
    ///
    /// * `other` - The second sequence, paired positionally with `self`
    ///
    /// # Returns
    ///
    /// * `Result<T::Output>` - The covariance
    fn covariance<O>(self, other: O) -> Result<T::Output>
    where
        O: IntoIterator<Item = T>,
    {
        crate::covariance(self, other)
    }
}

impl<T: Sample, I> CovarianceExt<T> for I where I: IntoIterator<Item = T> {}

/// Method-call form of [`crate::covariance_optional`] for sequences with missing entries
///
/// # Examples
///
/// ```
/// use seq_statistics::PresentCovarianceExt;
///
/// let cov = [Some(1), None, Some(3)].present_covariance([Some(10), None, Some(30)]);
/// assert_eq!(cov, Ok(Some(10.0)));
///
/// let cov = [None::<f64>, None].present_covariance([Some(1.0), Some(2.0)]);
/// assert_eq!(cov, Ok(None));
/// ```
pub trait PresentCovarianceExt<T: Sample>: IntoIterator<Item = Option<T>> + Sized {
    /// Returns the population covariance of the present values of `self` and `other`
    ///
    /// # Arguments
    ///
    /// * `other` - The second sequence, filtered independently of `self`
    ///
    /// # Returns
    ///
    /// * `Result<Option<T::Output>>` - The covariance, `None` if `self` has no present value
    fn present_covariance<O>(self, other: O) -> Result<Option<T::Output>>
    where
        O: IntoIterator<Item = Option<T>>,
    {
        crate::covariance_optional(self, other)
    }
}

impl<T: Sample, I> PresentCovarianceExt<T> for I where I: IntoIterator<Item = Option<T>> {}
