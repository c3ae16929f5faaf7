use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// Numeric element type accepted by the paired aggregates.
///
/// A `Sample` fixes the widening policy of a representation: the type the
/// arithmetic mean is held in, how a deviation cross-product reaches the `f64`
/// accumulator, and how the accumulated value is cast back to the output type.
///
/// | input     | mean      | output    |
/// |-----------|-----------|-----------|
/// | `i32`     | `f64`     | `f64`     |
/// | `i64`     | `f64`     | `f64`     |
/// | `f32`     | `f32`     | `f64`     |
/// | `f64`     | `f64`     | `f64`     |
/// | `Decimal` | `Decimal` | `Decimal` |
///
/// Cross-products are always summed in `f64`, so decimal inputs gain no
/// precision from the accumulation, only from the final cast.
pub trait Sample: Copy {
    /// Type the arithmetic mean is held in
    type Mean: Copy;

    /// Widened result type
    type Output: Copy;

    /// Returns the arithmetic mean of a non-empty slice
    ///
    /// # Arguments
    ///
    /// * `values` - The materialized sequence
    ///
    /// # Returns
    ///
    /// * `Option<Self::Mean>` - The mean, or `None` if the accumulator overflows
    fn mean(values: &[Self]) -> Option<Self::Mean>;

    /// Returns `(x - mean_x) * (y - mean_y)` as an `f64` accumulator term
    ///
    /// # Returns
    ///
    /// * `Option<f64>` - The cross-product, or `None` on fixed-point overflow
    fn cross_deviation(x: Self, mean_x: Self::Mean, y: Self, mean_y: Self::Mean) -> Option<f64>;

    /// Casts an accumulated `f64` back to the output type
    ///
    /// # Returns
    ///
    /// * `Option<Self::Output>` - The cast value, or `None` if it is not representable
    fn narrow(value: f64) -> Option<Self::Output>;
}

macro_rules! impl_integer_sample {
    ($($t:ty => $acc:ty),* $(,)?) => {
        $(
            impl Sample for $t {
                type Mean = f64;
                type Output = f64;

                #[inline]
                fn mean(values: &[Self]) -> Option<f64> {
                    let sum = values
                        .iter()
                        .try_fold(0, |sum: $acc, &v| sum.checked_add(<$acc>::from(v)))?;
                    Some(sum as f64 / values.len() as f64)
                }

                #[inline]
                fn cross_deviation(x: Self, mean_x: f64, y: Self, mean_y: f64) -> Option<f64> {
                    Some((x as f64 - mean_x) * (y as f64 - mean_y))
                }

                #[inline]
                fn narrow(value: f64) -> Option<f64> {
                    Some(value)
                }
            }
        )*
    };
}

impl_integer_sample!(i32 => i64, i64 => i128);

impl Sample for f32 {
    type Mean = f32;
    type Output = f64;

    // Summed in f64, held as f32
    #[inline]
    fn mean(values: &[Self]) -> Option<f32> {
        let sum: f64 = values.iter().map(|&v| f64::from(v)).sum();
        Some((sum / values.len() as f64) as f32)
    }

    #[inline]
    fn cross_deviation(x: Self, mean_x: f32, y: Self, mean_y: f32) -> Option<f64> {
        Some(f64::from((x - mean_x) * (y - mean_y)))
    }

    #[inline]
    fn narrow(value: f64) -> Option<f64> {
        Some(value)
    }
}

impl Sample for f64 {
    type Mean = f64;
    type Output = f64;

    #[inline]
    fn mean(values: &[Self]) -> Option<f64> {
        let sum: f64 = values.iter().sum();
        Some(sum / values.len() as f64)
    }

    #[inline]
    fn cross_deviation(x: Self, mean_x: f64, y: Self, mean_y: f64) -> Option<f64> {
        Some((x - mean_x) * (y - mean_y))
    }

    #[inline]
    fn narrow(value: f64) -> Option<f64> {
        Some(value)
    }
}

impl Sample for Decimal {
    type Mean = Decimal;
    type Output = Decimal;

    #[inline]
    fn mean(values: &[Self]) -> Option<Decimal> {
        let sum = values
            .iter()
            .try_fold(Decimal::ZERO, |sum, v| sum.checked_add(*v))?;
        sum.checked_div(Decimal::from(values.len() as u64))
    }

    #[inline]
    fn cross_deviation(x: Self, mean_x: Decimal, y: Self, mean_y: Decimal) -> Option<f64> {
        let dx = x.checked_sub(mean_x)?;
        let dy = y.checked_sub(mean_y)?;
        dx.checked_mul(dy)?.to_f64()
    }

    #[inline]
    fn narrow(value: f64) -> Option<Decimal> {
        Decimal::from_f64(value)
    }
}
