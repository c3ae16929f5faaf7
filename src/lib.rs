#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]

#[cfg_attr(test, macro_use)]
extern crate alloc;

mod error;
pub use error::{Operand, Result, StatisticsError};

mod utils;
pub use utils::helper;

mod sample;
pub use sample::Sample;

mod covariance;
pub use covariance::{checked_covariance, covariance, covariance_optional};

mod paired_statistics;
pub use paired_statistics::PairedStatistics;

mod traits;
pub use traits::{CovarianceExt, PresentCovarianceExt};
