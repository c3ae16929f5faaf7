mod paired_statistics;
pub use paired_statistics::{CovarianceExt, PresentCovarianceExt};
