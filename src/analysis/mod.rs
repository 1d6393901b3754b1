//! Statistical analysis toolkit: descriptive statistics, approximate
//! distribution CDFs, hypothesis tests, and correlation.

pub mod correlation;
pub mod descriptive;
pub mod distributions;
pub mod hypothesis;

pub use correlation::{correlation_matrix, pearson_correlation, CorrelationMatrix};
pub use descriptive::{calculate_basic_stats, confidence_interval, BasicStats, ConfidenceInterval};
pub use hypothesis::{chi_square_test, one_way_anova, welch_t_test};
