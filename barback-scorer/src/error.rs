//! Error types raised while configuring rankers.

use thiserror::Error;

/// Errors raised when configuring a [`RecommendationScorer`](crate::RecommendationScorer).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecommendationError {
    /// The requested result limit was zero.
    #[error("recommendation limit must be at least one")]
    ZeroLimit,
}
