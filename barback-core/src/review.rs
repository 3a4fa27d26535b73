//! Star ratings left by users for a cocktail at a place.

use std::fmt;

use thiserror::Error;

use crate::{CocktailId, PlaceId, UserId};

/// Internal identifier of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ReviewId(u64);

impl ReviewId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors returned by [`Rating::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatingError {
    /// The score was outside the star range.
    #[error("rating {value} is outside {min}..={max}", min = Rating::MIN, max = Rating::MAX)]
    OutOfRange {
        /// Rejected score.
        value: u8,
    },
}

/// A star rating between [`Rating::MIN`] and [`Rating::MAX`].
///
/// # Examples
/// ```
/// use barback_core::Rating;
///
/// assert_eq!(Rating::new(4).map(Rating::get), Ok(4));
/// assert!(Rating::new(0).is_err());
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted score.
    pub const MIN: u8 = 1;
    /// Highest accepted score.
    pub const MAX: u8 = 5;

    /// Validate and wrap a score.
    ///
    /// # Errors
    /// Returns [`RatingError::OutOfRange`] outside `1..=5`.
    pub const fn new(value: u8) -> Result<Self, RatingError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(RatingError::OutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Return the score.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// A user's rating of a cocktail served at a place.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Review {
    /// Internal identifier.
    pub id: ReviewId,
    /// Author of the review.
    pub user: UserId,
    /// Reviewed cocktail.
    pub cocktail: CocktailId,
    /// Place where the cocktail was served.
    pub place: PlaceId,
    /// Star rating.
    pub rating: Rating,
    /// Free-form comment.
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    fn accepts_star_range(#[case] value: u8) {
        assert_eq!(Rating::new(value).map(Rating::get), Ok(value));
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(u8::MAX)]
    fn rejects_out_of_range(#[case] value: u8) {
        assert_eq!(Rating::new(value), Err(RatingError::OutOfRange { value }));
    }

    #[rstest]
    fn error_message_names_bounds() {
        let err = Rating::new(9).expect_err("nine stars is too many");
        assert_eq!(err.to_string(), "rating 9 is outside 1..=5");
    }
}
