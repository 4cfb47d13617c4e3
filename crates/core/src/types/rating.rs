//! Star rating type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The input is not a whole number.
    #[error("rating must be a whole number")]
    NotANumber,
    /// The value is outside the accepted star range. Zero lands here too.
    #[error("rating must be between {min} and {max} (got {value})")]
    OutOfRange {
        /// Value that was supplied.
        value: i64,
        /// Lowest accepted rating.
        min: u8,
        /// Highest accepted rating.
        max: u8,
    },
}

/// A review rating of one to five stars.
///
/// Zero is not a rating: a form that submits `0` has not rated the product.
///
/// ```
/// use mittens_core::Rating;
///
/// assert_eq!(Rating::parse("4").map(Rating::get), Ok(4));
/// assert!(Rating::parse("0").is_err());
/// assert!(Rating::parse("six").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest rating.
    pub const MIN: u8 = 1;
    /// Highest rating.
    pub const MAX: u8 = 5;

    /// Create a rating from a number of stars.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::OutOfRange`] unless `stars` is in `1..=5`.
    pub fn new(stars: i64) -> Result<Self, RatingError> {
        u8::try_from(stars)
            .ok()
            .filter(|s| (Self::MIN..=Self::MAX).contains(s))
            .map(Self)
            .ok_or(RatingError::OutOfRange {
                value: stars,
                min: Self::MIN,
                max: Self::MAX,
            })
    }

    /// Parse a rating from a form value such as `"5"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not numeric or not in `1..=5`.
    pub fn parse(s: &str) -> Result<Self, RatingError> {
        let stars = s
            .trim()
            .parse::<i64>()
            .map_err(|_| RatingError::NotANumber)?;
        Self::new(stars)
    }

    /// Number of stars.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// All ratings from highest to lowest, in the order a picker lists them.
    pub fn descending() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).rev().map(Self)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Rating {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_one_through_five() {
        for stars in 1..=5 {
            assert_eq!(Rating::new(stars).unwrap().get(), u8::try_from(stars).unwrap());
        }
    }

    #[test]
    fn test_rejects_zero() {
        assert_eq!(
            Rating::new(0),
            Err(RatingError::OutOfRange {
                value: 0,
                min: 1,
                max: 5
            })
        );
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(Rating::new(6).is_err());
        assert!(Rating::new(-1).is_err());
        assert!(Rating::new(i64::from(u8::MAX) + 1).is_err());
    }

    #[test]
    fn test_parse_coerces_numeric_strings() {
        assert_eq!(Rating::parse("5").unwrap().get(), 5);
        assert_eq!(Rating::parse(" 3 ").unwrap().get(), 3);
        assert_eq!(Rating::parse("").unwrap_err(), RatingError::NotANumber);
        assert_eq!(Rating::parse("4.5").unwrap_err(), RatingError::NotANumber);
    }

    #[test]
    fn test_descending_order() {
        let values: Vec<u8> = Rating::descending().map(Rating::get).collect();
        assert_eq!(values, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_serde_rejects_invalid() {
        assert!(serde_json::from_str::<Rating>("0").is_err());
        assert_eq!(serde_json::from_str::<Rating>("2").unwrap().get(), 2);
        assert_eq!(serde_json::to_string(&Rating::new(4).unwrap()).unwrap(), "4");
    }
}
