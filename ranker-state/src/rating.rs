use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// A rating between 0.5 and 5.0 stars, in half-star steps.
///
/// Stored as a count of half stars so that it can only ever hold a valid value
/// and orders exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(u8);
impl Rating {
    /// The lowest rating.
    pub const MIN: Rating = Rating(1);
    /// The highest rating.
    pub const MAX: Rating = Rating(10);
    /// The rating a new draft starts with.
    pub const DEFAULT: Rating = Rating(8);

    /// Validate a rating in stars.
    pub fn new(stars: f64) -> Result<Self, ValidationError> {
        let half_stars = stars * 2.0;
        if !half_stars.is_finite() || (half_stars - half_stars.round()).abs() > 1e-9 {
            return Err(ValidationError::RatingOutOfRange(stars));
        }
        let half_stars = half_stars.round();
        if half_stars < f64::from(Self::MIN.0) || half_stars > f64::from(Self::MAX.0) {
            return Err(ValidationError::RatingOutOfRange(stars));
        }
        Ok(Rating(half_stars as u8))
    }

    /// The rating in stars.
    pub fn stars(self) -> f64 {
        f64::from(self.0) / 2.0
    }

    /// The number of whole stars, not counting a trailing half star.
    pub fn full_stars(self) -> u8 {
        self.0 / 2
    }

    /// Whether the rating ends in a half star.
    pub fn has_half_star(self) -> bool {
        self.0 % 2 == 1
    }
}
impl Default for Rating {
    fn default() -> Self {
        Self::DEFAULT
    }
}
impl TryFrom<f64> for Rating {
    type Error = ValidationError;

    fn try_from(stars: f64) -> Result<Self, Self::Error> {
        Self::new(stars)
    }
}
impl From<Rating> for f64 {
    fn from(rating: Rating) -> Self {
        rating.stars()
    }
}
impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.stars())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_every_half_step() {
        for half_stars in 1..=10u8 {
            let stars = f64::from(half_stars) / 2.0;
            assert_eq!(Rating::new(stars).unwrap().stars(), stars);
        }
    }

    #[test]
    fn test_rejects_out_of_range_and_off_step() {
        for stars in [0.0, 5.5, -1.0, 4.25, 3.3, f64::NAN, f64::INFINITY] {
            assert!(Rating::new(stars).is_err(), "{stars} should be rejected");
        }
    }

    #[test]
    fn test_star_breakdown() {
        let rating = Rating::new(3.5).unwrap();
        assert_eq!(rating.full_stars(), 3);
        assert!(rating.has_half_star());
        assert_eq!(rating.to_string(), "3.5");
        assert_eq!(Rating::DEFAULT.stars(), 4.0);
    }

    #[test]
    fn test_deserialize_validates() {
        assert_eq!(
            serde_json::from_str::<Rating>("4.5").unwrap(),
            Rating::new(4.5).unwrap()
        );
        assert!(serde_json::from_str::<Rating>("5.5").is_err());
        assert_eq!(serde_json::to_string(&Rating::MAX).unwrap(), "5.0");
    }
}
