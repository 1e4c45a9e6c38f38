//! User interest profiles.
//!
//! A profile carries no identity: it is the four interest weights a caller
//! sends with each request.

use crate::{Interest, InterestError, Interests};

/// A traveller's interest weights in `[0.0, 1.0]`.
///
/// # Examples
/// ```
/// use tourscout_core::{Interest, UserProfile};
///
/// # fn main() -> Result<(), tourscout_core::InterestError> {
/// let profile = UserProfile::new(0.9, 0.1, 0.2, 0.3)?
///     .try_with_weight(Interest::Nature, 0.6)?;
/// assert_eq!(profile.weight(Interest::Nature), 0.6);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UserProfile {
    interests: Interests,
}

impl UserProfile {
    /// Validate and construct a profile from weights in `hist, adv, nat, rel`
    /// order.
    ///
    /// # Errors
    /// Returns [`InterestError`] when a weight is not finite or falls outside
    /// the unit interval.
    pub fn new(hist: f64, adv: f64, nat: f64, rel: f64) -> Result<Self, InterestError> {
        Interests::new(hist, adv, nat, rel).map(Self::from_interests)
    }

    /// Wrap an already validated set of weights.
    #[must_use]
    pub const fn from_interests(interests: Interests) -> Self {
        Self { interests }
    }

    /// Return the weight for `interest`.
    #[must_use]
    pub const fn weight(&self, interest: Interest) -> f64 {
        self.interests.get(interest)
    }

    /// Borrow the underlying weights.
    #[must_use]
    pub const fn interests(&self) -> &Interests {
        &self.interests
    }

    /// Replace one weight while returning `self` for chaining.
    ///
    /// # Errors
    /// Returns [`InterestError`] when `weight` is invalid.
    pub fn try_with_weight(self, interest: Interest, weight: f64) -> Result<Self, InterestError> {
        self.interests.try_with(interest, weight).map(Self::from_interests)
    }
}
