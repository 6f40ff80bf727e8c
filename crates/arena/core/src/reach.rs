//! Per-limb reach configuration.

use crate::body::BodyPart;
use crate::error::{ArenaError, ErrorSeverity};

/// Reach configuration errors. All are fatal for a match.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ReachError {
    #[error("reach must list exactly 4 limbs (hand_l, hand_r, foot_l, foot_r), got {found}")]
    WrongLimbCount { found: usize },

    #[error("no reach configured for body part {0}")]
    Unconfigured(BodyPart),

    #[error("reach must be finite and non-negative, got {value}")]
    InvalidValue { value: f32 },
}

impl ArenaError for ReachError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::WrongLimbCount { .. } => "REACH_WRONG_LIMB_COUNT",
            Self::Unconfigured(_) => "REACH_UNCONFIGURED",
            Self::InvalidValue { .. } => "REACH_INVALID_VALUE",
        }
    }
}

/// Returns `value` if it is usable as a reach or a reach multiplier.
///
/// # Errors
///
/// Rejects NaN, infinities and negative values.
pub fn validate_reach(value: f32) -> Result<f32, ReachError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ReachError::InvalidValue { value })
    }
}

/// How far each limb can extend to strike, in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<f32>", into = "Vec<f32>"))]
pub struct Reach {
    pub hand_l: f32,
    pub hand_r: f32,
    pub foot_l: f32,
    pub foot_r: f32,
}

impl Reach {
    pub const DEFAULT_HAND: f32 = 0.7;
    pub const DEFAULT_FOOT: f32 = 1.0;

    pub const fn new(hand_l: f32, hand_r: f32, foot_l: f32, foot_r: f32) -> Self {
        Self {
            hand_l,
            hand_r,
            foot_l,
            foot_r,
        }
    }

    /// Builds reach from values ordered hand_l, hand_r, foot_l, foot_r.
    ///
    /// # Errors
    ///
    /// Fails unless exactly four values are given, each finite and non-negative.
    pub fn from_slice(values: &[f32]) -> Result<Self, ReachError> {
        match *values {
            [hand_l, hand_r, foot_l, foot_r] => Ok(Self::new(
                validate_reach(hand_l)?,
                validate_reach(hand_r)?,
                validate_reach(foot_l)?,
                validate_reach(foot_r)?,
            )),
            _ => Err(ReachError::WrongLimbCount {
                found: values.len(),
            }),
        }
    }

    /// Reach of `part`.
    ///
    /// # Errors
    ///
    /// Head and torso have no reach.
    pub fn for_part(&self, part: BodyPart) -> Result<f32, ReachError> {
        match part {
            BodyPart::HandL => Ok(self.hand_l),
            BodyPart::HandR => Ok(self.hand_r),
            BodyPart::FootL => Ok(self.foot_l),
            BodyPart::FootR => Ok(self.foot_r),
            BodyPart::Head | BodyPart::Torso => Err(ReachError::Unconfigured(part)),
        }
    }

    /// Longest reach over all limbs.
    pub fn longest(&self) -> f32 {
        self.hand_l
            .max(self.hand_r)
            .max(self.foot_l)
            .max(self.foot_r)
    }
}

impl Default for Reach {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_HAND,
            Self::DEFAULT_HAND,
            Self::DEFAULT_FOOT,
            Self::DEFAULT_FOOT,
        )
    }
}

impl TryFrom<Vec<f32>> for Reach {
    type Error = ReachError;

    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        Self::from_slice(&values)
    }
}

impl From<Reach> for Vec<f32> {
    fn from(reach: Reach) -> Self {
        vec![reach.hand_l, reach.hand_r, reach.foot_l, reach.foot_r]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_exactly_four_limbs() {
        assert_eq!(
            Reach::from_slice(&[0.7, 0.7, 1.0]),
            Err(ReachError::WrongLimbCount { found: 3 })
        );
        let reach = Reach::from_slice(&[0.6, 0.7, 0.9, 1.1]).unwrap();
        assert_eq!(reach.for_part(BodyPart::FootR), Ok(1.1));
        assert_eq!(reach.longest(), 1.1);
    }

    #[test]
    fn rejects_unusable_values() {
        for bad in [f32::NAN, f32::INFINITY, -0.5] {
            let err = Reach::from_slice(&[0.7, bad, 1.0, 1.0]).unwrap_err();
            assert!(matches!(err, ReachError::InvalidValue { .. }), "{bad}");
            assert_eq!(err.error_code(), "REACH_INVALID_VALUE");
            assert!(err.severity().is_fatal());
        }
        assert_eq!(validate_reach(0.0), Ok(0.0));
    }

    #[test]
    fn head_and_torso_have_no_reach() {
        let reach = Reach::default();
        let err = reach.for_part(BodyPart::Head).unwrap_err();
        assert_eq!(err, ReachError::Unconfigured(BodyPart::Head));
        assert!(err.severity().is_fatal());
        assert!(reach.for_part(BodyPart::Torso).is_err());
        assert_eq!(reach.for_part(BodyPart::HandL), Ok(0.7));
    }
}
