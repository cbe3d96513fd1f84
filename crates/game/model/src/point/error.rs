//! Point counter errors.

use game_collections::{CollectionError, ErrorSeverity, GameError, RangeError, ScoreRange};

use super::modifier::{ModifierKind, Permanence};

/// Errors raised by [`Point`](super::Point) operations.
///
/// Every variant is raised before any state changes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PointError {
    #[error("initial score {score} must be within the specified range: {range}")]
    InitialScoreOutOfRange { score: i64, range: ScoreRange },

    /// Boost or drop magnitude was zero or negative.
    #[error("Point changes must use a factor greater than zero (got {factor})")]
    NonPositiveFactor { factor: i64 },

    /// Applying the modifier would leave the score outside its range.
    #[error(
        "{} {permanence} by {magnitude} makes the score {score}, which goes out of the range {range}",
        .kind.gerund()
    )]
    OutOfRange {
        kind: ModifierKind,
        permanence: Permanence,
        magnitude: i64,
        score: i64,
        range: ScoreRange,
    },

    /// A calculation pushed the read-time score outside its range.
    #[error("Calculation exceeds score range {range} (score would be {score})")]
    CalculationOutOfRange { score: i64, range: ScoreRange },

    /// The new score does not fit in an `i64`.
    #[error("changing the score {score} by {change} overflows")]
    Overflow { score: i64, change: i64 },

    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error(transparent)]
    Range(#[from] RangeError),
}

impl GameError for PointError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Collection(err) => err.severity(),
            Self::Range(err) => err.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InitialScoreOutOfRange { .. } => "POINT_INITIAL_SCORE_OUT_OF_RANGE",
            Self::NonPositiveFactor { .. } => "POINT_NON_POSITIVE_FACTOR",
            Self::OutOfRange { .. } => "POINT_OUT_OF_RANGE",
            Self::CalculationOutOfRange { .. } => "POINT_CALCULATION_OUT_OF_RANGE",
            Self::Overflow { .. } => "POINT_SCORE_OVERFLOW",
            Self::Collection(err) => err.error_code(),
            Self::Range(err) => err.error_code(),
        }
    }
}
