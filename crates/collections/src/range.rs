//! Closed numeric ranges.

use std::fmt;
use std::str::FromStr;

use crate::error::{ErrorSeverity, GameError};

/// Delimiters accepted by [`ScoreRange::from_str`], tried in this order.
const NOTATION_DELIMITERS: [char; 4] = [',', ';', ':', '~'];

/// Errors raised when building a [`ScoreRange`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("lower and upper bound cannot be equal ({bound})")]
    Degenerate { bound: i64 },

    #[error("range notation must use one of these formats: x,y x;y x:y x~y (got {notation:?})")]
    InvalidNotation { notation: String },
}

impl GameError for RangeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Degenerate { .. } => "RANGE_DEGENERATE",
            Self::InvalidNotation { .. } => "RANGE_INVALID_NOTATION",
        }
    }
}

/// How low or how high a value can go, bounds included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreRange {
    min: i64,
    max: i64,
}

impl ScoreRange {
    /// Creates a range from two bounds given in any order.
    pub fn new(a: i64, b: i64) -> Result<Self, RangeError> {
        if a == b {
            return Err(RangeError::Degenerate { bound: a });
        }
        Ok(Self {
            min: a.min(b),
            max: a.max(b),
        })
    }

    /// Range covering every representable value.
    pub const fn unbounded() -> Self {
        Self {
            min: i64::MIN,
            max: i64::MAX,
        }
    }

    pub const fn min(&self) -> i64 {
        self.min
    }

    pub const fn max(&self) -> i64 {
        self.max
    }

    pub const fn includes(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl fmt::Display for ScoreRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.min, self.max)
    }
}

impl FromStr for ScoreRange {
    type Err = RangeError;

    /// Parses `x,y`, `x;y`, `x:y` or `x~y`.
    fn from_str(notation: &str) -> Result<Self, Self::Err> {
        let invalid = || RangeError::InvalidNotation {
            notation: notation.to_owned(),
        };

        let delimiter = NOTATION_DELIMITERS
            .into_iter()
            .find(|delimiter| notation.contains(*delimiter))
            .ok_or_else(invalid)?;

        let mut parts = notation.split(delimiter).map(str::trim);
        let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };

        let a = a.parse::<i64>().map_err(|_| invalid())?;
        let b = b.parse::<i64>().map_err(|_| invalid())?;
        Self::new(a, b)
    }
}
