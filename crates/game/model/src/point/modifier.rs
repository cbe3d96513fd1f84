//! Signed additive contributions to a point counter.

use game_collections::Keyed;

/// Whether a modifier raises or lowers the score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierKind {
    /// An increase in the score. Stored factor is positive.
    Boost,
    /// A decrease in the score. Stored factor is negative.
    Drop,
}

impl ModifierKind {
    pub const fn gerund(self) -> &'static str {
        match self {
            Self::Boost => "Boosting",
            Self::Drop => "Dropping",
        }
    }
}

/// Whether a modifier can be reverted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Permanence {
    /// Irreversible; never removed once applied.
    #[strum(serialize = "permanently")]
    Permanent,
    /// Can be reverted by id.
    #[strum(serialize = "temporarily")]
    Temporary,
}

/// An immutable, signed change recorded on a point counter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    id: String,
    factor: i64,
    reason: Option<String>,
    kind: ModifierKind,
}

impl Modifier {
    pub(crate) fn new(id: String, factor: i64, reason: Option<&str>, kind: ModifierKind) -> Self {
        Self {
            id,
            factor,
            reason: reason.map(str::to_owned),
            kind,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Signed change this modifier applies (negative for drops).
    pub fn factor(&self) -> i64 {
        self.factor
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn kind(&self) -> ModifierKind {
        self.kind
    }
}

impl Keyed for Modifier {
    fn key(&self) -> &str {
        &self.id
    }
}
