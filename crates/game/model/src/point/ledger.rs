//! Write-through score cache and modifier validation.
//!
//! The ledger is attached to both modifier collections as their observer:
//! `before_add` validates each incoming modifier against the running score,
//! `after_add`/`after_remove` fold the accepted factor into the cached score
//! immediately. Reads are O(1) as long as the cached modifier count matches
//! the collections; any mismatch triggers a full resum.

use game_collections::{CollectionObserver, IndexedCollection, ScoreRange};

use super::error::PointError;
use super::modifier::{Modifier, ModifierKind, Permanence};

#[derive(Clone, Debug)]
pub(super) struct ScoreLedger {
    range: ScoreRange,
    initial_score: i64,
    score: i64,
    modifier_count: usize,
}

impl ScoreLedger {
    pub(super) fn new(initial_score: i64, range: ScoreRange) -> Self {
        Self {
            range,
            initial_score,
            score: initial_score,
            modifier_count: 0,
        }
    }

    pub(super) fn range(&self) -> ScoreRange {
        self.range
    }

    pub(super) fn score(&self) -> i64 {
        self.score
    }

    /// Returns the cached score, resumming both collections if the cache has
    /// drifted from them.
    pub(super) fn settle(
        &mut self,
        permanent: &IndexedCollection<Modifier>,
        temporary: &IndexedCollection<Modifier>,
    ) -> i64 {
        let live = permanent.len() + temporary.len();
        if self.modifier_count != live {
            tracing::trace!(
                cached = self.modifier_count,
                live,
                "modifier cache out of sync, resumming"
            );
            self.score = permanent
                .iter()
                .chain(temporary.iter())
                .fold(self.initial_score, |sum, modifier| {
                    sum.saturating_add(modifier.factor())
                });
            self.modifier_count = live;
        }
        self.score
    }

    /// Checks `modifier` against `running` and returns the projected score.
    fn project(
        &self,
        modifier: &Modifier,
        running: i64,
        permanence: Permanence,
    ) -> Result<i64, PointError> {
        let factor = modifier.factor();
        let kind = modifier.kind();
        match kind {
            ModifierKind::Boost if factor <= 0 => {
                return Err(PointError::NonPositiveFactor { factor });
            }
            ModifierKind::Drop if factor >= 0 => {
                return Err(PointError::NonPositiveFactor { factor: -factor });
            }
            _ => {}
        }

        let projected = running.checked_add(factor).ok_or(PointError::Overflow {
            score: running,
            change: factor,
        })?;
        if !self.range.includes(projected) {
            return Err(PointError::OutOfRange {
                kind,
                permanence,
                magnitude: factor.abs(),
                score: projected,
                range: self.range,
            });
        }
        Ok(projected)
    }

    fn apply(&mut self, factor: i64) {
        self.score = self.score.saturating_add(factor);
        self.modifier_count += 1;
    }

    fn revert(&mut self, factor: i64) {
        self.score = self.score.saturating_sub(factor);
        self.modifier_count = self.modifier_count.saturating_sub(1);
    }
}

/// Binds the ledger to one of the two modifier collections.
pub(super) struct LedgerObserver<'a> {
    pub(super) ledger: &'a mut ScoreLedger,
    pub(super) permanence: Permanence,
}

impl CollectionObserver<Modifier> for LedgerObserver<'_> {
    type Error = PointError;

    fn before_add(&mut self, items: &[Modifier]) -> Result<(), PointError> {
        let mut running = self.ledger.score;
        for modifier in items {
            running = self.ledger.project(modifier, running, self.permanence)?;
        }
        Ok(())
    }

    fn after_add(&mut self, items: &[&Modifier]) {
        for modifier in items {
            self.ledger.apply(modifier.factor());
        }
    }

    fn after_remove(&mut self, item: &Modifier) {
        self.ledger.revert(item.factor());
    }

    fn after_remove_all(&mut self, removed: &[Modifier]) {
        for modifier in removed {
            self.ledger.revert(modifier.factor());
        }
    }
}
