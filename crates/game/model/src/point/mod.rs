//! Point counters: scores such as hit points, magic points or experience.
//!
//! A [`Point`] starts from an initial score inside a closed range and is
//! changed through modifiers:
//!
//! - **Permanent** boosts and drops model irreversible effects.
//! - **Temporary** boosts and drops return the created [`Modifier`] so the
//!   caller can revert it later.
//! - **Calculations** are caller-owned functions re-evaluated on every
//!   [`Point::score`] read, for contributions whose inputs change without
//!   telling the counter (e.g. a linked ability's current modifier).
//!
//! Every modifier is validated against the running score before it is
//! stored; a rejected modifier leaves the counter untouched.

mod error;
mod ledger;
mod modifier;

use std::fmt;

use game_collections::{IndexedCollection, ScoreRange, Stack, format_thousands};

use crate::config::ModelConfig;
use crate::identity::{IdSource, generate_id};

pub use error::PointError;
pub use modifier::{Modifier, ModifierKind, Permanence};

use ledger::{LedgerObserver, ScoreLedger};

/// A caller-supplied contribution evaluated at read time.
pub type Calculation = Box<dyn Fn() -> i64>;

/// Construction options for a [`Point`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointOptions {
    /// The name of this score.
    pub name: String,
    /// The unit of this score, such as HP, MP or XP.
    pub unit: Option<String>,
    pub initial_score: i64,
    /// Lowest score allowed. Unbounded when `None`.
    pub minimum_score: Option<i64>,
    /// Highest score allowed. Unbounded when `None`.
    pub maximum_score: Option<i64>,
}

impl PointOptions {
    pub fn new(name: impl Into<String>, initial_score: i64) -> Self {
        Self {
            name: name.into(),
            unit: None,
            initial_score,
            minimum_score: None,
            maximum_score: None,
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, minimum_score: i64, maximum_score: i64) -> Self {
        self.minimum_score = Some(minimum_score);
        self.maximum_score = Some(maximum_score);
        self
    }

    fn range(&self) -> Result<ScoreRange, PointError> {
        match (self.minimum_score, self.maximum_score) {
            (None, None) => Ok(ScoreRange::unbounded()),
            (min, max) => Ok(ScoreRange::new(
                min.unwrap_or(i64::MIN),
                max.unwrap_or(i64::MAX),
            )?),
        }
    }
}

/// Presentation options for [`Point::format`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointFormat {
    /// Group the score in thousands (i.e. 1.000.000).
    pub format_in_thousands: bool,
    /// Append the unit after the score (i.e. 1.000.000 HP).
    pub show_unit: bool,
    pub thousand_separator: String,
}

impl Default for PointFormat {
    fn default() -> Self {
        Self {
            format_in_thousands: true,
            show_unit: true,
            thousand_separator: ModelConfig::DEFAULT_THOUSAND_SEPARATOR.to_owned(),
        }
    }
}

/// A cumulative, range-constrained score.
pub struct Point {
    name: String,
    unit: String,
    initial_score: i64,
    permanent: IndexedCollection<Modifier>,
    temporary: IndexedCollection<Modifier>,
    ledger: ScoreLedger,
    calculations: Stack<Calculation>,
    id_source: IdSource,
}

impl Point {
    pub fn new(options: PointOptions) -> Result<Self, PointError> {
        Self::with_id_source(options, generate_id)
    }

    /// Creates a counter that mints modifier ids with `id_source`.
    pub fn with_id_source(options: PointOptions, id_source: IdSource) -> Result<Self, PointError> {
        let range = options.range()?;
        if !range.includes(options.initial_score) {
            return Err(PointError::InitialScoreOutOfRange {
                score: options.initial_score,
                range,
            });
        }

        Ok(Self {
            name: options.name,
            unit: options.unit.unwrap_or_default(),
            initial_score: options.initial_score,
            permanent: IndexedCollection::new(),
            temporary: IndexedCollection::new(),
            ledger: ScoreLedger::new(options.initial_score, range),
            calculations: Stack::new(),
            id_source,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn initial_score(&self) -> i64 {
        self.initial_score
    }

    pub fn range(&self) -> ScoreRange {
        self.ledger.range()
    }

    pub fn permanent_modifiers(&self) -> &IndexedCollection<Modifier> {
        &self.permanent
    }

    pub fn temporary_modifiers(&self) -> &IndexedCollection<Modifier> {
        &self.temporary
    }

    pub fn calculation_count(&self) -> usize {
        self.calculations.len()
    }

    /// Records a permanent boost of `factor` (> 0).
    pub fn boost_permanently_by(
        &mut self,
        factor: i64,
        reason: Option<&str>,
    ) -> Result<(), PointError> {
        self.apply(Permanence::Permanent, ModifierKind::Boost, factor, reason)
            .map(|_| ())
    }

    /// Records a permanent drop of `factor` (> 0).
    pub fn drop_permanently_by(
        &mut self,
        factor: i64,
        reason: Option<&str>,
    ) -> Result<(), PointError> {
        self.apply(Permanence::Permanent, ModifierKind::Drop, factor, reason)
            .map(|_| ())
    }

    /// Records a temporary boost of `factor` (> 0). Pass the returned
    /// modifier to [`Point::revert_temporary_effect`] to cancel it.
    pub fn boost_temporarily_by(
        &mut self,
        factor: i64,
        reason: Option<&str>,
    ) -> Result<Modifier, PointError> {
        self.apply(Permanence::Temporary, ModifierKind::Boost, factor, reason)
    }

    /// Records a temporary drop of `factor` (> 0). Pass the returned
    /// modifier to [`Point::revert_temporary_effect`] to cancel it.
    pub fn drop_temporarily_by(
        &mut self,
        factor: i64,
        reason: Option<&str>,
    ) -> Result<Modifier, PointError> {
        self.apply(Permanence::Temporary, ModifierKind::Drop, factor, reason)
    }

    /// Cancels a temporary boost or drop. Returns the removed modifier, or
    /// `None` if it was not (or no longer) applied.
    pub fn revert_temporary_effect(
        &mut self,
        modifier: &Modifier,
    ) -> Result<Option<Modifier>, PointError> {
        self.ledger.settle(&self.permanent, &self.temporary);
        let mut observer = LedgerObserver {
            ledger: &mut self.ledger,
            permanence: Permanence::Temporary,
        };
        let removed = self.temporary.remove_observed(&mut observer, modifier.id())?;

        if let Some(reverted) = &removed {
            tracing::debug!(
                point = %self.name,
                factor = reverted.factor(),
                score = self.ledger.score(),
                "temporary effect reverted"
            );
        }
        Ok(removed)
    }

    /// Registers a contribution re-evaluated on every [`Point::score`] read.
    pub fn add_calculation<F>(&mut self, calculation: F)
    where
        F: Fn() -> i64 + 'static,
    {
        self.calculations.push(Box::new(calculation));
    }

    /// Current score: cached modifiers plus every calculation evaluated now.
    ///
    /// Calculations are checked one at a time; the first one that takes the
    /// running total out of range fails the read. The calculation stack is
    /// restored in its original order either way.
    pub fn score(&mut self) -> Result<i64, PointError> {
        let base = self.ledger.settle(&self.permanent, &self.temporary);
        let range = self.ledger.range();

        let mut evaluated: Stack<Calculation> = Stack::new();
        let mut running = base;
        let mut failure = None;

        while let Some(calculation) = self.calculations.pop() {
            let change = calculation();
            evaluated.push(calculation);

            match running.checked_add(change) {
                Some(score) if range.includes(score) => running = score,
                Some(score) => {
                    failure = Some(PointError::CalculationOutOfRange { score, range });
                    break;
                }
                None => {
                    failure = Some(PointError::Overflow {
                        score: running,
                        change,
                    });
                    break;
                }
            }
        }

        while let Some(calculation) = evaluated.pop() {
            self.calculations.push(calculation);
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(running),
        }
    }

    /// Score from modifiers alone, without evaluating calculations.
    pub fn last_score(&self) -> i64 {
        self.ledger.score()
    }

    /// Renders the cached score.
    pub fn format(&self, options: &PointFormat) -> String {
        let score = self.last_score();
        let mut rendered = if options.format_in_thousands {
            format_thousands(score, &options.thousand_separator)
        } else {
            score.to_string()
        };

        if options.show_unit && !self.unit.is_empty() {
            rendered.push(' ');
            rendered.push_str(&self.unit);
        }
        rendered
    }

    fn apply(
        &mut self,
        permanence: Permanence,
        kind: ModifierKind,
        factor: i64,
        reason: Option<&str>,
    ) -> Result<Modifier, PointError> {
        let signed = match kind {
            ModifierKind::Boost => factor,
            ModifierKind::Drop => factor
                .checked_neg()
                .ok_or(PointError::NonPositiveFactor { factor })?,
        };
        let modifier = Modifier::new((self.id_source)(), signed, reason, kind);

        self.ledger.settle(&self.permanent, &self.temporary);
        let collection = match permanence {
            Permanence::Permanent => &mut self.permanent,
            Permanence::Temporary => &mut self.temporary,
        };
        let mut observer = LedgerObserver {
            ledger: &mut self.ledger,
            permanence,
        };
        collection.add_observed(&mut observer, [modifier.clone()])?;

        tracing::debug!(
            point = %self.name,
            %permanence,
            %kind,
            factor = signed,
            score = self.ledger.score(),
            "modifier applied"
        );
        Ok(modifier)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&PointFormat::default()))
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Point")
            .field("name", &self.name)
            .field("unit", &self.unit)
            .field("initial_score", &self.initial_score)
            .field("range", &self.ledger.range())
            .field("score", &self.ledger.score())
            .field("permanent", &self.permanent.len())
            .field("temporary", &self.temporary.len())
            .field("calculations", &self.calculations.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use game_collections::GameError;

    use super::*;

    fn health_points() -> Point {
        Point::new(
            PointOptions::new("Health Points", 100)
                .with_unit("HP")
                .with_bounds(0, 150),
        )
        .unwrap()
    }

    #[test]
    fn exposes_construction_options() {
        let mut hp = health_points();
        assert_eq!(hp.name(), "Health Points");
        assert_eq!(hp.unit(), "HP");
        assert_eq!(hp.initial_score(), 100);
        assert_eq!(hp.range(), ScoreRange::new(0, 150).unwrap());
        assert_eq!(hp.score().unwrap(), 100);
    }

    #[test]
    fn initial_score_must_be_in_range() {
        let err = Point::new(PointOptions::new("Mana", 200).with_bounds(0, 150)).unwrap_err();
        assert!(matches!(err, PointError::InitialScoreOutOfRange { score: 200, .. }));
    }

    #[test]
    fn one_sided_bounds_leave_the_other_side_open() {
        let mut options = PointOptions::new("Experience", 0);
        options.minimum_score = Some(0);
        let mut xp = Point::new(options).unwrap();

        xp.boost_permanently_by(1_000_000_000, None).unwrap();
        assert_eq!(xp.score().unwrap(), 1_000_000_000);
        assert!(xp.drop_permanently_by(1_000_000_001, None).is_err());
    }

    #[test]
    fn rejects_zero_and_negative_factors() {
        let mut hp = health_points();
        for factor in [0, -10] {
            assert!(matches!(
                hp.boost_permanently_by(factor, Some("I'm crazy")),
                Err(PointError::NonPositiveFactor { .. })
            ));
            assert!(matches!(
                hp.drop_permanently_by(factor, None),
                Err(PointError::NonPositiveFactor { .. })
            ));
            assert!(matches!(
                hp.boost_temporarily_by(factor, None),
                Err(PointError::NonPositiveFactor { .. })
            ));
            assert!(matches!(
                hp.drop_temporarily_by(factor, None),
                Err(PointError::NonPositiveFactor { .. })
            ));
        }
        assert_eq!(hp.last_score(), 100);
        assert!(hp.permanent_modifiers().is_empty());
        assert!(hp.temporary_modifiers().is_empty());
    }

    #[test]
    fn drop_of_minimum_value_is_rejected() {
        let mut hp = health_points();
        assert!(matches!(
            hp.drop_permanently_by(i64::MIN, None),
            Err(PointError::NonPositiveFactor { .. })
        ));
    }

    #[test]
    fn compounding_modifiers_are_checked_against_running_score() {
        let mut hp = health_points();
        hp.boost_permanently_by(30, None).unwrap();
        hp.boost_temporarily_by(15, None).unwrap();

        // 145 + 10 = 155 > 150
        let err = hp.boost_permanently_by(10, None).unwrap_err();
        assert_eq!(
            err,
            PointError::OutOfRange {
                kind: ModifierKind::Boost,
                permanence: Permanence::Permanent,
                magnitude: 10,
                score: 155,
                range: hp.range(),
            }
        );
        assert_eq!(
            err.to_string(),
            "Boosting permanently by 10 makes the score 155, which goes out of the range 0 ~ 150"
        );
        assert_eq!(hp.last_score(), 145);
    }

    #[test]
    fn modifiers_keep_reason_and_sign() {
        let mut hp = health_points();
        let drop = hp.drop_temporarily_by(25, Some("poison")).unwrap();

        assert_eq!(drop.factor(), -25);
        assert_eq!(drop.kind(), ModifierKind::Drop);
        assert_eq!(drop.reason(), Some("poison"));
        assert!(hp.temporary_modifiers().contains(drop.id()));
    }

    #[test]
    fn reverting_twice_is_a_no_op() {
        let mut hp = health_points();
        let boost = hp.boost_temporarily_by(10, None).unwrap();

        assert!(hp.revert_temporary_effect(&boost).unwrap().is_some());
        assert!(hp.revert_temporary_effect(&boost).unwrap().is_none());
        assert_eq!(hp.score().unwrap(), 100);
    }

    #[test]
    fn calculations_follow_external_state() {
        let mut hp = health_points();
        let strength = Rc::new(Cell::new(30));
        let linked = Rc::clone(&strength);
        hp.add_calculation(move || linked.get() / 2);

        assert_eq!(hp.score().unwrap(), 115);
        strength.set(50);
        assert_eq!(hp.score().unwrap(), 125);
        assert_eq!(hp.last_score(), 100);
    }

    #[test]
    fn failing_calculation_restores_stack_order() {
        let mut hp = health_points();
        let order = Rc::new(std::cell::RefCell::new(Vec::new()));

        for (label, value) in [("first", 10), ("second", -200), ("third", 5)] {
            let order = Rc::clone(&order);
            hp.add_calculation(move || {
                order.borrow_mut().push(label);
                value
            });
        }

        let err = hp.score().unwrap_err();
        assert!(err.to_string().contains("Calculation exceeds score range"));
        // Top of the stack is evaluated first; "second" fails before "first" runs.
        assert_eq!(*order.borrow(), ["third", "second"]);
        assert_eq!(hp.calculation_count(), 3);

        order.borrow_mut().clear();
        assert!(hp.score().is_err());
        assert_eq!(*order.borrow(), ["third", "second"]);
    }

    #[test]
    fn overflowing_calculation_fails_the_read() {
        let mut gold = Point::new(PointOptions::new("Gold", 0)).unwrap();
        gold.boost_permanently_by(i64::MAX - 10, None).unwrap();
        gold.add_calculation(|| 100);

        let err = gold.score().unwrap_err();
        assert_eq!(
            err,
            PointError::Overflow {
                score: i64::MAX - 10,
                change: 100
            }
        );
        assert_eq!(err.error_code(), "POINT_SCORE_OVERFLOW");
        assert_eq!(gold.calculation_count(), 1);
        assert_eq!(gold.last_score(), i64::MAX - 10);
    }

    #[test]
    fn overflowing_modifier_changes_nothing() {
        let mut gold = Point::new(PointOptions::new("Gold", 0)).unwrap();
        gold.boost_permanently_by(i64::MAX - 10, None).unwrap();

        let err = gold.boost_temporarily_by(100, None).unwrap_err();
        assert!(matches!(err, PointError::Overflow { change: 100, .. }));
        assert!(gold.temporary_modifiers().is_empty());
        assert_eq!(gold.score().unwrap(), i64::MAX - 10);
    }

    #[test]
    fn formats_cached_score() {
        let mut xp = Point::new(
            PointOptions::new("Experience", 100)
                .with_unit("XP")
                .with_bounds(0, 10_000),
        )
        .unwrap();
        xp.boost_permanently_by(900, None).unwrap();
        xp.add_calculation(|| 1);

        assert_eq!(xp.to_string(), "1.000 XP");
        let plain = PointFormat {
            show_unit: false,
            ..PointFormat::default()
        };
        assert_eq!(xp.format(&plain), "1.000");
        let raw = PointFormat {
            format_in_thousands: false,
            show_unit: false,
            ..PointFormat::default()
        };
        assert_eq!(xp.format(&raw), "1000");
        let comma = PointFormat {
            thousand_separator: ",".to_owned(),
            ..PointFormat::default()
        };
        assert_eq!(xp.format(&comma), "1,000 XP");
    }

    #[test]
    fn modifier_ids_come_from_the_id_source() {
        fn fixed_id() -> String {
            "fixed".to_owned()
        }

        let mut hp =
            Point::with_id_source(PointOptions::new("Health", 10).with_bounds(0, 100), fixed_id)
                .unwrap();
        hp.boost_permanently_by(1, None).unwrap();

        // Same id twice collides in the collection and changes nothing.
        let err = hp.boost_permanently_by(1, None).unwrap_err();
        assert!(matches!(err, PointError::Collection(_)));
        assert_eq!(hp.last_score(), 11);
    }
}
