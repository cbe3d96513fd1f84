mod common;

use std::cell::Cell;
use std::rc::Rc;

use game_model::{GameError, Point, PointError, PointOptions};

fn health_points() -> Point {
    common::init_tracing();
    Point::new(
        PointOptions::new("Health Points", 100)
            .with_unit("HP")
            .with_bounds(0, 150),
    )
    .unwrap()
}

#[test]
fn permanent_boost_and_drop() {
    let mut hp = health_points();
    hp.boost_permanently_by(10, None).unwrap();
    assert_eq!(hp.score().unwrap(), 110);

    let mut hp = health_points();
    hp.drop_permanently_by(10, Some("trap")).unwrap();
    assert_eq!(hp.score().unwrap(), 90);
    assert_eq!(hp.permanent_modifiers().len(), 1);
}

#[test]
fn temporary_effects_revert_exactly() {
    let mut hp = health_points();

    let boost = hp.boost_temporarily_by(10, None).unwrap();
    assert_eq!(hp.score().unwrap(), 110);
    hp.revert_temporary_effect(&boost).unwrap();
    assert_eq!(hp.score().unwrap(), 100);

    let drop = hp.drop_temporarily_by(10, None).unwrap();
    assert_eq!(hp.score().unwrap(), 90);
    hp.revert_temporary_effect(&drop).unwrap();
    assert_eq!(hp.score().unwrap(), 100);
    assert!(hp.temporary_modifiers().is_empty());
}

#[test]
fn out_of_range_changes_fail_without_altering_score() {
    let mut hp = health_points();

    let attempts = [
        hp.boost_permanently_by(110, None).map(|_| ()),
        hp.drop_permanently_by(110, None).map(|_| ()),
        hp.boost_temporarily_by(110, None).map(|_| ()),
        hp.drop_temporarily_by(110, None).map(|_| ()),
    ];

    for attempt in attempts {
        let err = attempt.unwrap_err();
        assert!(matches!(err, PointError::OutOfRange { .. }));
        assert!(err.to_string().contains("out of the range"));
        assert_eq!(err.error_code(), "POINT_OUT_OF_RANGE");
    }
    assert_eq!(hp.score().unwrap(), 100);
    assert_eq!(hp.last_score(), 100);
}

#[test]
fn calculations_are_applied_on_read_only() {
    let mut hp = health_points();
    hp.add_calculation(|| 15);

    assert_eq!(hp.score().unwrap(), 115);
    assert_eq!(hp.last_score(), 100);
    assert_eq!(hp.score().unwrap(), 115);
    assert_eq!(hp.calculation_count(), 1);
}

#[test]
fn calculations_cannot_overflow_the_range() {
    let mut hp = health_points();
    let curse = 200;
    hp.add_calculation(move || -curse);

    let err = hp.score().unwrap_err();
    assert!(matches!(err, PointError::CalculationOutOfRange { score: -100, .. }));
    assert!(err.to_string().contains("exceeds score range"));
    assert_eq!(hp.last_score(), 100);
}

#[test]
fn calculations_combine_with_modifiers() {
    let mut hp = health_points();
    let strength = Rc::new(Cell::new(14_i64));
    let linked = Rc::clone(&strength);
    hp.add_calculation(move || (linked.get() - 10) / 2);
    hp.add_calculation(|| 3);

    hp.boost_permanently_by(20, None).unwrap();
    assert_eq!(hp.score().unwrap(), 125);

    strength.set(18);
    assert_eq!(hp.score().unwrap(), 127);
    assert_eq!(hp.last_score(), 120);
}

#[test]
fn display_uses_grouped_score_and_unit() {
    let mut gold = Point::new(PointOptions::new("Gold", 0).with_unit("GP")).unwrap();
    gold.boost_permanently_by(1_234_567, None).unwrap();

    assert_eq!(gold.to_string(), "1.234.567 GP");
}
