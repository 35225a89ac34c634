//! Combat statistics derived from a datasheet.
//!
//! Everything here is a pure function of a [`Datasheet`] snapshot, cheap
//! enough to run on every render.
//!
//! # Ratings
//!
//! Ratings are normalized against [`RATING_BASE`] damage: a weapon whose
//! expected damage per activation is 30 scores `1.0`, and the defense rating
//! is the average fraction of the unit's total health lost to 30 points of
//! incoming damage split across the [`DAMAGE_SAMPLES`].
//!
//! Every ratio that divides by zero (a unit with no health, a weapon with no
//! cells) is reported as [`StatValue::NotApplicable`] instead of a non-finite
//! number.

mod defense;
mod offense;

use std::fmt;

pub use defense::{DefenseSummary, SurvivalRating};
pub use offense::WeaponRating;

use crate::datasheet::Datasheet;

/// Damage total a rating of `1.0` corresponds to.
pub const RATING_BASE: u32 = 30;

/// Representative damage-per-hit values the defense rating is sampled at.
pub const DAMAGE_SAMPLES: [u32; 6] = [1, 2, 3, 5, 6, 10];

/// `toResist` stand-in for columns without a resist roll.
pub const NO_RESIST: i32 = 7;

/// Faces of the die every roll is made with.
pub const DIE_SIDES: f64 = 6.0;

/// A derived number, or a marker that the ratio is undefined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StatValue {
    Value(f64),
    NotApplicable,
}

impl StatValue {
    /// Wraps `value`, mapping NaN and infinities to `NotApplicable`.
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self::Value(value)
        } else {
            Self::NotApplicable
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(*value),
            Self::NotApplicable => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl From<f64> for StatValue {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for StatValue {
    /// Four decimal places, half-up, or `N/A`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => {
                let rounded = (value * 10_000.0).round() / 10_000.0;
                // Avoid printing "-0.0"
                let rounded = if rounded == 0.0 { 0.0 } else { rounded };
                write!(f, "{rounded:?}")
            }
            Self::NotApplicable => f.write_str("N/A"),
        }
    }
}

/// Everything the statistics panel shows for one sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct Statistics {
    pub summary: DefenseSummary,
    pub ratings: Ratings,
}

/// Normalized ratings.
#[derive(Clone, Debug, PartialEq)]
pub struct Ratings {
    /// Mean of the survival ratings.
    pub defense: StatValue,
    /// One entry per damage sample, in sample order.
    pub survival: Vec<SurvivalRating>,
    /// One entry per weapon, in table order.
    pub weapons: Vec<WeaponRating>,
}

/// Computes all statistics for `sheet`.
pub fn compute_statistics(sheet: &Datasheet) -> Statistics {
    let weapons = sheet
        .stat_table
        .weapons()
        .iter()
        .map(|weapon| offense::rate_weapon(weapon, sheet.model_count))
        .collect();

    let (summary, defense, survival) = defense::assess(sheet);

    Statistics {
        summary,
        ratings: Ratings {
            defense,
            survival,
            weapons,
        },
    }
}

/// Arithmetic mean. Empty input yields NaN, which callers wrap as `NotApplicable`.
fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    sum / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: StatValue, expected: f64) {
        let value = actual.value().expect("value should be applicable");
        assert!(
            (value - expected).abs() < EPSILON,
            "expected {expected}, got {value}"
        );
    }

    /// modelCount 5, health 1, one weapon 2 attacks / 4+ to hit / 3 damage,
    /// 4+ save, no resist, no hardness.
    fn reference_sheet() -> Datasheet {
        let mut sheet = Datasheet::new("Reference");
        sheet.model_count = 5;
        sheet.health = 1;

        let table = &mut sheet.stat_table;
        table.set_to_save(0, 4).unwrap();
        table.set_to_resist(0, None).unwrap();
        table.set_hardness(0, None).unwrap();
        table.set_attacks(0, 0, 2).unwrap();
        table.set_to_hit(0, 0, 4).unwrap();
        table.set_damage(0, 0, 3).unwrap();
        sheet
    }

    #[test]
    fn weapon_rating_matches_reference() {
        let stats = compute_statistics(&reference_sheet());
        let weapon = &stats.ratings.weapons[0];

        assert_close(weapon.hit_chance, 0.5);
        assert_close(weapon.expected_hits, 5.0);
        assert_close(weapon.expected_damage, 15.0);
        assert_close(weapon.rating, 0.5);
    }

    #[test]
    fn defense_summary_matches_reference() {
        let stats = compute_statistics(&reference_sheet());
        let summary = &stats.summary;

        assert_close(summary.to_save_avg, 4.0);
        assert_close(summary.to_resist_avg, 7.0);
        assert_close(summary.hardness_avg, 0.0);
        assert_eq!(summary.total_health, 5);
        assert_close(summary.failed_save_chance, 0.5);
        // No resist roll: the resist always fails
        assert_close(summary.failed_resist_chance, 1.0);
    }

    #[test]
    fn survival_ratings_follow_damage_formula() {
        let stats = compute_statistics(&reference_sheet());
        let survival: Vec<_> = stats
            .ratings
            .survival
            .iter()
            .map(|rating| (rating.damage_per_hit, rating.rating.value().unwrap()))
            .collect();

        // failed saves: round(30*0.5)=15, round(15*0.5)=8 (ties to even),
        // round(10*0.5)=5, round(6*0.5)=3, round(5*0.5)=2, round(3*0.5)=2
        let expected = [(1, 3.0), (2, 3.2), (3, 3.0), (5, 3.0), (6, 2.4), (10, 4.0)];
        for ((damage, actual), (expected_damage, expected_value)) in survival.iter().zip(expected) {
            assert_eq!(*damage, expected_damage);
            assert!((actual - expected_value).abs() < EPSILON, "damage {damage}");
        }
        assert_close(stats.ratings.defense, 3.1);
    }

    #[test]
    fn certain_resist_zeroes_defense() {
        let mut sheet = reference_sheet();
        sheet.stat_table.set_to_resist(0, Some(1)).unwrap();

        let stats = compute_statistics(&sheet);

        assert_close(stats.summary.failed_resist_chance, 0.0);
        assert_close(stats.ratings.defense, 0.0);
    }

    #[test]
    fn hardness_can_push_survival_negative() {
        let mut sheet = reference_sheet();
        sheet.stat_table.set_hardness(0, Some(20)).unwrap();

        let stats = compute_statistics(&sheet);

        // Damage 1: 15 damage - 20 hardness = -5 over 5 health
        assert_close(stats.ratings.survival[0].rating, -1.0);
    }

    #[test]
    fn zero_health_is_not_applicable() {
        let mut sheet = reference_sheet();
        sheet.health = 0;

        let stats = compute_statistics(&sheet);

        assert_eq!(stats.summary.total_health, 0);
        assert_eq!(stats.ratings.defense, StatValue::NotApplicable);
        assert!(stats.ratings.survival.iter().all(|r| !r.rating.is_applicable()));
        // Offense does not depend on health
        assert!(stats.ratings.weapons[0].rating.is_applicable());
    }

    #[test]
    fn averages_span_all_columns() {
        let mut sheet = reference_sheet();
        sheet.stat_table.add_result_column();
        sheet.stat_table.set_to_save(1, 2).unwrap();
        sheet.stat_table.set_to_resist(1, Some(5)).unwrap();
        sheet.stat_table.set_attacks(0, 1, 4).unwrap();

        let stats = compute_statistics(&sheet);

        assert_close(stats.summary.to_save_avg, 3.0);
        assert_close(stats.summary.to_resist_avg, 6.0);
        assert_close(stats.ratings.weapons[0].attack_avg, 3.0);
    }

    #[test]
    fn no_weapons_means_no_weapon_ratings() {
        let mut sheet = reference_sheet();
        sheet.stat_table.remove_weapon(0).unwrap();

        assert!(compute_statistics(&sheet).ratings.weapons.is_empty());
    }

    #[test]
    fn display_rounds_to_four_places() {
        assert_eq!(StatValue::new(0.5).to_string(), "0.5");
        assert_eq!(StatValue::new(1.0 / 3.0).to_string(), "0.3333");
        assert_eq!(StatValue::new(2.0 / 3.0).to_string(), "0.6667");
        assert_eq!(StatValue::new(3.0).to_string(), "3.0");
        assert_eq!(StatValue::new(f64::INFINITY).to_string(), "N/A");
        assert_eq!(StatValue::new(f64::NAN), StatValue::NotApplicable);
    }
}
