//! Weapon ratings.

use super::{DIE_SIDES, RATING_BASE, StatValue, mean};
use crate::table::WeaponTable;

/// Offensive profile of one weapon, averaged over its result columns.
#[derive(Clone, Debug, PartialEq)]
pub struct WeaponRating {
    pub name: String,
    pub attack_avg: StatValue,
    pub to_hit_avg: StatValue,
    pub damage_avg: StatValue,
    /// Chance of a single attack hitting on a d6.
    pub hit_chance: StatValue,
    pub expected_hits: StatValue,
    pub expected_damage: StatValue,
    /// Expected damage relative to [`RATING_BASE`].
    pub rating: StatValue,
}

pub(super) fn rate_weapon(weapon: &WeaponTable, model_count: u32) -> WeaponRating {
    let cells = weapon.cells();
    let attack_avg = mean(cells.iter().map(|cell| f64::from(cell.attacks)));
    let to_hit_avg = mean(cells.iter().map(|cell| f64::from(cell.to_hit)));
    let damage_avg = mean(cells.iter().map(|cell| f64::from(cell.damage)));

    let hit_chance = 1.0 - (to_hit_avg - 1.0) / DIE_SIDES;
    let expected_hits = f64::from(model_count) * attack_avg * hit_chance;
    let expected_damage = damage_avg * expected_hits;

    WeaponRating {
        name: weapon.name.clone(),
        attack_avg: attack_avg.into(),
        to_hit_avg: to_hit_avg.into(),
        damage_avg: damage_avg.into(),
        hit_chance: hit_chance.into(),
        expected_hits: expected_hits.into(),
        expected_damage: expected_damage.into(),
        rating: (expected_damage / f64::from(RATING_BASE)).into(),
    }
}
