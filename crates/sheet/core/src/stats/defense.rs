//! Defensive summary and survival ratings.

use super::{DAMAGE_SAMPLES, DIE_SIDES, NO_RESIST, RATING_BASE, StatValue, mean};
use crate::datasheet::Datasheet;
use crate::table::ResultColumn;

/// Column-averaged defensive stats of a sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct DefenseSummary {
    pub to_save_avg: StatValue,
    /// Columns without a resist roll count as [`NO_RESIST`].
    pub to_resist_avg: StatValue,
    /// Columns without hardness count as `0`.
    pub hardness_avg: StatValue,
    pub total_health: u64,
    pub failed_save_chance: StatValue,
    pub failed_resist_chance: StatValue,
}

/// Fraction of total health lost to [`RATING_BASE`] damage dealt in hits of
/// `damage_per_hit`.
#[derive(Clone, Debug, PartialEq)]
pub struct SurvivalRating {
    pub damage_per_hit: u32,
    pub rating: StatValue,
}

/// Raw averages, kept unwrapped for the survival math.
struct DefenseInputs {
    to_save_avg: f64,
    to_resist_avg: f64,
    hardness_avg: f64,
}

impl DefenseInputs {
    fn from_columns(columns: &[ResultColumn]) -> Self {
        Self {
            to_save_avg: mean(columns.iter().map(|c| f64::from(c.to_save))),
            to_resist_avg: mean(
                columns
                    .iter()
                    .map(|c| f64::from(c.to_resist.unwrap_or(NO_RESIST))),
            ),
            hardness_avg: mean(columns.iter().map(|c| f64::from(c.hardness.unwrap_or(0)))),
        }
    }

    fn failed_save_chance(&self) -> f64 {
        (self.to_save_avg - 1.0) / DIE_SIDES
    }

    fn failed_resist_chance(&self) -> f64 {
        (self.to_resist_avg - 1.0).max(0.0) / DIE_SIDES
    }
}

impl DefenseSummary {
    pub fn from_sheet(sheet: &Datasheet) -> Self {
        Self::from_inputs(&DefenseInputs::from_columns(sheet.stat_table.columns()), sheet)
    }

    fn from_inputs(inputs: &DefenseInputs, sheet: &Datasheet) -> Self {
        Self {
            to_save_avg: inputs.to_save_avg.into(),
            to_resist_avg: inputs.to_resist_avg.into(),
            hardness_avg: inputs.hardness_avg.into(),
            total_health: u64::from(sheet.model_count) * u64::from(sheet.health),
            failed_save_chance: inputs.failed_save_chance().into(),
            failed_resist_chance: inputs.failed_resist_chance().into(),
        }
    }
}

/// Defense summary, defense rating and per-sample survival ratings of `sheet`.
pub(super) fn assess(sheet: &Datasheet) -> (DefenseSummary, StatValue, Vec<SurvivalRating>) {
    let inputs = DefenseInputs::from_columns(sheet.stat_table.columns());
    let summary = DefenseSummary::from_inputs(&inputs, sheet);

    let failed_save_chance = inputs.failed_save_chance();
    let failed_resist_chance = inputs.failed_resist_chance();
    let total_health = summary.total_health as f64;

    let raw: Vec<(u32, f64)> = DAMAGE_SAMPLES
        .iter()
        .map(|&damage_per_hit| {
            let hits = RATING_BASE / damage_per_hit;
            let failed_saves = (f64::from(hits) * failed_save_chance).round_ties_even();
            // Not clamped: hardness above the damage taken yields a negative value
            let damage_taken = f64::from(damage_per_hit) * failed_saves - inputs.hardness_avg;
            let damage_after_resist = failed_resist_chance * damage_taken;
            (damage_per_hit, damage_after_resist / total_health)
        })
        .collect();

    let defense = StatValue::new(mean(raw.iter().map(|&(_, rating)| rating)));
    let survival = raw
        .into_iter()
        .map(|(damage_per_hit, rating)| SurvivalRating {
            damage_per_hit,
            rating: rating.into(),
        })
        .collect();

    (summary, defense, survival)
}
