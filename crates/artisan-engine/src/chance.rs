//! Success-chance ramp and the per-10000 roll.
//!
//! For a window `(min, max)` and skill `s`:
//!
//! - `s < min` gives 0.
//! - `min == max` gives the override's `at_min` if there is one, else 1.
//! - `s >= max` gives the override's `at_max` if there is one, else 1.
//! - otherwise the chance is linear from `lo` at `min` to `hi` at `max`,
//!   where `lo` is the override's `at_min` or the discipline floor and `hi`
//!   is the override's `at_max` or 1.
//!
//! The result is clamped to `[0, 1]`. Rolls draw from `0..10000` and pass
//! when the draw is below `chance * 10000`, so 0 never passes and 1 always
//! does.

use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::recipe::SkillWindow;

/// Resolution of a roll: draws fall in `0..ROLL_SCALE`.
pub const ROLL_SCALE: u32 = 10_000;

/// Per-item replacement for the chance at each end of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChanceOverride {
    /// Chance at the window minimum.
    pub at_min: Decimal,
    /// Chance at and above the window maximum.
    pub at_max: Decimal,
}

impl ChanceOverride {
    /// An override ramping from `at_min` to `at_max`.
    pub const fn new(at_min: Decimal, at_max: Decimal) -> Self {
        Self { at_min, at_max }
    }
}

/// Probability in `[0, 1]` that one roll against `window` succeeds.
pub fn success_chance(
    window: SkillWindow,
    skill: Decimal,
    floor: Decimal,
    chance_override: Option<ChanceOverride>,
) -> Decimal {
    let raw = if skill < window.min {
        Decimal::ZERO
    } else if window.is_degenerate() {
        chance_override.map_or(Decimal::ONE, |o| o.at_min)
    } else if skill >= window.max {
        chance_override.map_or(Decimal::ONE, |o| o.at_max)
    } else {
        let lo = chance_override.map_or(floor, |o| o.at_min);
        let hi = chance_override.map_or(Decimal::ONE, |o| o.at_max);
        interpolate(window, skill, lo, hi).unwrap_or(lo)
    };
    clamp_unit(raw)
}

fn interpolate(window: SkillWindow, skill: Decimal, lo: Decimal, hi: Decimal) -> Option<Decimal> {
    let span = window.max.checked_sub(window.min)?;
    let progress = skill.checked_sub(window.min)?;
    let rise = hi.checked_sub(lo)?;
    let step = rise.checked_mul(progress)?.checked_div(span)?;
    lo.checked_add(step)
}

fn clamp_unit(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::ONE)
}

/// Convert a probability to a threshold in `0..=ROLL_SCALE`.
///
/// Values outside `[0, 1]` are clamped; fractional thresholds truncate.
pub fn chance_to_threshold(chance: Decimal) -> u32 {
    clamp_unit(chance)
        .checked_mul(Decimal::from(ROLL_SCALE))
        .and_then(|scaled| scaled.trunc().to_u32())
        .unwrap_or(0)
        .min(ROLL_SCALE)
}

/// Perform one Bernoulli roll at `chance`.
pub fn roll<R: Rng + ?Sized>(rng: &mut R, chance: Decimal) -> bool {
    let threshold = chance_to_threshold(chance);
    let draw: u32 = rng.random_range(0..ROLL_SCALE);
    draw < threshold
}
