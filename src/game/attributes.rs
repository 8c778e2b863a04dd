//! Strength, agility and spirit, plus the timings they derive.

use serde::{Deserialize, Serialize};

use super::{AGILITY_DRAW_FACTOR, MIN_CAST_TIME, MIN_DRAW_INTERVAL, SPIRIT_CAST_FACTOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Strength,
    Agility,
    Spirit,
}

/// Raw attribute values. A value may dip below zero while overlapping timed
/// deltas are active; derived calculations only ever see the clamped value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: i32,
    pub agility: i32,
    pub spirit: i32,
}

impl Attributes {
    pub fn new(strength: i32, agility: i32, spirit: i32) -> Self {
        Self {
            strength,
            agility,
            spirit,
        }
    }

    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Agility => self.agility,
            Attribute::Spirit => self.spirit,
        }
    }

    fn slot(&mut self, attribute: Attribute) -> &mut i32 {
        match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Agility => &mut self.agility,
            Attribute::Spirit => &mut self.spirit,
        }
    }

    /// Value as seen by derived calculations.
    pub fn effective(&self, attribute: Attribute) -> i32 {
        self.get(attribute).max(0)
    }

    /// Apply a delta without letting a reduction push the effective value
    /// below zero. Returns the delta actually applied, which is what a later
    /// reversal must undo.
    pub fn adjust(&mut self, attribute: Attribute, delta: i32) -> i32 {
        let slot = self.slot(attribute);
        let applied = if delta < 0 {
            -(-delta).min((*slot).max(0))
        } else {
            delta
        };
        *slot += applied;
        applied
    }

    /// Undo a delta previously returned by [`Attributes::adjust`].
    pub fn revert(&mut self, attribute: Attribute, applied: i32) {
        *self.slot(attribute) -= applied;
    }

    /// `max(0.5, base - agility * 0.2)`
    pub fn draw_interval(&self, base: f32) -> f32 {
        (base - self.effective(Attribute::Agility) as f32 * AGILITY_DRAW_FACTOR)
            .max(MIN_DRAW_INTERVAL)
    }

    /// `max(0.1, base - spirit * 0.1)`; instant cards stay instant.
    pub fn cast_time(&self, base: f32) -> f32 {
        if base <= 0.0 {
            return 0.0;
        }
        (base - self.effective(Attribute::Spirit) as f32 * SPIRIT_CAST_FACTOR).max(MIN_CAST_TIME)
    }

    /// Damage of a simple attack, which is the only kind strength modifies.
    pub fn attack_damage(&self, base: i32) -> i32 {
        base.max(0) + self.effective(Attribute::Strength)
    }
}
