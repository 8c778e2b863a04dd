//! Health pool and the leaky-bucket regeneration shared with energy.

use serde::{Deserialize, Serialize};

/// Time accumulator that pays out one regeneration step per full second.
///
/// Partial progress survives across ticks, so the payout does not depend on
/// how the elapsed time is sliced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Regen {
    /// Amount restored per full second
    pub rate: i32,
    accumulated: f32,
}

impl Regen {
    pub fn new(rate: i32) -> Self {
        Self {
            rate,
            accumulated: 0.0,
        }
    }

    /// Add elapsed time and return the amount to restore.
    pub fn accumulate(&mut self, dt: f32) -> i32 {
        self.accumulated += dt.max(0.0);
        let mut steps = 0;
        while self.accumulated >= 1.0 {
            self.accumulated -= 1.0;
            steps += 1;
        }
        steps * self.rate
    }

    /// Seconds until the next payout.
    pub fn next_in(&self) -> f32 {
        (1.0 - self.accumulated).max(0.0)
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}

/// Health of a combatant. Reaching zero is terminal: the pool freezes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    current: i32,
    max: i32,
    regen: Regen,
}

impl Health {
    pub fn new(max: i32, regen_rate: i32) -> Self {
        let max = max.max(1);
        Self {
            current: max,
            max,
            regen: Regen::new(regen_rate),
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn percentage(&self) -> f32 {
        self.current as f32 / self.max as f32
    }

    /// Returns the damage actually taken. Negative input counts as zero.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        if self.is_dead() || amount <= 0 {
            return 0;
        }
        let taken = amount.min(self.current);
        self.current -= taken;
        taken
    }

    /// Returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.is_dead() || amount <= 0 {
            return 0;
        }
        let restored = amount.min(self.max - self.current);
        self.current += restored;
        restored
    }

    /// A life cost must leave the payer standing.
    pub fn can_pay(&self, cost: i32) -> bool {
        !self.is_dead() && self.current > cost.max(0)
    }

    /// Pay a life cost. Fails without mutation when unaffordable.
    pub fn pay(&mut self, cost: i32) -> bool {
        if !self.can_pay(cost) {
            return false;
        }
        self.current -= cost.max(0);
        true
    }

    pub fn regenerate(&mut self, dt: f32) -> i32 {
        if self.is_dead() {
            return 0;
        }
        let amount = self.regen.accumulate(dt);
        self.heal(amount)
    }
}
