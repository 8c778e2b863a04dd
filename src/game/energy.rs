//! Energy pool - regenerates over time and is spent to play cards.

use serde::{Deserialize, Serialize};

use super::Regen;

/// A combatant's energy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Energy {
    current: i32,
    max: i32,
    regen: Regen,
    /// Flat reduction applied to every cost before it is checked
    pub cost_reduction: i32,
}

impl Energy {
    pub fn new(initial: i32, max: i32, regen_rate: i32) -> Self {
        let max = max.max(0);
        Self {
            current: initial.clamp(0, max),
            max,
            regen: Regen::new(regen_rate),
            cost_reduction: 0,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn percentage(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }

    /// Seconds until the next regeneration payout.
    pub fn next_in(&self) -> f32 {
        self.regen.next_in()
    }

    /// Cost after the flat reduction.
    pub fn effective_cost(&self, cost: i32) -> i32 {
        (cost - self.cost_reduction).max(0)
    }

    /// Check if we can afford a cost without spending.
    pub fn can_afford(&self, cost: i32) -> bool {
        self.current >= self.effective_cost(cost)
    }

    /// Try to spend energy. Returns true if successful; nothing changes otherwise.
    pub fn consume(&mut self, cost: i32) -> bool {
        let cost = self.effective_cost(cost);
        if self.current < cost {
            return false;
        }
        self.current -= cost;
        true
    }

    /// Returns the amount actually gained.
    pub fn gain(&mut self, amount: i32) -> i32 {
        let gained = amount.max(0).min(self.max - self.current);
        self.current += gained;
        gained
    }

    /// Empty the pool, returning what it held.
    pub fn drain(&mut self) -> i32 {
        std::mem::take(&mut self.current)
    }

    pub fn regenerate(&mut self, dt: f32) -> i32 {
        let amount = self.regen.accumulate(dt);
        self.gain(amount)
    }
}
