//! Concealment state machine.
//!
//! A hidden combatant cannot be picked as a target. Stealth ends on expiry,
//! when the combatant takes damage, or when it commits an attack; the battle
//! calls the triggers at those points, this type never exits on its own
//! except through [`Stealth::advance`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StealthExit {
    Expired,
    TookDamage,
    Attacked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stealth {
    remaining: Option<f32>,
    max_duration: f32,
    last_exit: Option<StealthExit>,
}

impl Stealth {
    pub fn new(max_duration: f32) -> Self {
        Self {
            remaining: None,
            max_duration: max_duration.max(0.0),
            last_exit: None,
        }
    }

    pub fn is_stealthed(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.unwrap_or(0.0)
    }

    pub fn last_exit(&self) -> Option<StealthExit> {
        self.last_exit
    }

    /// Concealment `enter(duration)` would grant, after the cap.
    pub fn granted(&self, duration: f32) -> f32 {
        duration.min(self.max_duration).max(0.0)
    }

    /// Rejected while already hidden; the running duration is left alone.
    pub fn enter(&mut self, duration: f32) -> bool {
        if self.is_stealthed() {
            return false;
        }
        let duration = self.granted(duration);
        if duration <= 0.0 {
            return false;
        }
        self.remaining = Some(duration);
        tracing::debug!(duration, "entered stealth");
        true
    }

    /// Safe to call when not hidden. Returns whether stealth was actually broken.
    pub fn exit(&mut self, reason: StealthExit) -> bool {
        if self.remaining.take().is_none() {
            return false;
        }
        self.last_exit = Some(reason);
        tracing::debug!(?reason, "left stealth");
        true
    }

    /// Returns true when stealth ran out during this step.
    pub fn advance(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.remaining.as_mut() else {
            return false;
        };
        *remaining -= dt.max(0.0);
        if *remaining <= 0.0 {
            return self.exit(StealthExit::Expired);
        }
        false
    }

    pub fn on_take_damage(&mut self, amount: i32) -> bool {
        amount > 0 && self.exit(StealthExit::TookDamage)
    }

    pub fn on_attack(&mut self) -> bool {
        self.exit(StealthExit::Attacked)
    }
}
