//! Short-term memory the bot keeps between decisions.

use std::collections::VecDeque;

use crate::game::COMBO_WINDOW;

/// Fixed-size sliding window; the oldest entry falls out first.
#[derive(Debug, Clone, PartialEq)]
pub struct Window<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> Window<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn first(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BotMemory {
    /// Own health ratio per decision
    pub health: Window<f32>,
    /// Own energy ratio per decision
    pub energy: Window<f32>,
    pub threat: Window<i32>,
    pub combo: Window<u32>,
    /// Names of the cards played, newest last
    pub history: Window<String>,
    pub combo_counter: u32,
    pub last_action_time: Option<f32>,
    pub threat_level: i32,
}

impl Default for BotMemory {
    fn default() -> Self {
        Self {
            health: Window::new(5),
            energy: Window::new(5),
            threat: Window::new(10),
            combo: Window::new(5),
            history: Window::new(10),
            combo_counter: 0,
            last_action_time: None,
            threat_level: 0,
        }
    }
}

impl BotMemory {
    pub fn observe(&mut self, health_ratio: f32, energy_ratio: f32) {
        self.health.push(health_ratio);
        self.energy.push(energy_ratio);
    }

    pub fn record_threat(&mut self, threat: i32) {
        self.threat_level = threat;
        self.threat.push(threat);
    }

    /// A play within the combo window of the previous one extends the chain;
    /// otherwise the chain starts over at one.
    pub fn record_play(&mut self, card: &str, now: f32) -> u32 {
        self.combo_counter = match self.last_action_time {
            Some(last) if now - last <= COMBO_WINDOW => self.combo_counter + 1,
            _ => 1,
        };
        self.last_action_time = Some(now);
        self.combo.push(self.combo_counter);
        self.history.push(card.to_string());
        self.combo_counter
    }

    /// Plays chained after the first one.
    pub fn combo_streak(&self) -> u32 {
        self.combo_counter.saturating_sub(1)
    }

    /// Change in own health ratio across the window; negative means losing.
    pub fn health_trend(&self) -> f32 {
        trend(&self.health)
    }

    pub fn energy_trend(&self) -> f32 {
        trend(&self.energy)
    }

    /// Longest chain among the recent plays.
    pub fn best_combo(&self) -> u32 {
        self.combo.iter().copied().max().unwrap_or(0)
    }

    /// Names of the recent plays, oldest first.
    pub fn recent_plays(&self) -> Vec<String> {
        self.history.iter().cloned().collect()
    }
}

fn trend(window: &Window<f32>) -> f32 {
    match (window.first(), window.last()) {
        (Some(first), Some(last)) => last - first,
        _ => 0.0,
    }
}
