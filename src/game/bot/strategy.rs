//! Threat assessment and strategy selection.

use serde::{Deserialize, Serialize};

use super::BotMemory;
use crate::game::{CHEAP_CARD_COST, EffectFamily, Fighter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Defensive,
    Aggressive,
    Combo,
    #[default]
    Balanced,
}

pub const MAX_THREAT: i32 = 10;

/// How dangerous the situation looks from `me`'s side, in `0..=10`.
/// `adaptability` sets how strongly a recent health slide counts.
pub fn assess_threat(me: &Fighter, foe: &Fighter, memory: &BotMemory, adaptability: f32) -> i32 {
    let own = me.combatant.health.percentage();
    let theirs = foe.combatant.health.percentage();
    let mut threat = 3;

    if own < 0.25 {
        threat += 3;
    } else if own < 0.5 {
        threat += 1;
    }
    if theirs < 0.25 {
        threat -= 2;
    } else if theirs < 0.5 {
        threat -= 1;
    }

    let burst = burst_potential(foe);
    if burst >= me.combatant.health.current() + me.armor.value() {
        threat += 3;
    } else {
        threat += (burst / 5).min(3);
    }

    let hand = foe.piles.hand.len();
    if hand >= 7 {
        threat += 2;
    } else if hand >= 4 {
        threat += 1;
    }

    if memory.health_trend() * (0.5 + adaptability) < -0.15 {
        threat += 1;
    }
    threat.clamp(0, MAX_THREAT)
}

/// Sum of `value1` over the damage cards a side can afford right now.
pub fn burst_potential(fighter: &Fighter) -> i32 {
    let energy = &fighter.combatant.energy;
    fighter
        .piles
        .hand
        .iter()
        .filter(|card| card.family() == EffectFamily::Damage && energy.can_afford(card.energy_cost))
        .map(|card| card.value1.max(0))
        .sum()
}

/// Whether the affordable damage in hand, cheapest first, can finish the foe.
pub fn lethal_available(me: &Fighter, foe: &Fighter) -> bool {
    let energy = &me.combatant.energy;
    let mut damage_cards: Vec<_> = me
        .piles
        .hand
        .iter()
        .filter(|card| card.family() == EffectFamily::Damage)
        .map(|card| (energy.effective_cost(card.energy_cost), card.value1.max(0)))
        .collect();
    damage_cards.sort_by_key(|(cost, _)| *cost);

    let mut budget = energy.current();
    let mut total = 0;
    for (cost, damage) in damage_cards {
        if cost > budget {
            break;
        }
        budget -= cost;
        total += damage;
    }
    total > 0 && total >= foe.combatant.health.current() + foe.armor.value()
}

/// Fixed-priority strategy pick. `fallback` replaces balanced when a profile
/// asks for a default.
pub fn choose_strategy(
    me: &Fighter,
    foe: &Fighter,
    threat: i32,
    memory: &BotMemory,
    fallback: Strategy,
) -> Strategy {
    if threat >= 7 || me.combatant.health.percentage() < 0.3 {
        return Strategy::Defensive;
    }
    if foe.combatant.health.percentage() < 0.4 || lethal_available(me, foe) {
        return Strategy::Aggressive;
    }
    let energy = &me.combatant.energy;
    let cheap_cards = me.piles.hand.iter().any(|card| {
        card.energy_cost <= CHEAP_CARD_COST && energy.can_afford(card.energy_cost)
    });
    if memory.combo_streak() > 0 && cheap_cards {
        return Strategy::Combo;
    }
    fallback
}
