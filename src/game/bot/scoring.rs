//! Situational card scoring for the balanced strategy.

use super::{BotMemory, Personality};
use crate::game::{CardInstance, Effect, EffectFamily, Fighter};

/// The parts of the battle the score depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Situation {
    pub own_health: f32,
    pub foe_health: f32,
    pub threat: i32,
    pub own_hand: usize,
    pub foe_hand: usize,
}

impl Situation {
    pub fn read(me: &Fighter, foe: &Fighter, threat: i32) -> Self {
        Self {
            own_health: me.combatant.health.percentage(),
            foe_health: foe.combatant.health.percentage(),
            threat,
            own_hand: me.piles.hand.len(),
            foe_hand: foe.piles.hand.len(),
        }
    }
}

/// What a card is worth before situational bonuses. Strength-scaled strikes
/// and energy dumps are estimated from the caster's current state.
pub fn card_value(card: &CardInstance, me: &Fighter) -> f32 {
    match card.effect {
        Effect::Strike { base } => me.combatant.attributes.attack_damage(base) as f32,
        Effect::ConsumeEnergy => {
            let energy = &me.combatant.energy;
            let left = energy.current() - energy.effective_cost(card.energy_cost);
            (left * (left + 1) / 2).max(0) as f32
        }
        _ => card.value1.max(0) as f32,
    }
}

fn family_bonus(family: EffectFamily, s: &Situation) -> f32 {
    match family {
        EffectFamily::Damage => {
            let mut bonus = 5.0;
            if s.foe_health < 0.3 {
                bonus += 10.0;
            }
            if s.own_health > 0.7 {
                bonus += 5.0;
            }
            if s.threat <= 3 {
                bonus += 3.0;
            }
            bonus
        }
        EffectFamily::Heal => {
            let mut bonus = if s.own_health < 0.3 {
                20.0
            } else if s.own_health < 0.6 {
                8.0
            } else if s.own_health >= 0.95 {
                -10.0
            } else {
                0.0
            };
            if s.threat >= 7 {
                bonus += 8.0;
            }
            bonus
        }
        EffectFamily::Armor => {
            let mut bonus = 0.0;
            if (0.3..0.7).contains(&s.own_health) {
                bonus += 6.0;
            }
            if s.threat >= 6 {
                bonus += 6.0;
            }
            bonus
        }
        EffectFamily::Slow => {
            let mut bonus = 2.0;
            if s.foe_hand > s.own_hand {
                bonus += 4.0;
            }
            if s.foe_health > 0.5 {
                bonus += 3.0;
            }
            bonus
        }
        EffectFamily::Poison => {
            if s.foe_health > 0.5 {
                6.0
            } else {
                2.0
            }
        }
        EffectFamily::Stealth => {
            let mut bonus = 0.0;
            if s.own_health < 0.4 {
                bonus += 8.0;
            }
            if s.threat >= 7 {
                bonus += 6.0;
            }
            bonus
        }
        EffectFamily::Utility => 2.0,
    }
}

/// Score one card. Higher is better; only the ordering matters.
pub fn score_card(
    card: &CardInstance,
    me: &Fighter,
    situation: &Situation,
    personality: &Personality,
    memory: &BotMemory,
) -> f32 {
    let cost = card.energy_cost as f32;
    let family = card.family();
    let mut score = card_value(card, me) / cost.max(1.0) * 10.0 + cost * 0.5;
    score += family_bonus(family, situation);

    if card.is_channelled() {
        let mut multiplier = 1.2;
        if situation.threat <= 3 {
            multiplier *= 1.1;
        }
        if situation.own_health > 0.7 {
            multiplier *= 1.1;
        }
        score *= multiplier;
    }

    match family {
        EffectFamily::Damage | EffectFamily::Poison | EffectFamily::Slow => {
            score *= 0.5 + personality.aggressiveness;
        }
        EffectFamily::Heal | EffectFamily::Armor => {
            score *= 0.5 + personality.defensiveness();
        }
        EffectFamily::Stealth | EffectFamily::Utility => {}
    }
    if card.is_channelled() {
        score *= 0.5 + personality.patience;
    }
    score *= 0.75 + personality.efficiency * 0.5;

    if memory.combo_streak() > 0 {
        let weight = 0.5 + personality.combo_preference;
        score *= 1.0 + memory.combo_counter as f32 * 0.1 * weight;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn situation(own_health: f32, foe_health: f32, threat: i32) -> Situation {
        Situation {
            own_health,
            foe_health,
            threat,
            own_hand: 4,
            foe_hand: 4,
        }
    }

    #[test]
    fn healing_matters_most_when_dying() {
        let calm = family_bonus(EffectFamily::Heal, &situation(0.9, 0.9, 3));
        let dying = family_bonus(EffectFamily::Heal, &situation(0.2, 0.9, 8));
        assert!(dying > calm + 20.0);
    }

    #[test]
    fn damage_bonus_rises_when_foe_is_low() {
        let even = family_bonus(EffectFamily::Damage, &situation(0.5, 0.9, 5));
        let finishing = family_bonus(EffectFamily::Damage, &situation(0.5, 0.2, 5));
        assert!(finishing > even);
    }

    #[test]
    fn full_health_heal_is_penalised() {
        assert!(family_bonus(EffectFamily::Heal, &situation(1.0, 0.5, 2)) < 0.0);
    }
}
