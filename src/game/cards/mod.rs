//! Card system - templates, the effect vocabulary, and battle instances.
//!
//! Cards are registered per class:
//! - Warrior: strikes, armor and life-cost rage
//! - Mage: channelled spells and utility
//! - Rogue: stealth, poison and ambushes
//! - Paladin: healing, armor and dispels

mod mage;
mod paladin;
mod rogue;
mod warrior;

use serde::{Deserialize, Serialize};

use super::{CharacterClass, Side};

pub use mage::register_mage_cards;
pub use paladin::register_paladin_cards;
pub use rogue::register_rogue_cards;
pub use warrior::register_warrior_cards;

/// Whether a card resolves on play or after a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastType {
    #[default]
    Instant,
    Channel,
}

/// Static card data as delivered by configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTemplate {
    pub name: String,
    pub class: CharacterClass,
    pub energy_cost: i32,
    #[serde(default)]
    pub health_cost: Option<i32>,
    #[serde(default)]
    pub cast_time: f32,
    #[serde(default)]
    pub cast_type: CastType,
    #[serde(default)]
    pub effect_text: String,
    pub effect_code: String,
    #[serde(default)]
    pub value1: i32,
    #[serde(default)]
    pub value2: i32,
    #[serde(default)]
    pub value3: i32,
    #[serde(default, rename = "isExhaust")]
    pub exhaust: bool,
}

impl CardTemplate {
    /// Channel time as configured; channel-typed cards without a time resolve instantly.
    pub fn base_cast_time(&self) -> f32 {
        match self.cast_type {
            CastType::Instant if self.cast_time <= 0.0 => 0.0,
            _ => self.cast_time.max(0.0),
        }
    }
}

/// What a card does, with its parameters already typed.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Spell damage to the opponent
    Damage { amount: i32 },
    /// Simple attack, scaled by strength
    Strike { base: i32 },
    DamagePoison {
        damage: i32,
        per_second: i32,
        duration: f32,
    },
    DamageSlow {
        damage: i32,
        agility: i32,
        duration: f32,
    },
    /// Gain armor
    Armor { amount: i32 },
    DamageArmor { damage: i32, armor: i32 },
    /// Heal self
    Heal { amount: i32 },
    /// Only legal from stealth; breaks the target's cast
    Ambush { damage: i32 },
    /// Breaks the target's cast
    Interrupt { damage: i32 },
    /// Spend all remaining energy for triangular damage
    ConsumeEnergy,
    /// Enter stealth
    Stealth { duration: f32 },
    /// Draw cards, then discard one of them at random
    DrawDiscard { count: u32 },
    /// Strip every status effect from the opponent
    Dispel,
    /// Pay health to deal spell damage
    LifeCost { damage: i32, health_cost: i32 },
    /// Unknown effect code
    Fallback { code: String },
}

/// Broad category used by the bot when ranking cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectFamily {
    Damage,
    Heal,
    Armor,
    Slow,
    Poison,
    Stealth,
    Utility,
}

impl Effect {
    pub fn from_template(template: &CardTemplate) -> Self {
        let [v1, v2, v3] = [template.value1, template.value2, template.value3];
        match template.effect_code.trim().to_ascii_uppercase().as_str() {
            "DAMAGE" => Effect::Damage { amount: v1 },
            "STRIKE" => Effect::Strike { base: v1 },
            "DAMAGE_POISON" => Effect::DamagePoison {
                damage: v1,
                per_second: v2,
                duration: v3 as f32,
            },
            "DAMAGE_SLOW" => Effect::DamageSlow {
                damage: v1,
                agility: v2,
                duration: v3 as f32,
            },
            "ARMOR" => Effect::Armor { amount: v1 },
            "DAMAGE_ARMOR" => Effect::DamageArmor {
                damage: v1,
                armor: v2,
            },
            "HEAL" => Effect::Heal { amount: v1 },
            "AMBUSH" => Effect::Ambush { damage: v1 },
            "INTERRUPT" => Effect::Interrupt { damage: v1 },
            "CONSUME_ENERGY" => Effect::ConsumeEnergy,
            "STEALTH" => Effect::Stealth {
                duration: v1 as f32,
            },
            "DRAW_DISCARD" => Effect::DrawDiscard {
                count: v1.max(0) as u32,
            },
            "DISPEL" => Effect::Dispel,
            "LIFE_COST" => Effect::LifeCost {
                damage: v1,
                health_cost: template.health_cost.unwrap_or(v2),
            },
            _ => {
                tracing::warn!(
                    card = %template.name,
                    code = %template.effect_code,
                    "unknown effect code, falling back to weak damage"
                );
                Effect::Fallback {
                    code: template.effect_code.clone(),
                }
            }
        }
    }

    pub fn family(&self) -> EffectFamily {
        match self {
            Effect::Damage { .. }
            | Effect::Strike { .. }
            | Effect::Ambush { .. }
            | Effect::Interrupt { .. }
            | Effect::ConsumeEnergy
            | Effect::LifeCost { .. }
            | Effect::Fallback { .. } => EffectFamily::Damage,
            Effect::DamagePoison { .. } => EffectFamily::Poison,
            Effect::DamageSlow { .. } => EffectFamily::Slow,
            Effect::Armor { .. } | Effect::DamageArmor { .. } => EffectFamily::Armor,
            Effect::Heal { .. } => EffectFamily::Heal,
            Effect::Stealth { .. } => EffectFamily::Stealth,
            Effect::DrawDiscard { .. } | Effect::Dispel => EffectFamily::Utility,
        }
    }

    /// Effects that pick the opponent as their target.
    pub fn targets_opponent(&self) -> bool {
        !matches!(
            self,
            Effect::Armor { .. }
                | Effect::Heal { .. }
                | Effect::Stealth { .. }
                | Effect::DrawDiscard { .. }
        )
    }

    /// Spell damage honours the caster's "next spell doubles" flag.
    pub fn is_spell_damage(&self) -> bool {
        matches!(
            self,
            Effect::Damage { .. }
                | Effect::DamagePoison { .. }
                | Effect::DamageSlow { .. }
                | Effect::DamageArmor { .. }
                | Effect::LifeCost { .. }
        )
    }
}

/// A card dealt into a battle.
#[derive(Debug, Clone, PartialEq)]
pub struct CardInstance {
    /// Unique within one battle
    pub id: u32,
    pub name: String,
    pub class: CharacterClass,
    pub energy_cost: i32,
    pub health_cost: Option<i32>,
    pub cast_time: f32,
    pub effect: Effect,
    pub value1: i32,
    pub value2: i32,
    pub value3: i32,
    pub exhaust: bool,
    /// Set once the card commits to a target; later concealment does not matter
    pub locked_target: Option<Side>,
}

impl CardInstance {
    pub fn from_template(id: u32, template: &CardTemplate) -> Self {
        let effect = Effect::from_template(template);
        let health_cost = match effect {
            Effect::LifeCost { health_cost, .. } => Some(health_cost),
            _ => template.health_cost,
        };
        Self {
            id,
            name: template.name.clone(),
            class: template.class,
            energy_cost: template.energy_cost.max(0),
            health_cost,
            cast_time: template.base_cast_time(),
            effect,
            value1: template.value1,
            value2: template.value2,
            value3: template.value3,
            exhaust: template.exhaust,
            locked_target: None,
        }
    }

    pub fn is_channelled(&self) -> bool {
        self.cast_time > 0.0
    }

    pub fn family(&self) -> EffectFamily {
        self.effect.family()
    }
}

/// Registry of all card templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardRegistry {
    cards: Vec<CardTemplate>,
}

impl CardRegistry {
    pub fn register(&mut self, card: CardTemplate) {
        self.cards.push(card);
    }

    /// Get a card by name (case-insensitive).
    pub fn get_by_name(&self, name: &str) -> Option<&CardTemplate> {
        let name_lower = name.to_lowercase();
        self.cards
            .iter()
            .find(|c| c.name.to_lowercase() == name_lower)
    }

    pub fn all(&self) -> &[CardTemplate] {
        &self.cards
    }

    pub fn for_class(&self, class: CharacterClass) -> impl Iterator<Item = &CardTemplate> {
        self.cards.iter().filter(move |c| c.class == class)
    }

    /// Registry holding every built-in card.
    pub fn standard() -> Self {
        let mut registry = Self::default();
        register_warrior_cards(&mut registry);
        register_mage_cards(&mut registry);
        register_rogue_cards(&mut registry);
        register_paladin_cards(&mut registry);
        registry
    }
}

/// Shorthand used by the class registration modules.
fn card(
    class: CharacterClass,
    name: &str,
    energy_cost: i32,
    cast_time: f32,
    effect_code: &str,
    values: [i32; 3],
    effect_text: &str,
) -> CardTemplate {
    CardTemplate {
        name: name.to_string(),
        class,
        energy_cost,
        health_cost: None,
        cast_time,
        cast_type: if cast_time > 0.0 {
            CastType::Channel
        } else {
            CastType::Instant
        },
        effect_text: effect_text.to_string(),
        effect_code: effect_code.to_string(),
        value1: values[0],
        value2: values[1],
        value3: values[2],
        exhaust: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_code_falls_back() {
        let template = card(CharacterClass::Mage, "Glitch", 1, 0.0, "TELEPORT", [5, 0, 0], "");
        assert_eq!(
            Effect::from_template(&template),
            Effect::Fallback {
                code: "TELEPORT".to_string()
            }
        );
    }

    #[test]
    fn codes_are_case_insensitive() {
        let template = card(CharacterClass::Mage, "Zap", 1, 0.0, " damage ", [5, 0, 0], "");
        assert_eq!(Effect::from_template(&template), Effect::Damage { amount: 5 });
    }

    #[test]
    fn life_cost_prefers_card_health_cost() {
        let mut template = card(CharacterClass::Warrior, "Rage", 1, 0.0, "LIFE_COST", [7, 3, 0], "");
        template.health_cost = Some(5);
        let instance = CardInstance::from_template(1, &template);
        assert_eq!(
            instance.effect,
            Effect::LifeCost {
                damage: 7,
                health_cost: 5
            }
        );
        assert_eq!(instance.health_cost, Some(5));
    }

    #[test]
    fn every_standard_card_parses() {
        let registry = CardRegistry::standard();
        for template in registry.all() {
            let effect = Effect::from_template(template);
            assert!(
                !matches!(effect, Effect::Fallback { .. }),
                "{} uses unknown code {}",
                template.name,
                template.effect_code
            );
        }
    }

    #[test]
    fn self_effects_do_not_target() {
        assert!(!Effect::Heal { amount: 3 }.targets_opponent());
        assert!(!Effect::Stealth { duration: 3.0 }.targets_opponent());
        assert!(Effect::Dispel.targets_opponent());
        assert!(Effect::ConsumeEnergy.targets_opponent());
    }
}
