//! Hero skills - one cooldown-gated ability per class.

use super::{
    ActionResult, Attribute, Fighter, HeroSkillTemplate, Rejection, StatusRequest,
    attribute_from_code,
};

/// What a hero skill does when used.
#[derive(Debug, Clone, PartialEq)]
pub enum HeroEffect {
    /// Raise an attribute for a while
    AttributeBoost {
        attribute: Attribute,
        amount: i32,
        duration: f32,
    },
    /// Restore energy and double the next spell
    EnergySurge { energy: i32 },
    Vanish { duration: f32 },
    /// Armor that is taken back when the duration ends
    Fortify { armor: i32, duration: f32 },
    /// Unknown effect type; using the skill only spends it
    Inert { effect_type: String },
}

impl HeroEffect {
    pub fn from_template(template: &HeroSkillTemplate) -> Self {
        match template.effect_type.trim().to_ascii_uppercase().as_str() {
            "ATTRIBUTE_BOOST" => match attribute_from_code(template.value2) {
                Some(attribute) => HeroEffect::AttributeBoost {
                    attribute,
                    amount: template.value1,
                    duration: template.duration,
                },
                None => {
                    tracing::warn!(
                        skill = %template.name,
                        code = template.value2,
                        "unknown attribute code, skill does nothing"
                    );
                    HeroEffect::Inert {
                        effect_type: template.effect_type.clone(),
                    }
                }
            },
            "ENERGY_SURGE" => HeroEffect::EnergySurge {
                energy: template.value1,
            },
            "STEALTH" => HeroEffect::Vanish {
                duration: if template.duration > 0.0 {
                    template.duration
                } else {
                    template.value1 as f32
                },
            },
            "ARMOR" => HeroEffect::Fortify {
                armor: template.value1,
                duration: template.duration,
            },
            _ => {
                tracing::warn!(
                    skill = %template.name,
                    effect_type = %template.effect_type,
                    "unknown hero effect type, skill does nothing"
                );
                HeroEffect::Inert {
                    effect_type: template.effect_type.clone(),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeroSkill {
    pub name: String,
    pub effect: HeroEffect,
    pub energy_cost: i32,
    pub cooldown: f32,
    remaining: f32,
}

impl HeroSkill {
    pub fn from_template(template: &HeroSkillTemplate) -> Self {
        Self {
            name: template.name.clone(),
            effect: HeroEffect::from_template(template),
            energy_cost: template.energy_cost.max(0),
            cooldown: template.cooldown.max(0.0),
            remaining: 0.0,
        }
    }

    /// Seconds until the skill can be used again.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_cooling_down(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
    }

    /// Everything that would make [`Fighter::use_hero_skill`] refuse.
    pub fn check(&self, fighter: &Fighter) -> ActionResult<()> {
        if fighter.is_defeated() {
            return Err(Rejection::Defeated);
        }
        if self.is_cooling_down() {
            return Err(Rejection::SkillCoolingDown {
                remaining: self.remaining,
            });
        }
        let energy = &fighter.combatant.energy;
        if !energy.can_afford(self.energy_cost) {
            return Err(Rejection::NotEnoughEnergy {
                have: energy.current(),
                need: energy.effective_cost(self.energy_cost),
            });
        }
        if let HeroEffect::Vanish { duration } = self.effect {
            let stealth = &fighter.combatant.stealth;
            if stealth.is_stealthed() {
                return Err(Rejection::AlreadyConcealed);
            }
            if stealth.granted(duration) <= 0.0 {
                return Err(Rejection::NoConcealment);
            }
        }
        Ok(())
    }
}

impl Fighter {
    /// Spend energy, start the cooldown and apply the skill's effect.
    /// Timed parts go through the status list so they revert on their own.
    pub fn use_hero_skill(&mut self) -> ActionResult<String> {
        self.hero.check(self)?;
        self.combatant.energy.consume(self.hero.energy_cost);
        self.hero.remaining = self.hero.cooldown;
        let name = self.hero.name.clone();

        let result = match self.hero.effect.clone() {
            HeroEffect::AttributeBoost {
                attribute,
                amount,
                duration,
            } => {
                self.apply_status(StatusRequest::Boost { attribute, amount }, duration, &name);
                format!("{name}: +{amount} {attribute:?} for {duration}s")
            }
            HeroEffect::EnergySurge { energy } => {
                let gained = self.combatant.energy.gain(energy);
                self.combatant.next_spell_double = true;
                format!("{name}: +{gained} energy, next spell deals double damage")
            }
            HeroEffect::Vanish { duration } => {
                self.combatant.stealth.enter(duration);
                format!("{name}: vanished for {:.1}s", self.combatant.stealth.remaining())
            }
            HeroEffect::Fortify { armor, duration } if duration > 0.0 => {
                self.apply_status(StatusRequest::Armor { amount: armor }, duration, &name);
                format!("{name}: +{armor} armor for {duration}s")
            }
            HeroEffect::Fortify { armor, .. } => {
                let gained = self.armor.gain(armor);
                format!("{name}: +{gained} armor")
            }
            HeroEffect::Inert { effect_type } => {
                tracing::warn!(skill = %name, %effect_type, "hero skill has no effect");
                format!("{name} fizzles")
            }
        };
        tracing::info!(combatant = %self.combatant.name, %result, "hero skill used");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::game::{CharacterClass, GameConfig, SideSetup};

    fn fighter(class: CharacterClass) -> Fighter {
        let mut rng = StdRng::seed_from_u64(11);
        Fighter::new(
            &SideSetup::external("Hero", class),
            &GameConfig::standard(),
            &mut 0,
            &mut rng,
        )
        .unwrap()
    }

    #[test]
    fn battle_cry_boost_reverts_through_statuses() {
        let mut warrior = fighter(CharacterClass::Warrior);
        warrior.use_hero_skill().unwrap();
        assert_eq!(warrior.combatant.attributes.strength, 6);
        assert_eq!(warrior.combatant.energy.current(), 1);

        warrior.tick_statuses(8.0);
        assert_eq!(warrior.combatant.attributes.strength, 3);
    }

    #[test]
    fn cooldown_blocks_reuse() {
        let mut mage = fighter(CharacterClass::Mage);
        mage.use_hero_skill().unwrap();
        assert!(mage.combatant.next_spell_double);
        assert_eq!(mage.combatant.energy.current(), 8);
        assert!(matches!(
            mage.use_hero_skill(),
            Err(Rejection::SkillCoolingDown { .. })
        ));

        mage.hero.tick(25.0);
        assert!(mage.use_hero_skill().is_ok());
    }

    #[test]
    fn vanish_rejected_while_hidden() {
        let mut rogue = fighter(CharacterClass::Rogue);
        rogue.combatant.stealth.enter(2.0);
        assert_eq!(rogue.use_hero_skill(), Err(Rejection::AlreadyConcealed));
        assert_eq!(rogue.combatant.energy.current(), 3);
        assert!(!rogue.hero.is_cooling_down());
    }

    #[test]
    fn vanish_without_duration_is_refused() {
        let mut rogue = fighter(CharacterClass::Rogue);
        rogue.hero.effect = HeroEffect::Vanish { duration: 0.0 };
        assert_eq!(rogue.use_hero_skill(), Err(Rejection::NoConcealment));
        assert_eq!(rogue.combatant.energy.current(), 3);
        assert!(!rogue.hero.is_cooling_down());
    }

    #[test]
    fn aegis_armor_is_taken_back() {
        let mut paladin = fighter(CharacterClass::Paladin);
        paladin.use_hero_skill().unwrap();
        assert_eq!(paladin.armor.value(), 10);
        paladin.receive_hit(4);
        paladin.tick_statuses(6.0);
        assert_eq!(paladin.armor.value(), 0);
    }

    #[test]
    fn insufficient_energy_is_rejected() {
        let mut paladin = fighter(CharacterClass::Paladin);
        paladin.combatant.energy.drain();
        assert_eq!(
            paladin.use_hero_skill(),
            Err(Rejection::NotEnoughEnergy { have: 0, need: 3 })
        );
    }

    #[test]
    fn unknown_effect_type_is_inert() {
        let mut template = GameConfig::standard()
            .hero_skill(CharacterClass::Mage)
            .unwrap()
            .clone();
        template.effect_type = "SUMMON".to_string();
        assert!(matches!(
            HeroEffect::from_template(&template),
            HeroEffect::Inert { .. }
        ));
    }
}
