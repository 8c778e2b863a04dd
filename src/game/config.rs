//! Battle configuration: class stats, hero skills, opponent profiles and rules.
//!
//! Everything here is plain data handed to the battle by reference. An
//! external loader can fill it from whatever format it likes; the field names
//! follow the camelCase shape of that boundary.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::{Attribute, CardRegistry, Side, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    Paladin,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Warrior,
        CharacterClass::Mage,
        CharacterClass::Rogue,
        CharacterClass::Paladin,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "warrior" => Some(CharacterClass::Warrior),
            "mage" => Some(CharacterClass::Mage),
            "rogue" => Some(CharacterClass::Rogue),
            "paladin" => Some(CharacterClass::Paladin),
            _ => None,
        }
    }
}

/// Base stats for a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassTemplate {
    pub class: CharacterClass,
    pub max_health: i32,
    pub max_energy: i32,
    pub initial_energy: i32,
    pub strength: i32,
    pub agility: i32,
    pub spirit: i32,
    pub health_regen_rate: i32,
    pub energy_regen_rate: i32,
}

/// Hero skill as delivered by configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSkillTemplate {
    pub class: CharacterClass,
    pub name: String,
    pub cooldown: f32,
    pub energy_cost: i32,
    pub effect_type: String,
    #[serde(default)]
    pub value1: i32,
    #[serde(default)]
    pub value2: i32,
    #[serde(default)]
    pub value3: i32,
    #[serde(default)]
    pub duration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Share of the ranked candidates the balanced pick draws from.
    pub fn random_factor(self) -> f32 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Normal => 0.6,
            Difficulty::Hard => 0.3,
        }
    }

    /// Scale applied to the skill-related personality traits.
    pub fn trait_scale(self) -> f32 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.3,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Named temperament that skews the rolled personality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperament {
    Reckless,
    Calculating,
    Cautious,
    Protective,
    Patient,
    Disciplined,
    Aggressive,
}

/// Multipliers an opponent profile applies to its class template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatMultipliers {
    pub health: f32,
    pub energy: f32,
    pub strength: f32,
    pub agility: f32,
    pub spirit: f32,
}

impl Default for StatMultipliers {
    fn default() -> Self {
        Self {
            health: 1.0,
            energy: 1.0,
            strength: 1.0,
            agility: 1.0,
            spirit: 1.0,
        }
    }
}

/// Overlay biasing a bot's stats, card filtering and personality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentProfile {
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub preferred_cards: Vec<String>,
    #[serde(default)]
    pub avoid_cards: Vec<String>,
    /// Replaces `balanced` as the fallback strategy
    #[serde(default)]
    pub ai_strategy: Option<Strategy>,
    #[serde(default)]
    pub personality: Option<Temperament>,
    #[serde(default)]
    pub stat_multipliers: StatMultipliers,
    #[serde(default)]
    pub energy_cost_reduction: i32,
    #[serde(default)]
    pub consider_stealth: bool,
}

impl Default for OpponentProfile {
    fn default() -> Self {
        Self::with_difficulty(Difficulty::Normal)
    }
}

impl OpponentProfile {
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            preferred_cards: Vec::new(),
            avoid_cards: Vec::new(),
            ai_strategy: None,
            personality: None,
            stat_multipliers: StatMultipliers::default(),
            energy_cost_reduction: 0,
            consider_stealth: false,
        }
    }
}

/// Who decides a side's actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Controller {
    /// Actions arrive from outside, e.g. as [`PlayCardMessage`](super::PlayCardMessage)
    #[default]
    External,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideSetup {
    pub name: String,
    pub class: CharacterClass,
    #[serde(default)]
    pub controller: Controller,
    /// Stat and behaviour overlay, mostly for bots
    #[serde(default)]
    pub profile: Option<OpponentProfile>,
}

impl SideSetup {
    pub fn external(name: impl Into<String>, class: CharacterClass) -> Self {
        Self {
            name: name.into(),
            class,
            controller: Controller::External,
            profile: None,
        }
    }

    pub fn bot(name: impl Into<String>, class: CharacterClass) -> Self {
        Self {
            name: name.into(),
            class,
            controller: Controller::Bot,
            profile: Some(OpponentProfile::default()),
        }
    }

    pub fn with_profile(mut self, profile: OpponentProfile) -> Self {
        self.profile = Some(profile);
        self
    }
}

/// The two sides a battle is started with.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSetup {
    pub player: SideSetup,
    pub opponent: SideSetup,
}

impl Default for BattleSetup {
    fn default() -> Self {
        Self {
            player: SideSetup::external("Player", CharacterClass::Warrior),
            opponent: SideSetup::bot("Opponent", CharacterClass::Mage),
        }
    }
}

impl BattleSetup {
    pub fn side(&self, side: Side) -> &SideSetup {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }
}

/// Tunables for the battle loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BattleRules {
    pub base_draw_interval: f32,
    pub initial_hand: usize,
    pub max_hand: usize,
    pub deck_copies: usize,
    pub max_stealth_duration: f32,
    /// Pause between a bot's draw and its decision
    pub bot_think_delay: f32,
    /// How often a bot holding playable cards reconsiders
    pub bot_rethink_interval: f32,
}

impl Default for BattleRules {
    fn default() -> Self {
        Self {
            base_draw_interval: 3.0,
            initial_hand: 4,
            max_hand: 7,
            deck_copies: 2,
            max_stealth_duration: 8.0,
            bot_think_delay: 0.6,
            bot_rethink_interval: 1.5,
        }
    }
}

/// All static data a battle is built from.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub classes: Vec<ClassTemplate>,
    pub cards: CardRegistry,
    pub hero_skills: Vec<HeroSkillTemplate>,
    #[serde(default)]
    pub rules: BattleRules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl GameConfig {
    /// The built-in classes, cards and hero skills.
    pub fn standard() -> Self {
        Self {
            classes: standard_classes(),
            cards: CardRegistry::standard(),
            hero_skills: standard_hero_skills(),
            rules: BattleRules::default(),
        }
    }

    pub fn class(&self, class: CharacterClass) -> Option<&ClassTemplate> {
        self.classes.iter().find(|t| t.class == class)
    }

    pub fn hero_skill(&self, class: CharacterClass) -> Option<&HeroSkillTemplate> {
        self.hero_skills.iter().find(|t| t.class == class)
    }
}

fn standard_classes() -> Vec<ClassTemplate> {
    let template = |class, stats: [i32; 8]| ClassTemplate {
        class,
        max_health: stats[0],
        max_energy: stats[1],
        initial_energy: stats[2],
        strength: stats[3],
        agility: stats[4],
        spirit: stats[5],
        health_regen_rate: stats[6],
        energy_regen_rate: stats[7],
    };
    vec![
        template(CharacterClass::Warrior, [40, 10, 3, 3, 1, 0, 0, 1]),
        template(CharacterClass::Mage, [30, 12, 4, 0, 1, 3, 0, 1]),
        template(CharacterClass::Rogue, [32, 10, 3, 1, 3, 1, 0, 1]),
        template(CharacterClass::Paladin, [38, 10, 3, 2, 0, 2, 1, 1]),
    ]
}

fn standard_hero_skills() -> Vec<HeroSkillTemplate> {
    vec![
        HeroSkillTemplate {
            class: CharacterClass::Warrior,
            name: "Battle Cry".to_string(),
            cooldown: 20.0,
            energy_cost: 2,
            effect_type: "ATTRIBUTE_BOOST".to_string(),
            value1: 3,
            value2: attribute_code(Attribute::Strength),
            value3: 0,
            duration: 8.0,
        },
        HeroSkillTemplate {
            class: CharacterClass::Mage,
            name: "Arcane Surge".to_string(),
            cooldown: 25.0,
            energy_cost: 0,
            effect_type: "ENERGY_SURGE".to_string(),
            value1: 4,
            value2: 0,
            value3: 0,
            duration: 0.0,
        },
        HeroSkillTemplate {
            class: CharacterClass::Rogue,
            name: "Vanish".to_string(),
            cooldown: 20.0,
            energy_cost: 2,
            effect_type: "STEALTH".to_string(),
            value1: 0,
            value2: 0,
            value3: 0,
            duration: 5.0,
        },
        HeroSkillTemplate {
            class: CharacterClass::Paladin,
            name: "Aegis".to_string(),
            cooldown: 25.0,
            energy_cost: 3,
            effect_type: "ARMOR".to_string(),
            value1: 10,
            value2: 0,
            value3: 0,
            duration: 6.0,
        },
    ]
}

/// Numeric attribute code used in hero skill parameters.
pub fn attribute_code(attribute: Attribute) -> i32 {
    match attribute {
        Attribute::Strength => 0,
        Attribute::Agility => 1,
        Attribute::Spirit => 2,
    }
}

pub fn attribute_from_code(code: i32) -> Option<Attribute> {
    match code {
        0 => Some(Attribute::Strength),
        1 => Some(Attribute::Agility),
        2 => Some(Attribute::Spirit),
        _ => None,
    }
}
