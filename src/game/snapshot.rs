//! Read-only view of a battle for presentation layers.

use serde::{Deserialize, Serialize};

use super::{Battle, BotPlayer, CharacterClass, Fighter, Outcome, Side};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolView {
    pub current: i32,
    pub max: i32,
    pub percent: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastView {
    pub card: String,
    /// 0 to 100
    pub progress_percent: f32,
    pub remaining: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusView {
    pub label: String,
    pub source: String,
    pub remaining: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSkillView {
    pub name: String,
    pub cooldown_remaining: f32,
    pub ready: bool,
}

/// What a bot-driven side is thinking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotView {
    pub threat: i32,
    pub combo: u32,
    pub best_combo: u32,
    pub energy_trend: f32,
    pub recent_plays: Vec<String>,
}

impl BotView {
    fn read(bot: &BotPlayer) -> Self {
        let memory = &bot.memory;
        Self {
            threat: memory.threat_level,
            combo: memory.combo_counter,
            best_combo: memory.best_combo(),
            energy_trend: memory.energy_trend(),
            recent_plays: memory.recent_plays(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideSnapshot {
    pub name: String,
    pub class: CharacterClass,
    pub health: PoolView,
    pub energy: PoolView,
    pub armor: i32,
    pub strength: i32,
    pub agility: i32,
    pub spirit: i32,
    pub stealthed: bool,
    pub stealth_remaining: f32,
    pub cast: Option<CastView>,
    pub statuses: Vec<StatusView>,
    pub hero_skill: HeroSkillView,
    pub hand: Vec<String>,
    pub deck_size: usize,
    pub discard_size: usize,
    pub exhaust_size: usize,
    pub next_draw_in: f32,
    pub next_energy_in: f32,
    pub bot: Option<BotView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleSnapshot {
    pub clock: f32,
    pub player: SideSnapshot,
    pub opponent: SideSnapshot,
    pub outcome: Option<Outcome>,
}

impl SideSnapshot {
    fn read(fighter: &Fighter, bot: Option<&BotPlayer>, base_draw_interval: f32) -> Self {
        let combatant = &fighter.combatant;
        let attributes = &combatant.attributes;
        Self {
            name: combatant.name.clone(),
            class: combatant.class,
            health: PoolView {
                current: combatant.health.current(),
                max: combatant.health.max(),
                percent: combatant.health.percentage() * 100.0,
            },
            energy: PoolView {
                current: combatant.energy.current(),
                max: combatant.energy.max(),
                percent: combatant.energy.percentage() * 100.0,
            },
            armor: fighter.armor.value(),
            strength: attributes.strength.max(0),
            agility: attributes.agility.max(0),
            spirit: attributes.spirit.max(0),
            stealthed: combatant.stealth.is_stealthed(),
            stealth_remaining: combatant.stealth.remaining(),
            cast: combatant.casting.active().map(|cast| CastView {
                card: cast.card.name.clone(),
                progress_percent: cast.progress() * 100.0,
                remaining: cast.remaining(),
            }),
            statuses: combatant
                .statuses
                .iter()
                .map(|status| StatusView {
                    label: status.label().to_string(),
                    source: status.source.clone(),
                    remaining: status.remaining,
                })
                .collect(),
            hero_skill: HeroSkillView {
                name: fighter.hero.name.clone(),
                cooldown_remaining: fighter.hero.remaining(),
                ready: fighter.hero.check(fighter).is_ok(),
            },
            hand: fighter.piles.hand.iter().map(|card| card.name.clone()).collect(),
            deck_size: fighter.piles.deck.len(),
            discard_size: fighter.piles.discard.len(),
            exhaust_size: fighter.piles.exhausted.len(),
            next_draw_in: (fighter.draw_interval(base_draw_interval) - fighter.draw_clock)
                .max(0.0),
            next_energy_in: combatant.energy.next_in(),
            bot: bot.map(BotView::read),
        }
    }
}

impl Battle {
    /// Current state of both sides.
    pub fn snapshot(&self) -> BattleSnapshot {
        let base = self.config().rules.base_draw_interval;
        BattleSnapshot {
            clock: self.clock(),
            player: SideSnapshot::read(self.fighter(Side::Player), self.bot(Side::Player), base),
            opponent: SideSnapshot::read(
                self.fighter(Side::Opponent),
                self.bot(Side::Opponent),
                base,
            ),
            outcome: self.outcome().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BattleSetup, GameConfig, SideSetup};

    #[test]
    fn snapshot_reports_opening_state() {
        let battle = Battle::new(GameConfig::standard(), BattleSetup::default(), 3).unwrap();
        let snapshot = battle.snapshot();
        assert_eq!(snapshot.player.class, CharacterClass::Warrior);
        assert_eq!(snapshot.player.health.current, 40);
        assert_eq!(snapshot.player.health.percent, 100.0);
        assert_eq!(snapshot.opponent.energy.current, 4);
        assert_eq!(snapshot.player.hand.len(), 4);
        assert!(snapshot.player.cast.is_none());
        assert!(snapshot.player.hero_skill.ready);
        assert!((snapshot.player.next_draw_in - 2.8).abs() < 1e-5);
        assert!(snapshot.outcome.is_none());
        assert!(snapshot.player.bot.is_none());
    }

    #[test]
    fn bot_side_reports_its_memory() {
        let setup = BattleSetup {
            player: SideSetup::external("Alice", CharacterClass::Warrior),
            opponent: SideSetup::bot("Beta", CharacterClass::Paladin),
        };
        let mut battle = Battle::new(GameConfig::standard(), setup, 3).unwrap();
        battle.update(0.7);
        let bot = battle.snapshot().opponent.bot.unwrap();
        assert!((0..=10).contains(&bot.threat));
        assert!(bot.recent_plays.len() <= 1);
        assert_eq!(bot.combo as usize, bot.recent_plays.len());
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let battle = Battle::new(GameConfig::standard(), BattleSetup::default(), 3).unwrap();
        let json = serde_json::to_value(battle.snapshot()).unwrap();
        assert!(json["player"]["heroSkill"]["cooldownRemaining"].is_number());
        assert!(json["opponent"]["nextDrawIn"].is_number());
    }
}
