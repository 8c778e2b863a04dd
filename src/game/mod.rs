//! Core game systems for the duel.

mod actions;
mod attributes;
mod battle;
mod bot;
mod cards;
mod casting;
mod combatant;
mod config;
mod deck;
pub mod effect;
mod energy;
mod error;
mod health;
mod hero;
mod rules;
mod snapshot;
mod status;
mod stealth;

pub use actions::*;
pub use attributes::*;
pub use battle::*;
pub use bot::*;
pub use cards::*;
pub use casting::*;
pub use combatant::*;
pub use config::*;
pub use deck::*;
pub use energy::*;
pub use error::*;
pub use health::*;
pub use hero::*;
pub use rules::*;
pub use snapshot::*;
pub use status::*;
pub use stealth::*;

use bevy::prelude::*;
use std::time::{SystemTime, UNIX_EPOCH};

/// Per-match deterministic seed.
#[derive(Resource, Debug, Clone, Copy)]
pub struct MatchSeed(pub u64);

impl Default for MatchSeed {
    fn default() -> Self {
        let mut bytes = [0u8; 8];
        if getrandom::fill(&mut bytes).is_ok() {
            return Self(u64::from_le_bytes(bytes));
        }
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self(nanos ^ 0x9e3779b97f4a7c15)
    }
}

/// Execution order for gameplay logic.
#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum GameplaySystems {
    Input,
    Tick,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<GameConfig>();
    app.init_resource::<BattleSetup>();
    app.init_resource::<MatchSeed>();
    app.configure_sets(
        Update,
        (GameplaySystems::Input, GameplaySystems::Tick).chain(),
    );
    app.add_plugins((actions::plugin, battle::plugin));
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        app.insert_resource(BattleSetup {
            player: SideSetup::external("Alice", CharacterClass::Warrior),
            opponent: SideSetup::external("Bob", CharacterClass::Mage),
        });
        app.insert_resource(MatchSeed(8));
        app.add_plugins(plugin);
        app
    }

    #[test]
    fn battle_advances_with_time() {
        let mut app = app();
        for _ in 0..10 {
            app.update();
        }
        let battle = app.world().resource::<Battle>();
        assert!(battle.clock() > 0.0);
        assert_eq!(battle.seed(), 8);
    }

    #[test]
    fn submitted_card_is_played() {
        let mut app = app();
        app.update();
        let cleave = CardRegistry::standard().get_by_name("Cleave").cloned().unwrap();
        app.world_mut()
            .resource_mut::<Battle>()
            .fighter_mut(Side::Player)
            .piles
            .hand
            .cards = vec![CardInstance::from_template(900, &cleave)];
        app.world_mut().write_message(PlayCardMessage {
            side: Side::Player,
            hand_index: 0,
        });
        app.update();

        let battle = app.world().resource::<Battle>();
        assert_eq!(battle.fighter(Side::Opponent).combatant.health.current(), 24);
        assert_eq!(battle.fighter(Side::Player).piles.discard.len(), 1);
    }

    #[test]
    fn restart_rebuilds_the_battle() {
        let mut app = app();
        for _ in 0..5 {
            app.update();
        }
        app.world_mut().write_message(RestartBattleMessage);
        app.update();
        // One tick after the rebuild
        let clock = app.world().resource::<Battle>().clock();
        assert!(clock <= 0.1 + 1e-4);
    }
}
