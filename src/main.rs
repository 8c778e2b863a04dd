//! Headless bot-vs-bot duel.
//!
//! Flags: `--seed=N`, `--difficulty=easy|normal|hard`, `--player-class=...`,
//! `--opponent-class=...`, `--max-seconds=N`, `--verbose`.

use std::time::Duration;

use bevy::{
    log::{Level, LogPlugin},
    prelude::*,
    time::TimeUpdateStrategy,
};
use sensen_duel::game::{
    self, Battle, BattleEvent, BattleEventMessage, BattleOverMessage, BattleSetup, CharacterClass,
    Difficulty, GameplaySystems, MatchSeed, OpponentProfile, SideSetup,
};

/// Simulated seconds per frame.
const STEP: f32 = 1.0 / 60.0;

fn main() -> AppExit {
    let options = RunOptions::from_args();
    App::new().add_plugins(DuelPlugin { options }).run()
}

#[derive(Resource, Debug, Clone)]
struct RunOptions {
    seed: Option<u64>,
    difficulty: Difficulty,
    player_class: CharacterClass,
    opponent_class: CharacterClass,
    max_seconds: f32,
    verbose: bool,
}

/// Value of a `--name=value` argument.
fn flag(name: &str) -> Option<String> {
    let prefix = format!("--{name}=");
    std::env::args()
        .find(|arg| arg.starts_with(&prefix))
        .and_then(|arg| arg.strip_prefix(&prefix).map(|s| s.to_string()))
}

impl RunOptions {
    fn from_args() -> Self {
        let class = |name: &str, fallback| {
            flag(name)
                .and_then(|value| CharacterClass::parse(&value))
                .unwrap_or(fallback)
        };
        Self {
            seed: flag("seed").and_then(|s| s.parse::<u64>().ok()),
            difficulty: flag("difficulty")
                .and_then(|d| Difficulty::parse(&d))
                .unwrap_or_default(),
            player_class: class("player-class", CharacterClass::Warrior),
            opponent_class: class("opponent-class", CharacterClass::Mage),
            max_seconds: flag("max-seconds")
                .and_then(|s| s.parse::<f32>().ok())
                .filter(|s| *s > 0.0)
                .unwrap_or(600.0),
            verbose: std::env::args().any(|arg| arg == "--verbose"),
        }
    }

    fn setup(&self) -> BattleSetup {
        let profile = OpponentProfile::with_difficulty(self.difficulty);
        BattleSetup {
            player: SideSetup::bot("Player", self.player_class).with_profile(profile.clone()),
            opponent: SideSetup::bot("Opponent", self.opponent_class).with_profile(profile),
        }
    }
}

struct DuelPlugin {
    options: RunOptions,
}

impl Plugin for DuelPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            MinimalPlugins,
            LogPlugin {
                level: if self.options.verbose {
                    Level::DEBUG
                } else {
                    Level::INFO
                },
                ..default()
            },
        ));
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            STEP,
        )));
        app.insert_resource(self.options.setup());
        if let Some(seed) = self.options.seed {
            app.insert_resource(MatchSeed(seed));
        }
        app.insert_resource(self.options.clone());

        app.add_plugins(game::plugin);
        app.add_systems(
            Update,
            (report_events, finish_battle)
                .chain()
                .after(GameplaySystems::Tick),
        );
    }
}

fn report_events(mut events: MessageReader<BattleEventMessage>) {
    for BattleEventMessage(event) in events.read() {
        match event {
            BattleEvent::CardPlayed { side, card } => info!("{side:?} plays {card}"),
            BattleEvent::CastCompleted { side, card, result } => {
                info!("{side:?} finishes {card}: {result}")
            }
            BattleEvent::CastInterrupted { side, card } => {
                info!("{side:?} loses {card} to an interrupt")
            }
            BattleEvent::HeroSkillUsed {
                side,
                skill,
                result,
            } => info!("{side:?} uses {skill}: {result}"),
            other => debug!("{other:?}"),
        }
    }
}

fn finish_battle(
    mut over: MessageReader<BattleOverMessage>,
    mut exit: MessageWriter<AppExit>,
    battle: Option<Res<Battle>>,
    options: Res<RunOptions>,
) {
    let Some(battle) = battle else {
        // Startup failed and was already logged.
        exit.write(AppExit::error());
        return;
    };
    if let Some(end) = over.read().last() {
        let snapshot = battle.snapshot();
        info!(
            "{} after {:.1}s (seed {}): {} {}/{} hp, {} {}/{} hp",
            end.message,
            snapshot.clock,
            battle.seed(),
            snapshot.player.name,
            snapshot.player.health.current,
            snapshot.player.health.max,
            snapshot.opponent.name,
            snapshot.opponent.health.current,
            snapshot.opponent.health.max,
        );
        exit.write(AppExit::Success);
    } else if battle.clock() >= options.max_seconds {
        warn!("no winner after {:.0}s, stopping", options.max_seconds);
        exit.write(AppExit::Success);
    }
}
