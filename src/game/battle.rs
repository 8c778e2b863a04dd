//! The battle loop.
//!
//! [`Battle`] owns both sides, the seeded RNG and the bots. Everything moves
//! forward through [`Battle::update`] with an elapsed-time delta; actions run
//! to completion before the call returns, so no two resolutions interleave.

use bevy::{ecs::message::Message, prelude::*};
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::{
    ActionResult, ActiveCast, BattleSetup, BotPlayer, Controller, Fighter, Fighters, GameConfig,
    GameplaySystems, MatchSeed, Rejection, SetupError, Side, StatusEvent, StealthExit,
    effect::{self, Play},
};

pub(super) fn plugin(app: &mut App) {
    app.add_message::<BattleEventMessage>();
    app.add_message::<BattleOverMessage>();
    app.add_systems(Startup, start_battle);
    app.add_systems(
        Update,
        advance_battle
            .in_set(GameplaySystems::Tick)
            .run_if(resource_exists::<Battle>),
    );
}

/// Republished [`BattleEvent`], one per event.
#[derive(Message, Debug, Clone)]
pub struct BattleEventMessage(pub BattleEvent);

/// Written once, when the battle ends.
#[derive(Message, Debug, Clone)]
pub struct BattleOverMessage {
    pub winner: Option<Side>,
    pub message: String,
}

/// Something that happened during a step, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BattleEvent {
    CardDrawn {
        side: Side,
        card: String,
    },
    CardPlayed {
        side: Side,
        card: String,
    },
    CastStarted {
        side: Side,
        card: String,
        duration: f32,
    },
    CastCompleted {
        side: Side,
        card: String,
        result: String,
    },
    CastInterrupted {
        side: Side,
        card: String,
    },
    /// A finished cast that could not be resolved
    CastDropped {
        side: Side,
        card: String,
    },
    StatusTick {
        side: Side,
        source: String,
        damage: i32,
    },
    StatusExpired {
        side: Side,
        source: String,
        label: String,
    },
    StealthBroken {
        side: Side,
        reason: StealthExit,
    },
    HeroSkillUsed {
        side: Side,
        skill: String,
        result: String,
    },
    BotIdle {
        side: Side,
        reason: String,
    },
    BattleOver {
        winner: Option<Side>,
        message: String,
    },
}

/// Reply to an action submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayResult {
    pub success: bool,
    pub message: String,
    pub effect_result: Option<String>,
    pub is_casting: bool,
    pub game_over: bool,
    pub winner: Option<Side>,
}

impl PlayResult {
    fn done(message: String, effect_result: Option<String>) -> Self {
        Self {
            success: true,
            message,
            effect_result,
            is_casting: false,
            game_over: false,
            winner: None,
        }
    }

    fn rejected(rejection: &Rejection) -> Self {
        Self {
            success: false,
            message: rejection.to_string(),
            effect_result: None,
            is_casting: false,
            game_over: false,
            winner: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEnd {
    pub is_over: bool,
    /// `None` on a draw
    pub winner: Option<Side>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Option<Side>,
    pub message: String,
}

/// A bot and its pacing timers.
#[derive(Debug, Clone)]
struct BotSeat {
    bot: BotPlayer,
    /// Countdown to a decision scheduled by a draw
    think_in: Option<f32>,
    rethink_clock: f32,
}

#[derive(Resource, Debug)]
pub struct Battle {
    config: GameConfig,
    setup: BattleSetup,
    seed: u64,
    rng: StdRng,
    fighters: Fighters,
    bots: [Option<BotSeat>; 2],
    clock: f32,
    outcome: Option<Outcome>,
    /// Events from actions submitted between updates
    pending: Vec<BattleEvent>,
}

impl Battle {
    pub fn new(config: GameConfig, setup: BattleSetup, seed: u64) -> Result<Self, SetupError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut next_card_id = 0;
        let player = Fighter::new(&setup.player, &config, &mut next_card_id, &mut rng)?;
        let opponent = Fighter::new(&setup.opponent, &config, &mut next_card_id, &mut rng)?;
        let think_delay = config.rules.bot_think_delay;
        let bots = Side::BOTH.map(|side| {
            let side_setup = setup.side(side);
            (side_setup.controller == Controller::Bot).then(|| BotSeat {
                bot: BotPlayer::new(
                    side_setup.profile.clone().unwrap_or_default(),
                    side_setup.class,
                    &mut rng,
                ),
                think_in: Some(think_delay),
                rethink_clock: 0.0,
            })
        });
        tracing::info!(
            player = %setup.player.name,
            player_class = ?setup.player.class,
            opponent = %setup.opponent.name,
            opponent_class = ?setup.opponent.class,
            seed,
            "battle started"
        );
        Ok(Self {
            config,
            setup,
            seed,
            rng,
            fighters: Fighters([player, opponent]),
            bots,
            clock: 0.0,
            outcome: None,
            pending: Vec::new(),
        })
    }

    pub fn fighter(&self, side: Side) -> &Fighter {
        self.fighters.get(side)
    }

    /// Direct access for scripted setups; normal play goes through actions.
    pub fn fighter_mut(&mut self, side: Side) -> &mut Fighter {
        self.fighters.get_mut(side)
    }

    pub fn bot(&self, side: Side) -> Option<&BotPlayer> {
        self.bots[side.index()].as_ref().map(|seat| &seat.bot)
    }

    pub fn is_bot(&self, side: Side) -> bool {
        self.bots[side.index()].is_some()
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn setup(&self) -> &BattleSetup {
        &self.setup
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Advance everything by `dt` seconds. Frozen once the battle is over.
    pub fn update(&mut self, dt: f32) -> Vec<BattleEvent> {
        let mut events = std::mem::take(&mut self.pending);
        if self.outcome.is_some() || dt <= 0.0 {
            return events;
        }
        self.clock += dt;

        for side in Side::BOTH {
            self.advance_side(side, dt, &mut events);
            if self.settle(&mut events) {
                return events;
            }
        }
        for side in Side::BOTH {
            self.pace_bot(side, dt, &mut events);
            if self.settle(&mut events) {
                return events;
            }
        }
        events
    }

    /// Play the card at `hand_index` for `side`.
    pub fn use_card(&mut self, side: Side, hand_index: usize) -> PlayResult {
        let mut events = Vec::new();
        let result = self.play_card(side, hand_index, &mut events);
        self.pending.append(&mut events);
        result
    }

    pub fn use_hero_skill(&mut self, side: Side) -> PlayResult {
        let mut events = Vec::new();
        let result = self.hero_skill(side, &mut events);
        self.pending.append(&mut events);
        result
    }

    /// Whether either side has fallen, and who won.
    pub fn check_game_end(&self) -> GameEnd {
        let player = self.fighters.get(Side::Player);
        let opponent = self.fighters.get(Side::Opponent);
        let (winner, message) = match (player.is_defeated(), opponent.is_defeated()) {
            (false, false) => {
                return GameEnd {
                    is_over: false,
                    winner: None,
                    message: None,
                };
            }
            (true, true) => (None, "Both combatants fell. It's a draw".to_string()),
            (true, false) => (
                Some(Side::Opponent),
                format!("{} wins", opponent.combatant.name),
            ),
            (false, true) => (Some(Side::Player), format!("{} wins", player.combatant.name)),
        };
        GameEnd {
            is_over: true,
            winner,
            message: Some(message),
        }
    }

    /// Start over from the stored configuration, setup and seed.
    pub fn reset(&mut self) {
        match Self::new(self.config.clone(), self.setup.clone(), self.seed) {
            Ok(battle) => *self = battle,
            Err(error) => tracing::warn!(%error, "reset failed, keeping current battle"),
        }
    }

    /// Record the outcome the first time a side falls.
    fn settle(&mut self, events: &mut Vec<BattleEvent>) -> bool {
        if self.outcome.is_some() {
            return true;
        }
        let end = self.check_game_end();
        if !end.is_over {
            return false;
        }
        let message = end.message.unwrap_or_default();
        tracing::info!(winner = ?end.winner, clock = self.clock, %message, "battle over");
        events.push(BattleEvent::BattleOver {
            winner: end.winner,
            message: message.clone(),
        });
        self.outcome = Some(Outcome {
            winner: end.winner,
            message,
        });
        true
    }

    fn advance_side(&mut self, side: Side, dt: f32, events: &mut Vec<BattleEvent>) {
        let base_draw = self.config.rules.base_draw_interval;
        let fighter = self.fighters.get_mut(side);
        if fighter.is_defeated() {
            return;
        }
        fighter.combatant.health.regenerate(dt);
        fighter.combatant.energy.regenerate(dt);
        fighter.hero.tick(dt);

        if fighter.combatant.stealth.advance(dt) {
            events.push(BattleEvent::StealthBroken {
                side,
                reason: StealthExit::Expired,
            });
        }
        let was_hidden = fighter.combatant.stealth.is_stealthed();
        for event in fighter.tick_statuses(dt) {
            events.push(match event {
                StatusEvent::PoisonTick { source, damage } => BattleEvent::StatusTick {
                    side,
                    source,
                    damage,
                },
                StatusEvent::Expired { source, label } => BattleEvent::StatusExpired {
                    side,
                    source,
                    label: label.to_string(),
                },
            });
        }
        if was_hidden && !fighter.combatant.stealth.is_stealthed() {
            events.push(BattleEvent::StealthBroken {
                side,
                reason: StealthExit::TookDamage,
            });
        }

        fighter.draw_clock += dt;
        let mut drew = false;
        loop {
            let interval = fighter.draw_interval(base_draw);
            if fighter.draw_clock < interval {
                break;
            }
            fighter.draw_clock -= interval;
            for id in fighter.piles.draw(1, &mut self.rng) {
                if let Some(card) = fighter.piles.hand.iter().find(|c| c.id == id) {
                    tracing::debug!(?side, card = %card.name, "card drawn");
                    events.push(BattleEvent::CardDrawn {
                        side,
                        card: card.name.clone(),
                    });
                    drew = true;
                }
            }
        }

        let completed = fighter.combatant.casting.advance(dt);
        if let Some(cast) = completed {
            self.complete_cast(side, cast, events);
        }

        if drew {
            let delay = self.config.rules.bot_think_delay;
            if let Some(seat) = self.bots[side.index()].as_mut() {
                seat.think_in.get_or_insert(delay);
            }
        }
    }

    /// The only path by which a channelled card takes effect.
    fn complete_cast(&mut self, side: Side, cast: ActiveCast, events: &mut Vec<BattleEvent>) {
        let name = cast.card.name.clone();
        if self.fighters.get(side).is_defeated() {
            tracing::warn!(?side, card = %name, "caster fell before the cast completed, dropping it");
            events.push(BattleEvent::CastDropped { side, card: name });
        } else {
            let play = Play {
                card: &cast.card,
                actor: side,
                concealed_at_commit: cast.concealed_at_commit,
            };
            match effect::resolve(play, &mut self.fighters, &mut self.rng, events) {
                Ok(result) => {
                    tracing::debug!(?side, card = %name, %result, "cast completed");
                    events.push(BattleEvent::CastCompleted {
                        side,
                        card: name,
                        result,
                    });
                }
                Err(rejection) => {
                    tracing::warn!(?side, card = %name, %rejection, "completed cast could not resolve");
                    events.push(BattleEvent::CastDropped { side, card: name });
                }
            }
        }
        self.fighters.get_mut(side).piles.retire(cast.card);
    }

    fn pace_bot(&mut self, side: Side, dt: f32, events: &mut Vec<BattleEvent>) {
        let rethink = self.config.rules.bot_rethink_interval;
        let Some(seat) = self.bots[side.index()].as_mut() else {
            return;
        };
        let mut due = false;
        if let Some(remaining) = seat.think_in.as_mut() {
            *remaining -= dt;
            due = *remaining <= 0.0;
        }
        seat.rethink_clock += dt;
        if seat.rethink_clock >= rethink {
            due = true;
        }
        if due {
            seat.think_in = None;
            seat.rethink_clock = 0.0;
            self.take_bot_turn(side, events);
        }
    }

    fn take_bot_turn(&mut self, side: Side, events: &mut Vec<BattleEvent>) {
        if self.fighters.get(side).is_defeated() {
            return;
        }
        let Some(seat) = self.bots[side.index()].as_mut() else {
            return;
        };
        let turn = seat.bot.decide(
            self.fighters.get(side),
            self.fighters.get(side.opponent()),
            &mut self.rng,
        );
        if turn.is_idle() {
            events.push(BattleEvent::BotIdle {
                side,
                reason: turn.reason,
            });
            return;
        }

        let mut card = turn.card;
        if turn.hero_skill {
            let result = self.hero_skill(side, events);
            if result.success {
                // The skill changed the board; the card is chosen again on it
                if let Some(seat) = self.bots[side.index()].as_ref() {
                    card = seat.bot.follow_up(
                        &turn,
                        self.fighters.get(side),
                        self.fighters.get(side.opponent()),
                        &mut self.rng,
                    );
                }
            } else {
                tracing::debug!(?side, message = %result.message, "bot hero skill refused");
            }
        }
        let Some(id) = card else {
            return;
        };
        let hand = &self.fighters.get(side).piles.hand;
        let Some(index) = hand.iter().position(|card| card.id == id) else {
            return;
        };
        let name = hand.cards[index].name.clone();
        let result = self.play_card(side, index, events);
        if result.success {
            let now = self.clock;
            if let Some(seat) = self.bots[side.index()].as_mut() {
                let combo = seat.bot.record_play(&name, now);
                tracing::debug!(?side, card = %name, combo, "bot played");
            }
        } else {
            tracing::debug!(?side, card = %name, message = %result.message, "bot play refused");
        }
    }

    fn play_card(
        &mut self,
        side: Side,
        hand_index: usize,
        events: &mut Vec<BattleEvent>,
    ) -> PlayResult {
        let mut result = match self.commit_card(side, hand_index, events) {
            Ok(result) => result,
            Err(rejection) => {
                tracing::debug!(?side, hand_index, %rejection, "card rejected");
                return PlayResult::rejected(&rejection);
            }
        };
        if self.settle(events) {
            result.game_over = true;
            result.winner = self.outcome.as_ref().and_then(|outcome| outcome.winner);
        }
        result
    }

    /// Validate, then pay, then either start the channel or resolve now.
    fn commit_card(
        &mut self,
        side: Side,
        hand_index: usize,
        events: &mut Vec<BattleEvent>,
    ) -> ActionResult<PlayResult> {
        if self.outcome.is_some() {
            return Err(Rejection::BattleOver);
        }
        let (me, foe) = self.fighters.pair_mut(side);
        let card = me.piles.hand.get(hand_index)?;
        effect::check(card, me, foe)?;

        let energy_cost = card.energy_cost;
        let health_cost = card.health_cost;
        me.combatant.energy.consume(energy_cost);
        if let Some(cost) = health_cost {
            me.combatant.health.pay(cost);
        }
        let Some(mut card) = me.piles.hand.remove_card(hand_index) else {
            return Err(Rejection::NoSuchCard { index: hand_index });
        };

        let concealed_at_commit = me.combatant.stealth.is_stealthed();
        if card.effect.targets_opponent() {
            card.locked_target = Some(side.opponent());
            if me.combatant.stealth.on_attack() {
                events.push(BattleEvent::StealthBroken {
                    side,
                    reason: StealthExit::Attacked,
                });
            }
        }
        let name = card.name.clone();
        tracing::debug!(?side, card = %name, "card played");
        events.push(BattleEvent::CardPlayed {
            side,
            card: name.clone(),
        });

        if card.is_channelled() {
            let target = card.locked_target;
            let duration =
                me.combatant
                    .casting
                    .start(card, &me.combatant.attributes, target, concealed_at_commit)?;
            events.push(BattleEvent::CastStarted {
                side,
                card: name.clone(),
                duration,
            });
            let mut result = PlayResult::done(format!("Casting {name} ({duration:.1}s)"), None);
            result.is_casting = true;
            return Ok(result);
        }

        let play = Play {
            card: &card,
            actor: side,
            concealed_at_commit,
        };
        let resolution = effect::resolve(play, &mut self.fighters, &mut self.rng, events);
        self.fighters.get_mut(side).piles.retire(card);
        let effect_result = resolution?;
        Ok(PlayResult::done(
            format!("{name} played"),
            Some(effect_result),
        ))
    }

    fn hero_skill(&mut self, side: Side, events: &mut Vec<BattleEvent>) -> PlayResult {
        if self.outcome.is_some() {
            return PlayResult::rejected(&Rejection::BattleOver);
        }
        let fighter = self.fighters.get_mut(side);
        match fighter.use_hero_skill() {
            Ok(result) => {
                events.push(BattleEvent::HeroSkillUsed {
                    side,
                    skill: fighter.hero.name.clone(),
                    result: result.clone(),
                });
                PlayResult::done(format!("{} used", fighter.hero.name), Some(result))
            }
            Err(rejection) => PlayResult::rejected(&rejection),
        }
    }
}

fn start_battle(
    mut commands: Commands,
    config: Res<GameConfig>,
    setup: Res<BattleSetup>,
    seed: Res<MatchSeed>,
) {
    match Battle::new(config.clone(), setup.clone(), seed.0) {
        Ok(battle) => commands.insert_resource(battle),
        Err(error) => error!("cannot start battle: {error}"),
    }
}

fn advance_battle(
    time: Res<Time>,
    mut battle: ResMut<Battle>,
    mut events: MessageWriter<BattleEventMessage>,
    mut over: MessageWriter<BattleOverMessage>,
) {
    for event in battle.update(time.delta_secs()) {
        if let BattleEvent::BattleOver { winner, message } = &event {
            over.write(BattleOverMessage {
                winner: *winner,
                message: message.clone(),
            });
        }
        events.write(BattleEventMessage(event));
    }
}
