//! Action submission for externally controlled sides.

use bevy::{ecs::message::Message, prelude::*};

use super::{Battle, GameplaySystems, Side};

pub(super) fn plugin(app: &mut App) {
    app.add_message::<PlayCardMessage>();
    app.add_message::<HeroSkillMessage>();
    app.add_message::<RestartBattleMessage>();
    app.add_systems(
        Update,
        (restart_battle, apply_submitted_actions)
            .chain()
            .in_set(GameplaySystems::Input)
            .run_if(resource_exists::<Battle>),
    );
}

/// Play the card at `hand_index` for `side`.
#[derive(Message, Debug, Clone, Copy)]
pub struct PlayCardMessage {
    pub side: Side,
    pub hand_index: usize,
}

#[derive(Message, Debug, Clone, Copy)]
pub struct HeroSkillMessage {
    pub side: Side,
}

/// Start the battle over with the same setup and seed.
#[derive(Message, Debug, Clone, Copy)]
pub struct RestartBattleMessage;

fn restart_battle(mut restarts: MessageReader<RestartBattleMessage>, mut battle: ResMut<Battle>) {
    if restarts.read().count() > 0 {
        battle.reset();
        info!("battle restarted");
    }
}

fn apply_submitted_actions(
    mut plays: MessageReader<PlayCardMessage>,
    mut skills: MessageReader<HeroSkillMessage>,
    mut battle: ResMut<Battle>,
) {
    for msg in skills.read() {
        if battle.is_bot(msg.side) {
            warn!("ignoring hero skill submitted for bot side {:?}", msg.side);
            continue;
        }
        let result = battle.use_hero_skill(msg.side);
        debug!(side = ?msg.side, success = result.success, "{}", result.message);
    }

    for msg in plays.read() {
        if battle.is_bot(msg.side) {
            warn!("ignoring card submitted for bot side {:?}", msg.side);
            continue;
        }
        let result = battle.use_card(msg.side, msg.hand_index);
        debug!(
            side = ?msg.side,
            hand_index = msg.hand_index,
            success = result.success,
            "{}",
            result.message
        );
    }
}
