// Property tests for status reversal and pool bounds
use proptest::prelude::*;
use sensen_duel::game::{
    Attribute, Battle, BattleSetup, CharacterClass, GameConfig, Side, SideSetup, StatusRequest,
};

fn duel(player: CharacterClass, opponent: CharacterClass) -> Battle {
    let setup = BattleSetup {
        player: SideSetup::external("A", player),
        opponent: SideSetup::external("B", opponent),
    };
    Battle::new(GameConfig::standard(), setup, 11).unwrap()
}

fn class() -> impl Strategy<Value = CharacterClass> {
    prop::sample::select(CharacterClass::ALL.to_vec())
}

#[derive(Debug, Clone)]
enum Action {
    Play(Side, usize),
    Hero(Side),
    Wait(f32),
}

fn action() -> impl Strategy<Value = Action> {
    let side = prop::sample::select(Side::BOTH.to_vec());
    prop_oneof![
        (side.clone(), 0usize..8).prop_map(|(side, index)| Action::Play(side, index)),
        side.prop_map(Action::Hero),
        (0.0f32..2.5).prop_map(Action::Wait),
    ]
}

proptest! {
    #[test]
    fn overlapping_slows_net_to_zero(
        slows in prop::collection::vec((0i32..6, 0.1f32..4.0, 0.0f32..1.5), 1..12)
    ) {
        let mut battle = duel(CharacterClass::Rogue, CharacterClass::Warrior);
        let rogue = battle.fighter_mut(Side::Player);
        let before = rogue.combatant.attributes.get(Attribute::Agility);
        for (agility, duration, gap) in &slows {
            rogue.apply_status(StatusRequest::Slow { agility: *agility }, *duration, "Frost");
            prop_assert!(rogue.combatant.attributes.effective(Attribute::Agility) >= 0);
            rogue.tick_statuses(*gap);
        }
        rogue.tick_statuses(10.0);
        prop_assert!(rogue.combatant.statuses.is_empty());
        prop_assert_eq!(rogue.combatant.attributes.get(Attribute::Agility), before);
    }

    #[test]
    fn pools_stay_in_bounds(
        player in class(),
        opponent in class(),
        actions in prop::collection::vec(action(), 1..40)
    ) {
        let mut battle = duel(player, opponent);
        for action in actions {
            match action {
                Action::Play(side, index) => {
                    battle.use_card(side, index);
                }
                Action::Hero(side) => {
                    battle.use_hero_skill(side);
                }
                Action::Wait(dt) => {
                    battle.update(dt);
                }
            }
            for side in Side::BOTH {
                let combatant = &battle.fighter(side).combatant;
                let health = &combatant.health;
                let energy = &combatant.energy;
                prop_assert!((0..=health.max()).contains(&health.current()));
                prop_assert!((0..=energy.max()).contains(&energy.current()));
                prop_assert!(battle.fighter(side).armor.value() >= 0);
            }
        }
    }
}
