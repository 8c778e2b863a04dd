//! Paladin cards - healing, armor and dispels.

use super::{CardRegistry, card};
use crate::game::CharacterClass::Paladin;

pub fn register_paladin_cards(registry: &mut CardRegistry) {
    registry.register(card(
        Paladin,
        "Holy Light",
        3,
        1.5,
        "HEAL",
        [10, 0, 0],
        "Channel 1.5s. Heal 10.",
    ));

    registry.register(card(
        Paladin,
        "Judgement",
        2,
        0.0,
        "DAMAGE",
        [5, 0, 0],
        "Deal 5 damage.",
    ));

    registry.register(card(
        Paladin,
        "Divine Shield",
        3,
        0.0,
        "ARMOR",
        [8, 0, 0],
        "Gain 8 armor.",
    ));

    registry.register(card(
        Paladin,
        "Purify",
        1,
        0.0,
        "DISPEL",
        [0, 0, 0],
        "Remove every effect on the enemy.",
    ));

    registry.register(card(
        Paladin,
        "Consecration",
        4,
        2.0,
        "DAMAGE_ARMOR",
        [7, 4, 0],
        "Channel 2s. Deal 7 damage. Gain 4 armor.",
    ));

    registry.register(card(
        Paladin,
        "Crusader Strike",
        1,
        0.0,
        "STRIKE",
        [3, 0, 0],
        "Deal 3 damage plus strength.",
    ));

    // Martyrdom - trade health for burst
    let mut martyrdom = card(
        Paladin,
        "Martyrdom",
        2,
        0.0,
        "LIFE_COST",
        [9, 4, 0],
        "Lose 4 health. Deal 9 damage.",
    );
    martyrdom.health_cost = Some(4);
    registry.register(martyrdom);
}
