//! Mage cards - channelled spells that hit hard if left uninterrupted.

use super::{CardRegistry, card};
use crate::game::CharacterClass::Mage;

pub fn register_mage_cards(registry: &mut CardRegistry) {
    registry.register(card(
        Mage,
        "Fireball",
        3,
        1.5,
        "DAMAGE",
        [9, 0, 0],
        "Channel 1.5s. Deal 9 damage.",
    ));

    registry.register(card(
        Mage,
        "Frostbolt",
        2,
        1.0,
        "DAMAGE_SLOW",
        [4, 2, 5],
        "Channel 1s. Deal 4 damage. Slow by 2 agility for 5s.",
    ));

    registry.register(card(
        Mage,
        "Arcane Missile",
        1,
        0.0,
        "DAMAGE",
        [3, 0, 0],
        "Deal 3 damage.",
    ));

    registry.register(card(
        Mage,
        "Mana Shield",
        2,
        0.0,
        "ARMOR",
        [4, 0, 0],
        "Gain 4 armor.",
    ));

    // Pyroblast - long channel, leaves the deck once cast
    let mut pyroblast = card(
        Mage,
        "Pyroblast",
        5,
        3.0,
        "DAMAGE",
        [16, 0, 0],
        "Channel 3s. Deal 16 damage. Exhaust.",
    );
    pyroblast.exhaust = true;
    registry.register(pyroblast);

    registry.register(card(
        Mage,
        "Counterspell",
        1,
        0.0,
        "DISPEL",
        [0, 0, 0],
        "Remove every effect on the enemy.",
    ));

    registry.register(card(
        Mage,
        "Arcane Insight",
        1,
        0.0,
        "DRAW_DISCARD",
        [2, 0, 0],
        "Draw 2 cards, then discard one of them at random.",
    ));
}
