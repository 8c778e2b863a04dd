//! Rogue cards - stealth, poison and ambushes.

use super::{CardRegistry, card};
use crate::game::CharacterClass::Rogue;

pub fn register_rogue_cards(registry: &mut CardRegistry) {
    // Ambush - only from stealth, breaks the target's channel
    registry.register(card(
        Rogue,
        "Ambush",
        2,
        0.0,
        "AMBUSH",
        [10, 0, 0],
        "Stealth only. Interrupt the enemy's cast and deal 10 damage.",
    ));

    registry.register(card(
        Rogue,
        "Poisoned Blade",
        2,
        0.0,
        "DAMAGE_POISON",
        [2, 1, 5],
        "Deal 2 damage. Poison for 1 per second over 5s.",
    ));

    registry.register(card(
        Rogue,
        "Smoke Bomb",
        2,
        0.0,
        "STEALTH",
        [4, 0, 0],
        "Stealth for 4s.",
    ));

    registry.register(card(
        Rogue,
        "Kick",
        1,
        0.0,
        "INTERRUPT",
        [2, 0, 0],
        "Interrupt the enemy's cast and deal 2 damage.",
    ));

    let mut eviscerate = card(
        Rogue,
        "Eviscerate",
        0,
        0.0,
        "CONSUME_ENERGY",
        [0, 0, 0],
        "Spend all energy. Deal n(n+1)/2 damage. Exhaust.",
    );
    eviscerate.exhaust = true;
    registry.register(eviscerate);

    registry.register(card(
        Rogue,
        "Quick Stab",
        1,
        0.0,
        "STRIKE",
        [2, 0, 0],
        "Deal 2 damage plus strength.",
    ));

    registry.register(card(
        Rogue,
        "Sleight of Hand",
        0,
        0.0,
        "DRAW_DISCARD",
        [2, 0, 0],
        "Draw 2 cards, then discard one of them at random.",
    ));
}
