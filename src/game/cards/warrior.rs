//! Warrior cards - strength-scaled strikes, armor and rage.

use super::{CardRegistry, card};
use crate::game::CharacterClass::Warrior;

pub fn register_warrior_cards(registry: &mut CardRegistry) {
    // Strike - basic attack, scales with strength
    registry.register(card(
        Warrior,
        "Strike",
        1,
        0.0,
        "STRIKE",
        [3, 0, 0],
        "Deal 3 damage plus strength.",
    ));

    registry.register(card(
        Warrior,
        "Cleave",
        3,
        0.0,
        "DAMAGE",
        [6, 0, 0],
        "Deal 6 damage.",
    ));

    registry.register(card(
        Warrior,
        "Shield Wall",
        2,
        0.0,
        "ARMOR",
        [5, 0, 0],
        "Gain 5 armor.",
    ));

    // Crippling Blow - damage + 2 agility slow for 4s
    registry.register(card(
        Warrior,
        "Crippling Blow",
        2,
        0.0,
        "DAMAGE_SLOW",
        [3, 2, 4],
        "Deal 3 damage. Slow by 2 agility for 4s.",
    ));

    registry.register(card(
        Warrior,
        "Iron Bash",
        3,
        0.0,
        "DAMAGE_ARMOR",
        [4, 3, 0],
        "Deal 4 damage. Gain 3 armor.",
    ));

    // Bloodrage - pays health instead of extra energy
    let mut bloodrage = card(
        Warrior,
        "Bloodrage",
        1,
        0.0,
        "LIFE_COST",
        [7, 3, 0],
        "Lose 3 health. Deal 7 damage.",
    );
    bloodrage.health_cost = Some(3);
    registry.register(bloodrage);

    let mut rampage = card(
        Warrior,
        "Rampage",
        0,
        0.0,
        "CONSUME_ENERGY",
        [0, 0, 0],
        "Spend all energy. Deal n(n+1)/2 damage. Exhaust.",
    );
    rampage.exhaust = true;
    registry.register(rampage);
}
