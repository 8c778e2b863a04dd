//! Rejections for actions whose preconditions are not met.
//!
//! A rejection is always produced before anything is mutated, so the caller
//! can surface the message verbatim and carry on.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::CharacterClass;

/// Why an action was refused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Rejection {
    /// The battle already has a winner
    BattleOver,
    /// The acting combatant has been defeated
    Defeated,
    /// No card at that hand position
    NoSuchCard { index: usize },
    /// Not enough energy to pay the (reduced) cost
    NotEnoughEnergy { have: i32, need: i32 },
    /// Not enough health to pay a life cost
    NotEnoughHealth { have: i32, need: i32 },
    /// Ambush-style cards need the caster to be concealed
    NotConcealed,
    /// The opponent is concealed and cannot be targeted
    TargetConcealed,
    /// A channelled card is already in progress
    AlreadyCasting,
    /// Stealth cannot be entered twice
    AlreadyConcealed,
    /// The stealth effect grants no time at all
    NoConcealment,
    /// The hero skill is still recovering
    SkillCoolingDown { remaining: f32 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::BattleOver => write!(f, "The battle is already over"),
            Rejection::Defeated => write!(f, "A defeated combatant cannot act"),
            Rejection::NoSuchCard { index } => write!(f, "No card in hand slot {index}"),
            Rejection::NotEnoughEnergy { have, need } => {
                write!(f, "Not enough energy ({have}/{need})")
            }
            Rejection::NotEnoughHealth { have, need } => {
                write!(f, "Not enough health to pay {need} (have {have})")
            }
            Rejection::NotConcealed => write!(f, "Must be stealthed to use this card"),
            Rejection::TargetConcealed => write!(f, "The target is hidden"),
            Rejection::AlreadyCasting => write!(f, "Already casting"),
            Rejection::AlreadyConcealed => write!(f, "Already stealthed"),
            Rejection::NoConcealment => write!(f, "This would not conceal anyone"),
            Rejection::SkillCoolingDown { remaining } => {
                write!(f, "Hero skill ready in {remaining:.1}s")
            }
        }
    }
}

impl std::error::Error for Rejection {}

/// Result type alias for player-facing actions.
pub type ActionResult<T> = Result<T, Rejection>;

/// The configuration cannot produce a battle.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupError {
    MissingClass(CharacterClass),
    MissingHeroSkill(CharacterClass),
    EmptyDeck(CharacterClass),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::MissingClass(class) => write!(f, "No stats configured for {class:?}"),
            SetupError::MissingHeroSkill(class) => {
                write!(f, "No hero skill configured for {class:?}")
            }
            SetupError::EmptyDeck(class) => write!(f, "No cards configured for {class:?}"),
        }
    }
}

impl std::error::Error for SetupError {}
