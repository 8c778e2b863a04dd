use super::CharacterClass;

/// Shortest draw interval agility can buy.
pub const MIN_DRAW_INTERVAL: f32 = 0.5;
/// Draw interval reduction per point of agility.
pub const AGILITY_DRAW_FACTOR: f32 = 0.2;
/// Shortest cast time spirit can buy.
pub const MIN_CAST_TIME: f32 = 0.1;
/// Cast time reduction per point of spirit.
pub const SPIRIT_CAST_FACTOR: f32 = 0.1;
/// Damage dealt by effect codes nobody recognizes.
pub const FALLBACK_DAMAGE: i32 = 2;
/// Plays closer together than this (in seconds) chain into a combo.
pub const COMBO_WINDOW: f32 = 5.0;
/// Class whose pending "next spell doubles" flag is honoured by spell damage.
pub const SPELL_SURGE_CLASS: CharacterClass = CharacterClass::Mage;
/// Cards costing at most this much count as cheap combo fillers for the bot.
pub const CHEAP_CARD_COST: i32 = 2;
