// Seeded checks of the bot's card choices
use rand::{SeedableRng, rngs::StdRng};
use sensen_duel::game::{
    Battle, BattleSetup, BotMemory, BotPlayer, CardInstance, CardRegistry, CharacterClass,
    Difficulty, GameConfig, OpponentProfile, Side, SideSetup, Situation, Strategy, assess_threat,
    lethal_available, score_card,
};

/// `class` holds exactly `hand` (ids follow hand order); a Mage foe holds nothing.
fn battle_with(class: CharacterClass, hand: &[&str]) -> Battle {
    let setup = BattleSetup {
        player: SideSetup::external("Bot", class),
        opponent: SideSetup::external("Foe", CharacterClass::Mage),
    };
    let mut battle = Battle::new(GameConfig::standard(), setup, 5).unwrap();
    let registry = CardRegistry::standard();
    battle.fighter_mut(Side::Player).piles.hand.cards = hand
        .iter()
        .enumerate()
        .map(|(i, name)| CardInstance::from_template(i as u32, registry.get_by_name(name).unwrap()))
        .collect();
    battle.fighter_mut(Side::Opponent).piles.hand.cards.clear();
    battle
}

fn calm_battle() -> Battle {
    battle_with(
        CharacterClass::Warrior,
        &["Strike", "Shield Wall", "Cleave", "Crippling Blow"],
    )
}

fn warrior_bot(profile: OpponentProfile) -> BotPlayer {
    BotPlayer::new(profile, CharacterClass::Warrior, &mut StdRng::seed_from_u64(2))
}

#[test]
fn balanced_pick_stays_in_top_slice() {
    let battle = calm_battle();
    let me = battle.fighter(Side::Player);
    let foe = battle.fighter(Side::Opponent);

    for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
        let profile = OpponentProfile::with_difficulty(difficulty);
        let mut bot = BotPlayer::new(profile, CharacterClass::Warrior, &mut StdRng::seed_from_u64(8));
        let threat = assess_threat(me, foe, &bot.memory, bot.personality.adaptability);
        let candidates = bot.candidates(me, foe);
        assert_eq!(candidates.len(), 4);

        let ranked = bot.rank_candidates(me, foe, threat, &candidates);
        assert_eq!(ranked, bot.rank_candidates(me, foe, threat, &candidates));
        let k = bot.top_slice(ranked.len());
        let allowed: Vec<u32> = ranked[..k]
            .iter()
            .map(|(index, _)| me.piles.hand.cards[*index].id)
            .collect();

        let mut rng = StdRng::seed_from_u64(77);
        for _ in 0..50 {
            let turn = bot.decide(me, foe, &mut rng);
            assert_eq!(turn.strategy, Strategy::Balanced);
            let card = turn.card.expect("a legal card exists");
            assert!(allowed.contains(&card), "{card} outside top {k}");
        }
    }
}

#[test]
fn profile_strategy_replaces_balanced() {
    let battle = calm_battle();
    let me = battle.fighter(Side::Player);
    let foe = battle.fighter(Side::Opponent);
    let profile = OpponentProfile {
        ai_strategy: Some(Strategy::Defensive),
        ..OpponentProfile::default()
    };
    let mut bot = warrior_bot(profile);
    let turn = bot.decide(me, foe, &mut StdRng::seed_from_u64(3));
    assert_eq!(turn.strategy, Strategy::Defensive);
    // Shield Wall is the only armor card in hand
    assert_eq!(turn.card, Some(1));
}

#[test]
fn avoided_cards_are_skipped() {
    let battle = calm_battle();
    let me = battle.fighter(Side::Player);
    let foe = battle.fighter(Side::Opponent);
    let profile = OpponentProfile {
        avoid_cards: vec!["strike".to_string(), "Cleave".to_string()],
        ..OpponentProfile::default()
    };
    let bot = warrior_bot(profile);
    let names: Vec<&str> = bot
        .candidates(me, foe)
        .into_iter()
        .map(|index| me.piles.hand.cards[index].name.as_str())
        .collect();
    assert_eq!(names, vec!["Shield Wall", "Crippling Blow"]);
}

#[test]
fn chained_plays_switch_to_combo() {
    let battle = calm_battle();
    let me = battle.fighter(Side::Player);
    let foe = battle.fighter(Side::Opponent);
    let mut bot = warrior_bot(OpponentProfile::default());
    bot.record_play("Strike", 0.0);
    bot.record_play("Cleave", 1.0);

    let turn = bot.decide(me, foe, &mut StdRng::seed_from_u64(3));
    assert_eq!(turn.strategy, Strategy::Combo);
    // Strike: 3 base + 3 strength for one energy is the best cheap filler
    assert_eq!(turn.card, Some(0));
}

#[test]
fn reachable_lethal_turns_aggressive_on_a_healthy_foe() {
    let mut battle = battle_with(
        CharacterClass::Warrior,
        &["Shield Wall", "Cleave", "Cleave", "Strike"],
    );
    battle.fighter_mut(Side::Player).combatant.energy.gain(10);
    battle.fighter_mut(Side::Opponent).combatant.health.take_damage(18);
    let me = battle.fighter(Side::Player);
    let foe = battle.fighter(Side::Opponent);
    assert!(foe.combatant.health.percentage() >= 0.4);
    assert!(lethal_available(me, foe));

    let mut bot = warrior_bot(OpponentProfile::default());
    let turn = bot.decide(me, foe, &mut StdRng::seed_from_u64(3));
    assert_eq!(turn.strategy, Strategy::Aggressive);
    assert_eq!(turn.card, Some(3));
}

#[test]
fn aggressive_without_damage_reaches_for_control() {
    let mut battle = battle_with(CharacterClass::Warrior, &["Shield Wall", "Crippling Blow"]);
    battle.fighter_mut(Side::Opponent).combatant.health.take_damage(20);
    let me = battle.fighter(Side::Player);
    let foe = battle.fighter(Side::Opponent);

    let mut bot = warrior_bot(OpponentProfile::default());
    let turn = bot.decide(me, foe, &mut StdRng::seed_from_u64(3));
    assert_eq!(turn.strategy, Strategy::Aggressive);
    assert_eq!(turn.card, Some(1));
}

#[test]
fn cornered_rogue_hides() {
    let mut battle = battle_with(CharacterClass::Rogue, &["Quick Stab", "Smoke Bomb"]);
    battle.fighter_mut(Side::Player).combatant.health.take_damage(24);
    let me = battle.fighter(Side::Player);
    let foe = battle.fighter(Side::Opponent);

    let mut bot = BotPlayer::new(
        OpponentProfile::default(),
        CharacterClass::Rogue,
        &mut StdRng::seed_from_u64(2),
    );
    let turn = bot.decide(me, foe, &mut StdRng::seed_from_u64(3));
    assert_eq!(turn.strategy, Strategy::Defensive);
    assert_eq!(turn.card, Some(1));
    // Smoke Bomb and Vanish together cost more than the 3 energy on hand
    assert!(!turn.hero_skill);
}

#[test]
fn profile_can_teach_stealth_to_other_classes() {
    let battle = battle_with(CharacterClass::Warrior, &["Strike", "Smoke Bomb"]);
    let me = battle.fighter(Side::Player);
    let foe = battle.fighter(Side::Opponent);
    let profile = OpponentProfile {
        ai_strategy: Some(Strategy::Defensive),
        consider_stealth: true,
        ..OpponentProfile::default()
    };

    let mut bot = warrior_bot(profile);
    for seed in 0..10 {
        let turn = bot.decide(me, foe, &mut StdRng::seed_from_u64(seed));
        assert_eq!(turn.strategy, Strategy::Defensive);
        assert_eq!(turn.card, Some(1));
    }
}

#[test]
fn combo_streak_multiplies_the_score() {
    let battle = calm_battle();
    let me = battle.fighter(Side::Player);
    let foe = battle.fighter(Side::Opponent);
    let bot = warrior_bot(OpponentProfile::default());
    let situation = Situation::read(me, foe, 3);
    let cleave = &me.piles.hand.cards[2];

    let mut memory = BotMemory::default();
    memory.record_play("Strike", 0.0);
    let single = score_card(cleave, me, &situation, &bot.personality, &memory);
    let base = score_card(cleave, me, &situation, &bot.personality, &BotMemory::default());
    assert_eq!(single, base);

    memory.record_play("Strike", 1.0);
    let chained = score_card(cleave, me, &situation, &bot.personality, &memory);
    let expected = 1.0 + 2.0 * 0.1 * (0.5 + bot.personality.combo_preference);
    assert!((chained / base - expected).abs() < 1e-4);
}
