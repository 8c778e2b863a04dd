//! Heuristic opponent.
//!
//! Each decision runs the same pipeline: assess the threat, pick a strategy,
//! filter the legal cards through the profile, then select. The only random
//! steps are the uniform fallbacks and the balanced top-slice pick, all drawn
//! from the battle's seeded RNG.

mod memory;
mod personality;
mod scoring;
mod strategy;

pub use memory::*;
pub use personality::*;
pub use scoring::*;
pub use strategy::*;

use rand::Rng;

use super::{
    CHEAP_CARD_COST, CardInstance, CharacterClass, Effect, EffectFamily, Fighter, OpponentProfile,
    effect,
};

/// What the bot wants to do this turn. The hero skill, when chosen, goes first.
#[derive(Debug, Clone, PartialEq)]
pub struct BotTurn {
    pub hero_skill: bool,
    /// Instance id of the card to play
    pub card: Option<u32>,
    pub strategy: Strategy,
    pub threat: i32,
    pub reason: String,
}

impl BotTurn {
    pub fn is_idle(&self) -> bool {
        !self.hero_skill && self.card.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct BotPlayer {
    pub profile: OpponentProfile,
    pub personality: Personality,
    pub memory: BotMemory,
    consider_stealth: bool,
}

impl BotPlayer {
    pub fn new<R: Rng + ?Sized>(
        profile: OpponentProfile,
        class: CharacterClass,
        rng: &mut R,
    ) -> Self {
        let personality = Personality::roll(rng, profile.personality, profile.difficulty);
        tracing::debug!(?class, ?personality, difficulty = ?profile.difficulty, "bot created");
        Self {
            consider_stealth: profile.consider_stealth || class == CharacterClass::Rogue,
            profile,
            personality,
            memory: BotMemory::default(),
        }
    }

    /// Hand positions of the cards that could be played right now, narrowed
    /// by the profile's preferences when that leaves anything. Cards that
    /// would squander a held advantage are never candidates.
    pub fn candidates(&self, me: &Fighter, foe: &Fighter) -> Vec<usize> {
        let legal: Vec<usize> = me
            .piles
            .hand
            .iter()
            .enumerate()
            .filter(|(_, card)| effect::check(card, me, foe).is_ok() && !squanders(card, me))
            .map(|(index, _)| index)
            .collect();
        let named = |index: &usize, names: &[String]| {
            let name = &me.piles.hand.cards[*index].name;
            names.iter().any(|n| n.eq_ignore_ascii_case(name))
        };

        if !self.profile.preferred_cards.is_empty() {
            let preferred: Vec<usize> = legal
                .iter()
                .copied()
                .filter(|i| named(i, &self.profile.preferred_cards))
                .collect();
            if !preferred.is_empty() {
                return preferred;
            }
        }
        if !self.profile.avoid_cards.is_empty() {
            let allowed: Vec<usize> = legal
                .iter()
                .copied()
                .filter(|i| !named(i, &self.profile.avoid_cards))
                .collect();
            if !allowed.is_empty() {
                return allowed;
            }
        }
        legal
    }

    /// Candidates with their balanced score, best first. Ties keep hand order.
    pub fn rank_candidates(
        &self,
        me: &Fighter,
        foe: &Fighter,
        threat: i32,
        candidates: &[usize],
    ) -> Vec<(usize, f32)> {
        let situation = Situation::read(me, foe, threat);
        let mut ranked: Vec<(usize, f32)> = candidates
            .iter()
            .map(|&index| {
                let card = &me.piles.hand.cards[index];
                let score =
                    score_card(card, me, &situation, &self.personality, &self.memory);
                (index, score)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// How many of `n` ranked candidates the balanced pick draws from.
    pub fn top_slice(&self, n: usize) -> usize {
        ((n as f32 * self.profile.difficulty.random_factor()).ceil() as usize).clamp(1, n.max(1))
    }

    pub fn decide<R: Rng + ?Sized>(&mut self, me: &Fighter, foe: &Fighter, rng: &mut R) -> BotTurn {
        self.memory.observe(
            me.combatant.health.percentage(),
            me.combatant.energy.percentage(),
        );
        let threat = assess_threat(me, foe, &self.memory, self.personality.adaptability);
        self.memory.record_threat(threat);
        let fallback = self.profile.ai_strategy.unwrap_or_default();
        let strategy = choose_strategy(me, foe, threat, &self.memory, fallback);

        let candidates = self.candidates(me, foe);
        let card = self
            .pick(strategy, me, foe, threat, &candidates, rng)
            .and_then(|index| me.piles.hand.cards.get(index));

        let hero_skill = self.wants_hero_skill(me, foe)
            && card.is_none_or(|card| {
                let energy = &me.combatant.energy;
                energy.effective_cost(card.energy_cost) + energy.effective_cost(me.hero.energy_cost)
                    <= energy.current()
            });

        let reason = match (card, hero_skill) {
            (Some(card), true) => format!("{} then {}", me.hero.name, card.name),
            (Some(card), false) => card.name.clone(),
            (None, true) => me.hero.name.clone(),
            (None, false) if candidates.is_empty() => "no playable cards".to_string(),
            (None, false) => "nothing worth playing".to_string(),
        };
        tracing::debug!(
            bot = %me.combatant.name,
            ?strategy,
            threat,
            candidates = candidates.len(),
            %reason,
            "bot decision"
        );
        BotTurn {
            hero_skill,
            card: card.map(|card| card.id),
            strategy,
            threat,
            reason,
        }
    }

    /// Remember a successful play. Returns the combo counter after it.
    pub fn record_play(&mut self, card: &str, now: f32) -> u32 {
        self.memory.record_play(card, now)
    }

    /// Choose the card to follow a hero skill with, on the state the skill
    /// left behind. Keeps the strategy and threat of the turn's decision.
    pub fn follow_up<R: Rng + ?Sized>(
        &self,
        turn: &BotTurn,
        me: &Fighter,
        foe: &Fighter,
        rng: &mut R,
    ) -> Option<u32> {
        let candidates = self.candidates(me, foe);
        self.pick(turn.strategy, me, foe, turn.threat, &candidates, rng)
            .and_then(|index| me.piles.hand.cards.get(index))
            .map(|card| card.id)
    }

    fn pick<R: Rng + ?Sized>(
        &self,
        strategy: Strategy,
        me: &Fighter,
        foe: &Fighter,
        threat: i32,
        candidates: &[usize],
        rng: &mut R,
    ) -> Option<usize> {
        if candidates.is_empty() {
            return None;
        }
        self.select(strategy, me, foe, threat, candidates, rng)
            .or_else(|| Some(candidates[rng.random_range(0..candidates.len())]))
    }

    fn select<R: Rng + ?Sized>(
        &self,
        strategy: Strategy,
        me: &Fighter,
        foe: &Fighter,
        threat: i32,
        candidates: &[usize],
        rng: &mut R,
    ) -> Option<usize> {
        let card = |index: &usize| &me.piles.hand.cards[*index];
        let best_by = |family: EffectFamily, value: &dyn Fn(&CardInstance) -> f32| {
            candidates
                .iter()
                .copied()
                .filter(|i| card(i).family() == family)
                .max_by(|a, b| value(card(a)).total_cmp(&value(card(b))))
        };

        match strategy {
            Strategy::Aggressive => {
                let per_energy =
                    |c: &CardInstance| card_value(c, me) / c.energy_cost.max(1) as f32;
                best_by(EffectFamily::Damage, &per_energy).or_else(|| {
                    let situation = Situation::read(me, foe, threat);
                    let score = |c: &CardInstance| {
                        score_card(c, me, &situation, &self.personality, &self.memory)
                    };
                    best_by(EffectFamily::Poison, &score)
                        .into_iter()
                        .chain(best_by(EffectFamily::Slow, &score))
                        .max_by(|a, b| score(card(a)).total_cmp(&score(card(b))))
                })
            }
            Strategy::Defensive => best_by(EffectFamily::Heal, &|c: &CardInstance| c.value1 as f32)
                .or_else(|| best_by(EffectFamily::Armor, &|c: &CardInstance| {
                    armor_value(c) as f32
                }))
                .or_else(|| {
                    self.consider_stealth
                        .then(|| best_by(EffectFamily::Stealth, &|c: &CardInstance| c.value1 as f32))
                        .flatten()
                }),
            Strategy::Combo => candidates
                .iter()
                .copied()
                .filter(|i| card(i).energy_cost <= CHEAP_CARD_COST)
                .max_by(|a, b| {
                    let per_energy =
                        |c: &CardInstance| card_value(c, me) / c.energy_cost.max(1) as f32;
                    per_energy(card(a)).total_cmp(&per_energy(card(b)))
                }),
            Strategy::Balanced => {
                let ranked = self.rank_candidates(me, foe, threat, candidates);
                let k = self.top_slice(ranked.len());
                ranked.get(rng.random_range(0..k)).map(|(index, _)| *index)
            }
        }
    }

    /// Class-specific reasons to spend the hero skill.
    pub fn wants_hero_skill(&self, me: &Fighter, foe: &Fighter) -> bool {
        if me.hero.check(me).is_err() {
            return false;
        }
        let own = me.combatant.health.percentage();
        let theirs = foe.combatant.health.percentage();
        let energy = &me.combatant.energy;
        match me.combatant.class {
            CharacterClass::Warrior => {
                theirs < 0.5
                    || me.piles.hand.iter().any(|c| {
                        c.family() == EffectFamily::Damage
                            && c.value1 >= 6
                            && energy.can_afford(c.energy_cost)
                    })
            }
            CharacterClass::Mage => {
                !me.combatant.next_spell_double
                    && me.piles.hand.iter().any(|c| {
                        c.class == CharacterClass::Mage && c.effect.is_spell_damage() && c.value1 >= 8
                    })
            }
            CharacterClass::Rogue => own < 0.4,
            CharacterClass::Paladin => own < 0.5,
        }
    }
}

/// Whether playing `card` now throws away something the bot is holding:
/// stealth broken by a plain attack, or a primed surge spent on less than
/// the biggest spell in hand.
fn squanders(card: &CardInstance, me: &Fighter) -> bool {
    let combatant = &me.combatant;
    if combatant.stealth.is_stealthed()
        && card.effect.targets_opponent()
        && !matches!(card.effect, Effect::Ambush { .. })
    {
        return true;
    }
    if !combatant.next_spell_double || !card.effect.is_spell_damage() {
        return false;
    }
    // The surge is already riding on the spell being channelled
    if combatant
        .casting
        .active()
        .is_some_and(|cast| cast.card.effect.is_spell_damage())
    {
        return true;
    }
    let biggest = me
        .piles
        .hand
        .iter()
        .filter(|c| c.effect.is_spell_damage())
        .map(|c| c.value1)
        .max()
        .unwrap_or(0);
    card.value1 < biggest
}

fn armor_value(card: &CardInstance) -> i32 {
    match card.effect {
        Effect::Armor { amount } => amount,
        Effect::DamageArmor { armor, .. } => armor,
        _ => 0,
    }
}
