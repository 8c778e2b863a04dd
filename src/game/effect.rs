//! Card effect resolution.
//!
//! [`check`] holds every precondition of playing a card and runs before the
//! battle spends anything. [`resolve`] applies an already-committed card,
//! either right away or when its channel completes.

use rand::Rng;

use super::{
    ActionResult, BattleEvent, CardInstance, Effect, FALLBACK_DAMAGE, Fighter, Fighters,
    InterruptReason, Rejection, SPELL_SURGE_CLASS, Side, StatusRequest, StealthExit,
};

/// Refuse a card whose preconditions are not met. Nothing is mutated.
pub fn check(card: &CardInstance, caster: &Fighter, target: &Fighter) -> ActionResult<()> {
    let me = &caster.combatant;
    if me.is_defeated() {
        return Err(Rejection::Defeated);
    }
    if !me.energy.can_afford(card.energy_cost) {
        return Err(Rejection::NotEnoughEnergy {
            have: me.energy.current(),
            need: me.energy.effective_cost(card.energy_cost),
        });
    }
    if let Some(cost) = card.health_cost.filter(|cost| *cost > 0) {
        if !me.health.can_pay(cost) {
            return Err(Rejection::NotEnoughHealth {
                have: me.health.current(),
                need: cost,
            });
        }
    }
    if card.is_channelled() && me.casting.is_casting() {
        return Err(Rejection::AlreadyCasting);
    }
    match card.effect {
        Effect::Ambush { .. } if !me.stealth.is_stealthed() => {
            return Err(Rejection::NotConcealed);
        }
        Effect::Stealth { .. } if me.stealth.is_stealthed() => {
            return Err(Rejection::AlreadyConcealed);
        }
        Effect::Stealth { duration } if me.stealth.granted(duration) <= 0.0 => {
            return Err(Rejection::NoConcealment);
        }
        _ => {}
    }
    if card.effect.targets_opponent() && target.combatant.stealth.is_stealthed() {
        return Err(Rejection::TargetConcealed);
    }
    Ok(())
}

/// A committed card on its way to resolution.
#[derive(Debug, Clone, Copy)]
pub struct Play<'a> {
    pub card: &'a CardInstance,
    pub actor: Side,
    /// Whether the caster was hidden when the card was committed
    pub concealed_at_commit: bool,
}

/// Apply a card's effect and describe what happened.
///
/// Costs are already paid and the target already locked. Damage dealt to the
/// opponent goes through its armor and reveals it; statuses go through the
/// status engine so they revert on their own.
pub fn resolve<R: Rng + ?Sized>(
    play: Play,
    fighters: &mut Fighters,
    rng: &mut R,
    events: &mut Vec<BattleEvent>,
) -> ActionResult<String> {
    let card = play.card;
    let name = card.name.as_str();
    let target_side = card.locked_target.unwrap_or(play.actor.opponent());
    let (caster, target) = fighters.pair_mut(play.actor);

    let hit = |target: &mut Fighter, amount: i32, events: &mut Vec<BattleEvent>| {
        let hit = target.receive_hit(amount);
        if hit.revealed {
            events.push(BattleEvent::StealthBroken {
                side: target_side,
                reason: StealthExit::TookDamage,
            });
        }
        hit.absorbed + hit.taken
    };

    let result = match &card.effect {
        Effect::Damage { amount } => {
            let damage = spell_damage(caster, *amount);
            let dealt = hit(target, damage, events);
            format!("{name} deals {dealt} damage")
        }
        Effect::Strike { base } => {
            let damage = caster.combatant.attributes.attack_damage(*base);
            let dealt = hit(target, damage, events);
            format!("{name} strikes for {dealt} damage")
        }
        Effect::DamagePoison {
            damage,
            per_second,
            duration,
        } => {
            let damage = spell_damage(caster, *damage);
            let dealt = hit(target, damage, events);
            target.apply_status(
                StatusRequest::Poison {
                    damage: *per_second,
                },
                *duration,
                name,
            );
            format!("{name} deals {dealt} damage and poisons for {duration}s")
        }
        Effect::DamageSlow {
            damage,
            agility,
            duration,
        } => {
            let damage = spell_damage(caster, *damage);
            let dealt = hit(target, damage, events);
            target.apply_status(StatusRequest::Slow { agility: *agility }, *duration, name);
            format!("{name} deals {dealt} damage and slows for {duration}s")
        }
        Effect::Armor { amount } => {
            let gained = caster.armor.gain(*amount);
            format!("{name} grants {gained} armor")
        }
        Effect::DamageArmor { damage, armor } => {
            let damage = spell_damage(caster, *damage);
            let dealt = hit(target, damage, events);
            let gained = caster.armor.gain(*armor);
            format!("{name} deals {dealt} damage and grants {gained} armor")
        }
        Effect::Heal { amount } => {
            let restored = caster.combatant.health.heal(*amount);
            format!("{name} restores {restored} health")
        }
        Effect::Ambush { damage } => {
            if !play.concealed_at_commit {
                return Err(Rejection::NotConcealed);
            }
            interrupt(target, target_side, InterruptReason::Ambushed, events);
            let dealt = hit(target, *damage, events);
            format!("{name} ambushes for {dealt} damage")
        }
        Effect::Interrupt { damage } => {
            let interrupted = interrupt(target, target_side, InterruptReason::Interrupted, events);
            let dealt = hit(target, *damage, events);
            match interrupted {
                Some(spell) => format!("{name} interrupts {spell} and deals {dealt} damage"),
                None => format!("{name} deals {dealt} damage"),
            }
        }
        Effect::ConsumeEnergy => {
            let spent = caster.combatant.energy.drain();
            let damage = spent * (spent + 1) / 2;
            let dealt = hit(target, damage, events);
            format!("{name} consumes {spent} energy for {dealt} damage")
        }
        Effect::Stealth { duration } => {
            if !caster.combatant.stealth.enter(*duration) {
                return Err(Rejection::AlreadyConcealed);
            }
            format!(
                "{name} conceals for {:.1}s",
                caster.combatant.stealth.remaining()
            )
        }
        Effect::DrawDiscard { count } => {
            let drawn = caster.piles.draw(*count as usize, rng);
            for id in &drawn {
                if let Some(card) = caster.piles.hand.iter().find(|c| c.id == *id) {
                    events.push(BattleEvent::CardDrawn {
                        side: play.actor,
                        card: card.name.clone(),
                    });
                }
            }
            if drawn.is_empty() {
                format!("{name} draws nothing")
            } else {
                let id = drawn[rng.random_range(0..drawn.len())];
                match caster.piles.hand.remove_by_id(id) {
                    Some(discarded) => {
                        let message = format!(
                            "{name} draws {} and discards {}",
                            drawn.len(),
                            discarded.name
                        );
                        caster.piles.discard.add_card(discarded);
                        message
                    }
                    None => format!("{name} draws {}", drawn.len()),
                }
            }
        }
        Effect::Dispel => {
            let removed = target.clear_statuses();
            format!("{name} dispels {removed} effects")
        }
        Effect::LifeCost {
            damage,
            health_cost,
        } => {
            let damage = spell_damage(caster, *damage);
            let dealt = hit(target, damage, events);
            format!("{name} costs {health_cost} health and deals {dealt} damage")
        }
        Effect::Fallback { code } => {
            tracing::warn!(card = name, code = %code, "resolving unknown effect as weak damage");
            let dealt = hit(target, FALLBACK_DAMAGE, events);
            format!("{name} deals {dealt} damage")
        }
    };
    tracing::debug!(card = name, actor = ?play.actor, %result, "card resolved");
    Ok(result)
}

/// Doubles spell damage once after a surge. Only the surge class benefits, and
/// only its flag is consumed.
fn spell_damage(caster: &mut Fighter, base: i32) -> i32 {
    let me = &mut caster.combatant;
    if me.next_spell_double && me.class == SPELL_SURGE_CLASS {
        me.next_spell_double = false;
        return base.max(0) * 2;
    }
    base.max(0)
}

/// Break the target's channel and discard the lost card.
fn interrupt(
    target: &mut Fighter,
    side: Side,
    reason: InterruptReason,
    events: &mut Vec<BattleEvent>,
) -> Option<String> {
    let card = target.combatant.casting.interrupt(reason)?;
    let name = card.name.clone();
    events.push(BattleEvent::CastInterrupted {
        side,
        card: name.clone(),
    });
    target.piles.retire(card);
    Some(name)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::game::{CardRegistry, CharacterClass, GameConfig, SideSetup};

    fn fighters(player: CharacterClass, opponent: CharacterClass) -> Fighters {
        let config = GameConfig::standard();
        let mut rng = StdRng::seed_from_u64(3);
        let mut next_id = 0;
        let mut build = |class| {
            Fighter::new(
                &SideSetup::external("Test", class),
                &config,
                &mut next_id,
                &mut rng,
            )
            .unwrap()
        };
        Fighters([build(player), build(opponent)])
    }

    fn card(name: &str) -> CardInstance {
        let registry = CardRegistry::standard();
        let mut card = CardInstance::from_template(900, registry.get_by_name(name).unwrap());
        if card.effect.targets_opponent() {
            card.locked_target = Some(Side::Opponent);
        }
        card
    }

    fn play(card: &CardInstance, concealed_at_commit: bool) -> Play<'_> {
        Play {
            card,
            actor: Side::Player,
            concealed_at_commit,
        }
    }

    fn run(fighters: &mut Fighters, card: &CardInstance, concealed: bool) -> ActionResult<String> {
        let mut rng = StdRng::seed_from_u64(8);
        resolve(play(card, concealed), fighters, &mut rng, &mut Vec::new())
    }

    #[test]
    fn strike_adds_strength() {
        let mut fighters = fighters(CharacterClass::Warrior, CharacterClass::Mage);
        run(&mut fighters, &card("Strike"), false).unwrap();
        assert_eq!(fighters.get(Side::Opponent).combatant.health.current(), 24);
    }

    #[test]
    fn surge_doubles_mage_spell_once() {
        let mut fighters = fighters(CharacterClass::Mage, CharacterClass::Warrior);
        fighters.get_mut(Side::Player).combatant.next_spell_double = true;
        run(&mut fighters, &card("Arcane Missile"), false).unwrap();
        assert_eq!(fighters.get(Side::Opponent).combatant.health.current(), 34);
        assert!(!fighters.get(Side::Player).combatant.next_spell_double);

        run(&mut fighters, &card("Arcane Missile"), false).unwrap();
        assert_eq!(fighters.get(Side::Opponent).combatant.health.current(), 31);
    }

    #[test]
    fn surge_flag_ignored_for_other_classes() {
        let mut fighters = fighters(CharacterClass::Warrior, CharacterClass::Mage);
        fighters.get_mut(Side::Player).combatant.next_spell_double = true;
        run(&mut fighters, &card("Cleave"), false).unwrap();
        assert_eq!(fighters.get(Side::Opponent).combatant.health.current(), 24);
        assert!(fighters.get(Side::Player).combatant.next_spell_double);
    }

    #[test]
    fn consume_energy_is_triangular() {
        let mut fighters = fighters(CharacterClass::Rogue, CharacterClass::Warrior);
        fighters.get_mut(Side::Player).combatant.energy.gain(1);
        assert_eq!(fighters.get(Side::Player).combatant.energy.current(), 4);
        run(&mut fighters, &card("Eviscerate"), false).unwrap();
        assert_eq!(fighters.get(Side::Player).combatant.energy.current(), 0);
        assert_eq!(fighters.get(Side::Opponent).combatant.health.current(), 30);
    }

    #[test]
    fn ambush_requires_concealment() {
        let mut fighters = fighters(CharacterClass::Rogue, CharacterClass::Mage);
        let ambush = card("Ambush");
        assert_eq!(
            check(&ambush, fighters.get(Side::Player), fighters.get(Side::Opponent)),
            Err(Rejection::NotConcealed)
        );
        assert_eq!(
            run(&mut fighters, &ambush, false),
            Err(Rejection::NotConcealed)
        );
        assert_eq!(fighters.get(Side::Opponent).combatant.health.current(), 30);
    }

    #[test]
    fn ambush_interrupts_target_cast() {
        let mut fighters = fighters(CharacterClass::Rogue, CharacterClass::Mage);
        {
            let mage = fighters.get_mut(Side::Opponent);
            let attributes = mage.combatant.attributes;
            mage.combatant
                .casting
                .start(card("Fireball"), &attributes, Some(Side::Player), false)
                .unwrap();
        }
        let mut events = Vec::new();
        let mut rng = StdRng::seed_from_u64(1);
        resolve(play(&card("Ambush"), true), &mut fighters, &mut rng, &mut events).unwrap();

        let mage = fighters.get(Side::Opponent);
        assert!(!mage.combatant.casting.is_casting());
        assert_eq!(mage.combatant.health.current(), 20);
        assert_eq!(mage.piles.discard.len(), 1);
        assert!(events.contains(&BattleEvent::CastInterrupted {
            side: Side::Opponent,
            card: "Fireball".to_string()
        }));
    }

    #[test]
    fn concealed_target_cannot_be_picked() {
        let mut fighters = fighters(CharacterClass::Warrior, CharacterClass::Rogue);
        fighters.get_mut(Side::Opponent).combatant.stealth.enter(3.0);
        let (me, foe) = (fighters.get(Side::Player), fighters.get(Side::Opponent));
        assert_eq!(check(&card("Strike"), me, foe), Err(Rejection::TargetConcealed));
        assert_eq!(check(&card("Shield Wall"), me, foe), Ok(()));
    }

    #[test]
    fn life_cost_checks_health() {
        let mut fighters = fighters(CharacterClass::Warrior, CharacterClass::Mage);
        let me = fighters.get_mut(Side::Player);
        me.combatant.health.take_damage(37);
        let bloodrage = card("Bloodrage");
        assert_eq!(
            check(&bloodrage, fighters.get(Side::Player), fighters.get(Side::Opponent)),
            Err(Rejection::NotEnoughHealth { have: 3, need: 3 })
        );
    }

    #[test]
    fn draw_discard_keeps_one_fewer() {
        let mut fighters = fighters(CharacterClass::Rogue, CharacterClass::Mage);
        let before = fighters.get(Side::Player).piles.hand.len();
        let message = run(&mut fighters, &card("Sleight of Hand"), false).unwrap();
        let me = fighters.get(Side::Player);
        assert_eq!(me.piles.hand.len(), before + 1);
        assert_eq!(me.piles.discard.len(), 1);
        assert!(message.contains("discards"));
    }

    #[test]
    fn dispel_reverts_slow() {
        let mut fighters = fighters(CharacterClass::Paladin, CharacterClass::Rogue);
        fighters
            .get_mut(Side::Opponent)
            .apply_status(StatusRequest::Slow { agility: 2 }, 5.0, "Frost");
        assert_eq!(fighters.get(Side::Opponent).combatant.attributes.agility, 1);
        run(&mut fighters, &card("Purify"), false).unwrap();
        let rogue = fighters.get(Side::Opponent);
        assert_eq!(rogue.combatant.attributes.agility, 3);
        assert!(rogue.combatant.statuses.is_empty());
    }

    #[test]
    fn fallback_deals_weak_damage() {
        let mut fighters = fighters(CharacterClass::Warrior, CharacterClass::Mage);
        let mut glitch = card("Strike");
        glitch.effect = Effect::Fallback {
            code: "TELEPORT".to_string(),
        };
        run(&mut fighters, &glitch, false).unwrap();
        assert_eq!(
            fighters.get(Side::Opponent).combatant.health.current(),
            30 - FALLBACK_DAMAGE
        );
    }

    #[test]
    fn zero_length_stealth_is_refused_before_payment() {
        let fighters = fighters(CharacterClass::Rogue, CharacterClass::Mage);
        let mut dud = card("Smoke Bomb");
        dud.effect = Effect::Stealth { duration: 0.0 };
        let (me, foe) = (fighters.get(Side::Player), fighters.get(Side::Opponent));
        assert_eq!(check(&dud, me, foe), Err(Rejection::NoConcealment));
        assert_eq!(check(&card("Smoke Bomb"), me, foe), Ok(()));
    }
}
