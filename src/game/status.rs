//! Status effects - timed buffs, debuffs and damage over time.
//!
//! Every effect that changes a stat on apply records the delta it actually
//! applied and hands exactly that delta back on expiry, so overlapping
//! effects never drift. Timed hero-skill buffs go through the same list so a
//! reset or dispel cleans them up like any other effect.

use serde::{Deserialize, Serialize};

use super::{Armor, Attribute, Attributes, Health, Stealth};

/// What a caller asks for when applying an effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusRequest {
    /// Damage per full second
    Poison { damage: i32 },
    /// Agility reduction
    Slow { agility: i32 },
    /// Temporary attribute increase
    Boost { attribute: Attribute, amount: i32 },
    /// Temporary armor
    Armor { amount: i32 },
}

/// An active effect and its bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StatusKind {
    Poison { damage: i32, accumulated: f32 },
    Slow { applied: i32 },
    Boost { attribute: Attribute, applied: i32 },
    Armor { granted: i32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub remaining: f32,
    /// Card or skill that applied it
    pub source: String,
}

impl StatusEffect {
    pub fn label(&self) -> &'static str {
        match self.kind {
            StatusKind::Poison { .. } => "poison",
            StatusKind::Slow { .. } => "slow",
            StatusKind::Boost { .. } => "boost",
            StatusKind::Armor { .. } => "armor",
        }
    }

    fn on_tick(&mut self, dt: f32, host: &mut StatusHost) -> Option<StatusEvent> {
        let StatusKind::Poison {
            damage,
            accumulated,
        } = &mut self.kind
        else {
            return None;
        };
        *accumulated += dt;
        let mut dealt = 0;
        while *accumulated >= 1.0 {
            *accumulated -= 1.0;
            dealt += host.health.take_damage(*damage);
            host.stealth.on_take_damage(*damage);
        }
        (dealt > 0).then(|| StatusEvent::PoisonTick {
            source: self.source.clone(),
            damage: dealt,
        })
    }

    fn on_expire(&self, host: &mut StatusHost) {
        match self.kind {
            StatusKind::Poison { .. } => {}
            StatusKind::Slow { applied } => host.attributes.revert(Attribute::Agility, applied),
            StatusKind::Boost { attribute, applied } => host.attributes.revert(attribute, applied),
            StatusKind::Armor { granted } => {
                host.armor.remove_up_to(granted);
            }
        }
    }
}

/// The parts of a combatant that effect hooks may touch.
pub struct StatusHost<'a> {
    pub health: &'a mut Health,
    pub attributes: &'a mut Attributes,
    pub stealth: &'a mut Stealth,
    pub armor: &'a mut Armor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusEvent {
    PoisonTick { source: String, damage: i32 },
    Expired { source: String, label: &'static str },
}

/// Active effects on one combatant. Effects do not stack or merge; each
/// instance runs its own clock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Run the apply hook and start the effect's clock.
    pub fn apply(
        &mut self,
        request: StatusRequest,
        duration: f32,
        source: &str,
        host: &mut StatusHost,
    ) {
        if duration <= 0.0 {
            return;
        }
        let kind = match request {
            StatusRequest::Poison { damage } => StatusKind::Poison {
                damage: damage.max(0),
                accumulated: 0.0,
            },
            StatusRequest::Slow { agility } => StatusKind::Slow {
                applied: host.attributes.adjust(Attribute::Agility, -agility.max(0)),
            },
            StatusRequest::Boost { attribute, amount } => StatusKind::Boost {
                attribute,
                applied: host.attributes.adjust(attribute, amount.max(0)),
            },
            StatusRequest::Armor { amount } => StatusKind::Armor {
                granted: host.armor.gain(amount),
            },
        };
        tracing::debug!(source, ?kind, duration, "status applied");
        self.effects.push(StatusEffect {
            kind,
            remaining: duration,
            source: source.to_string(),
        });
    }

    /// Count every clock down; expired effects run their expire hook once and
    /// are dropped without ticking.
    pub fn tick(&mut self, dt: f32, host: &mut StatusHost) -> Vec<StatusEvent> {
        let dt = dt.max(0.0);
        let mut events = Vec::new();
        self.effects.retain_mut(|effect| {
            effect.remaining -= dt;
            if effect.remaining <= 0.0 {
                effect.on_expire(host);
                events.push(StatusEvent::Expired {
                    source: effect.source.clone(),
                    label: effect.label(),
                });
                false
            } else {
                if let Some(event) = effect.on_tick(dt, host) {
                    events.push(event);
                }
                true
            }
        });
        events
    }

    /// Remove everything, reversing each effect's delta. Returns how many were removed.
    pub fn clear(&mut self, host: &mut StatusHost) -> usize {
        let removed = self.effects.len();
        for effect in self.effects.drain(..) {
            effect.on_expire(host);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy {
        health: Health,
        attributes: Attributes,
        stealth: Stealth,
        armor: Armor,
    }

    impl Dummy {
        fn new() -> Self {
            Self {
                health: Health::new(20, 0),
                attributes: Attributes::new(2, 3, 1),
                stealth: Stealth::new(8.0),
                armor: Armor::default(),
            }
        }

        fn host(&mut self) -> StatusHost<'_> {
            StatusHost {
                health: &mut self.health,
                attributes: &mut self.attributes,
                stealth: &mut self.stealth,
                armor: &mut self.armor,
            }
        }
    }

    #[test]
    fn poison_deals_damage_per_full_second() {
        let mut dummy = Dummy::new();
        let mut statuses = StatusEffects::default();
        statuses.apply(StatusRequest::Poison { damage: 2 }, 5.0, "Blade", &mut dummy.host());

        for _ in 0..3 {
            statuses.tick(0.25, &mut dummy.host());
        }
        assert_eq!(dummy.health.current(), 20);
        let events = statuses.tick(0.25, &mut dummy.host());
        assert_eq!(dummy.health.current(), 18);
        assert_eq!(
            events,
            vec![StatusEvent::PoisonTick {
                source: "Blade".to_string(),
                damage: 2
            }]
        );
    }

    #[test]
    fn poison_breaks_stealth() {
        let mut dummy = Dummy::new();
        dummy.stealth.enter(5.0);
        let mut statuses = StatusEffects::default();
        statuses.apply(StatusRequest::Poison { damage: 1 }, 3.0, "Blade", &mut dummy.host());
        statuses.tick(1.0, &mut dummy.host());
        assert!(!dummy.stealth.is_stealthed());
    }

    #[test]
    fn expire_fires_once_and_skips_tick() {
        let mut dummy = Dummy::new();
        let mut statuses = StatusEffects::default();
        statuses.apply(StatusRequest::Poison { damage: 3 }, 1.0, "Blade", &mut dummy.host());
        let events = statuses.tick(1.0, &mut dummy.host());
        assert_eq!(dummy.health.current(), 20);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], StatusEvent::Expired { label: "poison", .. }));
        assert!(statuses.tick(1.0, &mut dummy.host()).is_empty());
    }

    #[test]
    fn overlapping_slows_restore_agility() {
        let mut dummy = Dummy::new();
        let mut statuses = StatusEffects::default();
        statuses.apply(StatusRequest::Slow { agility: 2 }, 2.0, "Frost", &mut dummy.host());
        statuses.apply(StatusRequest::Slow { agility: 2 }, 4.0, "Frost", &mut dummy.host());
        assert_eq!(dummy.attributes.agility, 0);

        statuses.tick(2.5, &mut dummy.host());
        assert_eq!(dummy.attributes.agility, 2);
        statuses.tick(2.5, &mut dummy.host());
        assert_eq!(dummy.attributes.agility, 3);
    }

    #[test]
    fn armor_grant_reverts_what_is_left() {
        let mut dummy = Dummy::new();
        let mut statuses = StatusEffects::default();
        statuses.apply(StatusRequest::Armor { amount: 10 }, 6.0, "Aegis", &mut dummy.host());
        dummy.armor.gain(2);
        dummy.armor.absorb(7);
        statuses.tick(6.0, &mut dummy.host());
        assert_eq!(dummy.armor.value(), 0);
    }

    #[test]
    fn clear_reverses_every_delta() {
        let mut dummy = Dummy::new();
        let mut statuses = StatusEffects::default();
        statuses.apply(
            StatusRequest::Boost {
                attribute: Attribute::Strength,
                amount: 3,
            },
            8.0,
            "Battle Cry",
            &mut dummy.host(),
        );
        statuses.apply(StatusRequest::Slow { agility: 1 }, 8.0, "Frost", &mut dummy.host());
        assert_eq!(dummy.attributes.strength, 5);
        assert_eq!(statuses.clear(&mut dummy.host()), 2);
        assert_eq!(dummy.attributes, Attributes::new(2, 3, 1));
        assert!(statuses.is_empty());
    }
}
