//! Combatants and the per-side state the battle owns around them.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    Attributes, CardInstance, CardPiles, Casting, CharacterClass, ClassTemplate, Energy,
    GameConfig, Health, HeroSkill, SetupError, SideSetup, StatMultipliers, Stealth, StatusEffects,
    StatusEvent, StatusHost, StatusRequest,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player, Side::Opponent];

    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }
}

/// Flat damage mitigation, drained before health.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    value: i32,
}

impl Armor {
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Returns the armor actually added.
    pub fn gain(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0);
        self.value += amount;
        amount
    }

    /// Soak up to `amount` of an incoming hit. Returns what was absorbed.
    pub fn absorb(&mut self, amount: i32) -> i32 {
        let absorbed = amount.max(0).min(self.value);
        self.value -= absorbed;
        absorbed
    }

    /// Take back a timed grant; whatever was already absorbed stays gone.
    pub fn remove_up_to(&mut self, amount: i32) -> i32 {
        self.absorb(amount)
    }
}

/// A character in battle: pools, attributes and its own state machines.
#[derive(Debug, Clone)]
pub struct Combatant {
    pub name: String,
    pub class: CharacterClass,
    pub health: Health,
    pub energy: Energy,
    pub attributes: Attributes,
    pub statuses: StatusEffects,
    pub stealth: Stealth,
    pub casting: Casting,
    /// One-shot flag granted by a hero skill
    pub next_spell_double: bool,
}

fn scale(value: i32, multiplier: f32) -> i32 {
    (value as f32 * multiplier).round() as i32
}

impl Combatant {
    pub fn from_template(
        name: impl Into<String>,
        template: &ClassTemplate,
        multipliers: &StatMultipliers,
        energy_cost_reduction: i32,
        max_stealth_duration: f32,
    ) -> Self {
        let max_energy = scale(template.max_energy, multipliers.energy).max(1);
        let mut energy = Energy::new(
            scale(template.initial_energy, multipliers.energy),
            max_energy,
            template.energy_regen_rate,
        );
        energy.cost_reduction = energy_cost_reduction.max(0);
        Self {
            name: name.into(),
            class: template.class,
            health: Health::new(
                scale(template.max_health, multipliers.health).max(1),
                template.health_regen_rate,
            ),
            energy,
            attributes: Attributes::new(
                scale(template.strength, multipliers.strength),
                scale(template.agility, multipliers.agility),
                scale(template.spirit, multipliers.spirit),
            ),
            statuses: StatusEffects::default(),
            stealth: Stealth::new(max_stealth_duration),
            casting: Casting::default(),
            next_spell_double: false,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health.is_dead()
    }
}

/// What an incoming hit did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hit {
    pub absorbed: i32,
    pub taken: i32,
    /// The hit broke the receiver's stealth
    pub revealed: bool,
}

/// One side of the battle: the combatant plus armor, cards, hero skill and
/// draw timer.
#[derive(Debug, Clone)]
pub struct Fighter {
    pub combatant: Combatant,
    pub armor: Armor,
    pub piles: CardPiles,
    pub hero: HeroSkill,
    /// Time accumulated towards the next draw
    pub draw_clock: f32,
}

impl Fighter {
    /// Build a side from its setup: scaled stats, a shuffled deck of the
    /// class's cards and an opening hand.
    pub fn new<R: Rng + ?Sized>(
        setup: &SideSetup,
        config: &GameConfig,
        next_card_id: &mut u32,
        rng: &mut R,
    ) -> Result<Self, SetupError> {
        let template = config
            .class(setup.class)
            .ok_or(SetupError::MissingClass(setup.class))?;
        let skill = config
            .hero_skill(setup.class)
            .ok_or(SetupError::MissingHeroSkill(setup.class))?;
        let (multipliers, reduction) = setup
            .profile
            .as_ref()
            .map(|p| (p.stat_multipliers, p.energy_cost_reduction))
            .unwrap_or_default();

        let rules = &config.rules;
        let mut cards = Vec::new();
        for card in config.cards.for_class(setup.class) {
            for _ in 0..rules.deck_copies {
                cards.push(CardInstance::from_template(*next_card_id, card));
                *next_card_id += 1;
            }
        }
        if cards.is_empty() {
            return Err(SetupError::EmptyDeck(setup.class));
        }
        let mut piles = CardPiles::new(cards, rules.max_hand, rng);
        piles.draw(rules.initial_hand, rng);

        Ok(Self {
            combatant: Combatant::from_template(
                setup.name.clone(),
                template,
                &multipliers,
                reduction,
                rules.max_stealth_duration,
            ),
            armor: Armor::default(),
            piles,
            hero: HeroSkill::from_template(skill),
            draw_clock: 0.0,
        })
    }

    pub fn is_defeated(&self) -> bool {
        self.combatant.is_defeated()
    }

    /// Armor soaks first, the rest reaches health. Any positive hit reveals
    /// the receiver, even one armor fully absorbed.
    pub fn receive_hit(&mut self, amount: i32) -> Hit {
        if amount <= 0 || self.is_defeated() {
            return Hit::default();
        }
        let absorbed = self.armor.absorb(amount);
        let taken = self.combatant.health.take_damage(amount - absorbed);
        let revealed = self.combatant.stealth.on_take_damage(amount);
        Hit {
            absorbed,
            taken,
            revealed,
        }
    }

    /// Lend the status list together with the parts its hooks mutate.
    fn with_statuses<T>(
        &mut self,
        f: impl FnOnce(&mut StatusEffects, &mut StatusHost<'_>) -> T,
    ) -> T {
        let Fighter {
            combatant, armor, ..
        } = self;
        let Combatant {
            health,
            attributes,
            stealth,
            statuses,
            ..
        } = combatant;
        let mut host = StatusHost {
            health,
            attributes,
            stealth,
            armor,
        };
        f(statuses, &mut host)
    }

    pub fn apply_status(&mut self, request: StatusRequest, duration: f32, source: &str) {
        self.with_statuses(|statuses, host| statuses.apply(request, duration, source, host));
    }

    pub fn tick_statuses(&mut self, dt: f32) -> Vec<StatusEvent> {
        self.with_statuses(|statuses, host| statuses.tick(dt, host))
    }

    /// Strip every effect, reversing what each one applied.
    pub fn clear_statuses(&mut self) -> usize {
        self.with_statuses(|statuses, host| statuses.clear(host))
    }

    /// Seconds between draws at the current agility.
    pub fn draw_interval(&self, base: f32) -> f32 {
        self.combatant.attributes.draw_interval(base)
    }
}

/// Both sides, indexed by [`Side`].
#[derive(Debug, Clone)]
pub struct Fighters(pub [Fighter; 2]);

impl Fighters {
    pub fn get(&self, side: Side) -> &Fighter {
        &self.0[side.index()]
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Fighter {
        &mut self.0[side.index()]
    }

    /// The acting side and its opponent, borrowed together.
    pub fn pair_mut(&mut self, actor: Side) -> (&mut Fighter, &mut Fighter) {
        let [player, opponent] = &mut self.0;
        match actor {
            Side::Player => (player, opponent),
            Side::Opponent => (opponent, player),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn fighter(class: CharacterClass) -> Fighter {
        let mut rng = StdRng::seed_from_u64(5);
        Fighter::new(
            &SideSetup::bot("Test", class),
            &GameConfig::standard(),
            &mut 0,
            &mut rng,
        )
        .unwrap()
    }

    #[test]
    fn new_fighter_holds_opening_hand() {
        let config = GameConfig::standard();
        let fighter = fighter(CharacterClass::Rogue);
        let class_cards = config.cards.for_class(CharacterClass::Rogue).count();
        assert_eq!(fighter.piles.hand.len(), config.rules.initial_hand);
        assert_eq!(
            fighter.piles.hand.len() + fighter.piles.deck.len(),
            class_cards * config.rules.deck_copies
        );
    }

    #[test]
    fn armor_absorbs_before_health() {
        let mut fighter = fighter(CharacterClass::Warrior);
        fighter.armor.gain(4);
        let hit = fighter.receive_hit(6);
        assert_eq!(hit.absorbed, 4);
        assert_eq!(hit.taken, 2);
        assert_eq!(fighter.combatant.health.current(), 38);
        assert_eq!(fighter.armor.value(), 0);
    }

    #[test]
    fn absorbed_hit_still_reveals() {
        let mut fighter = fighter(CharacterClass::Rogue);
        fighter.armor.gain(10);
        fighter.combatant.stealth.enter(4.0);
        let hit = fighter.receive_hit(3);
        assert_eq!(hit.taken, 0);
        assert!(hit.revealed);
        assert!(!fighter.combatant.stealth.is_stealthed());
    }

    #[test]
    fn multipliers_scale_pools() {
        let config = GameConfig::standard();
        let template = config.class(CharacterClass::Mage).unwrap();
        let multipliers = StatMultipliers {
            health: 1.5,
            spirit: 2.0,
            ..Default::default()
        };
        let mage = Combatant::from_template("Boss", template, &multipliers, 1, 8.0);
        assert_eq!(mage.health.max(), 45);
        assert_eq!(mage.attributes.spirit, 6);
        assert_eq!(mage.energy.cost_reduction, 1);
    }

    #[test]
    fn pair_mut_orders_actor_first() {
        let mut fighters = Fighters([
            fighter(CharacterClass::Warrior),
            fighter(CharacterClass::Mage),
        ]);
        let (actor, target) = fighters.pair_mut(Side::Opponent);
        assert_eq!(actor.combatant.class, CharacterClass::Mage);
        assert_eq!(target.combatant.class, CharacterClass::Warrior);
    }
}
