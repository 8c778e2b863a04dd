//! Deck system - deck, hand, discard and exhaust pile management.

use rand::{Rng, seq::SliceRandom};

use super::{CardInstance, Rejection};

/// The draw pile. Cards are drawn from the end.
#[derive(Debug, Default, Clone)]
pub struct Deck {
    pub cards: Vec<CardInstance>,
}

impl Deck {
    pub fn new(cards: Vec<CardInstance>) -> Self {
        Self { cards }
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draw a card from the top of the deck.
    pub fn draw(&mut self) -> Option<CardInstance> {
        self.cards.pop()
    }

    /// Add cards to the deck (used when recycling discard pile).
    pub fn add_cards(&mut self, cards: Vec<CardInstance>) {
        self.cards.extend(cards);
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }
}

/// Cards in hand, in the order they were drawn.
#[derive(Debug, Default, Clone)]
pub struct Hand {
    pub cards: Vec<CardInstance>,
}

impl Hand {
    pub fn add_card(&mut self, card: CardInstance) {
        self.cards.push(card);
    }

    pub fn get(&self, index: usize) -> Result<&CardInstance, Rejection> {
        self.cards.get(index).ok_or(Rejection::NoSuchCard { index })
    }

    pub fn remove_card(&mut self, index: usize) -> Option<CardInstance> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    /// Remove by instance id; positions shift as cards leave the hand.
    pub fn remove_by_id(&mut self, id: u32) -> Option<CardInstance> {
        let index = self.cards.iter().position(|c| c.id == id)?;
        self.remove_card(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[derive(Debug, Default, Clone)]
pub struct DiscardPile {
    pub cards: Vec<CardInstance>,
}

impl DiscardPile {
    pub fn add_card(&mut self, card: CardInstance) {
        self.cards.push(card);
    }

    /// Take all cards from discard pile (to recycle into deck).
    pub fn take_all(&mut self) -> Vec<CardInstance> {
        std::mem::take(&mut self.cards)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Cards removed from play for the rest of the battle.
#[derive(Debug, Default, Clone)]
pub struct ExhaustPile {
    pub cards: Vec<CardInstance>,
}

impl ExhaustPile {
    pub fn add_card(&mut self, card: CardInstance) {
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// A side's four piles together.
#[derive(Debug, Default, Clone)]
pub struct CardPiles {
    pub deck: Deck,
    pub hand: Hand,
    pub discard: DiscardPile,
    pub exhausted: ExhaustPile,
    pub max_hand: usize,
}

impl CardPiles {
    pub fn new<R: Rng + ?Sized>(cards: Vec<CardInstance>, max_hand: usize, rng: &mut R) -> Self {
        let mut deck = Deck::new(cards);
        deck.shuffle(rng);
        Self {
            deck,
            max_hand,
            ..Default::default()
        }
    }

    /// Draw up to `count` cards, recycling the discard pile when the deck runs
    /// dry. Draws into a full hand are skipped. Returns the ids drawn.
    pub fn draw<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> Vec<u32> {
        let mut drawn = Vec::new();
        for _ in 0..count {
            if self.hand.len() >= self.max_hand {
                tracing::debug!(max_hand = self.max_hand, "hand full, draw skipped");
                break;
            }

            if self.deck.is_empty() && !self.discard.is_empty() {
                let recycled = self.discard.take_all();
                self.deck.add_cards(recycled);
                self.deck.shuffle(rng);
                tracing::debug!(cards = self.deck.len(), "discard pile recycled");
            }

            let Some(card) = self.deck.draw() else {
                break;
            };
            drawn.push(card.id);
            self.hand.add_card(card);
        }
        drawn
    }

    /// Send a used card to the discard pile, or out of play when it exhausts.
    pub fn retire(&mut self, mut card: CardInstance) {
        card.locked_target = None;
        if card.exhaust {
            self.exhausted.add_card(card);
        } else {
            self.discard.add_card(card);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::game::CardRegistry;

    fn cards(count: u32) -> Vec<CardInstance> {
        let registry = CardRegistry::standard();
        let template = registry.get_by_name("Strike").unwrap();
        (0..count)
            .map(|id| CardInstance::from_template(id, template))
            .collect()
    }

    #[test]
    fn draw_respects_hand_cap() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut piles = CardPiles::new(cards(10), 3, &mut rng);
        assert_eq!(piles.draw(5, &mut rng).len(), 3);
        assert_eq!(piles.hand.len(), 3);
        assert_eq!(piles.deck.len(), 7);
        assert!(piles.draw(1, &mut rng).is_empty());
    }

    #[test]
    fn empty_deck_recycles_discard() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut piles = CardPiles::new(cards(2), 5, &mut rng);
        piles.draw(2, &mut rng);
        let card = piles.hand.remove_card(0).unwrap();
        piles.retire(card);
        assert!(piles.deck.is_empty());

        assert_eq!(piles.draw(1, &mut rng).len(), 1);
        assert_eq!(piles.hand.len(), 2);
        assert!(piles.discard.is_empty());
    }

    #[test]
    fn exhaust_cards_never_return() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut piles = CardPiles::new(cards(1), 5, &mut rng);
        piles.draw(1, &mut rng);
        let mut card = piles.hand.remove_card(0).unwrap();
        card.exhaust = true;
        piles.retire(card);
        assert!(piles.draw(1, &mut rng).is_empty());
        assert_eq!(piles.exhausted.len(), 1);
    }

    #[test]
    fn same_seed_same_order() {
        let order = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut piles = CardPiles::new(cards(8), 8, &mut rng);
            piles.draw(8, &mut rng)
        };
        assert_eq!(order(9), order(9));
    }
}
