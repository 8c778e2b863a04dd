//! Personality traits that bias the bot's scoring.

use rand::Rng;

use crate::game::{Difficulty, Temperament};

const TRAIT_MIN: f32 = 0.2;
const TRAIT_MAX: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Personality {
    pub aggressiveness: f32,
    pub efficiency: f32,
    pub adaptability: f32,
    pub combo_preference: f32,
    /// Willingness to wait out channelled cards
    pub patience: f32,
}

impl Personality {
    /// Roll every trait in range, then skew by temperament and difficulty.
    pub fn roll<R: Rng + ?Sized>(
        rng: &mut R,
        temperament: Option<Temperament>,
        difficulty: Difficulty,
    ) -> Self {
        let mut roll = || TRAIT_MIN + rng.random::<f32>() * (TRAIT_MAX - TRAIT_MIN);
        let mut personality = Self {
            aggressiveness: roll(),
            efficiency: roll(),
            adaptability: roll(),
            combo_preference: roll(),
            patience: roll(),
        };
        if let Some(temperament) = temperament {
            personality.skew(temperament);
        }
        personality.scale(difficulty.trait_scale());
        personality
    }

    fn skew(&mut self, temperament: Temperament) {
        match temperament {
            Temperament::Reckless => {
                self.aggressiveness *= 1.5;
                self.patience *= 0.5;
                self.efficiency *= 0.8;
            }
            Temperament::Calculating => {
                self.efficiency *= 1.4;
                self.patience *= 1.2;
                self.aggressiveness *= 0.9;
            }
            Temperament::Cautious => {
                self.aggressiveness *= 0.6;
                self.adaptability *= 1.2;
            }
            Temperament::Protective => {
                self.aggressiveness *= 0.7;
                self.patience *= 1.1;
            }
            Temperament::Patient => {
                self.patience *= 1.5;
                self.combo_preference *= 0.8;
            }
            Temperament::Disciplined => {
                self.efficiency *= 1.3;
                self.adaptability *= 1.1;
            }
            Temperament::Aggressive => {
                self.aggressiveness *= 1.4;
                self.combo_preference *= 1.2;
            }
        }
        self.clamp();
    }

    fn scale(&mut self, factor: f32) {
        self.aggressiveness *= factor;
        self.efficiency *= factor;
        self.adaptability *= factor;
        self.combo_preference *= factor;
        self.patience *= factor;
        self.clamp();
    }

    fn clamp(&mut self) {
        for value in [
            &mut self.aggressiveness,
            &mut self.efficiency,
            &mut self.adaptability,
            &mut self.combo_preference,
            &mut self.patience,
        ] {
            *value = value.clamp(TRAIT_MIN, TRAIT_MAX);
        }
    }

    pub fn defensiveness(&self) -> f32 {
        (1.2 - self.aggressiveness).clamp(TRAIT_MIN, TRAIT_MAX)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn traits(p: &Personality) -> [f32; 5] {
        [
            p.aggressiveness,
            p.efficiency,
            p.adaptability,
            p.combo_preference,
            p.patience,
        ]
    }

    #[test]
    fn traits_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            for _ in 0..50 {
                let p = Personality::roll(&mut rng, Some(Temperament::Reckless), difficulty);
                for value in traits(&p) {
                    assert!((TRAIT_MIN..=TRAIT_MAX).contains(&value));
                }
                assert!((TRAIT_MIN..=TRAIT_MAX).contains(&p.defensiveness()));
            }
        }
    }

    #[test]
    fn easy_is_never_sharper_than_hard() {
        let easy = Personality::roll(&mut StdRng::seed_from_u64(7), None, Difficulty::Easy);
        let hard = Personality::roll(&mut StdRng::seed_from_u64(7), None, Difficulty::Hard);
        for (e, h) in traits(&easy).into_iter().zip(traits(&hard)) {
            assert!(e <= h);
        }
    }
}
