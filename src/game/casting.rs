//! Channelled casts. A combatant channels at most one card at a time; the
//! card resolves when the channel completes and is lost if interrupted.

use super::{Attributes, CardInstance, Rejection, Side};

/// Why a channel ended early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptReason {
    /// Struck from stealth
    Ambushed,
    /// Hit by an interrupt effect
    Interrupted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveCast {
    pub card: CardInstance,
    /// Target locked when the cast started
    pub target: Option<Side>,
    pub elapsed: f32,
    pub total: f32,
    /// Whether the caster was hidden when committing
    pub concealed_at_commit: bool,
}

impl ActiveCast {
    pub fn remaining(&self) -> f32 {
        (self.total - self.elapsed).max(0.0)
    }

    pub fn progress(&self) -> f32 {
        if self.total <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.total).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Casting {
    active: Option<ActiveCast>,
    last_interrupt: Option<InterruptReason>,
}

impl Casting {
    pub fn is_casting(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActiveCast> {
        self.active.as_ref()
    }

    pub fn last_interrupt(&self) -> Option<InterruptReason> {
        self.last_interrupt
    }

    /// Begin channelling. The duration comes from the card's base cast time
    /// reduced by spirit at this moment; later spirit changes do not matter.
    pub fn start(
        &mut self,
        card: CardInstance,
        attributes: &Attributes,
        target: Option<Side>,
        concealed_at_commit: bool,
    ) -> Result<f32, Rejection> {
        if self.active.is_some() {
            return Err(Rejection::AlreadyCasting);
        }
        let total = attributes.cast_time(card.cast_time);
        tracing::debug!(card = %card.name, total, "channel started");
        self.active = Some(ActiveCast {
            card,
            target,
            elapsed: 0.0,
            total,
            concealed_at_commit,
        });
        Ok(total)
    }

    /// Returns the finished cast once its time is up.
    pub fn advance(&mut self, dt: f32) -> Option<ActiveCast> {
        let cast = self.active.as_mut()?;
        cast.elapsed += dt.max(0.0);
        if cast.elapsed < cast.total {
            return None;
        }
        self.active.take()
    }

    /// Abandon the channel. The card is handed back so the caller can discard it.
    pub fn interrupt(&mut self, reason: InterruptReason) -> Option<CardInstance> {
        let cast = self.active.take()?;
        self.last_interrupt = Some(reason);
        tracing::debug!(card = %cast.card.name, ?reason, "channel interrupted");
        Some(cast.card)
    }
}
