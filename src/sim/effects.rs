//! Timed power-up effects
//!
//! Each capability stores its own expiry on the simulation clock. The clock
//! only advances while playing, so pausing also pauses remaining durations.

use serde::{Deserialize, Serialize};

use super::entity::{Player, PowerUpKind};
use crate::tuning::Tuning;

/// Active power-up effects (expiry times in simulation seconds)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub shield_until: Option<f64>,
    pub speed_until: Option<f64>,
    pub multi_until: Option<f64>,
}

impl ActiveEffects {
    fn slot(&mut self, kind: PowerUpKind) -> &mut Option<f64> {
        match kind {
            PowerUpKind::Shield => &mut self.shield_until,
            PowerUpKind::Speed => &mut self.speed_until,
            PowerUpKind::Multi => &mut self.multi_until,
        }
    }

    fn expiry(&self, kind: PowerUpKind) -> Option<f64> {
        match kind {
            PowerUpKind::Shield => self.shield_until,
            PowerUpKind::Speed => self.speed_until,
            PowerUpKind::Multi => self.multi_until,
        }
    }

    /// Start (or extend) an effect until `now + duration`.
    /// Returns true if the effect was not already running.
    pub fn activate(&mut self, kind: PowerUpKind, now: f64, duration: f32) -> bool {
        let slot = self.slot(kind);
        let fresh = slot.is_none();
        *slot = Some(now + duration as f64);
        fresh
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.expiry(kind).is_some()
    }

    /// Clear every effect whose expiry has been reached, returning them
    pub fn expire(&mut self, now: f64) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for kind in PowerUpKind::ALL {
            let slot = self.slot(kind);
            if matches!(*slot, Some(until) if until <= now) {
                *slot = None;
                expired.push(kind);
            }
        }
        expired
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Switch the player capability backing a power-up on or off
pub fn apply_capability(player: &mut Player, kind: PowerUpKind, enabled: bool, tuning: &Tuning) {
    match kind {
        PowerUpKind::Shield => player.shield = enabled,
        PowerUpKind::Multi => player.multi_shot = enabled,
        PowerUpKind::Speed => {
            player.speed_boost = enabled;
            player.speed = if enabled {
                tuning.boosted_speed
            } else {
                tuning.player_speed
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Playfield;

    #[test]
    fn test_effect_expires_at_duration() {
        let mut effects = ActiveEffects::default();
        assert!(effects.activate(PowerUpKind::Shield, 0.0, 5.0));
        assert!(effects.expire(4.99).is_empty());
        assert!(effects.is_active(PowerUpKind::Shield));
        assert_eq!(effects.expire(5.0), vec![PowerUpKind::Shield]);
        assert!(!effects.is_active(PowerUpKind::Shield));
        // Only reported once
        assert!(effects.expire(6.0).is_empty());
    }

    #[test]
    fn test_reactivation_extends_expiry() {
        let mut effects = ActiveEffects::default();
        effects.activate(PowerUpKind::Multi, 0.0, 5.0);
        assert!(!effects.activate(PowerUpKind::Multi, 3.0, 5.0));
        assert!(effects.expire(5.0).is_empty());
        assert_eq!(effects.multi_until, Some(8.0));
        assert_eq!(effects.expire(8.0), vec![PowerUpKind::Multi]);
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut effects = ActiveEffects::default();
        effects.activate(PowerUpKind::Shield, 0.0, 5.0);
        effects.activate(PowerUpKind::Speed, 2.0, 5.0);
        assert_eq!(effects.expire(5.0), vec![PowerUpKind::Shield]);
        assert!(effects.is_active(PowerUpKind::Speed));
        assert_eq!(effects.expire(7.0), vec![PowerUpKind::Speed]);
    }

    #[test]
    fn test_speed_capability_restores_base_speed() {
        let tuning = Tuning::default();
        let mut player = Player::new(&Playfield::default(), tuning.player_speed);
        apply_capability(&mut player, PowerUpKind::Speed, true, &tuning);
        assert!(player.speed_boost);
        assert_eq!(player.speed, 8.0);
        apply_capability(&mut player, PowerUpKind::Speed, false, &tuning);
        assert!(!player.speed_boost);
        assert_eq!(player.speed, 5.0);
    }
}
