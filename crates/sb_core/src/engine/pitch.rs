//! Pitch generation
//!
//! A pitch is a strike/ball call plus a scalar quality. No sequencing or
//! fatigue: each pitch is drawn independently from the pitcher's skill.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::constants::pitch;
use super::probability::{chance, clamp01, gaussian, normalize_skill};
use crate::models::player::{Player, PlayerId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ThrownPitch {
    pub pitcher: PlayerId,
    pub is_strike: bool,
    /// Roughly twice the pitcher's skill; higher is harder to hit.
    pub quality: f64,
}

/// Chance the pitch lands in the zone, before noise.
#[inline]
pub fn strike_probability(pitching: f64) -> f64 {
    let u = normalize_skill(pitching);
    pitch::STRIKE_BASE + pitch::STRIKE_LINEAR * u + pitch::STRIKE_QUADRATIC * u * u
}

pub fn simulate_pitch<R: Rng + ?Sized>(pitcher: &Player, rng: &mut R) -> ThrownPitch {
    let skill = pitcher.stats.pitching;
    let p_strike =
        clamp01(strike_probability(skill) + gaussian(rng, 0.0, pitch::STRIKE_NOISE_SD));
    let is_strike = chance(rng, p_strike);
    let quality = gaussian(rng, skill, pitch::QUALITY_SD) + skill;

    ThrownPitch { pitcher: pitcher.id, is_strike, quality }
}
