//! Swing decision, contact and batted-ball generation

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::constants::{batted, swing};
use super::pitch::ThrownPitch;
use super::probability::{
    chance, clamp01, ease_out, gaussian, lerp, normalize_skill, random_sign, uniform,
    uniform_range,
};
use crate::models::player::{Player, PlayerRef};

/// A ball leaving the bat.
///
/// Angles are in degrees. `launch` is vertical (0 = flat, 90 = straight up,
/// beyond 90 = backwards); `attack` is the spray angle (0 = straightaway
/// centre, negative = left side).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BattedBall {
    pub batter: PlayerRef,
    pub velo: f64,
    pub launch: f64,
    pub attack: f64,
    pub foul: bool,
    pub homer: bool,
}

impl BattedBall {
    /// Builds a ball and derives the foul and home-run flags from its geometry.
    pub fn new(batter: PlayerRef, velo: f64, launch: f64, attack: f64) -> Self {
        let foul = is_foul(launch, attack);
        let homer = !foul && is_home_run(velo, launch);
        Self { batter, velo, launch, attack, foul, homer }
    }
}

/// Foul when it leaves backwards or outside the fair half-cone.
#[inline]
pub fn is_foul(launch: f64, attack: f64) -> bool {
    launch.abs() > batted::BEHIND_PLATE_DEG || attack.abs() > batted::FAIR_HALF_ANGLE_DEG
}

/// Launch tolerance around the optimal home-run angle for a given exit velocity.
pub fn home_run_tolerance(velo: f64) -> f64 {
    let t = (velo - batted::HR_MIN_VELO_MPH) / (batted::HR_FULL_VELO_MPH - batted::HR_MIN_VELO_MPH);
    lerp(batted::HR_TOLERANCE_MIN_DEG, batted::HR_TOLERANCE_MAX_DEG, ease_out(t))
}

pub fn is_home_run(velo: f64, launch: f64) -> bool {
    if launch <= 0.0 || launch > batted::HR_MAX_LAUNCH_DEG || velo < batted::HR_MIN_VELO_MPH {
        return false;
    }
    (launch - batted::HR_OPTIMAL_LAUNCH_DEG).abs() <= home_run_tolerance(velo)
}

/// Swing probability before noise.
pub fn swing_probability(contact: f64, is_strike: bool) -> f64 {
    if is_strike {
        swing::BASE_SWING + swing::STRIKE_SWING_PER_SKILL * contact
    } else {
        swing::BASE_SWING - swing::BALL_TAKE_MAX * ease_out(normalize_skill(contact))
    }
}

pub fn decide_swing<R: Rng + ?Sized>(batter: &Player, pitch: &ThrownPitch, rng: &mut R) -> bool {
    let p = swing_probability(batter.stats.contact, pitch.is_strike)
        + gaussian(rng, 0.0, swing::SWING_NOISE_SD);
    chance(rng, clamp01(p))
}

/// Contact roll.
///
/// The cutoff is itself a Gaussian draw compared against a uniform one; the
/// tuning downstream was calibrated against this sample-then-compare pattern.
pub fn makes_contact<R: Rng + ?Sized>(contact: f64, pitch: &ThrownPitch, rng: &mut R) -> bool {
    let skill_diff = contact - pitch.quality;
    let cutoff = if pitch.is_strike {
        gaussian(rng, skill_diff + swing::STRIKE_CONTACT_OFFSET, swing::STRIKE_CONTACT_SD)
    } else {
        gaussian(rng, skill_diff + swing::BALL_CONTACT_OFFSET, swing::BALL_CONTACT_SD)
    };
    uniform(rng) < cutoff
}

pub fn sample_launch_angle<R: Rng + ?Sized>(contact: f64, rng: &mut R) -> f64 {
    let focus = normalize_skill(contact);
    let sweet_weight = lerp(batted::SWEET_WEIGHT_MIN, batted::SWEET_WEIGHT_MAX, focus);

    let launch = if uniform(rng) < sweet_weight {
        let sd = lerp(batted::SWEET_SD_MAX, batted::SWEET_SD_MIN, focus);
        gaussian(rng, batted::SWEET_SPOT_DEG, sd)
    } else {
        let t = focus * batted::BROAD_BLEND;
        let wild = uniform_range(rng, batted::LAUNCH_MIN_DEG, batted::LAUNCH_MAX_DEG);
        let broad = gaussian(rng, batted::SWEET_SPOT_DEG, batted::BROAD_SD);
        wild * (1.0 - t) + broad * t
    };
    launch.clamp(batted::LAUNCH_MIN_DEG, batted::LAUNCH_MAX_DEG)
}

pub fn sample_spray_angle<R: Rng + ?Sized>(contact: f64, rng: &mut R) -> f64 {
    let focus = normalize_skill(contact);
    let center_weight = lerp(batted::CENTER_WEIGHT_MIN, batted::CENTER_WEIGHT_MAX, focus);

    let attack = if uniform(rng) < center_weight {
        let sd = lerp(batted::CENTER_SD_MAX, batted::CENTER_SD_MIN, focus);
        let raw = gaussian(rng, 0.0, sd);
        // Better hitters keep overshoot close to the fair line.
        let overshoot = raw.abs() - batted::FAIR_HALF_ANGLE_DEG;
        if overshoot > 0.0 {
            let kept = overshoot * (1.0 - batted::FAIR_PULL_MAX * focus);
            raw.signum() * (batted::FAIR_HALF_ANGLE_DEG + kept)
        } else {
            raw
        }
    } else {
        random_sign(rng) * gaussian(rng, batted::FOUL_LEAN_MEAN_DEG, batted::FOUL_LEAN_SD)
    };
    attack.clamp(batted::SPRAY_MIN_DEG, batted::SPRAY_MAX_DEG)
}

pub fn sample_exit_velocity<R: Rng + ?Sized>(power: f64, rng: &mut R) -> f64 {
    let base = batted::VELO_SCALE * (2.0 * power + 1.0).cbrt() + batted::VELO_OFFSET;
    let noise = gaussian(rng, 0.0, batted::VELO_NOISE_SD)
        .clamp(-batted::VELO_NOISE_CAP, batted::VELO_NOISE_CAP);
    base * (1.0 + noise)
}

/// Full swing resolution: `None` for a whiff, otherwise the batted ball.
pub fn resolve_swing<R: Rng + ?Sized>(
    batter: &Player,
    pitch: &ThrownPitch,
    rng: &mut R,
) -> Option<BattedBall> {
    if !makes_contact(batter.stats.contact, pitch, rng) {
        return None;
    }

    let launch = sample_launch_angle(batter.stats.contact, rng);
    let attack = sample_spray_angle(batter.stats.contact, rng);
    let velo = sample_exit_velocity(batter.stats.power, rng);
    Some(BattedBall::new(batter.to_ref(), velo, launch, attack))
}
