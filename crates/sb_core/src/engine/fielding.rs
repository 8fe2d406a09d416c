//! Catch, clean-fielding and hit-classification models
//!
//! ## Catch probability
//!
//! | Ball | Curve over hang time | Position multiplier |
//! |------|----------------------|---------------------|
//! | POP | logistic(1.2 s, 0.4) | outfield ×0.8 |
//! | FLY | logistic(1.8 s, 0.5) | outfield ×0.8 |
//! | LINE | 0.5 × logistic(0.6 s, 0.18) | infield ×0.5 |
//! | GROUND | never caught | |
//!
//! All of it is scaled by `0.55 + 0.65·(skill/10)^0.8`.
//!
//! Errors are a subset of failed clean-fielding attempts and change only the
//! scoring, never where the ball goes.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball_flight::BallType;
use super::constants::{catching, hits};
use super::contact::BattedBall;
use super::probability::{chance, clamp01, logistic, normalize_skill, uniform};
use super::runners::Base;
use crate::models::player::FieldPosition;

/// Fielding skill expressed as a catch multiplier (0.55 at skill 0, 1.2 at 10).
pub fn skill_factor(skill: f64) -> f64 {
    let curve = normalize_skill(skill).powf(catching::SKILL_EXPONENT);
    catching::SKILL_BASE + catching::SKILL_RANGE * curve
}

/// Raw catchability from hang time alone.
pub fn hang_time_curve(ball_type: BallType, hang_time: f64) -> f64 {
    match ball_type {
        BallType::Ground => 0.0,
        BallType::Line => {
            catching::LINE_WEIGHT
                * logistic(hang_time, catching::LINE_CENTER_S, catching::LINE_SCALE_S)
        }
        BallType::Fly => logistic(hang_time, catching::FLY_CENTER_S, catching::FLY_SCALE_S),
        BallType::Pop => logistic(hang_time, catching::POP_CENTER_S, catching::POP_SCALE_S),
    }
}

pub fn catch_probability(
    ball: &BattedBall,
    position: FieldPosition,
    skill: f64,
    ball_type: BallType,
    hang_time: f64,
) -> f64 {
    if ball.homer || ball_type == BallType::Ground {
        return 0.0;
    }

    let mut p = hang_time_curve(ball_type, hang_time);

    if position.is_outfield() && matches!(ball_type, BallType::Fly | BallType::Pop) {
        p *= catching::OUTFIELD_AIR_MULT;
    }
    if !position.is_outfield() && ball_type == BallType::Line {
        p *= catching::INFIELD_LINE_MULT;
    }

    p *= skill_factor(skill);

    if ball_type == BallType::Line && ball.velo > catching::HARD_LINER_MPH {
        let penalty = ((ball.velo - catching::HARD_LINER_MPH) / catching::HARD_LINER_SPAN_MPH
            * catching::HARD_LINER_MAX_PENALTY)
            .min(catching::HARD_LINER_MAX_PENALTY);
        p *= 1.0 - penalty;
    }

    p.clamp(0.0, catching::MAX_CATCH)
}

pub fn field_cleanly_probability(
    ball: &BattedBall,
    position: FieldPosition,
    skill: f64,
    ball_type: BallType,
) -> f64 {
    let skill_term = normalize_skill(skill).powf(catching::SKILL_EXPONENT);
    let p = if ball_type == BallType::Ground {
        let base = if position.is_outfield() {
            catching::GROUND_BASE_OUTFIELD
        } else {
            catching::GROUND_BASE_INFIELD
        };
        let hard =
            clamp01((ball.velo - catching::GROUND_HARD_MPH) / catching::GROUND_HARD_SPAN_MPH);
        base - catching::GROUND_HARD_PENALTY * hard + catching::GROUND_SKILL_BONUS * skill_term
    } else {
        let hard = clamp01((ball.velo - catching::AIR_HARD_MPH) / catching::AIR_HARD_SPAN_MPH);
        catching::AIR_CLEAN_BASE - catching::AIR_HARD_PENALTY * hard
            + catching::AIR_SKILL_BONUS * skill_term
    };
    p.clamp(catching::CLEAN_MIN, catching::CLEAN_MAX)
}

/// Share of failed clean-fielding attempts charged as errors.
pub fn error_probability(skill: f64) -> f64 {
    catching::ERROR_SHARE * (1.0 - catching::ERROR_SKILL_REDUCTION * normalize_skill(skill))
}

/// Chance an infielder keeps a bobbled grounder in front of them.
pub fn bobble_keep_probability(skill: f64) -> f64 {
    catching::BOBBLE_KEEP_BASE + catching::BOBBLE_KEEP_SKILL * normalize_skill(skill)
}

pub fn attempt_catch<R: Rng + ?Sized>(
    ball: &BattedBall,
    position: FieldPosition,
    skill: f64,
    ball_type: BallType,
    hang_time: f64,
    rng: &mut R,
) -> bool {
    chance(rng, catch_probability(ball, position, skill, ball_type, hang_time))
}

/// How a missed clean-fielding attempt is scored.
pub fn is_charged_error<R: Rng + ?Sized>(skill: f64, rng: &mut R) -> bool {
    chance(rng, error_probability(skill))
}

/// 1.0 when the ball splits the outfielders (±22.5°), falling to 0 at the
/// lines and dead centre.
pub fn gap_factor(attack: f64) -> f64 {
    clamp01(1.0 - (attack.abs() - hits::GAP_ANGLE_DEG).abs() / hits::GAP_ANGLE_DEG)
}

/// Bases awarded on a ball that was not turned into an out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BaseHit {
    pub bases: u8,
    /// The extra base came on a fielding error, not the hit itself.
    pub extra_base_error: bool,
}

/// Single, double or triple for a ball that fell in or got through.
///
/// `throw_target` is where the outfield is set to throw; when it is second
/// base the defense plays the batter conservatively and extra bases are
/// harder to take.
pub fn choose_base_hit_outcome<R: Rng + ?Sized>(
    ball: &BattedBall,
    position: FieldPosition,
    skill: f64,
    throw_target: Base,
    rng: &mut R,
) -> BaseHit {
    let speed = normalize_skill(ball.batter.running);

    if !position.is_outfield() {
        let p = hits::INFIELD_EXTRA_BASE_BASE + hits::INFIELD_EXTRA_BASE_SPEED * speed;
        let extra = chance(rng, p);
        return BaseHit { bases: if extra { 2 } else { 1 }, extra_base_error: extra };
    }

    let skill = normalize_skill(skill);
    let gap = gap_factor(ball.attack);
    let velo = clamp01((ball.velo - hits::VELO_FLOOR_MPH) / hits::VELO_SPAN_MPH);
    let angle = clamp01(1.0 - (ball.launch - hits::ANGLE_PEAK_DEG).abs() / hits::ANGLE_SPAN_DEG);

    let mut p_double = (hits::DOUBLE_BASE
        + hits::DOUBLE_VELO * velo
        + hits::DOUBLE_GAP * gap
        + hits::DOUBLE_ANGLE * angle)
        * (1.0 - hits::DOUBLE_SKILL_DAMPING * skill);
    let mut p_triple = (hits::TRIPLE_BASE
        + hits::TRIPLE_VELO_GAP * velo * gap
        + hits::TRIPLE_SPEED * speed)
        * (1.0 - hits::TRIPLE_SKILL_DAMPING * skill);

    if throw_target == Base::Second {
        p_double *= hits::THROW_TO_SECOND_DISCIPLINE;
        p_triple *= hits::THROW_TO_SECOND_DISCIPLINE;
    }

    let roll = uniform(rng);
    let bases = if roll < p_triple {
        3
    } else if roll < p_triple + p_double {
        2
    } else {
        1
    };
    BaseHit { bases, extra_base_error: false }
}
