//! Ball-in-play resolution
//!
//! `simulate_fielding` is the single entry point from a batted ball to a
//! [`PlayResult`]. It decides who fields the ball and whether it is caught,
//! fielded, or gets through, then hands off to the matching runner branch.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ball_flight::{air_time, classify, BallType};
use super::config::EngineConfig;
use super::contact::BattedBall;
use super::drop_zone::{estimate_drop_zone, outfield_zone};
use super::fielding::{
    attempt_catch, bobble_keep_probability, choose_base_hit_outcome, field_cleanly_probability,
    is_charged_error,
};
use super::force_play::{dropped_ball_retires_batter, resolve_ground_ball};
use super::probability::chance;
use super::runners::{
    resolve_caught, resolve_home_run, resolve_infield_hit, resolve_outfield_hit, Advancement,
    PlayContext, RunnerAdvance, RunnersState,
};
use super::strategy::doctrine_target;
use crate::error::Result;
use crate::models::player::{FieldPosition, PlayerRef};
use crate::models::team::Team;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayType {
    Single,
    Double,
    Triple,
    HomeRun,
    Out,
    DoublePlay,
    TriplePlay,
    /// Batter safe while another runner is retired
    FieldersChoice,
    /// Dead ball, nothing changes
    FoulBall,
}

impl PlayType {
    pub fn from_hit_bases(bases: u8) -> Self {
        match bases {
            0 | 1 => PlayType::Single,
            2 => PlayType::Double,
            3 => PlayType::Triple,
            _ => PlayType::HomeRun,
        }
    }

    pub fn is_hit(self) -> bool {
        matches!(self, PlayType::Single | PlayType::Double | PlayType::Triple | PlayType::HomeRun)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayResult {
    pub play_type: PlayType,
    pub ball_type: BallType,
    /// Who ended up with the ball; `Bench` for unplayable fouls
    pub fielder: FieldPosition,
    /// Everyone who touched the ball, in order
    pub fielders_involved: Vec<FieldPosition>,
    pub outs: u8,
    pub runs: u8,
    /// Bases reached by the batter; 0 when out, 4 on a home run
    pub batter_bases: u8,
    pub batter_out: bool,
    pub is_hit: bool,
    pub is_error: bool,
    pub runner_advances: Vec<RunnerAdvance>,
    pub runners_out: Vec<PlayerRef>,
    pub scorers: Vec<PlayerRef>,
    pub throws: u8,
    pub bases_after: RunnersState,
}

impl PlayResult {
    fn foul(ball_type: BallType, fielder: FieldPosition, runners: &RunnersState) -> Self {
        Self {
            play_type: PlayType::FoulBall,
            ball_type,
            fielder,
            fielders_involved: if fielder == FieldPosition::Bench {
                Vec::new()
            } else {
                vec![fielder]
            },
            outs: 0,
            runs: 0,
            batter_bases: 0,
            batter_out: false,
            is_hit: false,
            is_error: false,
            runner_advances: Vec::new(),
            runners_out: Vec::new(),
            scorers: Vec::new(),
            throws: 0,
            bases_after: *runners,
        }
    }

    fn from_advancement(
        adv: &Advancement,
        ball_type: BallType,
        fielders_involved: Vec<FieldPosition>,
        hit: Option<PlayType>,
        is_error: bool,
        runners: &RunnersState,
    ) -> Self {
        let outs = adv.outs();
        let batter_out = adv.batter_out();
        let play_type = match (outs, hit) {
            (_, Some(PlayType::HomeRun)) => PlayType::HomeRun,
            (3, _) => PlayType::TriplePlay,
            (2, _) => PlayType::DoublePlay,
            (1, _) if batter_out => PlayType::Out,
            (1, _) if hit.is_none() => PlayType::FieldersChoice,
            (_, Some(hit)) => hit,
            (_, None) => PlayType::from_hit_bases(adv.batter_bases()),
        };
        let is_hit = hit.is_some() && !is_error && !batter_out;
        let scorers = adv.scorers();
        Self {
            play_type,
            ball_type,
            fielder: fielders_involved.last().copied().unwrap_or(FieldPosition::Bench),
            fielders_involved,
            outs,
            runs: scorers.len() as u8,
            batter_bases: adv.batter_bases(),
            batter_out,
            is_hit,
            is_error,
            runner_advances: adv.runner_advances(),
            runners_out: adv.runners_out(),
            scorers,
            throws: adv.throws,
            bases_after: adv.bases_after(runners.outs),
        }
    }
}

/// Resolve a batted ball against a defense with the default rules.
pub fn simulate_fielding<R: Rng + ?Sized>(
    ball: &BattedBall,
    fielding_team: &Team,
    runners: &RunnersState,
    rng: &mut R,
) -> Result<PlayResult> {
    simulate_fielding_with(ball, fielding_team, runners, &EngineConfig::default(), rng)
}

pub fn simulate_fielding_with<R: Rng + ?Sized>(
    ball: &BattedBall,
    fielding_team: &Team,
    runners: &RunnersState,
    config: &EngineConfig,
    rng: &mut R,
) -> Result<PlayResult> {
    let ball_type = classify(ball);
    let hang_time = air_time(ball);
    let batter = ball.batter;

    if ball.homer {
        let adv = resolve_home_run(batter, runners);
        let result = PlayResult::from_advancement(
            &adv,
            ball_type,
            Vec::new(),
            Some(PlayType::HomeRun),
            false,
            runners,
        );
        debug!(runs = result.runs, "home run");
        return Ok(result);
    }

    let zone = estimate_drop_zone(ball);
    if zone == FieldPosition::Bench {
        return Ok(PlayResult::foul(ball_type, zone, runners));
    }

    let fielder = fielding_team.fielder_at(zone)?;
    let skill = fielder.stats.fielding;
    let ctx = PlayContext { fielder: zone, arm: skill, ball_type, hang_time, attack: ball.attack };

    // Foul pops are either caught or dead.
    if ball.foul {
        if attempt_catch(ball, zone, skill, ball_type, hang_time, rng) {
            let adv = resolve_caught(&ctx, batter, runners, rng);
            let zones = vec![zone];
            return Ok(PlayResult::from_advancement(&adv, ball_type, zones, None, false, runners));
        }
        return Ok(PlayResult::foul(ball_type, zone, runners));
    }

    let result = if ball_type.is_airborne() {
        resolve_air_ball(ball, &ctx, skill, runners, config, rng)
    } else {
        resolve_grounder(ball, &ctx, fielding_team, runners, config, rng)?
    };

    debug!(
        play = ?result.play_type,
        fielder = %result.fielder,
        outs = result.outs,
        runs = result.runs,
        error = result.is_error,
        "ball in play resolved"
    );
    Ok(result)
}

fn resolve_air_ball<R: Rng + ?Sized>(
    ball: &BattedBall,
    ctx: &PlayContext,
    skill: f64,
    runners: &RunnersState,
    config: &EngineConfig,
    rng: &mut R,
) -> PlayResult {
    let zone = ctx.fielder;
    if attempt_catch(ball, zone, skill, ctx.ball_type, ctx.hang_time, rng) {
        let adv = resolve_caught(ctx, ball.batter, runners, rng);
        return PlayResult::from_advancement(&adv, ctx.ball_type, vec![zone], None, false, runners);
    }

    // Fell in. A bad pick-up after the drop is scored as an error.
    let clean = chance(rng, field_cleanly_probability(ball, zone, skill, ctx.ball_type));
    let is_error = !clean && is_charged_error(skill, rng);
    award_hit(ball, ctx, skill, runners, config, is_error, vec![zone], rng)
}

fn resolve_grounder<R: Rng + ?Sized>(
    ball: &BattedBall,
    ctx: &PlayContext,
    fielding_team: &Team,
    runners: &RunnersState,
    config: &EngineConfig,
    rng: &mut R,
) -> Result<PlayResult> {
    let zone = ctx.fielder;
    let skill = ctx.arm;

    let clean = chance(rng, field_cleanly_probability(ball, zone, skill, ctx.ball_type));
    if clean || (!zone.is_outfield() && chance(rng, bobble_keep_probability(skill))) {
        let adv = resolve_ground_ball(ball, ctx, !clean, runners, config, rng);
        let safe_all_around = !adv.batter_out() && adv.outs() == 0;
        // Beating a clean play is an infield single; beating a bobble is an error.
        let hit = (safe_all_around && clean).then_some(PlayType::Single);
        let is_error = safe_all_around && !clean;
        let zones = vec![zone];
        return Ok(PlayResult::from_advancement(&adv, ctx.ball_type, zones, hit, is_error, runners));
    }

    // Through the infield to an outfielder.
    let is_error = is_charged_error(skill, rng);
    let outfield = if zone.is_outfield() { zone } else { outfield_zone(ball.attack) };
    let outfielder = fielding_team.fielder_at(outfield)?;
    let through = PlayContext { fielder: outfield, arm: outfielder.stats.fielding, ..*ctx };
    let mut involved = vec![zone];
    if outfield != zone {
        involved.push(outfield);
    }
    Ok(award_hit(ball, &through, through.arm, runners, config, is_error, involved, rng))
}

fn award_hit<R: Rng + ?Sized>(
    ball: &BattedBall,
    ctx: &PlayContext,
    skill: f64,
    runners: &RunnersState,
    config: &EngineConfig,
    is_error: bool,
    involved: Vec<FieldPosition>,
    rng: &mut R,
) -> PlayResult {
    let target = doctrine_target(runners);
    let hit = choose_base_hit_outcome(ball, ctx.fielder, skill, target, rng);
    let is_error = is_error || hit.extra_base_error;

    let adv = if ctx.fielder.is_outfield() {
        resolve_outfield_hit(ctx, ball.batter, hit.bases, runners, &config.defense, rng)
    } else {
        let retired = !is_error && hit.bases == 1 && dropped_ball_retires_batter(ball, ctx, rng);
        resolve_infield_hit(ball.batter, hit.bases, retired, runners, rng)
    };
    let play = PlayType::from_hit_bases(hit.bases);
    PlayResult::from_advancement(&adv, ctx.ball_type, involved, Some(play), is_error, runners)
}
