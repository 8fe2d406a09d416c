//! Live force-play resolution for fielded ground balls
//!
//! Every runner is raced against the ball:
//!
//! - forced runners are out when the ball strictly beats them to the base
//! - tag plays add the tag-application time, and margins inside the
//!   close-play window go to a weighted coin
//! - the defense takes the lead out it expects to get, in the fixed
//!   priority home > third > second > first, falling back to the batter
//! - after the first out, one double-play relay is tried on the next
//!   forced runner
//! - runners safe at their base may push for one more, up to the throw cap

use rand::Rng;

use super::ball_flight::{horizontal_speed_fps, BallType};
use super::config::EngineConfig;
use super::constants::{flight, geometry, timing};
use super::contact::BattedBall;
use super::probability::{chance, normalize_skill, uniform_range};
use super::runners::{
    base_states, Advancement, PlayContext, RunnerState, RunnersState, HOME_PLATE, OUTS_PER_HALF,
};
use crate::models::player::FieldPosition;

/// Static throw priority, most valuable out first.
const THROW_PRIORITY: [u8; 4] = [HOME_PLATE, 3, 2, 1];

fn fielder_spot(position: FieldPosition) -> (f64, f64) {
    match position {
        FieldPosition::Pitcher => geometry::PITCHER,
        FieldPosition::Catcher | FieldPosition::Bench => geometry::CATCHER,
        FieldPosition::FirstBase => geometry::FIRST_BASEMAN,
        FieldPosition::SecondBase => geometry::SECOND_BASEMAN,
        FieldPosition::ThirdBase => geometry::THIRD_BASEMAN,
        FieldPosition::Shortstop => geometry::SHORTSTOP,
        FieldPosition::LeftField => geometry::LEFT_FIELDER,
        FieldPosition::CenterField => geometry::CENTER_FIELDER,
        FieldPosition::RightField => geometry::RIGHT_FIELDER,
    }
}

fn base_spot(position: u8) -> (f64, f64) {
    match position {
        1 => geometry::FIRST_BASE,
        2 => geometry::SECOND_BASE,
        3 => geometry::THIRD_BASE,
        _ => geometry::HOME_PLATE,
    }
}

#[inline]
fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

pub fn runner_speed_fps(running: f64) -> f64 {
    timing::RUNNER_BASE_FPS + timing::RUNNER_SKILL_FPS * running.clamp(0.0, 10.0)
}

pub fn throw_speed_fps(arm: f64) -> f64 {
    timing::THROW_BASE_FPS + timing::THROW_SKILL_FPS * arm.clamp(0.0, 10.0)
}

/// Seconds from contact until the fielder has the ball in hand.
pub fn fielding_time(ball: &BattedBall, ctx: &PlayContext, bobbled: bool) -> f64 {
    let base = match ctx.ball_type {
        BallType::Ground => timing::FIELD_GROUND_S,
        BallType::Line => timing::FIELD_LINE_S,
        BallType::Fly | BallType::Pop => timing::FIELD_AIR_S,
    };
    let handle = base * (1.0 - timing::FIELD_SKILL_REDUCTION * normalize_skill(ctx.arm));

    let roll_speed = horizontal_speed_fps(ball) * flight::BOUNCE_RETENTION;
    let reach_ft = distance(geometry::HOME_PLATE, fielder_spot(ctx.fielder));
    let reach = if roll_speed > 0.0 {
        (reach_ft / roll_speed).min(timing::MAX_REACH_S)
    } else {
        timing::MAX_REACH_S
    };

    let penalty = if bobbled { timing::BOBBLE_PENALTY_S } else { 0.0 };
    reach + handle + penalty
}

/// Race the batter to first after an infielder drops an air ball.
///
/// Recovery time after the drop is uniform; first base is a force, so ties go
/// to the runner.
pub fn dropped_ball_retires_batter<R: Rng + ?Sized>(
    ball: &BattedBall,
    ctx: &PlayContext,
    rng: &mut R,
) -> bool {
    let recovery = uniform_range(rng, 0.0, timing::DROP_RECOVERY_MAX_S);
    let throw = distance(fielder_spot(ctx.fielder), base_spot(1)) / throw_speed_fps(ctx.arm);
    let ball_time = fielding_time(ball, ctx, false) + recovery + throw;
    let runner_time =
        timing::BATTER_START_S + timing::BASE_PATH_FT / runner_speed_fps(ball.batter.running);
    ball_time < runner_time
}

struct Race {
    states: Vec<RunnerState>,
    /// Seconds after contact each runner leaves their base
    starts: Vec<f64>,
    outs_before: u8,
    throws: u8,
    third_out_forced: Option<bool>,
}

impl Race {
    fn outs_total(&self) -> u8 {
        self.outs_before + self.states.iter().filter(|s| s.out).count() as u8
    }

    fn arrival(&self, i: usize, position: u8) -> f64 {
        let s = &self.states[i];
        let legs = f64::from(position.saturating_sub(s.origin));
        self.starts[i] + legs * timing::BASE_PATH_FT / runner_speed_fps(s.runner.running)
    }

    /// Force still on: nobody behind this runner has been retired.
    fn still_forced(&self, i: usize) -> bool {
        let s = &self.states[i];
        s.forced && !self.states.iter().any(|o| o.out && o.origin < s.origin)
    }

    fn running_to(&self, position: u8) -> Option<usize> {
        self.states
            .iter()
            .position(|s| !s.out && s.target == position && s.target > s.origin)
    }

    fn retire(&mut self, i: usize, forced: bool) {
        self.states[i].put_out();
        if self.third_out_forced.is_none() && self.outs_total() >= OUTS_PER_HALF {
            self.third_out_forced = Some(forced);
        }
    }
}

/// Tag play with the close-play coin.
fn tag_is_out<R: Rng + ?Sized>(
    ball_time: f64,
    runner_time: f64,
    config: &EngineConfig,
    rng: &mut R,
) -> bool {
    let margin = runner_time - (ball_time + config.defense.tag_application_s);
    if margin.abs() < config.defense.close_play_margin_s {
        !chance(rng, config.defense.close_play_safe_chance)
    } else {
        margin > 0.0
    }
}

/// Decide where unforced runners go before the throw.
fn break_runners<R: Rng + ?Sized>(race: &mut Race, attack: f64, rng: &mut R) {
    // Lead runner first so the base ahead is known.
    let mut third_vacated = true;
    for i in (0..race.states.len()).rev() {
        let s = race.states[i];
        if s.is_batter() {
            race.starts[i] = timing::BATTER_START_S;
            continue;
        }
        if s.forced {
            race.states[i].target = s.origin + 1;
            if s.origin == 3 {
                third_vacated = true;
            }
            continue;
        }
        race.starts[i] = timing::READ_DELAY_S;
        let spd = normalize_skill(s.runner.running);
        match s.origin {
            3 => {
                let goes = chance(rng, timing::THIRD_GOES_BASE + timing::THIRD_GOES_SPEED * spd);
                race.states[i].target = if goes { HOME_PLATE } else { 3 };
                third_vacated = goes;
            }
            2 => {
                let p = if attack > 0.0 {
                    timing::SECOND_ADVANCES_RIGHT_SIDE
                } else {
                    timing::SECOND_ADVANCES_BASE + timing::SECOND_ADVANCES_SPEED * spd
                };
                let goes = third_vacated && chance(rng, p);
                race.states[i].target = if goes { 3 } else { 2 };
            }
            _ => {}
        }
    }
}

pub fn resolve_ground_ball<R: Rng + ?Sized>(
    ball: &BattedBall,
    ctx: &PlayContext,
    bobbled: bool,
    runners: &RunnersState,
    config: &EngineConfig,
    rng: &mut R,
) -> Advancement {
    let mut states = vec![RunnerState::batter(ball.batter)];
    states.extend(base_states(runners));
    let starts = vec![0.0; states.len()];
    let mut race =
        Race { states, starts, outs_before: runners.outs, throws: 0, third_out_forced: None };

    break_runners(&mut race, ball.attack, rng);

    let only_batter_forced = runners.first.is_none();
    let fast_path = only_batter_forced && !bobbled && ctx.ball_type == BallType::Ground;
    let mut field_time = fielding_time(ball, ctx, bobbled);
    if fast_path {
        field_time *= timing::FAST_PATH_FACTOR;
    }
    let throw_fps = throw_speed_fps(ctx.arm);
    let from = fielder_spot(ctx.fielder);

    // Pick the most valuable out the defense expects to get.
    let ball_at = |position: u8| field_time + distance(from, base_spot(position)) / throw_fps;
    let mut choice = None;
    if !fast_path {
        for position in THROW_PRIORITY {
            let Some(i) = race.running_to(position) else { continue };
            let runner_time = race.arrival(i, position);
            let ball_time = ball_at(position);
            let expected_out = if race.still_forced(i) {
                ball_time < runner_time
            } else {
                ball_time + config.defense.tag_application_s < runner_time
            };
            if expected_out {
                choice = Some((i, position));
                break;
            }
        }
    }
    let (first_i, first_base) = match choice {
        Some(c) => c,
        None => (0, 1),
    };

    // First throw
    race.throws += 1;
    let mut last_base = first_base;
    let mut last_time = ball_at(first_base);
    let forced = race.still_forced(first_i);
    let runner_time = race.arrival(first_i, first_base);
    let out = if forced {
        last_time < runner_time
    } else {
        tag_is_out(last_time, runner_time, config, rng)
    };
    if out {
        race.retire(first_i, forced);
    }

    // One double-play relay, only off the first throw.
    if out && race.outs_total() < OUTS_PER_HALF && race.throws < config.rules.max_throws {
        let relay = THROW_PRIORITY.into_iter().find_map(|position| {
            race.running_to(position).filter(|&i| race.still_forced(i)).map(|i| (i, position))
        });
        if let Some((i, position)) = relay {
            race.throws += 1;
            let ball_time = last_time
                + config.defense.double_play_pivot_s
                + distance(base_spot(last_base), base_spot(position)) / throw_fps;
            if ball_time < race.arrival(i, position) {
                race.retire(i, true);
            }
            last_base = position;
            last_time = ball_time;
        }
    }

    // Extra-base attempts, lead runner first.
    let aggression = match ctx.ball_type {
        BallType::Ground => timing::AGGRESSION_GROUND,
        BallType::Line => timing::AGGRESSION_LINE,
        BallType::Fly | BallType::Pop => timing::AGGRESSION_AIR,
    };
    for i in (0..race.states.len()).rev() {
        if race.throws >= config.rules.max_throws || race.outs_total() >= OUTS_PER_HALF {
            break;
        }
        let s = race.states[i];
        if s.out || s.target >= HOME_PLATE {
            continue;
        }
        let next = s.target + 1;
        let taken = next < HOME_PLATE
            && race.states.iter().enumerate().any(|(j, o)| j != i && !o.out && o.target == next);
        if taken {
            continue;
        }
        let p = aggression
            + timing::AGGRESSION_PER_THROW * f64::from(race.throws)
            + timing::AGGRESSION_SPEED * normalize_skill(s.runner.running);
        if !chance(rng, p) {
            continue;
        }
        race.throws += 1;
        let ball_time = last_time + distance(base_spot(last_base), base_spot(next)) / throw_fps;
        let runner_time = race.arrival(i, next);
        if tag_is_out(ball_time, runner_time, config, rng) {
            race.retire(i, false);
        } else {
            race.states[i].target = next;
        }
        last_base = next;
        last_time = ball_time;
    }

    for s in race.states.iter_mut().filter(|s| !s.out) {
        let target = s.target;
        s.move_to(target);
    }

    let mut adv = Advancement::new(race.states);
    adv.throws = race.throws;
    adv.runs_nullified = race.third_out_forced == Some(true);
    adv
}
