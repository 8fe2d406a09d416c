//! Drop-zone estimator
//!
//! Deterministic piecewise mapping from a batted ball to the fielder who plays
//! it. Fouls that nobody can reach map to `Bench`.
//!
//! | Step | Case | Result |
//! |------|------|--------|
//! | 1 | foul | C / 1B / 3B if reachable, else Bench |
//! | 2 | grounder | P for soft comebackers, else 3B / SS / 2B / 1B by spray |
//! | 3 | air ball inside 35 ft | C for straight-up pops |
//! | 4 | everything else | infield or outfield by the 95 ft boundary |

use super::ball_flight::{horizontal_range, horizontal_speed_fps};
use super::constants::{flight, zone};
use super::contact::BattedBall;
use crate::models::player::FieldPosition;

#[inline]
fn is_straight_up(launch: f64) -> bool {
    (zone::STRAIGHT_UP_MIN_DEG..=zone::STRAIGHT_UP_MAX_DEG).contains(&launch)
}

pub fn estimate_drop_zone(ball: &BattedBall) -> FieldPosition {
    let range = horizontal_range(ball);

    if ball.foul {
        return foul_zone(ball, range);
    }

    if ball.launch < flight::GROUND_MAX_DEG {
        return ground_zone(ball, range);
    }

    if range <= zone::CATCHER_RING_FT && is_straight_up(ball.launch) {
        return FieldPosition::Catcher;
    }

    if plays_as_infield(ball.launch, range) {
        infield_zone(ball.attack)
    } else {
        outfield_zone(ball.attack)
    }
}

fn foul_zone(ball: &BattedBall, range: f64) -> FieldPosition {
    if ball.launch < zone::FOUL_MIN_LAUNCH_DEG || range > zone::FOUL_MAX_RANGE_FT {
        return FieldPosition::Bench;
    }
    if range <= zone::CATCHER_RANGE_FT && is_straight_up(ball.launch) {
        return FieldPosition::Catcher;
    }
    if ball.attack < 0.0 {
        FieldPosition::ThirdBase
    } else {
        FieldPosition::FirstBase
    }
}

fn ground_zone(ball: &BattedBall, air_travel: f64) -> FieldPosition {
    if comebacker_to_pitcher(ball, air_travel) {
        return FieldPosition::Pitcher;
    }
    let a = ball.attack;
    if a < zone::GROUND_THIRD_DEG {
        FieldPosition::ThirdBase
    } else if a < zone::GROUND_SHORT_DEG {
        FieldPosition::Shortstop
    } else if a <= zone::GROUND_SECOND_DEG {
        // Up the middle: whichever middle infielder is on that side
        if a < 0.0 {
            FieldPosition::Shortstop
        } else {
            FieldPosition::SecondBase
        }
    } else if a <= zone::GROUND_FIRST_DEG {
        FieldPosition::SecondBase
    } else {
        FieldPosition::FirstBase
    }
}

/// Soft, central grounder that bounces before the mound and still gives the
/// pitcher time to react.
fn comebacker_to_pitcher(ball: &BattedBall, air_travel: f64) -> bool {
    if air_travel >= zone::PITCHER_PLANE_FT
        || air_travel > zone::PITCHER_MAX_TRAVEL_FT
        || ball.attack.abs() > zone::PITCHER_CONE_DEG
    {
        return false;
    }
    let ground_speed = horizontal_speed_fps(ball) * flight::BOUNCE_RETENTION;
    if ground_speed <= 0.0 {
        // Dead ball in front of the plate, nothing to react to.
        return true;
    }
    let time_to_plane = (zone::PITCHER_PLANE_FT - air_travel) / ground_speed;
    time_to_plane > zone::PITCHER_REACTION_S
}

/// Infield/outfield split with a hysteresis band around the boundary.
fn plays_as_infield(launch: f64, range: f64) -> bool {
    let inner = zone::INFIELD_BOUNDARY_FT - zone::BOUNDARY_BAND_FT;
    let outer = zone::INFIELD_BOUNDARY_FT + zone::BOUNDARY_BAND_FT;
    if range < inner {
        true
    } else if range > outer {
        false
    } else {
        launch < zone::BAND_INFIELD_LAUNCH_DEG
    }
}

fn infield_zone(attack: f64) -> FieldPosition {
    if attack <= -zone::INFIELD_CORNER_DEG {
        FieldPosition::ThirdBase
    } else if attack <= -zone::INFIELD_MIDDLE_DEG {
        FieldPosition::Shortstop
    } else if attack < zone::INFIELD_MIDDLE_DEG {
        if attack < 0.0 {
            FieldPosition::Shortstop
        } else {
            FieldPosition::SecondBase
        }
    } else if attack < zone::INFIELD_CORNER_DEG {
        FieldPosition::SecondBase
    } else {
        FieldPosition::FirstBase
    }
}

pub fn outfield_zone(attack: f64) -> FieldPosition {
    if attack < -zone::OUTFIELD_SPLIT_DEG {
        FieldPosition::LeftField
    } else if attack > zone::OUTFIELD_SPLIT_DEG {
        FieldPosition::RightField
    } else {
        FieldPosition::CenterField
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::{ball, foul_ball};

    #[test]
    fn test_unreachable_fouls_go_to_bench() {
        // Low foul liner
        assert_eq!(estimate_drop_zone(&foul_ball(70.0, 20.0, 60.0)), FieldPosition::Bench);
        // High foul that carries too far
        assert_eq!(estimate_drop_zone(&foul_ball(90.0, 40.0, -60.0)), FieldPosition::Bench);
    }

    #[test]
    fn test_foul_popups() {
        assert_eq!(estimate_drop_zone(&foul_ball(25.0, 91.0, 0.0)), FieldPosition::Catcher);
        assert_eq!(estimate_drop_zone(&foul_ball(35.0, 75.0, -55.0)), FieldPosition::ThirdBase);
        assert_eq!(estimate_drop_zone(&foul_ball(35.0, 75.0, 55.0)), FieldPosition::FirstBase);
    }

    #[test]
    fn test_grounders_by_spray() {
        assert_eq!(estimate_drop_zone(&ball(70.0, 0.0, -40.0)), FieldPosition::ThirdBase);
        assert_eq!(estimate_drop_zone(&ball(70.0, 0.0, -20.0)), FieldPosition::Shortstop);
        assert_eq!(estimate_drop_zone(&ball(70.0, 0.0, -8.0)), FieldPosition::Shortstop);
        assert_eq!(estimate_drop_zone(&ball(70.0, 0.0, 8.0)), FieldPosition::SecondBase);
        assert_eq!(estimate_drop_zone(&ball(70.0, 0.0, 20.0)), FieldPosition::SecondBase);
        assert_eq!(estimate_drop_zone(&ball(70.0, 0.0, 40.0)), FieldPosition::FirstBase);
    }

    #[test]
    fn test_soft_comebacker_goes_to_pitcher() {
        // Chopped into the ground, dead centre, soft
        assert_eq!(estimate_drop_zone(&ball(30.0, -20.0, 2.0)), FieldPosition::Pitcher);
        // Same ball pulled outside the cone
        assert_eq!(estimate_drop_zone(&ball(30.0, -20.0, 8.0)), FieldPosition::SecondBase);
        // Rocket up the middle gets by the pitcher
        assert_eq!(estimate_drop_zone(&ball(110.0, -20.0, 2.0)), FieldPosition::SecondBase);
    }

    #[test]
    fn test_infield_popup_to_catcher() {
        assert_eq!(estimate_drop_zone(&ball(60.0, 88.0, 0.0)), FieldPosition::Catcher);
    }

    #[test]
    fn test_outfield_routing() {
        let deep = |attack| estimate_drop_zone(&ball(75.0, 35.0, attack));
        assert_eq!(deep(-30.0), FieldPosition::LeftField);
        assert_eq!(deep(0.0), FieldPosition::CenterField);
        assert_eq!(deep(30.0), FieldPosition::RightField);
    }

    #[test]
    fn test_shallow_air_balls_stay_infield() {
        let shallow = |attack| estimate_drop_zone(&ball(35.0, 30.0, attack));
        assert!(horizontal_range(&ball(35.0, 30.0, 0.0)) < 85.0);
        assert_eq!(shallow(-35.0), FieldPosition::ThirdBase);
        assert_eq!(shallow(-20.0), FieldPosition::Shortstop);
        assert_eq!(shallow(5.0), FieldPosition::SecondBase);
        assert_eq!(shallow(35.0), FieldPosition::FirstBase);
    }

    #[test]
    fn test_boundary_band_hysteresis() {
        assert!(plays_as_infield(15.0, 100.0));
        assert!(!plays_as_infield(40.0, 100.0));
        assert!(plays_as_infield(40.0, 84.0));
        assert!(!plays_as_infield(15.0, 106.0));
    }

    #[test]
    fn test_every_fair_ball_gets_a_fielder() {
        for velo in [20.0, 45.0, 70.0, 95.0] {
            for launch in [-60.0, -5.0, 5.0, 15.0, 30.0, 50.0, 70.0, 89.0] {
                for attack in [-44.0, -20.0, -3.0, 0.0, 3.0, 20.0, 44.0] {
                    let pos = estimate_drop_zone(&ball(velo, launch, attack));
                    assert_ne!(pos, FieldPosition::Bench, "v={velo} l={launch} a={attack}");
                }
            }
        }
    }
}
