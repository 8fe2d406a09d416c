//! Batted-ball classification and simplified projectile kinematics
//!
//! Drag is a flat reduction of hang time, not an integrated drag model.

use serde::{Deserialize, Serialize};

use super::constants::flight;
use super::contact::BattedBall;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BallType {
    Ground,
    Line,
    Fly,
    Pop,
}

impl BallType {
    pub fn is_airborne(self) -> bool {
        !matches!(self, BallType::Ground)
    }
}

pub fn classify(ball: &BattedBall) -> BallType {
    classify_launch(ball.launch)
}

pub fn classify_launch(launch: f64) -> BallType {
    if launch < flight::GROUND_MAX_DEG {
        BallType::Ground
    } else if launch < flight::LINE_MAX_DEG {
        BallType::Line
    } else if launch < flight::FLY_MAX_DEG {
        BallType::Fly
    } else {
        BallType::Pop
    }
}

/// Hang time in seconds from a 1 m contact height.
///
/// Zero velocity, or any non-finite or negative result, yields exactly 0.
pub fn air_time(ball: &BattedBall) -> f64 {
    air_time_for(ball.velo, ball.launch)
}

pub fn air_time_for(velo_mph: f64, launch_deg: f64) -> f64 {
    if velo_mph.is_nan() || velo_mph <= 0.0 {
        return 0.0;
    }
    let v = velo_mph * flight::MPH_TO_MPS;
    let vy = v * launch_deg.to_radians().sin();
    let g = flight::GRAVITY;
    let t = (vy + (vy * vy + 2.0 * g * flight::CONTACT_HEIGHT_M).sqrt()) / g;
    let t = t * (1.0 - flight::DRAG_REDUCTION);
    if t.is_finite() && t > 0.0 {
        t
    } else {
        0.0
    }
}

/// Horizontal carry in feet; grounders are capped to keep them in the infield.
pub fn horizontal_range(ball: &BattedBall) -> f64 {
    let v = ball.velo.max(0.0) * flight::MPH_TO_MPS;
    let vx = v * ball.launch.to_radians().cos().abs();
    let range_ft = vx * air_time(ball) * flight::M_TO_FT;
    if classify(ball) == BallType::Ground {
        range_ft.min(flight::GROUND_BALL_RANGE_CAP_FT)
    } else {
        range_ft
    }
}

/// Horizontal speed in feet per second.
pub fn horizontal_speed_fps(ball: &BattedBall) -> f64 {
    ball.velo.max(0.0) * flight::MPH_TO_MPS * ball.launch.to_radians().cos().abs() * flight::M_TO_FT
}
