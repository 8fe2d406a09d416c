//! Tuning constants for the softball simulation.
//!
//! Softball-scale heuristics, not physically derived. The drop-zone thresholds
//! and logistic centres were tuned together; moving one shifts the catch and
//! hit distributions downstream.

/// Pitch generation
pub mod pitch {
    /// Strike probability: `BASE + LINEAR*u + QUADRATIC*u²` with `u = skill/10`
    pub const STRIKE_BASE: f64 = 0.20;
    pub const STRIKE_LINEAR: f64 = 0.435;
    pub const STRIKE_QUADRATIC: f64 = 0.05;
    pub const STRIKE_NOISE_SD: f64 = 0.05;

    /// Pitch quality noise around the pitcher's skill
    pub const QUALITY_SD: f64 = 0.65;
}

/// Swing decision and contact
pub mod swing {
    pub const BASE_SWING: f64 = 0.60;
    /// Added per point of contact skill on strikes
    pub const STRIKE_SWING_PER_SKILL: f64 = 0.01;
    /// Maximum reduction on balls, reached at contact 10
    pub const BALL_TAKE_MAX: f64 = 0.35;
    pub const SWING_NOISE_SD: f64 = 0.05;

    /// Contact cutoff distributions (mean offset, sd)
    pub const STRIKE_CONTACT_OFFSET: f64 = 20.0;
    pub const STRIKE_CONTACT_SD: f64 = 30.0;
    pub const BALL_CONTACT_OFFSET: f64 = 1.0;
    pub const BALL_CONTACT_SD: f64 = 20.0;
}

/// Batted-ball generation
pub mod batted {
    pub const LAUNCH_MIN_DEG: f64 = -135.0;
    pub const LAUNCH_MAX_DEG: f64 = 135.0;
    pub const SWEET_SPOT_DEG: f64 = 20.0;
    pub const SWEET_WEIGHT_MIN: f64 = 0.50;
    pub const SWEET_WEIGHT_MAX: f64 = 0.85;
    pub const SWEET_SD_MAX: f64 = 30.0;
    pub const SWEET_SD_MIN: f64 = 14.0;
    pub const BROAD_SD: f64 = 60.0;
    /// Weight of the broad normal against the uniform sample: `focus * BROAD_BLEND`
    pub const BROAD_BLEND: f64 = 0.7;

    pub const SPRAY_MIN_DEG: f64 = -80.0;
    pub const SPRAY_MAX_DEG: f64 = 80.0;
    pub const CENTER_WEIGHT_MIN: f64 = 0.45;
    pub const CENTER_WEIGHT_MAX: f64 = 0.90;
    pub const CENTER_SD_MAX: f64 = 35.0;
    pub const CENTER_SD_MIN: f64 = 12.0;
    /// Share of the overshoot past the fair line removed at skill 10
    pub const FAIR_PULL_MAX: f64 = 0.8;
    pub const FOUL_LEAN_MEAN_DEG: f64 = 75.0;
    pub const FOUL_LEAN_SD: f64 = 12.0;

    /// Exit velocity: `SCALE * cbrt(2*power + 1) + OFFSET` mph
    pub const VELO_SCALE: f64 = 10.0;
    pub const VELO_OFFSET: f64 = 30.0;
    pub const VELO_NOISE_SD: f64 = 1.0;
    pub const VELO_NOISE_CAP: f64 = 0.35;

    /// Half-cone of fair territory
    pub const FAIR_HALF_ANGLE_DEG: f64 = 45.0;
    /// Beyond this the ball leaves backwards
    pub const BEHIND_PLATE_DEG: f64 = 90.0;

    pub const HR_MIN_VELO_MPH: f64 = 60.0;
    pub const HR_FULL_VELO_MPH: f64 = 100.0;
    pub const HR_MAX_LAUNCH_DEG: f64 = 50.0;
    pub const HR_OPTIMAL_LAUNCH_DEG: f64 = 27.0;
    pub const HR_TOLERANCE_MIN_DEG: f64 = 1.5;
    pub const HR_TOLERANCE_MAX_DEG: f64 = 12.0;
}

/// Projectile motion
pub mod flight {
    pub const GRAVITY: f64 = 9.80665;
    pub const CONTACT_HEIGHT_M: f64 = 1.0;
    /// Flat air-resistance reduction of hang time
    pub const DRAG_REDUCTION: f64 = 0.08;
    pub const MPH_TO_MPS: f64 = 0.44704;
    pub const M_TO_FT: f64 = 3.28084;
    pub const GROUND_BALL_RANGE_CAP_FT: f64 = 120.0;

    /// Launch angle class boundaries
    pub const GROUND_MAX_DEG: f64 = 10.0;
    pub const LINE_MAX_DEG: f64 = 25.0;
    pub const FLY_MAX_DEG: f64 = 60.0;

    /// Share of horizontal speed kept after the first bounce
    pub const BOUNCE_RETENTION: f64 = 0.8;
}

/// Drop-zone geometry (feet / degrees)
pub mod zone {
    pub const FOUL_MIN_LAUNCH_DEG: f64 = 35.0;
    pub const FOUL_MAX_RANGE_FT: f64 = 90.0;
    pub const CATCHER_RANGE_FT: f64 = 45.0;
    pub const STRAIGHT_UP_MIN_DEG: f64 = 87.0;
    pub const STRAIGHT_UP_MAX_DEG: f64 = 93.0;

    pub const PITCHER_PLANE_FT: f64 = 43.0;
    pub const PITCHER_REACTION_S: f64 = 0.35;
    pub const PITCHER_CONE_DEG: f64 = 5.0;
    pub const PITCHER_MAX_TRAVEL_FT: f64 = 20.0;

    pub const GROUND_THIRD_DEG: f64 = -30.0;
    pub const GROUND_SHORT_DEG: f64 = -10.0;
    pub const GROUND_SECOND_DEG: f64 = 10.0;
    pub const GROUND_FIRST_DEG: f64 = 30.0;

    pub const CATCHER_RING_FT: f64 = 35.0;

    pub const INFIELD_BOUNDARY_FT: f64 = 95.0;
    pub const BOUNDARY_BAND_FT: f64 = 10.0;
    /// Inside the band, balls launched below this stay with the infield
    pub const BAND_INFIELD_LAUNCH_DEG: f64 = 25.0;
    pub const INFIELD_CORNER_DEG: f64 = 30.0;
    pub const INFIELD_MIDDLE_DEG: f64 = 15.0;
    pub const OUTFIELD_SPLIT_DEG: f64 = 15.0;
}

/// Catch and clean-fielding curves
pub mod catching {
    pub const POP_CENTER_S: f64 = 1.2;
    pub const POP_SCALE_S: f64 = 0.4;
    pub const FLY_CENTER_S: f64 = 1.8;
    pub const FLY_SCALE_S: f64 = 0.5;
    pub const LINE_CENTER_S: f64 = 0.6;
    pub const LINE_SCALE_S: f64 = 0.18;
    pub const LINE_WEIGHT: f64 = 0.5;

    pub const OUTFIELD_AIR_MULT: f64 = 0.8;
    pub const INFIELD_LINE_MULT: f64 = 0.5;

    pub const SKILL_BASE: f64 = 0.55;
    pub const SKILL_RANGE: f64 = 0.65;
    pub const SKILL_EXPONENT: f64 = 0.8;

    pub const HARD_LINER_MPH: f64 = 70.0;
    pub const HARD_LINER_SPAN_MPH: f64 = 30.0;
    pub const HARD_LINER_MAX_PENALTY: f64 = 0.35;
    pub const MAX_CATCH: f64 = 0.995;

    pub const GROUND_BASE_INFIELD: f64 = 0.85;
    pub const GROUND_BASE_OUTFIELD: f64 = 0.88;
    pub const GROUND_HARD_MPH: f64 = 50.0;
    pub const GROUND_HARD_SPAN_MPH: f64 = 40.0;
    pub const GROUND_HARD_PENALTY: f64 = 0.15;
    pub const GROUND_SKILL_BONUS: f64 = 0.10;
    pub const AIR_CLEAN_BASE: f64 = 0.92;
    pub const AIR_HARD_MPH: f64 = 60.0;
    pub const AIR_HARD_SPAN_MPH: f64 = 40.0;
    pub const AIR_HARD_PENALTY: f64 = 0.06;
    pub const AIR_SKILL_BONUS: f64 = 0.06;
    pub const CLEAN_MIN: f64 = 0.5;
    pub const CLEAN_MAX: f64 = 0.99;

    /// Share of failed clean-fielding attempts scored as errors
    pub const ERROR_SHARE: f64 = 0.20;
    /// Skill 10 halves the error share
    pub const ERROR_SKILL_REDUCTION: f64 = 0.5;
    /// Chance an infielder smothers a bobbled grounder instead of letting it through
    pub const BOBBLE_KEEP_BASE: f64 = 0.25;
    pub const BOBBLE_KEEP_SKILL: f64 = 0.25;
}

/// Hit classification
pub mod hits {
    pub const INFIELD_EXTRA_BASE_BASE: f64 = 0.05;
    pub const INFIELD_EXTRA_BASE_SPEED: f64 = 0.10;

    pub const GAP_ANGLE_DEG: f64 = 22.5;
    pub const VELO_FLOOR_MPH: f64 = 45.0;
    pub const VELO_SPAN_MPH: f64 = 35.0;
    pub const ANGLE_PEAK_DEG: f64 = 20.0;
    pub const ANGLE_SPAN_DEG: f64 = 40.0;

    pub const DOUBLE_BASE: f64 = 0.08;
    pub const DOUBLE_VELO: f64 = 0.25;
    pub const DOUBLE_GAP: f64 = 0.15;
    pub const DOUBLE_ANGLE: f64 = 0.07;
    pub const DOUBLE_SKILL_DAMPING: f64 = 0.35;

    pub const TRIPLE_BASE: f64 = 0.01;
    pub const TRIPLE_VELO_GAP: f64 = 0.05;
    pub const TRIPLE_SPEED: f64 = 0.02;
    pub const TRIPLE_SKILL_DAMPING: f64 = 0.5;

    /// Extra-base suppression while the defense keeps the double play in order
    pub const THROW_TO_SECOND_DISCIPLINE: f64 = 0.85;
}

/// Baserunning on outfield/infield hits and tag-ups
pub mod running {
    pub const THIRD_SCORES_BASE: f64 = 0.70;
    pub const THIRD_SCORES_SPEED: f64 = 0.15;
    pub const THIRD_SCORES_MAX: f64 = 0.95;

    pub const SECOND_SCORES_ON_SINGLE_BASE: f64 = 0.35;
    pub const SECOND_SCORES_ON_SINGLE_SPEED: f64 = 0.35;
    pub const SECOND_SCORES_ON_SINGLE_GAP: f64 = 0.15;
    pub const SECOND_SCORES_ON_DOUBLE: f64 = 0.90;

    pub const FIRST_TO_THIRD_BASE: f64 = 0.15;
    pub const FIRST_TO_THIRD_SPEED: f64 = 0.30;
    pub const FIRST_TO_THIRD_GAP: f64 = 0.20;
    pub const FIRST_SCORES_ON_DOUBLE_BASE: f64 = 0.25;
    pub const FIRST_SCORES_ON_DOUBLE_SPEED: f64 = 0.30;
    pub const FIRST_SCORES_ON_DOUBLE_GAP: f64 = 0.20;

    /// Infield hits: unforced runners only
    pub const INFIELD_THIRD_SCORES_BASE: f64 = 0.30;
    pub const INFIELD_THIRD_SCORES_SPEED: f64 = 0.30;
    pub const INFIELD_SECOND_TO_THIRD_BASE: f64 = 0.40;
    pub const INFIELD_SECOND_TO_THIRD_SPEED: f64 = 0.30;

    /// Tag-up logistic over hang time
    pub const TAG_CENTER_HOME_S: f64 = 3.0;
    pub const TAG_CENTER_THIRD_S: f64 = 3.2;
    pub const TAG_CENTER_SECOND_S: f64 = 2.8;
    pub const TAG_SCALE_S: f64 = 0.3;
    /// Arm (fielding) pushes the centre later, speed pulls it earlier
    pub const TAG_ARM_SHIFT_S: f64 = 0.4;
    pub const TAG_SPEED_SHIFT_S: f64 = 0.3;
}

/// Throw-out contests
pub mod throwing {
    pub const SHORT_BASE_RATE: f64 = 0.35;
    pub const MEDIUM_BASE_RATE: f64 = 0.25;
    pub const LONG_BASE_RATE: f64 = 0.15;
    pub const ARM_WEIGHT: f64 = 0.20;
    pub const SPEED_WEIGHT: f64 = 0.20;
    pub const BALL_TYPE_ADJUST: f64 = 0.05;
    pub const MIN_THROW_OUT: f64 = 0.02;
    pub const MAX_THROW_OUT: f64 = 0.90;
}

/// Live force-play timing (seconds, feet)
pub mod timing {
    pub const BASE_PATH_FT: f64 = 60.0;
    pub const RUNNER_BASE_FPS: f64 = 17.0;
    pub const RUNNER_SKILL_FPS: f64 = 0.8;
    /// Batter finishes the swing before running
    pub const BATTER_START_S: f64 = 0.5;
    /// Unforced runners read the ball before breaking
    pub const READ_DELAY_S: f64 = 0.3;

    pub const THROW_BASE_FPS: f64 = 65.0;
    pub const THROW_SKILL_FPS: f64 = 4.0;

    pub const FIELD_GROUND_S: f64 = 1.1;
    pub const FIELD_LINE_S: f64 = 0.6;
    pub const FIELD_AIR_S: f64 = 0.8;
    pub const FIELD_SKILL_REDUCTION: f64 = 0.25;
    /// Cleanly fielded grounder with the force at first only
    pub const FAST_PATH_FACTOR: f64 = 0.85;
    pub const BOBBLE_PENALTY_S: f64 = 0.8;
    /// A dropped air ball is back in hand within this long
    pub const DROP_RECOVERY_MAX_S: f64 = 1.2;
    /// Slow rollers still get to the fielder within this long
    pub const MAX_REACH_S: f64 = 2.0;

    /// Unforced runners on grounders
    pub const THIRD_GOES_BASE: f64 = 0.25;
    pub const THIRD_GOES_SPEED: f64 = 0.35;
    pub const SECOND_ADVANCES_RIGHT_SIDE: f64 = 0.75;
    pub const SECOND_ADVANCES_BASE: f64 = 0.25;
    pub const SECOND_ADVANCES_SPEED: f64 = 0.20;

    /// Extra-base aggression
    pub const AGGRESSION_GROUND: f64 = 0.08;
    pub const AGGRESSION_LINE: f64 = 0.15;
    pub const AGGRESSION_AIR: f64 = 0.20;
    pub const AGGRESSION_PER_THROW: f64 = 0.05;
    pub const AGGRESSION_SPEED: f64 = 0.20;
}

/// Field coordinates in feet: home plate at the origin, +y toward centre
/// field, +x toward the right-field side.
pub mod geometry {
    pub const FIRST_BASE: (f64, f64) = (42.43, 42.43);
    pub const SECOND_BASE: (f64, f64) = (0.0, 84.85);
    pub const THIRD_BASE: (f64, f64) = (-42.43, 42.43);
    pub const HOME_PLATE: (f64, f64) = (0.0, 0.0);

    pub const PITCHER: (f64, f64) = (0.0, 43.0);
    pub const CATCHER: (f64, f64) = (0.0, -5.0);
    pub const FIRST_BASEMAN: (f64, f64) = (52.0, 58.0);
    pub const SECOND_BASEMAN: (f64, f64) = (35.0, 85.0);
    pub const SHORTSTOP: (f64, f64) = (-35.0, 85.0);
    pub const THIRD_BASEMAN: (f64, f64) = (-52.0, 58.0);
    pub const LEFT_FIELDER: (f64, f64) = (-130.0, 190.0);
    pub const CENTER_FIELDER: (f64, f64) = (0.0, 230.0);
    pub const RIGHT_FIELDER: (f64, f64) = (130.0, 190.0);
}
