//! Plate appearance state machine
//!
//! Pitch -> swing -> contact, repeated until four balls, three strikes or a
//! fair ball. Pure function of (batter, pitcher, generator).

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::contact::{decide_swing, resolve_swing, BattedBall};
use super::pitch::simulate_pitch;
use crate::models::player::Player;

pub const BALLS_FOR_WALK: u8 = 4;
pub const STRIKES_FOR_OUT: u8 = 3;
/// Safety valve against pathological random sequences.
pub const DEFAULT_PITCH_CAP: u32 = 30;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AtBatOutcome {
    Walk,
    Strikeout,
    InPlay { ball: BattedBall },
}

impl AtBatOutcome {
    pub fn batted_ball(&self) -> Option<&BattedBall> {
        match self {
            AtBatOutcome::InPlay { ball } => Some(ball),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PitchCall {
    Ball,
    CalledStrike,
    SwingingStrike,
    Foul,
    InPlay,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PitchRecord {
    pub is_strike: bool,
    pub quality: f64,
    pub swung: bool,
    pub call: PitchCall,
    /// Count after this pitch
    pub balls: u8,
    pub strikes: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AtBatResult {
    pub outcome: AtBatOutcome,
    pub balls: u8,
    pub strikes: u8,
    pub pitches: Vec<PitchRecord>,
}

impl AtBatResult {
    pub fn pitch_count(&self) -> usize {
        self.pitches.len()
    }
}

pub fn simulate_at_bat<R: Rng + ?Sized>(
    batter: &Player,
    pitcher: &Player,
    rng: &mut R,
) -> AtBatResult {
    simulate_at_bat_capped(batter, pitcher, DEFAULT_PITCH_CAP, rng)
}

pub fn simulate_at_bat_capped<R: Rng + ?Sized>(
    batter: &Player,
    pitcher: &Player,
    pitch_cap: u32,
    rng: &mut R,
) -> AtBatResult {
    let mut balls = 0u8;
    let mut strikes = 0u8;
    let mut pitches = Vec::new();

    for _ in 0..pitch_cap {
        let pitch = simulate_pitch(pitcher, rng);
        let swung = decide_swing(batter, &pitch, rng);

        let (call, in_play) = if !swung {
            if pitch.is_strike {
                strikes += 1;
                (PitchCall::CalledStrike, None)
            } else {
                balls += 1;
                (PitchCall::Ball, None)
            }
        } else {
            match resolve_swing(batter, &pitch, rng) {
                None => {
                    strikes += 1;
                    (PitchCall::SwingingStrike, None)
                }
                Some(ball) if ball.foul => {
                    // Two-strike fouls keep the count alive.
                    if strikes < STRIKES_FOR_OUT - 1 {
                        strikes += 1;
                    }
                    (PitchCall::Foul, None)
                }
                Some(ball) => (PitchCall::InPlay, Some(ball)),
            }
        };

        pitches.push(PitchRecord {
            is_strike: pitch.is_strike,
            quality: pitch.quality,
            swung,
            call,
            balls,
            strikes,
        });

        if let Some(ball) = in_play {
            return AtBatResult { outcome: AtBatOutcome::InPlay { ball }, balls, strikes, pitches };
        }
        if strikes >= STRIKES_FOR_OUT {
            return AtBatResult { outcome: AtBatOutcome::Strikeout, balls, strikes, pitches };
        }
        if balls >= BALLS_FOR_WALK {
            return AtBatResult { outcome: AtBatOutcome::Walk, balls, strikes, pitches };
        }
    }

    // Cap exhausted: resolve on the count rather than erroring.
    let outcome =
        if strikes >= STRIKES_FOR_OUT - 1 { AtBatOutcome::Strikeout } else { AtBatOutcome::Walk };
    warn!(
        balls,
        strikes,
        pitches = pitches.len(),
        ?outcome,
        "pitch cap reached, resolving on count"
    );
    AtBatResult { outcome, balls, strikes, pitches }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::player_with;
    use crate::models::player::{FieldPosition, Stats};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn batter(contact: f64) -> Player {
        player_with(1, Stats { contact, ..Stats::default() }, FieldPosition::CenterField)
    }

    fn pitcher(pitching: f64) -> Player {
        player_with(2, Stats { pitching, ..Stats::default() }, FieldPosition::Pitcher)
    }

    #[test]
    fn test_terminal_counts_are_consistent() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let (b, p) = (batter(5.0), pitcher(5.0));
        for _ in 0..2_000 {
            let result = simulate_at_bat(&b, &p, &mut rng);
            assert!(!result.pitches.is_empty());
            assert!(result.pitch_count() <= DEFAULT_PITCH_CAP as usize);
            match result.outcome {
                AtBatOutcome::Walk => assert!(result.balls == 4 || result.pitch_count() == 30),
                AtBatOutcome::Strikeout => {
                    assert!(result.strikes == 3 || result.pitch_count() == 30)
                }
                AtBatOutcome::InPlay { ball } => {
                    assert!(!ball.foul);
                    assert_eq!(result.pitches.last().unwrap().call, PitchCall::InPlay);
                    assert!(result.balls < 4 && result.strikes < 3);
                }
            }
        }
    }

    #[test]
    fn test_foul_never_records_third_strike() {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let (b, p) = (batter(3.0), pitcher(8.0));
        for _ in 0..2_000 {
            let result = simulate_at_bat(&b, &p, &mut rng);
            let mut prev_strikes = 0;
            for pitch in &result.pitches {
                if pitch.call == PitchCall::Foul {
                    assert!(pitch.strikes <= 2);
                    if prev_strikes == 2 {
                        assert_eq!(pitch.strikes, 2);
                    }
                }
                prev_strikes = pitch.strikes;
            }
        }
    }

    #[test]
    fn test_cap_fallback_resolves_on_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let (b, p) = (batter(5.0), pitcher(5.0));
        // A one-pitch cap forces the fallback whenever the first pitch is not terminal.
        for _ in 0..500 {
            let result = simulate_at_bat_capped(&b, &p, 1, &mut rng);
            if result.pitches[0].call != PitchCall::InPlay {
                assert_eq!(result.outcome, AtBatOutcome::Walk);
            }
        }
    }

    #[test]
    fn test_cap_fallback_strikes_out_on_two_strikes() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let (b, p) = (batter(0.0), pitcher(9.0));
        let mut capped_strikeouts = 0;
        for _ in 0..2_000 {
            let result = simulate_at_bat_capped(&b, &p, 3, &mut rng);
            let last = result.pitches.last().unwrap();
            let natural_end =
                last.call == PitchCall::InPlay || last.strikes == 3 || last.balls == 4;
            if result.pitch_count() == 3 && !natural_end {
                let expected = if last.strikes >= 2 {
                    capped_strikeouts += 1;
                    AtBatOutcome::Strikeout
                } else {
                    AtBatOutcome::Walk
                };
                assert_eq!(result.outcome, expected, "{result:?}");
            }
        }
        assert!(capped_strikeouts > 0);
    }

    #[test]
    fn test_better_contact_strikes_out_less() {
        let p = pitcher(6.0);
        let k_rate = |contact: f64, seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let b = batter(contact);
            let n = 5_000;
            let ks = (0..n)
                .filter(|_| simulate_at_bat(&b, &p, &mut rng).outcome == AtBatOutcome::Strikeout)
                .count();
            ks as f64 / n as f64
        };
        assert!(k_rate(9.0, 4) < k_rate(1.0, 4));
    }
}
