//! Base occupancy and runner advancement
//!
//! Resolves how runners move once the fate of the batted ball is known:
//!
//! 1. home runs clear the bases
//! 2. caught balls allow outfield tag-ups with a throw-out contest
//! 3. outfield hits advance runners on speed/gap curves, then the defense
//!    throws at one contested runner per the doctrine in [`super::strategy`]
//! 4. infield hits advance runners conservatively and only the batter can
//!    be thrown out
//!
//! Ground balls that are fielded go through [`super::force_play`] instead.
//!
//! Every branch returns an [`Advancement`] and never mutates game state.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball_flight::BallType;
use super::config::DefenseConfig;
use super::constants::running;
use super::fielding::gap_factor;
use super::probability::{chance, logistic, normalize_skill};
use super::strategy::{attempt_throw_out, doctrine_target};
use crate::models::player::{FieldPosition, PlayerRef};

pub const OUTS_PER_HALF: u8 = 3;
/// Position index of home plate; runners reaching it have scored.
pub const HOME_PLATE: u8 = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum Base {
    #[serde(rename = "1B")]
    First,
    #[serde(rename = "2B")]
    Second,
    #[serde(rename = "3B")]
    Third,
    #[serde(rename = "HOME")]
    Home,
}

impl Base {
    pub fn number(self) -> u8 {
        match self {
            Base::First => 1,
            Base::Second => 2,
            Base::Third => 3,
            Base::Home => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Base> {
        match n {
            1 => Some(Base::First),
            2 => Some(Base::Second),
            3 => Some(Base::Third),
            4 => Some(Base::Home),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Base> {
        Base::from_number(self.number() + 1)
    }
}

/// Who is on which base, and how many are out.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct RunnersState {
    pub first: Option<PlayerRef>,
    pub second: Option<PlayerRef>,
    pub third: Option<PlayerRef>,
    pub outs: u8,
}

impl RunnersState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outs(outs: u8) -> Self {
        Self { outs, ..Self::default() }
    }

    pub fn at(&self, base: Base) -> Option<PlayerRef> {
        match base {
            Base::First => self.first,
            Base::Second => self.second,
            Base::Third => self.third,
            Base::Home => None,
        }
    }

    pub fn set(&mut self, base: Base, runner: Option<PlayerRef>) {
        match base {
            Base::First => self.first = runner,
            Base::Second => self.second = runner,
            Base::Third => self.third = runner,
            Base::Home => {}
        }
    }

    /// Occupied bases, trailing runner first.
    pub fn occupied(&self) -> Vec<(Base, PlayerRef)> {
        [Base::First, Base::Second, Base::Third]
            .into_iter()
            .filter_map(|b| self.at(b).map(|r| (b, r)))
            .collect()
    }

    pub fn count(&self) -> usize {
        self.occupied().len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// A runner is forced when every base behind them is occupied.
    pub fn is_forced(&self, base: Base) -> bool {
        match base {
            Base::First => true,
            Base::Second => self.first.is_some(),
            Base::Third => self.first.is_some() && self.second.is_some(),
            Base::Home => false,
        }
    }

    /// Empty the bases, keeping the out count.
    pub fn clear_bases(&mut self) {
        self.first = None;
        self.second = None;
        self.third = None;
    }

    /// Walk or hit-by-pitch: batter to first, forced runners move up one.
    /// Returns the runner forced home, if any.
    pub fn force_advance(&mut self, batter: PlayerRef) -> Option<PlayerRef> {
        let mut scored = None;
        if self.first.is_some() {
            if self.second.is_some() {
                if self.third.is_some() {
                    scored = self.third.take();
                }
                self.third = self.second.take();
            }
            self.second = self.first.take();
        }
        self.first = Some(batter);
        scored
    }
}

/// Per-runner bookkeeping while a play unfolds.
///
/// Positions are numbered 0 (batter's box) to 4 (home plate).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunnerState {
    pub runner: PlayerRef,
    pub origin: u8,
    pub current: u8,
    pub target: u8,
    pub forced: bool,
    pub can_tag_up: bool,
    pub has_tagged_up: bool,
    pub out: bool,
}

impl RunnerState {
    pub fn batter(runner: PlayerRef) -> Self {
        Self {
            runner,
            origin: 0,
            current: 0,
            target: 1,
            forced: true,
            can_tag_up: false,
            has_tagged_up: false,
            out: false,
        }
    }

    pub fn on_base(runner: PlayerRef, base: Base, forced: bool) -> Self {
        let n = base.number();
        Self {
            runner,
            origin: n,
            current: n,
            target: n,
            forced,
            can_tag_up: false,
            has_tagged_up: false,
            out: false,
        }
    }

    pub fn is_batter(&self) -> bool {
        self.origin == 0
    }

    pub fn has_scored(&self) -> bool {
        !self.out && self.current >= HOME_PLATE
    }

    /// Runner is still on the bases after the play.
    pub fn is_stranded_on(&self, position: u8) -> bool {
        !self.out && self.current == position
    }

    pub(crate) fn move_to(&mut self, position: u8) {
        self.current = position.min(HOME_PLATE);
        self.target = self.current;
    }

    pub(crate) fn put_out(&mut self) {
        self.out = true;
        self.current = self.origin;
        self.target = self.origin;
    }
}

/// One runner's movement as reported in a play result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RunnerAdvance {
    pub runner: PlayerRef,
    pub from: Base,
    /// Bases gained; 0 when held or put out.
    pub bases: u8,
    pub out: bool,
}

impl RunnerAdvance {
    pub fn scored(&self) -> bool {
        !self.out && self.from.number() + self.bases >= HOME_PLATE
    }
}

/// Outcome of a branch: final runner states plus throw count.
#[derive(Debug, Clone, PartialEq)]
pub struct Advancement {
    /// Batter first, then runners trailing to lead.
    pub states: Vec<RunnerState>,
    pub throws: u8,
    /// Third out was a force (or the batter at first): nobody scores.
    pub runs_nullified: bool,
}

impl Advancement {
    pub(crate) fn new(states: Vec<RunnerState>) -> Self {
        Self { states, throws: 0, runs_nullified: false }
    }

    pub fn batter(&self) -> Option<&RunnerState> {
        self.states.iter().find(|s| s.is_batter())
    }

    pub fn batter_out(&self) -> bool {
        self.batter().is_some_and(|s| s.out)
    }

    /// Bases the batter reached; 0 when put out.
    pub fn batter_bases(&self) -> u8 {
        match self.batter() {
            Some(s) if !s.out => s.current,
            _ => 0,
        }
    }

    pub fn outs(&self) -> u8 {
        self.states.iter().filter(|s| s.out).count() as u8
    }

    pub fn scorers(&self) -> Vec<PlayerRef> {
        if self.runs_nullified {
            return Vec::new();
        }
        self.states.iter().filter(|s| s.has_scored()).map(|s| s.runner).collect()
    }

    pub fn runs(&self) -> u8 {
        self.scorers().len() as u8
    }

    pub fn runner_advances(&self) -> Vec<RunnerAdvance> {
        self.states
            .iter()
            .filter(|s| !s.is_batter())
            .filter_map(|s| {
                Base::from_number(s.origin).map(|from| RunnerAdvance {
                    runner: s.runner,
                    from,
                    bases: if s.out { 0 } else { s.current - s.origin },
                    out: s.out,
                })
            })
            .collect()
    }

    pub fn runners_out(&self) -> Vec<PlayerRef> {
        self.states.iter().filter(|s| s.out).map(|s| s.runner).collect()
    }

    /// Bases after the play. Empty once the half-inning is over.
    pub fn bases_after(&self, outs_before: u8) -> RunnersState {
        let outs = (outs_before + self.outs()).min(OUTS_PER_HALF);
        let mut after = RunnersState::with_outs(outs);
        if outs >= OUTS_PER_HALF {
            return after;
        }
        for state in self.states.iter().filter(|s| !s.out) {
            if let Some(base) = Base::from_number(state.current).filter(|b| *b != Base::Home) {
                debug_assert!(after.at(base).is_none(), "two runners on {base:?}");
                after.set(base, Some(state.runner));
            }
        }
        after
    }
}

/// What the defense knows about the ball once it is played.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayContext {
    pub fielder: FieldPosition,
    /// Fielding skill of the player with the ball, used as arm strength
    pub arm: f64,
    pub ball_type: BallType,
    pub hang_time: f64,
    pub attack: f64,
}

pub(crate) fn base_states(runners: &RunnersState) -> Vec<RunnerState> {
    runners
        .occupied()
        .into_iter()
        .map(|(base, runner)| RunnerState::on_base(runner, base, runners.is_forced(base)))
        .collect()
}

/// Push trailing runners ahead so nobody passes or shares a base.
pub(crate) fn enforce_order(states: &mut [RunnerState]) {
    let mut floor = 0u8;
    for state in states.iter_mut().filter(|s| !s.out) {
        if state.current < floor {
            state.move_to(floor);
        }
        floor = (state.current + 1).min(HOME_PLATE);
    }
}

// =============================================================================
// Branch 1: home run
// =============================================================================

pub fn resolve_home_run(batter: PlayerRef, runners: &RunnersState) -> Advancement {
    let mut states = vec![RunnerState::batter(batter)];
    states.extend(base_states(runners));
    for state in &mut states {
        state.move_to(HOME_PLATE);
    }
    Advancement::new(states)
}

// =============================================================================
// Branch 2: caught in the air
// =============================================================================

/// Chance a runner tags and goes for `target` on a catch after `hang_time` seconds.
pub fn tag_up_probability(target: Base, hang_time: f64, arm: f64, speed: f64) -> f64 {
    let center = match target {
        Base::Home => running::TAG_CENTER_HOME_S,
        Base::Third => running::TAG_CENTER_THIRD_S,
        _ => running::TAG_CENTER_SECOND_S,
    } + running::TAG_ARM_SHIFT_S * (normalize_skill(arm) - 0.5)
        - running::TAG_SPEED_SHIFT_S * (normalize_skill(speed) - 0.5);
    logistic(hang_time, center, running::TAG_SCALE_S)
}

pub fn resolve_caught<R: Rng + ?Sized>(
    ctx: &PlayContext,
    batter: PlayerRef,
    runners: &RunnersState,
    rng: &mut R,
) -> Advancement {
    let mut batter_state = RunnerState::batter(batter);
    batter_state.put_out();
    let mut states = vec![batter_state];
    states.extend(base_states(runners));
    let mut adv = Advancement::new(states);

    // Infield catches and inning-ending catches freeze everyone.
    if !ctx.fielder.is_outfield() || runners.outs + 1 >= OUTS_PER_HALF {
        return adv;
    }

    // Lead runner decides first so the base ahead is known.
    for i in (1..adv.states.len()).rev() {
        let state = adv.states[i];
        let Some(target) = Base::from_number(state.origin).and_then(Base::next) else {
            continue;
        };
        let blocked = target != Base::Home
            && adv.states.iter().any(|s| s.origin == target.number() && !s.has_tagged_up);
        adv.states[i].can_tag_up = !blocked;
        if adv.states[i].can_tag_up {
            let p = tag_up_probability(target, ctx.hang_time, ctx.arm, state.runner.running);
            adv.states[i].has_tagged_up = chance(rng, p);
        }
    }

    // One throw, at the lead runner who tagged.
    let mut thrown = false;
    for i in (1..adv.states.len()).rev() {
        let state = adv.states[i];
        let Some(target) = Base::from_number(state.origin).and_then(Base::next) else {
            continue;
        };
        if !state.has_tagged_up {
            continue;
        }
        if !thrown && runners.outs + adv.outs() < OUTS_PER_HALF {
            thrown = true;
            adv.throws += 1;
            let (arm, speed) = (ctx.arm, state.runner.running);
            if attempt_throw_out(ctx.fielder, target, arm, speed, ctx.ball_type, rng) {
                adv.states[i].put_out();
                continue;
            }
        }
        adv.states[i].move_to(target.number());
    }
    adv
}

// =============================================================================
// Branch 3: outfield hit
// =============================================================================

/// Where a runner heads on an outfield hit before the defense reacts.
fn outfield_hit_destination<R: Rng + ?Sized>(
    origin: Base,
    speed: f64,
    batter_bases: u8,
    gap: f64,
    rng: &mut R,
) -> u8 {
    let spd = normalize_skill(speed);
    match origin {
        Base::Third => {
            let p = (running::THIRD_SCORES_BASE + running::THIRD_SCORES_SPEED * spd)
                .min(running::THIRD_SCORES_MAX);
            if batter_bases >= 2 || chance(rng, p) {
                4
            } else {
                3
            }
        }
        Base::Second => {
            let p = if batter_bases >= 2 {
                running::SECOND_SCORES_ON_DOUBLE
            } else {
                running::SECOND_SCORES_ON_SINGLE_BASE
                    + running::SECOND_SCORES_ON_SINGLE_SPEED * spd
                    + running::SECOND_SCORES_ON_SINGLE_GAP * gap
            };
            if batter_bases >= 3 || chance(rng, p) {
                4
            } else {
                3
            }
        }
        Base::First => match batter_bases {
            b if b >= 3 => 4,
            2 => {
                let p = running::FIRST_SCORES_ON_DOUBLE_BASE
                    + running::FIRST_SCORES_ON_DOUBLE_SPEED * spd
                    + running::FIRST_SCORES_ON_DOUBLE_GAP * gap;
                if chance(rng, p) {
                    4
                } else {
                    3
                }
            }
            _ => {
                let p = running::FIRST_TO_THIRD_BASE
                    + running::FIRST_TO_THIRD_SPEED * spd
                    + running::FIRST_TO_THIRD_GAP * gap;
                if chance(rng, p) {
                    3
                } else {
                    2
                }
            }
        },
        Base::Home => 4,
    }
}

pub fn resolve_outfield_hit<R: Rng + ?Sized>(
    ctx: &PlayContext,
    batter: PlayerRef,
    batter_bases: u8,
    runners: &RunnersState,
    defense: &DefenseConfig,
    rng: &mut R,
) -> Advancement {
    let gap = gap_factor(ctx.attack);
    let mut batter_state = RunnerState::batter(batter);
    batter_state.move_to(batter_bases);
    let mut states = vec![batter_state];
    states.extend(base_states(runners));

    // Lead runners pick first; trailing runners are pushed along behind them.
    for state in states.iter_mut().skip(1).rev() {
        let Some(origin) = Base::from_number(state.origin) else { continue };
        let destination =
            outfield_hit_destination(origin, state.runner.running, batter_bases, gap, rng);
        state.move_to(destination);
    }
    enforce_order(&mut states);

    let mut adv = Advancement::new(states);

    let target = if defense.enforce_doctrine {
        Some(doctrine_target(runners))
    } else {
        adv.states
            .iter()
            .filter(|s| !s.is_batter() && s.current > s.origin)
            .map(|s| s.current)
            .max()
            .and_then(Base::from_number)
    };
    let Some(target) = target else { return adv };

    // The runner arriving last at the target base draws the throw.
    let contested = adv
        .states
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_batter() && s.current == target.number() && s.current > s.origin)
        .min_by_key(|(_, s)| s.origin)
        .map(|(i, _)| i);

    if let Some(i) = contested {
        adv.throws += 1;
        let speed = adv.states[i].runner.running;
        if attempt_throw_out(ctx.fielder, target, ctx.arm, speed, ctx.ball_type, rng) {
            adv.states[i].put_out();
        }
    }
    adv
}

// =============================================================================
// Branch 4: infield hit
// =============================================================================

/// Runners advance on their own; only the batter can be put out, and only
/// when `batter_retired` says the throw beat them to first.
pub fn resolve_infield_hit<R: Rng + ?Sized>(
    batter: PlayerRef,
    batter_bases: u8,
    batter_retired: bool,
    runners: &RunnersState,
    rng: &mut R,
) -> Advancement {
    let mut batter_state = RunnerState::batter(batter);
    if batter_retired {
        batter_state.put_out();
    } else {
        batter_state.move_to(batter_bases);
    }
    let mut states = vec![batter_state];
    states.extend(base_states(runners));

    let mut third_vacated = runners.third.is_none();
    for state in states.iter_mut().skip(1).rev() {
        let spd = normalize_skill(state.runner.running);
        let destination = match Base::from_number(state.origin) {
            Some(Base::Third) => {
                let p =
                    running::INFIELD_THIRD_SCORES_BASE + running::INFIELD_THIRD_SCORES_SPEED * spd;
                let goes = state.forced || chance(rng, p);
                third_vacated = goes;
                if goes {
                    4
                } else {
                    3
                }
            }
            Some(Base::Second) => {
                let p = running::INFIELD_SECOND_TO_THIRD_BASE
                    + running::INFIELD_SECOND_TO_THIRD_SPEED * spd;
                if state.forced || (third_vacated && chance(rng, p)) {
                    3
                } else {
                    2
                }
            }
            _ => state.origin + 1,
        };
        state.move_to(destination);
    }
    enforce_order(&mut states);
    let mut adv = Advancement::new(states);
    if batter_retired {
        adv.throws = 1;
        // Batter out before reaching first: no run counts on the third out.
        adv.runs_nullified = runners.outs + 1 >= OUTS_PER_HALF;
    }
    adv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::batter_ref;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn loaded() -> RunnersState {
        RunnersState {
            first: Some(batter_ref(11, 5.0)),
            second: Some(batter_ref(12, 5.0)),
            third: Some(batter_ref(13, 5.0)),
            outs: 1,
        }
    }

    fn ctx(fielder: FieldPosition, arm: f64, ball_type: BallType, hang_time: f64) -> PlayContext {
        PlayContext { fielder, arm, ball_type, hang_time, attack: 0.0 }
    }

    #[test]
    fn test_force_advance_on_walk() {
        let mut bases = RunnersState::new();
        assert_eq!(bases.force_advance(batter_ref(1, 5.0)), None);
        assert_eq!(bases.force_advance(batter_ref(2, 5.0)), None);
        assert_eq!(bases.force_advance(batter_ref(3, 5.0)), None);
        assert_eq!(bases.count(), 3);
        let scored = bases.force_advance(batter_ref(4, 5.0));
        assert_eq!(scored.map(|r| r.id.0), Some(1));
        assert_eq!(bases.first.map(|r| r.id.0), Some(4));
        assert_eq!(bases.third.map(|r| r.id.0), Some(2));
    }

    #[test]
    fn test_walk_does_not_push_unforced_runner() {
        let mut bases = RunnersState { third: Some(batter_ref(9, 5.0)), ..RunnersState::new() };
        assert_eq!(bases.force_advance(batter_ref(1, 5.0)), None);
        assert_eq!(bases.third.map(|r| r.id.0), Some(9));
        assert!(bases.second.is_none());
    }

    #[test]
    fn test_forced_bases() {
        let bases = RunnersState { first: Some(batter_ref(1, 5.0)), ..RunnersState::new() };
        assert!(bases.is_forced(Base::First));
        assert!(bases.is_forced(Base::Second));
        assert!(!bases.is_forced(Base::Third));
        assert!(loaded().is_forced(Base::Third));
    }

    #[test]
    fn test_home_run_clears_bases() {
        let adv = resolve_home_run(batter_ref(1, 5.0), &loaded());
        assert_eq!(adv.runs(), 4);
        assert_eq!(adv.outs(), 0);
        assert_eq!(adv.batter_bases(), 4);
        assert!(adv.runner_advances().iter().all(|a| a.scored()));
        assert!(adv.bases_after(1).is_empty());
    }

    #[test]
    fn test_infield_catch_freezes_runners() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let c = ctx(FieldPosition::Shortstop, 5.0, BallType::Pop, 4.0);
        for _ in 0..500 {
            let adv = resolve_caught(&c, batter_ref(1, 5.0), &loaded(), &mut rng);
            assert_eq!(adv.outs(), 1);
            assert_eq!(adv.runs(), 0);
            assert_eq!(adv.bases_after(1).count(), 3);
        }
    }

    #[test]
    fn test_third_out_catch_ends_everything() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut bases = loaded();
        bases.outs = 2;
        let c = ctx(FieldPosition::CenterField, 5.0, BallType::Fly, 5.0);
        let adv = resolve_caught(&c, batter_ref(1, 5.0), &bases, &mut rng);
        assert_eq!(adv.runs(), 0);
        assert_eq!(adv.throws, 0);
        assert!(adv.bases_after(2).is_empty());
    }

    #[test]
    fn test_deep_fly_scores_runner_from_third_more_often() {
        let bases = RunnersState { third: Some(batter_ref(13, 5.0)), ..RunnersState::new() };
        let runs = |hang: f64| {
            let mut rng = ChaCha8Rng::seed_from_u64(9);
            let c = ctx(FieldPosition::CenterField, 5.0, BallType::Fly, hang);
            (0..4_000)
                .map(|_| resolve_caught(&c, batter_ref(1, 5.0), &bases, &mut rng).runs() as u32)
                .sum::<u32>()
        };
        assert!(runs(4.0) > runs(2.0));
    }

    #[test]
    fn test_tag_up_curve() {
        assert!(tag_up_probability(Base::Home, 1.0, 5.0, 5.0) < 0.01);
        assert!(tag_up_probability(Base::Home, 4.5, 5.0, 5.0) > 0.99);
        // Strong arm discourages, speed encourages
        let p = |arm, speed| tag_up_probability(Base::Home, 3.0, arm, speed);
        assert!(p(9.0, 5.0) < p(1.0, 5.0));
        assert!(p(5.0, 9.0) > p(5.0, 1.0));
    }

    #[test]
    fn test_stronger_arm_throws_out_more_tagging_runners() {
        let bases = RunnersState { third: Some(batter_ref(13, 5.0)), ..RunnersState::new() };
        let outs = |arm: f64| {
            let mut rng = ChaCha8Rng::seed_from_u64(21);
            let c = ctx(FieldPosition::LeftField, arm, BallType::Fly, 4.0);
            (0..10_000)
                .map(|_| {
                    let adv = resolve_caught(&c, batter_ref(1, 5.0), &bases, &mut rng);
                    u32::from(adv.states.iter().any(|s| !s.is_batter() && s.out))
                })
                .sum::<u32>()
        };
        assert!(outs(9.5) > outs(0.5));
    }

    #[test]
    fn test_stronger_arm_holds_down_sacrifice_fly_runs() {
        let bases = RunnersState { third: Some(batter_ref(13, 5.0)), ..RunnersState::new() };
        let runs = |arm: f64| {
            let mut rng = ChaCha8Rng::seed_from_u64(27);
            let c = ctx(FieldPosition::CenterField, arm, BallType::Fly, 3.5);
            (0..10_000)
                .map(|_| resolve_caught(&c, batter_ref(1, 5.0), &bases, &mut rng).runs() as u32)
                .sum::<u32>()
        };
        assert!(runs(9.5) < runs(0.5));
    }

    #[test]
    fn test_trailing_runner_waits_on_lead_runner_tag() {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let bases = RunnersState {
            first: Some(batter_ref(11, 5.0)),
            second: Some(batter_ref(12, 5.0)),
            ..RunnersState::new()
        };
        let c = ctx(FieldPosition::RightField, 5.0, BallType::Fly, 3.2);
        for _ in 0..2_000 {
            let adv = resolve_caught(&c, batter_ref(1, 5.0), &bases, &mut rng);
            let lead = adv.states.iter().find(|s| s.origin == 2).unwrap();
            let trail = adv.states.iter().find(|s| s.origin == 1).unwrap();
            assert!(lead.can_tag_up);
            assert_eq!(trail.can_tag_up, lead.has_tagged_up);
            if !trail.has_tagged_up {
                assert!(trail.is_stranded_on(1));
            }
            assert!(adv.throws <= 1);
            assert_eq!(adv.bases_after(0).count() as u8 + adv.outs(), 3);
        }
    }

    #[test]
    fn test_outfield_hit_keeps_bases_consistent() {
        let mut rng = ChaCha8Rng::seed_from_u64(33);
        let defense = DefenseConfig::default();
        for batter_bases in 1..=3 {
            let c = ctx(FieldPosition::RightField, 5.0, BallType::Line, 1.0);
            for _ in 0..1_000 {
                let batter = batter_ref(1, 5.0);
                let adv =
                    resolve_outfield_hit(&c, batter, batter_bases, &loaded(), &defense, &mut rng);
                assert_eq!(adv.batter_bases(), batter_bases);
                assert!(adv.outs() <= 1);
                let after = adv.bases_after(1);
                let on_base = adv.states.iter().filter(|s| !s.out && s.current < 4).count();
                assert_eq!(after.count(), on_base);
                assert_eq!(adv.runs() as usize + on_base + adv.outs() as usize, 4);
            }
        }
    }

    #[test]
    fn test_runner_on_third_never_thrown_out_at_home_when_doctrine_targets_second() {
        let mut rng = ChaCha8Rng::seed_from_u64(44);
        let bases = RunnersState { third: Some(batter_ref(13, 5.0)), ..RunnersState::new() };
        let left = ctx(FieldPosition::LeftField, 9.0, BallType::Line, 1.0);
        let c = PlayContext { attack: -25.0, ..left };
        let defense = DefenseConfig::default();
        for _ in 0..5_000 {
            let adv = resolve_outfield_hit(&c, batter_ref(1, 5.0), 1, &bases, &defense, &mut rng);
            assert_eq!(adv.outs(), 0);
        }
    }

    #[test]
    fn test_infield_hit_only_moves_forced_runners_by_force() {
        let mut rng = ChaCha8Rng::seed_from_u64(55);
        let bases = RunnersState { first: Some(batter_ref(11, 5.0)), ..RunnersState::new() };
        for _ in 0..500 {
            let adv = resolve_infield_hit(batter_ref(1, 5.0), 1, false, &bases, &mut rng);
            let after = adv.bases_after(0);
            assert_eq!(adv.throws, 0);
            assert_eq!(after.first.map(|r| r.id.0), Some(1));
            assert_eq!(after.second.map(|r| r.id.0), Some(11));
        }
    }

    #[test]
    fn test_batter_thrown_out_for_third_out_cancels_runs() {
        let mut rng = ChaCha8Rng::seed_from_u64(67);
        let bases = RunnersState { outs: 2, ..loaded() };
        let adv = resolve_infield_hit(batter_ref(1, 0.0), 1, true, &bases, &mut rng);
        assert!(adv.batter_out());
        assert_eq!(adv.outs(), 1);
        assert_eq!(adv.throws, 1);
        assert_eq!(adv.runs(), 0);
        assert!(adv.bases_after(2).is_empty());
    }

    #[test]
    fn test_infield_hit_with_loaded_bases_forces_in_a_run() {
        let mut rng = ChaCha8Rng::seed_from_u64(66);
        let adv = resolve_infield_hit(batter_ref(1, 5.0), 1, false, &loaded(), &mut rng);
        assert!(adv.runs() >= 1);
        assert_eq!(adv.bases_after(1).count(), 3);
    }
}
