//! Sampling and curve primitives
//!
//! Every stochastic function in the engine takes the generator as `&mut R`
//! so games can be replayed from a seed.

use rand::Rng;
use rand_distr::StandardNormal;

/// Gaussian sample with the given mean and standard deviation.
#[inline]
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, sd: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    mean + sd * z
}

/// Uniform sample in `[0, 1)`.
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}

/// Uniform sample in `[lo, hi)`.
#[inline]
pub fn uniform_range<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * rng.gen::<f64>()
}

/// Bernoulli draw. `p` is clamped to `[0, 1]` first; NaN never succeeds.
#[inline]
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.gen::<f64>() < clamp01(p)
}

/// Random sign, `-1.0` or `1.0`.
#[inline]
pub fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    if rng.gen::<bool>() {
        1.0
    } else {
        -1.0
    }
}

#[inline]
pub fn clamp01(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Quadratic ease-out: steep near 0, flat near 1.
#[inline]
pub fn ease_out(t: f64) -> f64 {
    let t = clamp01(t);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Logistic curve rising through `center` with width `scale`.
#[inline]
pub fn logistic(x: f64, center: f64, scale: f64) -> f64 {
    1.0 / (1.0 + (-(x - center) / scale).exp())
}

/// Skill `0..=10` normalised to `0..=1`.
#[inline]
pub fn normalize_skill(skill: f64) -> f64 {
    clamp01(skill / 10.0)
}
