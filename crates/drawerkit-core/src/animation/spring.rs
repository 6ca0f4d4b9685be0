#![forbid(unsafe_code)]

//! Damped spring timing curve.
//!
//! Maps normalized time `t ∈ [0, 1]` to normalized displacement, following
//! the step response of a damped harmonic oscillator:
//!
//!   x(t) = 1 − e^(−ζω₀t) · (cos(ω_d t) + ((ζω₀ − v₀) / ω_d) · sin(ω_d t))
//!
//! where `ω_d = ω₀·√(1 − ζ²)`. Critically damped ratios (`ζ ≥ 1`) use
//!
//!   x(t) = 1 − e^(−ω₀t) · (1 + (ω₀ − v₀)·t)
//!
//! # Parameters
//!
//! - **damping_ratio** (ζ): `1.0` settles without overshoot, lower values
//!   bounce. Typical range for UI motion: 0.6–1.0.
//! - **initial_velocity** (v₀): starting speed in normalized units
//!   (fraction of the distance per animation duration). A flick hands its
//!   momentum to the spring through this value.
//!
//! The natural frequency ω₀ is derived from ζ so that the envelope has
//! decayed to 0.1% at `t = 1`; the curve therefore "fits" the requested
//! duration regardless of damping.
//!
//! # Invariants
//!
//! 1. `value_at(0.0) == 0.0` when `initial_velocity == 0`.
//! 2. `value_at(t) == 1.0` for every `t ≥ 1.0` (settled exactly).
//! 3. The damping ratio is always in `[MIN_DAMPING_RATIO, 1.0]`.
//!
//! # Failure Modes
//!
//! - Non-finite `t`: treated as settled (returns 1.0).
//! - Damping ratio ≤ 0: clamped; an undamped spring would never settle.

/// Smallest accepted damping ratio.
pub const MIN_DAMPING_RATIO: f64 = 0.05;

/// Envelope decay exponent at `t = 1` (ln 1000).
const SETTLE_EXPONENT: f64 = 6.907_755_278_982_137;

/// A spring step response squeezed into normalized time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringTiming {
    damping_ratio: f64,
    initial_velocity: f64,
}

impl Default for SpringTiming {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl SpringTiming {
    /// Create a spring curve with the given damping ratio.
    ///
    /// The ratio is clamped to `[MIN_DAMPING_RATIO, 1.0]`.
    #[must_use]
    pub fn new(damping_ratio: f64) -> Self {
        let damping_ratio = if damping_ratio.is_finite() {
            damping_ratio.clamp(MIN_DAMPING_RATIO, 1.0)
        } else {
            1.0
        };
        Self {
            damping_ratio,
            initial_velocity: 0.0,
        }
    }

    /// Set the initial velocity (builder pattern).
    #[must_use]
    pub fn with_initial_velocity(mut self, velocity: f64) -> Self {
        self.initial_velocity = if velocity.is_finite() { velocity } else { 0.0 };
        self
    }

    #[inline]
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        self.damping_ratio
    }

    #[inline]
    #[must_use]
    pub fn initial_velocity(&self) -> f64 {
        self.initial_velocity
    }

    /// Natural frequency in radians per normalized time unit.
    #[inline]
    fn natural_frequency(&self) -> f64 {
        SETTLE_EXPONENT / self.damping_ratio
    }

    /// Displacement at normalized time `t`.
    #[must_use]
    pub fn value_at(&self, t: f64) -> f64 {
        if !t.is_finite() || t >= 1.0 {
            return 1.0;
        }
        let t = t.max(0.0);
        let zeta = self.damping_ratio;
        let w0 = self.natural_frequency();
        let v0 = self.initial_velocity;

        if zeta >= 1.0 {
            let envelope = (-w0 * t).exp();
            return 1.0 - envelope * (1.0 + (w0 - v0) * t);
        }

        let wd = w0 * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * w0 * t).exp();
        let (sin, cos) = (wd * t).sin_cos();
        1.0 - envelope * (cos + ((zeta * w0 - v0) / wd) * sin)
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

/// Common spring configurations for drawer motion.
pub mod presets {
    use super::SpringTiming;

    /// No overshoot.
    #[must_use]
    pub fn critical() -> SpringTiming {
        SpringTiming::new(1.0)
    }

    /// Subtle settle, the drawer default.
    #[must_use]
    pub fn smooth() -> SpringTiming {
        SpringTiming::new(0.8)
    }

    /// Visible bounce.
    #[must_use]
    pub fn bouncy() -> SpringTiming {
        SpringTiming::new(0.5)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn max_over(spring: &SpringTiming) -> f64 {
        (0..=1000)
            .map(|i| spring.value_at(f64::from(i) / 1000.0))
            .fold(f64::MIN, f64::max)
    }

    #[test]
    fn starts_at_zero() {
        for zeta in [0.3, 0.8, 1.0] {
            let spring = SpringTiming::new(zeta);
            assert!(spring.value_at(0.0).abs() < 1e-12, "zeta {zeta}");
        }
    }

    #[test]
    fn settles_exactly_at_one() {
        let spring = presets::bouncy();
        assert_eq!(spring.value_at(1.0), 1.0);
        assert_eq!(spring.value_at(3.0), 1.0);
        assert_eq!(spring.value_at(f64::NAN), 1.0);
    }

    #[test]
    fn nearly_settled_just_before_end() {
        for zeta in [0.3, 0.8, 1.0] {
            let spring = SpringTiming::new(zeta);
            let v = spring.value_at(0.999);
            assert!((v - 1.0).abs() < 0.02, "zeta {zeta}: {v}");
        }
    }

    #[test]
    fn critical_damping_no_overshoot() {
        let max = max_over(&presets::critical());
        assert!(max <= 1.0 + 1e-9, "critical overshoot {max}");
    }

    #[test]
    fn bouncy_spring_overshoots() {
        let max = max_over(&presets::bouncy());
        assert!(max > 1.01, "bouncy should overshoot, got {max}");
    }

    #[test]
    fn damping_ratio_clamped() {
        assert_eq!(SpringTiming::new(0.0).damping_ratio(), MIN_DAMPING_RATIO);
        assert_eq!(SpringTiming::new(4.0).damping_ratio(), 1.0);
        assert_eq!(SpringTiming::new(f64::NAN).damping_ratio(), 1.0);
    }

    #[test]
    fn initial_velocity_moves_curve_forward() {
        let still = SpringTiming::new(1.0);
        let flung = SpringTiming::new(1.0).with_initial_velocity(5.0);
        assert!(flung.value_at(0.05) > still.value_at(0.05));
    }
}
