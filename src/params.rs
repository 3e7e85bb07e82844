use std::ops::RangeInclusive;

use crate::control::term::TermPolicy;
use crate::error::SimError;

// ---------------------------------------------------------------------------
// Contract ranges (enforced by the UI layer; the core only rejects the fatal
// cases and offers `clamped` as a convenience)
// ---------------------------------------------------------------------------

pub const KP_RANGE: RangeInclusive<f64> = 0.0..=20.0;
pub const KI_RANGE: RangeInclusive<f64> = 0.0..=3.0;
pub const KD_RANGE: RangeInclusive<f64> = 0.0..=10.0;
pub const MASS_RANGE: RangeInclusive<f64> = 0.1..=10.0;
pub const WIND_RANGE: RangeInclusive<f64> = -20.0..=20.0;
pub const TIME_SCALE_RANGE: RangeInclusive<f64> = 0.5..=5.0;

// ---------------------------------------------------------------------------
// Control parameters
// ---------------------------------------------------------------------------

/// The full set of operator-tunable values, passed into every tick as one
/// value object. The core never reads tunables from anywhere else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlParameters {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub p_enabled: bool,
    pub i_enabled: bool,
    pub d_enabled: bool,
    /// Platform mass, kg-equivalent units.
    pub mass: f64,
    /// Constant disturbance force. Not subject to the actuator deadband.
    pub wind: f64,
    /// Multiplier from wall-clock frame time to simulated time.
    pub time_scale: f64,
}

impl Default for ControlParameters {
    fn default() -> Self {
        Self {
            kp: 3.345,
            ki: 0.014,
            kd: 3.486,
            p_enabled: true,
            i_enabled: true,
            d_enabled: true,
            mass: 1.0,
            wind: 0.0,
            time_scale: 2.2,
        }
    }
}

impl ControlParameters {
    /// Default parameters with the given gains. Handy for scripted scenarios.
    pub fn with_gains(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd, ..Self::default() }
    }

    pub fn wind(mut self, wind: f64) -> Self {
        self.wind = wind;
        self
    }

    pub fn time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale;
        self
    }

    pub fn mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Which PID terms currently participate in the control output.
    pub fn term_policy(&self) -> TermPolicy {
        TermPolicy::from_flags(self.p_enabled, self.i_enabled, self.d_enabled)
    }

    /// Reject the fatal cases: non-finite values and a mass the integrator
    /// cannot divide by. Out-of-range but finite values are trusted input.
    pub fn validate(&self) -> Result<(), SimError> {
        for (name, value) in [
            ("kp", self.kp),
            ("ki", self.ki),
            ("kd", self.kd),
            ("mass", self.mass),
            ("wind", self.wind),
            ("time_scale", self.time_scale),
        ] {
            if !value.is_finite() {
                return Err(SimError::NonFiniteParameter(name));
            }
        }
        if self.mass <= 0.0 {
            return Err(SimError::NonPositiveMass(self.mass));
        }
        Ok(())
    }

    /// Clamp every tunable into its contract range. For the UI layer;
    /// the core itself never silently rewrites caller values.
    pub fn clamped(mut self) -> Self {
        self.kp = self.kp.clamp(*KP_RANGE.start(), *KP_RANGE.end());
        self.ki = self.ki.clamp(*KI_RANGE.start(), *KI_RANGE.end());
        self.kd = self.kd.clamp(*KD_RANGE.start(), *KD_RANGE.end());
        self.mass = self.mass.clamp(*MASS_RANGE.start(), *MASS_RANGE.end());
        self.wind = self.wind.clamp(*WIND_RANGE.start(), *WIND_RANGE.end());
        self.time_scale = self
            .time_scale
            .clamp(*TIME_SCALE_RANGE.start(), *TIME_SCALE_RANGE.end());
        self
    }
}
