use crate::params::ControlParameters;
use crate::physics::actuator::apply_deadband;

// ---------------------------------------------------------------------------
// Platform dynamics: 1-axis point mass under control force, wind and damping
// ---------------------------------------------------------------------------

/// Velocity-proportional damping coefficient.
pub const DAMPING_COEFF: f64 = 0.1;

// Floor for the force/mass division. Callers are validated to mass > 0
// already; this keeps a misbehaving caller from minting NaN/Inf.
const MASS_FLOOR: f64 = 1e-3;

/// Platform position and velocity along the control axis.
///
/// Signed offset from center, in the same abstract units the setpoint uses.
/// Deliberately unbounded: overshoot must stay visible, not get clipped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlatformState {
    pub position: f64,
    pub velocity: f64,
}

impl PlatformState {
    /// At-rest state at the center of the axis.
    pub const ORIGIN: PlatformState = PlatformState { position: 0.0, velocity: 0.0 };

    /// Advance one step under a controller force plus wind, semi-implicit
    /// Euler (velocity first, then position from the *new* velocity — stable
    /// under the stiff gains interactive tuning produces).
    ///
    /// `dt == 0` returns the state unchanged, exactly; pause handling
    /// depends on this being a true identity.
    pub fn step(&self, force: f64, params: &ControlParameters, dt: f64) -> PlatformState {
        if dt == 0.0 {
            return *self;
        }

        let effective = apply_deadband(force);
        let net = effective + params.wind - DAMPING_COEFF * self.velocity;
        let accel = net / params.mass.max(MASS_FLOOR);

        let velocity = self.velocity + accel * dt;
        let position = self.position + velocity * dt;
        PlatformState { position, velocity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calm() -> ControlParameters {
        let mut p = ControlParameters::default();
        p.wind = 0.0;
        p.mass = 1.0;
        p
    }

    #[test]
    fn zero_dt_is_exact_identity() {
        let state = PlatformState { position: 3.5, velocity: -1.25 };
        assert_eq!(state.step(42.0, &calm(), 0.0), state);
        assert_eq!(state.step(-7.0, &calm().wind(15.0), 0.0), state);
    }

    #[test]
    fn single_step_matches_hand_computation() {
        let state = PlatformState { position: 0.0, velocity: 2.0 };
        // force 10 passes the deadband; net = 10 + 0 - 0.1 * 2 = 9.8
        let next = state.step(10.0, &calm(), 0.1);
        let v = 2.0 + 9.8 * 0.1;
        assert!((next.velocity - v).abs() < 1e-12);
        // Position integrates the updated velocity (semi-implicit).
        assert!((next.position - v * 0.1).abs() < 1e-12);
    }

    #[test]
    fn deadband_attenuates_control_but_not_wind() {
        let state = PlatformState::ORIGIN;
        let next = state.step(3.0, &calm().wind(10.0), 0.1);
        // net = 0.3 + 10, wind untouched by the deadband
        assert!((next.velocity - 10.3 * 0.1).abs() < 1e-12);
    }

    #[test]
    fn wind_pushes_a_free_platform() {
        let mut state = PlatformState::ORIGIN;
        let params = calm().wind(5.0);
        for _ in 0..100 {
            state = state.step(0.0, &params, 0.01);
        }
        assert!(state.position > 0.0);
        assert!(state.velocity > 0.0);
    }

    #[test]
    fn damping_opposes_motion() {
        let coasting = PlatformState { position: 0.0, velocity: 10.0 };
        let next = coasting.step(0.0, &calm(), 0.1);
        assert!(next.velocity < 10.0, "Damping must bleed velocity");
        assert!(next.velocity > 0.0, "But not reverse it in one small step");
    }

    #[test]
    fn heavier_platform_accelerates_less() {
        let light = PlatformState::ORIGIN.step(50.0, &calm().mass(1.0), 0.1);
        let heavy = PlatformState::ORIGIN.step(50.0, &calm().mass(10.0), 0.1);
        assert!(light.velocity > heavy.velocity);
    }

    #[test]
    fn mass_floor_keeps_output_finite() {
        // Validation upstream rejects mass <= 0; the step itself must still
        // never divide by zero if handed one.
        let bad = calm().mass(0.0);
        let next = PlatformState::ORIGIN.step(10.0, &bad, 0.01);
        assert!(next.velocity.is_finite());
        assert!(next.position.is_finite());
    }
}
