use crate::control::term::{Term, TermPolicy};
use crate::params::ControlParameters;

// ---------------------------------------------------------------------------
// PID Controller (single axis)
// ---------------------------------------------------------------------------

/// Anti-windup bound on the accumulated integral.
pub const INTEGRAL_LIMIT: f64 = 1000.0;
/// Bound on the summed control output.
pub const OUTPUT_LIMIT: f64 = 100.0;

/// One controller update, broken out per term.
///
/// `p`, `i`, `d` are the unclamped contributions (disabled terms report 0);
/// `force` is their sum clamped to `±OUTPUT_LIMIT` and is what actually
/// drives the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PidOutput {
    pub force: f64,
    pub p: f64,
    pub i: f64,
    pub d: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PidController {
    integral: f64,
    prev_error: Option<f64>,
    last_output: PidOutput,
}

impl PidController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the control force for the current error.
    ///
    /// The integral accumulates `error * dt` only while the I term is
    /// enabled, and resumes from its persisted value on re-enable; it is
    /// never cleared implicitly.
    ///
    /// `prev_error` tracks every effective call, enabled D term or not, so
    /// re-enabling D differentiates against the immediately preceding tick
    /// rather than across the disabled span.
    ///
    /// `dt <= 0` is a no-op tick: the previous output is returned and no
    /// state is touched.
    pub fn update(&mut self, error: f64, dt: f64, params: &ControlParameters) -> PidOutput {
        if dt <= 0.0 {
            return self.last_output;
        }

        let policy: TermPolicy = params.term_policy();

        let p = if policy.enabled(Term::P) { params.kp * error } else { 0.0 };

        let i = if policy.enabled(Term::I) {
            self.integral =
                (self.integral + error * dt).clamp(-INTEGRAL_LIMIT, INTEGRAL_LIMIT);
            params.ki * self.integral
        } else {
            0.0
        };

        let d = if policy.enabled(Term::D) {
            match self.prev_error {
                Some(prev) => params.kd * (error - prev) / dt,
                // First tick after construction/reset: no history to
                // differentiate against.
                None => 0.0,
            }
        } else {
            0.0
        };
        self.prev_error = Some(error);

        let force = (p + i + d).clamp(-OUTPUT_LIMIT, OUTPUT_LIMIT);
        self.last_output = PidOutput { force, p, i, d };
        self.last_output
    }

    /// Accumulated integral, exposed for display.
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Most recent effective output (what a `dt <= 0` call returns).
    pub fn last_output(&self) -> PidOutput {
        self.last_output
    }

    /// Zero the integral and forget the error history. The next update's
    /// derivative term is 0.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = None;
        self.last_output = PidOutput::default();
    }
}
