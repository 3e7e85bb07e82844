use crate::params::ControlParameters;

// ---------------------------------------------------------------------------
// Preset teaching scenarios
// ---------------------------------------------------------------------------

/// A named parameter/setpoint bundle demonstrating one control-loop lesson.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    pub params: ControlParameters,
    pub setpoint: f64,
}

pub mod presets {
    use super::*;

    fn single_term(kp: f64, ki: f64, kd: f64, wind: f64) -> ControlParameters {
        let mut p = ControlParameters::with_gains(kp, ki, kd);
        p.p_enabled = kp != 0.0;
        p.i_enabled = ki != 0.0;
        p.d_enabled = kd != 0.0;
        p.wind = wind;
        p.time_scale = 1.0;
        p.mass = 1.0;
        p
    }

    /// P-only under constant opposing wind: the loop settles where the
    /// proportional force balances the disturbance, short of the target.
    pub fn steady_state_error() -> Scenario {
        Scenario {
            name: "Steady-state error",
            description: "Proportional control alone cannot cancel constant wind",
            params: single_term(5.0, 0.0, 0.0, -10.0),
            setpoint: 100.0,
        }
    }

    /// Same plant with the integral term enabled: the accumulated error
    /// builds whatever force offsets the wind and the residual vanishes.
    /// Ki stays below damping * kp / mass, the marginal-stability boundary
    /// of the linearized loop.
    pub fn integral_action() -> Scenario {
        Scenario {
            name: "Integral action",
            description: "The integral term accumulates until the wind is cancelled",
            params: single_term(5.0, 0.3, 0.0, -10.0),
            setpoint: 100.0,
        }
    }

    /// Weak gain against light wind: near the target the commanded force
    /// drops inside the actuator deadband and the platform sticks early.
    pub fn deadband_stall() -> Scenario {
        Scenario {
            name: "Deadband stall",
            description: "Small commands die in the actuator deadband",
            params: single_term(3.0, 0.0, 0.0, -3.0),
            setpoint: 50.0,
        }
    }

    /// All three terms with the interactive defaults — a well-behaved
    /// reference tuning.
    pub fn full_pid() -> Scenario {
        let mut params = ControlParameters::default();
        params.wind = -10.0;
        params.time_scale = 1.0;
        Scenario {
            name: "Full PID",
            description: "Default interactive tuning, all terms enabled",
            params,
            setpoint: 100.0,
        }
    }

    /// Every preset, in teaching order.
    pub fn all() -> Vec<Scenario> {
        vec![
            steady_state_error(),
            integral_action(),
            deadband_stall(),
            full_pid(),
        ]
    }
}
