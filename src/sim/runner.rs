use log::{debug, warn};

use crate::control::pid::PidController;
use crate::error::SimError;
use crate::params::ControlParameters;
use crate::physics::platform::PlatformState;
use crate::sim::history::{HistoryBuffer, Sample};

// ---------------------------------------------------------------------------
// Simulation loop: per-tick orchestration of PID + physics + history
// ---------------------------------------------------------------------------

/// Whether ticks advance the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    /// Ticks are accepted but nothing advances: no controller or physics
    /// call, no sample, simulated time frozen.
    Paused,
}

/// Read-only view of the most recent tick, for the display layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Snapshot {
    pub position: f64,
    pub velocity: f64,
    pub last_force: f64,
    pub last_p: f64,
    pub last_i: f64,
    pub last_d: f64,
    pub setpoint: f64,
}

/// The orchestrator. Owns every piece of mutable simulation state and is
/// driven by an external scheduler calling [`tick`](Simulation::tick) —
/// nominally at render cadence, but the math only sees `frame_dt`.
#[derive(Debug, Clone)]
pub struct Simulation {
    params: ControlParameters,
    pid: PidController,
    platform: PlatformState,
    history: HistoryBuffer,
    setpoint: f64,
    time: f64,
    run_state: RunState,
}

impl Simulation {
    /// Build a simulation with the platform at rest at center and the
    /// setpoint on it. Rejects unusable parameters up front.
    pub fn new(params: ControlParameters) -> Result<Self, SimError> {
        params.validate()?;
        Ok(Self {
            params,
            pid: PidController::new(),
            platform: PlatformState::ORIGIN,
            history: HistoryBuffer::new(),
            setpoint: 0.0,
            time: 0.0,
            run_state: RunState::Running,
        })
    }

    /// Advance one tick of wall-clock `frame_dt`.
    ///
    /// Either the whole tick happens — controller, integrator, history — or
    /// none of it does. `frame_dt == 0` and paused ticks are defined no-ops;
    /// a negative `frame_dt` is rejected without touching state.
    pub fn tick(&mut self, frame_dt: f64) -> Result<(), SimError> {
        if !frame_dt.is_finite() {
            warn!("rejecting tick with frame_dt {frame_dt}");
            return Err(SimError::NonFiniteParameter("frame_dt"));
        }
        if frame_dt < 0.0 {
            warn!("rejecting tick with frame_dt {frame_dt}");
            return Err(SimError::NegativeFrameDt(frame_dt));
        }
        if self.run_state == RunState::Paused || frame_dt == 0.0 {
            return Ok(());
        }

        let sim_dt = frame_dt * self.params.time_scale;
        let error = self.setpoint - self.platform.position;

        // Fixed order: the force must exist before it can move the platform.
        let out = self.pid.update(error, sim_dt, &self.params);
        self.platform = self.platform.step(out.force, &self.params, sim_dt);

        self.time += sim_dt;
        self.history.push(Sample {
            t: self.time,
            error,
            p_term: out.p,
            i_term: out.i,
            d_term: out.d,
            total_force: out.force,
            position: self.platform.position,
            velocity: self.platform.velocity,
        });
        Ok(())
    }

    /// Point the controller at a new target. Takes effect on the next tick's
    /// error computation; the platform is never teleported.
    pub fn set_setpoint(&mut self, x: f64) {
        self.setpoint = x;
    }

    /// Swap in a new parameter set between ticks, as one atomic value.
    /// A rejected set leaves the previous parameters live.
    pub fn apply_parameters(&mut self, params: ControlParameters) -> Result<(), SimError> {
        if let Err(e) = params.validate() {
            warn!("rejecting parameter set: {e}");
            return Err(e);
        }
        self.params = params;
        Ok(())
    }

    pub fn pause(&mut self) {
        self.run_state = RunState::Paused;
    }

    pub fn resume(&mut self) {
        self.run_state = RunState::Running;
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_paused(&self) -> bool {
        self.run_state == RunState::Paused
    }

    /// Clear the plot history only. Controller and platform keep running
    /// from their current state.
    pub fn reset_graphs(&mut self) {
        debug!("reset graphs at t={:.3}", self.time);
        self.history.clear();
    }

    /// Full reset: history, controller state, platform, clock. The setpoint
    /// survives so the operator's target outlives the reset.
    pub fn reset_all(&mut self) {
        debug!("reset all at t={:.3}", self.time);
        self.history.clear();
        self.pid.reset();
        self.platform = PlatformState::ORIGIN;
        self.time = 0.0;
    }

    pub fn snapshot(&self) -> Snapshot {
        let out = self.pid.last_output();
        Snapshot {
            position: self.platform.position,
            velocity: self.platform.velocity,
            last_force: out.force,
            last_p: out.p,
            last_i: out.i,
            last_d: out.d,
            setpoint: self.setpoint,
        }
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn params(&self) -> &ControlParameters {
        &self.params
    }

    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    /// Simulated time, seconds.
    pub fn time(&self) -> f64 {
        self.time
    }
}

// ---------------------------------------------------------------------------
// Scripted runs (no UI): fixed cadence, every sample collected
// ---------------------------------------------------------------------------

/// Drive a fresh simulation for `steps` ticks of constant `frame_dt` and
/// collect every sample — the history buffer itself only retains the last
/// window. Used by the console binary, the demos, and the scenario tests.
pub fn run_scripted(
    params: ControlParameters,
    setpoint: f64,
    frame_dt: f64,
    steps: usize,
) -> Result<Vec<Sample>, SimError> {
    let mut sim = Simulation::new(params)?;
    sim.set_setpoint(setpoint);

    let mut samples = Vec::with_capacity(steps);
    for _ in 0..steps {
        sim.tick(frame_dt)?;
        if let Some(s) = sim.history().latest() {
            samples.push(*s);
        }
    }
    Ok(samples)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::history::WINDOW_SECONDS;

    /// Gains/flags for a single-term scenario, unit time scale.
    fn scenario(kp: f64, ki: f64, kd: f64, wind: f64) -> ControlParameters {
        let mut p = ControlParameters::with_gains(kp, ki, kd);
        p.p_enabled = kp != 0.0;
        p.i_enabled = ki != 0.0;
        p.d_enabled = kd != 0.0;
        p.wind = wind;
        p.time_scale = 1.0;
        p.mass = 1.0;
        p
    }

    #[test]
    fn deterministic_across_runs() {
        let params = ControlParameters::default().wind(-7.5);
        let a = run_scripted(params, 120.0, 0.05, 2_000).unwrap();
        let b = run_scripted(params, 120.0, 0.05, 2_000).unwrap();
        assert_eq!(a, b, "Identical inputs must reproduce bit-for-bit");
    }

    #[test]
    fn proportional_only_leaves_steady_state_error() {
        // P alone cannot cancel a constant opposing disturbance: the loop
        // settles where kp * error balances the wind, short of the target.
        let params = scenario(5.0, 0.0, 0.0, -10.0);
        let samples = run_scripted(params, 100.0, 0.02, 30_000).unwrap();
        let last = samples.last().unwrap();
        assert!(last.velocity.abs() < 0.5, "Loop should have settled, v={}", last.velocity);
        assert!(
            last.position < 99.0,
            "Expected residual error, position={}",
            last.position
        );
        assert!(last.position > 90.0, "But the loop should still get close");
    }

    #[test]
    fn integral_term_eliminates_steady_state_error() {
        // Ki kept below the damping * kp / mass stability boundary.
        let params = scenario(5.0, 0.3, 0.0, -10.0);
        let samples = run_scripted(params, 100.0, 0.02, 60_000).unwrap();
        let last = samples.last().unwrap();
        assert!(
            last.error.abs() < 0.5,
            "Integral should cancel the wind, error={}",
            last.error
        );
    }

    #[test]
    fn deadband_stalls_short_of_the_setpoint() {
        // Near the target the commanded force drops under the deadband
        // threshold and mostly vanishes; the platform sticks where full
        // force would just reach it, short of the no-deadband residual.
        let params = scenario(3.0, 0.0, 0.0, -3.0);
        let samples = run_scripted(params, 50.0, 0.02, 40_000).unwrap();
        let last = samples.last().unwrap();
        assert!(last.velocity.abs() < 0.2, "Expected a stall, v={}", last.velocity);
        let residual = 50.0 - last.position;
        assert!(
            residual > 1.2,
            "Deadband residual should exceed the 1.0 no-deadband error, got {residual}"
        );
        assert!(residual < 3.0, "Stall point should still be near the target");
    }

    #[test]
    fn tick_accumulates_scaled_time() {
        let mut params = ControlParameters::default();
        params.time_scale = 2.0;
        let mut sim = Simulation::new(params).unwrap();
        for _ in 0..10 {
            sim.tick(0.05).unwrap();
        }
        assert!((sim.time() - 1.0).abs() < 1e-12);
        assert!((sim.history().latest().unwrap().t - 1.0).abs() < 1e-12);
    }

    #[test]
    fn paused_ticks_advance_nothing() {
        let mut sim = Simulation::new(ControlParameters::default().wind(5.0)).unwrap();
        sim.tick(0.05).unwrap();
        let before = sim.snapshot();
        let time_before = sim.time();
        let len_before = sim.history().len();

        sim.pause();
        for _ in 0..50 {
            sim.tick(0.05).unwrap();
        }
        assert_eq!(sim.snapshot(), before);
        assert_eq!(sim.time(), time_before);
        assert_eq!(sim.history().len(), len_before);

        sim.resume();
        sim.tick(0.05).unwrap();
        assert!(sim.time() > time_before);
    }

    #[test]
    fn zero_frame_dt_is_a_no_op() {
        let mut sim = Simulation::new(ControlParameters::default().wind(5.0)).unwrap();
        sim.tick(0.05).unwrap();
        let before = sim.snapshot();
        sim.tick(0.0).unwrap();
        assert_eq!(sim.snapshot(), before);
        assert_eq!(sim.history().len(), 1);
    }

    #[test]
    fn negative_frame_dt_rejected_without_mutation() {
        let mut sim = Simulation::new(ControlParameters::default()).unwrap();
        sim.set_setpoint(50.0);
        sim.tick(0.05).unwrap();
        let before = sim.snapshot();
        let err = sim.tick(-0.05);
        assert_eq!(err, Err(SimError::NegativeFrameDt(-0.05)));
        assert_eq!(sim.snapshot(), before);
    }

    #[test]
    fn apply_parameters_rejects_and_keeps_previous() {
        let mut sim = Simulation::new(ControlParameters::default()).unwrap();
        let bad = ControlParameters::default().mass(0.0);
        assert!(sim.apply_parameters(bad).is_err());
        assert_eq!(sim.params().mass, 1.0);
    }

    #[test]
    fn setpoint_applies_on_next_tick() {
        let mut sim = Simulation::new(scenario(1.0, 0.0, 0.0, 0.0)).unwrap();
        sim.tick(0.1).unwrap();
        assert_eq!(sim.history().latest().unwrap().error, 0.0);
        sim.set_setpoint(10.0);
        sim.tick(0.1).unwrap();
        let s = sim.history().latest().unwrap();
        assert!((s.error - 10.0).abs() < 1e-9, "Error sees the new target");
    }

    #[test]
    fn reset_graphs_keeps_controller_and_platform() {
        let mut sim = Simulation::new(ControlParameters::default()).unwrap();
        sim.set_setpoint(80.0);
        for _ in 0..100 {
            sim.tick(0.05).unwrap();
        }
        let snap = sim.snapshot();
        let t = sim.time();
        sim.reset_graphs();
        assert!(sim.history().is_empty());
        assert_eq!(sim.snapshot(), snap, "Plant and controller must be untouched");
        assert_eq!(sim.time(), t);
    }

    #[test]
    fn reset_all_zeroes_state_but_preserves_setpoint() {
        let mut sim = Simulation::new(ControlParameters::default().wind(3.0)).unwrap();
        sim.set_setpoint(80.0);
        for _ in 0..100 {
            sim.tick(0.05).unwrap();
        }
        sim.reset_all();

        assert!(sim.history().is_empty());
        assert_eq!(sim.time(), 0.0);
        let snap = sim.snapshot();
        assert_eq!(snap.position, 0.0);
        assert_eq!(snap.velocity, 0.0);
        assert_eq!(snap.last_force, 0.0);
        assert_eq!(snap.setpoint, 80.0, "Operator target survives a full reset");

        // First derivative sample after the reset is 0 again.
        sim.tick(0.05).unwrap();
        assert_eq!(sim.history().latest().unwrap().d_term, 0.0);
    }

    #[test]
    fn history_window_bound_holds_during_a_run() {
        let mut params = ControlParameters::default();
        params.time_scale = 1.0;
        let mut sim = Simulation::new(params).unwrap();
        sim.set_setpoint(30.0);
        let frame_dt = 0.05;
        for _ in 0..1_000 {
            // 50 s simulated
            sim.tick(frame_dt).unwrap();
        }
        let now = sim.time();
        let oldest = sim.history().oldest().unwrap().t;
        assert!(oldest >= now - WINDOW_SECONDS);
        assert!(sim.history().len() <= (WINDOW_SECONDS / frame_dt) as usize + 1);
    }
}
