pub mod control;
pub mod error;
pub mod io;
pub mod params;
pub mod physics;
pub mod scenario;
pub mod sim;

pub use control::pid::{PidController, PidOutput, INTEGRAL_LIMIT, OUTPUT_LIMIT};
pub use error::SimError;
pub use params::ControlParameters;
pub use physics::actuator::{DEADBAND_FACTOR, DEADBAND_THRESHOLD};
pub use physics::platform::{PlatformState, DAMPING_COEFF};
pub use sim::history::{HistoryBuffer, Sample, WINDOW_SECONDS};
pub use sim::runner::{run_scripted, RunState, Simulation, Snapshot};
