pub mod history;
pub mod runner;

pub use history::{HistoryBuffer, Sample, WINDOW_SECONDS};
pub use runner::{run_scripted, RunState, Simulation, Snapshot};
