pub mod actuator;
pub mod platform;

pub use actuator::{apply_deadband, DEADBAND_FACTOR, DEADBAND_THRESHOLD};
pub use platform::{PlatformState, DAMPING_COEFF};
