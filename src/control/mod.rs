pub mod pid;
pub mod term;

pub use pid::{PidController, PidOutput};
pub use term::{Term, TermPolicy};
