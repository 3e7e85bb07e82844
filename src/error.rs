use thiserror::Error;

// ---------------------------------------------------------------------------
// Precondition violations
// ---------------------------------------------------------------------------

/// Errors returned when a caller violates a core precondition.
///
/// A rejected call never mutates simulation state: the tick (or parameter
/// swap) either fully completes or leaves everything untouched.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SimError {
    /// Platform mass must be strictly positive to divide force by it.
    #[error("mass must be positive, got {0}")]
    NonPositiveMass(f64),

    /// A parameter carried NaN or infinity; it must never reach stored state.
    #[error("parameter `{0}` is not finite")]
    NonFiniteParameter(&'static str),

    /// Wall-clock frame deltas cannot run backwards. `frame_dt == 0` is a
    /// defined no-op, not an error.
    #[error("frame_dt must be non-negative, got {0}")]
    NegativeFrameDt(f64),
}
