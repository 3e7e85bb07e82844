use std::collections::VecDeque;

// ---------------------------------------------------------------------------
// Time-windowed sample history for plotting
// ---------------------------------------------------------------------------

/// How much simulated time the history retains.
pub const WINDOW_SECONDS: f64 = 20.0;

/// Outcome of one simulation tick, immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Simulated time of the tick.
    pub t: f64,
    pub error: f64,
    pub p_term: f64,
    pub i_term: f64,
    pub d_term: f64,
    pub total_force: f64,
    pub position: f64,
    pub velocity: f64,
}

/// Sliding window over the most recent [`WINDOW_SECONDS`] of samples.
///
/// Samples arrive in strictly increasing `t`; eviction pops from the front
/// as new samples push to the back, so each append is amortized O(1) no
/// matter how long the simulation has run.
#[derive(Debug, Clone, Default)]
pub struct HistoryBuffer {
    samples: VecDeque<Sample>,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample and evict everything older than the window.
    pub fn push(&mut self, sample: Sample) {
        let cutoff = sample.t - WINDOW_SECONDS;
        while self.samples.front().is_some_and(|s| s.t < cutoff) {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn oldest(&self) -> Option<&Sample> {
        self.samples.front()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
