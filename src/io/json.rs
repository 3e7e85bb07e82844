use std::io::{self, Write};

use crate::sim::history::Sample;

/// Band around zero error inside which the loop counts as settled.
pub const SETTLING_TOLERANCE: f64 = 2.0;

/// Summary statistics computed from a scripted run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub duration: f64,
    pub final_position: f64,
    pub final_error: f64,
    /// Furthest excursion past the setpoint, 0 if the loop never crossed it.
    pub peak_overshoot: f64,
    pub max_abs_force: f64,
    /// First time after which |error| stays inside [`SETTLING_TOLERANCE`].
    pub settling_time: Option<f64>,
}

impl RunSummary {
    /// Compute summary statistics from a sample series toward `setpoint`.
    pub fn from_samples(samples: &[Sample], setpoint: f64) -> Self {
        let last = samples.last().copied().unwrap_or(Sample {
            t: 0.0,
            error: setpoint,
            p_term: 0.0,
            i_term: 0.0,
            d_term: 0.0,
            total_force: 0.0,
            position: 0.0,
            velocity: 0.0,
        });

        // Overshoot is measured in the direction of approach from center.
        let peak_overshoot = samples
            .iter()
            .map(|s| {
                if setpoint >= 0.0 {
                    s.position - setpoint
                } else {
                    setpoint - s.position
                }
            })
            .fold(0.0_f64, f64::max);

        let max_abs_force = samples
            .iter()
            .map(|s| s.total_force.abs())
            .fold(0.0_f64, f64::max);

        // Earliest sample of the trailing in-band run; None if the series
        // ends outside the band.
        let settling_time = samples
            .iter()
            .rev()
            .take_while(|s| s.error.abs() <= SETTLING_TOLERANCE)
            .last()
            .map(|s| s.t);

        RunSummary {
            duration: last.t,
            final_position: last.position,
            final_error: last.error,
            peak_overshoot,
            max_abs_force,
            settling_time,
        }
    }
}

/// Write a run summary as JSON to a writer.
pub fn write_summary<W: Write>(
    writer: &mut W,
    name: &str,
    summary: &RunSummary,
) -> io::Result<()> {
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"scenario\": \"{}\",", name)?;
    writeln!(writer, "  \"duration_s\": {:.2},", summary.duration)?;
    writeln!(writer, "  \"final_position\": {:.3},", summary.final_position)?;
    writeln!(writer, "  \"final_error\": {:.3},", summary.final_error)?;
    writeln!(writer, "  \"peak_overshoot\": {:.3},", summary.peak_overshoot)?;
    writeln!(writer, "  \"max_abs_force\": {:.2},", summary.max_abs_force)?;
    match summary.settling_time {
        Some(t) => writeln!(writer, "  \"settling_time_s\": {:.2}", t)?,
        None => writeln!(writer, "  \"settling_time_s\": null")?,
    }
    writeln!(writer, "}}")?;
    Ok(())
}

/// Write a run summary JSON to a file.
pub fn write_summary_file(path: &str, name: &str, summary: &RunSummary) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, name, summary)
}
