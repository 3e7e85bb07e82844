use std::io::{self, Write};

use crate::sim::history::Sample;

/// Write a sample series to CSV format.
///
/// Columns: t, error, p_term, i_term, d_term, total_force, position, velocity
pub fn write_samples<'a, W, I>(writer: &mut W, samples: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Sample>,
{
    writeln!(writer, "t,error,p_term,i_term,d_term,total_force,position,velocity")?;

    for s in samples {
        writeln!(
            writer,
            "{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}",
            s.t, s.error, s.p_term, s.i_term, s.d_term, s.total_force, s.position, s.velocity,
        )?;
    }

    Ok(())
}

/// Write a sample series to a CSV file at the given path.
pub fn write_samples_file(path: &str, samples: &[Sample]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_samples(&mut file, samples)
}
