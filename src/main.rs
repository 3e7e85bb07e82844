use platform_sim::io::json::RunSummary;
use platform_sim::scenario::presets;
use platform_sim::sim::runner::run_scripted;
use platform_sim::Sample;

const FRAME_DT: f64 = 0.05; // 20 Hz, the nominal interactive cadence
const RUN_SECONDS: f64 = 120.0;

fn main() {
    env_logger::init();

    println!();
    println!("====================================================================");
    println!("  PID PLATFORM SIMULATOR — scripted scenario runs");
    println!("====================================================================");

    for scenario in presets::all() {
        let steps = (RUN_SECONDS / (FRAME_DT * scenario.params.time_scale)) as usize;
        let samples = match run_scripted(
            scenario.params,
            scenario.setpoint,
            FRAME_DT,
            steps,
        ) {
            Ok(samples) => samples,
            Err(e) => {
                eprintln!("  {}: rejected: {e}", scenario.name);
                continue;
            }
        };

        let summary = RunSummary::from_samples(&samples, scenario.setpoint);

        println!();
        println!("  {} — {}", scenario.name, scenario.description);
        println!("  ──────────────────────────────────────────────────────────────────");
        println!(
            "  Gains:         Kp={:<6.3} Ki={:<6.3} Kd={:<6.3}  (P:{} I:{} D:{})",
            scenario.params.kp,
            scenario.params.ki,
            scenario.params.kd,
            onoff(scenario.params.p_enabled),
            onoff(scenario.params.i_enabled),
            onoff(scenario.params.d_enabled),
        );
        println!(
            "  Plant:         mass={:<5.2} wind={:<6.1} setpoint={:.1}",
            scenario.params.mass, scenario.params.wind, scenario.setpoint
        );
        println!(
            "  Final:         position={:>8.2}   error={:>7.2}   |force|max={:>6.1}",
            summary.final_position, summary.final_error, summary.max_abs_force
        );
        match summary.settling_time {
            Some(t) => println!(
                "  Settled:       t={:>6.1} s   overshoot={:.2}",
                t, summary.peak_overshoot
            ),
            None => println!(
                "  Settled:       never (residual {:.2})",
                summary.final_error
            ),
        }

        print_sampled_table(&samples);
    }

    println!();
    println!("====================================================================");
    println!();
}

fn onoff(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

/// Print a handful of evenly spaced rows from the run.
fn print_sampled_table(samples: &[Sample]) {
    println!(
        "  {:>7}  {:>9}  {:>9}  {:>9}  {:>9}",
        "t (s)", "error", "force", "pos", "vel"
    );
    println!("  {}", "─".repeat(52));

    let sample_interval = (samples.len() / 8).max(1);
    for (i, s) in samples.iter().enumerate() {
        if i % sample_interval != 0 && i != samples.len() - 1 {
            continue;
        }
        println!(
            "  {:>7.1}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9.2}",
            s.t, s.error, s.total_force, s.position, s.velocity
        );
    }
}
