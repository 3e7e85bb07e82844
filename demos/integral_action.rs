use platform_sim::io::json::{write_summary, RunSummary};
use platform_sim::scenario::presets;
use platform_sim::sim::runner::run_scripted;

/// Run the steady-state-error lesson both ways: P-only against a constant
/// wind, then the same loop with the integral term enabled.
fn main() {
    env_logger::init();

    let frame_dt = 0.02;
    let steps = 30_000; // 600 s simulated

    for scenario in [presets::steady_state_error(), presets::integral_action()] {
        let samples = run_scripted(scenario.params, scenario.setpoint, frame_dt, steps)
            .expect("preset parameters are valid");
        let summary = RunSummary::from_samples(&samples, scenario.setpoint);

        println!("{} — {}", scenario.name, scenario.description);
        let mut out = std::io::stdout();
        write_summary(&mut out, scenario.name, &summary).expect("stdout write");
        println!();
    }

    println!("P alone parks short of the target; the integral term closes the gap.");
}
