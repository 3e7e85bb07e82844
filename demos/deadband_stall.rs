use platform_sim::physics::actuator::{DEADBAND_FACTOR, DEADBAND_THRESHOLD};
use platform_sim::scenario::presets;
use platform_sim::sim::runner::run_scripted;

/// Show the actuator deadband parking the platform short of the setpoint:
/// once the commanded force drops under the threshold, only a tenth of it
/// reaches the platform and the wind wins.
fn main() {
    env_logger::init();

    let scenario = presets::deadband_stall();
    let samples = run_scripted(scenario.params, scenario.setpoint, 0.02, 40_000)
        .expect("preset parameters are valid");
    let last = samples.last().expect("run produced samples");

    println!("{} — {}", scenario.name, scenario.description);
    println!(
        "Deadband: commands below {DEADBAND_THRESHOLD} units are scaled by {DEADBAND_FACTOR}"
    );
    println!("Setpoint:       {:.1}", scenario.setpoint);
    println!("Stall position: {:.2}", last.position);
    println!("Residual error: {:.2}", scenario.setpoint - last.position);
    println!("Final |force|:  {:.2}", last.total_force.abs());
    println!();
    println!(
        "Without the deadband the loop would settle at {:.2}.",
        scenario.setpoint + scenario.params.wind / scenario.params.kp
    );
}
