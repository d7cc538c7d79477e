//! QFIT Noisy Training Run
//!
//! Drives a training session the way a polling host would: one tick per
//! timer fire, a visualization refresh after each, stop once the log is full.
//!
//! ```text
//! RUST_LOG=debug cargo run -p qfit_engine --example noise_training -- '{"dp": 0.02}'
//! ```

use anyhow::Context;
use log::info;
use qfit_engine::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let noise: NoiseParams = match std::env::args().nth(1) {
        Some(json) => serde_json::from_str(&json).context("noise argument must be a JSON object")?,
        None => NoiseParams::noiseless().with_phase_damping(0.01),
    };

    let config = SessionConfig::default();
    println!("{}", config);
    println!("{}\n", noise);

    let mut session = TrainingSession::new(config)?;

    println!("┌──────┬────────────┬──────────────────────────────┐");
    println!("│ Step │ Loss       │ |c_n|, n = 0..3              │");
    println!("├──────┼────────────┼──────────────────────────────┤");

    while session.should_continue() {
        let loss = session.tick(&noise)?.last_loss().unwrap_or(f64::NAN);
        let frame = session.refresh(&noise)?;

        let center = frame.bin_count / 2;
        let low: Vec<String> = frame.spectrum.comb[center..]
            .iter()
            .take(4)
            .map(|c| format!("{:.3}", c))
            .collect();

        println!("│ {:4} │ {:10.6} │ {:28} │", frame.loss.len(), loss, low.join(" "));
    }

    println!("└──────┴────────────┴──────────────────────────────┘\n");

    let frame = session.refresh(&noise)?;
    info!("histogram rows: {}", frame.histogram.len());

    println!("Final predictions:");
    for point in frame.predictions.iter().step_by(3) {
        println!(
            "  x = {:+.3}  f(x) = {:+.4}  target = {:+.4}",
            point.x, point.predicted, point.target
        );
    }

    session.end();
    Ok(())
}
