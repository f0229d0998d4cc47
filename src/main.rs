//! Vehicle rumble simulator entry point.
//!
//! Runs the rumble pipeline headless against a scripted timeline and prints
//! the combined rumble level for every frame. Useful for tuning the values in
//! the rumble configuration file without starting the game.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --damage 0.5:40 --boost 1.0:60 --destroy-at 3.0
//! ```

use clap::Parser;
use std::path::PathBuf;

use vehicle_rumble::resources::rumbleconfig::RumbleConfig;
use vehicle_rumble::simulation::{
    RumbleSample, Simulation, Timeline, TimelineAction, frame_count, parse_timed_value,
};

/// Headless vehicle rumble simulator
#[derive(Parser)]
#[command(version, about = "Simulate camera/controller rumble for a scripted vehicle timeline.")]
struct Cli {
    /// Rumble configuration file (INI). Defaults are used if it can't be read.
    #[arg(long, value_name = "PATH", default_value = "./rumble.ini")]
    config: PathBuf,

    /// Write the effective configuration to PATH and exit.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,

    /// Seconds to simulate.
    #[arg(long, default_value_t = 5.0)]
    duration: f32,

    /// Simulation frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Damage hit on the focused vehicle, as TIME:AMOUNT. Repeatable.
    #[arg(long, value_name = "TIME:AMOUNT", value_parser = parse_timed_value)]
    damage: Vec<(f32, f32)>,

    /// Forward boost change, as TIME:VALUE. Repeatable; holds until changed.
    #[arg(long, value_name = "TIME:VALUE", value_parser = parse_timed_value)]
    boost: Vec<(f32, f32)>,

    /// Destroy the focused vehicle at this time.
    #[arg(long, value_name = "TIME")]
    destroy_at: Option<f32>,

    /// Print the samples as a JSON array instead of text lines.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = RumbleConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using default rumble settings", e);
    }

    // Early-exit: dump the config and quit
    if let Some(path) = cli.write_config {
        config.config_path = path;
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Rumble config written to {}", config.config_path.display());
        return;
    }

    if let Err(e) = frame_count(cli.duration, cli.fps) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    if let Some(time) = cli.destroy_at {
        if !time.is_finite() || time < 0.0 {
            eprintln!("Error: --destroy-at must be a non-negative number, got {time}");
            std::process::exit(1);
        }
    }

    let mut timeline = Timeline::new();
    for (time, damage) in cli.damage {
        timeline.push(time, TimelineAction::Damage(damage));
    }
    for (time, boost) in cli.boost {
        timeline.push(time, TimelineAction::Boost(boost));
    }
    if let Some(time) = cli.destroy_at {
        timeline.push(time, TimelineAction::Destroy);
    }

    let mut simulation = Simulation::new(config, timeline);
    let samples = match simulation.run(cli.duration, cli.fps) {
        Ok(samples) => samples,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    log::info!("Simulated {} frames", samples.len());

    if cli.json {
        match serde_json::to_string_pretty(&samples) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing samples: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print_samples(&samples);
    }
}

fn print_samples(samples: &[RumbleSample]) {
    println!("{:>6} {:>8} {:>8} {:>6}", "frame", "time", "level", "active");
    for s in samples {
        println!(
            "{:>6} {:>8.3} {:>8.4} {:>6}",
            s.frame, s.time, s.level, s.active
        );
    }
}
