//! headless-run: drive the simulation without a renderer and print a summary.
//!
//! Usage:
//!   headless-run --frames 3600 --seed 7
//!   headless-run --config sim.json --frames 600 --events

use std::collections::BTreeMap;
use std::process;

use glam::Vec2;

use danmaku_core::events::SimEvent;
use danmaku_core::types::PlayField;
use danmaku_sim::config::SimConfig;
use danmaku_sim::player::{PlayerInput, PlayerMover};
use danmaku_sim::SimulationEngine;

const FRAME_DT: f32 = 1.0 / 60.0;

struct Options {
    frames: u64,
    seed: Option<u64>,
    config: Option<String>,
    print_events: bool,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h" || a == "help") {
        print_usage();
        return;
    }

    let options = match parse_options(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            process::exit(1);
        }
    };

    let mut config = match &options.config {
        Some(path) => match SimConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading {path}: {e}");
                process::exit(1);
            }
        },
        None => SimConfig::default(),
    };
    if let Some(seed) = options.seed {
        config.seed = seed;
    }

    run(config, &options);
}

fn print_usage() {
    eprintln!(
        "headless-run: run the danmaku simulation without a renderer\n\
         \n\
           --frames <N>     Frames to simulate at 60 fps (default: 3600)\n\
           --seed <S>       RNG seed (overrides the config file)\n\
           --config <path>  JSON config file; missing fields use defaults\n\
           --events         Print every event as a JSON line\n\
         \n\
         Examples:\n\
         \n\
           headless-run --frames 3600 --seed 7\n\
           RUST_LOG=debug headless-run --config sim.json --events\n"
    );
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        frames: 3600,
        seed: None,
        config: None,
        print_events: false,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--frames" => options.frames = parse_value(args, i, "--frames")?,
            "--seed" => options.seed = Some(parse_value(args, i, "--seed")?),
            "--config" => options.config = Some(value_at(args, i, "--config")?.to_string()),
            "--events" => {
                options.print_events = true;
                i += 1;
                continue;
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
        i += 2;
    }
    Ok(options)
}

fn value_at<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} needs a value"))
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    let raw = value_at(args, i, flag)?;
    raw.parse()
        .map_err(|_| format!("Invalid value for {flag}: {raw}"))
}

/// Tag of an event as it appears in its JSON form.
fn event_name(event: &SimEvent) -> String {
    serde_json::to_value(event)
        .ok()
        .and_then(|v| v.get("type").and_then(|t| t.as_str()).map(str::to_string))
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Autopilot: slide under the lowest-id enemy and keep firing.
fn autopilot(engine: &SimulationEngine, mover: &PlayerMover) -> PlayerInput {
    let snapshot = engine.snapshot();
    let target_x = snapshot
        .enemies
        .iter()
        .find(|e| e.state.is_hittable())
        .map(|e| e.position.x)
        .unwrap_or(snapshot.field.width * 0.5);

    let dx = target_x - mover.position.x;
    let direction = if dx.abs() < 4.0 { 0.0 } else { dx.signum() };
    PlayerInput {
        direction: Vec2::new(direction, 0.0),
        focus: dx.abs() < 40.0,
        shoot: true,
    }
}

fn run(config: SimConfig, options: &Options) {
    let field = PlayField::default();
    log::info!("running {} frames with seed {}", options.frames, config.seed);

    let mut engine = SimulationEngine::new(config);
    let mut mover = PlayerMover::at_start(field);
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();

    for _ in 0..options.frames {
        let input = autopilot(&engine, &mover);
        if mover.step(input, FRAME_DT, field) {
            engine.fire_player_weapon(mover.position);
        }

        let events = engine.update(FRAME_DT, field.width, field.height, mover.position);
        for event in &events {
            *counts.entry(event_name(event)).or_default() += 1;
            if options.print_events {
                match serde_json::to_string(event) {
                    Ok(line) => println!("{line}"),
                    Err(e) => log::warn!("failed to serialize event: {e}"),
                }
            }
        }
    }

    let snapshot = engine.snapshot();
    let summary = serde_json::json!({
        "frames": snapshot.time.frame,
        "elapsed_secs": snapshot.time.elapsed_secs,
        "wave": snapshot.wave.wave,
        "boss_wave": snapshot.wave.boss_wave,
        "score": snapshot.score,
        "live_bullets": snapshot.bullets.len(),
        "live_enemies": snapshot.enemies.len(),
        "live_items": snapshot.items.len(),
        "events": counts,
    });
    match serde_json::to_string_pretty(&summary) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error writing summary: {e}");
            process::exit(1);
        }
    }
}
