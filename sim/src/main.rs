mod park;
mod run;
mod script;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use skate_physics::{DEFAULT_DT, PhysicsSettings, SceneGeometry};

use run::{RunOptions, simulate};
use script::InputScript;

#[derive(Parser, Debug)]
#[command(
    name = "skate_sim",
    version,
    about = "Run the skate body through a scripted session in the demo park"
)]
struct Opts {
    /// Frames to simulate (default: length of the script)
    #[arg(long)]
    frames: Option<u32>,

    /// Seconds per frame
    #[arg(long, default_value_t = DEFAULT_DT)]
    dt: f32,

    /// Physics settings as JSON; missing fields keep their defaults
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Input script as JSON (default: built-in demo run)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Log the body's state every N frames (0 = never)
    #[arg(long, default_value_t = 30)]
    trace_every: u32,

    /// Print the default settings as JSON and exit
    #[arg(long)]
    dump_settings: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("skate_sim=info".parse()?))
        .init();

    let opts = Opts::parse();

    if opts.dump_settings {
        println!("{}", serde_json::to_string_pretty(&PhysicsSettings::default())?);
        return Ok(());
    }

    let settings = match &opts.settings {
        Some(path) => load_settings(path)?,
        None => PhysicsSettings::default(),
    };
    let script = match &opts.script {
        Some(path) => load_script(path)?,
        None => InputScript::demo(),
    };

    let scene = SceneGeometry::build(park::skatepark());
    tracing::info!(entries = scene.len(), "park built");

    let frames = opts.frames.unwrap_or_else(|| script.total_frames());
    let summary = simulate(
        settings,
        &scene,
        park::spawn_point(),
        &script,
        &RunOptions {
            frames,
            dt: opts.dt,
            trace_every: opts.trace_every,
        },
    );

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let [x, y, z] = summary.final_position;
        println!("frames:     {}", summary.frames);
        println!("final:      ({x:.2}, {y:.2}, {z:.2}) yaw {:.2}", summary.final_yaw);
        println!("collisions: {}", summary.collisions);
        println!("landings:   {}", summary.landings);
        println!("max height: {:.2}", summary.max_height);
        println!("max speed:  {:.3}", summary.max_speed);
        println!("distance:   {:.1}", summary.distance_travelled);
        println!("pickups:    {}/{}", summary.pickups.len(), park::COIN_COUNT);
    }
    Ok(())
}

fn load_settings(path: &Path) -> Result<PhysicsSettings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    parse_settings(&text).with_context(|| format!("invalid settings in {}", path.display()))
}

fn parse_settings(text: &str) -> Result<PhysicsSettings> {
    let settings: PhysicsSettings = serde_json::from_str(text)?;
    settings.validate()?;
    Ok(settings)
}

fn load_script(path: &Path) -> Result<InputScript> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading script from {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid script in {}", path.display()))
}
