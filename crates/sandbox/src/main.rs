//! Headless scene runner
//!
//! Loads a RON scene, optionally a physics settings file, and runs the
//! universe for a number of ticks while logging collisions.
//!
//! ```text
//! sandbox --scene scenes/orbit.ron --settings scenes/orbit.toml --ticks 600
//! ```

mod scene;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use matter_physics::foundation::logging;
use matter_physics::foundation::time::Stopwatch;
use matter_physics::prelude::*;

use crate::scene::SceneDescription;

#[derive(Parser, Debug)]
#[command(name = "sandbox", about = "Run a matter_physics scene headlessly")]
struct Args {
    /// Scene file (RON)
    #[arg(long)]
    scene: PathBuf,

    /// Physics settings (TOML or RON); defaults are used when omitted
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Number of ticks (or frames, in fixed-step mode) to run
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Explicit tick length in seconds; fixed-step driving is used when omitted
    #[arg(long)]
    dt: Option<f64>,

    /// Frame time fed to the fixed-step driver
    #[arg(long, default_value_t = 1.0 / 60.0)]
    frame_time: f64,
}

/// Logs pose updates at trace level
#[derive(Default)]
struct LogSink {
    updates: usize,
}

impl RenderSink for LogSink {
    fn update_pose(&mut self, graphic: GraphicHandle, position: Vec3) {
        self.updates += 1;
        log::trace!(
            "graphic {} -> ({:.3}, {:.3}, {:.3})",
            graphic.0,
            position.x,
            position.y,
            position.z
        );
    }
}

fn log_report(report: &TickReport, names: &HashMap<MatterId, String>) {
    let name = |id: MatterId| names.get(&id).map_or("?", String::as_str);
    for pair in &report.entered {
        log::info!("contact began: {} <-> {}", name(pair.matter_a), name(pair.matter_b));
    }
    for pair in &report.exited {
        log::info!("contact ended: {} <-> {}", name(pair.matter_a), name(pair.matter_b));
    }
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    let config = match &args.settings {
        Some(path) => PhysicsConfig::load_from_file(path)
            .with_context(|| format!("failed to load settings {}", path.display()))?,
        None => PhysicsConfig::default(),
    };

    let scene = SceneDescription::load(&args.scene)?;
    let mut universe = Universe::new(config).context("invalid physics settings")?;
    let names: HashMap<MatterId, String> = scene
        .spawn_into(&mut universe)?
        .into_iter()
        .map(|(name, id)| (id, name))
        .collect();
    log::info!("Spawned {} bodies from {}", universe.len(), args.scene.display());

    let mut sink = LogSink::default();
    let stopwatch = Stopwatch::start_new();

    for _ in 0..args.ticks {
        match args.dt {
            Some(dt) => {
                let report = universe.tick(dt, &mut sink)?;
                log_report(&report, &names);
            }
            None => {
                for report in universe.step_fixed(args.frame_time, &mut sink)? {
                    log_report(&report, &names);
                }
            }
        }
    }

    log::info!(
        "Ran {} ticks ({:.3}s simulated) in {:.2}ms, {} pose updates",
        universe.tick_count(),
        universe.elapsed(),
        stopwatch.elapsed_millis(),
        sink.updates
    );

    let mut bodies: Vec<_> = universe.iter().collect();
    bodies.sort_by(|a, b| names.get(&a.0).cmp(&names.get(&b.0)));
    for (id, matter) in bodies {
        let position = matter.position();
        let velocity = matter.velocity();
        log::info!(
            "{:>12}: position ({:.3}, {:.3}, {:.3}) velocity ({:.3}, {:.3}, {:.3})",
            names.get(&id).map_or("?", String::as_str),
            position.x,
            position.y,
            position.z,
            velocity.x,
            velocity.y,
            velocity.z
        );
    }

    Ok(())
}
