//! # engine_app: headless bunnymark
//!
//! Spawns bouncing, hue-cycling sprites and drives them through the
//! scheduler at a fixed rate, rendering into an in-memory screen.
//!
//! ## Pipeline
//!
//! | registry | participant        | priority |
//! |----------|--------------------|----------|
//! | update   | spawner            | 10       |
//! | update   | bounce             | 5        |
//! | update   | ScriptSystem (hue) | 0        |
//! | update   | hud                | -10      |
//! | draw     | sprite_renderer    | 10       |
//! | draw     | ScriptSystem       | 0        |
//! | draw     | hud (offscreen)    | -10      |
//! | draw     | compositor         | -20      |

mod components;
mod scripts;
mod systems;

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Result;
use clap::Parser;
use engine_component::Query;
use engine_ecs::World;
use engine_math::{Transform2D, Vec2};
use engine_system::{
    Rgba, Scheduler, ScriptOptions, Surface, SystemOptions, TRANSPARENT, TickConfig, TickLoop,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use components::{Hue, Sprite};
use scripts::{HueCycle, Outline};
use systems::{Bounce, Compositor, Hud, Spawner, SpriteRenderer};

const HUD_HEIGHT: u32 = 4;
const OUTLINE: Rgba = [0, 0, 0, 255];

#[derive(Parser, Debug)]
#[command(name = "engine_app", about = "Headless bunnymark for the engine scheduler")]
struct Args {
    /// Number of bunnies to spawn
    #[arg(short, long, default_value_t = 1000)]
    bunnies: usize,

    /// Bunnies spawned per tick
    #[arg(long, default_value_t = 100)]
    batch: usize,

    /// Ticks to run (0 = until interrupted); overrides the config file
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Ticks per second; overrides the config file
    #[arg(long)]
    tick_rate: Option<f64>,

    /// Screen width in pixels
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Screen height in pixels
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// JSON file holding a tick config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for bunny placement
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,

    /// Start with hue cycling switched off
    #[arg(long)]
    monochrome: bool,
}

fn main() -> Result<()> {
    let directive: Directive = "engine_app=info".parse()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    let args = Args::parse();
    let config = tick_config(&args)?;
    info!(
        bunnies = args.bunnies,
        width = args.width,
        height = args.height,
        tick_rate = config.tick_rate,
        max_ticks = config.max_ticks,
        "bunnymark starting"
    );

    let scheduler = build_scheduler(&args)?;
    let screen = Surface::new(args.width, args.height);
    let mut tick_loop = TickLoop::new(config, scheduler, screen);
    let ticks = tick_loop.run()?;

    let (scheduler, screen) = tick_loop.into_parts();
    info!(
        ticks,
        elapsed = ?scheduler.clock().elapsed(),
        entities = scheduler.world().entity_count(),
        drawn_pixels = screen.pixels().len() - screen.count_pixels(TRANSPARENT),
        "bunnymark finished"
    );
    Ok(())
}

/// The tick config from `--config`, with `--ticks`/`--tick-rate` applied on top.
fn tick_config(args: &Args) -> Result<TickConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => TickConfig::default(),
    };
    if let Some(ticks) = args.ticks {
        config.max_ticks = ticks;
    }
    if let Some(rate) = args.tick_rate {
        config.tick_rate = rate;
    }
    config.validate()?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<TickConfig> {
    info!(path = %path.display(), "loading tick config");
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn build_scheduler(args: &Args) -> Result<Scheduler> {
    let mut world = World::new();
    components::register_all(&mut world)?;

    let bounds = Vec2::new(args.width as f32, args.height as f32);
    let hud = Surface::new(args.width, HUD_HEIGHT).into_shared();
    let colorful = Rc::new(Cell::new(!args.monochrome));

    let mut scheduler = Scheduler::new(world);
    scheduler.register(
        Spawner::new(args.bunnies, args.batch, bounds, args.seed, colorful),
        SystemOptions::new().with_priority(10),
    )?;
    scheduler.register(
        Bounce::new(bounds),
        SystemOptions::new().with_priority(5),
    )?;
    scheduler.register(
        SpriteRenderer::new(),
        SystemOptions::new().with_priority(10),
    )?;
    scheduler.register(
        Hud::new(),
        SystemOptions::new()
            .with_priority(-10)
            .with_target(hud.clone()),
    )?;
    scheduler.register(
        Compositor::new(hud, 0, 0),
        SystemOptions::new().with_priority(-20),
    )?;

    scheduler.attach_script(
        Query::new().with::<Hue>(),
        HueCycle::new(90.0),
        ScriptOptions::default(),
    )?;
    scheduler.attach_script(
        Query::new().with::<Transform2D>().with::<Sprite>(),
        Outline::new(OUTLINE),
        ScriptOptions::default(),
    )?;

    info!(
        updaters = ?scheduler.update_order(),
        drawers = ?scheduler.draw_order(),
        scripts = scheduler.script_count(),
        "scheduler ready"
    );
    Ok(scheduler)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["engine_app"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_cli_overrides_defaults() {
        let args = args(&["--ticks", "30", "--tick-rate", "120"]);
        let config = tick_config(&args).unwrap();
        assert_eq!(config.max_ticks, 30);
        assert_eq!(config.tick_rate, 120.0);
    }

    #[test]
    fn test_bad_tick_rate_rejected() {
        assert!(tick_config(&args(&["--tick-rate", "0"])).is_err());
    }

    #[test]
    fn test_pipeline_order() {
        let scheduler = build_scheduler(&args(&["--bunnies", "5"])).unwrap();
        let updaters = vec!["spawner", "bounce", "ScriptSystem", "hud"];
        assert_eq!(scheduler.update_order(), updaters);
        let drawers = vec!["sprite_renderer", "ScriptSystem", "hud", "compositor"];
        assert_eq!(scheduler.draw_order(), drawers);
        assert_eq!(scheduler.script_count(), 2);
    }

    #[test]
    fn test_short_run_spawns_and_draws() {
        let args = args(&[
            "--bunnies", "50", "--batch", "20", "--width", "64", "--height", "48",
        ]);
        let scheduler = build_scheduler(&args).unwrap();
        let mut tick_loop = TickLoop::new(
            TickConfig {
                tick_rate: 1000.0,
                max_ticks: 3,
            },
            scheduler,
            Surface::new(args.width, args.height),
        );
        assert_eq!(tick_loop.run().unwrap(), 3);
        assert_eq!(tick_loop.scheduler().world().entity_count(), 50);
        assert_eq!(tick_loop.screen().count_pixels(TRANSPARENT), 0);
    }

    #[test]
    fn test_tiny_tick_rate_rejected() {
        let args = args(&["--tick-rate", "1e-20"]);
        assert!(tick_config(&args).is_err());
    }

    #[test]
    fn test_monochrome_flag() {
        assert!(!args(&[]).monochrome);
        assert!(args(&["--monochrome"]).monochrome);
    }
}
