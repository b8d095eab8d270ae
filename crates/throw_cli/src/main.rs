//! Throw Slider CLI
//!
//! Mount a slider on a headless flex row, inspect its loop and simulate
//! frames and scripted input. Change events are printed as JSON lines.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use throw_slider::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::{Action, SceneConfig, ScriptedAction};

#[derive(Parser)]
#[command(name = "throw-slider")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Headless throw slider driver", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SceneArgs {
    /// Scene file (TOML); overrides the flags below
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Number of uniform items
    #[arg(long, default_value = "5")]
    items: usize,

    /// Width of each uniform item in px
    #[arg(long, default_value = "100")]
    width: f32,

    /// Container width in px
    #[arg(long, default_value = "300")]
    container: f32,

    /// Center the active item
    #[arg(long)]
    center: bool,

    /// Start playing after mount
    #[arg(long)]
    autoplay: bool,

    /// Play backwards
    #[arg(long)]
    reversed: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print loop geometry and marker times
    Inspect {
        #[command(flatten)]
        scene: SceneArgs,
    },

    /// Run frames and scripted input, printing change events
    Simulate {
        #[command(flatten)]
        scene: SceneArgs,

        /// Seconds to simulate
        #[arg(long, default_value = "10")]
        seconds: f32,

        /// Frames per second
        #[arg(long, default_value = "60")]
        fps: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Inspect { scene } => cmd_inspect(&scene),
        Commands::Simulate {
            scene,
            seconds,
            fps,
        } => cmd_simulate(&scene, seconds, fps),
    }
}

fn load_scene(args: &SceneArgs) -> Result<SceneConfig> {
    if let Some(path) = &args.scene {
        info!("Loading scene {}", path.display());
        return SceneConfig::load(path);
    }
    let mut scene = SceneConfig::uniform(args.items, args.width, args.container);
    scene.slider = scene
        .slider
        .with_center(args.center)
        .with_autoplay(args.autoplay)
        .with_reversed(args.reversed);
    Ok(scene)
}

/// Mount a slider and settle every image right away
fn mount(
    scene: &SceneConfig,
    on_change: impl FnMut(&ChangeEvent) + 'static,
) -> Result<ThrowSlider<FlexRowSurface>> {
    let surface = scene.surface()?;
    let mut slider = ThrowSlider::new(surface, scene.slider.clone())?
        .on_change(on_change)
        .mount()?;
    for (index, item) in scene.items.iter().enumerate() {
        if item.image {
            slider.image_settled(index, ImageLoad::Loaded)?;
        }
    }
    Ok(slider)
}

#[derive(Serialize)]
struct LoopReport<'a> {
    items: usize,
    total_width: f32,
    duration: f32,
    widths: &'a [f32],
    labels: &'a [f32],
    times: &'a [f32],
}

fn cmd_inspect(args: &SceneArgs) -> Result<()> {
    let scene = load_scene(args)?;
    let slider = mount(&scene, |_| {})?;
    let Some(infinite_loop) = slider.infinite_loop() else {
        anyhow::bail!("Slider did not build its loop");
    };

    let report = LoopReport {
        items: infinite_loop.len(),
        total_width: infinite_loop.total_width(),
        duration: infinite_loop.duration(),
        widths: &infinite_loop.geometry().widths,
        labels: infinite_loop.labels(),
        times: infinite_loop.times(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[derive(Serialize)]
struct FrameEvent {
    time: f32,
    #[serde(flatten)]
    change: ChangeEvent,
}

fn cmd_simulate(args: &SceneArgs, seconds: f32, fps: u32) -> Result<()> {
    if fps == 0 {
        anyhow::bail!("fps must be at least 1");
    }
    let scene = load_scene(args)?;
    let mut slider = mount(&scene, |event| {
        debug!(index = event.index, "active item changed");
    })?;

    if let Some(index) = slider.current_index() {
        print_event(
            0.0,
            ChangeEvent {
                index,
                previous: None,
            },
        )?;
    }

    let dt = 1.0 / fps as f32;
    let frames = (seconds * fps as f32).ceil() as u32;
    let mut script = scene.actions.iter().peekable();
    let mut drag: Option<DragScript> = None;

    for frame in 1..=frames {
        let now = frame as f32 * dt;
        let now_ms = now as f64 * 1000.0;

        while let Some(action) = script.next_if(|a| a.at <= now) {
            if let Some(started) = run_action(&mut slider, action, now_ms)? {
                drag = Some(started);
            }
        }

        let mut events = Vec::new();
        if let Some(script) = drag.as_mut() {
            let (x, done) = script.position(now_ms);
            events.extend(slider.pointer_move(x, now_ms));
            if done {
                events.extend(slider.pointer_up(now_ms));
                drag = None;
            }
        }
        events.extend(slider.tick(dt));

        for event in events {
            print_event(now, event)?;
        }
    }

    info!(
        "Simulated {} frames, ended on item {:?}",
        frames,
        slider.current_index()
    );
    slider.dispose();
    Ok(())
}

/// A scripted drag in progress
struct DragScript {
    from: f32,
    to: f32,
    start_ms: f64,
    duration_ms: f64,
}

impl DragScript {
    fn position(&self, now_ms: f64) -> (f32, bool) {
        if self.duration_ms <= 0.0 {
            return (self.to, true);
        }
        let t = ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0) as f32;
        (self.from + (self.to - self.from) * t, t >= 1.0)
    }
}

fn run_action(
    slider: &mut ThrowSlider<FlexRowSurface>,
    scripted: &ScriptedAction,
    now_ms: f64,
) -> Result<Option<DragScript>> {
    debug!(at = scripted.at, action = ?scripted.action, "running action");
    match &scripted.action {
        Action::Next => {
            slider.next(None)?;
        }
        Action::Previous => {
            slider.previous(None)?;
        }
        Action::GoTo { index } => {
            slider.go_to(*index, None)?;
        }
        Action::Drag {
            from,
            to,
            duration_ms,
        } => {
            slider.pointer_down(*from, now_ms);
            return Ok(Some(DragScript {
                from: *from,
                to: *to,
                start_ms: now_ms,
                duration_ms: *duration_ms,
            }));
        }
        Action::Hover { enter } => {
            if *enter {
                slider.pointer_enter();
            } else {
                slider.pointer_leave();
            }
        }
        Action::Resize { width } => {
            slider.surface_mut().set_container_width(*width)?;
            if !slider.on_resize(*width) {
                info!("Resize to {} px kept the previous layout", width);
            }
        }
        Action::ToggleAutoplay => slider.toggle_autoplay(None),
    }
    Ok(None)
}

fn print_event(time: f32, change: ChangeEvent) -> Result<()> {
    println!("{}", serde_json::to_string(&FrameEvent { time, change })?);
    Ok(())
}
