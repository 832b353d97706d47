use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use primscene_control::{ControlAction, ControlError, ControlQueue};
use primscene_kernel::{AnimationConfig, Scene, SceneEvent};
use primscene_render::{Appearance, DebugTextRenderer, FrameOutput, Projection, Renderer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "primscene", about = "Headless driver for the primscene animation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the default scene
    Info,
    /// Drive the scene at a fixed frame rate and print frames
    Simulate {
        #[command(flatten)]
        scene: SceneArgs,
        /// Number of frames to run
        #[arg(short = 'n', long, default_value = "600")]
        frames: u64,
        /// Frames per second of the simulated display
        #[arg(long, default_value = "60")]
        fps: f64,
        /// Seed for shape and colour selection
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Print every Nth frame
        #[arg(long, default_value = "60")]
        every: u64,
        /// Viewport aspect ratio
        #[arg(long, default_value = "1.7777778")]
        aspect: f32,
        /// Print frames as JSON lines
        #[arg(long)]
        json: bool,
        /// Apply a control action before a frame, e.g. `120:objects=off`
        #[arg(long = "at", value_name = "FRAME:ACTION", value_parser = parse_scheduled)]
        scheduled: Vec<(u64, ControlAction)>,
    },
    /// Run the camera around its path once and report each arrival
    Patrol {
        /// Frames per second of the simulated display
        #[arg(long, default_value = "60")]
        fps: f64,
        /// Seconds per edge
        #[arg(long, default_value = "10")]
        camera_period: f64,
        /// Give up after this many frames
        #[arg(long, default_value = "100000")]
        max_frames: u64,
    },
}

/// Configuration sources, applied in order: defaults, file, flags.
#[derive(Args)]
struct SceneArgs {
    /// JSON animation config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Animate the bodies
    #[arg(long)]
    animate_objects: bool,
    /// Animate the camera along its patrol path
    #[arg(long)]
    animate_camera: bool,
    /// Seconds between body direction flips
    #[arg(long)]
    object_period: Option<f64>,
    /// Seconds per camera path edge
    #[arg(long)]
    camera_period: Option<f64>,
}

impl SceneArgs {
    fn load(&self) -> anyhow::Result<AnimationConfig> {
        let mut config = match &self.config {
            Some(path) => AnimationConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => AnimationConfig::default(),
        };
        config.animate_objects |= self.animate_objects;
        config.animate_camera |= self.animate_camera;
        if let Some(period) = self.object_period {
            config.object_period = period;
        }
        if let Some(period) = self.camera_period {
            config.camera_period = period;
        }
        config.validate().context("invalid animation config")?;
        Ok(config)
    }
}

fn parse_scheduled(s: &str) -> Result<(u64, ControlAction), String> {
    let (frame, action) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FRAME:ACTION, got {s:?}"))?;
    let frame = frame
        .parse()
        .map_err(|_| format!("{frame:?} is not a frame number"))?;
    let action = action.parse().map_err(|e: ControlError| e.to_string())?;
    Ok((frame, action))
}

fn timestamp_ms(frame: u64, fps: f64) -> f64 {
    frame as f64 * 1000.0 / fps
}

fn log_events(scene: &mut Scene) {
    for event in scene.drain_events() {
        match event {
            SceneEvent::SpeedFlipped {
                body,
                at,
                signed_speed,
            } => tracing::info!("t={at:.3}s body {body} reversed, speed {signed_speed}"),
            SceneEvent::WaypointReached { index, at } => {
                tracing::info!("t={at:.3}s camera reached waypoint {index}")
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("primscene v{}", env!("CARGO_PKG_VERSION"));
            let scene = Scene::new(AnimationConfig::default())?;
            let config = scene.config();
            println!(
                "config: animate_objects={} animate_camera={} object_period={}s camera_period={}s",
                config.animate_objects,
                config.animate_camera,
                config.object_period,
                config.camera_period
            );
            for (i, body) in scene.bodies().iter().enumerate() {
                let m = &body.motion;
                println!(
                    "body {i}: at {} speed {} along {}, spin {} around {}, period {}s",
                    body.transform.translation,
                    m.signed_speed,
                    m.translation_axis,
                    m.rotation_speed,
                    m.rotation_axis,
                    m.period
                );
            }
            for (i, p) in scene.camera().waypoints().iter().enumerate() {
                println!("waypoint {i}: {p}");
            }
        }
        Commands::Simulate {
            scene: scene_args,
            frames,
            fps,
            seed,
            every,
            aspect,
            json,
            scheduled,
        } => {
            anyhow::ensure!(fps > 0.0, "fps must be positive, got {fps}");
            let config = scene_args.load()?;
            let mut scene = Scene::new(config)?;
            let appearances = Appearance::roll(seed, scene.bodies().len());
            let projection = Projection::with_aspect(aspect);
            let renderer = DebugTextRenderer::new();
            let mut queue = ControlQueue::new();
            let every = every.max(1);

            tracing::info!(frames, fps, seed, "simulating");
            for n in 1..=frames {
                for (_, action) in scheduled.iter().filter(|(at, _)| *at == n) {
                    queue.push(action.clone());
                }
                queue
                    .apply_all(&mut scene)
                    .with_context(|| format!("applying control actions before frame {n}"))?;

                scene.frame(timestamp_ms(n, fps));
                log_events(&mut scene);

                if n % every == 0 || n == frames {
                    let output = FrameOutput::build(&scene, &appearances, &projection);
                    if json {
                        println!("{}", serde_json::to_string(&output)?);
                    } else {
                        print!("{}", renderer.render(&output));
                    }
                }
            }
        }
        Commands::Patrol {
            fps,
            camera_period,
            max_frames,
        } => {
            anyhow::ensure!(fps > 0.0, "fps must be positive, got {fps}");
            let config = AnimationConfig {
                animate_camera: true,
                camera_period,
                ..AnimationConfig::default()
            };
            let mut scene = Scene::new(config).context("invalid patrol settings")?;

            println!("Patrol: {fps} fps, {camera_period}s per edge");
            let mut lap_done = false;
            for n in 1..=max_frames {
                scene.frame(timestamp_ms(n, fps));
                for event in scene.drain_events() {
                    if let SceneEvent::WaypointReached { index, at } = event {
                        println!(
                            "frame {n:>6} t={at:>8.3}s waypoint {index} at {}",
                            scene.camera().position()
                        );
                        lap_done |= index == 0;
                    }
                }
                if lap_done {
                    break;
                }
            }
            if !lap_done {
                anyhow::bail!("camera did not complete a lap within {max_frames} frames");
            }
            println!("Lap complete after {} frames", scene.frame_count());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_simulate_flags() {
        let cli = Cli::try_parse_from([
            "primscene",
            "simulate",
            "--animate-objects",
            "--camera-period",
            "4",
            "-n",
            "30",
            "--at",
            "10:camera=on",
        ])
        .unwrap();
        let Commands::Simulate {
            scene,
            frames,
            scheduled,
            ..
        } = cli.command
        else {
            panic!("expected simulate");
        };
        assert_eq!(frames, 30);
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].0, 10);

        let config = scene.load().unwrap();
        assert!(config.animate_objects);
        assert!(!config.animate_camera);
        assert_eq!(config.camera_period, 4.0);
    }

    #[test]
    fn flags_are_validated() {
        let args = SceneArgs {
            config: None,
            animate_objects: false,
            animate_camera: false,
            object_period: Some(-1.0),
            camera_period: None,
        };
        assert!(args.load().is_err());
    }

    #[test]
    fn scheduled_action_needs_frame() {
        assert!(parse_scheduled("objects=on").is_err());
        assert!(parse_scheduled("x:objects=on").is_err());
        assert!(parse_scheduled("5:objects=sometimes").is_err());
        assert!(parse_scheduled("5:object-period=2").is_ok());
    }

    #[test]
    fn timestamps_are_evenly_spaced() {
        assert_eq!(timestamp_ms(0, 60.0), 0.0);
        assert_eq!(timestamp_ms(30, 60.0), 500.0);
        assert_eq!(timestamp_ms(10, 10.0), 1000.0);
    }
}
