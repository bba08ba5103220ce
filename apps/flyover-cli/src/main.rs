use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use flyover_camera::{CameraMode, ChaseCamera, ChaseConfig};
use flyover_flight::{Aircraft, FlightModel};
use flyover_hud::HudSnapshot;
use flyover_input::{Control, ControlState};
use flyover_render::{DebugTextRenderer, RenderView, Renderer};
use flyover_scene::{City, CityConfig, SPAWN_ALTITUDE};
use glam::Vec3;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flyover-cli", about = "Headless tools for the flyover demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum TurnInput {
    Left,
    Right,
}

#[derive(Clone, Copy, ValueEnum)]
enum PitchInput {
    Up,
    Down,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate info
    Info,
    /// Simulate a flight headlessly and print trajectory snapshots
    Fly {
        /// Simulated duration in seconds
        #[arg(short, long, default_value = "5.0")]
        seconds: f32,
        /// Fixed simulation rate
        #[arg(long, default_value = "60")]
        fps: u32,
        /// Hold throttle-up for the whole run
        #[arg(long)]
        throttle: bool,
        /// Hold a turn for the whole run
        #[arg(long)]
        turn: Option<TurnInput>,
        /// Hold a pitch input for the whole run
        #[arg(long)]
        pitch: Option<PitchInput>,
        /// City generation seed (scenery for the printed frames)
        #[arg(long, default_value = "0")]
        seed: u64,
    },
    /// Generate a city and print its layout statistics
    City {
        /// Generation seed
        #[arg(short, long, default_value = "0")]
        seed: u64,
        /// Print every building footprint
        #[arg(long)]
        buildings: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("flyover-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("input:  {}", flyover_input::crate_info());
            println!("camera: {}", flyover_camera::crate_info());
            println!("scene:  {}", flyover_scene::crate_info());
            println!("hud:    {}", flyover_hud::crate_info());
            println!("render: {}", flyover_render::crate_info());
        }
        Commands::Fly {
            seconds,
            fps,
            throttle,
            turn,
            pitch,
            seed,
        } => {
            let mut controls = ControlState::new();
            if throttle {
                controls.press(Control::ThrottleUp);
            }
            match turn {
                Some(TurnInput::Left) => controls.press(Control::YawLeft),
                Some(TurnInput::Right) => controls.press(Control::YawRight),
                None => {}
            }
            match pitch {
                Some(PitchInput::Up) => controls.press(Control::PitchUp),
                Some(PitchInput::Down) => controls.press(Control::PitchDown),
                None => {}
            }

            let city = City::generate(CityConfig {
                seed,
                ..CityConfig::default()
            });
            let model = FlightModel::default();
            let mut aircraft =
                Aircraft::at_position(&model.config, Vec3::new(0.0, SPAWN_ALTITUDE, 0.0));
            let mut chase = ChaseCamera::new(ChaseConfig::default());
            let renderer = DebugTextRenderer::new();

            let dt = 1.0 / fps as f32;
            let steps = (seconds * fps as f32).ceil() as u64;
            println!("Simulating {seconds} s at {fps} fps ({steps} steps)");

            for step in 0..steps {
                model.update(&mut aircraft, &controls, dt);
                chase.update(Some(&aircraft.transform), dt);

                // One snapshot per simulated second.
                if step % fps as u64 == 0 {
                    let pose = chase.pose();
                    let view = RenderView {
                        eye: pose.eye,
                        target: pose.look_at,
                        fov_degrees: 75.0,
                    };
                    print!("{}", renderer.render(&city, &aircraft, &view));
                    let hud = HudSnapshot::capture(
                        &aircraft,
                        &model.config,
                        &controls,
                        CameraMode::Follow,
                    );
                    println!("{hud}");
                }
            }

            let p = aircraft.transform.position;
            println!(
                "Final: pos=({:.2}, {:.2}, {:.2}) speed={:.3} bank={:.3}",
                p.x, p.y, p.z, aircraft.speed, aircraft.bank_angle
            );
        }
        Commands::City { seed, buildings } => {
            let city = City::generate(CityConfig {
                seed,
                ..CityConfig::default()
            });
            println!(
                "City seed={}: {} buildings, {} trees, {} instances",
                seed,
                city.buildings.len(),
                city.trees.len(),
                city.instances().len()
            );
            if buildings {
                for b in &city.buildings {
                    println!(
                        "  building at ({:.1}, {:.1}) size {:.1}x{:.1}x{:.1}",
                        b.center.x, b.center.z, b.size.x, b.size.y, b.size.z
                    );
                }
            }
        }
    }

    Ok(())
}
