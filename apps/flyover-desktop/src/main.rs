mod config;

use anyhow::Result;
use clap::Parser;
use config::DemoConfig;
use egui::Context as EguiContext;
use flyover_camera::{CameraMode, ChaseCamera};
use flyover_flight::{Aircraft, FlightModel};
use flyover_hud::HudSnapshot;
use flyover_input::{Control, ControlState};
use flyover_render_wgpu::{ViewCamera, WgpuRenderer};
use flyover_scene::{City, Clouds, PlaneModel, SPAWN_ALTITUDE};
use glam::Vec3;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "flyover-desktop", about = "Arcade flight demo over a procedural city")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON tuning file (flight, chase, city)
    #[arg(long)]
    config: Option<PathBuf>,

    /// City generation seed
    #[arg(long)]
    seed: Option<u64>,
}

/// Static external viewpoint used when the chase camera is toggled off.
const EXTERNAL_EYE: Vec3 = Vec3::new(30.0, 20.0, 30.0);

/// Map a physical key to a flight control. Anything else is ignored.
fn control_for(key: KeyCode) -> Option<Control> {
    match key {
        KeyCode::KeyW => Some(Control::PitchDown),
        KeyCode::KeyS => Some(Control::PitchUp),
        KeyCode::KeyA => Some(Control::YawLeft),
        KeyCode::KeyD => Some(Control::YawRight),
        KeyCode::KeyQ => Some(Control::ThrottleUp),
        KeyCode::KeyE => Some(Control::ThrottleDown),
        KeyCode::KeyC => Some(Control::CameraToggle),
        _ => None,
    }
}

/// Application state.
struct AppState {
    flight: FlightModel,
    aircraft: Aircraft,
    controls: ControlState,
    chase: ChaseCamera,
    camera_mode: CameraMode,
    view: ViewCamera,
    city: City,
    city_instances: Vec<flyover_scene::Instance>,
    clouds: Clouds,
    plane_model: PlaneModel,
    show_hud: bool,
    last_frame: Instant,
}

impl AppState {
    fn new(config: DemoConfig) -> Self {
        let flight = FlightModel::new(config.flight);
        let aircraft = Aircraft::at_position(&flight.config, Vec3::new(0.0, SPAWN_ALTITUDE, 0.0));
        let city = City::generate(config.city);
        let city_instances = city.instances();
        let clouds = Clouds::generate(config.cloud_count, city.config.seed);
        let mut chase = ChaseCamera::new(config.chase);

        // First update snaps the rig straight onto the spawn pose.
        chase.update(Some(&aircraft.transform), 1.0);
        let mut view = ViewCamera::default();
        view.set_pose(chase.pose());

        Self {
            flight,
            aircraft,
            controls: ControlState::new(),
            chase,
            camera_mode: CameraMode::Follow,
            view,
            city,
            city_instances,
            clouds,
            plane_model: PlaneModel::standard(),
            show_hud: true,
            last_frame: Instant::now(),
        }
    }

    /// One frame: flight first, then the camera reads the updated transform.
    fn update(&mut self, dt: f32) {
        self.flight.update(&mut self.aircraft, &self.controls, dt);

        if self.camera_mode == CameraMode::Follow {
            self.chase.update(Some(&self.aircraft.transform), dt);
            self.view.set_pose(self.chase.pose());
        }

        self.clouds.drift();
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        let Some(control) = control_for(key) else {
            return;
        };

        // Toggle on the press edge only; key auto-repeat must not flap the
        // camera mode.
        if control == Control::CameraToggle
            && pressed
            && !self.controls.is_held(Control::CameraToggle)
        {
            self.toggle_camera_mode();
        }

        if pressed {
            self.controls.press(control);
        } else {
            self.controls.release(control);
        }
    }

    fn toggle_camera_mode(&mut self) {
        match self.camera_mode {
            CameraMode::Follow => {
                self.camera_mode = CameraMode::External;
                self.view.eye = EXTERNAL_EYE;
                self.view.look_at = self.aircraft.transform.position;
            }
            CameraMode::External => {
                self.camera_mode = CameraMode::Follow;
                // Re-arm the snap so the rig doesn't lerp in from a stale
                // smoothed position.
                self.chase.reset();
                self.chase.update(Some(&self.aircraft.transform), 1.0);
                self.view.set_pose(self.chase.pose());
            }
        }
        tracing::info!(mode = self.camera_mode.name(), "camera mode switched");
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_hud {
            return;
        }

        let snapshot = HudSnapshot::capture(
            &self.aircraft,
            &self.flight.config,
            &self.controls,
            self.camera_mode,
        );

        egui::Window::new("flyover_hud")
            .title_bar(false)
            .resizable(false)
            .anchor(egui::Align2::LEFT_BOTTOM, [20.0, -20.0])
            .show(ctx, |ui| {
                ui.heading("CONTROLS");
                ui.label("W/S  Pitch down/up");
                ui.label("A/D  Turn left/right");
                ui.label("Q/E  Speed up/down");
                ui.label("C    Toggle camera");
                ui.separator();

                ui.heading("CAMERA");
                ui.label(snapshot.camera_mode.label());
                ui.separator();

                ui.heading("KEY STATES");
                ui.horizontal(|ui| {
                    for key in &snapshot.keys {
                        let color = if key.held {
                            egui::Color32::from_rgb(0, 200, 0)
                        } else {
                            egui::Color32::from_rgb(120, 60, 60)
                        };
                        ui.label(egui::RichText::new(key.label).strong().color(color));
                    }
                });
                ui.separator();

                ui.heading("SPEED");
                let fill = match snapshot.speed_percent {
                    p if p < 30 => egui::Color32::from_rgb(76, 175, 80),
                    p if p < 70 => egui::Color32::from_rgb(255, 193, 7),
                    _ => egui::Color32::from_rgb(244, 67, 54),
                };
                ui.add(
                    egui::ProgressBar::new(snapshot.speed_percent as f32 / 100.0)
                        .fill(fill)
                        .desired_width(180.0),
                );
                ui.label(format!(
                    "{}% ({:.3})",
                    snapshot.speed_percent, snapshot.speed
                ));
            });
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(config: DemoConfig) -> Self {
        Self {
            state: AppState::new(config),
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Flyover")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("flyover_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.state.view.aspect = size.width as f32 / size.height.max(1) as f32;

        let renderer = WgpuRenderer::new(
            &device,
            surface_format,
            size.width,
            size.height,
            self.state.city.config.ground_level,
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(egui_winit) = &mut self.egui_winit {
            let response = egui_winit.on_window_event(self.window.as_ref().unwrap(), &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.state.view.aspect = config.width as f32 / config.height.max(1) as f32;
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if key == KeyCode::F1 && key_state == ElementState::Pressed {
                    self.state.show_hud = !self.state.show_hud;
                    return;
                }
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::Focused(false) => {
                // Keys released while unfocused never send key-up events.
                self.state.controls.clear();
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.state.last_frame).as_secs_f32().min(0.1);
                self.state.last_frame = now;
                self.state.update(dt);

                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                if let Some(renderer) = &self.renderer {
                    renderer.render(
                        device,
                        queue,
                        &view,
                        &self.state.view,
                        &self.state.city_instances,
                        &self.state.clouds,
                        &self.state.plane_model,
                        &self.state.aircraft,
                    );
                }

                let raw_input = self
                    .egui_winit
                    .as_mut()
                    .unwrap()
                    .take_egui_input(self.window.as_ref().unwrap());
                let full_output = self.egui_ctx.run(raw_input, |ctx| {
                    self.state.draw_ui(ctx);
                });

                self.egui_winit.as_mut().unwrap().handle_platform_output(
                    self.window.as_ref().unwrap(),
                    full_output.platform_output,
                );

                let paint_jobs = self
                    .egui_ctx
                    .tessellate(full_output.shapes, full_output.pixels_per_point);

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [
                        self.config.as_ref().unwrap().width,
                        self.config.as_ref().unwrap().height,
                    ],
                    pixels_per_point: full_output.pixels_per_point,
                };

                {
                    let egui_renderer = self.egui_renderer.as_mut().unwrap();
                    for (id, image_delta) in &full_output.textures_delta.set {
                        egui_renderer.update_texture(device, queue, *id, image_delta);
                    }
                    let mut encoder =
                        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("egui_encoder"),
                        });
                    egui_renderer.update_buffers(
                        device,
                        queue,
                        &mut encoder,
                        &paint_jobs,
                        &screen_descriptor,
                    );
                    {
                        let mut pass = encoder
                            .begin_render_pass(&wgpu::RenderPassDescriptor {
                                label: Some("egui_pass"),
                                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                    view: &view,
                                    resolve_target: None,
                                    ops: wgpu::Operations {
                                        load: wgpu::LoadOp::Load,
                                        store: wgpu::StoreOp::Store,
                                    },
                                })],
                                depth_stencil_attachment: None,
                                ..Default::default()
                            })
                            .forget_lifetime();
                        egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
                    }
                    queue.submit(std::iter::once(encoder.finish()));
                    for id in &full_output.textures_delta.free {
                        egui_renderer.free_texture(id);
                    }
                }

                output.present();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = DemoConfig::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.city.seed = seed;
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
