mod canvas;
mod cli;
mod coalesce;
mod config;
mod field;
mod framepace;
mod gpu;
mod gui;
mod particle;
mod pointer;
mod render;
mod starfield;

use std::sync::Arc;

use canvas::DrawList;
use clap::Parser;
use config::StarfieldConfig;
use framepace::Framepacer;
use glam::{UVec2, Vec2};
use gpu::GpuContext;
use gui::{EguiIntegration, SettingsPanel};
use log::{error, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Fullscreen, Window},
};

use crate::{render::RenderModule, starfield::Starfield};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Collect Arguments
    let args = cli::Args::parse();
    let config = args.resolve_config()?;
    info!("Starfield config: {config:?}");

    // Setup Winit
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    // State
    let mut app_state = AppState {
        tokio_rt: tokio::runtime::Runtime::new()?,
        config,
        seed: args.seed,

        gfx: None,
        starfield: None,
        draw_list: DrawList::new(),
        framepace: Framepacer::new(args.framerate),

        mouse_position: Vec2::ZERO,
        fatal: None,
    };

    event_loop.run_app(&mut app_state)?;

    match app_state.fatal {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct GfxState {
    window: Arc<Window>,
    gpu: GpuContext,
    egui: EguiIntegration,
    settings: SettingsPanel,

    render_module: RenderModule,
}

struct AppState {
    tokio_rt: tokio::runtime::Runtime,
    config: StarfieldConfig,
    seed: Option<u64>,

    gfx: Option<GfxState>,
    starfield: Option<Starfield>,
    draw_list: DrawList,
    framepace: Framepacer,

    mouse_position: Vec2,
    /// Error that stopped the event loop, handed back to `main`
    fatal: Option<anyhow::Error>,
}

impl AppState {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window = Arc::new(
            event_loop.create_window(Window::default_attributes().with_title("Starfield"))?,
        );
        let window_size = window.inner_size();

        let gpu = self.tokio_rt.block_on(GpuContext::new(window.clone()))?;
        let surface_format = gpu.surface_format();

        let render_module = RenderModule::new(&gpu.device, surface_format);
        render_module.update_size(&gpu.queue, window_size.width, window_size.height);

        let mut egui = EguiIntegration::new(&gpu.device, surface_format);
        egui.resize(window_size.width, window_size.height);

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let starfield = Starfield::new(
            &self.config,
            UVec2::new(window_size.width, window_size.height),
            &mut rng,
        );
        info!(
            "Spawned {} stars on a {}x{} surface",
            starfield.field().particles().len(),
            window_size.width,
            window_size.height
        );

        self.gfx = Some(GfxState {
            window,
            gpu,
            egui,
            settings: SettingsPanel::new(starfield.field().params()),

            render_module,
        });
        self.starfield = Some(starfield);

        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gfx.is_some() {
            return;
        }

        if let Err(err) = self.init(event_loop) {
            let err = err.context("Failed to initialise the starfield");
            error!("{err:#}");
            self.fatal = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let (Some(gfx), Some(starfield)) = (self.gfx.as_mut(), self.starfield.as_mut()) else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                starfield.on_resize(UVec2::new(new_size.width, new_size.height));
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }

                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
                    PhysicalKey::Code(KeyCode::F11) => {
                        if gfx.window.fullscreen().is_none() {
                            gfx.window
                                .set_fullscreen(Some(Fullscreen::Borderless(None)));
                        } else {
                            gfx.window.set_fullscreen(None);
                        }
                    }
                    PhysicalKey::Code(KeyCode::KeyH) => {
                        gfx.settings.visible = !gfx.settings.visible;
                    }
                    _ => (),
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                gfx.egui.mouse_event(self.mouse_position, state, button);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                starfield.on_pointer_move(position);

                gfx.egui.mouse_motion(position);
                self.mouse_position = position;
            }

            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(gfx), Some(starfield)) = (self.gfx.as_mut(), self.starfield.as_mut()) else {
            return;
        };

        self.framepace.begin_frame();

        if let Some(size) = starfield.apply_pending() {
            gfx.gpu.resize(size.x, size.y);
            gfx.render_module.update_size(&gfx.gpu.queue, size.x, size.y);
            gfx.egui.resize(size.x, size.y);
        }

        // Minimised, nothing to present to
        if starfield.field().surface().min_element() <= 0.0 {
            self.framepace.end_frame();
            return;
        }

        let frame = match gfx.gpu.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                gfx.gpu.reconfigure_surface();
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Timed out waiting for the next frame");
                return;
            }
            Err(err @ wgpu::SurfaceError::OutOfMemory) => {
                let err = anyhow::Error::new(err).context("Failed to acquire a frame");
                error!("{err:#}");
                self.fatal = Some(err);
                event_loop.exit();
                return;
            }
        };

        self.draw_list.reset();
        starfield.tick(&mut self.draw_list);
        gfx.render_module
            .prepare(&gfx.gpu.device, &gfx.gpu.queue, &self.draw_list);

        let framerate = self.framepace.framerate();
        let particles = starfield.field().particles().len();
        let wind = starfield.pointer().wind;
        let mut applied = None;
        gfx.egui.run(|ctx| {
            applied = gfx.settings.show(ctx, framerate, particles, wind);
        });
        if let Some(params) = applied {
            starfield.set_params(params);
        }

        let mut encoder = gfx
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
        gfx.egui.pre_render(
            &gfx.gpu.device,
            &gfx.gpu.queue,
            &mut encoder,
            self.framepace.frametime().as_secs_f32(),
        );

        // Render
        {
            let view = frame
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default());

            let mut rpass = gfx.render_module.begin_pass(&mut encoder, &view);
            gfx.egui.render(&mut rpass);
        }

        gfx.gpu.queue.submit(Some(encoder.finish()));
        frame.present();

        self.framepace.end_frame();
    }
}
