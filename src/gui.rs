use egui::Widget;
use glam::Vec2;

use crate::config::FieldParams;

pub struct EguiIntegration {
    pub ctx: egui::Context,
    raw_input: egui::RawInput,

    renderer: egui_wgpu::Renderer,
    clipped_shapes: Vec<egui::ClippedPrimitive>,
    textures_delta: egui::TexturesDelta,
}

impl EguiIntegration {
    pub fn new(device: &wgpu::Device, swapchain_format: wgpu::TextureFormat) -> Self {
        let renderer = egui_wgpu::Renderer::new(device, swapchain_format, None, 1);

        Self {
            ctx: egui::Context::default(),
            raw_input: egui::RawInput::default(),

            renderer,
            clipped_shapes: Vec::new(),
            textures_delta: egui::TexturesDelta::default(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.raw_input.screen_rect = Some(egui::Rect::from_min_size(
            Default::default(),
            egui::Vec2::new(width as f32, height as f32),
        ));
    }

    pub fn run<F: FnOnce(&egui::Context)>(&mut self, run_ui: F) {
        let raw_input = std::mem::take(&mut self.raw_input);
        self.ctx.begin_frame(raw_input);
        run_ui(&self.ctx);

        let output = self.ctx.end_frame();
        self.clipped_shapes = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        self.textures_delta = output.textures_delta;
    }

    pub fn pre_render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        delta_time: f32,
    ) {
        self.raw_input.predicted_dt = delta_time;

        let screen_descriptor = self.screen_descriptor();
        self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &self.clipped_shapes,
            &screen_descriptor,
        );

        for (id, delta) in &self.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }

        for id in &self.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }

    pub fn render<'a>(&'a mut self, rpass: &mut wgpu::RenderPass<'a>) {
        let screen_descriptor = self.screen_descriptor();
        self.renderer
            .render(rpass, &self.clipped_shapes, &screen_descriptor);
    }

    pub fn mouse_event(
        &mut self,
        position: Vec2,
        state: winit::event::ElementState,
        button: winit::event::MouseButton,
    ) {
        let button = match button {
            winit::event::MouseButton::Left => egui::PointerButton::Primary,
            winit::event::MouseButton::Right => egui::PointerButton::Secondary,
            winit::event::MouseButton::Middle => egui::PointerButton::Middle,
            _ => return,
        };

        self.raw_input.events.push(egui::Event::PointerButton {
            pos: egui::Pos2::new(position.x, position.y),
            button,
            pressed: state.is_pressed(),
            modifiers: egui::Modifiers::NONE,
        });
    }

    pub fn mouse_motion(&mut self, position: Vec2) {
        self.raw_input
            .events
            .push(egui::Event::PointerMoved(egui::Pos2::new(
                position.x, position.y,
            )));
    }

    fn screen_descriptor(&self) -> egui_wgpu::ScreenDescriptor {
        let screen_rect = self.ctx.screen_rect();
        egui_wgpu::ScreenDescriptor {
            size_in_pixels: [screen_rect.width() as u32, screen_rect.height() as u32],
            pixels_per_point: self.ctx.pixels_per_point(),
        }
    }
}

/// Live tuning window, edits are staged in `draft` until applied
pub struct SettingsPanel {
    pub visible: bool,
    draft: FieldParams,
}

impl SettingsPanel {
    pub fn new(params: FieldParams) -> Self {
        Self {
            visible: false,
            draft: params,
        }
    }

    /// Returns the new parameters when Apply was pressed with valid values
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        framerate: f32,
        particles: usize,
        wind: Vec2,
    ) -> Option<FieldParams> {
        if !self.visible {
            return None;
        }

        let mut applied = None;
        egui::Window::new("Starfield")
            .default_width(160.0)
            .show(ctx, |ui| {
                ui.label(format!("FPS {framerate:.1}"));
                ui.label(format!("Stars {particles}"));
                ui.label(format!("Wind\nx: {:.2}\ny: {:.2}", wind.x, wind.y));
                ui.separator();

                egui::DragValue::new(&mut self.draft.influence_radius)
                    .speed(1.0)
                    .clamp_range(0.0..=f32::MAX)
                    .suffix(" Influence")
                    .ui(ui);
                egui::DragValue::new(&mut self.draft.wind_factor)
                    .speed(0.001)
                    .suffix(" Wind")
                    .ui(ui);
                egui::Slider::new(&mut self.draft.friction, 0.0..=1.0)
                    .text("Friction")
                    .ui(ui);
                egui::DragValue::new(&mut self.draft.gravity)
                    .speed(0.001)
                    .suffix(" Gravity")
                    .ui(ui);

                if ui.button("Apply").clicked() && self.draft.validate().is_ok() {
                    applied = Some(self.draft);
                }
            });

        applied
    }
}
