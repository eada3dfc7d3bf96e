//! egui integration: winit event plumbing in, tessellated meshes out.
//!
//! The panel is painted into the frame's encoder after the scene pass, in
//! its own render pass (color only, loading the scene output).

use egui_wgpu::ScreenDescriptor;
use winit::event::WindowEvent;
use winit::window::Window;

use lumina_engine::core::{RenderCtx, RenderTarget};

pub struct GuiLayer {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

/// Output of one UI pass, ready to paint.
pub struct GuiFrame {
    primitives: Vec<egui::ClippedPrimitive>,
    textures_delta: egui::TexturesDelta,
    screen: ScreenDescriptor,
}

impl GuiLayer {
    pub fn new(window: &Window, device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            window.theme(),
            None,
        );
        // No depth attachment: the panel always draws over the scene.
        let renderer = egui_wgpu::Renderer::new(device, format, None, 1, false);

        Self {
            ctx,
            state,
            renderer,
        }
    }

    /// Feeds a window event to egui. The caller must skip its own handling
    /// when the returned response says the event was consumed.
    pub fn on_window_event(
        &mut self,
        window: &Window,
        event: &WindowEvent,
    ) -> egui_winit::EventResponse {
        self.state.on_window_event(window, event)
    }

    /// Runs the UI closure for this frame and tessellates the result.
    pub fn run(&mut self, window: &Window, build: impl FnMut(&egui::Context)) -> GuiFrame {
        let input = self.state.take_egui_input(window);
        let output = self.ctx.run(input, build);
        self.state
            .handle_platform_output(window, output.platform_output);

        let primitives = self
            .ctx
            .tessellate(output.shapes, output.pixels_per_point);
        let size = window.inner_size();

        GuiFrame {
            primitives,
            textures_delta: output.textures_delta,
            screen: ScreenDescriptor {
                size_in_pixels: [size.width, size.height],
                pixels_per_point: output.pixels_per_point,
            },
        }
    }

    /// Uploads texture/buffer changes and paints the frame's primitives.
    pub fn paint(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, frame: GuiFrame) {
        for (id, delta) in &frame.textures_delta.set {
            self.renderer
                .update_texture(ctx.device, ctx.queue, *id, delta);
        }

        let cmd_bufs = self.renderer.update_buffers(
            ctx.device,
            ctx.queue,
            target.encoder,
            &frame.primitives,
            &frame.screen,
        );
        if !cmd_bufs.is_empty() {
            ctx.queue.submit(cmd_bufs);
        }

        {
            let pass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("lumina gui pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.renderer
                .render(&mut pass.forget_lifetime(), &frame.primitives, &frame.screen);
        }

        for id in &frame.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
