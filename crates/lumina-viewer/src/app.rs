use std::sync::Arc;

use anyhow::Result;
use winit::event::{MouseScrollDelta, WindowEvent};
use winit::window::Window;

use lumina_engine::core::{App, AppControl, FrameCtx};
use lumina_engine::device::Gpu;
use lumina_engine::render::{SceneRenderer, assemble};
use lumina_engine::scene::{CLEAR_COLOR, SceneState};
use lumina_engine::transform::MatrixStack;

use crate::gui::GuiLayer;
use crate::panel;

/// One wheel "line" in pixel-equivalent units, matching typical mouse
/// drivers. Scrolling down narrows the field of view.
const WHEEL_LINE_DELTA: f32 = 100.0;

pub struct ViewerApp {
    scene: SceneState,
    stack: MatrixStack,
    rng: rand::rngs::ThreadRng,

    // GPU-backed pieces, created in on_ready.
    renderer: Option<SceneRenderer>,
    gui: Option<GuiLayer>,
}

impl ViewerApp {
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        let scene = SceneState::new(&mut rng);

        Self {
            scene,
            stack: MatrixStack::new(),
            rng,
            renderer: None,
            gui: None,
        }
    }
}

impl App for ViewerApp {
    fn on_ready(&mut self, window: &Arc<Window>, gpu: &Gpu) -> Result<()> {
        let format = gpu.surface_format();
        self.renderer = Some(SceneRenderer::new(gpu.device(), format));
        self.gui = Some(GuiLayer::new(window, gpu.device(), format));

        log::info!(
            "viewer ready: surface {format:?}, {} light(s)",
            self.scene.lights.len()
        );
        Ok(())
    }

    fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> AppControl {
        if let Some(gui) = self.gui.as_mut() {
            let response = gui.on_window_event(window, event);
            if response.repaint {
                window.request_redraw();
            }
            if response.consumed {
                return AppControl::Continue;
            }
        }

        if let WindowEvent::MouseWheel { delta, .. } = event {
            let delta_y = match delta {
                MouseScrollDelta::LineDelta(_, lines) => -lines * WHEEL_LINE_DELTA,
                MouseScrollDelta::PixelDelta(position) => -position.y as f32,
            };
            self.scene.camera.zoom_by_wheel(delta_y);
        }

        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let Self {
            scene,
            stack,
            rng,
            renderer,
            gui,
        } = self;
        let (Some(renderer), Some(gui)) = (renderer.as_mut(), gui.as_mut()) else {
            return AppControl::Continue;
        };

        // Panel first, so edits land in the same frame they were made.
        let gui_frame = gui.run(ctx.window.window, |egui_ctx| {
            panel::draw(egui_ctx, scene, rng);
        });

        let plan = assemble(scene, ctx.gpu.aspect(), stack);

        ctx.render(CLEAR_COLOR, |rctx, target| {
            renderer.render(rctx, target, &plan);
            gui.paint(rctx, target, gui_frame);
        })
    }
}
