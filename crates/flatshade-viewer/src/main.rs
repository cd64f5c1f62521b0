use anyhow::Result;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use flatshade_engine::core::{App, AppControl, FrameCtx};
use flatshade_engine::device::GpuInit;
use flatshade_engine::logging::{LoggingConfig, init_logging};
use flatshade_engine::render::FlatRenderer;
use flatshade_engine::window::{Runtime, RuntimeConfig};

/// Frames between progress lines at debug level.
const FRAME_LOG_INTERVAL: u64 = 600;

struct Viewer {
    renderer: FlatRenderer,
    /// Set on Escape; the window is closed on its next frame.
    quit: bool,
}

impl App for Viewer {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                log::info!("escape pressed; closing");
                self.quit = true;
                AppControl::Continue
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.quit {
            ctx.runtime.close_window(ctx.window.id);
            return AppControl::Continue;
        }

        if ctx.frame_index % FRAME_LOG_INTERVAL == 0 {
            log::debug!("frame {}", ctx.frame_index);
        }

        let renderer = &mut self.renderer;
        ctx.render(wgpu::Color::BLACK, |rctx, target| renderer.render(rctx, target))
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let renderer = FlatRenderer::new();
    log::info!("drawing {} vertices", renderer.vertex_count());

    Runtime::run(
        RuntimeConfig::default(),
        GpuInit::default(),
        Viewer {
            renderer,
            quit: false,
        },
    )
}
