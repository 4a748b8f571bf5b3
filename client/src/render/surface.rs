use std::{sync::Arc, time::Duration};

use anyhow::Context;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture, wgpu::TextureFormat};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

use super::{canvas::Canvas, pacer::FramePacer};

pub struct SurfaceConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub target_fps: u64,
    pub draw_callback: Box<dyn FnMut(Canvas)>,
    pub event_callback: Box<dyn FnMut(&WindowEvent)>,
}

/// Window plus pixel buffer. Drives the draw callback at the target frame
/// rate and forwards every window event to the event callback.
pub struct Surface {
    event_loop: EventLoop<()>,
    host: SurfaceHost,
}

impl Surface {
    pub fn new(config: SurfaceConfig) -> anyhow::Result<Self> {
        let pacer = FramePacer::new(Duration::from_micros(1_000_000 / config.target_fps));

        Ok(Self {
            event_loop: EventLoop::new().context("creating event loop")?,
            host: SurfaceHost {
                config,
                pacer,
                active: None,
            },
        })
    }

    pub fn run(mut self) -> anyhow::Result<()> {
        self.event_loop.run_app(&mut self.host)?;
        Ok(())
    }
}

struct SurfaceHost {
    config: SurfaceConfig,
    pacer: FramePacer,
    active: Option<ActiveSurface>,
}

struct ActiveSurface {
    window: Arc<Window>,
    pixels: Pixels<'static>,
}

impl ApplicationHandler for SurfaceHost {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window_size = LogicalSize::new(self.config.width as f64, self.config.height as f64);

        let window = Arc::new(
            event_loop
                .create_window(
                    WindowAttributes::default()
                        .with_title(self.config.title.clone())
                        .with_inner_size(window_size),
                )
                .expect("creating window"),
        );

        let pixels = {
            let inner_size = window.inner_size();
            let surface_texture =
                SurfaceTexture::new(inner_size.width, inner_size.height, window.clone());

            PixelsBuilder::new(inner_size.width, inner_size.height, surface_texture)
                .texture_format(TextureFormat::Rgba8UnormSrgb)
                .build()
                .expect("creating pixel buffer")
        };

        window.request_redraw();

        self.active = Some(ActiveSurface { window, pixels });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(ActiveSurface { window, pixels }) = self.active.as_mut() else {
            return;
        };

        // Input first, so a long redraw cannot starve it.
        (self.config.event_callback)(&event);

        match event {
            WindowEvent::RedrawRequested => {
                let PhysicalSize { width, height } = window.inner_size();

                (self.config.draw_callback)(Canvas::new(width, height, pixels.frame_mut()));

                pixels.render().expect("rendering frame");

                self.pacer.pace();
                window.request_redraw();
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                // Minimized windows report a zero size the buffer rejects.
                if width > 0 && height > 0 {
                    pixels.resize_surface(width, height).expect("resizing surface");
                    pixels.resize_buffer(width, height).expect("resizing buffer");
                    window.request_redraw();
                }
            }

            WindowEvent::CloseRequested => event_loop.exit(),

            _ => {}
        }
    }
}
