use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use orbit_viewer::cli::Cli;
use orbit_viewer::config::ViewerConfig;
use orbit_viewer::core::{Button, Clock, Controller, InputQueue, WinitController};
use orbit_viewer::renderer::Renderer;
use orbit_viewer::{OrbitCamera, Scene};

struct App {
    config: ViewerConfig,
    show_hud: bool,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    camera: OrbitCamera,
    input: WinitController,
    queue: InputQueue,
    clock: Clock,
    startup_error: Option<anyhow::Error>,
}

impl App {
    fn new(config: ViewerConfig, show_hud: bool) -> Self {
        Self {
            camera: OrbitCamera::new(config.camera),
            queue: InputQueue::new(config.input_queue_capacity),
            config,
            show_hud,
            window: None,
            renderer: None,
            input: WinitController::new(),
            clock: Clock::new(),
            startup_error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.startup_error = Some(error);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.clock.tick();
        self.camera.update(&mut self.queue, dt);

        if self.camera.input().is_down(Button::Escape) {
            log::info!("Escape held, closing");
            event_loop.exit();
            return;
        }

        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };
        match renderer.render(window, &self.camera, self.clock.fps()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Surface out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {e}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = match event_loop.create_window(attributes) {
            Ok(w) => Arc::new(w),
            Err(e) => return self.fail(event_loop, anyhow::Error::new(e).context("Failed to create window")),
        };

        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            Scene::desk(),
            &self.config.assets_dir,
            self.show_hud,
        ));
        match renderer {
            Ok(renderer) => {
                self.window = Some(window);
                self.renderer = Some(renderer);
            }
            Err(e) => self.fail(event_loop, e.context("Failed to initialize renderer")),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            renderer.handle_event(window, &event);
        }

        if let Some(input) = self.input.translate(&event) {
            self.queue.push(input);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, !cli.no_ui);

    log::info!("Controls: Alt+LMB orbit, Alt+MMB pan, scroll zoom, F reset, P projection, Escape quit");
    event_loop.run_app(&mut app)?;

    match app.startup_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
