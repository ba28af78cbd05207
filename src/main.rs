use std::time::Instant;

use clap::Parser;
use log::{debug, error, info, warn};
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

use tableau::app::App;
use tableau::canvas::Canvas;
use tableau::config::Config;
use tableau::delta::{Delta, Ticker};
use tableau::error::TableauResult;
use tableau::gpu::Gpu;
use tableau::renderer::Renderer;

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("tableau=info")
    ).init();

    let config = Config::parse();
    if let Err(err) = config.validate() {
        error!("{err}");
        std::process::exit(2);
    }
    info!("{config}");

    if let Err(err) = pollster::block_on(run(config)) {
        error!("{err}");
        std::process::exit(1);
    }
}

struct State {
    gpu: Gpu,
    renderer: Renderer,
    app: App,
    canvas: Canvas,
    delta: Delta,
    ticker: Ticker,
    cursor: (f32, f32),
}
impl State {
    // Creating some of the wgpu types requires async code
    async fn new(window: &Window, config: &Config) -> TableauResult<Self> {
        let gpu = Gpu::init(window).await?;
        let mut app = App::new(config);
        app.resize(gpu.config.width, gpu.config.height);
        let renderer = Renderer::new(&gpu.device, &gpu.config, app.projection());

        Ok(
            Self {
                gpu,
                renderer,
                app,
                canvas: Canvas::new(),
                delta: Delta::new(),
                ticker: Ticker::per_second(config.fps),
                cursor: (0.0, 0.0),
            }
        )
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if self.app.resize(new_size.width, new_size.height) {
            info!("resized to {}x{}", new_size.width, new_size.height);
            self.gpu.resize_window(new_size);
            self.renderer.set_projection(&self.gpu.queue, self.app.projection());
        }
    }

    fn input(&mut self, event: &WindowEvent) -> TableauResult<bool> {
        match event {
            WindowEvent::ReceivedCharacter(c) => Ok(self.app.handle_key(*c)),
            WindowEvent::MouseInput { state, .. } => {
                let (x, y) = self.cursor;
                self.app.handle_mouse_click(*state == ElementState::Pressed, x, y)
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
                let (x, y) = self.cursor;
                self.app.handle_mouse_motion(x, y)
            }
            _ => Ok(false),
        }
    }

    fn update(&mut self) {
        let elapsed = self.delta.update(Instant::now());
        for _ in 0..self.ticker.advance(elapsed) {
            self.app.tick();
        }
    }

    fn render(&mut self, view: &wgpu::TextureView) -> TableauResult<()> {
        self.app.draw(&mut self.canvas)?;
        self.renderer.render(&self.gpu.device, &self.gpu.queue, view, &self.canvas);
        Ok(())
    }
}

pub async fn run(config: Config) -> TableauResult<()> {
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("A scene.")
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .build(&event_loop)?;
    let mut state = State::new(&window, &config).await?;

    // Opens the window and starts processing events
    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { ref event, window_id, } if window_id == window.id() => {
                match state.input(event) {
                    Ok(true) => return,
                    Ok(false) => {}
                    Err(err) => {
                        warn!("{err}");
                        return;
                    }
                }
                match event {
                    WindowEvent::CloseRequested | WindowEvent::KeyboardInput {
                        input: KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(VirtualKeyCode::Escape),
                            ..
                        },
                        ..
                    } => {
                        *control_flow = ControlFlow::Exit;
                    }
                    WindowEvent::Resized(physical_size) => {
                        state.resize(*physical_size);
                    }
                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        state.resize(**new_inner_size);
                    }
                    _ => {}
                }
            }
            Event::MainEventsCleared => {
                state.update();
                let frame = match state.gpu.surface.get_current_texture() {
                    Ok(frame) => frame,
                    Err(wgpu::SurfaceError::Lost) => {
                        state.resize(state.gpu.size);
                        return;
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        error!("out of memory");
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                    // Outdated or timed out, e.g. while minimised.
                    Err(err) => {
                        debug!("dropped frame: {err:?}");
                        return;
                    }
                };
                let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

                if let Err(err) = state.render(&view) {
                    error!("{err}");
                    *control_flow = ControlFlow::Exit;
                }
                frame.present();

                window.request_redraw();
            }
            _ => {},
        }
    });
}
