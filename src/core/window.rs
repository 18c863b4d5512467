use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

use super::context::{ContextRole, CurrentContext};
use super::driver::{self, BenchConfig};
use super::gpu::GpuContext;
use super::presenter::Presenter;
use super::surface::RenderSurface;
use super::timing::{elapsed_ms, FrameClock, PhaseTimings};
use crate::error::BenchError;
use crate::scene::CircleScene;

/// How often the running FPS is logged, in seconds.
const FPS_LOG_INTERVAL: f32 = 1.0;

/// Summary of a windowed run.
#[derive(Debug, Clone, Copy)]
pub struct WindowReport {
    pub elapsed_ms: u64,
    pub phases: PhaseTimings,
}

impl WindowReport {
    pub fn frames(&self) -> u64 {
        self.phases.frames
    }

    /// Average frames per elapsed millisecond over the whole run.
    pub fn frames_per_ms(&self) -> f64 {
        if self.elapsed_ms == 0 {
            return 0.0;
        }
        self.phases.frames as f64 / self.elapsed_ms as f64
    }

    pub fn fps(&self) -> f64 {
        self.frames_per_ms() * 1000.0
    }
}

/// Everything a per-frame callback may touch.
///
/// Owns the window, the presenter, the benchmark surface, and the explicit
/// current-context tracker; exists only between a successful init and loop
/// exit. Drop order releases presenter, device, and window in reverse
/// creation order on every path, failed init included.
pub struct WindowState {
    window: Arc<Window>,
    pub contexts: CurrentContext,
    pub presenter: Presenter,
    pub surface: RenderSurface,
    pub scene: CircleScene,
    pub timings: PhaseTimings,
}

impl WindowState {
    /// Current window size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    pub fn title(&self) -> String {
        self.window.title()
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    pub fn is_fullscreen(&self) -> bool {
        self.window.fullscreen().is_some()
    }

    pub fn set_fullscreen(&self, fullscreen: bool) {
        self.window
            .set_fullscreen(fullscreen.then(|| Fullscreen::Borderless(None)));
    }

    /// The window handle the graphics surface was created from.
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// One benchmark frame: rasterize under the raster context, then
    /// upload/present under the presentation context, timing each phase.
    pub fn frame(&mut self) -> Result<(), BenchError> {
        let start = Instant::now();
        if self.contexts.make_current(ContextRole::Raster) {
            self.scene.draw(self.surface.pixmap_mut());
            self.surface.flush();
        }
        self.timings.record_raster(elapsed_ms(start));

        let start = Instant::now();
        if self.contexts.make_current(ContextRole::Present) {
            match self.surface.texture_view() {
                Some(view) => self.presenter.present_view(view)?,
                None => self.presenter.present_pixels(self.surface.data())?,
            }
        }
        self.timings.record_present(elapsed_ms(start));

        self.timings.end_frame();
        Ok(())
    }
}

struct WindowApp<F> {
    config: BenchConfig,
    callback: F,
    state: Option<WindowState>,
    error: Option<BenchError>,
    started: Option<Instant>,
    clock: FrameClock,
    fps_timer: f32,
    fps_frames: u32,
}

impl<F> WindowApp<F> {
    fn log_fps(&mut self) {
        self.fps_frames += 1;
        self.fps_timer += self.clock.frame_seconds();

        if self.fps_timer >= FPS_LOG_INTERVAL {
            log::info!("FPS: {:.1}", self.fps_frames as f32 / self.fps_timer);
            self.fps_frames = 0;
            self.fps_timer = 0.0;
        }
    }
}

impl<F> WindowApp<F> {
    fn init_state(
        event_loop: &ActiveEventLoop,
        config: &BenchConfig,
    ) -> Result<WindowState, BenchError> {
        let window = event_loop
            .create_window(
                Window::default_attributes()
                    .with_title("raster-bench")
                    .with_inner_size(LogicalSize::new(config.width, config.height))
                    .with_resizable(false),
            )
            .map(Arc::new)
            .map_err(BenchError::window_init)?;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let wgpu_surface = instance
            .create_surface(window.clone())
            .map_err(BenchError::window_init)?;

        let gpu = GpuContext::for_surface(&instance, &wgpu_surface)?;

        // The window surface is in physical pixels and may be scaled; the
        // rasterized frame keeps the configured dimensions.
        let size = window.inner_size();
        let presenter = Presenter::new(
            &gpu,
            wgpu_surface,
            size.width,
            size.height,
            config.width,
            config.height,
        )?;
        let surface = driver::create_surface(&gpu, config.kind, config.width, config.height)?;
        let scene = CircleScene::animated(config.width, config.height);

        Ok(WindowState {
            window,
            contexts: CurrentContext::new(),
            presenter,
            surface,
            scene,
            timings: PhaseTimings::default(),
        })
    }
}

impl<F> ApplicationHandler for WindowApp<F>
where
    F: FnMut(&mut WindowState) -> Result<(), BenchError>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.error.is_some() {
            return;
        }

        match Self::init_state(event_loop, &self.config) {
            Ok(state) => {
                self.started = Some(Instant::now());
                self.state = Some(state);
            }
            Err(err) => {
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            // Quit on Escape *release*, so a held key does not retrigger.
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Released,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(state) = &mut self.state {
                    state.presenter.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(state) = &mut self.state {
                    if let Err(err) = (self.callback)(state) {
                        log::error!("frame failed: {}", err);
                        return;
                    }
                }
                self.log_fps();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}

/// Run the blocking event loop, invoking `callback` once per frame until a
/// quit signal (window close or Escape release) is observed.
pub fn run_loop<F>(config: &BenchConfig, callback: F) -> Result<WindowReport, BenchError>
where
    F: FnMut(&mut WindowState) -> Result<(), BenchError>,
{
    let event_loop = EventLoop::new().map_err(BenchError::window_init)?;

    let mut app = WindowApp {
        config: *config,
        callback,
        state: None,
        error: None,
        started: None,
        clock: FrameClock::start(),
        fps_timer: 0.0,
        fps_frames: 0,
    };

    event_loop
        .run_app(&mut app)
        .map_err(BenchError::window_init)?;

    if let Some(err) = app.error {
        return Err(err);
    }

    let elapsed = app.started.map(elapsed_ms).unwrap_or(0);
    let phases = app.state.map(|state| state.timings).unwrap_or_default();

    Ok(WindowReport {
        elapsed_ms: elapsed,
        phases,
    })
}

/// Windowed real-time benchmark: two-phase timed frames until quit.
pub fn run_windowed(config: &BenchConfig) -> Result<WindowReport, BenchError> {
    run_loop(config, WindowState::frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_averages_frames_over_elapsed_time() {
        let mut phases = PhaseTimings::default();
        for _ in 0..120 {
            phases.end_frame();
        }

        let report = WindowReport {
            elapsed_ms: 2000,
            phases,
        };

        assert_eq!(report.frames(), 120);
        assert!((report.frames_per_ms() - 0.06).abs() < 1e-9);
        assert!((report.fps() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn zero_length_run_reports_zero_fps() {
        let report = WindowReport {
            elapsed_ms: 0,
            phases: PhaseTimings::default(),
        };

        assert_eq!(report.frames_per_ms(), 0.0);
        assert_eq!(report.fps(), 0.0);
    }
}
