use std::io::Write;
use std::time::Instant;

use super::gpu::GpuContext;
use super::progress::ProgressMeter;
use super::surface::{self, RenderSurface, SurfaceKind};
use super::timing::elapsed_ms;
use crate::error::BenchError;
use crate::scene::CircleScene;

/// Surface size shared by every variant.
pub const SURFACE_WIDTH: u32 = 512;
pub const SURFACE_HEIGHT: u32 = 512;

/// One configuration for all three benchmark variants.
#[derive(Debug, Clone, Copy)]
pub struct BenchConfig {
    /// Fixed iteration count; ignored by the event-driven windowed loop.
    pub iterations: u64,
    pub kind: SurfaceKind,
    pub width: u32,
    pub height: u32,
    /// Upload to the backing texture after every draw instead of once at
    /// the end. The windowed loop presents each frame, so it needs this.
    pub flush_per_draw: bool,
}

impl BenchConfig {
    /// Headless batch run over a fixed iteration count.
    pub fn batch(iterations: u64, kind: SurfaceKind) -> Self {
        Self {
            iterations,
            kind,
            width: SURFACE_WIDTH,
            height: SURFACE_HEIGHT,
            flush_per_draw: false,
        }
    }

    /// Windowed real-time run; terminates on a quit event.
    pub fn windowed(kind: SurfaceKind) -> Self {
        Self {
            iterations: 0,
            kind,
            width: SURFACE_WIDTH,
            height: SURFACE_HEIGHT,
            flush_per_draw: true,
        }
    }
}

/// Summary of a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub iterations: u64,
    pub elapsed_ms: u64,
}

/// Create the surface the configuration selects, on an existing context.
///
/// For `gl_texture` the texture is allocated here, explicitly, and then
/// wrapped; for `gl` the surface allocates its own.
pub fn create_surface(
    gpu: &GpuContext,
    kind: SurfaceKind,
    width: u32,
    height: u32,
) -> Result<RenderSurface, BenchError> {
    match kind {
        SurfaceKind::Image => RenderSurface::image(width, height),
        SurfaceKind::Gl => RenderSurface::gl(gpu, width, height),
        SurfaceKind::GlTexture => {
            let texture = surface::create_upload_texture(gpu.device(), width, height);
            RenderSurface::gl_texture(gpu, texture, width, height)
        }
    }
}

/// Run the fixed-count loop: draw, meter progress, report elapsed time.
///
/// The GPU context is only acquired for surface kinds that need one, so
/// `image` runs fully headless.
pub fn run_batch<W: Write>(
    config: &BenchConfig,
    scene: &mut CircleScene,
    out: &mut W,
) -> Result<BatchReport, BenchError> {
    let mut surface = if config.kind.needs_gpu() {
        let gpu = GpuContext::new_headless()?;
        create_surface(&gpu, config.kind, config.width, config.height)?
    } else {
        RenderSurface::image(config.width, config.height)?
    };

    log::debug!(
        "benchmarking {} iterations on a {} surface",
        config.iterations,
        surface.kind()
    );

    write!(out, "Performing {} iterations: ", config.iterations)?;
    out.flush()?;

    let mut meter = ProgressMeter::new(config.iterations);
    let start = Instant::now();

    for i in 0..config.iterations {
        scene.draw(surface.pixmap_mut());

        if config.flush_per_draw {
            surface.flush();
        }

        if meter.advance(i) {
            write!(out, "+")?;
            out.flush()?;
        }
    }

    if !config.flush_per_draw {
        surface.flush();
    }

    let elapsed = elapsed_ms(start);
    writeln!(out, " done! ({}ms)", elapsed)?;

    Ok(BatchReport {
        iterations: config.iterations,
        elapsed_ms: elapsed,
    })
}
