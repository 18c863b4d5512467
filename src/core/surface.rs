use std::fmt;
use std::str::FromStr;

use tiny_skia::Pixmap;
use wgpu::{Device, Texture, TextureView};

use super::gpu::GpuContext;
use crate::error::BenchError;

/// Surface-backing strategy, selected by the command-line tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// CPU pixel buffer only.
    Image,
    /// GPU-backed: the surface allocates its own upload texture.
    Gl,
    /// GPU texture-backed: the caller allocates the texture explicitly and
    /// the surface wraps it.
    GlTexture,
}

impl SurfaceKind {
    pub fn needs_gpu(self) -> bool {
        !matches!(self, SurfaceKind::Image)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SurfaceKind::Image => "image",
            SurfaceKind::Gl => "gl",
            SurfaceKind::GlTexture => "gl_texture",
        }
    }
}

impl FromStr for SurfaceKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, BenchError> {
        match s {
            "image" => Ok(SurfaceKind::Image),
            "gl" => Ok(SurfaceKind::Gl),
            "gl_texture" => Ok(SurfaceKind::GlTexture),
            other => Err(BenchError::UnknownSurfaceKind(other.to_string())),
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
enum Backing {
    Cpu,
    Texture {
        gpu: GpuContext,
        texture: Texture,
        view: TextureView,
    },
}

/// The drawing target for one benchmark run; exactly one exists per run.
///
/// Every kind rasterizes into the pixmap; GPU-backed kinds additionally own
/// an RGBA8 texture that `flush` uploads the pixels into.
#[derive(Debug)]
pub struct RenderSurface {
    kind: SurfaceKind,
    width: u32,
    height: u32,
    pixmap: Pixmap,
    backing: Backing,
}

impl RenderSurface {
    /// CPU pixel-buffer surface.
    pub fn image(width: u32, height: u32) -> Result<Self, BenchError> {
        Ok(Self {
            kind: SurfaceKind::Image,
            width,
            height,
            pixmap: new_pixmap(width, height)?,
            backing: Backing::Cpu,
        })
    }

    /// GPU-backed surface with an internally allocated upload texture.
    pub fn gl(gpu: &GpuContext, width: u32, height: u32) -> Result<Self, BenchError> {
        let texture = create_upload_texture(gpu.device(), width, height);
        Self::wrap(SurfaceKind::Gl, gpu, texture, width, height)
    }

    /// Wrap a caller-allocated texture. Dimensions must match.
    pub fn gl_texture(
        gpu: &GpuContext,
        texture: Texture,
        width: u32,
        height: u32,
    ) -> Result<Self, BenchError> {
        if texture.width() != width || texture.height() != height {
            return Err(BenchError::SurfaceCreation(format!(
                "texture is {}x{}, surface wants {}x{}",
                texture.width(),
                texture.height(),
                width,
                height
            )));
        }
        Self::wrap(SurfaceKind::GlTexture, gpu, texture, width, height)
    }

    fn wrap(
        kind: SurfaceKind,
        gpu: &GpuContext,
        texture: Texture,
        width: u32,
        height: u32,
    ) -> Result<Self, BenchError> {
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Ok(Self {
            kind,
            width,
            height,
            pixmap: new_pixmap(width, height)?,
            backing: Backing::Texture {
                gpu: gpu.clone(),
                texture,
                view,
            },
        })
    }

    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The rasterizer's pixel target.
    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Rasterized pixels, premultiplied RGBA8.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Upload the rasterized pixels to the backing texture. No-op for the
    /// CPU kind.
    pub fn flush(&self) {
        if let Backing::Texture { gpu, texture, .. } = &self.backing {
            gpu.queue().write_texture(
                texture.as_image_copy(),
                self.pixmap.data(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * self.width),
                    rows_per_image: Some(self.height),
                },
                wgpu::Extent3d {
                    width: self.width,
                    height: self.height,
                    depth_or_array_layers: 1,
                },
            );
        }
    }

    /// View of the backing texture; `None` for the CPU kind.
    pub fn texture_view(&self) -> Option<&TextureView> {
        match &self.backing {
            Backing::Texture { view, .. } => Some(view),
            Backing::Cpu => None,
        }
    }
}

fn new_pixmap(width: u32, height: u32) -> Result<Pixmap, BenchError> {
    Pixmap::new(width, height).ok_or_else(|| {
        BenchError::SurfaceCreation(format!("invalid dimensions {}x{}", width, height))
    })
}

/// Explicit RGBA8 texture allocation, used directly by the driver for the
/// `gl_texture` kind.
pub fn create_upload_texture(device: &Device, width: u32, height: u32) -> Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("surface upload texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    })
}
