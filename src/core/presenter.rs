use wgpu::{
    BindGroup, BindGroupLayout, Device, RenderPipeline, Sampler, Surface, SurfaceConfiguration,
    Texture, TextureView,
};

use super::gpu::GpuContext;
use super::surface::create_upload_texture;
use crate::error::BenchError;

/// Presents rasterized frames on a window surface.
///
/// A frame is either a CPU pixel buffer (uploaded into an internal texture
/// first) or an already-uploaded texture view; both end as a fullscreen
/// triangle drawn into the swapchain image, followed by a present.
///
/// The frame dimensions are fixed at creation and independent of the
/// window: a HiDPI window surface is larger (physical pixels), and the
/// sampling blit scales the frame to cover it.
pub struct Presenter {
    gpu: GpuContext,
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,
    pipeline: RenderPipeline,
    bind_layout: BindGroupLayout,
    sampler: Sampler,
    texture: Texture,
    bind_group: BindGroup,
    frame_width: u32,
    frame_height: u32,
}

impl Presenter {
    pub fn new(
        gpu: &GpuContext,
        surface: Surface<'static>,
        window_width: u32,
        window_height: u32,
        frame_width: u32,
        frame_height: u32,
    ) -> Result<Self, BenchError> {
        let surface_caps = surface.get_capabilities(gpu.adapter());
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let surface_config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: window_width,
            height: window_height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(gpu.device(), &surface_config);

        let (pipeline, bind_layout) = Self::create_pipeline(gpu.device(), surface_format);
        let sampler = Self::create_sampler(gpu.device());

        let texture = create_upload_texture(gpu.device(), frame_width, frame_height);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = Self::create_bind_group(gpu.device(), &bind_layout, &view, &sampler);

        Ok(Self {
            gpu: gpu.clone(),
            surface,
            surface_config,
            pipeline,
            bind_layout,
            sampler,
            texture,
            bind_group,
            frame_width,
            frame_height,
        })
    }

    /// Upload a CPU pixel buffer into the internal texture and present it.
    ///
    /// The buffer must match the frame dimensions, not the window's.
    pub fn present_pixels(&self, pixels: &[u8]) -> Result<(), BenchError> {
        check_frame_len(pixels, self.frame_width, self.frame_height)?;

        self.gpu.queue().write_texture(
            self.texture.as_image_copy(),
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.frame_width),
                rows_per_image: Some(self.frame_height),
            },
            wgpu::Extent3d {
                width: self.frame_width,
                height: self.frame_height,
                depth_or_array_layers: 1,
            },
        );

        self.blit(&self.bind_group)
    }

    /// Present an externally owned texture (the GPU-backed surface kinds).
    pub fn present_view(&self, view: &TextureView) -> Result<(), BenchError> {
        let bind_group =
            Self::create_bind_group(self.gpu.device(), &self.bind_layout, view, &self.sampler);
        self.blit(&bind_group)
    }

    /// Reconfigure the swapchain for a new window size. The frame texture
    /// keeps its dimensions; the blit stretches it.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface
            .configure(self.gpu.device(), &self.surface_config);
    }

    pub fn frame_dimensions(&self) -> (u32, u32) {
        (self.frame_width, self.frame_height)
    }

    fn blit(&self, bind_group: &BindGroup) -> Result<(), BenchError> {
        let frame = self
            .surface
            .get_current_texture()
            .map_err(|e| BenchError::Render(e.to_string()))?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("present encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("present pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.gpu.queue().submit(Some(encoder.finish()));
        frame.present();

        Ok(())
    }

    fn create_pipeline(
        device: &Device,
        surface_format: wgpu::TextureFormat,
    ) -> (RenderPipeline, BindGroupLayout) {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("display shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../display.wgsl").into()),
        });

        let bind_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("display bind group layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("display pipeline layout"),
            bind_group_layouts: &[&bind_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("display pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        (pipeline, bind_layout)
    }

    fn create_sampler(device: &Device) -> Sampler {
        device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("display sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        })
    }

    fn create_bind_group(
        device: &Device,
        layout: &BindGroupLayout,
        view: &TextureView,
        sampler: &Sampler,
    ) -> BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("display bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }
}

fn check_frame_len(pixels: &[u8], width: u32, height: u32) -> Result<(), BenchError> {
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(BenchError::Render(format!(
            "pixel buffer is {} bytes, frame wants {}",
            pixels.len(),
            expected
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_buffer_is_validated_against_the_frame() {
        // A scaled window surface is larger than the rasterized frame in
        // physical pixels; the frame contract must not grow with it.
        let frame = vec![0u8; 512 * 512 * 4];
        assert!(check_frame_len(&frame, 512, 512).is_ok());
        assert!(check_frame_len(&frame, 1024, 1024).is_err());
    }

    #[test]
    fn truncated_frame_buffer_is_rejected() {
        let frame = vec![0u8; 16 * 16 * 4 - 1];
        let err = check_frame_len(&frame, 16, 16).unwrap_err();
        assert!(err.to_string().contains("frame wants 1024"));
    }
}
