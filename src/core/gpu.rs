use std::sync::Arc;

use wgpu::{Adapter, Device, DeviceDescriptor, Features, Instance, Limits, Queue, Surface};

use crate::error::BenchError;

/// Adapter/device/queue bound to the display; cheap to clone (Arc).
///
/// A single context is shared by the surface wrapper and the presenter, so
/// GPU objects created through one are visible to the other.
#[derive(Clone, Debug)]
pub struct GpuContext {
    adapter: Arc<Adapter>,
    device: Arc<Device>,
    queue: Arc<Queue>,
}

impl GpuContext {
    /// Acquire a context with no surface attached (hidden-mode runs).
    pub fn new_headless() -> Result<Self, BenchError> {
        let instance = Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let adapter = pollster::block_on(Self::request_adapter(&instance, None))?;
        let (device, queue) = pollster::block_on(Self::request_device(&adapter))?;

        Ok(Self {
            adapter: Arc::new(adapter),
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }

    /// Acquire a context whose adapter can present to `surface`.
    pub fn for_surface(instance: &Instance, surface: &Surface<'_>) -> Result<Self, BenchError> {
        let adapter = pollster::block_on(Self::request_adapter(instance, Some(surface)))?;
        let (device, queue) = pollster::block_on(Self::request_device(&adapter))?;

        Ok(Self {
            adapter: Arc::new(adapter),
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }

    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    async fn request_adapter(
        instance: &Instance,
        compatible_surface: Option<&Surface<'_>>,
    ) -> Result<Adapter, BenchError> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface,
                force_fallback_adapter: false,
            })
            .await
            .map_err(BenchError::device)
    }

    async fn request_device(adapter: &Adapter) -> Result<(Device, Queue), BenchError> {
        adapter
            .request_device(&DeviceDescriptor {
                label: Some("raster-bench device"),
                required_features: Features::empty(),
                required_limits: Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .map_err(BenchError::device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_semantics() {
        // Arc cloning, compile-time check; acquiring a real context needs
        // hardware and belongs to the binaries.
        fn assert_clone<T: Clone>() {}
        assert_clone::<GpuContext>();
    }
}
