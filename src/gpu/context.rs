//! GPU context acquisition.

use super::GpuError;

/// Owns the wgpu device and queue that feedback passes render with.
///
/// All passes created from one context share a device; submission order on
/// the shared queue equals call order.
pub struct GpuContext {
    pub(crate) device: wgpu::Device,
    pub(crate) queue: wgpu::Queue,
}

impl GpuContext {
    /// Acquire a device from the first suitable adapter.
    pub async fn new() -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Feedback Pass GPU"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            })
            .await?;

        Ok(Self { device, queue })
    }

    /// Wrap a device/queue pair owned by a larger application.
    pub fn from_parts(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self { device, queue }
    }

    /// The wgpu device backing this context.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// The submission queue backing this context.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }
}
