//! GPU backend for feedback passes.
//!
//! Provides device acquisition, the data-texture factory, and the
//! double-buffered feedback pass, all on WebGPU (wgpu).

mod context;
mod pass;
mod texture;
mod uniforms;

pub use context::GpuContext;
pub use pass::FeedbackPass;
pub use texture::create_texture;

/// Error type for GPU operations.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("No suitable GPU adapter found")]
    NoAdapter,

    #[error("Failed to request GPU device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("Buffer mapping failed: {0}")]
    BufferMap(#[from] wgpu::BufferAsyncError),
}

/// Errors raised by pass construction and mutation calls.
///
/// A rejected call leaves the pass exactly as it was: no slot contents,
/// indices, or pending override are touched.
#[derive(Debug, thiserror::Error)]
pub enum PassError {
    #[error(transparent)]
    Config(#[from] crate::schema::ConfigError),

    #[error("Shader compilation failed: {0}")]
    ShaderCompilation(String),

    #[error("Uniform `{0}` was not declared at construction")]
    UnknownUniform(String),

    #[error("Uniform `{name}` expects {expected}, got {got}")]
    UniformType {
        name: String,
        expected: &'static str,
        got: &'static str,
    },
}
