//! Double-buffered GPU feedback passes.
//!
//! This crate runs iterative, stateful computations entirely on the GPU by
//! encoding state as float textures and advancing it one shader evaluation
//! per step. Each step samples the previous step's output texture and writes
//! into the other half of a ping-pong buffer pair, so a surface is never read
//! and written inside the same render pass.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Pass configuration, uniform declarations, and validation
//! - `gpu`: The wgpu backend (context, texture factory, feedback pass)
//!
//! # Example
//!
//! ```rust,no_run
//! use feedback_pass::{FeedbackPass, GpuContext, PassConfig, TexelInit, UniformDecl, UniformValue};
//!
//! // Fragment stage only; the fullscreen vertex stage, resolution constants,
//! // uniform struct, and the `field` feedback texture binding are injected.
//! const SHADER: &str = r#"
//! @fragment
//! fn main(@builtin(position) position: vec4<f32>) -> @location(0) vec4<f32> {
//!     let texel = textureLoad(field, vec2<i32>(position.xy), 0);
//!     return texel * uniforms.decay;
//! }
//! "#;
//!
//! let ctx = pollster::block_on(GpuContext::new())?;
//!
//! let config = PassConfig {
//!     name: "field".to_string(),
//!     size: 128,
//!     uniforms: vec![UniformDecl {
//!         name: "decay".to_string(),
//!         value: UniformValue::Float(0.98),
//!     }],
//!     start_value: TexelInit::Splat(1.0),
//! };
//! let mut pass = FeedbackPass::new(&ctx, &config, SHADER)?;
//!
//! for _ in 0..100 {
//!     pass.compute();
//! }
//!
//! let texels = pass.read_back()?;
//! println!("first texel: {:?}", &texels[..4]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod gpu;
pub mod schema;

// Re-export commonly used types
pub use gpu::{FeedbackPass, GpuContext, GpuError, PassError, create_texture};
pub use schema::{ConfigError, PassConfig, TexelInit, UniformDecl, UniformValue};
