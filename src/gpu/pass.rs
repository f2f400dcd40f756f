//! The double-buffered feedback pass.
//!
//! Two slots alternate between being read and being written: each step
//! renders the shader into the slot indexed by `active`, sampling the other
//! slot's previous output through the feedback texture binding, then swaps.
//! A slot's surface is never read and written inside the same render pass.

use std::mem;

use super::uniforms::{self, UniformBlock};
use super::{GpuContext, GpuError, PassError, texture};
use crate::schema::{PassConfig, TexelInit, UniformValue};

// Embed the vertex stage at compile time
const FULLSCREEN_SHADER: &str = include_str!("shaders/fullscreen.wgsl");

/// Where the next step's feedback input comes from.
///
/// Consumed and reset atomically at the top of [`FeedbackPass::compute`]:
/// an override feeds exactly one step.
enum FeedbackSource {
    /// Sample the other slot's previous output.
    Previous,
    /// Sample an externally injected texture instead.
    Override(wgpu::Texture),
}

/// One half of the double buffer: an owned render target and the uniform
/// values its next render will see.
struct ComputeSlot {
    target: wgpu::Texture,
    view: wgpu::TextureView,
    uniforms: Option<UniformBlock>,
}

/// A double-buffered shader pass over a square float texture.
///
/// The caller's fragment shader is compiled against a synthesized header
/// carrying the resolution constants (`WIDTH`, `HEIGHT`, `RESOLUTION`), the
/// `uniforms` struct built from the declared slots, and the feedback
/// texture binding named after the pass. Stepping never blocks on GPU
/// completion; submission order equals call order on the context's queue.
pub struct FeedbackPass {
    name: String,
    size: u32,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::RenderPipeline,
    bind_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    slots: [ComputeSlot; 2],
    /// Slot written by the next step.
    active: usize,
    /// Slot holding the most recently completed result. Starts at 1: before
    /// any step this points at primed-but-never-stepped contents.
    latest: usize,
    feedback: FeedbackSource,
}

impl FeedbackPass {
    /// Build both slots, compile the shader, and prime both render targets
    /// with the configured start value so neither half holds garbage before
    /// the first step.
    pub fn new(
        ctx: &GpuContext,
        config: &PassConfig,
        fragment_source: &str,
    ) -> Result<Self, PassError> {
        config.validate()?;

        let device = ctx.device.clone();
        let queue = ctx.queue.clone();
        let size = config.size;

        // Validate the start value before touching the GPU.
        let start = texture::texel_data(size, size, &config.start_value)?;

        let source = compose_shader(config, fragment_source);

        // Shader and pipeline validation errors are reported through the
        // error scope; diagnostics are surfaced verbatim.
        let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Fullscreen Vertex Shader"),
            source: wgpu::ShaderSource::Wgsl(FULLSCREEN_SHADER.into()),
        });
        let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Feedback Fragment Shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let bind_layout = create_bind_layout(&device, !config.uniforms.is_empty());
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Feedback Pipeline Layout"),
            bind_group_layouts: &[&bind_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Feedback Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some("main"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some("main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: wgpu::TextureFormat::Rgba32Float,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview_mask: None,
            cache: None,
        });

        if let Some(error) = pollster::block_on(error_scope.pop()) {
            return Err(PassError::ShaderCompilation(error.to_string()));
        }

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Feedback Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let slots = [0usize, 1].map(|index| {
            let label = format!("{} Target {}", config.name, index);
            let target = device.create_texture(&wgpu::TextureDescriptor {
                label: Some(&label),
                size: wgpu::Extent3d {
                    width: size,
                    height: size,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba32Float,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                    | wgpu::TextureUsages::TEXTURE_BINDING
                    | wgpu::TextureUsages::COPY_DST
                    | wgpu::TextureUsages::COPY_SRC,
                view_formats: &[],
            });
            // Priming: both halves hold the start value before the first
            // step, so the first feedback read is never garbage.
            texture::write_texels(&queue, &target, size, size, &start);
            let view = target.create_view(&wgpu::TextureViewDescriptor::default());

            let uniforms = (!config.uniforms.is_empty()).then(|| {
                let block = UniformBlock::new(&device, &config.uniforms, "Feedback Uniforms");
                block.upload(&queue);
                block
            });

            ComputeSlot {
                target,
                view,
                uniforms,
            }
        });

        log::debug!(
            "created pass `{}`: {}x{}, {} uniform slots",
            config.name,
            size,
            size,
            config.uniforms.len()
        );

        Ok(Self {
            name: config.name.clone(),
            size,
            device,
            queue,
            pipeline,
            bind_layout,
            sampler,
            slots,
            active: 0,
            latest: 1,
            feedback: FeedbackSource::Previous,
        })
    }

    /// Replace the next step's feedback input with explicit texel values.
    ///
    /// The override feeds exactly one [`compute`](Self::compute) call, then
    /// normal feedback sampling resumes. A wrong-length array is rejected
    /// and leaves any pending override unchanged.
    pub fn set_override_values(&mut self, values: &[f32]) -> Result<(), PassError> {
        let override_texture = texture::create_texture(
            &self.device,
            &self.queue,
            self.size,
            self.size,
            &TexelInit::Values(values.to_vec()),
        )?;
        self.feedback = FeedbackSource::Override(override_texture);
        Ok(())
    }

    /// Set uniform values on the slot the next step will write, for
    /// per-step-varying inputs.
    pub fn set_uniforms(&mut self, values: &[(&str, UniformValue)]) -> Result<(), PassError> {
        self.apply_uniforms(&[self.active], values)
    }

    /// Set uniform values on both slots identically, for inputs that do not
    /// ping-pong.
    pub fn set_permanent_uniforms(
        &mut self,
        values: &[(&str, UniformValue)],
    ) -> Result<(), PassError> {
        self.apply_uniforms(&[0, 1], values)
    }

    fn apply_uniforms(
        &mut self,
        slots: &[usize],
        values: &[(&str, UniformValue)],
    ) -> Result<(), PassError> {
        // Validate every write first; a rejected call must not mutate any
        // slot.
        for &slot in slots {
            for (name, value) in values {
                match &self.slots[slot].uniforms {
                    Some(block) => block.check(name, value)?,
                    None => return Err(PassError::UnknownUniform((*name).to_string())),
                }
            }
        }
        for &slot in slots {
            if let Some(block) = self.slots[slot].uniforms.as_mut() {
                for (name, value) in values {
                    block.set(name, value);
                }
                block.upload(&self.queue);
            }
        }
        Ok(())
    }

    /// Advance the simulation by one shader evaluation.
    ///
    /// Renders into the active slot while sampling the other slot's output
    /// (or a pending override), then swaps the indices. Submits one command
    /// buffer and returns without waiting for GPU completion.
    pub fn compute(&mut self) {
        let a = self.active;
        let b = 1 - a;

        let feedback = mem::replace(&mut self.feedback, FeedbackSource::Previous);
        let override_view = match &feedback {
            FeedbackSource::Override(texture) => {
                Some(texture.create_view(&wgpu::TextureViewDescriptor::default()))
            }
            FeedbackSource::Previous => None,
        };
        let input_view = override_view.as_ref().unwrap_or(&self.slots[b].view);

        let bind_group = self.create_bind_group(a, input_view);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Feedback Step Encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Feedback Step"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.slots[a].view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.draw(0..3, 0..1);
        }
        self.queue.submit(std::iter::once(encoder.finish()));

        self.latest = a;
        self.active = b;

        log::trace!("pass `{}` stepped into slot {}", self.name, a);
    }

    /// The render-surface output of the most recently completed step.
    ///
    /// Valid immediately after construction, before any step: it then holds
    /// the primed start contents. Callers must not write to it.
    pub fn texture(&self) -> &wgpu::Texture {
        &self.slots[self.latest].target
    }

    /// View over [`texture`](Self::texture), for binding into another pass
    /// or a display pipeline.
    pub fn view(&self) -> &wgpu::TextureView {
        &self.slots[self.latest].view
    }

    /// Blocking readback of the latest output as flat `size * size * 4`
    /// values. For display and test consumers; the stepping path never
    /// waits on the GPU.
    pub fn read_back(&self) -> Result<Vec<f32>, GpuError> {
        texture::read_texture(
            &self.device,
            &self.queue,
            self.texture(),
            self.size,
            self.size,
        )
    }

    /// Current value of a declared uniform on the slot the next step
    /// writes, or `None` if the name was never declared.
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.slots[self.active].uniforms.as_ref()?.get(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Edge length of the state texture, in texels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Index of the slot the next step writes.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Index of the slot holding the latest completed result.
    pub fn latest_index(&self) -> usize {
        self.latest
    }

    fn create_bind_group(&self, slot: usize, input: &wgpu::TextureView) -> wgpu::BindGroup {
        let mut entries = Vec::with_capacity(3);
        if let Some(block) = &self.slots[slot].uniforms {
            entries.push(wgpu::BindGroupEntry {
                binding: 0,
                resource: block.buffer().as_entire_binding(),
            });
        }
        entries.push(wgpu::BindGroupEntry {
            binding: 1,
            resource: wgpu::BindingResource::TextureView(input),
        });
        entries.push(wgpu::BindGroupEntry {
            binding: 2,
            resource: wgpu::BindingResource::Sampler(&self.sampler),
        });

        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Feedback Bind Group"),
            layout: &self.bind_layout,
            entries: &entries,
        })
    }
}

/// Prepend the synthesized header to the caller's fragment source: the
/// resolution constants, the uniform struct, and the feedback texture and
/// sampler bindings named after the pass.
fn compose_shader(config: &PassConfig, fragment_source: &str) -> String {
    let name = &config.name;
    let side = config.size as f32;
    let mut source = String::new();

    source.push_str(&format!("const WIDTH: f32 = {side:.1};\n"));
    source.push_str(&format!("const HEIGHT: f32 = {side:.1};\n"));
    source.push_str("const RESOLUTION: vec2<f32> = vec2<f32>(WIDTH, HEIGHT);\n\n");

    source.push_str(&uniforms::wgsl_struct(&config.uniforms));

    source.push_str(&format!(
        "@group(0) @binding(1) var {name}: texture_2d<f32>;\n"
    ));
    source.push_str(&format!(
        "@group(0) @binding(2) var {name}_sampler: sampler;\n\n"
    ));

    source.push_str(fragment_source);
    source
}

/// Binding 0 is the uniform block (present only when uniforms were
/// declared), binding 1 the feedback texture, binding 2 its sampler.
/// Float32 textures are non-filterable without extra device features, which
/// matches the nearest-neighbor contract.
fn create_bind_layout(device: &wgpu::Device, has_uniforms: bool) -> wgpu::BindGroupLayout {
    let mut entries = Vec::with_capacity(3);
    if has_uniforms {
        entries.push(wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        });
    }
    entries.push(wgpu::BindGroupLayoutEntry {
        binding: 1,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: false },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    });
    entries.push(wgpu::BindGroupLayoutEntry {
        binding: 2,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
        count: None,
    });

    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Feedback Bind Group Layout"),
        entries: &entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::UniformDecl;

    /// Doubles the previous value and adds one, per channel.
    const DOUBLE_SHADER: &str = r#"
@fragment
fn main(@builtin(position) position: vec4<f32>) -> @location(0) vec4<f32> {
    let texel = textureLoad(field, vec2<i32>(position.xy), 0);
    return texel * 2.0 + vec4<f32>(1.0, 1.0, 1.0, 1.0);
}
"#;

    /// Ignores the feedback input and writes the `level` uniform.
    const LEVEL_SHADER: &str = r#"
@fragment
fn main() -> @location(0) vec4<f32> {
    return vec4<f32>(uniforms.level);
}
"#;

    fn gpu() -> Option<GpuContext> {
        match pollster::block_on(GpuContext::new()) {
            Ok(ctx) => Some(ctx),
            Err(GpuError::NoAdapter) => {
                eprintln!("Skipping GPU test: no adapter available");
                None
            }
            Err(e) => panic!("Failed to acquire GPU context: {:?}", e),
        }
    }

    fn field_config(size: u32) -> PassConfig {
        PassConfig {
            name: "field".to_string(),
            size,
            uniforms: vec![],
            start_value: TexelInit::Splat(0.0),
        }
    }

    fn level_config(size: u32) -> PassConfig {
        PassConfig {
            name: "field".to_string(),
            size,
            uniforms: vec![UniformDecl {
                name: "level".to_string(),
                value: UniformValue::Float(0.0),
            }],
            start_value: TexelInit::Splat(0.0),
        }
    }

    #[test]
    fn test_compose_shader_header() {
        let config = level_config(64);
        let source = compose_shader(&config, LEVEL_SHADER);
        assert!(source.contains("const WIDTH: f32 = 64.0;"));
        assert!(source.contains("const HEIGHT: f32 = 64.0;"));
        assert!(source.contains("const RESOLUTION: vec2<f32> = vec2<f32>(WIDTH, HEIGHT);"));
        assert!(source.contains("    level: f32,"));
        assert!(source.contains("@group(0) @binding(1) var field: texture_2d<f32>;"));
        assert!(source.contains("@group(0) @binding(2) var field_sampler: sampler;"));
        assert!(source.ends_with(LEVEL_SHADER));
    }

    #[test]
    fn test_primed_output_before_any_step() {
        let Some(ctx) = gpu() else { return };
        let mut config = field_config(4);
        config.start_value = TexelInit::Splat(0.25);
        let pass = FeedbackPass::new(&ctx, &config, DOUBLE_SHADER).expect("pass construction");

        assert_eq!(pass.texture().width(), 4);
        assert_eq!(pass.texture().height(), 4);
        assert_eq!(pass.active_index(), 0);
        assert_eq!(pass.latest_index(), 1);

        let texels = pass.read_back().expect("readback");
        assert_eq!(texels.len(), 4 * 4 * 4);
        assert!(texels.iter().all(|&v| v == 0.25));
    }

    #[test]
    fn test_index_parity_over_steps() {
        let Some(ctx) = gpu() else { return };
        let mut pass =
            FeedbackPass::new(&ctx, &field_config(2), DOUBLE_SHADER).expect("pass construction");

        for n in 1..=5usize {
            pass.compute();
            assert_eq!(pass.active_index(), n % 2);
            assert_eq!(pass.latest_index(), (n - 1) % 2);
        }
    }

    #[test]
    fn test_read_is_idempotent_between_steps() {
        let Some(ctx) = gpu() else { return };
        let mut pass =
            FeedbackPass::new(&ctx, &field_config(2), DOUBLE_SHADER).expect("pass construction");
        pass.compute();

        let index = pass.latest_index();
        let first = pass.read_back().expect("readback");
        let second = pass.read_back().expect("readback");
        assert_eq!(pass.latest_index(), index);
        assert_eq!(first, second);
    }

    #[test]
    fn test_double_and_increment_sequence() {
        let Some(ctx) = gpu() else { return };
        let mut pass =
            FeedbackPass::new(&ctx, &field_config(1), DOUBLE_SHADER).expect("pass construction");

        assert_eq!(pass.read_back().expect("readback"), vec![0.0; 4]);

        pass.compute();
        assert_eq!(pass.read_back().expect("readback"), vec![1.0; 4]);

        pass.compute();
        assert_eq!(pass.read_back().expect("readback"), vec![3.0; 4]);
    }

    #[test]
    fn test_override_feeds_exactly_one_step() {
        let Some(ctx) = gpu() else { return };
        let mut pass =
            FeedbackPass::new(&ctx, &field_config(1), DOUBLE_SHADER).expect("pass construction");

        pass.set_override_values(&[10.0; 4]).expect("override");
        pass.compute();
        assert_eq!(pass.read_back().expect("readback"), vec![21.0; 4]);

        // Next step samples normal feedback again, not the override.
        pass.compute();
        assert_eq!(pass.read_back().expect("readback"), vec![43.0; 4]);
    }

    #[test]
    fn test_wrong_length_override_rejected() {
        let Some(ctx) = gpu() else { return };
        let mut pass =
            FeedbackPass::new(&ctx, &field_config(1), DOUBLE_SHADER).expect("pass construction");

        let result = pass.set_override_values(&[0.0; 5]);
        assert!(matches!(
            result,
            Err(PassError::Config(
                crate::schema::ConfigError::WrongValueCount {
                    expected: 4,
                    got: 5
                }
            ))
        ));

        // The rejected call left no pending override behind.
        pass.compute();
        assert_eq!(pass.read_back().expect("readback"), vec![1.0; 4]);

        // A pending override also survives a rejected call.
        pass.set_override_values(&[10.0; 4]).expect("override");
        assert!(pass.set_override_values(&[0.0; 3]).is_err());
        pass.compute();
        assert_eq!(pass.read_back().expect("readback"), vec![21.0; 4]);
    }

    #[test]
    fn test_uniforms_apply_to_slot_written_next() {
        let Some(ctx) = gpu() else { return };
        let mut pass =
            FeedbackPass::new(&ctx, &level_config(2), LEVEL_SHADER).expect("pass construction");

        pass.set_uniforms(&[("level", UniformValue::Float(1.0))])
            .expect("set uniforms");
        pass.compute();
        assert!(pass.read_back().expect("readback").iter().all(|&v| v == 1.0));

        pass.set_uniforms(&[("level", UniformValue::Float(2.0))])
            .expect("set uniforms");
        pass.compute();
        assert!(pass.read_back().expect("readback").iter().all(|&v| v == 2.0));

        // Without a new write, the next step re-renders the first slot and
        // observes that slot's last value, not the other slot's.
        pass.compute();
        assert!(pass.read_back().expect("readback").iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_permanent_uniforms_hit_both_slots() {
        let Some(ctx) = gpu() else { return };
        let mut pass =
            FeedbackPass::new(&ctx, &level_config(2), LEVEL_SHADER).expect("pass construction");

        pass.set_permanent_uniforms(&[("level", UniformValue::Float(7.0))])
            .expect("set permanent uniforms");

        // Both slots carry the value, whichever one is active.
        for slot in &pass.slots {
            let block = slot.uniforms.as_ref().expect("uniform block");
            assert_eq!(block.get("level"), Some(UniformValue::Float(7.0)));
        }
        assert_eq!(pass.uniform("level"), Some(UniformValue::Float(7.0)));
        assert_eq!(pass.uniform("missing"), None);

        pass.compute();
        assert!(pass.read_back().expect("readback").iter().all(|&v| v == 7.0));
        pass.compute();
        assert!(pass.read_back().expect("readback").iter().all(|&v| v == 7.0));
    }

    #[test]
    fn test_unknown_uniform_rejected() {
        let Some(ctx) = gpu() else { return };
        let mut pass =
            FeedbackPass::new(&ctx, &level_config(2), LEVEL_SHADER).expect("pass construction");

        let result = pass.set_uniforms(&[("missing", UniformValue::Float(1.0))]);
        assert!(matches!(
            result,
            Err(PassError::UnknownUniform(name)) if name == "missing"
        ));

        // A pass with no declared uniforms rejects every name.
        let mut bare =
            FeedbackPass::new(&ctx, &field_config(2), DOUBLE_SHADER).expect("pass construction");
        assert!(matches!(
            bare.set_uniforms(&[("level", UniformValue::Float(1.0))]),
            Err(PassError::UnknownUniform(_))
        ));
    }

    #[test]
    fn test_wrong_uniform_type_rejected() {
        let Some(ctx) = gpu() else { return };
        let mut pass =
            FeedbackPass::new(&ctx, &level_config(2), LEVEL_SHADER).expect("pass construction");

        let result = pass.set_uniforms(&[("level", UniformValue::Vec2([1.0, 2.0]))]);
        assert!(matches!(
            result,
            Err(PassError::UniformType {
                expected: "f32",
                got: "vec2<f32>",
                ..
            })
        ));
    }

    #[test]
    fn test_rejected_batch_mutates_nothing() {
        let Some(ctx) = gpu() else { return };
        let mut pass =
            FeedbackPass::new(&ctx, &level_config(2), LEVEL_SHADER).expect("pass construction");

        let result = pass.set_uniforms(&[
            ("level", UniformValue::Float(5.0)),
            ("missing", UniformValue::Float(1.0)),
        ]);
        assert!(result.is_err());

        // The valid entry in the rejected batch was not applied either.
        pass.compute();
        assert!(pass.read_back().expect("readback").iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_shader_compile_error_surfaces_diagnostics() {
        let Some(ctx) = gpu() else { return };
        let result = FeedbackPass::new(&ctx, &field_config(2), "this is not wgsl");
        match result {
            Err(PassError::ShaderCompilation(message)) => {
                assert!(!message.is_empty());
            }
            other => panic!("expected shader compilation failure, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_invalid_construction_parameters() {
        let Some(ctx) = gpu() else { return };

        let result = FeedbackPass::new(&ctx, &field_config(0), DOUBLE_SHADER);
        assert!(matches!(
            result.err(),
            Some(PassError::Config(crate::schema::ConfigError::InvalidSize))
        ));

        let mut config = field_config(2);
        config.start_value = TexelInit::Values(vec![0.0; 3]);
        let result = FeedbackPass::new(&ctx, &config, DOUBLE_SHADER);
        assert!(matches!(
            result.err(),
            Some(PassError::Config(
                crate::schema::ConfigError::WrongValueCount { .. }
            ))
        ));
    }
}
