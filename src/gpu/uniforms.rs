//! Statically declared uniform slots.
//!
//! Uniform names and types are fixed when a pass is constructed. Each buffer
//! half owns one block: a CPU byte mirror laid out to WGSL uniform
//! address-space rules plus the GPU buffer it uploads to. Writes against a
//! name that was never declared, or with a different type than declared, are
//! rejected before anything is touched.

use super::PassError;
use crate::schema::{UniformDecl, UniformValue};

/// One declared uniform resolved to an offset in the block.
#[derive(Debug, Clone)]
struct UniformSlot {
    name: String,
    wgsl_type: &'static str,
    offset: usize,
    size: usize,
}

/// Resolve declarations into (slot, offset) pairs and the block's total
/// byte size. Scalars and vectors keep their natural alignment in the
/// uniform address space; the block size is rounded up to 16.
fn resolve_layout(decls: &[UniformDecl]) -> (Vec<UniformSlot>, usize) {
    let mut slots = Vec::with_capacity(decls.len());
    let mut cursor = 0usize;
    for decl in decls {
        let offset = cursor.next_multiple_of(decl.value.align());
        slots.push(UniformSlot {
            name: decl.name.clone(),
            wgsl_type: decl.value.wgsl_type(),
            offset,
            size: decl.value.size(),
        });
        cursor = offset + decl.value.size();
    }
    (slots, cursor.next_multiple_of(16).max(16))
}

/// WGSL source for the uniform struct and its binding. Empty declaration
/// lists emit nothing; the shader then has no binding 0.
pub(crate) fn wgsl_struct(decls: &[UniformDecl]) -> String {
    if decls.is_empty() {
        return String::new();
    }
    let mut source = String::from("struct Uniforms {\n");
    for decl in decls {
        source.push_str(&format!("    {}: {},\n", decl.name, decl.value.wgsl_type()));
    }
    source.push_str("}\n\n@group(0) @binding(0) var<uniform> uniforms: Uniforms;\n");
    source
}

/// A shader instance's uniform block: resolved layout, CPU mirror, GPU
/// buffer.
pub(crate) struct UniformBlock {
    slots: Vec<UniformSlot>,
    data: Vec<u8>,
    buffer: wgpu::Buffer,
}

impl UniformBlock {
    /// Build a block from declarations and fill the mirror with their
    /// initial values. The caller uploads when ready.
    pub fn new(device: &wgpu::Device, decls: &[UniformDecl], label: &str) -> Self {
        let (slots, total) = resolve_layout(decls);

        let mut data = vec![0u8; total];
        for (slot, decl) in slots.iter().zip(decls) {
            data[slot.offset..slot.offset + slot.size]
                .copy_from_slice(bytemuck::cast_slice(decl.value.components()));
        }

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: total as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            slots,
            data,
            buffer,
        }
    }

    /// Check a write without applying it.
    pub fn check(&self, name: &str, value: &UniformValue) -> Result<(), PassError> {
        let slot = self
            .slots
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| PassError::UnknownUniform(name.to_string()))?;
        if slot.wgsl_type != value.wgsl_type() {
            return Err(PassError::UniformType {
                name: name.to_string(),
                expected: slot.wgsl_type,
                got: value.wgsl_type(),
            });
        }
        Ok(())
    }

    /// Write a value into the CPU mirror. The caller has validated the
    /// name and type via [`check`](Self::check).
    pub fn set(&mut self, name: &str, value: &UniformValue) {
        if let Some(slot) = self.slots.iter().find(|s| s.name == name) {
            self.data[slot.offset..slot.offset + slot.size]
                .copy_from_slice(bytemuck::cast_slice(value.components()));
        }
    }

    /// Upload the whole mirror to the GPU buffer.
    pub fn upload(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.buffer, 0, &self.data);
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Current value of a declared uniform, reconstructed from the mirror.
    pub fn get(&self, name: &str) -> Option<UniformValue> {
        let slot = self.slots.iter().find(|s| s.name == name)?;
        let floats: &[f32] =
            bytemuck::cast_slice(&self.data[slot.offset..slot.offset + slot.size]);
        Some(match slot.wgsl_type {
            "f32" => UniformValue::Float(floats[0]),
            "vec2<f32>" => UniformValue::Vec2([floats[0], floats[1]]),
            "vec3<f32>" => UniformValue::Vec3([floats[0], floats[1], floats[2]]),
            _ => UniformValue::Vec4([floats[0], floats[1], floats[2], floats[3]]),
        })
    }
}
