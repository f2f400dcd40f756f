//! Configuration types for feedback pass construction.

use serde::{Deserialize, Serialize};

/// Initial contents of a feedback texture: a single scalar broadcast to
/// every channel of every texel, or a flat array carrying exactly
/// `width * height * 4` values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TexelInit {
    /// Fill every channel of every texel with one value.
    Splat(f32),
    /// Explicit per-texel values, 4 channels per texel, row-major.
    Values(Vec<f32>),
}

impl Default for TexelInit {
    fn default() -> Self {
        Self::Splat(0.0)
    }
}

/// A uniform value. Declarations fix the type of each slot at construction;
/// later writes must carry the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
}

impl UniformValue {
    /// WGSL type name, as it appears in the synthesized uniform struct.
    pub fn wgsl_type(&self) -> &'static str {
        match self {
            Self::Float(_) => "f32",
            Self::Vec2(_) => "vec2<f32>",
            Self::Vec3(_) => "vec3<f32>",
            Self::Vec4(_) => "vec4<f32>",
        }
    }

    /// Byte size in a uniform buffer.
    pub(crate) fn size(&self) -> usize {
        match self {
            Self::Float(_) => 4,
            Self::Vec2(_) => 8,
            Self::Vec3(_) => 12,
            Self::Vec4(_) => 16,
        }
    }

    /// Required alignment in the uniform address space.
    pub(crate) fn align(&self) -> usize {
        match self {
            Self::Float(_) => 4,
            Self::Vec2(_) => 8,
            Self::Vec3(_) | Self::Vec4(_) => 16,
        }
    }

    /// The scalar components, in declaration order.
    pub(crate) fn components(&self) -> &[f32] {
        match self {
            Self::Float(v) => std::slice::from_ref(v),
            Self::Vec2(v) => v,
            Self::Vec3(v) => v,
            Self::Vec4(v) => v,
        }
    }
}

/// One uniform slot declared at pass construction, with its initial value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniformDecl {
    /// Field name inside the synthesized `uniforms` struct.
    pub name: String,
    /// Initial value; also fixes the slot's type.
    pub value: UniformValue,
}

/// Construction parameters for a [`FeedbackPass`](crate::FeedbackPass).
///
/// The fragment shader source is passed alongside this config; everything
/// here is plain data and round-trips through serde.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassConfig {
    /// Pass name. Also names the feedback texture binding in the shader,
    /// so it must be a valid shader identifier.
    pub name: String,
    /// Edge length of the square state texture, in texels.
    pub size: u32,
    /// Uniform slots shared in declaration between both buffer halves but
    /// valued independently per half.
    #[serde(default)]
    pub uniforms: Vec<UniformDecl>,
    /// Contents of the state texture before the first step.
    #[serde(default)]
    pub start_value: TexelInit,
}

impl PassConfig {
    /// Validate construction parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::InvalidSize);
        }
        if !is_shader_ident(&self.name) || self.name == "uniforms" {
            return Err(ConfigError::InvalidName(self.name.clone()));
        }
        for (i, decl) in self.uniforms.iter().enumerate() {
            if !is_shader_ident(&decl.name) {
                return Err(ConfigError::InvalidName(decl.name.clone()));
            }
            if self.uniforms[..i].iter().any(|d| d.name == decl.name) {
                return Err(ConfigError::DuplicateUniform(decl.name.clone()));
            }
        }
        if let TexelInit::Values(values) = &self.start_value {
            let expected = self.size as usize * self.size as usize * 4;
            if values.len() != expected {
                return Err(ConfigError::WrongValueCount {
                    expected,
                    got: values.len(),
                });
            }
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Pass size must be positive")]
    InvalidSize,
    #[error("`{0}` is not a valid shader identifier")]
    InvalidName(String),
    #[error("Uniform `{0}` is declared twice")]
    DuplicateUniform(String),
    #[error("Texture data has {got} values, expected {expected} (4 channels per texel)")]
    WrongValueCount { expected: usize, got: usize },
}

fn is_shader_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let leading = match chars.next() {
        Some(c) => c.is_ascii_alphabetic() || c == '_',
        None => false,
    };
    leading && s != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
