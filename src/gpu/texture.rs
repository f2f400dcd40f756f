//! Data texture creation and readback.
//!
//! Textures are 4-channel float (`Rgba32Float`), uploaded once at creation.
//! Release is scoped: a texture drops with whatever owns it.

use super::GpuError;
use crate::schema::{ConfigError, TexelInit};

/// Bytes per texel: 4 channels of f32.
const TEXEL_BYTES: u32 = 16;

/// Expand a [`TexelInit`] into flat per-channel values.
///
/// Validation happens here, before any GPU resource is allocated: an
/// explicit array must carry exactly `width * height * 4` values.
pub(crate) fn texel_data(
    width: u32,
    height: u32,
    init: &TexelInit,
) -> Result<Vec<f32>, ConfigError> {
    if width == 0 || height == 0 {
        return Err(ConfigError::InvalidSize);
    }
    let expected = width as usize * height as usize * 4;
    match init {
        TexelInit::Splat(value) => Ok(vec![*value; expected]),
        TexelInit::Values(values) => {
            if values.len() != expected {
                return Err(ConfigError::WrongValueCount {
                    expected,
                    got: values.len(),
                });
            }
            Ok(values.clone())
        }
    }
}

/// Build a GPU-resident float texture, 4 channels per texel, uploaded once.
pub fn create_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    width: u32,
    height: u32,
    init: &TexelInit,
) -> Result<wgpu::Texture, ConfigError> {
    let data = texel_data(width, height, init)?;

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Data Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba32Float,
        usage: wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_DST
            | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    write_texels(queue, &texture, width, height, &data);

    Ok(texture)
}

/// Upload flat float values into a texture.
pub(crate) fn write_texels(
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    width: u32,
    height: u32,
    data: &[f32],
) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        bytemuck::cast_slice(data),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(width * TEXEL_BYTES),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
}

/// Blocking readback of a float texture into flat `width * height * 4`
/// values. Waits for the GPU; only display and test consumers should call
/// this, never the stepping path.
pub(crate) fn read_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    width: u32,
    height: u32,
) -> Result<Vec<f32>, GpuError> {
    let row_bytes = width * TEXEL_BYTES;
    let padded_row =
        row_bytes.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT) * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;

    let staging = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Readback Buffer"),
        size: u64::from(padded_row) * u64::from(height),
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Readback Encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_row),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(std::iter::once(encoder.finish()));

    let buffer_slice = staging.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
        tx.send(result).ok();
    });

    device.poll(wgpu::PollType::wait_indefinitely()).ok();
    rx.recv().expect("map_async callback dropped")?;

    let mut out = vec![0.0f32; width as usize * height as usize * 4];
    {
        let data = buffer_slice.get_mapped_range();
        let floats_per_row = width as usize * 4;
        for row in 0..height as usize {
            let src_start = row * padded_row as usize;
            let src = &data[src_start..src_start + row_bytes as usize];
            let dst = &mut out[row * floats_per_row..(row + 1) * floats_per_row];
            dst.copy_from_slice(bytemuck::cast_slice(src));
        }
    }
    staging.unmap();

    Ok(out)
}
