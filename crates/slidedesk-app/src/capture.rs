//! Offscreen slide capture for screenshots.

use peniko::Color;
use slidedesk_render::PngRenderResult;
use vello::{AaConfig, RenderParams, Scene};

use crate::error::AppError;

/// A texture Vello can render into: storage-bindable Rgba8Unorm that can also
/// be copied out or sampled by the blitter.
pub fn vello_target(
    device: &vello::wgpu::Device,
    label: &str,
    width: u32,
    height: u32,
) -> vello::wgpu::Texture {
    use vello::wgpu::TextureUsages;
    device.create_texture(&vello::wgpu::TextureDescriptor {
        label: Some(label),
        size: extent(width, height),
        mip_level_count: 1,
        sample_count: 1,
        dimension: vello::wgpu::TextureDimension::D2,
        format: vello::wgpu::TextureFormat::Rgba8Unorm,
        usage: TextureUsages::STORAGE_BINDING
            | TextureUsages::COPY_SRC
            | TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    })
}

fn extent(width: u32, height: u32) -> vello::wgpu::Extent3d {
    vello::wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    }
}

/// Render a scene into an offscreen texture and read the pixels back.
pub fn render_scene_to_rgba(
    device: &vello::wgpu::Device,
    queue: &vello::wgpu::Queue,
    vello_renderer: &mut vello::Renderer,
    scene: &Scene,
    width: u32,
    height: u32,
) -> Option<PngRenderResult> {
    if width == 0 || height == 0 {
        return None;
    }

    let texture = vello_target(device, "slide capture texture", width, height);
    let view = texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

    let params = RenderParams {
        base_color: Color::WHITE,
        width,
        height,
        antialiasing_method: AaConfig::Area,
    };
    if let Err(e) = vello_renderer.render_to_texture(device, queue, scene, &view, &params) {
        log::error!("Failed to render slide capture: {:?}", e);
        return None;
    }

    // Rows are padded to wgpu's copy alignment.
    let bytes_per_row = (width * 4).next_multiple_of(256);
    let readback = device.create_buffer(&vello::wgpu::BufferDescriptor {
        label: Some("slide capture readback"),
        size: u64::from(bytes_per_row) * u64::from(height),
        usage: vello::wgpu::BufferUsages::COPY_DST | vello::wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
        label: Some("slide capture encoder"),
    });
    encoder.copy_texture_to_buffer(
        vello::wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: vello::wgpu::Origin3d::ZERO,
            aspect: vello::wgpu::TextureAspect::All,
        },
        vello::wgpu::TexelCopyBufferInfo {
            buffer: &readback,
            layout: vello::wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        extent(width, height),
    );
    queue.submit(std::iter::once(encoder.finish()));

    let slice = readback.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(vello::wgpu::MapMode::Read, move |result| {
        tx.send(result).ok();
    });
    let _ = device.poll(vello::wgpu::PollType::wait_indefinitely());

    if rx.recv().ok()?.is_err() {
        log::error!("Failed to map slide capture buffer");
        return None;
    }

    let mapped = slice.get_mapped_range();
    let rgba_data = strip_row_padding(&mapped, width, height, bytes_per_row);
    drop(mapped);
    readback.unmap();

    Some(PngRenderResult {
        rgba_data,
        width,
        height,
    })
}

fn strip_row_padding(data: &[u8], width: u32, height: u32, bytes_per_row: u32) -> Vec<u8> {
    let row_len = (width * 4) as usize;
    let mut out = Vec::with_capacity(row_len * height as usize);
    for row in 0..height as usize {
        let start = row * bytes_per_row as usize;
        out.extend_from_slice(&data[start..start + row_len]);
    }
    out
}

/// Encode RGBA8 pixels as a PNG file.
pub fn encode_png(image: &PngRenderResult) -> Result<Vec<u8>, AppError> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, image.width, image.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| AppError::Png(e.to_string()))?;
        writer
            .write_image_data(&image.rgba_data)
            .map_err(|e| AppError::Png(e.to_string()))?;
    }
    Ok(png_data)
}
