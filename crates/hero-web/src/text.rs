//! Label glyph atlas.
//!
//! Each label line is rasterized once with fontdue into a shared R8 atlas
//! texture; per frame the labels are just tinted quads sampling their rect.

use anyhow::{anyhow, bail};
use hero_core::labels::Label;

const ATLAS_SIZE: u32 = 2048;
// Rasterization size per line, in pixels. Label world size comes from the
// table's font_size; this only controls glyph sharpness.
const LINE_PX: f32 = 64.0;
const LETTER_SPACING_EM: f32 = 0.05;

/// Atlas placement of one rendered label line.
#[derive(Clone, Copy, Debug)]
pub struct LabelSprite {
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
    /// Line width over line height, for sizing the quad.
    pub aspect: f32,
}

pub struct GlyphAtlas {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub sprites: Vec<LabelSprite>,
}

/// Rasterize every label into a row-packed coverage atlas.
pub fn build_atlas(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    font_bytes: &[u8],
    labels: &[Label],
) -> anyhow::Result<GlyphAtlas> {
    let font = fontdue::Font::from_bytes(font_bytes, fontdue::FontSettings::default())
        .map_err(|e| anyhow!("font parse: {e}"))?;
    let line = font
        .horizontal_line_metrics(LINE_PX)
        .ok_or_else(|| anyhow!("font has no horizontal metrics"))?;
    let ascent = line.ascent;
    let line_height = (line.ascent - line.descent).ceil().max(1.0) as u32;
    let spacing = LETTER_SPACING_EM * LINE_PX;

    let mut pixels = vec![0u8; (ATLAS_SIZE * ATLAS_SIZE) as usize];
    let mut sprites = Vec::with_capacity(labels.len());
    let mut next_x = 1u32;
    let mut next_y = 1u32;
    let mut row_height = 0u32;

    for label in labels {
        let mut width = 0.0f32;
        for ch in label.text.chars() {
            width += font.metrics(ch, LINE_PX).advance_width + spacing;
        }
        let w = (width.ceil() as u32).max(1);
        let h = line_height;

        if next_x + w + 1 > ATLAS_SIZE {
            next_x = 1;
            next_y += row_height + 1;
            row_height = 0;
        }
        if next_y + h + 1 > ATLAS_SIZE || w + 2 > ATLAS_SIZE {
            bail!("glyph atlas overflow at label `{}`", label.text);
        }

        let mut pen = 0.0f32;
        for ch in label.text.chars() {
            let (metrics, bitmap) = font.rasterize(ch, LINE_PX);
            let gx = next_x as i64 + (pen + metrics.xmin as f32) as i64;
            let gy = next_y as i64 + ascent as i64 - metrics.ymin as i64 - metrics.height as i64;
            blit(&mut pixels, &bitmap, metrics.width, metrics.height, gx, gy);
            pen += metrics.advance_width + spacing;
        }

        let inv = 1.0 / ATLAS_SIZE as f32;
        sprites.push(LabelSprite {
            uv_min: [next_x as f32 * inv, next_y as f32 * inv],
            uv_max: [(next_x + w) as f32 * inv, (next_y + h) as f32 * inv],
            aspect: w as f32 / h as f32,
        });
        next_x += w + 1;
        row_height = row_height.max(h);
    }

    let size = wgpu::Extent3d {
        width: ATLAS_SIZE,
        height: ATLAS_SIZE,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("label_atlas"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::R8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(ATLAS_SIZE),
            rows_per_image: Some(ATLAS_SIZE),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("label_atlas_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });

    Ok(GlyphAtlas {
        texture,
        view,
        sampler,
        sprites,
    })
}

fn blit(atlas: &mut [u8], bitmap: &[u8], w: usize, h: usize, x0: i64, y0: i64) {
    for row in 0..h as i64 {
        let y = y0 + row;
        if !(0..ATLAS_SIZE as i64).contains(&y) {
            continue;
        }
        for col in 0..w as i64 {
            let x = x0 + col;
            if !(0..ATLAS_SIZE as i64).contains(&x) {
                continue;
            }
            let src = bitmap[(row * w as i64 + col) as usize];
            let dst = &mut atlas[(y * ATLAS_SIZE as i64 + x) as usize];
            *dst = (*dst).max(src);
        }
    }
}
