use std::path::Path;

use anyhow::{Context, Result};

use crate::scene::Material;

const CHECKER_SIZE: u32 = 8;

/// Decoded RGBA8 pixels ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    pub fn load(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("Failed to decode {}", path.display()))?
            .into_rgba8();
        let (width, height) = image.dimensions();
        Ok(Self {
            width,
            height,
            rgba: image.into_raw(),
        })
    }

    /// Two-color checkerboard, one texel per square
    pub fn checker(size: u32, a: [u8; 4], b: [u8; 4]) -> Self {
        let size = size.max(1);
        let rgba = (0..size)
            .flat_map(|y| (0..size).map(move |x| if (x + y) % 2 == 0 { a } else { b }))
            .flatten()
            .collect();
        Self {
            width: size,
            height: size,
            rgba,
        }
    }

    /// Load the material's image from `assets_dir`, or a checker if it is
    /// missing or unreadable
    pub fn for_material(material: Material, assets_dir: &Path) -> Self {
        let path = assets_dir.join(material.file_name());
        match Self::load(&path) {
            Ok(image) => {
                log::info!("Loaded texture {} ({}x{})", path.display(), image.width, image.height);
                image
            }
            Err(e) => {
                log::warn!("{e:#}; using checker texture for {material:?}");
                let (a, b) = material.fallback_colors();
                Self::checker(CHECKER_SIZE, a, b)
            }
        }
    }
}

/// GPU texture with its view and sampler bound together
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl GpuTexture {
    pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, image: &TextureImage, label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
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
            &image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}

/// Depth attachment sized to the surface
pub fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checker_alternates_colors() {
        let a = [255, 0, 0, 255];
        let b = [0, 0, 255, 255];
        let image = TextureImage::checker(2, a, b);

        assert_eq!(image.rgba.len(), 2 * 2 * 4);
        assert_eq!(&image.rgba[0..4], &a);
        assert_eq!(&image.rgba[4..8], &b);
        assert_eq!(&image.rgba[8..12], &b);
        assert_eq!(&image.rgba[12..16], &a);
    }

    #[test]
    fn missing_image_falls_back_to_checker() {
        let image = TextureImage::for_material(Material::Wood, Path::new("/nonexistent/assets"));
        assert_eq!((image.width, image.height), (CHECKER_SIZE, CHECKER_SIZE));
        assert_eq!(image.rgba.len(), (CHECKER_SIZE * CHECKER_SIZE * 4) as usize);
    }

    #[test]
    fn load_reports_path_on_failure() {
        let err = TextureImage::load(Path::new("/nonexistent/board.png")).unwrap_err();
        assert!(format!("{err:#}").contains("board.png"));
    }
}
