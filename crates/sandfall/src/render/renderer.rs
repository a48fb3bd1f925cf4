//! wgpu renderer that shows the grid as a nearest-sampled texture
//!
//! Each frame the grid is coloured on the CPU (see [`super::palette`]) and
//! uploaded into a texture with one texel per cell. A single triangle
//! generated in the vertex shader stretches it over the surface, so the
//! pipeline needs no vertex or index buffers.

use std::sync::Arc;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use sandfall_core::SimulationState;

use super::palette;
use crate::error::InitError;

const BYTES_PER_TEXEL: usize = 4;

/// Texture holding one RGBA texel per grid cell, plus its CPU staging copy
struct GridTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    extent: wgpu::Extent3d,
    pixels: Vec<u8>,
}

impl GridTexture {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, width: u32, height: u32) -> Self {
        let extent = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("grid_cells"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("grid_nearest"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("grid_cells"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            texture,
            bind_group,
            extent,
            pixels: vec![0; staging_len(width, height)],
        }
    }

    fn upload(&self, queue: &wgpu::Queue) {
        queue.write_texture(
            self.texture.as_image_copy(),
            &self.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.extent.width * BYTES_PER_TEXEL as u32),
                rows_per_image: Some(self.extent.height),
            },
            self.extent,
        );
    }
}

/// Byte length of an RGBA staging buffer for a `width` x `height` grid
fn staging_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * BYTES_PER_TEXEL
}

fn cells_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("grid_cells"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

fn grid_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::include_wgsl!("../../assets/shaders/sandfall.wgsl"));
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("grid"),
        bind_group_layouts: &[layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("grid"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(format.into())],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

/// Surface, device and the grid pipeline
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    pipeline: wgpu::RenderPipeline,
    grid: GridTexture,
    // Cosmetic only; the simulation has its own random source
    jitter_rng: Xoshiro256StarStar,
}

impl Renderer {
    pub async fn new(
        window: Arc<Window>,
        grid_width: u32,
        grid_height: u32,
    ) -> Result<Self, InitError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await?;
        log::info!("Using graphics adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("sandfall"),
                ..Default::default()
            })
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(wgpu::TextureFormat::is_srgb)
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let layout = cells_layout(&device);
        let pipeline = grid_pipeline(&device, &layout, format);
        let grid = GridTexture::new(&device, &layout, grid_width, grid_height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            pipeline,
            grid,
            jitter_rng: Xoshiro256StarStar::from_rng(&mut rand::rng()),
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Reconfigure the surface at its current size after it was lost
    pub fn reconfigure(&mut self) {
        self.resize(self.size);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Recolour the grid (plus brush overlay) and upload it
    pub fn update_grid_texture(&mut self, state: &SimulationState) {
        let footprint = state.brush_footprint();
        palette::fill_pixels(
            state.grid(),
            footprint.as_ref(),
            &mut self.jitter_rng,
            &mut self.grid.pixels,
        );
        self.grid.upload(&self.queue);
    }

    pub fn begin_frame(&mut self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Clear to black and draw the grid; egui is layered on afterwards
    pub fn render_grid(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("grid"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            ..Default::default()
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.grid.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }

    /// Present the frame; blocks on vsync
    pub fn end_frame(&self, output: wgpu::SurfaceTexture) {
        output.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staging_len_does_not_wrap_u32() {
        assert_eq!(staging_len(400, 300), 480_000);
        assert_eq!(staging_len(40_000, 40_000), 6_400_000_000);
    }
}
