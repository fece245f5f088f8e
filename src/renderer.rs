use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use wgpu::util::DeviceExt;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::camera::OrbitCamera;
use crate::core::GpuContext;
use crate::hud::{Hud, HudStats};
use crate::scene::{lamp_geometry, Material, MeshKind, Scene};
use crate::texture::{create_depth_texture, GpuTexture, TextureImage, DEPTH_FORMAT};
use crate::types::{GlobalsUniform, LampVertex, ModelUniform, Vertex};

const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn new<V: bytemuck::Pod>(device: &wgpu::Device, label: &str, vertices: &[V], indices: &[u16]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Uniform buffer holding one draw's model transform
struct ModelSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ModelSlot {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<ModelUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self { buffer, bind_group }
    }

    fn write(&self, queue: &wgpu::Queue, model: glam::Mat4) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[ModelUniform::new(model)]));
    }
}

/// Draws the textured scene, the lamp markers and the HUD
pub struct Renderer {
    gpu: GpuContext,
    depth_view: wgpu::TextureView,
    scene_pipeline: wgpu::RenderPipeline,
    lamp_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    meshes: HashMap<MeshKind, GpuMesh>,
    lamp_mesh: GpuMesh,
    materials: HashMap<Material, wgpu::BindGroup>,
    object_slots: Vec<ModelSlot>,
    lamp_slots: Vec<ModelSlot>,
    scene: Scene,
    hud: Option<Hud>,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, scene: Scene, assets_dir: &Path, show_hud: bool) -> Result<Self> {
        let gpu = GpuContext::new(window.clone()).await?;
        let device = &gpu.device;

        let depth_view = create_depth_texture(device, gpu.config.width, gpu.config.height);

        let globals_layout = Self::uniform_layout(
            device,
            "globals_bind_group_layout",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );
        let model_layout = Self::uniform_layout(device, "model_bind_group_layout", wgpu::ShaderStages::VERTEX);
        let texture_layout = Self::texture_layout(device);

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Globals Buffer"),
            size: std::mem::size_of::<GlobalsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bind_group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let scene_pipeline = Self::create_pipeline(
            device,
            "Scene Pipeline",
            include_str!("shaders/scene.wgsl"),
            &[&globals_layout, &model_layout, &texture_layout],
            Vertex::layout(),
            gpu.format(),
        );
        let lamp_pipeline = Self::create_pipeline(
            device,
            "Lamp Pipeline",
            include_str!("shaders/lamp.wgsl"),
            &[&globals_layout, &model_layout],
            LampVertex::layout(),
            gpu.format(),
        );

        let meshes = MeshKind::ALL
            .into_iter()
            .map(|kind| {
                let data = kind.data();
                let mesh = GpuMesh::new(device, &format!("{kind:?} Mesh"), data.vertices, data.indices);
                (kind, mesh)
            })
            .collect();
        let (lamp_vertices, lamp_indices) = lamp_geometry();
        let lamp_mesh = GpuMesh::new(device, "Lamp Mesh", lamp_vertices, lamp_indices);

        let materials = Material::ALL
            .into_iter()
            .map(|material| {
                let image = TextureImage::for_material(material, assets_dir);
                let texture = GpuTexture::upload(device, &gpu.queue, &image, material.file_name());
                let bind_group = Self::texture_bind_group(device, &texture_layout, &texture);
                (material, bind_group)
            })
            .collect();

        let object_slots = scene
            .objects
            .iter()
            .map(|object| ModelSlot::new(device, &model_layout, object.name))
            .collect();
        let lamp_slots = (0..scene.lamp_transforms().len())
            .map(|_| ModelSlot::new(device, &model_layout, "lamp face"))
            .collect();

        let hud = show_hud.then(|| Hud::new(device, gpu.format(), &window));

        log::info!(
            "Renderer ready: {} objects, {} lamp faces, HUD {}",
            scene.objects.len(),
            scene.lamp_transforms().len(),
            if show_hud { "on" } else { "off" }
        );

        Ok(Self {
            gpu,
            depth_view,
            scene_pipeline,
            lamp_pipeline,
            globals_buffer,
            globals_bind_group,
            meshes,
            lamp_mesh,
            materials,
            object_slots,
            lamp_slots,
            scene,
            hud,
        })
    }

    fn uniform_layout(device: &wgpu::Device, label: &str, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    }

    fn texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
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

    fn texture_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        texture: &GpuTexture,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texture_bind_group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        })
    }

    fn create_pipeline(
        device: &wgpu::Device,
        label: &str,
        source: &str,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
        vertex_layout: wgpu::VertexBufferLayout<'static>,
        surface_format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts,
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        if self.gpu.has_area() {
            self.depth_view = create_depth_texture(&self.gpu.device, width, height);
        }
    }

    /// Re-apply the surface configuration after `Lost` or `Outdated`
    pub fn reconfigure(&self) {
        self.gpu.reconfigure();
    }

    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) {
        if let Some(hud) = &mut self.hud {
            hud.on_window_event(window, event);
        }
    }

    fn write_uniforms(&self, camera: &OrbitCamera) {
        let globals = GlobalsUniform::new(
            camera.view_matrix(),
            camera.projection_matrix(self.gpu.aspect_ratio()),
            camera.position(),
            &self.scene.lights,
            self.scene.object_color,
        );
        self.gpu
            .queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::cast_slice(&[globals]));

        for (slot, model) in self.object_slots.iter().zip(self.scene.model_matrices()) {
            slot.write(&self.gpu.queue, model);
        }
        for (slot, model) in self.lamp_slots.iter().zip(self.scene.lamp_transforms()) {
            slot.write(&self.gpu.queue, model);
        }
    }

    pub fn render(&mut self, window: &Window, camera: &OrbitCamera, fps: f32) -> Result<(), wgpu::SurfaceError> {
        if !self.gpu.has_area() {
            return Ok(());
        }

        self.write_uniforms(camera);

        let output = self.gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            pass.set_pipeline(&self.scene_pipeline);
            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            for (object, slot) in self.scene.objects.iter().zip(&self.object_slots) {
                let (Some(mesh), Some(material)) = (self.meshes.get(&object.mesh), self.materials.get(&object.material))
                else {
                    continue;
                };
                pass.set_bind_group(1, &slot.bind_group, &[]);
                pass.set_bind_group(2, material, &[]);
                mesh.draw(&mut pass);
            }

            pass.set_pipeline(&self.lamp_pipeline);
            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            for slot in &self.lamp_slots {
                pass.set_bind_group(1, &slot.bind_group, &[]);
                self.lamp_mesh.draw(&mut pass);
            }
        }

        if let Some(hud) = &mut self.hud {
            let stats = HudStats {
                fps,
                mode: camera.mode(),
                fov: camera.fov(),
                projection: camera.projection_mode(),
            };
            hud.draw(
                &self.gpu.device,
                &self.gpu.queue,
                &mut encoder,
                &view,
                window,
                [self.gpu.config.width, self.gpu.config.height],
                &stats,
            );
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
