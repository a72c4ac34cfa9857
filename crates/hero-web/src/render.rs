//! WebGPU state for the hero scene.
//!
//! Three pipelines over one shared uniform buffer: lit triangle meshes for
//! the resolved logo, a line list for the placeholder wireframe cube, and
//! alpha-blended atlas quads for the floating labels.

use glam::{EulerRot, Mat4, Vec3};
use hero_core::asset::ModelData;
use hero_core::constants::PLACEHOLDER_COLOR;
use hero_core::labels::Label;
use hero_core::scene::{FrameState, Light, Scene};
use web_sys as web;
use wgpu::util::DeviceExt;

use crate::text::{self, LabelSprite};

const SHADER: &str = include_str!("../shaders/hero.wgsl");
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;
const MAX_SHADER_LIGHTS: usize = 4;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    fog_color: [f32; 4],
    fog_params: [f32; 4],
    ambient: [f32; 4],
    light_pos: [[f32; 4]; 4],
    light_color: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MeshVertex {
    position: [f32; 3],
    normal: [f32; 3],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LineVertex {
    position: [f32; 3],
    color: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LabelInstance {
    position: [f32; 3],
    rotation: [f32; 3],
    size: [f32; 2],
    color: [f32; 3],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

struct LabelBatch {
    bind_group: wgpu::BindGroup,
    instance_vb: wgpu::Buffer,
    sprites: Vec<LabelSprite>,
    capacity: usize,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    label_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    atlas_layout: wgpu::BindGroupLayout,
    quad_vb: wgpu::Buffer,
    placeholder_vb: wgpu::Buffer,
    placeholder_count: u32,
    meshes: Vec<GpuMesh>,
    labels: Option<LabelBatch>,
    depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {e:?}"))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("hero_shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniform_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bg"),
            layout: &uniform_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let atlas_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("atlas_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
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
        });

        let mesh_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pl"),
            bind_group_layouts: &[&uniform_bgl],
            push_constant_ranges: &[],
        });
        let label_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("label_pl"),
            bind_group_layouts: &[&uniform_bgl, &atlas_layout],
            push_constant_ranges: &[],
        });

        let depth = wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        };

        let mesh_vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x4],
        };
        let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&mesh_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("mesh_vs"),
                buffers: &[mesh_vertex_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(depth.clone()),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("mesh_fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let line_vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
        };
        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line_pipeline"),
            layout: Some(&mesh_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("line_vs"),
                buffers: &[line_vertex_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(depth.clone()),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("line_fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let label_vertex_layouts = [
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x2],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<LabelInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![
                    1 => Float32x3,
                    2 => Float32x3,
                    3 => Float32x2,
                    4 => Float32x3,
                    5 => Float32x2,
                    6 => Float32x2,
                ],
            },
        ];
        let label_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("label_pipeline"),
            layout: Some(&label_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("label_vs"),
                buffers: &label_vertex_layouts,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                depth_write_enabled: false,
                ..depth
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("label_fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        // Shared unit quad (two triangles)
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let placeholder_vertices = placeholder_cube_edges();
        let placeholder_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("placeholder_vb"),
            contents: bytemuck::cast_slice(&placeholder_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let depth_view = create_depth_view(&device, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            mesh_pipeline,
            line_pipeline,
            label_pipeline,
            uniform_buffer,
            uniform_bind_group,
            atlas_layout,
            quad_vb,
            placeholder_vb,
            placeholder_count: placeholder_vertices.len() as u32,
            meshes: Vec::new(),
            labels: None,
            depth_view,
            width,
            height,
        })
    }

    /// Upload the resolved (already tuned) model geometry.
    pub fn upload_model(&mut self, model: &ModelData) {
        self.meshes.clear();
        for mesh in &model.meshes {
            let color = mesh.material.base_color;
            let vertices: Vec<MeshVertex> = mesh
                .positions
                .iter()
                .zip(&mesh.normals)
                .map(|(&position, &normal)| MeshVertex {
                    position,
                    normal,
                    color,
                })
                .collect();
            let vertex_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("model_vb"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
            let index_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("model_ib"),
                    contents: bytemuck::cast_slice(&mesh.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
            self.meshes.push(GpuMesh {
                vertex_buffer,
                index_buffer,
                index_count: mesh.indices.len() as u32,
            });
        }
    }

    /// Build the glyph atlas for `labels` and install the label batch.
    pub fn install_labels(&mut self, font_bytes: &[u8], labels: &[Label]) -> anyhow::Result<()> {
        let atlas = text::build_atlas(&self.device, &self.queue, font_bytes, labels)?;
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("atlas_bg"),
            layout: &self.atlas_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&atlas.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&atlas.sampler),
                },
            ],
        });
        let instance_vb = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("label_instances"),
            size: (std::mem::size_of::<LabelInstance>() * labels.len().max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        self.labels = Some(LabelBatch {
            bind_group,
            instance_vb,
            sprites: atlas.sprites,
            capacity: labels.len(),
        });
        Ok(())
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, width, height);
        }
    }

    pub fn render(&mut self, scene: &Scene, frame: &FrameState) -> Result<(), wgpu::SurfaceError> {
        let surface_frame = self.surface.get_current_texture()?;
        let view = surface_frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&build_uniforms(scene, frame)),
        );

        let label_count = if let Some(batch) = &self.labels {
            let instances: Vec<LabelInstance> = frame
                .label_poses
                .iter()
                .filter_map(|pose| {
                    let sprite = batch.sprites.get(pose.index)?;
                    Some(LabelInstance {
                        position: pose.position.to_array(),
                        rotation: pose.rotation.to_array(),
                        size: [pose.font_size * sprite.aspect, pose.font_size],
                        color: pose.color,
                        uv_min: sprite.uv_min,
                        uv_max: sprite.uv_max,
                    })
                })
                .take(batch.capacity)
                .collect();
            self.queue
                .write_buffer(&batch.instance_vb, 0, bytemuck::cast_slice(&instances));
            instances.len() as u32
        } else {
            0
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("hero_encoder"),
            });
        {
            let bg = scene.backdrop.background;
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("hero_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg[0] as f64,
                            g: bg[1] as f64,
                            b: bg[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_bind_group(0, &self.uniform_bind_group, &[]);

            if frame.show_placeholder || self.meshes.is_empty() {
                rpass.set_pipeline(&self.line_pipeline);
                rpass.set_vertex_buffer(0, self.placeholder_vb.slice(..));
                rpass.draw(0..self.placeholder_count, 0..1);
            } else {
                rpass.set_pipeline(&self.mesh_pipeline);
                for mesh in &self.meshes {
                    rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    rpass
                        .set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
                }
            }

            if label_count > 0 {
                if let Some(batch) = &self.labels {
                    rpass.set_pipeline(&self.label_pipeline);
                    rpass.set_bind_group(1, &batch.bind_group, &[]);
                    rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                    rpass.set_vertex_buffer(1, batch.instance_vb.slice(..));
                    rpass.draw(0..6, 0..label_count);
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        surface_frame.present();
        Ok(())
    }
}

fn build_uniforms(scene: &Scene, frame: &FrameState) -> SceneUniforms {
    let model = Mat4::from_euler(
        EulerRot::XYZ,
        frame.model_rotation.y,
        frame.model_rotation.x,
        0.0,
    );

    let mut ambient = [0.0f32; 4];
    let mut light_pos = [[0.0f32; 4]; MAX_SHADER_LIGHTS];
    let mut light_color = [[0.0f32; 4]; MAX_SHADER_LIGHTS];
    let mut slot = 0usize;
    for light in &scene.lights {
        match *light {
            Light::Ambient { color, intensity } => {
                ambient = [
                    color[0] * intensity,
                    color[1] * intensity,
                    color[2] * intensity,
                    0.0,
                ];
            }
            Light::Spot {
                position,
                intensity,
                color,
                ..
            }
            | Light::Point {
                position,
                intensity,
                color,
            } => {
                if slot < MAX_SHADER_LIGHTS {
                    light_pos[slot] = [position.x, position.y, position.z, intensity];
                    light_color[slot] = [color[0], color[1], color[2], 0.0];
                    slot += 1;
                }
            }
        }
    }

    SceneUniforms {
        view_proj: scene.camera.view_proj().to_cols_array_2d(),
        model: model.to_cols_array_2d(),
        camera_pos: [scene.camera.eye.x, scene.camera.eye.y, scene.camera.eye.z, 1.0],
        fog_color: [
            scene.backdrop.background[0],
            scene.backdrop.background[1],
            scene.backdrop.background[2],
            1.0,
        ],
        fog_params: [
            scene.backdrop.fog_near,
            scene.backdrop.fog_far,
            scene.backdrop.env_intensity,
            0.0,
        ],
        ambient,
        light_pos,
        light_color,
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
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

/// Edge list of the unit cube centered at the origin.
fn placeholder_cube_edges() -> Vec<LineVertex> {
    let corners: [Vec3; 8] = [
        Vec3::new(-0.5, -0.5, -0.5),
        Vec3::new(0.5, -0.5, -0.5),
        Vec3::new(0.5, 0.5, -0.5),
        Vec3::new(-0.5, 0.5, -0.5),
        Vec3::new(-0.5, -0.5, 0.5),
        Vec3::new(0.5, -0.5, 0.5),
        Vec3::new(0.5, 0.5, 0.5),
        Vec3::new(-0.5, 0.5, 0.5),
    ];
    const EDGES: [(usize, usize); 12] = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];
    EDGES
        .iter()
        .flat_map(|&(a, b)| {
            [
                LineVertex {
                    position: corners[a].to_array(),
                    color: PLACEHOLDER_COLOR,
                },
                LineVertex {
                    position: corners[b].to_array(),
                    color: PLACEHOLDER_COLOR,
                },
            ]
        })
        .collect()
}
