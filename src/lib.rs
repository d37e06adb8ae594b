pub mod camera;
pub mod capture;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod input;
pub mod light;
pub mod mesh;
pub mod morph;
pub mod scene;
pub mod viewer;

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use glam::Vec3;

use camera::{Camera, CameraTransform};
use error::ViewerError;
use gpu::GpuContext;
use light::{LightIndicator, LightTransform};
use mesh::MeshTopology;
use scene::{Material, MeshId, SceneSink};

pub use viewer::CanViewer;

const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const HEADLESS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8UnormSrgb;
const INDICATOR_COLOR: [f32; 4] = [1.0, 0.85, 0.2, 1.0];

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ViewProjectionUniform {
    matrix: [[f32; 4]; 4],
}

impl ViewProjectionUniform {
    fn new(camera: &Camera) -> Self {
        Self {
            matrix: camera.view_projection_matrix().to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LightUniform {
    direction: [f32; 4],
    ambient: [f32; 4],
}

impl From<&LightTransform> for LightUniform {
    fn from(light: &LightTransform) -> Self {
        let direction = light.direction;
        Self {
            direction: [direction.x, direction.y, direction.z, light.intensity],
            ambient: [light.ambient, 0.0, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MaterialUniform {
    color: [f32; 4],
}

impl From<Material> for MaterialUniform {
    fn from(material: Material) -> Self {
        let [r, g, b] = match material {
            Material::Lambert { color } | Material::Wireframe { color } => color,
        };
        Self {
            color: [r, g, b, 1.0],
        }
    }
}

/// Buffers for one uploaded mesh. Topology is fixed; positions and the
/// material uniform are rewritten in place.
struct GpuMesh {
    vertex_count: usize,
    position_buffer: wgpu::Buffer,
    normal_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    edge_buffer: wgpu::Buffer,
    edge_count: u32,
    material: Material,
    material_buffer: wgpu::Buffer,
    material_bind_group: wgpu::BindGroup,
}

struct GpuLine {
    vertex_buffer: wgpu::Buffer,
    material_bind_group: wgpu::BindGroup,
}

struct FrameCapture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    staging_buffer: wgpu::Buffer,
    bytes_per_row: u32,
}

/// wgpu implementation of [`SceneSink`]. Draws into a window surface, an
/// offscreen capture texture, or both.
pub struct Renderer {
    gpu: GpuContext,
    surface: Option<wgpu::Surface<'static>>,
    config: wgpu::SurfaceConfiguration,
    lit_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    material_layout: wgpu::BindGroupLayout,
    scene_bind_group: wgpu::BindGroup,
    view_projection_buffer: wgpu::Buffer,
    light_buffer: wgpu::Buffer,
    depth_view: wgpu::TextureView,
    meshes: BTreeMap<MeshId, GpuMesh>,
    indicator: Option<GpuLine>,
    camera: Camera,
    capture: Option<FrameCapture>,
}

impl Renderer {
    /// Without a surface the renderer only draws offscreen, so capture is
    /// always enabled in that case.
    pub fn new(
        gpu: GpuContext,
        surface: Option<wgpu::Surface<'static>>,
        width: u32,
        height: u32,
        enable_capture: bool,
    ) -> Result<Self> {
        let format = match &surface {
            Some(surface) => {
                let caps = surface.get_capabilities(&gpu.adapter);
                caps.formats
                    .iter()
                    .find(|f| f.is_srgb())
                    .or_else(|| caps.formats.first())
                    .copied()
                    .context("Surface reports no supported formats")?
            }
            None => HEADLESS_FORMAT,
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        if let Some(surface) = &surface {
            surface.configure(&gpu.device, &config);
        }

        let camera = Camera::new(
            config.width as f32 / config.height as f32,
            CameraTransform {
                position: Vec3::Z,
                target: Vec3::ZERO,
                up: Vec3::Y,
            },
        );

        let view_projection_buffer = gpu.create_buffer_init(
            "View Projection Buffer",
            bytemuck::cast_slice(&[ViewProjectionUniform::new(&camera)]),
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );
        let light_buffer = gpu.create_buffer_init(
            "Light Buffer",
            bytemuck::cast_slice(&[LightUniform {
                direction: [0.0, 0.0, -1.0, 1.0],
                ambient: [0.3, 0.0, 0.0, 0.0],
            }]),
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );

        let scene_layout = Self::create_scene_layout(&gpu);
        let material_layout = Self::create_material_layout(&gpu);
        let scene_bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &scene_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: view_projection_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: light_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = gpu.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Renderer Pipeline Layout"),
            bind_group_layouts: &[&scene_layout, &material_layout],
            push_constant_ranges: &[],
        });

        let lit_shader = gpu.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Lit Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/lit.wgsl").into()),
        });
        let line_shader = gpu.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Line Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/line.wgsl").into()),
        });

        let lit_pipeline = Self::create_render_pipeline(
            &gpu,
            "Lit Pipeline",
            &lit_shader,
            &pipeline_layout,
            &[Self::vec3_layout(0), Self::vec3_layout(1)],
            wgpu::PrimitiveTopology::TriangleList,
            Some(wgpu::Face::Back),
            config.format,
        );
        let line_pipeline = Self::create_render_pipeline(
            &gpu,
            "Line Pipeline",
            &line_shader,
            &pipeline_layout,
            &[Self::vec3_layout(0)],
            wgpu::PrimitiveTopology::LineList,
            None,
            config.format,
        );

        let depth_view = Self::create_depth_view(&gpu, config.width, config.height);
        let capture = (enable_capture || surface.is_none())
            .then(|| Self::create_capture(&gpu, &config));

        log::info!(
            "Renderer ready: {}x{} {:?}, capture {}",
            config.width,
            config.height,
            config.format,
            capture.is_some()
        );

        Ok(Self {
            gpu,
            surface,
            config,
            lit_pipeline,
            line_pipeline,
            material_layout,
            scene_bind_group,
            view_projection_buffer,
            light_buffer,
            depth_view,
            meshes: BTreeMap::new(),
            indicator: None,
            camera,
            capture,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Draws a frame to the surface, and to the capture texture when one
    /// exists. Without a surface this is [`Renderer::render_to_texture`].
    pub fn render(&self) -> std::result::Result<(), wgpu::SurfaceError> {
        let Some(surface) = &self.surface else {
            self.render_to_texture();
            return Ok(());
        };

        let output = surface.get_current_texture()?;
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        if let Some(capture) = &self.capture {
            self.encode_render_pass(&mut encoder, &capture.view);
        }
        self.encode_render_pass(&mut encoder, &surface_view);
        self.gpu.queue.submit(Some(encoder.finish()));

        output.present();
        Ok(())
    }

    pub fn render_to_texture(&self) {
        let Some(capture) = &self.capture else {
            log::warn!("render_to_texture called without a capture target");
            return;
        };
        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Offscreen Encoder"),
            });
        self.encode_render_pass(&mut encoder, &capture.view);
        let submission = self.gpu.queue.submit(Some(encoder.finish()));
        self.gpu
            .device
            .poll(wgpu::Maintain::WaitForSubmissionIndex(submission));
    }

    /// Reads the last captured frame back as tightly packed RGBA rows.
    pub fn capture_frame(&self) -> Result<Vec<u8>> {
        let Some(capture) = &self.capture else {
            bail!("Frame capture is not enabled");
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Capture Encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &capture.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &capture.staging_buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(capture.bytes_per_row),
                    rows_per_image: Some(self.config.height),
                },
            },
            wgpu::Extent3d {
                width: self.config.width,
                height: self.config.height,
                depth_or_array_layers: 1,
            },
        );
        let submission = self.gpu.queue.submit(Some(encoder.finish()));
        self.gpu
            .device
            .poll(wgpu::Maintain::WaitForSubmissionIndex(submission));

        let buffer_slice = capture.staging_buffer.slice(..);
        let (tx, rx) = futures::channel::oneshot::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.gpu.device.poll(wgpu::Maintain::Wait);
        pollster::block_on(rx).context("Staging buffer map was cancelled")??;

        let frame = {
            let data = buffer_slice.get_mapped_range();
            capture::strip_row_padding(
                &data,
                capture.bytes_per_row,
                self.config.width,
                self.config.height,
            )
        };
        capture.staging_buffer.unmap();

        if capture::is_bgra(self.config.format) {
            Ok(capture::convert_bgra_to_rgba(
                &frame,
                self.config.width,
                self.config.height,
            ))
        } else {
            Ok(frame)
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        if let Some(surface) = &self.surface {
            surface.configure(&self.gpu.device, &self.config);
        }
        self.depth_view = Self::create_depth_view(&self.gpu, width, height);
        if self.capture.is_some() {
            self.capture = Some(Self::create_capture(&self.gpu, &self.config));
        }
        self.camera.update_aspect_ratio(width as f32 / height as f32);
        self.update_view_projection();
    }

    fn update_view_projection(&self) {
        self.gpu.queue.write_buffer(
            &self.view_projection_buffer,
            0,
            bytemuck::cast_slice(&[ViewProjectionUniform::new(&self.camera)]),
        );
    }

    fn mesh(&self, id: MeshId) -> Result<&GpuMesh> {
        self.meshes
            .get(&id)
            .ok_or_else(|| ViewerError::UnknownMesh(id.0).into())
    }

    fn mesh_mut(&mut self, id: MeshId) -> Result<&mut GpuMesh> {
        self.meshes
            .get_mut(&id)
            .ok_or_else(|| ViewerError::UnknownMesh(id.0).into())
    }

    fn create_material_binding(
        &self,
        label: &str,
        material: MaterialUniform,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = self.gpu.create_buffer_init(
            &format!("{label} Material Buffer"),
            bytemuck::cast_slice(&[material]),
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );
        let bind_group = self.gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Material Bind Group")),
            layout: &self.material_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        (buffer, bind_group)
    }

    fn create_scene_layout(gpu: &GpuContext) -> wgpu::BindGroupLayout {
        gpu.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Bind Group Layout"),
            entries: &[
                Self::uniform_entry(0, wgpu::ShaderStages::VERTEX),
                Self::uniform_entry(1, wgpu::ShaderStages::FRAGMENT),
            ],
        })
    }

    fn create_material_layout(gpu: &GpuContext) -> wgpu::BindGroupLayout {
        gpu.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Material Bind Group Layout"),
            entries: &[Self::uniform_entry(0, wgpu::ShaderStages::FRAGMENT)],
        })
    }

    fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn create_render_pipeline(
        gpu: &GpuContext,
        label: &str,
        shader: &wgpu::ShaderModule,
        layout: &wgpu::PipelineLayout,
        buffers: &[wgpu::VertexBufferLayout<'_>],
        topology: wgpu::PrimitiveTopology,
        cull_mode: Option<wgpu::Face>,
        format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        gpu.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: "vs_main",
                buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        })
    }

    fn vec3_layout(location: u32) -> wgpu::VertexBufferLayout<'static> {
        static ATTRIBUTES: [[wgpu::VertexAttribute; 1]; 2] = [
            wgpu::vertex_attr_array![0 => Float32x3],
            wgpu::vertex_attr_array![1 => Float32x3],
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES[location as usize],
        }
    }

    fn create_depth_view(gpu: &GpuContext, width: u32, height: u32) -> wgpu::TextureView {
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width,
                height,
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

    fn create_capture(gpu: &GpuContext, config: &wgpu::SurfaceConfiguration) -> FrameCapture {
        let bytes_per_row = capture::padded_bytes_per_row(config.width);
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Capture Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: config.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let staging_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Capture Staging Buffer"),
            size: bytes_per_row as u64 * config.height as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });
        FrameCapture {
            texture,
            view,
            staging_buffer,
            bytes_per_row,
        }
    }

    fn encode_render_pass(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
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
        render_pass.set_bind_group(0, &self.scene_bind_group, &[]);

        for mesh in self.meshes.values() {
            render_pass.set_bind_group(1, &mesh.material_bind_group, &[]);
            render_pass.set_vertex_buffer(0, mesh.position_buffer.slice(..));
            match mesh.material {
                Material::Lambert { .. } => {
                    render_pass.set_pipeline(&self.lit_pipeline);
                    render_pass.set_vertex_buffer(1, mesh.normal_buffer.slice(..));
                    render_pass
                        .set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
                }
                Material::Wireframe { .. } => {
                    render_pass.set_pipeline(&self.line_pipeline);
                    render_pass
                        .set_index_buffer(mesh.edge_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.draw_indexed(0..mesh.edge_count, 0, 0..1);
                }
            }
        }

        if let Some(indicator) = &self.indicator {
            render_pass.set_pipeline(&self.line_pipeline);
            render_pass.set_bind_group(1, &indicator.material_bind_group, &[]);
            render_pass.set_vertex_buffer(0, indicator.vertex_buffer.slice(..));
            render_pass.draw(0..2, 0..1);
        }
    }
}

impl SceneSink for Renderer {
    fn upload_mesh(
        &mut self,
        id: MeshId,
        topology: &MeshTopology,
        positions: &[Vec3],
        material: Material,
    ) -> Result<()> {
        if topology.normals.len() != positions.len() {
            bail!(
                "mesh {:?} has {} normals for {} positions",
                id,
                topology.normals.len(),
                positions.len()
            );
        }

        let label = format!("Mesh {}", id.0);
        let edges = topology.wireframe_indices();
        let (material_buffer, material_bind_group) =
            self.create_material_binding(&label, material.into());
        let vertex_usage = wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST;

        let mesh = GpuMesh {
            vertex_count: positions.len(),
            position_buffer: self.gpu.create_buffer_init(
                &format!("{label} Positions"),
                bytemuck::cast_slice(positions),
                vertex_usage,
            ),
            normal_buffer: self.gpu.create_buffer_init(
                &format!("{label} Normals"),
                bytemuck::cast_slice(&topology.normals),
                vertex_usage,
            ),
            index_buffer: self.gpu.create_buffer_init(
                &format!("{label} Indices"),
                bytemuck::cast_slice(&topology.indices),
                wgpu::BufferUsages::INDEX,
            ),
            index_count: topology.indices.len() as u32,
            edge_buffer: self.gpu.create_buffer_init(
                &format!("{label} Edges"),
                bytemuck::cast_slice(&edges),
                wgpu::BufferUsages::INDEX,
            ),
            edge_count: edges.len() as u32,
            material,
            material_buffer,
            material_bind_group,
        };
        log::debug!(
            "Uploaded {label}: {} vertices, {} triangles",
            mesh.vertex_count,
            mesh.index_count / 3
        );
        self.meshes.insert(id, mesh);
        Ok(())
    }

    fn replace_positions(&mut self, id: MeshId, positions: &[Vec3]) -> Result<()> {
        let mesh = self.mesh(id)?;
        if mesh.vertex_count != positions.len() {
            bail!(
                "mesh {:?} holds {} vertices, got {} positions",
                id,
                mesh.vertex_count,
                positions.len()
            );
        }
        self.gpu
            .queue
            .write_buffer(&mesh.position_buffer, 0, bytemuck::cast_slice(positions));
        Ok(())
    }

    fn set_material(&mut self, id: MeshId, material: Material) -> Result<()> {
        let mesh = self.mesh_mut(id)?;
        mesh.material = material;
        let mesh = self.mesh(id)?;
        self.gpu.queue.write_buffer(
            &mesh.material_buffer,
            0,
            bytemuck::cast_slice(&[MaterialUniform::from(material)]),
        );
        Ok(())
    }

    fn set_camera(&mut self, camera: &CameraTransform) {
        self.camera.set_transform(*camera);
        self.update_view_projection();
    }

    fn set_light(&mut self, light: &LightTransform) {
        self.gpu.queue.write_buffer(
            &self.light_buffer,
            0,
            bytemuck::cast_slice(&[LightUniform::from(light)]),
        );
    }

    fn set_light_indicator(&mut self, indicator: &LightIndicator) {
        let vertices = [indicator.start, indicator.end];
        if let Some(line) = &self.indicator {
            self.gpu
                .queue
                .write_buffer(&line.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
            return;
        }

        let vertex_buffer = self.gpu.create_buffer_init(
            "Light Indicator Vertices",
            bytemuck::cast_slice(&vertices),
            wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        );
        let (_, material_bind_group) = self.create_material_binding(
            "Light Indicator",
            MaterialUniform {
                color: INDICATOR_COLOR,
            },
        );
        self.indicator = Some(GpuLine {
            vertex_buffer,
            material_bind_group,
        });
    }
}
