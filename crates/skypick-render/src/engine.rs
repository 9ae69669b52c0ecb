//! The wgpu render engine.
//!
//! The engine owns the device, the surface and three pipelines:
//! - `color` for vertex-colored meshes
//! - `lit` for textured Phong meshes with environment reflection
//! - `skybox` for the cube map drawn at the far plane
//!
//! Scenes describe a frame as a [`DrawList`] of handles and uniforms; the
//! engine turns that into one render pass.

use std::num::NonZeroU64;
use std::sync::Arc;

use glam::Mat4;
use image::RgbaImage;
use wgpu::util::DeviceExt;

use crate::cube_image::CubeImage;
use crate::error::{RenderError, RenderResult};
use crate::geometry::{box_mesh, ColorVertex, LitVertex, MeshData};
use crate::lighting::{FrameUniforms, ObjectUniforms};

/// Depth buffer format.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

/// Most objects drawn in one frame.
pub const MAX_OBJECTS_PER_FRAME: usize = 64;

const OBJECT_UNIFORM_SIZE: u64 = std::mem::size_of::<ObjectUniforms>() as u64;

/// Handle to a mesh uploaded with [`RenderEngine::upload_lit_mesh`] or
/// [`RenderEngine::upload_color_mesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(usize);

/// Handle to a 2D texture uploaded with [`RenderEngine::upload_texture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(usize);

/// Handle to a cube map uploaded with [`RenderEngine::upload_cube`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeHandle(usize);

/// A textured, lit object.
#[derive(Debug, Clone, Copy)]
pub struct LitDraw {
    pub mesh: MeshHandle,
    pub texture: TextureHandle,
    pub uniforms: ObjectUniforms,
}

/// A vertex-colored object.
#[derive(Debug, Clone, Copy)]
pub struct ColorDraw {
    pub mesh: MeshHandle,
    pub world: Mat4,
}

/// Everything a scene wants drawn in one frame, in draw order.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    /// Clear color, RGBA.
    pub clear_color: [f64; 4],
    /// Cube map sampled by reflective lit objects.
    pub environment: Option<CubeHandle>,
    /// Vertex-colored objects, drawn first.
    pub colored: Vec<ColorDraw>,
    /// Lit objects, drawn after the colored ones.
    pub lit: Vec<LitDraw>,
    /// Skybox, drawn last.
    pub skybox: Option<CubeHandle>,
}

impl DrawList {
    /// Number of objects that need a uniform slot.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.colored.len() + self.lit.len()
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// A surface texture being rendered to.
pub struct Frame {
    surface_texture: wgpu::SurfaceTexture,
    /// View of the surface texture.
    pub view: wgpu::TextureView,
    /// Encoder all passes of the frame record into.
    pub encoder: wgpu::CommandEncoder,
}

/// The main render engine.
pub struct RenderEngine {
    /// The wgpu device.
    pub device: wgpu::Device,
    /// The command queue.
    pub queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    /// Current surface width.
    pub width: u32,
    /// Current surface height.
    pub height: u32,
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,

    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    object_buffer: wgpu::Buffer,
    object_stride: u64,
    color_object_bind_group: wgpu::BindGroup,
    lit_object_layout: wgpu::BindGroupLayout,
    cube_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,

    color_pipeline: wgpu::RenderPipeline,
    lit_pipeline: wgpu::RenderPipeline,
    skybox_pipeline: wgpu::RenderPipeline,
    skybox_mesh: MeshHandle,

    meshes: Vec<GpuMesh>,
    textures: Vec<wgpu::BindGroup>,
    cubes: Vec<wgpu::BindGroup>,
}

impl RenderEngine {
    /// Creates a new windowed render engine.
    pub async fn new_windowed(window: Arc<winit::window::Window>) -> RenderResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| RenderError::AdapterCreationFailed)?;
        log::info!("using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("skypick device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::SurfaceConfigurationFailed)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .ok_or(RenderError::SurfaceConfigurationFailed)?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let (depth_texture, depth_view) = Self::create_depth_texture(&device, width, height);

        // Frame uniforms (group 0)
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame bind group layout"),
            entries: &[uniform_entry(0, false, std::mem::size_of::<FrameUniforms>() as u64)],
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame bind group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        // Object uniforms (group 1), one dynamic-offset slot per draw
        let alignment = u64::from(device.limits().min_uniform_buffer_offset_alignment);
        let object_stride = OBJECT_UNIFORM_SIZE.div_ceil(alignment) * alignment;
        let object_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("object uniforms"),
            size: object_stride * MAX_OBJECTS_PER_FRAME as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let object_binding = wgpu::BindingResource::Buffer(wgpu::BufferBinding {
            buffer: &object_buffer,
            offset: 0,
            size: NonZeroU64::new(OBJECT_UNIFORM_SIZE),
        });

        let color_object_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("color object bind group layout"),
                entries: &[uniform_entry(0, true, OBJECT_UNIFORM_SIZE)],
            });
        let color_object_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("color object bind group"),
            layout: &color_object_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: object_binding.clone(),
            }],
        });

        let lit_object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lit object bind group layout"),
            entries: &[
                uniform_entry(0, true, OBJECT_UNIFORM_SIZE),
                texture_entry(1, wgpu::TextureViewDimension::D2),
                sampler_entry(2),
            ],
        });

        let cube_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("cube map bind group layout"),
            entries: &[
                texture_entry(0, wgpu::TextureViewDimension::Cube),
                sampler_entry(1),
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let color_pipeline = create_pipeline(
            &device,
            &PipelineDesc {
                label: "color",
                source: include_str!("shaders/color.wgsl"),
                layouts: &[&frame_layout, &color_object_layout],
                vertex_layout: ColorVertex::layout(),
                color_format: surface_format,
                depth_write: true,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );
        let lit_pipeline = create_pipeline(
            &device,
            &PipelineDesc {
                label: "lit",
                source: include_str!("shaders/basic.wgsl"),
                layouts: &[&frame_layout, &lit_object_layout, &cube_layout],
                vertex_layout: LitVertex::layout(),
                color_format: surface_format,
                depth_write: true,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );
        // Skybox fragments sit exactly on the far plane, so they pass only
        // where nothing else was drawn.
        let skybox_pipeline = create_pipeline(
            &device,
            &PipelineDesc {
                label: "skybox",
                source: include_str!("shaders/skybox.wgsl"),
                layouts: &[&frame_layout, &cube_layout],
                vertex_layout: LitVertex::layout(),
                color_format: surface_format,
                depth_write: false,
                depth_compare: wgpu::CompareFunction::LessEqual,
            },
        );

        let mut engine = Self {
            device,
            queue,
            surface,
            surface_config,
            width,
            height,
            depth_texture,
            depth_view,
            frame_buffer,
            frame_bind_group,
            object_buffer,
            object_stride,
            color_object_bind_group,
            lit_object_layout,
            cube_layout,
            sampler,
            color_pipeline,
            lit_pipeline,
            skybox_pipeline,
            skybox_mesh: MeshHandle(0),
            meshes: Vec::new(),
            textures: Vec::new(),
            cubes: Vec::new(),
        };
        engine.skybox_mesh = engine.upload_lit_mesh("skybox", &box_mesh(2.0, 2.0, 2.0));

        log::info!("render engine ready ({width}x{height}, {surface_format:?})");
        Ok(engine)
    }

    /// Returns the surface texture format.
    #[must_use]
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    /// Returns the depth texture.
    #[must_use]
    pub fn depth_texture(&self) -> &wgpu::Texture {
        &self.depth_texture
    }

    /// Resizes the surface and depth buffer. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.width = width;
        self.height = height;
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);

        let (depth_texture, depth_view) = Self::create_depth_texture(&self.device, width, height);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth texture"),
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
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }

    /// Uploads a lit mesh.
    pub fn upload_lit_mesh(&mut self, label: &str, mesh: &MeshData<LitVertex>) -> MeshHandle {
        self.upload_mesh(label, bytemuck::cast_slice(&mesh.vertices), &mesh.indices)
    }

    /// Uploads a vertex-colored mesh.
    pub fn upload_color_mesh(&mut self, label: &str, mesh: &MeshData<ColorVertex>) -> MeshHandle {
        self.upload_mesh(label, bytemuck::cast_slice(&mesh.vertices), &mesh.indices)
    }

    fn upload_mesh(&mut self, label: &str, vertices: &[u8], indices: &[u32]) -> MeshHandle {
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} vertices")),
                contents: vertices,
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} indices")),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        self.meshes.push(GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: u32::try_from(indices.len()).unwrap_or(u32::MAX),
        });
        log::debug!("uploaded mesh '{label}' ({} indices)", indices.len());
        MeshHandle(self.meshes.len() - 1)
    }

    /// Uploads an RGBA8 image as an sRGB 2D texture.
    pub fn upload_texture(&mut self, label: &str, image: &RgbaImage) -> RenderResult<TextureHandle> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(RenderError::TextureCreationFailed(format!(
                "texture '{label}' is empty"
            )));
        }

        let texture = self.create_rgba_texture(label, width, height, 1, image.as_raw());
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.lit_object_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &self.object_buffer,
                        offset: 0,
                        size: NonZeroU64::new(OBJECT_UNIFORM_SIZE),
                    }),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        self.textures.push(bind_group);
        Ok(TextureHandle(self.textures.len() - 1))
    }

    /// Uploads a six-layer image as a cube map.
    pub fn upload_cube(&mut self, label: &str, cube: &CubeImage) -> RenderResult<CubeHandle> {
        let size = cube.face_size();
        if size == 0 {
            return Err(RenderError::TextureCreationFailed(format!(
                "cube map '{label}' is empty"
            )));
        }

        let texture = self.create_rgba_texture(label, size, size, 6, cube.data());
        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some(label),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.cube_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        self.cubes.push(bind_group);
        log::debug!("uploaded cube map '{label}' ({size}x{size})");
        Ok(CubeHandle(self.cubes.len() - 1))
    }

    fn create_rgba_texture(
        &self,
        label: &str,
        width: u32,
        height: u32,
        layers: u32,
        data: &[u8],
    ) -> wgpu::Texture {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: layers,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );
        texture
    }

    /// Acquires the next surface texture and starts a command encoder.
    pub fn begin_frame(&mut self) -> RenderResult<Frame> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });
        Ok(Frame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Records the scene pass: clear, colored objects, lit objects, skybox.
    ///
    /// Objects beyond [`MAX_OBJECTS_PER_FRAME`] are dropped with a warning.
    pub fn draw_scene(&self, frame: &mut Frame, uniforms: &FrameUniforms, draw_list: &DrawList) {
        self.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::cast_slice(&[*uniforms]));

        let count = draw_list.object_count();
        if count > MAX_OBJECTS_PER_FRAME {
            log::warn!("draw list has {count} objects, drawing the first {MAX_OBJECTS_PER_FRAME}");
        }

        // Pack object uniforms into their slots: colored first, then lit.
        let object_uniforms = draw_list
            .colored
            .iter()
            .map(|draw| ObjectUniforms::world_only(draw.world))
            .chain(draw_list.lit.iter().map(|draw| draw.uniforms))
            .take(MAX_OBJECTS_PER_FRAME);
        let stride = usize::try_from(self.object_stride).unwrap_or(usize::MAX);
        let mut staging = Vec::new();
        for uniform in object_uniforms {
            let start = staging.len();
            staging.extend_from_slice(bytemuck::bytes_of(&uniform));
            staging.resize(start + stride, 0);
        }
        if !staging.is_empty() {
            self.queue.write_buffer(&self.object_buffer, 0, &staging);
        }

        let [r, g, b, a] = draw_list.clear_color;
        let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
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
                stencil_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(0),
                    store: wgpu::StoreOp::Store,
                }),
            }),
            ..Default::default()
        });

        pass.set_bind_group(0, &self.frame_bind_group, &[]);
        let mut slot = 0usize;
        let mut next_offset = || {
            let offset = u32::try_from(slot as u64 * self.object_stride).ok();
            slot += 1;
            offset.filter(|_| slot <= MAX_OBJECTS_PER_FRAME)
        };

        if !draw_list.colored.is_empty() {
            pass.set_pipeline(&self.color_pipeline);
            for draw in &draw_list.colored {
                let (Some(offset), Some(mesh)) = (next_offset(), self.meshes.get(draw.mesh.0)) else {
                    continue;
                };
                pass.set_bind_group(1, &self.color_object_bind_group, &[offset]);
                draw_mesh(&mut pass, mesh);
            }
        }

        let environment = draw_list
            .environment
            .and_then(|handle| self.cubes.get(handle.0));
        if let Some(environment) = environment {
            pass.set_pipeline(&self.lit_pipeline);
            pass.set_bind_group(2, environment, &[]);
            for draw in &draw_list.lit {
                let offset = next_offset();
                let mesh = self.meshes.get(draw.mesh.0);
                let texture = self.textures.get(draw.texture.0);
                let (Some(offset), Some(mesh), Some(texture)) = (offset, mesh, texture) else {
                    continue;
                };
                pass.set_bind_group(1, texture, &[offset]);
                draw_mesh(&mut pass, mesh);
            }
        } else if !draw_list.lit.is_empty() {
            log::warn!("lit objects skipped: no environment map bound");
        }

        let skybox = draw_list.skybox.and_then(|handle| self.cubes.get(handle.0));
        if let (Some(sky), Some(mesh)) = (skybox, self.meshes.get(self.skybox_mesh.0)) {
            pass.set_pipeline(&self.skybox_pipeline);
            pass.set_bind_group(1, sky, &[]);
            draw_mesh(&mut pass, mesh);
        }
    }

    /// Submits the frame and presents it.
    pub fn end_frame(&self, frame: Frame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        frame.surface_texture.present();
    }
}

fn draw_mesh(pass: &mut wgpu::RenderPass<'_>, mesh: &GpuMesh) {
    pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
    pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    pass.draw_indexed(0..mesh.index_count, 0, 0..1);
}

fn uniform_entry(binding: u32, dynamic: bool, size: u64) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: dynamic,
            min_binding_size: NonZeroU64::new(size),
        },
        count: None,
    }
}

fn texture_entry(binding: u32, view_dimension: wgpu::TextureViewDimension) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension,
            multisampled: false,
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

struct PipelineDesc<'a> {
    label: &'a str,
    source: &'a str,
    layouts: &'a [&'a wgpu::BindGroupLayout],
    vertex_layout: wgpu::VertexBufferLayout<'static>,
    color_format: wgpu::TextureFormat,
    depth_write: bool,
    depth_compare: wgpu::CompareFunction,
}

fn create_pipeline(device: &wgpu::Device, desc: &PipelineDesc<'_>) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{} shader", desc.label)),
        source: wgpu::ShaderSource::Wgsl(desc.source.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{} pipeline layout", desc.label)),
        bind_group_layouts: desc.layouts,
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{} pipeline", desc.label)),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[desc.vertex_layout.clone()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: desc.color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Cw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: desc.depth_write,
            depth_compare: desc.depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_list_object_count() {
        let mut list = DrawList::default();
        assert_eq!(list.object_count(), 0);
        list.colored.push(ColorDraw {
            mesh: MeshHandle(0),
            world: Mat4::IDENTITY,
        });
        list.lit.push(LitDraw {
            mesh: MeshHandle(1),
            texture: TextureHandle(0),
            uniforms: ObjectUniforms::world_only(Mat4::IDENTITY),
        });
        assert_eq!(list.object_count(), 2);
    }

    #[test]
    fn test_object_slot_fits_uniform_alignment() {
        // The default uniform offset alignment is 256 bytes.
        assert!(OBJECT_UNIFORM_SIZE <= 256);
    }
}
