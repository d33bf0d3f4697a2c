use glam::{Mat4, Vec3};
use room_core::{MaterialKind, NodeTags, Room, TextureSet};
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;

use helpers::{create_depth_texture, cube_vertices, DEPTH_FORMAT};

const LIGHT_DIR: Vec3 = Vec3::new(-0.4, -1.0, -0.6);
const DAY_CLEAR: [f64; 3] = [0.93, 0.87, 0.92];
const NIGHT_CLEAR: [f64; 3] = [0.10, 0.09, 0.16];
const SMOKE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.55];
const MIN_EXTENT: f32 = 1e-3;

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    light: [f32; 4],
    params: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Instance {
    model: [[f32; 4]; 4],
    day: [f32; 4],
    night: [f32; 4],
    effect: [f32; 4],
}

/// Day and night base colours for a node's material.
fn palette(tags: &NodeTags) -> ([f32; 4], [f32; 4]) {
    match tags.material {
        Some(MaterialKind::Room(TextureSet::First)) => {
            ([0.94, 0.80, 0.85, 1.0], [0.36, 0.28, 0.46, 1.0])
        }
        Some(MaterialKind::Room(TextureSet::Second)) => {
            ([0.80, 0.88, 0.94, 1.0], [0.25, 0.30, 0.48, 1.0])
        }
        Some(MaterialKind::Room(TextureSet::Third)) => {
            ([0.96, 0.90, 0.76, 1.0], [0.42, 0.36, 0.32, 1.0])
        }
        Some(MaterialKind::Room(TextureSet::Fourth)) => {
            ([0.78, 0.92, 0.80, 1.0], [0.26, 0.38, 0.34, 1.0])
        }
        Some(MaterialKind::Water) => ([0.55, 0.76, 0.96, 0.6], [0.20, 0.30, 0.52, 0.6]),
        Some(MaterialKind::Glass) => ([0.90, 0.95, 1.0, 0.3], [0.55, 0.60, 0.75, 0.3]),
        Some(MaterialKind::Bubble) => ([0.96, 0.96, 1.0, 0.5], [0.70, 0.72, 0.90, 0.5]),
        Some(MaterialKind::Screen) => ([0.14, 0.14, 0.20, 1.0], [0.10, 0.10, 0.16, 1.0]),
        None => ([0.86, 0.86, 0.86, 1.0], [0.30, 0.30, 0.36, 1.0]),
    }
}

/// Per-node instances, opaque first and translucent after.
fn collect_instances(room: &Room, out: &mut Vec<Instance>) {
    out.clear();
    let smoke = room.smoke();
    let mut translucent = Vec::new();
    for (id, node) in room.scene.iter() {
        let Some(bounds) = node.local_bounds else {
            continue;
        };
        if !node.visible {
            continue;
        }
        let world = room.scene.world_matrix(id);
        let fit = Mat4::from_scale_rotation_translation(
            bounds.size().max(Vec3::splat(MIN_EXTENT)),
            glam::Quat::IDENTITY,
            bounds.center(),
        );
        let model = world * fit;
        // hidden until revealed
        if model.determinant().abs() < 1e-9 {
            continue;
        }
        let is_smoke = Some(id) == smoke;
        let (day, night) = if is_smoke {
            (SMOKE_COLOR, SMOKE_COLOR)
        } else {
            palette(&node.tags)
        };
        let instance = Instance {
            model: model.to_cols_array_2d(),
            day,
            night,
            effect: [if is_smoke { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        };
        if day[3] < 1.0 {
            translucent.push(instance);
        } else {
            out.push(instance);
        }
    }
    out.extend(translucent);
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    cube_buffer: wgpu::Buffer,
    cube_vertex_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    instances: Vec<Instance>,
    depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

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
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("room_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/room.wgsl").into()),
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
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
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let cube = cube_vertices();
        let cube_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertices"),
            contents: bytemuck::cast_slice(&cube),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_capacity = 256;
        let instance_buffer = Self::instance_buffer(&device, instance_capacity);

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("room_pl"),
            bind_group_layouts: &[&globals_bgl],
            push_constant_ranges: &[],
        });
        let vertex_layouts = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 6]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Instance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![
                    2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4,
                    6 => Float32x4, 7 => Float32x4, 8 => Float32x4
                ],
            },
        ];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("room_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_layouts,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            // mirrored nodes flip winding, so no culling
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview: None,
            cache: None,
        });

        let (_, depth_view) = create_depth_texture(&device, width, height);
        log::info!("[gpu] ready {}x{} {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            globals_buffer,
            globals_bind_group,
            cube_buffer,
            cube_vertex_count: cube.len() as u32,
            instance_buffer,
            instance_capacity,
            instances: Vec::new(),
            depth_view,
            width,
            height,
        })
    }

    fn instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instances"),
            size: (capacity * std::mem::size_of::<Instance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    /// Reapply the surface config, e.g. after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        let (_, depth_view) = create_depth_texture(&self.device, self.width, self.height);
        self.depth_view = depth_view;
    }

    pub fn render(&mut self, room: &Room) -> Result<(), wgpu::SurfaceError> {
        let mix = room.scene.theme_mix;
        let globals = Globals {
            view_proj: room.camera.view_proj().to_cols_array_2d(),
            light: [LIGHT_DIR.x, LIGHT_DIR.y, LIGHT_DIR.z, mix],
            params: [room.elapsed_sec(), 0.0, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        collect_instances(room, &mut self.instances);
        if self.instances.len() > self.instance_capacity {
            self.instance_capacity = self.instances.len().next_power_of_two();
            self.instance_buffer = Self::instance_buffer(&self.device, self.instance_capacity);
        }
        if !self.instances.is_empty() {
            self.queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&self.instances),
            );
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let lerp = |i: usize| DAY_CLEAR[i] + (NIGHT_CLEAR[i] - DAY_CLEAR[i]) * mix as f64;
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("room_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: lerp(0),
                            g: lerp(1),
                            b: lerp(2),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if !self.instances.is_empty() {
                rpass.set_pipeline(&self.pipeline);
                rpass.set_bind_group(0, &self.globals_bind_group, &[]);
                rpass.set_vertex_buffer(0, self.cube_buffer.slice(..));
                rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                rpass.draw(0..self.cube_vertex_count, 0..self.instances.len() as u32);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
