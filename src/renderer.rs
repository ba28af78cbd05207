use std::mem;

use log::debug;
use wgpu::util::DeviceExt;

use crate::canvas::{Canvas, DrawCommand};
use crate::model::{Model, Vertex, VertexLayout};
use crate::projection::{Projection, ProjectionUniform};

/// Per-draw data: the model matrix current when the draw was issued and
/// the color to fill with.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawInstance {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}
impl DrawInstance {
    pub fn size() -> u64 {
        mem::size_of::<Self>() as u64
    }
}
impl From<&DrawCommand> for DrawInstance {
    fn from(cmd: &DrawCommand) -> Self {
        Self {
            model: cmd.transform.into(),
            color: cmd.color,
        }
    }
}
impl VertexLayout for DrawInstance {
    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<DrawInstance>() as wgpu::BufferAddress,
            // Advance once per draw, not once per vertex.
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 16]>() as wgpu::BufferAddress,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

struct Mesh {
    model:        Model,
    vertex_buf:   wgpu::Buffer,
    vertex_count: u32,
}

/// Replays a `Canvas` with one instanced draw per recorded command, in
/// the order the commands were issued.
pub struct Renderer {
    triangles:       wgpu::RenderPipeline,
    lines:           wgpu::RenderPipeline,
    meshes:          Vec<Mesh>,
    projection_buf:  wgpu::Buffer,
    projection_bind: wgpu::BindGroup,
    instance_buf:    wgpu::Buffer,
    instance_cap:    usize,
    instances:       Vec<DrawInstance>,
}
impl Renderer {
    const INITIAL_INSTANCES: usize = 256;

    pub fn new(
        device:     &wgpu::Device,
        config:     &wgpu::SurfaceConfiguration,
        projection: &Projection,
    ) -> Self {
        let meshes = Model::ALL.iter().map(|&model| {
            let vertices = model.vertices();
            Mesh {
                model,
                vertex_buf: device.create_buffer_init(
                    &wgpu::util::BufferInitDescriptor {
                        label: Some(model.name()),
                        contents: bytemuck::cast_slice(&vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    }
                ),
                vertex_count: vertices.len() as u32,
            }
        }).collect();

        let projection_buf = device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Projection Buffer"),
                contents: bytemuck::cast_slice(&[projection.uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            }
        );

        let bind_layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Projection Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }
                ]
            }
        );

        let projection_bind = device.create_bind_group(
            &wgpu::BindGroupDescriptor {
                label: Some("Projection Bind Group"),
                layout: &bind_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: projection_buf.as_entire_binding(),
                    }
                ]
            }
        );

        let shader = device.create_shader_module(
            wgpu::ShaderModuleDescriptor {
                label: Some("Shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
            }
        );

        let pipeline_layout = device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[&bind_layout],
                push_constant_ranges: &[],
            }
        );

        let triangles = Self::pipeline(
            device, config, &shader, &pipeline_layout, wgpu::PrimitiveTopology::TriangleList,
        );
        let lines = Self::pipeline(
            device, config, &shader, &pipeline_layout, wgpu::PrimitiveTopology::LineList,
        );

        let instance_buf = Self::instance_buffer(device, Self::INITIAL_INSTANCES);

        Self {
            triangles,
            lines,
            meshes,
            projection_buf,
            projection_bind,
            instance_buf,
            instance_cap: Self::INITIAL_INSTANCES,
            instances: Vec::new(),
        }
    }

    fn pipeline(
        device:   &wgpu::Device,
        config:   &wgpu::SurfaceConfiguration,
        shader:   &wgpu::ShaderModule,
        layout:   &wgpu::PipelineLayout,
        topology: wgpu::PrimitiveTopology,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some(match topology {
                    wgpu::PrimitiveTopology::LineList => "Line Pipeline",
                    _ => "Triangle Pipeline",
                }),
                layout: Some(layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: "vs_main",
                    buffers: &[
                        Vertex::layout(),
                        DrawInstance::layout(),
                    ],
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: "fs_main",
                    targets: &[
                        Some(wgpu::ColorTargetState {
                            format: config.format,
                            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                            write_mask: wgpu::ColorWrites::ALL,
                        }),
                    ],
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    // Mirroring transforms flip winding, so draw both faces.
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
            }
        )
    }

    fn instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(
            &wgpu::BufferDescriptor {
                label: Some("Instance Buffer"),
                size: capacity as u64 * DrawInstance::size(),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }
        )
    }

    pub fn set_projection(&self, queue: &wgpu::Queue, projection: &Projection) {
        let uniform: ProjectionUniform = projection.uniform();
        queue.write_buffer(&self.projection_buf, 0, bytemuck::cast_slice(&[uniform]));
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, canvas: &Canvas) {
        self.instances.clear();
        self.instances.extend(canvas.commands().iter().map(DrawInstance::from));

        if self.instances.len() > self.instance_cap {
            self.instance_cap = self.instances.len().next_power_of_two();
            debug!("growing instance buffer to {} draws", self.instance_cap);
            self.instance_buf = Self::instance_buffer(device, self.instance_cap);
        }
        if !self.instances.is_empty() {
            queue.write_buffer(&self.instance_buf, 0, bytemuck::cast_slice(&self.instances));
        }
    }

    fn mesh(&self, model: Model) -> Option<&Mesh> {
        self.meshes.iter().find(|m| m.model == model)
    }

    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue:  &wgpu::Queue,
        view:   &wgpu::TextureView,
        canvas: &Canvas,
    ) {
        self.upload(device, queue, canvas);

        let mut encoder = device.create_command_encoder(
            &wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            }
        );

        let [r, g, b, a] = canvas.clear_color();
        let mut rpass = encoder.begin_render_pass(
            &wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[
                    Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color {
                                r: r as f64,
                                g: g as f64,
                                b: b as f64,
                                a: a as f64,
                            }),
                            store: true,
                        },
                    }),
                ],
                depth_stencil_attachment: None,
            }
        );

        rpass.set_bind_group(0, &self.projection_bind, &[]);
        rpass.set_vertex_buffer(1, self.instance_buf.slice(..));

        let mut bound: Option<wgpu::PrimitiveTopology> = None;
        for (i, cmd) in canvas.commands().iter().enumerate() {
            let mesh = match self.mesh(cmd.model) {
                Some(mesh) => mesh,
                None => continue,
            };
            let topology = cmd.model.topology();
            if bound != Some(topology) {
                rpass.set_pipeline(match topology {
                    wgpu::PrimitiveTopology::LineList => &self.lines,
                    _ => &self.triangles,
                });
                bound = Some(topology);
            }
            rpass.set_vertex_buffer(0, mesh.vertex_buf.slice(..));
            let i = i as u32;
            rpass.draw(0..mesh.vertex_count, i..i + 1);
        }

        drop(rpass);

        queue.submit(std::iter::once(encoder.finish()));
    }
}
