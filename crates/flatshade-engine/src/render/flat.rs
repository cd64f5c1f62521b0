use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::stages::{FS_ENTRY, SHADER_SOURCE, VS_ENTRY, VertexInput};

use super::shape::TRIANGLE;

/// Draws a vertex list with the flat-color pipeline.
///
/// Positions are clip-space x/y. Every covered pixel receives the fragment
/// stage's constant color; the pipeline reads nothing but vertex buffer slot 0.
pub struct FlatRenderer {
    vertices: Vec<VertexInput>,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    vertex_buffer: Option<wgpu::Buffer>,

    warned_empty: bool,
}

impl Default for FlatRenderer {
    fn default() -> Self {
        Self::with_vertices(TRIANGLE.to_vec())
    }
}

impl FlatRenderer {
    /// Renderer for the built-in [`TRIANGLE`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer for host-supplied vertices, consumed as a triangle list.
    pub fn with_vertices(vertices: Vec<VertexInput>) -> Self {
        Self {
            vertices,
            pipeline_format: None,
            pipeline: None,
            vertex_buffer: None,
            warned_empty: false,
        }
    }

    /// Vertices per draw, clamped to what a single draw call can address.
    pub fn vertex_count(&self) -> u32 {
        draw_count(self.vertices.len())
    }

    /// Records one render pass that draws the vertex list into `target`.
    ///
    /// The pass loads the existing contents, so clear the target beforehand.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if self.vertices.is_empty() {
            if !self.warned_empty {
                log::debug!("FlatRenderer: no vertices; nothing to draw");
                self.warned_empty = true;
            }
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_vertex_buffer(ctx);

        let Some(pipeline) = self.pipeline.as_ref() else {
            return;
        };
        let Some(vertex_buffer) = self.vertex_buffer.as_ref() else {
            return;
        };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("flatshade pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, vertex_buffer.slice(..));
        rpass.draw(0..self.vertex_count(), 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        log::debug!("building flat pipeline for {:?}", ctx.surface_format);

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("flatshade shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        // No uniforms, textures or samplers: the layout is empty.
        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("flatshade pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("flatshade pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(VS_ENTRY),
                compilation_options: Default::default(),
                buffers: &[VertexInput::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(FS_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            // z is always 0.0; there is nothing for a depth test to resolve.
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_vertex_buffer(&mut self, ctx: &RenderCtx<'_>) {
        if self.vertex_buffer.is_some() {
            return;
        }

        self.vertex_buffer = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("flatshade vertex buffer"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
    }
}

fn draw_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| {
        log::warn!("FlatRenderer: {len} vertices exceed one draw; clamping to {}", u32::MAX);
        u32::MAX
    })
}
