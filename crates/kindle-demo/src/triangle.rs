use std::rc::Rc;

use bytemuck::{Pod, Zeroable};

use kindle_engine::game_loop::{FrameCtx, LoopControl, Render};
use kindle_engine::render::{RenderCtx, RenderTarget};
use kindle_engine::resource::{ResourceCache, ShaderStage, ShaderStore};
use kindle_engine::window::WinitWindow;

use crate::sim::Spin;

/// Cache key shared by the triangle's shaders, program and vertex buffer.
const TRIANGLE: &str = "triangle";

/// Distance from the center to each corner, in clip space.
const RADIUS: f32 = 0.6;

const CORNER_COLORS: [[f32; 3]; 3] = [[1.0, 0.35, 0.2], [0.25, 0.9, 0.4], [0.3, 0.45, 1.0]];

/// Draws the spinning triangle.
///
/// Shader modules and the pipeline live in a `ShaderStore`, the vertex buffer in a
/// `ResourceCache`; all are created on first use and rebuilt if the surface format
/// changes.
pub struct TriangleRenderer {
    shaders: ShaderStore<wgpu::ShaderModule, wgpu::RenderPipeline>,
    buffers: ResourceCache<wgpu::Buffer>,
    pipeline_format: Option<wgpu::TextureFormat>,
}

impl TriangleRenderer {
    pub fn new() -> Self {
        Self {
            shaders: ShaderStore::new(),
            buffers: ResourceCache::new("vertex buffer"),
            pipeline_format: None,
        }
    }

    fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, vertices: &[Vertex; 3]) {
        self.ensure_pipeline(ctx);
        self.ensure_vertex_buffer(ctx);

        let Some(pipeline) = self.shaders.get_program(TRIANGLE) else { return; };
        let Some(vbo) = self.buffers.get(TRIANGLE) else { return; };

        ctx.queue.write_buffer(&vbo, 0, bytemuck::cast_slice(vertices));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("kindle triangle pass"),
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

        rpass.set_pipeline(&pipeline);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..3, 0..1);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.shaders.program_exists(TRIANGLE) {
            return;
        }

        // Stale entries from a previous surface format.
        self.shaders.delete_program(TRIANGLE);
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            self.shaders.delete_shader(stage, TRIANGLE);
        }

        // One WGSL module carries both entry points; it is shared by both stage caches.
        let module = Rc::new(ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kindle triangle shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/triangle.wgsl").into()),
        }));
        self.shaders.register_shader(ShaderStage::Vertex, TRIANGLE, Rc::clone(&module));
        self.shaders.register_shader(ShaderStage::Fragment, TRIANGLE, module);

        let (Some(vs), Some(fs)) = (
            self.shaders.get_shader(ShaderStage::Vertex, TRIANGLE),
            self.shaders.get_shader(ShaderStage::Fragment, TRIANGLE),
        ) else {
            return;
        };

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("kindle triangle pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("kindle triangle pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
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
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.shaders.register_program(TRIANGLE, pipeline);
        self.pipeline_format = Some(ctx.surface_format);
        log::info!("triangle pipeline built for {:?}", ctx.surface_format);
    }

    fn ensure_vertex_buffer(&mut self, ctx: &RenderCtx<'_>) {
        if self.buffers.exists(TRIANGLE) {
            return;
        }

        let vbo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kindle triangle vbo"),
            size: std::mem::size_of::<[Vertex; 3]>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        self.buffers.register(TRIANGLE, vbo);
    }
}

impl Default for TriangleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Render<Spin, WinitWindow> for TriangleRenderer {
    fn render(&mut self, frame: &mut FrameCtx<'_, Spin, WinitWindow>) -> LoopControl {
        let clear = frame.state.clear_color();
        let angle = frame.state.angle;

        frame.window.draw(clear, |ctx, target| {
            let vertices = triangle_vertices(angle, ctx.aspect_ratio());
            self.draw(ctx, target, &vertices);
        })
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Vertex {
    pos: [f32; 2],
    color: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x3  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Corners of an equilateral triangle rotated by `angle`, squeezed horizontally by
/// `aspect` so it stays equilateral on screen.
fn triangle_vertices(angle: f32, aspect: f32) -> [Vertex; 3] {
    let third = std::f32::consts::TAU / 3.0;
    std::array::from_fn(|i| {
        let a = angle + third * i as f32 + std::f32::consts::FRAC_PI_2;
        Vertex {
            pos: [RADIUS * a.cos() / aspect, RADIUS * a.sin()],
            color: CORNER_COLORS[i],
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrotated_triangle_points_up() {
        let v = triangle_vertices(0.0, 1.0);
        assert!(v[0].pos[0].abs() < 1e-6);
        assert!((v[0].pos[1] - RADIUS).abs() < 1e-6);
    }

    #[test]
    fn corners_sit_on_the_circle() {
        for v in triangle_vertices(1.3, 1.0) {
            let r = (v.pos[0] * v.pos[0] + v.pos[1] * v.pos[1]).sqrt();
            assert!((r - RADIUS).abs() < 1e-5);
        }
    }

    #[test]
    fn wide_surfaces_squeeze_x() {
        let square = triangle_vertices(0.4, 1.0);
        let wide = triangle_vertices(0.4, 2.0);
        for (s, w) in square.iter().zip(&wide) {
            assert!((w.pos[0] - s.pos[0] / 2.0).abs() < 1e-6);
            assert_eq!(w.pos[1], s.pos[1]);
        }
    }

    #[test]
    fn vertex_stride_matches_layout() {
        assert_eq!(Vertex::layout().array_stride, 20);
    }
}
