//! Unlit point and line rendering for particle fields, stars and the grid floor.
//!
//! WebGPU rasterizes points at one pixel regardless of size, so particle size is
//! not configurable.

use cgmath::{Matrix4, SquareMatrix};
use wgpu::util::DeviceExt;

use crate::{
    data_structures::model::{FlatVertex, Vertex},
    pipelines::basic::{DepthMode, mk_render_pipeline},
};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FlatUniform {
    pub model: [[f32; 4]; 4],
    /// Multiplied with every vertex colour; alpha carries the field's opacity.
    pub tint: [f32; 4],
}

impl FlatUniform {
    pub fn new(model: Matrix4<f32>, tint: [f32; 4]) -> Self {
        Self {
            model: model.into(),
            tint,
        }
    }
}

impl Default for FlatUniform {
    fn default() -> Self {
        Self::new(Matrix4::identity(), [1.0; 4])
    }
}

/// Vertices plus the per-object uniform, ready for [`crate::render::Render::Points`]
/// or [`crate::render::Render::Lines`].
pub struct FlatObject {
    pub vertex_buffer: wgpu::Buffer,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub amount: usize,
}

impl FlatObject {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        vertices: &[FlatVertex],
        uniform: FlatUniform,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Uniform Buffer")),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some(label),
        });
        Self {
            vertex_buffer,
            uniform_buffer,
            bind_group,
            amount: vertices.len(),
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, uniform: FlatUniform) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }
}

pub fn mk_flat_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("flat_bind_group_layout"),
    })
}

/// `topology` is `PointList` for particle fields and `LineList` for the grid.
pub fn mk_flat_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    flat_bind_group_layout: &wgpu::BindGroupLayout,
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Flat Pipeline Layout"),
        bind_group_layouts: &[Some(camera_bind_group_layout), Some(flat_bind_group_layout)],
        immediate_size: 0,
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Flat Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("flat.wgsl").into()),
    };
    mk_render_pipeline(
        device,
        &layout,
        format,
        Some(wgpu::BlendState::ALPHA_BLENDING),
        Some(DepthMode::ReadOnly),
        topology,
        &[FlatVertex::desc()],
        shader,
    )
}
