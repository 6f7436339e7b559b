//! Render pipelines shared by every flow.
//!
//! - `basic` draws opaque lit meshes and hosts the generic pipeline builder
//! - `transparent` draws blended lit meshes
//! - `flat` draws unlit points and lines
//! - `light` holds the light uniform and its bind group

pub mod basic;
pub mod flat;
pub mod light;
pub mod transparent;

pub struct Pipelines {
    pub basic: wgpu::RenderPipeline,
    pub transparent: wgpu::RenderPipeline,
    pub points: wgpu::RenderPipeline,
    pub lines: wgpu::RenderPipeline,
    pub flat_layout: wgpu::BindGroupLayout,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
        light_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let flat_layout = flat::mk_flat_bind_group_layout(device);
        Self {
            basic: basic::mk_basic_pipeline(device, format, camera_layout, light_layout),
            transparent: transparent::mk_transparent_pipeline(
                device,
                format,
                camera_layout,
                light_layout,
            ),
            points: flat::mk_flat_pipeline(
                device,
                format,
                camera_layout,
                &flat_layout,
                wgpu::PrimitiveTopology::PointList,
            ),
            lines: flat::mk_flat_pipeline(
                device,
                format,
                camera_layout,
                &flat_layout,
                wgpu::PrimitiveTopology::LineList,
            ),
            flat_layout,
        }
    }
}
