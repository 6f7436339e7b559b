use crate::{
    data_structures::{
        instance::InstanceRaw,
        model::{ModelVertex, Vertex},
    },
    pipelines::basic::{DepthMode, mk_render_pipeline},
};

/**
 * Same shader and layout as the basic pipeline, alpha blended and without
 * depth writes so glass parts never hide what sits behind them.
 */
pub fn mk_transparent_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    light_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Transparent Pipeline Layout"),
        bind_group_layouts: &[Some(camera_bind_group_layout), Some(light_bind_group_layout)],
        immediate_size: 0,
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Scene Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
    };
    mk_render_pipeline(
        device,
        &render_pipeline_layout,
        format,
        Some(wgpu::BlendState::ALPHA_BLENDING),
        Some(DepthMode::ReadOnly),
        wgpu::PrimitiveTopology::TriangleList,
        &[ModelVertex::desc(), InstanceRaw::desc()],
        shader,
    )
}
