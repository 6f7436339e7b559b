use cgmath::Vector3;
use wgpu::util::DeviceExt;

use crate::data_structures::model::srgb;

/// Lights the shader loops over; more are dropped with a warning.
pub const MAX_LIGHTS: usize = 4;

/// A scene light. Spot lights are approximated by point lights at the same position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Ambient { colour: u32, intensity: f32 },
    Point { position: Vector3<f32>, colour: u32, intensity: f32 },
    Spot { position: Vector3<f32>, colour: u32, intensity: f32 },
    /// Shines from `position` towards the origin.
    Directional { position: Vector3<f32>, colour: u32, intensity: f32 },
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightRaw {
    /// `w` is 1 for positional lights and 0 for directions.
    position: [f32; 4],
    /// Linear RGB plus intensity.
    colour: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    ambient: [f32; 4],
    lights: [LightRaw; MAX_LIGHTS],
    // Uniforms require 16 byte spacing, hence the vec4 for a single count
    count: [u32; 4],
}

impl LightUniform {
    pub fn from_lights(lights: &[Light]) -> Self {
        let mut uniform = Self {
            ambient: [0.0; 4],
            lights: [LightRaw::default(); MAX_LIGHTS],
            count: [0; 4],
        };
        let mut used = 0;
        for light in lights {
            let (position, colour, intensity) = match *light {
                Light::Ambient { colour, intensity } => {
                    let [r, g, b] = srgb(colour);
                    uniform.ambient = [r, g, b, uniform.ambient[3] + intensity];
                    continue;
                }
                Light::Point {
                    position,
                    colour,
                    intensity,
                }
                | Light::Spot {
                    position,
                    colour,
                    intensity,
                } => (position.extend(1.0), colour, intensity),
                Light::Directional {
                    position,
                    colour,
                    intensity,
                } => (position.extend(0.0), colour, intensity),
            };
            if used == MAX_LIGHTS {
                log::warn!("dropping light beyond the first {MAX_LIGHTS}: {light:?}");
                continue;
            }
            let [r, g, b] = srgb(colour);
            uniform.lights[used] = LightRaw {
                position: position.into(),
                colour: [r, g, b, intensity],
            };
            used += 1;
        }
        uniform.count[0] = used as u32;
        uniform
    }

    pub fn count(&self) -> usize {
        self.count[0] as usize
    }

    pub fn ambient_intensity(&self) -> f32 {
        self.ambient[3]
    }
}

/// The light uniform buffer and its bind group, group 1 of the lit pipelines.
pub struct LightResources {
    pub uniform: LightUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl LightResources {
    pub fn new(device: &wgpu::Device, uniform: LightUniform) -> Self {
        let buffer = mk_buffer(device, uniform);
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = mk_bind_group(device, &bind_group_layout, &buffer);
        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn write(&mut self, queue: &wgpu::Queue, uniform: LightUniform) {
        self.uniform = uniform;
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[uniform]));
    }
}

pub fn mk_buffer(device: &wgpu::Device, light_uniform: LightUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Light Uniform Buffer"),
        contents: bytemuck::cast_slice(&[light_uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("light_bind_group_layout"),
    })
}

pub fn mk_bind_group(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    light_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: light_buffer.as_entire_binding(),
        }],
        label: Some("light_bind_group"),
    })
}
