//! Cameras: the plain look-at [`Camera`] the renderer consumes, the [`OrbitCamera`]
//! controller that drives it from elapsed time, and the GPU uniform plumbing.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};
use std::time::Duration;

use cgmath::{Deg, InnerSpace, Matrix4, Point3, Rad, Vector3, perspective};
use wgpu::util::DeviceExt;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Eye looking at a target with +Y up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
}

impl Camera {
    pub fn new(eye: Point3<f32>, target: Point3<f32>) -> Self {
        Self { eye, target }
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.target, Vector3::unit_y())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
    /// Auto-rotation speed; 1.0 is one revolution per minute.
    pub auto_rotate_speed: f32,
    pub min_polar: Rad<f32>,
    pub max_polar: Rad<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Point3::new(0.0, 2.0, 12.0),
            target: Point3::new(0.0, 0.0, 0.0),
            fovy: Deg(55.0),
            znear: 0.1,
            zfar: 1000.0,
            auto_rotate_speed: 0.3,
            min_polar: Rad(FRAC_PI_4),
            max_polar: Rad(FRAC_PI_2),
        }
    }
}

/// Orbits a fixed target at a fixed radius. Zoom and pan are not offered.
///
/// Azimuth is measured from +Z towards +X, polar from +Y. Auto-rotation turns the
/// azimuth clockwise seen from above at a constant rate, so the pose is a pure
/// function of elapsed time.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    target: Point3<f32>,
    radius: f32,
    base_azimuth: f32,
    azimuth: f32,
    polar: f32,
    min_polar: f32,
    max_polar: f32,
    rate: f32,
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig) -> Self {
        let offset = config.eye - config.target;
        let radius = offset.magnitude();
        let azimuth = offset.x.atan2(offset.z);
        let polar = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            FRAC_PI_2
        };
        let min_polar = config.min_polar.0;
        let max_polar = config.max_polar.0.max(min_polar);

        Self {
            target: config.target,
            radius,
            base_azimuth: azimuth,
            azimuth,
            polar: polar.clamp(min_polar, max_polar),
            min_polar,
            max_polar,
            rate: TAU / 60.0 * config.auto_rotate_speed,
        }
    }

    /// Moves to the pose for `elapsed` since mount.
    pub fn update(&mut self, elapsed: Duration) {
        self.azimuth = (self.base_azimuth - self.rate * elapsed.as_secs_f32()).rem_euclid(TAU);
    }

    /// Polar angles outside the configured range are clamped.
    pub fn set_polar(&mut self, polar: Rad<f32>) {
        self.polar = polar.0.clamp(self.min_polar, self.max_polar);
    }

    pub fn polar(&self) -> Rad<f32> {
        Rad(self.polar)
    }

    pub fn azimuth(&self) -> Rad<f32> {
        Rad(self.azimuth)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Angular speed in radians per second.
    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn eye(&self) -> Point3<f32> {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.target + Vector3::new(sin_p * sin_a, cos_p, sin_p * cos_a) * self.radius
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.eye(), self.target)
    }
}

pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_position = camera.eye.to_homogeneous().into();
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// The camera, its projection and the uniform buffer both pipelines bind at group 0.
pub struct CameraResources {
    pub camera: Camera,
    pub projection: Projection,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    pub fn new(device: &wgpu::Device, config: &CameraConfig, width: u32, height: u32) -> Self {
        let camera = OrbitCamera::new(config).camera();
        let projection = Projection::new(width, height, config.fovy, config.znear, config.zfar);
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera, &projection);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
            label: Some("camera_bind_group_layout"),
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        Self {
            camera,
            projection,
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn write(&mut self, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(&self.camera, &self.projection);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
