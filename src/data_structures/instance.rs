//! Per-instance transforms and the packed data the lit shaders read.
//!
//! Each mesh part of a scene object becomes one instance: the object's world
//! transform multiplied with the part's local transform, plus the part's
//! material with any emissive pulse applied.

use std::ops::Mul;

use cgmath::{Euler, One, Quaternion, Rad, Vector3};

use crate::data_structures::model::{self, Material};

/// Position, rotation (as quaternion) and scale of one rendered copy of a mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instance {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Instance {
    pub fn new() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// `rotation` holds XYZ Euler angles in radians.
    pub fn from_euler(position: Vector3<f32>, rotation: Vector3<f32>, scale: Vector3<f32>) -> Self {
        Self {
            position,
            rotation: Euler::new(Rad(rotation.x), Rad(rotation.y), Rad(rotation.z)).into(),
            scale,
        }
    }

    pub fn to_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from_translation(self.position)
            * cgmath::Matrix4::from(self.rotation)
            * cgmath::Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    pub fn to_raw(&self, material: &Material, emissive_gain: f32) -> InstanceRaw {
        let [r, g, b] = material.colour;
        let [er, eg, eb] = material.emissive;
        InstanceRaw {
            model: self.to_matrix().into(),
            normal: cgmath::Matrix3::from(self.rotation).into(),
            colour: [r, g, b, material.opacity],
            emissive: [er, eg, eb, material.emissive_intensity * emissive_gain],
            surface: [material.metalness, material.roughness],
        }
    }
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vector3<f32>> for Instance {
    fn from(position: Vector3<f32>) -> Self {
        Instance {
            position,
            ..Default::default()
        }
    }
}

/// Parent-then-child composition; `rhs` is expressed in `self`'s frame.
impl<'a, 'b> Mul<&'b Instance> for &'a Instance {
    type Output = Instance;

    fn mul(self, rhs: &'b Instance) -> Self::Output {
        let scaled_rhs_pos = Vector3::new(
            self.scale.x * rhs.position.x,
            self.scale.y * rhs.position.y,
            self.scale.z * rhs.position.z,
        );
        Instance {
            position: self.position + (self.rotation * scaled_rhs_pos),
            rotation: self.rotation * rhs.rotation,
            scale: Vector3::new(
                self.scale.x * rhs.scale.x,
                self.scale.y * rhs.scale.y,
                self.scale.z * rhs.scale.z,
            ),
        }
    }
}

impl Mul<Instance> for Instance {
    type Output = Self;

    fn mul(self, rhs: Instance) -> Self::Output {
        &self * &rhs
    }
}

/**
 * The raw instance is the actual data stored on the GPU
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 3]; 3],
    /// Linear RGB plus opacity.
    pub colour: [f32; 4],
    /// Linear RGB plus intensity.
    pub emissive: [f32; 4],
    /// Metalness, roughness.
    pub surface: [f32; 2],
}

/**
 * Locations 5..=8 hold the model matrix as four vec4s, 9..=11 the normal
 * matrix, then colour, emissive and surface parameters.
 */
impl model::Vertex for InstanceRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        const ATTRIBUTES: [wgpu::VertexAttribute; 10] = wgpu::vertex_attr_array![
            5 => Float32x4,
            6 => Float32x4,
            7 => Float32x4,
            8 => Float32x4,
            9 => Float32x3,
            10 => Float32x3,
            11 => Float32x3,
            12 => Float32x4,
            13 => Float32x4,
            14 => Float32x2,
        ];
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            // Advance once per instance rather than per vertex.
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}
