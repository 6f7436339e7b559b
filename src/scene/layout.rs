//! Scene configuration: the fixed object placements, particle parameters, lights and camera.

use cgmath::Vector3;

use crate::camera::CameraConfig;
use crate::pipelines::light::Light;
use crate::scene::object::{SceneObject, SceneObjectKind, Transform};

/// One hand-placed object. `phase` offsets its float motion so neighbours do not bob in sync.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub kind: SceneObjectKind,
    pub base: Transform,
    pub phase: f32,
}

impl Placement {
    pub fn new(kind: SceneObjectKind, base: Transform, phase: f32) -> Self {
        Self { kind, base, phase }
    }

    pub fn object(&self) -> SceneObject {
        SceneObject::new(self.kind, self.base).with_phase(self.phase)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneLayout {
    pub placements: Vec<Placement>,
}

impl Default for SceneLayout {
    fn default() -> Self {
        use SceneObjectKind::*;
        let placements = vec![
            Placement::new(Fuselage, Transform::new([3.0, 1.0, -3.0], [0.1, -0.8, 0.05], 1.2), 0.0),
            Placement::new(Fuselage, Transform::new([-5.0, 3.0, -8.0], [0.0, 0.5, 0.1], 0.6), 0.0),
            Placement::new(
                CircuitBoard,
                Transform::new([-4.0, -1.0, -2.0], [0.3, 0.5, 0.0], 0.8),
                0.0,
            ),
            Placement::new(
                CircuitBoard,
                Transform::new([4.0, -2.0, -4.0], [-0.2, -0.3, 0.1], 0.5),
                3.7,
            ),
            Placement::new(Microchip, Transform::new([-2.0, 2.0, -3.0], [0.0; 3], 1.2), 1.3),
            Placement::new(Microchip, Transform::new([5.0, 0.0, -5.0], [0.0; 3], 0.8), 5.1),
            Placement::new(Microchip, Transform::new([-5.0, -2.0, -6.0], [0.0; 3], 0.6), 8.4),
            Placement::new(
                Sphere { colour: 0x00d4ff },
                Transform::new([2.0, 3.0, -4.0], [0.0; 3], 0.4),
                2.2,
            ),
            Placement::new(
                Sphere { colour: 0x3b82f6 },
                Transform::new([-3.0, 1.0, -5.0], [0.0; 3], 0.3),
                6.6,
            ),
            Placement::new(ParticleField, Transform::IDENTITY, 0.0),
            Placement::new(GridFloor, Transform::at([0.0, -4.0, 0.0]), 0.0),
            Placement::new(Starfield, Transform::IDENTITY, 0.0),
        ];
        Self { placements }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleConfig {
    pub count: usize,
    /// Edge of the sampling cube.
    pub extent: f32,
    pub colour: u32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarConfig {
    pub count: usize,
    pub radius: f32,
    pub depth: f32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    pub size: f32,
    pub divisions: u32,
    pub centre_colour: u32,
    pub colour: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub layout: SceneLayout,
    pub particles: ParticleConfig,
    pub stars: StarConfig,
    pub grid: GridConfig,
    pub camera: CameraConfig,
    pub lights: Vec<Light>,
    pub clear_colour: wgpu::Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            layout: SceneLayout::default(),
            particles: ParticleConfig {
                count: 800,
                extent: 25.0,
                colour: 0x00d4ff,
                opacity: 0.6,
            },
            stars: StarConfig {
                count: 3000,
                radius: 60.0,
                depth: 60.0,
                opacity: 0.8,
            },
            grid: GridConfig {
                size: 40.0,
                divisions: 40,
                centre_colour: 0x00d4ff,
                colour: 0x0a2a3a,
            },
            camera: CameraConfig::default(),
            lights: vec![
                Light::Ambient {
                    colour: 0xffffff,
                    intensity: 0.15,
                },
                Light::Point {
                    position: Vector3::new(10.0, 10.0, 10.0),
                    colour: 0x00d4ff,
                    intensity: 1.2,
                },
                Light::Point {
                    position: Vector3::new(-10.0, -10.0, -10.0),
                    colour: 0x3b82f6,
                    intensity: 0.6,
                },
                Light::Spot {
                    position: Vector3::new(0.0, 15.0, 0.0),
                    colour: 0x00d4ff,
                    intensity: 0.8,
                },
                Light::Directional {
                    position: Vector3::new(5.0, 5.0, 5.0),
                    colour: 0xffffff,
                    intensity: 0.5,
                },
            ],
            clear_colour: wgpu::Color {
                r: 0.002,
                g: 0.003,
                b: 0.008,
                a: 1.0,
            },
        }
    }
}
