//! Scene objects and the motion rules that place them at a given time.
//!
//! Every pose is a pure function of the elapsed seconds since mount. Nothing here
//! integrates per-frame deltas, so two animators fed the same times agree exactly.

use std::f32::consts::TAU;

use cgmath::Vector3;

use crate::data_structures::instance::Instance;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneObjectKind {
    Fuselage,
    CircuitBoard,
    Microchip,
    /// Glowing icosphere in the given `0xRRGGBB` colour.
    Sphere { colour: u32 },
    ParticleField,
    GridFloor,
    Starfield,
}

impl SceneObjectKind {
    pub fn name(&self) -> &'static str {
        match self {
            SceneObjectKind::Fuselage => "fuselage",
            SceneObjectKind::CircuitBoard => "circuit board",
            SceneObjectKind::Microchip => "microchip",
            SceneObjectKind::Sphere { .. } => "sphere",
            SceneObjectKind::ParticleField => "particle field",
            SceneObjectKind::GridFloor => "grid floor",
            SceneObjectKind::Starfield => "starfield",
        }
    }
}

/// Position, XYZ Euler rotation in radians and uniform scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vector3::new(0.0, 0.0, 0.0),
        rotation: Vector3::new(0.0, 0.0, 0.0),
        scale: 1.0,
    };

    pub fn new(position: [f32; 3], rotation: [f32; 3], scale: f32) -> Self {
        Self {
            position: position.into(),
            rotation: rotation.into(),
            scale,
        }
    }

    pub fn at(position: [f32; 3]) -> Self {
        Self {
            position: position.into(),
            ..Self::IDENTITY
        }
    }

    pub fn to_instance(&self) -> Instance {
        Instance::from_euler(
            self.position,
            self.rotation,
            Vector3::new(self.scale, self.scale, self.scale),
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn component(self, v: &mut Vector3<f32>) -> &mut f32 {
        match self {
            Axis::X => &mut v.x,
            Axis::Y => &mut v.y,
            Axis::Z => &mut v.z,
        }
    }
}

/// Gentle hover applied as a parent transform around the object.
///
/// With `τ = (phase + t)·speed / 4` the parent rotates by
/// `(cos τ / 8, sin τ / 8, sin τ / 20) · rotation_intensity` and lifts by
/// `sin τ / 10 · float_intensity`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatMotion {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
    pub phase: f32,
}

impl FloatMotion {
    pub fn new(speed: f32, rotation_intensity: f32, float_intensity: f32) -> Self {
        Self {
            speed,
            rotation_intensity,
            float_intensity,
            phase: 0.0,
        }
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    pub fn at(&self, t: f32) -> Transform {
        let tau = (self.phase + t) * self.speed / 4.0;
        let (sin, cos) = tau.sin_cos();
        Transform {
            position: Vector3::new(0.0, sin / 10.0 * self.float_intensity, 0.0),
            rotation: Vector3::new(
                cos / 8.0 * self.rotation_intensity,
                sin / 8.0 * self.rotation_intensity,
                sin / 20.0 * self.rotation_intensity,
            ),
            scale: 1.0,
        }
    }
}

/// How an object's own transform evolves with time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpdateRule {
    Static,
    /// `y = base + sin(t·bob_freq)·bob_amp`, `rot_y = base + sin(t·sway_freq)·sway_amp`.
    Bob {
        bob_freq: f32,
        bob_amp: f32,
        sway_freq: f32,
        sway_amp: f32,
    },
    /// `rot[axis] = base + t·rate`, reduced into `[0, 2π)` when `wrap` is set.
    Spin { axis: Axis, rate: f32, wrap: bool },
    /// `rot = base + t·rate` on every axis.
    Tumble { rate: Vector3<f32> },
}

impl UpdateRule {
    pub fn apply(&self, base: &Transform, t: f32) -> Transform {
        let mut out = *base;
        match *self {
            UpdateRule::Static => {}
            UpdateRule::Bob {
                bob_freq,
                bob_amp,
                sway_freq,
                sway_amp,
            } => {
                out.position.y = base.position.y + (t * bob_freq).sin() * bob_amp;
                out.rotation.y = base.rotation.y + (t * sway_freq).sin() * sway_amp;
            }
            UpdateRule::Spin { axis, rate, wrap } => {
                let angle = axis.component(&mut out.rotation);
                *angle += t * rate;
                if wrap {
                    *angle = angle.rem_euclid(TAU);
                }
            }
            UpdateRule::Tumble { rate } => {
                out.rotation = base.rotation + rate * t;
            }
        }
        out
    }
}

/// Emissive intensity oscillation: `gain = 1 + sin(t·speed)·amplitude`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
    pub speed: f32,
    pub amplitude: f32,
}

impl Pulse {
    pub fn gain(&self, t: f32) -> f32 {
        1.0 + (t * self.speed).sin() * self.amplitude
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub kind: SceneObjectKind,
    pub base: Transform,
    pub rule: UpdateRule,
    pub float: Option<FloatMotion>,
    pub pulse: Option<Pulse>,
}

/// An object's state at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectPose {
    /// Float offset of the parent frame; identity when the object does not float.
    pub parent: Transform,
    pub local: Transform,
    pub emissive_gain: f32,
}

impl ObjectPose {
    pub fn world(&self) -> Instance {
        self.parent.to_instance() * self.local.to_instance()
    }
}

impl SceneObject {
    /// Builds an object with the motion its kind calls for.
    pub fn new(kind: SceneObjectKind, base: Transform) -> Self {
        let (rule, float, pulse) = match kind {
            SceneObjectKind::Fuselage => (
                UpdateRule::Bob {
                    bob_freq: 0.5,
                    bob_amp: 0.3,
                    sway_freq: 0.2,
                    sway_amp: 0.1,
                },
                None,
                None,
            ),
            SceneObjectKind::CircuitBoard => (
                UpdateRule::Spin {
                    axis: Axis::Z,
                    rate: 0.1,
                    wrap: false,
                },
                Some(FloatMotion::new(1.0, 0.2, 0.5)),
                None,
            ),
            SceneObjectKind::Microchip => (
                UpdateRule::Spin {
                    axis: Axis::Y,
                    rate: 0.3,
                    wrap: true,
                },
                Some(FloatMotion::new(2.0, 0.3, 0.8)),
                None,
            ),
            SceneObjectKind::Sphere { .. } => (
                UpdateRule::Tumble {
                    rate: Vector3::new(0.2, 0.3, 0.0),
                },
                Some(FloatMotion::new(2.0, 0.5, 1.0)),
                Some(Pulse {
                    speed: 2.0,
                    amplitude: 0.5,
                }),
            ),
            SceneObjectKind::ParticleField => (
                UpdateRule::Tumble {
                    rate: Vector3::new(0.02, 0.03, 0.0),
                },
                None,
                None,
            ),
            SceneObjectKind::GridFloor | SceneObjectKind::Starfield => {
                (UpdateRule::Static, None, None)
            }
        };
        Self {
            kind,
            base,
            rule,
            float,
            pulse,
        }
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.float = self.float.map(|f| f.with_phase(phase));
        self
    }

    pub fn pose_at(&self, t: f32) -> ObjectPose {
        ObjectPose {
            parent: self.float.map(|f| f.at(t)).unwrap_or(Transform::IDENTITY),
            local: self.rule.apply(&self.base, t),
            emissive_gain: self.pulse.map(|p| p.gain(t)).unwrap_or(1.0),
        }
    }
}
