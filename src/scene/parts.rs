//! The mesh parts each object variant is assembled from.
//!
//! Part transforms are relative to the object's frame. Particle fields, stars and
//! the grid floor are drawn as points and lines and have no mesh parts.

use std::collections::BTreeMap;
use std::f32::consts::FRAC_PI_2;

use cgmath::Vector3;

use crate::data_structures::{
    geometry::Primitive,
    instance::{Instance, InstanceRaw},
    model::Material,
};
use crate::scene::object::{ObjectPose, SceneObject, SceneObjectKind};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Part {
    pub primitive: Primitive,
    pub local: Instance,
    pub material: Material,
}

impl Part {
    fn new(primitive: Primitive, position: [f32; 3], scale: [f32; 3], material: Material) -> Self {
        Self {
            primitive,
            local: Instance::from_euler(position.into(), Vector3::new(0.0, 0.0, 0.0), scale.into()),
            material,
        }
    }

    fn rotated(mut self, rotation: [f32; 3]) -> Self {
        self.local = Instance::from_euler(self.local.position, rotation.into(), self.local.scale);
        self
    }
}

pub fn parts_for(kind: &SceneObjectKind) -> Vec<Part> {
    match kind {
        SceneObjectKind::Fuselage => fuselage(),
        SceneObjectKind::CircuitBoard => circuit_board(),
        SceneObjectKind::Microchip => microchip(),
        SceneObjectKind::Sphere { colour } => vec![Part::new(
            Primitive::Icosphere,
            [0.0; 3],
            [1.0; 3],
            Material::new(*colour).metal(0.8, 0.2).glow(*colour, 0.3),
        )],
        SceneObjectKind::ParticleField
        | SceneObjectKind::GridFloor
        | SceneObjectKind::Starfield => Vec::new(),
    }
}

fn fuselage() -> Vec<Part> {
    let hull = Material::new(0x1a3a5c).metal(0.9, 0.2).glow(0x003366, 0.1);
    let wing = Material::new(0x0d2840).metal(0.95, 0.1).glow(0x001a33, 0.2);
    let fin = Material::new(0x0d2840).metal(0.9, 0.1);
    let engine = Material::new(0x1a3a5c).metal(0.95, 0.1);
    let exhaust = Material::new(0x00d4ff).glow(0x00d4ff, 1.5).opacity(0.8);

    let mut parts = vec![
        // The capsule is built along +Y; lay it along the flight axis.
        Part::new(Primitive::Capsule, [0.0; 3], [1.0; 3], hull).rotated([FRAC_PI_2, 0.0, 0.0]),
        Part::new(
            Primitive::Dome,
            [0.0, 0.15, 2.2],
            [0.25; 3],
            Material::new(0x00d4ff).glow(0x00d4ff, 0.8).opacity(0.7),
        ),
        Part::new(Primitive::Cuboid, [0.0, -0.1, 0.0], [0.05, 3.5, 0.8], wing)
            .rotated([0.0, 0.0, FRAC_PI_2]),
        Part::new(
            Primitive::Sphere,
            [1.75, -0.1, 0.0],
            [0.05; 3],
            Material::new(0xff3333).glow(0xff0000, 2.0),
        ),
        Part::new(
            Primitive::Sphere,
            [-1.75, -0.1, 0.0],
            [0.05; 3],
            Material::new(0x33ff33).glow(0x00ff00, 2.0),
        ),
    ];
    for x in [0.8, -0.8] {
        parts.push(
            Part::new(Primitive::Nozzle, [x, -0.2, -0.3], [0.15, 0.6, 0.15], engine)
                .rotated([FRAC_PI_2, 0.0, 0.0]),
        );
        parts.push(Part::new(Primitive::Disc, [x, -0.2, -0.65], [0.12; 3], exhaust));
    }
    parts.push(Part::new(Primitive::Cuboid, [0.0, 0.4, -2.0], [0.05, 0.8, 0.5], fin));
    parts.push(
        Part::new(Primitive::Cuboid, [0.0, 0.1, -2.0], [0.03, 1.2, 0.4], fin)
            .rotated([0.0, 0.0, FRAC_PI_2]),
    );
    parts
}

fn circuit_board() -> Vec<Part> {
    let trace = Material::new(0x00d4ff).glow(0x00d4ff, 0.5);
    let mut parts = vec![
        Part::new(
            Primitive::Cuboid,
            [0.0; 3],
            [1.5, 0.05, 1.0],
            Material::new(0x0a3d0a).metal(0.3, 0.6),
        ),
        Part::new(
            Primitive::Cuboid,
            [0.0, 0.05, 0.0],
            [0.3, 0.08, 0.3],
            Material::new(0x1a1a2e).metal(0.8, 0.2),
        ),
    ];
    for i in 0..5 {
        let x = (i as f32 - 2.0) * 0.25;
        parts.push(Part::new(Primitive::Cuboid, [x, 0.03, 0.3], [0.02, 0.01, 0.3], trace));
    }
    for i in 0..6 {
        let x = ((i % 3) as f32 - 1.0) * 0.4;
        let z = ((i / 3) as f32 - 0.5) * 0.3;
        let colour = if i % 2 == 0 { 0x333333 } else { 0x4a4a4a };
        parts.push(Part::new(
            Primitive::Cylinder,
            [x, 0.08, z],
            [0.04, 0.1, 0.04],
            Material::new(colour).metal(0.7, 0.3),
        ));
    }
    parts
}

fn microchip() -> Vec<Part> {
    let pin = Material::new(0xc0c0c0).metal(1.0, 0.2);
    let mut parts = vec![
        Part::new(
            Primitive::Cuboid,
            [0.0; 3],
            [0.5, 0.1, 0.5],
            Material::new(0x1a1a2e).metal(0.9, 0.1),
        ),
        Part::new(
            Primitive::Cuboid,
            [0.0, 0.06, 0.0],
            [0.25, 0.02, 0.25],
            Material::new(0x00d4ff).glow(0x00d4ff, 0.8).opacity(0.9),
        ),
    ];
    for x in [-0.35, 0.35] {
        for i in 0..8 {
            let z = (i as f32 - 3.5) * 0.06;
            parts.push(Part::new(Primitive::Cuboid, [x, 0.0, z], [0.15, 0.02, 0.03], pin));
        }
    }
    parts
}

/// Every part that shares a mesh and a pipeline, across all objects.
#[derive(Clone, Debug, PartialEq)]
pub struct PartBatch {
    pub primitive: Primitive,
    pub transparent: bool,
    /// Owning object index and the part itself.
    pub members: Vec<(usize, Part)>,
}

impl PartBatch {
    /// World-space instance data for `poses`, indexed like the objects the batch was built from.
    pub fn instances(&self, poses: &[ObjectPose]) -> Vec<InstanceRaw> {
        self.members
            .iter()
            .filter_map(|(object, part)| {
                let pose = poses.get(*object)?;
                let world = &pose.world() * &part.local;
                Some(world.to_raw(&part.material, pose.emissive_gain))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Groups the parts of `objects` by mesh and transparency, opaque batches first.
pub fn batch_parts(objects: &[SceneObject]) -> Vec<PartBatch> {
    let mut groups: BTreeMap<(bool, Primitive), Vec<(usize, Part)>> = BTreeMap::new();
    for (index, object) in objects.iter().enumerate() {
        for part in parts_for(&object.kind) {
            groups
                .entry((part.material.is_transparent(), part.primitive))
                .or_default()
                .push((index, part));
        }
    }
    groups
        .into_iter()
        .map(|((transparent, primitive), members)| PartBatch {
            primitive,
            transparent,
            members,
        })
        .collect()
}
