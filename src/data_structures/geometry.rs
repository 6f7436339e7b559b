//! CPU-side procedural primitives.
//!
//! Every builder emits counter-clockwise triangles seen from outside, with
//! unit-length normals. Primitives are unit sized and scaled per instance,
//! except the capsule whose caps would distort under non-uniform scale.

use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use cgmath::{InnerSpace, Vector3};

use crate::data_structures::model::{FlatVertex, ModelVertex};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangles(&self) -> impl Iterator<Item = [&ModelVertex; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                &self.vertices[tri[0] as usize],
                &self.vertices[tri[1] as usize],
                &self.vertices[tri[2] as usize],
            ]
        })
    }

    fn push(&mut self, position: Vector3<f32>, normal: Vector3<f32>) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(ModelVertex {
            position: position.into(),
            normal: normal.normalize().into(),
        });
        index
    }
}

/// The meshes the backdrop is assembled from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    /// Unit cube centred on the origin.
    Cuboid,
    /// Unit height, unit radius, along +Y.
    Cylinder,
    /// Cylinder whose bottom radius is 0.8 of the top.
    Nozzle,
    /// Fuselage body: radius 0.3, straight section 4, along +Y.
    Capsule,
    /// Upper half of the unit sphere.
    Dome,
    Sphere,
    /// Double-sided unit disc in the XY plane.
    Disc,
    /// Icosahedron subdivided once, radius 1, flat shaded.
    Icosphere,
}

impl Primitive {
    pub const ALL: [Primitive; 8] = [
        Primitive::Cuboid,
        Primitive::Cylinder,
        Primitive::Nozzle,
        Primitive::Capsule,
        Primitive::Dome,
        Primitive::Sphere,
        Primitive::Disc,
        Primitive::Icosphere,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Primitive::Cuboid => "cuboid",
            Primitive::Cylinder => "cylinder",
            Primitive::Nozzle => "nozzle",
            Primitive::Capsule => "capsule",
            Primitive::Dome => "dome",
            Primitive::Sphere => "sphere",
            Primitive::Disc => "disc",
            Primitive::Icosphere => "icosphere",
        }
    }

    pub fn build(self) -> MeshData {
        match self {
            Primitive::Cuboid => cuboid(),
            Primitive::Cylinder => cylinder(1.0, 1.0, 16),
            Primitive::Nozzle => cylinder(1.0, 0.8, 16),
            Primitive::Capsule => capsule(0.3, 4.0, 8, 16),
            Primitive::Dome => sphere(16, 8, FRAC_PI_2),
            Primitive::Sphere => sphere(16, 12, PI),
            Primitive::Disc => disc(16),
            Primitive::Icosphere => icosphere(1),
        }
    }
}

pub fn cuboid() -> MeshData {
    let mut mesh = MeshData::default();
    let axes = [
        Vector3::unit_x(),
        -Vector3::unit_x(),
        Vector3::unit_y(),
        -Vector3::unit_y(),
        Vector3::unit_z(),
        -Vector3::unit_z(),
    ];
    for n in axes {
        let u = if n.y != 0.0 {
            Vector3::unit_x()
        } else {
            Vector3::unit_y()
        };
        // u x v == n, so (-u-v, +u-v, +u+v, -u+v) runs counter-clockwise around n.
        let v = n.cross(u);
        let centre = n * 0.5;
        let (u, v) = (u * 0.5, v * 0.5);
        let base = mesh.push(centre - u - v, n);
        mesh.push(centre + u - v, n);
        mesh.push(centre + u + v, n);
        mesh.push(centre - u + v, n);
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Open-ended radii are allowed; both caps are always closed.
pub fn cylinder(top_radius: f32, bottom_radius: f32, segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let slope = bottom_radius - top_radius;
    let ring = |i: u32| {
        let theta = TAU * i as f32 / segments as f32;
        (theta.cos(), theta.sin())
    };

    for i in 0..=segments {
        let (c, s) = ring(i);
        let normal = Vector3::new(c, slope, s);
        mesh.push(Vector3::new(bottom_radius * c, -0.5, bottom_radius * s), normal);
        mesh.push(Vector3::new(top_radius * c, 0.5, top_radius * s), normal);
    }
    for i in 0..segments {
        let (b0, t0, b1, t1) = (2 * i, 2 * i + 1, 2 * i + 2, 2 * i + 3);
        mesh.indices.extend_from_slice(&[b0, t0, b1, t0, t1, b1]);
    }

    for (y, radius, up) in [(0.5, top_radius, true), (-0.5, bottom_radius, false)] {
        let normal = Vector3::new(0.0, y * 2.0, 0.0);
        let centre = mesh.push(Vector3::new(0.0, y, 0.0), normal);
        for i in 0..=segments {
            let (c, s) = ring(i);
            mesh.push(Vector3::new(radius * c, y, radius * s), normal);
        }
        for i in 0..segments {
            let (a, b) = (centre + 1 + i, centre + 2 + i);
            if up {
                mesh.indices.extend_from_slice(&[centre, b, a]);
            } else {
                mesh.indices.extend_from_slice(&[centre, a, b]);
            }
        }
    }
    mesh
}

/// Latitude/longitude sphere of radius 1, from the +Y pole down to polar angle `phi_max`.
pub fn sphere(segments: u32, stacks: u32, phi_max: f32) -> MeshData {
    let rings = (0..=stacks).map(|i| (phi_max * i as f32 / stacks as f32, 0.0));
    lathe(rings, segments, 1.0)
}

/// Hemispherical caps joined by a straight section of `length`, along +Y.
pub fn capsule(radius: f32, length: f32, cap_stacks: u32, segments: u32) -> MeshData {
    let half = length / 2.0;
    let top = (0..=cap_stacks).map(move |i| (FRAC_PI_2 * i as f32 / cap_stacks as f32, half));
    let bottom = (0..=cap_stacks)
        .map(move |i| (FRAC_PI_2 + FRAC_PI_2 * i as f32 / cap_stacks as f32, -half));
    lathe(top.chain(bottom), segments, radius)
}

/// Sweeps rings of `(polar angle, y offset)` around +Y, top to bottom.
fn lathe(rings: impl Iterator<Item = (f32, f32)>, segments: u32, radius: f32) -> MeshData {
    let mut mesh = MeshData::default();
    let mut count = 0u32;
    for (phi, offset) in rings {
        for j in 0..=segments {
            let theta = TAU * j as f32 / segments as f32;
            let normal = Vector3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            mesh.push(normal * radius + Vector3::new(0.0, offset, 0.0), normal);
        }
        count += 1;
    }

    let stride = segments + 1;
    for i in 0..count.saturating_sub(1) {
        for j in 0..segments {
            let a = i * stride + j;
            let b = a + stride;
            let (c, d) = (a + 1, b + 1);
            mesh.indices.extend_from_slice(&[a, c, b, c, d, b]);
        }
    }
    mesh
}

pub fn disc(segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    for facing in [1.0_f32, -1.0] {
        let normal = Vector3::new(0.0, 0.0, facing);
        let centre = mesh.push(Vector3::new(0.0, 0.0, 0.0), normal);
        for i in 0..=segments {
            let theta = TAU * i as f32 / segments as f32;
            mesh.push(Vector3::new(theta.cos(), theta.sin(), 0.0), normal);
        }
        for i in 0..segments {
            let (a, b) = (centre + 1 + i, centre + 2 + i);
            if facing > 0.0 {
                mesh.indices.extend_from_slice(&[centre, a, b]);
            } else {
                mesh.indices.extend_from_slice(&[centre, b, a]);
            }
        }
    }
    mesh
}

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Each subdivision splits every face into four, projected back onto the sphere.
pub fn icosphere(subdivisions: u32) -> MeshData {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let corners = [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ]
    .map(|c| Vector3::from(c).normalize());

    let mut faces: Vec<[Vector3<f32>; 3]> = ICOSAHEDRON_FACES
        .iter()
        .map(|f| [corners[f[0]], corners[f[1]], corners[f[2]]])
        .collect();
    for _ in 0..subdivisions {
        faces = faces
            .into_iter()
            .flat_map(|[a, b, c]| {
                let ab = ((a + b) / 2.0).normalize();
                let bc = ((b + c) / 2.0).normalize();
                let ca = ((c + a) / 2.0).normalize();
                [[a, ab, ca], [ab, b, bc], [ca, bc, c], [ab, bc, ca]]
            })
            .collect();
    }

    let mut mesh = MeshData::default();
    for [a, mut b, mut c] in faces {
        let mut normal = (b - a).cross(c - a);
        if normal.dot(a + b + c) < 0.0 {
            std::mem::swap(&mut b, &mut c);
            normal = -normal;
        }
        let first = mesh.push(a, normal);
        mesh.push(b, normal);
        mesh.push(c, normal);
        mesh.indices.extend_from_slice(&[first, first + 1, first + 2]);
    }
    mesh
}

/// Square line grid on the XZ plane at height `y`, two vertices per segment.
pub fn grid_lines(
    size: f32,
    divisions: u32,
    y: f32,
    centre_colour: [f32; 4],
    colour: [f32; 4],
) -> Vec<FlatVertex> {
    let half = size / 2.0;
    let step = size / divisions as f32;
    let centre = divisions / 2;
    let mut lines = Vec::with_capacity((divisions as usize + 1) * 4);
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        let colour = if i == centre { centre_colour } else { colour };
        lines.extend_from_slice(&[
            FlatVertex { position: [-half, y, k], colour },
            FlatVertex { position: [half, y, k], colour },
            FlatVertex { position: [k, y, -half], colour },
            FlatVertex { position: [k, y, half], colour },
        ]);
    }
    lines
}

/// Builds every primitive once.
pub fn build_all() -> HashMap<Primitive, MeshData> {
    Primitive::ALL.iter().map(|p| (*p, p.build())).collect()
}
