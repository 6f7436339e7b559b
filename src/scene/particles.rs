//! Randomly sampled point sets: the drifting data particles and the star shell.

use std::f32::consts::TAU;

use rand::Rng;

use crate::data_structures::model::FlatVertex;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleField {
    positions: Vec<[f32; 3]>,
}

impl ParticleField {
    /// `count` points uniform in the axis-aligned cube of edge `extent` centred on the origin.
    pub fn sample<R: Rng + ?Sized>(count: usize, extent: f32, rng: &mut R) -> Self {
        let mut coord = || (rng.r#gen::<f32>() - 0.5) * extent;
        let positions = (0..count).map(|_| [coord(), coord(), coord()]).collect();
        Self { positions }
    }

    /// `count` points with uniformly distributed directions, at distances in
    /// `[radius, radius + depth]` from the origin.
    pub fn shell<R: Rng + ?Sized>(count: usize, radius: f32, depth: f32, rng: &mut R) -> Self {
        let positions = (0..count)
            .map(|_| {
                let r = radius + rng.r#gen::<f32>() * depth;
                let polar = (1.0 - 2.0 * rng.r#gen::<f32>()).clamp(-1.0, 1.0).acos();
                let azimuth = rng.r#gen::<f32>() * TAU;
                [
                    r * polar.sin() * azimuth.sin(),
                    r * polar.cos(),
                    r * polar.sin() * azimuth.cos(),
                ]
            })
            .collect();
        Self { positions }
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn vertices(&self, colour: [f32; 4]) -> Vec<FlatVertex> {
        self.positions
            .iter()
            .map(|&position| FlatVertex { position, colour })
            .collect()
    }
}
