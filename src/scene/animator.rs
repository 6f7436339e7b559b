use std::time::Duration;

use rand::Rng;

use crate::camera::{Camera, OrbitCamera};
use crate::scene::layout::SceneConfig;
use crate::scene::object::{ObjectPose, SceneObject, SceneObjectKind, UpdateRule};
use crate::scene::particles::ParticleField;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Unmounted,
}

/// Drives every object of the backdrop from elapsed time since mount.
///
/// The animator holds no GPU state; the render flow reads [`poses`](Self::poses) and
/// [`camera`](Self::camera) after each [`tick`](Self::tick).
#[derive(Clone, Debug)]
pub struct ProceduralSceneAnimator {
    objects: Vec<SceneObject>,
    poses: Vec<ObjectPose>,
    particles: ParticleField,
    stars: ParticleField,
    orbit: OrbitCamera,
    elapsed: Duration,
    ticks: u64,
    lifecycle: Lifecycle,
}

impl ProceduralSceneAnimator {
    /// Builds the fixed objects and samples particles and stars from `rng`.
    pub fn mount<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Self {
        let objects: Vec<SceneObject> =
            config.layout.placements.iter().map(|p| p.object()).collect();
        let particles =
            ParticleField::sample(config.particles.count, config.particles.extent, rng);
        let stars = ParticleField::shell(
            config.stars.count,
            config.stars.radius,
            config.stars.depth,
            rng,
        );
        let poses = objects.iter().map(|o| o.pose_at(0.0)).collect();
        log::info!(
            "scene mounted: {} objects, {} particles, {} stars",
            objects.len(),
            particles.len(),
            stars.len()
        );

        Self {
            objects,
            poses,
            particles,
            stars,
            orbit: OrbitCamera::new(&config.camera),
            elapsed: Duration::ZERO,
            ticks: 0,
            lifecycle: Lifecycle::Active,
        }
    }

    /// Samples with the thread-local generator.
    pub fn mount_random(config: &SceneConfig) -> Self {
        Self::mount(config, &mut rand::thread_rng())
    }

    /// Moves every object to its pose at `elapsed`. Returns `false`, changing
    /// nothing, once unmounted.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if self.lifecycle == Lifecycle::Unmounted {
            return false;
        }
        let t = elapsed.as_secs_f32();
        for (pose, object) in self.poses.iter_mut().zip(&self.objects) {
            *pose = object.pose_at(t);
        }
        self.orbit.update(elapsed);
        self.elapsed = elapsed;
        self.ticks += 1;
        true
    }

    /// Stops all per-frame work. Idempotent.
    pub fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::Active {
            log::info!("scene unmounted after {} ticks", self.ticks);
        }
        self.lifecycle = Lifecycle::Unmounted;
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    /// Frame callbacks still registered: one per animated object plus the orbit
    /// camera while mounted, none after.
    pub fn active_subscriptions(&self) -> usize {
        match self.lifecycle {
            Lifecycle::Active => {
                1 + self
                    .objects
                    .iter()
                    .filter(|o| o.rule != UpdateRule::Static || o.float.is_some())
                    .count()
            }
            Lifecycle::Unmounted => 0,
        }
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn poses(&self) -> &[ObjectPose] {
        &self.poses
    }

    pub fn pose(&self, index: usize) -> Option<&ObjectPose> {
        self.poses.get(index)
    }

    /// Indices of all objects of `kind`, ignoring variant payloads.
    pub fn indices_of(&self, kind: SceneObjectKind) -> Vec<usize> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, o)| std::mem::discriminant(&o.kind) == std::mem::discriminant(&kind))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn stars(&self) -> &ParticleField {
        &self.stars
    }

    pub fn orbit(&self) -> &OrbitCamera {
        &self.orbit
    }

    pub fn camera(&self) -> Camera {
        self.orbit.camera()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
