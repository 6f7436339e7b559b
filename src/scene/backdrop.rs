//! The render flow that puts a [`ProceduralSceneAnimator`] on screen.

use std::collections::HashMap;

use cgmath::{Matrix4, SquareMatrix};
use wgpu::util::DeviceExt;

use crate::{
    context::{Context, InitContext},
    data_structures::{
        geometry::{Primitive, grid_lines},
        model::{FlatVertex, Mesh, srgb},
    },
    flow::{FlowConstructor, FrameClock, GraphicsFlow, Out},
    pipelines::flat::{FlatObject, FlatUniform},
    render::{Flat, Instanced, Render},
    scene::{
        animator::ProceduralSceneAnimator,
        layout::SceneConfig,
        object::SceneObjectKind,
        parts::{PartBatch, batch_parts},
    },
};

struct GpuBatch {
    batch: PartBatch,
    buffer: wgpu::Buffer,
}

/// A flat object that follows the pose of one scene object.
struct Attached {
    object: Option<usize>,
    opacity: f32,
    flat: FlatObject,
}

impl Attached {
    fn uniform(&self, animator: &ProceduralSceneAnimator) -> FlatUniform {
        let model = self
            .object
            .and_then(|i| animator.pose(i))
            .map(|pose| pose.world().to_matrix())
            .unwrap_or_else(Matrix4::identity);
        FlatUniform::new(model, [1.0, 1.0, 1.0, self.opacity])
    }
}

pub struct Backdrop {
    config: SceneConfig,
    animator: ProceduralSceneAnimator,
    meshes: HashMap<Primitive, Mesh>,
    batches: Vec<GpuBatch>,
    particles: Attached,
    stars: Attached,
    grid: Attached,
}

impl Backdrop {
    pub fn new(ctx: InitContext, config: SceneConfig) -> Self {
        let animator = ProceduralSceneAnimator::mount_random(&config);
        Self::with_animator(ctx, config, animator)
    }

    /// Uses an animator mounted by the caller, e.g. from a seeded generator.
    pub fn with_animator(
        ctx: InitContext,
        config: SceneConfig,
        animator: ProceduralSceneAnimator,
    ) -> Self {
        let batches: Vec<GpuBatch> = batch_parts(animator.objects())
            .into_iter()
            .map(|batch| {
                let instances = batch.instances(animator.poses());
                let buffer = ctx
                    .device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some(&format!("{} Instance Buffer", batch.primitive.name())),
                        contents: bytemuck::cast_slice(&instances),
                        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                    });
                GpuBatch { batch, buffer }
            })
            .collect();

        let mut meshes = HashMap::new();
        for gpu in &batches {
            let primitive = gpu.batch.primitive;
            meshes.entry(primitive).or_insert_with(|| {
                Mesh::from_data(&ctx.device, primitive.name(), &primitive.build())
            });
        }

        let first = |kind| animator.indices_of(kind).first().copied();

        let [r, g, b] = srgb(config.particles.colour);
        let particles = attach(
            &ctx,
            &animator,
            "Particles",
            first(SceneObjectKind::ParticleField),
            config.particles.opacity,
            &animator.particles().vertices([r, g, b, 1.0]),
        );
        let stars = attach(
            &ctx,
            &animator,
            "Stars",
            first(SceneObjectKind::Starfield),
            config.stars.opacity,
            &animator.stars().vertices([1.0; 4]),
        );
        let grid = &config.grid;
        let [cr, cg, cb] = srgb(grid.centre_colour);
        let [lr, lg, lb] = srgb(grid.colour);
        let grid = attach(
            &ctx,
            &animator,
            "Grid",
            first(SceneObjectKind::GridFloor),
            1.0,
            &grid_lines(
                grid.size,
                grid.divisions,
                0.0,
                [cr, cg, cb, 1.0],
                [lr, lg, lb, 1.0],
            ),
        );

        log::info!(
            "backdrop ready: {} meshes in {} batches",
            meshes.len(),
            batches.len()
        );

        Self {
            config,
            animator,
            meshes,
            batches,
            particles,
            stars,
            grid,
        }
    }

    pub fn animator(&self) -> &ProceduralSceneAnimator {
        &self.animator
    }

    fn write(&self, queue: &wgpu::Queue) {
        for gpu in &self.batches {
            let instances = gpu.batch.instances(self.animator.poses());
            queue.write_buffer(&gpu.buffer, 0, bytemuck::cast_slice(&instances));
        }
        for attached in [&self.particles, &self.stars, &self.grid] {
            attached.flat.write(queue, attached.uniform(&self.animator));
        }
    }

    fn instanced(&self, transparent: bool) -> Vec<Instanced<'_>> {
        self.batches
            .iter()
            .filter(|gpu| gpu.batch.transparent == transparent)
            .filter_map(|gpu| {
                Some(Instanced {
                    instance: &gpu.buffer,
                    mesh: self.meshes.get(&gpu.batch.primitive)?,
                    amount: gpu.batch.len(),
                })
            })
            .collect()
    }
}

fn attach(
    ctx: &InitContext,
    animator: &ProceduralSceneAnimator,
    label: &str,
    object: Option<usize>,
    opacity: f32,
    vertices: &[FlatVertex],
) -> Attached {
    if object.is_none() {
        log::debug!("{label} has no scene object, drawn at the origin");
    }
    let attached = Attached {
        object,
        opacity,
        flat: FlatObject::new(
            &ctx.device,
            &ctx.flat_layout,
            label,
            vertices,
            FlatUniform::default(),
        ),
    };
    attached.flat.write(&ctx.queue, attached.uniform(animator));
    attached
}

fn flat(attached: &Attached) -> Flat<'_> {
    Flat {
        vertex: &attached.flat.vertex_buffer,
        group: &attached.flat.bind_group,
        amount: attached.flat.amount,
    }
}

impl<S> GraphicsFlow<S> for Backdrop {
    fn on_init(&mut self, ctx: &mut Context, _state: &mut S) -> Out<S> {
        ctx.clear_colour = self.config.clear_colour;
        ctx.set_lights(&self.config.lights);
        ctx.set_camera_config(&self.config.camera);
        Out::Empty
    }

    fn on_update(&mut self, ctx: &Context, _state: &mut S, clock: &FrameClock) -> Out<S> {
        if !self.animator.tick(clock.elapsed()) {
            return Out::Empty;
        }
        self.write(&ctx.queue);
        let camera = self.animator.camera();
        Out::Configure(Box::new(move |ctx, _| ctx.camera.camera = camera))
    }

    fn on_render(&self) -> Render<'_> {
        Render::Composed(vec![
            Render::Defaults(self.instanced(false)),
            Render::Lines(flat(&self.grid)),
            Render::Points(flat(&self.stars)),
            Render::Points(flat(&self.particles)),
            Render::Transparents(self.instanced(true)),
        ])
    }

    fn on_unmount(&mut self, _ctx: &Context, _state: &mut S) {
        self.animator.unmount();
    }
}

/// A constructor for [`crate::flow::run`] that mounts the backdrop described by `config`.
pub fn constructor<S: 'static>(config: SceneConfig) -> FlowConstructor<S> {
    Box::new(move |ctx| {
        Box::pin(async move { Box::new(Backdrop::new(ctx, config)) as Box<dyn GraphicsFlow<S>> })
    })
}
