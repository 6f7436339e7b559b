//! Render composition and pipeline batching.
//!
//! Flows describe what they want drawn with a [`Render`] each frame. The engine sorts
//! those into one batch per pipeline (opaque, transparent, points, lines) so every
//! pipeline is bound once per frame.

use crate::data_structures::model::Mesh;

/// A mesh drawn `amount` times from an instance buffer.
pub struct Instanced<'a> {
    pub instance: &'a wgpu::Buffer,
    pub mesh: &'a Mesh,
    pub amount: usize,
}

/// Unlit vertices with their per-object bind group.
pub struct Flat<'a> {
    pub vertex: &'a wgpu::Buffer,
    pub group: &'a wgpu::BindGroup,
    pub amount: usize,
}

/// Specifies how a flow should be rendered.
///
/// - `None` renders nothing
/// - `Default(Instanced)` / `Defaults(Vec<Instanced>)` render opaque lit meshes
/// - `Transparent(Instanced)` / `Transparents(Vec<Instanced>)` render blended lit meshes
/// - `Points(Flat)` renders a point list, `Lines(Flat)` a line list
/// - `Composed(Vec<Render>)` recursively renders a composition of renders
pub enum Render<'a> {
    None,
    Default(Instanced<'a>),
    Defaults(Vec<Instanced<'a>>),
    Transparent(Instanced<'a>),
    Transparents(Vec<Instanced<'a>>),
    Points(Flat<'a>),
    Lines(Flat<'a>),
    Composed(Vec<Render<'a>>),
}

/// Draw lists collected from every flow for one frame.
#[derive(Default)]
pub(crate) struct Batches<'a> {
    pub basics: Vec<Instanced<'a>>,
    pub transparents: Vec<Instanced<'a>>,
    pub points: Vec<Flat<'a>>,
    pub lines: Vec<Flat<'a>>,
}

impl<'a> Render<'a> {
    pub(crate) fn set_pipelines(self, batches: &mut Batches<'a>) {
        match self {
            Render::Default(instanced) => batches.basics.push(instanced),
            Render::Defaults(mut vec) => batches.basics.append(&mut vec),
            Render::Transparent(instanced) => batches.transparents.push(instanced),
            Render::Transparents(mut vec) => batches.transparents.append(&mut vec),
            Render::Points(flat) => batches.points.push(flat),
            Render::Lines(flat) => batches.lines.push(flat),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.set_pipelines(batches)),
            Render::None => (),
        }
    }

    /// Number of draw calls this render expands to.
    pub fn draw_count(&self) -> usize {
        match self {
            Render::None => 0,
            Render::Default(_) | Render::Transparent(_) | Render::Points(_) | Render::Lines(_) => 1,
            Render::Defaults(vec) | Render::Transparents(vec) => vec.len(),
            Render::Composed(renders) => renders.iter().map(Render::draw_count).sum(),
        }
    }
}
