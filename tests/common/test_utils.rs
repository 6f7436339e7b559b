#![allow(dead_code)]

#[cfg(feature = "integration-tests")]
use folio_ngin::flow::ImageTestResult;
use folio_ngin::{
    context::Context,
    flow::{FrameClock, GraphicsFlow, Out},
    render::Render,
};

pub(crate) struct State {
    frame_counter: u32,
    init_invocations: u32,
    update_invocations: u32,
    unmount_invocations: u32,
    pub dummy_state: String,
}

impl State {
    pub fn new() -> Self {
        Self {
            frame_counter: 0,
            init_invocations: 0,
            update_invocations: 0,
            unmount_invocations: 0,
            dummy_state: String::new(),
        }
    }

    pub fn frame(&mut self) {
        self.frame_counter += 1;
    }

    pub fn init(&mut self) {
        self.init_invocations += 1;
    }

    pub fn update(&mut self) {
        self.update_invocations += 1;
    }

    pub fn unmount(&mut self) {
        self.unmount_invocations += 1;
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    pub fn init_invocations(&self) -> u32 {
        self.init_invocations
    }

    pub fn update_invocations(&self) -> u32 {
        self.update_invocations
    }

    pub fn unmount_invocations(&self) -> u32 {
        self.unmount_invocations
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
pub(crate) struct FrameCounter(pub(crate) u32);

impl FrameCounter {
    pub(crate) fn frame(&self) -> u32 {
        self.0
    }

    pub(crate) fn progress(&mut self) {
        self.0 += 1;
    }
}

#[cfg(feature = "integration-tests")]
pub(crate) type Validate = dyn Fn(
    &Context,
    &mut FrameCounter,
    &mut image::ImageBuffer<image::Rgba<u8>, wgpu::BufferView>,
) -> Result<ImageTestResult, anyhow::Error>;

/// Wraps any flow with a setup hook and an assertion on the rendered frame.
#[cfg(feature = "integration-tests")]
pub(crate) struct TestRender<F> {
    pub(crate) inner: F,
    pub(crate) setup: Box<dyn Fn(&mut Context)>,
    pub(crate) validate: Box<Validate>,
}

#[cfg(feature = "integration-tests")]
impl<F: GraphicsFlow<FrameCounter>> TestRender<F> {
    pub(crate) fn new(
        inner: F,
        setup: impl Fn(&mut Context) + 'static,
        validate: impl Fn(
            &Context,
            &mut FrameCounter,
            &mut image::ImageBuffer<image::Rgba<u8>, wgpu::BufferView>,
        ) -> Result<ImageTestResult, anyhow::Error>
        + 'static,
    ) -> Self {
        Self {
            inner,
            setup: Box::new(setup),
            validate: Box::new(validate),
        }
    }
}

#[cfg(feature = "integration-tests")]
impl<F: GraphicsFlow<FrameCounter>> GraphicsFlow<FrameCounter> for TestRender<F> {
    fn on_init(&mut self, ctx: &mut Context, s: &mut FrameCounter) -> Out<FrameCounter> {
        let out = self.inner.on_init(ctx, s);
        if let Out::Configure(f) = out {
            f(ctx, s);
        }
        (self.setup)(ctx);
        Out::Empty
    }

    fn on_update(
        &mut self,
        ctx: &Context,
        state: &mut FrameCounter,
        clock: &FrameClock,
    ) -> Out<FrameCounter> {
        state.progress();
        self.inner.on_update(ctx, state, clock)
    }

    fn on_render(&self) -> Render<'_> {
        self.inner.on_render()
    }

    fn on_unmount(&mut self, ctx: &Context, state: &mut FrameCounter) {
        self.inner.on_unmount(ctx, state);
    }

    fn render_to_texture(
        &self,
        ctx: &Context,
        s: &mut FrameCounter,
        texture: &mut image::ImageBuffer<image::Rgba<u8>, wgpu::BufferView>,
    ) -> Result<ImageTestResult, anyhow::Error> {
        (self.validate)(ctx, s, texture)
    }
}

/// Draws nothing.
pub(crate) struct Empty;

impl<S> GraphicsFlow<S> for Empty {
    fn on_init(&mut self, _: &mut Context, _: &mut S) -> Out<S> {
        Out::Empty
    }

    fn on_update(&mut self, _: &Context, _: &mut S, _: &FrameClock) -> Out<S> {
        Out::Empty
    }

    fn on_render(&self) -> Render<'_> {
        Render::None
    }

    fn on_unmount(&mut self, _: &Context, _: &mut S) {}
}

pub(crate) fn to_pixel(colour: wgpu::Color) -> image::Rgba<u8> {
    let f_to_u8 = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    image::Rgba([
        f_to_u8(colour.r),
        f_to_u8(colour.g),
        f_to_u8(colour.b),
        f_to_u8(colour.a),
    ])
}

#[macro_export]
macro_rules! golden_image_test {
    ($graphics_elem:expr) => {{
        use crate::common::test_utils::FrameCounter;
        use folio_ngin::context::InitContext;
        use folio_ngin::flow::FlowConstructor;
        use folio_ngin::flow::GraphicsFlow;
        let model_constructor: FlowConstructor<FrameCounter> = Box::new(|ctx: InitContext| {
            Box::pin(async move {
                let g_flow: Box<dyn GraphicsFlow<FrameCounter>> = Box::new(($graphics_elem)(ctx));
                g_flow
            })
        });

        folio_ngin::flow::run(vec![model_constructor])
            .expect("Failed to run flow for integration test.");
    }};
}
