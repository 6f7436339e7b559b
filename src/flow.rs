//! Flow control and application event loop.
//!
//! A "flow" owns a part of what is on screen: it builds its GPU resources once,
//! advances with the frame clock and hands back a [`Render`] every frame. The engine
//! owns the window, the GPU [`Context`] and the batching of all flows' renders.
//!
//! # User-facing types
//!
//! - [`GraphicsFlow<S>`] is the trait for anything that updates and renders
//! - [`Out<S>`] lets a hook reconfigure the context
//! - [`FrameClock`] carries the frame delta and the elapsed time since start
//!
//! # Lifecycle Flow
//!
//! 1. The window and context are created; on failure a warning is logged and nothing renders
//! 2. Constructors resolve, then `on_init` runs once per flow
//! 3. Every frame: render all flows' batches, then `on_update` with the advanced clock
//! 4. When the loop exits, `on_unmount` runs and every GPU resource is dropped

use std::{fmt::Debug, iter, pin::Pin, sync::Arc};

use instant::{Duration, Instant};

#[cfg(feature = "integration-tests")]
use tokio::runtime::Runtime;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::Window,
};

use crate::{
    context::{Context, InitContext},
    data_structures::model::DrawModel,
    error::SceneError,
    render::{Batches, Render},
};

///
/// This is the Output Type for every lifecycle hook.
///
/// `Out::Configure` can be used to modify the Context during runtime, for instance to move the
/// camera or change the clear colour.
///
/// `Empty` is the default output used when nothing needs to change.
///
pub enum Out<S> {
    Configure(Box<dyn FnOnce(&mut Context, &mut S)>),
    Empty,
}

impl<S> Default for Out<S> {
    fn default() -> Self {
        Self::Empty
    }
}

#[cfg(feature = "integration-tests")]
pub enum ImageTestResult {
    Passed,
    Waiting,
    Failed,
}

/// Frame timing handed to [`GraphicsFlow::on_update`].
///
/// Flows that animate should derive their state from [`elapsed`](Self::elapsed) so
/// dropped frames never accumulate drift.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    started: Instant,
    last: Instant,
    dt: Duration,
    elapsed: Duration,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last: now,
            dt: Duration::ZERO,
            elapsed: Duration::ZERO,
            frames: 0,
        }
    }

    /// Advances to the current wall-clock time.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.dt = now - self.last;
        self.last = now;
        self.elapsed = now - self.started;
        self.frames += 1;
    }

    /// Advances by a fixed step regardless of wall-clock time.
    pub fn advance(&mut self, dt: Duration) {
        self.dt = dt;
        self.elapsed += dt;
        self.frames += 1;
    }

    pub fn dt(&self) -> Duration {
        self.dt
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for implementing a renderable part of the application.
///
/// # Lifecycle
///
/// 1. `on_init()` is called once when the flow is created; configure the context here
/// 2. `on_update()` is called every frame after rendering
/// 3. `on_render()` is called each frame and specifies how to render `self`
/// 4. `on_unmount()` is called once when the event loop exits
///
pub trait GraphicsFlow<S> {
    /// Initialize the flow and configure the context, such as the background colour,
    /// camera projection or lights.
    fn on_init(&mut self, ctx: &mut Context, state: &mut S) -> Out<S>;

    /// Update state every frame.
    fn on_update(&mut self, ctx: &Context, state: &mut S, clock: &FrameClock) -> Out<S>;

    /// Return renderable objects for this flow.
    ///
    /// The engine batches all flows' renders per pipeline.
    fn on_render(&self) -> Render<'_>;

    /// Stop all per-frame work. GPU resources are dropped right after.
    fn on_unmount(&mut self, ctx: &Context, state: &mut S);

    /// Inspect the rendered frame. Flows without expectations pass right away.
    #[cfg(feature = "integration-tests")]
    fn render_to_texture(
        &self,
        _ctx: &Context,
        _state: &mut S,
        _texture: &mut image::ImageBuffer<image::Rgba<u8>, wgpu::BufferView>,
    ) -> Result<ImageTestResult, anyhow::Error> {
        Ok(ImageTestResult::Passed)
    }
}

// Dummy impl to make wasm work
impl<State> Debug for dyn GraphicsFlow<State> + 'static {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GraphicsFlow")
    }
}

/// Type alias for a flow constructor (factory function).
///
/// A flow constructor takes an `InitContext` and asynchronously returns a
/// boxed `GraphicsFlow`. This allows lazy initialization and resource loading.
pub type FlowConstructor<S> =
    Box<dyn FnOnce(InitContext) -> Pin<Box<dyn Future<Output = Box<dyn GraphicsFlow<S>>>>>>;

/// Window title and, on the web, the id of the canvas to draw into.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub title: String,
    pub canvas_id: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            title: "folio-ngin".to_string(),
            canvas_id: "backdrop".to_string(),
        }
    }
}

/// Application state bundle: GPU context, app state, and surface status.
pub struct AppState<State: 'static> {
    pub(crate) ctx: Context,
    state: State,
    is_surface_configured: bool,
}

impl<State: Default> AppState<State> {
    async fn new(window: Arc<Window>) -> Result<Self, SceneError> {
        let ctx = Context::new(window).await?;
        Ok(Self {
            ctx,
            state: State::default(),
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.is_surface_configured = true;
            self.ctx.resize(width, height);
        }
    }

    #[cfg(feature = "integration-tests")]
    fn get_test_texture(&self, extent3d: wgpu::Extent3d) -> wgpu::Texture {
        self.ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Golden Image Test Output Texture"),
            size: extent3d,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.ctx.config.format,
            usage: wgpu::TextureUsages::COPY_SRC | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
    }

    #[cfg(feature = "integration-tests")]
    fn get_test_depth_texture(&self, extent3d: wgpu::Extent3d) -> wgpu::Texture {
        self.ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Golden Image Test Depth Texture"),
            size: extent3d,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: crate::data_structures::texture::DepthTexture::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
    }

    #[cfg(feature = "integration-tests")]
    fn get_with_height(&self) -> (u32, u32) {
        // Buffer rows must be multiples of 256 bytes
        let width = self.ctx.config.width.div_ceil(256) * 256;
        let height = self.ctx.config.height.div_ceil(256) * 256;
        (width, height)
    }

    #[cfg(feature = "integration-tests")]
    fn get_test_3d_extent(&self) -> wgpu::Extent3d {
        let (width, height) = self.get_with_height();
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        }
    }

    fn render(
        &mut self,
        graphics_flows: &mut [Box<dyn GraphicsFlow<State>>],
        #[cfg(feature = "integration-tests")] async_runtime: &Runtime,
        #[cfg(feature = "integration-tests")] event_loop: &EventLoopProxy<FlowEvent<State>>,
    ) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        #[cfg(not(feature = "integration-tests"))]
        let output = self.ctx.surface.get_current_texture()?;
        #[cfg(not(feature = "integration-tests"))]
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        #[cfg(feature = "integration-tests")]
        let (tex, depth) = {
            let extent3d = self.get_test_3d_extent();
            (
                self.get_test_texture(extent3d),
                self.get_test_depth_texture(extent3d),
            )
        };
        #[cfg(feature = "integration-tests")]
        let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
        #[cfg(feature = "integration-tests")]
        let depth_view = depth.create_view(&wgpu::TextureViewDescriptor::default());
        #[cfg(not(feature = "integration-tests"))]
        let depth_view = &self.ctx.depth_texture.view;
        #[cfg(feature = "integration-tests")]
        let depth_view = &depth_view;

        let mut encoder: wgpu::CommandEncoder =
            self.ctx
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });
        {
            let mut render_pass: wgpu::RenderPass<'_> =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        view: depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    occlusion_query_set: None,
                    timestamp_writes: None,
                    multiview_mask: None,
                });

            let mut batches = Batches::default();
            graphics_flows
                .iter()
                .for_each(|flow| flow.on_render().set_pipelines(&mut batches));

            let camera = &self.ctx.camera.bind_group;
            let light = &self.ctx.light.bind_group;

            render_pass.set_pipeline(&self.ctx.pipelines.basic);
            for instanced in batches.basics {
                if instanced.amount == 0 || instanced.instance.size() == 0 {
                    log::warn!("skipping a mesh batch with zero instances");
                    continue;
                }
                render_pass.set_vertex_buffer(1, instanced.instance.slice(..));
                render_pass.draw_mesh_instanced(
                    instanced.mesh,
                    0..instanced.amount as u32,
                    camera,
                    light,
                );
            }

            for (pipeline, flats) in [
                (&self.ctx.pipelines.lines, batches.lines),
                (&self.ctx.pipelines.points, batches.points),
            ] {
                render_pass.set_pipeline(pipeline);
                for flat in flats {
                    if flat.amount == 0 {
                        continue;
                    }
                    render_pass.set_bind_group(0, camera, &[]);
                    render_pass.set_bind_group(1, flat.group, &[]);
                    render_pass.set_vertex_buffer(0, flat.vertex.slice(..));
                    render_pass.draw(0..flat.amount as u32, 0..1);
                }
            }

            // Blended parts go last so they see everything opaque behind them
            render_pass.set_pipeline(&self.ctx.pipelines.transparent);
            for instanced in batches.transparents {
                if instanced.amount == 0 || instanced.instance.size() == 0 {
                    log::warn!("skipping a mesh batch with zero instances");
                    continue;
                }
                render_pass.set_vertex_buffer(1, instanced.instance.slice(..));
                render_pass.draw_mesh_instanced(
                    instanced.mesh,
                    0..instanced.amount as u32,
                    camera,
                    light,
                );
            }
        }

        #[cfg(feature = "integration-tests")]
        let output_buffer = {
            let u32_size = std::mem::size_of::<u32>() as u32;
            let (width, height) = self.get_with_height();
            let output_buffer = self.ctx.device.create_buffer(&wgpu::BufferDescriptor {
                size: (u32_size * width * height) as wgpu::BufferAddress,
                usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
                label: None,
                mapped_at_creation: false,
            });
            encoder.copy_texture_to_buffer(
                wgpu::TexelCopyTextureInfo {
                    aspect: wgpu::TextureAspect::All,
                    texture: &tex,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                },
                wgpu::TexelCopyBufferInfo {
                    buffer: &output_buffer,
                    layout: wgpu::TexelCopyBufferLayout {
                        offset: 0,
                        bytes_per_row: Some(u32_size * width),
                        rows_per_image: Some(height),
                    },
                },
                self.get_test_3d_extent(),
            );
            output_buffer
        };

        self.ctx.queue.submit(iter::once(encoder.finish()));

        #[cfg(feature = "integration-tests")]
        {
            use std::convert::identity;

            let fut_img = async {
                let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
                let buffer_slice = output_buffer.slice(..);
                buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
                    tx.send(result).unwrap();
                });
                self.ctx
                    .device
                    .poll(wgpu::PollType::Wait {
                        submission_index: None,
                        timeout: Some(Duration::from_secs(3)),
                    })
                    .unwrap();
                rx.receive().await.unwrap().unwrap();
                let data = buffer_slice.get_mapped_range();
                let (width, height) = self.get_with_height();
                image::ImageBuffer::<image::Rgba<u8>, _>::from_raw(width, height, data).unwrap()
            };
            let mut img: image::ImageBuffer<image::Rgba<u8>, wgpu::BufferView> =
                async_runtime.block_on(fut_img);
            let state = &mut self.state;
            let all_passed = graphics_flows
                .iter_mut()
                .map(|flow| flow.render_to_texture(&self.ctx, state, &mut img))
                .map(|res| match res {
                    Err(e) => panic!("{}", e),
                    Ok(ImageTestResult::Passed) => true,
                    Ok(ImageTestResult::Failed) => panic!("Assertion failed"),
                    Ok(ImageTestResult::Waiting) => false,
                })
                .all(identity);
            if all_passed {
                event_loop
                    .send_event(FlowEvent::Exit)
                    .expect("All assertions passed but the winit event-loop could not safely exit")
            }
        }

        #[cfg(not(feature = "integration-tests"))]
        output.present();
        Ok(())
    }
}

pub struct App<State: 'static> {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    proxy: EventLoopProxy<FlowEvent<State>>,
    config: RunConfig,
    state: Option<AppState<State>>,
    // This will hold the fully initialized flows once they are ready.
    graphics_flows: Vec<Box<dyn GraphicsFlow<State>>>,
    // This holds the constructors at the start.
    // We use Option to `take()` it after use.
    constructors: Option<Vec<FlowConstructor<State>>>,
    clock: FrameClock,
}

impl<State: 'static + Default> App<State> {
    fn new(
        event_loop: &EventLoop<FlowEvent<State>>,
        config: RunConfig,
        constructors: Vec<FlowConstructor<State>>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new()?,
            proxy: event_loop.create_proxy(),
            config,
            state: None,
            graphics_flows: Vec::new(),
            constructors: Some(constructors),
            clock: FrameClock::new(),
        })
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>, SceneError> {
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title(&self.config.title);

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            let canvas = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(&self.config.canvas_id))
                .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok())
                .ok_or_else(|| SceneError::MissingCanvas(self.config.canvas_id.clone()))?;
            window_attributes = window_attributes.with_canvas(Some(canvas));
        }

        Ok(Arc::new(event_loop.create_window(window_attributes)?))
    }

    fn initialize(
        &mut self,
        mut app_state: AppState<State>,
        flows: Vec<Box<dyn GraphicsFlow<State>>>,
    ) {
        self.graphics_flows = flows;
        let size = app_state.ctx.window.inner_size();
        app_state.resize(size.width, size.height);
        for flow in self.graphics_flows.iter_mut() {
            let out = flow.on_init(&mut app_state.ctx, &mut app_state.state);
            handle_flow_output(&mut app_state.ctx, &mut app_state.state, out);
        }
        log::info!("{} flow(s) initialized", self.graphics_flows.len());
        self.clock = FrameClock::new();
        app_state.ctx.window.request_redraw();
        self.state = Some(app_state);
    }
}

pub(crate) enum FlowEvent<State: 'static> {
    Initialized {
        state: AppState<State>,
        flows: Vec<Box<dyn GraphicsFlow<State>>>,
    },
    Exit,
}

impl<State> Debug for FlowEvent<State> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized { state: _, flows } => {
                f.debug_struct("Initialized").field("flows", flows).finish()
            }
            Self::Exit => f.write_str("Exit"),
        }
    }
}

impl<State: 'static + Default> ApplicationHandler<FlowEvent<State>> for App<State> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(constructors) = self.constructors.take() else {
            return;
        };

        let window = match self.create_window(event_loop) {
            Ok(window) => window,
            Err(e) => {
                log::warn!("backdrop disabled, rendering nothing: {e}");
                return;
            }
        };

        let init_future = async move {
            let app_state = AppState::new(window).await?;

            let flow_futures: Vec<_> = constructors
                .into_iter()
                // into() clones the Arcs inside Device and Queue, not the GPU objects
                .map(|constructor| constructor((&app_state.ctx).into()))
                .collect();
            let flows: Vec<_> = futures::future::join_all(flow_futures).await;
            Ok::<_, SceneError>((app_state, flows))
        };

        #[cfg(not(target_arch = "wasm32"))]
        match self.async_runtime.block_on(init_future) {
            Ok((app_state, flows)) => self.initialize(app_state, flows),
            Err(e) => log::warn!("backdrop disabled, rendering nothing: {e}"),
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match init_future.await {
                    Ok((state, flows)) => {
                        if proxy
                            .send_event(FlowEvent::Initialized { state, flows })
                            .is_err()
                        {
                            log::warn!("event loop closed before the backdrop was ready");
                        }
                    }
                    Err(e) => log::warn!("backdrop disabled, rendering nothing: {e}"),
                }
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: FlowEvent<State>) {
        match event {
            FlowEvent::Initialized { state, flows } => {
                // This is the message from our wasm `spawn_local`
                self.initialize(state, flows);
            }
            FlowEvent::Exit => event_loop.exit(),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                #[cfg(not(feature = "integration-tests"))]
                self.clock.tick();
                // Golden images need the same frame times on every run
                #[cfg(feature = "integration-tests")]
                self.clock.advance(Duration::from_millis(16));

                match state.render(
                    &mut self.graphics_flows,
                    #[cfg(feature = "integration-tests")]
                    &self.async_runtime,
                    #[cfg(feature = "integration-tests")]
                    &self.proxy,
                ) {
                    Ok(_) => {
                        for flow in self.graphics_flows.iter_mut() {
                            let out = flow.on_update(&state.ctx, &mut state.state, &self.clock);
                            handle_flow_output(&mut state.ctx, &mut state.state, out);
                        }
                        state.ctx.camera.write(&state.ctx.queue);
                    }
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut app_state) = self.state.take() {
            for flow in self.graphics_flows.iter_mut() {
                flow.on_unmount(&app_state.ctx, &mut app_state.state);
            }
            log::info!(
                "released {} flow(s) after {} frames",
                self.graphics_flows.len(),
                self.clock.frames()
            );
            // Flows hold buffers created from the device; drop them before the context.
            self.graphics_flows.clear();
        }
    }
}

fn handle_flow_output<State>(ctx: &mut Context, state: &mut State, out: Out<State>) {
    match out {
        Out::Configure(f) => f(ctx, state),
        Out::Empty => (),
    }
}

/// Installs the platform logger once; later calls do nothing.
pub fn init_logger() {
    static LOGGER: std::sync::Once = std::sync::Once::new();
    LOGGER.call_once(|| {
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Err(e) = env_logger::try_init() {
                println!("Warning: Could not initialize logger: {}", e);
            };
        }

        #[cfg(target_arch = "wasm32")]
        {
            if let Err(e) = console_log::init_with_level(log::Level::Info) {
                web_sys::console::warn_1(&format!("Could not initialize logger: {e}").into());
            }
        }
    });
}

fn build_event_loop<State: 'static>() -> anyhow::Result<EventLoop<FlowEvent<State>>> {
    #[cfg(all(feature = "integration-tests", target_os = "linux"))]
    let event_loop: EventLoop<FlowEvent<State>> = {
        use winit::platform::wayland::EventLoopBuilderExtWayland;

        winit::event_loop::EventLoop::with_user_event()
            .with_any_thread(true)
            .build()?
    };

    #[cfg(all(feature = "integration-tests", target_os = "windows"))]
    let event_loop: EventLoop<FlowEvent<State>> = {
        use winit::platform::windows::EventLoopBuilderExtWindows;

        winit::event_loop::EventLoop::with_user_event()
            .with_any_thread(true)
            .build()?
    };

    #[cfg(not(all(
        feature = "integration-tests",
        any(target_os = "linux", target_os = "windows")
    )))]
    let event_loop: EventLoop<FlowEvent<State>> = EventLoop::with_user_event().build()?;

    Ok(event_loop)
}

/// Runs the flows until the window closes. Returns once all resources are released.
pub fn run<State: 'static + Default>(
    constructors: Vec<FlowConstructor<State>>,
) -> anyhow::Result<()> {
    run_with(RunConfig::default(), constructors)
}

pub fn run_with<State: 'static + Default>(
    config: RunConfig,
    constructors: Vec<FlowConstructor<State>>,
) -> anyhow::Result<()> {
    init_logger();
    let event_loop = build_event_loop::<State>()?;
    let mut app: App<State> = App::new(&event_loop, config, constructors)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}

/// Handle to flows running inside the browser's event loop.
#[cfg(target_arch = "wasm32")]
pub struct RunningFlows<State: 'static> {
    proxy: EventLoopProxy<FlowEvent<State>>,
}

#[cfg(target_arch = "wasm32")]
impl<State: 'static> RunningFlows<State> {
    /// Exits the event loop; every flow is unmounted and its GPU resources dropped.
    pub fn unmount(self) {
        if self.proxy.send_event(FlowEvent::Exit).is_err() {
            log::debug!("event loop already closed");
        }
    }
}

/// Starts the flows without blocking, so the page keeps running its own code.
#[cfg(target_arch = "wasm32")]
pub fn spawn<State: 'static + Default>(
    config: RunConfig,
    constructors: Vec<FlowConstructor<State>>,
) -> anyhow::Result<RunningFlows<State>> {
    use winit::platform::web::EventLoopExtWebSys;

    init_logger();
    let event_loop = build_event_loop::<State>()?;
    let app: App<State> = App::new(&event_loop, config, constructors)?;
    let proxy = app.proxy.clone();
    event_loop.spawn_app(app);
    Ok(RunningFlows { proxy })
}
