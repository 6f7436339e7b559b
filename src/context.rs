use std::sync::Arc;

use winit::window::Window;

use crate::{
    camera::{CameraConfig, CameraResources, Projection},
    data_structures::texture,
    error::SceneError,
    pipelines::{
        Pipelines,
        light::{Light, LightResources, LightUniform},
    },
};

/// Owns the surface, device, shared uniforms and pipelines. Dropping it releases
/// every GPU resource the renderer created.
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: texture::DepthTexture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub camera: CameraResources,
    pub light: LightResources,
    pub pipelines: Pipelines,
    pub clear_colour: wgpu::Color,
}

impl Context {
    /// Fails when the platform offers no usable GPU; callers degrade to drawing nothing.
    pub async fn new(window: Arc<Window>) -> Result<Self, SceneError> {
        let size = window.inner_size();

        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            ..wgpu::InstanceDescriptor::new_without_display_handle()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("device and queue");
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                // WebGL doesn't support all of wgpu's features, so if
                // we're building for the web we'll have to disable some.
                required_limits: if cfg!(target_arch = "wasm32") {
                    wgpu::Limits::downlevel_webgl2_defaults()
                } else {
                    wgpu::Limits::default()
                },
                ..Default::default()
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Colours are converted to linear on the CPU, so prefer an sRGB surface.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(SceneError::NoSurfaceFormat)?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let camera = CameraResources::new(
            &device,
            &CameraConfig::default(),
            config.width,
            config.height,
        );
        let light = LightResources::new(&device, LightUniform::from_lights(&[]));
        let pipelines = Pipelines::new(
            &device,
            config.format,
            &camera.bind_group_layout,
            &light.bind_group_layout,
        );

        let depth_texture = texture::DepthTexture::new(
            &device,
            [config.width, config.height],
            "depth_texture",
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            camera,
            light,
            pipelines,
            window,
            depth_texture,
            clear_colour: wgpu::Color::BLACK,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.camera.projection.resize(width, height);
        self.depth_texture =
            texture::DepthTexture::new(&self.device, [width, height], "depth_texture");
    }

    pub fn set_lights(&mut self, lights: &[Light]) {
        self.light.write(&self.queue, LightUniform::from_lights(lights));
    }

    pub fn set_camera_config(&mut self, config: &CameraConfig) {
        self.camera.projection = Projection::new(
            self.config.width,
            self.config.height,
            config.fovy,
            config.znear,
            config.zfar,
        );
        self.camera.camera = crate::camera::OrbitCamera::new(config).camera();
        self.camera.write(&self.queue);
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

/// What a flow constructor gets to build its GPU resources with.
///
/// The clones in `from` share the internal Arcs of the device, queue and layout.
#[derive(Clone)]
pub struct InitContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub format: wgpu::TextureFormat,
    pub flat_layout: wgpu::BindGroupLayout,
}

impl From<&Context> for InitContext {
    fn from(ctx: &Context) -> Self {
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            format: ctx.config.format,
            flat_layout: ctx.pipelines.flat_layout.clone(),
        }
    }
}
