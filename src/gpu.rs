use log::info;

use crate::error::{TableauError, TableauResult};

pub struct Gpu {
    pub surface: wgpu::Surface,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
}
impl Gpu {
    pub async fn init(window: &winit::window::Window) -> TableauResult<Self> {
        let instance = wgpu::Instance::new(wgpu::Backends::all());

        let surface = unsafe { instance.create_surface(window) };

        let adapter = instance.request_adapter(
            &wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            }
        ).await.ok_or(TableauError::NoAdapter)?;

        let info = adapter.get_info();
        info!("using {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Tableau Device"),
                features: wgpu::Features::empty(),
                limits: wgpu::Limits::default(),
            },
            None,
        ).await?;

        let format = surface.get_supported_formats(&adapter)
            .first()
            .copied()
            .ok_or(TableauError::NoSurfaceFormat)?;

        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
        };

        surface.configure(&device, &config);

        Ok(
            Self {
                surface,
                device,
                queue,
                config,
                size,
            }
        )
    }

    pub fn resize_window(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }
}
