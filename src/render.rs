use crate::constants::{CLEAR_COLOR, POINT_SIZE};
use glam::Mat4;
use web_sys as web;

mod points;
use points::{create_instance_buffers, create_points_resources, PointsResources, PointsUniforms};

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    points: PointsResources,
    // instances written by the last upload
    instance_count: u32,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    point_size: f32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, capacity: usize) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let points = create_points_resources(&device, format, capacity);
        log::info!(
            "[gpu] surface {}x{} {:?}, room for {} points",
            width,
            height,
            format,
            points.capacity
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            points,
            instance_count: 0,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
            point_size: POINT_SIZE,
        })
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Copy this frame's flat xyz positions and rgb colors to the GPU.
    /// Both slices hold three floats per point.
    pub fn upload(&mut self, positions: &[f32], colors: &[f32]) {
        let count = (positions.len().min(colors.len()) / 3) as u32;
        if count as usize > self.points.capacity {
            let (p, c) = create_instance_buffers(&self.device, count as usize);
            self.points.positions = p;
            self.points.colors = c;
            self.points.capacity = count as usize;
            log::info!("[gpu] grew point buffers to {}", count);
        }
        let n = count as usize * 3;
        self.queue
            .write_buffer(&self.points.positions, 0, bytemuck::cast_slice(&positions[..n]));
        self.queue
            .write_buffer(&self.points.colors, 0, bytemuck::cast_slice(&colors[..n]));
        self.instance_count = count;
    }

    pub fn render(&mut self, view: Mat4, proj: Mat4) -> Result<(), wgpu::SurfaceError> {
        let u = PointsUniforms {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            point_size: self.point_size,
            _pad: [0.0; 3],
        };
        self.queue
            .write_buffer(&self.points.uniform_buffer, 0, bytemuck::bytes_of(&u));

        let frame = self.surface.get_current_texture()?;
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("points_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if self.instance_count > 0 {
                rpass.set_pipeline(&self.points.pipeline);
                rpass.set_bind_group(0, &self.points.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.points.positions.slice(..));
                rpass.set_vertex_buffer(1, self.points.colors.slice(..));
                rpass.draw(0..6, 0..self.instance_count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
