//! Surface, pipeline and per-frame upload for the flat-colored scene

use super::vertex::{Vertex, colors};

/// Vertex slots allocated up front; the buffer doubles when a frame outgrows it
const INITIAL_VERTEX_CAPACITY: usize = 4096;

/// Everything needed to draw one frame onto the canvas surface
pub struct RenderState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    /// Capacity of `vertex_buffer`, in vertices
    capacity: usize,
    /// Viewport size in pixels
    pub size: (u32, u32),
    /// Logical canvas size the scene is built in
    pub canvas: (f32, f32),
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        canvas: (f32, f32),
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("kart-dash-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let caps = surface.get_capabilities(adapter);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: pick_format(&caps.formats),
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = flat_pipeline(&device, config.format);
        let vertex_buffer = vertex_buffer(&device, INITIAL_VERTEX_CAPACITY);

        log::info!("Render pipeline ready ({}x{}, {:?})", width, height, config.format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            capacity: INITIAL_VERTEX_CAPACITY,
            size: (width, height),
            canvas,
        })
    }

    /// Reconfigure the surface; zero-sized requests are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw a scene given in canvas pixels
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        let clip = to_clip_space(self.canvas, vertices);
        if clip.len() > self.capacity {
            self.capacity = grown_capacity(self.capacity, clip.len());
            self.vertex_buffer = vertex_buffer(&self.device, self.capacity);
            log::debug!("Vertex buffer grown to {} vertices", self.capacity);
        }
        if !clip.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&clip));
        }

        let frame = self.surface.get_current_texture()?;
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            if !clip.is_empty() {
                pass.set_pipeline(&self.pipeline);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.draw(0..clip.len() as u32, 0..1);
            }
        }

        self.queue.submit([encoder.finish()]);
        frame.present();
        Ok(())
    }
}

/// Prefer an sRGB format so palette colors come out as authored
fn pick_format(formats: &[wgpu::TextureFormat]) -> wgpu::TextureFormat {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first().copied())
        .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb)
}

fn flat_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("flat_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("flat_layout"),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("flat_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        // Shapes are emitted with mixed winding
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

fn vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_vertices"),
        size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn grown_capacity(current: usize, needed: usize) -> usize {
    let mut capacity = current.max(1);
    while capacity < needed {
        capacity *= 2;
    }
    capacity
}

fn clear_color() -> wgpu::Color {
    let [r, g, b, _] = colors::BACKGROUND;
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

/// Map canvas pixels (origin top-left, y down) onto clip space
pub fn canvas_to_ndc(canvas: (f32, f32), x: f32, y: f32) -> (f32, f32) {
    let (w, h) = canvas;
    (x / w * 2.0 - 1.0, 1.0 - y / h * 2.0)
}

fn to_clip_space(canvas: (f32, f32), vertices: &[Vertex]) -> Vec<Vertex> {
    vertices
        .iter()
        .map(|v| {
            let (x, y) = canvas_to_ndc(canvas, v.position[0], v.position[1]);
            Vertex::new(x, y, v.color)
        })
        .collect()
}
