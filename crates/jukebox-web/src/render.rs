use jukebox_core::{AFTERIMAGE_DAMP, BLOOM_THRESHOLD};
use web_sys as web;

pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

/// Uniform block shared by every post pass.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    time: f32,
    exposure: f32,
    blur_dir: [f32; 2],
    bloom_strength: f32,
    threshold: f32,
    damp: f32,
    _pad: [f32; 3],
}

struct OffscreenTargets {
    scene_view: wgpu::TextureView,
    accum_a_view: wgpu::TextureView,
    accum_b_view: wgpu::TextureView,
    bloom_a_view: wgpu::TextureView,
    bloom_b_view: wgpu::TextureView,
}

struct BindGroups {
    backdrop: wgpu::BindGroup,
    scene: wgpu::BindGroup,
    accum_a: wgpu::BindGroup,
    accum_b: wgpu::BindGroup,
    accum_a_prev: wgpu::BindGroup,
    accum_b_prev: wgpu::BindGroup,
    bloom_a_h: wgpu::BindGroup,
    bloom_b_v: wgpu::BindGroup,
    bloom_a_only: wgpu::BindGroup,
}

/// WebGPU chain for the jukebox: procedural backdrop, afterimage
/// accumulation, threshold bloom, exposure composite. Exposure and bloom
/// strength are fed in per frame from the scene state.
pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    linear_sampler: wgpu::Sampler,
    uniform_buffer: wgpu::Buffer,
    blur_h_buffer: wgpu::Buffer,
    blur_v_buffer: wgpu::Buffer,
    bgl0: wgpu::BindGroupLayout,
    bgl1: wgpu::BindGroupLayout,

    scene_pipeline: wgpu::RenderPipeline,
    afterimage_pipeline: wgpu::RenderPipeline,
    bright_pipeline: wgpu::RenderPipeline,
    blur_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,

    targets: OffscreenTargets,
    bind_groups: BindGroups,

    width: u32,
    height: u32,
    time_accum: f32,
    exposure: f32,
    bloom_strength: f32,
    // Afterimage history ping-pong; flips every frame.
    accum_flip: bool,
}

const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

fn create_color_view(
    device: &wgpu::Device,
    label: &str,
    width: u32,
    height: u32,
) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: HDR_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_targets(device: &wgpu::Device, width: u32, height: u32) -> OffscreenTargets {
    // Bloom runs at half resolution like most glow chains.
    let bw = (width.max(1) / 2).max(1);
    let bh = (height.max(1) / 2).max(1);
    OffscreenTargets {
        scene_view: create_color_view(device, "scene_tex", width, height),
        accum_a_view: create_color_view(device, "accum_a", width, height),
        accum_b_view: create_color_view(device, "accum_b", width, height),
        bloom_a_view: create_color_view(device, "bloom_a", bw, bh),
        bloom_b_view: create_color_view(device, "bloom_b", bw, bh),
    }
}

fn make_post_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    frag_entry: &str,
    color_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("post_pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_fullscreen"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(frag_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

fn make_bind_groups(
    device: &wgpu::Device,
    bgl0: &wgpu::BindGroupLayout,
    bgl1: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    uniform_buffer: &wgpu::Buffer,
    blur_h_buffer: &wgpu::Buffer,
    blur_v_buffer: &wgpu::Buffer,
    targets: &OffscreenTargets,
) -> BindGroups {
    let bg0 = |label: &str, view: &wgpu::TextureView, buf: &wgpu::Buffer| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: buf.as_entire_binding(),
                },
            ],
        })
    };
    let bg1 = |label: &str, view: &wgpu::TextureView| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: bgl1,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    };
    BindGroups {
        // The backdrop pass only reads the uniforms, but group 0 always
        // carries a texture; bloom_b is never an attachment of that pass.
        backdrop: bg0("bg_backdrop", &targets.bloom_b_view, uniform_buffer),
        scene: bg0("bg_scene", &targets.scene_view, uniform_buffer),
        accum_a: bg0("bg_accum_a", &targets.accum_a_view, uniform_buffer),
        accum_b: bg0("bg_accum_b", &targets.accum_b_view, uniform_buffer),
        accum_a_prev: bg1("bg_accum_a_prev", &targets.accum_a_view),
        accum_b_prev: bg1("bg_accum_b_prev", &targets.accum_b_view),
        bloom_a_h: bg0("bg_bloom_a_h", &targets.bloom_a_view, blur_h_buffer),
        bloom_b_v: bg0("bg_bloom_b_v", &targets.bloom_b_view, blur_v_buffer),
        bloom_a_only: bg1("bg_bloom_a_only", &targets.bloom_a_view),
    }
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
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
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {e:?}"))?;

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
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let uniform_size = std::mem::size_of::<PostUniforms>() as u64;
        let make_uniform = |label: &str| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: uniform_size,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let uniform_buffer = make_uniform("post_uniforms");
        // Separate buffers per blur direction so one submission can encode
        // both passes without the last uniform write winning.
        let blur_h_buffer = make_uniform("post_uniforms_blur_h");
        let blur_v_buffer = make_uniform("post_uniforms_blur_v");

        let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl0"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });
        let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl1"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pl_single = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_single"),
            bind_group_layouts: &[&bgl0],
            push_constant_ranges: &[],
        });
        let pl_pair = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_pair"),
            bind_group_layouts: &[&bgl0, &bgl1],
            push_constant_ranges: &[],
        });

        let scene_pipeline = make_post_pipeline(&device, &pl_single, &shader, "fs_scene", HDR_FORMAT);
        let afterimage_pipeline =
            make_post_pipeline(&device, &pl_pair, &shader, "fs_afterimage", HDR_FORMAT);
        let bright_pipeline = make_post_pipeline(&device, &pl_single, &shader, "fs_bright", HDR_FORMAT);
        let blur_pipeline = make_post_pipeline(&device, &pl_single, &shader, "fs_blur", HDR_FORMAT);
        let composite_pipeline = make_post_pipeline(&device, &pl_pair, &shader, "fs_composite", format);

        let targets = create_targets(&device, width, height);
        let bind_groups = make_bind_groups(
            &device,
            &bgl0,
            &bgl1,
            &linear_sampler,
            &uniform_buffer,
            &blur_h_buffer,
            &blur_v_buffer,
            &targets,
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            linear_sampler,
            uniform_buffer,
            blur_h_buffer,
            blur_v_buffer,
            bgl0,
            bgl1,
            scene_pipeline,
            afterimage_pipeline,
            bright_pipeline,
            blur_pipeline,
            composite_pipeline,
            targets,
            bind_groups,
            width,
            height,
            time_accum: 0.0,
            exposure: 1.0,
            bloom_strength: 0.0,
            accum_flip: false,
        })
    }

    /// Per-frame outputs of the scene update loop.
    pub fn set_visuals(&mut self, exposure: f32, bloom_strength: f32) {
        self.exposure = exposure;
        self.bloom_strength = bloom_strength.max(0.0);
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
            self.targets = create_targets(&self.device, width, height);
            self.bind_groups = make_bind_groups(
                &self.device,
                &self.bgl0,
                &self.bgl1,
                &self.linear_sampler,
                &self.uniform_buffer,
                &self.blur_h_buffer,
                &self.blur_v_buffer,
                &self.targets,
            );
        }
    }

    fn write_uniforms(&self) {
        let u = |blur_dir: [f32; 2]| PostUniforms {
            resolution: [self.width as f32 / 2.0, self.height as f32 / 2.0],
            time: self.time_accum,
            exposure: self.exposure,
            blur_dir,
            bloom_strength: self.bloom_strength,
            threshold: BLOOM_THRESHOLD,
            damp: AFTERIMAGE_DAMP,
            _pad: [0.0; 3],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u([0.0, 0.0])));
        self.queue
            .write_buffer(&self.blur_h_buffer, 0, bytemuck::bytes_of(&u([1.0, 0.0])));
        self.queue
            .write_buffer(&self.blur_v_buffer, 0, bytemuck::bytes_of(&u([0.0, 1.0])));
    }

    fn blit(
        encoder: &mut wgpu::CommandEncoder,
        label: &str,
        target: &wgpu::TextureView,
        pipeline: &wgpu::RenderPipeline,
        bg0: &wgpu::BindGroup,
        bg1: Option<&wgpu::BindGroup>,
    ) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bg0, &[]);
        if let Some(g1) = bg1 {
            rpass.set_bind_group(1, g1, &[]);
        }
        rpass.draw(0..3, 0..1);
    }

    pub fn render(&mut self, dt_sec: f32) -> Result<(), wgpu::SurfaceError> {
        self.time_accum += dt_sec.max(0.0);
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.write_uniforms();

        let (accum_cur_view, accum_cur_bg0, accum_prev_bg1) = if self.accum_flip {
            (
                &self.targets.accum_b_view,
                &self.bind_groups.accum_b,
                &self.bind_groups.accum_a_prev,
            )
        } else {
            (
                &self.targets.accum_a_view,
                &self.bind_groups.accum_a,
                &self.bind_groups.accum_b_prev,
            )
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Backdrop into the scene target.
        Self::blit(
            &mut encoder,
            "scene_pass",
            &self.targets.scene_view,
            &self.scene_pipeline,
            &self.bind_groups.backdrop,
            None,
        );
        // Afterimage: blend the fresh scene over the decayed history.
        Self::blit(
            &mut encoder,
            "afterimage",
            accum_cur_view,
            &self.afterimage_pipeline,
            &self.bind_groups.scene,
            Some(accum_prev_bg1),
        );
        // Threshold bright pass into the half-res bloom chain.
        Self::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            &self.bright_pipeline,
            accum_cur_bg0,
            None,
        );
        Self::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            &self.blur_pipeline,
            &self.bind_groups.bloom_a_h,
            None,
        );
        Self::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            &self.blur_pipeline,
            &self.bind_groups.bloom_b_v,
            None,
        );
        // Composite with exposure and bloom strength to the swapchain.
        Self::blit(
            &mut encoder,
            "composite",
            &view,
            &self.composite_pipeline,
            accum_cur_bg0,
            Some(&self.bind_groups.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        self.accum_flip = !self.accum_flip;
        Ok(())
    }
}
