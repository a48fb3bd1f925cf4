//! Application state and event loop
//!
//! winit callbacks only queue [`InputEvent`]s. All simulation work happens
//! on `RedrawRequested`: the queue is drained into the [`SimulationState`],
//! the grid is painted and settled, then rendered and presented.

use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::Result;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowAttributes, WindowId},
};

use sandfall_core::{FrameOutcome, InputEvent, SimulationState, TickStats};

use crate::config::SandfallConfig;
use crate::error::InitError;
use crate::input::{canvas_position, map_key, map_mouse_button, wheel_delta};
use crate::render::Renderer;
use crate::ui::{HudStats, show_hud};

/// Main application state
pub struct App {
    // Window and rendering
    window: Arc<Window>,
    renderer: Renderer,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,

    // Simulation
    state: SimulationState,
    config: SandfallConfig,
    rng: Xoshiro256StarStar,
    tick_stats: TickStats,

    // Events collected since the last frame
    pending: VecDeque<InputEvent>,

    // Timing
    frame_count: u64,
    fps_update_time: Instant,
    fps: f32,
}

impl App {
    /// Create the window, renderer and initial simulation state
    pub async fn new(config: SandfallConfig) -> Result<(Self, EventLoop<()>), InitError> {
        config.validate()?;

        let event_loop = EventLoop::new()?;

        let (window_width, window_height) = config.window_size();
        let window_attrs = WindowAttributes::default()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(window_width, window_height))
            .with_resizable(false);

        #[allow(deprecated)]
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let sim = &config.simulation;
        let renderer = Renderer::new(window.clone(), sim.width as u32, sim.height as u32).await?;

        let seed = config.resolve_seed();
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let state = SimulationState::new(sim, &mut rng)?;
        log::info!(
            "Grid {}x{} at {}px per cell, seed {}, fall mode {:?}, {} grains",
            sim.width,
            sim.height,
            sim.pixel_size,
            seed,
            sim.fall_mode,
            state.sand_count()
        );

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &renderer.device,
            renderer.surface_format(),
            egui_wgpu::RendererOptions::default(),
        );

        Ok((
            Self {
                window,
                renderer,
                egui_ctx,
                egui_state,
                egui_renderer,
                state,
                config,
                rng,
                tick_stats: TickStats::default(),
                pending: VecDeque::new(),
                frame_count: 0,
                fps_update_time: Instant::now(),
                fps: 0.0,
            },
            event_loop,
        ))
    }

    /// Run the event loop until shutdown
    pub fn run(event_loop: EventLoop<()>, mut app: Self) -> Result<(), InitError> {
        event_loop.run_app(&mut app)?;
        Ok(())
    }

    /// Drain input, paint and settle. Returns false once shutdown was requested.
    fn update(&mut self) -> bool {
        let outcome = self
            .state
            .advance(&mut self.pending, &mut self.rng, &mut self.tick_stats);
        if outcome == FrameOutcome::Shutdown {
            return false;
        }

        let now = Instant::now();
        self.frame_count += 1;
        let elapsed = now.duration_since(self.fps_update_time).as_secs_f32();
        if elapsed >= 1.0 {
            self.fps = self.frame_count as f32 / elapsed;
            log::debug!(
                "{:.0} fps, {} grains, {} falls ({} rows), {} slides",
                self.fps,
                self.state.sand_count(),
                self.tick_stats.falls,
                self.tick_stats.rows_fallen,
                self.tick_stats.slides
            );
            self.frame_count = 0;
            self.fps_update_time = now;
            self.tick_stats.reset();
        }
        true
    }

    /// Render frame
    fn render(&mut self) -> Result<()> {
        self.renderer.update_grid_texture(&self.state);

        let output = match self.renderer.begin_frame() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                self.renderer.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.renderer
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("render_encoder"),
                });

        self.renderer.render_grid(&mut encoder, &view);

        let stats = HudStats {
            fps: self.fps,
            grain_count: self.state.sand_count(),
            brush_size: self.state.brush().size(),
            fall_mode: self.state.fall_mode(),
            paused: self.state.is_paused(),
            tool: self.state.active_tool().map(|tool| tool.name().to_owned()),
        };
        let show = self.config.show_hud;

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if show {
                show_hud(ctx, &stats);
            }
        });

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(
                &self.renderer.device,
                &self.renderer.queue,
                *id,
                delta,
            );
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.renderer.size().width, self.renderer.size().height],
            pixels_per_point: full_output.pixels_per_point,
        };

        self.egui_renderer.update_buffers(
            &self.renderer.device,
            &self.renderer.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.egui_renderer.render(
                &mut render_pass.forget_lifetime(),
                &paint_jobs,
                &screen_descriptor,
            );
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.renderer
            .queue
            .submit(std::iter::once(encoder.finish()));
        self.renderer.end_frame(output);

        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        self.window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let egui_response = self.egui_state.on_window_event(&self.window, &event);
        if egui_response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.pending.push_back(InputEvent::Shutdown);
                self.window.request_redraw();
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(size);
            }
            WindowEvent::RedrawRequested => {
                if !self.update() {
                    log::info!("Shutdown requested");
                    event_loop.exit();
                    return;
                }
                if let Err(e) = self.render() {
                    log::error!("Render error: {}", e);
                }
                self.window.request_redraw();
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) =
                    canvas_position(position, self.renderer.size(), self.config.window_size());
                self.pending.push_back(InputEvent::PointerMoved { x, y });
            }
            WindowEvent::CursorLeft { .. } => {
                self.pending.push_back(InputEvent::PointerLeft);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = map_mouse_button(button) {
                    self.pending.push_back(match state {
                        ElementState::Pressed => InputEvent::ButtonPressed(button),
                        ElementState::Released => InputEvent::ButtonReleased(button),
                    });
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.pending.push_back(InputEvent::Wheel(wheel_delta(delta)));
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(mapped) = map_key(code) {
                        self.pending.push_back(mapped);
                    }
                }
            }
            _ => {}
        }
    }
}
