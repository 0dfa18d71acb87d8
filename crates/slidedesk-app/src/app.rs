//! Window lifecycle, frame loop and input routing.

use kurbo::{Point, Vec2};
use peniko::Color;
use slidedesk_core::controller::InteractionState;
use slidedesk_core::input::{MouseButton as SlideButton, PointerEvent};
use slidedesk_core::service::encode_data_url;
use slidedesk_core::{CursorHint, Editor, LocalService};
use slidedesk_render::{RenderContext, Renderer, RendererError, VelloRenderer};
use std::sync::Arc;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::actions::{Followup, apply_action, apply_job_outcome};
use crate::canvas_view::CanvasView;
use crate::capture;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::jobs::ServiceJobs;
use crate::shortcuts::key_command;
use crate::ui::{EditorView, Notification, UiState, render_ui};

/// Window color around the slide.
const WORKSPACE_COLOR: Color = Color::from_rgb8(0xE9, 0xEB, 0xEE);

/// Runtime state, created once the window and GPU surface exist.
struct AppState {
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    vello_renderer: vello::Renderer,
    slide_renderer: VelloRenderer,
    texture_blitter: vello::wgpu::util::TextureBlitter,

    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    editor: Editor,
    jobs: ServiceJobs<LocalService>,
    view: CanvasView,
    /// Last pointer position, physical window pixels.
    cursor: Point,
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
    /// Set when startup fails; returned from [`App::run`].
    init_error: Option<AppError>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
            init_error: None,
        }
    }

    /// Run the editor until the window closes.
    pub async fn run(config: AppConfig) -> Result<(), AppError> {
        let event_loop = EventLoop::new().map_err(|e| AppError::EventLoop(e.to_string()))?;
        let mut app = App::new(config);
        event_loop
            .run_app(&mut app)
            .map_err(|e| AppError::EventLoop(e.to_string()))?;
        match app.init_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| AppError::Window(e.to_string()))?,
        );

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };
        log::info!("Surface size: {}x{}", width, height);

        let render_cx = self
            .render_cx
            .get_or_insert_with(vello::util::RenderContext::new);
        let surface = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| AppError::Surface(format!("{e:?}")))?;

        let device = &render_cx.devices[surface.dev_id].device;
        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(format!("{e:?}")))?;
        // Vello renders to Rgba8Unorm; the surface may want another format.
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

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
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let service = LocalService::new(self.config.screenshot_dir.clone());
        log::info!(
            "SlideDesk initialized - {}x{}, screenshots in {}",
            surface.config.width,
            surface.config.height,
            self.config.screenshot_dir.display()
        );

        self.state = Some(AppState {
            window: window.clone(),
            surface,
            vello_renderer,
            slide_renderer: VelloRenderer::new(),
            texture_blitter,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state: UiState::default(),
            editor: Editor::new(),
            jobs: ServiceJobs::new(Arc::new(service)),
            view: CanvasView::new(Vec2::ZERO, window.scale_factor()),
            cursor: Point::ZERO,
        });

        window.request_redraw();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.init_error.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("Startup failed: {}", e);
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        let egui_wants_pointer = egui_response.consumed
            || state.egui_ctx.is_pointer_over_area()
            || state.egui_ctx.wants_pointer_input();
        let egui_wants_keyboard =
            egui_response.consumed || state.egui_ctx.wants_keyboard_input();

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let Some(render_cx) = self.render_cx.as_ref() else {
                    return;
                };
                redraw(state, render_cx, &self.config);
            }

            WindowEvent::CursorMoved { position, .. } => {
                state.cursor = Point::new(position.x, position.y);
                // A drag that leaves the slide over a panel keeps tracking.
                let dragging = matches!(
                    state.editor.controller.state(),
                    InteractionState::Dragging { .. }
                );
                if egui_wants_pointer && !dragging {
                    return;
                }
                let position = state.view.to_slide(state.cursor);
                if state.editor.pointer(PointerEvent::Move { position }).changed {
                    state.window.request_redraw();
                }
            }

            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => {
                let position = state.view.to_slide(state.cursor);
                let event = match button_state {
                    ElementState::Pressed => {
                        if egui_wants_pointer || !state.view.contains(position) {
                            return;
                        }
                        PointerEvent::Down {
                            position,
                            button: SlideButton::Left,
                        }
                    }
                    ElementState::Released => PointerEvent::Up {
                        position,
                        button: SlideButton::Left,
                    },
                };
                if state.editor.pointer(event).changed {
                    state.window.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if egui_wants_keyboard || event.state != ElementState::Pressed {
                    return;
                }
                if let Some(command) = key_command(&event.logical_key) {
                    log::debug!("key command {:?}", command);
                    state.editor.key(command);
                    state.window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn cursor_icon(hint: CursorHint) -> egui::CursorIcon {
    match hint {
        CursorHint::Default => egui::CursorIcon::Default,
        CursorHint::Crosshair => egui::CursorIcon::Crosshair,
        CursorHint::Move => egui::CursorIcon::Move,
    }
}

/// One frame: drain service results, run the UI, paint the slide, present.
fn redraw(state: &mut AppState, render_cx: &vello::util::RenderContext, config: &AppConfig) {
    for outcome in state.jobs.poll() {
        apply_job_outcome(&mut state.editor, &mut state.ui_state, outcome);
    }
    state.ui_state.busy = state.jobs.is_busy();

    let egui_input = state.egui_state.take_egui_input(&state.window);
    let cursor_hint = state.editor.controller.cursor();
    let margin = config.canvas_margin;
    let mut canvas_origin = state.view.origin;
    let mut ui_action = None;
    let egui_output = state.egui_ctx.run(egui_input, |ctx| {
        let view = EditorView {
            selected: state.editor.scene.selected(),
            pending_tool: state.editor.controller.pending_tool(),
            info: &state.editor.info,
            object_count: state.editor.scene.len(),
        };
        ui_action = render_ui(ctx, &mut state.ui_state, &view);

        let canvas = ctx.available_rect();
        canvas_origin = Vec2::new(canvas.min.x as f64 + margin, canvas.min.y as f64 + margin);
        if !ctx.is_pointer_over_area() {
            ctx.set_cursor_icon(cursor_icon(cursor_hint));
        }
    });
    state
        .egui_state
        .handle_platform_output(&state.window, egui_output.platform_output);
    let egui_primitives = state
        .egui_ctx
        .tessellate(egui_output.shapes, egui_output.pixels_per_point);

    state.view = CanvasView::new(canvas_origin, state.window.scale_factor());

    let device_handle = &render_cx.devices[state.surface.dev_id];
    let device = &device_handle.device;
    let queue = &device_handle.queue;

    if let Some(action) = ui_action {
        match apply_action(&mut state.editor, &mut state.ui_state, action) {
            Followup::None => {}
            Followup::ExportJson => state.jobs.export_json(state.editor.export_document()),
            Followup::LoadJson(text) => state.jobs.load_json(text),
            Followup::Screenshot => match capture_slide(state, device, queue) {
                Ok(data_url) => state.jobs.save_screenshot(data_url),
                Err(e) => {
                    log::error!("Screenshot failed: {}", e);
                    state.ui_state.notify(Notification::error(e.to_string()));
                }
            },
            Followup::CopyJson => copy_json(&mut state.ui_state),
            Followup::SaveJson => save_json(&mut state.ui_state, &config.json_file_name),
        }
        state.ui_state.busy = state.jobs.is_busy();
    }

    let ctx = RenderContext::new(&state.editor.scene).with_transform(state.view.transform());
    state.slide_renderer.build_scene(&ctx);
    let scene = state.slide_renderer.take_scene();

    let surface_texture = match state.surface.surface.get_current_texture() {
        Ok(t) => t,
        Err(e) => {
            log::warn!("Failed to get surface texture: {:?}", e);
            return;
        }
    };
    let width = state.surface.config.width;
    let height = state.surface.config.height;

    // Vello draws into its own target; the blitter converts to the surface format.
    let render_texture = capture::vello_target(device, "slide render texture", width, height);
    let render_view = render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

    let params = RenderParams {
        base_color: WORKSPACE_COLOR,
        width,
        height,
        antialiasing_method: AaConfig::Area,
    };
    if let Err(e) =
        state
            .vello_renderer
            .render_to_texture(device, queue, &scene, &render_view, &params)
    {
        log::error!("Failed to render: {:?}", e);
        return;
    }

    let surface_view = surface_texture
        .texture
        .create_view(&vello::wgpu::TextureViewDescriptor::default());
    {
        let mut encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
            label: Some("blit encoder"),
        });
        state
            .texture_blitter
            .copy(device, &mut encoder, &render_view, &surface_view);
        queue.submit(std::iter::once(encoder.finish()));
    }

    for (id, image_delta) in &egui_output.textures_delta.set {
        state
            .egui_renderer
            .update_texture(device, queue, *id, image_delta);
    }
    let screen_descriptor = egui_wgpu::ScreenDescriptor {
        size_in_pixels: [width, height],
        pixels_per_point: egui_output.pixels_per_point,
    };
    {
        let mut encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
            label: Some("egui encoder"),
        });
        state.egui_renderer.update_buffers(
            device,
            queue,
            &mut encoder,
            &egui_primitives,
            &screen_descriptor,
        );
        let render_pass = encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
            label: Some("egui render pass"),
            color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                view: &surface_view,
                resolve_target: None,
                ops: vello::wgpu::Operations {
                    load: vello::wgpu::LoadOp::Load,
                    store: vello::wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        // egui-wgpu wants a 'static pass.
        let mut render_pass = render_pass.forget_lifetime();
        state
            .egui_renderer
            .render(&mut render_pass, &egui_primitives, &screen_descriptor);
        drop(render_pass);
        queue.submit(std::iter::once(encoder.finish()));
    }

    for id in &egui_output.textures_delta.free {
        state.egui_renderer.free_texture(id);
    }
    surface_texture.present();
    state.window.request_redraw();
}

/// Render the slide offscreen at one pixel per device pixel and return it as a PNG data URL.
fn capture_slide(
    state: &mut AppState,
    device: &vello::wgpu::Device,
    queue: &vello::wgpu::Queue,
) -> Result<String, AppError> {
    let (scene, size) = state
        .slide_renderer
        .build_export_scene(&state.editor.scene, 1.0);
    let image = capture::render_scene_to_rgba(
        device,
        queue,
        &mut state.vello_renderer,
        &scene,
        size.width as u32,
        size.height as u32,
    )
    .ok_or_else(|| RendererError::RenderFailed("slide capture".into()))?;
    let png = capture::encode_png(&image)?;
    log::info!("captured slide {}x{} ({} bytes)", image.width, image.height, png.len());
    Ok(encode_data_url(&png))
}

fn copy_json(ui_state: &mut UiState) {
    let result = arboard::Clipboard::new().and_then(|mut clipboard| {
        clipboard.set_text(ui_state.json_output.clone())
    });
    match result {
        Ok(()) => ui_state.notify(Notification::info("JSON copied to clipboard.")),
        Err(e) => {
            log::warn!("Clipboard write failed: {}", e);
            ui_state.notify(Notification::error(format!("Could not copy JSON: {e}")));
        }
    }
}

fn save_json(ui_state: &mut UiState, file_name: &str) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Save slide JSON")
        .set_file_name(file_name)
        .add_filter("JSON", &["json"])
        .save_file()
    else {
        return;
    };
    match std::fs::write(&path, &ui_state.json_output) {
        Ok(()) => {
            log::info!("Saved slide JSON to {}", path.display());
            ui_state.notify(Notification::info(format!("Saved {}", path.display())));
        }
        Err(e) => {
            log::error!("Failed to save {}: {}", path.display(), e);
            ui_state.notify(Notification::error(format!("Could not save JSON: {e}")));
        }
    }
}
