//! OrbitWatch - space weather dashboard
//!
//! Visualizes live satellite positions on a 3D globe, propagated from
//! two-line element sets, with orbit/category filtering and radiation
//! hazard coloring driven by space-weather notifications.

mod data;
mod engine;
mod orbit;
mod renderer;
#[cfg(test)]
mod testutil;
mod ui;

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use anyhow::{bail, Result};
use eframe::egui;
use glam::Vec3;

use data::{fetch_element_sets, fetch_notifications, parse_element_sets, SpaceWeatherNotification};
use engine::{
    GlobeSession, PointerRay, SatelliteRegistry, SessionPhase, SimClock,
};
use renderer::{
    globe_point, Camera, FrameData, GlobeCallback, MarkerInstance, SceneRenderer, TrackVertex,
};
use ui::{DetailPanel, EguiFullscreen, FilterPanel, FullscreenControl};

const ELEMENT_SETS_URL: &str =
    "https://celestrak.org/NORAD/elements/gp.php?GROUP=active&FORMAT=tle";
const NOTIFICATIONS_URL: &str =
    "https://api.nasa.gov/DONKI/notifications?type=all&api_key=DEMO_KEY";
/// Ingestion cap: the upstream feed is far larger than the view needs.
const MAX_SATELLITES: usize = 500;

/// Everything the loader thread produces before the loop starts.
struct LoadedData {
    registry: SatelliteRegistry,
    start: satkit::Instant,
    notifications: Vec<SpaceWeatherNotification>,
}

fn load_session_data() -> Result<LoadedData> {
    let text = fetch_element_sets(ELEMENT_SETS_URL)?;
    let records = parse_element_sets(&text, MAX_SATELLITES);

    let clock = SimClock::from_wall_clock();
    let start = clock.now();
    let registry = SatelliteRegistry::from_records(&records, &start);
    if registry.is_empty() {
        bail!("no data available");
    }

    let notifications = fetch_notifications(NOTIFICATIONS_URL)?;

    Ok(LoadedData {
        registry,
        start,
        notifications,
    })
}

/// Application state for one visualization session.
pub struct OrbitWatchApp {
    phase: SessionPhase,
    load_rx: Option<Receiver<Result<LoadedData, String>>>,

    session: Option<GlobeSession>,
    notifications: Vec<SpaceWeatherNotification>,

    filter_panel: FilterPanel,
    camera: Camera,
    camera_drag: Option<egui::Pos2>,

    last_frame_time: std::time::Instant,
}

impl OrbitWatchApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let phase = match &cc.wgpu_render_state {
            Some(render_state) => {
                let device = &render_state.device;
                let queue = &render_state.queue;
                let assets_path = PathBuf::from("assets");

                match SceneRenderer::new(
                    device,
                    queue,
                    render_state.target_format,
                    1280,
                    720,
                    &assets_path,
                ) {
                    Ok(renderer) => {
                        render_state
                            .renderer
                            .write()
                            .callback_resources
                            .insert(renderer);
                        SessionPhase::Loading
                    }
                    Err(e) => {
                        log::error!("Failed to initialize renderer: {e:#}");
                        SessionPhase::Error(format!("Renderer initialization failed: {e:#}"))
                    }
                }
            }
            None => SessionPhase::Error("wgpu render state unavailable".to_string()),
        };

        let load_rx = if matches!(phase, SessionPhase::Loading) {
            let (tx, rx) = mpsc::channel();
            thread::spawn(move || {
                let result = load_session_data().map_err(|e| format!("{e:#}"));
                let _ = tx.send(result);
            });
            Some(rx)
        } else {
            None
        };

        Self {
            phase,
            load_rx,
            session: None,
            notifications: Vec::new(),
            filter_panel: FilterPanel::default(),
            camera: Camera::default(),
            camera_drag: None,
            last_frame_time: std::time::Instant::now(),
        }
    }

    fn poll_loader(&mut self) {
        let Some(rx) = &self.load_rx else { return };
        match rx.try_recv() {
            Ok(Ok(data)) => {
                log::info!("Session ready: {} satellites", data.registry.len());
                self.session = Some(GlobeSession::new(
                    data.registry,
                    SimClock::starting_at(data.start),
                ));
                self.notifications = data.notifications;
                self.phase = SessionPhase::Ready;
                self.load_rx = None;
            }
            Ok(Err(message)) => {
                log::error!("Loading failed: {message}");
                self.phase = SessionPhase::Error(message);
                self.load_rx = None;
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.phase = SessionPhase::Error("loader thread died".to_string());
                self.load_rx = None;
            }
        }
    }

    fn handle_camera_input(&mut self, ctx: &egui::Context, viewport_rect: egui::Rect) {
        let input = ctx.input(|i| i.clone());

        if let Some(pos) = input.pointer.hover_pos() {
            if viewport_rect.contains(pos) {
                let scroll = input.raw_scroll_delta.y;
                if scroll != 0.0 {
                    self.camera.zoom(scroll * 0.1);
                }

                if input.pointer.button_down(egui::PointerButton::Primary) {
                    if let Some(last_pos) = self.camera_drag {
                        let delta = pos - last_pos;
                        if input.modifiers.shift {
                            self.camera.pan(delta.x, -delta.y);
                        } else {
                            self.camera.orbit(delta.x, delta.y);
                        }
                    }
                    self.camera_drag = Some(pos);
                } else {
                    self.camera_drag = None;
                }
            }
        }
    }

    /// Approximate sun direction in the Earth-fixed scene frame: the
    /// subsolar longitude tracks UTC, with a small fixed tilt.
    fn sun_direction(clock: &SimClock) -> Vec3 {
        let (_, _, _, hour, minute, second) = clock.now().as_datetime();
        let day_fraction = (hour as f32 + minute as f32 / 60.0 + second as f32 / 3600.0) / 24.0;
        let sun_lon = std::f32::consts::PI * (1.0 - 2.0 * day_fraction);
        globe_point(0.1, sun_lon)
    }

    /// Build the marker instances and track segments for this frame.
    fn build_frame_geometry(session: &GlobeSession) -> (Vec<MarkerInstance>, Vec<TrackVertex>) {
        let registry = session.registry();
        let selected_id = session.selected_snapshot().map(|s| s.catalog_id);

        let mut markers = Vec::with_capacity(registry.len());
        let mut tracks = Vec::new();

        for entity in registry.entities() {
            if entity.renderable() {
                let c = entity.marker_color;
                let selected = selected_id.as_deref() == Some(entity.catalog_id.as_str());
                markers.push(MarkerInstance {
                    position: entity.position.to_array(),
                    color: [c[0], c[1], c[2], entity.render_opacity],
                    size: if selected { 2.5 } else { 1.0 },
                });
            }

            if entity.track_renderable() {
                let c = entity.marker_color;
                let color = [c[0], c[1], c[2], entity.track_opacity * 0.55];
                for window in entity.track.windows(2) {
                    tracks.push(TrackVertex {
                        position: window[0].to_array(),
                        color,
                    });
                    tracks.push(TrackVertex {
                        position: window[1].to_array(),
                        color,
                    });
                }
            }
        }

        (markers, tracks)
    }

    fn show_viewport(&mut self, ui: &mut egui::Ui, frame: &eframe::Frame, wall_dt: f64) {
        let viewport_rect = ui.available_rect_before_wrap();
        self.handle_camera_input(ui.ctx(), viewport_rect);

        let pixels_per_point = ui.ctx().pixels_per_point();
        let viewport_px = (
            (viewport_rect.width() * pixels_per_point).round().max(1.0) as u32,
            (viewport_rect.height() * pixels_per_point).round().max(1.0) as u32,
        );

        let aspect_ratio = viewport_rect.width() / viewport_rect.height().max(1.0);
        let view_proj = self.camera.view_projection_matrix(aspect_ratio);
        let viewport_size = (viewport_rect.width(), viewport_rect.height());

        let Some(session) = &mut self.session else {
            return;
        };

        // Push host configuration, then run one tick of the loop.
        session.filter = self.filter_panel.filter;
        session.risk = self.filter_panel.risk;
        session.tick(wall_dt, &view_proj, viewport_size);

        let (response, painter) =
            ui.allocate_painter(viewport_rect.size(), egui::Sense::click_and_drag());

        // Pointer interaction against this tick's positions.
        if let Some(pos) = response.hover_pos() {
            let ndc_x = ((pos.x - viewport_rect.left()) / viewport_rect.width()) * 2.0 - 1.0;
            let ndc_y = 1.0 - ((pos.y - viewport_rect.top()) / viewport_rect.height()) * 2.0;
            let ray = PointerRay::from_ndc(&view_proj, self.camera.position(), ndc_x, ndc_y);

            let hovered = session.pointer_hover(&ray).is_some();
            if hovered {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            }
            if response.clicked() {
                if let Some(snapshot) = session.pointer_click(&ray) {
                    log::info!("Selected {}", snapshot.name);
                }
            }
        }

        // Hand the frame snapshot to the paint callback.
        let (markers, tracks) = Self::build_frame_geometry(session);
        if let Some(render_state) = frame.wgpu_render_state() {
            let renderer = render_state.renderer.read();
            if let Some(scene) = renderer.callback_resources.get::<SceneRenderer>() {
                scene.set_frame_data(FrameData {
                    camera: self.camera.clone(),
                    aspect_ratio,
                    sun_direction: Self::sun_direction(&session.clock),
                    markers: Arc::new(markers),
                    tracks: Arc::new(tracks),
                });
            }
        }

        painter.add(egui_wgpu::Callback::new_paint_callback(
            response.rect,
            GlobeCallback {
                viewport_size: viewport_px,
            },
        ));

        // Hover label at the projected marker position.
        if let (Some(name), Some((x, y))) =
            (&session.hover().name, session.hover().screen_pos)
        {
            let label_pos = viewport_rect.left_top() + egui::vec2(x + 12.0, y - 12.0);
            painter.text(
                label_pos,
                egui::Align2::LEFT_BOTTOM,
                name,
                egui::FontId::proportional(13.0),
                egui::Color32::WHITE,
            );
        }
    }

    fn show_ready(&mut self, ctx: &egui::Context, frame: &eframe::Frame, wall_dt: f64) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("OrbitWatch");
                ui.separator();

                if let Some(session) = &mut self.session {
                    let play_text = if session.clock.playing { "⏸" } else { "▶" };
                    if ui.button(play_text).clicked() {
                        session.clock.playing = !session.clock.playing;
                    }
                    ui.add(
                        egui::Slider::new(&mut session.clock.speed, 1.0..=600.0)
                            .logarithmic(true)
                            .text("speed"),
                    );
                    ui.separator();
                    ui.label(session.clock.format());
                    ui.separator();
                    ui.label(format!(
                        "Satellites: {} | Visible: {}",
                        session.registry().len(),
                        session.registry().renderable_count()
                    ));
                }

                ui.separator();
                let risk = self.filter_panel.risk;
                let color = if risk.is_elevated() {
                    egui::Color32::from_rgb(255, 90, 70)
                } else {
                    egui::Color32::from_rgb(120, 200, 120)
                };
                ui.colored_label(color, format!("Radiation: {}", risk.label()));

                ui.separator();
                let mut fullscreen = EguiFullscreen::new(ui.ctx());
                let label = if fullscreen.is_active() { "⛶ Exit" } else { "⛶" };
                if ui.button(label).clicked() {
                    fullscreen.toggle();
                }
            });
        });

        egui::SidePanel::left("left_panel")
            .default_width(290.0)
            .show(ctx, |ui| {
                self.filter_panel.show(ui, &self.notifications);
            });

        let selected = self
            .session
            .as_ref()
            .and_then(|session| session.selected_snapshot());
        if let Some(snapshot) = selected {
            egui::SidePanel::right("detail_panel")
                .default_width(300.0)
                .show(ctx, |ui| {
                    if DetailPanel::show(ui, &snapshot) {
                        if let Some(session) = &mut self.session {
                            session.clear_selection();
                        }
                        self.camera.reset();
                    }
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_viewport(ui, frame, wall_dt);
        });
    }
}

impl eframe::App for OrbitWatchApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        let now = std::time::Instant::now();
        let wall_dt = (now - self.last_frame_time).as_secs_f64().min(0.25);
        self.last_frame_time = now;

        self.poll_loader();

        match self.phase.clone() {
            SessionPhase::Loading => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Fetching element sets…");
                        });
                    });
                });
                ctx.request_repaint_after(std::time::Duration::from_millis(100));
                return;
            }
            SessionPhase::Error(message) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.colored_label(
                            egui::Color32::from_rgb(230, 90, 90),
                            format!("OrbitWatch could not start: {message}"),
                        );
                    });
                });
                return;
            }
            SessionPhase::Ready => {}
        }

        self.show_ready(ctx, frame, wall_dt);

        // Continuous animation.
        ctx.request_repaint_after(std::time::Duration::from_millis(16));
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting OrbitWatch...");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1500.0, 900.0])
            .with_title("OrbitWatch - Space Weather Dashboard"),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "OrbitWatch",
        options,
        Box::new(|cc| Ok(Box::new(OrbitWatchApp::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}
