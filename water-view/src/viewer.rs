//! Interactive water surface viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the [`Simulation`] and
//! implements [`eframe::App`] to drive it: it is the host animation
//! loop, the pointer source for cutting links, and the renderer.

use std::time::Duration;

use eframe::App;
use glam::Vec2;
use tracing::{error, info};
use water_core::{Config, ConfigError, Simulation};

/// Colour shared by links and nodes.
const INK: egui::Color32 = egui::Color32::from_rgb(0x48, 0x49, 0x55);
/// Surface background.
const PAPER: egui::Color32 = egui::Color32::from_rgb(0xf4, 0xf4, 0xf6);
/// Colour of a strongly displaced node when tinting is enabled.
const CREST: egui::Color32 = egui::Color32::from_rgb(0x1e, 0x78, 0xd2);

const LINK_WIDTH: f32 = 0.5;
const NODE_SIZE: f32 = 2.0;
/// Displacement at which the tint is fully saturated.
const TINT_FULL_AT: f32 = 20.0;

/// Surface size used until the central panel reports its real size.
const INITIAL_SIZE: Vec2 = Vec2::new(800.0, 600.0);

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The simulation core: [`Simulation`] with its grid and cut registry.
/// - An editable copy of the [`Config`], applied on request.
/// - eframe/egui callbacks for drawing and pointer interaction.
///
/// The per-frame update is:
/// 1. Rebuild the grid if the central panel changed size.
/// 2. Cut links under the pointer if it moved.
/// 3. If `running` is `true`, run one simulation step.
/// 4. Draw links and nodes, then request the next frame.
///
/// ### Fields
/// - `sim` - The water surface being simulated.
/// - `cfg` - Config being edited in the side panel; not live until applied.
/// - `cfg_error` - Message from the last rejected config, if any.
///
/// - `running` - Whether a step runs every frame.
/// - `tint` - Whether nodes are coloured by their displacement.
/// - `last_pointer` - Last hovered surface position, to detect moves.
///
/// - `last_frame_time` - Time stamp of the last frame (egui time).
/// - `last_frame_dt` - Time between the last two frames (for display only).
pub struct Viewer {
    sim: Simulation,
    cfg: Config,
    cfg_error: Option<String>,

    running: bool,
    tint: bool,
    last_pointer: Option<Vec2>,

    last_frame_time: f64,
    last_frame_dt: f64,
}

impl Viewer {
    /// Creates a running viewer with a default-configured surface.
    ///
    /// The surface starts at a placeholder size and is rebuilt to fit the
    /// central panel on the first frame.
    ///
    /// ### Errors
    /// Returns the [`ConfigError`] if the default config is rejected.
    pub fn new() -> Result<Self, ConfigError> {
        let cfg = Config::default();
        let sim = Simulation::new(INITIAL_SIZE.x, INITIAL_SIZE.y, cfg)?;

        Ok(Self {
            sim,
            cfg,
            cfg_error: None,
            running: true,
            tint: false,
            last_pointer: None,
            last_frame_time: 0.0,
            last_frame_dt: 0.0,
        })
    }

    /// Puts the surface back at rest with every link intact.
    fn reset(&mut self) {
        self.sim.reset();
        self.last_pointer = None;
    }

    /// Tries to make the edited config live.
    fn apply_config(&mut self) {
        match self.sim.set_config(self.cfg) {
            Ok(()) => {
                info!(cfg = ?self.cfg, "applied water surface config");
                self.cfg_error = None;
            }
            Err(e) => {
                error!(error = %e, "config not applied");
                self.cfg_error = Some(e.to_string());
            }
        }
    }

    /// Rebuilds the grid if the drawing area no longer matches it.
    fn fit_to(&mut self, rect: egui::Rect) {
        let grid = self.sim.grid();
        let same = (grid.width() - rect.width()).abs() < 0.5
            && (grid.height() - rect.height()).abs() < 0.5;
        if same {
            return;
        }
        if let Err(e) = self.sim.resize(rect.width(), rect.height()) {
            error!(error = %e, "failed to resize water surface");
        }
        self.last_pointer = None;
    }

    /// Cuts links under the pointer, but only when it has moved.
    ///
    /// ### Returns
    /// The number of links cut.
    fn pointer_moved_to(&mut self, pos: Vec2, now: Duration) -> usize {
        if self.last_pointer == Some(pos) {
            return 0;
        }
        self.last_pointer = Some(pos);
        self.sim.cut_at(pos, now)
    }

    /// Converts a surface position to screen-space.
    ///
    /// The surface origin is the top-left corner of `rect`, with y
    /// growing downwards like the screen.
    fn world_to_screen(p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        egui::pos2(rect.min.x + p.x, rect.min.y + p.y)
    }

    /// Converts a screen-space position back to the surface.
    ///
    /// This is the inverse of [`Viewer::world_to_screen`].
    fn screen_to_world(p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        Vec2::new(p.x - rect.min.x, p.y - rect.min.y)
    }

    /// Node colour for a given displacement when tinting is enabled.
    fn node_color(&self, displacement: f32) -> egui::Color32 {
        if !self.tint {
            return INK;
        }
        let t = (displacement / TINT_FULL_AT).clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        egui::Color32::from_rgb(
            mix(INK.r(), CREST.r()),
            mix(INK.g(), CREST.g()),
            mix(INK.b(), CREST.b()),
        )
    }

    /// Helper to draw a labeled `u64` [`egui::DragValue`].
    fn labeled_drag_u64(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut u64,
        range: std::ops::RangeInclusive<u64>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (run controls, stepping, reset).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Step").clicked() {
                    let now = ctx.input(|i| i.time);
                    self.sim.step(host_time(now));
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                if ui.button("Heal").clicked() {
                    self.sim.heal();
                }

                ui.separator();
                ui.checkbox(&mut self.tint, "Tint by displacement");
            });
        });
    }

    /// Builds the bottom status bar (frame time, node and link counts).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt last = {:.3} s", self.last_frame_dt));
                ui.separator();
                ui.label(format!("max displacement = {:.2}", self.sim.max_displacement()));
                ui.label(format!("broken links = {}", self.sim.broken_count()));
                ui.label(format!("active links = {}", self.sim.active_links().len()));
                ui.label(format!("nodes = {}", self.sim.nodes().len()));
            });
        });
    }

    /// Builds the right-hand configuration panel for the tuning constants.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Forces");
                Self::labeled_drag_f32(
                    ui,
                    "restoring_strength:",
                    &mut self.cfg.restoring_strength,
                    0.0..=1.0,
                    0.001,
                );
                Self::labeled_drag_f32(
                    ui,
                    "force_multiplier:",
                    &mut self.cfg.force_multiplier,
                    0.0..=2.0,
                    0.01,
                );

                ui.separator();
                ui.label("Motion");
                Self::labeled_drag_f32(ui, "friction:", &mut self.cfg.friction, 0.0..=1.0, 0.001);
                Self::labeled_drag_f32(
                    ui,
                    "speed_limit:",
                    &mut self.cfg.speed_limit,
                    0.0..=50.0,
                    0.1,
                );

                ui.separator();
                ui.label("Grid");
                Self::labeled_drag_f32(ui, "cell_size:", &mut self.cfg.cell_size, 0.0..=200.0, 1.0);

                ui.separator();
                ui.label("Cutting");
                Self::labeled_drag_f32(ui, "cut_radius:", &mut self.cfg.cut_radius, 0.0..=100.0, 0.5);
                let mut delay_ms = whole_millis(self.cfg.recovery_delay);
                Self::labeled_drag_u64(ui, "recovery_delay (ms):", &mut delay_ms, 0..=10_000, 5.0);
                self.cfg.recovery_delay = Duration::from_millis(delay_ms);

                ui.separator();
                if ui.button("Apply").clicked() {
                    self.apply_config();
                }
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = Config::default();
                    self.apply_config();
                }

                if let Some(msg) = &self.cfg_error {
                    ui.colored_label(egui::Color32::RED, msg);
                }
            });
    }

    /// Builds the central panel where the surface is simulated and drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;
                let painter = ui.painter_at(rect);

                let time = ctx.input(|i| i.time);
                if self.last_frame_time > 0.0 {
                    self.last_frame_dt = time - self.last_frame_time;
                }
                self.last_frame_time = time;
                let now = host_time(time);

                self.fit_to(rect);

                if let Some(p) = response.hover_pos() {
                    self.pointer_moved_to(Self::screen_to_world(p, rect), now);
                }

                if self.running {
                    self.sim.step(now);
                }

                painter.rect_filled(rect, 0.0, PAPER);

                let stroke = egui::Stroke::new(LINK_WIDTH, INK);
                for (a, b) in self.sim.link_segments() {
                    painter.line_segment(
                        [Self::world_to_screen(a, rect), Self::world_to_screen(b, rect)],
                        stroke,
                    );
                }

                let size = egui::vec2(NODE_SIZE, NODE_SIZE);
                for node in self.sim.nodes() {
                    let center = Self::world_to_screen(node.pos, rect);
                    painter.rect_filled(
                        egui::Rect::from_center_size(center, size),
                        0.0,
                        self.node_color(node.displacement()),
                    );
                }

                if self.running {
                    ctx.request_repaint();
                }
            });
    }
}

/// Converts egui's clock (seconds since start) to the simulation clock.
fn host_time(seconds: f64) -> Duration {
    Duration::from_secs_f64(seconds.max(0.0))
}

/// Whole milliseconds in `d`, saturating at `u64::MAX`.
fn whole_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    ///
    /// The side panels are laid out first so the central panel gets the
    /// remaining area as the surface size.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
