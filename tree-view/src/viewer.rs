//! Interactive 3D fractal tree viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the scene (shared mesh,
//! branch instances, lights) and the orbit camera, and implements
//! [`eframe::App`] to project and paint the tree every frame.

use eframe::App;
use glam::{Mat4, Vec2, Vec3};
use tree_core::{camera::OrbitCamera, color::Rgb, config::TreeConfig, scene::Scene};

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The scene core: [`Scene`] built from a [`TreeConfig`].
/// - The [`OrbitCamera`] driven by pointer drag and scroll.
/// - eframe/egui callbacks for projecting, shading, and painting.
///
/// The typical per-frame update is:
/// 1. Handle pointer input (orbit / pan / zoom).
/// 2. Sync the camera aspect to the current viewport rectangle.
/// 3. Run the time-based update step, then project and paint the scene.
/// 4. Request the next repaint, so the loop runs for the lifetime of the
///    window.
///
/// ### Fields
/// - `scene` - Mesh, branch instances, and lights; rebuilt only when the
///   configuration changes.
/// - `camera` - Orbit camera state (target, yaw, pitch, distance).
/// - `cfg` - Tree configuration edited from the top panel; applied on
///   rebuild.
///
/// - `painted_triangles` - Triangles submitted to the painter last frame.
/// - `last_frame_time` - Time stamp of the previous frame (egui time).
/// - `last_frame_dt` - Time delta between the last two frames (display only).
pub struct Viewer {
    scene: Scene,
    camera: OrbitCamera,
    cfg: TreeConfig,

    painted_triangles: usize,
    last_frame_time: f64,
    last_frame_dt: f64,
}

/// A triangle ready for the painter: sort depth, screen points, fill.
struct PaintedTri {
    depth: f32,
    points: [egui::Pos2; 3],
    fill: egui::Color32,
}

impl Viewer {
    /// Creates a new viewer with the default tree and camera.
    ///
    /// The scene is built once here; every later rebuild goes through
    /// [`Viewer::rebuild`].
    pub fn new() -> Self {
        let cfg = TreeConfig::default();
        let scene = Scene::build(&cfg);
        log::info!(
            "built tree: levels = {}, branches = {}",
            cfg.levels,
            scene.branches.len()
        );

        Self {
            scene,
            camera: OrbitCamera::new(),
            cfg,
            painted_triangles: 0,
            last_frame_time: 0.0,
            last_frame_dt: 0.0,
        }
    }

    /// Rebuilds the scene from the current configuration.
    fn rebuild(&mut self) {
        self.scene = Scene::build(&self.cfg);
        log::info!(
            "rebuilt tree: levels = {}, branches = {}",
            self.cfg.levels,
            self.scene.branches.len()
        );
    }

    /// Time-based update step, called once per frame with the elapsed time
    /// in seconds. The tree itself is static; this is where per-frame
    /// animation would go.
    fn animate(&mut self, _time: f64) {}

    /// Projects a world-space point into screen space.
    ///
    /// Returns the screen position and the perspective depth (distance
    /// along the view direction), or `None` when the point is on or behind
    /// the camera plane.
    fn project(view_proj: &Mat4, point: Vec3, rect: egui::Rect) -> Option<(egui::Pos2, f32)> {
        let clip = *view_proj * point.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }

        let ndc = clip.truncate() / clip.w;
        let center = rect.center();
        let screen = egui::pos2(
            center.x + ndc.x * rect.width() * 0.5,
            center.y - ndc.y * rect.height() * 0.5,
        );
        Some((screen, clip.w))
    }

    fn to_color32(color: Rgb) -> egui::Color32 {
        let c = color.clamped();
        egui::Color32::from_rgb(
            (c.r * 255.0) as u8,
            (c.g * 255.0) as u8,
            (c.b * 255.0) as u8,
        )
    }

    /// Projects, culls, shades, and depth-sorts every branch triangle.
    ///
    /// Each branch transforms the one shared mesh by its own matrix;
    /// triangles facing away from the eye are culled, the rest are shaded
    /// with the scene lights and sorted far-to-near for the painter.
    fn collect_triangles(&self, rect: egui::Rect) -> Vec<PaintedTri> {
        let view_proj = self.camera.view_proj();
        let eye = self.camera.eye();
        let mesh = &self.scene.mesh;

        let mut tris: Vec<PaintedTri> =
            Vec::with_capacity(self.scene.branches.len() * mesh.triangle_count() / 2);
        let mut world = Vec::with_capacity(mesh.positions.len());

        for branch in &self.scene.branches {
            world.clear();
            world.extend(
                mesh.positions
                    .iter()
                    .map(|&p| branch.transform.transform_point3(p)),
            );

            for &[i0, i1, i2] in &mesh.triangles {
                let (a, b, c) = (
                    world[i0 as usize],
                    world[i1 as usize],
                    world[i2 as usize],
                );

                let normal = (b - a).cross(c - a);
                let center = (a + b + c) / 3.0;
                if normal.dot(eye - center) <= 0.0 {
                    continue;
                }

                let Some((pa, da)) = Self::project(&view_proj, a, rect) else {
                    continue;
                };
                let Some((pb, db)) = Self::project(&view_proj, b, rect) else {
                    continue;
                };
                let Some((pc, dc)) = Self::project(&view_proj, c, rect) else {
                    continue;
                };

                let lit = self.scene.lights.shade(branch.color, normal.normalize());
                tris.push(PaintedTri {
                    depth: (da + db + dc) / 3.0,
                    points: [pa, pb, pc],
                    fill: Self::to_color32(lit),
                });
            }
        }

        // Painter's algorithm: far triangles first.
        tris.sort_by(|x, y| y.depth.total_cmp(&x.depth));
        tris
    }

    /// Builds the top panel UI (rebuild controls, camera reset).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("levels:");
                ui.add(egui::DragValue::new(&mut self.cfg.levels).range(0..=14).speed(0.1));

                ui.label("segments:");
                ui.add(
                    egui::DragValue::new(&mut self.cfg.radial_segments)
                        .range(3..=32)
                        .speed(0.1),
                );

                if ui.button("Rebuild").clicked() {
                    self.rebuild();
                }

                ui.separator();

                if ui.button("Reset view").clicked() {
                    self.camera.reset();
                }
            });
        });
    }

    /// Builds the bottom status bar (frame time, instance/triangle counts).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("frame = {:.3} s", self.last_frame_dt));
                ui.separator();
                ui.label(format!("branches = {}", self.scene.branches.len()));
                ui.label(format!("triangles = {}", self.painted_triangles));
            });
        });
    }

    /// Builds the central viewport: input handling, projection, painting.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Orbit with the primary button, pan with the secondary.
            if response.dragged_by(egui::PointerButton::Primary) {
                let delta = response.drag_delta();
                self.camera.rotate(Vec2::new(delta.x, delta.y));
            }
            if response.dragged_by(egui::PointerButton::Secondary) {
                let delta = response.drag_delta();
                self.camera.pan(Vec2::new(delta.x, delta.y));
            }

            // Dolly with scroll.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                self.camera.zoom(scroll);
            }

            // Keep the camera aspect and the painted surface in sync with
            // the viewport.
            self.camera.camera.set_viewport(rect.width(), rect.height());

            let tris = self.collect_triangles(rect);
            self.painted_triangles = tris.len();
            for tri in tris {
                painter.add(egui::Shape::convex_polygon(
                    tri.points.to_vec(),
                    tri.fill,
                    egui::Stroke::NONE,
                ));
            }

            // Free-running loop: animate with elapsed seconds, then ask for
            // the next frame unconditionally.
            let now = ctx.input(|i| i.time);
            if self.last_frame_time > 0.0 {
                self.last_frame_dt = now - self.last_frame_time;
            }
            self.last_frame_time = now;
            self.animate(now);

            ctx.request_repaint();
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);
    }
}
