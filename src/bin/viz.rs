use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use platform_sim::params::{
    KD_RANGE, KI_RANGE, KP_RANGE, MASS_RANGE, TIME_SCALE_RANGE, WIND_RANGE,
};
use platform_sim::{ControlParameters, Simulation};

fn main() -> eframe::Result {
    env_logger::init();

    let app = PlatformApp::new();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Platform PID Simulator", options, Box::new(|_| Ok(Box::new(app))))
}

struct PlatformApp {
    sim: Simulation,
    /// Slider/checkbox staging area, swapped into the core once per frame.
    pending: ControlParameters,
}

impl PlatformApp {
    fn new() -> Self {
        let pending = ControlParameters::default();
        let sim = Simulation::new(pending).expect("default parameters are valid");
        Self { sim, pending }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Controller");
        ui.horizontal(|ui| {
            ui.checkbox(&mut self.pending.p_enabled, "");
            ui.add(egui::Slider::new(&mut self.pending.kp, KP_RANGE).text("Kp"));
        });
        ui.horizontal(|ui| {
            ui.checkbox(&mut self.pending.i_enabled, "");
            ui.add(egui::Slider::new(&mut self.pending.ki, KI_RANGE).text("Ki"));
        });
        ui.horizontal(|ui| {
            ui.checkbox(&mut self.pending.d_enabled, "");
            ui.add(egui::Slider::new(&mut self.pending.kd, KD_RANGE).text("Kd"));
        });

        ui.separator();
        ui.heading("Plant");
        ui.add(egui::Slider::new(&mut self.pending.mass, MASS_RANGE).text("Mass"));
        ui.add(egui::Slider::new(&mut self.pending.wind, WIND_RANGE).text("Wind"));
        ui.add(
            egui::Slider::new(&mut self.pending.time_scale, TIME_SCALE_RANGE)
                .text("Simulation speed"),
        );

        ui.separator();
        ui.horizontal(|ui| {
            let label = if self.sim.is_paused() { "Resume" } else { "Pause" };
            if ui.button(label).clicked() {
                if self.sim.is_paused() {
                    self.sim.resume();
                } else {
                    self.sim.pause();
                }
            }
            if ui.button("Reset graphs").clicked() {
                self.sim.reset_graphs();
            }
            if ui.button("Reset all").clicked() {
                self.sim.reset_all();
            }
        });

        ui.separator();
        let snap = self.sim.snapshot();
        ui.label(format!("Setpoint: {:+.1}", snap.setpoint));
        ui.label(format!("Position: {:+.1}", snap.position));
        ui.label(format!("Velocity: {:+.2}", snap.velocity));
        ui.label(format!(
            "Force: {:+.1}  (P {:+.1}  I {:+.1}  D {:+.1})",
            snap.last_force, snap.last_p, snap.last_i, snap.last_d
        ));
        ui.label(format!("Sim time: {:.1} s", self.sim.time()));
    }

    /// The platform track. Click anywhere on it to place the setpoint.
    fn platform_strip(&mut self, ui: &mut egui::Ui) {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(ui.available_width(), 70.0), egui::Sense::click());
        let painter = ui.painter_at(rect);
        let center = rect.center();

        painter.rect_filled(rect, egui::CornerRadius::same(3), egui::Color32::from_gray(245));
        painter.line_segment(
            [
                egui::pos2(center.x, rect.top()),
                egui::pos2(center.x, rect.bottom()),
            ],
            egui::Stroke::new(1.0, egui::Color32::from_gray(200)),
        );

        let snap = self.sim.snapshot();

        // Setpoint marker
        let sx = center.x + snap.setpoint as f32;
        painter.line_segment(
            [egui::pos2(sx, rect.top()), egui::pos2(sx, rect.bottom())],
            egui::Stroke::new(2.0, egui::Color32::from_rgb(200, 60, 60)),
        );

        // Platform body
        let px = center.x + snap.position as f32;
        let body = egui::Rect::from_center_size(egui::pos2(px, center.y), egui::vec2(100.0, 20.0));
        painter.rect_filled(body, egui::CornerRadius::same(3), egui::Color32::from_rgb(100, 100, 200));

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.sim.set_setpoint((pos.x - center.x) as f64);
            }
        }
    }

    fn plots(&self, ui: &mut egui::Ui) {
        let samples: Vec<_> = self.sim.history().iter().copied().collect();
        let half_h = ui.available_height() / 2.0 - 8.0;

        ui.label("Error");
        let points: PlotPoints = samples.iter().map(|s| [s.t, s.error]).collect();
        Plot::new("error")
            .height(half_h)
            .x_axis_label("Time (s)")
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new("Error", points));
            });

        ui.label("Control output");
        let total: PlotPoints = samples.iter().map(|s| [s.t, s.total_force]).collect();
        let p: PlotPoints = samples.iter().map(|s| [s.t, s.p_term]).collect();
        let i: PlotPoints = samples.iter().map(|s| [s.t, s.i_term]).collect();
        let d: PlotPoints = samples.iter().map(|s| [s.t, s.d_term]).collect();
        Plot::new("force")
            .height(half_h)
            .x_axis_label("Time (s)")
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new("Total", total));
                plot_ui.line(Line::new("P", p));
                plot_ui.line(Line::new("I", i));
                plot_ui.line(Line::new("D", d));
            });
    }
}

impl eframe::App for PlatformApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Clamp the frame delta so a dragged window doesn't produce one
        // giant integration step.
        let frame_dt = f64::from(ctx.input(|i| i.stable_dt).min(0.1));

        if let Err(e) = self.sim.apply_parameters(self.pending.clamped()) {
            log::warn!("parameter set rejected: {e}");
        }
        if let Err(e) = self.sim.tick(frame_dt) {
            log::warn!("tick rejected: {e}");
        }

        egui::SidePanel::right("controls")
            .default_width(320.0)
            .show(ctx, |ui| self.controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            self.platform_strip(ui);
            ui.add_space(8.0);
            self.plots(ui);
        });

        ctx.request_repaint();
    }
}
