// ui.rs - Draws published snapshots and turns clicks into commands

use std::time::Duration;

use conway::{GameOfLifeInterface, PATTERNS};
use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use tracing::warn;

use crate::GameOfLife;

const BOX_SIZE: f32 = 15.0;
const SPACING: f32 = 0.5;

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let snap = self.view.borrow_and_update().clone();
        let grid = &snap.grid;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            // Controls
            ui.horizontal(|ui| {
                let button_text = if snap.running { "⏸ Stop" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.sim.toggle_running();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.sim.stop();
                    self.sim.clear();
                }

                if ui.button("🎲 Random").clicked() {
                    self.sim.stop();
                    let seed = self.next_seed();
                    report(self.sim.randomize(seed));
                }

                ui.separator();

                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.sim.stop();
                    report(self.sim.apply_pattern(&PATTERNS[self.selected_pattern]));
                }

                ui.separator();

                ui.label(format!("Generation: {}", snap.generation));
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = 1.0 / self.sim.period().as_secs_f32();
                if ui.add(egui::Slider::new(&mut speed, 0.5..=60.0).suffix(" gen/sec")).changed() {
                    report(self.sim.set_period(Duration::from_secs_f32(1.0 / speed)));
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();

            ui.label("Click cells to toggle them alive/dead. Use Start/Stop to run the simulation.");

            ui.separator();

            let (rows, cols) = grid.dimensions();
            let pitch = (ui.available_width() / cols as f32).min(BOX_SIZE + SPACING);
            let total_size = Vec2::new(pitch * cols as f32, pitch * rows as f32) - Vec2::splat(SPACING);

            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());
            let origin = response.rect.min;

            painter.rect_filled(response.rect, 0.0, Color32::BLACK);

            for row in 0..rows {
                for col in 0..cols {
                    let rect = Rect::from_min_size(
                        origin + Vec2::new(col as f32 * pitch, row as f32 * pitch),
                        Vec2::splat(pitch - SPACING),
                    );
                    let cell_color = if grid.is_alive(row, col) {
                        self.live_color
                    } else {
                        self.dead_color
                    };
                    painter.rect_filled(rect, 1.0, cell_color);
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let offset = pos - origin;
                    let row = (offset.y / pitch) as usize;
                    let col = (offset.x / pitch) as usize;
                    report(self.sim.toggle(row, col));
                }
            }

            ui.separator();

            let live_cells = grid.live_count();
            let total = rows * cols;
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", total - live_cells));
                ui.label(format!("Population: {:.1}%", live_cells as f32 / total as f32 * 100.0));
            });
        });
    }
}

fn report(result: conway::Result<()>) {
    if let Err(err) = result {
        warn!(%err, "command rejected");
    }
}
