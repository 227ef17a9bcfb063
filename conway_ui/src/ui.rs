// ui.rs - egui panels and grid drawing for the simulation

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use crate::GameOfLife;

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // One cadence tick per frame while running
        self.tick();

        egui::SidePanel::right("state_panel").show(ctx, |ui| {
            ui.heading("State");

            ui.horizontal(|ui| {
                if ui.button("Show State").clicked() {
                    self.show_state();
                }
                if ui.button("Load State").clicked() {
                    self.load_state();
                }
            });

            ui.label("Raw state:");
            egui::ScrollArea::vertical()
                .id_source("raw_state_scroll")
                .max_height(250.0)
                .show(ui, |ui| {
                    ui.add(egui::TextEdit::multiline(&mut self.raw_state).desired_rows(10));
                });

            ui.separator();

            ui.label("Live cell coordinates:");
            egui::ScrollArea::vertical()
                .id_source("live_cells_scroll")
                .show(ui, |ui| {
                    ui.label(self.live_cells.as_str());
                });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            // Controls
            ui.horizontal(|ui| {
                let running = self.simulation.is_running();
                let button_text = if running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    if running { self.pause(); } else { self.start(); }
                }

                if ui.add_enabled(!running, egui::Button::new("⏭ Step")).clicked() {
                    self.step_once();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.clear();
                }

                if ui.button("🎲 Random").clicked() {
                    self.randomize();
                }

                ui.separator();

                // Pattern dropdown
                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(conway::PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in conway::PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.apply_selected_pattern();
                }

                ui.separator();

                ui.label(format!("Generation: {}", self.simulation.generation()));
            });

            ui.separator();

            // Settings; size changes take effect on Reset
            ui.horizontal(|ui| {
                ui.label("Width:");
                ui.add(egui::DragValue::new(&mut self.pending.width).clamp_range(60..=3000).speed(10));
                ui.label("Height:");
                ui.add(egui::DragValue::new(&mut self.pending.height).clamp_range(60..=3000).speed(10));
                ui.label("Cell size:");
                ui.add(egui::DragValue::new(&mut self.pending.cell_size).clamp_range(2..=60));
                ui.label("Frames/step:");
                ui.add(egui::DragValue::new(&mut self.pending.frames_per_step).clamp_range(1..=120));
                ui.label("Steps/tick:");
                ui.add(egui::DragValue::new(&mut self.pending.steps_per_tick).clamp_range(1..=100));

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                ui.separator();

                let mut pause_on_stall = self.simulation.settings().pause_on_stall;
                if ui.checkbox(&mut pause_on_stall, "Pause on stall").changed() {
                    self.simulation.set_pause_on_stall(pause_on_stall);
                    self.pending.pause_on_stall = pause_on_stall;
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();

            ui.label(self.message.as_str());

            ui.separator();

            // Draw the grid
            let cell_size = self.simulation.settings().cell_size as f32;
            let (columns, rows) = self.simulation.dimensions();

            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(cell_size * columns as f32, cell_size * rows as f32);

            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click_and_drag());

            // Fill background
            painter.rect_filled(
                Rect::from_min_size(start_pos, total_size),
                0.0,
                Color32::BLACK,
            );

            let grid = self.simulation.current();
            for x in 0..columns {
                for y in 0..rows {
                    let rect = Rect::from_min_size(
                        egui::pos2(start_pos.x + x as f32 * cell_size, start_pos.y + y as f32 * cell_size),
                        Vec2::splat(cell_size),
                    );

                    if grid.is_alive(x, y) {
                        painter.rect_filled(rect, 0.0, self.live_color);
                    } else {
                        painter.rect_filled(rect, 0.0, self.dead_color);
                        painter.rect_stroke(rect, 0.0, Stroke::new(0.2, Color32::from_gray(60)));
                    }
                }
            }

            // Clicking toggles, dragging paints; both only while not running
            if !self.simulation.is_running() {
                if let Some(pos) = response.interact_pointer_pos() {
                    if let Some((x, y)) = self.cell_at(pos.x - start_pos.x, pos.y - start_pos.y) {
                        let edited = if response.clicked() {
                            self.simulation.toggle_cell(x, y).map(|_| ())
                        } else if response.dragged() {
                            self.simulation.mark_cell(x, y)
                        } else {
                            Ok(())
                        };
                        if let Err(e) = edited {
                            self.message = e.to_string();
                        }
                    }
                }
            }

            ui.separator();

            let live_cells = self.simulation.current().population();
            let total = (columns * rows).max(1);
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", total - live_cells));
                ui.label(format!("Population: {:.1}%", (live_cells as f32 / total as f32) * 100.0));
            });
        });

        // Request repaint if running to keep animation smooth
        if self.simulation.is_running() {
            ctx.request_repaint();
        }
    }
}
